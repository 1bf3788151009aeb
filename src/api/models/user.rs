use crate::core::error::Error;
use crate::core::jsonapi::{Relationships, Resource};
use crate::core::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

use super::Program;

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct UserProfilePicture {
    #[serde(rename = "62x62", skip_serializing_if = "Option::is_none")]
    pub size_62x62: Option<String>,
    #[serde(rename = "82x82", skip_serializing_if = "Option::is_none")]
    pub size_82x82: Option<String>,
    #[serde(rename = "110x110", skip_serializing_if = "Option::is_none")]
    pub size_110x110: Option<String>,
    #[serde(rename = "260x260", skip_serializing_if = "Option::is_none")]
    pub size_260x260: Option<String>,
}

/// An individual platform account.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<UserProfilePicture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reputation: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hackerone_triager: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub participating_programs: Option<Vec<Program>>,
}

impl Resource for User {
    const TYPE: &'static str = "user";

    fn relate(&mut self, relationships: &mut Relationships) -> Result<(), Error> {
        self.participating_programs = relationships.many("participating_programs")?;
        Ok(())
    }
}
