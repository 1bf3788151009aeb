use crate::core::error::Error;
use crate::core::jsonapi::{Relationships, Resource};
use crate::core::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

use super::User;

/// One entry of a report's timeline. The `type` names the subtype, e.g. `activity-comment`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Activity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub actor: Option<User>,
}

impl Activity {
    pub const COMMENT_TYPE: &'static str = "activity-comment";
}

impl Resource for Activity {
    const TYPE: &'static str = "activity";

    fn accepts_type(kind: &str) -> bool {
        kind == Self::TYPE || kind.starts_with("activity-")
    }

    // Actors can be users or programs; only user actors are decoded.
    fn relate(&mut self, relationships: &mut Relationships) -> Result<(), Error> {
        self.actor = relationships.one_if_type("actor")?;
        Ok(())
    }
}
