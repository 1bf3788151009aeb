use crate::core::jsonapi::Resource;
use crate::core::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// An asset a program declares in or out of scope.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct StructuredScope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligible_for_bounty: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligible_for_submission: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidentiality_requirement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity_requirement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_requirement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Resource for StructuredScope {
    const TYPE: &'static str = "structured-scope";
}
