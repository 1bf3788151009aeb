use crate::core::error::Error;
use crate::core::jsonapi::{Relationships, Resource};
use crate::core::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Activity, Program, StructuredScope, User};

/// A vulnerability report submitted to a program.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vulnerability_information: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triaged_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclosed_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounty_awarded_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_tracker_reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_tracker_reference_url: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub reporter: Option<User>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub program: Option<Program>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub weakness: Option<Weakness>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub structured_scope: Option<StructuredScope>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub summaries: Option<Vec<ReportSummary>>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<Activity>>,
}

impl Resource for Report {
    const TYPE: &'static str = "report";

    fn relate(&mut self, relationships: &mut Relationships) -> Result<(), Error> {
        self.reporter = relationships.one("reporter")?;
        // Assignees can also be groups; only user assignees are kept.
        self.assignee = relationships.one_if_type("assignee")?;
        self.program = relationships.one("program")?;
        self.weakness = relationships.one("weakness")?;
        self.structured_scope = relationships.one("structured_scope")?;
        self.summaries = relationships.many("summaries")?;
        self.activities = relationships.many("activities")?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ReportSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Resource for ReportSummary {
    const TYPE: &'static str = "report-summary";

    fn relate(&mut self, relationships: &mut Relationships) -> Result<(), Error> {
        self.user = relationships.one("user")?;
        Ok(())
    }
}

/// Weakness classification (CWE/CAPEC) attached to a report.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Weakness {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl Resource for Weakness {
    const TYPE: &'static str = "weakness";
}
