use crate::core::error::Error;
use crate::core::jsonapi::{Relationships, Resource};
use crate::core::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

use super::User;

/// A bug bounty or vulnerability disclosure program.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Program {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<Group>>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<Member>>,
}

impl Resource for Program {
    const TYPE: &'static str = "program";

    fn relate(&mut self, relationships: &mut Relationships) -> Result<(), Error> {
        self.groups = relationships.many("groups")?;
        self.members = relationships.many("members")?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Group {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl Resource for Group {
    const TYPE: &'static str = "group";
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Member {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Resource for Member {
    const TYPE: &'static str = "member";

    fn relate(&mut self, relationships: &mut Relationships) -> Result<(), Error> {
        self.user = relationships.one("user")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Program;
    use crate::core::jsonapi::decode;
    use serde_json::json;

    const PROGRAM: &[u8] = br#"{
        "data": {
            "id": "1337",
            "type": "program",
            "attributes": {
                "handle": "security",
                "policy": "Be nice.",
                "created_at": "2016-02-02T04:05:06.000Z",
                "updated_at": "2016-02-02T04:05:06.000Z"
            },
            "relationships": {
                "groups": {"data": [
                    {"id": "2557", "type": "group", "attributes": {"name": "Standard", "permissions": ["report_management"]}}
                ]},
                "members": {"data": [
                    {"id": "1339", "type": "member", "attributes": {"permissions": ["program_management"]},
                     "relationships": {"user": {"data": {"id": "1338", "type": "user", "attributes": {"username": "member-user"}}}}}
                ]}
            }
        }
    }"#;

    #[test]
    fn program_flattens_attributes_and_relationships() {
        let program: Program = decode(PROGRAM).expect("program");
        assert_eq!(program.id.as_deref(), Some("1337"));
        assert_eq!(program.handle.as_deref(), Some("security"));
        assert_eq!(program.policy.as_deref(), Some("Be nice."));

        let groups = program.groups.expect("groups");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name.as_deref(), Some("Standard"));
        assert_eq!(
            groups[0].permissions.as_deref(),
            Some(&["report_management".to_string()][..])
        );

        let members = program.members.expect("members");
        let user = members[0].user.as_ref().expect("user");
        assert_eq!(user.username.as_deref(), Some("member-user"));
    }

    #[test]
    fn empty_relationship_data_is_empty_not_missing() {
        let program: Program = decode(
            br#"{"data":{"id":"1","type":"program","relationships":{"groups":{"data":[]}}}}"#,
        )
        .expect("program");
        assert_eq!(program.groups, Some(Vec::new()));
        assert_eq!(program.members, None);
    }

    #[test]
    fn reencoding_keeps_attribute_values() {
        let program: Program = decode(PROGRAM).expect("program");
        let value = serde_json::to_value(&program).expect("json");
        assert_eq!(value["handle"], json!("security"));
        assert_eq!(value["policy"], json!("Be nice."));
        assert_eq!(value["created_at"], json!("2016-02-02T04:05:06Z"));
        assert_eq!(value["groups"][0]["name"], json!("Standard"));
    }
}
