//! Request bodies for write operations. Each serializes to the full envelope the endpoint expects.
use serde::Serialize;
use serde::ser::Serializer;

#[derive(Serialize)]
struct Envelope<'a, A: Serialize> {
    data: EnvelopeData<'a, A>,
}

#[derive(Serialize)]
struct EnvelopeData<'a, A: Serialize> {
    #[serde(rename = "type")]
    kind: &'a str,
    attributes: &'a A,
}

fn wrap<S: Serializer, A: Serialize>(
    serializer: S,
    kind: &str,
    attributes: &A,
) -> Result<S::Ok, S::Error> {
    Envelope {
        data: EnvelopeData { kind, attributes },
    }
    .serialize(serializer)
}

#[derive(Serialize)]
struct StateChangeAttributes<'a> {
    message: &'a str,
    state: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_report_id: Option<&'a str>,
}

/// Moves a report to a new state, optionally marking it a duplicate of `original_report_id`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateChange {
    pub message: String,
    pub state: String,
    pub original_report_id: Option<String>,
}

impl StateChange {
    pub const TYPE: &'static str = "state-change";
}

impl Serialize for StateChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let attributes = StateChangeAttributes {
            message: &self.message,
            state: &self.state,
            original_report_id: self.original_report_id.as_deref(),
        };
        wrap(serializer, Self::TYPE, &attributes)
    }
}

#[derive(Serialize)]
struct CommentAttributes<'a> {
    message: &'a str,
    internal: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateComment {
    pub message: String,
    pub internal: bool,
}

impl Serialize for CreateComment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let attributes = CommentAttributes {
            message: &self.message,
            internal: self.internal,
        };
        wrap(serializer, super::Activity::COMMENT_TYPE, &attributes)
    }
}

#[derive(Serialize)]
struct CredentialAttributes<'a> {
    credentials: &'a str,
    assignee: &'a str,
}

/// New credential for a structured scope.
///
/// `credentials` is the JSON text of the credential payload; the endpoint expects a
/// string attribute, and `structured_scope_id` sits beside `data` rather than inside it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateCredential {
    pub structured_scope_id: String,
    pub credentials: String,
    pub assignee: String,
}

impl Serialize for CreateCredential {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            structured_scope_id: &'a str,
            data: EnvelopeData<'a, CredentialAttributes<'a>>,
        }

        let attributes = CredentialAttributes {
            credentials: &self.credentials,
            assignee: &self.assignee,
        };
        Body {
            structured_scope_id: &self.structured_scope_id,
            data: EnvelopeData {
                kind: "credential",
                attributes: &attributes,
            },
        }
        .serialize(serializer)
    }
}
