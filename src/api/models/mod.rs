//! Purpose: Typed platform resources decoded from JSON:API documents.
//! Exports: One struct per resource plus request bodies for write operations.
//! Role: Pure data; every attribute is optional because the API may omit any of them.
//! Invariants: Field names match the wire contract verbatim (via serde renames where needed).
//! Invariants: Relationship fields are never read from `attributes`.

mod activity;
mod credential;
mod program;
mod report;
mod requests;
mod structured_scope;
mod user;

pub use activity::Activity;
pub use credential::{
    Credential, CredentialInquiry, CredentialInquiryResponse, Credentials, CredentialsTable,
};
pub use program::{Group, Member, Program};
pub use report::{Report, ReportSummary, Weakness};
pub use requests::{CreateComment, CreateCredential, StateChange};
pub use structured_scope::StructuredScope;
pub use user::{User, UserProfilePicture};
