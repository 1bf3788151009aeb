//! Purpose: Per-resource operations built from one request plus the decoder, or the paginator.
//! Exports: `ProgramService`, `ReportService`, `CredentialService`.
//! Role: Borrowed views over a `Client`; they hold no state of their own.
//! Invariants: Every `list_all_*` operation is all-or-nothing.

mod credentials;
mod programs;
mod reports;

pub use credentials::CredentialService;
pub use programs::ProgramService;
pub use reports::ReportService;
