//! Purpose: Define the public Rust API boundary for the platform client.
//! Exports: `Client`, services, models, listing options, transport seam, and core re-exports.
//! Role: Public, additive-only surface; decoder and paginator internals are reached through it.
//! Invariants: Services are only obtainable from a `Client`.
//! Invariants: Every fallible operation returns `crate::api::Error`.

mod client;
pub mod models;
mod options;
mod services;
pub mod transport;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::jsonapi::{
    Document, Relationships, Resource, decode, decode_document, decode_list, decode_list_document,
    decode_value,
};
pub use crate::core::links::PageLinks;
pub use crate::core::paginate::{
    DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE, ListOptions, MAX_PAGE_SIZE, Page, Paginator, fetch_all,
};
pub use crate::core::timestamp::Timestamp;
pub use client::{Client, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, Response};
pub use options::{ReportListFilter, apply_list_options};
pub use services::{CredentialService, ProgramService, ReportService};
pub use transport::{Method, RawResponse, Request, Transport, UreqTransport};
