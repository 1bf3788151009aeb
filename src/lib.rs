//! Purpose: Typed client library for the HackerOne JSON:API, shared by the `h1` CLI and tests.
//! Exports: `api` (client, services, models), `config` (environment-driven settings), `core`.
//! Role: `api` is the supported surface; `core` holds the decoder, paginator, and errors.
//! Invariants: Library code never prints; diagnostics go through `tracing`.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod config;
pub mod core;
