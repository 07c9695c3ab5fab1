//! # ModKit - shared plumbing for the dashboard modules
//!
//! Currently this is the outgoing HTTP side: a traced `reqwest` client that
//! opens an `outgoing_http` span per request and propagates a W3C
//! `traceparent` header, so module adapters (roster fetch, form submission)
//! do not each reimplement it.

pub mod http;

pub use http::client::{ClientError, TracedClient};
