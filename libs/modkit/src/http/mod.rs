//! HTTP utilities for modkit

pub mod client;
pub mod trace;
