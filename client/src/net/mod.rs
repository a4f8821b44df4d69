//! Networking modules for the backend JSON API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls and `types` decodes the upstream payloads the
//! server proxies through unchanged.

pub mod api;
pub mod types;
