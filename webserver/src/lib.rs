//! HTTP surface for the profile extraction service
//!
//! Thin axum layer over the extraction engine: request validation, error
//! mapping to status codes, and a small set of status endpoints.

pub mod error;
pub mod state;
pub mod types;
pub mod webserver_impl;

// Re-export main types
pub use error::{WebServerError, WebServerResult};
pub use state::AppState;
pub use types::*;
pub use webserver_impl::WebServer;
