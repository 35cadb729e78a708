//! Shared types for the profile extraction service
//!
//! Contains only types that cross crate boundaries: provider identity,
//! request configuration, and the extraction request itself. Component
//! internal types (workstream results, HTTP bodies) are kept in their
//! respective crates.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
