//! Shared error types for the profile extraction service

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid request field {field}: {message}")]
    InvalidRequest { field: String, message: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
