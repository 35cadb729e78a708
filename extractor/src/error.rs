//! Extractor error types

use shared::ProviderId;
use thiserror::Error;

use crate::types::WorkstreamFailure;

/// Result type for extractor operations
pub type ExtractorResult<T> = Result<T, ExtractorError>;

/// Extractor error taxonomy.
///
/// Transport, Provider and MalformedResponse failures are absorbed at the
/// workstream boundary and converted into soft empty results. Orchestration
/// is the only variant that reaches the HTTP surface on the extract path;
/// Config is fatal before any workstream runs.
#[derive(Error, Debug, Clone)]
pub enum ExtractorError {
    #[error("Transport failure calling {provider}: {message}")]
    Transport {
        provider: ProviderId,
        message: String,
    },

    #[error("Provider {provider} returned HTTP {status}: {body}")]
    Provider {
        provider: ProviderId,
        status: u16,
        body: String,
    },

    #[error("Malformed model response: {detail}")]
    MalformedResponse { detail: String },

    #[error("Extraction below success threshold: {succeeded} of {dispatched} workstreams succeeded, {required} required")]
    Orchestration {
        succeeded: usize,
        required: usize,
        dispatched: usize,
        failures: Vec<WorkstreamFailure>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl ExtractorError {
    /// Transient failures are retried by the per-workstream policy;
    /// parse and configuration failures are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ExtractorError::Transport { .. } | ExtractorError::Provider { .. }
        )
    }

    /// Short error class for diagnostics and workstream failure listings
    pub fn class(&self) -> &'static str {
        match self {
            ExtractorError::Transport { .. } => "transport",
            ExtractorError::Provider { .. } => "provider",
            ExtractorError::MalformedResponse { .. } => "malformed_response",
            ExtractorError::Orchestration { .. } => "orchestration",
            ExtractorError::Config { .. } => "config",
        }
    }
}
