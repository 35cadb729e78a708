//! Extraction engine for the profile extraction service
//!
//! Fans out independent AI-extraction workstreams concurrently across LLM
//! providers, collects every settled outcome, applies a success-count
//! threshold, and merges the partial results into one enhanced profile.

pub mod error;
pub mod extractor_impl;
pub mod merge;
pub mod prompt;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use error::{ExtractorError, ExtractorResult};
pub use extractor_impl::{Extractor, ExtractorConfig, DEFAULT_MIN_SUCCESS};
pub use traits::{CompletionClient, ExtractionEngine, MockCompletionClient, MockExtractionEngine};
pub use types::*;

// Re-export service implementations
pub use services::{HttpCompletionClient, KeyRegistry, ProviderEndpoints, RetryPolicy};
