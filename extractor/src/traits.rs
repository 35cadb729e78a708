//! Trait definitions for extractor dependency injection

use async_trait::async_trait;

use crate::error::ExtractorResult;
use crate::types::{CompletionResponse, ExtractionOutcome};
use shared::{ExtractionRequest, ProviderKey, RequestConfig};

/// Single-completion call against one provider.
///
/// Implementations normalize every provider wire format into
/// [`CompletionResponse`] so callers never branch on the provider.
#[mockall::automock]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        prompt: String,
        config: RequestConfig,
        key: ProviderKey,
    ) -> ExtractorResult<CompletionResponse>;
}

/// Full extraction pass over one request, from fan-out to merged profile
#[mockall::automock]
#[async_trait]
pub trait ExtractionEngine: Send + Sync {
    async fn extract(&self, request: ExtractionRequest) -> ExtractorResult<ExtractionOutcome>;
}
