//! HTTP completion client
//!
//! One reqwest client shared across all workstreams. Each provider speaks its
//! own wire format; this module owns the request bodies, auth headers and
//! response envelopes, and normalizes everything into [`CompletionResponse`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::{ExtractorError, ExtractorResult};
use crate::traits::CompletionClient;
use crate::types::CompletionResponse;
use shared::{ProviderId, ProviderKey, RequestConfig};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Per-provider endpoint URLs, overridable for tests
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub openrouter: String,
    pub anthropic: String,
    pub openai: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            openrouter: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            anthropic: "https://api.anthropic.com/v1/messages".to_string(),
            openai: "https://api.openai.com/v1/chat/completions".to_string(),
        }
    }
}

impl ProviderEndpoints {
    fn url(&self, provider: ProviderId) -> &str {
        match provider {
            ProviderId::OpenRouter => &self.openrouter,
            ProviderId::Anthropic => &self.anthropic,
            ProviderId::OpenAI => &self.openai,
        }
    }
}

pub struct HttpCompletionClient {
    http: reqwest::Client,
    endpoints: ProviderEndpoints,
}

impl HttpCompletionClient {
    pub fn new() -> ExtractorResult<Self> {
        Self::with_endpoints(ProviderEndpoints::default())
    }

    pub fn with_endpoints(endpoints: ProviderEndpoints) -> ExtractorResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ExtractorError::Config {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { http, endpoints })
    }

    async fn dispatch(
        &self,
        prompt: &str,
        config: &RequestConfig,
        key: &ProviderKey,
    ) -> ExtractorResult<CompletionResponse> {
        let provider = key.provider;
        let model = config.model_for(provider);
        let url = self.endpoints.url(provider);
        let started = Instant::now();

        let request = match provider {
            ProviderId::OpenRouter | ProviderId::OpenAI => self
                .http
                .post(url)
                .bearer_auth(&key.secret)
                .json(&json!({
                    "model": model,
                    "messages": [{"role": "user", "content": prompt}],
                    "max_tokens": config.max_tokens,
                    "temperature": config.temperature,
                })),
            ProviderId::Anthropic => self
                .http
                .post(url)
                .header("x-api-key", &key.secret)
                .header("anthropic-version", "2023-06-01")
                .json(&json!({
                    "model": model,
                    "max_tokens": config.max_tokens,
                    "temperature": config.temperature,
                    "messages": [{"role": "user", "content": prompt}],
                })),
        };

        let response = request.send().await.map_err(|e| {
            warn!(%provider, error = %e, "transport failure");
            ExtractorError::Transport {
                provider,
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%provider, status = status.as_u16(), "provider returned error status");
            return Err(ExtractorError::Provider {
                provider,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let envelope: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| ExtractorError::MalformedResponse {
                    detail: format!("{provider} response body is not JSON: {e}"),
                })?;

        let content = extract_content(provider, &envelope)?;
        let (prompt_tokens, completion_tokens) = extract_usage(provider, &envelope);
        let elapsed = started.elapsed();

        debug!(
            %provider,
            model,
            prompt_tokens,
            completion_tokens,
            elapsed_ms = elapsed.as_millis() as u64,
            "completion call finished"
        );

        Ok(CompletionResponse {
            content,
            provider,
            model_used: model.to_string(),
            tokens_used: prompt_tokens + completion_tokens,
            prompt_tokens,
            completion_tokens,
            response_time: elapsed,
        })
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(
        &self,
        prompt: String,
        config: RequestConfig,
        key: ProviderKey,
    ) -> ExtractorResult<CompletionResponse> {
        if prompt.trim().is_empty() {
            return Err(ExtractorError::Config {
                message: "refusing to send an empty prompt".to_string(),
            });
        }
        if config.max_tokens == 0 {
            return Err(ExtractorError::Config {
                message: "max_tokens must be greater than zero".to_string(),
            });
        }

        self.dispatch(&prompt, &config, &key).await
    }
}

/// Pull the assistant text out of a provider response envelope
fn extract_content(provider: ProviderId, envelope: &serde_json::Value) -> ExtractorResult<String> {
    let content = match provider {
        ProviderId::OpenRouter | ProviderId::OpenAI => envelope
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str()),
        ProviderId::Anthropic => envelope
            .pointer("/content/0/text")
            .and_then(|v| v.as_str()),
    };

    match content {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        Some(_) => Err(ExtractorError::MalformedResponse {
            detail: format!("{provider} returned an empty completion"),
        }),
        None => Err(ExtractorError::MalformedResponse {
            detail: format!("{provider} envelope missing completion content"),
        }),
    }
}

fn extract_usage(provider: ProviderId, envelope: &serde_json::Value) -> (u32, u32) {
    let (prompt_path, completion_path) = match provider {
        ProviderId::OpenRouter | ProviderId::OpenAI => {
            ("/usage/prompt_tokens", "/usage/completion_tokens")
        }
        ProviderId::Anthropic => ("/usage/input_tokens", "/usage/output_tokens"),
    };

    let read = |path: &str| {
        envelope
            .pointer(path)
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32
    };

    (read(prompt_path), read(completion_path))
}

/// Cap error bodies carried inside error variants
fn truncate_body(body: &str) -> String {
    const MAX: usize = 512;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
