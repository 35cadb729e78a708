//! Shared fixtures for extractor integration tests
#![allow(dead_code)]

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use extractor::{
    CompletionClient, CompletionResponse, ExtractorError, ExtractorResult, KeyRegistry,
    RetryPolicy, WorkstreamId,
};
use serde_json::json;
use shared::{ExtractionRequest, Phase, ProviderId, ProviderKey, RequestConfig};

pub fn sample_request() -> ExtractionRequest {
    ExtractionRequest {
        website_content: "We coach busy parents back to fitness with 30-minute home workouts. \
                          Over 500 families trained since 2019."
            .to_string(),
        business_name: "Acme Fitness".to_string(),
        industry: "fitness".to_string(),
        phase: None,
    }
}

pub fn phased_request(phase: Phase) -> ExtractionRequest {
    ExtractionRequest {
        phase: Some(phase),
        ..sample_request()
    }
}

pub fn test_keys() -> KeyRegistry {
    let keys = [
        ProviderId::OpenRouter,
        ProviderId::Anthropic,
        ProviderId::OpenAI,
    ]
    .into_iter()
    .enumerate()
    .map(|(index, provider)| ProviderKey {
        index,
        provider,
        secret: format!("test-key-{index}"),
    })
    .collect();
    KeyRegistry::from_keys(keys).expect("non-empty key pool")
}

pub fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 1,
        base_delay: Duration::from_millis(1),
        jitter: false,
    }
}

/// Superset payload carrying every routed field; each workstream's merge
/// only reads its own keys out of it.
pub fn full_payload() -> serde_json::Value {
    json!({
        "customer_triggers": ["new baby", "health scare"],
        "pain_points": ["no time to exercise"],
        "desired_outcomes": ["more energy"],
        "transformations": ["exhausted to energized"],
        "benefits": ["30-minute workouts"],
        "products_services": ["online coaching"],
        "differentiators": ["parent-focused programming"],
        "proof_points": ["500 families trained"],
        "personas": [{
            "name": "Busy Parent",
            "summary": "time-poor professional with young kids",
            "goals": ["regain fitness"],
            "frustrations": ["gym schedules never fit"]
        }],
        "objections": ["no time for another commitment"],
        "power_words": ["transform", "effortless"],
        "hook_library": ["What if 30 minutes a day was all it took?"]
    })
}

/// Identify which workstream a prompt belongs to by its routed field names
pub fn workstream_of(prompt: &str) -> WorkstreamId {
    if prompt.contains("pain_points") {
        WorkstreamId::CustomerProfile
    } else if prompt.contains("benefits") {
        WorkstreamId::Transformations
    } else if prompt.contains("products_services") {
        WorkstreamId::Differentiators
    } else if prompt.contains("objections") {
        WorkstreamId::Personas
    } else {
        WorkstreamId::Hooks
    }
}

/// Deterministic in-process client: fails the scripted workstreams, sleeps
/// the configured delay, succeeds everywhere else with a superset payload.
pub struct ScriptedClient {
    fail: HashSet<WorkstreamId>,
    delay: Duration,
}

impl ScriptedClient {
    pub fn all_pass() -> Self {
        Self {
            fail: HashSet::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn failing(ids: impl IntoIterator<Item = WorkstreamId>) -> Self {
        Self {
            fail: ids.into_iter().collect(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(
        &self,
        prompt: String,
        _config: RequestConfig,
        key: ProviderKey,
    ) -> ExtractorResult<CompletionResponse> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let id = workstream_of(&prompt);
        if self.fail.contains(&id) {
            return Err(ExtractorError::Provider {
                provider: key.provider,
                status: 503,
                body: "overloaded".to_string(),
            });
        }

        Ok(CompletionResponse {
            content: full_payload().to_string(),
            provider: key.provider,
            model_used: "test-model".to_string(),
            tokens_used: 100,
            prompt_tokens: 80,
            completion_tokens: 20,
            response_time: self.delay,
        })
    }
}
