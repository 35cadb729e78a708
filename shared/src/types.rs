//! Core shared types and identifiers

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

use crate::errors::{SharedError, SharedResult};

/// Unique identifier for one extraction run
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtractionId(Uuid);

impl ExtractionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ExtractionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExtractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for downstream LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenRouter,
    Anthropic,
    OpenAI,
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ProviderId {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openrouter" => Some(ProviderId::OpenRouter),
            "anthropic" => Some(ProviderId::Anthropic),
            "openai" => Some(ProviderId::OpenAI),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenRouter => "openrouter",
            ProviderId::Anthropic => "anthropic",
            ProviderId::OpenAI => "openai",
        }
    }

    /// Environment variable that carries this provider's API key
    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderId::OpenRouter => "OPENROUTER_API_KEY",
            ProviderId::Anthropic => "ANTHROPIC_API_KEY",
            ProviderId::OpenAI => "OPENAI_API_KEY",
        }
    }

    /// Default completion model for this provider
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderId::OpenRouter => "anthropic/claude-3-haiku",
            ProviderId::Anthropic => "claude-3-haiku-20240307",
            ProviderId::OpenAI => "gpt-4o-mini",
        }
    }
}

/// One provider credential resolved from the environment at startup.
/// Read-only during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderKey {
    pub index: usize,
    pub provider: ProviderId,
    pub secret: String,
}

/// Configuration for provider completion requests
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Model override; `None` uses the provider default
    pub model: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: 1500,
            temperature: 0.7,
        }
    }
}

impl RequestConfig {
    /// Resolve the model name to send to a given provider
    pub fn model_for(&self, provider: ProviderId) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| provider.default_model().to_string())
    }
}

/// Orchestration mode: `All` fans out every workstream, a numbered phase
/// dispatches exactly one (used for progressive loading by callers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Zero,
    One,
    Two,
    Three,
    All,
}

impl Phase {
    /// Workstream index selected by this phase, `None` for full fan-out
    pub fn workstream_index(&self) -> Option<usize> {
        match self {
            Phase::Zero => Some(0),
            Phase::One => Some(1),
            Phase::Two => Some(2),
            Phase::Three => Some(3),
            Phase::All => None,
        }
    }

    pub fn from_index(value: u64) -> Option<Self> {
        match value {
            0 => Some(Phase::Zero),
            1 => Some(Phase::One),
            2 => Some(Phase::Two),
            3 => Some(Phase::Three),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.workstream_index() {
            Some(idx) => write!(f, "{idx}"),
            None => write!(f, "all"),
        }
    }
}

// Wire format accepts either an integer 0..=3 or the string "all".
impl Serialize for Phase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.workstream_index() {
            Some(idx) => serializer.serialize_u64(idx as u64),
            None => serializer.serialize_str("all"),
        }
    }
}

impl<'de> Deserialize<'de> for Phase {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match &value {
            serde_json::Value::Number(n) => n
                .as_u64()
                .and_then(Phase::from_index)
                .ok_or_else(|| D::Error::custom(format!("phase out of range: {n}"))),
            serde_json::Value::String(s) if s.eq_ignore_ascii_case("all") => Ok(Phase::All),
            serde_json::Value::String(s) => s
                .parse::<u64>()
                .ok()
                .and_then(Phase::from_index)
                .ok_or_else(|| D::Error::custom(format!("invalid phase: {s}"))),
            other => Err(D::Error::custom(format!("invalid phase: {other}"))),
        }
    }
}

/// Immutable input to one orchestration run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRequest {
    pub website_content: String,
    pub business_name: String,
    pub industry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
}

impl ExtractionRequest {
    /// Effective orchestration mode (absent phase means full fan-out)
    pub fn phase(&self) -> Phase {
        self.phase.unwrap_or(Phase::All)
    }

    pub fn validate(&self) -> SharedResult<()> {
        if self.website_content.trim().is_empty() {
            return Err(SharedError::InvalidRequest {
                field: "websiteContent".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.business_name.trim().is_empty() {
            return Err(SharedError::InvalidRequest {
                field: "businessName".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
