//! Extractor-specific data types

use serde::{Deserialize, Serialize};
use shared::{ExtractionId, Phase, ProviderId};
use std::fmt;
use std::time::Duration;

/// One independent AI-extraction task.
///
/// The id fixes the workstream's prompt, parse target and merge routing at
/// compile time. Phases 0..3 address the first four workstreams; the hook
/// workstream runs only in full fan-out mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkstreamId {
    CustomerProfile,
    Transformations,
    Differentiators,
    Personas,
    Hooks,
}

impl WorkstreamId {
    pub const ALL: [WorkstreamId; 5] = [
        WorkstreamId::CustomerProfile,
        WorkstreamId::Transformations,
        WorkstreamId::Differentiators,
        WorkstreamId::Personas,
        WorkstreamId::Hooks,
    ];

    pub fn index(&self) -> usize {
        match self {
            WorkstreamId::CustomerProfile => 0,
            WorkstreamId::Transformations => 1,
            WorkstreamId::Differentiators => 2,
            WorkstreamId::Personas => 3,
            WorkstreamId::Hooks => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            WorkstreamId::CustomerProfile => "customer_profile",
            WorkstreamId::Transformations => "transformations",
            WorkstreamId::Differentiators => "differentiators",
            WorkstreamId::Personas => "personas",
            WorkstreamId::Hooks => "hooks",
        }
    }

    /// Destination profile fields this workstream is routed to.
    /// The merge never writes a workstream's output anywhere else.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            WorkstreamId::CustomerProfile => {
                &["customer_triggers", "pain_points", "desired_outcomes"]
            }
            WorkstreamId::Transformations => &["transformations", "benefits"],
            WorkstreamId::Differentiators => {
                &["products_services", "differentiators", "proof_points"]
            }
            WorkstreamId::Personas => &["personas", "objections"],
            WorkstreamId::Hooks => &["power_words", "hook_library"],
        }
    }
}

impl fmt::Display for WorkstreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Settled outcome of one workstream invocation. Owned by the orchestrator
/// that dispatched it and dropped after the merge.
#[derive(Debug, Clone)]
pub struct WorkstreamResult {
    pub id: WorkstreamId,
    pub success: bool,
    pub data: serde_json::Value,
    pub error: Option<String>,
    pub duration_ms: u64,
}

impl WorkstreamResult {
    pub fn success(id: WorkstreamId, data: serde_json::Value, duration: Duration) -> Self {
        Self {
            id,
            success: true,
            data,
            error: None,
            duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn failure(id: WorkstreamId, error: String, duration: Duration) -> Self {
        Self {
            id,
            success: false,
            data: serde_json::Value::Null,
            error: Some(error),
            duration_ms: duration.as_millis() as u64,
        }
    }
}

/// Per-workstream diagnostic carried by threshold failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkstreamFailure {
    pub workstream: WorkstreamId,
    pub error: String,
}

/// A buyer persona extracted by the persona workstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub frustrations: Vec<String>,
}

/// Merged extraction output. Built fresh per request and never mutated
/// after construction; fields from failed workstreams stay empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnhancedProfile {
    #[serde(default)]
    pub customer_triggers: Vec<String>,
    #[serde(default)]
    pub pain_points: Vec<String>,
    #[serde(default)]
    pub desired_outcomes: Vec<String>,
    #[serde(default)]
    pub transformations: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub products_services: Vec<String>,
    #[serde(default)]
    pub differentiators: Vec<String>,
    #[serde(default)]
    pub proof_points: Vec<String>,
    #[serde(default)]
    pub personas: Vec<Persona>,
    #[serde(default)]
    pub objections: Vec<String>,
    #[serde(default)]
    pub power_words: Vec<String>,
    #[serde(default)]
    pub hook_library: Vec<String>,
    /// Informational telemetry only, never used for control flow
    #[serde(default)]
    pub validation_score: u32,
}

/// Successful orchestration outcome handed to the HTTP surface
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub extraction_id: ExtractionId,
    pub profile: EnhancedProfile,
    pub parallel_calls: usize,
    pub extraction_time_ms: u64,
    pub phase: Phase,
}

/// Normalized provider completion response
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub provider: ProviderId,
    pub model_used: String,
    pub tokens_used: u32,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub response_time: Duration,
}
