//! API wire types for the HTTP surface

use extractor::{EnhancedProfile, ExtractionOutcome};
use serde::Serialize;
use shared::{Phase, ProviderId};

/// Success body for the extract endpoint. Profile fields are flattened to
/// the top level; metadata keys are camelCase to match the request format.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub success: bool,
    pub extraction_id: String,
    #[serde(flatten)]
    pub profile: EnhancedProfile,
    pub extraction_time: u64,
    pub parallel_calls: usize,
    pub phase: Phase,
}

impl From<ExtractionOutcome> for ExtractResponse {
    fn from(outcome: ExtractionOutcome) -> Self {
        Self {
            success: true,
            extraction_id: outcome.extraction_id.to_string(),
            profile: outcome.profile,
            extraction_time: outcome.extraction_time_ms,
            parallel_calls: outcome.parallel_calls,
            phase: outcome.phase,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_seconds: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub uptime_seconds: u64,
    pub total_requests: u64,
    pub successful_extractions: u64,
    pub failed_extractions: u64,
    pub provider_key_count: usize,
    pub providers: Vec<ProviderId>,
}
