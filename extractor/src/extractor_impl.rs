//! Extraction orchestrator
//!
//! Dispatches the selected workstreams concurrently, waits for every one to
//! settle, applies the success threshold, and merges the partial results.
//! Phased requests run a single workstream with a threshold of one; full
//! requests fan out all five and require four.

use std::time::Instant;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{error, info};

use crate::error::{ExtractorError, ExtractorResult};
use crate::merge::merge_results;
use crate::services::keys::KeyRegistry;
use crate::services::retry::RetryPolicy;
use crate::services::workstreams::run_workstream;
use crate::traits::{CompletionClient, ExtractionEngine};
use crate::types::{ExtractionOutcome, WorkstreamFailure, WorkstreamId};
use shared::{ExtractionId, ExtractionRequest, Phase, RequestConfig};

/// Default successes required out of a full five-workstream fan-out
pub const DEFAULT_MIN_SUCCESS: usize = 4;

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Successes required in full fan-out mode. Phased runs always need 1.
    pub min_success: usize,
    pub request: RequestConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_success: DEFAULT_MIN_SUCCESS,
            request: RequestConfig::default(),
        }
    }
}

pub struct Extractor<C: CompletionClient> {
    client: C,
    keys: KeyRegistry,
    policy: RetryPolicy,
    config: ExtractorConfig,
}

impl<C: CompletionClient> Extractor<C> {
    pub fn new(client: C, keys: KeyRegistry, config: ExtractorConfig) -> Self {
        Self {
            client,
            keys,
            policy: RetryPolicy::default(),
            config,
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Workstreams addressed by the request's phase
    fn select_workstreams(phase: Phase) -> Vec<WorkstreamId> {
        match phase.workstream_index().and_then(WorkstreamId::from_index) {
            Some(id) => vec![id],
            None => WorkstreamId::ALL.to_vec(),
        }
    }

    async fn run(&self, request: &ExtractionRequest) -> ExtractorResult<ExtractionOutcome> {
        let extraction_id = ExtractionId::new();
        let phase = request.phase();
        let ids = Self::select_workstreams(phase);
        let required = if ids.len() == 1 {
            1
        } else {
            self.config.min_success.min(ids.len())
        };

        info!(
            %extraction_id,
            %phase,
            workstreams = ids.len(),
            required,
            business = %request.business_name,
            "starting extraction"
        );

        let started = Instant::now();
        let futures = ids.iter().map(|id| {
            run_workstream(
                *id,
                &self.client,
                &self.keys,
                &self.policy,
                &self.config.request,
                request,
            )
        });
        let results = join_all(futures).await;
        let elapsed = started.elapsed();

        let succeeded = results.iter().filter(|r| r.success).count();

        if succeeded < required {
            let failures: Vec<WorkstreamFailure> = results
                .iter()
                .filter(|r| !r.success)
                .map(|r| WorkstreamFailure {
                    workstream: r.id,
                    error: r.error.clone().unwrap_or_default(),
                })
                .collect();

            error!(
                %extraction_id,
                succeeded,
                required,
                dispatched = results.len(),
                "extraction below success threshold"
            );

            return Err(ExtractorError::Orchestration {
                succeeded,
                required,
                dispatched: results.len(),
                failures,
            });
        }

        let profile = merge_results(&results);

        info!(
            %extraction_id,
            succeeded,
            dispatched = results.len(),
            score = profile.validation_score,
            elapsed_ms = elapsed.as_millis() as u64,
            "extraction complete"
        );

        Ok(ExtractionOutcome {
            extraction_id,
            profile,
            parallel_calls: results.len(),
            extraction_time_ms: elapsed.as_millis() as u64,
            phase,
        })
    }
}

#[async_trait]
impl<C: CompletionClient> ExtractionEngine for Extractor<C> {
    async fn extract(&self, request: ExtractionRequest) -> ExtractorResult<ExtractionOutcome> {
        self.run(&request).await
    }
}
