//! Single-workstream execution
//!
//! Runs one extraction workstream end to end: build the prompt, call the
//! provider under the retry policy, parse JSON out of the model output.
//! Failures never propagate; they settle into a failed [`WorkstreamResult`]
//! so one bad workstream cannot sink the whole fan-out.

use std::time::Instant;

use tracing::{info, warn};

use crate::prompt::build_prompt;
use crate::services::keys::KeyRegistry;
use crate::services::parse::parse_json;
use crate::services::retry::RetryPolicy;
use crate::traits::CompletionClient;
use crate::types::{WorkstreamId, WorkstreamResult};
use shared::{ExtractionRequest, RequestConfig};

/// Run one workstream to a settled result.
///
/// The workstream's index picks its key slot, so concurrent workstreams
/// spread round-robin across the configured keys.
pub async fn run_workstream<C: CompletionClient>(
    id: WorkstreamId,
    client: &C,
    keys: &KeyRegistry,
    policy: &RetryPolicy,
    config: &RequestConfig,
    request: &ExtractionRequest,
) -> WorkstreamResult {
    let started = Instant::now();
    let prompt = build_prompt(id, request);
    let key = keys.slot(id.index());

    let outcome = policy
        .run(|_attempt| {
            let prompt = prompt.clone();
            let config = config.clone();
            let key = key.clone();
            async move { client.complete(prompt, config, key).await }
        })
        .await;

    let elapsed = started.elapsed();

    match outcome {
        Ok(response) => match parse_json(&response.content) {
            Ok(data) => {
                info!(
                    workstream = %id,
                    provider = %response.provider,
                    tokens = response.tokens_used,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "workstream succeeded"
                );
                WorkstreamResult::success(id, data, elapsed)
            }
            Err(err) => {
                warn!(workstream = %id, error = %err, "workstream output unparseable");
                WorkstreamResult::failure(id, err.to_string(), elapsed)
            }
        },
        Err(err) => {
            warn!(workstream = %id, error = %err, "workstream failed");
            WorkstreamResult::failure(id, err.to_string(), elapsed)
        }
    }
}
