//! Server state and request counters

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use shared::ProviderId;

/// Process-wide server state. Counters are monotonic and only read by the
/// status endpoint.
#[derive(Debug)]
pub struct AppState {
    pub providers: Vec<ProviderId>,
    pub key_count: usize,
    started_at: Instant,
    total_requests: AtomicU64,
    successful_extractions: AtomicU64,
    failed_extractions: AtomicU64,
}

impl AppState {
    pub fn new(providers: Vec<ProviderId>, key_count: usize) -> Self {
        Self {
            providers,
            key_count,
            started_at: Instant::now(),
            total_requests: AtomicU64::new(0),
            successful_extractions: AtomicU64::new(0),
            failed_extractions: AtomicU64::new(0),
        }
    }

    pub fn record_request(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successful_extractions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed_extractions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    pub fn successful_extractions(&self) -> u64 {
        self.successful_extractions.load(Ordering::Relaxed)
    }

    pub fn failed_extractions(&self) -> u64 {
        self.failed_extractions.load(Ordering::Relaxed)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero_and_accumulate() {
        let state = AppState::new(vec![ProviderId::OpenRouter], 1);
        assert_eq!(state.total_requests(), 0);

        state.record_request();
        state.record_request();
        state.record_success();
        state.record_failure();

        assert_eq!(state.total_requests(), 2);
        assert_eq!(state.successful_extractions(), 1);
        assert_eq!(state.failed_extractions(), 1);
    }
}
