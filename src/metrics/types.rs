use std::time::Duration;

use tokio::time::Instant;

use super::LatencyHistogram;

/// Outcome of one iteration's check, produced by a virtual user and consumed
/// by the collector. Transient; nothing is retained per iteration beyond the
/// aggregated tallies.
#[derive(Clone, Copy, Debug)]
pub struct CheckSample {
    pub status_code: u16,
    pub passed: bool,
    pub timed_out: bool,
    pub transport_error: bool,
    pub response_bytes: u64,
    pub latency: Duration,
}

impl CheckSample {
    #[must_use]
    pub fn new(
        start: Instant,
        status_code: u16,
        passed: bool,
        timed_out: bool,
        transport_error: bool,
        response_bytes: u64,
    ) -> Self {
        Self {
            status_code,
            passed,
            timed_out,
            transport_error,
            response_bytes,
            latency: start.elapsed(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckSummary {
    pub duration: Duration,
    pub iterations: u64,
    pub passed_checks: u64,
    pub failed_checks: u64,
    pub timeout_requests: u64,
    pub transport_errors: u64,
    pub non_expected_status: u64,
    pub total_bytes: u64,
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
    pub avg_latency_ms: u64,
}

#[derive(Debug)]
pub struct CheckReport {
    pub summary: CheckSummary,
    pub histogram: LatencyHistogram,
}
