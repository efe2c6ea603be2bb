use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle, time::Instant};
use tracing::warn;

use crate::error::AppResult;
use crate::shutdown::ShutdownSender;

use super::{CheckReport, CheckSample, CheckSummary, LatencyHistogram};

struct AggregationState {
    iterations: u64,
    passed_checks: u64,
    failed_checks: u64,
    timeout_requests: u64,
    transport_errors: u64,
    non_expected_status: u64,
    total_bytes: u64,
    min_latency_ms: u64,
    max_latency_ms: u64,
    latency_sum_ms: u128,
    histogram: LatencyHistogram,
}

impl AggregationState {
    fn new(histogram: LatencyHistogram) -> Self {
        Self {
            iterations: 0,
            passed_checks: 0,
            failed_checks: 0,
            timeout_requests: 0,
            transport_errors: 0,
            non_expected_status: 0,
            total_bytes: 0,
            min_latency_ms: u64::MAX,
            max_latency_ms: 0,
            latency_sum_ms: 0,
            histogram,
        }
    }

    fn record(&mut self, sample: CheckSample) {
        let latency_ms = u64::try_from(sample.latency.as_millis()).unwrap_or(u64::MAX);

        self.iterations = self.iterations.saturating_add(1);
        if sample.passed {
            self.passed_checks = self.passed_checks.saturating_add(1);
        } else {
            self.failed_checks = self.failed_checks.saturating_add(1);
        }
        if sample.timed_out {
            self.timeout_requests = self.timeout_requests.saturating_add(1);
        }
        if sample.transport_error {
            self.transport_errors = self.transport_errors.saturating_add(1);
        }
        if !sample.passed && !sample.timed_out && !sample.transport_error {
            self.non_expected_status = self.non_expected_status.saturating_add(1);
        }
        self.total_bytes = self.total_bytes.saturating_add(sample.response_bytes);
        self.min_latency_ms = self.min_latency_ms.min(latency_ms);
        self.max_latency_ms = self.max_latency_ms.max(latency_ms);
        self.latency_sum_ms = self.latency_sum_ms.saturating_add(u128::from(latency_ms));
        if let Err(err) = self.histogram.record(latency_ms) {
            warn!("Failed to record latency sample: {}", err);
        }
    }

    fn into_report(self, duration: Duration) -> CheckReport {
        let avg_latency_ms = if self.iterations > 0 {
            let avg = self
                .latency_sum_ms
                .checked_div(u128::from(self.iterations))
                .unwrap_or(0);
            u64::try_from(avg).map_or(u64::MAX, |value| value)
        } else {
            0
        };
        let min_latency_ms = if self.iterations > 0 {
            self.min_latency_ms
        } else {
            0
        };

        CheckReport {
            summary: CheckSummary {
                duration,
                iterations: self.iterations,
                passed_checks: self.passed_checks,
                failed_checks: self.failed_checks,
                timeout_requests: self.timeout_requests,
                transport_errors: self.transport_errors,
                non_expected_status: self.non_expected_status,
                total_bytes: self.total_bytes,
                min_latency_ms,
                max_latency_ms: self.max_latency_ms,
                avg_latency_ms,
            },
            histogram: self.histogram,
        }
    }
}

/// Spawns the check collector task. The collector owns the run deadline: when
/// `target_duration` elapses it broadcasts shutdown and then drains the
/// sample channel until every virtual user has stopped.
///
/// # Errors
///
/// Returns an error if the latency histogram cannot be created.
pub fn setup_check_collector(
    target_duration: Duration,
    run_start: Instant,
    shutdown_tx: &ShutdownSender,
    mut samples_rx: mpsc::Receiver<CheckSample>,
) -> AppResult<JoinHandle<CheckReport>> {
    let shutdown_tx = shutdown_tx.clone();
    let histogram = LatencyHistogram::new()?;
    // Subscribe synchronously so a receiver is registered before this function
    // returns; otherwise a shutdown broadcast sent before the spawned task is
    // first polled would be lost (or fail for lack of receivers).
    let mut shutdown_rx = shutdown_tx.subscribe();

    Ok(tokio::spawn(async move {
        let mut state = AggregationState::new(histogram);
        let deadline = tokio::time::sleep(target_duration);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                () = &mut deadline => {
                    drop(shutdown_tx.send(()));
                    break;
                }
                _ = shutdown_rx.recv() => break,
                maybe_sample = samples_rx.recv() => {
                    match maybe_sample {
                        Some(sample) => state.record(sample),
                        None => {
                            drop(shutdown_tx.send(()));
                            break;
                        }
                    }
                }
            }
        }

        // Virtual users only observe shutdown between iterations; keep
        // draining until the last in-flight iteration has reported its check.
        while let Some(sample) = samples_rx.recv().await {
            state.record(sample);
        }

        state.into_report(run_start.elapsed())
    }))
}
