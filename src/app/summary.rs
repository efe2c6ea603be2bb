use crate::args::DriverArgs;
use crate::metrics::{CheckReport, CheckSummary};

pub(crate) struct SummaryStats {
    pub(crate) pass_rate_x100: u64,
    pub(crate) avg_rps_x100: u64,
}

pub(crate) fn compute_summary_stats(summary: &CheckSummary) -> SummaryStats {
    let duration_ms = summary.duration.as_millis().max(1);
    let iterations = summary.iterations;
    let passed = summary.passed_checks;

    let pass_rate_x100 = if iterations > 0 {
        let scaled = u128::from(passed)
            .saturating_mul(10_000)
            .checked_div(u128::from(iterations))
            .unwrap_or(0);
        u64::try_from(scaled).map_or(u64::MAX, |value| value)
    } else {
        0
    };

    let avg_rps_x100 = if iterations > 0 {
        let scaled = u128::from(iterations)
            .saturating_mul(100_000)
            .checked_div(duration_ms)
            .unwrap_or(0);
        u64::try_from(scaled).map_or(u64::MAX, |value| value)
    } else {
        0
    };

    SummaryStats {
        pass_rate_x100,
        avg_rps_x100,
    }
}

pub(crate) fn print_summary(args: &DriverArgs, report: &CheckReport) {
    let summary = &report.summary;
    let stats = compute_summary_stats(summary);
    let (p50, p90, p99) = report.histogram.percentiles();

    println!("Duration: {}s", summary.duration.as_secs());
    println!("Virtual Users: {}", args.vus.get());
    println!("Iterations: {}", summary.iterations);
    println!(
        "Check 'status is {}': {} passed, {} failed ({}.{:02}%)",
        args.expected_status_code,
        summary.passed_checks,
        summary.failed_checks,
        stats.pass_rate_x100 / 100,
        stats.pass_rate_x100 % 100
    );
    println!("Timeouts: {}", summary.timeout_requests);
    println!("Transport Errors: {}", summary.transport_errors);
    println!("Non-Expected Status: {}", summary.non_expected_status);
    println!("Avg Latency: {}ms", summary.avg_latency_ms);
    println!(
        "Min/Max Latency: {}ms / {}ms",
        summary.min_latency_ms, summary.max_latency_ms
    );
    println!("P50/P90/P99 Latency: {}ms / {}ms / {}ms", p50, p90, p99);
    println!(
        "Avg RPS: {}.{:02}",
        stats.avg_rps_x100 / 100,
        stats.avg_rps_x100 % 100
    );
    println!("Data Received: {} bytes", summary.total_bytes);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::compute_summary_stats;
    use crate::error::{AppError, AppResult};
    use crate::metrics::CheckSummary;

    fn summary(iterations: u64, passed: u64, duration: Duration) -> CheckSummary {
        CheckSummary {
            duration,
            iterations,
            passed_checks: passed,
            failed_checks: iterations.saturating_sub(passed),
            timeout_requests: 0,
            transport_errors: 0,
            non_expected_status: 0,
            total_bytes: 0,
            min_latency_ms: 0,
            max_latency_ms: 0,
            avg_latency_ms: 0,
        }
    }

    #[test]
    fn pass_rate_is_fixed_point() -> AppResult<()> {
        let stats = compute_summary_stats(&summary(3, 2, Duration::from_secs(1)));
        if stats.pass_rate_x100 != 6666 {
            return Err(AppError::validation(format!(
                "Unexpected pass rate: {}",
                stats.pass_rate_x100
            )));
        }
        Ok(())
    }

    #[test]
    fn full_pass_rate_is_ten_thousand() -> AppResult<()> {
        let stats = compute_summary_stats(&summary(10, 10, Duration::from_secs(1)));
        if stats.pass_rate_x100 != 10_000 {
            return Err(AppError::validation("Expected 100.00% pass rate"));
        }
        Ok(())
    }

    #[test]
    fn avg_rps_accounts_for_duration() -> AppResult<()> {
        let stats = compute_summary_stats(&summary(100, 100, Duration::from_secs(10)));
        if stats.avg_rps_x100 != 1_000 {
            return Err(AppError::validation(format!(
                "Unexpected avg rps: {}",
                stats.avg_rps_x100
            )));
        }
        Ok(())
    }

    #[test]
    fn empty_run_yields_zero_stats() -> AppResult<()> {
        let stats = compute_summary_stats(&summary(0, 0, Duration::from_secs(1)));
        if stats.pass_rate_x100 != 0 || stats.avg_rps_x100 != 0 {
            return Err(AppError::validation("Expected zeroed stats"));
        }
        Ok(())
    }
}
