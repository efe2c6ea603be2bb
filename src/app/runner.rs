use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::info;

use crate::{
    args::DriverArgs,
    error::AppResult,
    http,
    metrics::{self, CheckSample},
    shutdown_handlers,
};

use super::summary;

/// Capacity for check samples in flight between virtual users and the
/// collector.
const SAMPLE_CHANNEL_CAPACITY: usize = 10_000;

pub(crate) async fn run_local(args: DriverArgs) -> AppResult<metrics::CheckReport> {
    let (shutdown_tx, _) = shutdown_handlers::shutdown_channel();
    let (samples_tx, samples_rx) = mpsc::channel::<CheckSample>(SAMPLE_CHANNEL_CAPACITY);

    let run_start = Instant::now();
    let target_duration = Duration::from_secs(args.target_duration.get());

    let driver_handle = http::setup_driver(&args, &shutdown_tx, &samples_tx)?;
    // The driver holds the only remaining senders; once every virtual user
    // stops, the sample channel closes and the collector drain ends.
    drop(samples_tx);

    info!(
        "Starting run: {} virtual users against {} for {}s.",
        args.vus.get(),
        args.url,
        args.target_duration.get()
    );

    let signal_handle = shutdown_handlers::setup_signal_shutdown_handler(&shutdown_tx);
    let collector_handle =
        metrics::setup_check_collector(target_duration, run_start, &shutdown_tx, samples_rx)?;

    let (signal_result, driver_result, collector_result) =
        tokio::join!(signal_handle, driver_handle, collector_handle);
    signal_result?;
    driver_result?;
    let report = collector_result?;

    summary::print_summary(&args, &report);

    Ok(report)
}
