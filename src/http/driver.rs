use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, Request};
use tokio::sync::{broadcast, mpsc};
use tokio::time::{Instant, sleep};
use tracing::{debug, error};

use crate::args::DriverArgs;
use crate::error::AppResult;
use crate::metrics::CheckSample;
use crate::shutdown::ShutdownSender;

use super::client::build_client;
use super::workload::{Workload, build_workload};

/// Synthetic status used when no HTTP response was received.
const TRANSPORT_FAILED_STATUS: u16 = 0;

/// Everything one virtual user needs for an iteration. All shared state is
/// immutable; concurrent iterations never coordinate.
#[derive(Clone)]
pub(super) struct DriverContext {
    pub(super) client: Client,
    pub(super) workload: Workload,
    pub(super) samples_tx: mpsc::Sender<CheckSample>,
    pub(super) expected_status_code: u16,
    pub(super) think_time: Duration,
}

/// Creates the iteration driver task: `vus` virtual users, each looping
/// `run_iteration` until shutdown is broadcast.
///
/// # Errors
///
/// Returns an error when the HTTP client or request template cannot be built.
pub fn setup_driver(
    args: &DriverArgs,
    shutdown_tx: &ShutdownSender,
    samples_tx: &mpsc::Sender<CheckSample>,
) -> AppResult<tokio::task::JoinHandle<()>> {
    let client = build_client(args)?;
    let workload = build_workload(&client, args)?;
    let context = DriverContext {
        client,
        workload,
        samples_tx: samples_tx.clone(),
        expected_status_code: args.expected_status_code,
        think_time: args.think_time,
    };
    Ok(spawn_virtual_users(context, args.vus.get(), shutdown_tx))
}

fn spawn_virtual_users(
    context: DriverContext,
    vus: usize,
    shutdown_tx: &ShutdownSender,
) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();

    tokio::spawn(async move {
        let mut vu_handles = Vec::with_capacity(vus);

        for vu in 0..vus {
            let context = context.clone();
            let shutdown_tx = shutdown_tx.clone();

            vu_handles.push(tokio::spawn(async move {
                let mut shutdown_rx = shutdown_tx.subscribe();
                loop {
                    // Shutdown is only observed here, between iterations; an
                    // in-flight iteration always runs to completion. A lagged
                    // receiver still means shutdown was broadcast.
                    match shutdown_rx.try_recv() {
                        Ok(())
                        | Err(
                            broadcast::error::TryRecvError::Closed
                            | broadcast::error::TryRecvError::Lagged(_),
                        ) => break,
                        Err(broadcast::error::TryRecvError::Empty) => {}
                    }
                    run_iteration(&context).await;
                }
                debug!("Virtual user {} stopped.", vu);
            }));
        }
        drop(context);

        for handle in vu_handles {
            if handle.await.is_err() {
                break;
            }
        }
    })
}

/// Executes one unit of work: a single POST, the status check, and the
/// cooling-down pause. Never fails; transport errors and unexpected statuses
/// surface only as a failed check.
pub(super) async fn run_iteration(context: &DriverContext) {
    let start = Instant::now();
    let (status, timed_out, transport_error, response_bytes) =
        match context.workload.clone_request() {
            Some(request) => execute_request(&context.client, request).await,
            None => {
                error!("Failed to clone request template.");
                (TRANSPORT_FAILED_STATUS, false, true, 0)
            }
        };

    let passed = status == context.expected_status_code;
    let sample = CheckSample::new(
        start,
        status,
        passed,
        timed_out,
        transport_error,
        response_bytes,
    );
    if context.samples_tx.send(sample).await.is_err() {
        debug!("Dropped check sample after collector shutdown.");
    }

    sleep(context.think_time).await;
}

async fn execute_request(client: &Client, request: Request) -> (u16, bool, bool, u64) {
    match client.execute(request).await {
        Ok(response) => {
            let status = response.status().as_u16();
            match drain_response_body(response).await {
                Ok(bytes) => (status, false, false, bytes),
                Err(err) => {
                    let timed_out = err.is_timeout();
                    error!("Failed to read response body: {}", err);
                    (TRANSPORT_FAILED_STATUS, timed_out, !timed_out, 0)
                }
            }
        }
        Err(err) => {
            let timed_out = err.is_timeout();
            debug!("Request failed: {}", err);
            (TRANSPORT_FAILED_STATUS, timed_out, !timed_out, 0)
        }
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
