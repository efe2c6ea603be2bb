use clap::Parser;
use std::time::Duration;

use super::defaults::{
    DEFAULT_APP_INFO, DEFAULT_EVENT, DEFAULT_EVENT_VALUE, DEFAULT_MESSAGE_ID, DEFAULT_TARGET_URL,
};
use super::parsers::{parse_duration_arg, parse_header, parse_positive_u64, parse_positive_usize};
use super::types::{PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Async HTTP POST load driver - fixed JSON payload, concurrent virtual users, per-iteration status checks, and an end-of-run summary."
)]
pub struct DriverArgs {
    /// Target URL for the load run
    #[arg(long, short, default_value = DEFAULT_TARGET_URL)]
    pub url: String,

    /// Number of concurrent virtual users
    #[arg(
        long = "vus",
        short = 'c',
        aliases = ["virtual-users", "concurrency"],
        default_value = "10",
        value_parser = parse_positive_usize
    )]
    pub vus: PositiveUsize,

    /// Duration of the run (seconds)
    #[arg(
        long = "duration",
        short = 't',
        default_value = "30",
        value_parser = parse_positive_u64
    )]
    pub target_duration: PositiveU64,

    /// Expected HTTP status code for the per-iteration check
    #[arg(long = "status", short = 's', default_value = "200")]
    pub expected_status_code: u16,

    /// Pause after each iteration, per virtual user (supports ms/s/m/h)
    #[arg(
        long = "think-time",
        default_value = "1s",
        value_parser = parse_duration_arg
    )]
    pub think_time: Duration,

    /// Request timeout (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = "10s",
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = "5s",
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long, short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Content-Type header for the request body
    #[arg(long = "content-type", short = 'T', default_value = "application/json")]
    pub content_type: String,

    /// Application name recorded in the event payload
    #[arg(long = "app-info", default_value = DEFAULT_APP_INFO)]
    pub app_info: String,

    /// Message identifier recorded in the event payload
    #[arg(long = "message-id", default_value = DEFAULT_MESSAGE_ID)]
    pub message_id: String,

    /// Event name recorded in the event payload
    #[arg(long = "event", default_value = DEFAULT_EVENT)]
    pub event: String,

    /// Event value recorded in the event payload
    #[arg(long = "event-value", default_value = DEFAULT_EVENT_VALUE)]
    pub event_value: String,

    /// Enable verbose logging (sets log level to debug unless overridden by LOGSURGE_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable ANSI colors in log output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Path to config file (TOML/JSON). Defaults to ./logsurge.toml or ./logsurge.json if present.
    #[arg(long)]
    pub config: Option<String>,
}
