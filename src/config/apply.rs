use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{DriverArgs, PositiveU64, PositiveUsize, parse_header};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, DurationValue, PayloadConfig};

/// Applies configuration values to CLI arguments.
///
/// Values given on the command line always win over the config file.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(
    args: &mut DriverArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = url;
    }

    if !is_cli(matches, "vus")
        && let Some(vus) = config.vus
    {
        args.vus = ensure_positive_usize(vus, "vus")?;
    }

    if !is_cli(matches, "target_duration")
        && let Some(duration) = config.duration
    {
        args.target_duration = ensure_positive_u64(duration, "duration")?;
    }

    if !is_cli(matches, "expected_status_code")
        && let Some(status) = config.status
    {
        args.expected_status_code = status;
    }

    if !is_cli(matches, "think_time")
        && let Some(think_time) = config.think_time.as_ref()
    {
        args.think_time = duration_field(think_time, "think_time")?;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = duration_field(timeout, "timeout")?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = duration_field(timeout, "connect_timeout")?;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        args.headers = parse_headers(headers)?;
    }

    if !is_cli(matches, "content_type")
        && let Some(content_type) = config.content_type.clone()
    {
        args.content_type = content_type;
    }

    if let Some(payload) = config.payload.as_ref() {
        apply_payload_config(args, matches, payload);
    }

    Ok(())
}

fn apply_payload_config(args: &mut DriverArgs, matches: &ArgMatches, payload: &PayloadConfig) {
    if !is_cli(matches, "app_info")
        && let Some(app_info) = payload.app_info.clone()
    {
        args.app_info = app_info;
    }

    if !is_cli(matches, "message_id")
        && let Some(message_id) = payload.message_id.clone()
    {
        args.message_id = message_id;
    }

    if !is_cli(matches, "event")
        && let Some(event) = payload.event.clone()
    {
        args.event = event;
    }

    if !is_cli(matches, "event_value")
        && let Some(event_value) = payload.event_value.clone()
    {
        args.event_value = event_value;
    }
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn duration_field(value: &DurationValue, field: &'static str) -> AppResult<std::time::Duration> {
    value.to_duration().map_err(|err| {
        AppError::config(ConfigError::InvalidDuration {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn parse_headers(headers: &[String]) -> AppResult<Vec<(String, String)>> {
    let mut parsed = Vec::with_capacity(headers.len());
    for header in headers {
        parsed.push(
            parse_header(header)
                .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?,
        );
    }
    Ok(parsed)
}
