use std::time::Duration;

use serde::Deserialize;

use crate::args::parse_duration;
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub vus: Option<usize>,
    pub duration: Option<u64>,
    pub status: Option<u16>,
    pub think_time: Option<DurationValue>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub headers: Option<Vec<String>>,
    pub content_type: Option<String>,
    pub payload: Option<PayloadConfig>,
}

/// Overrides for the fields of the event payload POSTed on every iteration.
#[derive(Debug, Default, Deserialize)]
pub struct PayloadConfig {
    pub app_info: Option<String>,
    pub message_id: Option<String>,
    pub event: Option<String>,
    pub event_value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration(text),
        }
    }
}
