pub(crate) const DEFAULT_USER_AGENT: &str = concat!("logsurge/", env!("CARGO_PKG_VERSION"));

/// Log-ingestion endpoint the driver targets when no URL is given.
pub(super) const DEFAULT_TARGET_URL: &str = "http://localhost:5000/log";

pub(super) const DEFAULT_APP_INFO: &str = "CAMERACART-UI";
pub(super) const DEFAULT_MESSAGE_ID: &str = "LOG_ERROR";
pub(super) const DEFAULT_EVENT: &str = "STATE_ERROR";
pub(super) const DEFAULT_EVENT_VALUE: &str = "CAM_ID : 123";
