use reqwest::Client;

use crate::args::{DEFAULT_USER_AGENT, DriverArgs};
use crate::error::{AppError, AppResult, HttpError};

/// Builds the HTTP client shared by every virtual user. Connection pooling
/// and redirect handling stay on reqwest defaults; the check judges whatever
/// status the client ends up with.
pub(super) fn build_client(args: &DriverArgs) -> AppResult<Client> {
    Client::builder()
        .timeout(args.request_timeout)
        .connect_timeout(args.connect_timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}
