use std::sync::Arc;

use reqwest::{Client, Request, header::CONTENT_TYPE};
use serde::Serialize;
use url::Url;

use crate::args::DriverArgs;
use crate::error::{AppError, AppResult, HttpError, ValidationError};

/// Event record POSTed on every iteration.
///
/// Serialized exactly once at startup; the body bytes are identical for
/// every iteration and every virtual user.
#[derive(Debug, Clone, Serialize)]
pub struct EventPayload {
    pub app_info: String,
    pub message_id: String,
    pub event: String,
    pub event_value: String,
}

impl EventPayload {
    #[must_use]
    pub fn from_args(args: &DriverArgs) -> Self {
        Self {
            app_info: args.app_info.clone(),
            message_id: args.message_id.clone(),
            event: args.event.clone(),
            event_value: args.event_value.clone(),
        }
    }
}

/// Immutable request template shared read-only by all virtual users.
#[derive(Clone)]
pub struct Workload {
    request: Arc<Request>,
}

impl Workload {
    /// Clones the prebuilt request for one iteration. Returns `None` only if
    /// the body is a stream, which a static template never is.
    #[must_use]
    pub fn clone_request(&self) -> Option<Request> {
        self.request.try_clone()
    }

    #[must_use]
    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.request.body().and_then(reqwest::Body::as_bytes)
    }

    #[cfg(test)]
    pub(super) fn request(&self) -> &Request {
        &self.request
    }
}

/// Builds the POST workload: validated target URL, headers, and the payload
/// serialized once.
///
/// # Errors
///
/// Returns an error when the URL is invalid, the payload cannot be
/// serialized, or the request cannot be built.
pub(super) fn build_workload(client: &Client, args: &DriverArgs) -> AppResult<Workload> {
    let url = Url::parse(&args.url).map_err(|err| {
        AppError::validation(ValidationError::InvalidUrl {
            url: args.url.clone(),
            source: err,
        })
    })?;
    if url.host_str().is_none() {
        return Err(AppError::validation(ValidationError::UrlMissingHost));
    }

    let payload = EventPayload::from_args(args);
    let body = serde_json::to_string(&payload)?;

    let mut request_builder = client.post(url).header(CONTENT_TYPE, &args.content_type);
    for (key, value) in &args.headers {
        request_builder = request_builder.header(key, value);
    }

    let request = request_builder
        .body(body)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildRequestFailed { source: err }))?;

    Ok(Workload {
        request: Arc::new(request),
    })
}
