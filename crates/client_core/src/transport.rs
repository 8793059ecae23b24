//! Bounded-time HTTP submission of a registration payload.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::{
    domain::RegistrationPayload,
    error::{AttemptFailure, FailureKind},
    protocol::{AttemptResult, RegisterErrorResponse, REGISTER_PATH},
};
use tracing::{debug, info, warn};

/// One network call per invocation. Implementations classify every failure into
/// [`AttemptResult::Failure`] instead of returning an error.
#[async_trait]
pub trait RegistrationTransport: Send + Sync {
    async fn submit(&self, payload: &RegistrationPayload, timeout: Duration) -> AttemptResult;
}

pub struct HttpTransport {
    http: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn register_url(&self) -> String {
        format!("{}{REGISTER_PATH}", self.base_url)
    }
}

#[async_trait]
impl RegistrationTransport for HttpTransport {
    async fn submit(&self, payload: &RegistrationPayload, timeout: Duration) -> AttemptResult {
        let url = self.register_url();
        debug!(%url, ?payload, "submitting registration");

        let response = match self
            .http
            .post(&url)
            .json(payload)
            .timeout(timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return log_failure(classify_transport_error(&err)),
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => return log_failure(classify_transport_error(&err)),
        };

        let parsed: Value = match serde_json::from_slice(&body) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(%status, error = %err, "registration response body is not JSON");
                return log_failure(AttemptFailure::network_unavailable());
            }
        };

        if !status.is_success() {
            let server = RegisterErrorResponse::from_body(&parsed);
            return log_failure(AttemptFailure::server_rejected(
                status.as_u16(),
                server.error.as_deref(),
            ));
        }

        info!(%status, "registration accepted");
        AttemptResult::Success(parsed)
    }
}

fn log_failure(failure: AttemptFailure) -> AttemptResult {
    warn!(kind = ?failure.kind, message = %failure.message, "registration submission failed");
    failure.into()
}

pub(crate) fn classify_transport_error(err: &reqwest::Error) -> AttemptFailure {
    if err.is_timeout() {
        AttemptFailure::timeout()
    } else if err.is_connect() || err.is_request() || err.is_body() || err.is_decode() {
        AttemptFailure::network_unavailable()
    } else {
        AttemptFailure::new(FailureKind::Unknown, err.to_string())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
