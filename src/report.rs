//! Best-effort lock state notifications over HTTP.
//!
//! Each call is a single POST with a JSON body such as
//! `{"state":"occupied"}`. Nothing is queued or retried; the caller decides
//! what to do with a failure.

use crate::config::{MonitorConfig, REPORT_TIMEOUT};
use crate::error::{OccupiError, ReportError, Result};
use crate::monitor::LockState;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::debug;

/// Wire record sent to the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    /// One of `occupied`, `available` or `unknown`
    pub state: String,
}

impl From<LockState> for StateChange {
    fn from(state: LockState) -> Self {
        Self {
            state: state.wire_name().to_string(),
        }
    }
}

/// Delivers lock state changes somewhere.
pub trait Reporter: Send + Sync {
    /// Deliver one state change.
    fn report(
        &self,
        state: LockState,
    ) -> impl Future<Output = std::result::Result<(), ReportError>> + Send;
}

/// Reporter for local-only operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    async fn report(&self, _state: LockState) -> std::result::Result<(), ReportError> {
        Ok(())
    }
}

/// Posts state changes to a configured endpoint.
#[derive(Debug, Clone)]
pub struct HttpReporter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpReporter {
    /// Build a reporter for the configured endpoint.
    pub fn new(config: &MonitorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REPORT_TIMEOUT)
            .build()
            .map_err(|e| OccupiError::config_error(format!("Could not build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config.endpoint.clone()))
    }

    /// Use an existing client.
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint receiving the reports; empty when reporting is off.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Serialized request body for `state`.
    pub fn payload(state: LockState) -> std::result::Result<Vec<u8>, ReportError> {
        Ok(serde_json::to_vec(&StateChange::from(state))?)
    }
}

impl Reporter for HttpReporter {
    async fn report(&self, state: LockState) -> std::result::Result<(), ReportError> {
        if self.endpoint.is_empty() {
            debug!(%state, "no endpoint configured, state kept local");
            return Ok(());
        }

        let body = Self::payload(state)?;

        let request = self
            .client
            .post(self.endpoint.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .build()
            .map_err(ReportError::Request)?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(ReportError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ReportError::Status(status));
        }

        debug!(%state, endpoint = %self.endpoint, "state reported");
        Ok(())
    }
}
