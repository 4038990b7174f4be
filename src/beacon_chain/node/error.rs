use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BeaconNodeError {
    #[error("invalid beacon node url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("chain has not started yet, genesis is at {genesis_time}")]
    BeforeGenesis { genesis_time: DateTime<Utc> },
    #[error("BEACON_URL is required to connect to a beacon node from env")]
    MissingBeaconUrl,
    #[error("request to {path} timed out after {timeout:?}")]
    Timeout { path: String, timeout: Duration },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("not found: {path}, {message}")]
    NotFound { path: String, message: String },
    #[error("beacon node responded {status} for {path}: {message}")]
    Server {
        path: String,
        status: StatusCode,
        message: String,
    },
    #[error("failed to decode response from {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The error body the beacon API returns alongside non-200 statuses.
#[derive(Debug, Deserialize)]
pub(super) struct ApiErrorMessage {
    pub message: String,
}

/// Prefers the API's `message` field, otherwise the raw body.
pub(super) fn error_message_from_body(body: &str) -> String {
    serde_json::from_str::<ApiErrorMessage>(body)
        .map(|error| error.message)
        .unwrap_or_else(|_| body.to_string())
}
