//! Bridge to the API under test
//!
//! This module provides the transport seam used by the scenario steps:
//! - `HttpTransport` - single-attempt request execution
//! - `HttpOutcome` - classified result of one request
//! - `web`: reqwest-backed implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub mod web;

pub use web::WebBridge;

/// Errors raised while building a bridge
///
/// Request failures never surface here; they are folded into
/// [`HttpOutcome::TransportError`].
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Failed to build HTTP client: {0}")]
    StartupFailed(String),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// HTTP methods used by the scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a request never produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportErrorKind {
    Connect,
    Timeout,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorKind::Connect => f.write_str("connection failed"),
            TransportErrorKind::Timeout => f.write_str("timed out"),
            TransportErrorKind::Other => f.write_str("request failed"),
        }
    }
}

/// A completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: u16,
    pub raw_body: String,
    pub parsed_json: Option<Value>,
    pub parse_error: Option<String>,
    pub elapsed_ms: u64,
}

impl HttpResponse {
    /// Build a response from a status and raw body, parsing the body as JSON.
    ///
    /// A body that is not valid JSON is kept verbatim and the parser message
    /// lands in `parse_error`.
    pub fn new(status: u16, raw_body: impl Into<String>, elapsed_ms: u64) -> Self {
        let raw_body = raw_body.into();
        let (parsed_json, parse_error) = match serde_json::from_str::<Value>(&raw_body) {
            Ok(value) => (Some(value), None),
            Err(e) => (None, Some(e.to_string())),
        };

        Self {
            status,
            raw_body,
            parsed_json,
            parse_error,
            elapsed_ms,
        }
    }

    /// Look up a top-level field of a JSON object body
    pub fn json_field(&self, key: &str) -> Option<&Value> {
        self.parsed_json.as_ref()?.as_object()?.get(key)
    }
}

/// Result of executing one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum HttpOutcome {
    /// The server answered (with any status)
    Completed(HttpResponse),
    /// No response was received
    TransportError {
        kind: TransportErrorKind,
        cause: String,
    },
}

impl HttpOutcome {
    pub fn completed(status: u16, raw_body: impl Into<String>) -> Self {
        HttpOutcome::Completed(HttpResponse::new(status, raw_body, 0))
    }

    pub fn transport_error(kind: TransportErrorKind, cause: impl Into<String>) -> Self {
        HttpOutcome::TransportError {
            kind,
            cause: cause.into(),
        }
    }

    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            HttpOutcome::Completed(response) => Some(response),
            HttpOutcome::TransportError { .. } => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.response().map(|r| r.status)
    }

    pub fn raw_body(&self) -> Option<&str> {
        self.response().map(|r| r.raw_body.as_str())
    }
}

/// Executes a single request against the API under test
///
/// Implementations make exactly one attempt and must never fail outright:
/// network problems are reported as [`HttpOutcome::TransportError`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        auth_token: Option<&str>,
    ) -> HttpOutcome;
}
