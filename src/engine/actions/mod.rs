//! Scenario step implementations
//!
//! Each step is split in two halves: a request builder and a pure verdict
//! function that classifies the [`HttpOutcome`]. The runner glues them
//! together with one transport call.
//!
//! - `auth` - register and login
//! - `products` - add product, update quantity, list products

pub mod auth;
pub mod products;

use serde_json::Value;

use crate::bridge::{HttpMethod, HttpOutcome, HttpResponse};
use crate::engine::result::{FailureKind, StepKind, StepResult};

/// A request a step wants to issue
#[derive(Debug, Clone, PartialEq)]
pub struct StepRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

impl StepRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
        }
    }
}

/// A step result plus any session value the step produced
#[derive(Debug, Clone, PartialEq)]
pub struct StepVerdict<T> {
    pub result: StepResult,
    pub produced: Option<T>,
}

impl<T> StepVerdict<T> {
    pub fn without_value(result: StepResult) -> Self {
        Self {
            result,
            produced: None,
        }
    }
}

/// Split an outcome into a response, or the failing result for a transport error
pub(crate) fn require_response<'a>(
    step: StepKind,
    outcome: &'a HttpOutcome,
    expected: &Value,
    payload: Option<&Value>,
) -> Result<&'a HttpResponse, StepResult> {
    match outcome {
        HttpOutcome::Completed(response) => Ok(response),
        HttpOutcome::TransportError { kind, cause } => Err(StepResult::failed(
            step,
            FailureKind::Transport,
        )
        .with_expected(expected.clone())
        .with_actual(format!("transport error: {}", kind))
        .with_request(payload)
        .with_detail(cause.clone())),
    }
}

pub(crate) fn unexpected_status(
    step: StepKind,
    expected: Value,
    response: &HttpResponse,
    payload: Option<&Value>,
) -> StepResult {
    StepResult::failed(step, FailureKind::UnexpectedStatus)
        .with_expected(expected)
        .with_actual(response.status)
        .with_request(payload)
        .with_response_body(Some(response.raw_body.as_str()))
}

pub(crate) fn malformed(
    step: StepKind,
    expected: impl Into<Value>,
    actual: impl Into<Value>,
    response: &HttpResponse,
    payload: Option<&Value>,
) -> StepResult {
    let result = StepResult::failed(step, FailureKind::MalformedResponse)
        .with_expected(expected)
        .with_actual(actual)
        .with_request(payload)
        .with_response_body(Some(response.raw_body.as_str()));

    match &response.parse_error {
        Some(err) => result.with_detail(err.clone()),
        None => result,
    }
}
