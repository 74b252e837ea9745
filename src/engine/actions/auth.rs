//! Account steps
//!
//! - Register: `POST /register`, accepts 201 and 409
//! - Login: `POST /login`, requires 200 and a non-empty `access_token`

use serde_json::{json, Value};

use super::{malformed, require_response, unexpected_status, StepRequest, StepVerdict};
use crate::bridge::{HttpMethod, HttpOutcome};
use crate::engine::result::{StepKind, StepResult};
use crate::scenario::Credentials;

pub const REGISTER_PATH: &str = "/register";
pub const LOGIN_PATH: &str = "/login";

pub fn register_request(credentials: &Credentials) -> StepRequest {
    StepRequest::new(HttpMethod::Post, REGISTER_PATH, Some(credentials.to_payload()))
}

pub fn login_request(credentials: &Credentials) -> StepRequest {
    StepRequest::new(HttpMethod::Post, LOGIN_PATH, Some(credentials.to_payload()))
}

/// 409 is accepted so that reruns against the same server still pass.
pub fn evaluate_register(request: &StepRequest, outcome: &HttpOutcome) -> StepResult {
    let step = StepKind::Register;
    let expected = json!("201 or 409");
    let payload = request.body.as_ref();

    let response = match require_response(step, outcome, &expected, payload) {
        Ok(response) => response,
        Err(result) => return result,
    };

    match response.status {
        201 => StepResult::passed(step),
        409 => StepResult::passed(step).with_detail("user already registered"),
        _ => unexpected_status(step, expected, response, payload),
    }
}

pub fn evaluate_login(request: &StepRequest, outcome: &HttpOutcome) -> StepVerdict<String> {
    let step = StepKind::Login;
    let payload = request.body.as_ref();

    let response = match require_response(step, outcome, &json!(200), payload) {
        Ok(response) => response,
        Err(result) => return StepVerdict::without_value(result),
    };

    if response.status != 200 {
        return StepVerdict::without_value(unexpected_status(step, json!(200), response, payload));
    }

    if response.parsed_json.is_none() {
        return StepVerdict::without_value(malformed(
            step,
            "JWT token",
            "invalid JSON",
            response,
            payload,
        ));
    }

    match response.json_field("access_token") {
        Some(Value::String(token)) if !token.is_empty() => StepVerdict {
            result: StepResult::passed(step),
            produced: Some(token.clone()),
        },
        other => StepVerdict::without_value(malformed(
            step,
            "JWT token",
            other.cloned().unwrap_or(Value::Null),
            response,
            payload,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::TransportErrorKind;
    use crate::engine::result::FailureKind;

    fn creds() -> Credentials {
        Credentials::default()
    }

    #[test]
    fn test_register_request() {
        let request = register_request(&creds());
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "/register");
        assert_eq!(
            request.body,
            Some(json!({"username": "pujar", "password": "mypasrsword"}))
        );
    }

    #[test]
    fn test_register_accepts_created_and_conflict() {
        let request = register_request(&creds());

        let first = evaluate_register(&request, &HttpOutcome::completed(201, "{}"));
        let second = evaluate_register(
            &request,
            &HttpOutcome::completed(409, r#"{"message":"Username already exists"}"#),
        );

        assert!(first.is_passed());
        assert!(second.is_passed());
        assert_eq!(second.detail.as_deref(), Some("user already registered"));
    }

    #[test]
    fn test_register_rejects_other_status() {
        let request = register_request(&creds());
        let result = evaluate_register(
            &request,
            &HttpOutcome::completed(400, r#"{"message":"Password must be at least 6 characters long"}"#),
        );

        assert_eq!(result.failure_kind(), Some(FailureKind::UnexpectedStatus));
        assert_eq!(result.expected, Some(json!("201 or 409")));
        assert_eq!(result.actual, Some(json!(400)));
        assert_eq!(result.request_payload, request.body);
        assert!(result.response_body.unwrap().contains("at least 6"));
    }

    #[test]
    fn test_register_transport_error() {
        let request = register_request(&creds());
        let result = evaluate_register(
            &request,
            &HttpOutcome::transport_error(TransportErrorKind::Connect, "connection refused"),
        );

        assert_eq!(result.failure_kind(), Some(FailureKind::Transport));
        assert_eq!(result.detail.as_deref(), Some("connection refused"));
        assert!(result.response_body.is_none());
    }

    #[test]
    fn test_login_yields_token() {
        let request = login_request(&creds());
        let verdict = evaluate_login(
            &request,
            &HttpOutcome::completed(200, r#"{"access_token":"abc123","token_type":"bearer"}"#),
        );

        assert!(verdict.result.is_passed());
        assert_eq!(verdict.produced.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_login_unauthorized() {
        let request = login_request(&creds());
        let verdict = evaluate_login(
            &request,
            &HttpOutcome::completed(401, r#"{"message":"Invalid credentials"}"#),
        );

        assert!(verdict.produced.is_none());
        assert_eq!(
            verdict.result.failure_kind(),
            Some(FailureKind::UnexpectedStatus)
        );
        assert_eq!(verdict.result.actual, Some(json!(401)));
    }

    #[test]
    fn test_login_missing_or_empty_token() {
        let request = login_request(&creds());

        for body in [
            r#"{"message":"Login successful"}"#,
            r#"{"access_token":""}"#,
            r#"{"access_token":42}"#,
        ] {
            let verdict = evaluate_login(&request, &HttpOutcome::completed(200, body));
            assert!(verdict.produced.is_none(), "body {} produced a token", body);
            assert_eq!(
                verdict.result.failure_kind(),
                Some(FailureKind::MalformedResponse)
            );
        }
    }

    #[test]
    fn test_login_invalid_json() {
        let request = login_request(&creds());
        let verdict = evaluate_login(&request, &HttpOutcome::completed(200, "OK"));

        assert!(verdict.produced.is_none());
        assert_eq!(
            verdict.result.failure_kind(),
            Some(FailureKind::MalformedResponse)
        );
        assert_eq!(verdict.result.actual, Some(json!("invalid JSON")));
        assert!(verdict.result.detail.is_some());
    }

    #[test]
    fn test_login_verdict_is_deterministic() {
        let request = login_request(&creds());
        let outcome = HttpOutcome::completed(200, r#"{"access_token":"abc123"}"#);
        assert_eq!(
            evaluate_login(&request, &outcome),
            evaluate_login(&request, &outcome)
        );
    }
}
