#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use inventory_api_check::{
    HttpMethod, HttpOutcome, HttpTransport, RunnerConfig, ScenarioOutcome, ScenarioRunner,
    SessionContext, TransportErrorKind,
};
use serde_json::Value;
use tempfile::TempDir;

pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

pub fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("scenario.yaml");
    fs::write(&path, content).expect("Failed to write scenario.yaml");
    path
}

/// One request as seen by [`ScriptedTransport`]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
    pub auth_token: Option<String>,
}

/// Transport that answers from a fixed route table and records every call
///
/// Unrouted requests get a connection error.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    routes: HashMap<String, HttpOutcome>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

fn route_key(method: HttpMethod, path: &str) -> String {
    format!("{} {}", method, path)
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the reply for `method path`, replacing any earlier reply
    pub fn on(mut self, method: HttpMethod, path: &str, outcome: HttpOutcome) -> Self {
        self.routes.insert(route_key(method, path), outcome);
        self
    }

    /// Happy-path server: token `abc123`, product id `p1`, listing quantity 15
    pub fn happy_path() -> Self {
        Self::new()
            .on(
                HttpMethod::Post,
                "/register",
                HttpOutcome::completed(201, r#"{"message":"User registered"}"#),
            )
            .on(
                HttpMethod::Post,
                "/login",
                HttpOutcome::completed(200, r#"{"access_token":"abc123"}"#),
            )
            .on(
                HttpMethod::Post,
                "/products",
                HttpOutcome::completed(201, r#"{"product_id":"p1"}"#),
            )
            .on(
                HttpMethod::Put,
                "/products/p1/quantity",
                HttpOutcome::completed(200, r#"{"product_id":"p1","quantity":15}"#),
            )
            .on(
                HttpMethod::Get,
                "/products",
                HttpOutcome::completed(200, r#"[{"name":"Phone","quantity":15}]"#),
            )
    }

    /// Shared handle to the call log, usable after the transport is boxed
    pub fn call_log(&self) -> Arc<Mutex<Vec<RecordedCall>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        auth_token: Option<&str>,
    ) -> HttpOutcome {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body: body.cloned(),
            auth_token: auth_token.map(str::to_string),
        });

        self.routes
            .get(&route_key(method, path))
            .cloned()
            .unwrap_or_else(|| {
                HttpOutcome::transport_error(TransportErrorKind::Connect, "connection refused")
            })
    }
}

/// Run the scenario over `transport` with the default config and a fixed run id
pub async fn run_scripted(transport: ScriptedTransport) -> (ScenarioOutcome, Vec<RecordedCall>) {
    run_scripted_with(RunnerConfig::default(), transport).await
}

pub async fn run_scripted_with(
    config: RunnerConfig,
    transport: ScriptedTransport,
) -> (ScenarioOutcome, Vec<RecordedCall>) {
    let log = transport.call_log();
    let runner = ScenarioRunner::with_transport(config, Box::new(transport));
    let outcome = runner
        .run_with_context(SessionContext::with_run_id("0f3c9a7e-1b2d-4c5e-8f90-a1b2c3d4e5f6"))
        .await;
    let calls = log.lock().unwrap().clone();
    (outcome, calls)
}
