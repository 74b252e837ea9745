//! # Inventory API Check
//!
//! A sequential, dependency-chained scenario runner for an inventory
//! management HTTP API.
//!
//! ## Scenario
//!
//! 1. **Register** - `POST /register` (201 or 409)
//! 2. **Login** - `POST /login`, yields a bearer token (gate)
//! 3. **Add Product** - `POST /products`, yields a product id (gate)
//! 4. **Update Quantity** - `PUT /products/{id}/quantity`
//! 5. **Get Products** - `GET /products`, checks the new quantity
//!
//! If a gate step leaves the token or product id unset, the remaining steps
//! are recorded as skipped and the run ends as aborted.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inventory_api_check::{RunnerConfig, ScenarioRunner};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut config = RunnerConfig::default();
//!     config.web.base_url = "http://localhost:8080".to_string();
//!
//!     let runner = ScenarioRunner::new(config)?;
//!     let outcome = runner.run().await;
//!
//!     print!("{}", inventory_api_check::engine::report::to_text(&outcome));
//!     std::process::exit(outcome.exit_code().into());
//! }
//! ```

pub mod bridge;
pub mod engine;
pub mod scenario;

// Re-export main types
pub use bridge::{
    BridgeError, HttpMethod, HttpOutcome, HttpResponse, HttpTransport, TransportErrorKind,
    WebBridge,
};
pub use engine::{
    Abort, ExecutorError, FailureKind, ResultRecorder, ScenarioOutcome, ScenarioRunner,
    ScenarioState, StepKind, StepResult, StepStatus,
};
pub use scenario::{
    Credentials, LoadError, ProductConfig, RunnerConfig, SessionContext, WebConfig,
    DEFAULT_BASE_URL,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bridge::{HttpMethod, HttpOutcome, HttpTransport};
    pub use crate::engine::report;
    pub use crate::engine::{
        ExecutorError, ScenarioOutcome, ScenarioRunner, ScenarioState, StepKind, StepResult,
    };
    pub use crate::scenario::{LoadError, RunnerConfig, SessionContext};
}
