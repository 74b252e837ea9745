//! Scenario execution engine module
//!
//! This module contains:
//! - `executor` - The sequential scenario runner
//! - `error` - Executor error types
//! - `result` - Step and scenario result types
//! - `recorder` - Append-only store of step results
//! - `actions` - Step request builders and verdicts
//! - `report` - Text and JSON rendering of an outcome

pub mod actions;
pub mod error;
pub mod executor;
pub mod recorder;
pub mod report;
pub mod result;

pub use actions::{StepRequest, StepVerdict};
pub use error::ExecutorError;
pub use executor::ScenarioRunner;
pub use recorder::ResultRecorder;
pub use result::{
    Abort, FailureKind, ScenarioOutcome, ScenarioState, StepKind, StepResult, StepStatus,
};
