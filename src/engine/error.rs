//! Executor error types

use crate::bridge::BridgeError;

/// Errors that stop a scenario before any step runs
///
/// Failures during the run are recorded as step results instead.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("Bridge error: {0}")]
    BridgeError(#[from] BridgeError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
