//! Scenario definition types
//!
//! This module contains everything that describes a run before it starts:
//! - `config` - target API settings and test data
//! - `loader` - load configuration from YAML and the environment
//! - `context` - SessionContext for state passed between steps

pub mod config;
pub mod context;
pub mod loader;

pub use config::{Credentials, ProductConfig, RunnerConfig, WebConfig, DEFAULT_BASE_URL};
pub use context::SessionContext;
pub use loader::LoadError;
