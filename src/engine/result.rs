//! Execution result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The five steps of the scenario, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Register,
    Login,
    AddProduct,
    UpdateQuantity,
    GetProducts,
}

impl StepKind {
    pub const ALL: [StepKind; 5] = [
        StepKind::Register,
        StepKind::Login,
        StepKind::AddProduct,
        StepKind::UpdateQuantity,
        StepKind::GetProducts,
    ];

    /// Human-readable name used in reports
    pub fn name(&self) -> &'static str {
        match self {
            StepKind::Register => "User Registration",
            StepKind::Login => "Login Test",
            StepKind::AddProduct => "Add Product",
            StepKind::UpdateQuantity => "Update Quantity",
            StepKind::GetProducts => "Get Products",
        }
    }

    /// Whether a failure of this step stops the run
    pub fn is_gate(&self) -> bool {
        matches!(self, StepKind::Login | StepKind::AddProduct)
    }

    /// State the scenario enters when this step passes
    pub fn reached_state(&self) -> ScenarioState {
        match self {
            StepKind::Register => ScenarioState::Registered,
            StepKind::Login => ScenarioState::LoggedIn,
            StepKind::AddProduct => ScenarioState::ProductAdded,
            StepKind::UpdateQuantity => ScenarioState::QuantityUpdated,
            StepKind::GetProducts => ScenarioState::Verified,
        }
    }

    /// Steps scheduled after this one
    pub fn following(self) -> impl Iterator<Item = StepKind> {
        StepKind::ALL
            .into_iter()
            .skip_while(move |s| *s != self)
            .skip(1)
    }
}

/// Why a step failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No response (connection refused, timeout, DNS)
    Transport,
    /// Status outside the accepted set
    UnexpectedStatus,
    /// Body not JSON or missing an expected field
    MalformedResponse,
    /// Well-formed response with the wrong value
    AssertionMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    Passed,
    Failed { kind: FailureKind },
    Skipped { reason: String },
}

/// Result of a step execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub step: StepKind,
    pub name: String,
    #[serde(flatten)]
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl StepResult {
    fn with_status(step: StepKind, status: StepStatus) -> Self {
        Self {
            step,
            name: step.name().to_string(),
            status,
            expected: None,
            actual: None,
            request_payload: None,
            response_body: None,
            detail: None,
        }
    }

    pub fn passed(step: StepKind) -> Self {
        Self::with_status(step, StepStatus::Passed)
    }

    pub fn failed(step: StepKind, kind: FailureKind) -> Self {
        Self::with_status(step, StepStatus::Failed { kind })
    }

    pub fn skipped(step: StepKind, reason: impl Into<String>) -> Self {
        Self::with_status(
            step,
            StepStatus::Skipped {
                reason: reason.into(),
            },
        )
    }

    pub fn with_expected(mut self, expected: impl Into<Value>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn with_actual(mut self, actual: impl Into<Value>) -> Self {
        self.actual = Some(actual.into());
        self
    }

    pub fn with_request(mut self, payload: Option<&Value>) -> Self {
        self.request_payload = payload.cloned();
        self
    }

    pub fn with_response_body(mut self, body: Option<&str>) -> Self {
        self.response_body = body.map(str::to_string);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn is_passed(&self) -> bool {
        matches!(self.status, StepStatus::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, StepStatus::Failed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, StepStatus::Skipped { .. })
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self.status {
            StepStatus::Failed { kind } => Some(kind),
            _ => None,
        }
    }
}

/// Progress of a scenario run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioState {
    NotStarted,
    Registered,
    LoggedIn,
    ProductAdded,
    QuantityUpdated,
    Verified,
    /// Terminal: a gate step left required session state unset
    Aborted { at: StepKind },
}

impl ScenarioState {
    /// Transition taken after a step completes; only passing steps move the state
    pub fn after(self, result: &StepResult) -> ScenarioState {
        match self {
            ScenarioState::Aborted { .. } => self,
            _ if result.is_passed() => result.step.reached_state(),
            _ => self,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, ScenarioState::Aborted { .. })
    }
}

/// Where and why a run was short-circuited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abort {
    pub step: StepKind,
    pub reason: String,
}

/// Result of a scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub run_id: String,
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub state: ScenarioState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<Abort>,
    pub steps: Vec<StepResult>,
}

impl ScenarioOutcome {
    /// True when the run finished without an abort and no executed step failed
    pub fn success(&self) -> bool {
        self.aborted.is_none() && !self.steps.iter().any(StepResult::is_failed)
    }

    pub fn exit_code(&self) -> u8 {
        if self.success() {
            0
        } else {
            1
        }
    }

    pub fn step(&self, kind: StepKind) -> Option<&StepResult> {
        self.steps.iter().find(|s| s.step == kind)
    }

    pub fn passed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_failed()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_skipped()).count()
    }
}

/// Render a JSON value for humans: strings unquoted, everything else as JSON
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_following_steps() {
        let after_login: Vec<_> = StepKind::Login.following().collect();
        assert_eq!(
            after_login,
            vec![
                StepKind::AddProduct,
                StepKind::UpdateQuantity,
                StepKind::GetProducts
            ]
        );
        assert_eq!(StepKind::GetProducts.following().count(), 0);
    }

    #[test]
    fn test_gates() {
        let gates: Vec<_> = StepKind::ALL.into_iter().filter(StepKind::is_gate).collect();
        assert_eq!(gates, vec![StepKind::Login, StepKind::AddProduct]);
    }

    #[test]
    fn test_state_moves_only_on_success() {
        let state = ScenarioState::NotStarted;
        let state = state.after(&StepResult::passed(StepKind::Register));
        assert_eq!(state, ScenarioState::Registered);

        let state = state.after(&StepResult::failed(
            StepKind::Login,
            FailureKind::UnexpectedStatus,
        ));
        assert_eq!(state, ScenarioState::Registered);

        let aborted = ScenarioState::Aborted {
            at: StepKind::Login,
        };
        assert_eq!(
            aborted.after(&StepResult::passed(StepKind::GetProducts)),
            aborted
        );
    }

    #[test]
    fn test_step_result_builders() {
        let result = StepResult::failed(StepKind::GetProducts, FailureKind::AssertionMismatch)
            .with_expected(15)
            .with_actual(10)
            .with_response_body(Some("[]"));

        assert!(result.is_failed());
        assert_eq!(result.name, "Get Products");
        assert_eq!(result.failure_kind(), Some(FailureKind::AssertionMismatch));
        assert_eq!(result.expected, Some(json!(15)));
        assert_eq!(result.actual, Some(json!(10)));
        assert_eq!(result.response_body.as_deref(), Some("[]"));
    }

    #[test]
    fn test_step_result_serializes_flat_status() {
        let result = StepResult::skipped(StepKind::AddProduct, "login failed");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "skipped");
        assert_eq!(value["reason"], "login failed");
        assert_eq!(value["step"], "add_product");
        assert!(value.get("expected").is_none());
    }

    #[test]
    fn test_outcome_counts() {
        let outcome = ScenarioOutcome {
            run_id: "r".to_string(),
            base_url: "http://localhost:8080".to_string(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            state: ScenarioState::Aborted {
                at: StepKind::Login,
            },
            aborted: Some(Abort {
                step: StepKind::Login,
                reason: "no token".to_string(),
            }),
            steps: vec![
                StepResult::passed(StepKind::Register),
                StepResult::failed(StepKind::Login, FailureKind::UnexpectedStatus),
                StepResult::skipped(StepKind::AddProduct, "no token"),
            ],
        };

        assert_eq!(outcome.passed_count(), 1);
        assert_eq!(outcome.failed_count(), 1);
        assert_eq!(outcome.skipped_count(), 1);
        assert!(!outcome.success());
        assert_eq!(outcome.exit_code(), 1);
        assert!(outcome.step(StepKind::UpdateQuantity).is_none());
    }
}
