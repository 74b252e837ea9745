//! Ordered, append-only store of step results

use crate::engine::result::StepResult;

#[derive(Debug, Default)]
pub struct ResultRecorder {
    results: Vec<StepResult>,
}

impl ResultRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: StepResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[StepResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(StepResult::is_failed)
    }

    pub fn into_results(self) -> Vec<StepResult> {
        self.results
    }
}
