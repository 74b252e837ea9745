//! Scenario Runner - executes the steps in dependency order
//!
//! This is the main engine that:
//! 1. Issues each step's request through the transport
//! 2. Classifies the outcome into a step result
//! 3. Carries the token and product id forward in the session context
//! 4. Short-circuits when Login or Add Product leave required state unset
//! 5. Hands the recorded results back as a `ScenarioOutcome`

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use crate::bridge::{HttpOutcome, HttpTransport, WebBridge};
use crate::engine::actions::{auth, products, StepRequest};
use crate::engine::error::ExecutorError;
use crate::engine::recorder::ResultRecorder;
use crate::engine::result::{Abort, ScenarioOutcome, ScenarioState, StepKind, StepResult};
use crate::scenario::{RunnerConfig, SessionContext};

/// Sequential runner for the inventory scenario
pub struct ScenarioRunner {
    config: RunnerConfig,
    transport: Box<dyn HttpTransport>,
}

/// Mutable bookkeeping for one run
struct RunState {
    recorder: ResultRecorder,
    state: ScenarioState,
    started_at: DateTime<Utc>,
}

impl RunState {
    fn new() -> Self {
        Self {
            recorder: ResultRecorder::new(),
            state: ScenarioState::NotStarted,
            started_at: Utc::now(),
        }
    }

    fn record(&mut self, result: StepResult) {
        if result.is_passed() {
            match &result.detail {
                Some(detail) => info!("{}: passed ({})", result.name, detail),
                None => info!("{}: passed", result.name),
            }
        } else {
            warn!(
                kind = ?result.failure_kind(),
                "{}: failed",
                result.name
            );
        }
        self.state = self.state.after(&result);
        self.recorder.record(result);
    }
}

impl ScenarioRunner {
    /// Create a runner that talks HTTP to the configured base URL
    pub fn new(config: RunnerConfig) -> Result<Self, ExecutorError> {
        if config.web.timeout == 0 {
            return Err(ExecutorError::ConfigError(
                "request timeout must be greater than zero".to_string(),
            ));
        }

        info!("Initializing Web bridge (base_url: {})", config.web.base_url);
        let bridge = WebBridge::from_config(&config.web)?;
        Ok(Self::with_transport(config, Box::new(bridge)))
    }

    /// Create a runner over a custom transport (for testing)
    pub fn with_transport(config: RunnerConfig, transport: Box<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run the scenario once with a fresh session
    pub async fn run(&self) -> ScenarioOutcome {
        self.run_with_context(SessionContext::new()).await
    }

    #[instrument(skip(self, ctx), fields(run_id = %ctx.run_id()))]
    pub async fn run_with_context(&self, mut ctx: SessionContext) -> ScenarioOutcome {
        info!(
            "Starting scenario against {} ({} steps)",
            self.config.web.base_url,
            StepKind::ALL.len()
        );
        let mut run = RunState::new();
        let credentials = &self.config.credentials;

        // 1. Register
        let request = auth::register_request(credentials);
        let outcome = self.call(StepKind::Register, &request, None).await;
        run.record(auth::evaluate_register(&request, &outcome));

        // 2. Login (gate)
        let request = auth::login_request(credentials);
        let outcome = self.call(StepKind::Login, &request, None).await;
        let verdict = auth::evaluate_login(&request, &outcome);
        run.record(verdict.result);
        if let Some(token) = verdict.produced {
            ctx.set_auth_token(token);
        }
        let Some(token) = ctx.auth_token().map(str::to_owned) else {
            return self.abort(ctx, run, StepKind::Login, "login did not yield an access token");
        };

        // 3. Add product (gate)
        let request = products::add_product_request(&self.config.product, ctx.run_id());
        let outcome = self.call(StepKind::AddProduct, &request, Some(&token)).await;
        let verdict = products::evaluate_add_product(&request, &outcome);
        let reason = if verdict.result.is_passed() {
            "response did not include product_id"
        } else {
            "product creation failed"
        };
        run.record(verdict.result);
        if let Some(id) = verdict.produced {
            ctx.set_product_id(id);
        }
        let Some(product_id) = ctx.product_id().map(str::to_owned) else {
            return self.abort(ctx, run, StepKind::AddProduct, reason);
        };

        // 4. Update quantity; a failure here does not stop the run
        let quantity = self.config.new_quantity;
        let request = products::update_quantity_request(&product_id, quantity);
        let outcome = self
            .call(StepKind::UpdateQuantity, &request, Some(&token))
            .await;
        run.record(products::evaluate_update_quantity(&request, &outcome));

        // 5. Verify against the quantity sent in step 4
        let request = products::get_products_request();
        let outcome = self.call(StepKind::GetProducts, &request, Some(&token)).await;
        run.record(products::evaluate_get_products(
            &outcome,
            &self.config.product.name,
            quantity,
        ));

        self.finish(ctx, run, None)
    }

    async fn call(&self, step: StepKind, request: &StepRequest, token: Option<&str>) -> HttpOutcome {
        info!("Executing step: {}", step.name());
        self.transport
            .execute(request.method, &request.path, request.body.as_ref(), token)
            .await
    }

    fn abort(
        &self,
        ctx: SessionContext,
        mut run: RunState,
        at: StepKind,
        reason: &str,
    ) -> ScenarioOutcome {
        warn!("{} gate not satisfied: {}. Skipping further steps", at.name(), reason);

        for step in at.following() {
            run.recorder.record(StepResult::skipped(
                step,
                format!("{} gate not satisfied: {}", at.name(), reason),
            ));
        }
        run.state = ScenarioState::Aborted { at };

        self.finish(
            ctx,
            run,
            Some(Abort {
                step: at,
                reason: reason.to_string(),
            }),
        )
    }

    fn finish(&self, ctx: SessionContext, run: RunState, aborted: Option<Abort>) -> ScenarioOutcome {
        let outcome = ScenarioOutcome {
            run_id: ctx.run_id().to_string(),
            base_url: self.config.web.base_url.clone(),
            started_at: run.started_at,
            finished_at: Utc::now(),
            state: run.state,
            aborted,
            steps: run.recorder.into_results(),
        };

        info!(
            passed = outcome.passed_count(),
            failed = outcome.failed_count(),
            skipped = outcome.skipped_count(),
            "Scenario finished: success={}",
            outcome.success()
        );

        outcome
    }
}
