//! Scenarios: one request, its checks and what it leaves behind.
//!
//! A scenario moves through a fixed sequence of states:
//!
//! ```text
//! Pending -> SettingUp -> Executing -> Asserting -> TearingDown -> Passed | Failed
//! ```
//!
//! Setup renders the [`RequestTemplate`] against the environment; an unbound
//! variable ends the scenario there, before anything is sent. Execution sends
//! exactly one request. Every assertion is then evaluated, and teardown runs
//! whatever the assertions concluded. Nothing is retried.

pub mod assertion;
pub mod teardown;
pub mod template;

pub use assertion::{Assertion, AssertionFailure};
pub use teardown::{Teardown, TeardownError, TeardownFn};
pub use template::{BodyTemplate, RequestTemplate};

use crate::environment::EnvironmentStore;
use crate::executor::HttpClient;
use crate::models::CapturedResponse;
use crate::runner::ScenarioReport;
use serde::Serialize;
use std::fmt;

/// Lifecycle state of a running scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScenarioState {
    Pending,
    SettingUp,
    Executing,
    Asserting,
    TearingDown,
    Passed,
    Failed,
}

impl ScenarioState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScenarioState::Passed | ScenarioState::Failed)
    }
}

/// The stage a scenario failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Setup,
    Execute,
    Assert,
    Teardown,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Setup => "setup",
            Stage::Execute => "execute",
            Stage::Assert => "assert",
            Stage::Teardown => "teardown",
        };
        f.write_str(name)
    }
}

/// A named request with assertions and a teardown step.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub request: RequestTemplate,
    pub assertions: Vec<Assertion>,
    pub teardown: Teardown,
}

impl Scenario {
    pub fn new(name: impl Into<String>, request: RequestTemplate) -> Self {
        Self {
            name: name.into(),
            request,
            assertions: Vec::new(),
            teardown: Teardown::None,
        }
    }

    pub fn assert(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    pub fn teardown(mut self, teardown: Teardown) -> Self {
        self.teardown = teardown;
        self
    }

    /// Runs the scenario to a terminal state.
    ///
    /// Never fails: every problem is recorded in the returned report. The
    /// store is only written by teardown.
    pub async fn run<C>(
        &self,
        store: &mut EnvironmentStore,
        client: &C,
        base_url_variable: &str,
    ) -> ScenarioReport
    where
        C: HttpClient + ?Sized,
    {
        let mut report = ScenarioReport::new(&self.name);
        log::info!("scenario '{}' started", self.name);

        report.enter(ScenarioState::SettingUp);
        let request = match self.request.render(store, base_url_variable) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("scenario '{}' setup failed: {}", self.name, e);
                report.setup_error = Some(e);
                return report.finish();
            }
        };

        report.enter(ScenarioState::Executing);
        let response = match client.send(&request).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("scenario '{}' request failed: {}", self.name, e);
                if let Some(partial) = e.partial_response() {
                    report.status = Some(partial.status_code);
                    report.enter(ScenarioState::TearingDown);
                    report.teardown_error = self.run_teardown(partial, store);
                }
                report.transport_error = Some(e);
                return report.finish();
            }
        };
        report.status = Some(response.status_code);

        report.enter(ScenarioState::Asserting);
        for assertion in &self.assertions {
            report.assertions_run += 1;
            if let Err(failure) = assertion.check(&response) {
                log::debug!("scenario '{}': {}", self.name, failure);
                report.assertion_failures.push(failure);
            }
        }

        report.enter(ScenarioState::TearingDown);
        report.teardown_error = self.run_teardown(&response, store);

        report.finish()
    }

    fn run_teardown(
        &self,
        response: &CapturedResponse,
        store: &mut EnvironmentStore,
    ) -> Option<TeardownError> {
        let err = self.teardown.run(response, store).err()?;
        log::warn!("scenario '{}' teardown failed: {}", self.name, err);
        Some(err)
    }
}
