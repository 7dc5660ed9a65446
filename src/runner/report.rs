//! Run reports and their terminal rendering.

use crate::executor::TransportError;
use crate::scenario::{AssertionFailure, ScenarioState, Stage, TeardownError};
use crate::variables::VarError;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Write};

/// Terminal outcome of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    /// Failed, in the first stage that went wrong.
    Failed(Stage),
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }
}

/// Everything observed while running one scenario.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub name: String,
    pub outcome: Outcome,
    /// Every state visited, in order.
    pub states: Vec<ScenarioState>,
    #[serde(serialize_with = "display_opt")]
    pub setup_error: Option<VarError>,
    #[serde(serialize_with = "display_opt")]
    pub transport_error: Option<TransportError>,
    pub assertion_failures: Vec<AssertionFailure>,
    pub assertions_run: usize,
    #[serde(serialize_with = "display_opt")]
    pub teardown_error: Option<TeardownError>,
    /// Response status, when a response (possibly partial) was received.
    pub status: Option<u16>,
}

impl ScenarioReport {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: Outcome::Passed,
            states: vec![ScenarioState::Pending],
            setup_error: None,
            transport_error: None,
            assertion_failures: Vec::new(),
            assertions_run: 0,
            teardown_error: None,
            status: None,
        }
    }

    pub(crate) fn enter(&mut self, state: ScenarioState) {
        self.states.push(state);
    }

    /// Settles the outcome from what was recorded and enters the terminal
    /// state.
    pub(crate) fn finish(mut self) -> Self {
        self.outcome = match self.failed_stage() {
            Some(stage) => Outcome::Failed(stage),
            None => Outcome::Passed,
        };
        self.states.push(if self.outcome.is_passed() {
            ScenarioState::Passed
        } else {
            ScenarioState::Failed
        });
        log::info!("scenario '{}' finished: {}", self.name, self.outcome_label());
        self
    }

    fn failed_stage(&self) -> Option<Stage> {
        if self.setup_error.is_some() {
            Some(Stage::Setup)
        } else if self.transport_error.is_some() {
            Some(Stage::Execute)
        } else if !self.assertion_failures.is_empty() {
            Some(Stage::Assert)
        } else if self.teardown_error.is_some() {
            Some(Stage::Teardown)
        } else {
            None
        }
    }

    pub fn passed(&self) -> bool {
        self.outcome.is_passed()
    }

    pub fn final_state(&self) -> ScenarioState {
        self.states.last().copied().unwrap_or(ScenarioState::Pending)
    }

    fn outcome_label(&self) -> String {
        match self.outcome {
            Outcome::Passed => "passed".to_string(),
            Outcome::Failed(stage) => format!("failed at {}", stage),
        }
    }
}

/// Reports for a whole suite run, in execution order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteReport {
    pub scenarios: Vec<ScenarioReport>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SuiteReport {
    /// True iff every scenario passed.
    pub fn success(&self) -> bool {
        self.scenarios.iter().all(ScenarioReport::passed)
    }

    pub fn passed_count(&self) -> usize {
        self.scenarios.iter().filter(|s| s.passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.scenarios.len() - self.passed_count()
    }

    pub fn get(&self, name: &str) -> Option<&ScenarioReport> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Colored, human-readable summary.
    pub fn render(&self) -> String {
        let mut out = String::new();

        for scenario in &self.scenarios {
            match scenario.outcome {
                Outcome::Passed => {
                    let _ = writeln!(out, "  {} {}", "✓".green(), scenario.name);
                }
                Outcome::Failed(stage) => {
                    let _ = writeln!(
                        out,
                        "  {} {} {}",
                        "✗".red(),
                        scenario.name,
                        format!("(failed at {})", stage).dimmed()
                    );
                    render_failures(&mut out, scenario);
                }
            }
        }

        let elapsed = self.finished_at - self.started_at;
        let summary = format!(
            "{} passed, {} failed ({} ms)",
            self.passed_count(),
            self.failed_count(),
            elapsed.num_milliseconds()
        );
        let _ = writeln!(out);
        if self.success() {
            let _ = writeln!(out, "{}", summary.green().bold());
        } else {
            let _ = writeln!(out, "{}", summary.red().bold());
        }
        out
    }
}

fn render_failures(out: &mut String, scenario: &ScenarioReport) {
    if let Some(e) = &scenario.setup_error {
        let _ = writeln!(out, "      setup: {}", e);
    }
    if let Some(e) = &scenario.transport_error {
        let _ = writeln!(out, "      execute: {}", e);
    }
    for failure in &scenario.assertion_failures {
        let _ = writeln!(out, "      assert: {}", failure);
    }
    if let Some(e) = &scenario.teardown_error {
        let _ = writeln!(out, "      teardown: {}", e);
    }
}

fn display_opt<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    match value {
        Some(v) => serializer.collect_str(v),
        None => serializer.serialize_none(),
    }
}
