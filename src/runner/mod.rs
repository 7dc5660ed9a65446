//! Suite runner.
//!
//! Runs scenarios strictly in the order given, one at a time, threading a
//! single [`EnvironmentStore`] through all of them. A failing scenario never
//! stops the suite; later scenarios that depend on its output will usually
//! fail at setup with an unbound variable, which is the expected cascade.
//!
//! ```no_run
//! use api_scenarios::executor::{ExecutionConfig, ReqwestClient};
//! use api_scenarios::runner::SuiteRunner;
//! use api_scenarios::scenarios::org_owner_login;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ReqwestClient::new(ExecutionConfig::default())?;
//! let mut runner = SuiteRunner::new(client);
//! runner.seed("server", "http://localhost:8088");
//! runner.seed("last_org_owner_email", "owner@example.com");
//!
//! let report = runner.run(&[org_owner_login()]).await;
//! assert!(report.success());
//! # Ok(())
//! # }
//! ```

pub mod report;

pub use report::{Outcome, ScenarioReport, SuiteReport};

use crate::environment::EnvironmentStore;
use crate::executor::HttpClient;
use crate::scenario::Scenario;
use chrono::Utc;

const DEFAULT_BASE_URL_VARIABLE: &str = "server";

/// Owns the environment for one suite run and the client used to send every
/// request.
pub struct SuiteRunner<C: HttpClient> {
    client: C,
    store: EnvironmentStore,
    base_url_variable: String,
}

impl<C: HttpClient> SuiteRunner<C> {
    /// Creates a runner with an empty store.
    pub fn new(client: C) -> Self {
        Self::with_store(client, EnvironmentStore::new())
    }

    /// Creates a runner around an existing store.
    pub fn with_store(client: C, store: EnvironmentStore) -> Self {
        Self {
            client,
            store,
            base_url_variable: DEFAULT_BASE_URL_VARIABLE.to_string(),
        }
    }

    /// Variable that relative request urls are resolved against.
    pub fn with_base_url_variable(mut self, name: impl Into<String>) -> Self {
        self.base_url_variable = name.into();
        self
    }

    /// Sets one variable before the first scenario runs.
    pub fn seed(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.store.set(name, value);
    }

    pub fn seed_all<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.store.seed(values);
    }

    pub fn store(&self) -> &EnvironmentStore {
        &self.store
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Ends the run and hands back the store.
    pub fn into_store(self) -> EnvironmentStore {
        self.store
    }

    /// Runs `scenarios` in order and returns one report per scenario.
    ///
    /// Teardown of scenario N completes before setup of scenario N+1 begins.
    pub async fn run(&mut self, scenarios: &[Scenario]) -> SuiteReport {
        let started_at = Utc::now();
        log::info!("running {} scenario(s)", scenarios.len());

        let mut reports = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            let report = scenario
                .run(&mut self.store, &self.client, &self.base_url_variable)
                .await;
            reports.push(report);
        }

        let report = SuiteReport {
            scenarios: reports,
            started_at,
            finished_at: Utc::now(),
        };
        log::info!(
            "suite finished: {} passed, {} failed",
            report.passed_count(),
            report.failed_count()
        );
        report
    }
}
