//! Shared helpers for the integration tests.

pub mod login_scenario_test;
pub mod suite_run_test;

use api_scenarios::executor::{ExecutionConfig, ReqwestClient};
use api_scenarios::runner::SuiteRunner;
use std::sync::Once;

static INIT: Once = Once::new();

/// Routes library logs through the test harness's captured output.
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// A runner over a real reqwest client, with `server` pointing at `uri`.
pub fn runner_for(uri: &str) -> SuiteRunner<ReqwestClient> {
    init_test_env();
    let client = ReqwestClient::new(ExecutionConfig::default()).expect("client builds");
    let mut runner = SuiteRunner::new(client);
    runner.seed("server", uri);
    runner
}
