//! Ordered, stateful HTTP API scenarios
//!
//! This crate runs suites of HTTP scenarios against a live API. Each scenario
//! renders one request from a template, sends it, checks the response and
//! copies values out of it into a shared environment that later scenarios
//! read from. A signup scenario stores the new account's email; a login
//! scenario sends it and stores the token it gets back; everything after
//! that authenticates with the token.
//!
//! # Architecture
//!
//! - **environment**: the run's variable store and the environment file loader
//! - **variables**: `{{name}}` substitution, capture directives, value extraction
//! - **models**: rendered requests and captured responses
//! - **executor**: the `HttpClient` seam and its reqwest implementation
//! - **scenario**: request templates, assertions, teardown and the per-scenario
//!   state machine
//! - **runner**: the sequential suite runner and its reports
//! - **suite**: YAML/JSON scenario files discovered from a directory tree
//! - **scenarios**: scenarios defined in code
//! - **config**: runner configuration with defaults and validation
//!
//! # Example
//!
//! ```no_run
//! use api_scenarios::executor::{ExecutionConfig, ReqwestClient};
//! use api_scenarios::runner::SuiteRunner;
//! use api_scenarios::suite::load_suite;
//! use std::path::Path;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let scenarios = load_suite(Path::new("suites"), &["scenario-env.json"])?;
//!
//! let mut runner = SuiteRunner::new(ReqwestClient::new(ExecutionConfig::default())?);
//! runner.seed("server", "http://localhost:8088");
//!
//! let report = runner.run(&scenarios).await;
//! println!("{}", report.render());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod environment;
pub mod executor;
pub mod models;
pub mod runner;
pub mod scenario;
pub mod scenarios;
pub mod suite;
pub mod variables;

pub use environment::EnvironmentStore;
pub use executor::{HttpClient, ReqwestClient, TransportError};
pub use runner::{SuiteReport, SuiteRunner};
pub use scenario::{Assertion, RequestTemplate, Scenario, Teardown};
