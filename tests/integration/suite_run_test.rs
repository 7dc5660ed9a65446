//! Whole suites loaded from disk, with values flowing between scenarios.

use super::{init_test_env, runner_for};
use api_scenarios::environment::discover_environments;
use api_scenarios::executor::{ExecutionConfig, ReqwestClient};
use api_scenarios::runner::{Outcome, SuiteRunner};
use api_scenarios::scenario::{Stage, TeardownError};
use api_scenarios::suite::load_suite;
use api_scenarios::variables::VarError;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SIGNUP: &str = r#"
name: OrgOwner - Signup
request:
  method: POST
  url: /users
  body:
    email: new-owner@test.com
    password: itsasecret
expect:
  status: 201
  properties: [email]
capture:
  - last_org_owner_email = $.email
"#;

const LOGIN: &str = r#"
name: OrgOwner - Login
request:
  method: POST
  url: /auth/token
  body: |
    {"email":"{{last_org_owner_email}}","password": "itsasecret"}
expect:
  status: 200
  properties: [access_token, refresh_token]
capture:
  - org_owner_token = $.access_token
"#;

const PROFILE: &str = r#"
name: OrgOwner - Profile
request:
  method: GET
  url: /users/me
  headers:
    Authorization: Bearer {{org_owner_token}}
expect:
  status: 200
  equals:
    - { path: $.user.email, value: new-owner@test.com }
"#;

fn write_suite(dir: &Path) {
    let setup = dir.join("01 Setup");
    fs::create_dir_all(&setup).unwrap();
    // Written out of order; discovery sorts by name.
    fs::write(setup.join("09 Profile.yaml"), PROFILE).unwrap();
    fs::write(setup.join("07 Login.yaml"), LOGIN).unwrap();
    fs::write(setup.join("02 Signup.yaml"), SIGNUP).unwrap();
}

async fn mount_login_and_profile(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .and(body_json(json!({ "email": "new-owner@test.com", "password": "itsasecret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "owner-token",
            "refresh_token": "owner-refresh"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("Authorization", "Bearer owner-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "user": { "email": "new-owner@test.com" } })),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_values_flow_through_the_suite_in_path_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "email": "new-owner@test.com" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_login_and_profile(&server).await;

    let dir = TempDir::new().unwrap();
    write_suite(dir.path());
    let scenarios = load_suite(dir.path(), &[]).unwrap();

    let mut runner = runner_for(&server.uri());
    let report = runner.run(&scenarios).await;

    let names: Vec<&str> = report.scenarios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["OrgOwner - Signup", "OrgOwner - Login", "OrgOwner - Profile"]);
    assert!(report.success(), "{}", report.render());

    let store = runner.into_store();
    assert_eq!(store.get("last_org_owner_email"), Ok("new-owner@test.com"));
    assert_eq!(store.get("org_owner_token"), Ok("owner-token"));
}

#[tokio::test]
async fn test_failed_signup_cascades_into_unbound_variables() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    write_suite(dir.path());
    let scenarios = load_suite(dir.path(), &[]).unwrap();

    let mut runner = runner_for(&server.uri());
    let report = runner.run(&scenarios).await;

    let signup = &report.scenarios[0];
    assert_eq!(signup.outcome, Outcome::Failed(Stage::Assert));
    assert_eq!(signup.assertion_failures.len(), 2);
    assert!(matches!(
        signup.teardown_error,
        Some(TeardownError::MissingField { ref variable, .. }) if variable == "last_org_owner_email"
    ));

    let login = &report.scenarios[1];
    assert_eq!(login.outcome, Outcome::Failed(Stage::Setup));
    assert_eq!(
        login.setup_error,
        Some(VarError::UnboundVariable("last_org_owner_email".to_string()))
    );

    let profile = &report.scenarios[2];
    assert_eq!(
        profile.setup_error,
        Some(VarError::UnboundVariable("org_owner_token".to_string()))
    );

    assert_eq!(report.failed_count(), 3);
}

#[tokio::test]
async fn test_environment_file_seeds_the_run() {
    init_test_env();
    let server = MockServer::start().await;
    mount_login_and_profile(&server).await;

    let dir = TempDir::new().unwrap();
    let setup = dir.path().join("01 Setup");
    fs::create_dir_all(&setup).unwrap();
    fs::write(setup.join("07 Login.yaml"), LOGIN).unwrap();
    fs::write(
        dir.path().join("scenario-env.json"),
        json!({
            "$shared": { "last_org_owner_email": "new-owner@test.com" },
            "$active": "local",
            "local": { "server": server.uri() },
            "staging": { "server": "http://unreachable.invalid" }
        })
        .to_string(),
    )
    .unwrap();

    let environments = discover_environments(&setup, "scenario-env.json").unwrap();
    let seeds = environments.seed_values(None).unwrap();
    let scenarios = load_suite(dir.path(), &["scenario-env.json"]).unwrap();
    assert_eq!(scenarios.len(), 1);

    let client = ReqwestClient::new(ExecutionConfig::default()).unwrap();
    let mut runner = SuiteRunner::new(client);
    runner.seed_all(seeds);

    let report = runner.run(&scenarios).await;
    assert!(report.success(), "{}", report.render());
    assert_eq!(runner.store().get("org_owner_token"), Ok("owner-token"));
}

#[tokio::test]
async fn test_json_report_for_a_suite_run() {
    let server = MockServer::start().await;
    mount_login_and_profile(&server).await;

    let mut runner = runner_for(&server.uri());
    runner.seed("last_org_owner_email", "nobody@test.com");

    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("07 Login.yaml"), LOGIN).unwrap();
    let report = runner.run(&load_suite(dir.path(), &[]).unwrap()).await;

    // body_json does not match, so wiremock answers 404.
    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    let scenario = &value["scenarios"][0];
    assert_eq!(scenario["outcome"], json!({ "failed": "assert" }));
    assert_eq!(scenario["status"], 404);
    assert_eq!(scenario["assertionFailures"][0]["actual"], "404 Not Found");
    assert!(value["startedAt"].is_string());
}
