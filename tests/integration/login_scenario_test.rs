//! The org-owner login scenario against a mocked `/auth/token`.

use super::runner_for;
use api_scenarios::runner::Outcome;
use api_scenarios::scenario::{Stage, TeardownError};
use api_scenarios::scenarios::org_owner_login;
use api_scenarios::suite::load_scenario_file;
use api_scenarios::variables::VarError;
use serde_json::json;
use std::path::Path;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OWNER_EMAIL: &str = "orgowner@test.com";

async fn token_endpoint(server: &MockServer, response: ResponseTemplate, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .and(header("Accept", "application/json"))
        .and(body_json(json!({ "email": OWNER_EMAIL, "password": "itsasecret" })))
        .respond_with(response)
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_stores_access_token() {
    let server = MockServer::start().await;
    token_endpoint(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "eyJ.access",
            "refresh_token": "eyJ.refresh"
        })),
        1,
    )
    .await;

    let mut runner = runner_for(&server.uri());
    runner.seed("last_org_owner_email", OWNER_EMAIL);

    let report = runner.run(&[org_owner_login()]).await;

    assert!(report.success(), "{}", report.render());
    assert_eq!(report.scenarios[0].assertions_run, 3);
    assert_eq!(runner.store().get("org_owner_token"), Ok("eyJ.access"));
}

#[tokio::test]
async fn test_unseeded_email_fails_before_sending() {
    let server = MockServer::start().await;
    token_endpoint(&server, ResponseTemplate::new(200), 0).await;

    let mut runner = runner_for(&server.uri());
    let report = runner.run(&[org_owner_login()]).await;

    let scenario = &report.scenarios[0];
    assert_eq!(scenario.outcome, Outcome::Failed(Stage::Setup));
    assert_eq!(
        scenario.setup_error,
        Some(VarError::UnboundVariable("last_org_owner_email".to_string()))
    );
    assert!(scenario.status.is_none());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_unauthorized_fails_assertions_and_teardown() {
    let server = MockServer::start().await;
    token_endpoint(
        &server,
        ResponseTemplate::new(401).set_body_json(json!({ "error": "invalid credentials" })),
        1,
    )
    .await;

    let mut runner = runner_for(&server.uri());
    runner.seed("last_org_owner_email", OWNER_EMAIL);

    let report = runner.run(&[org_owner_login()]).await;
    let scenario = &report.scenarios[0];

    assert_eq!(scenario.outcome, Outcome::Failed(Stage::Assert));
    assert_eq!(scenario.status, Some(401));
    assert_eq!(scenario.assertion_failures[0].assertion, "status == 200");
    assert_eq!(
        scenario.teardown_error,
        Some(TeardownError::MissingField {
            variable: "org_owner_token".to_string(),
            path: "access_token".to_string(),
        })
    );
    assert!(!runner.store().contains("org_owner_token"));
}

#[tokio::test]
async fn test_shipped_suite_file_matches_builtin_scenario() {
    let file = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("suites/01 Setup/00 Invites and User Creation/07 OrgOwner - Login.yaml");
    let scenario = load_scenario_file(&file).expect("suite file parses");
    assert_eq!(scenario.name, "OrgOwner - Login");

    let server = MockServer::start().await;
    token_endpoint(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "from-yaml",
            "refresh_token": "r"
        })),
        1,
    )
    .await;

    let mut runner = runner_for(&server.uri());
    runner.seed("last_org_owner_email", OWNER_EMAIL);
    let report = runner.run(&[scenario]).await;

    assert!(report.success(), "{}", report.render());
    assert_eq!(runner.into_store().get("org_owner_token"), Ok("from-yaml"));
}
