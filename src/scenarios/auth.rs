//! Authentication scenarios.

use crate::environment::EnvironmentStore;
use crate::models::{CapturedResponse, HttpMethod};
use crate::scenario::{Assertion, RequestTemplate, Scenario, Teardown, TeardownError};
use serde::Deserialize;

/// Password every seeded test account is created with.
pub const SEEDED_PASSWORD: &str = "itsasecret";

/// Body of a successful `POST /auth/token`.
///
/// Both fields are optional so that an error body still decodes; callers
/// check presence explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl TokenResponse {
    pub fn from_response(response: &CapturedResponse) -> Result<Self, TeardownError> {
        serde_json::from_slice(&response.body)
            .map_err(|e| TeardownError::InvalidBody(e.to_string()))
    }

    /// Returns the access token, or a missing-field error naming `variable`.
    pub fn require_access_token(&self, variable: &str) -> Result<&str, TeardownError> {
        self.access_token
            .as_deref()
            .ok_or_else(|| TeardownError::MissingField {
                variable: variable.to_string(),
                path: "access_token".to_string(),
            })
    }
}

/// Logs in as the organization owner created earlier in the suite.
///
/// Reads `server` and `last_org_owner_email`; on success stores the access
/// token as `org_owner_token`.
pub fn org_owner_login() -> Scenario {
    let body = format!(
        r#"{{"email":"{{{{last_org_owner_email}}}}","password": "{}"}}"#,
        SEEDED_PASSWORD
    );

    Scenario::new(
        "OrgOwner - Login",
        RequestTemplate::new(HttpMethod::POST, "/auth/token")
            .with_header("Accept", "application/json")
            .with_header("Content-Type", "application/json")
            .with_text_body(body),
    )
    .assert(Assertion::status(200))
    .assert(Assertion::has_property("access_token"))
    .assert(Assertion::has_property("refresh_token"))
    .teardown(Teardown::custom(store_org_owner_token))
}

fn store_org_owner_token(
    response: &CapturedResponse,
    store: &mut EnvironmentStore,
) -> Result<(), TeardownError> {
    let tokens = TokenResponse::from_response(response)?;
    let token = tokens.require_access_token("org_owner_token")?;
    store.set("org_owner_token", token);
    Ok(())
}
