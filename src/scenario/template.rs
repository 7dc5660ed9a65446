//! Request templates rendered against the environment store.

use crate::environment::EnvironmentStore;
use crate::models::{HttpMethod, HttpRequest};
use crate::variables::{substitute, substitute_json, VarError};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Request body before substitution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BodyTemplate {
    /// Raw text, sent as-is after substitution.
    Text(String),
    /// Structured JSON; placeholders are substituted in string leaves and
    /// the result is serialized compactly.
    Json(JsonValue),
}

/// The setup half of a scenario: an HTTP request with `{{name}}`
/// placeholders in its url, header names and values, and body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestTemplate {
    pub method: HttpMethod,

    /// Absolute url, or a path starting with `/` that is resolved against
    /// the base-url variable.
    pub url: String,

    #[serde(default)]
    pub headers: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyTemplate>,
}

impl RequestTemplate {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_text_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(BodyTemplate::Text(body.into()));
        self
    }

    pub fn with_json_body(mut self, body: JsonValue) -> Self {
        self.body = Some(BodyTemplate::Json(body));
        self
    }

    /// Substitutes every placeholder and builds the request to send.
    ///
    /// The url is rendered first, then headers (name, then value) in name
    /// order, then the body; the first unbound identifier aborts rendering.
    /// A relative url is prefixed with the value of `base_url_variable`,
    /// which must therefore be bound.
    pub fn render(
        &self,
        store: &EnvironmentStore,
        base_url_variable: &str,
    ) -> Result<HttpRequest, VarError> {
        let url = self.render_url(store, base_url_variable)?;
        let mut request = HttpRequest::new(self.method, url);

        let mut names: Vec<&String> = self.headers.keys().collect();
        names.sort();
        for name in names {
            let rendered_name = substitute(name, store)?;
            request.add_header(rendered_name, substitute(&self.headers[name], store)?);
        }

        match &self.body {
            Some(BodyTemplate::Text(text)) => request.set_body(substitute(text, store)?),
            Some(BodyTemplate::Json(value)) => {
                let rendered = substitute_json(value, store)?;
                request.set_body(rendered.to_string());
            }
            None => {}
        }

        Ok(request)
    }

    fn render_url(
        &self,
        store: &EnvironmentStore,
        base_url_variable: &str,
    ) -> Result<String, VarError> {
        let url = self.url.trim();
        if url.starts_with('/') {
            let base = store.get(base_url_variable)?;
            let path = substitute(url, store)?;
            Ok(format!("{}{}", base.trim_end_matches('/'), path))
        } else {
            substitute(url, store)
        }
    }
}
