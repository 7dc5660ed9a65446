//! Captured HTTP responses.

use super::request::HttpRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::time::Duration;

/// The response a scenario's request produced.
///
/// Transient: it lives for one scenario, is read by the assertions and the
/// teardown, and is then dropped. The rendered request is kept alongside for
/// diagnostic logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedResponse {
    /// HTTP status code (e.g., 200, 401, 500).
    pub status_code: u16,

    /// Canonical reason phrase for the status code.
    pub status_text: String,

    /// Response headers.
    pub headers: HashMap<String, String>,

    /// Response body as raw bytes.
    pub body: Vec<u8>,

    /// Time from sending the request to receiving the full body.
    pub duration: Duration,

    /// The request that produced this response.
    pub request: HttpRequest,
}

impl CapturedResponse {
    /// Creates an empty response for `request`.
    pub fn new(status_code: u16, status_text: impl Into<String>, request: HttpRequest) -> Self {
        Self {
            status_code,
            status_text: status_text.into(),
            headers: HashMap::new(),
            body: Vec::new(),
            duration: Duration::ZERO,
            request,
        }
    }

    /// Convenience constructor for a JSON response.
    pub fn json_response(status_code: u16, body: &JsonValue, request: HttpRequest) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status_code)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown");
        let mut response = Self::new(status_code, status_text, request);
        response.add_header("Content-Type", "application/json");
        response.set_body(body.to_string().into_bytes());
        response
    }

    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    pub fn set_body(&mut self, body: Vec<u8>) {
        self.body = body;
    }

    /// Attempts to parse the response body as UTF-8 text.
    pub fn body_as_string(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.clone())
    }

    /// Lossy UTF-8 rendering for logs and reports.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parses the body as JSON.
    ///
    /// An empty body is not valid JSON and yields an error.
    pub fn json(&self) -> Result<JsonValue, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
