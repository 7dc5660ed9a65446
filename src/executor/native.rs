//! reqwest-backed HTTP client.

use super::{ExecutionConfig, HttpClient, TransportError};
use crate::models::{CapturedResponse, HttpMethod, HttpRequest};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Instant;

/// [`HttpClient`] implementation over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
    config: ExecutionConfig,
}

impl ReqwestClient {
    /// Builds a client honouring timeout, redirect and TLS settings.
    pub fn new(config: ExecutionConfig) -> Result<Self, TransportError> {
        let redirect = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects as usize)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .redirect(redirect)
            .danger_accept_invalid_certs(!config.validate_ssl)
            .build()
            .map_err(|e| TransportError::BuildError(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Default headers first, then the request's own headers, which win on
    /// a case-insensitive name clash.
    fn effective_headers(&self, request: &HttpRequest) -> HashMap<String, String> {
        let mut headers: HashMap<String, String> = self
            .config
            .default_headers
            .iter()
            .filter(|(name, _)| request.header(name).is_none())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        headers.extend(request.headers.clone());
        headers
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: &HttpRequest) -> Result<CapturedResponse, TransportError> {
        validate_url(&request.url)?;

        let method = match request.method {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::DELETE => reqwest::Method::DELETE,
            HttpMethod::PATCH => reqwest::Method::PATCH,
            HttpMethod::HEAD => reqwest::Method::HEAD,
            HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
        };

        let mut sent = request.clone();
        sent.headers = self.effective_headers(request);

        log::debug!("[{}] {} {}", sent.id, sent.method, sent.url);
        log::debug!("[{}] request headers: {:?}", sent.id, sent.headers);
        if let Some(body) = &sent.body {
            log::debug!("[{}] request payload: {}", sent.id, body);
        }

        let mut req_builder = self.client.request(method, &sent.url);
        for (name, value) in &sent.headers {
            req_builder = req_builder.header(name, value);
        }
        if let Some(body) = &sent.body {
            req_builder = req_builder.body(body.clone());
        }

        let start_time = Instant::now();
        let response = req_builder.send().await?;

        let status = response.status();
        let mut captured = CapturedResponse::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown"),
            sent,
        );
        for (name, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                captured.add_header(name.as_str(), value_str);
            }
        }

        match response.bytes().await {
            Ok(body) => captured.set_body(body.to_vec()),
            Err(e) => {
                captured.duration = start_time.elapsed();
                log::warn!(
                    "[{}] body read failed after status {}: {}",
                    captured.request.id,
                    captured.status_code,
                    e
                );
                return Err(TransportError::Incomplete {
                    message: e.to_string(),
                    partial: Box::new(captured),
                });
            }
        }
        captured.duration = start_time.elapsed();

        log::debug!(
            "[{}] {} {} in {:?}",
            captured.request.id,
            captured.status_code,
            captured.status_text,
            captured.duration
        );
        log::debug!("[{}] response body: {}", captured.request.id, captured.body_text());

        Ok(captured)
    }
}

/// Checks that the URL is well-formed and uses HTTP or HTTPS.
fn validate_url(url: &str) -> Result<(), TransportError> {
    let parsed = url::Url::parse(url)?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(TransportError::UnsupportedProtocol(format!(
            "Only HTTP and HTTPS are supported, got: {}",
            scheme
        )));
    }

    Ok(())
}
