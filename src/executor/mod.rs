//! HTTP request executor.
//!
//! Scenarios depend only on the [`HttpClient`] trait: one awaitable `send`
//! that returns the captured response (status, headers, body and the request
//! that was sent) or a [`TransportError`]. [`ReqwestClient`] is the
//! production implementation; tests substitute their own.
//!
//! Requests are never retried here.

pub mod config;
pub mod error;
pub mod native;

pub use config::ExecutionConfig;
pub use error::TransportError;
pub use native::ReqwestClient;

use crate::models::{CapturedResponse, HttpRequest};
use async_trait::async_trait;

/// Sends one rendered request and awaits exactly one response.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> Result<CapturedResponse, TransportError>;
}

#[async_trait]
impl<T: HttpClient + ?Sized> HttpClient for &T {
    async fn send(&self, request: &HttpRequest) -> Result<CapturedResponse, TransportError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: HttpClient + ?Sized> HttpClient for Box<T> {
    async fn send(&self, request: &HttpRequest) -> Result<CapturedResponse, TransportError> {
        (**self).send(request).await
    }
}
