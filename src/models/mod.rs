//! Data models for HTTP requests and captured responses.

pub mod request;
pub mod response;

pub use request::{HttpMethod, HttpRequest};
pub use response::CapturedResponse;
