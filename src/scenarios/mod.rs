//! Scenarios defined in code rather than in suite files.

pub mod auth;

pub use auth::{org_owner_login, TokenResponse};
