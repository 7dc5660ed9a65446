//! Variables module
//!
//! Placeholder substitution against the environment store, plus capture
//! directives that move values from responses back into the store.

pub mod capture;
pub mod error;
pub mod extract;
pub mod substitution;

pub use capture::{parse_capture_directive, CaptureDirective, PathType};
pub use error::VarError;
pub use extract::{evaluate_jsonpath, extract_value, ExtractError};
pub use substitution::{has_placeholders, placeholders, substitute, substitute_json};
