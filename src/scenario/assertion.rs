//! Response assertions.
//!
//! An assertion never panics: checking one yields either `Ok(())` or an
//! [`AssertionFailure`] value, so every assertion of a scenario is evaluated
//! and teardown still runs afterwards.

use crate::models::CapturedResponse;
use crate::variables::{evaluate_jsonpath, PathType};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt;

/// A check against the captured response.
#[derive(Debug, Clone, PartialEq)]
pub enum Assertion {
    /// The status code equals the given value.
    StatusEquals(u16),
    /// The JSON body has a value at the given path.
    HasProperty(String),
    /// The JSON body has the given value at the given path.
    PropertyEquals { path: String, value: JsonValue },
    /// The named header (case-insensitive) has the given value. Media-type
    /// parameters such as `; charset=utf-8` are ignored unless the expected
    /// value carries them.
    HeaderEquals { name: String, value: String },
}

/// A failed assertion, as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssertionFailure {
    pub assertion: String,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.assertion, self.expected, self.actual
        )
    }
}

impl Assertion {
    pub fn status(code: u16) -> Self {
        Assertion::StatusEquals(code)
    }

    pub fn has_property(path: impl Into<String>) -> Self {
        Assertion::HasProperty(path.into())
    }

    pub fn property_equals(path: impl Into<String>, value: JsonValue) -> Self {
        Assertion::PropertyEquals {
            path: path.into(),
            value,
        }
    }

    pub fn header_equals(name: impl Into<String>, value: impl Into<String>) -> Self {
        Assertion::HeaderEquals {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Short human-readable description, e.g. `status == 200`.
    pub fn describe(&self) -> String {
        match self {
            Assertion::StatusEquals(code) => format!("status == {}", code),
            Assertion::HasProperty(path) => format!("has property {}", path),
            Assertion::PropertyEquals { path, value } => format!("{} == {}", path, value),
            Assertion::HeaderEquals { name, value } => format!("header {} == {}", name, value),
        }
    }

    pub fn check(&self, response: &CapturedResponse) -> Result<(), AssertionFailure> {
        match self {
            Assertion::StatusEquals(expected) => {
                if response.status_code == *expected {
                    Ok(())
                } else {
                    Err(self.failure(
                        expected.to_string(),
                        format!("{} {}", response.status_code, response.status_text),
                    ))
                }
            }
            Assertion::HasProperty(path) => {
                let body = self.json_body(response)?;
                match evaluate_jsonpath(&body, &normalize(path)) {
                    Some(_) => Ok(()),
                    None => Err(self.failure(format!("property {}", path), "no such property")),
                }
            }
            Assertion::PropertyEquals { path, value } => {
                let body = self.json_body(response)?;
                match evaluate_jsonpath(&body, &normalize(path)) {
                    Some(actual) if actual == value => Ok(()),
                    Some(actual) => Err(self.failure(value.to_string(), actual.to_string())),
                    None => Err(self.failure(value.to_string(), "no such property")),
                }
            }
            Assertion::HeaderEquals { name, value } => match response.header(name) {
                Some(actual) if header_matches(actual, value) => Ok(()),
                Some(actual) => Err(self.failure(value.clone(), actual)),
                None => Err(self.failure(value.clone(), "header not present")),
            },
        }
    }

    fn failure(&self, expected: impl Into<String>, actual: impl Into<String>) -> AssertionFailure {
        AssertionFailure {
            assertion: self.describe(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    fn json_body(&self, response: &CapturedResponse) -> Result<JsonValue, AssertionFailure> {
        response
            .json()
            .map_err(|e| self.failure("a JSON body", format!("invalid JSON ({})", e)))
    }
}

fn normalize(path: &str) -> String {
    PathType::from_path(path).to_string()
}

fn header_matches(actual: &str, expected: &str) -> bool {
    let actual = actual.trim();
    let expected = expected.trim();
    if actual.eq_ignore_ascii_case(expected) {
        return true;
    }
    !expected.contains(';')
        && actual
            .split(';')
            .next()
            .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case(expected))
}
