//! Capture directives: declarative teardown for scenario files.
//!
//! A capture directive names a variable and the place in the captured
//! response its value comes from:
//!
//! ```text
//! org_owner_token = $.access_token
//! refresh_token   = refresh_token
//! session_id      = headers.X-Session-Id
//! ```
//!
//! JSON paths may be written with or without the leading `$.`. Paths starting
//! with `headers.` read a response header (case-insensitive).

use super::VarError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Matches `variableName = path`.
static CAPTURE_DIRECTIVE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([a-zA-Z_][a-zA-Z0-9_]*)\s*=\s*(.+?)\s*$")
        .expect("Failed to compile capture directive regex")
});

/// Where a captured value is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathType {
    /// JSON path into the response body, normalized to start with `$`.
    ///
    /// Example: `$.access_token` or `$.items[0].id`
    JsonPath(String),

    /// Response header name.
    ///
    /// Example: `headers.Location`
    Header(String),
}

impl PathType {
    /// Classifies a path string.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim();

        if let Some(header_name) = trimmed.strip_prefix("headers.") {
            return PathType::Header(header_name.trim().to_string());
        }

        if trimmed.starts_with('$') {
            PathType::JsonPath(trimmed.to_string())
        } else if trimmed.starts_with('[') {
            PathType::JsonPath(format!("${}", trimmed))
        } else {
            PathType::JsonPath(format!("$.{}", trimmed))
        }
    }
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathType::JsonPath(path) => write!(f, "{}", path),
            PathType::Header(name) => write!(f, "headers.{}", name),
        }
    }
}

/// One `name = path` extraction performed during teardown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureDirective {
    /// Environment variable written with the captured value.
    pub variable_name: String,

    /// Source of the value.
    pub path: PathType,
}

impl CaptureDirective {
    pub fn new(variable_name: impl Into<String>, path: PathType) -> Self {
        Self {
            variable_name: variable_name.into(),
            path,
        }
    }

    /// Shorthand for a JSON body capture.
    pub fn json(variable_name: impl Into<String>, path: &str) -> Self {
        Self::new(variable_name, PathType::from_path(path))
    }
}

impl fmt::Display for CaptureDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.variable_name, self.path)
    }
}

impl FromStr for CaptureDirective {
    type Err = VarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_capture_directive(s)
    }
}

impl Serialize for CaptureDirective {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CaptureDirective {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses a single capture directive.
///
/// # Examples
///
/// ```
/// use api_scenarios::variables::capture::{parse_capture_directive, PathType};
///
/// let directive = parse_capture_directive("org_owner_token = $.access_token").unwrap();
/// assert_eq!(directive.variable_name, "org_owner_token");
/// assert_eq!(directive.path, PathType::JsonPath("$.access_token".to_string()));
///
/// assert!(parse_capture_directive("not a directive").is_err());
/// ```
pub fn parse_capture_directive(text: &str) -> Result<CaptureDirective, VarError> {
    let captures = CAPTURE_DIRECTIVE_REGEX.captures(text).ok_or_else(|| {
        VarError::InvalidSyntax(format!(
            "Capture directive must look like 'name = path', got '{}'",
            text.trim()
        ))
    })?;

    let (Some(name), Some(path)) = (captures.get(1), captures.get(2)) else {
        return Err(VarError::InvalidSyntax(format!(
            "Incomplete capture directive '{}'",
            text.trim()
        )));
    };

    let path = PathType::from_path(path.as_str());
    let valid = match &path {
        PathType::JsonPath(p) => validate_jsonpath(p),
        PathType::Header(h) => validate_header_name(h),
    };
    if !valid {
        return Err(VarError::InvalidSyntax(format!(
            "Invalid capture path '{}'",
            path
        )));
    }

    Ok(CaptureDirective::new(name.as_str(), path))
}

/// Checks that a JSON path starts with `$` and has balanced brackets.
pub fn validate_jsonpath(path: &str) -> bool {
    if !path.starts_with('$') {
        return false;
    }

    let mut depth = 0i32;
    for ch in path.chars() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }

    depth == 0
}

/// Header names may contain letters, digits, hyphens and underscores.
pub fn validate_header_name(header_name: &str) -> bool {
    !header_name.is_empty()
        && header_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
