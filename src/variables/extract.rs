//! Value extraction from captured responses.
//!
//! Evaluates the small JSON path dialect used by capture directives and
//! assertions: `$`, `$.field`, `$.a.b`, `$.items[0].id`.

use super::capture::PathType;
use crate::models::CapturedResponse;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Reasons a value could not be read from a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The body does not contain the requested field.
    #[error("field '{0}' not found in response body")]
    MissingField(String),

    /// The response does not carry the requested header.
    #[error("header '{0}' not found in response")]
    MissingHeader(String),

    /// The body could not be parsed as JSON.
    #[error("response body is not valid JSON: {0}")]
    InvalidBody(String),
}

/// Reads the value designated by `path` from `response`, as a string.
///
/// Strings are returned without quotes; other JSON values are rendered as
/// compact JSON. A `null` field counts as missing.
pub fn extract_value(response: &CapturedResponse, path: &PathType) -> Result<String, ExtractError> {
    match path {
        PathType::Header(name) => response
            .header(name)
            .map(str::to_string)
            .ok_or_else(|| ExtractError::MissingHeader(name.clone())),
        PathType::JsonPath(jsonpath) => {
            let json = response
                .json()
                .map_err(|e| ExtractError::InvalidBody(e.to_string()))?;
            match evaluate_jsonpath(&json, jsonpath) {
                None | Some(JsonValue::Null) => Err(ExtractError::MissingField(jsonpath.clone())),
                Some(value) => Ok(json_value_to_string(value)),
            }
        }
    }
}

/// Evaluates a JSON path against a JSON value.
///
/// Returns `None` when any segment does not exist.
pub fn evaluate_jsonpath<'a>(json: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let path = path.trim();
    let path = path.strip_prefix('$').unwrap_or(path);
    let path = path.strip_prefix('.').unwrap_or(path);

    let mut current = json;
    for segment in parse_jsonpath_segments(path) {
        current = match segment {
            PathSegment::Field(name) => current.get(name.as_str())?,
            PathSegment::ArrayIndex(index) => current.get(index)?,
        };
    }

    Some(current)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    Field(String),
    ArrayIndex(usize),
}

/// Splits `user.items[0].id` into field and index segments.
fn parse_jsonpath_segments(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Field(std::mem::take(&mut current)));
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Field(std::mem::take(&mut current)));
                }

                let mut index_str = String::new();
                for next_ch in chars.by_ref() {
                    if next_ch == ']' {
                        break;
                    }
                    index_str.push(next_ch);
                }

                let index_str = index_str.trim();
                match index_str.parse::<usize>() {
                    Ok(index) => segments.push(PathSegment::ArrayIndex(index)),
                    // ['quoted key'] access
                    Err(_) => segments.push(PathSegment::Field(
                        index_str.trim_matches(|c| c == '\'' || c == '"').to_string(),
                    )),
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(PathSegment::Field(current));
    }

    segments
}

/// Strings are returned as-is; everything else as compact JSON.
pub fn json_value_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
