//! Placeholder substitution
//!
//! Replaces `{{identifier}}` markers with the current value of `identifier`
//! in the [`EnvironmentStore`]. Substitution is a single pass: a substituted
//! value is never scanned again, so a value that itself contains `{{...}}`
//! is inserted verbatim.
//!
//! There is no escaping mechanism. Literal `{{`/`}}` pairs cannot appear in a
//! template.

use super::VarError;
use crate::environment::EnvironmentStore;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;

/// Cached regex pattern for matching `{{identifier}}` with optional whitespace.
static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("Failed to compile placeholder regex"));

/// Substitutes all `{{identifier}}` markers in `template`.
///
/// Every placeholder is resolved before any output is produced; if one of
/// them is unbound the call fails with [`VarError::UnboundVariable`] naming
/// the first offending identifier and no partial string is returned.
///
/// # Examples
///
/// ```
/// use api_scenarios::environment::EnvironmentStore;
/// use api_scenarios::variables::substitute;
///
/// let mut store = EnvironmentStore::new();
/// store.set("last_org_owner_email", "owner@example.com");
///
/// let body = substitute(r#"{"email":"{{last_org_owner_email}}"}"#, &store).unwrap();
/// assert_eq!(body, r#"{"email":"owner@example.com"}"#);
/// ```
pub fn substitute(template: &str, store: &EnvironmentStore) -> Result<String, VarError> {
    if !template.contains("{{") {
        return Ok(template.to_string());
    }

    let mut result = String::with_capacity(template.len() + (template.len() / 4));
    let mut last_match_end = 0;

    for cap in PLACEHOLDER_REGEX.captures_iter(template) {
        let (Some(full_match), Some(name)) = (cap.get(0), cap.get(1)) else {
            continue;
        };

        result.push_str(&template[last_match_end..full_match.start()]);
        result.push_str(store.get(name.as_str().trim())?);
        last_match_end = full_match.end();
    }

    result.push_str(&template[last_match_end..]);
    Ok(result)
}

/// Substitutes placeholders in every string leaf of a JSON value.
///
/// Object keys, numbers, booleans and nulls are left untouched.
pub fn substitute_json(value: &JsonValue, store: &EnvironmentStore) -> Result<JsonValue, VarError> {
    Ok(match value {
        JsonValue::String(s) => JsonValue::String(substitute(s, store)?),
        JsonValue::Array(items) => JsonValue::Array(
            items
                .iter()
                .map(|item| substitute_json(item, store))
                .collect::<Result<_, _>>()?,
        ),
        JsonValue::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, item) in map {
                out.insert(key.clone(), substitute_json(item, store)?);
            }
            JsonValue::Object(out)
        }
        other => other.clone(),
    })
}

/// Lists the identifiers referenced by `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER_REGEX
        .captures_iter(template)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Checks whether `text` still contains a placeholder marker.
pub fn has_placeholders(text: &str) -> bool {
    PLACEHOLDER_REGEX.is_match(text)
}
