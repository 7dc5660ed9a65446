//! On-disk scenario definitions.

use crate::scenario::{Assertion, RequestTemplate, Scenario, Teardown};
use crate::variables::CaptureDirective;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A scenario as written in a YAML or JSON suite file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    /// Defaults to the file stem when omitted.
    #[serde(default)]
    pub name: Option<String>,

    pub request: RequestTemplate,

    #[serde(default)]
    pub expect: Expectations,

    /// `name = path` directives applied during teardown.
    #[serde(default)]
    pub capture: Vec<CaptureDirective>,
}

/// Checks declared under `expect:`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expectations {
    #[serde(default)]
    pub status: Option<u16>,

    /// JSON paths that must exist in the body.
    #[serde(default)]
    pub properties: Vec<String>,

    #[serde(default)]
    pub equals: Vec<PropertyExpectation>,

    #[serde(default)]
    pub headers: Vec<HeaderExpectation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyExpectation {
    pub path: String,
    pub value: JsonValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderExpectation {
    pub name: String,
    pub value: String,
}

impl Expectations {
    /// Assertions in evaluation order: status, properties, values, headers.
    pub fn assertions(&self) -> Vec<Assertion> {
        let mut assertions = Vec::new();
        if let Some(status) = self.status {
            assertions.push(Assertion::status(status));
        }
        assertions.extend(self.properties.iter().map(Assertion::has_property));
        assertions.extend(
            self.equals
                .iter()
                .map(|e| Assertion::property_equals(&e.path, e.value.clone())),
        );
        assertions.extend(
            self.headers
                .iter()
                .map(|h| Assertion::header_equals(&h.name, &h.value)),
        );
        assertions
    }
}

impl ScenarioDefinition {
    pub fn into_scenario(self, fallback_name: &str) -> Scenario {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| fallback_name.to_string());

        let teardown = if self.capture.is_empty() {
            Teardown::None
        } else {
            Teardown::Captures(self.capture)
        };

        Scenario {
            name,
            assertions: self.expect.assertions(),
            request: self.request,
            teardown,
        }
    }
}
