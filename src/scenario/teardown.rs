//! Teardown: moving values from a captured response into the environment.

use crate::environment::EnvironmentStore;
use crate::models::CapturedResponse;
use crate::variables::{extract_value, CaptureDirective, ExtractError, VarError};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by a teardown step. Reported separately from assertion
/// failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeardownError {
    /// The response lacks the field a variable is populated from.
    #[error("cannot set '{variable}': field '{path}' missing from response")]
    MissingField { variable: String, path: String },

    /// Any other extraction failure (missing header, non-JSON body).
    #[error("cannot set '{variable}': {source}")]
    Extract {
        variable: String,
        #[source]
        source: ExtractError,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("unexpected response body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Variable(#[from] VarError),
}

/// Programmatic teardown step.
pub type TeardownFn =
    dyn Fn(&CapturedResponse, &mut EnvironmentStore) -> Result<(), TeardownError> + Send + Sync;

/// What a scenario does with its response once assertions have run.
#[derive(Clone, Default)]
pub enum Teardown {
    /// Nothing is extracted.
    #[default]
    None,
    /// Declarative `name = path` captures, applied in order.
    Captures(Vec<CaptureDirective>),
    /// Arbitrary code with read access to the response and write access to
    /// the store.
    Custom(Arc<TeardownFn>),
}

impl Teardown {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&CapturedResponse, &mut EnvironmentStore) -> Result<(), TeardownError>
            + Send
            + Sync
            + 'static,
    {
        Teardown::Custom(Arc::new(f))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Teardown::None)
    }

    /// Runs the teardown against `response`.
    ///
    /// Captures are applied one at a time; the first one that fails stops
    /// the step, and values set before it stay set.
    pub fn run(
        &self,
        response: &CapturedResponse,
        store: &mut EnvironmentStore,
    ) -> Result<(), TeardownError> {
        match self {
            Teardown::None => Ok(()),
            Teardown::Captures(directives) => {
                for directive in directives {
                    let value = extract_value(response, &directive.path)
                        .map_err(|e| capture_error(&directive.variable_name, e))?;
                    store.set(directive.variable_name.clone(), value);
                }
                Ok(())
            }
            Teardown::Custom(f) => f(response, store),
        }
    }
}

fn capture_error(variable: &str, err: ExtractError) -> TeardownError {
    match err {
        ExtractError::MissingField(path) => TeardownError::MissingField {
            variable: variable.to_string(),
            path,
        },
        source => TeardownError::Extract {
            variable: variable.to_string(),
            source,
        },
    }
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Teardown::None => write!(f, "None"),
            Teardown::Captures(directives) => f.debug_tuple("Captures").field(directives).finish(),
            Teardown::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}
