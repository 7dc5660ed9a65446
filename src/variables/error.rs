//! Variable resolution errors.

use thiserror::Error;

/// Errors that can occur while resolving or extracting variables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VarError {
    /// A `{{name}}` placeholder (or a store lookup) referenced a key that was
    /// never set.
    #[error("Unbound variable: {0}")]
    UnboundVariable(String),

    /// Directive or path syntax is invalid.
    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),
}

impl VarError {
    /// Returns the offending identifier for an unbound variable.
    pub fn unbound_name(&self) -> Option<&str> {
        match self {
            VarError::UnboundVariable(name) => Some(name),
            VarError::InvalidSyntax(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VarError::UnboundVariable("last_org_owner_email".to_string());
        assert_eq!(err.to_string(), "Unbound variable: last_org_owner_email");

        let err = VarError::InvalidSyntax("missing '='".to_string());
        assert_eq!(err.to_string(), "Invalid syntax: missing '='");
    }

    #[test]
    fn test_unbound_name() {
        let err = VarError::UnboundVariable("server".to_string());
        assert_eq!(err.unbound_name(), Some("server"));
        assert_eq!(VarError::InvalidSyntax("x".to_string()).unbound_name(), None);
    }
}
