//! Pre-flight validation
//!
//! Every request payload exposes an explicit `validate()` that runs before the
//! request is built. Checks run in a fixed order and the first violation is
//! returned, so the message a caller sees for a given payload is stable.

use thiserror::Error;

/// A request payload violated a business rule before any network call was made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Name of the offending field
    pub field: String,
    /// Caller-facing description of the violation
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Error for a required field that is absent or blank
    pub fn missing(field: &str) -> Self {
        Self::new(field, format!("Required parameter {} is missing", field))
    }
}

/// Require a string field to be present and not only whitespace
pub fn require_non_blank(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::missing(field));
    }
    Ok(())
}

/// Same as [`require_non_blank`] for optional fields
pub fn require_present(field: &str, value: Option<&str>) -> Result<(), ValidationError> {
    require_non_blank(field, value.unwrap_or_default())
}

/// Loose e-mail shape check: one `@`, non-empty local part, and a dot in the domain
pub fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_message_names_field() {
        let err = require_non_blank("client_id", "   ").unwrap_err();
        assert_eq!(err.field, "client_id");
        assert_eq!(err.to_string(), "Required parameter client_id is missing");
    }

    #[test]
    fn test_require_present() {
        assert!(require_present("project_name", Some("cats")).is_ok());
        assert!(require_present("project_name", None).is_err());
    }

    #[test]
    fn test_email_shape() {
        assert!(is_email("annotator@example.com"));
        assert!(is_email("a.b+c@sub.example.io"));
        assert!(!is_email("annotator"));
        assert!(!is_email("annotator@localhost"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("a@b@example.com"));
        assert!(!is_email("a@example."));
    }
}
