//! Validation error collections sent to the client as a synthetic prop.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::json;

use super::Prop;

/// Error bag name used when no bag is requested.
pub const DEFAULT_ERROR_BAG: &str = "";

/// A single field validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The name of the field that failed validation.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The human-readable message describing the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// A collection of validation errors that can be sent to the client.
///
/// Implemented by decoders and form validators; collections attached to a
/// render context are flattened into one synthetic always-prop.
pub trait ValidationErrorer: Send + Sync {
    fn validation_errors(&self) -> Vec<ValidationError>;
}

impl ValidationErrorer for ValidationError {
    fn validation_errors(&self) -> Vec<ValidationError> {
        vec![self.clone()]
    }
}

impl ValidationErrorer for Vec<ValidationError> {
    fn validation_errors(&self) -> Vec<ValidationError> {
        self.clone()
    }
}

/// Flatten all pending validation errors into the synthetic always-prop.
///
/// The default bag produces `{"errors": {field: message}}`; a named bag
/// nests the same object one level under the bag name.
pub(crate) fn validation_errors_prop(
    errorers: &[Box<dyn ValidationErrorer>],
    error_bag: &str,
) -> Prop {
    let mut errors = BTreeMap::new();
    for errorer in errorers {
        for err in errorer.validation_errors() {
            errors.insert(err.field().to_string(), err.message().to_string());
        }
    }

    if error_bag != DEFAULT_ERROR_BAG {
        Prop::always(error_bag, json!({ "errors": errors }))
    } else {
        Prop::always("errors", json!(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn errorers(errs: Vec<ValidationError>) -> Vec<Box<dyn ValidationErrorer>> {
        vec![Box::new(errs)]
    }

    #[tokio::test]
    async fn test_default_bag_is_flat() {
        let prop = validation_errors_prop(
            &errorers(vec![ValidationError::new("email", "is required")]),
            DEFAULT_ERROR_BAG,
        );

        assert_eq!(prop.key(), "errors");
        assert!(!prop.is_ignorable());
        assert_eq!(
            prop.resolver().await.unwrap(),
            json!({ "email": "is required" })
        );
    }

    #[tokio::test]
    async fn test_named_bag_nests_errors() {
        let prop = validation_errors_prop(
            &errorers(vec![ValidationError::new("email", "is required")]),
            "login",
        );

        assert_eq!(prop.key(), "login");
        assert_eq!(
            prop.resolver().await.unwrap(),
            json!({ "errors": { "email": "is required" } })
        );
    }

    #[tokio::test]
    async fn test_later_errorers_override_fields() {
        let errorers: Vec<Box<dyn ValidationErrorer>> = vec![
            Box::new(ValidationError::new("name", "too short")),
            Box::new(ValidationError::new("name", "taken")),
        ];
        let prop = validation_errors_prop(&errorers, DEFAULT_ERROR_BAG);

        assert_eq!(prop.resolver().await.unwrap(), json!({ "name": "taken" }));
    }

    #[tokio::test]
    async fn test_no_errors_yields_empty_object() {
        let prop = validation_errors_prop(&[], DEFAULT_ERROR_BAG);
        assert_eq!(prop.resolver().await.unwrap(), json!({}));
    }
}
