//! Per-request render configuration.

use std::fmt;

use serde_json::Value;

use crate::props::{Prop, ValidationErrorer};

/// Configuration and data for rendering one page response.
///
/// Request-scoped: build a fresh context per render. Chain the `with_*`
/// methods to accumulate props, validation errors, and history options.
#[derive(Default)]
pub struct RenderContext {
    /// Custom data forwarded to the HTML template.
    pub template_data: Option<Value>,

    /// Ordered props sent to the page component.
    pub props: Vec<Prop>,

    /// Error bag the validation errors are scoped to.
    pub error_bag: String,

    /// Pending validation errors, flattened into one synthetic always-prop.
    pub validation_errors: Vec<Box<dyn ValidationErrorer>>,

    /// Instruct the client to encrypt the history state for this page.
    pub encrypt_history: bool,

    /// Instruct the client to clear its history stack.
    pub clear_history: bool,

    /// Concurrency override for this page: `0` uses the renderer default,
    /// negative forces sequential resolution.
    pub concurrency: i32,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append props to the page. Multiple calls accumulate.
    pub fn with_props(mut self, props: impl IntoIterator<Item = Prop>) -> Self {
        self.props.extend(props);
        self
    }

    /// Attach validation errors scoped to `error_bag`. The default (empty)
    /// bag produces the flat `errors` shape.
    pub fn with_validation_errors(
        mut self,
        errorer: impl ValidationErrorer + 'static,
        error_bag: impl Into<String>,
    ) -> Self {
        self.validation_errors.push(Box::new(errorer));
        self.error_bag = error_bag.into();
        self
    }

    /// Forward custom data to the HTML template.
    pub fn with_template_data(mut self, data: Value) -> Self {
        self.template_data = Some(data);
        self
    }

    pub fn with_clear_history(mut self) -> Self {
        self.clear_history = true;
        self
    }

    pub fn with_encrypt_history(mut self) -> Self {
        self.encrypt_history = true;
        self
    }

    /// Cap concurrent prop resolution for this page.
    pub fn with_concurrency(mut self, concurrency: i32) -> Self {
        self.concurrency = concurrency;
        self
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("props", &self.props)
            .field("error_bag", &self.error_bag)
            .field("validation_errors", &self.validation_errors.len())
            .field("encrypt_history", &self.encrypt_history)
            .field("clear_history", &self.clear_history)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::{ValidationError, DEFAULT_ERROR_BAG};

    #[test]
    fn test_with_props_accumulates() {
        let context = RenderContext::new()
            .with_props([Prop::new("a", 1)])
            .with_props([Prop::new("b", 2)]);

        assert_eq!(context.props.len(), 2);
        assert_eq!(context.props[1].key(), "b");
    }

    #[test]
    fn test_with_validation_errors_sets_bag() {
        let context = RenderContext::new()
            .with_validation_errors(ValidationError::new("email", "is required"), "login");

        assert_eq!(context.error_bag, "login");
        assert_eq!(context.validation_errors.len(), 1);
    }

    #[test]
    fn test_default_error_bag_is_empty() {
        assert_eq!(RenderContext::new().error_bag, DEFAULT_ERROR_BAG);
    }
}
