//! Total JSON validation for edited metadata text.

use serde_json::Value;

/// Outcome of validating edited JSON text.
///
/// Carries the parsed value on success and a human-readable parse message
/// on failure; exactly one of the two is populated.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    value: Option<Value>,
    message: String,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Consume into the parsed value, or the parse message on invalid input.
    pub fn into_value_or_message(self) -> std::result::Result<Value, String> {
        match self.value {
            Some(value) => Ok(value),
            None => Err(self.message),
        }
    }

    /// The parse error message, empty when valid.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Parse arbitrary text as JSON without propagating the parse error.
///
/// Any JSON document shape is accepted, object or not; shape constraints
/// belong to the callers that need them. Never panics.
pub fn validate_json(text: &str) -> Validation {
    match serde_json::from_str(text) {
        Ok(value) => Validation {
            value: Some(value),
            message: String::new(),
        },
        Err(err) => Validation {
            value: None,
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_object() {
        let validation = validate_json("{\"a\": 1}");
        assert!(validation.is_valid());
        assert_eq!(validation.value(), Some(&json!({"a": 1})));
        assert_eq!(validation.message(), "");
    }

    #[test]
    fn test_non_object_shapes_are_valid() {
        assert!(validate_json("[1, 2, 3]").is_valid());
        assert!(validate_json("\"text\"").is_valid());
        assert!(validate_json("42").is_valid());
        assert!(validate_json("null").is_valid());
    }

    #[test]
    fn test_invalid_text_reduces_to_message() {
        let validation = validate_json("{\"a\": }");
        assert!(!validation.is_valid());
        assert!(validation.value().is_none());
        // serde_json points at the offending position.
        assert!(validation.message().contains("line 1"));
    }

    #[test]
    fn test_empty_input_is_invalid() {
        let validation = validate_json("");
        assert!(!validation.is_valid());
        assert!(!validation.message().is_empty());
    }

    #[test]
    fn test_into_value_or_message() {
        assert_eq!(
            validate_json("true").into_value_or_message(),
            Ok(json!(true))
        );
        let message = validate_json("nope").into_value_or_message().unwrap_err();
        assert!(!message.is_empty());
    }
}
