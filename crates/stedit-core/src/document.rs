//! The metadata document model.

use crate::config::FormatConfig;
use crate::error::{EditorError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A safetensors metadata header: string keys mapped to arbitrary JSON
/// values.
///
/// The distinguished `__metadata__` key holds the training-parameter
/// sub-mapping when present. Keys keep their source order through decode,
/// display and staging, so a rewritten header lists them exactly as the
/// source file did. A document is purely the JSON header an external tool
/// extracted or will rewrite; tensor data never passes through here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataDocument(Map<String, Value>);

impl MetadataDocument {
    /// Decode a JSON value into a document.
    ///
    /// The header is a mapping by definition; any other top-level shape is
    /// an invalid metadata structure.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(EditorError::MetadataDecode),
        }
    }

    /// Decode raw reader output into a document.
    ///
    /// The text is trimmed first; readers commonly emit a trailing newline.
    /// Both parse failures and non-object documents reduce to
    /// [`EditorError::MetadataDecode`] so callers see one failure mode.
    pub fn from_reader_output(text: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text.trim()).map_err(|_| EditorError::MetadataDecode)?;
        Self::from_value(value)
    }

    /// The training-parameter sub-mapping, or `None` when the key is
    /// missing or holds a non-object value.
    pub fn training_params(&self) -> Option<&Map<String, Value>> {
        self.0
            .get(FormatConfig::TRAINING_SECTION_KEY)
            .and_then(Value::as_object)
    }

    /// Look up a top-level header value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Pretty-print with two-space indentation, the form shown in the
    /// editing workspace.
    pub fn to_pretty_string(&self) -> String {
        // Serializing a string-keyed map of Values cannot fail.
        serde_json::to_string_pretty(&self.0).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_requires_object() {
        assert!(MetadataDocument::from_value(json!({"a": 1})).is_ok());
        assert!(matches!(
            MetadataDocument::from_value(json!([1, 2])),
            Err(EditorError::MetadataDecode)
        ));
        assert!(matches!(
            MetadataDocument::from_value(json!("text")),
            Err(EditorError::MetadataDecode)
        ));
    }

    #[test]
    fn test_from_reader_output_trims() {
        let doc = MetadataDocument::from_reader_output("  {\"k\": \"v\"}\n").unwrap();
        assert_eq!(doc.get("k"), Some(&json!("v")));
    }

    #[test]
    fn test_from_reader_output_rejects_garbage() {
        assert!(matches!(
            MetadataDocument::from_reader_output("not json"),
            Err(EditorError::MetadataDecode)
        ));
        // Valid JSON that is not an object is the same failure.
        assert!(matches!(
            MetadataDocument::from_reader_output("[1, 2]\n"),
            Err(EditorError::MetadataDecode)
        ));
    }

    #[test]
    fn test_training_params_lookup() {
        let doc =
            MetadataDocument::from_value(json!({"__metadata__": {"ss_steps": "1000"}})).unwrap();
        let params = doc.training_params().unwrap();
        assert_eq!(params.get("ss_steps"), Some(&json!("1000")));

        let doc = MetadataDocument::from_value(json!({"other": 1})).unwrap();
        assert!(doc.training_params().is_none());

        // A non-object section is treated the same as a missing one.
        let doc = MetadataDocument::from_value(json!({"__metadata__": "oops"})).unwrap();
        assert!(doc.training_params().is_none());
    }

    #[test]
    fn test_pretty_string_uses_two_space_indent() {
        let doc = MetadataDocument::from_value(json!({"k": "v"})).unwrap();
        assert_eq!(doc.to_pretty_string(), "{\n  \"k\": \"v\"\n}");
    }

    #[test]
    fn test_source_key_order_preserved() {
        let doc = MetadataDocument::from_reader_output(
            "{\"zzz\": 1, \"aaa\": 2, \"__metadata__\": {}}",
        )
        .unwrap();

        let text = doc.to_pretty_string();
        let zzz = text.find("\"zzz\"").unwrap();
        let aaa = text.find("\"aaa\"").unwrap();
        assert!(zzz < aaa, "header keys must keep their source order");
    }
}
