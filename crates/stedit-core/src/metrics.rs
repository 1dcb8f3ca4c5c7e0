//! Quick-glance projection of key training parameters.

use crate::config::FormatConfig;
use crate::document::MetadataDocument;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The fixed set of training-parameter fields surfaced for quick review.
///
/// Each field carries the raw JSON value from the document's
/// training-parameter section, or the string `"N/A"` when absent. The view
/// is recomputed from the document on every load and every valid edit,
/// never edited directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    #[serde(rename = "ss_optimizer")]
    pub optimizer: Value,
    #[serde(rename = "ss_num_epochs")]
    pub num_epochs: Value,
    #[serde(rename = "ss_unet_lr")]
    pub unet_lr: Value,
    #[serde(rename = "ss_text_encoder_lr")]
    pub text_encoder_lr: Value,
    #[serde(rename = "ss_steps")]
    pub steps: Value,
}

impl Default for KeyMetrics {
    fn default() -> Self {
        Self {
            optimizer: missing(),
            num_epochs: missing(),
            unet_lr: missing(),
            text_encoder_lr: missing(),
            steps: missing(),
        }
    }
}

impl KeyMetrics {
    /// Project the metrics view out of a document.
    ///
    /// Pure over the document: a missing or non-object training-parameter
    /// section yields the all-`"N/A"` view rather than an error.
    pub fn project(document: &MetadataDocument) -> Self {
        let lookup = |key: &str| {
            document
                .training_params()
                .and_then(|params| params.get(key))
                .cloned()
                .unwrap_or_else(missing)
        };

        Self {
            optimizer: lookup("ss_optimizer"),
            num_epochs: lookup("ss_num_epochs"),
            unet_lr: lookup("ss_unet_lr"),
            text_encoder_lr: lookup("ss_text_encoder_lr"),
            steps: lookup("ss_steps"),
        }
    }
}

fn missing() -> Value {
    Value::String(FormatConfig::MISSING_VALUE.to_string())
}
