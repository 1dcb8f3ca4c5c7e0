//! stedit core - Headless library for editing safetensors metadata headers.
//!
//! Loads the metadata header of a model file through an external reader
//! tool, projects the key training parameters, validates free-form JSON
//! edits, and commits a modified copy of the file through an external
//! writer. Tensor data never passes through this crate.
//!
//! Every public operation on [`MetadataEditor`] is total: failures come
//! back as status text inside plain outcome structs, so any front-end
//! (CLI, GUI, RPC) can render results without touching error types.
//!
//! # Example
//!
//! ```rust,ignore
//! use stedit_core::{EditorConfig, MetadataEditor};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut editor = MetadataEditor::new(EditorConfig::default());
//!
//!     let loaded = editor.load(Some(Path::new("lora.safetensors"))).await;
//!     println!("{}", loaded.editor_text);
//!
//!     let saved = editor.save(&loaded.editor_text, "lora_tweaked").await;
//!     if let Some(path) = saved.output_path {
//!         println!("Wrote {}", path.display());
//!     }
//! }
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod metrics;
pub mod naming;
pub mod save;
pub mod session;
pub mod tools;
pub mod validate;

// Re-export commonly used types
pub use config::{EditorConfig, FormatConfig, ReaderOptions};
pub use document::MetadataDocument;
pub use error::{EditorError, Result};
pub use metrics::KeyMetrics;
pub use session::EditSession;
pub use tools::{MetadataReader, MetadataWriter, SafetensorsUtil};
pub use validate::{validate_json, Validation};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

/// Result of a load operation.
///
/// A missing path yields the empty awaiting-input outcome: every field
/// blank, no error. Failures carry status text in `error` with the other
/// fields blank, leaving the editor ready for another upload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadOutcome {
    pub document: Option<MetadataDocument>,
    pub metrics: Option<KeyMetrics>,
    /// Pretty-printed document for the editing workspace.
    pub editor_text: String,
    pub error: Option<String>,
}

impl LoadOutcome {
    fn awaiting_input() -> Self {
        Self::default()
    }

    fn failed(message: String) -> Self {
        Self {
            error: Some(message),
            ..Self::default()
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }
}

/// Result of re-projecting edited JSON for a live preview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOutcome {
    /// The edit parses as a JSON object; views should re-render.
    Updated {
        document: MetadataDocument,
        metrics: KeyMetrics,
    },
    /// The edit does not parse, or is not an object; views keep the
    /// last-known-good state.
    Unchanged,
}

/// Result of a save operation.
#[derive(Debug, Clone, Serialize)]
pub struct SaveOutcome {
    pub output_path: Option<PathBuf>,
    pub error: Option<String>,
}

/// Main entry point for metadata editing.
///
/// Owns the configuration, the two external tool adapters, and the
/// single-slot edit session. The three operations mirror the events of the
/// editing workflow: upload ([`load`](Self::load)), live edit
/// ([`preview`](Self::preview)) and commit ([`save`](Self::save)).
pub struct MetadataEditor {
    config: EditorConfig,
    reader: Arc<dyn MetadataReader>,
    writer: Arc<dyn MetadataWriter>,
    session: EditSession,
}

impl MetadataEditor {
    /// Create an editor driving the stock safetensors utility.
    pub fn new(config: EditorConfig) -> Self {
        let util = Arc::new(SafetensorsUtil::from_config(&config));
        Self {
            reader: util.clone(),
            writer: util,
            config,
            session: EditSession::new(),
        }
    }

    /// Create an editor with injected tool implementations.
    pub fn with_tools(
        config: EditorConfig,
        reader: Arc<dyn MetadataReader>,
        writer: Arc<dyn MetadataWriter>,
    ) -> Self {
        Self {
            config,
            reader,
            writer,
            session: EditSession::new(),
        }
    }

    /// The file the current session's edits belong to, if any.
    pub fn source(&self) -> Option<&Path> {
        self.session.source()
    }

    /// Load the metadata header of `path`.
    ///
    /// `None` is the idle state (nothing uploaded yet) and yields the empty
    /// outcome. Every call rewrites the session: the new path on success,
    /// empty on failure, so a stale source can never be saved over.
    pub async fn load(&mut self, path: Option<&Path>) -> LoadOutcome {
        let Some(path) = path else {
            debug!("Load invoked without a file");
            self.session.clear();
            return LoadOutcome::awaiting_input();
        };

        debug!("Loading file: {}", path.display());
        match self.reader.read_metadata(path).await {
            Ok(document) => {
                self.session.set(path);
                LoadOutcome {
                    metrics: Some(KeyMetrics::project(&document)),
                    editor_text: document.to_pretty_string(),
                    document: Some(document),
                    error: None,
                }
            }
            Err(err) => {
                self.session.clear();
                LoadOutcome::failed(err.to_string())
            }
        }
    }

    /// Re-project the live views from edited JSON text.
    ///
    /// Called on every edit, so unparseable intermediate states are
    /// routine: they return [`EditOutcome::Unchanged`] and are logged at
    /// debug level only.
    pub fn preview(&self, edited_json: &str) -> EditOutcome {
        let value = match validate_json(edited_json).into_value_or_message() {
            Ok(value) => value,
            Err(message) => {
                debug!("Edited JSON does not parse: {}", message);
                return EditOutcome::Unchanged;
            }
        };

        match MetadataDocument::from_value(value) {
            Ok(document) => EditOutcome::Updated {
                metrics: KeyMetrics::project(&document),
                document,
            },
            Err(_) => {
                debug!("Edited JSON is not an object; keeping last good view");
                EditOutcome::Unchanged
            }
        }
    }

    /// Commit edited JSON to a new output file in the configured output
    /// directory.
    ///
    /// Returns the output path on success and status text on failure. The
    /// session is untouched either way; the source stays loaded for
    /// further edits.
    pub async fn save(&self, edited_json: &str, output_name: &str) -> SaveOutcome {
        debug!("Initiating save process");
        match save::commit(
            self.writer.as_ref(),
            &self.config,
            self.session.source(),
            edited_json,
            output_name,
        )
        .await
        {
            Ok(path) => SaveOutcome {
                output_path: Some(path),
                error: None,
            },
            Err(err) => SaveOutcome {
                output_path: None,
                error: Some(err.to_status_text()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn editor() -> MetadataEditor {
        MetadataEditor::new(EditorConfig::default())
    }

    #[test]
    fn test_session_starts_empty() {
        assert!(editor().source().is_none());
    }

    #[test]
    fn test_preview_updates_on_valid_object() {
        let outcome = editor().preview("{\"__metadata__\": {\"ss_optimizer\": \"AdamW\"}}");
        match outcome {
            EditOutcome::Updated { document, metrics } => {
                assert!(document.training_params().is_some());
                assert_eq!(metrics.optimizer, json!("AdamW"));
                assert_eq!(metrics.steps, json!("N/A"));
            }
            EditOutcome::Unchanged => panic!("expected an updated view"),
        }
    }

    #[test]
    fn test_preview_unchanged_on_parse_error() {
        assert!(matches!(
            editor().preview("{\"broken\": "),
            EditOutcome::Unchanged
        ));
    }

    #[test]
    fn test_preview_unchanged_on_non_object() {
        assert!(matches!(editor().preview("[1, 2, 3]"), EditOutcome::Unchanged));
        assert!(matches!(editor().preview("42"), EditOutcome::Unchanged));
    }
}
