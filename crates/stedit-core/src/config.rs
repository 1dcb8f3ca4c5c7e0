//! Configuration for the metadata editor.
//!
//! Everything an editor instance needs is carried in plain values owned by
//! that instance; no module-level or process-global state.

use std::path::PathBuf;

/// File-format constants shared across the editor.
pub struct FormatConfig;

impl FormatConfig {
    pub const MODEL_EXTENSION: &'static str = ".safetensors";
    pub const MODIFIED_SUFFIX: &'static str = "_modified";
    pub const MISSING_VALUE: &'static str = "N/A";
    pub const STAGING_SUFFIX: &'static str = ".json";
    pub const TRAINING_SECTION_KEY: &'static str = "__metadata__";
}

/// Flags forwarded to the external metadata reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Suppress the reader's incidental output (`-q`).
    pub quiet: bool,
    /// Ask the reader to deep-parse nested header values (`-pm`).
    pub parse_more: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            quiet: true,
            parse_more: true,
        }
    }
}

/// Configuration for a metadata editor instance.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Program run for both tool invocations (an interpreter or a binary).
    pub tool_program: PathBuf,
    /// Optional script passed as the program's first argument.
    pub tool_script: Option<PathBuf>,
    /// Flags for metadata reads.
    pub reader: ReaderOptions,
    /// Directory in which output files are resolved and written.
    pub output_dir: PathBuf,
    /// Directory for transient staging files.
    pub staging_dir: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tool_program: PathBuf::from("python3"),
            tool_script: Some(PathBuf::from("safetensors_util.py")),
            reader: ReaderOptions::default(),
            output_dir: PathBuf::from("."),
            staging_dir: std::env::temp_dir(),
        }
    }
}
