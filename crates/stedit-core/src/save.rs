//! Save orchestration: validate, stage, name, rewrite, release.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::config::{EditorConfig, FormatConfig};
use crate::error::{EditorError, Result};
use crate::naming;
use crate::tools::MetadataWriter;
use crate::validate::validate_json;

/// Commit edited metadata to a new output file.
///
/// The edited text is validated, staged to a transient pretty-printed JSON
/// file, and handed to the external writer together with the source file
/// and a freshly resolved non-colliding output path. The staging file is
/// released once the writer returns, on success and failure alike; a
/// validation failure never creates one.
pub async fn commit(
    writer: &dyn MetadataWriter,
    config: &EditorConfig,
    source: Option<&Path>,
    edited_json: &str,
    output_name: &str,
) -> Result<PathBuf> {
    let source = source.ok_or(EditorError::NoSourceFile)?;

    let value = validate_json(edited_json)
        .into_value_or_message()
        .map_err(|message| EditorError::Validation { message })?;

    debug!("Staging edited metadata for {}", source.display());
    let staging = stage_edited_json(&value, &config.staging_dir)?;

    let output_path = naming::resolve_output_path(&config.output_dir, source, output_name);

    let write_result = writer
        .write_metadata(source, staging.path(), &output_path)
        .await;

    // Staging is released before the writer status is inspected; a failed
    // unlink is not fatal.
    if let Err(err) = staging.close() {
        warn!("Failed to remove staging file: {}", err);
    }

    write_result?;

    info!("Saved modified metadata to {}", output_path.display());
    Ok(output_path)
}

/// Write the validated JSON to a transient staging file, pretty-printed.
fn stage_edited_json(value: &Value, staging_dir: &Path) -> Result<NamedTempFile> {
    let mut staging = tempfile::Builder::new()
        .suffix(FormatConfig::STAGING_SUFFIX)
        .tempfile_in(staging_dir)
        .map_err(|e| EditorError::io_with_path(e, staging_dir))?;

    let pretty = serde_json::to_string_pretty(value)?;
    staging
        .write_all(pretty.as_bytes())
        .map_err(|e| EditorError::io_with_path(e, staging_dir))?;
    staging
        .flush()
        .map_err(|e| EditorError::io_with_path(e, staging_dir))?;

    Ok(staging)
}
