//! Output file naming with collision avoidance.

use crate::config::FormatConfig;
use std::path::{Path, PathBuf};

/// Derive the base output file name from the source file and an optional
/// user-supplied name.
///
/// A non-blank user name is honored verbatim, gaining the model extension
/// only when missing. Otherwise the name derives from the source stem plus
/// the `_modified` suffix.
///
/// # Examples
///
/// ```
/// use stedit_core::naming::resolve_base_name;
/// use std::path::Path;
///
/// let source = Path::new("/uploads/model.safetensors");
/// assert_eq!(resolve_base_name(source, ""), "model_modified.safetensors");
/// assert_eq!(resolve_base_name(source, "  "), "model_modified.safetensors");
/// assert_eq!(resolve_base_name(source, "custom"), "custom.safetensors");
/// assert_eq!(resolve_base_name(source, "custom.safetensors"), "custom.safetensors");
/// ```
pub fn resolve_base_name(source: &Path, user_name: &str) -> String {
    let trimmed = user_name.trim();
    if trimmed.is_empty() {
        format!(
            "{}{}{}",
            source_stem(source),
            FormatConfig::MODIFIED_SUFFIX,
            FormatConfig::MODEL_EXTENSION
        )
    } else if trimmed.ends_with(FormatConfig::MODEL_EXTENSION) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{}", FormatConfig::MODEL_EXTENSION)
    }
}

/// Resolve a non-colliding output path inside `output_dir`.
///
/// Starts from [`resolve_base_name`]; while the candidate exists, the
/// candidate is rewritten as `<source-stem>_modified_<version>.safetensors`
/// with the version counting up from 1. Once any candidate collides, the
/// versioned form takes over even when a user name was supplied. The
/// returned path does not exist at the moment of the final check.
///
/// # Examples
///
/// ```ignore
/// use stedit_core::naming::resolve_output_path;
/// use std::path::Path;
///
/// let out = resolve_output_path(Path::new("."), Path::new("model.safetensors"), "");
/// assert_eq!(out, Path::new("./model_modified.safetensors"));
/// ```
pub fn resolve_output_path(output_dir: &Path, source: &Path, user_name: &str) -> PathBuf {
    let stem = source_stem(source);
    let mut candidate = output_dir.join(resolve_base_name(source, user_name));
    let mut version = 1u32;

    while candidate.exists() {
        candidate = output_dir.join(format!(
            "{stem}{}_{version}{}",
            FormatConfig::MODIFIED_SUFFIX,
            FormatConfig::MODEL_EXTENSION
        ));
        version += 1;
    }

    candidate
}

fn source_stem(source: &Path) -> String {
    source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
