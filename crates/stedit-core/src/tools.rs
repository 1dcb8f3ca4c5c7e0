//! External tool adapters for reading and writing metadata headers.
//!
//! The editor never parses the safetensors container itself. Reads and
//! rewrites go through the two traits below; `SafetensorsUtil` is the
//! subprocess-backed implementation driving the stock safetensors utility.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::{EditorConfig, ReaderOptions};
use crate::document::MetadataDocument;
use crate::error::{EditorError, Result};

/// Reads the metadata header out of a model file.
///
/// Implementations return the decoded document directly; how it is
/// obtained (subprocess, in-process parser, test double) is their concern.
#[async_trait::async_trait]
pub trait MetadataReader: Send + Sync {
    async fn read_metadata(&self, path: &Path) -> Result<MetadataDocument>;
}

/// Writes an edited metadata header into a new model file.
#[async_trait::async_trait]
pub trait MetadataWriter: Send + Sync {
    /// Rewrite `source` with the header JSON staged at `staging`, producing
    /// `output`. Tensor data is carried over untouched.
    async fn write_metadata(&self, source: &Path, staging: &Path, output: &Path) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Subprocess shim
// ---------------------------------------------------------------------------

/// Subprocess-backed implementation of both tool traits.
///
/// Reads run `metadata <file> [-pm] [-q]` and capture the child's stdout,
/// the tool's sole result channel. Writes run
/// `writemd <source> <staging> <output> -f` and report through the exit
/// status alone. Neither invocation has a timeout; a hung tool stalls the
/// calling operation.
#[derive(Debug, Clone)]
pub struct SafetensorsUtil {
    program: PathBuf,
    script: Option<PathBuf>,
    options: ReaderOptions,
}

impl SafetensorsUtil {
    pub fn new(
        program: impl Into<PathBuf>,
        script: Option<PathBuf>,
        options: ReaderOptions,
    ) -> Self {
        Self {
            program: program.into(),
            script,
            options,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            program: config.tool_program.clone(),
            script: config.tool_script.clone(),
            options: config.reader,
        }
    }

    /// Argument list for a `metadata` read, script included.
    fn read_args(&self, file: &Path) -> Vec<OsString> {
        let mut args = self.script_arg();
        args.push("metadata".into());
        args.push(file.as_os_str().to_owned());
        if self.options.parse_more {
            args.push("-pm".into());
        }
        if self.options.quiet {
            args.push("-q".into());
        }
        args
    }

    /// Argument list for a `writemd` rewrite, script included.
    fn write_args(&self, source: &Path, staging: &Path, output: &Path) -> Vec<OsString> {
        let mut args = self.script_arg();
        args.push("writemd".into());
        args.push(source.as_os_str().to_owned());
        args.push(staging.as_os_str().to_owned());
        args.push(output.as_os_str().to_owned());
        args.push("-f".into());
        args
    }

    fn script_arg(&self) -> Vec<OsString> {
        match &self.script {
            Some(script) => vec![script.clone().into_os_string()],
            None => Vec::new(),
        }
    }

    fn launch_error(&self, err: std::io::Error) -> EditorError {
        EditorError::ToolLaunch {
            tool: self.program.clone(),
            message: err.to_string(),
            source: Some(err),
        }
    }
}

#[async_trait::async_trait]
impl MetadataReader for SafetensorsUtil {
    async fn read_metadata(&self, path: &Path) -> Result<MetadataDocument> {
        debug!("Reading metadata from {}", path.display());

        let output = Command::new(&self.program)
            .args(self.read_args(path))
            .output()
            .await
            .map_err(|e| self.launch_error(e))?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            warn!("Metadata read of {} failed with exit code {}", path.display(), code);
            return Err(EditorError::ReaderFailed { code });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        MetadataDocument::from_reader_output(&stdout)
    }
}

#[async_trait::async_trait]
impl MetadataWriter for SafetensorsUtil {
    async fn write_metadata(&self, source: &Path, staging: &Path, output: &Path) -> Result<()> {
        debug!(
            "Rewriting {} with staged header {} -> {}",
            source.display(),
            staging.display(),
            output.display()
        );

        let result = Command::new(&self.program)
            .args(self.write_args(source, staging, output))
            .output()
            .await
            .map_err(|e| self.launch_error(e))?;

        if !result.status.success() {
            // Carried verbatim into the status text, trailing newline and all.
            let stderr = String::from_utf8_lossy(&result.stderr).into_owned();
            warn!("Metadata write to {} failed: {}", output.display(), stderr.trim());
            return Err(EditorError::WriterFailed { stderr });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> SafetensorsUtil {
        SafetensorsUtil::new(
            "python3",
            Some(PathBuf::from("safetensors_util.py")),
            ReaderOptions::default(),
        )
    }

    #[test]
    fn test_read_args_construction() {
        let args = tool().read_args(Path::new("model.safetensors"));
        let expected: Vec<OsString> = [
            "safetensors_util.py",
            "metadata",
            "model.safetensors",
            "-pm",
            "-q",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn test_read_args_respect_options() {
        let tool = SafetensorsUtil::new(
            "safetensors-util",
            None,
            ReaderOptions {
                quiet: false,
                parse_more: false,
            },
        );
        let args = tool.read_args(Path::new("m.safetensors"));
        let expected: Vec<OsString> = ["metadata", "m.safetensors"]
            .iter()
            .map(OsString::from)
            .collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn test_write_args_construction() {
        let args = tool().write_args(
            Path::new("src.safetensors"),
            Path::new("/tmp/stage.json"),
            Path::new("out.safetensors"),
        );
        let expected: Vec<OsString> = [
            "safetensors_util.py",
            "writemd",
            "src.safetensors",
            "/tmp/stage.json",
            "out.safetensors",
            "-f",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn test_from_config() {
        let config = EditorConfig::default();
        let tool = SafetensorsUtil::from_config(&config);
        assert_eq!(tool.program, config.tool_program);
        assert_eq!(tool.script, config.tool_script);
        assert_eq!(tool.options, config.reader);
    }
}
