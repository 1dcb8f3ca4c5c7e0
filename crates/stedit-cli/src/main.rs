//! stedit - command-line front-end for the safetensors metadata editor.
//!
//! Wraps the stedit-core library: `show` prints a file's metadata header
//! and key training parameters, `write` validates edited header JSON and
//! commits it to a new copy of the file via the external writer tool.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use stedit_core::{EditorConfig, MetadataEditor, ReaderOptions};

#[derive(Parser, Debug)]
#[command(name = "stedit")]
#[command(about = "Edit safetensors metadata headers")]
struct Args {
    /// Program run for tool invocations (an interpreter or a binary)
    #[arg(long, default_value = "python3")]
    tool: PathBuf,

    /// Script passed as the tool's first argument
    #[arg(long, default_value = "safetensors_util.py")]
    script: PathBuf,

    /// Invoke the tool directly, without a script argument
    #[arg(long)]
    no_script: bool,

    /// Directory for output files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the metadata header of a model file
    Show {
        /// Model file to inspect
        file: PathBuf,

        /// Print the key training parameters instead of the full header
        #[arg(long)]
        metrics: bool,
    },
    /// Rewrite a model file with an edited metadata header
    Write {
        /// Source model file
        file: PathBuf,

        /// File holding the edited header JSON (stdin when omitted)
        #[arg(long)]
        edited: Option<PathBuf>,

        /// Output name (auto-named from the source when empty)
        #[arg(long, default_value = "")]
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging. Results go to stdout, so logs go to stderr.
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = EditorConfig {
        tool_program: args.tool,
        tool_script: if args.no_script {
            None
        } else {
            Some(args.script)
        },
        reader: ReaderOptions::default(),
        output_dir: args.output_dir,
        staging_dir: std::env::temp_dir(),
    };
    let mut editor = MetadataEditor::new(config);

    match args.command {
        Command::Show { file, metrics } => {
            let outcome = editor.load(Some(&file)).await;
            if let Some(error) = outcome.error {
                bail!(error);
            }

            if metrics {
                let view = outcome.metrics.unwrap_or_default();
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("{}", outcome.editor_text);
            }
        }

        Command::Write { file, edited, name } => {
            let edited_json = match edited {
                Some(path) => std::fs::read_to_string(&path)?,
                None => std::io::read_to_string(std::io::stdin())?,
            };

            let loaded = editor.load(Some(&file)).await;
            if let Some(error) = loaded.error {
                bail!(error);
            }

            let saved = editor.save(&edited_json, &name).await;
            match (saved.output_path, saved.error) {
                (Some(path), _) => println!("{}", path.display()),
                (None, Some(error)) => bail!(error),
                (None, None) => bail!("save produced no output path"),
            }
        }
    }

    Ok(())
}
