//! Basic usage example - print the metadata header of a model file

use std::path::Path;

use stedit_core::{EditorConfig, MetadataEditor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Get path from args or use a default name
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./model.safetensors".to_string());

    println!("Loading metadata from: {}", path);

    let mut editor = MetadataEditor::new(EditorConfig::default());
    let outcome = editor.load(Some(Path::new(&path))).await;

    if let Some(error) = outcome.error {
        anyhow::bail!("Load failed: {}", error);
    }

    println!("{}", outcome.editor_text);

    if let Some(metrics) = outcome.metrics {
        println!("\nKey metrics:");
        println!("  optimizer:       {}", metrics.optimizer);
        println!("  epochs:          {}", metrics.num_epochs);
        println!("  unet lr:         {}", metrics.unet_lr);
        println!("  text encoder lr: {}", metrics.text_encoder_lr);
        println!("  steps:           {}", metrics.steps);
    }

    Ok(())
}
