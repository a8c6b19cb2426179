//! Vidpress CLI
//!
//! A command-line tool for inspecting and compressing video files through
//! an external FFmpeg engine.
//!
//! # Usage
//!
//! ```bash
//! vidpress compress --input "clip.mov" --output-dir ./out
//! vidpress inspect --input "clip.mov" --json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use vidpress_cli::cli::{execute_compress_command, execute_inspect_command, Cli, Commands};

/// Main entry point for the Vidpress CLI application
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compress(args) => {
            info!("Executing compress command");
            execute_compress_command(args).await?;
        }
        Commands::Inspect(args) => {
            info!("Executing inspect command");
            execute_inspect_command(args).await?;
        }
    }

    Ok(())
}
