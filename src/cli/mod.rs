//! Command-line interface

mod args;
mod commands;

pub use args::{CompressArgs, InspectArgs};
pub use commands::{execute_compress_command, execute_inspect_command};

use clap::{Parser, Subcommand};

/// Vidpress - video inspection and compression backed by FFmpeg
#[derive(Parser, Debug)]
#[command(name = "vidpress", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Re-encode a video at lower bitrate
    Compress(CompressArgs),
    /// Extract metadata from a video file
    Inspect(InspectArgs),
}
