//! Command-line argument definitions

use clap::Args;

/// Arguments for the compress command
#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: String,

    /// Directory the compressed output is materialized into
    #[arg(short, long, default_value = ".", env = "VIDPRESS_OUTPUT_DIR")]
    pub output_dir: String,

    /// Path to the ffmpeg binary
    #[arg(long, default_value = "ffmpeg", env = "VIDPRESS_FFMPEG")]
    pub ffmpeg: String,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Path to the ffmpeg binary
    #[arg(long, default_value = "ffmpeg", env = "VIDPRESS_FFMPEG")]
    pub ffmpeg: String,
}
