//! Command executors - build the service, run a workflow, render the state

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::info;

use crate::app::MediaService;
use crate::cli::{CompressArgs, InspectArgs};
use crate::domain::model::{InputFile, VideoInfo};
use crate::engine::FfmpegEngine;

/// Execute the compress command
pub async fn execute_compress_command(args: CompressArgs) -> Result<()> {
    let input = InputFile::from_path(Path::new(&args.input))?;
    info!("Compressing {} ({} bytes)", input.name, input.size);

    let engine = Arc::new(FfmpegEngine::with_binary(&args.ffmpeg));
    let service = MediaService::new(engine, &args.output_dir);

    service.optimize_file_size(&input).await;

    let result = service.compression();
    if !result.is_complete() {
        bail!("Compression of {} did not produce an output", input.name);
    }

    println!("Compressed: {}", result.name);
    println!("  Original size:   {} bytes", result.size_original);
    println!("  Compressed size: {} bytes", result.size_compressed);
    if let Some(ratio) = result.ratio() {
        println!("  Ratio:           {:.1}%", ratio * 100.0);
    }
    println!("  Output:          {}", result.video_blob);

    Ok(())
}

/// Execute the inspect command
pub async fn execute_inspect_command(args: InspectArgs) -> Result<()> {
    let input = InputFile::from_path(Path::new(&args.input))?;
    info!("Inspecting {}", input.name);

    let engine = Arc::new(FfmpegEngine::with_binary(&args.ffmpeg));
    let service = MediaService::new(engine, ".");

    service.get_file_details(&input).await;

    let details = service.video_info();
    if details == VideoInfo::default() {
        bail!("No metadata could be extracted from {}", input.name);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&details)?);
    } else {
        println!("{}", format_as_text(&details));
    }

    Ok(())
}

/// Format probe metadata as human-readable text
fn format_as_text(details: &VideoInfo) -> String {
    let mut output = String::new();

    output.push_str("Media File Information:\n");
    output.push_str(&format!("  File:          {}\n", details.name));
    output.push_str(&format!("  Size:          {} bytes\n", details.size));
    output.push_str(&format!("  Modified:      {}\n", details.last_modified));
    output.push_str(&format!("  Type:          {}\n", details.content_type));
    output.push_str(&format!("  Duration:      {:.3}s\n", details.duration_seconds));
    output.push_str(&format!("  Video codec:   {}\n", details.video_codec));
    output.push_str(&format!("  Audio codec:   {}\n", details.audio_codec));
    output.push_str(&format!(
        "  Dimensions:    {}x{}\n",
        details.dimensions.width, details.dimensions.height
    ));
    match details.fps {
        Some(fps) => output.push_str(&format!("  Frame rate:    {fps} fps\n")),
        None => output.push_str("  Frame rate:    unknown\n"),
    }

    output
}
