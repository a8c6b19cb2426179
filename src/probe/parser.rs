//! Diagnostic-line parser
//!
//! The engine reports media metadata only as free-form diagnostic text. The
//! lines follow a fixed grammar this parser depends on:
//!
//! ```text
//! Duration: HH:MM:SS.ms, start: ...
//! Stream #0:0: Video: <codec>, ... WxH ..., N fps ...
//! Stream #0:1: Audio: <codec>, ...
//! ```
//!
//! Extraction is one line at a time with no lookahead; the only cross-line
//! state is the [`VideoInfo`] record being built.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::domain::model::{Dimensions, InputFile, VideoInfo, NO_AUDIO};
use crate::error::{VidpressError, VidpressResult};

/// Marker introducing the media duration value
const DURATION_MARKER: &str = "Duration:";
/// Marker introducing any stream description
const STREAM_MARKER: &str = "Stream #";
/// Marker introducing a video stream description
const VIDEO_MARKER: &str = "Video:";
/// Marker introducing an audio stream description
const AUDIO_MARKER: &str = "Audio:";

static DIMENSIONS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{2,4})x(\d{2,4})").expect("valid dimensions pattern"));

static FPS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*fps").expect("valid fps pattern"));

/// Fold one diagnostic line into the metadata record.
///
/// A video-stream line also stamps the record with the originating file's
/// name, size, last-modified timestamp and MIME type. Later lines override
/// earlier overlapping fields.
pub fn extract_file_info(
    line: &str,
    file: &InputFile,
    info: &mut VideoInfo,
) -> VidpressResult<()> {
    if let Some(rest) = line.split(DURATION_MARKER).nth(1) {
        let value = rest.split(',').next().unwrap_or("").trim();
        info.duration_seconds = parse_duration(value)?;
    }

    if line.contains(STREAM_MARKER) {
        if let Some(rest) = line.split(VIDEO_MARKER).nth(1) {
            info.video_codec = codec_token(rest).unwrap_or_default();
            info.dimensions = parse_dimensions(line)?;
            info.fps = parse_fps(line);
            info.stamp_file(file);
        }

        if let Some(rest) = line.split(AUDIO_MARKER).nth(1) {
            info.audio_codec = codec_token(rest).unwrap_or_else(|| NO_AUDIO.to_string());
        }
    }

    Ok(())
}

/// Fold a full sequence of diagnostic lines into a fresh record.
///
/// Lines that fail to parse are logged and skipped; the fold continues with
/// the remaining lines.
pub fn scan_log<I, S>(lines: I, file: &InputFile) -> VideoInfo
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut info = VideoInfo::default();
    for line in lines {
        let line = line.as_ref();
        if let Err(err) = extract_file_info(line, file, &mut info) {
            warn!("Skipping unparsable diagnostic line ({err}): {line}");
        }
    }
    info
}

/// Parse an `HH:MM:SS.ms` duration value into total seconds.
pub fn parse_duration(value: &str) -> VidpressResult<f64> {
    let invalid = || VidpressError::InvalidDuration {
        value: value.to_string(),
    };

    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }

    let hours: f64 = parts[0].parse().map_err(|_| invalid())?;
    let minutes: f64 = parts[1].parse().map_err(|_| invalid())?;
    let seconds: f64 = parts[2].parse().map_err(|_| invalid())?;

    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// Extract `WIDTHxHEIGHT` pixel dimensions from a diagnostic line.
///
/// Absence of the pattern is an error, not a silent default.
pub fn parse_dimensions(line: &str) -> VidpressResult<Dimensions> {
    let captures = DIMENSIONS_RE
        .captures(line)
        .ok_or(VidpressError::DimensionsNotFound)?;

    // The 2-4 digit groups cannot overflow u32.
    let width = captures[1].parse().map_err(|_| VidpressError::DimensionsNotFound)?;
    let height = captures[2].parse().map_err(|_| VidpressError::DimensionsNotFound)?;

    Ok(Dimensions { width, height })
}

/// Extract a frame rate from a diagnostic line.
///
/// Unlike dimensions, a missing fps token is an explicit "unknown" (`None`),
/// not a failure.
pub fn parse_fps(line: &str) -> Option<u32> {
    FPS_RE
        .captures(line)
        .and_then(|captures| captures[1].parse().ok())
}

/// First whitespace-delimited token after a stream-kind marker, stripped of
/// its trailing comma.
fn codec_token(rest: &str) -> Option<String> {
    rest.split_whitespace()
        .next()
        .map(|token| token.trim_end_matches(',').to_string())
}
