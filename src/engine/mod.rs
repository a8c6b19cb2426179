//! External media engine boundary
//!
//! All decode, encode and probe work is delegated to an external engine.
//! [`EnginePort`] is the contract this crate consumes: a lifecycle of
//! load, write-file, execute, read-file over the engine's private working
//! filesystem, with progress and diagnostic-line events delivered to an
//! [`EngineObserver`] during execution.

use async_trait::async_trait;

use crate::error::VidpressResult;

pub mod ffmpeg;

pub use ffmpeg::FfmpegEngine;

/// Outcome of one engine command.
///
/// The engine reports completion through an exit code rather than an error:
/// probe invocations produce no output file and exit non-zero by design, so
/// interpreting the code is left to the workflow.
#[derive(Debug, Clone, Default)]
pub struct ExecReport {
    /// Process exit code, 0 on success
    pub exit_code: i32,
    /// Every diagnostic line emitted during execution, in order
    pub log: Vec<String>,
}

/// Receiver for events emitted while an engine command runs.
pub trait EngineObserver: Send + Sync {
    /// Progress fraction in `0.0..=1.0`
    fn on_progress(&self, _fraction: f64) {}

    /// One diagnostic line of engine output
    fn on_log(&self, _line: &str) {}
}

/// Observer that discards all events
pub struct NoOpObserver;

impl EngineObserver for NoOpObserver {}

/// Port for the external media engine.
#[async_trait]
pub trait EnginePort: Send + Sync {
    /// Initialize the engine. Idempotent: safe to call when already loaded.
    async fn load(&self) -> VidpressResult<()>;

    /// Write raw bytes into the engine working filesystem under `name`.
    async fn write_file(&self, name: &str, bytes: &[u8]) -> VidpressResult<()>;

    /// Execute one command with the exact argument vector, streaming events
    /// to `observer` and collecting the diagnostic log.
    async fn exec(&self, args: &[String], observer: &dyn EngineObserver)
        -> VidpressResult<ExecReport>;

    /// Read a file back out of the engine working filesystem.
    async fn read_file(&self, name: &str) -> VidpressResult<Vec<u8>>;
}

/// Fixed transcode argument vector: H.264 in an MP4 container tagged for
/// compatibility, CRF 30, superfast preset, fast-start layout. These flags
/// are a fixed policy and part of the engine contract; changing them changes
/// output compatibility.
pub fn compress_args(input_name: &str) -> Vec<String> {
    [
        "-i", input_name, "-c:v", "libx264", "-tag:v", "avc1", "-movflags", "faststart",
        "-crf", "30", "-preset", "superfast", "-progress", "-", "-v", "", "-y", "output.mp4",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Fixed probe argument vector: verbose info only, no output file.
pub fn probe_args(input_name: &str) -> Vec<String> {
    ["-i", input_name, "-hide_banner", "-v", "verbose"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
