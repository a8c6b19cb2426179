//! Orchestration service for the two engine workflows
//!
//! [`MediaService`] drives the external engine through the compression and
//! probe workflows and owns the observable state the presentation layer
//! reads: the loading flag, the progress fraction, the parsed [`VideoInfo`]
//! and the [`CompressionResult`]. State is reset at the start of every
//! public operation so nothing stale leaks between runs.
//!
//! Operations are single-flight: steps within one operation run strictly in
//! sequence, and nothing guards against overlapping operations on the same
//! service; callers serialize externally. No cancellation, no timeout.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::{debug, error};

use crate::domain::model::{CompressionResult, InputFile, MediaBlob, MediaFile, VideoInfo};
use crate::engine::{compress_args, probe_args, EngineObserver, EnginePort, NoOpObserver};
use crate::error::{VidpressError, VidpressResult};
use crate::probe;
use crate::utils::mime;

/// Name the fixed transcode command writes its output under
const OUTPUT_NAME: &str = "output.mp4";

#[derive(Default)]
struct ServiceState {
    loading: bool,
    progression: Option<f64>,
    video_info: VideoInfo,
    compression: CompressionResult,
}

/// Orchestrates engine lifecycle calls and owns the observable state.
pub struct MediaService {
    engine: Arc<dyn EnginePort>,
    output_dir: PathBuf,
    state: Arc<Mutex<ServiceState>>,
}

/// Observer that records engine progress into the service state.
struct ProgressRecorder {
    state: Arc<Mutex<ServiceState>>,
}

impl EngineObserver for ProgressRecorder {
    fn on_progress(&self, fraction: f64) {
        debug!("Engine progress: {:.1}%", fraction * 100.0);
        if let Ok(mut state) = self.state.lock() {
            state.progression = Some(fraction);
        }
    }
}

impl MediaService {
    /// Create a service around an engine, materializing outputs under
    /// `output_dir`.
    pub fn new(engine: Arc<dyn EnginePort>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            output_dir: output_dir.into(),
            state: Arc::new(Mutex::new(ServiceState::default())),
        }
    }

    /// Restore both records and the transient flags to their zero state.
    pub fn reset(&self) {
        if let Ok(mut state) = self.state.lock() {
            *state = ServiceState::default();
        }
    }

    /// Whether an operation is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.state.lock().map(|state| state.loading).unwrap_or(false)
    }

    /// Last reported progress fraction, `None` before the first report.
    pub fn progression(&self) -> Option<f64> {
        self.state.lock().ok().and_then(|state| state.progression)
    }

    /// Snapshot of the probe metadata record.
    pub fn video_info(&self) -> VideoInfo {
        self.state
            .lock()
            .map(|state| state.video_info.clone())
            .unwrap_or_default()
    }

    /// Snapshot of the compression record.
    pub fn compression(&self) -> CompressionResult {
        self.state
            .lock()
            .map(|state| state.compression.clone())
            .unwrap_or_default()
    }

    fn set_loading(&self, loading: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.loading = loading;
        }
    }

    /// Re-encode `input` at lower bitrate with the fixed transcode policy.
    ///
    /// The outcome is surfaced through [`MediaService::compression`], not a
    /// return value. On failure the error is logged, the loading flag is
    /// cleared and the record is left partially-zero; no retry is attempted.
    pub async fn optimize_file_size(&self, input: &InputFile) {
        self.reset();
        self.set_loading(true);

        if let Err(err) = self.run_compression(input).await {
            error!("Error during compression: {err}");
        }

        self.set_loading(false);
    }

    async fn run_compression(&self, input: &InputFile) -> VidpressResult<()> {
        let observer = ProgressRecorder {
            state: Arc::clone(&self.state),
        };

        self.engine.load().await?;

        let bytes = input.read_bytes().await?;
        self.engine.write_file(&input.name, &bytes).await?;

        let report = self
            .engine
            .exec(&compress_args(&input.name), &observer)
            .await?;
        if report.exit_code != 0 {
            return Err(VidpressError::ExecError {
                code: report.exit_code,
            });
        }

        let data = self.engine.read_file(OUTPUT_NAME).await?;
        if let Ok(mut state) = self.state.lock() {
            state.compression.size_original = input.size;
            state.compression.name = input.name.clone();
            state.compression.size_compressed = data.len() as u64;
        }

        let url = self.get_file_url(".", "output", "mp4").await?;
        if let Ok(mut state) = self.state.lock() {
            state.compression.video_blob = url;
        }

        Ok(())
    }

    /// Probe `input` and harvest its metadata from the diagnostic log.
    ///
    /// The outcome is surfaced through [`MediaService::video_info`], not a
    /// return value; failures are logged and leave the record unpopulated.
    pub async fn get_file_details(&self, input: &InputFile) {
        self.reset();
        self.set_loading(true);

        if let Err(err) = self.run_probe(input).await {
            error!("Error during info: {err}");
        }

        self.set_loading(false);
    }

    async fn run_probe(&self, input: &InputFile) -> VidpressResult<()> {
        self.engine.load().await?;

        let bytes = input.read_bytes().await?;
        self.engine.write_file(&input.name, &bytes).await?;

        // A probe run names no output file, so the engine exits non-zero by
        // design; the metadata still arrives on the diagnostic log.
        let report = self
            .engine
            .exec(&probe_args(&input.name), &NoOpObserver)
            .await?;

        let info = probe::scan_log(&report.log, input);
        if let Ok(mut state) = self.state.lock() {
            state.video_info = info;
        }

        Ok(())
    }

    /// Read raw bytes from the engine working filesystem.
    pub async fn read_file(&self, name: &str) -> VidpressResult<Vec<u8>> {
        self.engine.read_file(name).await
    }

    /// Read `dir/name.format` from the engine working filesystem.
    pub async fn get_file_buffer(
        &self,
        dir: &str,
        name: &str,
        format: &str,
    ) -> VidpressResult<Vec<u8>> {
        let local_path = format!("{dir}/{name}.{format}");
        self.read_file(&local_path).await
    }

    /// Read an engine file as a typed blob, MIME looked up from the fixed
    /// extension table.
    pub async fn get_file_blob(
        &self,
        dir: &str,
        name: &str,
        format: &str,
    ) -> VidpressResult<MediaBlob> {
        let bytes = self.get_file_buffer(dir, name, format).await?;
        Ok(MediaBlob {
            bytes,
            content_type: mime::from_extension_or_default(format),
        })
    }

    /// Materialize an engine file under the output directory and return a
    /// `file://` reference to it.
    pub async fn get_file_url(
        &self,
        dir: &str,
        name: &str,
        format: &str,
    ) -> VidpressResult<String> {
        let blob = self.get_file_blob(dir, name, format).await?;

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let dest = self.output_dir.join(format!("{name}.{format}"));
        tokio::fs::write(&dest, &blob.bytes).await?;

        let dest = tokio::fs::canonicalize(&dest).await.unwrap_or(dest);
        Ok(format!("file://{}", dest.display()))
    }

    /// Read an engine file as a named, typed file handle.
    pub async fn get_file(
        &self,
        dir: &str,
        name: &str,
        format: &str,
    ) -> VidpressResult<MediaFile> {
        let blob = self.get_file_blob(dir, name, format).await?;
        Ok(MediaFile {
            name: format!("{name}.{format}"),
            bytes: blob.bytes,
            content_type: blob.content_type,
        })
    }
}
