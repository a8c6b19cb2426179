//! FFmpeg subprocess engine adapter
//!
//! Drives the external `ffmpeg` binary over a private scratch directory that
//! serves as the engine's working filesystem. Diagnostic lines arrive on
//! stderr; the `-progress -` key=value feed arrives on stdout and is folded
//! into 0-1 progress fractions against the duration announced on stderr.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::debug;

use crate::engine::{EngineObserver, EnginePort, ExecReport};
use crate::error::{VidpressError, VidpressResult};
use crate::probe;

/// Engine adapter backed by the ffmpeg binary.
pub struct FfmpegEngine {
    binary: PathBuf,
    scratch: Mutex<Option<TempDir>>,
}

impl FfmpegEngine {
    /// Create an adapter resolving `ffmpeg` from the search path.
    pub fn new() -> Self {
        Self::with_binary("ffmpeg")
    }

    /// Create an adapter with an explicit binary path.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            scratch: Mutex::new(None),
        }
    }

    async fn scratch_path(&self) -> VidpressResult<PathBuf> {
        let scratch = self.scratch.lock().await;
        scratch
            .as_ref()
            .map(|dir| dir.path().to_path_buf())
            .ok_or(VidpressError::EngineNotLoaded)
    }
}

impl Default for FfmpegEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EnginePort for FfmpegEngine {
    async fn load(&self) -> VidpressResult<()> {
        let mut scratch = self.scratch.lock().await;
        if scratch.is_some() {
            return Ok(());
        }

        let status = Command::new(&self.binary)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|err| VidpressError::EngineInitError {
                message: format!("cannot run {}: {err}", self.binary.display()),
            })?;

        if !status.success() {
            return Err(VidpressError::EngineInitError {
                message: format!("{} -version reported failure", self.binary.display()),
            });
        }

        *scratch = Some(tempfile::tempdir()?);
        debug!("Media engine loaded: {}", self.binary.display());
        Ok(())
    }

    async fn write_file(&self, name: &str, bytes: &[u8]) -> VidpressResult<()> {
        let path = self.scratch_path().await?.join(name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|err| VidpressError::IngestError {
                name: name.to_string(),
                message: err.to_string(),
            })
    }

    async fn exec(
        &self,
        args: &[String],
        observer: &dyn EngineObserver,
    ) -> VidpressResult<ExecReport> {
        let workdir = self.scratch_path().await?;
        debug!("Executing engine command: {}", args.join(" "));

        let mut child = Command::new(&self.binary)
            .args(args)
            .current_dir(&workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other("engine stdout pipe missing"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| std::io::Error::other("engine stderr pipe missing"))?;

        // Total duration is announced on stderr and needed by the stdout
        // progress reader to turn timestamps into fractions.
        let total_duration: Arc<StdMutex<Option<f64>>> = Arc::new(StdMutex::new(None));

        let stderr_duration = Arc::clone(&total_duration);
        let stderr_task = async {
            let mut log = Vec::new();
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                observer.on_log(&line);
                if let Some(rest) = line.split("Duration:").nth(1) {
                    let value = rest.split(',').next().unwrap_or("").trim();
                    if let Ok(seconds) = probe::parse_duration(value) {
                        if let Ok(mut slot) = stderr_duration.lock() {
                            slot.get_or_insert(seconds);
                        }
                    }
                }
                log.push(line);
            }
            log
        };

        let stdout_duration = Arc::clone(&total_duration);
        let stdout_task = async {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if line.trim() == "progress=end" {
                    observer.on_progress(1.0);
                    continue;
                }
                let elapsed = match parse_progress_seconds(&line) {
                    Some(value) => value,
                    None => continue,
                };
                let total = stdout_duration.lock().ok().and_then(|slot| *slot);
                if let Some(total) = total {
                    if total > 0.0 {
                        observer.on_progress((elapsed / total).clamp(0.0, 1.0));
                    }
                }
            }
        };

        let (log, ()) = tokio::join!(stderr_task, stdout_task);
        let status = child.wait().await?;

        Ok(ExecReport {
            exit_code: status.code().unwrap_or(-1),
            log,
        })
    }

    async fn read_file(&self, name: &str) -> VidpressResult<Vec<u8>> {
        let path = self.scratch_path().await?.join(name);
        tokio::fs::read(&path)
            .await
            .map_err(|err| VidpressError::OutputReadError {
                name: name.to_string(),
                message: err.to_string(),
            })
    }
}

/// Parse the elapsed encode time, in seconds, out of one `-progress -`
/// key=value line. Only `out_time_us` carries the timestamp; other keys are
/// ignored.
fn parse_progress_seconds(line: &str) -> Option<f64> {
    let value = line.trim().strip_prefix("out_time_us=")?;
    let micros: i64 = value.trim().parse().ok()?;
    if micros < 0 {
        return None;
    }
    Some(micros as f64 / 1_000_000.0)
}
