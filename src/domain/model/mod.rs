// Domain models - Core types and data structures

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::{VidpressError, VidpressResult};
use crate::utils::mime;

/// A user-supplied media file: its identifying metadata plus the path the
/// raw bytes can be read from.
#[derive(Debug, Clone)]
pub struct InputFile {
    /// File name without directory components
    pub name: String,
    /// Byte size
    pub size: u64,
    /// Human-readable last-modified timestamp
    pub last_modified: String,
    /// MIME type derived from the file extension
    pub content_type: String,
    /// Source path on the local filesystem
    pub path: PathBuf,
}

impl InputFile {
    /// Build an input record from a filesystem path.
    pub fn from_path(path: &Path) -> VidpressResult<Self> {
        let metadata = std::fs::metadata(path).map_err(|_| VidpressError::InputFileNotFound {
            path: path.display().to_string(),
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| VidpressError::InputFileNotFound {
                path: path.display().to_string(),
            })?;

        let last_modified = metadata
            .modified()
            .map(|t| {
                let stamp: DateTime<Local> = t.into();
                stamp.format("%d.%m.%Y, %H:%M:%S").to_string()
            })
            .unwrap_or_default();

        let content_type = path
            .extension()
            .map(|ext| mime::from_extension_or_default(&ext.to_string_lossy()))
            .unwrap_or(mime::OCTET_STREAM)
            .to_string();

        Ok(Self {
            name,
            size: metadata.len(),
            last_modified,
            content_type,
            path: path.to_path_buf(),
        })
    }

    /// Read the file's raw bytes.
    pub async fn read_bytes(&self) -> VidpressResult<Vec<u8>> {
        Ok(tokio::fs::read(&self.path).await?)
    }
}

/// Pixel dimensions of a video stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Sentinel codec value for inputs without an audio stream
pub const NO_AUDIO: &str = "No Audio";

/// Structured metadata harvested from the engine's diagnostic output.
///
/// Populated incrementally, one diagnostic line at a time; fields not yet
/// seen keep their default values. The file-metadata stamp (name, size,
/// last_modified, content_type) and the dimensions/fps fields are only set
/// once a video-stream line has been observed. Duration arrives on its own
/// marker line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VideoInfo {
    pub name: String,
    pub size: u64,
    pub last_modified: String,
    pub content_type: String,
    pub duration_seconds: f64,
    pub video_codec: String,
    pub audio_codec: String,
    pub dimensions: Dimensions,
    /// Frame rate, or `None` when the stream line carried no fps token
    pub fps: Option<u32>,
}

impl VideoInfo {
    /// Stamp the record with the originating file's metadata.
    pub fn stamp_file(&mut self, file: &InputFile) {
        self.name = file.name.clone();
        self.size = file.size;
        self.last_modified = file.last_modified.clone();
        self.content_type = file.content_type.clone();
    }
}

/// Outcome of one compression run.
///
/// Fully populated only after the encode command completes successfully and
/// the output file has been read back; partially-zero otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompressionResult {
    pub size_original: u64,
    pub size_compressed: u64,
    pub name: String,
    /// `file://` reference to the materialized output, empty until done
    pub video_blob: String,
}

impl CompressionResult {
    /// Whether the encode completed and the output reference exists.
    pub fn is_complete(&self) -> bool {
        self.size_compressed > 0 && !self.video_blob.is_empty()
    }

    /// Compressed-to-original size ratio, if both sizes are known.
    pub fn ratio(&self) -> Option<f64> {
        if self.size_original == 0 {
            return None;
        }
        Some(self.size_compressed as f64 / self.size_original as f64)
    }
}

/// Raw engine-filesystem bytes tagged with a content type
#[derive(Debug, Clone)]
pub struct MediaBlob {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// A named, typed file assembled from engine-filesystem bytes
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}
