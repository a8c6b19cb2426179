//! Vidpress CLI Library
//!
//! A command-line video inspection and compression tool. Decoding, encoding
//! and metadata emission are delegated to an external FFmpeg engine; this
//! crate parses the engine's diagnostic output into structured metadata and
//! orchestrates the load, ingest, execute, extract lifecycle around it.

pub mod app;
pub mod cli;
pub mod domain;
pub mod engine;
pub mod error;
pub mod probe;
pub mod utils;

// Re-export commonly used types
pub use app::MediaService;
pub use domain::model::{CompressionResult, Dimensions, InputFile, VideoInfo, NO_AUDIO};
pub use engine::{EngineObserver, EnginePort, ExecReport, FfmpegEngine, NoOpObserver};
pub use error::{VidpressError, VidpressResult};
