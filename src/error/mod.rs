//! Error handling module for Vidpress

use thiserror::Error;

/// Main error type for Vidpress operations
#[derive(Error, Debug)]
pub enum VidpressError {
    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// Engine initialization error
    #[error("Failed to initialize media engine: {message}")]
    EngineInitError { message: String },

    /// Engine used before load() was called
    #[error("Media engine is not loaded")]
    EngineNotLoaded,

    /// Input ingestion error
    #[error("Failed to ingest input file {name}: {message}")]
    IngestError { name: String, message: String },

    /// Command execution error
    #[error("Engine command failed with exit code {code}")]
    ExecError { code: i32 },

    /// Output extraction error
    #[error("Failed to read engine output file {name}: {message}")]
    OutputReadError { name: String, message: String },

    /// Dimensions pattern not found in a video-stream line
    #[error("Dimensions not found in the log message")]
    DimensionsNotFound,

    /// Malformed duration value in a diagnostic line
    #[error("Invalid duration value: {value}. Expected HH:MM:SS.ms")]
    InvalidDuration { value: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for Vidpress operations
pub type VidpressResult<T> = std::result::Result<T, VidpressError>;
