//! Extension-to-MIME lookup table

/// Fallback content type for unrecognized extensions
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Look up the MIME type for a file extension (without the dot).
///
/// The table is fixed: it covers the container and media formats the engine
/// is expected to produce or ingest.
pub fn from_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "mp4" => Some("video/mp4"),
        "m4v" => Some("video/x-m4v"),
        "mov" => Some("video/quicktime"),
        "webm" => Some("video/webm"),
        "mkv" => Some("video/x-matroska"),
        "avi" => Some("video/x-msvideo"),
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "ogg" => Some("audio/ogg"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// Look up the MIME type for an extension, falling back to octet-stream.
pub fn from_extension_or_default(extension: &str) -> &'static str {
    from_extension(extension).unwrap_or(OCTET_STREAM)
}
