//! End-to-end workflow tests against a mock engine

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use vidpress_cli::{
    Dimensions, EngineObserver, EnginePort, ExecReport, InputFile, MediaService, VidpressError,
    VidpressResult,
};

/// Scripted engine: canned diagnostic log, exit code, progress reports and
/// readable output files, with a record of every write and exec call.
struct MockEngine {
    log: Vec<String>,
    exit_code: i32,
    progress: Vec<f64>,
    files: HashMap<String, Vec<u8>>,
    written: Mutex<Vec<(String, usize)>>,
    execs: Mutex<Vec<Vec<String>>>,
}

impl MockEngine {
    fn new(log: Vec<String>, exit_code: i32) -> Self {
        Self {
            log,
            exit_code,
            progress: Vec::new(),
            files: HashMap::new(),
            written: Mutex::new(Vec::new()),
            execs: Mutex::new(Vec::new()),
        }
    }

    fn with_output(mut self, name: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(name.to_string(), bytes);
        self
    }

    fn with_progress(mut self, progress: Vec<f64>) -> Self {
        self.progress = progress;
        self
    }
}

#[async_trait]
impl EnginePort for MockEngine {
    async fn load(&self) -> VidpressResult<()> {
        Ok(())
    }

    async fn write_file(&self, name: &str, bytes: &[u8]) -> VidpressResult<()> {
        self.written
            .lock()
            .unwrap()
            .push((name.to_string(), bytes.len()));
        Ok(())
    }

    async fn exec(
        &self,
        args: &[String],
        observer: &dyn EngineObserver,
    ) -> VidpressResult<ExecReport> {
        self.execs.lock().unwrap().push(args.to_vec());
        for fraction in &self.progress {
            observer.on_progress(*fraction);
        }
        for line in &self.log {
            observer.on_log(line);
        }
        Ok(ExecReport {
            exit_code: self.exit_code,
            log: self.log.clone(),
        })
    }

    async fn read_file(&self, name: &str) -> VidpressResult<Vec<u8>> {
        let key = name.strip_prefix("./").unwrap_or(name);
        self.files
            .get(key)
            .cloned()
            .ok_or_else(|| VidpressError::OutputReadError {
                name: name.to_string(),
                message: "no such file".to_string(),
            })
    }
}

fn make_input(dir: &tempfile::TempDir, name: &str, size: usize) -> InputFile {
    let path = dir.path().join(name);
    std::fs::write(&path, vec![0u8; size]).unwrap();
    InputFile::from_path(&path).unwrap()
}

fn probe_log() -> Vec<String> {
    vec![
        "  Duration: 00:01:30.50, start: 0.000000, bitrate: 1205 kb/s".to_string(),
        "  Stream #0:0: Video: h264 (High), yuv420p, 1280x720, 24 fps, 24 tbr".to_string(),
        "  Stream #0:1: Audio: aac (LC), 44100 Hz, stereo".to_string(),
    ]
}

#[tokio::test]
async fn test_compression_workflow_populates_result() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let input = make_input(&dir, "clip.mov", 10_000_000);

    let engine = Arc::new(
        MockEngine::new(Vec::new(), 0)
            .with_output("output.mp4", vec![0u8; 4_000_000])
            .with_progress(vec![0.25, 0.5, 1.0]),
    );
    let service = MediaService::new(engine.clone(), out_dir.path());

    service.optimize_file_size(&input).await;

    let result = service.compression();
    assert_eq!(result.size_original, 10_000_000);
    assert_eq!(result.size_compressed, 4_000_000);
    assert_eq!(result.name, "clip.mov");
    assert!(result.video_blob.starts_with("file://"));
    assert!(result.is_complete());

    assert!(!service.is_loading());
    assert_eq!(service.progression(), Some(1.0));

    // Input ingested under its original name.
    let written = engine.written.lock().unwrap();
    assert_eq!(written.as_slice(), &[("clip.mov".to_string(), 10_000_000)]);

    // The fixed transcode vector was passed verbatim.
    let execs = engine.execs.lock().unwrap();
    assert_eq!(execs.len(), 1);
    assert_eq!(
        execs[0],
        vec![
            "-i", "clip.mov", "-c:v", "libx264", "-tag:v", "avc1", "-movflags",
            "faststart", "-crf", "30", "-preset", "superfast", "-progress", "-",
            "-v", "", "-y", "output.mp4",
        ]
    );

    // The output landed in the output directory.
    let materialized = out_dir.path().join("output.mp4");
    assert_eq!(std::fs::metadata(&materialized).unwrap().len(), 4_000_000);
}

#[tokio::test]
async fn test_compression_failure_leaves_zero_result() {
    let dir = tempfile::tempdir().unwrap();
    let input = make_input(&dir, "clip.mov", 1_000);

    // Exit code 1 and no readable output: the workflow must log and clear.
    let engine = Arc::new(MockEngine::new(Vec::new(), 1));
    let service = MediaService::new(engine, dir.path());

    service.optimize_file_size(&input).await;

    let result = service.compression();
    assert_eq!(result.size_compressed, 0);
    assert_eq!(result.video_blob, "");
    assert!(!result.is_complete());
    assert!(!service.is_loading());
}

#[tokio::test]
async fn test_probe_workflow_populates_video_info() {
    let dir = tempfile::tempdir().unwrap();
    let input = make_input(&dir, "clip.mov", 10_000_000);

    // Probe runs exit non-zero because no output file is named.
    let engine = Arc::new(MockEngine::new(probe_log(), 1));
    let service = MediaService::new(engine.clone(), dir.path());

    service.get_file_details(&input).await;

    let details = service.video_info();
    assert_eq!(details.duration_seconds, 90.5);
    assert_eq!(details.video_codec, "h264");
    assert_eq!(details.audio_codec, "aac");
    assert_eq!(details.dimensions, Dimensions { width: 1280, height: 720 });
    assert_eq!(details.fps, Some(24));
    assert_eq!(details.name, "clip.mov");
    assert_eq!(details.size, 10_000_000);
    assert_eq!(details.content_type, "video/quicktime");
    assert!(!service.is_loading());

    // The fixed probe vector was passed verbatim.
    let execs = engine.execs.lock().unwrap();
    assert_eq!(
        execs[0],
        vec!["-i", "clip.mov", "-hide_banner", "-v", "verbose"]
    );

    // The probe workflow never touches the compression record.
    assert!(!service.compression().is_complete());
}

#[tokio::test]
async fn test_reset_clears_all_state() {
    let dir = tempfile::tempdir().unwrap();
    let input = make_input(&dir, "clip.mov", 1_000);

    let engine = Arc::new(MockEngine::new(probe_log(), 1));
    let service = MediaService::new(engine, dir.path());

    service.get_file_details(&input).await;
    assert_ne!(service.video_info().video_codec, "");

    service.reset();

    assert_eq!(service.video_info(), Default::default());
    assert_eq!(service.compression(), Default::default());
    assert_eq!(service.progression(), None);
    assert!(!service.is_loading());
}

#[tokio::test]
async fn test_new_operation_resets_previous_state() {
    let dir = tempfile::tempdir().unwrap();
    let input = make_input(&dir, "clip.mov", 1_000);

    let engine = Arc::new(MockEngine::new(probe_log(), 1));
    let service = MediaService::new(engine, dir.path());

    service.get_file_details(&input).await;
    assert_eq!(service.video_info().video_codec, "h264");

    // A compression run against a failing engine must not keep the probe
    // record from the previous operation.
    service.optimize_file_size(&input).await;
    assert_eq!(service.video_info(), Default::default());
}

#[tokio::test]
async fn test_file_conversions() {
    let dir = tempfile::tempdir().unwrap();
    let engine =
        Arc::new(MockEngine::new(Vec::new(), 0).with_output("output.mp4", vec![1, 2, 3]));
    let service = MediaService::new(engine, dir.path());

    let buffer = service.get_file_buffer(".", "output", "mp4").await.unwrap();
    assert_eq!(buffer, vec![1, 2, 3]);

    let blob = service.get_file_blob(".", "output", "mp4").await.unwrap();
    assert_eq!(blob.content_type, "video/mp4");
    assert_eq!(blob.bytes, vec![1, 2, 3]);

    let file = service.get_file(".", "output", "mp4").await.unwrap();
    assert_eq!(file.name, "output.mp4");
    assert_eq!(file.content_type, "video/mp4");

    let missing = service.get_file_buffer(".", "nope", "mp4").await;
    assert!(matches!(
        missing.unwrap_err(),
        VidpressError::OutputReadError { .. }
    ));
}
