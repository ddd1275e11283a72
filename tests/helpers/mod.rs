#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use input_master_backend::asr::{AudioUpload, Transcriber, TranscriptionError};
use input_master_backend::config::Config;
use input_master_backend::routes::create_router;
use input_master_backend::state::AppState;
use serde::de::DeserializeOwned;

pub const BOUNDARY: &str = "----input-master-test-boundary";

/// Fake audio payload: a RIFF header followed by silence.
pub fn wav_bytes(len: usize) -> Vec<u8> {
    let mut data = b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec();
    data.resize(len.max(data.len()), 0);
    data
}

/// Builder for `multipart/form-data` bodies.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: audio/wav\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

/// The canonical valid upload: `note.wav` for user `u1`, report `daily`.
pub fn note_upload() -> Vec<u8> {
    MultipartBody::new()
        .file("file", "note.wav", &wav_bytes(256))
        .text("userId", "u1")
        .text("reportType", "daily")
        .build()
}

pub fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload-audio/")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn app_with(config: Config, transcriber: Option<Arc<dyn Transcriber>>) -> Router {
    create_router(AppState::with_transcriber(config, transcriber)).unwrap()
}

/// Transcriber that returns a canned result and counts calls.
pub struct StubTranscriber {
    result: Result<String, String>,
    pub calls: AtomicUsize,
    pub last_upload: std::sync::Mutex<Option<AudioUpload>>,
}

impl StubTranscriber {
    pub fn ok(text: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            last_upload: std::sync::Mutex::new(None),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_upload: std::sync::Mutex::new(None),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transcriber for StubTranscriber {
    async fn transcribe(&self, upload: &AudioUpload) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_upload.lock().unwrap() = Some(upload.clone());
        self.result
            .clone()
            .map_err(TranscriptionError::InvalidResponse)
    }

    fn name(&self) -> &str {
        "stub"
    }
}

pub fn app_with_stub(config: Config, stub: &Arc<StubTranscriber>) -> Router {
    let transcriber: Arc<dyn Transcriber> = stub.clone();
    app_with(config, Some(transcriber))
}
