use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::multipart::{Form as MultipartForm, Part as MultipartPart};
use reqwest::blocking::Client as HttpClient;
use serde_json::Value;
use tracing::{info, warn};
use video2code_contracts::processor::{check_upload, ProcessorError};

/// JSON reply from the frame-extraction service, with its HTTP status.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorReply {
    pub status: u16,
    pub body: Value,
}

/// Uploads videos to the frame-extraction service.
#[derive(Debug)]
pub struct ProcessorClient {
    endpoint: String,
    timeout: Duration,
    max_upload_mb: u64,
    http: HttpClient,
}

impl ProcessorClient {
    pub fn new(endpoint: &str, timeout_ms: u64, max_upload_mb: u64) -> Self {
        Self {
            endpoint: endpoint.trim().to_string(),
            timeout: Duration::from_millis(timeout_ms),
            max_upload_mb,
            http: HttpClient::new(),
        }
    }

    pub fn submit(&self, video: &Path) -> Result<ProcessorReply, ProcessorError> {
        let size = fs::metadata(video)
            .ok()
            .filter(|meta| meta.is_file())
            .map(|meta| meta.len());
        let Some(size) = size else {
            return Err(ProcessorError::MissingFile);
        };
        let content_type = video_content_type(video);
        check_upload(Some(content_type), size, self.max_upload_mb)?;

        let bytes = fs::read(video).map_err(|_| ProcessorError::MissingFile)?;
        let file_name = video
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload.mp4".to_string());
        let part = MultipartPart::bytes(bytes)
            .file_name(file_name)
            .mime_str(content_type)
            .map_err(|_| ProcessorError::UnsupportedMediaType {
                content_type: content_type.to_string(),
            })?;

        info!(endpoint = %self.endpoint, size, "uploading video to processor");
        let response = self
            .http
            .post(&self.endpoint)
            .timeout(self.timeout)
            .multipart(MultipartForm::new().part("file", part))
            .send()
            .map_err(classify_send_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(classify_send_error)?;
        match serde_json::from_str::<Value>(&body) {
            Ok(body) => Ok(ProcessorReply { status, body }),
            Err(_) => {
                warn!(status, "processor replied with non-JSON body");
                Err(ProcessorError::InvalidResponse { status })
            }
        }
    }
}

fn classify_send_error(err: reqwest::Error) -> ProcessorError {
    if err.is_timeout() {
        return ProcessorError::Timeout;
    }
    warn!(error = %err, "processor request failed");
    ProcessorError::Unreachable
}

fn video_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}
