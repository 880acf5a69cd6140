use serde_json::{json, Value};

/// Failures of the frame-extraction service, as reported to uploaders.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcessorError {
    #[error("No file provided")]
    MissingFile,

    #[error("Unsupported content-type: {content_type}")]
    UnsupportedMediaType { content_type: String },

    #[error("File exceeds {limit_mb}MB limit")]
    FileTooLarge { limit_mb: u64 },

    #[error("Video processing timed out")]
    Timeout,

    #[error("Video processor not reachable")]
    Unreachable,

    #[error("Video processor returned an invalid response (HTTP {status})")]
    InvalidResponse { status: u16 },
}

impl ProcessorError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingFile => "missing_file",
            Self::UnsupportedMediaType { .. } => "unsupported_media_type",
            Self::FileTooLarge { .. } => "file_too_large",
            Self::Timeout => "processor_timeout",
            Self::Unreachable => "processor_unreachable",
            Self::InvalidResponse { .. } => "processor_invalid_response",
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::MissingFile => "Select a .mp4 file and try again",
            Self::UnsupportedMediaType { .. } => "Only MP4 (H.264) is supported at this time",
            Self::FileTooLarge { .. } => "Upload a smaller clip or compress the video",
            Self::Timeout => "Try a shorter clip or reduce resolution",
            Self::Unreachable => "Ensure video-processor service is running",
            Self::InvalidResponse { .. } => "Check the video-processor logs and retry",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            Self::MissingFile => 400,
            Self::UnsupportedMediaType { .. } => 415,
            Self::FileTooLarge { .. } => 413,
            Self::Timeout => 504,
            Self::Unreachable | Self::InvalidResponse { .. } => 502,
        }
    }

    /// JSON error body: `{error, message, suggestion}`.
    pub fn body(&self) -> Value {
        json!({
            "error": self.code(),
            "message": self.message(),
            "suggestion": self.suggestion(),
        })
    }
}

/// Check an upload before it is forwarded to the processor.
pub fn check_upload(
    content_type: Option<&str>,
    size_bytes: u64,
    max_upload_mb: u64,
) -> Result<(), ProcessorError> {
    let Some(content_type) = content_type else {
        return Err(ProcessorError::MissingFile);
    };
    if !content_type.to_ascii_lowercase().contains("mp4") {
        return Err(ProcessorError::UnsupportedMediaType {
            content_type: content_type.to_string(),
        });
    }
    if size_bytes > max_upload_mb.saturating_mul(1024 * 1024) {
        return Err(ProcessorError::FileTooLarge {
            limit_mb: max_upload_mb,
        });
    }
    Ok(())
}
