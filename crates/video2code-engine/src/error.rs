use std::path::PathBuf;

use video2code_contracts::processor::ProcessorError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("LLM request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("LLM endpoint returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("LLM request failed")]
    Transport(#[source] reqwest::Error),

    #[error("LLM returned an invalid payload: {0}")]
    InvalidResponse(String),

    #[error("failed listing frames in {}", .dir.display())]
    FrameList {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed reading frame {}", .path.display())]
    FrameRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("archive build failed: {0}")]
    Archive(String),

    #[error(transparent)]
    Processor(#[from] ProcessorError),
}
