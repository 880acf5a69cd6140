mod archive;
mod client;
mod config;
mod error;
mod frames;
mod processor;
mod prompt;
mod service;

pub use archive::{
    archive_file_name, build_archive, ANALYSIS_ENTRY, API_SPEC_ENTRY, BACKEND_ENTRY,
    FRONTEND_ENTRY, MANIFEST_ENTRY,
};
pub use client::{KeyPool, KeyRotationClient, DEFAULT_API_BASE, NO_CREDENTIALS_REPLY};
pub use config::EngineConfig;
pub use error::EngineError;
pub use frames::{DirectoryFrameProvider, Frame, FrameProvider};
pub use processor::{ProcessorClient, ProcessorReply};
pub use prompt::{build_messages, refine_messages, SCHEMA_CONTRACT, SYSTEM_PROMPT};
pub use service::{AnalysisSettings, OrchestrationService};
