use std::env;
use std::path::PathBuf;

use video2code_contracts::models::{DEFAULT_REFINE_MODEL, DEFAULT_VISION_MODEL};
use video2code_contracts::sampling::MIN_SAMPLE_SIZE;

use crate::client::DEFAULT_API_BASE;

pub const DEFAULT_FRAMES_DIR: &str = "/data/frames";
pub const DEFAULT_MAX_FRAMES: usize = 8;
pub const DEFAULT_TIMEOUT_MS: u64 = 20_000;
pub const DEFAULT_PROCESSOR_URL: &str = "http://video-processor:5000/process";
pub const DEFAULT_PROCESSOR_TIMEOUT_MS: u64 = 180_000;
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 100;

/// Process-level settings handed to the engine at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub api_keys: Vec<String>,
    pub api_base: String,
    pub model: String,
    pub refine_model: String,
    pub frames_dir: PathBuf,
    pub max_frames: usize,
    pub timeout_ms: u64,
    pub processor_url: String,
    pub processor_timeout_ms: u64,
    pub max_upload_mb: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_keys: Vec::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_VISION_MODEL.to_string(),
            refine_model: DEFAULT_REFINE_MODEL.to_string(),
            frames_dir: PathBuf::from(DEFAULT_FRAMES_DIR),
            max_frames: DEFAULT_MAX_FRAMES,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            processor_url: DEFAULT_PROCESSOR_URL.to_string(),
            processor_timeout_ms: DEFAULT_PROCESSOR_TIMEOUT_MS,
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
        }
    }
}

impl std::fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineConfig")
            .field("api_keys", &format_args!("<{} keys>", self.api_keys.len()))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("refine_model", &self.refine_model)
            .field("frames_dir", &self.frames_dir)
            .field("max_frames", &self.max_frames)
            .field("timeout_ms", &self.timeout_ms)
            .field("processor_url", &self.processor_url)
            .field("processor_timeout_ms", &self.processor_timeout_ms)
            .field("max_upload_mb", &self.max_upload_mb)
            .finish()
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Blank or unparseable values
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };
        let defaults = Self::default();

        Self {
            api_keys: value("OPENROUTER_API_KEYS")
                .map(|csv| split_keys(&csv))
                .unwrap_or_default(),
            api_base: value("OPENROUTER_API_BASE")
                .map(|raw| raw.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            model: value("OPENROUTER_MODEL").unwrap_or(defaults.model),
            refine_model: value("OPENROUTER_REFINE_MODEL").unwrap_or(defaults.refine_model),
            frames_dir: value("FRAMES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.frames_dir),
            max_frames: value("VIDEO2CODE_MAX_FRAMES")
                .and_then(|raw| raw.parse::<usize>().ok())
                .unwrap_or(defaults.max_frames)
                .max(MIN_SAMPLE_SIZE),
            timeout_ms: value("OPENROUTER_TIMEOUT_MS")
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.timeout_ms),
            processor_url: value("VIDEO_PROCESSOR_URL").unwrap_or(defaults.processor_url),
            processor_timeout_ms: value("VIDEO_PROCESSOR_TIMEOUT_MS")
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.processor_timeout_ms),
            max_upload_mb: value("MAX_UPLOAD_MB")
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.max_upload_mb),
        }
    }
}

pub(crate) fn split_keys(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}
