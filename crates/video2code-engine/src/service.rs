use chrono::Utc;
use tracing::{info, warn};
use video2code_contracts::analysis::{extract_analysis, strip_code_fence, Analysis, Artifacts};
use video2code_contracts::codegen::generate_artifacts;
use video2code_contracts::models::{ModelRegistry, CAPABILITY_TEXT, CAPABILITY_VISION};
use video2code_contracts::refine::{RefineRequest, RefineResponse};
use video2code_contracts::sampling::{sample_frames, MIN_SAMPLE_SIZE};

use crate::archive::build_archive;
use crate::client::{KeyPool, KeyRotationClient, NO_CREDENTIALS_REPLY};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::frames::{DirectoryFrameProvider, FrameProvider};
use crate::prompt::{build_messages, refine_messages};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSettings {
    pub model: String,
    pub refine_model: String,
    pub max_frames: usize,
    pub timeout_ms: u64,
}

impl AnalysisSettings {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            model: config.model.clone(),
            refine_model: config.refine_model.clone(),
            max_frames: config.max_frames.max(MIN_SAMPLE_SIZE),
            timeout_ms: config.timeout_ms,
        }
    }
}

/// Sequences frame sampling, the model call, recovery and rendering.
///
/// Built once at startup and shared by reference; the key pool cursor is its
/// only mutable state.
pub struct OrchestrationService {
    client: KeyRotationClient,
    frames: Box<dyn FrameProvider>,
    settings: AnalysisSettings,
}

impl OrchestrationService {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_parts(
            KeyRotationClient::new(&config.api_base, KeyPool::new(&config.api_keys)),
            Box::new(DirectoryFrameProvider::new(config.frames_dir.clone())),
            AnalysisSettings::from_config(config),
        )
    }

    pub fn with_parts(
        client: KeyRotationClient,
        frames: Box<dyn FrameProvider>,
        settings: AnalysisSettings,
    ) -> Self {
        let registry = ModelRegistry::default();
        if !registry.is_known(&settings.model, CAPABILITY_VISION) {
            warn!(model = %settings.model, "analysis model is not a known vision model");
        }
        if !registry.is_known(&settings.refine_model, CAPABILITY_TEXT) {
            warn!(model = %settings.refine_model, "refine model is not a known text model");
        }
        if !client.has_credentials() {
            info!("no api keys configured; model calls return an offline reply");
        }
        Self {
            client,
            frames,
            settings,
        }
    }

    pub fn analyze_frames(&self) -> Result<Analysis, EngineError> {
        let frames = self.frames.list_frames()?;
        if frames.is_empty() {
            info!("no frames available; skipping model call");
            return Ok(Analysis::no_frames());
        }

        let sampled = sample_frames(&frames, self.settings.max_frames);
        info!(
            available = frames.len(),
            sampled = sampled.len(),
            "analyzing frames"
        );
        let messages = build_messages(&sampled, self.frames.as_ref())?;
        let reply = self
            .client
            .complete(&self.settings.model, &messages, self.settings.timeout_ms)?;

        let extraction = extract_analysis(&reply);
        if !extraction.is_recovered() {
            warn!(
                reply_chars = reply.chars().count(),
                "model reply held no parseable analysis; using empty structure"
            );
        }
        let analysis = extraction.into_analysis();
        info!(
            screens = analysis.screens.len(),
            components = analysis.component_count(),
            actions = analysis.actions.len(),
            "analysis recovered"
        );
        Ok(analysis)
    }

    pub fn generate_artifacts(&self) -> Result<Artifacts, EngineError> {
        let analysis = self.analyze_frames()?;
        Ok(generate_artifacts(analysis))
    }

    /// Generate fresh artifacts and bundle them as a zip archive.
    pub fn build_archive(&self) -> Result<Vec<u8>, EngineError> {
        let artifacts = self.generate_artifacts()?;
        build_archive(&artifacts, &self.settings.model, Utc::now())
    }

    /// Ask the refine model to rewrite `request.code`. An empty or offline
    /// reply leaves the code unchanged.
    pub fn refine(&self, request: &RefineRequest) -> Result<RefineResponse, EngineError> {
        let reply = self.client.complete(
            &self.settings.refine_model,
            &refine_messages(request),
            self.settings.timeout_ms,
        )?;
        let updated = strip_code_fence(&reply);
        let updated_code = if updated.is_empty() || reply == NO_CREDENTIALS_REPLY {
            request.code.clone()
        } else {
            updated.to_string()
        };
        Ok(RefineResponse { updated_code })
    }
}
