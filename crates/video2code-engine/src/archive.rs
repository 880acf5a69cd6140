use std::io::{Cursor, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use video2code_contracts::analysis::Artifacts;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::EngineError;

pub const FRONTEND_ENTRY: &str = "react/GeneratedScreen.jsx";
pub const API_SPEC_ENTRY: &str = "api/openapi.yaml";
pub const BACKEND_ENTRY: &str = "backend/refine.controller.ts";
pub const ANALYSIS_ENTRY: &str = "analysis/analysis.json";
pub const MANIFEST_ENTRY: &str = "README.txt";

/// Bundle `artifacts` into an in-memory zip archive.
///
/// Empty artifacts still produce their entries. The manifest records when the
/// bundle was built, which model produced it and a digest of every entry.
pub fn build_archive(
    artifacts: &Artifacts,
    model: &str,
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>, EngineError> {
    let analysis_json = serde_json::to_vec_pretty(&artifacts.analysis)
        .map_err(|err| archive_error("analysis serialization failed", err))?;
    let entries: [(&str, &[u8]); 4] = [
        (FRONTEND_ENTRY, artifacts.frontend_source.as_bytes()),
        (API_SPEC_ENTRY, artifacts.api_spec.as_bytes()),
        (BACKEND_ENTRY, artifacts.backend_source.as_bytes()),
        (ANALYSIS_ENTRY, analysis_json.as_slice()),
    ];
    let manifest = manifest_text(&entries, model, generated_at);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, bytes) in entries
        .iter()
        .copied()
        .chain([(MANIFEST_ENTRY, manifest.as_bytes())])
    {
        writer
            .start_file(name, options)
            .map_err(|err| archive_error(name, err))?;
        writer
            .write_all(bytes)
            .map_err(|err| archive_error(name, err))?;
    }
    let buffer = writer
        .finish()
        .map_err(|err| archive_error("finalizing archive", err))?
        .into_inner();

    info!(bytes = buffer.len(), model, "built artifact archive");
    Ok(buffer)
}

fn archive_error(context: &str, err: impl std::fmt::Display) -> EngineError {
    let reason = format!("{context}: {err}");
    warn!(%reason, "artifact archive build failed");
    EngineError::Archive(reason)
}

/// Download name such as `video2code-artifacts-20250903T0551.zip`.
pub fn archive_file_name(now: DateTime<Utc>) -> String {
    format!("video2code-artifacts-{}.zip", now.format("%Y%m%dT%H%M"))
}

fn manifest_text(entries: &[(&str, &[u8])], model: &str, generated_at: DateTime<Utc>) -> String {
    let mut out = String::from("VIDEO2CODE artifacts\n");
    out.push_str(&format!(
        "Generated: {}\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    out.push_str(&format!("Model: {model}\n"));
    out.push_str("Files:\n");
    for (name, bytes) in entries {
        let digest = hex::encode(Sha256::digest(bytes));
        out.push_str(&format!("- {name} (sha256 {digest})\n"));
    }
    out
}
