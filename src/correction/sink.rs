//! Destinations for finished corrections

use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::payload::CorrectionPayload;

/// Submission id with everything but `[A-Za-z0-9_-]` replaced by `_`
pub fn file_safe_id(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// The external "submit correction" collaborator
pub trait CorrectionSink {
    /// Persist the payload; returns where it ended up
    fn submit(&self, payload: &CorrectionPayload) -> impl Future<Output = Result<String>>;
}

/// Writes each correction as a pretty-printed JSON file
#[derive(Clone, Debug)]
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File name for a payload: `correction-<submission>-<timestamp>.json`
    pub fn file_name(payload: &CorrectionPayload) -> String {
        format!(
            "correction-{}-{}.json",
            file_safe_id(&payload.submission_id),
            payload.corrected_at.format("%Y%m%d-%H%M%S")
        )
    }

    fn write(dir: &Path, payload: &CorrectionPayload) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        let path = dir.join(Self::file_name(payload));

        // Write next to the target and rename, so readers never see a partial file
        let mut file = tempfile::Builder::new()
            .prefix(".correction-")
            .suffix(".json")
            .tempfile_in(dir)?;
        serde_json::to_writer_pretty(&mut file, payload)?;
        file.flush()?;
        file.persist(&path)
            .with_context(|| format!("Failed to write correction: {}", path.display()))?;
        Ok(path)
    }
}

impl CorrectionSink for JsonFileSink {
    async fn submit(&self, payload: &CorrectionPayload) -> Result<String> {
        let dir = self.dir.clone();
        let payload = payload.clone();
        let path = tokio::task::spawn_blocking(move || Self::write(&dir, &payload))
            .await
            .context("Correction writer task failed")??;
        log::info!("Correction written to {}", path.display());
        Ok(path.display().to_string())
    }
}
