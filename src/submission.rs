//! Submission record consumed by a correction session

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::session::state::SurfaceMode;

/// Student essay as stored by the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    /// Typed essay, possibly HTML
    #[serde(default)]
    pub content: Option<String>,
    /// Scanned or photographed essay
    #[serde(default)]
    pub image_submission_url: Option<String>,
}

/// The one body a submission actually carries
#[derive(Clone, Debug, PartialEq)]
pub enum SubmissionBody<'a> {
    Text(&'a str),
    Image(&'a str),
}

impl Submission {
    /// Validated body; exactly one of `content` / `image_submission_url`
    /// must be present and non-blank
    pub fn body(&self) -> Result<SubmissionBody<'_>> {
        let content = self.content.as_deref().filter(|s| !s.trim().is_empty());
        let image = self
            .image_submission_url
            .as_deref()
            .filter(|s| !s.trim().is_empty());

        match (content, image) {
            (Some(text), None) => Ok(SubmissionBody::Text(text)),
            (None, Some(url)) => Ok(SubmissionBody::Image(url)),
            (Some(_), Some(_)) => bail!("Submission {} has both text and image bodies", self.id),
            (None, None) => bail!("Submission {} has no body", self.id),
        }
    }

    /// Surface the submission is reviewed on
    pub fn mode(&self) -> Result<SurfaceMode> {
        Ok(match self.body()? {
            SubmissionBody::Text(_) => SurfaceMode::Text,
            SubmissionBody::Image(_) => SurfaceMode::Image,
        })
    }
}
