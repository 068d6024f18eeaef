//! Correction payload handed to the backend on final submission

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Annotation;

/// Number of graded competencies
pub const COMPETENCY_COUNT: usize = 5;
/// Highest score of a single competency
pub const MAX_COMPETENCY_SCORE: u16 = 200;
/// Competency scores move in steps of this size
pub const SCORE_STEP: u16 = 40;

/// What the reviewer filled in besides the annotations
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrectionDraft {
    pub scores: [u16; COMPETENCY_COUNT],
    pub feedback: String,
    #[serde(default)]
    pub recommendation: Option<String>,
}

impl CorrectionDraft {
    /// Reject scores outside `0..=200` or off the 40-point grid
    pub fn validate(&self) -> Result<()> {
        for (index, score) in self.scores.iter().enumerate() {
            if *score > MAX_COMPETENCY_SCORE || score % SCORE_STEP != 0 {
                bail!(
                    "Competency {} score {} must be a multiple of {} up to {}",
                    index + 1,
                    score,
                    SCORE_STEP,
                    MAX_COMPETENCY_SCORE
                );
            }
        }
        Ok(())
    }

    pub fn total_score(&self) -> u16 {
        self.scores.iter().sum()
    }
}

/// Kind of media uploaded alongside a correction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    AudioFeedback,
    AnnotatedImage,
}

/// A finished upload and where it can be fetched from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadedMedia {
    pub kind: MediaKind,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrectionPayload {
    pub submission_id: String,
    /// Annotations in creation order
    pub annotations: Vec<Annotation>,
    pub competencies: [u16; COMPETENCY_COUNT],
    pub total_score: u16,
    pub feedback: String,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub audio_feedback_url: Option<String>,
    #[serde(default)]
    pub annotated_image_url: Option<String>,
    pub corrected_at: DateTime<Utc>,
}

impl CorrectionPayload {
    pub fn build(
        submission_id: &str,
        annotations: Vec<Annotation>,
        draft: CorrectionDraft,
        media: &[UploadedMedia],
    ) -> Result<Self> {
        draft.validate()?;

        let url_of = |kind: MediaKind| {
            media
                .iter()
                .rev()
                .find(|m| m.kind == kind)
                .map(|m| m.url.clone())
        };

        Ok(Self {
            submission_id: submission_id.to_string(),
            annotations,
            competencies: draft.scores,
            total_score: draft.total_score(),
            feedback: draft.feedback,
            recommendation: draft.recommendation,
            audio_feedback_url: url_of(MediaKind::AudioFeedback),
            annotated_image_url: url_of(MediaKind::AnnotatedImage),
            corrected_at: Utc::now(),
        })
    }
}
