//! Annotation types for reviewer comments on a submission
//!
//! An annotation is anchored either to a quoted piece of the essay text or to
//! a percentage-space rectangle over the essay image. The anchor is a sum
//! type, so a text annotation can never carry a rectangle and vice versa.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::geometry::PercentRect;
use crate::fl;

/// Opaque annotation identifier, generated when the annotation is created
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(Uuid);

impl AnnotationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AnnotationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Qualitative category of an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    /// Suggestion
    #[default]
    Sugestao,
    /// Correct use
    Acerto,
    /// Error
    Erro,
}

impl Marker {
    /// Wire name of this marker
    pub fn as_str(self) -> &'static str {
        match self {
            Marker::Sugestao => "sugestao",
            Marker::Acerto => "acerto",
            Marker::Erro => "erro",
        }
    }

    /// Localized label shown next to the annotation
    pub fn label(self) -> String {
        match self {
            Marker::Sugestao => fl!("marker-sugestao"),
            Marker::Acerto => fl!("marker-acerto"),
            Marker::Erro => fl!("marker-erro"),
        }
    }
}

/// Where an annotation points in the submission
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Anchor {
    /// Quoted substring of the essay text. No offset is kept, the quote is
    /// for display only.
    Text { selection: String },
    /// Rectangle relative to the rendered image bounding box
    Image { position: PercentRect },
}

/// A reviewer comment anchored to a location in the submission
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub comment: String,
    pub marker: Marker,
    #[serde(flatten)]
    pub anchor: Anchor,
}

impl Annotation {
    pub fn new(comment: String, marker: Marker, anchor: Anchor) -> Self {
        Self {
            id: AnnotationId::new(),
            comment,
            marker,
            anchor,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.anchor, Anchor::Text { .. })
    }

    pub fn is_image(&self) -> bool {
        matches!(self.anchor, Anchor::Image { .. })
    }

    pub fn selection(&self) -> Option<&str> {
        match &self.anchor {
            Anchor::Text { selection } => Some(selection),
            Anchor::Image { .. } => None,
        }
    }

    pub fn position(&self) -> Option<PercentRect> {
        match self.anchor {
            Anchor::Image { position } => Some(position),
            Anchor::Text { .. } => None,
        }
    }
}
