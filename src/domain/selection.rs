//! Selection types shared by the capture paths and the popup

use serde::{Deserialize, Serialize};

use super::annotation::Anchor;
use super::geometry::{PercentRect, PixelRect, Point};

/// Snapshot of the platform's active text selection
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeSelection {
    /// Selected string, as reported by the platform
    pub text: String,
    /// Whether the selection range is collapsed (caret only)
    #[serde(default)]
    pub collapsed: bool,
    /// Bounding rectangle of the range in viewport coordinates
    pub bounds: PixelRect,
}

/// Access to the hosting surface's native text selection
pub trait SelectionSource {
    /// Current selection, if any
    fn current(&self) -> Option<NativeSelection>;
    /// Clear the active selection so it does not reopen the popup
    fn clear(&mut self);
}

/// Pointer event over the image surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Position relative to the image container
    pub local: Point,
    /// Position in screen/viewport coordinates, used to anchor the popup
    pub screen: Point,
}

impl PointerEvent {
    pub fn new(local: Point, screen: Point) -> Self {
        Self { local, screen }
    }
}

/// What a capture path hands to the popup
#[derive(Clone, Debug, PartialEq)]
pub enum PendingPayload {
    /// Trimmed text of the selection
    Text(String),
    /// Drawn rectangle already normalized to percentage-space
    Image(PercentRect),
}

impl PendingPayload {
    /// Anchor of the annotation this payload becomes on save
    pub fn into_anchor(self) -> Anchor {
        match self {
            PendingPayload::Text(selection) => Anchor::Text { selection },
            PendingPayload::Image(position) => Anchor::Image { position },
        }
    }
}

/// A pending payload plus where the popup should appear
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSelection {
    pub payload: PendingPayload,
    pub anchor: Point,
}
