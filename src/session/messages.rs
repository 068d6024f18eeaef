//! Message types for a correction session
//!
//! The hosting surface translates its pointer and form events into these
//! messages and feeds them to `annotations::handlers::handle_msg`.

use serde::Deserialize;

use crate::domain::{AnnotationId, ContainerSize, Marker, PointerEvent};

/// Pointer events over the text surface
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMsg {
    /// Pointer released; the native selection is read from the host
    PointerUp,
}

/// Pointer events over the image surface
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageMsg {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
}

/// Popup editor messages
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopupMsg {
    /// Comment body edited
    SetComment(String),
    /// Marker category picked
    SetMarker(Marker),
    /// Save button pressed (only enabled with a non-blank comment)
    Save,
    /// Cancel button pressed
    Close,
}

/// Annotation list messages
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreMsg {
    /// Delete control clicked
    Remove(AnnotationId),
}

/// All correction session messages
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Msg {
    Text(TextMsg),
    Image(ImageMsg),
    Popup(PopupMsg),
    Store(StoreMsg),
    /// The image container was laid out at a new size
    Resize(ContainerSize),
}
