//! Annotation message handlers
//!
//! Handles Msg for capture, popup and store operations. Every transition
//! happens synchronously inside one call.

use crate::capture::image::PointerDown;
use crate::domain::{PendingSelection, SelectionSource};
use crate::session::messages::{ImageMsg, Msg, PopupMsg, StoreMsg, TextMsg};
use crate::session::state::{ReviewSession, SurfaceMode};

/// Handle a Msg, modifying session state
///
/// `selection` is the host's native text selection; it is read on text
/// pointer-up and cleared after a save.
pub fn handle_msg(session: &mut ReviewSession, msg: Msg, selection: &mut impl SelectionSource) {
    match msg {
        Msg::Text(action) => handle_text(session, action, &*selection),
        Msg::Image(action) => handle_image(session, action),
        Msg::Popup(action) => handle_popup(session, action, selection),
        Msg::Store(StoreMsg::Remove(id)) => {
            if session.store.remove(id) {
                log::debug!("Removed annotation {}", id);
            }
        }
        Msg::Resize(size) => {
            if size.is_empty() {
                log::warn!(
                    "Ignoring resize to empty container {}x{}",
                    size.width,
                    size.height
                );
            } else {
                session.container = size;
            }
        }
    }
}

// ============================================================================
// Capture handlers
// ============================================================================

fn handle_text(session: &mut ReviewSession, action: TextMsg, selection: &impl SelectionSource) {
    if session.mode != SurfaceMode::Text {
        return;
    }
    match action {
        TextMsg::PointerUp => {
            if let Some(pending) = session.text.pointer_up(selection.current()) {
                open_popup(session, pending);
            }
        }
    }
}

fn handle_image(session: &mut ReviewSession, action: ImageMsg) {
    if session.mode != SurfaceMode::Image {
        return;
    }
    match action {
        ImageMsg::PointerDown(event) => {
            let popup_open = session.popup.is_open();
            if session.image.pointer_down(event, popup_open) == PointerDown::ClosePopup {
                close_popup(session);
            }
        }
        ImageMsg::PointerMove(event) => session.image.pointer_move(event, session.container),
        ImageMsg::PointerUp(event) => {
            let min_px = session.config.min_selection_px;
            if let Some(pending) = session.image.pointer_up(event, session.container, min_px) {
                open_popup(session, pending);
            }
        }
    }
}

// ============================================================================
// Popup handlers
// ============================================================================

fn handle_popup(
    session: &mut ReviewSession,
    action: PopupMsg,
    selection: &mut impl SelectionSource,
) {
    match action {
        PopupMsg::SetComment(comment) => session.popup.set_comment(comment),
        PopupMsg::SetMarker(marker) => session.popup.set_marker(marker),
        PopupMsg::Save => {
            if let Some(annotation) = session.popup.save() {
                log::debug!(
                    "Saved {} annotation {}",
                    annotation.marker.as_str(),
                    annotation.id
                );
                session.store.add(annotation);
                session.reset_capture();
                selection.clear();
            }
        }
        PopupMsg::Close => close_popup(session),
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn open_popup(session: &mut ReviewSession, pending: PendingSelection) {
    let marker = session.config.default_marker;
    session.popup.open(pending, marker);
}

fn close_popup(session: &mut ReviewSession) {
    if session.popup.close().is_some() {
        log::trace!("Popup closed, pending selection discarded");
    }
    session.reset_capture();
}
