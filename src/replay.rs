//! Scripted review sessions
//!
//! A replay script is a recorded correction: the submission, the container
//! size, the ordered UI events and the grading draft. Replaying it drives a
//! `ReviewSession` through the same handlers a live surface would.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::annotations::handlers::handle_msg;
use crate::config::ReviewConfig;
use crate::correction::payload::CorrectionDraft;
use crate::domain::{ContainerSize, NativeSelection, SelectionSource};
use crate::session::messages::{Msg, StoreMsg};
use crate::session::state::ReviewSession;
use crate::submission::Submission;

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    pub submission: Submission,
    pub container: ContainerSize,
    #[serde(default)]
    pub events: Vec<ReplayEvent>,
    pub correction: CorrectionDraft,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayEvent {
    /// The reviewer highlighted text with the native selection
    Select(NativeSelection),
    /// The native selection went away
    ClearSelection,
    /// Delete control of the n-th (0-based) annotation clicked
    DeleteNth(usize),
    #[serde(untagged)]
    Msg(Msg),
}

/// Native selection driven by `Select`/`ClearSelection` events
#[derive(Debug, Default)]
pub struct ScriptedSelection {
    current: Option<NativeSelection>,
}

impl SelectionSource for ScriptedSelection {
    fn current(&self) -> Option<NativeSelection> {
        self.current.clone()
    }

    fn clear(&mut self) {
        self.current = None;
    }
}

pub fn load_script(path: &Path) -> Result<ReplayScript> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read replay script: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid replay script: {}", path.display()))
}

/// Run every event of the script against a fresh session
pub fn replay(script: &ReplayScript, config: ReviewConfig) -> Result<ReviewSession> {
    let mode = script.submission.mode()?;
    if script.container.is_empty() {
        bail!(
            "Replay container must have a positive size, got {}x{}",
            script.container.width,
            script.container.height
        );
    }
    let mut session = ReviewSession::new(mode, script.container, config);
    let mut selection = ScriptedSelection::default();

    for event in &script.events {
        let revision = session.store.revision();
        match event {
            ReplayEvent::Select(native) => selection.current = Some(native.clone()),
            ReplayEvent::ClearSelection => selection.clear(),
            ReplayEvent::DeleteNth(index) => match session.store.all().get(*index) {
                Some(annotation) => {
                    let id = annotation.id;
                    handle_msg(&mut session, Msg::Store(StoreMsg::Remove(id)), &mut selection);
                }
                None => log::warn!("No annotation at index {} to delete", index),
            },
            ReplayEvent::Msg(msg) => handle_msg(&mut session, msg.clone(), &mut selection),
        }
        trace_surface(&session, revision);
    }

    log::debug!(
        "Replayed {} events into {} annotations",
        script.events.len(),
        session.store.len()
    );
    Ok(session)
}

/// What a live surface would redraw after an event
fn trace_surface(session: &ReviewSession, revision: u64) {
    if session.store.revision() != revision {
        log::trace!(
            "Store at revision {}, overlays re-rendered with {} annotations",
            session.store.revision(),
            session.store.len()
        );
    }
    if let Some(rect) = session.image.live_rect() {
        log::trace!("Live drag rect {:?}", rect);
    }
    if let Some(anchor) = session.popup.anchor() {
        log::trace!("Popup anchored at ({}, {})", anchor.x, anchor.y);
    }
}
