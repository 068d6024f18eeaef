//! Text-range capture from the native text selection

use crate::domain::{NativeSelection, PendingPayload, PendingSelection};

/// State of the text capture path
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TextCaptureState {
    #[default]
    Idle,
    /// A usable selection was captured and handed to the popup
    Selected(PendingSelection),
}

#[derive(Clone, Debug, Default)]
pub struct TextCapture {
    state: TextCaptureState,
}

impl TextCapture {
    pub fn state(&self) -> &TextCaptureState {
        &self.state
    }

    /// Pointer released over the text surface
    ///
    /// Collapsed or blank selections leave the state untouched.
    pub fn pointer_up(&mut self, selection: Option<NativeSelection>) -> Option<PendingSelection> {
        let selection = selection?;
        if selection.collapsed {
            return None;
        }
        let text = selection.text.trim();
        if text.is_empty() {
            return None;
        }

        let pending = PendingSelection {
            payload: PendingPayload::Text(text.to_string()),
            anchor: selection.bounds.bottom_center(),
        };
        log::debug!("Text selection captured ({} chars)", text.chars().count());
        self.state = TextCaptureState::Selected(pending.clone());
        Some(pending)
    }

    /// Return to idle after the popup closed or saved
    pub fn reset(&mut self) {
        self.state = TextCaptureState::Idle;
    }
}
