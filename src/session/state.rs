use crate::capture::image::ImageCapture;
use crate::capture::text::TextCapture;
use crate::config::ReviewConfig;
use crate::domain::{Annotation, AnnotationId, ContainerSize, Marker, PendingSelection, Point};

/// Which surface the submission is reviewed on; fixed for the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceMode {
    Text,
    Image,
}

/// Ordered annotations of one correction session
#[derive(Clone, Debug, Default)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    revision: u64,
}

impl AnnotationStore {
    pub fn add(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
        self.revision += 1;
    }

    /// Remove by id; unknown ids are a no-op. Returns whether anything changed.
    pub fn remove(&mut self, id: AnnotationId) -> bool {
        let before = self.annotations.len();
        self.annotations.retain(|a| a.id != id);
        let changed = self.annotations.len() != before;
        if changed {
            self.revision += 1;
        }
        changed
    }

    pub fn all(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Bumped on every mutation; overlays re-render when it changes
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Comment being written in the open popup
#[derive(Clone, Debug, PartialEq)]
pub struct PopupDraft {
    pub pending: PendingSelection,
    pub comment: String,
    pub marker: Marker,
}

/// Floating comment editor anchored to a captured selection
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Popup {
    #[default]
    Closed,
    Open(PopupDraft),
}

impl Popup {
    pub fn open(&mut self, pending: PendingSelection, marker: Marker) {
        *self = Popup::Open(PopupDraft {
            pending,
            comment: String::new(),
            marker,
        });
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Popup::Open(_))
    }

    pub fn draft(&self) -> Option<&PopupDraft> {
        match self {
            Popup::Open(draft) => Some(draft),
            Popup::Closed => None,
        }
    }

    /// Screen position the popup is anchored at
    pub fn anchor(&self) -> Option<Point> {
        self.draft().map(|d| d.pending.anchor)
    }

    pub fn set_comment(&mut self, comment: String) {
        if let Popup::Open(draft) = self {
            draft.comment = comment;
        }
    }

    pub fn set_marker(&mut self, marker: Marker) {
        if let Popup::Open(draft) = self {
            draft.marker = marker;
        }
    }

    /// Whether the save affordance is enabled
    pub fn can_save(&self) -> bool {
        self.draft()
            .is_some_and(|d| !d.comment.trim().is_empty())
    }

    /// Turn the draft into an annotation and close
    ///
    /// Does nothing while the comment is blank. The comment is kept exactly
    /// as typed.
    pub fn save(&mut self) -> Option<Annotation> {
        if !self.can_save() {
            return None;
        }
        let Popup::Open(draft) = std::mem::take(self) else {
            return None;
        };
        Some(Annotation::new(
            draft.comment,
            draft.marker,
            draft.pending.payload.into_anchor(),
        ))
    }

    /// Discard the draft
    pub fn close(&mut self) -> Option<PendingSelection> {
        match std::mem::take(self) {
            Popup::Open(draft) => Some(draft.pending),
            Popup::Closed => None,
        }
    }
}

/// Everything one reviewer holds while correcting one submission
#[derive(Clone, Debug)]
pub struct ReviewSession {
    pub mode: SurfaceMode,
    /// Rendered size of the image container
    pub container: ContainerSize,
    pub text: TextCapture,
    pub image: ImageCapture,
    pub popup: Popup,
    pub store: AnnotationStore,
    pub config: ReviewConfig,
}

impl ReviewSession {
    pub fn new(mode: SurfaceMode, container: ContainerSize, config: ReviewConfig) -> Self {
        Self {
            mode,
            container,
            text: TextCapture::default(),
            image: ImageCapture::default(),
            popup: Popup::default(),
            store: AnnotationStore::default(),
            config,
        }
    }

    /// Return both capture paths to idle
    pub fn reset_capture(&mut self) {
        self.text.reset();
        self.image.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Anchor, PendingPayload};

    fn text_annotation(quote: &str) -> Annotation {
        Annotation::new(
            "comment".to_string(),
            Marker::Sugestao,
            Anchor::Text {
                selection: quote.to_string(),
            },
        )
    }

    fn pending_text(quote: &str) -> PendingSelection {
        PendingSelection {
            payload: PendingPayload::Text(quote.to_string()),
            anchor: Point::new(10.0, 20.0),
        }
    }

    #[test]
    fn test_store_keeps_order_after_removal() {
        let mut store = AnnotationStore::default();
        let first = text_annotation("first");
        let second = text_annotation("second");
        let third = text_annotation("third");
        store.add(first.clone());
        store.add(second.clone());
        store.add(third.clone());

        assert!(store.remove(first.id));
        assert_eq!(store.all(), &[second, third]);
    }

    #[test]
    fn test_store_remove_is_idempotent() {
        let mut store = AnnotationStore::default();
        let first = text_annotation("first");
        let second = text_annotation("second");
        store.add(first.clone());
        store.add(second.clone());

        assert!(store.remove(first.id));
        let revision = store.revision();
        assert!(!store.remove(first.id));
        assert_eq!(store.revision(), revision);
        assert_eq!(store.all(), &[second]);
    }

    #[test]
    fn test_store_revision_tracks_mutations() {
        let mut store = AnnotationStore::default();
        assert_eq!(store.revision(), 0);
        let ann = text_annotation("q");
        store.add(ann.clone());
        assert_eq!(store.revision(), 1);
        store.remove(AnnotationId::new());
        assert_eq!(store.revision(), 1);
        store.remove(ann.id);
        assert_eq!(store.revision(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_popup_opens_with_empty_comment_and_marker() {
        let mut popup = Popup::default();
        popup.open(pending_text("quote"), Marker::Sugestao);
        let draft = popup.draft().unwrap();
        assert_eq!(draft.comment, "");
        assert_eq!(draft.marker, Marker::Sugestao);
        assert_eq!(popup.anchor(), Some(Point::new(10.0, 20.0)));
        assert!(!popup.can_save());
    }

    #[test]
    fn test_popup_save_is_gated_on_blank_comment() {
        let mut popup = Popup::default();
        popup.open(pending_text("quote"), Marker::Sugestao);
        popup.set_comment("   ".to_string());
        assert!(popup.save().is_none());
        assert!(popup.is_open());
    }

    #[test]
    fn test_popup_save_builds_annotation_and_closes() {
        let mut popup = Popup::default();
        popup.open(pending_text("growth mindset"), Marker::Sugestao);
        popup.set_comment(" good use of repertoire ".to_string());
        popup.set_marker(Marker::Acerto);

        let ann = popup.save().unwrap();
        assert_eq!(ann.comment, " good use of repertoire ");
        assert_eq!(ann.marker, Marker::Acerto);
        assert_eq!(ann.selection(), Some("growth mindset"));
        assert_eq!(ann.position(), None);
        assert_eq!(popup, Popup::Closed);
    }

    #[test]
    fn test_popup_close_discards_draft() {
        let mut popup = Popup::default();
        popup.open(pending_text("quote"), Marker::Erro);
        popup.set_comment("text".to_string());
        assert_eq!(popup.close(), Some(pending_text("quote")));
        assert!(!popup.is_open());
        assert!(popup.close().is_none());
    }

    #[test]
    fn test_edits_on_closed_popup_are_ignored() {
        let mut popup = Popup::default();
        popup.set_comment("text".to_string());
        popup.set_marker(Marker::Erro);
        assert_eq!(popup, Popup::Closed);
        assert!(popup.save().is_none());
    }
}
