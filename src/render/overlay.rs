//! Overlay projection of the annotation store
//!
//! Image sessions get positioned highlight boxes, text sessions get a
//! numbered list of quoted comments below the essay. Both are pure functions
//! of the store contents and are recomputed whenever the store revision
//! changes.

use crate::domain::{Anchor, Annotation, AnnotationId, Marker, PercentRect};
use crate::fl;
use crate::session::state::SurfaceMode;

/// Highlight box drawn over the image
#[derive(Clone, Debug, PartialEq)]
pub struct ImageOverlay {
    /// Target of the delete control
    pub id: AnnotationId,
    pub rect: PercentRect,
    /// Tooltip text
    pub comment: String,
    pub marker: Marker,
}

impl ImageOverlay {
    /// Absolute positioning inside the image container
    pub fn css_style(&self) -> String {
        format!(
            "left: {:.2}%; top: {:.2}%; width: {:.2}%; height: {:.2}%;",
            self.rect.x, self.rect.y, self.rect.width, self.rect.height
        )
    }

    pub fn describe(&self) -> String {
        fl!(
            "overlay-image-entry",
            marker = self.marker.label(),
            x = format!("{:.2}", self.rect.x),
            y = format!("{:.2}", self.rect.y),
            width = format!("{:.2}", self.rect.width),
            height = format!("{:.2}", self.rect.height),
            comment = self.comment.as_str()
        )
    }
}

/// Entry of the reference list below the essay text
#[derive(Clone, Debug, PartialEq)]
pub struct TextOverlay {
    /// 1-based position in the list
    pub number: usize,
    /// Target of the delete control
    pub id: AnnotationId,
    /// Possibly truncated quote of the selection
    pub quote: String,
    pub comment: String,
    pub marker: Marker,
}

impl TextOverlay {
    pub fn describe(&self) -> String {
        fl!(
            "overlay-text-entry",
            number = self.number,
            quote = self.quote.as_str(),
            marker = self.marker.label(),
            comment = self.comment.as_str()
        )
    }
}

/// Projection for the session's surface
#[derive(Clone, Debug, PartialEq)]
pub enum Overlays {
    Image(Vec<ImageOverlay>),
    Text(Vec<TextOverlay>),
}

impl Overlays {
    pub fn len(&self) -> usize {
        match self {
            Overlays::Image(boxes) => boxes.len(),
            Overlays::Text(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Localized one-line description per overlay
    pub fn describe(&self) -> Vec<String> {
        match self {
            Overlays::Image(boxes) => boxes.iter().map(ImageOverlay::describe).collect(),
            Overlays::Text(entries) => entries.iter().map(TextOverlay::describe).collect(),
        }
    }
}

/// Project annotations for a surface; annotations of the other kind are skipped
pub fn project(mode: SurfaceMode, annotations: &[Annotation], quote_chars: usize) -> Overlays {
    match mode {
        SurfaceMode::Image => Overlays::Image(
            annotations
                .iter()
                .filter_map(|a| match a.anchor {
                    Anchor::Image { position } => Some(ImageOverlay {
                        id: a.id,
                        rect: position,
                        comment: a.comment.clone(),
                        marker: a.marker,
                    }),
                    Anchor::Text { .. } => None,
                })
                .collect(),
        ),
        SurfaceMode::Text => Overlays::Text(
            annotations
                .iter()
                .filter_map(|a| match &a.anchor {
                    Anchor::Text { selection } => Some((a, selection)),
                    Anchor::Image { .. } => None,
                })
                .enumerate()
                .map(|(index, (a, selection))| TextOverlay {
                    number: index + 1,
                    id: a.id,
                    quote: truncate_quote(selection, quote_chars),
                    comment: a.comment.clone(),
                    marker: a.marker,
                })
                .collect(),
        ),
    }
}

/// First `max_chars` characters of `quote`, with an ellipsis when cut
pub fn truncate_quote(quote: &str, max_chars: usize) -> String {
    match quote.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &quote[..cut]),
        None => quote.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(quote: &str, comment: &str) -> Annotation {
        Annotation::new(
            comment.to_string(),
            Marker::Sugestao,
            Anchor::Text {
                selection: quote.to_string(),
            },
        )
    }

    fn image(x: f32, comment: &str) -> Annotation {
        Annotation::new(
            comment.to_string(),
            Marker::Erro,
            Anchor::Image {
                position: PercentRect {
                    x,
                    y: 16.666_666,
                    width: 25.0,
                    height: 25.0,
                },
            },
        )
    }

    #[test]
    fn test_truncate_quote_counts_characters() {
        assert_eq!(truncate_quote("short", 40), "short");
        assert_eq!(truncate_quote("abcdef", 3), "abc…");
        assert_eq!(truncate_quote("açúcar não", 5), "açúca…");
        let exact = "x".repeat(40);
        assert_eq!(truncate_quote(&exact, 40), exact);
    }

    #[test]
    fn test_text_entries_numbered_by_list_position() {
        let anns = vec![
            text("the second paragraph starts too abruptly and lacks a connective", "a"),
            image(1.0, "skipped"),
            text("growth mindset", "b"),
        ];
        let Overlays::Text(entries) = project(SurfaceMode::Text, &anns, 40) else {
            panic!("expected text overlays");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].number, 1);
        assert_eq!(entries[0].quote, "the second paragraph starts too abruptly…");
        assert_eq!(entries[1].number, 2);
        assert_eq!(entries[1].quote, "growth mindset");
        assert_eq!(entries[1].id, anns[2].id);
    }

    #[test]
    fn test_image_boxes_keep_store_order() {
        let anns = vec![image(10.0, "first"), text("skipped", "x"), image(60.0, "second")];
        let overlays = project(SurfaceMode::Image, &anns, 40);
        let Overlays::Image(boxes) = &overlays else {
            panic!("expected image overlays");
        };
        assert_eq!(overlays.len(), 2);
        assert_eq!(boxes[0].comment, "first");
        assert_eq!(boxes[1].comment, "second");
        assert_eq!(boxes[1].rect.x, 60.0);
    }

    #[test]
    fn test_css_style_uses_percentages() {
        let overlays = project(SurfaceMode::Image, &[image(12.5, "c")], 40);
        let Overlays::Image(boxes) = overlays else {
            panic!("expected image overlays");
        };
        assert_eq!(
            boxes[0].css_style(),
            "left: 12.50%; top: 16.67%; width: 25.00%; height: 25.00%;"
        );
    }

    #[test]
    fn test_describe_mentions_quote_and_comment() {
        let overlays = project(SurfaceMode::Text, &[text("growth mindset", "good")], 40);
        let lines = overlays.describe();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("growth mindset"));
        assert!(lines[0].contains("good"));
    }

    #[test]
    fn test_empty_store_projects_nothing() {
        assert!(project(SurfaceMode::Text, &[], 40).is_empty());
        assert!(project(SurfaceMode::Image, &[], 40).is_empty());
    }
}
