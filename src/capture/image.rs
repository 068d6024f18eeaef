//! Rectangular drag capture over the image surface

use crate::domain::{
    ContainerSize, PendingPayload, PendingSelection, PixelRect, Point, PointerEvent, to_percent,
};

/// State of the image capture path
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ImageCaptureState {
    #[default]
    Idle,
    /// Pointer is held down; `rect` is the live feedback rectangle
    Drawing { origin: Point, rect: PixelRect },
    /// A large enough rectangle was drawn and handed to the popup
    Selected(PendingSelection),
}

/// What a pointer-down over the image did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerDown {
    /// A popup was open; the click only closes it
    ClosePopup,
    /// A new drag started
    StartDrawing,
}

#[derive(Clone, Debug, Default)]
pub struct ImageCapture {
    state: ImageCaptureState,
}

impl ImageCapture {
    pub fn state(&self) -> &ImageCaptureState {
        &self.state
    }

    /// Rectangle to draw as live feedback while dragging
    pub fn live_rect(&self) -> Option<PixelRect> {
        match self.state {
            ImageCaptureState::Drawing { rect, .. } => Some(rect),
            _ => None,
        }
    }

    /// Pointer pressed over the image
    pub fn pointer_down(&mut self, event: PointerEvent, popup_open: bool) -> PointerDown {
        if popup_open {
            self.state = ImageCaptureState::Idle;
            return PointerDown::ClosePopup;
        }
        self.state = ImageCaptureState::Drawing {
            origin: event.local,
            rect: PixelRect::from_corners(event.local, event.local),
        };
        PointerDown::StartDrawing
    }

    /// Pointer moved; only meaningful while drawing
    pub fn pointer_move(&mut self, event: PointerEvent, container: ContainerSize) {
        if let ImageCaptureState::Drawing { origin, rect } = &mut self.state {
            *rect = clamped_rect(*origin, event.local, container);
        }
    }

    /// Pointer released; yields a selection when the drawn rectangle exceeds
    /// `min_px` in both dimensions
    ///
    /// The rectangle is cut to the container, so a drag that leaves the image
    /// keeps only the part over it. Nothing is captured while the container
    /// has no size.
    pub fn pointer_up(
        &mut self,
        event: PointerEvent,
        container: ContainerSize,
        min_px: f32,
    ) -> Option<PendingSelection> {
        let ImageCaptureState::Drawing { origin, .. } = self.state else {
            return None;
        };

        if container.is_empty() {
            log::warn!(
                "Discarding drag over empty container {}x{}",
                container.width,
                container.height
            );
            self.state = ImageCaptureState::Idle;
            return None;
        }

        let rect = clamped_rect(origin, event.local, container);
        if !rect.exceeds(min_px) {
            log::trace!(
                "Discarding {}x{} drag below {}px threshold",
                rect.width,
                rect.height,
                min_px
            );
            self.state = ImageCaptureState::Idle;
            return None;
        }

        let pending = PendingSelection {
            payload: PendingPayload::Image(to_percent(rect, container)),
            anchor: event.screen,
        };
        log::debug!("Image region captured: {:?}", rect);
        self.state = ImageCaptureState::Selected(pending.clone());
        Some(pending)
    }

    /// Return to idle after the popup closed or saved
    pub fn reset(&mut self) {
        self.state = ImageCaptureState::Idle;
    }
}

fn clamped_rect(origin: Point, current: Point, container: ContainerSize) -> PixelRect {
    PixelRect::from_corners(container.clamp(origin), container.clamp(current))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: ContainerSize = ContainerSize {
        width: 800.0,
        height: 600.0,
    };

    fn at(x: f32, y: f32) -> PointerEvent {
        // Image container sits at (20, 80) in the viewport
        PointerEvent::new(Point::new(x, y), Point::new(x + 20.0, y + 80.0))
    }

    #[test]
    fn test_drag_produces_percent_rect() {
        let mut capture = ImageCapture::default();
        assert_eq!(capture.pointer_down(at(100.0, 100.0), false), PointerDown::StartDrawing);
        capture.pointer_move(at(200.0, 180.0), CONTAINER);
        let pending = capture.pointer_up(at(300.0, 250.0), CONTAINER, 10.0).unwrap();

        let PendingPayload::Image(pct) = pending.payload else {
            panic!("expected image payload");
        };
        assert!((pct.x - 12.5).abs() < 0.01);
        assert!((pct.y - 16.67).abs() < 0.01);
        assert!((pct.width - 25.0).abs() < 0.01);
        assert!((pct.height - 25.0).abs() < 0.01);
        assert_eq!(pending.anchor, Point::new(320.0, 330.0));
    }

    #[test]
    fn test_live_rect_follows_pointer_backwards() {
        let mut capture = ImageCapture::default();
        capture.pointer_down(at(300.0, 300.0), false);
        capture.pointer_move(at(250.0, 320.0), CONTAINER);
        assert_eq!(capture.live_rect(), Some(PixelRect::new(250.0, 300.0, 50.0, 20.0)));
        capture.pointer_move(at(310.0, 200.0), CONTAINER);
        assert_eq!(capture.live_rect(), Some(PixelRect::new(300.0, 200.0, 10.0, 100.0)));
    }

    #[test]
    fn test_small_drag_is_discarded() {
        let mut capture = ImageCapture::default();
        capture.pointer_down(at(50.0, 50.0), false);
        capture.pointer_move(at(55.0, 53.0), CONTAINER);
        assert!(capture.pointer_up(at(55.0, 53.0), CONTAINER, 10.0).is_none());
        assert_eq!(capture.state(), &ImageCaptureState::Idle);
    }

    #[test]
    fn test_thin_drag_in_one_dimension_is_discarded() {
        let mut capture = ImageCapture::default();
        capture.pointer_down(at(0.0, 0.0), false);
        assert!(capture.pointer_up(at(400.0, 9.0), CONTAINER, 10.0).is_none());
        capture.pointer_down(at(0.0, 0.0), false);
        assert!(capture.pointer_up(at(9.5, 400.0), CONTAINER, 10.0).is_none());
    }

    #[test]
    fn test_pointer_down_with_open_popup_does_not_draw() {
        let mut capture = ImageCapture::default();
        assert_eq!(capture.pointer_down(at(10.0, 10.0), true), PointerDown::ClosePopup);
        assert_eq!(capture.state(), &ImageCaptureState::Idle);
        capture.pointer_move(at(200.0, 200.0), CONTAINER);
        assert!(capture.live_rect().is_none());
        assert!(capture.pointer_up(at(200.0, 200.0), CONTAINER, 10.0).is_none());
    }

    #[test]
    fn test_drag_past_corner_stays_inside_image() {
        let mut capture = ImageCapture::default();
        capture.pointer_down(at(700.0, 500.0), false);
        capture.pointer_move(at(1200.0, 900.0), CONTAINER);
        assert_eq!(capture.live_rect(), Some(PixelRect::new(700.0, 500.0, 100.0, 100.0)));

        let pending = capture.pointer_up(at(1200.0, 900.0), CONTAINER, 10.0).unwrap();
        let PendingPayload::Image(pct) = pending.payload else {
            panic!("expected image payload");
        };
        assert!(pct.x + pct.width <= 100.0 + 1e-4);
        assert!(pct.y + pct.height <= 100.0 + 1e-4);
        assert!((pct.width - 12.5).abs() < 0.01);
        assert!((pct.height - 16.67).abs() < 0.01);
    }

    #[test]
    fn test_drag_mostly_outside_uses_clipped_size_for_threshold() {
        let mut capture = ImageCapture::default();
        capture.pointer_down(at(795.0, 100.0), false);
        // 205px wide on screen but only 5px of it lies over the image
        assert!(capture.pointer_up(at(1000.0, 300.0), CONTAINER, 10.0).is_none());
        assert_eq!(capture.state(), &ImageCaptureState::Idle);
    }

    #[test]
    fn test_empty_container_captures_nothing() {
        let mut capture = ImageCapture::default();
        capture.pointer_down(at(10.0, 10.0), false);
        let empty = ContainerSize::new(0.0, 0.0);
        assert!(capture.pointer_up(at(100.0, 100.0), empty, 10.0).is_none());
        assert_eq!(capture.state(), &ImageCaptureState::Idle);
    }

    #[test]
    fn test_up_without_down_is_ignored() {
        let mut capture = ImageCapture::default();
        assert!(capture.pointer_up(at(200.0, 200.0), CONTAINER, 10.0).is_none());
    }
}
