//! Image rendering for annotations using tiny-skia
//!
//! These functions draw image annotations onto an RgbaImage so the marked-up
//! submission can be exported as a single picture.

use std::path::Path;

use anyhow::{Context, Result};
use image::RgbaImage;
use tiny_skia::{LineJoin, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::config::ReviewConfig;
use crate::domain::{Annotation, ContainerSize, to_pixels};

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let (w, h) = (img.width(), img.height());
    let Some(size) = tiny_skia::IntSize::from_wh(w, h) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(img.as_raw().clone(), size) else {
        return;
    };

    f(&mut pixmap);

    // Copy back
    img.copy_from_slice(pixmap.data());
}

/// Draw every image annotation as a tinted, outlined box in its marker color
///
/// Percentage rectangles are resolved against the image's own size. Returns
/// the number of boxes drawn.
pub fn draw_annotations_on_image(
    img: &mut RgbaImage,
    annotations: &[Annotation],
    config: &ReviewConfig,
) -> usize {
    let container = ContainerSize::new(img.width() as f32, img.height() as f32);
    let rects: Vec<_> = annotations
        .iter()
        .filter_map(|a| {
            let px = to_pixels(a.position()?, container);
            // Zero-area boxes would still be stroked as a line or dot
            if !(px.width > 0.0 && px.height > 0.0) {
                return None;
            }
            let rect = Rect::from_xywh(px.x, px.y, px.width, px.height)?;
            Some((rect, config.marker_colors.for_marker(a.marker)))
        })
        .collect();

    if rects.is_empty() {
        return 0;
    }

    let fill_alpha = (config.box_fill_alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    let stroke = Stroke {
        width: config.box_stroke,
        line_join: LineJoin::Miter,
        ..Default::default()
    };

    with_pixmap(img, |pixmap| {
        for (rect, color) in &rects {
            let [r, g, b, a] = color.to_rgba_u8();

            let mut fill = Paint::default();
            fill.set_color_rgba8(r, g, b, fill_alpha);
            fill.anti_alias = true;
            pixmap.fill_rect(*rect, &fill, Transform::identity(), None);

            let path = PathBuilder::from_rect(*rect);
            let mut outline = Paint::default();
            outline.set_color_rgba8(r, g, b, a);
            outline.anti_alias = true;
            pixmap.stroke_path(&path, &outline, &stroke, Transform::identity(), None);
        }
    });

    log::debug!("Flattened {} annotation boxes", rects.len());
    rects.len()
}

/// Load a submission image, draw the annotations on it and save as `dest`
pub fn flatten_submission_image(
    src: &Path,
    dest: &Path,
    annotations: &[Annotation],
    config: &ReviewConfig,
) -> Result<()> {
    let mut img = image::open(src)
        .with_context(|| format!("Failed to open submission image: {}", src.display()))?
        .to_rgba8();
    draw_annotations_on_image(&mut img, annotations, config);
    img.save(dest)
        .with_context(|| format!("Failed to save annotated image: {}", dest.display()))?;
    Ok(())
}
