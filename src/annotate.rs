//! Annotation: rectangle outlines over changed cells.

use crate::diff::DiffResult;
use crate::image::RgbaImageU8;

/// Default highlight color for changed cells.
pub const HIGHLIGHT_RED: [u8; 4] = [255, 0, 0, 255];

/// Draws an unfilled rectangle over every changed cell on a copy of
/// `before` and returns the copy. The source image is never modified;
/// persisting the output is the caller's concern.
pub fn annotate(before: &RgbaImageU8, result: &DiffResult, color: [u8; 4]) -> RgbaImageU8 {
    let mut out = before.clone();
    for cell in &result.changed {
        draw_rect_outline(
            &mut out,
            cell.x,
            cell.y,
            result.layout.block_width,
            result.layout.block_height,
            color,
        );
    }
    out
}

/// Outline with corners `(x, y)` and `(x + w, y + h)`, both inclusive,
/// clipped at the canvas edge.
fn draw_rect_outline(image: &mut RgbaImageU8, x: usize, y: usize, w: usize, h: usize, color: [u8; 4]) {
    if image.width() == 0 || image.height() == 0 {
        return;
    }
    let x1 = (x + w).min(image.width() - 1);
    let y1 = (y + h).min(image.height() - 1);
    for px in x..=x1 {
        image.put_pixel(px, y, color);
        image.put_pixel(px, y1, color);
    }
    for py in y..=y1 {
        image.put_pixel(x, py, color);
        image.put_pixel(x1, py, color);
    }
}
