//! RGBA image primitives used by the pack pipeline.
//!
//! All operations work on non-premultiplied `RgbaImage` buffers. Composite
//! is a verbatim overwrite, not source-over blending: sprites arrive here
//! already trimmed, so there are no transparent margins left to blend.

use image::{imageops, Rgba, RgbaImage};

use crate::model::Rect;

const BORDER: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Tightest bounding box of pixels with non-zero alpha, or `None` when the
/// image is fully transparent.
pub fn opaque_bounds(img: &RgbaImage) -> Option<Rect> {
    let (w, h) = img.dimensions();
    let mut x1 = 0u32;
    let mut y1 = 0u32;
    let mut x2 = w.saturating_sub(1);
    let mut y2 = h.saturating_sub(1);
    // left
    while x1 < w {
        if (0..h).any(|y| img.get_pixel(x1, y)[3] != 0) {
            break;
        }
        x1 += 1;
    }
    if x1 >= w {
        return None;
    }
    // right
    while x2 > x1 {
        if (0..h).any(|y| img.get_pixel(x2, y)[3] != 0) {
            break;
        }
        x2 -= 1;
    }
    // top
    while y1 < h {
        if (x1..=x2).any(|x| img.get_pixel(x, y1)[3] != 0) {
            break;
        }
        y1 += 1;
    }
    // bottom
    while y2 > y1 {
        if (x1..=x2).any(|x| img.get_pixel(x, y2)[3] != 0) {
            break;
        }
        y2 -= 1;
    }
    Some(Rect::new(x1, y1, x2 - x1 + 1, y2 - y1 + 1))
}

/// Crop `img` to its opaque bounding box.
///
/// Returns the trimmed image and the top-left offset of the retained region
/// within the original. A fully transparent image comes back unchanged with
/// offset `(0, 0)`.
pub fn trim(img: &RgbaImage) -> (RgbaImage, u32, u32) {
    match opaque_bounds(img) {
        Some(b) => {
            let cropped = imageops::crop_imm(img, b.x, b.y, b.w, b.h).to_image();
            (cropped, b.x, b.y)
        }
        None => (img.clone(), 0, 0),
    }
}

/// Rotate 90 degrees clockwise: `(x, y)` maps to `(h - 1 - y, x)` and the
/// new width equals the old height. The compositor relies on exactly this
/// orientation when placing rotated sprites.
pub fn rotate90(img: &RgbaImage) -> RgbaImage {
    imageops::rotate90(img)
}

/// Copy `src` into `dest` at `(left, top)`, overwriting destination pixels
/// verbatim (no alpha blending). The source must fit:
/// `left + src.w <= dest.w` and `top + src.h <= dest.h`.
pub fn composite(dest: &mut RgbaImage, src: &RgbaImage, left: u32, top: u32) {
    let (dw, dh) = dest.dimensions();
    debug_assert!(left + src.width() <= dw && top + src.height() <= dh);
    for y in 0..src.height() {
        for x in 0..src.width() {
            if left + x < dw && top + y < dh {
                dest.put_pixel(left + x, top + y, *src.get_pixel(x, y));
            }
        }
    }
}

/// Overwrite the outermost row and column of pixels with opaque red.
/// Dimensions are unchanged, so placements computed from the trimmed size
/// stay valid.
pub fn add_border(img: &mut RgbaImage) {
    let (w, h) = img.dimensions();
    for x in 0..w {
        img.put_pixel(x, 0, BORDER);
        img.put_pixel(x, h - 1, BORDER);
    }
    for y in 0..h {
        img.put_pixel(0, y, BORDER);
        img.put_pixel(w - 1, y, BORDER);
    }
}
