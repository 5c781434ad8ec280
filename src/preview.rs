//! Preview rendering for detection results.
//!
//! Outlines detected lines and the selected bounds on a copy of the
//! screenshot so thresholds can be checked by eye.

use anyhow::{Context, Result};
use image::{ImageBuffer, Rgb};
use std::path::Path;

use crate::bounds::Bounds;
use crate::detection::LineRegion;

/// Color constants for preview rendering.
pub const COLOR_LINE: Rgb<u8> = Rgb([255, 0, 0]); // Red
pub const COLOR_BOUNDS: Rgb<u8> = Rgb([255, 255, 0]); // Yellow

/// Renders lines and bounds onto a screenshot.
///
/// Each line gets a one-pixel box just outside its rows. Bounds are drawn as
/// a two-pixel box spanning the rows between the two lines.
pub fn render_preview(
    screenshot: &ImageBuffer<Rgb<u8>, Vec<u8>>,
    lines: &[LineRegion],
    bounds: Option<&Bounds>,
) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    let mut img = screenshot.clone();
    let width = img.width();

    for line in lines {
        let y = line.y_start.saturating_sub(1);
        let h = line.y_end + 2 - y;
        draw_rect(&mut img, 0, y, width, h, COLOR_LINE, 1);
    }

    if let Some(b) = bounds {
        if b.height > 1 {
            draw_rect(&mut img, 0, b.top + 1, width, b.height - 1, COLOR_BOUNDS, 2);
        }
    }

    img
}

/// Saves a preview image, creating parent directories as needed.
pub fn save_preview(img: &ImageBuffer<Rgb<u8>, Vec<u8>>, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create directory: {}", parent.display()))?;
    }
    img.save(path)
        .context(format!("Failed to save preview: {}", path.display()))?;
    Ok(())
}

/// Draws a rectangle border on an image. Pixels outside the image are dropped.
pub fn draw_rect(
    img: &mut ImageBuffer<Rgb<u8>, Vec<u8>>,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    color: Rgb<u8>,
    thickness: u32,
) {
    let (img_w, img_h) = img.dimensions();
    let mut put = |px: u32, py: u32| {
        if px < img_w && py < img_h {
            img.put_pixel(px, py, color);
        }
    };

    for d in 0..thickness.min(h) {
        for dx in 0..w {
            // Top and bottom edges
            put(x + dx, y + d);
            put(x + dx, y + h - 1 - d);
        }
    }

    for d in 0..thickness.min(w) {
        for dy in 0..h {
            // Left and right edges
            put(x + d, y + dy);
            put(x + w - 1 - d, y + dy);
        }
    }
}
