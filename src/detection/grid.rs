//! Read-only pixel grid abstraction.
//!
//! The detector never decodes images itself. Anything that can answer
//! `width`, `height` and `pixel_at` can be scanned.

use image::{ImageBuffer, Rgb as ImageRgb, Rgba};

/// An (r, g, b) triple.
pub type Rgb = [u8; 3];

/// A width×height grid of RGB pixels, (0, 0) at top-left.
pub trait PixelGrid {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Reads the pixel at (x, y). Callers guarantee `x < width` and `y < height`.
    fn pixel_at(&self, x: u32, y: u32) -> Rgb;
}

/// Unweighted mean of the three channels, truncating.
pub fn brightness(pixel: Rgb) -> u8 {
    ((pixel[0] as u16 + pixel[1] as u16 + pixel[2] as u16) / 3) as u8
}

impl PixelGrid for ImageBuffer<ImageRgb<u8>, Vec<u8>> {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgb {
        self.get_pixel(x, y).0
    }
}

impl PixelGrid for ImageBuffer<Rgba<u8>, Vec<u8>> {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgb {
        let p = self.get_pixel(x, y);
        [p[0], p[1], p[2]]
    }
}

/// A tightly packed RGB buffer, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbGrid {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl RgbGrid {
    /// Creates a grid filled with a single color.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Paints rows `y_start..=y_end` with `color`, clamped to the grid.
    pub fn fill_rows(&mut self, y_start: u32, y_end: u32, color: Rgb) {
        for y in y_start..=y_end.min(self.height.saturating_sub(1)) {
            let row = y as usize * self.width as usize;
            self.pixels[row..row + self.width as usize].fill(color);
        }
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = color;
        }
    }
}

impl PixelGrid for RgbGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgb {
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_truncates() {
        assert_eq!(brightness([67, 67, 67]), 67);
        assert_eq!(brightness([255, 255, 255]), 255);
        // 10 + 10 + 11 = 31, 31 / 3 = 10.33 -> 10
        assert_eq!(brightness([10, 10, 11]), 10);
        // 0 + 0 + 2 = 2 -> 0
        assert_eq!(brightness([0, 0, 2]), 0);
    }

    #[test]
    fn test_rgba_grid_ignores_alpha() {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_fn(4, 2, |x, y| Rgba([x as u8, y as u8, 7, 0]));

        assert_eq!(PixelGrid::width(&img), 4);
        assert_eq!(PixelGrid::height(&img), 2);
        assert_eq!(img.pixel_at(3, 1), [3, 1, 7]);
    }

    #[test]
    fn test_rgb_grid_fill_rows() {
        let mut grid = RgbGrid::filled(3, 5, [255, 255, 255]);
        grid.fill_rows(1, 2, [67, 67, 67]);

        assert_eq!(grid.pixel_at(0, 0), [255, 255, 255]);
        assert_eq!(grid.pixel_at(2, 1), [67, 67, 67]);
        assert_eq!(grid.pixel_at(1, 2), [67, 67, 67]);
        assert_eq!(grid.pixel_at(1, 3), [255, 255, 255]);
    }

    #[test]
    fn test_rgb_grid_fill_rows_clamps() {
        let mut grid = RgbGrid::filled(2, 3, [0, 0, 0]);
        grid.fill_rows(2, 10, [1, 2, 3]);
        assert_eq!(grid.pixel_at(1, 2), [1, 2, 3]);
    }
}
