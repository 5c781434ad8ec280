//! Row sampling.
//!
//! Reads a sparse, evenly spaced set of pixels from one row and reduces each
//! to its brightness.

use super::config::SamplerConfig;
use super::error::DetectError;
use super::grid::{brightness, PixelGrid, Rgb};

/// Brightness samples from one image row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowSample {
    /// Row index the samples were read from
    pub y: u32,
    /// Brightness of each sampled pixel, left to right
    pub values: Vec<u8>,
    /// First few raw pixels, capped at `SamplerConfig::preview_len`
    pub preview: Vec<Rgb>,
}

impl RowSample {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Samples row `y` of `grid`.
///
/// Walks x from `margin` to `width - margin` (exclusive) in steps of `stride`.
/// An image narrower than twice the margin yields an empty sample.
pub fn sample_row<G: PixelGrid + ?Sized>(
    grid: &G,
    y: u32,
    config: &SamplerConfig,
) -> Result<RowSample, DetectError> {
    let height = grid.height();
    if y >= height {
        return Err(DetectError::RowOutOfRange { y, height });
    }

    let width = grid.width();
    let margin = config.resolve_margin(width);
    let stride = config.resolve_stride(width);
    let end = width.saturating_sub(margin);

    let mut values = Vec::new();
    let mut preview = Vec::with_capacity(config.preview_len);

    for x in (margin..end).step_by(stride as usize) {
        let pixel = grid.pixel_at(x, y);
        values.push(brightness(pixel));
        if preview.len() < config.preview_len {
            preview.push(pixel);
        }
    }

    Ok(RowSample { y, values, preview })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::grid::RgbGrid;
    use image::{ImageBuffer, Rgb as ImageRgb};

    #[test]
    fn test_sample_count_with_derived_defaults() {
        // width 100: margin = min(50, 5) = 5, stride = 1 -> x in 5..95
        let grid = RgbGrid::filled(100, 10, [67, 67, 67]);
        let sample = sample_row(&grid, 3, &SamplerConfig::default()).unwrap();

        assert_eq!(sample.y, 3);
        assert_eq!(sample.len(), 90);
        assert!(sample.values.iter().all(|&v| v == 67));
        assert_eq!(sample.preview.len(), 5);
    }

    #[test]
    fn test_sample_positions_follow_stride() {
        // Brightness encodes x so the sampled columns are visible
        let img: ImageBuffer<ImageRgb<u8>, Vec<u8>> =
            ImageBuffer::from_fn(30, 2, |x, _| ImageRgb([x as u8, x as u8, x as u8]));
        let config = SamplerConfig {
            margin: Some(4),
            stride: Some(5),
            preview_len: 2,
        };

        let sample = sample_row(&img, 1, &config).unwrap();
        assert_eq!(sample.values, vec![4, 9, 14, 19, 24]);
        assert_eq!(sample.preview, vec![[4, 4, 4], [9, 9, 9]]);
    }

    #[test]
    fn test_out_of_range_row() {
        let grid = RgbGrid::filled(10, 4, [0, 0, 0]);
        let err = sample_row(&grid, 4, &SamplerConfig::default()).unwrap_err();
        assert_eq!(err, DetectError::RowOutOfRange { y: 4, height: 4 });
    }

    #[test]
    fn test_narrow_image_yields_empty_sample() {
        let grid = RgbGrid::filled(8, 2, [67, 67, 67]);
        let config = SamplerConfig {
            margin: Some(4),
            ..Default::default()
        };
        let sample = sample_row(&grid, 0, &config).unwrap();
        assert!(sample.is_empty());
        assert!(sample.preview.is_empty());
    }

    #[test]
    fn test_zero_preview_len() {
        let grid = RgbGrid::filled(100, 1, [67, 67, 67]);
        let config = SamplerConfig {
            preview_len: 0,
            ..Default::default()
        };
        let sample = sample_row(&grid, 0, &config).unwrap();
        assert_eq!(sample.len(), 90);
        assert!(sample.preview.is_empty());
    }
}
