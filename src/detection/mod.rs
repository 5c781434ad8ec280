//! Separator line detection.
//!
//! This module provides:
//! - Pixel grid access (`PixelGrid`) over decoded screenshots
//! - Per-row brightness sampling (`sample_row`)
//! - Row classification against the separator thresholds (`classify`)
//! - Grouping of candidate rows into line regions (`group_lines`)

pub mod classifier;
pub mod config;
pub mod error;
pub mod grid;
pub mod grouper;
pub mod sampler;

pub use classifier::{classify, RowVerdict};
pub use config::{
    ClassifierConfig, DetectionConfig, GroupingConfig, GroupingPolicy, SamplerConfig, ScanConfig,
    Strictness,
};
pub use error::DetectError;
pub use grid::{brightness, PixelGrid, Rgb, RgbGrid};
pub use grouper::{
    classify_rows, group_lines, group_verdicts, ClassifiedRow, LineRegion, ScanDirection,
    ScanRange,
};
pub use sampler::{sample_row, RowSample};

/// Samples and classifies a single row.
///
/// Returns an error only when `y` lies outside the grid.
pub fn classify_row<G: PixelGrid + ?Sized>(
    grid: &G,
    y: u32,
    config: &DetectionConfig,
) -> Result<(RowSample, RowVerdict), DetectError> {
    let sample = sample_row(grid, y, &config.sampler)?;
    let verdict = classify(&sample, &config.classifier);
    Ok((sample, verdict))
}

/// Scans the rows selected by `config.scan` and returns the lines found.
pub fn detect_lines<G: PixelGrid + ?Sized>(grid: &G, config: &DetectionConfig) -> Vec<LineRegion> {
    let range = config.scan.range(grid.height());
    crate::log(&format!(
        "Scanning rows {}..{} ({:?}) of {}x{} image",
        range.start,
        range.end,
        range.direction,
        grid.width(),
        grid.height()
    ));
    let lines = group_lines(grid, range, config);
    crate::log(&format!("Found {} separator line(s)", lines.len()));
    lines
}
