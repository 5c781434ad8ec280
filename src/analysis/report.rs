//! Scan summaries.

use chrono::Local;
use serde::Serialize;

use crate::bounds::{Bounds, InputArea};
use crate::detection::{DetectionConfig, LineRegion};

/// Everything one scan produced, plus the settings that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    /// Local time the report was created (RFC 3339)
    pub generated_at: String,
    pub image_width: u32,
    pub image_height: u32,
    pub config: DetectionConfig,
    /// Lines in scan order
    pub lines: Vec<LineRegion>,
    /// Caller-selected bounding pair, if any
    pub bounds: Option<Bounds>,
    /// Result of the input area search, if one was run
    pub input_area: Option<InputArea>,
}

impl DetectionReport {
    pub fn new(
        image_width: u32,
        image_height: u32,
        config: DetectionConfig,
        lines: Vec<LineRegion>,
    ) -> Self {
        Self {
            generated_at: Local::now().to_rfc3339(),
            image_width,
            image_height,
            config,
            lines,
            bounds: None,
            input_area: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Option<Bounds>) -> Self {
        self.bounds = bounds;
        self
    }

    /// Records an input area search. Bounds follow `config.area.edges`.
    pub fn with_input_area(mut self, area: InputArea) -> Self {
        if self.bounds.is_none() {
            self.bounds = area.bounds_with(self.config.area.edges);
        }
        self.input_area = Some(area);
        self
    }

    /// Console listing, one block per line.
    pub fn describe(&self) -> Vec<String> {
        let mut out = vec![format!(
            "Image size: {}x{}, {} line(s) found",
            self.image_width,
            self.image_height,
            self.lines.len()
        )];

        for (i, line) in self.lines.iter().enumerate() {
            out.push(format!(
                "Line {}: Y={}-{} (thickness={}px)",
                i + 1,
                line.y_start,
                line.y_end,
                line.thickness
            ));
            out.push(format!(
                "         Avg brightness: {}, consistency: {}%",
                line.mean_brightness, line.consistency_pct
            ));
            let sample = match line.representative_color {
                Some([r, g, b]) => format!("({},{},{})", r, g, b),
                None => "N/A".to_string(),
            };
            out.push(format!("         Sample RGB: {}", sample));
        }

        match &self.bounds {
            Some(b) => {
                out.push("Input area bounds:".to_string());
                out.push(format!("  Top: Y={}", b.top));
                out.push(format!("  Bottom: Y={}", b.bottom));
                out.push(format!("  Height: {}px", b.height));
            }
            None if self.input_area.is_some() || self.lines.len() < 2 => {
                out.push("Input area bounds: insufficient lines".to_string());
            }
            None => {}
        }

        out
    }
}
