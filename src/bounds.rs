//! Input area bounds.
//!
//! The scanner reports lines. Which two of them enclose the input box is a
//! policy decision that belongs to the caller; this module collects the
//! policies used so far.

use serde::{Deserialize, Serialize};

use crate::detection::{
    group_lines, DetectionConfig, GroupingPolicy, LineRegion, PixelGrid, ScanDirection, ScanRange,
};

/// Which rows of the two lines become the bounds edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsEdges {
    /// Last row of the upper line to first row of the lower line.
    #[default]
    Inner,
    /// Last row of each line, the rows a bottom-up scan hits first.
    BottomEdges,
}

/// The region between two separator lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    /// Last row of the upper line
    pub top: u32,
    /// First (inner) or last (bottom edges) row of the lower line
    pub bottom: u32,
    /// `bottom - top`
    pub height: u32,
}

impl Bounds {
    /// Inner bounds between two lines given in any order. `None` if they overlap.
    pub fn between(a: &LineRegion, b: &LineRegion) -> Option<Self> {
        Self::between_with(a, b, BoundsEdges::Inner)
    }

    pub fn between_with(a: &LineRegion, b: &LineRegion, edges: BoundsEdges) -> Option<Self> {
        let (upper, lower) = if a.y_start <= b.y_start { (a, b) } else { (b, a) };
        if lower.y_start <= upper.y_end {
            return None;
        }
        let bottom = match edges {
            BoundsEdges::Inner => lower.y_start,
            BoundsEdges::BottomEdges => lower.y_end,
        };
        Some(Self {
            top: upper.y_end,
            bottom,
            height: bottom - upper.y_end,
        })
    }
}

/// How to pick the bounding pair out of a list of lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairSelection {
    /// The first two lines in scan order.
    FirstTwo,
    /// The first pair of consecutive lines whose bounds height lies in range.
    Constrained { min_height: u32, max_height: u32 },
}

pub fn select_pair(lines: &[LineRegion], selection: PairSelection) -> Option<Bounds> {
    select_pair_with(lines, selection, BoundsEdges::Inner)
}

/// Like [`select_pair`], with the height limits applied to `edges` bounds.
pub fn select_pair_with(
    lines: &[LineRegion],
    selection: PairSelection,
    edges: BoundsEdges,
) -> Option<Bounds> {
    match selection {
        PairSelection::FirstTwo => match lines {
            [first, second, ..] => Bounds::between_with(first, second, edges),
            _ => None,
        },
        PairSelection::Constrained {
            min_height,
            max_height,
        } => lines
            .windows(2)
            .filter_map(|pair| Bounds::between_with(&pair[0], &pair[1], edges))
            .find(|b| (min_height..=max_height).contains(&b.height)),
    }
}

/// Search parameters for the bottom-anchored input area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaConfig {
    /// Single-line search window, as fractions of height [top, bottom]
    pub line_window: [f32; 2],
    /// Bottom-line search window, as fractions of height [top, bottom]
    pub area_window: [f32; 2],
    /// Rows skipped above the bottom line before looking for the top line
    pub min_line_separation: u32,
    /// Maximum distance between the bottom line and the top line
    pub max_area_height: u32,
    /// Edge convention for the reported bounds
    pub edges: BoundsEdges,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            line_window: [0.2, 0.8],
            area_window: [0.2, 0.95],
            min_line_separation: 20,
            max_area_height: 200,
            edges: BoundsEdges::Inner,
        }
    }
}

/// Result of [`detect_input_area`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputArea {
    pub top: Option<LineRegion>,
    pub bottom: Option<LineRegion>,
}

impl InputArea {
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds_with(BoundsEdges::Inner)
    }

    pub fn bounds_with(&self, edges: BoundsEdges) -> Option<Bounds> {
        match (&self.top, &self.bottom) {
            (Some(top), Some(bottom)) => Bounds::between_with(top, bottom, edges),
            _ => None,
        }
    }
}

fn window_range(height: u32, window: [f32; 2]) -> ScanRange {
    let top = (height as f32 * window[0]) as u32;
    let bottom = (height as f32 * window[1]) as u32;
    ScanRange::inclusive(top, bottom, ScanDirection::BottomUp)
}

/// The line nearest to the scan origin of `range`.
pub fn first_line<G: PixelGrid + ?Sized>(
    grid: &G,
    range: ScanRange,
    config: &DetectionConfig,
) -> Option<LineRegion> {
    let mut config = config.clone();
    config.grouping.policy = GroupingPolicy::Nearest;
    config.grouping.max_lines = Some(1);
    group_lines(grid, range, &config).into_iter().next()
}

/// Row of the lowest separator inside `area.line_window`, scanning upward.
///
/// Returns the first row hit, i.e. the bottom edge of that line.
pub fn detect_input_line<G: PixelGrid + ?Sized>(
    grid: &G,
    area: &AreaConfig,
    config: &DetectionConfig,
) -> Option<u32> {
    let range = window_range(grid.height(), area.line_window);
    first_line(grid, range, config).map(|line| line.y_end)
}

/// Finds the lines above and below the input box.
///
/// The bottom line is the lowest separator in `area.area_window`. The top line
/// is then searched for upward from `min_line_separation` rows above it, at
/// most `max_area_height` rows away.
pub fn detect_input_area<G: PixelGrid + ?Sized>(
    grid: &G,
    area: &AreaConfig,
    config: &DetectionConfig,
) -> InputArea {
    let height = grid.height();
    let bottom_range = window_range(height, area.area_window);
    crate::log(&format!(
        "Scanning from Y={} to Y={} (height={})",
        bottom_range.end - 1,
        bottom_range.start,
        height
    ));

    let Some(bottom) = first_line(grid, bottom_range, config) else {
        crate::log("Detection result: no bottom line");
        return InputArea::default();
    };
    crate::log(&format!(
        "Bottom line at Y={}-{}",
        bottom.y_start, bottom.y_end
    ));

    let top = match bottom.y_start.checked_sub(area.min_line_separation) {
        Some(search_start) => {
            let search_end = bottom.y_start.saturating_sub(area.max_area_height);
            crate::log(&format!(
                "Searching for TOP line from Y={} to Y={}",
                search_start, search_end
            ));
            let range = ScanRange::inclusive(search_end, search_start, ScanDirection::BottomUp);
            first_line(grid, range, config)
        }
        None => None,
    };

    let result = InputArea {
        top,
        bottom: Some(bottom),
    };
    crate::log(&format!(
        "Detection result: top={:?}, bottom={:?}",
        result.top.as_ref().map(|l| l.y_end),
        result.bottom.as_ref().map(|l| l.y_start)
    ));
    result
}
