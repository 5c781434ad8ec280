//! Line grouping.
//!
//! Walks a range of rows in scan order, classifies each one, and merges
//! candidate rows into [`LineRegion`]s. Two policies share the same loop:
//!
//! - `Contiguous` reports every band in range. Candidates no further apart
//!   than `max_gap_tolerance` belong to the same line.
//! - `Nearest` additionally ignores candidates within `min_group_separation`
//!   of the last line's anchor row, so the far edge of a thick or fringed line
//!   is not reported as a second line. Pair it with `max_lines` to stop as soon
//!   as the lines closest to the scan origin are known.

use serde::{Deserialize, Serialize};

use super::classifier::RowVerdict;
use super::config::{DetectionConfig, GroupingConfig, GroupingPolicy};
use super::grid::{PixelGrid, Rgb};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanDirection {
    #[default]
    TopDown,
    BottomUp,
}

/// Rows `start..end` visited in `direction` order. `end` may exceed the
/// image height; the scan stops at the bottom row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanRange {
    pub start: u32,
    pub end: u32,
    pub direction: ScanDirection,
}

impl ScanRange {
    pub fn new(start: u32, end: u32, direction: ScanDirection) -> Self {
        Self {
            start,
            end,
            direction,
        }
    }

    /// Every row of an image.
    pub fn full(height: u32, direction: ScanDirection) -> Self {
        Self::new(0, height, direction)
    }

    /// Rows between `a` and `b`, both included, in either order.
    pub fn inclusive(a: u32, b: u32, direction: ScanDirection) -> Self {
        Self::new(a.min(b), a.max(b).saturating_add(1), direction)
    }

    /// The last `count` rows of an image.
    pub fn bottom_rows(height: u32, count: u32, direction: ScanDirection) -> Self {
        Self::new(height.saturating_sub(count), height, direction)
    }

    /// The same range with `end` capped at `height`.
    pub fn clamped(self, height: u32) -> Self {
        Self {
            end: self.end.min(height),
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Row indices in scan order.
    pub fn rows(self) -> impl Iterator<Item = u32> {
        let Self {
            start,
            end,
            direction,
        } = self;
        (start..end).map(move |i| match direction {
            ScanDirection::TopDown => i,
            ScanDirection::BottomUp => end - 1 - (i - start),
        })
    }
}

/// One classified row, as consumed by the grouping pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifiedRow {
    pub y: u32,
    pub verdict: RowVerdict,
    /// Raw pixels retained by the sampler
    pub preview: Vec<Rgb>,
}

/// A detected separator line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRegion {
    pub y_start: u32,
    pub y_end: u32,
    /// `y_end - y_start + 1`
    pub thickness: u32,
    /// Number of candidate rows merged into this line
    pub row_count: u32,
    /// Truncating average of the member rows' mean brightness
    pub mean_brightness: u32,
    /// Pixel sampled from the middle member row, if one was retained
    pub representative_color: Option<Rgb>,
    /// Consistency of the middle member row
    pub consistency_pct: u32,
}

#[derive(Clone, Copy)]
struct Member {
    y: u32,
    mean: u32,
    consistency_pct: u32,
    color: Option<Rgb>,
}

impl Member {
    fn from_row(row: &ClassifiedRow) -> Self {
        Self {
            y: row.y,
            mean: row.verdict.mean,
            consistency_pct: row.verdict.consistency_pct,
            color: row.preview.first().copied(),
        }
    }
}

/// Builds a region from a non-empty member buffer and clears it.
fn close_group(members: &mut Vec<Member>) -> LineRegion {
    members.sort_by_key(|m| m.y);

    let y_start = members[0].y;
    let y_end = members[members.len() - 1].y;
    let row_count = members.len() as u32;
    let mean_brightness = members.iter().map(|m| m.mean).sum::<u32>() / row_count;
    let middle = members[members.len() / 2];

    members.clear();

    LineRegion {
        y_start,
        y_end,
        thickness: y_end - y_start + 1,
        row_count,
        mean_brightness,
        representative_color: middle.color,
        consistency_pct: middle.consistency_pct,
    }
}

/// Groups rows that were already classified, in scan order.
///
/// Lines are returned in the order they were found. Rows must arrive in a
/// monotonic order (all increasing or all decreasing y).
pub fn group_verdicts<I>(rows: I, config: &GroupingConfig) -> Vec<LineRegion>
where
    I: IntoIterator<Item = ClassifiedRow>,
{
    let mut lines = Vec::new();
    if config.max_lines == Some(0) {
        return lines;
    }

    let mut open: Vec<Member> = Vec::new();
    let mut anchor: Option<u32> = None;

    for row in rows {
        // The open group is final once the scan moves past its gap tolerance
        if let (Some(limit), Some(last)) = (config.max_lines, open.last()) {
            if lines.len() + 1 >= limit && last.y.abs_diff(row.y) > config.max_gap_tolerance {
                break;
            }
        }

        if !row.verdict.is_candidate {
            continue;
        }

        let extends_open = open
            .last()
            .is_some_and(|last| last.y.abs_diff(row.y) <= config.max_gap_tolerance);
        if extends_open {
            open.push(Member::from_row(&row));
            continue;
        }

        if config.policy == GroupingPolicy::Nearest
            && anchor.is_some_and(|a| a.abs_diff(row.y) <= config.min_group_separation)
        {
            continue;
        }

        if !open.is_empty() {
            lines.push(close_group(&mut open));
        }
        anchor = Some(row.y);
        open.push(Member::from_row(&row));
    }

    if !open.is_empty() {
        lines.push(close_group(&mut open));
    }

    lines
}

fn classify_logged<G: PixelGrid + ?Sized>(
    grid: &G,
    y: u32,
    config: &DetectionConfig,
) -> Option<ClassifiedRow> {
    match super::classify_row(grid, y, config) {
        Ok((sample, verdict)) => {
            if crate::log_enabled() && config.classifier.in_band(verdict.mean) {
                crate::log(&format!(
                    "  Y={}: brightness={}, consistency={}%, isLine={}",
                    y, verdict.mean, verdict.consistency_pct, verdict.is_candidate
                ));
            }
            Some(ClassifiedRow {
                y,
                verdict,
                preview: sample.preview,
            })
        }
        Err(e) => {
            if crate::log_enabled() {
                crate::log(&format!("Skipping row: {}", e));
            }
            None
        }
    }
}

/// Classifies every row of `range` up front. Rows past the bottom of the
/// grid are never visited.
///
/// Each row is independent of the others, so the result can also be produced
/// piecewise and handed to [`group_verdicts`] in scan order.
pub fn classify_rows<G: PixelGrid + ?Sized>(
    grid: &G,
    range: ScanRange,
    config: &DetectionConfig,
) -> Vec<ClassifiedRow> {
    range
        .clamped(grid.height())
        .rows()
        .filter_map(|y| classify_logged(grid, y, config))
        .collect()
}

/// Scans `range` of `grid` and returns the separator lines found, in scan order.
///
/// Rows are classified lazily, so an early stop via `max_lines` leaves the
/// rest of the range unread.
pub fn group_lines<G: PixelGrid + ?Sized>(
    grid: &G,
    range: ScanRange,
    config: &DetectionConfig,
) -> Vec<LineRegion> {
    let rows = range
        .clamped(grid.height())
        .rows()
        .filter_map(|y| classify_logged(grid, y, config));
    group_verdicts(rows, &config.grouping)
}
