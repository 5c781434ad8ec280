//! Detection configuration.
//!
//! Every threshold the scanner uses lives here, in one value that is passed
//! into each call. Loads from a JSON file when one is given; missing fields
//! fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::bounds::AreaConfig;

use super::error::DetectError;
use super::grouper::{ScanDirection, ScanRange};

/// Threshold profiles for the row classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Tolerance 15, 90% consistency. Accepts antialiased fringes.
    Standard,
    /// Tolerance 10, 95% consistency.
    Strict,
}

/// Horizontal sampling parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Pixels trimmed from each horizontal edge. `None` = min(50, width / 20)
    pub margin: Option<u32>,
    /// Horizontal step between samples. `None` = max(1, width / 100)
    pub stride: Option<u32>,
    /// Number of raw RGB triples retained per row for color reporting
    pub preview_len: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            margin: None,
            stride: None,
            preview_len: 5,
        }
    }
}

impl SamplerConfig {
    pub fn resolve_margin(&self, width: u32) -> u32 {
        self.margin.unwrap_or_else(|| (width / 20).min(50))
    }

    /// Never returns 0.
    pub fn resolve_stride(&self, width: u32) -> u32 {
        self.stride.unwrap_or(width / 100).max(1)
    }
}

/// Row classification thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// A sample is consistent when |value - mean| < tolerance_band
    pub tolerance_band: u32,
    /// Inclusive [low, high] band the row mean must fall in
    pub brightness_range: [u8; 2],
    /// Minimum percentage of consistent samples
    pub min_consistency_pct: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::profile(Strictness::Standard)
    }
}

impl ClassifierConfig {
    /// Thresholds for a strictness profile, with the separator band
    /// measured from RGB(67,67,67) rules.
    pub fn profile(strictness: Strictness) -> Self {
        let (tolerance_band, min_consistency_pct) = match strictness {
            Strictness::Standard => (15, 90),
            Strictness::Strict => (10, 95),
        };
        Self {
            tolerance_band,
            brightness_range: [55, 80],
            min_consistency_pct,
        }
    }

    pub fn in_band(&self, brightness: u32) -> bool {
        brightness >= self.brightness_range[0] as u32 && brightness <= self.brightness_range[1] as u32
    }
}

/// How candidate rows are merged into lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingPolicy {
    /// Every band in range, adjacent candidates merged.
    Contiguous,
    /// Nearest lines to the scan origin, trailing edges of thick lines suppressed.
    Nearest,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    pub policy: GroupingPolicy,
    /// Max vertical distance between two candidate rows of the same line
    pub max_gap_tolerance: u32,
    /// Min distance from the last anchor before a new line may start (nearest policy)
    pub min_group_separation: u32,
    /// Stop scanning once this many lines are complete
    pub max_lines: Option<usize>,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            policy: GroupingPolicy::Contiguous,
            max_gap_tolerance: 3,
            min_group_separation: 5,
            max_lines: None,
        }
    }
}

/// Which rows to scan when the caller does not pass an explicit range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub direction: ScanDirection,
    /// First row as a fraction of height (0.0 = top)
    pub top_fraction: f32,
    /// End row (exclusive) as a fraction of height (1.0 = bottom)
    pub bottom_fraction: f32,
    /// Explicit first row, overrides `top_fraction`
    pub start_row: Option<u32>,
    /// Explicit end row (exclusive), overrides `bottom_fraction`
    pub end_row: Option<u32>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            direction: ScanDirection::TopDown,
            top_fraction: 0.0,
            bottom_fraction: 1.0,
            start_row: None,
            end_row: None,
        }
    }
}

impl ScanConfig {
    /// Resolves the configured range against an image height.
    pub fn range(&self, height: u32) -> ScanRange {
        let start = self
            .start_row
            .unwrap_or_else(|| (height as f32 * self.top_fraction) as u32);
        let end = self
            .end_row
            .unwrap_or_else(|| (height as f32 * self.bottom_fraction) as u32);
        ScanRange::new(start, end, self.direction)
    }
}

/// Complete detection configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub sampler: SamplerConfig,
    pub classifier: ClassifierConfig,
    pub grouping: GroupingConfig,
    pub scan: ScanConfig,
    pub area: AreaConfig,
}

impl DetectionConfig {
    /// Defaults with the classifier set to a strictness profile.
    pub fn with_strictness(strictness: Strictness) -> Self {
        Self {
            classifier: ClassifierConfig::profile(strictness),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), DetectError> {
        let [low, high] = self.classifier.brightness_range;
        if low > high {
            return Err(DetectError::InvalidConfig(format!(
                "brightness_range low {} exceeds high {}",
                low, high
            )));
        }
        if self.classifier.min_consistency_pct > 100 {
            return Err(DetectError::InvalidConfig(format!(
                "min_consistency_pct {} exceeds 100",
                self.classifier.min_consistency_pct
            )));
        }
        if !(0.0..=1.0).contains(&self.scan.top_fraction)
            || !(0.0..=1.0).contains(&self.scan.bottom_fraction)
        {
            return Err(DetectError::InvalidConfig(
                "scan fractions must lie in 0.0..=1.0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load config from file, or return defaults if file doesn't exist.
    pub fn load(config_path: &Path) -> Self {
        if config_path.exists() {
            match fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str::<DetectionConfig>(&content) {
                    Ok(config) => match config.validate() {
                        Ok(()) => {
                            crate::log(&format!(
                                "Loaded detection config from {}",
                                config_path.display()
                            ));
                            return config;
                        }
                        Err(e) => {
                            crate::log(&format!("{}. Using defaults.", e));
                        }
                    },
                    Err(e) => {
                        crate::log(&format!(
                            "Failed to parse detection config: {}. Using defaults.",
                            e
                        ));
                    }
                },
                Err(e) => {
                    crate::log(&format!(
                        "Failed to read detection config: {}. Using defaults.",
                        e
                    ));
                }
            }
        } else {
            crate::log("Detection config not found. Using defaults.");
        }
        Self::default()
    }

    /// Save default config to file (for reference).
    pub fn save_default(config_path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&Self::default())?;
        fs::write(config_path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_derived_margin_and_stride() {
        let sampler = SamplerConfig::default();
        // 2000 / 20 = 100, capped at 50
        assert_eq!(sampler.resolve_margin(2000), 50);
        assert_eq!(sampler.resolve_margin(400), 20);
        assert_eq!(sampler.resolve_stride(2000), 20);
        // Narrow images still step by at least 1
        assert_eq!(sampler.resolve_stride(50), 1);
    }

    #[test]
    fn test_explicit_zero_stride_is_one() {
        let sampler = SamplerConfig {
            stride: Some(0),
            ..Default::default()
        };
        assert_eq!(sampler.resolve_stride(1000), 1);
    }

    #[test]
    fn test_profiles() {
        let strict = ClassifierConfig::profile(Strictness::Strict);
        assert_eq!(strict.tolerance_band, 10);
        assert_eq!(strict.min_consistency_pct, 95);

        let standard = ClassifierConfig::default();
        assert_eq!(standard.tolerance_band, 15);
        assert_eq!(standard.min_consistency_pct, 90);
        assert_eq!(standard.brightness_range, [55, 80]);
    }

    #[test]
    fn test_scan_config_range() {
        let scan = ScanConfig {
            top_fraction: 0.2,
            bottom_fraction: 0.95,
            ..Default::default()
        };
        let range = scan.range(1000);
        assert_eq!(range.start, 200);
        assert_eq!(range.end, 950);

        let explicit = ScanConfig {
            start_row: Some(700),
            end_row: Some(1000),
            ..Default::default()
        };
        let range = explicit.range(1000);
        assert_eq!(range.start, 700);
        assert_eq!(range.end, 1000);
    }

    #[test]
    fn test_validate_rejects_inverted_band() {
        let mut config = DetectionConfig::default();
        config.classifier.brightness_range = [80, 55];
        assert!(matches!(
            config.validate(),
            Err(DetectError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_partial_json_keeps_defaults() {
        crate::set_log_enabled(false);
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "classifier": {{ "tolerance_band": 10 }}, "grouping": {{ "policy": "nearest" }} }}"#
        )
        .unwrap();

        let config = DetectionConfig::load(file.path());
        assert_eq!(config.classifier.tolerance_band, 10);
        assert_eq!(config.classifier.min_consistency_pct, 90);
        assert_eq!(config.grouping.policy, GroupingPolicy::Nearest);
        assert_eq!(config.grouping.max_gap_tolerance, 3);
    }

    #[test]
    fn test_load_malformed_uses_defaults() {
        crate::set_log_enabled(false);
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert_eq!(DetectionConfig::load(file.path()), DetectionConfig::default());
    }

    #[test]
    fn test_load_missing_uses_defaults() {
        crate::set_log_enabled(false);
        let dir = tempdir().unwrap();
        let config = DetectionConfig::load(&dir.path().join("missing.json"));
        assert_eq!(config, DetectionConfig::default());
    }

    #[test]
    fn test_save_default_round_trips() {
        crate::set_log_enabled(false);
        let dir = tempdir().unwrap();
        let path = dir.path().join("detection_config.json");
        DetectionConfig::save_default(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"tolerance_band\": 15"));
        assert_eq!(DetectionConfig::load(&path), DetectionConfig::default());
    }
}
