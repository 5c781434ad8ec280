//! Row classification.
//!
//! A row is a separator candidate when its samples are uniform and their mean
//! brightness falls inside the configured band. All arithmetic is integer
//! and truncating so band edges agree with the calibration thresholds.

use super::config::ClassifierConfig;
use super::sampler::RowSample;

/// Classification of one sampled row.
#[derive(Clone, Debug, PartialEq)]
pub struct RowVerdict {
    /// Truncating mean of the sampled brightness values
    pub mean: u32,
    /// Fraction of samples within tolerance of the mean (0.0-1.0)
    pub consistency: f64,
    /// `consistent * 100 / count`, truncating
    pub consistency_pct: u32,
    pub is_candidate: bool,
}

impl RowVerdict {
    fn empty() -> Self {
        Self {
            mean: 0,
            consistency: 0.0,
            consistency_pct: 0,
            is_candidate: false,
        }
    }
}

/// Reduces a row sample to a verdict.
pub fn classify(sample: &RowSample, config: &ClassifierConfig) -> RowVerdict {
    let count = sample.values.len() as u32;
    if count == 0 {
        return RowVerdict::empty();
    }

    let sum: u32 = sample.values.iter().map(|&v| v as u32).sum();
    let mean = sum / count;

    let consistent = sample
        .values
        .iter()
        .filter(|&&v| (v as u32).abs_diff(mean) < config.tolerance_band)
        .count() as u32;

    let is_candidate =
        config.in_band(mean) && consistent * 100 >= config.min_consistency_pct * count;

    RowVerdict {
        mean,
        consistency: consistent as f64 / count as f64,
        consistency_pct: consistent * 100 / count,
        is_candidate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::config::Strictness;

    fn sample_of(values: Vec<u8>) -> RowSample {
        RowSample {
            y: 0,
            values,
            preview: Vec::new(),
        }
    }

    fn strict() -> ClassifierConfig {
        ClassifierConfig::profile(Strictness::Strict)
    }

    #[test]
    fn test_empty_sample_is_not_candidate() {
        let verdict = classify(&RowSample::default(), &strict());
        assert_eq!(verdict.mean, 0);
        assert_eq!(verdict.consistency, 0.0);
        assert!(!verdict.is_candidate);
    }

    #[test]
    fn test_uniform_row_fully_consistent() {
        // Any tolerance >= 1 counts identical values as consistent
        for tolerance_band in [1, 10, 15, 200] {
            let config = ClassifierConfig {
                tolerance_band,
                ..strict()
            };
            let verdict = classify(&sample_of(vec![67; 40]), &config);
            assert_eq!(verdict.consistency, 1.0);
            assert_eq!(verdict.consistency_pct, 100);
            assert_eq!(verdict.mean, 67);
            assert!(verdict.is_candidate);
        }
    }

    #[test]
    fn test_uniform_bright_row_out_of_band() {
        let verdict = classify(&sample_of(vec![255; 40]), &strict());
        assert_eq!(verdict.consistency, 1.0);
        assert!(!verdict.is_candidate);
    }

    #[test]
    fn test_split_row_has_zero_consistency() {
        // Half 60, half 90: mean 75 lies in band but neither cluster is within 10 of it
        let mut values = vec![60; 20];
        values.extend(vec![90; 20]);
        let verdict = classify(&sample_of(values), &strict());

        assert_eq!(verdict.mean, 75);
        assert_eq!(verdict.consistency, 0.0);
        assert!(!verdict.is_candidate);
    }

    #[test]
    fn test_alternating_row_consistency_is_cluster_fraction() {
        // 30 samples at 67, 10 at 120 (gap 53 > 2 * 15): mean = 3210 / 40 = 80
        // |67 - 80| = 13 < 15, so only the 67 cluster counts
        let mut values = vec![67; 30];
        values.extend(vec![120; 10]);
        let verdict = classify(&sample_of(values), &ClassifierConfig::default());

        assert_eq!(verdict.mean, 80);
        assert_eq!(verdict.consistency, 0.75);
        assert_eq!(verdict.consistency_pct, 75);
        assert!(verdict.consistency < 1.0);
        assert!(!verdict.is_candidate);
    }

    #[test]
    fn test_mean_truncates() {
        // (55 + 56) / 2 = 55.5 -> 55, still inside the band
        let verdict = classify(&sample_of(vec![55, 56]), &strict());
        assert_eq!(verdict.mean, 55);
        assert!(verdict.is_candidate);

        // (80 + 81) / 2 = 80.5 -> 80, still inside the band
        let verdict = classify(&sample_of(vec![80, 81]), &strict());
        assert_eq!(verdict.mean, 80);
        assert!(verdict.is_candidate);

        // (53 + 56) / 2 = 54.5 -> 54, outside
        let verdict = classify(&sample_of(vec![53, 56]), &strict());
        assert_eq!(verdict.mean, 54);
        assert!(!verdict.is_candidate);
    }

    #[test]
    fn test_consistency_threshold_edge() {
        // 19 of 20 consistent = exactly 95%
        let mut values = vec![67; 19];
        values.push(0);
        // mean = (67 * 19) / 20 = 1273 / 20 = 63
        let verdict = classify(&sample_of(values.clone()), &strict());
        assert_eq!(verdict.mean, 63);
        assert_eq!(verdict.consistency_pct, 95);
        assert!(verdict.is_candidate);

        // 18 of 20 = 90%, rejected by the strict profile
        values[18] = 0;
        let verdict = classify(&sample_of(values), &strict());
        assert_eq!(verdict.consistency_pct, 90);
        assert!(!verdict.is_candidate);
    }

    #[test]
    fn test_tolerance_is_exclusive() {
        // mean 70, deviation exactly 10 does not count with tolerance 10
        let verdict = classify(&sample_of(vec![60, 80]), &strict());
        assert_eq!(verdict.mean, 70);
        assert_eq!(verdict.consistency, 0.0);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let sample = sample_of(vec![60, 67, 70, 90, 66, 64]);
        let config = ClassifierConfig::default();
        assert_eq!(classify(&sample, &config), classify(&sample, &config));
    }
}
