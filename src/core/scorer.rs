//! Bubble pressure scorer
//!
//! pressure = round(0.3·cap(rhi/3.0) + 0.4·cap(ibs/0.85) + 0.3·cap(msr/5.0))
//! where cap(x) = min(x·100, 100), applied from above only.

use crate::{
    WEIGHT_RHI, WEIGHT_IBS, WEIGHT_MSR,
    CEILING_RHI, CEILING_IBS, CEILING_MSR, SUB_SCORE_CAP,
    PRESSURE_DANGER, PRESSURE_WARNING,
    ASSET_RHI_DANGER, ASSET_RHI_WARNING, ASSET_RHI_COLD,
    ASSET_IBS_DANGER, ASSET_IBS_WARNING, ASSET_IBS_DIVERGENT,
    GAUGE_HEADROOM,
};
use crate::types::{BubblePressure, HeatBand, RiskLevel, SentimentReading, SubScores, Threshold};

/// Stateless scorer for the composite and per-indicator bands
#[derive(Debug, Default, Clone, Copy)]
pub struct BubblePressureScorer;

impl BubblePressureScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a reading and attach its band and sub-scores
    pub fn score(&self, reading: &SentimentReading) -> BubblePressure {
        let components = sub_scores(reading);
        let value = round_weighted(&components);
        BubblePressure {
            value,
            level: classify(value),
            components,
        }
    }
}

/// Composite bubble pressure.
///
/// Negative inputs are not rejected and the sum is not clamped at 0.
/// NaN propagates into the sum and saturates to 0 in the integer conversion.
pub fn compute_score(rhi: f64, ibs: f64, msr: f64) -> i64 {
    round_weighted(&sub_scores(&SentimentReading::new(rhi, ibs, msr)))
}

/// Composite band; lower bounds inclusive
pub fn classify(value: i64) -> RiskLevel {
    if value >= PRESSURE_DANGER {
        RiskLevel::Danger
    } else if value >= PRESSURE_WARNING {
        RiskLevel::Warning
    } else {
        RiskLevel::Safe
    }
}

/// Band a single raw indicator. `threshold.safe` is display-only and ignored.
pub fn classify_indicator(value: f64, threshold: &Threshold) -> RiskLevel {
    if value >= threshold.danger {
        RiskLevel::Danger
    } else if value >= threshold.warning {
        RiskLevel::Warning
    } else {
        RiskLevel::Safe
    }
}

/// Indicator gauge fill, 0-100, danger threshold sits at 1/1.2 of full scale
pub fn indicator_progress(value: f64, threshold: &Threshold) -> f64 {
    cap(value / (threshold.danger * GAUGE_HEADROOM) * 100.0)
}

/// Watchlist label for an asset's retail heat
pub fn asset_rhi_band(rhi: f64) -> HeatBand {
    if rhi >= ASSET_RHI_DANGER {
        HeatBand::Danger
    } else if rhi >= ASSET_RHI_WARNING {
        HeatBand::Warning
    } else if rhi < ASSET_RHI_COLD {
        HeatBand::Cold
    } else {
        HeatBand::Normal
    }
}

/// Watchlist label for an asset's institutional skew
pub fn asset_ibs_band(ibs: f64) -> HeatBand {
    if ibs >= ASSET_IBS_DANGER {
        HeatBand::Danger
    } else if ibs >= ASSET_IBS_WARNING {
        HeatBand::Warning
    } else if ibs < ASSET_IBS_DIVERGENT {
        HeatBand::Divergent
    } else {
        HeatBand::Normal
    }
}

fn sub_scores(reading: &SentimentReading) -> SubScores {
    SubScores {
        rhi: sub_score(reading.rhi, CEILING_RHI),
        ibs: sub_score(reading.ibs, CEILING_IBS),
        msr: sub_score(reading.msr, CEILING_MSR),
    }
}

fn sub_score(value: f64, ceiling: f64) -> f64 {
    cap(value / ceiling * 100.0)
}

// `f64::min` would turn NaN into the cap; this keeps it
fn cap(x: f64) -> f64 {
    if x > SUB_SCORE_CAP {
        SUB_SCORE_CAP
    } else {
        x
    }
}

fn round_weighted(s: &SubScores) -> i64 {
    let raw = s.rhi * WEIGHT_RHI + s.ibs * WEIGHT_IBS + s.msr * WEIGHT_MSR;
    // half away from zero; NaN → 0, ±inf saturate
    raw.round() as i64
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_input() {
        assert_eq!(compute_score(0.0, 0.0, 0.0), 0);
        assert_eq!(classify(0), RiskLevel::Safe);
    }

    #[test]
    fn test_ceilings_saturate_to_100() {
        assert_eq!(compute_score(CEILING_RHI, CEILING_IBS, CEILING_MSR), 100);
        assert_eq!(compute_score(4.5, 0.99, 9.0), 100);
        assert_eq!(classify(100), RiskLevel::Danger);
    }

    #[test]
    fn test_shipped_sample_reading() {
        // 13.5 + 36.706 + 16.8
        assert_eq!(compute_score(1.35, 0.78, 2.8), 67);
        assert_eq!(classify(67), RiskLevel::Warning);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(classify(70), RiskLevel::Danger);
        assert_eq!(classify(69), RiskLevel::Warning);
        assert_eq!(classify(40), RiskLevel::Warning);
        assert_eq!(classify(39), RiskLevel::Safe);
        assert_eq!(classify(-5), RiskLevel::Safe);
    }

    #[test]
    fn test_negative_input_not_clamped() {
        // -3.0 rhi → -100 sub-score → -30 term
        assert_eq!(compute_score(-3.0, 0.0, 0.0), -30);
        assert_eq!(classify(compute_score(-3.0, 0.0, 0.0)), RiskLevel::Safe);
    }

    #[test]
    fn test_nan_lands_in_safe() {
        let value = compute_score(f64::NAN, 0.85, 5.0);
        assert_eq!(value, 0);
        assert_eq!(classify(value), RiskLevel::Safe);
    }

    #[test]
    fn test_infinite_input_does_not_panic() {
        assert_eq!(compute_score(f64::INFINITY, 0.0, 0.0), 30);
        assert_eq!(compute_score(f64::NEG_INFINITY, 0.0, 0.0), i64::MIN);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // msr 0.25 → 5.0 sub-score → 1.5 weighted
        assert_eq!(compute_score(0.0, 0.0, 0.25), 2);
        assert_eq!(compute_score(0.0, 0.0, -0.25), -2);
    }

    #[test]
    fn test_score_carries_components() {
        let bp = BubblePressureScorer::new().score(&SentimentReading::new(1.5, 0.425, 6.0));
        assert!((bp.components.rhi - 50.0).abs() < 1e-9);
        assert!((bp.components.ibs - 50.0).abs() < 1e-9);
        assert_eq!(bp.components.msr, 100.0);
        // 15 + 20 + 30
        assert_eq!(bp.value, 65);
        assert_eq!(bp.level, RiskLevel::Warning);
    }

    #[test]
    fn test_classify_indicator_ignores_safe_bound() {
        let t = Threshold { danger: 0.85, warning: 0.70, safe: 0.50 };
        assert_eq!(classify_indicator(0.78, &t), RiskLevel::Warning);
        assert_eq!(classify_indicator(0.85, &t), RiskLevel::Danger);
        // between safe and warning, and below safe: both Safe
        assert_eq!(classify_indicator(0.60, &t), RiskLevel::Safe);
        assert_eq!(classify_indicator(0.10, &t), RiskLevel::Safe);
    }

    #[test]
    fn test_indicator_progress() {
        let t = Threshold { danger: 5.0, warning: 3.0, safe: 1.5 };
        assert!((indicator_progress(3.0, &t) - 50.0).abs() < 1e-9);
        assert_eq!(indicator_progress(7.0, &t), 100.0);
    }

    #[test]
    fn test_asset_bands() {
        assert_eq!(asset_rhi_band(2.8), HeatBand::Warning);
        assert_eq!(asset_rhi_band(3.0), HeatBand::Danger);
        assert_eq!(asset_rhi_band(0.4), HeatBand::Cold);
        assert_eq!(asset_rhi_band(1.2), HeatBand::Normal);
        assert_eq!(asset_ibs_band(0.92), HeatBand::Danger);
        assert_eq!(asset_ibs_band(0.70), HeatBand::Warning);
        assert_eq!(asset_ibs_band(0.15), HeatBand::Divergent);
        assert_eq!(asset_ibs_band(0.65), HeatBand::Normal);
    }
}
