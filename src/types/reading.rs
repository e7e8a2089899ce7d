//! Indicator readings and the composite score

use colored::Colorize;
use serde::{Deserialize, Serialize};
use crate::types::RiskLevel;

/// One observation of the three sentiment indicators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentReading {
    /// Retail Heat Index, usually 0-5
    pub rhi: f64,
    /// Institutional Bullish Skew, a proportion
    pub ibs: f64,
    /// Media Sentiment Ratio, euphoric : alarmist
    pub msr: f64,
}

impl SentimentReading {
    pub fn new(rhi: f64, ibs: f64, msr: f64) -> Self {
        Self { rhi, ibs, msr }
    }
}

/// Per-indicator reference points, strictly decreasing.
///
/// Only `danger` and `warning` take part in classification; `safe` is the
/// "safe below X" label on the card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub danger: f64,
    pub warning: f64,
    pub safe: f64,
}

/// Capped sub-scores on the 0-100 scale, before weighting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub rhi: f64,
    pub ibs: f64,
    pub msr: f64,
}

/// Composite bubble pressure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubblePressure {
    /// Rounded weighted sum; not clamped below 0
    pub value: i64,
    /// Derived from `value` alone
    pub level: RiskLevel,
    pub components: SubScores,
}

impl BubblePressure {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        format!(
            "{} pressure={} | level={} | rhi={:.1} ibs={:.1} msr={:.1}",
            self.level.emoji(),
            self.value,
            self.level,
            self.components.rhi,
            self.components.ibs,
            self.components.msr,
        )
        .color(self.level.color())
        .to_string()
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "pressure={} | level={} | rhi={:.1} | ibs={:.1} | msr={:.1}",
            self.value,
            self.level,
            self.components.rhi,
            self.components.ibs,
            self.components.msr,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parseable_string() {
        let bp = BubblePressure {
            value: 67,
            level: RiskLevel::Warning,
            components: SubScores { rhi: 45.0, ibs: 91.76, msr: 56.0 },
        };
        assert_eq!(
            bp.to_parseable_string(),
            "pressure=67 | level=WARNING | rhi=45.0 | ibs=91.8 | msr=56.0"
        );
    }
}
