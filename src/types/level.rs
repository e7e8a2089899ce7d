//! Risk level definitions

use colored::Color;
use serde::{Deserialize, Serialize};

/// Three-level risk band shared by the composite score and single indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Below the warning breakpoint
    Safe,
    /// At or above warning, below danger
    Warning,
    /// At or above the danger breakpoint
    Danger,
}

impl RiskLevel {
    /// Terminal color for this level
    pub fn color(&self) -> Color {
        match self {
            RiskLevel::Safe => Color::Green,
            RiskLevel::Warning => Color::Yellow,
            RiskLevel::Danger => Color::Red,
        }
    }

    /// Zone label shown under the gauge
    pub fn zone(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "SAFE ZONE",
            RiskLevel::Warning => "ALERT ZONE",
            RiskLevel::Danger => "BUBBLE ZONE",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "🟢",
            RiskLevel::Warning => "🟠",
            RiskLevel::Danger => "🔴",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RiskLevel::Safe => "SAFE",
            RiskLevel::Warning => "WARNING",
            RiskLevel::Danger => "DANGER",
        };
        write!(f, "{}", name)
    }
}

/// Watchlist heat label; adds a band below "normal" that the composite lacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatBand {
    /// RHI below 0.5: nobody is talking about it
    Cold,
    /// IBS below 0.20: analysts disagree
    Divergent,
    Normal,
    Warning,
    Danger,
}

impl HeatBand {
    pub fn color(&self) -> Color {
        match self {
            HeatBand::Cold => Color::Blue,
            HeatBand::Divergent => Color::Magenta,
            HeatBand::Normal => Color::Green,
            HeatBand::Warning => Color::Yellow,
            HeatBand::Danger => Color::Red,
        }
    }
}
