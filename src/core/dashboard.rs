//! Dashboard view model
//!
//! Pure assembly of everything the terminal and the API show, from one
//! snapshot plus the current local hour.

use serde::Serialize;
use chrono::{DateTime, Utc};

use crate::{MARKET_OPEN_HOUR, MARKET_CLOSE_HOUR, AFTER_HOURS_END_HOUR};
use crate::core::scorer::{
    asset_ibs_band, asset_rhi_band, classify, classify_indicator, indicator_progress,
    BubblePressureScorer,
};
use crate::types::{Alert, BubblePressure, HeatBand, RiskLevel, Snapshot, Threshold};

/// Trading session by local hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketSession {
    Open,
    AfterHours,
    Closed,
}

impl MarketSession {
    pub fn from_hour(hour: u32) -> Self {
        if (MARKET_OPEN_HOUR..MARKET_CLOSE_HOUR).contains(&hour) {
            MarketSession::Open
        } else if (MARKET_CLOSE_HOUR..AFTER_HOURS_END_HOUR).contains(&hour) {
            MarketSession::AfterHours
        } else {
            MarketSession::Closed
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarketSession::Open => "TRADING",
            MarketSession::AfterHours => "AFTER HOURS",
            MarketSession::Closed => "CLOSED",
        }
    }
}

/// Positioning advice for a pressure band
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub level: RiskLevel,
    pub title: &'static str,
    pub aggressive: &'static str,
    pub conservative: &'static str,
    pub key_action: &'static str,
}

impl Advice {
    pub fn for_level(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Danger => Self {
                level,
                title: "Bubble zone - step back",
                aggressive: "Take profits now and stop chasing. Consider puts as a hedge.",
                conservative: "Scale out, keep 20% to observe. Set hard stops.",
                key_action: "Watch MAG7 earnings calls for \"ROI\" and \"cost control\"",
            },
            RiskLevel::Warning => Self {
                level,
                title: "Alert zone - trade carefully",
                aggressive: "If nuclear names pull back to the 5-day average, take a small bounce position.",
                conservative: "Keep holding URA/COPX, trail stops higher, add nothing.",
                key_action: "Watch intraday NVDA / CEG co-movement; divergence is a warning",
            },
            RiskLevel::Safe => Self {
                level,
                title: "Safe zone - build positions",
                aggressive: "Build second-order infrastructure names, especially quiet ones with RHI < 1.",
                conservative: "Enter in tranches, prefer names with IBS < 0.7.",
                key_action: "Watch for new nuclear PPA announcements",
            },
        }
    }
}

/// Stored pressure as the gauge shows it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PressureGauge {
    pub value: i64,
    pub level: RiskLevel,
    pub zone: &'static str,
}

impl PressureGauge {
    pub fn new(value: i64) -> Self {
        let level = classify(value);
        Self { value, level, zone: level.zone() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorCard {
    pub short_name: String,
    pub name: String,
    pub value: f64,
    pub level: RiskLevel,
    /// Gauge fill, 0-100
    pub progress: f64,
    pub threshold: Threshold,
    pub description: String,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchlistRow {
    pub ticker: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub change_percent: f64,
    pub rhi: f64,
    pub rhi_band: HeatBand,
    pub ibs: f64,
    pub ibs_band: HeatBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendRow {
    pub date: String,
    pub rhi: f64,
    pub ibs: f64,
    pub msr: f64,
    pub bubble_pressure: i64,
    pub level: RiskLevel,
}

/// Everything on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub last_updated: DateTime<Utc>,
    pub session: MarketSession,
    /// Producer's published value
    pub pressure: PressureGauge,
    /// Recomputed from the current RHI/IBS/MSR cards; None if a card is missing
    pub computed: Option<BubblePressure>,
    pub indicators: Vec<IndicatorCard>,
    pub watchlist: Vec<WatchlistRow>,
    pub alerts: Vec<Alert>,
    pub trend: Vec<TrendRow>,
    pub advice: Advice,
}

impl Dashboard {
    /// Assemble from a snapshot; `local_hour` drives the session badge
    pub fn build(snapshot: &Snapshot, local_hour: u32) -> Self {
        let scorer = BubblePressureScorer::new();
        let pressure = PressureGauge::new(snapshot.bubble_pressure);

        let indicators = snapshot
            .sentiment_indicators
            .iter()
            .map(|ind| IndicatorCard {
                short_name: ind.short_name.clone(),
                name: ind.name.clone(),
                value: ind.value,
                level: classify_indicator(ind.value, &ind.threshold),
                progress: indicator_progress(ind.value, &ind.threshold),
                threshold: ind.threshold,
                description: ind.description.clone(),
                interpretation: ind.interpretation.clone(),
            })
            .collect();

        let watchlist = snapshot
            .assets
            .iter()
            .map(|a| WatchlistRow {
                ticker: a.ticker.clone(),
                name: a.name.clone(),
                category: a.category.clone(),
                price: a.price,
                change_percent: a.change_percent,
                rhi: a.rhi,
                rhi_band: asset_rhi_band(a.rhi),
                ibs: a.ibs,
                ibs_band: asset_ibs_band(a.ibs),
            })
            .collect();

        let trend = snapshot
            .trend_data
            .iter()
            .map(|p| TrendRow {
                date: p.date.clone(),
                rhi: p.rhi,
                ibs: p.ibs,
                msr: p.msr,
                bubble_pressure: p.bubble_pressure,
                level: classify(p.bubble_pressure),
            })
            .collect();

        Self {
            last_updated: snapshot.last_updated,
            session: MarketSession::from_hour(local_hour),
            pressure,
            computed: snapshot.reading().map(|r| scorer.score(&r)),
            indicators,
            watchlist,
            alerts: snapshot.alerts.clone(),
            trend,
            advice: Advice::for_level(pressure.level),
        }
    }

    /// Alerts at the given severity
    pub fn alert_count(&self, level: crate::types::AlertLevel) -> usize {
        self.alerts.iter().filter(|a| a.level == level).count()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AlertLevel;

    #[test]
    fn test_market_session_hours() {
        assert_eq!(MarketSession::from_hour(8), MarketSession::Closed);
        assert_eq!(MarketSession::from_hour(9), MarketSession::Open);
        assert_eq!(MarketSession::from_hour(15), MarketSession::Open);
        assert_eq!(MarketSession::from_hour(16), MarketSession::AfterHours);
        assert_eq!(MarketSession::from_hour(20), MarketSession::AfterHours);
        assert_eq!(MarketSession::from_hour(21), MarketSession::Closed);
        assert_eq!(MarketSession::from_hour(0), MarketSession::Closed);
    }

    #[test]
    fn test_builtin_dashboard() {
        let dash = Dashboard::build(&Snapshot::builtin(), 10);

        assert_eq!(dash.session, MarketSession::Open);
        assert_eq!(dash.pressure.value, 52);
        assert_eq!(dash.pressure.level, RiskLevel::Warning);
        assert_eq!(dash.advice.level, RiskLevel::Warning);

        let computed = dash.computed.unwrap();
        assert_eq!(computed.value, 67);
        assert_eq!(computed.level, RiskLevel::Warning);

        let levels: Vec<RiskLevel> = dash.indicators.iter().map(|c| c.level).collect();
        assert_eq!(levels, vec![RiskLevel::Safe, RiskLevel::Warning, RiskLevel::Safe]);

        let nvda = dash.watchlist.iter().find(|r| r.ticker == "NVDA").unwrap();
        assert_eq!(nvda.rhi_band, HeatBand::Warning);
        assert_eq!(nvda.ibs_band, HeatBand::Danger);

        assert_eq!(dash.trend.first().unwrap().level, RiskLevel::Warning);
        assert_eq!(dash.alert_count(AlertLevel::Warning), 2);
        assert_eq!(dash.alert_count(AlertLevel::Info), 4);
    }

    #[test]
    fn test_missing_card_leaves_computed_empty() {
        let mut snap = Snapshot::builtin();
        snap.sentiment_indicators.truncate(2);
        let dash = Dashboard::build(&snap, 22);
        assert!(dash.computed.is_none());
        assert_eq!(dash.indicators.len(), 2);
        assert_eq!(dash.session, MarketSession::Closed);
    }

    #[test]
    fn test_advice_follows_stored_pressure() {
        let mut snap = Snapshot::builtin();
        snap.bubble_pressure = 75;
        let dash = Dashboard::build(&snap, 10);
        assert_eq!(dash.pressure.zone, "BUBBLE ZONE");
        assert_eq!(dash.advice, Advice::for_level(RiskLevel::Danger));
    }
}
