//! Snapshot document types
//!
//! The dashboard is fed by one JSON document (camelCase on the wire):
//! - sentiment indicators with their display thresholds
//! - a stored bubble pressure value
//! - the watchlist, the alert log and a short trend series

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::types::{SentimentReading, Threshold};

/// Short names of the three composite inputs
pub const SHORT_RHI: &str = "RHI";
pub const SHORT_IBS: &str = "IBS";
pub const SHORT_MSR: &str = "MSR";

/// The complete dashboard document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Any ISO-8601 date-time; a missing offset is read as UTC
    #[serde(with = "iso8601")]
    pub last_updated: DateTime<Utc>,
    pub sentiment_indicators: Vec<SentimentIndicator>,
    /// Pressure as published by the producer; not recomputed on load
    pub bubble_pressure: i64,
    pub assets: Vec<Asset>,
    pub alerts: Vec<Alert>,
    pub trend_data: Vec<TrendPoint>,
}

/// One indicator card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentIndicator {
    pub name: String,
    pub short_name: String,
    pub value: f64,
    pub threshold: Threshold,
    pub description: String,
    pub interpretation: String,
}

/// Watchlist row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub ticker: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub rhi: f64,
    pub ibs: f64,
}

/// Severity of an alert log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
    Danger,
}

/// Alert log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    /// Wall-clock label such as "09:15"
    pub timestamp: String,
    pub level: AlertLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    pub message: String,
}

/// One day of the trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// "MM/DD"
    pub date: String,
    pub rhi: f64,
    pub ibs: f64,
    pub msr: f64,
    pub bubble_pressure: i64,
}

impl Snapshot {
    /// Look up an indicator by short name (case-sensitive)
    pub fn indicator(&self, short_name: &str) -> Option<&SentimentIndicator> {
        self.sentiment_indicators
            .iter()
            .find(|i| i.short_name == short_name)
    }

    /// Current RHI/IBS/MSR reading, if all three indicators are present
    pub fn reading(&self) -> Option<SentimentReading> {
        Some(SentimentReading::new(
            self.indicator(SHORT_RHI)?.value,
            self.indicator(SHORT_IBS)?.value,
            self.indicator(SHORT_MSR)?.value,
        ))
    }

    /// Built-in document used when no snapshot can be loaded.
    ///
    /// `last_updated` is stamped with the current time.
    pub fn builtin() -> Self {
        Self {
            last_updated: Utc::now(),
            sentiment_indicators: vec![
                indicator(
                    "Retail Heat Index",
                    SHORT_RHI,
                    1.35,
                    (3.0, 2.0, 1.0),
                    "Growth in Reddit/X discussion of second-order AI infrastructure names",
                    "Mild range; retail has not piled in yet",
                ),
                indicator(
                    "Institutional Bullish Skew",
                    SHORT_IBS,
                    0.78,
                    (0.85, 0.70, 0.50),
                    "Share of sell-side analysts raising price targets",
                    "Strong institutional consensus, not yet unanimous",
                ),
                indicator(
                    "Media Sentiment Ratio",
                    SHORT_MSR,
                    2.8,
                    (5.0, 3.0, 1.5),
                    "Ratio of euphoric to doom words in financial news",
                    "Media leans optimistic but is not euphoric",
                ),
            ],
            bubble_pressure: 52,
            assets: vec![
                asset("CEG", "Constellation Energy", "Nuclear", 353.27, -3.86, -1.08, 1.2, 0.88),
                asset("VST", "Vistra Corp", "Nuclear", 178.45, 2.34, 1.33, 1.5, 0.82),
                asset("FCX", "Freeport-McMoRan", "Copper", 42.18, 0.56, 1.35, 0.8, 0.65),
                asset("URA", "Global X Uranium ETF", "Uranium", 31.24, -0.28, -0.89, 0.6, 0.70),
                asset("VRT", "Vertiv Holdings", "Grid", 142.67, 3.21, 2.30, 1.8, 0.78),
                asset("NVDA", "NVIDIA Corp", "Compute", 148.92, -1.23, -0.82, 2.8, 0.92),
            ],
            alerts: vec![
                alert("1", "09:15", AlertLevel::Info, Some("VRT"), "VRT volume 1.3x its 20-day average"),
                alert("2", "09:32", AlertLevel::Warning, Some("NVDA"), "NVDA RHI nearing 2.8, retail heat rising"),
                alert("3", "10:05", AlertLevel::Info, None, "MAG7 earnings week ahead, raise risk-management weight"),
                alert("4", "10:28", AlertLevel::Info, Some("CEG"), "CEG median analyst target raised to $407"),
                alert("5", "11:15", AlertLevel::Warning, None, "Composite IBS reached 0.78, institutional consensus converging"),
                alert("6", "11:45", AlertLevel::Info, Some("FCX"), "LME copper inventory still falling, FCX fundamentals improving"),
            ],
            trend_data: vec![
                trend("12/29", 1.1, 0.72, 2.2, 42),
                trend("12/30", 1.2, 0.74, 2.4, 45),
                trend("12/31", 1.3, 0.76, 2.5, 48),
                trend("01/01", 1.25, 0.75, 2.6, 47),
                trend("01/02", 1.3, 0.77, 2.7, 50),
                trend("01/03", 1.32, 0.78, 2.75, 51),
                trend("01/04", 1.35, 0.78, 2.8, 52),
            ],
        }
    }
}

fn indicator(
    name: &str,
    short_name: &str,
    value: f64,
    (danger, warning, safe): (f64, f64, f64),
    description: &str,
    interpretation: &str,
) -> SentimentIndicator {
    SentimentIndicator {
        name: name.to_string(),
        short_name: short_name.to_string(),
        value,
        threshold: Threshold { danger, warning, safe },
        description: description.to_string(),
        interpretation: interpretation.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn asset(
    ticker: &str,
    name: &str,
    category: &str,
    price: f64,
    change: f64,
    change_percent: f64,
    rhi: f64,
    ibs: f64,
) -> Asset {
    Asset {
        ticker: ticker.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price,
        change,
        change_percent,
        rhi,
        ibs,
    }
}

fn alert(id: &str, timestamp: &str, level: AlertLevel, ticker: Option<&str>, message: &str) -> Alert {
    Alert {
        id: id.to_string(),
        timestamp: timestamp.to_string(),
        level,
        ticker: ticker.map(String::from),
        message: message.to_string(),
    }
}

fn trend(date: &str, rhi: f64, ibs: f64, msr: f64, bubble_pressure: i64) -> TrendPoint {
    TrendPoint {
        date: date.to_string(),
        rhi,
        ibs,
        msr,
        bubble_pressure,
    }
}

/// `lastUpdated` codec: writes RFC 3339, reads RFC 3339 or offset-less ISO-8601
mod iso8601 {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| de::Error::custom(format!("{:?} is not an ISO-8601 timestamp", raw)))
    }
}

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a producer timestamp. Offset-less values and bare dates are taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
