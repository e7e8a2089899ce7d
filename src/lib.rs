//! Sentinel: AI speculation bubble pressure scoring
//!
//! Three sentiment indicators (RHI, IBS, MSR) → weighted composite → risk band,
//! plus the snapshot loader, dashboard assembly and HTTP API around it.

pub mod config;
pub mod core;
pub mod types;

// =============================================================================
// COMPOSITE WEIGHTS [C] - sum = 1.0
// =============================================================================

/// Weight of the Retail Heat Index sub-score
pub const WEIGHT_RHI: f64 = 0.3;

/// Weight of the Institutional Bullish Skew sub-score
pub const WEIGHT_IBS: f64 = 0.4;

/// Weight of the Media Sentiment Ratio sub-score
pub const WEIGHT_MSR: f64 = 0.3;

// =============================================================================
// CEILINGS [C] - raw value at which a sub-score saturates at 100
// =============================================================================

pub const CEILING_RHI: f64 = 3.0;
pub const CEILING_IBS: f64 = 0.85;
pub const CEILING_MSR: f64 = 5.0;

/// Sub-score cap (0-100 scale)
pub const SUB_SCORE_CAP: f64 = 100.0;

// =============================================================================
// COMPOSITE BANDS [C] - lower bound inclusive
// =============================================================================

/// Composite score at or above which pressure is DANGER
pub const PRESSURE_DANGER: i64 = 70;

/// Composite score at or above which pressure is WARNING
pub const PRESSURE_WARNING: i64 = 40;

// =============================================================================
// WATCHLIST BANDS [C] - per-asset heat labels
// =============================================================================

pub const ASSET_RHI_DANGER: f64 = 3.0;
pub const ASSET_RHI_WARNING: f64 = 2.0;
/// Below this an asset's retail heat is "quiet"
pub const ASSET_RHI_COLD: f64 = 0.5;

pub const ASSET_IBS_DANGER: f64 = 0.85;
pub const ASSET_IBS_WARNING: f64 = 0.70;
/// Below this institutional views are split
pub const ASSET_IBS_DIVERGENT: f64 = 0.20;

/// Indicator gauge spans danger threshold plus 20% headroom
pub const GAUGE_HEADROOM: f64 = 1.2;

// =============================================================================
// MARKET SESSION [C] - local hours, end exclusive
// =============================================================================

pub const MARKET_OPEN_HOUR: u32 = 9;
pub const MARKET_CLOSE_HOUR: u32 = 16;
pub const AFTER_HOURS_END_HOUR: u32 = 21;

// =============================================================================
// DEFAULTS
// =============================================================================

/// Default snapshot location
pub const DEFAULT_SOURCE: &str = "website-data.json";

/// Default HTTP fetch timeout (milliseconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 3_000;

/// Default API bind address
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
