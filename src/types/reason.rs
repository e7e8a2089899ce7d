//! Reason codes for snapshot loading and validation

use serde::{Deserialize, Serialize};

/// Outcome of a snapshot load, logged alongside the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum LoadReason {
    // =========================================================================
    // R10x: Served
    // =========================================================================
    /// Document fetched and parsed
    R101_LOADED,
    /// Served from cache, no I/O
    R102_CACHE_HIT,

    // =========================================================================
    // R11x: Fallback to built-in document
    // =========================================================================
    /// File missing or unreadable
    R110_FALLBACK_IO,
    /// Connection, DNS or timeout failure
    R111_FALLBACK_NETWORK,
    /// Server answered with a non-success status
    R112_FALLBACK_STATUS,
    /// Body was not a valid snapshot document
    R113_FALLBACK_PARSE,
}

impl LoadReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R101_LOADED => "R101_LOADED",
            Self::R102_CACHE_HIT => "R102_CACHE_HIT",
            Self::R110_FALLBACK_IO => "R110_FALLBACK_IO",
            Self::R111_FALLBACK_NETWORK => "R111_FALLBACK_NETWORK",
            Self::R112_FALLBACK_STATUS => "R112_FALLBACK_STATUS",
            Self::R113_FALLBACK_PARSE => "R113_FALLBACK_PARSE",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R101_LOADED => "Snapshot loaded",
            Self::R102_CACHE_HIT => "Snapshot served from cache",
            Self::R110_FALLBACK_IO => "Snapshot unreadable, using defaults",
            Self::R111_FALLBACK_NETWORK => "Snapshot unreachable, using defaults",
            Self::R112_FALLBACK_STATUS => "Snapshot request rejected, using defaults",
            Self::R113_FALLBACK_PARSE => "Snapshot malformed, using defaults",
        }
    }
}

impl std::fmt::Display for LoadReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// Structural problems found in a snapshot document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ValidationCode {
    /// Ticker is not 1-5 uppercase letters
    R201_BAD_TICKER,
    /// Trend date is not MM/DD
    R202_BAD_TREND_DATE,
    /// Alert timestamp is not HH:MM
    R203_BAD_ALERT_TIME,
    /// Threshold is not strictly decreasing danger > warning > safe
    R204_THRESHOLD_ORDER,
    /// RHI, IBS or MSR card missing
    R205_MISSING_INDICATOR,
    /// Two alerts share an id
    R206_DUPLICATE_ALERT_ID,
    /// Stored pressure outside 0-100
    R207_PRESSURE_RANGE,
    /// Non-finite number where a value is expected
    R208_NON_FINITE,
}

impl ValidationCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::R201_BAD_TICKER => "R201_BAD_TICKER",
            Self::R202_BAD_TREND_DATE => "R202_BAD_TREND_DATE",
            Self::R203_BAD_ALERT_TIME => "R203_BAD_ALERT_TIME",
            Self::R204_THRESHOLD_ORDER => "R204_THRESHOLD_ORDER",
            Self::R205_MISSING_INDICATOR => "R205_MISSING_INDICATOR",
            Self::R206_DUPLICATE_ALERT_ID => "R206_DUPLICATE_ALERT_ID",
            Self::R207_PRESSURE_RANGE => "R207_PRESSURE_RANGE",
            Self::R208_NON_FINITE => "R208_NON_FINITE",
        }
    }
}

impl std::fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One finding from `validate_snapshot`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub code: ValidationCode,
    /// Where in the document, e.g. `assets[2].ticker`
    pub path: String,
    pub detail: String,
}

impl ValidationIssue {
    pub fn new(code: ValidationCode, path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}: {}", self.code, self.path, self.detail)
    }
}
