//! Core types for Sentinel

mod level;
mod reading;
mod reason;
mod snapshot;

pub use level::{RiskLevel, HeatBand};
pub use reading::{SentimentReading, Threshold, SubScores, BubblePressure};
pub use reason::{LoadReason, ValidationCode, ValidationIssue};
pub use snapshot::{
    Snapshot, SentimentIndicator, Asset, Alert, AlertLevel, TrendPoint,
    SHORT_RHI, SHORT_IBS, SHORT_MSR,
};
