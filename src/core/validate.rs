//! Structural checks for producer-written snapshot documents
//!
//! Used by `sentinel --check`. Loading never validates: a document that
//! parses is served as-is.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{Snapshot, Threshold, ValidationCode, ValidationIssue, SHORT_IBS, SHORT_MSR, SHORT_RHI};

lazy_static! {
    static ref RE_TICKER: Regex = Regex::new(r"^[A-Z]{1,5}$").unwrap();
    static ref RE_TREND_DATE: Regex = Regex::new(r"^(0[1-9]|1[0-2])/(0[1-9]|[12][0-9]|3[01])$").unwrap();
    static ref RE_ALERT_TIME: Regex = Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap();
}

/// Every issue found, in document order. Empty means valid.
pub fn validate_snapshot(snapshot: &Snapshot) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !(0..=100).contains(&snapshot.bubble_pressure) {
        issues.push(ValidationIssue::new(
            ValidationCode::R207_PRESSURE_RANGE,
            "bubblePressure",
            format!("{} outside 0-100", snapshot.bubble_pressure),
        ));
    }

    for short in [SHORT_RHI, SHORT_IBS, SHORT_MSR] {
        if snapshot.indicator(short).is_none() {
            issues.push(ValidationIssue::new(
                ValidationCode::R205_MISSING_INDICATOR,
                "sentimentIndicators",
                format!("no {} card", short),
            ));
        }
    }

    for (i, ind) in snapshot.sentiment_indicators.iter().enumerate() {
        let path = format!("sentimentIndicators[{}]", i);
        check_finite(&mut issues, &format!("{}.value", path), ind.value);
        check_threshold(&mut issues, &format!("{}.threshold", path), &ind.threshold);
    }

    for (i, asset) in snapshot.assets.iter().enumerate() {
        if !RE_TICKER.is_match(&asset.ticker) {
            issues.push(ValidationIssue::new(
                ValidationCode::R201_BAD_TICKER,
                format!("assets[{}].ticker", i),
                format!("{:?} is not 1-5 uppercase letters", asset.ticker),
            ));
        }
        for (field, value) in [
            ("price", asset.price),
            ("change", asset.change),
            ("changePercent", asset.change_percent),
            ("rhi", asset.rhi),
            ("ibs", asset.ibs),
        ] {
            check_finite(&mut issues, &format!("assets[{}].{}", i, field), value);
        }
    }

    let mut seen_ids = HashSet::new();
    for (i, alert) in snapshot.alerts.iter().enumerate() {
        if !seen_ids.insert(alert.id.as_str()) {
            issues.push(ValidationIssue::new(
                ValidationCode::R206_DUPLICATE_ALERT_ID,
                format!("alerts[{}].id", i),
                format!("id {:?} already used", alert.id),
            ));
        }
        if !RE_ALERT_TIME.is_match(&alert.timestamp) {
            issues.push(ValidationIssue::new(
                ValidationCode::R203_BAD_ALERT_TIME,
                format!("alerts[{}].timestamp", i),
                format!("{:?} is not HH:MM", alert.timestamp),
            ));
        }
        if let Some(ticker) = &alert.ticker {
            if !RE_TICKER.is_match(ticker) {
                issues.push(ValidationIssue::new(
                    ValidationCode::R201_BAD_TICKER,
                    format!("alerts[{}].ticker", i),
                    format!("{:?} is not 1-5 uppercase letters", ticker),
                ));
            }
        }
    }

    for (i, point) in snapshot.trend_data.iter().enumerate() {
        if !RE_TREND_DATE.is_match(&point.date) {
            issues.push(ValidationIssue::new(
                ValidationCode::R202_BAD_TREND_DATE,
                format!("trendData[{}].date", i),
                format!("{:?} is not MM/DD", point.date),
            ));
        }
        if !(0..=100).contains(&point.bubble_pressure) {
            issues.push(ValidationIssue::new(
                ValidationCode::R207_PRESSURE_RANGE,
                format!("trendData[{}].bubblePressure", i),
                format!("{} outside 0-100", point.bubble_pressure),
            ));
        }
    }

    issues
}

fn check_threshold(issues: &mut Vec<ValidationIssue>, path: &str, t: &Threshold) {
    // also false for NaN
    if !(t.danger > t.warning && t.warning > t.safe) {
        issues.push(ValidationIssue::new(
            ValidationCode::R204_THRESHOLD_ORDER,
            path,
            format!("expected danger > warning > safe, got {} / {} / {}", t.danger, t.warning, t.safe),
        ));
    }
}

fn check_finite(issues: &mut Vec<ValidationIssue>, path: &str, value: f64) {
    if !value.is_finite() {
        issues.push(ValidationIssue::new(
            ValidationCode::R208_NON_FINITE,
            path,
            format!("{} is not finite", value),
        ));
    }
}

// =============================================================================
// TESTS
// =============================================================================
