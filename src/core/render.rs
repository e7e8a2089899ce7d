//! Terminal rendering
//!
//! Color is controlled globally through `colored::control`; callers disable it
//! for `--no-color` before rendering.

use std::fmt;

use colored::Colorize;

use crate::core::dashboard::{Dashboard, MarketSession};
use crate::types::{AlertLevel, HeatBand, RiskLevel};

const RULE: &str = "──────────────────────────────────────────────────────────────";

/// Full dashboard as a multi-line block
pub fn render_dashboard(dash: &Dashboard, verbose: bool) -> String {
    DashboardView { dash, verbose }.to_string()
}

/// Terminal layout of a dashboard
pub struct DashboardView<'a> {
    pub dash: &'a Dashboard,
    pub verbose: bool,
}

impl fmt::Display for DashboardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.status_bar(f)?;
        self.gauge(f)?;
        self.indicators(f)?;
        self.watchlist(f)?;
        self.trend(f)?;
        self.alerts(f)?;
        self.advice(f)
    }
}

impl DashboardView<'_> {
    fn status_bar(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dash = self.dash;
        let session = match dash.session {
            MarketSession::Open => dash.session.label().green(),
            MarketSession::AfterHours => dash.session.label().yellow(),
            MarketSession::Closed => dash.session.label().dimmed(),
        };
        writeln!(f, "{}", RULE)?;
        writeln!(
            f,
            "{}  v{}  │ market: {} │ alerts: {} {} │ updated {}",
            "AI SPECULATION SENTINEL".bold(),
            crate::VERSION,
            session,
            format!("{} danger", dash.alert_count(AlertLevel::Danger)).red(),
            format!("{} warn", dash.alert_count(AlertLevel::Warning)).yellow(),
            dash.last_updated.format("%Y-%m-%d %H:%M:%S UTC"),
        )?;
        writeln!(f, "{}", RULE)
    }

    fn gauge(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pressure = &self.dash.pressure;
        let color = pressure.level.color();
        writeln!(
            f,
            "BUBBLE PRESSURE  {}  {}",
            format!("{:>3} {}", pressure.value, bar(pressure.value as f64, 30)).color(color),
            pressure.zone.color(color).bold(),
        )?;
        if let Some(computed) = &self.dash.computed {
            if self.verbose || computed.value != pressure.value {
                writeln!(
                    f,
                    "  recomputed from cards: {} ({})",
                    computed.value.to_string().color(computed.level.color()),
                    computed.level,
                )?;
            }
        }
        writeln!(f)
    }

    fn indicators(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.dash.indicators {
            writeln!(
                f,
                "{:<4} {:>6.2}  {}  {}  (safe <{} / warn >{} / danger >{})",
                card.short_name.bold(),
                card.value,
                bar(card.progress, 20).color(card.level.color()),
                card.level.to_string().color(card.level.color()),
                card.threshold.safe,
                card.threshold.warning,
                card.threshold.danger,
            )?;
            if self.verbose {
                writeln!(f, "     {}", card.description.dimmed())?;
                writeln!(f, "     {}", card.interpretation.italic())?;
            }
        }
        writeln!(f)
    }

    fn watchlist(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "WATCHLIST".bold())?;
        for row in &self.dash.watchlist {
            let change = format!("{:+.2}%", row.change_percent);
            let change = if row.change_percent > 0.0 {
                change.green()
            } else if row.change_percent < 0.0 {
                change.red()
            } else {
                change.dimmed()
            };
            writeln!(
                f,
                "  {:<5} {:<10} {:>9.2} {:>8}  RHI {:>4.1} {:<11} IBS {:>4.2} {}",
                row.ticker.bold(),
                row.category,
                row.price,
                change,
                row.rhi,
                band_label_rhi(row.rhi_band).color(row.rhi_band.color()),
                row.ibs,
                band_label_ibs(row.ibs_band).color(row.ibs_band.color()),
            )?;
        }
        writeln!(f)
    }

    fn trend(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "TREND".bold())?;
        for point in &self.dash.trend {
            writeln!(
                f,
                "  {}  {:>3} {}",
                point.date,
                point.bubble_pressure,
                bar(point.bubble_pressure as f64, 25).color(point.level.color()),
            )?;
        }
        writeln!(f)
    }

    fn alerts(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "ALERTS".bold())?;
        for alert in &self.dash.alerts {
            let tag = match alert.level {
                AlertLevel::Info => "INFO".blue(),
                AlertLevel::Warning => "WARN".yellow(),
                AlertLevel::Danger => "DANG".red(),
            };
            writeln!(f, "  {} {} {}", alert.timestamp.dimmed(), tag, alert.message)?;
        }
        writeln!(f)
    }

    fn advice(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let advice = &self.dash.advice;
        writeln!(f, "{}", advice.title.color(advice.level.color()).bold())?;
        writeln!(f, "  aggressive:   {}", advice.aggressive)?;
        writeln!(f, "  conservative: {}", advice.conservative)?;
        writeln!(f, "  key action:   {}", advice.key_action)?;
        write!(f, "{}", RULE)
    }
}

/// One-line level badge, e.g. for `--rhi/--ibs/--msr` scoring
pub fn level_badge(level: RiskLevel) -> String {
    format!("{} {}", level.emoji(), level.zone())
        .color(level.color())
        .bold()
        .to_string()
}

fn bar(percent: f64, width: usize) -> String {
    let clamped = if percent.is_finite() { percent.clamp(0.0, 100.0) } else { 0.0 };
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn band_label_rhi(band: HeatBand) -> &'static str {
    match band {
        HeatBand::Danger => "overheated",
        HeatBand::Warning => "heating up",
        HeatBand::Cold => "quiet",
        _ => "mild",
    }
}

fn band_label_ibs(band: HeatBand) -> &'static str {
    match band {
        HeatBand::Danger => "extreme",
        HeatBand::Warning => "high",
        HeatBand::Divergent => "split",
        _ => "moderate",
    }
}
