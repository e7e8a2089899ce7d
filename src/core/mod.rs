//! Core modules for Sentinel

pub mod scorer;
pub mod loader;
pub mod validate;
pub mod dashboard;
pub mod render;
pub mod api;

pub use scorer::{
    BubblePressureScorer, compute_score, classify, classify_indicator,
    indicator_progress, asset_rhi_band, asset_ibs_band,
};
pub use loader::{SnapshotSource, SnapshotLoader, SnapshotCache, FetchError};
pub use validate::validate_snapshot;
pub use dashboard::{Dashboard, MarketSession, Advice, PressureGauge, IndicatorCard, WatchlistRow, TrendRow};
pub use render::{render_dashboard, level_badge};
pub use api::{create_router, run_server};
