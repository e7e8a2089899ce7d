//! Runtime configuration assembled by the binary from CLI flags / env

use std::time::Duration;

use crate::core::{SnapshotCache, SnapshotLoader, SnapshotSource};
use crate::{DEFAULT_ADDR, DEFAULT_SOURCE, DEFAULT_TIMEOUT_MS};

/// Default `RUST_LOG` directive when none is set
pub const DEFAULT_LOG_FILTER: &str = "sentinel=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelConfig {
    pub source: SnapshotSource,
    pub timeout: Duration,
    pub addr: String,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE, DEFAULT_TIMEOUT_MS, DEFAULT_ADDR)
    }
}

impl SentinelConfig {
    pub fn new(source: &str, timeout_ms: u64, addr: &str) -> Self {
        Self {
            source: SnapshotSource::parse(source),
            timeout: Duration::from_millis(timeout_ms),
            addr: addr.to_string(),
        }
    }

    /// Loader for the configured source
    pub fn loader(&self) -> SnapshotLoader {
        SnapshotLoader::new(self.source.clone(), self.timeout)
    }

    /// Fresh, empty cache for the composition root to own
    pub fn cache(&self) -> SnapshotCache {
        SnapshotCache::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let config = SentinelConfig::default();
        assert_eq!(config.source, SnapshotSource::File(PathBuf::from("website-data.json")));
        assert_eq!(config.timeout, Duration::from_millis(3000));
        assert_eq!(config.addr, "127.0.0.1:3000");
    }

    #[test]
    fn test_http_source() {
        let config = SentinelConfig::new("http://localhost:8080/website-data.json", 500, "0.0.0.0:80");
        assert!(matches!(config.source, SnapshotSource::Http(_)));
        assert_eq!(config.loader().source(), &config.source);
    }
}
