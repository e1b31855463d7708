//! Collector abstraction.

use async_trait::async_trait;
use chainopt_core::NetworkSnapshot;

/// Errors that can occur while acquiring metrics.
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    /// Transport-level failure reaching the metrics source
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The source answered with something that is not a usable snapshot
    #[error("malformed metrics payload: {0}")]
    Decode(String),

    /// The source is reachable but currently has no data
    #[error("metrics source unavailable: {0}")]
    Unavailable(String),
}

/// Source of network health observations.
///
/// One logical call per decision tick. Implementations own their retry and
/// backoff policy; the decision loop only bounds how long a call may block
/// and skips the tick on failure.
#[async_trait]
pub trait MetricsCollector: Send + Sync {
    /// Acquire one snapshot of current network health.
    async fn collect(&self) -> Result<NetworkSnapshot, CollectorError>;
}
