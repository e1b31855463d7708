//! Simulated network for demos and offline runs.

use async_trait::async_trait;
use chainopt_core::{unix_now, NetworkSnapshot};
use rand::Rng;

use crate::{CollectorError, MetricsCollector};

/// Collector that synthesizes plausible network conditions.
///
/// Congestion follows a five-minute sawtooth over a 0.5 baseline so demo
/// runs periodically cross the trigger threshold; the remaining metrics are
/// drawn uniformly from realistic ranges.
#[derive(Debug, Clone, Default)]
pub struct SimulatedCollector;

impl SimulatedCollector {
    /// Create a simulated collector.
    pub fn new() -> Self {
        Self
    }

    fn congestion_at(timestamp: i64) -> f64 {
        let time_factor = (timestamp.rem_euclid(300)) as f64 / 300.0;
        0.5 + time_factor * 0.4
    }
}

#[async_trait]
impl MetricsCollector for SimulatedCollector {
    async fn collect(&self) -> Result<NetworkSnapshot, CollectorError> {
        let timestamp = unix_now();
        let mut rng = rand::thread_rng();

        Ok(NetworkSnapshot {
            timestamp,
            gas_price: rng.gen_range(30.0..180.0),
            tps: rng.gen_range(100..=900),
            block_time: rng.gen_range(1.8..2.5),
            congestion_level: Self::congestion_at(timestamp),
            active_users: rng.gen_range(5_000..=75_000),
        })
    }
}
