//! Network health observations.

use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// One timestamped observation of network health.
///
/// Snapshots are created once per sampling tick and never mutated; after a
/// tick they are owned by the history store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// When the observation was taken
    pub timestamp: Timestamp,

    /// Gas price in price units per gas unit
    pub gas_price: f64,

    /// Transactions per second
    pub tps: u32,

    /// Average block time in seconds
    pub block_time: f64,

    /// Congestion level, 0.0 (idle) to 1.0 (saturated)
    pub congestion_level: f64,

    /// Active users observed on the network
    pub active_users: u64,
}
