//! Operating parameters under the agent's watch.

use serde::{Deserialize, Serialize};

/// The three network operating parameters the agent reasons about.
///
/// Exactly one instance is "current" at any time, owned by the decision
/// loop. Proposals carry immutable copies taken at decision time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSet {
    /// Block gas limit
    pub gas_limit: u64,

    /// Target block time in seconds
    pub block_time: f64,

    /// Maximum transactions per second
    pub max_tps: u32,
}

impl ParamSet {
    /// Whether every parameter holds a usable value.
    ///
    /// A set with a zero or non-finite value cannot be scaled or ratio-checked
    /// and is treated as malformed state by the optimization engine.
    pub fn is_well_formed(&self) -> bool {
        self.gas_limit > 0 && self.block_time > 0.0 && self.block_time.is_finite() && self.max_tps > 0
    }
}

impl Default for ParamSet {
    fn default() -> Self {
        Self {
            gas_limit: 30_000_000,
            block_time: 2.0,
            max_tps: 1000,
        }
    }
}
