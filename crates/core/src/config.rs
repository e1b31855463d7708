//! Agent configuration.

use std::time::Duration;

/// Configuration for the decision loop.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// How often a decision cycle runs
    pub monitoring_interval: Duration,

    /// Proposals below this confidence are silently discarded
    pub min_confidence: f64,

    /// Reserved knob, read from configuration but not yet consulted
    pub optimization_threshold: f64,

    /// Upper bound on how long one metrics acquisition may block
    pub sample_timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            monitoring_interval: Duration::from_secs(30),
            min_confidence: 0.75,
            optimization_threshold: 0.15,
            sample_timeout: Duration::from_secs(10),
        }
    }
}
