//! chainopt core data models.
//!
//! This crate defines the fundamental data structures that power the
//! network-parameter optimization agent.

#![warn(missing_docs)]

// Observations
mod metrics;

// Operating parameters and proposals
mod params;
mod proposal;

// Agent configuration and status
mod config;
mod status;

// Re-exports
pub use metrics::NetworkSnapshot;
pub use params::ParamSet;
pub use proposal::Proposal;
pub use config::AgentConfig;
pub use status::AgentStatus;

/// Unix timestamp in whole seconds.
pub type Timestamp = i64;

/// Current unix timestamp.
pub fn unix_now() -> Timestamp {
    chrono::Utc::now().timestamp()
}
