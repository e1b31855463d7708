//! Agent health status.

use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// A point-in-time summary of what the agent has observed and recommended.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentStatus {
    /// Snapshots recorded so far
    pub snapshot_count: usize,

    /// Proposals accepted so far
    pub proposal_count: usize,

    /// Timestamp of the most recent successful sample, if any
    pub last_check_timestamp: Option<Timestamp>,
}
