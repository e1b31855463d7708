//! In-memory append-only store.

use std::sync::Arc;

use chainopt_core::{NetworkSnapshot, Proposal};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    snapshots: Vec<NetworkSnapshot>,
    proposals: Vec<Proposal>,
}

/// Append-only store of snapshots and accepted proposals.
///
/// Cloning produces another handle to the same store. The lock is held only
/// for the duration of a single append or read, never across a decision
/// computation, so readers are never blocked for long and can never observe
/// a half-appended proposal.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl HistoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot. Insertion order is chronological order.
    pub async fn append_snapshot(&self, snapshot: NetworkSnapshot) {
        let mut inner = self.inner.write().await;
        inner.snapshots.push(snapshot);
        tracing::debug!(count = inner.snapshots.len(), "snapshot recorded");
    }

    /// Append an accepted proposal. Proposals are never edited or removed.
    pub async fn append_proposal(&self, proposal: Proposal) {
        let mut inner = self.inner.write().await;
        inner.proposals.push(proposal);
        tracing::debug!(count = inner.proposals.len(), "proposal recorded");
    }

    /// Number of snapshots recorded so far.
    pub async fn snapshot_count(&self) -> usize {
        self.inner.read().await.snapshots.len()
    }

    /// Number of proposals recorded so far.
    pub async fn proposal_count(&self) -> usize {
        self.inner.read().await.proposals.len()
    }

    /// Snapshot and proposal counts, read under one lock.
    pub async fn counts(&self) -> (usize, usize) {
        let inner = self.inner.read().await;
        (inner.snapshots.len(), inner.proposals.len())
    }

    /// Most recently recorded snapshot, if any.
    pub async fn latest_snapshot(&self) -> Option<NetworkSnapshot> {
        self.inner.read().await.snapshots.last().cloned()
    }

    /// Most recently accepted proposal, if any.
    pub async fn latest_proposal(&self) -> Option<Proposal> {
        self.inner.read().await.proposals.last().cloned()
    }
}
