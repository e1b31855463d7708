//! Shared read surface over the agent's state.

use std::sync::Arc;

use chainopt_core::{AgentConfig, AgentStatus, NetworkSnapshot, ParamSet, Proposal, Timestamp};
use chainopt_history::HistoryStore;
use tokio::sync::RwLock;

#[derive(Debug)]
pub(crate) struct SharedState {
    pub(crate) current_params: ParamSet,
    pub(crate) last_check: Option<Timestamp>,
}

/// Outcome of offering a peer proposal to the agent.
#[derive(Debug, Clone, PartialEq)]
pub enum PeerOutcome {
    /// Proposal passed the confidence gate and safety validation
    Accepted {
        /// Id of the accepted proposal
        proposal_id: String,
    },
    /// Confidence below the agent's minimum; discarded
    LowConfidence {
        /// The proposal's confidence score
        confidence: f64,
    },
    /// A parameter ratio fell outside the safety bounds; discarded
    Unsafe,
}

/// Cloneable handle for reading agent state.
///
/// The decision loop writes through its own copy; queries, status reporting
/// and transports read through theirs. All access goes through locks held
/// only for the single read or append.
#[derive(Debug, Clone)]
pub struct AgentHandle {
    pub(crate) history: HistoryStore,
    pub(crate) shared: Arc<RwLock<SharedState>>,
    pub(crate) config: AgentConfig,
}

impl AgentHandle {
    pub fn new(params: ParamSet, config: AgentConfig) -> Self {
        Self {
            history: HistoryStore::new(),
            shared: Arc::new(RwLock::new(SharedState {
                current_params: params,
                last_check: None,
            })),
            config,
        }
    }

    /// The history store backing this agent.
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Parameters currently in effect.
    pub async fn current_params(&self) -> ParamSet {
        self.shared.read().await.current_params.clone()
    }

    /// Replace the current parameters. This is the explicit operator action;
    /// the agent never applies its own proposals.
    pub async fn replace_params(&self, params: ParamSet) {
        let mut shared = self.shared.write().await;
        tracing::info!(?params, "operator replaced current parameters");
        shared.current_params = params;
    }

    /// Point-in-time agent status.
    pub async fn status(&self) -> AgentStatus {
        let (snapshot_count, proposal_count) = self.history.counts().await;
        let last_check = self.shared.read().await.last_check;
        AgentStatus {
            snapshot_count,
            proposal_count,
            last_check_timestamp: last_check,
        }
    }

    /// Most recent snapshot, if any.
    pub async fn latest_snapshot(&self) -> Option<NetworkSnapshot> {
        self.history.latest_snapshot().await
    }

    /// Most recent accepted proposal, if any.
    pub async fn latest_proposal(&self) -> Option<Proposal> {
        self.history.latest_proposal().await
    }

    /// Offer a proposal received from a peer agent.
    ///
    /// Applies exactly the acceptance pipeline used for locally generated
    /// proposals: the confidence gate first, then safety validation against
    /// this agent's own current parameters.
    pub async fn submit_peer_proposal(&self, proposal: Proposal) -> PeerOutcome {
        if proposal.confidence_score < self.config.min_confidence {
            tracing::debug!(
                proposal_id = %proposal.proposal_id,
                confidence = proposal.confidence_score,
                "peer proposal below confidence floor"
            );
            return PeerOutcome::LowConfidence {
                confidence: proposal.confidence_score,
            };
        }

        let current = self.current_params().await;
        if !chainopt_engine::validate(&current, &proposal.proposed_params) {
            tracing::debug!(proposal_id = %proposal.proposal_id, "peer proposal unsafe");
            return PeerOutcome::Unsafe;
        }

        let proposal_id = proposal.proposal_id.clone();
        tracing::info!(%proposal_id, "peer proposal accepted");
        self.history.append_proposal(proposal).await;
        PeerOutcome::Accepted { proposal_id }
    }
}
