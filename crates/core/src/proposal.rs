//! Optimization proposals - recommended parameter changes.

use serde::{Deserialize, Serialize};

use crate::{ParamSet, Timestamp};

/// A recommended, safety-checked change to the operating parameters.
///
/// Proposals are advisory: the agent records them but never applies them to
/// its own current parameters. Once accepted into history a proposal is
/// immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    /// Content-derived identifier, stable for identical inputs
    pub proposal_id: String,

    /// When the proposal was generated
    pub timestamp: Timestamp,

    /// Parameters in effect when the decision was made
    pub current_params: ParamSet,

    /// Recommended parameters
    pub proposed_params: ParamSet,

    /// Mean absolute relative change across adjusted parameters
    pub expected_improvement: f64,

    /// Trust in the recommendation, 0.0 to 1.0
    pub confidence_score: f64,

    /// Human-readable account of every adjustment made
    pub reasoning: String,

    /// Reference filled in by an external proof verifier, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_reference: Option<String>,
}

impl Proposal {
    /// Derive the content-hash identifier for a proposal.
    ///
    /// Hashes the generation timestamp together with the proposed parameter
    /// values, truncated to 16 hex characters. Identical inputs always yield
    /// the same id.
    pub fn derive_id(timestamp: Timestamp, proposed: &ParamSet) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&timestamp.to_le_bytes());
        hasher.update(&proposed.gas_limit.to_le_bytes());
        hasher.update(&proposed.block_time.to_le_bytes());
        hasher.update(&proposed.max_tps.to_le_bytes());
        let hash = hasher.finalize();
        hash.to_hex()[..16].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_id_is_deterministic() {
        let params = ParamSet::default();
        let a = Proposal::derive_id(1_700_000_000, &params);
        let b = Proposal::derive_id(1_700_000_000, &params);
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn derive_id_changes_with_params() {
        let base = ParamSet::default();
        let tweaked = ParamSet {
            gas_limit: base.gas_limit + 1,
            ..base.clone()
        };
        assert_ne!(
            Proposal::derive_id(1_700_000_000, &base),
            Proposal::derive_id(1_700_000_000, &tweaked)
        );
    }

    #[test]
    fn proof_reference_absent_by_default_in_json() {
        let proposal = Proposal {
            proposal_id: "abc".into(),
            timestamp: 0,
            current_params: ParamSet::default(),
            proposed_params: ParamSet::default(),
            expected_improvement: 0.0,
            confidence_score: 0.8,
            reasoning: "No optimization needed".into(),
            proof_reference: None,
        };
        let json = serde_json::to_string(&proposal).unwrap();
        assert!(!json.contains("proof_reference"));
    }
}
