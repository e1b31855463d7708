//! Parameter optimization - bounded adjustments with explanations.

use chainopt_core::{NetworkSnapshot, ParamSet, Proposal, Timestamp};

use crate::trigger::{CONGESTION_THRESHOLD, GAS_PRICE_THRESHOLD, TPS_FLOOR};
use crate::EngineError;

/// Explanation emitted when no rule called for an adjustment.
pub const NO_ACTION_REASONING: &str = "No optimization needed";

/// Output of one optimization pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Optimization {
    /// Recommended parameters
    pub proposed_params: ParamSet,

    /// One clause per adjustment made, joined with " | "
    pub reasoning: String,

    /// Trust in the recommendation, grows with observation history
    pub confidence: f64,
}

impl Optimization {
    /// Assemble a full proposal from this optimization.
    pub fn into_proposal(self, timestamp: Timestamp, current: &ParamSet) -> Proposal {
        let expected_improvement = expected_improvement(current, &self.proposed_params);
        Proposal {
            proposal_id: Proposal::derive_id(timestamp, &self.proposed_params),
            timestamp,
            current_params: current.clone(),
            proposed_params: self.proposed_params,
            expected_improvement,
            confidence_score: self.confidence,
            reasoning: self.reasoning,
            proof_reference: None,
        }
    }
}

/// Compute a bounded parameter adjustment for a snapshot.
///
/// Each trigger condition is handled independently. Adjustments scale
/// linearly with how far the metric sits beyond its threshold, so a barely
/// congested network gets a barely changed gas limit. Parameters whose
/// condition did not fire keep their current value.
pub fn optimize(
    snapshot: &NetworkSnapshot,
    current: &ParamSet,
    history_len: usize,
) -> Result<Optimization, EngineError> {
    if !current.is_well_formed() {
        return Err(EngineError::InvalidState(current.clone()));
    }

    let mut proposed = current.clone();
    let mut clauses = Vec::new();

    if snapshot.congestion_level > CONGESTION_THRESHOLD {
        let factor = 1.0 + (snapshot.congestion_level - CONGESTION_THRESHOLD) * 0.5;
        proposed.gas_limit = (current.gas_limit as f64 * factor).round() as u64;
        clauses.push(format!(
            "Congestion at {:.1}% → Increase gas limit by {:.1}%",
            snapshot.congestion_level * 100.0,
            (factor - 1.0) * 100.0
        ));
    }

    if snapshot.gas_price > GAS_PRICE_THRESHOLD {
        // Block-time reduction is capped at 15% however expensive gas gets.
        let factor = (1.0 - (snapshot.gas_price - GAS_PRICE_THRESHOLD) / 1000.0).max(0.85);
        proposed.block_time = current.block_time * factor;
        clauses.push(format!(
            "High gas price ({:.1} Gwei) → Reduce block time by {:.1}%",
            snapshot.gas_price,
            (1.0 - factor) * 100.0
        ));
    }

    if snapshot.tps < TPS_FLOOR {
        let factor = 1.0 + f64::from(TPS_FLOOR - snapshot.tps) / 2000.0;
        proposed.max_tps = (f64::from(current.max_tps) * factor).round() as u32;
        clauses.push(format!(
            "Low throughput ({} TPS) → Increase max TPS by {:.1}%",
            snapshot.tps,
            (factor - 1.0) * 100.0
        ));
    }

    let reasoning = if clauses.is_empty() {
        NO_ACTION_REASONING.to_string()
    } else {
        clauses.join(" | ")
    };

    tracing::debug!(
        history_len,
        confidence = confidence_for(history_len),
        "optimization pass complete"
    );

    Ok(Optimization {
        proposed_params: proposed,
        reasoning,
        confidence: confidence_for(history_len),
    })
}

/// Confidence score for a given amount of prior observation.
///
/// Grows linearly with history and saturates at 0.95 - the engine never
/// claims certainty.
pub fn confidence_for(history_len: usize) -> f64 {
    (0.65 + (history_len as f64 / 50.0) * 0.30).min(0.95)
}

/// Mean absolute relative change across parameters that differ.
pub fn expected_improvement(current: &ParamSet, proposed: &ParamSet) -> f64 {
    let mut changes = Vec::new();

    if proposed.gas_limit != current.gas_limit {
        let delta = proposed.gas_limit as f64 - current.gas_limit as f64;
        changes.push((delta / current.gas_limit as f64).abs());
    }
    if proposed.block_time != current.block_time {
        changes.push(((proposed.block_time - current.block_time) / current.block_time).abs());
    }
    if proposed.max_tps != current.max_tps {
        let delta = f64::from(proposed.max_tps) - f64::from(current.max_tps);
        changes.push((delta / f64::from(current.max_tps)).abs());
    }

    if changes.is_empty() {
        0.0
    } else {
        changes.iter().sum::<f64>() / changes.len() as f64
    }
}
