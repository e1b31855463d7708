//! Trigger evaluation - decides whether a snapshot warrants intervention.

use chainopt_core::NetworkSnapshot;

/// Congestion level above which the network counts as congested.
pub const CONGESTION_THRESHOLD: f64 = 0.7;

/// Gas price above which gas counts as expensive.
pub const GAS_PRICE_THRESHOLD: f64 = 120.0;

/// Throughput below which the network counts as underperforming.
pub const TPS_FLOOR: u32 = 250;

/// Outcome of evaluating a snapshot against the trigger rules.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerReport {
    /// Whether any rule fired
    pub needs_action: bool,

    /// One entry per rule that fired, in rule order
    pub reasons: Vec<String>,
}

/// Evaluate every trigger rule against a snapshot.
///
/// Rules are independent; all matching reasons are collected in a fixed
/// order. Total over all snapshots - there is no error case.
pub fn evaluate(snapshot: &NetworkSnapshot) -> TriggerReport {
    let mut reasons = Vec::new();

    if snapshot.congestion_level > CONGESTION_THRESHOLD {
        reasons.push("high congestion".to_string());
    }
    if snapshot.gas_price > GAS_PRICE_THRESHOLD {
        reasons.push("high gas".to_string());
    }
    if snapshot.tps < TPS_FLOOR {
        reasons.push("low throughput".to_string());
    }

    TriggerReport {
        needs_action: !reasons.is_empty(),
        reasons,
    }
}
