//! Free-text query responder.

use crate::handle::AgentHandle;

/// Help text returned for anything the responder does not recognize.
const HELP: &str = "Ask about: status, proposals, or metrics";

/// Answers free-text questions about the agent's state.
///
/// Matching is case-insensitive substring against a fixed, ordered set of
/// intents; the first match wins and unmatched input gets the help text.
/// Reads only - a query can never disturb the decision loop.
#[derive(Debug, Clone)]
pub struct QueryResponder {
    handle: AgentHandle,
}

impl QueryResponder {
    /// Create a responder over the given agent.
    pub fn new(handle: AgentHandle) -> Self {
        Self { handle }
    }

    /// Answer one question.
    pub async fn respond(&self, text: &str) -> String {
        let lowered = text.to_lowercase();

        if lowered.contains("status") || lowered.contains("health") {
            let status = self.handle.status().await;
            return format!(
                "Active. Monitored {} metrics, {} proposals.",
                status.snapshot_count, status.proposal_count
            );
        }

        if lowered.contains("proposal") {
            return match self.handle.latest_proposal().await {
                Some(latest) => format!(
                    "Latest: {} (Confidence: {:.1}%)",
                    latest.reasoning,
                    latest.confidence_score * 100.0
                ),
                None => "No proposals yet.".to_string(),
            };
        }

        if lowered.contains("metrics") {
            return match self.handle.latest_snapshot().await {
                Some(latest) => format!(
                    "Gas={:.1} Gwei, TPS={}, Congestion={:.1}%",
                    latest.gas_price,
                    latest.tps,
                    latest.congestion_level * 100.0
                ),
                None => "No metrics yet.".to_string(),
            };
        }

        HELP.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainopt_core::{AgentConfig, NetworkSnapshot, ParamSet, Proposal};

    fn empty_responder() -> QueryResponder {
        QueryResponder::new(AgentHandle::new(ParamSet::default(), AgentConfig::default()))
    }

    async fn populated_responder() -> QueryResponder {
        let handle = AgentHandle::new(ParamSet::default(), AgentConfig::default());
        handle
            .history()
            .append_snapshot(NetworkSnapshot {
                timestamp: 1_700_000_000,
                gas_price: 150.0,
                tps: 180,
                block_time: 2.2,
                congestion_level: 0.85,
                active_users: 25_000,
            })
            .await;
        let proposed = ParamSet {
            gas_limit: 32_250_000,
            block_time: 1.94,
            max_tps: 1035,
        };
        handle
            .history()
            .append_proposal(Proposal {
                proposal_id: Proposal::derive_id(1_700_000_000, &proposed),
                timestamp: 1_700_000_000,
                current_params: ParamSet::default(),
                proposed_params: proposed,
                expected_improvement: 0.0467,
                confidence_score: 0.77,
                reasoning: "Congestion at 85.0% → Increase gas limit by 7.5%".into(),
                proof_reference: None,
            })
            .await;
        QueryResponder::new(handle)
    }

    #[tokio::test]
    async fn empty_agent_reports_none_yet() {
        let responder = empty_responder();
        assert_eq!(responder.respond("show metrics").await, "No metrics yet.");
        assert_eq!(responder.respond("any proposal?").await, "No proposals yet.");
    }

    #[tokio::test]
    async fn status_reports_counts() {
        let responder = populated_responder().await;
        let answer = responder.respond("What's the status?").await;
        assert!(answer.contains("1 metrics"));
        assert!(answer.contains("1 proposals"));
    }

    #[tokio::test]
    async fn health_is_a_status_synonym() {
        let responder = empty_responder();
        assert!(responder.respond("HEALTH check").await.contains("Monitored"));
    }

    #[tokio::test]
    async fn proposal_answer_carries_confidence_percentage() {
        let responder = populated_responder().await;
        let answer = responder.respond("proposal").await;
        assert!(answer.contains("77.0%"));
        assert!(answer.contains("Congestion at 85.0%"));
    }

    #[tokio::test]
    async fn metrics_answer_summarizes_latest_snapshot() {
        let responder = populated_responder().await;
        let answer = responder.respond("show me the METRICS").await;
        assert!(answer.contains("150.0 Gwei"));
        assert!(answer.contains("TPS=180"));
    }

    #[tokio::test]
    async fn status_wins_over_later_intents() {
        // "status of the latest proposal" mentions two intents; the first in
        // the fixed order answers.
        let responder = populated_responder().await;
        let answer = responder.respond("status of the latest proposal").await;
        assert!(answer.contains("Monitored"));
    }

    #[tokio::test]
    async fn unmatched_input_gets_help() {
        let responder = empty_responder();
        let answer = responder.respond("what is the meaning of life?").await;
        assert_eq!(answer, "Ask about: status, proposals, or metrics");
    }
}
