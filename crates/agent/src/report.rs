//! Human-readable proposal reports.

use std::fmt::Write;

use chainopt_core::Proposal;

/// Render a multi-line report of one proposal.
///
/// Lists every parameter that would change with its relative move, plus the
/// scores. Used by the CLI after simulated runs and by the HTTP surface when
/// a caller asks for the report form.
pub fn render_report(proposal: &Proposal) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Proposal {}", proposal.proposal_id);
    let _ = writeln!(out, "Reasoning: {}", proposal.reasoning);
    let _ = writeln!(out, "Proposed changes:");

    let current = &proposal.current_params;
    let proposed = &proposal.proposed_params;

    if proposed.gas_limit != current.gas_limit {
        let change = percent_change(current.gas_limit as f64, proposed.gas_limit as f64);
        let _ = writeln!(
            out,
            "  gas_limit: {} -> {} ({:+.1}%)",
            current.gas_limit, proposed.gas_limit, change
        );
    }
    if proposed.block_time != current.block_time {
        let change = percent_change(current.block_time, proposed.block_time);
        let _ = writeln!(
            out,
            "  block_time: {:.2} -> {:.2} ({:+.1}%)",
            current.block_time, proposed.block_time, change
        );
    }
    if proposed.max_tps != current.max_tps {
        let change = percent_change(f64::from(current.max_tps), f64::from(proposed.max_tps));
        let _ = writeln!(
            out,
            "  max_tps: {} -> {} ({:+.1}%)",
            current.max_tps, proposed.max_tps, change
        );
    }
    if proposed == current {
        let _ = writeln!(out, "  (none)");
    }

    let _ = writeln!(out, "Confidence: {:.1}%", proposal.confidence_score * 100.0);
    let _ = write!(
        out,
        "Expected improvement: {:.2}%",
        proposal.expected_improvement * 100.0
    );
    out
}

fn percent_change(current: f64, proposed: f64) -> f64 {
    (proposed - current) / current * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainopt_core::ParamSet;

    #[test]
    fn report_lists_changed_parameters_with_moves() {
        let current = ParamSet::default();
        let proposed = ParamSet {
            gas_limit: 32_250_000,
            block_time: 1.94,
            max_tps: 1035,
        };
        let proposal = Proposal {
            proposal_id: Proposal::derive_id(1_700_000_000, &proposed),
            timestamp: 1_700_000_000,
            current_params: current,
            proposed_params: proposed,
            expected_improvement: 0.0467,
            confidence_score: 0.77,
            reasoning: "Congestion at 85.0% → Increase gas limit by 7.5%".into(),
            proof_reference: None,
        };

        let report = render_report(&proposal);
        assert!(report.contains("30000000 -> 32250000 (+7.5%)"));
        assert!(report.contains("2.00 -> 1.94 (-3.0%)"));
        assert!(report.contains("1000 -> 1035 (+3.5%)"));
        assert!(report.contains("Confidence: 77.0%"));
        assert!(report.contains("Expected improvement: 4.67%"));
    }

    #[test]
    fn unchanged_proposal_reports_no_moves() {
        let params = ParamSet::default();
        let proposal = Proposal {
            proposal_id: "deadbeefdeadbeef".into(),
            timestamp: 0,
            current_params: params.clone(),
            proposed_params: params,
            expected_improvement: 0.0,
            confidence_score: 0.8,
            reasoning: "No optimization needed".into(),
            proof_reference: None,
        };
        assert!(render_report(&proposal).contains("(none)"));
    }
}
