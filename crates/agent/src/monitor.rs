//! The decision loop - one sampling/evaluation/optimization cycle per tick.

use chainopt_core::{AgentConfig, ParamSet};
use chainopt_engine::{evaluate, optimize, validate, EngineError};
use chainopt_oracle::MetricsCollector;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::handle::AgentHandle;

/// The periodic decision loop.
///
/// Runs one full cycle per monitoring interval:
/// ```text
/// Sample → Evaluate → (Optimize → Validate)? → Record
/// ```
/// The loop is the only writer of agent state. Proposals it records are
/// advisory; current parameters change only through operator action on the
/// handle.
pub struct DecisionLoop {
    collector: Box<dyn MetricsCollector>,
    handle: AgentHandle,
    config: AgentConfig,
    cycles_run: usize,
}

impl DecisionLoop {
    /// Create a decision loop with default parameters.
    pub fn new(collector: Box<dyn MetricsCollector>, config: AgentConfig) -> Self {
        Self::with_params(collector, config, ParamSet::default())
    }

    /// Create a decision loop starting from the given parameters.
    pub fn with_params(
        collector: Box<dyn MetricsCollector>,
        config: AgentConfig,
        params: ParamSet,
    ) -> Self {
        let handle = AgentHandle::new(params, config.clone());
        Self {
            collector,
            handle,
            config,
            cycles_run: 0,
        }
    }

    /// A cloneable handle onto this agent's state, for queries and transports.
    pub fn handle(&self) -> AgentHandle {
        self.handle.clone()
    }

    /// Run one full decision cycle.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.cycles_run += 1;
        debug!(cycle = self.cycles_run, "starting decision cycle");

        // Sampling. A slow collector is bounded by the configured timeout;
        // a lost tick is retried by the next scheduled one, not here.
        let sampled = tokio::time::timeout(self.config.sample_timeout, self.collector.collect()).await;
        let snapshot = match sampled {
            Ok(Ok(snapshot)) => snapshot,
            Ok(Err(err)) => {
                warn!(%err, "metrics acquisition failed; skipping tick");
                return CycleOutcome::AcquisitionFailed;
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.config.sample_timeout.as_secs(),
                    "metrics acquisition timed out; skipping tick"
                );
                return CycleOutcome::AcquisitionFailed;
            }
        };

        info!(
            gas_price = snapshot.gas_price,
            tps = snapshot.tps,
            congestion = snapshot.congestion_level,
            "sampled network metrics"
        );

        {
            let mut shared = self.handle.shared.write().await;
            shared.last_check = Some(snapshot.timestamp);
        }

        // Evaluating. The snapshot is retained whether or not anything
        // fires; history length counts prior observations only.
        let history_len = self.handle.history.snapshot_count().await;
        let report = evaluate(&snapshot);
        self.handle.history.append_snapshot(snapshot.clone()).await;

        if !report.needs_action {
            debug!("no trigger fired");
            return CycleOutcome::NoActionNeeded;
        }
        warn!(reasons = ?report.reasons, "intervention triggers fired");

        // Optimizing. Current params are cloned once; nothing below holds a
        // lock across the computation.
        let current = self.handle.current_params().await;
        let optimization = match optimize(&snapshot, &current, history_len) {
            Ok(optimization) => optimization,
            Err(err @ EngineError::InvalidState(_)) => {
                error!(%err, "optimization aborted");
                return CycleOutcome::InvalidState;
            }
        };

        if optimization.confidence < self.config.min_confidence {
            debug!(
                confidence = optimization.confidence,
                floor = self.config.min_confidence,
                "confidence below floor; proposal discarded"
            );
            return CycleOutcome::LowConfidence {
                confidence: optimization.confidence,
            };
        }

        // Validating.
        if !validate(&current, &optimization.proposed_params) {
            debug!("proposal rejected by safety validator");
            return CycleOutcome::UnsafeProposal;
        }

        // Recording.
        let proposal = optimization.into_proposal(snapshot.timestamp, &current);
        let proposal_id = proposal.proposal_id.clone();
        info!(
            %proposal_id,
            confidence = proposal.confidence_score,
            improvement = proposal.expected_improvement,
            reasoning = %proposal.reasoning,
            "proposal recorded"
        );
        self.handle.history.append_proposal(proposal).await;

        CycleOutcome::Recorded { proposal_id }
    }

    /// Run cycles until shutdown is signalled.
    ///
    /// Shutdown is only observed between cycles, so an in-flight cycle
    /// always completes before the loop stops.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> anyhow::Result<()> {
        let mut interval = tokio::time::interval(self.config.monitoring_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        info!(
            interval_secs = self.config.monitoring_interval.as_secs(),
            min_confidence = self.config.min_confidence,
            "decision loop started"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.run_cycle().await;
                }
                _ = shutdown.changed() => {
                    info!(cycles = self.cycles_run, "shutdown requested; decision loop stopping");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Cycles run so far.
    pub fn cycles(&self) -> usize {
        self.cycles_run
    }
}

/// Result of a single decision cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// A proposal was accepted and recorded
    Recorded {
        /// Id of the recorded proposal
        proposal_id: String,
    },
    /// No trigger fired; snapshot recorded, nothing else
    NoActionNeeded,
    /// Triggered, but confidence stayed below the floor
    LowConfidence {
        /// The discarded confidence score
        confidence: f64,
    },
    /// Triggered, but the safety validator vetoed the proposal
    UnsafeProposal,
    /// Current parameters were malformed; optimization aborted
    InvalidState,
    /// The sampler failed or timed out; tick skipped
    AcquisitionFailed,
}
