//! The chainopt agent - decision loop and read surfaces.
//!
//! Wires the sampler, trigger evaluator, optimization engine, safety
//! validator and history store into one periodic decision loop, and exposes
//! the read-only surfaces (status, latest records, free-text queries, peer
//! proposal intake) that transports adapt to the outside world.

mod handle;
mod monitor;
mod query;
mod report;

pub use handle::{AgentHandle, PeerOutcome};
pub use monitor::{CycleOutcome, DecisionLoop};
pub use query::QueryResponder;
pub use report::render_report;
