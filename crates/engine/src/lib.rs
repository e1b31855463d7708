//! Decision rules for the chainopt agent.
//!
//! Everything in this crate is a pure function over a snapshot and the
//! current parameters: trigger evaluation, parameter optimization with
//! confidence scoring, and safety validation. The decision loop wires these
//! together; nothing here holds state.

mod optimizer;
mod safety;
mod trigger;

pub use optimizer::{confidence_for, expected_improvement, optimize, Optimization, NO_ACTION_REASONING};
pub use safety::{validate, MAX_RATIO, MIN_RATIO};
pub use trigger::{evaluate, TriggerReport};

use chainopt_core::ParamSet;

/// Errors from the optimization engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Current parameters hold values that cannot be scaled or compared.
    #[error("current parameters are malformed: {0:?}")]
    InvalidState(ParamSet),
}
