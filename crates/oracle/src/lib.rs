//! Metrics acquisition for the chainopt agent.
//!
//! The decision loop never fetches network data itself; it asks a
//! [`MetricsCollector`] for one snapshot per tick. This crate defines that
//! seam plus the two collectors the agent ships with: a simulated network
//! and a JSON-RPC-backed one.

mod collector;
mod rpc;
mod simulated;

pub use collector::{CollectorError, MetricsCollector};
pub use rpc::RpcCollector;
pub use simulated::SimulatedCollector;
