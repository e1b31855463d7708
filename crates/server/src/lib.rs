//! HTTP adapter for the chainopt agent.
//!
//! A thin axum surface over [`AgentHandle`]: status, latest records, peer
//! proposal intake and the chat-style query endpoint. Handlers only read or
//! append through the handle's own locks, so they never block the decision
//! loop.

mod routes;

pub use routes::{router, serve};
