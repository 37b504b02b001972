//! # agentguard-contracts
//!
//! Shared types for the AgentGuard transaction screening tool.
//!
//! All crates in the workspace import from here. No screening logic lives in
//! this crate: only data definitions and error types.

pub mod error;
pub mod record;
pub mod report;
pub mod risk;
pub mod verdict;
