//! # agentguard-core
//!
//! The screening pipeline for AgentGuard.
//!
//! This crate provides:
//! - The trait seams (`RecordValidator`, `RiskPolicy`, `Clock`)
//! - Rolling-window transaction counting
//! - The `Screener` that validates rows, flags them, and aggregates agents
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agentguard_core::{Screener, clock::SystemClock};
//!
//! let screener = Screener::new(Box::new(validator), Box::new(policy), Arc::new(SystemClock));
//! let report = screener.screen(&records);
//! ```

pub mod clock;
pub mod frequency;
pub mod screener;
pub mod traits;

pub use screener::Screener;
