//! # agentguard-verify
//!
//! The row validator for AgentGuard.
//!
//! [`RowValidator`](engine::RowValidator) implements
//! [`RecordValidator`](agentguard_core::traits::RecordValidator): it parses
//! the raw cells of a transaction into a typed record, reporting every
//! malformed field, and then names the compliance risks of a well-formed
//! record. Cell parsers live in [`fields`].

pub mod engine;
pub mod fields;

pub use engine::RowValidator;
