//! # agentguard-ingest
//!
//! File boundary of AgentGuard: reads transaction CSV files into
//! `TransactionRecord`s and writes screening results back out as CSV.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agentguard_ingest::{read_path, write_agent_summary};
//!
//! let records = read_path(Path::new("uploads/july.csv"))?;
//! let report = screener.screen(&records);
//! write_agent_summary(std::io::stdout(), &report)?;
//! ```

pub mod reader;
pub mod writer;

pub use reader::{read_path, read_records};
pub use writer::{write_agent_summary, write_row_verdicts};
