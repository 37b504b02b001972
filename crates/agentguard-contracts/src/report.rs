//! Screening run results.
//!
//! A `ScreeningReport` is what the screener hands back after processing one
//! transaction file: a verdict for every row plus a summary per agent.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    risk::{RiskStatus, RowFlags},
    verdict::ValidationVerdict,
};

/// Unique identifier for one screening run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub uuid::Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

/// The screening result for one input row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenedRow {
    /// 1-based position of the row among the data rows of the file.
    pub line: usize,
    /// Raw agent id, if the row had one.
    pub agent_id: Option<String>,
    pub verdict: ValidationVerdict,
    /// Present only for structurally valid rows.
    pub flags: Option<RowFlags>,
    /// Transactions by the same agent inside the frequency window, this one
    /// included. Present only for structurally valid rows.
    pub txns_in_window: Option<u32>,
}

/// Aggregated view of one agent across the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSummary {
    pub agent_id: String,
    pub agent_name: String,
    pub risk_status: RiskStatus,
    /// Valid transactions attributed to this agent.
    pub transactions: usize,
    /// How many of those carry at least one verdict flag.
    pub flagged_transactions: usize,
}

/// Everything produced by one screening run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub run_id: RunId,
    pub generated_at: DateTime<Utc>,
    /// The date `id_expiry` comparisons were made against.
    pub reference_date: NaiveDate,
    /// One entry per input row, in input order.
    pub rows: Vec<ScreenedRow>,
    /// One entry per agent with at least one valid row, sorted by id.
    pub agents: Vec<AgentSummary>,
}

impl ScreeningReport {
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn valid(&self) -> usize {
        self.rows.iter().filter(|r| r.verdict.is_valid).count()
    }

    pub fn invalid(&self) -> usize {
        self.total() - self.valid()
    }

    pub fn flagged(&self) -> usize {
        self.rows.iter().filter(|r| r.verdict.is_flagged).count()
    }

    /// Number of agents with the given rating.
    pub fn agents_with(&self, status: RiskStatus) -> usize {
        self.agents.iter().filter(|a| a.risk_status == status).count()
    }

    /// Every reason recorded against each agent, in row order, without
    /// duplicates. Rows lacking an agent id are grouped under `""`.
    pub fn reasons_by_agent(&self) -> BTreeMap<String, Vec<String>> {
        let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for row in &self.rows {
            if row.verdict.reasons.is_empty() {
                continue;
            }
            let key = row.agent_id.clone().unwrap_or_default();
            let entry = out.entry(key).or_default();
            for reason in &row.verdict.reasons {
                if !entry.contains(reason) {
                    entry.push(reason.clone());
                }
            }
        }
        out
    }
}
