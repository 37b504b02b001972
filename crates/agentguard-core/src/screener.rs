//! The screener: runs a whole transaction file through the pipeline.
//!
//!   rows → validate → (valid rows) flag → window counts → agent ratings
//!
//! Invalid rows get a verdict and nothing else. Only valid rows carry
//! flags and contribute to an agent's rating.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use agentguard_contracts::{
    record::{ParsedRecord, TransactionRecord},
    report::{AgentSummary, RunId, ScreenedRow, ScreeningReport},
    risk::RowFlags,
};

use crate::{
    frequency::count_in_window,
    traits::{Clock, RecordValidator, RiskPolicy},
};

/// Drives one screening run per call to `screen()`.
///
/// The validator, policy and clock are shared and stateless, so one
/// screener can serve any number of runs.
pub struct Screener {
    validator: Box<dyn RecordValidator>,
    policy: Box<dyn RiskPolicy>,
    clock: Arc<dyn Clock>,
}

impl Screener {
    pub fn new(
        validator: Box<dyn RecordValidator>,
        policy: Box<dyn RiskPolicy>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { validator, policy, clock }
    }

    /// Screen `records` and build the report.
    ///
    /// The reference date is read from the clock once, so every row in the
    /// run is judged against the same day.
    pub fn screen(&self, records: &[TransactionRecord]) -> ScreeningReport {
        let run_id = RunId::new();
        let today = self.clock.today();

        info!(
            run_id = %run_id.0,
            rows = records.len(),
            reference_date = %today,
            "screening started"
        );

        // ── Pass 1: per-row verdicts ─────────────────────────────────────────
        let mut rows: Vec<ScreenedRow> = Vec::with_capacity(records.len());
        let mut parsed: Vec<Option<ParsedRecord>> = Vec::with_capacity(records.len());

        for (idx, record) in records.iter().enumerate() {
            let line = idx + 1;
            let (verdict, typed) = self.validator.inspect(record, today);

            debug!(
                line,
                agent_id = record.agent_id().unwrap_or("-"),
                valid = verdict.is_valid,
                flagged = verdict.is_flagged,
                reasons = ?verdict.reasons,
                "row screened"
            );

            rows.push(ScreenedRow {
                line,
                agent_id: record.agent_id().map(str::to_string),
                verdict,
                flags: None,
                txns_in_window: None,
            });
            parsed.push(typed);
        }

        // ── Pass 2: flags and window counts, grouped by agent ────────────────
        let mut by_agent: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (idx, p) in parsed.iter().enumerate() {
            if let Some(p) = p {
                by_agent.entry(p.agent_id.as_str()).or_default().push(idx);
            }
        }

        let window = self.policy.frequency_window();
        let mut agents: Vec<AgentSummary> = Vec::with_capacity(by_agent.len());

        for (agent_id, indices) in &by_agent {
            let agent_rows: Vec<&ParsedRecord> =
                indices.iter().filter_map(|&i| parsed[i].as_ref()).collect();
            let times: Vec<_> = agent_rows.iter().map(|p| p.txn_time).collect();
            let counts = count_in_window(&times, window);

            let mut agent_flags: Vec<RowFlags> = Vec::with_capacity(indices.len());
            for ((&idx, record), count) in indices.iter().zip(&agent_rows).zip(counts) {
                let flags = RowFlags {
                    kyc: self.policy.kyc_flag(record, today),
                    aml: self.policy.aml_flag(record),
                    frequency: self.policy.frequency_flag(count),
                };
                rows[idx].flags = Some(flags);
                rows[idx].txns_in_window = Some(count);
                agent_flags.push(flags);
            }

            let risk_status = self.policy.agent_risk(&agent_flags);
            let flagged_transactions = indices
                .iter()
                .filter(|&&i| rows[i].verdict.is_flagged)
                .count();

            debug!(
                agent_id = %agent_id,
                risk = %risk_status,
                transactions = indices.len(),
                flagged = flagged_transactions,
                "agent rated"
            );

            agents.push(AgentSummary {
                agent_id: agent_id.to_string(),
                agent_name: agent_rows[0].agent_name.clone(),
                risk_status,
                transactions: indices.len(),
                flagged_transactions,
            });
        }

        let report = ScreeningReport {
            run_id,
            generated_at: Utc::now(),
            reference_date: today,
            rows,
            agents,
        };

        info!(
            run_id = %report.run_id.0,
            total = report.total(),
            invalid = report.invalid(),
            flagged = report.flagged(),
            agents = report.agents.len(),
            "screening finished"
        );

        report
    }
}
