//! CSV report writers.
//!
//! Two reports come out of a screening run: the per-agent summary (the
//! downloadable `agent_summary.csv`) and the per-row verdict listing.

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use agentguard_contracts::{
    error::{GuardError, GuardResult},
    report::ScreeningReport,
    risk::{AmlFlag, FrequencyFlag, KycFlag, RiskStatus},
};

#[derive(Serialize)]
struct SummaryLine<'a> {
    agent_id: &'a str,
    agent_name: &'a str,
    risk_status: RiskStatus,
    transactions: usize,
    flagged_transactions: usize,
}

#[derive(Serialize)]
struct VerdictLine<'a> {
    line: usize,
    agent_id: &'a str,
    is_valid: bool,
    is_flagged: bool,
    reasons: String,
    kyc_flag: Option<KycFlag>,
    aml_flag: Option<AmlFlag>,
    frequency_flag: Option<FrequencyFlag>,
    txns_in_window: Option<u32>,
}

fn write_failed(e: impl std::fmt::Display) -> GuardError {
    GuardError::ReportWriteFailed {
        reason: e.to_string(),
    }
}

/// Write one line per agent:
/// `agent_id,agent_name,risk_status,transactions,flagged_transactions`.
pub fn write_agent_summary<W: Write>(writer: W, report: &ScreeningReport) -> GuardResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for agent in &report.agents {
        wtr.serialize(SummaryLine {
            agent_id: &agent.agent_id,
            agent_name: &agent.agent_name,
            risk_status: agent.risk_status,
            transactions: agent.transactions,
            flagged_transactions: agent.flagged_transactions,
        })
        .map_err(write_failed)?;
    }
    if report.agents.is_empty() {
        wtr.write_record([
            "agent_id",
            "agent_name",
            "risk_status",
            "transactions",
            "flagged_transactions",
        ])
        .map_err(write_failed)?;
    }
    wtr.flush().map_err(write_failed)?;
    debug!(agents = report.agents.len(), "agent summary written");
    Ok(())
}

/// Write one line per input row with its verdict, reasons joined by `"; "`,
/// and the row flags where the row was valid.
pub fn write_row_verdicts<W: Write>(writer: W, report: &ScreeningReport) -> GuardResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in &report.rows {
        wtr.serialize(VerdictLine {
            line: row.line,
            agent_id: row.agent_id.as_deref().unwrap_or(""),
            is_valid: row.verdict.is_valid,
            is_flagged: row.verdict.is_flagged,
            reasons: row.verdict.reasons.join("; "),
            kyc_flag: row.flags.map(|f| f.kyc),
            aml_flag: row.flags.map(|f| f.aml),
            frequency_flag: row.flags.map(|f| f.frequency),
            txns_in_window: row.txns_in_window,
        })
        .map_err(write_failed)?;
    }
    if report.rows.is_empty() {
        wtr.write_record([
            "line",
            "agent_id",
            "is_valid",
            "is_flagged",
            "reasons",
            "kyc_flag",
            "aml_flag",
            "frequency_flag",
            "txns_in_window",
        ])
        .map_err(write_failed)?;
    }
    wtr.flush().map_err(write_failed)?;
    debug!(rows = report.rows.len(), "row verdicts written");
    Ok(())
}
