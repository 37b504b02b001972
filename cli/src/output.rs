//! Plain-text rendering of screening reports.

use agentguard_contracts::{
    report::{ScreenedRow, ScreeningReport},
    risk::RiskStatus,
};

const WIDTH: usize = 72;

fn rule() {
    println!("{}", "─".repeat(WIDTH));
}

fn row_label(row: &ScreenedRow) -> &'static str {
    if !row.verdict.is_valid {
        "INVALID"
    } else if row.verdict.is_flagged {
        "FLAGGED"
    } else {
        "OK"
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn print_header(report: &ScreeningReport) {
    rule();
    println!("  AgentGuard screening run {}", report.run_id.0);
    println!(
        "  Reference date {}   generated {}",
        report.reference_date,
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    rule();
    println!(
        "  Rows {:>5}   valid {:>5}   invalid {:>5}   flagged {:>5}",
        report.total(),
        report.valid(),
        report.invalid(),
        report.flagged()
    );
}

/// Totals, the per-agent table and every row that needs attention.
pub fn print_report(report: &ScreeningReport) {
    print_header(report);
    println!(
        "  Agents {:>3}   RED {:>3}   YELLOW {:>3}   GREEN {:>3}",
        report.agents.len(),
        report.agents_with(RiskStatus::Red),
        report.agents_with(RiskStatus::Yellow),
        report.agents_with(RiskStatus::Green)
    );
    rule();

    if report.agents.is_empty() {
        println!("  No agent has a valid transaction.");
    } else {
        println!(
            "  {:<12} {:<24} {:<7} {:>6} {:>8}",
            "AGENT", "NAME", "RISK", "TXNS", "FLAGGED"
        );
        for agent in &report.agents {
            println!(
                "  {:<12} {:<24} {:<7} {:>6} {:>8}",
                truncate(&agent.agent_id, 12),
                truncate(&agent.agent_name, 24),
                agent.risk_status,
                agent.transactions,
                agent.flagged_transactions
            );
        }
    }

    let by_agent = report.reasons_by_agent();
    if !by_agent.is_empty() {
        rule();
        println!("  Reasons by agent");
        for (agent_id, reasons) in &by_agent {
            let label = if agent_id.is_empty() {
                "(no agent id)"
            } else {
                agent_id.as_str()
            };
            println!("  {}", label);
            for reason in reasons {
                println!("      - {}", reason);
            }
        }
    }
    rule();
}

/// One line per row: position, agent, verdict and reasons.
pub fn print_verdicts(report: &ScreeningReport) {
    print_header(report);
    rule();
    for row in &report.rows {
        let agent = row.agent_id.as_deref().unwrap_or("-");
        let reasons = if row.verdict.reasons.is_empty() {
            String::new()
        } else {
            row.verdict.reasons.join("; ")
        };
        println!(
            "  {:>5}  {:<12} {:<8} {}",
            row.line,
            truncate(agent, 12),
            row_label(row),
            reasons
        );
    }
    rule();
}

#[cfg(test)]
mod tests {
    use agentguard_contracts::{report::ScreenedRow, verdict::ValidationVerdict};

    use super::{row_label, truncate};

    fn row(verdict: ValidationVerdict) -> ScreenedRow {
        ScreenedRow {
            line: 1,
            agent_id: Some("A1".to_string()),
            verdict,
            flags: None,
            txns_in_window: None,
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Adaeze Okonkwo-Bello", 10), "Adaeze Ok…");
        assert_eq!(truncate("ééééé", 3), "éé…");
    }

    #[test]
    fn test_row_label() {
        assert_eq!(row_label(&row(ValidationVerdict::assessed(vec![]))), "OK");
        assert_eq!(
            row_label(&row(ValidationVerdict::assessed(vec!["x".to_string()]))),
            "FLAGGED"
        );
        assert_eq!(
            row_label(&row(ValidationVerdict::invalid(vec!["y".to_string()]))),
            "INVALID"
        );
    }
}
