//! Dashboard state: the loaded report, row filter and selection.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;

use agentguard_contracts::{
    error::GuardResult,
    report::{ScreenedRow, ScreeningReport},
};
use agentguard_core::{
    clock::{FixedClock, SystemClock},
    traits::Clock,
    Screener,
};
use agentguard_ingest::read_path;
use agentguard_policy::ScreeningPolicy;
use agentguard_verify::RowValidator;

// ── Source ────────────────────────────────────────────────────────────────────

/// Where the dashboard's report comes from. Re-screening reads the file and
/// the configuration again.
#[derive(Debug, Clone)]
pub struct Source {
    pub file: PathBuf,
    pub config: Option<PathBuf>,
    pub as_of: Option<NaiveDate>,
}

impl Source {
    pub fn screen(&self) -> GuardResult<ScreeningReport> {
        let policy = match &self.config {
            Some(path) => ScreeningPolicy::from_file(path)?,
            None => ScreeningPolicy::default(),
        };
        let clock: Arc<dyn Clock> = match self.as_of {
            Some(date) => Arc::new(FixedClock(date)),
            None => Arc::new(SystemClock),
        };
        let validator = RowValidator::from_policy(&policy, clock.clone());
        let screener = Screener::new(Box::new(validator), Box::new(policy), clock);

        let records = read_path(&self.file)?;
        Ok(screener.screen(&records))
    }
}

// ── Row filter ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFilter {
    All,
    Flagged,
    Invalid,
}

impl RowFilter {
    pub fn next(self) -> Self {
        match self {
            RowFilter::All => RowFilter::Flagged,
            RowFilter::Flagged => RowFilter::Invalid,
            RowFilter::Invalid => RowFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RowFilter::All => "all",
            RowFilter::Flagged => "flagged",
            RowFilter::Invalid => "invalid",
        }
    }

    pub fn matches(self, row: &ScreenedRow) -> bool {
        match self {
            RowFilter::All => true,
            RowFilter::Flagged => row.verdict.is_flagged,
            RowFilter::Invalid => !row.verdict.is_valid,
        }
    }
}

// ── App state ─────────────────────────────────────────────────────────────────

pub struct App {
    pub source: Source,
    pub report: ScreeningReport,
    pub filter: RowFilter,
    /// Index into `visible_rows()`.
    pub selected: usize,
    /// Last re-screen failure. The previous report stays on screen.
    pub error: Option<String>,
}

impl App {
    pub fn new(source: Source, report: ScreeningReport) -> Self {
        Self {
            source,
            report,
            filter: RowFilter::All,
            selected: 0,
            error: None,
        }
    }

    pub fn visible_rows(&self) -> Vec<&ScreenedRow> {
        self.report
            .rows
            .iter()
            .filter(|r| self.filter.matches(r))
            .collect()
    }

    pub fn selected_row(&self) -> Option<&ScreenedRow> {
        self.visible_rows().get(self.selected).copied()
    }

    pub fn next(&mut self) {
        let len = self.visible_rows().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.selected = 0;
    }

    /// Screen the source again, keeping the filter and clamping the
    /// selection to the new row list.
    pub fn rescreen(&mut self) {
        match self.source.screen() {
            Ok(report) => {
                self.report = report;
                self.error = None;
                let len = self.visible_rows().len();
                self.selected = self.selected.min(len.saturating_sub(1));
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::{NaiveDate, Utc};

    use agentguard_contracts::{
        report::{RunId, ScreenedRow, ScreeningReport},
        verdict::ValidationVerdict,
    };

    use super::{App, RowFilter, Source};

    fn row(line: usize, verdict: ValidationVerdict) -> ScreenedRow {
        ScreenedRow {
            line,
            agent_id: Some(format!("A{}", line)),
            verdict,
            flags: None,
            txns_in_window: None,
        }
    }

    fn app_with(rows: Vec<ScreenedRow>, file: &str) -> App {
        let report = ScreeningReport {
            run_id: RunId::new(),
            generated_at: Utc::now(),
            reference_date: NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
            rows,
            agents: vec![],
        };
        let source = Source {
            file: PathBuf::from(file),
            config: None,
            as_of: NaiveDate::from_ymd_opt(2025, 7, 10),
        };
        App::new(source, report)
    }

    fn mixed_app() -> App {
        app_with(
            vec![
                row(1, ValidationVerdict::assessed(vec![])),
                row(2, ValidationVerdict::assessed(vec!["KYC ID has expired".into()])),
                row(3, ValidationVerdict::invalid(vec!["missing agent_id".into()])),
                row(4, ValidationVerdict::assessed(vec![])),
            ],
            "transactions.csv",
        )
    }

    #[test]
    fn test_filter_cycle() {
        assert_eq!(RowFilter::All.next(), RowFilter::Flagged);
        assert_eq!(RowFilter::Flagged.next(), RowFilter::Invalid);
        assert_eq!(RowFilter::Invalid.next(), RowFilter::All);
    }

    #[test]
    fn test_filtered_rows() {
        let mut app = mixed_app();
        assert_eq!(app.visible_rows().len(), 4);

        app.cycle_filter();
        let lines: Vec<usize> = app.visible_rows().iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2]);

        app.cycle_filter();
        let lines: Vec<usize> = app.visible_rows().iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![3]);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = mixed_app();
        app.previous();
        assert_eq!(app.selected, 0);

        for _ in 0..10 {
            app.next();
        }
        assert_eq!(app.selected, 3);
        assert_eq!(app.selected_row().map(|r| r.line), Some(4));

        app.cycle_filter();
        assert_eq!(app.selected, 0);
        assert_eq!(app.selected_row().map(|r| r.line), Some(2));
    }

    #[test]
    fn test_empty_report_has_no_selection() {
        let mut app = app_with(vec![], "transactions.csv");
        app.next();
        assert_eq!(app.selected, 0);
        assert!(app.selected_row().is_none());
    }

    #[test]
    fn test_failed_rescreen_keeps_report() {
        let mut app = app_with(
            vec![row(1, ValidationVerdict::assessed(vec![]))],
            "/nonexistent/dir/transactions.csv",
        );
        app.rescreen();
        assert!(app.error.as_deref().is_some_and(|e| e.contains("failed to open")));
        assert_eq!(app.report.rows.len(), 1);
    }

    #[test]
    fn test_rescreen_reads_fixture() {
        let fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/../fixtures/sample_transactions.csv");
        let mut app = app_with(vec![], fixture);
        app.rescreen();
        assert!(app.error.is_none());
        assert!(!app.report.rows.is_empty());
        assert!(!app.report.agents.is_empty());
    }
}
