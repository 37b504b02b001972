//! Core trait definitions for the screening pipeline.
//!
//! - `RecordValidator` — parses a raw row and names its compliance risks
//! - `RiskPolicy`      — row flags and per-agent aggregation
//! - `Clock`           — supplies the reference date for expiry checks
//!
//! The screener wires them together. Implementations live in
//! `agentguard-verify` and `agentguard-policy`.

use chrono::{Duration, NaiveDate};

use agentguard_contracts::{
    record::{ParsedRecord, TransactionRecord},
    risk::{AmlFlag, FrequencyFlag, KycFlag, RiskStatus, RowFlags},
    verdict::ValidationVerdict,
};

/// Source of "today" for `id_expiry` comparisons.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Row-level validator: structural parsing first, risk assessment second.
///
/// Both halves must be pure. Malformed input is never an error here; it comes
/// back as the list of structural reasons.
pub trait RecordValidator: Send + Sync {
    /// Turn raw cells into a typed record, or explain every field that is
    /// missing or malformed (one reason per field, in column order).
    fn parse(&self, record: &TransactionRecord) -> Result<ParsedRecord, Vec<String>>;

    /// Risk reasons for a structurally valid record, evaluated against
    /// `today`. An empty list means the record is not flagged.
    fn assess(&self, record: &ParsedRecord, today: NaiveDate) -> Vec<String>;

    /// Verdict for `record` as of `today`, together with the typed record
    /// when parsing succeeded. Risk rules only run on parsed records.
    fn inspect(
        &self,
        record: &TransactionRecord,
        today: NaiveDate,
    ) -> (ValidationVerdict, Option<ParsedRecord>) {
        match self.parse(record) {
            Ok(parsed) => (
                ValidationVerdict::assessed(self.assess(&parsed, today)),
                Some(parsed),
            ),
            Err(reasons) => (ValidationVerdict::invalid(reasons), None),
        }
    }

    /// Full verdict for `record` as of `today`.
    fn validate_on(&self, record: &TransactionRecord, today: NaiveDate) -> ValidationVerdict {
        self.inspect(record, today).0
    }
}

/// Screening thresholds and the rules that turn rows into agent ratings.
pub trait RiskPolicy: Send + Sync {
    /// KYC flag for one valid row.
    fn kyc_flag(&self, record: &ParsedRecord, today: NaiveDate) -> KycFlag;

    /// AML flag for one valid row.
    fn aml_flag(&self, record: &ParsedRecord) -> AmlFlag;

    /// Length of the rolling window used for frequency counting.
    fn frequency_window(&self) -> Duration;

    /// Frequency flag given how many of the agent's transactions fall inside
    /// the window ending at this one (this one included).
    fn frequency_flag(&self, txns_in_window: u32) -> FrequencyFlag;

    /// Overall rating for an agent from the flags of all their valid rows.
    fn agent_risk(&self, flags: &[RowFlags]) -> RiskStatus;
}
