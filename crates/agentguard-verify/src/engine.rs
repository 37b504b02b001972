//! Row validator for the AgentGuard screening pipeline.
//!
//! `RowValidator` implements the `RecordValidator` trait from
//! `agentguard-core`. Validation runs in two phases:
//!
//! 1. **Structural**: every required cell must be present and readable as
//!    its type. Each failing field contributes one reason, in column order,
//!    and all of them are collected before returning.
//! 2. **Risk**: only for records that passed phase 1. Status, ID expiry
//!    and amount rules are evaluated in a fixed order and every rule that
//!    fires adds its reason.
//!
//! Malformed input is never an `Err`. The only error is a caller passing no
//! record at all to [`RowValidator::validate_checked`].

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use agentguard_contracts::{
    error::{GuardError, GuardResult},
    record::{KycStatus, ParsedRecord, TransactionRecord},
    verdict::{reasons, ValidationVerdict},
};
use agentguard_core::traits::{Clock, RecordValidator};
use agentguard_policy::ScreeningPolicy;

use crate::fields::{parse_amount, parse_date, parse_timestamp, present};

/// The AgentGuard row validator.
///
/// Holds the large-transaction threshold and the clock that supplies
/// "today" for `id_expiry` checks.
pub struct RowValidator {
    large_transaction_threshold: Decimal,
    clock: Arc<dyn Clock>,
}

impl RowValidator {
    pub fn new(large_transaction_threshold: Decimal, clock: Arc<dyn Clock>) -> Self {
        Self {
            large_transaction_threshold,
            clock,
        }
    }

    /// A validator that flags amounts above the policy's large-transaction
    /// threshold.
    pub fn from_policy(policy: &ScreeningPolicy, clock: Arc<dyn Clock>) -> Self {
        Self::new(policy.large_transaction_threshold(), clock)
    }

    /// Validate `record` against today's date from the clock.
    pub fn validate(&self, record: &TransactionRecord) -> ValidationVerdict {
        self.validate_on(record, self.clock.today())
    }

    /// Like [`validate`](Self::validate), for callers whose record may be
    /// absent. No record at all is a contract violation and returns
    /// `GuardError::InvalidArgument`.
    pub fn validate_checked(
        &self,
        record: Option<&TransactionRecord>,
    ) -> GuardResult<ValidationVerdict> {
        match record {
            Some(r) => Ok(self.validate(r)),
            None => {
                warn!("validation requested without a record");
                Err(GuardError::InvalidArgument {
                    reason: "no transaction record supplied for validation".to_string(),
                })
            }
        }
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// A required text cell. Records `"missing <field>"` when blank.
    fn required_text(cell: Option<&str>, field: &str, failures: &mut Vec<String>) -> Option<String> {
        match present(cell) {
            Some(v) => Some(v.to_string()),
            None => {
                failures.push(reasons::missing(field));
                None
            }
        }
    }

    /// A required cell that must also parse. Blank cells record
    /// `"missing <field>"`; unreadable ones record `invalid`.
    fn required_parsed<T>(
        cell: Option<&str>,
        field: &str,
        parse: impl Fn(&str) -> Option<T>,
        invalid: &str,
        failures: &mut Vec<String>,
    ) -> Option<T> {
        let raw = match present(cell) {
            Some(raw) => raw,
            None => {
                failures.push(reasons::missing(field));
                return None;
            }
        };
        let parsed = parse(raw);
        if parsed.is_none() {
            failures.push(invalid.to_string());
        }
        parsed
    }
}

impl RecordValidator for RowValidator {
    fn parse(&self, record: &TransactionRecord) -> Result<ParsedRecord, Vec<String>> {
        let mut failures: Vec<String> = Vec::new();

        let agent_id = Self::required_text(record.agent_id.as_deref(), "agent_id", &mut failures);
        let agent_name =
            Self::required_text(record.agent_name.as_deref(), "agent_name", &mut failures);
        let kyc_status = Self::required_parsed(
            record.kyc_status.as_deref(),
            "kyc_status",
            |s| s.parse::<KycStatus>().ok(),
            reasons::UNRECOGNIZED_KYC_STATUS,
            &mut failures,
        );
        let id_expiry = Self::required_parsed(
            record.id_expiry.as_deref(),
            "id_expiry",
            parse_date,
            reasons::INVALID_ID_EXPIRY,
            &mut failures,
        );
        // Absent and unreadable amounts share one reason.
        let txn_amount = present(record.txn_amount.as_deref()).and_then(parse_amount);
        if txn_amount.is_none() {
            failures.push(reasons::INVALID_AMOUNT.to_string());
        }
        let txn_time = Self::required_parsed(
            record.txn_time.as_deref(),
            "txn_time",
            parse_timestamp,
            reasons::INVALID_TXN_TIME,
            &mut failures,
        );

        match (agent_id, agent_name, kyc_status, id_expiry, txn_amount, txn_time) {
            (
                Some(agent_id),
                Some(agent_name),
                Some(kyc_status),
                Some(id_expiry),
                Some(txn_amount),
                Some(txn_time),
            ) => Ok(ParsedRecord {
                agent_id,
                agent_name,
                kyc_status,
                id_expiry,
                txn_amount,
                txn_time,
            }),
            _ => {
                debug!(
                    agent_id = record.agent_id().unwrap_or("-"),
                    reasons = ?failures,
                    "structural validation failed"
                );
                Err(failures)
            }
        }
    }

    fn assess(&self, record: &ParsedRecord, today: NaiveDate) -> Vec<String> {
        let mut flags: Vec<String> = Vec::new();

        match record.kyc_status {
            KycStatus::Expired => flags.push(reasons::KYC_STATUS_EXPIRED.to_string()),
            KycStatus::Incomplete => flags.push(reasons::KYC_STATUS_INCOMPLETE.to_string()),
            KycStatus::Complete => {}
        }

        // Independent of the status rule; both may fire.
        if record.id_expiry < today {
            flags.push(reasons::KYC_ID_EXPIRED.to_string());
        }

        if record.txn_amount > self.large_transaction_threshold {
            flags.push(reasons::AMOUNT_OVER_THRESHOLD.to_string());
        }

        if !flags.is_empty() {
            debug!(
                agent_id = %record.agent_id,
                reasons = ?flags,
                "record flagged"
            );
        }
        flags
    }
}
