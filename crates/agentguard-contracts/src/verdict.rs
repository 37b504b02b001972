//! Per-row validation verdict.

use serde::{Deserialize, Serialize};

/// Reason strings emitted by the row validator.
///
/// Missing-field reasons are built with [`missing`]; everything else is a
/// fixed string so callers can match on it.
pub mod reasons {
    pub const INVALID_AMOUNT: &str = "invalid or missing transaction amount";
    pub const INVALID_ID_EXPIRY: &str = "invalid id_expiry date";
    pub const INVALID_TXN_TIME: &str = "invalid txn_time timestamp";
    pub const UNRECOGNIZED_KYC_STATUS: &str = "unrecognized KYC status";

    pub const KYC_STATUS_EXPIRED: &str = "KYC status is expired";
    pub const KYC_STATUS_INCOMPLETE: &str = "KYC status is incomplete";
    pub const KYC_ID_EXPIRED: &str = "KYC ID has expired";
    pub const AMOUNT_OVER_THRESHOLD: &str = "transaction amount exceeds threshold";

    /// `"missing <field>"`.
    pub fn missing(field: &str) -> String {
        format!("missing {field}")
    }
}

/// The outcome of validating one transaction record.
///
/// `is_flagged` is only ever true for a valid record, and `reasons` is
/// non-empty whenever the record is invalid or flagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub is_valid: bool,
    pub is_flagged: bool,
    pub reasons: Vec<String>,
}

impl ValidationVerdict {
    /// Structurally invalid record. Risk flags are never evaluated for it.
    pub fn invalid(reasons: Vec<String>) -> Self {
        Self {
            is_valid: false,
            is_flagged: false,
            reasons,
        }
    }

    /// Valid record; flagged when any risk reason applies.
    pub fn assessed(risk_reasons: Vec<String>) -> Self {
        Self {
            is_valid: true,
            is_flagged: !risk_reasons.is_empty(),
            reasons: risk_reasons,
        }
    }

    /// Valid and not flagged.
    pub fn is_clean(&self) -> bool {
        self.is_valid && !self.is_flagged
    }
}
