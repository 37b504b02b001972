//! Transaction record types.
//!
//! A `TransactionRecord` holds the raw cells of one CSV row exactly as read;
//! any of them may be absent. Structural validation turns it into a
//! `ParsedRecord`, whose fields are fully typed.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Canonical column names, in the order validation reports on them.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "agent_id",
    "agent_name",
    "kyc_status",
    "id_expiry",
    "txn_amount",
    "txn_time",
];

/// One transaction row as supplied by the caller, before any parsing.
///
/// `None` means the cell was absent or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub agent_id: Option<String>,
    pub agent_name: Option<String>,
    pub kyc_status: Option<String>,
    pub id_expiry: Option<String>,
    pub txn_amount: Option<String>,
    pub txn_time: Option<String>,
}

impl TransactionRecord {
    /// Agent id with surrounding whitespace removed, if non-blank.
    pub fn agent_id(&self) -> Option<&str> {
        self.agent_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Know-Your-Customer verification status of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KycStatus {
    Complete,
    Incomplete,
    Expired,
}

impl KycStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            KycStatus::Complete => "complete",
            KycStatus::Incomplete => "incomplete",
            KycStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known KYC statuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKycStatus(pub String);

impl FromStr for KycStatus {
    type Err = UnknownKycStatus;

    /// Case-insensitive match after trimming whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "complete" => Ok(KycStatus::Complete),
            "incomplete" => Ok(KycStatus::Incomplete),
            "expired" => Ok(KycStatus::Expired),
            _ => Err(UnknownKycStatus(s.to_string())),
        }
    }
}

/// A structurally valid transaction with every field typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRecord {
    pub agent_id: String,
    pub agent_name: String,
    pub kyc_status: KycStatus,
    pub id_expiry: NaiveDate,
    pub txn_amount: Decimal,
    pub txn_time: NaiveDateTime,
}
