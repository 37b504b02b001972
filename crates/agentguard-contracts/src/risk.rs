//! Row-level risk flags and the per-agent risk rating derived from them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// KYC standing of the agent at the time of the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KycFlag {
    Ok,
    /// KYC status is anything other than `complete`.
    Incomplete,
    /// KYC status is `complete` but the ID document has expired.
    Expired,
}

/// Anti-money-laundering flag for large transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmlFlag {
    Ok,
    Alert,
}

/// Flag raised when an agent transacts too often inside the rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrequencyFlag {
    Ok,
    Alert,
}

/// All flags computed for one structurally valid row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFlags {
    pub kyc: KycFlag,
    pub aml: AmlFlag,
    pub frequency: FrequencyFlag,
}

impl RowFlags {
    /// True when any flag escalates the agent straight to `Red`.
    pub fn is_severe(&self) -> bool {
        self.kyc == KycFlag::Expired
            || self.aml == AmlFlag::Alert
            || self.frequency == FrequencyFlag::Alert
    }
}

/// Overall risk rating of an agent across all of their valid rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskStatus {
    Red,
    Yellow,
    Green,
}

impl RiskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskStatus::Red => "RED",
            RiskStatus::Yellow => "YELLOW",
            RiskStatus::Green => "GREEN",
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
