//! TOML-configured risk policy.
//!
//! `ScreeningPolicy` loads a `ScreeningConfig` from a TOML string or file and
//! implements the `RiskPolicy` trait from agentguard-core.
//!
//! Row flags:
//!
//! - KYC: `Incomplete` unless the status is `complete`; a complete status
//!   with an `id_expiry` before today is `Expired`.
//! - AML: `Alert` when the amount is strictly above the threshold.
//! - Frequency: `Alert` when the window count reaches `alert_at`.
//!
//! Agent rating: any `Expired` or `Alert` → `Red`; otherwise any
//! `Incomplete` → `Yellow`; otherwise `Green`.

use std::path::Path;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use agentguard_contracts::{
    error::{GuardError, GuardResult},
    record::{KycStatus, ParsedRecord},
    risk::{AmlFlag, FrequencyFlag, KycFlag, RiskStatus, RowFlags},
};
use agentguard_core::traits::RiskPolicy;

use crate::config::{ScreeningConfig, DEFAULT_WINDOW_MINUTES, MAX_WINDOW_MINUTES};

/// A `RiskPolicy` backed by a validated `ScreeningConfig`.
///
/// ```rust,ignore
/// use agentguard_policy::ScreeningPolicy;
///
/// let policy = ScreeningPolicy::from_file(Path::new("config/screening.toml"))?;
/// ```
#[derive(Debug, Clone)]
pub struct ScreeningPolicy {
    config: ScreeningConfig,
    window: Duration,
}

impl Default for ScreeningPolicy {
    fn default() -> Self {
        Self {
            config: ScreeningConfig::default(),
            window: Duration::minutes(DEFAULT_WINDOW_MINUTES),
        }
    }
}

impl ScreeningPolicy {
    /// Build a policy from an already-deserialized config.
    ///
    /// Returns `GuardError::ConfigError` if a value is out of range.
    pub fn from_config(config: ScreeningConfig) -> GuardResult<Self> {
        if config.thresholds.large_transaction.is_sign_negative() {
            return Err(GuardError::ConfigError {
                reason: format!(
                    "thresholds.large_transaction must not be negative, got {}",
                    config.thresholds.large_transaction
                ),
            });
        }
        if config.frequency.window_minutes <= 0 {
            return Err(GuardError::ConfigError {
                reason: format!(
                    "frequency.window_minutes must be positive, got {}",
                    config.frequency.window_minutes
                ),
            });
        }
        let window = Duration::try_minutes(config.frequency.window_minutes)
            .filter(|_| config.frequency.window_minutes <= MAX_WINDOW_MINUTES)
            .ok_or_else(|| GuardError::ConfigError {
                reason: format!(
                    "frequency.window_minutes must be at most {}, got {}",
                    MAX_WINDOW_MINUTES, config.frequency.window_minutes
                ),
            })?;
        if config.frequency.alert_at == 0 {
            return Err(GuardError::ConfigError {
                reason: "frequency.alert_at must be at least 1".to_string(),
            });
        }

        debug!(
            large_transaction = %config.thresholds.large_transaction,
            window_minutes = config.frequency.window_minutes,
            alert_at = config.frequency.alert_at,
            "screening policy loaded"
        );
        Ok(Self { config, window })
    }

    /// Parse `s` as TOML and build a `ScreeningPolicy`.
    pub fn from_toml_str(s: &str) -> GuardResult<Self> {
        let config: ScreeningConfig = toml::from_str(s).map_err(|e| GuardError::ConfigError {
            reason: format!("failed to parse screening TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as screening configuration.
    pub fn from_file(path: &Path) -> GuardResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| GuardError::ConfigError {
            reason: format!("failed to read screening config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn config(&self) -> &ScreeningConfig {
        &self.config
    }

    /// Amounts strictly above this value are flagged.
    pub fn large_transaction_threshold(&self) -> Decimal {
        self.config.thresholds.large_transaction
    }

    /// The effective configuration rendered back to TOML.
    pub fn to_toml_string(&self) -> GuardResult<String> {
        toml::to_string_pretty(&self.config).map_err(|e| GuardError::ConfigError {
            reason: format!("failed to render screening config: {}", e),
        })
    }
}

impl RiskPolicy for ScreeningPolicy {
    fn kyc_flag(&self, record: &ParsedRecord, today: NaiveDate) -> KycFlag {
        if record.kyc_status != KycStatus::Complete {
            KycFlag::Incomplete
        } else if record.id_expiry < today {
            KycFlag::Expired
        } else {
            KycFlag::Ok
        }
    }

    fn aml_flag(&self, record: &ParsedRecord) -> AmlFlag {
        if record.txn_amount > self.config.thresholds.large_transaction {
            AmlFlag::Alert
        } else {
            AmlFlag::Ok
        }
    }

    fn frequency_window(&self) -> Duration {
        self.window
    }

    fn frequency_flag(&self, txns_in_window: u32) -> FrequencyFlag {
        if txns_in_window >= self.config.frequency.alert_at {
            FrequencyFlag::Alert
        } else {
            FrequencyFlag::Ok
        }
    }

    fn agent_risk(&self, flags: &[RowFlags]) -> RiskStatus {
        if flags.iter().any(RowFlags::is_severe) {
            RiskStatus::Red
        } else if flags.iter().any(|f| f.kyc == KycFlag::Incomplete) {
            RiskStatus::Yellow
        } else {
            RiskStatus::Green
        }
    }
}
