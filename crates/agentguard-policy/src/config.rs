//! Screening configuration schema.
//!
//! A `ScreeningConfig` is deserialized from TOML. Every key is optional; a
//! missing section or key falls back to the documented default.
//!
//! Example:
//! ```toml
//! [thresholds]
//! large_transaction = 1000000
//!
//! [frequency]
//! window_minutes = 60
//! alert_at = 3
//! ```

use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Serialize, Serializer};

/// Default large-transaction threshold, in whole currency units.
pub const DEFAULT_LARGE_TRANSACTION: i64 = 1_000_000;

/// Default rolling window for frequency counting.
pub const DEFAULT_WINDOW_MINUTES: i64 = 60;

/// Longest accepted rolling window: one year.
pub const MAX_WINDOW_MINUTES: i64 = 365 * 24 * 60;

/// Default number of transactions inside the window that raises an alert.
pub const DEFAULT_ALERT_AT: u32 = 3;

/// Amount thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Amounts strictly above this are flagged.
    #[serde(serialize_with = "serialize_amount")]
    pub large_transaction: Decimal,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            large_transaction: Decimal::from(DEFAULT_LARGE_TRANSACTION),
        }
    }
}

/// Writes an amount as a bare TOML number: an integer when it has no
/// fractional part, a float otherwise.
fn serialize_amount<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    let amount = amount.normalize();
    if amount.scale() == 0 {
        if let Some(whole) = amount.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }
    match amount.to_f64() {
        Some(value) => serializer.serialize_f64(value),
        None => serializer.collect_str(&amount),
    }
}

/// Transaction-frequency alerting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencySettings {
    /// Length of the rolling window, in minutes. Must be positive and at
    /// most [`MAX_WINDOW_MINUTES`].
    pub window_minutes: i64,
    /// An agent's transaction is flagged when this many of their
    /// transactions (itself included) fall inside the window. Must be >= 1.
    pub alert_at: u32,
}

impl Default for FrequencySettings {
    fn default() -> Self {
        Self {
            window_minutes: DEFAULT_WINDOW_MINUTES,
            alert_at: DEFAULT_ALERT_AT,
        }
    }
}

/// The top-level structure deserialized from a TOML screening file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningConfig {
    pub thresholds: Thresholds,
    pub frequency: FrequencySettings,
}
