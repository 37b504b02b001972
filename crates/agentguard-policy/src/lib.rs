//! # agentguard-policy
//!
//! TOML-configured risk policy for AgentGuard.
//!
//! ## Overview
//!
//! This crate provides [`ScreeningPolicy`], which implements the
//! [`RiskPolicy`](agentguard_core::traits::RiskPolicy) trait. It owns the
//! large-transaction threshold and the frequency window, turns each valid
//! row into KYC / AML / frequency flags, and rates agents RED, YELLOW or
//! GREEN.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use agentguard_policy::ScreeningPolicy;
//!
//! let policy = ScreeningPolicy::from_file(Path::new("config/screening.toml"))?;
//! // Pass `policy` to `agentguard_core::Screener::new(...)`.
//! ```

pub mod config;
pub mod engine;

pub use config::{FrequencySettings, ScreeningConfig, Thresholds};
pub use engine::ScreeningPolicy;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;

    use agentguard_contracts::{
        error::GuardError,
        record::{KycStatus, ParsedRecord},
        risk::{AmlFlag, FrequencyFlag, KycFlag, RiskStatus, RowFlags},
    };
    use agentguard_core::traits::RiskPolicy;

    use crate::ScreeningPolicy;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon(d: NaiveDate) -> NaiveDateTime {
        d.and_hms_opt(12, 0, 0).unwrap()
    }

    fn record(status: KycStatus, id_expiry: NaiveDate, amount: &str) -> ParsedRecord {
        ParsedRecord {
            agent_id: "A1".to_string(),
            agent_name: "Jane".to_string(),
            kyc_status: status,
            id_expiry,
            txn_amount: amount.parse().unwrap(),
            txn_time: noon(date(2025, 7, 10)),
        }
    }

    fn flags(kyc: KycFlag, aml: AmlFlag, frequency: FrequencyFlag) -> RowFlags {
        RowFlags { kyc, aml, frequency }
    }

    fn policy_with_threshold(threshold: &str) -> ScreeningPolicy {
        ScreeningPolicy::from_toml_str(&format!(
            "[thresholds]\nlarge_transaction = {threshold}\n"
        ))
        .unwrap()
    }

    // ── 1. defaults ───────────────────────────────────────────────────────────

    /// An empty document yields the documented defaults.
    #[test]
    fn test_empty_config_uses_defaults() {
        let policy = ScreeningPolicy::from_toml_str("").unwrap();

        assert_eq!(policy.large_transaction_threshold(), Decimal::from(1_000_000));
        assert_eq!(policy.frequency_window(), Duration::minutes(60));
        assert_eq!(policy.config().frequency.alert_at, 3);
    }

    /// A partial section keeps defaults for the keys it omits.
    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let policy = ScreeningPolicy::from_toml_str(
            r#"
            [frequency]
            window_minutes = 15
        "#,
        )
        .unwrap();

        assert_eq!(policy.frequency_window(), Duration::minutes(15));
        assert_eq!(policy.config().frequency.alert_at, 3);
        assert_eq!(policy.large_transaction_threshold(), Decimal::from(1_000_000));
    }

    // ── 2. KYC flag ───────────────────────────────────────────────────────────

    #[test]
    fn test_kyc_flag_incomplete_for_any_non_complete_status() {
        let policy = ScreeningPolicy::default();
        let today = date(2025, 7, 10);

        let r = record(KycStatus::Incomplete, date(2030, 1, 1), "10");
        assert_eq!(policy.kyc_flag(&r, today), KycFlag::Incomplete);

        let r = record(KycStatus::Expired, date(2030, 1, 1), "10");
        assert_eq!(policy.kyc_flag(&r, today), KycFlag::Incomplete);
    }

    #[test]
    fn test_kyc_flag_expired_when_id_before_today() {
        let policy = ScreeningPolicy::default();
        let r = record(KycStatus::Complete, date(2025, 7, 9), "10");
        assert_eq!(policy.kyc_flag(&r, date(2025, 7, 10)), KycFlag::Expired);
    }

    #[test]
    fn test_kyc_flag_ok_when_id_valid() {
        let policy = ScreeningPolicy::default();
        let today = date(2025, 7, 10);

        let r = record(KycStatus::Complete, date(2025, 7, 11), "10");
        assert_eq!(policy.kyc_flag(&r, today), KycFlag::Ok);

        // Expiring today is not yet expired.
        let r = record(KycStatus::Complete, today, "10");
        assert_eq!(policy.kyc_flag(&r, today), KycFlag::Ok);
    }

    // ── 3. AML flag ───────────────────────────────────────────────────────────

    #[test]
    fn test_aml_flag_is_strictly_above_threshold() {
        let policy = policy_with_threshold("1000");
        let expiry = date(2030, 1, 1);

        for (amount, expected) in [
            ("500", AmlFlag::Ok),
            ("1000", AmlFlag::Ok),
            ("1000.1", AmlFlag::Alert),
        ] {
            let r = record(KycStatus::Complete, expiry, amount);
            assert_eq!(policy.aml_flag(&r), expected, "amount {amount}");
        }
    }

    // ── 4. frequency flag ─────────────────────────────────────────────────────

    #[test]
    fn test_frequency_flag_alerts_at_limit() {
        let policy = ScreeningPolicy::default();
        let got: Vec<FrequencyFlag> = [1, 2, 3, 4]
            .into_iter()
            .map(|n| policy.frequency_flag(n))
            .collect();
        assert_eq!(
            got,
            vec![
                FrequencyFlag::Ok,
                FrequencyFlag::Ok,
                FrequencyFlag::Alert,
                FrequencyFlag::Alert
            ]
        );
    }

    // ── 5. agent rating ───────────────────────────────────────────────────────

    #[test]
    fn test_agent_risk_rating() {
        use AmlFlag as A;
        use FrequencyFlag as F;
        use KycFlag as K;

        let policy = ScreeningPolicy::default();

        // AML alert on one row → RED.
        let a = [flags(K::Ok, A::Ok, F::Ok), flags(K::Ok, A::Alert, F::Ok)];
        assert_eq!(policy.agent_risk(&a), RiskStatus::Red);

        // Incomplete KYC only → YELLOW.
        let b = [flags(K::Incomplete, A::Ok, F::Ok)];
        assert_eq!(policy.agent_risk(&b), RiskStatus::Yellow);

        // Frequency alert → RED.
        let c = [flags(K::Ok, A::Ok, F::Alert)];
        assert_eq!(policy.agent_risk(&c), RiskStatus::Red);

        // Everything clean → GREEN.
        let d = [flags(K::Ok, A::Ok, F::Ok)];
        assert_eq!(policy.agent_risk(&d), RiskStatus::Green);

        // Expired ID outranks incomplete.
        let e = [flags(K::Incomplete, A::Ok, F::Ok), flags(K::Expired, A::Ok, F::Ok)];
        assert_eq!(policy.agent_risk(&e), RiskStatus::Red);
    }

    // ── 6. configuration errors ───────────────────────────────────────────────

    #[test]
    fn test_toml_parse_error() {
        let result = ScreeningPolicy::from_toml_str("this is not valid toml ][[[");
        match result {
            Err(GuardError::ConfigError { reason }) => {
                assert!(
                    reason.contains("failed to parse screening TOML"),
                    "expected parse error message, got: {reason}"
                );
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_non_positive_window_rejected() {
        let result = ScreeningPolicy::from_toml_str("[frequency]\nwindow_minutes = 0\n");
        match result {
            Err(GuardError::ConfigError { reason }) => assert!(reason.contains("window_minutes")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_window_rejected() {
        for minutes in [i64::MAX, 365 * 24 * 60 + 1] {
            let result =
                ScreeningPolicy::from_toml_str(&format!("[frequency]\nwindow_minutes = {minutes}\n"));
            match result {
                Err(GuardError::ConfigError { reason }) => {
                    assert!(reason.contains("at most"), "unexpected reason: {reason}")
                }
                other => panic!("expected ConfigError for {minutes}, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_year_long_window_accepted() {
        let policy =
            ScreeningPolicy::from_toml_str("[frequency]\nwindow_minutes = 525600\n").unwrap();
        assert_eq!(policy.frequency_window(), Duration::days(365));
    }

    #[test]
    fn test_default_policy_window_is_one_hour() {
        assert_eq!(ScreeningPolicy::default().frequency_window(), Duration::hours(1));
    }

    #[test]
    fn test_zero_alert_at_rejected() {
        let result = ScreeningPolicy::from_toml_str("[frequency]\nalert_at = 0\n");
        assert!(matches!(result, Err(GuardError::ConfigError { .. })));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let result = ScreeningPolicy::from_toml_str("[thresholds]\nlarge_transaction = -1\n");
        match result {
            Err(GuardError::ConfigError { reason }) => {
                assert!(reason.contains("large_transaction"))
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result =
            ScreeningPolicy::from_file(std::path::Path::new("/nonexistent/screening.toml"));
        match result {
            Err(GuardError::ConfigError { reason }) => {
                assert!(reason.contains("failed to read screening config"))
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_effective_config_renders_sections() {
        let rendered = policy_with_threshold("2500").to_toml_string().unwrap();
        assert!(rendered.contains("[thresholds]"));
        assert!(rendered.contains("large_transaction = 2500\n"), "got: {rendered}");
        assert!(rendered.contains("[frequency]"));
        assert!(rendered.contains("window_minutes = 60"));
    }

    #[test]
    fn test_rendered_config_parses_back() {
        for threshold in ["1000000", "1250.5"] {
            let policy = policy_with_threshold(threshold);
            let reparsed =
                ScreeningPolicy::from_toml_str(&policy.to_toml_string().unwrap()).unwrap();
            assert_eq!(reparsed.config(), policy.config());
        }
        let rendered = ScreeningPolicy::default().to_toml_string().unwrap();
        assert!(rendered.contains("large_transaction = 1000000\n"), "got: {rendered}");
    }
}
