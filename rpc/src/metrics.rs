//! Prometheus metrics for the Salus service.
//!
//! The [`ServiceMetrics`] struct owns a dedicated [`Registry`] that the
//! `/metrics` endpoint encodes into the Prometheus text exposition format.

use prometheus::{
    register_int_counter_with_registry, register_int_gauge_with_registry, Encoder, IntCounter,
    IntGauge, Opts, Registry, TextEncoder,
};

/// Central collection of service-level Prometheus metrics.
pub struct ServiceMetrics {
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Challenges issued via `/auth/challenge`.
    pub challenges_issued: IntCounter,
    /// Successful verifications.
    pub logins_succeeded: IntCounter,
    /// Failed verifications (any reason).
    pub logins_failed: IntCounter,
    /// Fungible reward mints (eye test, exercise, family member).
    pub credits_minted: IntCounter,
    /// Condition reports recorded (including zero-mint Severe ones).
    pub condition_reports: IntCounter,
    /// Achievement tokens minted.
    pub achievements_minted: IntCounter,
    /// Achievement sales recorded.
    pub sales_recorded: IntCounter,

    // ── Gauges ──────────────────────────────────────────────────────────
    /// Wallet identities created so far.
    pub identity_count: IntGauge,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let counter = |name: &str, help: &str| {
            register_int_counter_with_registry!(Opts::new(name, help), registry)
                .expect("failed to register counter")
        };

        let challenges_issued =
            counter("salus_auth_challenges_total", "Challenges issued");
        let logins_succeeded =
            counter("salus_auth_logins_total", "Successful verifications");
        let logins_failed =
            counter("salus_auth_failures_total", "Failed verifications");
        let credits_minted =
            counter("salus_credits_minted_total", "Fungible reward mints");
        let condition_reports =
            counter("salus_condition_reports_total", "Condition reports recorded");
        let achievements_minted =
            counter("salus_achievements_minted_total", "Achievement tokens minted");
        let sales_recorded =
            counter("salus_sales_recorded_total", "Achievement sales recorded");

        let identity_count = register_int_gauge_with_registry!(
            Opts::new("salus_identities", "Wallet identities created"),
            registry
        )
        .expect("failed to register gauge");

        Self {
            registry,
            challenges_issued,
            logins_succeeded,
            logins_failed,
            credits_minted,
            condition_reports,
            achievements_minted,
            sales_recorded,
            identity_count,
        }
    }

    /// Encode all metrics in the Prometheus text format.
    pub fn encode(&self) -> String {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if encoder
            .encode(&self.registry.gather(), &mut buffer)
            .is_err()
        {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}
