use charter_policy::{InvariantEvaluator, PolicyEngine};
use charter_types::FeatureInput;
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::preflight::{self, PreflightResult};
use crate::report::{self, MaintenanceReport, ReportInput};
use crate::safe_mode::{get_safe_mode_fallback, SafeModeFallback};

/// Result of a full maintenance run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MaintenanceRun {
    pub preflight: PreflightResult,
    pub report: MaintenanceReport,
    /// Present exactly when the preflight failed.
    pub fallback: Option<SafeModeFallback>,
}

impl MaintenanceRun {
    pub fn halted(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Maintenance Bot - runs the policy engine and invariant evaluator over a
/// feature and turns the results into a report and a preflight verdict.
///
/// The bot owns no mutable state. One instance can serve any number of
/// evaluations, from any thread.
pub struct MaintenanceBot {
    policy: PolicyEngine,
    invariants: InvariantEvaluator,
}

impl MaintenanceBot {
    /// Bot with the default policy engine and every charter invariant check.
    pub fn new() -> Self {
        Self::with_evaluators(PolicyEngine::new(), InvariantEvaluator::with_charter_checks())
    }

    pub fn with_evaluators(policy: PolicyEngine, invariants: InvariantEvaluator) -> Self {
        Self { policy, invariants }
    }

    /// Build the maintenance report for one input.
    pub fn report(&self, input: &ReportInput) -> MaintenanceReport {
        let feature = &input.feature;
        let policy = self.policy.evaluate(feature);
        let invariants = self.invariants.evaluate(feature);
        let prohibited = self
            .policy
            .prohibited_targets(&feature.declared_optimization_targets)
            .len();
        let timestamp = input.timestamp.unwrap_or_else(Utc::now);

        let report = report::assemble(input, &policy, invariants, prohibited, timestamp);
        info!(
            feature = policy.feature_name(),
            score = report.drift_score().score(),
            invariant_violations = report.invariant_violations().len(),
            warnings = report.warnings().len(),
            "Maintenance report built"
        );
        report
    }

    /// Run the preflight gate for one input.
    pub fn preflight(&self, input: &FeatureInput) -> PreflightResult {
        let policy = self.policy.evaluate(input);
        let invariants = self.invariants.evaluate(input);
        let result = preflight::decide(input, &policy, &invariants);

        if result.passed() {
            info!(feature = policy.feature_name(), "Preflight PASS");
        } else {
            warn!(
                feature = policy.feature_name(),
                reasons = result.reasons().len(),
                "Preflight FAIL"
            );
        }
        result
    }

    /// Preflight plus report, with a safe-mode fallback when the gate fails.
    pub fn run(&self, input: &ReportInput) -> MaintenanceRun {
        let preflight = self.preflight(&input.feature);
        let report = self.report(input);
        let fallback = if preflight.passed() {
            None
        } else {
            Some(get_safe_mode_fallback(preflight.reasons().join("; ")))
        };

        MaintenanceRun {
            preflight,
            report,
            fallback,
        }
    }
}

impl Default for MaintenanceBot {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a maintenance report with the default bot.
pub fn build_maintenance_report(input: &ReportInput) -> MaintenanceReport {
    MaintenanceBot::new().report(input)
}

/// Run the maintenance preflight gate with the default bot.
pub fn evaluate_maintenance_preflight(input: &FeatureInput) -> PreflightResult {
    MaintenanceBot::new().preflight(input)
}
