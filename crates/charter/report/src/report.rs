use charter_drift::{compute_drift_score, DriftInput, DriftScore};
use charter_policy::{
    InvariantEvaluation, APPEND_ONLY_REQUIRED, INTENT_MISSING_MOCK_ALLOWED, INTENT_REQUIRED,
    MISSING_HUMAN_APPROVAL_PLUMBING,
};
use charter_types::{FeatureInput, PolicyMessage, PolicyResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const REPORT_VERSION: &str = "v1";
pub const FORBIDDEN_TARGET_HIT: &str = "report::forbidden-target-hit";
pub const NO_DRIFT_RECOMMENDATION: &str = "No drift indicators detected.";

/// Input to the report builder: a feature plus report metadata.
///
/// `forbidden_target_hits` carries forbidden targets the caller detected
/// elsewhere (e.g. in referenced history claims). When `timestamp` is set
/// the report is fully determined by the input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportInput {
    #[serde(flatten)]
    pub feature: FeatureInput,
    pub forbidden_target_hits: Vec<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl ReportInput {
    pub fn new(feature: FeatureInput) -> Self {
        Self {
            feature,
            ..Self::default()
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// The operator-facing summary of one evaluation.
///
/// Created once per evaluation; nothing mutates it afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MaintenanceReport {
    version: &'static str,
    timestamp: DateTime<Utc>,
    drift_score: DriftScore,
    invariant_violations: Vec<PolicyMessage>,
    warnings: Vec<PolicyMessage>,
    recommendations: Vec<String>,
}

impl MaintenanceReport {
    pub fn version(&self) -> &str {
        self.version
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn drift_score(&self) -> &DriftScore {
        &self.drift_score
    }

    pub fn invariant_violations(&self) -> &[PolicyMessage] {
        &self.invariant_violations
    }

    pub fn warnings(&self) -> &[PolicyMessage] {
        &self.warnings
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Derive drift counts from the evaluators' output.
pub(crate) fn drift_input(
    policy: &PolicyResult,
    invariants: &InvariantEvaluation,
    prohibited_targets: usize,
    forbidden_hits: usize,
) -> DriftInput {
    let all_policy = || policy.violations().iter().chain(policy.warnings());

    DriftInput {
        invariant_violations_count: count(invariants.violations.len()),
        prohibited_target_hits_count: count(prohibited_targets.saturating_add(forbidden_hits)),
        missing_intent_count: count(
            all_policy()
                .filter(|m| m.id == INTENT_REQUIRED || m.id == INTENT_MISSING_MOCK_ALLOWED)
                .count(),
        ),
        append_only_breach_count: count(
            policy
                .violations()
                .iter()
                .filter(|m| m.id == APPEND_ONLY_REQUIRED)
                .count(),
        ),
        missing_approval_count: count(
            policy
                .warnings()
                .iter()
                .filter(|m| m.id == MISSING_HUMAN_APPROVAL_PLUMBING)
                .count(),
        ),
    }
}

fn recommendations(drift: &DriftScore) -> Vec<String> {
    let flagged: Vec<String> = drift
        .flagged()
        .map(|line| format!("Observation: {} flagged ({}).", line.label, line.count))
        .collect();

    if flagged.is_empty() {
        vec![NO_DRIFT_RECOMMENDATION.to_string()]
    } else {
        flagged
    }
}

/// Assemble the report from already-evaluated parts.
pub(crate) fn assemble(
    input: &ReportInput,
    policy: &PolicyResult,
    invariants: InvariantEvaluation,
    prohibited_targets: usize,
    timestamp: DateTime<Utc>,
) -> MaintenanceReport {
    let drift_score = compute_drift_score(&drift_input(
        policy,
        &invariants,
        prohibited_targets,
        input.forbidden_target_hits.len(),
    ));

    let mut warnings: Vec<PolicyMessage> = policy.warnings().to_vec();
    warnings.extend(
        policy
            .violations()
            .iter()
            .map(|v| PolicyMessage::new(v.id.clone(), format!("Violation: {}", v.message))),
    );
    warnings.extend(invariants.warnings);
    warnings.extend(input.forbidden_target_hits.iter().map(|hit| {
        PolicyMessage::new(
            FORBIDDEN_TARGET_HIT,
            format!("Forbidden target referenced: {hit}"),
        )
    }));

    let recommendations = recommendations(&drift_score);

    MaintenanceReport {
        version: REPORT_VERSION,
        timestamp,
        drift_score,
        invariant_violations: invariants.violations,
        warnings,
        recommendations,
    }
}
