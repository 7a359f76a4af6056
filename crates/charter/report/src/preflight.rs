use charter_policy::InvariantEvaluation;
use charter_types::{FeatureInput, PolicyResult, TerminalOutcome};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FEATURE_NAME_REQUIRED: &str = "featureName is required";

/// Gate verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PreflightStatus {
    Pass,
    Fail,
}

impl fmt::Display for PreflightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreflightStatus::Pass => f.write_str("PASS"),
            PreflightStatus::Fail => f.write_str("FAIL"),
        }
    }
}

/// Outcome of the maintenance preflight gate.
///
/// A `Fail` always carries safe mode, human intervention and a `halted`
/// outcome; a `Pass` carries none of them and `executed`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PreflightResult {
    status: PreflightStatus,
    reasons: Vec<String>,
    #[serde(rename = "safeMode")]
    safe_mode: bool,
    #[serde(rename = "requiresHumanIntervention")]
    requires_human_intervention: bool,
    terminal_outcome: TerminalOutcome,
}

impl PreflightResult {
    fn from_reasons(reasons: Vec<String>) -> Self {
        if reasons.is_empty() {
            Self {
                status: PreflightStatus::Pass,
                reasons,
                safe_mode: false,
                requires_human_intervention: false,
                terminal_outcome: TerminalOutcome::Executed,
            }
        } else {
            Self {
                status: PreflightStatus::Fail,
                reasons,
                safe_mode: true,
                requires_human_intervention: true,
                terminal_outcome: TerminalOutcome::Halted,
            }
        }
    }

    pub fn status(&self) -> PreflightStatus {
        self.status
    }

    pub fn passed(&self) -> bool {
        self.status == PreflightStatus::Pass
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    pub fn safe_mode(&self) -> bool {
        self.safe_mode
    }

    pub fn requires_human_intervention(&self) -> bool {
        self.requires_human_intervention
    }

    pub fn terminal_outcome(&self) -> TerminalOutcome {
        self.terminal_outcome
    }
}

/// Decide the gate from already-evaluated parts. Only violations block.
pub(crate) fn decide(
    input: &FeatureInput,
    policy: &PolicyResult,
    invariants: &InvariantEvaluation,
) -> PreflightResult {
    let mut reasons = Vec::new();

    if !input.has_feature_name() {
        reasons.push(FEATURE_NAME_REQUIRED.to_string());
    }
    reasons.extend(policy.violations().iter().map(ToString::to_string));
    reasons.extend(invariants.violations.iter().map(ToString::to_string));

    PreflightResult::from_reasons(reasons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reasons_pass() {
        let result = PreflightResult::from_reasons(vec![]);
        assert!(result.passed());
        assert!(!result.safe_mode());
        assert!(!result.requires_human_intervention());
        assert_eq!(result.terminal_outcome(), TerminalOutcome::Executed);
    }

    #[test]
    fn any_reason_fails_into_safe_mode() {
        let result = PreflightResult::from_reasons(vec!["x".into()]);
        assert_eq!(result.status(), PreflightStatus::Fail);
        assert!(result.safe_mode());
        assert!(result.requires_human_intervention());
        assert_eq!(result.terminal_outcome(), TerminalOutcome::Halted);
    }

    #[test]
    fn serializes_documented_field_names() {
        let json = serde_json::to_value(PreflightResult::from_reasons(vec!["x".into()])).unwrap();
        assert_eq!(json["status"], "FAIL");
        assert_eq!(json["safeMode"], true);
        assert_eq!(json["requiresHumanIntervention"], true);
        assert_eq!(json["terminal_outcome"], "halted");
        assert_eq!(json["reasons"][0], "x");
    }
}
