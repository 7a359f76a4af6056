use charter_types::{normalize_target, FeatureInput, PolicyMessage, PolicyResult, CONSTITUTION};
use serde::Serialize;
use tracing::{debug, warn};

use crate::matcher::{ProhibitedTargetHit, SubstringMatcher, TargetMatcher};

pub const PROHIBITED_OPTIMIZATION_TARGET: &str = "policy::prohibited-optimization-target";
pub const INTENT_REQUIRED: &str = "policy::intent-required";
pub const INTENT_MISSING_MOCK_ALLOWED: &str = "policy::intent-missing-mock-allowed";
pub const APPEND_ONLY_REQUIRED: &str = "policy::append-only-required";
pub const MISSING_HUMAN_APPROVAL_PLUMBING: &str = "policy::missing-human-approval-plumbing";

/// How a feature's declared intent resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentResolution {
    /// Intent is declared.
    Present,
    /// Intent is missing but the run is a mock that explicitly allows it.
    MockAllowed,
    /// Intent is missing and nothing excuses it.
    Missing,
}

/// Resolve intent the same way for the policy engine and the invariant
/// evaluator.
pub fn resolve_intent(input: &FeatureInput) -> IntentResolution {
    if input.intents_present {
        IntentResolution::Present
    } else if input.mock_mode && input.allow_intentless_in_mock {
        IntentResolution::MockAllowed
    } else {
        IntentResolution::Missing
    }
}

/// Policy Engine - checks a proposed feature against the constitution's
/// non-goals and the structural requirements every change must meet.
///
/// Evaluation is pure: no I/O, no shared state, and every outcome is a
/// violation or warning in the returned [`PolicyResult`].
pub struct PolicyEngine {
    non_goals: Vec<String>,
    matcher: Box<dyn TargetMatcher>,
}

impl PolicyEngine {
    /// Engine over the process constitution with substring matching.
    pub fn new() -> Self {
        Self::with_matcher(Box::new(SubstringMatcher))
    }

    /// Engine over the process constitution with a custom matcher.
    pub fn with_matcher(matcher: Box<dyn TargetMatcher>) -> Self {
        Self {
            non_goals: CONSTITUTION.normalized_non_goals(),
            matcher,
        }
    }

    pub fn non_goals(&self) -> &[String] {
        &self.non_goals
    }

    /// Declared targets that hit a non-goal, one entry per distinct target.
    pub fn prohibited_targets(&self, targets: &[String]) -> Vec<ProhibitedTargetHit> {
        let mut hits: Vec<ProhibitedTargetHit> = Vec::new();

        for target in targets {
            if hits.iter().any(|h| &h.target == target) {
                continue;
            }
            let normalized = normalize_target(target);
            if normalized.is_empty() {
                continue;
            }
            if let Some(goal) = self
                .non_goals
                .iter()
                .find(|goal| self.matcher.matches(&normalized, goal))
            {
                debug!(
                    declared = %target,
                    non_goal = %goal,
                    matcher = self.matcher.name(),
                    "Prohibited target matched"
                );
                hits.push(ProhibitedTargetHit {
                    target: target.clone(),
                    non_goal: goal.clone(),
                });
            }
        }

        hits
    }

    /// Evaluate one feature.
    pub fn evaluate(&self, input: &FeatureInput) -> PolicyResult {
        let feature = input.resolved_feature_name();
        let mut violations = Vec::new();
        let mut warnings = Vec::new();

        let hits = self.prohibited_targets(&input.declared_optimization_targets);
        if !hits.is_empty() {
            let listed = hits
                .iter()
                .map(|h| format!("\"{}\"", h.target))
                .collect::<Vec<_>>()
                .join(", ");
            violations.push(PolicyMessage::new(
                PROHIBITED_OPTIMIZATION_TARGET,
                format!("Feature '{feature}' declares prohibited optimization targets: {listed}"),
            ));
        }

        match resolve_intent(input) {
            IntentResolution::Present => {}
            IntentResolution::MockAllowed => warnings.push(PolicyMessage::new(
                INTENT_MISSING_MOCK_ALLOWED,
                "Intent is missing; allowed only because this is a mock run",
            )),
            IntentResolution::Missing => violations.push(PolicyMessage::new(
                INTENT_REQUIRED,
                "A declared intent is required before the feature can act",
            )),
        }

        if !input.append_only_preserved {
            violations.push(PolicyMessage::new(
                APPEND_ONLY_REQUIRED,
                "History must remain append-only; edits and deletes are not permitted",
            ));
        }

        // Approval plumbing is still rolling out, so its absence only warns.
        if !input.requires_human_approval_for_r3 {
            warnings.push(PolicyMessage::new(
                MISSING_HUMAN_APPROVAL_PLUMBING,
                "R3 actions are not wired to require human approval",
            ));
        }

        let result = PolicyResult::new(feature, violations, warnings);
        if result.ok() {
            debug!(feature, warnings = result.warnings().len(), "Policy passed");
        } else {
            warn!(
                feature,
                violations = result.violations().len(),
                "Policy violations found"
            );
        }
        result
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate a feature with the default engine.
pub fn evaluate_policy(input: &FeatureInput) -> PolicyResult {
    PolicyEngine::new().evaluate(input)
}

/// Prohibited-target hits under the default engine.
pub fn find_prohibited_targets(targets: &[String]) -> Vec<ProhibitedTargetHit> {
    PolicyEngine::new().prohibited_targets(targets)
}
