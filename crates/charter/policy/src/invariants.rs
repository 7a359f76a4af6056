use charter_types::{
    FeatureInput, InvariantDefinition, PolicyMessage, AUTHORITY_DECAYS_WITHOUT_CONTRIBUTION,
    INTENT_BEFORE_ACTION, INVARIANT_REGISTRY, KNOWLEDGE_OVER_POSITION, NO_CENTRAL_CONTROL,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::engine::{resolve_intent, IntentResolution};

pub const INVARIANT_APPEND_ONLY_REQUIRED: &str = "invariant::append-only-required";

/// Id fragments that mark a message as advisory rather than blocking.
const ADVISORY_MARKERS: &[&str] = &[
    "approval-missing",
    "missing-evidence",
    ":mock-allowed",
    ":coverage-gap",
];

/// Message id for an invariant, optionally with a qualifier suffix.
pub fn invariant_message_id(invariant_id: &str, suffix: Option<&str>) -> String {
    match suffix {
        Some(s) => format!("invariant::{invariant_id}:{s}"),
        None => format!("invariant::{invariant_id}"),
    }
}

/// Whether a message id routes to warnings instead of violations.
pub fn is_advisory(id: &str) -> bool {
    ADVISORY_MARKERS.iter().any(|m| id.contains(m))
}

/// A check bound to one registered invariant.
///
/// A check returns every message it wants to raise; the evaluator decides
/// whether each one blocks, based on its id.
pub trait InvariantCheck: Send + Sync {
    /// Registry id of the invariant this check enforces.
    fn invariant_id(&self) -> &'static str;

    fn check(&self, input: &FeatureInput) -> Vec<PolicyMessage>;
}

/// `no_central_control`
pub struct NoCentralControlCheck;

impl InvariantCheck for NoCentralControlCheck {
    fn invariant_id(&self) -> &'static str {
        NO_CENTRAL_CONTROL
    }

    fn check(&self, input: &FeatureInput) -> Vec<PolicyMessage> {
        if input.central_control_detected {
            return vec![PolicyMessage::new(
                invariant_message_id(self.invariant_id(), None),
                "Central control detected: a single actor can decide for others",
            )];
        }
        Vec::new()
    }
}

/// `intent_before_action` - shares intent resolution with the policy
/// engine, including the mock-mode carve-out.
pub struct IntentBeforeActionCheck;

impl InvariantCheck for IntentBeforeActionCheck {
    fn invariant_id(&self) -> &'static str {
        INTENT_BEFORE_ACTION
    }

    fn check(&self, input: &FeatureInput) -> Vec<PolicyMessage> {
        match resolve_intent(input) {
            IntentResolution::Present => Vec::new(),
            IntentResolution::MockAllowed => vec![PolicyMessage::new(
                invariant_message_id(self.invariant_id(), Some("mock-allowed")),
                "Action proceeds without intent under mock mode",
            )],
            IntentResolution::Missing => vec![PolicyMessage::new(
                invariant_message_id(self.invariant_id(), None),
                "Action would execute without a declared intent",
            )],
        }
    }
}

/// `authority_decays_without_contribution`
pub struct AuthorityDecayCheck;

impl InvariantCheck for AuthorityDecayCheck {
    fn invariant_id(&self) -> &'static str {
        AUTHORITY_DECAYS_WITHOUT_CONTRIBUTION
    }

    fn check(&self, input: &FeatureInput) -> Vec<PolicyMessage> {
        if input.authority_bypass_detected {
            vec![PolicyMessage::new(
                invariant_message_id(self.invariant_id(), None),
                "Authority bypass detected: approval was skipped or inherited without contribution",
            )]
        } else if !input.requires_human_approval_for_r3 {
            vec![PolicyMessage::new(
                invariant_message_id(self.invariant_id(), Some("approval-missing")),
                "R3 actions lack human approval wiring",
            )]
        } else {
            Vec::new()
        }
    }
}

/// `knowledge_over_position`
pub struct KnowledgeOverPositionCheck;

impl InvariantCheck for KnowledgeOverPositionCheck {
    fn invariant_id(&self) -> &'static str {
        KNOWLEDGE_OVER_POSITION
    }

    fn check(&self, input: &FeatureInput) -> Vec<PolicyMessage> {
        if input.claims_without_evidence_detected {
            vec![PolicyMessage::new(
                invariant_message_id(self.invariant_id(), None),
                "Claims are being acted on without supporting evidence",
            )]
        } else if input.evidence_missing {
            vec![PolicyMessage::new(
                invariant_message_id(self.invariant_id(), Some("missing-evidence")),
                "Some evidence is missing; claims should be treated as context only",
            )]
        } else {
            Vec::new()
        }
    }
}

/// Result of running every invariant check over one input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InvariantEvaluation {
    pub violations: Vec<PolicyMessage>,
    pub warnings: Vec<PolicyMessage>,
}

impl InvariantEvaluation {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty() && self.warnings.is_empty()
    }
}

/// Invariant Evaluator - runs a check for every registered invariant.
///
/// The registry drives evaluation: a registered invariant with no check
/// yields a coverage-gap warning, so the registry and the evaluator cannot
/// drift apart silently.
pub struct InvariantEvaluator {
    checks: Vec<Box<dyn InvariantCheck>>,
}

impl InvariantEvaluator {
    /// Evaluator with no checks loaded.
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Evaluator with a check for each of the four charter invariants.
    pub fn with_charter_checks() -> Self {
        let mut evaluator = Self::new();

        evaluator.register(Box::new(NoCentralControlCheck));
        evaluator.register(Box::new(IntentBeforeActionCheck));
        evaluator.register(Box::new(AuthorityDecayCheck));
        evaluator.register(Box::new(KnowledgeOverPositionCheck));

        info!(count = evaluator.checks.len(), "Invariant checks loaded");
        evaluator
    }

    pub fn register(&mut self, check: Box<dyn InvariantCheck>) {
        debug!(id = check.invariant_id(), "Invariant check registered");
        self.checks.push(check);
    }

    pub fn count(&self) -> usize {
        self.checks.len()
    }

    /// Evaluate against the process invariant registry.
    pub fn evaluate(&self, input: &FeatureInput) -> InvariantEvaluation {
        self.evaluate_registry(INVARIANT_REGISTRY, input)
    }

    /// Evaluate against an explicit registry.
    pub fn evaluate_registry(
        &self,
        registry: &[InvariantDefinition],
        input: &FeatureInput,
    ) -> InvariantEvaluation {
        let mut evaluation = InvariantEvaluation::default();

        for invariant in registry {
            let messages = match self
                .checks
                .iter()
                .find(|c| c.invariant_id() == invariant.id)
            {
                Some(check) => check.check(input),
                None => {
                    warn!(id = invariant.id, "No check registered for invariant");
                    vec![PolicyMessage::new(
                        invariant_message_id(invariant.id, Some("coverage-gap")),
                        format!(
                            "Invariant '{}' is registered but has no check implemented",
                            invariant.title
                        ),
                    )]
                }
            };

            if messages.is_empty() {
                debug!(id = invariant.id, "Invariant holds");
            }

            for message in messages {
                if is_advisory(&message.id) {
                    debug!(id = %message.id, "Invariant warning");
                    evaluation.warnings.push(message);
                } else {
                    warn!(id = %message.id, detail = %message.message, "INVARIANT VIOLATION");
                    evaluation.violations.push(message);
                }
            }
        }

        if !input.append_only_preserved {
            evaluation.violations.push(PolicyMessage::new(
                INVARIANT_APPEND_ONLY_REQUIRED,
                "Append-only history is not preserved",
            ));
        }

        evaluation
    }
}

impl Default for InvariantEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate a feature against every charter invariant.
pub fn evaluate_invariant_violations(input: &FeatureInput) -> InvariantEvaluation {
    InvariantEvaluator::with_charter_checks().evaluate(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy() -> FeatureInput {
        FeatureInput::compliant("f")
    }

    #[test]
    fn healthy_input_passes_all_invariants() {
        assert!(evaluate_invariant_violations(&healthy()).is_clean());
    }

    #[test]
    fn evaluator_covers_whole_registry() {
        let evaluator = InvariantEvaluator::with_charter_checks();
        assert_eq!(evaluator.count(), INVARIANT_REGISTRY.len());
        for inv in INVARIANT_REGISTRY {
            let eval = evaluator.evaluate_registry(std::slice::from_ref(inv), &healthy());
            assert!(eval.is_clean(), "{} reported a gap", inv.id);
        }
    }

    #[test]
    fn central_control_is_a_violation() {
        let mut input = healthy();
        input.central_control_detected = true;

        let eval = evaluate_invariant_violations(&input);
        assert_eq!(eval.violations.len(), 1);
        assert_eq!(eval.violations[0].id, "invariant::no_central_control");
    }

    #[test]
    fn missing_intent_is_a_violation() {
        let mut input = healthy();
        input.intents_present = false;

        let eval = evaluate_invariant_violations(&input);
        assert_eq!(eval.violations[0].id, "invariant::intent_before_action");
    }

    #[test]
    fn mock_allowed_intent_is_a_warning() {
        let mut input = healthy();
        input.intents_present = false;
        input.mock_mode = true;
        input.allow_intentless_in_mock = true;

        let eval = evaluate_invariant_violations(&input);
        assert!(eval.violations.is_empty());
        assert_eq!(
            eval.warnings[0].id,
            "invariant::intent_before_action:mock-allowed"
        );
    }

    #[test]
    fn authority_bypass_outranks_missing_approval() {
        let mut input = healthy();
        input.authority_bypass_detected = true;
        input.requires_human_approval_for_r3 = false;

        let eval = evaluate_invariant_violations(&input);
        assert_eq!(
            eval.violations,
            vec![PolicyMessage::new(
                "invariant::authority_decays_without_contribution",
                "Authority bypass detected: approval was skipped or inherited without contribution",
            )]
        );
        assert!(eval.warnings.is_empty());
    }

    #[test]
    fn missing_approval_alone_warns() {
        let mut input = healthy();
        input.requires_human_approval_for_r3 = false;

        let eval = evaluate_invariant_violations(&input);
        assert!(eval.violations.is_empty());
        assert_eq!(
            eval.warnings[0].id,
            "invariant::authority_decays_without_contribution:approval-missing"
        );
    }

    #[test]
    fn evidence_checks() {
        let mut input = healthy();
        input.evidence_missing = true;
        let eval = evaluate_invariant_violations(&input);
        assert_eq!(
            eval.warnings[0].id,
            "invariant::knowledge_over_position:missing-evidence"
        );

        input.claims_without_evidence_detected = true;
        let eval = evaluate_invariant_violations(&input);
        assert_eq!(eval.violations[0].id, "invariant::knowledge_over_position");
        assert!(eval.warnings.is_empty());
    }

    #[test]
    fn append_only_breach_always_blocks() {
        let mut input = healthy();
        input.append_only_preserved = false;

        let eval = evaluate_invariant_violations(&input);
        assert_eq!(eval.violations.len(), 1);
        assert_eq!(eval.violations[0].id, INVARIANT_APPEND_ONLY_REQUIRED);

        // Even with no checks at all.
        let eval = InvariantEvaluator::new().evaluate_registry(&[], &input);
        assert_eq!(eval.violations[0].id, INVARIANT_APPEND_ONLY_REQUIRED);
    }

    #[test]
    fn unchecked_invariant_yields_coverage_gap_warning() {
        let registry = [InvariantDefinition {
            id: "reversible_by_default",
            title: "Reversible By Default",
            description: "Actions can be undone.",
            never_optimize_for: &["irreversibility"],
            violation_signals: &["hard deletes"],
            enforcement: "Blocking.",
            safe_failure: "Refuse the action.",
        }];

        let eval = InvariantEvaluator::with_charter_checks().evaluate_registry(&registry, &healthy());
        assert!(eval.violations.is_empty());
        assert_eq!(eval.warnings.len(), 1);
        assert_eq!(
            eval.warnings[0].id,
            "invariant::reversible_by_default:coverage-gap"
        );
    }

    #[test]
    fn empty_evaluator_reports_gap_for_every_invariant() {
        let eval = InvariantEvaluator::new().evaluate(&healthy());
        assert_eq!(eval.warnings.len(), INVARIANT_REGISTRY.len());
        assert!(eval.warnings.iter().all(|w| w.id.ends_with(":coverage-gap")));
    }

    #[test]
    fn advisory_routing() {
        assert!(is_advisory("invariant::x:approval-missing"));
        assert!(is_advisory("invariant::x:missing-evidence"));
        assert!(is_advisory("invariant::x:mock-allowed"));
        assert!(!is_advisory("invariant::no_central_control"));
        assert!(!is_advisory(INVARIANT_APPEND_ONLY_REQUIRED));
    }

    #[test]
    fn everything_broken() {
        let input = FeatureInput {
            central_control_detected: true,
            authority_bypass_detected: true,
            claims_without_evidence_detected: true,
            ..FeatureInput::default()
        };

        let eval = evaluate_invariant_violations(&input);
        // four invariant violations plus append-only
        assert_eq!(eval.violations.len(), 5);
        assert!(eval.warnings.is_empty());
    }
}
