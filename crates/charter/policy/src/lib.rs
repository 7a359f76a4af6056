//! # charter-policy
//!
//! Policy Engine and Invariant Evaluator for the Charter policy layer.
//!
//! Both evaluators take the same [`FeatureInput`](charter_types::FeatureInput)
//! and run independently of each other:
//!
//! - [`PolicyEngine`] - checks declared optimization targets against the
//!   constitution's non-goals, and the structural requirements (declared
//!   intent, append-only history, R3 approval wiring)
//! - [`InvariantEvaluator`] - runs one [`InvariantCheck`] per registered
//!   invariant and reports coverage gaps for any invariant without a check
//!
//! Neither evaluator fails. Everything they find is a blocking violation or
//! an advisory warning in the returned value, and the same input always
//! produces the same output.
//!
//! Target matching is pluggable through [`TargetMatcher`]; the default
//! [`SubstringMatcher`] flags any target that equals or contains a non-goal.

pub mod engine;
pub mod invariants;
pub mod matcher;

pub use engine::{
    evaluate_policy, find_prohibited_targets, resolve_intent, IntentResolution, PolicyEngine,
    APPEND_ONLY_REQUIRED, INTENT_MISSING_MOCK_ALLOWED, INTENT_REQUIRED,
    MISSING_HUMAN_APPROVAL_PLUMBING, PROHIBITED_OPTIMIZATION_TARGET,
};
pub use invariants::{
    evaluate_invariant_violations, invariant_message_id, is_advisory, AuthorityDecayCheck,
    IntentBeforeActionCheck, InvariantCheck, InvariantEvaluation, InvariantEvaluator,
    KnowledgeOverPositionCheck, NoCentralControlCheck, INVARIANT_APPEND_ONLY_REQUIRED,
};
pub use matcher::{ProhibitedTargetHit, SubstringMatcher, TargetMatcher};
