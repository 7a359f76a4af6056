use serde::Serialize;

/// Decides whether a declared optimization target hits a non-goal.
///
/// Both arguments arrive already normalized (see
/// `charter_types::normalize_target`). Implementations must flag at least
/// every target that contains a non-goal as a substring.
pub trait TargetMatcher: Send + Sync {
    fn matches(&self, target: &str, non_goal: &str) -> bool;

    /// Short identifier used in logs.
    fn name(&self) -> &str;
}

/// Exact-or-substring matching.
///
/// A target is prohibited when its normalized form equals or contains a
/// normalized non-goal. Empty non-goals never match.
#[derive(Clone, Copy, Debug, Default)]
pub struct SubstringMatcher;

impl TargetMatcher for SubstringMatcher {
    fn matches(&self, target: &str, non_goal: &str) -> bool {
        !non_goal.is_empty() && target.contains(non_goal)
    }

    fn name(&self) -> &str {
        "substring"
    }
}

/// A declared target that hit a non-goal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProhibitedTargetHit {
    /// The target as the caller declared it.
    pub target: String,
    /// The normalized non-goal it matched.
    pub non_goal: String,
}
