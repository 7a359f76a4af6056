use serde::Serialize;

use crate::normalize::normalize_target;

/// The system constitution: a declared purpose and the optimization targets
/// the system must never pursue.
///
/// There is exactly one constitution per process ([`CONSTITUTION`]). It is
/// static data and cannot be mutated or replaced at runtime.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Constitution {
    /// What the system exists to do.
    pub purpose: &'static str,
    /// Prohibited optimization targets, in declaration order.
    pub non_goals: &'static [&'static str],
}

impl Constitution {
    /// Non-goals in their normalized, comparable form.
    ///
    /// Entries that normalize to an empty string are dropped; an empty
    /// non-goal would otherwise match every target.
    pub fn normalized_non_goals(&self) -> Vec<String> {
        self.non_goals
            .iter()
            .map(|g| normalize_target(g))
            .filter(|g| !g.is_empty())
            .collect()
    }
}

/// The process-wide constitution.
pub static CONSTITUTION: Constitution = Constitution {
    purpose: "Help operators run their business with transparent, accountable automation \
              that preserves human judgment and an append-only record of decisions.",
    non_goals: &[
        "engagement",
        "time on platform",
        "attention capture",
        "virality",
        "centralize power",
        "persuasion",
        "behavioral dependency",
        "ideological conformity",
        "surveillance",
        "data extraction",
    ],
};
