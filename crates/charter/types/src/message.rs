use serde::{Deserialize, Serialize};
use std::fmt;

/// A single violation or warning.
///
/// `id` is a stable, namespaced key (`policy::intent-required`,
/// `invariant::no_central_control`, ...) that callers match on; `message`
/// is for humans.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyMessage {
    pub id: String,
    pub message: String,
}

impl PolicyMessage {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for PolicyMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.id, self.message)
    }
}

/// Outcome of evaluating one feature against the constitution.
///
/// `ok` is derived from `violations` at construction and the fields are not
/// mutable afterwards, so `ok == violations.is_empty()` always holds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyResult {
    ok: bool,
    violations: Vec<PolicyMessage>,
    warnings: Vec<PolicyMessage>,
    feature_name: String,
}

impl PolicyResult {
    pub fn new(
        feature_name: impl Into<String>,
        violations: Vec<PolicyMessage>,
        warnings: Vec<PolicyMessage>,
    ) -> Self {
        Self {
            ok: violations.is_empty(),
            violations,
            warnings,
            feature_name: feature_name.into(),
        }
    }

    pub fn ok(&self) -> bool {
        self.ok
    }

    pub fn violations(&self) -> &[PolicyMessage] {
        &self.violations
    }

    pub fn warnings(&self) -> &[PolicyMessage] {
        &self.warnings
    }

    pub fn feature_name(&self) -> &str {
        &self.feature_name
    }

    /// True if any violation or warning carries `id`.
    pub fn has_message(&self, id: &str) -> bool {
        self.violations
            .iter()
            .chain(self.warnings.iter())
            .any(|m| m.id == id)
    }
}
