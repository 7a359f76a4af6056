use serde::{Deserialize, Serialize};

/// Feature name used when the caller leaves it blank.
pub const UNKNOWN_FEATURE: &str = "unknown";

/// A proposed change or action, as supplied by the caller.
///
/// Every field is optional on the wire: absent strings default to empty,
/// absent lists to empty and absent flags to `false`. Evaluation never
/// rejects an input for missing fields; it reports what the defaults imply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureInput {
    pub feature_name: String,
    pub declared_optimization_targets: Vec<String>,
    pub intents_present: bool,
    pub append_only_preserved: bool,
    #[serde(rename = "requiresHumanApprovalForR3")]
    pub requires_human_approval_for_r3: bool,
    pub mock_mode: bool,
    pub allow_intentless_in_mock: bool,

    // Detector flags consumed by the invariant evaluator.
    pub central_control_detected: bool,
    pub authority_bypass_detected: bool,
    pub claims_without_evidence_detected: bool,
    pub evidence_missing: bool,
}

impl FeatureInput {
    /// An input that satisfies every structural requirement.
    pub fn compliant(feature_name: impl Into<String>) -> Self {
        Self {
            feature_name: feature_name.into(),
            intents_present: true,
            append_only_preserved: true,
            requires_human_approval_for_r3: true,
            ..Self::default()
        }
    }

    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared_optimization_targets = targets.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the caller supplied a non-blank feature name.
    pub fn has_feature_name(&self) -> bool {
        !self.feature_name.trim().is_empty()
    }

    /// The feature name, or [`UNKNOWN_FEATURE`] when blank.
    pub fn resolved_feature_name(&self) -> &str {
        if self.has_feature_name() {
            self.feature_name.trim()
        } else {
            UNKNOWN_FEATURE
        }
    }
}
