use serde::{Deserialize, Serialize};
use tracing::warn;

/// Operating mode advertised by a fallback descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatingMode {
    #[serde(rename = "SAFE_MODE")]
    SafeMode,
}

/// Degraded-mode descriptor for when the engine itself cannot be evaluated
/// (malformed input, unavailable upstream). Distinct from a `FAIL` verdict.
///
/// The shape is fixed: automation and escalation are off and a human must
/// intervene.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeModeFallback {
    mode: OperatingMode,
    reason: String,
    automation_allowed: bool,
    escalation_allowed: bool,
    requires_human_intervention: bool,
}

impl SafeModeFallback {
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn automation_allowed(&self) -> bool {
        self.automation_allowed
    }

    pub fn escalation_allowed(&self) -> bool {
        self.escalation_allowed
    }

    pub fn requires_human_intervention(&self) -> bool {
        self.requires_human_intervention
    }
}

/// Build the safe-mode fallback descriptor.
pub fn get_safe_mode_fallback(reason: impl Into<String>) -> SafeModeFallback {
    let reason = reason.into();
    warn!(reason = %reason, "Entering safe mode");
    SafeModeFallback {
        mode: OperatingMode::SafeMode,
        reason,
        automation_allowed: false,
        escalation_allowed: false,
        requires_human_intervention: true,
    }
}
