use charter_types::PolicyMessage;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ledger::HistoryLedger;

pub const HISTORY_INTENT_REQUIRED: &str = "history::intent-required";
pub const HISTORY_CONTEXT_ONLY: &str = "history::context-only";
pub const HISTORY_UNKNOWN_CLAIM: &str = "history::unknown-claim";

/// What a caller intends to do with history claims.
///
/// Only `Context` is permitted; history informs, it never justifies,
/// ranks or predicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryUsagePurpose {
    Context,
    Justification,
    Ranking,
    Prediction,
}

impl HistoryUsagePurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryUsagePurpose::Context => "context",
            HistoryUsagePurpose::Justification => "justification",
            HistoryUsagePurpose::Ranking => "ranking",
            HistoryUsagePurpose::Prediction => "prediction",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryUsageRequest {
    #[serde(default)]
    pub intent: String,
    pub purpose: HistoryUsagePurpose,
    #[serde(default)]
    pub claim_ids: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryUsageDecision {
    allowed: bool,
    reasons: Vec<PolicyMessage>,
}

impl HistoryUsageDecision {
    pub fn allowed(&self) -> bool {
        self.allowed
    }

    pub fn reasons(&self) -> &[PolicyMessage] {
        &self.reasons
    }
}

impl HistoryLedger {
    /// Gate a request to use ledger claims. Every failing condition is
    /// reported, not only the first.
    pub fn evaluate_usage(&self, request: &HistoryUsageRequest) -> HistoryUsageDecision {
        let mut reasons = Vec::new();

        if request.intent.trim().is_empty() {
            reasons.push(PolicyMessage::new(
                HISTORY_INTENT_REQUIRED,
                "History may only be consulted under a declared intent.",
            ));
        }
        if request.purpose != HistoryUsagePurpose::Context {
            reasons.push(PolicyMessage::new(
                HISTORY_CONTEXT_ONLY,
                format!(
                    "History may inform context only, not {}.",
                    request.purpose.as_str()
                ),
            ));
        }
        for id in &request.claim_ids {
            if self.get(id).is_none() {
                reasons.push(PolicyMessage::new(
                    HISTORY_UNKNOWN_CLAIM,
                    format!("Claim '{}' is not in the ledger.", id),
                ));
            }
        }

        let allowed = reasons.is_empty();
        if allowed {
            debug!(claims = request.claim_ids.len(), "History usage allowed");
        } else {
            warn!(reasons = reasons.len(), "History usage denied");
        }
        HistoryUsageDecision { allowed, reasons }
    }
}
