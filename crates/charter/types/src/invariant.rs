use serde::Serialize;

/// A named, permanent behavioral guarantee.
///
/// Invariants are declared statically in [`INVARIANT_REGISTRY`] and are never
/// created or destroyed at runtime. The evaluation logic that checks them
/// lives in `charter-policy`; this type only carries the declaration.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct InvariantDefinition {
    /// Unique registry key (e.g. `no_central_control`).
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Optimization targets this invariant forbids.
    pub never_optimize_for: &'static [&'static str],
    /// Observable signals that usually indicate a violation. Informational.
    pub violation_signals: &'static [&'static str],
    /// How a violation is enforced.
    pub enforcement: &'static str,
    /// What the system falls back to when the invariant cannot be upheld.
    pub safe_failure: &'static str,
}

pub const NO_CENTRAL_CONTROL: &str = "no_central_control";
pub const INTENT_BEFORE_ACTION: &str = "intent_before_action";
pub const AUTHORITY_DECAYS_WITHOUT_CONTRIBUTION: &str = "authority_decays_without_contribution";
pub const KNOWLEDGE_OVER_POSITION: &str = "knowledge_over_position";

/// The process-wide invariant registry, in evaluation order.
pub static INVARIANT_REGISTRY: &[InvariantDefinition] = &[
    InvariantDefinition {
        id: NO_CENTRAL_CONTROL,
        title: "No Central Control",
        description: "No single actor, service or operator may accumulate unilateral control \
                      over decisions that affect others.",
        never_optimize_for: &["centralize power", "single point of control", "gatekeeping"],
        violation_signals: &[
            "one account can approve its own escalations",
            "routing all decisions through a single service",
            "removal of independent review paths",
        ],
        enforcement: "Blocking: changes that introduce central control are halted.",
        safe_failure: "Fall back to distributed human review; disable automated escalation.",
    },
    InvariantDefinition {
        id: INTENT_BEFORE_ACTION,
        title: "Intent Before Action",
        description: "Every automated action must carry a declared intent recorded before the \
                      action executes.",
        never_optimize_for: &["throughput without intent", "silent automation"],
        violation_signals: &[
            "actions executed without an intent record",
            "intent written after the action completed",
        ],
        enforcement: "Blocking outside mock mode; mock runs may proceed with a warning.",
        safe_failure: "Queue the action for human confirmation instead of executing it.",
    },
    InvariantDefinition {
        id: AUTHORITY_DECAYS_WITHOUT_CONTRIBUTION,
        title: "Authority Decays Without Contribution",
        description: "Authority is earned by ongoing contribution and lapses without it; \
                      high-risk (R3) actions require explicit human approval.",
        never_optimize_for: &["permanent authority", "approval bypass"],
        violation_signals: &[
            "stale roles retaining approval rights",
            "R3 actions executed without approval",
        ],
        enforcement: "Blocking when authority is bypassed; warning while approval plumbing is \
                      incomplete.",
        safe_failure: "Require human approval for every R3 action.",
    },
    InvariantDefinition {
        id: KNOWLEDGE_OVER_POSITION,
        title: "Knowledge Over Position",
        description: "Claims are weighed by their evidence, not by the position of whoever \
                      makes them.",
        never_optimize_for: &["authority deference", "unsourced claims"],
        violation_signals: &[
            "claims accepted without evidence",
            "rank used as justification",
        ],
        enforcement: "Blocking for claims without evidence; warning when evidence is incomplete.",
        safe_failure: "Treat unsupported claims as context only, never as justification.",
    },
];

/// Look up an invariant by id.
pub fn find_invariant(id: &str) -> Option<&'static InvariantDefinition> {
    INVARIANT_REGISTRY.iter().find(|inv| inv.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registry_has_four_invariants() {
        assert_eq!(INVARIANT_REGISTRY.len(), 4);
    }

    #[test]
    fn invariant_ids_are_unique() {
        let ids: HashSet<_> = INVARIANT_REGISTRY.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), INVARIANT_REGISTRY.len());
    }

    #[test]
    fn lookup_by_id() {
        let inv = find_invariant(KNOWLEDGE_OVER_POSITION).unwrap();
        assert_eq!(inv.title, "Knowledge Over Position");
        assert!(find_invariant("no_such_invariant").is_none());
    }

    #[test]
    fn every_invariant_is_fully_declared() {
        for inv in INVARIANT_REGISTRY {
            assert!(!inv.description.is_empty(), "{}", inv.id);
            assert!(!inv.never_optimize_for.is_empty(), "{}", inv.id);
            assert!(!inv.violation_signals.is_empty(), "{}", inv.id);
            assert!(!inv.enforcement.is_empty(), "{}", inv.id);
            assert!(!inv.safe_failure.is_empty(), "{}", inv.id);
        }
    }
}
