use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Score with no drift.
pub const MAX_SCORE: u32 = 100;

/// A fixed penalty factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriftFactor {
    pub id: &'static str,
    pub label: &'static str,
    /// Penalty applied in full as soon as the factor's count is non-zero.
    pub weight: u32,
}

/// The five drift factors, heaviest first. Weights sum to 100.
pub const DRIFT_FACTORS: [DriftFactor; 5] = [
    DriftFactor {
        id: "invariants",
        label: "Invariant violations",
        weight: 35,
    },
    DriftFactor {
        id: "prohibited-targets",
        label: "Prohibited optimization targets",
        weight: 25,
    },
    DriftFactor {
        id: "intent",
        label: "Missing intent",
        weight: 20,
    },
    DriftFactor {
        id: "append-only",
        label: "Append-only breaches",
        weight: 15,
    },
    DriftFactor {
        id: "human-approval",
        label: "Missing human approval",
        weight: 5,
    },
];

/// Counts that feed the drift score. Absent fields default to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DriftInput {
    pub invariant_violations_count: u32,
    pub prohibited_target_hits_count: u32,
    pub missing_intent_count: u32,
    pub append_only_breach_count: u32,
    pub missing_approval_count: u32,
}

impl DriftInput {
    /// Counts in [`DRIFT_FACTORS`] order.
    fn counts(&self) -> [u32; 5] {
        [
            self.invariant_violations_count,
            self.prohibited_target_hits_count,
            self.missing_intent_count,
            self.append_only_breach_count,
            self.missing_approval_count,
        ]
    }
}

/// One factor's contribution to the score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DriftLineItem {
    pub id: String,
    pub label: String,
    pub weight: u32,
    pub count: u32,
    pub penalty: u32,
    pub explanation: String,
}

impl DriftLineItem {
    fn from_factor(factor: &DriftFactor, count: u32) -> Self {
        let penalty = step_penalty(factor.weight, count);
        let explanation = if penalty > 0 {
            format!(
                "{}: {} observed, penalty {} of {}",
                factor.label, count, penalty, factor.weight
            )
        } else {
            format!("{}: {} observed, no penalty", factor.label, count)
        };

        Self {
            id: factor.id.to_string(),
            label: factor.label.to_string(),
            weight: factor.weight,
            count,
            penalty,
            explanation,
        }
    }

    pub fn is_flagged(&self) -> bool {
        self.penalty > 0
    }
}

/// Any non-zero count costs the full weight.
fn step_penalty(weight: u32, count: u32) -> u32 {
    if count > 0 {
        weight
    } else {
        0
    }
}

/// Coarse health band for a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriftBand {
    Critical,
    Degraded,
    Healthy,
}

impl DriftBand {
    pub fn for_score(score: u32) -> Self {
        if score >= 80 {
            DriftBand::Healthy
        } else if score >= 50 {
            DriftBand::Degraded
        } else {
            DriftBand::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DriftBand::Critical => "critical",
            DriftBand::Degraded => "degraded",
            DriftBand::Healthy => "healthy",
        }
    }
}

/// A health score in `0..=100` with the line items that explain it.
///
/// Built only by [`compute_drift_score`]; `score` always equals
/// `100 - Σ penalty`, clamped to `0..=100`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DriftScore {
    score: u32,
    lines: Vec<DriftLineItem>,
}

impl DriftScore {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> &[DriftLineItem] {
        &self.lines
    }

    /// Line items that cost points.
    pub fn flagged(&self) -> impl Iterator<Item = &DriftLineItem> {
        self.lines.iter().filter(|l| l.is_flagged())
    }

    pub fn total_penalty(&self) -> u32 {
        self.lines.iter().map(|l| l.penalty).sum()
    }

    /// The score rescaled to `[0.0, 1.0]`.
    pub fn normalized(&self) -> f64 {
        f64::from(self.score) / f64::from(MAX_SCORE)
    }

    pub fn band(&self) -> DriftBand {
        DriftBand::for_score(self.score)
    }
}

/// Compute the drift score for a set of counts.
pub fn compute_drift_score(input: &DriftInput) -> DriftScore {
    let lines: Vec<DriftLineItem> = DRIFT_FACTORS
        .iter()
        .zip(input.counts())
        .map(|(factor, count)| DriftLineItem::from_factor(factor, count))
        .collect();

    let penalty: u32 = lines.iter().map(|l| l.penalty).sum();
    let score = MAX_SCORE.saturating_sub(penalty);

    for line in lines.iter().filter(|l| l.is_flagged()) {
        debug!(factor = %line.id, count = line.count, penalty = line.penalty, "Drift factor flagged");
    }
    info!(score, penalty, "Drift score computed");

    DriftScore { score, lines }
}
