//! # charter-drift
//!
//! Drift score: how far a proposed change strays from the constitution and
//! invariants, as a health score in `0..=100`.
//!
//! Scoring is deliberately coarse. Five fixed factors each carry a weight;
//! any non-zero count costs the full weight, and the score is `100` minus
//! the triggered weights. Every line item carries its literal count and an
//! explanation, so a score drop can always be traced to a named cause.
//!
//! | factor | weight |
//! |---|---|
//! | invariants | 35 |
//! | prohibited-targets | 25 |
//! | intent | 20 |
//! | append-only | 15 |
//! | human-approval | 5 |
//!
//! [`DriftScore::normalized`] rescales the same score to `[0, 1]`; there is
//! no separate proportional model.

pub mod score;

pub use score::{
    compute_drift_score, DriftBand, DriftFactor, DriftInput, DriftLineItem, DriftScore,
    DRIFT_FACTORS, MAX_SCORE,
};
