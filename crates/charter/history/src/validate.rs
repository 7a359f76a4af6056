//! Content checks applied to a draft before it reaches the ledger.
//!
//! Each check is independent of ledger state; identity checks (duplicate
//! ids, challenge targets) live on the ledger itself.

use std::collections::HashSet;

use charter_types::{normalize_target, CONSTITUTION, INVARIANT_REGISTRY};
use tracing::debug;

use crate::claim::{ClaimDraft, Source};
use crate::error::{HistoryError, HistoryResult};

/// Controversy above which counter sources become mandatory.
pub const COUNTER_SOURCE_THRESHOLD: f64 = 0.3;

/// Single-word prescriptive markers.
const PRESCRIPTIVE_WORDS: &[&str] = &["should", "must"];

/// Two-word prescriptive markers.
const PRESCRIPTIVE_PHRASES: &[(&str, &str)] = &[
    ("ought", "to"),
    ("need", "to"),
    ("needs", "to"),
    ("have", "to"),
];

/// Any word starting with this is prescriptive (recommend, recommends, ...).
const PRESCRIPTIVE_PREFIX: &str = "recommend";

pub(crate) fn check_content(draft: &ClaimDraft) -> HistoryResult<()> {
    check_required(draft)?;
    check_scores(draft)?;
    if let Some(term) = find_prescriptive_term(&draft.claim_text) {
        return Err(HistoryError::PrescriptiveLanguage(term));
    }
    if let Some(target) = find_forbidden_target(&draft.claim_text) {
        return Err(HistoryError::ForbiddenTarget(target));
    }
    check_sources(&draft.sources)?;
    check_counter_sources(draft)?;
    Ok(())
}

fn check_required(draft: &ClaimDraft) -> HistoryResult<()> {
    let fields = [
        ("claim_text", &draft.claim_text),
        ("time_range", &draft.time_range),
        ("geography", &draft.geography),
        ("falsifiable_prompt", &draft.falsifiable_prompt),
    ];
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(HistoryError::MissingField(*name)),
        None => Ok(()),
    }
}

fn check_scores(draft: &ClaimDraft) -> HistoryResult<()> {
    for (field, value) in [
        ("confidence_score", draft.confidence_score),
        ("controversy_score", draft.controversy_score),
    ] {
        // NaN fails `contains`
        if !(0.0..=1.0).contains(&value) {
            return Err(HistoryError::ScoreOutOfRange { field, value });
        }
    }
    Ok(())
}

/// Lowercased words of `text`. Any non-alphanumeric character is a word
/// break, so `should/must` and `engagement-driven` split apart.
fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// First prescriptive term found in `text`, matched on whole words.
pub fn find_prescriptive_term(text: &str) -> Option<String> {
    let words = words(text);

    for (i, word) in words.iter().enumerate() {
        if PRESCRIPTIVE_WORDS.contains(&word.as_str()) || word.starts_with(PRESCRIPTIVE_PREFIX) {
            return Some(word.clone());
        }
        if let Some(next) = words.get(i + 1) {
            if PRESCRIPTIVE_PHRASES
                .iter()
                .any(|(first, second)| first == word && second == next)
            {
                return Some(format!("{} {}", word, next));
            }
        }
    }
    None
}

/// Every target a claim may not speak to: constitution non-goals plus each
/// invariant's never-optimize-for list, normalized.
pub fn forbidden_targets() -> Vec<String> {
    let mut targets = CONSTITUTION.normalized_non_goals();
    targets.extend(
        INVARIANT_REGISTRY
            .iter()
            .flat_map(|inv| inv.never_optimize_for.iter())
            .map(|t| normalize_target(t))
            .filter(|t| !t.is_empty()),
    );
    targets
}

/// First forbidden target overlapping `text`. Matching is by substring on
/// the word-split text, so inflections ("engagements") and hyphenated
/// compounds ("mass-surveillance") are caught.
pub fn find_forbidden_target(text: &str) -> Option<String> {
    let joined = words(text).join(" ");
    let hit = forbidden_targets()
        .into_iter()
        .find(|target| joined.contains(target.as_str()));
    if let Some(target) = &hit {
        debug!(forbidden = %target, "Claim text overlaps forbidden target");
    }
    hit
}

fn check_sources(sources: &[Source]) -> HistoryResult<()> {
    if sources.is_empty() {
        return Err(HistoryError::InsufficientSources("no sources given"));
    }

    let primary_publishers: HashSet<String> = sources
        .iter()
        .filter(|s| s.is_primary_or_data())
        .map(Source::publisher_key)
        .collect();
    if primary_publishers.is_empty() {
        return Err(HistoryError::InsufficientSources(
            "at least one primary or data source is required",
        ));
    }

    let independent = sources.iter().filter(|s| !s.is_primary_or_data()).any(|s| {
        let key = s.publisher_key();
        !key.is_empty() && !primary_publishers.contains(&key)
    });
    if !independent {
        return Err(HistoryError::InsufficientSources(
            "at least one independent secondary source is required",
        ));
    }
    Ok(())
}

fn check_counter_sources(draft: &ClaimDraft) -> HistoryResult<()> {
    if draft.controversy_score > COUNTER_SOURCE_THRESHOLD && draft.counter_sources.is_empty() {
        return Err(HistoryError::MissingCounterSources(draft.controversy_score));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::SourceKind;

    #[test]
    fn prescriptive_terms_are_whole_words() {
        assert_eq!(
            find_prescriptive_term("You SHOULD optimize pricing"),
            Some("should".into())
        );
        assert_eq!(
            find_prescriptive_term("Analysts recommended a freeze"),
            Some("recommended".into())
        );
        assert_eq!(
            find_prescriptive_term("Firms ought to disclose"),
            Some("ought to".into())
        );
        assert_eq!(
            find_prescriptive_term("Workers needs to"),
            Some("needs to".into())
        );
        assert_eq!(find_prescriptive_term("Mustard exports rose 4%"), None);
        assert_eq!(find_prescriptive_term("Tariffs have risen"), None);
    }

    #[test]
    fn prescriptive_terms_split_on_punctuation() {
        assert_eq!(
            find_prescriptive_term("Firms should/must disclose"),
            Some("should".into())
        );
        assert_eq!(
            find_prescriptive_term("A must-read ledger"),
            Some("must".into())
        );
        assert_eq!(
            find_prescriptive_term("Boards ought-to comply"),
            Some("ought to".into())
        );
    }

    #[test]
    fn forbidden_targets_include_non_goals_and_invariant_targets() {
        let targets = forbidden_targets();
        assert!(targets.contains(&"engagement".to_string()));
        assert!(targets.contains(&"gatekeeping".to_string()));
        assert!(targets.contains(&"silent automation".to_string()));
    }

    #[test]
    fn forbidden_target_matches_phrase() {
        assert_eq!(
            find_forbidden_target("Mass surveillance expanded after 2001"),
            Some("surveillance".into())
        );
        assert_eq!(
            find_forbidden_target("Guilds practiced gatekeeping"),
            Some("gatekeeping".into())
        );
        assert_eq!(find_forbidden_target("Railway mileage doubled"), None);
    }

    #[test]
    fn forbidden_target_survives_punctuation_and_inflection() {
        assert_eq!(
            find_forbidden_target("Engagement-driven feeds grew after 2012"),
            Some("engagement".into())
        );
        assert_eq!(
            find_forbidden_target("Mass-surveillance programs expanded after 2001"),
            Some("surveillance".into())
        );
        assert_eq!(
            find_forbidden_target("Platform engagements tripled in 2015"),
            Some("engagement".into())
        );
        assert_eq!(
            find_forbidden_target("Councils moved to centralize-power in 1850"),
            Some("centralize power".into())
        );
    }

    #[test]
    fn sources_need_primary_and_independent_secondary() {
        let primary = Source::new("Census 1900", "Census Bureau", SourceKind::Primary);
        let same_house = Source::new("Summary", " census bureau ", SourceKind::Secondary);
        let independent = Source::new("Review", "Journal of History", SourceKind::Secondary);

        assert!(check_sources(&[]).is_err());
        assert!(check_sources(&[independent.clone()]).is_err());
        assert!(check_sources(&[primary.clone(), same_house.clone()]).is_err());
        assert!(check_sources(&[primary, same_house, independent]).is_ok());
    }
}
