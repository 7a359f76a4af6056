//! Property tests: reports and preflight verdicts are pure functions of
//! their input and stay consistent with the evaluators they summarize.

use charter_policy::{evaluate_invariant_violations, evaluate_policy};
use charter_report::*;
use charter_types::{FeatureInput, TerminalOutcome, CONSTITUTION};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

fn arb_feature() -> impl Strategy<Value = FeatureInput> {
    (
        prop_oneof![Just(String::new()), "[a-z-]{1,12}"],
        prop::collection::vec(
            prop_oneof![
                "[a-z ]{0,16}",
                prop::sample::select(CONSTITUTION.non_goals.to_vec()).prop_map(String::from),
            ],
            0..4,
        ),
        any::<[bool; 5]>(),
        any::<[bool; 4]>(),
    )
        .prop_map(|(name, targets, flags, detectors)| FeatureInput {
            feature_name: name,
            declared_optimization_targets: targets,
            intents_present: flags[0],
            append_only_preserved: flags[1],
            requires_human_approval_for_r3: flags[2],
            mock_mode: flags[3],
            allow_intentless_in_mock: flags[4],
            central_control_detected: detectors[0],
            authority_bypass_detected: detectors[1],
            claims_without_evidence_detected: detectors[2],
            evidence_missing: detectors[3],
        })
}

fn arb_report_input() -> impl Strategy<Value = ReportInput> {
    (
        arb_feature(),
        prop::collection::vec("[a-z]{3,10}", 0..3),
        0i64..2_000_000_000,
    )
        .prop_map(|(feature, hits, secs)| {
            let mut input = ReportInput::new(feature).at(Utc.timestamp_opt(secs, 0).unwrap());
            input.forbidden_target_hits = hits;
            input
        })
}

proptest! {
    #[test]
    fn report_is_referentially_transparent(input in arb_report_input()) {
        prop_assert_eq!(build_maintenance_report(&input), build_maintenance_report(&input));
    }

    #[test]
    fn report_mirrors_invariant_violations(input in arb_report_input()) {
        let report = build_maintenance_report(&input);
        let invariants = evaluate_invariant_violations(&input.feature);
        prop_assert_eq!(report.invariant_violations(), invariants.violations.as_slice());
    }

    #[test]
    fn report_recommendations_match_flagged_lines(input in arb_report_input()) {
        let report = build_maintenance_report(&input);
        let flagged = report.drift_score().flagged().count();
        if flagged == 0 {
            prop_assert_eq!(report.recommendations(), [NO_DRIFT_RECOMMENDATION.to_string()]);
        } else {
            prop_assert_eq!(report.recommendations().len(), flagged);
        }
    }

    #[test]
    fn report_warnings_include_every_policy_message(input in arb_report_input()) {
        let report = build_maintenance_report(&input);
        let policy = evaluate_policy(&input.feature);
        for msg in policy.violations().iter().chain(policy.warnings()) {
            prop_assert!(report.warnings().iter().any(|w| w.id == msg.id));
        }
    }

    #[test]
    fn fail_always_means_safe_mode(feature in arb_feature()) {
        let result = evaluate_maintenance_preflight(&feature);
        prop_assert_eq!(result.passed(), result.reasons().is_empty());
        if !result.passed() {
            prop_assert!(result.safe_mode());
            prop_assert!(result.requires_human_intervention());
            prop_assert_eq!(result.terminal_outcome(), TerminalOutcome::Halted);
        } else {
            prop_assert_eq!(result.terminal_outcome(), TerminalOutcome::Executed);
        }
    }

    #[test]
    fn preflight_passes_iff_no_violations_and_named(feature in arb_feature()) {
        let policy = evaluate_policy(&feature);
        let invariants = evaluate_invariant_violations(&feature);
        let expected = feature.has_feature_name()
            && policy.ok()
            && invariants.violations.is_empty();
        prop_assert_eq!(evaluate_maintenance_preflight(&feature).passed(), expected);
    }
}
