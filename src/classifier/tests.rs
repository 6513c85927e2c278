use super::*;
use crate::terms::tables::{PROCESSED_TERMS, QC_TERMS};
use proptest::prelude::*;

fn classifier() -> Classifier {
    Classifier::new(TermTables::standard().unwrap())
}

fn food(key: &str) -> FoodKeyPatterns {
    FoodKeyPatterns::from_key(key).unwrap()
}

fn verdict(filename: &str, key: &str, assessment: Assessment) -> Verdict {
    classifier().classify(filename, &food(key), assessment)
}

// ==================== Rule Table ====================

#[test]
fn test_qc_rejected_before_assessment() {
    for assessment in [Assessment::Accepted, Assessment::Maybe, Assessment::Rejected] {
        let v = verdict("Blank_solvent_01.mzML", "rice", assessment);
        assert!(!v.keep);
        assert_eq!(v.reason, MatchReason::QcOrBlank);
    }
}

#[test]
fn test_accepted_keeps_everything_else() {
    let v = verdict("wheat_leaf_beer.mzML", "rice", Assessment::Accepted);
    assert_eq!(v, Verdict::keep(MatchReason::AcceptedNonQc));
}

#[test]
fn test_maybe_processed_without_raw_or_control() {
    let v = verdict("beer_final_03.mzML", "grain", Assessment::Maybe);
    assert_eq!(v, Verdict::reject(MatchReason::ProcessedNoRawSignal));
}

#[test]
fn test_maybe_non_edible_without_edible_signal() {
    let v = verdict("maize_leaf_02.mzML", "rice", Assessment::Maybe);
    assert_eq!(v, Verdict::reject(MatchReason::NonEdibleNoEdibleSignal));
}

#[test]
fn test_maybe_food_match_with_edible_part() {
    let v = verdict("rice-grain-01.mzML", "rice", Assessment::Maybe);
    assert_eq!(v, Verdict::keep(MatchReason::FoodMatchWithSignal));
}

#[test]
fn test_maybe_treatment_with_edible_but_no_control() {
    let v = verdict("infected_grain_05.mzML", "rice", Assessment::Maybe);
    assert_eq!(v, Verdict::reject(MatchReason::TreatmentWithoutControl));

    let v = verdict("rice-mutant.mzML", "rice", Assessment::Maybe);
    assert_eq!(v, Verdict::reject(MatchReason::TreatmentWithoutControl));
}

#[test]
fn test_maybe_raw_or_control_without_food() {
    let v = verdict("ctrl_raw_grain_01.mzML", "grain", Assessment::Maybe);
    assert_eq!(v, Verdict::keep(MatchReason::RawOrControlSignal));
}

#[test]
fn test_maybe_treated_control_is_kept() {
    let v = verdict("untreated_grain_07.mzML", "rice", Assessment::Maybe);
    assert_eq!(v, Verdict::keep(MatchReason::RawOrControlSignal));
}

#[test]
fn test_maybe_treatment_only() {
    let v = verdict("infected_04.mzML", "rice", Assessment::Maybe);
    assert_eq!(v, Verdict::reject(MatchReason::TreatmentOnlyNoSignal));
}

#[test]
fn test_maybe_insufficient_signal() {
    let v = verdict("run_04.mzML", "rice", Assessment::Maybe);
    assert_eq!(v, Verdict::reject(MatchReason::InsufficientSignal));
}

#[test]
fn test_rejected_assessment_is_unhandled() {
    let v = verdict("rice-grain.mzML", "rice", Assessment::Rejected);
    assert_eq!(v, Verdict::reject(MatchReason::UnhandledAssessment));
}

#[test]
fn test_empty_food_key_never_matches() {
    let v = verdict("rice-grain-01.mzML", "", Assessment::Maybe);
    assert_eq!(v, Verdict::reject(MatchReason::InsufficientSignal));
}

// ==================== Signals & Reasons ====================

#[test]
fn test_signals_scan() {
    let signals = classifier().signals("ctrl-rice-beer.mzML", &food("rice"));
    assert_eq!(
        signals,
        FilenameSignals {
            control: true,
            processed: true,
            food_match: true,
            ..Default::default()
        }
    );
}

#[test]
fn test_reason_priority() {
    assert!(MatchReason::RawOrControlSignal.mentions_raw_or_control());
    assert!(!MatchReason::FoodMatchWithSignal.mentions_raw_or_control());
    assert!(!MatchReason::AcceptedNonQc.mentions_raw_or_control());
}

#[test]
fn test_reason_serializes_as_tag() {
    let json = serde_json::to_string(&MatchReason::NonEdibleNoEdibleSignal).unwrap();
    assert_eq!(json, "\"non_edible_no_edible_signal\"");
    assert_eq!(
        MatchReason::NonEdibleNoEdibleSignal.to_string(),
        "non_edible_no_edible_signal"
    );
}

#[test]
fn test_assessment_parse() {
    assert_eq!("MAYBE".parse::<Assessment>().unwrap(), Assessment::Maybe);
    assert_eq!(" accepted ".parse::<Assessment>().unwrap(), Assessment::Accepted);
    assert!("PERHAPS".parse::<Assessment>().is_err());
}

// ==================== Properties ====================

const PROCESSED_SAMPLE: &[&str] = &["beer", "bread", "malt", "flour", "juice", "syrup", "pasta"];
const RAW_OR_CONTROL_SAMPLE: &[&str] = &["ctrl", "control", "raw", "untreated", "baseline"];
const NEUTRAL_STEMS: &[&str] = &["batch", "run", "lot"];

fn assessment_strategy() -> impl Strategy<Value = Assessment> {
    prop_oneof![
        Just(Assessment::Accepted),
        Just(Assessment::Maybe),
        Just(Assessment::Rejected),
    ]
}

proptest! {
    /// Any filename containing a QC term is rejected as QC
    #[test]
    fn prop_qc_terms_always_rejected(
        prefix in "[a-z]{0,8}",
        term in prop::sample::select(QC_TERMS),
        suffix in "[a-z0-9_]{0,8}",
        assessment in assessment_strategy(),
    ) {
        let filename = format!("{}{}{}.mzML", prefix, term, suffix);
        let v = verdict(&filename, "rice", assessment);
        prop_assert!(!v.keep);
        prop_assert_eq!(v.reason, MatchReason::QcOrBlank);
    }

    /// Accepted datasets keep every non-QC file
    #[test]
    fn prop_accepted_keeps_non_qc(name in "[a-z_]{1,16}") {
        let c = classifier();
        let filename = format!("{}.mzML", name);
        prop_assume!(!c.tables().matches_any(Category::Qc, &filename));
        let v = c.classify(&filename, &food("rice"), Assessment::Accepted);
        prop_assert!(v.keep);
    }

    /// Adding a raw or control term to a processed filename flips it to keep
    #[test]
    fn prop_raw_or_control_rescues_processed(
        stem in prop::sample::select(NEUTRAL_STEMS),
        term in prop::sample::select(PROCESSED_SAMPLE),
        signal in prop::sample::select(RAW_OR_CONTROL_SAMPLE),
        idx in 0u32..100,
    ) {
        let plain = format!("{}-{}-{:02}.mzML", stem, term, idx);
        let with_signal = format!("{}-{}-{}-{:02}.mzML", stem, term, signal, idx);

        let before = verdict(&plain, "grain", Assessment::Maybe);
        prop_assert_eq!(before, Verdict::reject(MatchReason::ProcessedNoRawSignal));

        let after = verdict(&with_signal, "grain", Assessment::Maybe);
        prop_assert!(after.keep);
    }

    /// Classification is a pure function of its inputs
    #[test]
    fn prop_classify_is_deterministic(
        name in "[a-z0-9_-]{1,24}",
        assessment in assessment_strategy(),
    ) {
        let c = classifier();
        let f = food("brown_rice");
        let filename = format!("{}.mzML", name);
        prop_assert_eq!(
            c.classify(&filename, &f, assessment),
            c.classify(&filename, &f, assessment)
        );
    }
}

#[test]
fn test_processed_sample_is_processed() {
    for term in PROCESSED_SAMPLE {
        assert!(PROCESSED_TERMS.contains(term));
    }
}
