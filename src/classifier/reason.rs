use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag naming the classifier rule that decided a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    /// QC, blank or standard injection
    QcOrBlank,
    /// Accepted dataset, non-QC file
    AcceptedNonQc,
    /// Processed product with no raw or control term
    ProcessedNoRawSignal,
    /// Non-edible part with no edible-part or control term
    NonEdibleNoEdibleSignal,
    /// Food name together with a raw, control or edible-part term
    FoodMatchWithSignal,
    /// Treated sample with edible/food signal but no raw or control term
    TreatmentWithoutControl,
    /// Raw or control term without a food name
    RawOrControlSignal,
    /// Treatment term and nothing else
    TreatmentOnlyNoSignal,
    /// No rule found enough evidence
    InsufficientSignal,
    /// Assessment the rules do not cover
    UnhandledAssessment,
}

impl MatchReason {
    /// Snake-case tag as persisted.
    pub fn as_str(self) -> &'static str {
        match self {
            MatchReason::QcOrBlank => "qc_or_blank",
            MatchReason::AcceptedNonQc => "accepted_non_qc",
            MatchReason::ProcessedNoRawSignal => "processed_no_raw_signal",
            MatchReason::NonEdibleNoEdibleSignal => "non_edible_no_edible_signal",
            MatchReason::FoodMatchWithSignal => "food_match_with_signal",
            MatchReason::TreatmentWithoutControl => "treatment_without_control",
            MatchReason::RawOrControlSignal => "raw_or_control_signal",
            MatchReason::TreatmentOnlyNoSignal => "treatment_only_no_signal",
            MatchReason::InsufficientSignal => "insufficient_signal",
            MatchReason::UnhandledAssessment => "unhandled_assessment",
        }
    }

    /// Whether the tag names raw or control evidence. Such files are counted
    /// first when a dataset has more candidates than the per-dataset cap.
    pub fn mentions_raw_or_control(self) -> bool {
        let tag = self.as_str();
        tag.contains("raw") || tag.contains("control")
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
