//! # Filename Relevance Classifier
//!
//! Decides, from a filename alone, whether a file inside a dataset is worth
//! counting MS2 spectra for. The decision depends on the dataset's
//! [`Assessment`], the [`TermTables`] and the dataset's [`FoodKeyPatterns`];
//! it is a pure function of those inputs.
//!
//! Rules, first match wins:
//!
//! 1. QC / blank / standard term: reject (`qc_or_blank`)
//! 2. `ACCEPTED`: keep (`accepted_non_qc`)
//! 3. `MAYBE`:
//!    - processed term without control or raw term: reject
//!    - non-edible part without edible-part or control term: reject
//!    - food name plus raw, control or edible-part term: keep
//!    - treatment term with edible/food signal but no raw or control term: reject
//!    - raw or control term: keep
//!    - treatment term alone: reject
//!    - anything else: reject (`insufficient_signal`)
//! 4. any other assessment: reject (`unhandled_assessment`)

mod assessment;
mod reason;

#[cfg(test)]
mod tests;

pub use assessment::{Assessment, ParseAssessmentError};
pub use reason::MatchReason;

use serde::Serialize;

use crate::food_key::FoodKeyPatterns;
use crate::terms::{Category, TermTables};

/// Outcome of classifying one filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Whether the file should be analyzed
    pub keep: bool,
    /// Rule that decided
    pub reason: MatchReason,
}

impl Verdict {
    fn keep(reason: MatchReason) -> Self {
        Self { keep: true, reason }
    }

    fn reject(reason: MatchReason) -> Self {
        Self {
            keep: false,
            reason,
        }
    }
}

/// Category hits for a single filename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilenameSignals {
    /// QC, blank or standard term present
    pub qc: bool,
    /// Raw-material term present
    pub raw: bool,
    /// Control or baseline term present
    pub control: bool,
    /// Generic edible-part term present
    pub generic_edible: bool,
    /// Processed-product term present
    pub processed: bool,
    /// Non-edible plant-part term present
    pub non_edible: bool,
    /// Treatment or pathogen term present
    pub treatment: bool,
    /// Food name present
    pub food_match: bool,
}

impl FilenameSignals {
    /// Evaluate every category against `filename`.
    pub fn scan(tables: &TermTables, food: &FoodKeyPatterns, filename: &str) -> Self {
        Self {
            qc: tables.matches_any(Category::Qc, filename),
            raw: tables.matches_any(Category::Raw, filename),
            control: tables.matches_any(Category::Control, filename),
            generic_edible: tables.matches_any(Category::GenericEdiblePart, filename),
            processed: tables.matches_any(Category::Processed, filename),
            non_edible: tables.matches_any(Category::NonEdiblePlantPart, filename),
            treatment: tables.matches_any(Category::TreatmentPathogen, filename),
            food_match: food.is_match(filename),
        }
    }

    fn raw_or_control(&self) -> bool {
        self.raw || self.control
    }
}

/// Filename classifier over a set of compiled term tables.
#[derive(Debug, Clone)]
pub struct Classifier {
    tables: TermTables,
}

impl Classifier {
    /// Create a classifier over `tables`.
    pub fn new(tables: TermTables) -> Self {
        Self { tables }
    }

    /// The term tables in use.
    pub fn tables(&self) -> &TermTables {
        &self.tables
    }

    /// Category hits for `filename`.
    pub fn signals(&self, filename: &str, food: &FoodKeyPatterns) -> FilenameSignals {
        FilenameSignals::scan(&self.tables, food, filename)
    }

    /// Decide whether `filename` should be analyzed.
    pub fn classify(
        &self,
        filename: &str,
        food: &FoodKeyPatterns,
        assessment: Assessment,
    ) -> Verdict {
        decide(&self.signals(filename, food), assessment)
    }
}

/// Apply the rule table to precomputed signals.
pub fn decide(signals: &FilenameSignals, assessment: Assessment) -> Verdict {
    if signals.qc {
        return Verdict::reject(MatchReason::QcOrBlank);
    }

    match assessment {
        Assessment::Accepted => Verdict::keep(MatchReason::AcceptedNonQc),
        Assessment::Maybe => decide_maybe(signals),
        Assessment::Rejected => Verdict::reject(MatchReason::UnhandledAssessment),
    }
}

fn decide_maybe(s: &FilenameSignals) -> Verdict {
    if s.processed && !s.raw_or_control() {
        return Verdict::reject(MatchReason::ProcessedNoRawSignal);
    }
    if s.non_edible && !(s.generic_edible || s.control) {
        return Verdict::reject(MatchReason::NonEdibleNoEdibleSignal);
    }
    if s.food_match && (s.raw_or_control() || s.generic_edible) {
        return Verdict::keep(MatchReason::FoodMatchWithSignal);
    }
    if s.treatment && !s.raw_or_control() && (s.generic_edible || s.food_match) {
        return Verdict::reject(MatchReason::TreatmentWithoutControl);
    }
    if s.raw_or_control() {
        return Verdict::keep(MatchReason::RawOrControlSignal);
    }
    if s.treatment && !s.generic_edible && !s.food_match {
        return Verdict::reject(MatchReason::TreatmentOnlyNoSignal);
    }
    Verdict::reject(MatchReason::InsufficientSignal)
}
