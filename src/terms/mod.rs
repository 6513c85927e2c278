//! # Filename Term Categories
//!
//! Seven categories of filename vocabulary drive the relevance heuristics:
//!
//! | Category | Meaning |
//! |----------|---------|
//! | `Raw` | raw / unprocessed material |
//! | `Control` | controls, baselines, time-zero samples |
//! | `GenericEdiblePart` | grain, fruit, pulp, ... |
//! | `Processed` | beer, bread, extracts, cooking steps |
//! | `NonEdiblePlantPart` | leaves, stems, husks, cultures |
//! | `TreatmentPathogen` | infections, treatments, mutants |
//! | `Qc` | QC injections, blanks, standards |
//!
//! The standard lists live in [`tables`]. They are data, not logic: a
//! [`TermTables`] is compiled from them once, can be extended per category
//! through [`TermTablesBuilder`], and is then shared read-only by every worker.
//!
//! ```
//! use ms2triage::terms::{Category, TermTables};
//!
//! let tables = TermTables::standard()?;
//! assert!(tables.matches_any(Category::Qc, "Pooled_QC_03.mzML"));
//! assert!(!tables.matches_any(Category::Qc, "ctrl_grain_01.mzML"));
//! # Ok::<(), ms2triage::terms::TermError>(())
//! ```

mod error;
pub mod tables;


use regex::{RegexSet, RegexSetBuilder};
use std::fmt;

pub use error::TermError;

/// A named category of filename vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Raw, unprocessed material
    Raw,
    /// Control or baseline samples
    Control,
    /// Generic edible plant parts
    GenericEdiblePart,
    /// Processed products and processing steps
    Processed,
    /// Non-edible plant parts and cultures
    NonEdiblePlantPart,
    /// Treatments, pathogens and genetic modifications
    TreatmentPathogen,
    /// QC, blank and standard injections
    Qc,
}

impl Category {
    /// All categories in table order.
    pub const ALL: [Category; 7] = [
        Category::Raw,
        Category::Control,
        Category::GenericEdiblePart,
        Category::Processed,
        Category::NonEdiblePlantPart,
        Category::TreatmentPathogen,
        Category::Qc,
    ];

    /// Snake-case key used in configuration files and diagnostics.
    pub fn key(self) -> &'static str {
        match self {
            Category::Raw => "raw",
            Category::Control => "control",
            Category::GenericEdiblePart => "generic_edible_part",
            Category::Processed => "processed",
            Category::NonEdiblePlantPart => "non_edible_plant_part",
            Category::TreatmentPathogen => "treatment_pathogen",
            Category::Qc => "qc",
        }
    }

    /// The built-in term list for this category.
    pub fn standard_terms(self) -> &'static [&'static str] {
        match self {
            Category::Raw => tables::RAW_TERMS,
            Category::Control => tables::CONTROL_TERMS,
            Category::GenericEdiblePart => tables::GENERIC_EDIBLE_PART_TERMS,
            Category::Processed => tables::PROCESSED_TERMS,
            Category::NonEdiblePlantPart => tables::NON_EDIBLE_PLANT_PART_TERMS,
            Category::TreatmentPathogen => tables::TREATMENT_PATHOGEN_TERMS,
            Category::Qc => tables::QC_TERMS,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Compiled matcher sets, one per [`Category`].
#[derive(Debug, Clone)]
pub struct TermTables {
    sets: Vec<RegexSet>,
}

impl TermTables {
    /// Compile the built-in term lists.
    pub fn standard() -> Result<Self, TermError> {
        TermTablesBuilder::standard().build()
    }

    /// Start from the built-in lists and extend them before compiling.
    pub fn builder() -> TermTablesBuilder {
        TermTablesBuilder::standard()
    }

    /// Returns true if any term of `category` occurs in `text`.
    pub fn matches_any(&self, category: Category, text: &str) -> bool {
        self.sets[category.index()].is_match(text)
    }

    /// Patterns compiled for `category`, in insertion order.
    pub fn patterns(&self, category: Category) -> &[String] {
        self.sets[category.index()].patterns()
    }

    /// Every category whose terms occur in `text`.
    pub fn matching_categories(&self, text: &str) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| self.matches_any(*category, text))
            .collect()
    }
}

/// Builder for [`TermTables`] with per-category extensions.
#[derive(Debug, Clone)]
pub struct TermTablesBuilder {
    terms: Vec<Vec<String>>,
}

impl TermTablesBuilder {
    /// A builder preloaded with the built-in lists.
    pub fn standard() -> Self {
        let terms = Category::ALL
            .iter()
            .map(|category| {
                category
                    .standard_terms()
                    .iter()
                    .map(|term| term.to_string())
                    .collect()
            })
            .collect();
        Self { terms }
    }

    /// A builder with every category empty.
    pub fn empty() -> Self {
        Self {
            terms: vec![Vec::new(); Category::ALL.len()],
        }
    }

    /// Append patterns to a category. Duplicates are ignored.
    pub fn extend<I, S>(mut self, category: Category, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = &mut self.terms[category.index()];
        for pattern in patterns {
            let pattern = pattern.into();
            if !list.contains(&pattern) {
                list.push(pattern);
            }
        }
        self
    }

    /// Compile every category into a case-insensitive regex set.
    pub fn build(self) -> Result<TermTables, TermError> {
        let mut sets = Vec::with_capacity(self.terms.len());
        for (category, patterns) in Category::ALL.iter().zip(self.terms) {
            let set = RegexSetBuilder::new(&patterns)
                .case_insensitive(true)
                .build()
                .map_err(|source| TermError::InvalidPattern {
                    category: category.key(),
                    source,
                })?;
            sets.push(set);
        }
        Ok(TermTables { sets })
    }
}
