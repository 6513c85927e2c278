//! Food-name patterns derived from a food identifier.
//!
//! A food key such as `brown_rice_grain` yields one whole-word pattern per
//! underscore-delimited token longer than two characters, plus one for the
//! whole phrase:
//!
//! ```
//! use ms2triage::food_key::FoodKeyPatterns;
//!
//! let food = FoodKeyPatterns::from_key("brown_rice_grain")?;
//! assert_eq!(
//!     food.patterns(),
//!     &[r"\bbrown\b", r"\bbrown_rice_grain\b", r"\bgrain\b", r"\brice\b"]
//! );
//! assert!(food.is_match("Rice-ctrl-01.mzML"));
//! # Ok::<(), ms2triage::terms::TermError>(())
//! ```

use regex::{RegexSet, RegexSetBuilder};
use std::collections::BTreeSet;

use crate::terms::TermError;

/// Tokens of this length or shorter never produce a pattern.
pub const MIN_TOKEN_LEN: usize = 3;

/// Compiled, de-duplicated food-name patterns.
#[derive(Debug, Clone)]
pub struct FoodKeyPatterns {
    key: String,
    set: RegexSet,
}

impl FoodKeyPatterns {
    /// Derive the pattern set for `key`. An empty key yields an empty set.
    pub fn from_key(key: &str) -> Result<Self, TermError> {
        let patterns = derive_patterns(key);
        let set = RegexSetBuilder::new(&patterns)
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            key: key.to_string(),
            set,
        })
    }

    /// The food key these patterns were derived from.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Pattern strings in sorted order.
    pub fn patterns(&self) -> &[String] {
        self.set.patterns()
    }

    /// True when no patterns were derived.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Returns true if the food name occurs in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.set.is_match(text)
    }
}

/// Word-boundary pattern strings for `key`, sorted and de-duplicated.
pub fn derive_patterns(key: &str) -> Vec<String> {
    if key.is_empty() {
        return Vec::new();
    }

    let mut patterns: BTreeSet<String> = key
        .split('_')
        .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
        .map(whole_word)
        .collect();
    patterns.insert(whole_word(key));
    patterns.into_iter().collect()
}

fn whole_word(text: &str) -> String {
    format!(r"\b{}\b", regex::escape(text))
}
