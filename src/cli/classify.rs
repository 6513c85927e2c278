use anyhow::{Context, Result};
use std::path::Path;

use ms2triage::classifier::{Assessment, Classifier};
use ms2triage::food_key::FoodKeyPatterns;

use super::config::Config;

/// Print the verdict and signal categories for one filename
pub fn run(
    filename: &str,
    assessment: Assessment,
    food_key: &str,
    config: Option<&Path>,
) -> Result<()> {
    let config = Config::load(config)?;
    let classifier = Classifier::new(config.term_tables()?);
    let food = FoodKeyPatterns::from_key(food_key)
        .with_context(|| format!("Invalid food key: {}", food_key))?;

    let verdict = classifier.classify(filename, &food, assessment);
    let categories: Vec<_> = classifier
        .tables()
        .matching_categories(filename)
        .iter()
        .map(|c| c.key())
        .collect();

    println!("File:       {}", filename);
    println!("Assessment: {}", assessment);
    println!("Food key:   {}", if food_key.is_empty() { "-" } else { food_key });
    println!(
        "Categories: {}",
        if categories.is_empty() {
            "-".to_string()
        } else {
            categories.join(", ")
        }
    );
    println!("Food match: {}", food.is_match(filename));
    println!(
        "Verdict:    {} ({})",
        if verdict.keep { "keep" } else { "reject" },
        verdict.reason
    );
    Ok(())
}
