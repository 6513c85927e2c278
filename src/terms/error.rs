/// Errors raised while compiling term or food-key patterns
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    /// A category pattern failed to compile
    #[error("Invalid pattern in category '{category}': {source}")]
    InvalidPattern {
        /// Category key the pattern belongs to
        category: &'static str,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A derived food-key pattern failed to compile
    #[error("Invalid food-key pattern: {0}")]
    InvalidFoodKey(#[from] regex::Error),
}
