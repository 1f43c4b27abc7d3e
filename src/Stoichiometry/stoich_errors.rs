//! Error types shared by the formula parser, the chemical equation model and mixture utilities.
use thiserror::Error;

/// errors raised while parsing formulas and equations or computing derived properties
#[derive(Debug, Error)]
pub enum StoichError {
    /// malformed formula or equation text
    #[error("Format error in '{input}': {reason}")]
    Format { input: String, reason: String },
    /// element is known to the parser but has no standard atomic weight
    #[error("Unknown atomic weight of element '{symbol}' in formula '{formula}'")]
    UnknownElement { symbol: String, formula: String },
    /// species lookup failed
    #[error("Species '{species}' not found among {side}")]
    NotFound { species: String, side: String },
    #[error("Invalid fractions: {0}")]
    InvalidFractions(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoichError {
    pub(crate) fn format(input: &str, reason: impl Into<String>) -> Self {
        StoichError::Format {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
