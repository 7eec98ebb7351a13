//! Error types for the aggregation engine.

use thiserror::Error;

/// Errors produced by the engine and its adapter boundary.
///
/// A growth figure without a baseline is deliberately not an error; see
/// [`crate::aggregate::GrowthStatus`].
#[derive(Error, Debug)]
pub enum EngineError {
    /// A non-finite or negative amount reached a sum or format function.
    #[error("invalid amount {value} in {context}")]
    InvalidAmount { context: String, value: f64 },
    /// An aggregation was requested without a year.
    #[error("period has no year")]
    MissingPeriod,
    /// User-provided input failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A backend row could not be mapped into an engine record.
    #[error("invalid {collection} row {index}: {reason}")]
    InvalidRow {
        collection: &'static str,
        index: usize,
        reason: String,
    },
    /// A configuration file was present but unusable.
    #[error("Config error: {0}")]
    Config(String),
    #[error("Duplicate channel alias in alias file: {0}")]
    DuplicateAlias(String),
    #[error("Failed to parse channel alias YAML: {0}")]
    AliasParse(#[from] serde_yml::Error),
    #[error(transparent)]
    Rows(#[from] salesportal_rows::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn invalid_amount(context: impl Into<String>, value: f64) -> Self {
        EngineError::InvalidAmount {
            context: context.into(),
            value,
        }
    }
}
