//! Error types for settings validation and store operations.

use thiserror::Error;

/// Primary error type for settings boundary checks.
///
/// Every variant names the offending field so callers can surface precise
/// feedback instead of a generic rejection. Dotted paths are used for nested
/// offenders (for example `profitLossReportPeriod.year` or `explorers.BTC`).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// A required settings field was absent from a full state document.
    #[error("missing settings field '{field}'")]
    MissingField {
        /// Wire name of the absent field.
        field: String,
    },
    /// A field was present but its value failed validation.
    #[error("invalid value for settings field '{field}': {reason}")]
    InvalidField {
        /// Wire name of the field that failed validation.
        field: String,
        /// Offending value rendered as JSON, when available.
        value: Option<String>,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// A key outside the closed settings field set was encountered.
    #[error("unknown settings field '{field}'")]
    UnknownField {
        /// Wire name of the unexpected key.
        field: String,
    },
}

impl SettingsError {
    /// Wire name of the field the error refers to.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field }
            | Self::InvalidField { field, .. }
            | Self::UnknownField { field } => field,
        }
    }
}

/// Convenience alias for settings results.
pub type SettingsResult<T> = Result<T, SettingsError>;
