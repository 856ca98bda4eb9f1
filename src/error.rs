//! Error types.
//!
//! Every error is raised while validating inputs, before the first
//! generation runs. Once a run starts the engine cannot fail; a run in which
//! nothing but the empty selection is feasible is a normal outcome.

/// Errors reported by configuration and input validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A [`GaConfig`](crate::ga::GaConfig) parameter is out of range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    /// A catalog item carries a negative or non-finite attribute.
    #[error("invalid item {index}: {field} = {value} (must be finite and >= 0)")]
    InvalidItem {
        index: usize,
        field: &'static str,
        value: f64,
    },

    /// A capacity limit is negative or non-finite.
    #[error("invalid capacity: {field} = {value} (must be finite and >= 0)")]
    InvalidCapacity { field: &'static str, value: f64 },

    /// A selection vector does not match the catalog length.
    #[error("selection length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

impl Error {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
