//! Request-level error taxonomy.

use thiserror::Error;

use crate::search::EvaluationError;

/// Failures that reject a search request before any evaluation happens.
///
/// Evaluation failures inside a search never show up here: they are
/// recovered and only surface through
/// [`SearchStats`](crate::search::SearchStats) and logging. Only a direct
/// single evaluation reports them, as [`SearchError::Evaluation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The master pool holds no items. Configuration problem, not retried.
    #[error("item master pool is empty, cannot search all items")]
    EmptyPool,

    /// A selection was given but none of its entries exist in the master pool.
    #[error("no valid items in selection [{}] (checked against master pool)", .selection.join(", "))]
    InvalidSelection {
        /// The selection as supplied by the caller.
        selection: Vec<String>,
    },

    /// Requested depth lies outside the permitted range.
    #[error("max depth {requested} outside allowed range {min}..={max}")]
    BoundsViolation {
        requested: usize,
        min: usize,
        max: usize,
    },

    /// Missing or blank product identifier.
    #[error("missing or invalid product identifier")]
    InvalidProduct,

    /// The evaluator refused a directly requested sequence.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

impl SearchError {
    /// Whether the failure was caused by the caller's input rather than
    /// by how the service was configured.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, SearchError::EmptyPool)
    }
}
