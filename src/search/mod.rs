//! Exhaustive sequence search.
//!
//! For a fixed base product and a pool of modifiers, evaluates every
//! sequence of up to `max_depth` modifiers (order matters, repetition
//! allowed) and keeps the one with the highest profit.
//!
//! The user supplies an [`Evaluator`]; the runner handles enumeration,
//! failure recovery, tie-breaking and statistics. There is no pruning:
//! every ordering is visited, so the result is the true optimum over the
//! search space (unless cancelled or timed out).
//!
//! # Cost
//!
//! A run evaluates `|pool| + |pool|^2 + ... + |pool|^max_depth`
//! sequences, hence the hard cap [`MAX_DEPTH`].

mod config;
mod runner;
mod types;

pub use config::{SearchConfig, MAX_DEPTH};
pub use runner::{BestResult, SearchOutcome, SearchRunner, SearchStats};
pub use types::{EvaluationError, Evaluator, Metrics};
