//! Exhaustive ordered-multiset search.
//!
//! Given a base product and a pool of modifier items, tries every way of
//! appending up to `max_depth` modifiers (order matters, repetition
//! allowed) and reports the sequence with the highest profit as computed
//! by an external evaluator.
//!
//! - **Combinatorics**: multiset combinations and distinct multiset
//!   permutations as lazy backtracking iterators, plus closed-form counts.
//! - **Pool**: master pool construction from a catalog (with a built-in
//!   fallback list) and per-request selection resolution.
//! - **Search**: the [`Evaluator`](search::Evaluator) contract and the
//!   exhaustive runner with deterministic first-found tie-breaking,
//!   cooperative cancellation and optional rayon parallelism.
//! - **Service**: request validation and response shaping for a transport
//!   layer.
//!
//! # Architecture
//!
//! The evaluator and the catalog are supplied by consumers; this crate
//! knows nothing about how a sequence is priced. Everything is
//! synchronous and CPU-bound, and no state crosses request boundaries
//! except the read-only [`PoolProvider`](pool::PoolProvider).

pub mod combinatorics;
pub mod error;
pub mod pool;
pub mod search;
pub mod service;

pub use error::SearchError;
