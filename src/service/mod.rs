//! Request boundary.
//!
//! [`Optimizer`] is the logical call surface a transport layer (HTTP,
//! IPC, CLI) exposes: it validates a request, resolves the pool against
//! the process-wide [`PoolProvider`], runs the search and shapes the
//! response. Transport concerns themselves live outside this crate.
//!
//! With the `serde` feature, request and response types use the field
//! names of the JSON API (`productType`, `maxK`, `selectedIngredients`;
//! `bestResult`, `calculationsCount`, ...).

mod optimizer;
mod types;

pub use optimizer::{Optimizer, MIN_REQUEST_DEPTH};
pub use types::{BestResultView, OptimizeRequest, OptimizeResponse};
