//! Request validation and dispatch.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::info;

use super::types::{OptimizeRequest, OptimizeResponse};
use crate::error::SearchError;
use crate::pool::PoolProvider;
use crate::search::{Evaluator, Metrics, SearchConfig, SearchRunner, MAX_DEPTH};

/// Smallest depth an optimize request may ask for.
///
/// Base-only evaluation goes through [`Optimizer::evaluate_single`]
/// instead.
pub const MIN_REQUEST_DEPTH: usize = 1;

/// Serves optimize and single-evaluation requests.
///
/// Borrows the process-wide [`PoolProvider`] and evaluator; each request
/// gets its own pool snapshot and result accumulator.
///
/// # Examples
///
/// ```
/// use u_seqsearch::pool::{Pool, PoolProvider};
/// use u_seqsearch::search::{EvaluationError, Metrics};
/// use u_seqsearch::service::{OptimizeRequest, Optimizer};
///
/// let provider = PoolProvider::new(Pool::new(["A", "B"]));
/// let eval = |_base: &str, seq: &[&str]| -> Result<Metrics, EvaluationError> {
///     Ok(Metrics::new(seq.iter().filter(|s| **s == "B").count() as f64, 0.0))
/// };
///
/// let optimizer = Optimizer::new(&provider, &eval);
/// let response = optimizer.optimize(&OptimizeRequest::new("Base", 1)).unwrap();
/// assert_eq!(response.best_result.unwrap().order, vec!["B"]);
/// assert_eq!(response.calculations_count, 2);
/// ```
pub struct Optimizer<'a, E> {
    provider: &'a PoolProvider,
    evaluator: &'a E,
    config: SearchConfig,
}

impl<'a, E: Evaluator> Optimizer<'a, E> {
    pub fn new(provider: &'a PoolProvider, evaluator: &'a E) -> Self {
        Self {
            provider,
            evaluator,
            config: SearchConfig::default(),
        }
    }

    /// Sets the search settings applied to every request.
    ///
    /// `max_depth` is taken from each request and overrides the value here.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs an exhaustive search for `request`.
    ///
    /// # Errors
    /// - [`SearchError::InvalidProduct`]: blank product identifier
    /// - [`SearchError::BoundsViolation`]: depth outside `1..=8`
    /// - [`SearchError::InvalidSelection`]: selection matches no item
    /// - [`SearchError::EmptyPool`]: no selection and an empty master pool
    pub fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizeResponse, SearchError> {
        self.optimize_with_cancel(request, None)
    }

    /// Like [`optimize`](Self::optimize), abandoning the search once
    /// `cancel` is set (e.g. the client went away).
    pub fn optimize_with_cancel(
        &self,
        request: &OptimizeRequest,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<OptimizeResponse, SearchError> {
        info!(
            "received request: product={}, max depth={}, selected={}",
            request.product,
            request.max_depth,
            if request.selection.is_empty() {
                "none".to_string()
            } else {
                request.selection.join(",")
            }
        );

        validate(request)?;
        let pool = self.provider.resolve(&request.selection)?;
        let config = self.config.clone().with_max_depth(request.max_depth);

        let outcome =
            SearchRunner::run_with_cancel(self.evaluator, &request.product, &pool, &config, cancel)?;
        Ok(OptimizeResponse::from_outcome(request, outcome))
    }

    /// Evaluates one sequence directly, without searching.
    ///
    /// The sequence is passed through unfiltered; only the product
    /// identifier is checked.
    ///
    /// # Errors
    /// - [`SearchError::InvalidProduct`]: blank product identifier
    /// - [`SearchError::Evaluation`]: the evaluator refused the sequence
    pub fn evaluate_single(
        &self,
        product: &str,
        sequence: &[String],
    ) -> Result<Metrics, SearchError> {
        validate_product(product)?;
        let names: Vec<&str> = sequence.iter().map(String::as_str).collect();
        Ok(self.evaluator.evaluate(product, &names)?)
    }
}

fn validate_product(product: &str) -> Result<(), SearchError> {
    if product.trim().is_empty() {
        return Err(SearchError::InvalidProduct);
    }
    Ok(())
}

fn validate(request: &OptimizeRequest) -> Result<(), SearchError> {
    validate_product(&request.product)?;
    if !(MIN_REQUEST_DEPTH..=MAX_DEPTH).contains(&request.max_depth) {
        return Err(SearchError::BoundsViolation {
            requested: request.max_depth,
            min: MIN_REQUEST_DEPTH,
            max: MAX_DEPTH,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Pool;
    use crate::search::EvaluationError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn count_a(_base: &str, seq: &[&str]) -> Result<Metrics, EvaluationError> {
        let a = seq.iter().filter(|s| **s == "A").count() as f64;
        Ok(Metrics::new(a, 0.0).with_effects(["Shiny"]))
    }

    fn provider() -> PoolProvider {
        PoolProvider::new(Pool::new(["A", "B"]))
    }

    #[test]
    fn test_optimize_scenario() {
        let provider = provider();
        let optimizer = Optimizer::new(&provider, &count_a);
        let response = optimizer.optimize(&OptimizeRequest::new("Base", 2)).unwrap();

        let best = response.best_result.expect("best result");
        assert_eq!(best.order, vec!["A", "A"]);
        assert_eq!(best.profit, 2.0);
        assert_eq!(best.price, 2.0);
        assert_eq!(best.effects, vec!["Shiny"]);
        assert_eq!(response.calculations_count, 6);
        assert_eq!(response.mode_description, "Using all 2 available items.");
        assert_eq!(response.product_type, "Base");
        assert_eq!(response.requested_max_depth, 2);
        assert!(response.duration_seconds >= 0.0);
    }

    #[test]
    fn test_selection_restricts_pool() {
        let provider = provider();
        let optimizer = Optimizer::new(&provider, &count_a);
        let request = OptimizeRequest::new("Base", 2).with_selection(["B", "Z"]);
        let response = optimizer.optimize(&request).unwrap();

        // Only "B" is searchable, so the best is the (earlier) baseline.
        assert_eq!(response.best_result.unwrap().order, Vec::<String>::new());
        assert_eq!(response.calculations_count, 2);
        assert_eq!(response.mode_description, "Using only selected items: B");
    }

    #[test]
    fn test_invalid_selection() {
        let provider = provider();
        let optimizer = Optimizer::new(&provider, &count_a);
        let request = OptimizeRequest::new("Base", 2).with_selection(["Z"]);
        assert_eq!(
            optimizer.optimize(&request).unwrap_err(),
            SearchError::InvalidSelection {
                selection: vec!["Z".into()]
            }
        );
    }

    #[test]
    fn test_depth_zero_rejected() {
        let calls = AtomicUsize::new(0);
        let eval = |_base: &str, _seq: &[&str]| -> Result<Metrics, EvaluationError> {
            calls.fetch_add(1, Ordering::Relaxed);
            Ok(Metrics::default())
        };
        let provider = provider();
        let optimizer = Optimizer::new(&provider, &eval);
        let err = optimizer
            .optimize(&OptimizeRequest::new("Base", 0))
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::BoundsViolation {
                requested: 0,
                min: 1,
                max: 8
            }
        );
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_depth_above_cap_rejected() {
        let provider = provider();
        let optimizer = Optimizer::new(&provider, &count_a);
        assert!(matches!(
            optimizer.optimize(&OptimizeRequest::new("Base", 9)),
            Err(SearchError::BoundsViolation { requested: 9, .. })
        ));
    }

    #[test]
    fn test_blank_product_rejected() {
        let provider = provider();
        let optimizer = Optimizer::new(&provider, &count_a);
        assert_eq!(
            optimizer
                .optimize(&OptimizeRequest::new("  ", 2))
                .unwrap_err(),
            SearchError::InvalidProduct
        );
    }

    #[test]
    fn test_empty_master_pool() {
        let provider = PoolProvider::new(Pool::new(Vec::<String>::new()));
        let optimizer = Optimizer::new(&provider, &count_a);
        let err = optimizer
            .optimize(&OptimizeRequest::new("Base", 1))
            .unwrap_err();
        assert_eq!(err, SearchError::EmptyPool);
        assert!(!err.is_caller_error());
    }

    #[test]
    fn test_incompatible_base_yields_null_best() {
        let eval = |base: &str, _seq: &[&str]| -> Result<Metrics, EvaluationError> {
            Err(EvaluationError::IncompatibleBase(base.to_string()))
        };
        let provider = provider();
        let optimizer = Optimizer::new(&provider, &eval);
        let response = optimizer.optimize(&OptimizeRequest::new("Nope", 2)).unwrap();
        assert!(response.best_result.is_none());
        assert_eq!(response.calculations_count, 6);
    }

    #[test]
    fn test_cancelled_request() {
        let provider = provider();
        let optimizer = Optimizer::new(&provider, &count_a);
        let cancel = Arc::new(AtomicBool::new(true));
        let response = optimizer
            .optimize_with_cancel(&OptimizeRequest::new("Base", 3), Some(cancel))
            .unwrap();
        assert_eq!(response.calculations_count, 0);
        assert!(response.cancelled);
        assert!(!response.timed_out);
        assert!(!response.is_exhaustive());
    }

    #[test]
    fn test_time_limited_request_is_flagged() {
        let provider = provider();
        let optimizer = Optimizer::new(&provider, &count_a)
            .with_config(SearchConfig::default().with_time_limit_ms(0));
        let response = optimizer.optimize(&OptimizeRequest::new("Base", 3)).unwrap();
        assert!(response.timed_out);
        assert!(!response.cancelled);
        assert!(!response.is_exhaustive());
        assert_eq!(response.calculations_count, 0);
    }

    #[test]
    fn test_completed_request_is_exhaustive() {
        let provider = provider();
        let optimizer = Optimizer::new(&provider, &count_a);
        let response = optimizer.optimize(&OptimizeRequest::new("Base", 2)).unwrap();
        assert!(response.is_exhaustive());
    }

    #[test]
    fn test_config_depth_is_overridden_by_request() {
        let provider = provider();
        let optimizer = Optimizer::new(&provider, &count_a)
            .with_config(SearchConfig::default().with_max_depth(8));
        let response = optimizer.optimize(&OptimizeRequest::new("Base", 1)).unwrap();
        assert_eq!(response.calculations_count, 2);
    }

    #[test]
    fn test_evaluate_single_passes_through() {
        let provider = provider();
        let optimizer = Optimizer::new(&provider, &count_a);
        let metrics = optimizer
            .evaluate_single("Base", &["A".to_string(), "B".to_string(), "A".to_string()])
            .unwrap();
        assert_eq!(metrics.sell_price, 2.0);

        // Items outside the pool are not filtered here.
        let metrics = optimizer
            .evaluate_single("Base", &["Q".to_string()])
            .unwrap();
        assert_eq!(metrics.profit(), 0.0);
    }

    #[test]
    fn test_evaluate_single_rejects_blank_product() {
        let calls = AtomicUsize::new(0);
        let eval = |_base: &str, _seq: &[&str]| -> Result<Metrics, EvaluationError> {
            calls.fetch_add(1, Ordering::Relaxed);
            Ok(Metrics::default())
        };
        let provider = provider();
        let optimizer = Optimizer::new(&provider, &eval);
        assert_eq!(
            optimizer.evaluate_single(" ", &[]).unwrap_err(),
            SearchError::InvalidProduct
        );
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_evaluate_single_surfaces_evaluator_refusal() {
        let eval = |base: &str, _seq: &[&str]| -> Result<Metrics, EvaluationError> {
            Err(EvaluationError::IncompatibleBase(base.to_string()))
        };
        let provider = provider();
        let optimizer = Optimizer::new(&provider, &eval);
        assert_eq!(
            optimizer.evaluate_single("Nope", &[]).unwrap_err(),
            SearchError::Evaluation(EvaluationError::IncompatibleBase("Nope".into()))
        );
    }
}
