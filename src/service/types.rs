//! Request and response shapes.

use crate::search::{BestResult, SearchOutcome};

/// An optimize request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizeRequest {
    /// Base product identifier.
    #[cfg_attr(feature = "serde", serde(rename = "productType"))]
    pub product: String,

    /// Longest modifier sequence to try.
    #[cfg_attr(feature = "serde", serde(rename = "maxK"))]
    pub max_depth: usize,

    /// Items to restrict the search to. Empty means the whole master pool.
    #[cfg_attr(feature = "serde", serde(rename = "selectedIngredients"))]
    pub selection: Vec<String>,
}

impl OptimizeRequest {
    pub fn new(product: impl Into<String>, max_depth: usize) -> Self {
        Self {
            product: product.into(),
            max_depth,
            selection: Vec::new(),
        }
    }

    pub fn with_selection<I, S>(mut self, selection: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection = selection.into_iter().map(Into::into).collect();
        self
    }
}

/// Flattened best result as reported to callers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestResultView {
    pub order: Vec<String>,
    pub price: f64,
    pub cost: f64,
    pub profit: f64,
    pub effects: Vec<String>,
}

impl From<BestResult> for BestResultView {
    fn from(best: BestResult) -> Self {
        Self {
            order: best.order,
            price: best.metrics.sell_price,
            cost: best.metrics.cost,
            profit: best.profit,
            effects: best.metrics.effects,
        }
    }
}

/// Response to an optimize request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OptimizeResponse {
    /// `None` when no evaluation succeeded.
    pub best_result: Option<BestResultView>,
    pub calculations_count: u64,
    pub duration_seconds: f64,
    pub mode_description: String,
    pub product_type: String,
    #[cfg_attr(feature = "serde", serde(rename = "requestedMaxK"))]
    pub requested_max_depth: usize,

    /// The caller abandoned the search; `best_result` covers only the
    /// orderings visited before that.
    pub cancelled: bool,

    /// The time limit cut the search short; `best_result` is partial.
    pub timed_out: bool,
}

impl OptimizeResponse {
    pub(crate) fn from_outcome(request: &OptimizeRequest, outcome: SearchOutcome) -> Self {
        let cancelled = outcome.cancelled;
        let timed_out = outcome.timed_out;
        Self {
            best_result: outcome.best.map(BestResultView::from),
            calculations_count: outcome.stats.calculations,
            duration_seconds: outcome.stats.duration.as_secs_f64(),
            mode_description: outcome.stats.mode_description,
            product_type: request.product.clone(),
            requested_max_depth: request.max_depth,
            cancelled,
            timed_out,
        }
    }

    /// Whether `best_result` is the optimum over every ordering.
    pub fn is_exhaustive(&self) -> bool {
        !self.cancelled && !self.timed_out
    }
}
