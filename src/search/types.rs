//! Evaluator contract and the metrics it reports.

use thiserror::Error;

/// Evaluator output for one `(base, sequence)` pair.
///
/// Only [`sell_price`](Self::sell_price) and [`cost`](Self::cost) take
/// part in ranking. `effects` and `addiction` are carried through to the
/// caller for display.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Metrics {
    /// Sale price of the resulting product.
    pub sell_price: f64,

    /// Total cost of base and modifiers.
    pub cost: f64,

    /// Opaque effect descriptors.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<String>,

    /// Opaque score, display only.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub addiction: Option<f64>,
}

impl Metrics {
    /// Creates metrics with no effects attached.
    pub fn new(sell_price: f64, cost: f64) -> Self {
        Self {
            sell_price,
            cost,
            effects: Vec::new(),
            addiction: None,
        }
    }

    pub fn with_effects<I, S>(mut self, effects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.effects = effects.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_addiction(mut self, addiction: f64) -> Self {
        self.addiction = Some(addiction);
        self
    }

    /// `sell_price - cost`. May be negative.
    ///
    /// A NaN price or cost counts as 0 so that a malformed evaluation can
    /// never poison the ranking.
    pub fn profit(&self) -> f64 {
        or_zero(self.sell_price) - or_zero(self.cost)
    }
}

fn or_zero(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v
    }
}

/// Reasons an evaluator refuses a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// The base product is unknown or cannot take modifiers.
    #[error("incompatible base product: {0}")]
    IncompatibleBase(String),

    /// A modifier in the sequence is unknown to the evaluator.
    #[error("unknown item in sequence: {0}")]
    UnknownItem(String),

    /// Any other refusal.
    #[error("evaluation rejected: {0}")]
    Rejected(String),
}

/// Computes [`Metrics`] for a base product with an ordered modifier
/// sequence.
///
/// The search treats the evaluator as opaque and deterministic. An
/// `Err` for one sequence is skipped; the search carries on.
///
/// Closures with the matching signature implement this trait:
///
/// ```
/// use u_seqsearch::search::{Evaluator, Metrics, EvaluationError};
///
/// let eval = |_base: &str, seq: &[&str]| -> Result<Metrics, EvaluationError> {
///     Ok(Metrics::new(10.0 + seq.len() as f64, 2.0 * seq.len() as f64))
/// };
/// assert_eq!(eval.evaluate("Base", &["A"]).map(|m| m.profit()), Ok(9.0));
/// ```
///
/// # Thread Safety
///
/// `Evaluator` must be `Send + Sync` because the runner may scan
/// combinations in parallel when the `parallel` feature is enabled.
pub trait Evaluator: Send + Sync {
    /// Evaluates `base` with `sequence` applied in order.
    fn evaluate(&self, base: &str, sequence: &[&str]) -> Result<Metrics, EvaluationError>;
}

impl<F> Evaluator for F
where
    F: Fn(&str, &[&str]) -> Result<Metrics, EvaluationError> + Send + Sync,
{
    fn evaluate(&self, base: &str, sequence: &[&str]) -> Result<Metrics, EvaluationError> {
        self(base, sequence)
    }
}
