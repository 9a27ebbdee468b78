//! Exhaustive search loop.
//!
//! # Algorithm
//!
//! 1. Evaluate the base alone (empty sequence) and seed the best result
//!    with it. A failure here leaves the best result empty.
//! 2. For each size k in `1..=max_depth`:
//!    a. Enumerate multisets of size k over the pool
//!    b. Enumerate the distinct orderings of each multiset
//!    c. Evaluate every ordering; keep it if its profit is strictly
//!       greater than the best so far
//! 3. Stop only when every ordering has been visited, or on
//!    cancellation / time limit.
//!
//! Ties keep the sequence found first in enumeration order: shorter
//! sequences before longer ones, then multiset order, then ordering order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, trace, warn};

use super::config::SearchConfig;
use super::types::{Evaluator, Metrics};
use crate::combinatorics::{search_space_size, MultisetCombinations, MultisetPermutations};
use crate::error::SearchError;
use crate::pool::Pool;

/// The most profitable sequence found.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestResult {
    /// Modifiers in application order. Empty means the base alone.
    pub order: Vec<String>,

    /// Evaluator output for `order`.
    pub metrics: Metrics,

    /// `metrics.profit()`, cached.
    pub profit: f64,
}

/// Statistics of one search run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStats {
    /// Orderings evaluated for sizes `1..=max_depth`. The baseline is not
    /// included.
    pub calculations: u64,

    /// Evaluations (baseline included) the evaluator refused.
    pub failed_evaluations: u64,

    /// Whether the baseline evaluation succeeded.
    pub baseline_evaluated: bool,

    /// Evaluations per sequence length; index 0 is the baseline.
    pub per_depth: Vec<u64>,

    /// Wall-clock duration of the run.
    pub duration: Duration,

    /// Which pool was searched, e.g. `"Using all 16 available items."`.
    pub mode_description: String,
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best sequence, or `None` if no evaluation succeeded at all.
    pub best: Option<BestResult>,

    pub stats: SearchStats,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Whether the configured time limit cut the run short.
    pub timed_out: bool,
}

impl SearchStats {
    /// Every evaluator call, the baseline included.
    pub fn invocations(&self) -> u64 {
        self.per_depth.iter().sum()
    }
}

impl SearchOutcome {
    /// Whether every ordering up to `max_depth` was visited.
    pub fn is_exhaustive(&self) -> bool {
        !self.cancelled && !self.timed_out
    }
}

/// Executes the exhaustive sequence search.
///
/// # Examples
///
/// ```
/// use u_seqsearch::pool::Pool;
/// use u_seqsearch::search::{EvaluationError, Metrics, SearchConfig, SearchRunner};
///
/// // Each "A" adds one unit of profit.
/// let eval = |_base: &str, seq: &[&str]| -> Result<Metrics, EvaluationError> {
///     let a = seq.iter().filter(|s| **s == "A").count() as f64;
///     Ok(Metrics::new(a, 0.0))
/// };
///
/// let pool = Pool::new(["A", "B"]);
/// let config = SearchConfig::default().with_max_depth(2);
/// let outcome = SearchRunner::run(&eval, "Base", &pool, &config).unwrap();
///
/// let best = outcome.best.unwrap();
/// assert_eq!(best.order, vec!["A", "A"]);
/// assert_eq!(outcome.stats.calculations, 6);
/// ```
pub struct SearchRunner;

impl SearchRunner {
    /// Runs the search to completion.
    pub fn run<E: Evaluator>(
        evaluator: &E,
        base: &str,
        pool: &Pool,
        config: &SearchConfig,
    ) -> Result<SearchOutcome, SearchError> {
        Self::run_with_cancel(evaluator, base, pool, config, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// The flag is checked between evaluations. When it is set, the
    /// search returns the best sequence found so far with
    /// [`SearchOutcome::cancelled`] set.
    ///
    /// # Errors
    /// [`SearchError::BoundsViolation`] if `config.max_depth` exceeds
    /// [`MAX_DEPTH`](super::MAX_DEPTH). Nothing is evaluated in that case.
    #[tracing::instrument(
        level = "debug",
        name = "Sequence Search",
        skip(evaluator, pool, config, cancel)
    )]
    pub fn run_with_cancel<E: Evaluator>(
        evaluator: &E,
        base: &str,
        pool: &Pool,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchOutcome, SearchError> {
        config.validate()?;

        let start = Instant::now();
        let stop = StopCondition {
            cancel: cancel.as_deref(),
            deadline: config
                .time_limit_ms
                .map(|ms| start + Duration::from_millis(ms)),
        };

        info!(
            "searching {} over {} items up to depth {} ({} orderings)",
            base,
            pool.len(),
            config.max_depth,
            search_space_size(pool.len(), config.max_depth)
        );

        let mut tracker = Tracker::new(config.max_depth);

        // Baseline: the base with nothing added.
        match evaluator.evaluate(base, &[]) {
            Ok(metrics) => {
                tracker.baseline_evaluated = true;
                tracker.offer_baseline(metrics);
            }
            Err(err) => {
                tracker.failed += 1;
                warn!("baseline evaluation of {base} failed: {err}");
            }
        }
        tracker.per_depth[0] = 1;

        for k in 1..=config.max_depth {
            if tracker.stopped.is_some() {
                break;
            }

            scan_depth(evaluator, base, pool, k, &stop, config, &mut tracker);

            if tracker.per_depth[k] > 0 {
                debug!("checked {} orderings for size {}", tracker.per_depth[k], k);
            }
        }

        let duration = start.elapsed();
        let cancelled = tracker.stopped == Some(StopReason::Cancelled);
        let timed_out = tracker.stopped == Some(StopReason::TimedOut);

        info!(
            "search complete in {:.2}s, {} orderings checked{}",
            duration.as_secs_f64(),
            tracker.calculations,
            match tracker.stopped {
                Some(StopReason::Cancelled) => " (cancelled)",
                Some(StopReason::TimedOut) => " (time limit reached)",
                None => "",
            }
        );

        Ok(SearchOutcome {
            best: tracker.best.map(|c| c.into_result(pool)),
            stats: SearchStats {
                calculations: tracker.calculations,
                failed_evaluations: tracker.failed,
                baseline_evaluated: tracker.baseline_evaluated,
                per_depth: tracker.per_depth,
                duration,
                mode_description: pool.describe(),
            },
            cancelled,
            timed_out,
        })
    }
}

/// Scans every ordering of size `k`, folding results into `tracker` in
/// enumeration order.
fn scan_depth<E: Evaluator>(
    evaluator: &E,
    base: &str,
    pool: &Pool,
    k: usize,
    stop: &StopCondition<'_>,
    config: &SearchConfig,
    tracker: &mut Tracker,
) {
    #[cfg(feature = "parallel")]
    if config.parallel {
        let combos: Vec<Vec<usize>> = MultisetCombinations::new(pool.len(), k).collect();
        // `collect` keeps input order, so the reduction below sees scans
        // in the same order a sequential run would.
        let scans: Vec<ComboScan> = combos
            .par_iter()
            .map(|combo| scan_combination(evaluator, base, pool, combo, stop))
            .collect();
        for scan in scans {
            tracker.absorb(k, scan);
        }
        return;
    }
    #[cfg(not(feature = "parallel"))]
    let _ = config;

    for combo in MultisetCombinations::new(pool.len(), k) {
        let scan = scan_combination(evaluator, base, pool, &combo, stop);
        tracker.absorb(k, scan);
        if tracker.stopped.is_some() {
            break;
        }
    }
}

/// Evaluates every distinct ordering of one multiset.
fn scan_combination<E: Evaluator>(
    evaluator: &E,
    base: &str,
    pool: &Pool,
    combination: &[usize],
    stop: &StopCondition<'_>,
) -> ComboScan {
    let mut scan = ComboScan::default();
    let mut names: Vec<&str> = Vec::with_capacity(combination.len());

    for ordering in MultisetPermutations::new(combination) {
        if let Some(reason) = stop.check() {
            scan.stopped = Some(reason);
            break;
        }

        names.clear();
        names.extend(ordering.iter().map(|&i| pool.item(i)));

        scan.evaluated += 1;
        match evaluator.evaluate(base, &names) {
            Ok(metrics) => {
                let profit = metrics.profit();
                let current = scan.best.as_ref().map_or(f64::NEG_INFINITY, |b| b.profit);
                // NaN never beats anything, so it can never become a candidate.
                if profit > current {
                    scan.best = Some(Candidate {
                        ordering,
                        metrics,
                        profit,
                    });
                }
            }
            Err(err) => {
                scan.failed += 1;
                trace!("skipping [{}]: {err}", names.join(", "));
            }
        }
    }

    scan
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    Cancelled,
    TimedOut,
}

struct StopCondition<'a> {
    cancel: Option<&'a AtomicBool>,
    deadline: Option<Instant>,
}

impl StopCondition<'_> {
    fn check(&self) -> Option<StopReason> {
        if let Some(flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Some(StopReason::Cancelled);
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Some(StopReason::TimedOut);
            }
        }
        None
    }
}

/// A scored ordering, as pool indices.
struct Candidate {
    ordering: Vec<usize>,
    metrics: Metrics,
    profit: f64,
}

impl Candidate {
    fn into_result(self, pool: &Pool) -> BestResult {
        BestResult {
            order: self
                .ordering
                .iter()
                .map(|&i| pool.item(i).to_string())
                .collect(),
            metrics: self.metrics,
            profit: self.profit,
        }
    }
}

/// Local outcome of scanning one multiset.
#[derive(Default)]
struct ComboScan {
    best: Option<Candidate>,
    evaluated: u64,
    failed: u64,
    stopped: Option<StopReason>,
}

/// Running best and counters for the whole search.
struct Tracker {
    best: Option<Candidate>,
    calculations: u64,
    failed: u64,
    baseline_evaluated: bool,
    per_depth: Vec<u64>,
    stopped: Option<StopReason>,
}

impl Tracker {
    fn new(max_depth: usize) -> Self {
        Self {
            best: None,
            calculations: 0,
            failed: 0,
            baseline_evaluated: false,
            per_depth: vec![0; max_depth + 1],
            stopped: None,
        }
    }

    /// The baseline is accepted whatever its profit, unless it cannot
    /// beat the "no result" sentinel of negative infinity.
    fn offer_baseline(&mut self, metrics: Metrics) {
        let profit = metrics.profit();
        if profit > f64::NEG_INFINITY {
            self.best = Some(Candidate {
                ordering: Vec::new(),
                metrics,
                profit,
            });
        }
    }

    fn absorb(&mut self, k: usize, scan: ComboScan) {
        self.calculations += scan.evaluated;
        self.failed += scan.failed;
        self.per_depth[k] += scan.evaluated;

        if let Some(candidate) = scan.best {
            let current = self
                .best
                .as_ref()
                .map_or(f64::NEG_INFINITY, |b| b.profit);
            // Strict: an equal profit never displaces an earlier find.
            if candidate.profit > current {
                self.best = Some(candidate);
            }
        }

        if self.stopped.is_none() {
            self.stopped = scan.stopped;
        }
    }
}
