//! Search configuration.

use crate::error::SearchError;

/// Hard upper bound on the number of appended modifiers.
///
/// Work grows as `|pool|^depth`; at depth 8 a pool of 16 items already
/// means roughly 4.6 billion evaluations.
pub const MAX_DEPTH: usize = 8;

/// Configuration for [`SearchRunner`](super::SearchRunner).
///
/// # Examples
///
/// ```
/// use u_seqsearch::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_max_depth(4)
///     .with_time_limit_ms(30_000);
/// assert!(config.validate().is_ok());
/// assert!(SearchConfig::default().with_max_depth(9).validate().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Longest modifier sequence to try. `0` evaluates the base alone.
    pub max_depth: usize,

    /// Whether to scan combinations in parallel using rayon.
    ///
    /// Only honoured when the crate is built with the `parallel` feature;
    /// otherwise the search runs sequentially. Results are identical
    /// either way, including which of several equally profitable
    /// sequences is reported.
    pub parallel: bool,

    /// Optional wall-clock budget in milliseconds.
    ///
    /// Checked between evaluations. When exceeded, the search stops and
    /// reports the best sequence found so far with
    /// [`SearchOutcome::timed_out`](super::SearchOutcome::timed_out) set.
    ///
    /// `None` searches exhaustively (the default).
    pub time_limit_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            parallel: false,
            time_limit_ms: None,
        }
    }
}

impl SearchConfig {
    /// Sets the maximum sequence length.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Enables or disables parallel scanning.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets a wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_depth > MAX_DEPTH {
            return Err(SearchError::BoundsViolation {
                requested: self.max_depth,
                min: 0,
                max: MAX_DEPTH,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.max_depth, 3);
        assert!(!config.parallel);
        assert!(config.time_limit_ms.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_depth_zero_is_valid() {
        assert!(SearchConfig::default().with_max_depth(0).validate().is_ok());
    }

    #[test]
    fn test_depth_at_cap_is_valid() {
        assert!(SearchConfig::default()
            .with_max_depth(MAX_DEPTH)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_depth_above_cap() {
        let err = SearchConfig::default()
            .with_max_depth(MAX_DEPTH + 1)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::BoundsViolation {
                requested: 9,
                min: 0,
                max: 8
            }
        );
    }

    #[test]
    fn test_builders() {
        let config = SearchConfig::default()
            .with_parallel(true)
            .with_time_limit_ms(250);
        assert!(config.parallel);
        assert_eq!(config.time_limit_ms, Some(250));
    }
}
