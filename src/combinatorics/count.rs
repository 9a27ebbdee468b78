//! Closed-form sizes of the enumerations.
//!
//! Used for logging search-space estimates up front and as the oracle
//! in enumeration tests.

/// Binomial coefficient `C(n, k)`. Returns 0 for `k > n`.
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    // C(n, k) = C(n, n - k)
    let k = k.min(n - k);
    let mut result = 1u128;
    for i in 0..k {
        // Exact at every step: the running product is C(n, i + 1).
        result = result * (n - i) as u128 / (i + 1) as u128;
    }
    result
}

/// Number of multisets of size `k` drawn from `n` items: `C(n + k - 1, k)`.
///
/// `k == 0` gives 1 for every `n`; `n == 0` with `k > 0` gives 0.
pub fn multiset_combination_count(n: usize, k: usize) -> u128 {
    if k == 0 {
        return 1;
    }
    if n == 0 {
        return 0;
    }
    binomial(n + k - 1, k)
}

/// Number of distinct orderings of `items`: `n! / (m_1! * ... * m_j!)`.
pub fn distinct_permutation_count<T: PartialEq>(items: &[T]) -> u128 {
    let mut seen: Vec<(&T, usize)> = Vec::new();
    let mut result = 1u128;
    let mut placed = 0usize;

    for item in items {
        match seen.iter_mut().find(|(k, _)| *k == item) {
            Some((_, m)) => *m += 1,
            None => seen.push((item, 1)),
        }
    }
    // Multinomial as a product of binomials: choose slots for each
    // distinct item among the slots filled so far.
    for &(_, m) in &seen {
        placed += m;
        result *= binomial(placed, m);
    }
    result
}

/// Number of orderings a search of depth `max_depth` over `n` items
/// evaluates, excluding the empty baseline: `n + n^2 + ... + n^max_depth`.
///
/// Saturates at `u128::MAX`.
pub fn search_space_size(n: usize, max_depth: usize) -> u128 {
    let mut total = 0u128;
    let mut layer = 1u128;
    for _ in 0..max_depth {
        layer = layer.saturating_mul(n as u128);
        total = total.saturating_add(layer);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binomial_small() {
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(5, 2), 10);
        assert_eq!(binomial(5, 5), 1);
        assert_eq!(binomial(3, 4), 0);
        assert_eq!(binomial(23, 8), 490_314);
    }

    #[test]
    fn test_multiset_combination_count() {
        assert_eq!(multiset_combination_count(0, 0), 1);
        assert_eq!(multiset_combination_count(0, 2), 0);
        assert_eq!(multiset_combination_count(2, 2), 3);
        assert_eq!(multiset_combination_count(16, 8), 490_314);
    }

    #[test]
    fn test_distinct_permutation_count() {
        assert_eq!(distinct_permutation_count::<u8>(&[]), 1);
        assert_eq!(distinct_permutation_count(&["A", "A"]), 1);
        assert_eq!(distinct_permutation_count(&["A", "B"]), 2);
        assert_eq!(distinct_permutation_count(&[1, 1, 2, 2]), 6);
        assert_eq!(distinct_permutation_count(&[1, 2, 3, 4, 5]), 120);
    }

    #[test]
    fn test_search_space_size() {
        assert_eq!(search_space_size(2, 0), 0);
        assert_eq!(search_space_size(2, 2), 6);
        assert_eq!(search_space_size(16, 8), 4_581_298_448);
        assert_eq!(search_space_size(0, 5), 0);
    }

    #[test]
    fn test_layers_partition_sequences() {
        // Summing distinct orderings over all multisets of size k gives n^k.
        let n = 4usize;
        for k in 0..5 {
            let total: u128 = crate::combinatorics::MultisetCombinations::new(n, k)
                .map(|c| distinct_permutation_count(&c))
                .sum();
            assert_eq!(total, (n as u128).pow(k as u32));
        }
    }
}
