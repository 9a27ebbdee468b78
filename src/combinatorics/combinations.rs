//! Combinations with repetition.

/// Iterator over all non-decreasing index sequences of length `k` drawn
/// from `0..n`.
///
/// Sequences are produced in lexicographic order, which is the order a
/// depth-first enumeration visits them: at each position choose an index
/// no smaller than the previous one, recurse, backtrack. The
/// non-decreasing constraint alone guarantees every multiset of size `k`
/// is produced exactly once.
///
/// - `k == 0` yields exactly one empty sequence (even when `n == 0`).
/// - `n == 0` with `k > 0` yields nothing.
///
/// # Examples
///
/// ```
/// use u_seqsearch::combinatorics::MultisetCombinations;
///
/// let combos: Vec<Vec<usize>> = MultisetCombinations::new(2, 2).collect();
/// assert_eq!(combos, vec![vec![0, 0], vec![0, 1], vec![1, 1]]);
/// ```
#[derive(Debug, Clone)]
pub struct MultisetCombinations {
    n: usize,
    current: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl MultisetCombinations {
    /// Creates an enumerator over multisets of size `k` from `n` items.
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            current: vec![0; k],
            started: false,
            exhausted: n == 0 && k > 0,
        }
    }

    /// Moves `current` to its lexicographic successor.
    ///
    /// Returns `false` when `current` was the last sequence.
    fn advance(&mut self) -> bool {
        let last = self.n - 1;
        // Rightmost position that can still grow.
        let Some(pos) = self.current.iter().rposition(|&i| i < last) else {
            return false;
        };
        let next = self.current[pos] + 1;
        for slot in &mut self.current[pos..] {
            *slot = next;
        }
        true
    }
}

impl Iterator for MultisetCombinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.exhausted {
            return None;
        }

        if !self.started {
            self.started = true;
        } else if self.current.is_empty() || !self.advance() {
            self.exhausted = true;
            return None;
        }

        Some(self.current.clone())
    }
}

/// Enumerates every multiset of size `k` over `pool`, as references into
/// the pool.
///
/// Thin mapping over [`MultisetCombinations`]; each yielded vector lists
/// the chosen items in pool order.
///
/// ```
/// use u_seqsearch::combinatorics::generate;
///
/// let pool = ["A", "B", "C"];
/// assert_eq!(generate(&pool, 0).count(), 1);
/// assert_eq!(generate(&pool, 2).count(), 6);
/// ```
pub fn generate<T>(pool: &[T], k: usize) -> impl Iterator<Item = Vec<&T>> + '_ {
    MultisetCombinations::new(pool.len(), k)
        .map(move |indices| indices.into_iter().map(|i| &pool[i]).collect())
}
