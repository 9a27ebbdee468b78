//! Distinct permutations of a multiset.

/// Iterator over the distinct orderings of a multiset.
///
/// Keeps a remaining-count table per distinct item and builds arrangements
/// depth-first: at each position pick any item whose count is still
/// positive, decrement, descend, and restore the count on the way back.
/// Branching happens over *distinct* items rather than raw positions, so
/// repeated items never produce the same arrangement twice.
///
/// Distinct items are branched in order of first occurrence. For a sorted
/// input this yields the orderings in lexicographic order.
///
/// - An empty multiset yields exactly one empty ordering.
/// - A multiset of identical items yields exactly one ordering.
///
/// # Examples
///
/// ```
/// use u_seqsearch::combinatorics::MultisetPermutations;
///
/// let orders: Vec<Vec<char>> = MultisetPermutations::new(&['a', 'a', 'b']).collect();
/// assert_eq!(
///     orders,
///     vec![vec!['a', 'a', 'b'], vec!['a', 'b', 'a'], vec!['b', 'a', 'a']]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MultisetPermutations<T> {
    /// Distinct items, first-occurrence order.
    keys: Vec<T>,
    /// Remaining count per key.
    remaining: Vec<usize>,
    /// Chosen key positions for the partial arrangement.
    prefix: Vec<usize>,
    /// Per depth, the next key position to branch on.
    cursor: Vec<usize>,
    len: usize,
    exhausted: bool,
}

impl<T: Clone + PartialEq> MultisetPermutations<T> {
    /// Creates an enumerator over the distinct orderings of `items`.
    pub fn new(items: &[T]) -> Self {
        let mut keys: Vec<T> = Vec::new();
        let mut remaining: Vec<usize> = Vec::new();
        for item in items {
            match keys.iter().position(|k| k == item) {
                Some(pos) => remaining[pos] += 1,
                None => {
                    keys.push(item.clone());
                    remaining.push(1);
                }
            }
        }

        Self {
            keys,
            remaining,
            prefix: Vec::with_capacity(items.len()),
            cursor: vec![0; items.len()],
            len: items.len(),
            exhausted: false,
        }
    }

    /// Undoes the most recent choice, returning its count to the table.
    fn backtrack(&mut self) -> bool {
        match self.prefix.pop() {
            Some(pos) => {
                self.remaining[pos] += 1;
                true
            }
            None => false,
        }
    }
}

impl<T: Clone + PartialEq> Iterator for MultisetPermutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.exhausted {
            return None;
        }

        if self.len == 0 {
            self.exhausted = true;
            return Some(Vec::new());
        }

        loop {
            let depth = self.prefix.len();

            if depth == self.len {
                let ordering = self
                    .prefix
                    .iter()
                    .map(|&pos| self.keys[pos].clone())
                    .collect();
                self.backtrack();
                return Some(ordering);
            }

            let start = self.cursor[depth];
            let choice = (start..self.keys.len()).find(|&pos| self.remaining[pos] > 0);

            match choice {
                Some(pos) => {
                    self.remaining[pos] -= 1;
                    self.prefix.push(pos);
                    self.cursor[depth] = pos + 1;
                    if depth + 1 < self.len {
                        self.cursor[depth + 1] = 0;
                    }
                }
                None => {
                    // Every branch at this depth is spent.
                    if !self.backtrack() {
                        self.exhausted = true;
                        return None;
                    }
                }
            }
        }
    }
}

/// Enumerates the distinct orderings of `items`.
///
/// ```
/// use u_seqsearch::combinatorics::permute;
///
/// assert_eq!(permute(&["A", "B", "C"]).count(), 6);
/// assert_eq!(permute(&["A", "A", "A"]).count(), 1);
/// ```
pub fn permute<T: Clone + PartialEq>(items: &[T]) -> MultisetPermutations<T> {
    MultisetPermutations::new(items)
}
