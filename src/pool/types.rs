//! The searchable item pool.

/// How a [`Pool`] was chosen, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolMode {
    /// Every item of the master pool.
    All,
    /// A caller-selected subset of the master pool.
    Selected,
}

/// Ordered, duplicate-free set of item identifiers.
///
/// Identifiers are case-sensitive and kept in sorted order so that
/// enumeration (and therefore tie-breaking) is deterministic. A pool is
/// immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    items: Vec<String>,
    mode: PoolMode,
}

impl Pool {
    /// Builds a pool from arbitrary identifiers, sorting and deduplicating.
    ///
    /// ```
    /// use u_seqsearch::pool::Pool;
    ///
    /// let pool = Pool::new(["Cuke", "Banana", "Cuke"]);
    /// assert_eq!(pool.items(), ["Banana", "Cuke"]);
    /// ```
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items: Vec<String> = items.into_iter().map(Into::into).collect();
        items.sort();
        items.dedup();
        Self {
            items,
            mode: PoolMode::All,
        }
    }

    /// Wraps items that are already canonical (sorted, distinct).
    pub(crate) fn from_canonical(items: Vec<String>, mode: PoolMode) -> Self {
        debug_assert!(items.windows(2).all(|w| w[0] < w[1]));
        Self { items, mode }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// The identifier at `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn item(&self, index: usize) -> &str {
        &self.items[index]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items
            .binary_search_by(|entry| entry.as_str().cmp(item))
            .is_ok()
    }

    pub fn mode(&self) -> PoolMode {
        self.mode
    }

    /// Human-readable summary of which items are searched.
    pub fn describe(&self) -> String {
        match self.mode {
            PoolMode::All => format!("Using all {} available items.", self.items.len()),
            PoolMode::Selected => {
                format!("Using only selected items: {}", self.items.join(", "))
            }
        }
    }
}
