//! Master pool construction and selection resolution.

use thiserror::Error;
use tracing::{info, warn};

use super::types::{Pool, PoolMode};
use crate::error::SearchError;

/// Items used when the catalog cannot be loaded or holds no ingredients.
pub const FALLBACK_ITEMS: [&str; 16] = [
    "Addy",
    "Banana",
    "Battery",
    "Chili",
    "Cuke",
    "Donut",
    "Energy Drink",
    "Flu Medicine",
    "Gasoline",
    "Horse Semen",
    "Iodine",
    "Mega Bean",
    "Motor Oil",
    "Mouth Wash",
    "Paracetamol",
    "Viagra",
];

/// Category tag of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemCategory {
    /// Searchable modifier.
    Ingredient,
    /// Base product.
    Product,
    Other(String),
}

/// One entry of the master catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRecord {
    pub name: String,
    pub category: ItemCategory,
}

impl ItemRecord {
    pub fn new(name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// Failure to read the master catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error("catalog malformed: {0}")]
    Malformed(String),
}

/// External provider of master item data. Read-only to the search.
pub trait CatalogSource {
    fn load(&self) -> Result<Vec<ItemRecord>, CatalogError>;
}

impl<F> CatalogSource for F
where
    F: Fn() -> Result<Vec<ItemRecord>, CatalogError>,
{
    fn load(&self) -> Result<Vec<ItemRecord>, CatalogError> {
        self()
    }
}

/// Owns the master pool for the lifetime of a process.
///
/// Built once at start-up and shared by reference with every request;
/// requests never mutate it.
///
/// # Examples
///
/// ```
/// use u_seqsearch::pool::{ItemCategory, ItemRecord, PoolProvider};
///
/// let provider = PoolProvider::from_records([
///     ItemRecord::new("Cuke", ItemCategory::Ingredient),
///     ItemRecord::new("OG Kush", ItemCategory::Product),
///     ItemRecord::new("Banana", ItemCategory::Ingredient),
/// ]);
/// assert_eq!(provider.master().items(), ["Banana", "Cuke"]);
///
/// let pool = provider.resolve(&["Cuke".to_string()]).unwrap();
/// assert_eq!(pool.describe(), "Using only selected items: Cuke");
/// ```
#[derive(Debug, Clone)]
pub struct PoolProvider {
    master: Pool,
}

impl PoolProvider {
    /// Uses `pool` as the master pool as is.
    pub fn new(pool: Pool) -> Self {
        Self { master: pool }
    }

    /// Keeps the ingredient entries of `records`, sorted and deduplicated.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ItemRecord>,
    {
        let names = records
            .into_iter()
            .filter(|r| r.category == ItemCategory::Ingredient)
            .map(|r| r.name);
        Self::new(Pool::new(names))
    }

    /// Provider over [`FALLBACK_ITEMS`].
    pub fn fallback() -> Self {
        Self::new(Pool::new(FALLBACK_ITEMS))
    }

    /// Loads the master pool from `source`, falling back to
    /// [`FALLBACK_ITEMS`] when the source fails or holds no ingredients.
    pub fn load<S: CatalogSource + ?Sized>(source: &S) -> Self {
        match source.load() {
            Ok(records) => {
                let provider = Self::from_records(records);
                if provider.master.is_empty() {
                    warn!("catalog yielded 0 ingredients, using fallback item list");
                    Self::fallback()
                } else {
                    info!(
                        "derived {} ingredients from catalog",
                        provider.master.len()
                    );
                    provider
                }
            }
            Err(err) => {
                warn!("failed to load catalog ({err}), using fallback item list");
                Self::fallback()
            }
        }
    }

    pub fn master(&self) -> &Pool {
        &self.master
    }

    /// Resolves the pool a request searches.
    ///
    /// - Empty `selection`: the whole master pool. Fails with
    ///   [`SearchError::EmptyPool`] if the master pool is empty.
    /// - Otherwise: `selection ∩ master` in master order. Entries missing
    ///   from the master pool are ignored with a warning; an empty
    ///   intersection fails with [`SearchError::InvalidSelection`].
    pub fn resolve(&self, selection: &[String]) -> Result<Pool, SearchError> {
        if selection.is_empty() {
            if self.master.is_empty() {
                return Err(SearchError::EmptyPool);
            }
            return Ok(Pool::from_canonical(
                self.master.items().to_vec(),
                PoolMode::All,
            ));
        }

        let chosen: Vec<String> = self
            .master
            .items()
            .iter()
            .filter(|item| selection.contains(item))
            .cloned()
            .collect();

        let ignored: Vec<&str> = selection
            .iter()
            .filter(|s| !self.master.contains(s))
            .map(String::as_str)
            .collect();
        if !ignored.is_empty() {
            warn!(
                "ignoring selected items not found in master pool: {}",
                ignored.join(", ")
            );
        }

        if chosen.is_empty() {
            return Err(SearchError::InvalidSelection {
                selection: selection.to_vec(),
            });
        }

        Ok(Pool::from_canonical(chosen, PoolMode::Selected))
    }
}

impl Default for PoolProvider {
    fn default() -> Self {
        Self::fallback()
    }
}
