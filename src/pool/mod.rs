//! Item pools.
//!
//! The master pool comes from an external catalog (only entries tagged as
//! ingredients are searchable) and is owned by a [`PoolProvider`] built
//! once at start-up. Each request resolves its own [`Pool`] snapshot from
//! it: the whole master pool, or the caller's selection intersected with
//! it.

mod provider;
mod types;

pub use provider::{
    CatalogError, CatalogSource, ItemCategory, ItemRecord, PoolProvider, FALLBACK_ITEMS,
};
pub use types::{Pool, PoolMode};
