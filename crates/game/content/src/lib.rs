//! Data-driven content for pathminder.
//!
//! This crate houses the item catalog and provides loaders for RON/TOML data files:
//! - Item catalogs (data-driven via RON)
//! - Rule configuration (data-driven via TOML)
//!
//! Content only ever creates items; every containment rule lives in `pathminder-core`.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{CatalogError, ContainerTemplate, ItemCatalog, ItemTemplate};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, ItemLoader, LoadResult};
