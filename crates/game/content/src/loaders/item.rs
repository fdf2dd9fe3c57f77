//! Item catalog loader.

use std::path::Path;

use crate::catalog::ItemCatalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load an item catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing an ItemCatalog
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse an item catalog, rejecting templates that share a name.
    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let duplicates = catalog.duplicate_names();
        if !duplicates.is_empty() {
            anyhow::bail!("Duplicate item templates: {}", duplicates.join(", "));
        }

        tracing::debug!("loaded {} item templates", catalog.len());
        Ok(catalog)
    }
}
