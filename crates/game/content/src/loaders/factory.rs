//! Content factory for loading everything from a data directory.

use std::path::{Path, PathBuf};

use pathminder_core::PackConfig;

use crate::catalog::ItemCatalog;
use crate::loaders::{ConfigLoader, ItemLoader, LoadResult};

/// Content factory that loads rule configuration and item catalogs from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── items.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load rule configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<PackConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        let path = self.data_dir.join("items.ron");
        ItemLoader::load(&path)
    }
}
