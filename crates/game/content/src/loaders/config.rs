//! Rule configuration loader.

use std::path::Path;

use pathminder_core::PackConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for rule configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`PackConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<PackConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<PackConfig> {
        let config: PackConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = ConfigLoader::parse("default_strength = 16").unwrap();
        assert_eq!(config.default_strength, 16);
        assert_eq!(config.default_base_speed, PackConfig::DEFAULT_BASE_SPEED);
    }

    #[test]
    fn rejects_malformed_values() {
        let error = ConfigLoader::parse("default_strength = \"strong\"").unwrap_err();
        assert!(error.to_string().contains("Failed to parse config TOML"));
    }
}
