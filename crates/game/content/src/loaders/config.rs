//! Combat rules loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat rules from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load combat rules from a TOML file.
    ///
    /// Missing keys keep their [`CombatConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.heal_crit_multiplier < 1.0 {
            anyhow::bail!(
                "heal_crit_multiplier must be at least 1.0, got {}",
                config.heal_crit_multiplier
            );
        }
        Ok(config)
    }
}
