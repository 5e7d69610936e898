//! Content factory for building the combat environment from data files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use combat_core::{CombatConfig, CombatEnv, Item, MonsterTemplate, ProgressionTable, SpellCatalog};

use crate::loaders::{
    CharacterLoader, CharacterTemplate, ConfigLoader, ItemLoader, LoadResult, MonsterLoader,
    ProgressionLoader, SpellLoader,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── progression.toml
/// ├── spells.ron
/// ├── items.ron
/// ├── monsters.ron
/// └── characters.ron
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

    /// Load combat rules from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the level table from `progression.toml`.
    pub fn load_progression(&self) -> LoadResult<ProgressionTable> {
        ProgressionLoader::load(&self.data_dir.join("progression.toml"))
    }

    /// Load spell ranks from `spells.ron`.
    pub fn load_spells(&self) -> LoadResult<SpellCatalog> {
        SpellLoader::load(&self.data_dir.join("spells.ron"))
    }

    /// Load the item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<BTreeMap<String, Item>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load monsters from `monsters.ron`, resolving loot against `items`.
    pub fn load_monsters(
        &self,
        items: &BTreeMap<String, Item>,
    ) -> LoadResult<BTreeMap<String, MonsterTemplate>> {
        MonsterLoader::load(&self.data_dir.join("monsters.ron"), items)
    }

    /// Load starting characters from `characters.ron`.
    pub fn load_characters(
        &self,
        items: &BTreeMap<String, Item>,
    ) -> LoadResult<BTreeMap<String, CharacterTemplate>> {
        CharacterLoader::load(&self.data_dir.join("characters.ron"), items)
    }

    /// Rules, progression and spells bundled for sharing between characters.
    pub fn load_env(&self) -> LoadResult<CombatEnv> {
        Ok(CombatEnv::new(
            self.load_config()?,
            self.load_progression()?,
            self.load_spells()?,
        ))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_env_from_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "heal_crit_chance_percent = 0.0\n").unwrap();
        fs::write(
            dir.path().join("progression.toml"),
            "[[levels]]\nlevel = 1\nxp_required = 100\n\n[[levels]]\nlevel = 2\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("spells.ron"),
            r#"(spells: [(name: "Flash of Light", class: "paladin", effect: Heal(amount: 10.0))])"#,
        )
        .unwrap();

        let env = ContentFactory::new(dir.path()).load_env().unwrap();
        assert_eq!(env.config.heal_crit_chance_percent, 0.0);
        assert_eq!(env.progression.max_level(), 2);
        assert_eq!(env.spells.templates().len(), 1);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        let err = ContentFactory::new(dir.path()).load_items().unwrap_err();
        assert!(err.to_string().contains("items.ron"));
    }
}
