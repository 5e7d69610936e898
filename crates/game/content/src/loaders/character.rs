//! Playable character loader.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use combat_core::{Character, CharacterClass, CombatEnv, EntityTemplate, Item};
use serde::{Deserialize, Serialize};

use crate::loaders::specs::EntitySpec;
use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSpec {
    pub id: String,
    pub class: String,
    pub entity: EntitySpec,
    /// `(item name, count)` pairs placed in the bags.
    #[serde(default)]
    pub items: Vec<(String, u32)>,
    /// Item names equipped from the bags on creation.
    #[serde(default)]
    pub equipped: Vec<String>,
}

/// A resolved starting character.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterTemplate {
    pub id: String,
    pub class: CharacterClass,
    pub entity: EntityTemplate,
    pub items: Vec<(Item, u32)>,
    pub equipped: Vec<String>,
}

impl CharacterTemplate {
    /// Create the character, fill its bags and equip the starting gear.
    pub fn spawn(&self, env: Arc<CombatEnv>) -> LoadResult<Character> {
        let mut character = Character::new(&self.entity, self.class, env)?;
        for (item, count) in &self.items {
            character.receive_item(item.clone(), *count);
        }
        for name in &self.equipped {
            character
                .equip_item(name)
                .map_err(|e| anyhow::anyhow!("Cannot equip '{}' on '{}': {}", name, self.id, e))?;
        }
        Ok(character)
    }
}

impl CharacterSpec {
    pub fn resolve(&self, items: &BTreeMap<String, Item>) -> LoadResult<CharacterTemplate> {
        let class: CharacterClass = self
            .class
            .parse()
            .map_err(|_| anyhow::anyhow!("unknown class '{}'", self.class))?;
        let entity = self.entity.resolve()?;

        let mut bag = Vec::with_capacity(self.items.len());
        for (name, count) in &self.items {
            let item = items
                .get(name)
                .ok_or_else(|| anyhow::anyhow!("unknown item '{}'", name))?;
            bag.push((item.clone(), *count));
        }
        for name in &self.equipped {
            if !bag.iter().any(|(item, _)| &item.name == name) {
                anyhow::bail!("equipped item '{}' is not in the starting items", name);
            }
        }

        Ok(CharacterTemplate {
            id: self.id.clone(),
            class,
            entity,
            items: bag,
            equipped: self.equipped.clone(),
        })
    }
}

/// Character catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterCatalog {
    pub characters: Vec<CharacterSpec>,
}

/// Loader for starting characters from RON files.
pub struct CharacterLoader;

impl CharacterLoader {
    pub fn load(
        path: &Path,
        items: &BTreeMap<String, Item>,
    ) -> LoadResult<BTreeMap<String, CharacterTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content, items)
    }

    pub fn parse(
        content: &str,
        items: &BTreeMap<String, Item>,
    ) -> LoadResult<BTreeMap<String, CharacterTemplate>> {
        let catalog: CharacterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character catalog RON: {}", e))?;

        let mut characters = BTreeMap::new();
        for spec in &catalog.characters {
            let template = spec
                .resolve(items)
                .map_err(|e| anyhow::anyhow!("Invalid character '{}': {}", spec.id, e))?;
            if characters.insert(spec.id.clone(), template).is_some() {
                anyhow::bail!("Duplicate character '{}'", spec.id);
            }
        }
        Ok(characters)
    }
}
