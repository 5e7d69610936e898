//! Monster catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::{Item, LootEntry, MonsterTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::specs::EntitySpec;
use crate::loaders::{LoadResult, read_file};

fn default_true() -> bool {
    true
}

/// One loot-table row; `item` names an entry in the item catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootSpec {
    pub item: String,
    pub drop_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterSpec {
    pub id: String,
    pub entity: EntitySpec,
    pub xp_reward: u32,
    #[serde(default)]
    pub gold_reward: u32,
    #[serde(default = "default_true")]
    pub respawnable: bool,
    #[serde(default)]
    pub quest_relevant: bool,
    #[serde(default)]
    pub loot: Vec<LootSpec>,
}

impl MonsterSpec {
    pub fn resolve(&self, items: &BTreeMap<String, Item>) -> LoadResult<MonsterTemplate> {
        let entity = self.entity.resolve()?;
        let loot_table = self
            .loot
            .iter()
            .map(|row| {
                let item = items
                    .get(&row.item)
                    .ok_or_else(|| anyhow::anyhow!("loot references unknown item '{}'", row.item))?;
                Ok(LootEntry {
                    item: item.clone(),
                    drop_percent: row.drop_percent,
                })
            })
            .collect::<LoadResult<Vec<_>>>()?;

        let template = MonsterTemplate {
            id: self.id.clone(),
            entity,
            xp_reward: self.xp_reward,
            gold_reward: self.gold_reward,
            respawnable: self.respawnable,
            quest_relevant: self.quest_relevant,
            loot_table,
        };
        template.validate()?;
        Ok(template)
    }
}

/// Monster catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterCatalog {
    pub monsters: Vec<MonsterSpec>,
}

/// Loader for monster templates from RON files.
pub struct MonsterLoader;

impl MonsterLoader {
    /// Load monsters keyed by id. Loot rows are resolved against `items`.
    pub fn load(
        path: &Path,
        items: &BTreeMap<String, Item>,
    ) -> LoadResult<BTreeMap<String, MonsterTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content, items)
    }

    pub fn parse(
        content: &str,
        items: &BTreeMap<String, Item>,
    ) -> LoadResult<BTreeMap<String, MonsterTemplate>> {
        let catalog: MonsterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster catalog RON: {}", e))?;

        let mut monsters = BTreeMap::new();
        for spec in &catalog.monsters {
            let template = spec
                .resolve(items)
                .map_err(|e| anyhow::anyhow!("Invalid monster '{}': {}", spec.id, e))?;
            if monsters.insert(spec.id.clone(), template).is_some() {
                anyhow::bail!("Duplicate monster '{}'", spec.id);
            }
        }
        Ok(monsters)
    }
}

#[cfg(test)]
mod tests {
    use combat_core::ItemKind;

    use super::*;

    fn items() -> BTreeMap<String, Item> {
        BTreeMap::from([(
            "Gnoll Paw".to_string(),
            Item::new("Gnoll Paw", ItemKind::Misc).quest(),
        )])
    }

    #[test]
    fn resolves_loot_against_items() {
        let monsters = MonsterLoader::parse(
            r#"(monsters: [(
                id: "gnoll_scout",
                entity: (name: "Gnoll Scout", level: 2, health: 60.0, min_damage: 3.0, max_damage: 6.0),
                xp_reward: 120,
                gold_reward: 4,
                quest_relevant: true,
                loot: [(item: "Gnoll Paw", drop_percent: 35.0)],
            )])"#,
            &items(),
        )
        .unwrap();

        let scout = &monsters["gnoll_scout"];
        assert!(scout.respawnable);
        assert_eq!(scout.entity.level, 2);
        assert_eq!(scout.loot_table.len(), 1);
        assert!(scout.loot_table[0].item.quest_item);
    }

    #[test]
    fn unknown_loot_item_fails() {
        let err = MonsterLoader::parse(
            r#"(monsters: [(
                id: "wolf",
                entity: (name: "Wolf", health: 30.0),
                xp_reward: 50,
                loot: [(item: "Wolf Fang", drop_percent: 10.0)],
            )])"#,
            &items(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown item 'Wolf Fang'"));
    }

    #[test]
    fn drop_chance_out_of_range_fails() {
        let err = MonsterLoader::parse(
            r#"(monsters: [(
                id: "wolf",
                entity: (name: "Wolf", health: 30.0),
                xp_reward: 50,
                loot: [(item: "Gnoll Paw", drop_percent: 150.0)],
            )])"#,
            &items(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid monster 'wolf'"));
    }
}
