//! Item catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::{EquipmentSlot, Item, ItemKind};
use serde::{Deserialize, Serialize};

use crate::loaders::specs::{BuffSpec, resolve_attributes};
use crate::loaders::{LoadResult, read_file};

/// Item type as written in content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKindSpec {
    Weapon {
        min_damage: f64,
        max_damage: f64,
        #[serde(default)]
        attributes: BTreeMap<String, f64>,
    },
    Equipment {
        slot: String,
        #[serde(default)]
        attributes: BTreeMap<String, f64>,
    },
    Potion {
        buff: BuffSpec,
    },
    Misc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub name: String,
    #[serde(default)]
    pub buy_price: u32,
    #[serde(default)]
    pub sell_price: u32,
    #[serde(default)]
    pub quest_item: bool,
    pub kind: ItemKindSpec,
}

impl ItemSpec {
    pub fn resolve(&self) -> LoadResult<Item> {
        let kind = match &self.kind {
            ItemKindSpec::Weapon {
                min_damage,
                max_damage,
                attributes,
            } => {
                if min_damage > max_damage || *min_damage < 0.0 {
                    anyhow::bail!(
                        "Weapon '{}' has invalid damage range {}-{}",
                        self.name,
                        min_damage,
                        max_damage
                    );
                }
                ItemKind::Weapon {
                    min_damage: *min_damage,
                    max_damage: *max_damage,
                    attributes: resolve_attributes(&self.name, attributes)?,
                }
            }
            ItemKindSpec::Equipment { slot, attributes } => {
                let slot: EquipmentSlot = slot.parse().map_err(|_| {
                    anyhow::anyhow!("Item '{}' uses unknown slot '{}'", self.name, slot)
                })?;
                ItemKind::Equipment {
                    slot,
                    attributes: resolve_attributes(&self.name, attributes)?,
                }
            }
            ItemKindSpec::Potion { buff } => ItemKind::Potion {
                buff: buff.resolve()?,
            },
            ItemKindSpec::Misc => ItemKind::Misc,
        };

        let mut item =
            Item::new(self.name.clone(), kind).with_prices(self.buy_price, self.sell_price);
        if self.quest_item {
            item = item.quest();
        }
        Ok(item)
    }
}

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemSpec>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file, keyed by item name.
    pub fn load(path: &Path) -> LoadResult<BTreeMap<String, Item>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BTreeMap<String, Item>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut items = BTreeMap::new();
        for spec in &catalog.items {
            let item = spec
                .resolve()
                .map_err(|e| anyhow::anyhow!("Invalid item '{}': {}", spec.name, e))?;
            if items.insert(item.name.clone(), item).is_some() {
                anyhow::bail!("Duplicate item '{}'", spec.name);
            }
        }
        Ok(items)
    }
}
