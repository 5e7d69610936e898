use std::collections::BTreeMap;

use super::Item;
use crate::effects::EffectError;
use crate::error::{ErrorSeverity, GameError};

/// Errors surfaced by inventory and equipment operations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InventoryError {
    #[error("item '{name}' is not in the inventory")]
    NotFound { name: String },

    #[error("only {available} of '{name}' in the inventory, {requested} requested")]
    NotEnough {
        name: String,
        requested: u32,
        available: u32,
    },

    #[error("item '{name}' cannot be equipped")]
    NotEquippable { name: String },

    #[error("item '{name}' cannot be used")]
    NotUsable { name: String },

    #[error("{owner} is dead and cannot use items")]
    OwnerDead { owner: String },

    #[error(transparent)]
    Effect(#[from] EffectError),
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Effect(inner) => inner.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Effect(inner) => inner.error_code(),
            Self::NotFound { .. } => "INVENTORY_NOT_FOUND",
            Self::NotEnough { .. } => "INVENTORY_NOT_ENOUGH",
            Self::NotEquippable { .. } => "INVENTORY_NOT_EQUIPPABLE",
            Self::NotUsable { .. } => "INVENTORY_NOT_USABLE",
            Self::OwnerDead { .. } => "INVENTORY_OWNER_DEAD",
        }
    }
}

/// A stack of identical items.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryEntry {
    pub item: Item,
    pub count: u32,
}

/// Carried items keyed by name.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    entries: BTreeMap<String, InventoryEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` copies of `item`.
    pub fn add(&mut self, item: Item, count: u32) {
        if count == 0 {
            return;
        }
        self.entries
            .entry(item.name.clone())
            .and_modify(|entry| entry.count += count)
            .or_insert(InventoryEntry { item, count });
    }

    /// Remove `count` copies of `name`, returning the item definition.
    pub fn remove(&mut self, name: &str, count: u32) -> Result<Item, InventoryError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| InventoryError::NotFound {
                name: name.to_string(),
            })?;
        if entry.count < count {
            return Err(InventoryError::NotEnough {
                name: name.to_string(),
                requested: count,
                available: entry.count,
            });
        }

        entry.count -= count;
        let item = entry.item.clone();
        if entry.count == 0 {
            self.entries.remove(name);
        }
        Ok(item)
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.entries.get(name).map(|entry| &entry.item)
    }

    pub fn count(&self, name: &str) -> u32 {
        self.entries.get(name).map_or(0, |entry| entry.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventoryEntry> {
        self.entries.values()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemKind;

    fn pelt() -> Item {
        Item::new("Wolf Pelt", ItemKind::Misc).quest()
    }

    #[test]
    fn stacks_by_name() {
        let mut inventory = Inventory::new();
        inventory.add(pelt(), 2);
        inventory.add(pelt(), 3);
        assert_eq!(inventory.count("Wolf Pelt"), 5);
        assert_eq!(inventory.iter().count(), 1);
    }

    #[test]
    fn remove_checks_count() {
        let mut inventory = Inventory::new();
        inventory.add(pelt(), 2);

        let err = inventory.remove("Wolf Pelt", 3).unwrap_err();
        assert_eq!(
            err,
            InventoryError::NotEnough {
                name: "Wolf Pelt".into(),
                requested: 3,
                available: 2
            }
        );
        assert_eq!(inventory.count("Wolf Pelt"), 2);

        inventory.remove("Wolf Pelt", 2).unwrap();
        assert!(inventory.is_empty());
        assert!(matches!(
            inventory.remove("Wolf Pelt", 1),
            Err(InventoryError::NotFound { .. })
        ));
    }
}
