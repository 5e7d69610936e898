use crate::effects::BeneficialBuff;
use crate::stats::{Attributes, DamageRange};

use super::EquipmentSlot;

/// Item definition with common fields and type-specific data.
///
/// # Design: Base + Kind Pattern
///
/// - Base struct holds common fields (name, prices, quest flag)
/// - `kind` enum holds type-specific data (weapon range, gear bonuses, potion buff)
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    pub buy_price: u32,
    pub sell_price: u32,
    /// Quest items count toward fetch quests and are consumed on turn-in.
    pub quest_item: bool,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            buy_price: 0,
            sell_price: 0,
            quest_item: false,
            kind,
        }
    }

    pub fn with_prices(mut self, buy_price: u32, sell_price: u32) -> Self {
        self.buy_price = buy_price;
        self.sell_price = sell_price;
        self
    }

    pub fn quest(mut self) -> Self {
        self.quest_item = true;
        self
    }

    /// Slot this item occupies when equipped, if it can be equipped at all.
    pub fn slot(&self) -> Option<EquipmentSlot> {
        match &self.kind {
            ItemKind::Weapon { .. } => Some(EquipmentSlot::MainHand),
            ItemKind::Equipment { slot, .. } => Some(*slot),
            ItemKind::Potion { .. } | ItemKind::Misc => None,
        }
    }

    /// Attribute bonuses granted while equipped.
    pub fn bonuses(&self) -> Attributes {
        match &self.kind {
            ItemKind::Weapon { attributes, .. } | ItemKind::Equipment { attributes, .. } => {
                *attributes
            }
            ItemKind::Potion { .. } | ItemKind::Misc => Attributes::new(),
        }
    }

    /// Base damage range, for weapons.
    pub fn damage_range(&self) -> Option<DamageRange> {
        match &self.kind {
            ItemKind::Weapon {
                min_damage,
                max_damage,
                ..
            } => Some(DamageRange::new(*min_damage, *max_damage)),
            _ => None,
        }
    }

    pub fn is_equippable(&self) -> bool {
        self.slot().is_some()
    }
}

/// Item type with type-specific data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Main-hand weapon; replaces the unarmed damage range.
    Weapon {
        min_damage: f64,
        max_damage: f64,
        attributes: Attributes,
    },

    /// Armor, jewelry and trinkets.
    Equipment {
        slot: EquipmentSlot,
        attributes: Attributes,
    },

    /// Consumable that applies a buff.
    Potion { buff: BeneficialBuff },

    /// Vendor trash and quest pieces.
    Misc,
}
