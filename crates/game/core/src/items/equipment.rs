use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator};

use super::Item;
use crate::stats::DamageRange;

/// Equipment slots, one item each.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumCount, EnumIter, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EquipmentSlot {
    Head,
    Shoulders,
    Necklace,
    Chest,
    Bracers,
    Gloves,
    Belt,
    Legs,
    Boots,
    Ring,
    Trinket,
    MainHand,
}

/// Worn items, one per slot.
///
/// This is pure storage; moving attribute bonuses in and out happens on the
/// owning entity.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    slots: [Option<Item>; EquipmentSlot::COUNT],
}

impl Equipment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.slots[slot as usize].as_ref()
    }

    /// Put `item` in `slot`, returning whatever was there.
    pub fn put(&mut self, slot: EquipmentSlot, item: Item) -> Option<Item> {
        self.slots[slot as usize].replace(item)
    }

    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.slots[slot as usize].take()
    }

    /// Damage range of the main-hand weapon.
    pub fn weapon_range(&self) -> Option<DamageRange> {
        self.get(EquipmentSlot::MainHand)
            .and_then(Item::damage_range)
    }

    /// Occupied slots with their items.
    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, &Item)> {
        EquipmentSlot::iter().filter_map(|slot| self.get(slot).map(|item| (slot, item)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemKind;
    use crate::stats::Attributes;

    fn helm(name: &str) -> Item {
        Item::new(
            name,
            ItemKind::Equipment {
                slot: EquipmentSlot::Head,
                attributes: Attributes::new(),
            },
        )
    }

    #[test]
    fn put_returns_displaced_item() {
        let mut equipment = Equipment::empty();
        assert!(equipment.put(EquipmentSlot::Head, helm("Cap")).is_none());
        let displaced = equipment.put(EquipmentSlot::Head, helm("Helm"));
        assert_eq!(displaced.map(|item| item.name), Some("Cap".to_string()));
        assert_eq!(equipment.iter().count(), 1);
    }

    #[test]
    fn slot_names_parse() {
        assert_eq!("main_hand".parse::<EquipmentSlot>(), Ok(EquipmentSlot::MainHand));
        assert_eq!(EquipmentSlot::COUNT, 12);
    }
}
