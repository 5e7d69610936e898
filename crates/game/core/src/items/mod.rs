//! Items, worn equipment and carried inventory.
//!
//! Items are plain values handed in by the content layer. Only weapons and
//! equipment can be worn; only potions can be consumed.
mod equipment;
mod inventory;
mod item;

pub use equipment::{Equipment, EquipmentSlot};
pub use inventory::{Inventory, InventoryEntry, InventoryError};
pub use item::{Item, ItemKind};
