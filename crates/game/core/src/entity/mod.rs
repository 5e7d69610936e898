//! Living entities and the templates they are built from.
//!
//! [`LivingEntity`] carries everything combat touches. [`Character`] and
//! [`Monster`] wrap it with progression, spells and loot.
mod character;
mod living;
mod monster;
mod template;

pub use character::{Character, KillReward};
pub use living::{DotTick, LivingEntity, TickReport};
pub use monster::{Loot, Monster};
pub use template::{EntityTemplate, LootEntry, MonsterTemplate, TemplateError};
