//! Turn-based combat rules and data types.
//!
//! `combat-core` holds the canonical rules for one-on-one fights: damage
//! values and their mitigation, status effects, stat aggregation, experience
//! and level progression, and class spells with cooldowns. It performs no I/O;
//! templates are supplied by the caller (see the `combat-content` crate) and
//! randomness flows through [`RngOracle`] so every fight can be replayed.
//!
//! Entry points are [`Character`], [`Monster`] and [`Encounter`].
pub mod combat;
pub mod config;
pub mod effects;
pub mod entity;
pub mod env;
pub mod error;
pub mod items;
pub mod progression;
pub mod spells;
pub mod stats;

pub use combat::{
    ActionError, ActionOutcome, AttackReport, CombatAction, Combatant, Damage, Encounter,
    EncounterError, EncounterOutcome, Heal, TurnReport,
};
pub use config::CombatConfig;
pub use effects::{
    ActiveEffect, ActiveEffects, BeneficialBuff, BuffStat, DamageOverTime, EffectError,
    StatusEffect,
};
pub use entity::{
    Character, DotTick, EntityTemplate, KillReward, LivingEntity, Loot, LootEntry, Monster,
    MonsterTemplate, TemplateError, TickReport,
};
pub use env::{CombatEnv, LevelGrants, LevelRow, PcgRng, ProgressionTable, RngOracle};
pub use error::{ErrorSeverity, GameError};
pub use items::{Equipment, EquipmentSlot, Inventory, InventoryError, Item, ItemKind};
pub use progression::{Quest, QuestKind, QuestLog, monster_kill_xp};
pub use spells::{
    CastError, CastOutcome, CastsSpells, CharacterClass, Paladin, Spell, SpellBook,
    SpellCatalog, SpellEffect, SpellTemplate,
};
pub use stats::{AttributeKind, Attributes, DamageRange, ResourceMeter, StatSheet};
