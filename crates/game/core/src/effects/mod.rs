//! Status effect engine.
//!
//! Two effect variants exist: [`BeneficialBuff`] (stat modifiers) and
//! [`DamageOverTime`] (periodic damage). Their lifecycle on an entity:
//!
//! - **tick phase** (start of turn): every DoT deals its damage and counts down
//! - **decay phase** (end of turn): every buff counts down
//! - an effect whose counter reaches zero is removed; removing a buff reverses
//!   its stat contribution first
//!
//! Reapplying an effect the entity already holds replaces it and resets the
//! counter to the new full duration.

pub mod active;
pub mod buff;
pub mod dot;
pub mod error;

pub use active::{ActiveEffect, ActiveEffects, StatusEffect};
pub use buff::{BeneficialBuff, BuffStat};
pub use dot::DamageOverTime;
pub use error::EffectError;
