//! Combat resolution system.
//!
//! # Architecture
//!
//! - **Pure Functions**: armor and level-difference formulas in [`mitigation`]
//! - **Values**: [`Damage`] and [`Heal`] are created fresh for every event
//! - **Combatants**: the [`Combatant`] trait rolls auto attacks between
//!   characters and monsters; [`Encounter`] drives a full duel turn by turn
//!
//! # Resolution order
//!
//! ```text
//! roll [min, max] → level difference → + swing bonus
//!      ↓
//! target armor (physical only) → absorption shield (magical first) → health
//! ```
//!
//! DoT ticks take the same armor → shield → health path with inverse level
//! scaling in front.

pub mod attack;
pub mod damage;
pub mod encounter;
pub mod error;
pub mod heal;
pub mod mitigation;

pub use attack::{AttackReport, Combatant};
pub use damage::{Damage, DamageParts};
pub use encounter::{
    ActionOutcome, CombatAction, Encounter, EncounterError, EncounterOutcome, TurnReport,
};
pub use error::ActionError;
pub use heal::Heal;
pub use mitigation::{apply_armor_reduction, armor_reduction_fraction, level_difference_damage};
