//! Spells, spell books and spell-casting classes.
//!
//! Each character owns its [`SpellBook`]; nothing is shared between
//! instances. Classes plug in through the [`CastsSpells`] trait.
mod book;
mod catalog;
mod class;
mod error;
mod paladin;
mod spell;

pub use book::SpellBook;
pub use catalog::SpellCatalog;
pub use class::{CastsSpells, CharacterClass};
pub use error::CastError;
pub use paladin::{Paladin, SealAura};
pub use spell::{CastOutcome, Spell, SpellEffect, SpellTemplate};
