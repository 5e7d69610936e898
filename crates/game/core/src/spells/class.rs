use core::fmt;

use strum::{Display, EnumIter, EnumString};

use super::{CastError, CastOutcome, Paladin, SpellBook, SpellCatalog};
use crate::combat::{Combatant, Damage};
use crate::entity::LivingEntity;
use crate::env::RngOracle;

/// Playable classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CharacterClass {
    Paladin,
}

impl CharacterClass {
    /// Class state for a character of `level`, with every available spell learned.
    pub fn build(self, catalog: &SpellCatalog, level: u32) -> Box<dyn CastsSpells> {
        let mut class: Box<dyn CastsSpells> = match self {
            CharacterClass::Paladin => Box::new(Paladin::new()),
        };
        class.learn_spells(catalog, level);
        class
    }
}

/// Capability of a class to cast spells.
///
/// Every spell-casting class owns its spell book and any combat-only state
/// (auras, charges) separately from the generic status effect table.
pub trait CastsSpells: fmt::Debug + Send + Sync {
    fn class(&self) -> CharacterClass;

    fn spell_book(&self) -> &SpellBook;

    fn spell_book_mut(&mut self) -> &mut SpellBook;

    /// Check everything `cast` would check, without casting.
    fn validate_cast(
        &self,
        spell: &str,
        caster: &LivingEntity,
        target: &dyn Combatant,
    ) -> Result<(), CastError>;

    /// Cast `spell`. Validation happens before any mutation, so a rejected
    /// cast leaves caster, target and spell book untouched.
    fn cast(
        &mut self,
        spell: &str,
        caster: &mut LivingEntity,
        target: &mut dyn Combatant,
        rng: &mut dyn RngOracle,
    ) -> Result<CastOutcome, CastError>;

    /// Extra damage added to each auto attack.
    fn swing_bonus(&self) -> Damage {
        Damage::zero()
    }

    /// Learn or upgrade spells available at `level`.
    fn learn_spells(&mut self, catalog: &SpellCatalog, level: u32) -> Vec<String> {
        let class = self.class();
        self.spell_book_mut().learn_available(catalog, class, level)
    }

    /// One turn elapses: cooldowns count down.
    fn end_turn(&mut self) {
        self.spell_book_mut().pass_turn();
    }

    /// Combat is over: cooldowns reset and combat-only state is cleared.
    fn leave_combat(&mut self) {
        self.spell_book_mut().reset_cooldowns();
    }
}
