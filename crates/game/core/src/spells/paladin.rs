//! Paladin spells.
//!
//! Besides the spell book, a paladin tracks one seal: an aura toggled on by
//! a `Seal` spell that adds magical damage to every auto attack. The seal
//! counts its own turns and is not a status effect.

use tracing::{debug, warn};

use super::{CastError, CastOutcome, CastsSpells, CharacterClass, SpellBook, SpellEffect};
use crate::combat::{Combatant, Damage};
use crate::config::CombatConfig;
use crate::effects::EffectError;
use crate::entity::LivingEntity;
use crate::env::RngOracle;

/// An active seal.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SealAura {
    pub spell: String,
    pub damage_per_swing: f64,
    pub remaining: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Paladin {
    book: SpellBook,
    seal: Option<SealAura>,
}

impl Paladin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seal(&self) -> Option<&SealAura> {
        self.seal.as_ref()
    }

    fn validate(
        &self,
        name: &str,
        caster: &LivingEntity,
        target: &dyn Combatant,
    ) -> Result<SpellEffect, CastError> {
        if !caster.is_alive() {
            return Err(CastError::CasterDead {
                caster: caster.name().to_string(),
            });
        }
        let spell = self.book.get(name).ok_or_else(|| CastError::UnknownSpell {
            spell: name.to_string(),
        })?;
        spell.can_cast(caster.mana())?;

        match spell.effect() {
            SpellEffect::Strike { dot, .. } => {
                if !target.is_alive() {
                    return Err(CastError::TargetDead {
                        target: target.entity().name().to_string(),
                    });
                }
                if let Some(dot) = dot {
                    ensure_room(target.entity(), dot.name())?;
                }
            }
            SpellEffect::Buff { buff } => ensure_room(caster, buff.name())?,
            SpellEffect::Heal { .. } | SpellEffect::Seal { .. } => {}
        }
        Ok(spell.effect().clone())
    }
}

fn ensure_room(holder: &LivingEntity, effect: &str) -> Result<(), CastError> {
    if holder.can_hold_effect(effect) {
        return Ok(());
    }
    Err(EffectError::CapacityReached {
        holder: holder.name().to_string(),
        limit: CombatConfig::MAX_STATUS_EFFECTS,
    }
    .into())
}

impl CastsSpells for Paladin {
    fn class(&self) -> CharacterClass {
        CharacterClass::Paladin
    }

    fn spell_book(&self) -> &SpellBook {
        &self.book
    }

    fn spell_book_mut(&mut self) -> &mut SpellBook {
        &mut self.book
    }

    fn validate_cast(
        &self,
        spell: &str,
        caster: &LivingEntity,
        target: &dyn Combatant,
    ) -> Result<(), CastError> {
        self.validate(spell, caster, target).map(|_| ())
    }

    fn cast(
        &mut self,
        name: &str,
        caster: &mut LivingEntity,
        target: &mut dyn Combatant,
        rng: &mut dyn RngOracle,
    ) -> Result<CastOutcome, CastError> {
        let effect = self.validate(name, caster, target).inspect_err(|err| {
            warn!(caster = caster.name(), spell = name, %err, "cast rejected");
        })?;
        let spell = self.book.get_mut(name).ok_or_else(|| CastError::UnknownSpell {
            spell: name.to_string(),
        })?;
        spell.cast(caster.mana_meter_mut())?;
        let spell_name = spell.name().to_string();

        let outcome = match effect {
            SpellEffect::Strike {
                magical_damage,
                dot,
            } => {
                let target_level = target.entity().level();
                let damage = caster.calculate_level_difference_damage(
                    Damage::magical(magical_damage),
                    target_level,
                    false,
                );
                let dealt = target.entity_mut().take_attack(damage, caster.level());
                let target_died = !target.is_alive();

                let mut applied = None;
                if target_died {
                    target.on_death(rng);
                } else if let Some(dot) = dot {
                    target.entity_mut().add_dot(&dot, caster.level())?;
                    applied = Some(dot.name().to_string());
                }
                CastOutcome::Struck {
                    spell: spell_name,
                    damage: dealt,
                    dot: applied,
                    target_died,
                }
            }
            SpellEffect::Heal { amount } => {
                let rules = *caster.rules();
                let critical = rng.chance(rules.heal_crit_chance_percent);
                let amount = if critical {
                    amount * rules.heal_crit_multiplier
                } else {
                    amount
                };
                CastOutcome::Healed {
                    spell: spell_name,
                    heal: caster.apply_heal(amount, critical),
                }
            }
            SpellEffect::Seal {
                damage_per_swing,
                duration,
            } => {
                self.seal = Some(SealAura {
                    spell: spell_name.clone(),
                    damage_per_swing,
                    remaining: duration,
                });
                CastOutcome::SealActivated {
                    spell: spell_name,
                    turns: duration,
                }
            }
            SpellEffect::Buff { buff } => {
                let buff_name = buff.name().to_string();
                caster.add_buff(buff)?;
                CastOutcome::Buffed {
                    spell: spell_name,
                    buff: buff_name,
                }
            }
        };

        debug!(caster = caster.name(), %outcome, "spell resolved");
        Ok(outcome)
    }

    fn swing_bonus(&self) -> Damage {
        self.seal
            .as_ref()
            .map_or_else(Damage::zero, |seal| Damage::magical(seal.damage_per_swing))
    }

    fn end_turn(&mut self) {
        self.book.pass_turn();
        if let Some(seal) = &mut self.seal {
            seal.remaining = seal.remaining.saturating_sub(1);
            if seal.remaining == 0 {
                debug!(seal = %seal.spell, "seal faded");
                self.seal = None;
            }
        }
    }

    fn leave_combat(&mut self) {
        self.book.reset_cooldowns();
        self.seal = None;
    }
}
