//! Spells and their cooldown state machine.
//!
//! ```text
//! Ready ──cast()──▶ OnCooldown(n) ──pass_turn()×n──▶ Ready
//!   ▲                                                  │
//!   └──────────────── reset_cooldown() ◀───────────────┘
//! ```

use core::fmt;

use tracing::debug;

use super::{CastError, CharacterClass};
use crate::combat::{Damage, Heal};
use crate::effects::{BeneficialBuff, DamageOverTime};
use crate::stats::ResourceMeter;

/// What a spell does when it lands.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellEffect {
    /// Direct magical damage to the target; the DoT, if any, follows.
    Strike {
        magical_damage: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        dot: Option<DamageOverTime>,
    },
    /// Heal the caster.
    Heal { amount: f64 },
    /// Toggle an aura that adds magical damage to every auto attack.
    Seal { damage_per_swing: f64, duration: u32 },
    /// Apply a buff to the caster.
    Buff { buff: BeneficialBuff },
}

/// One rank of a spell as defined by content.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellTemplate {
    pub name: String,
    pub class: CharacterClass,
    pub rank: u32,
    pub level_required: u32,
    pub mana_cost: f64,
    /// Turns the spell stays unavailable after a cast.
    pub cooldown: u32,
    pub effect: SpellEffect,
}

/// A learned spell: its current rank plus cooldown state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spell {
    template: SpellTemplate,
    remaining_cooldown: u32,
}

impl Spell {
    pub fn learn(template: SpellTemplate) -> Self {
        Self {
            template,
            remaining_cooldown: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }

    pub fn rank(&self) -> u32 {
        self.template.rank
    }

    pub fn mana_cost(&self) -> f64 {
        self.template.mana_cost
    }

    pub fn cooldown(&self) -> u32 {
        self.template.cooldown
    }

    pub fn effect(&self) -> &SpellEffect {
        &self.template.effect
    }

    pub fn template(&self) -> &SpellTemplate {
        &self.template
    }

    pub fn remaining_cooldown(&self) -> u32 {
        self.remaining_cooldown
    }

    pub fn is_ready(&self) -> bool {
        self.remaining_cooldown == 0
    }

    /// Check readiness and mana without changing anything.
    pub fn can_cast(&self, mana: f64) -> Result<(), CastError> {
        if !self.is_ready() {
            return Err(CastError::OnCooldown {
                spell: self.name().to_string(),
                remaining: self.remaining_cooldown,
            });
        }
        if mana < self.template.mana_cost {
            return Err(CastError::NotEnoughMana {
                spell: self.name().to_string(),
                required: self.template.mana_cost,
                available: mana,
            });
        }
        Ok(())
    }

    /// Pay the mana cost and start the cooldown.
    pub fn cast(&mut self, mana: &mut ResourceMeter) -> Result<(), CastError> {
        self.can_cast(mana.current)?;
        if !mana.try_spend(self.template.mana_cost) {
            return Err(CastError::NotEnoughMana {
                spell: self.name().to_string(),
                required: self.template.mana_cost,
                available: mana.current,
            });
        }
        self.remaining_cooldown = self.template.cooldown;
        debug!(spell = self.name(), cooldown = self.remaining_cooldown, "spell cast");
        Ok(())
    }

    /// One turn elapses.
    pub fn pass_turn(&mut self) {
        self.remaining_cooldown = self.remaining_cooldown.saturating_sub(1);
    }

    pub fn reset_cooldown(&mut self) {
        self.remaining_cooldown = 0;
    }

    /// Replace the rank in place, keeping cooldown state.
    pub fn upgrade_to(&mut self, template: SpellTemplate) {
        self.template = template;
    }
}

/// What a successful cast did.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastOutcome {
    Struck {
        spell: String,
        damage: Damage,
        dot: Option<String>,
        target_died: bool,
    },
    Healed {
        spell: String,
        heal: Heal,
    },
    SealActivated {
        spell: String,
        turns: u32,
    },
    Buffed {
        spell: String,
        buff: String,
    },
}

impl CastOutcome {
    pub fn spell(&self) -> &str {
        match self {
            Self::Struck { spell, .. }
            | Self::Healed { spell, .. }
            | Self::SealActivated { spell, .. }
            | Self::Buffed { spell, .. } => spell,
        }
    }
}

impl fmt::Display for CastOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struck {
                spell,
                damage,
                dot,
                target_died,
            } => {
                write!(f, "{spell} deals {damage}")?;
                if let Some(dot) = dot {
                    write!(f, " and applies {dot}")?;
                }
                if *target_died {
                    write!(f, ", killing the target")?;
                }
                Ok(())
            }
            Self::Healed { spell, heal } => write!(f, "{spell}: {heal}"),
            Self::SealActivated { spell, turns } => write!(f, "{spell} active for {turns} turns"),
            Self::Buffed { spell, buff } => write!(f, "{spell} grants {buff}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::ResourceKind;

    fn template(cost: f64, cooldown: u32) -> SpellTemplate {
        SpellTemplate {
            name: "Holy Shock".into(),
            class: CharacterClass::Paladin,
            rank: 1,
            level_required: 1,
            mana_cost: cost,
            cooldown,
            effect: SpellEffect::Strike {
                magical_damage: 10.0,
                dot: None,
            },
        }
    }

    #[test]
    fn cooldown_cycle() {
        let mut mana = ResourceMeter::full(ResourceKind::Mana, 100.0);
        let mut spell = Spell::learn(template(20.0, 2));

        spell.cast(&mut mana).unwrap();
        assert_eq!(mana.current, 80.0);
        assert!(!spell.is_ready());

        spell.pass_turn();
        assert_eq!(spell.remaining_cooldown(), 1);
        spell.pass_turn();
        assert!(spell.is_ready());
    }

    #[test]
    fn failed_cast_changes_nothing() {
        let mut mana = ResourceMeter::full(ResourceKind::Mana, 100.0);
        let mut spell = Spell::learn(template(20.0, 3));
        spell.cast(&mut mana).unwrap();

        let before = (spell.clone(), mana);
        assert_eq!(
            spell.cast(&mut mana),
            Err(CastError::OnCooldown {
                spell: "Holy Shock".into(),
                remaining: 3
            })
        );
        assert_eq!((spell.clone(), mana), before);

        let mut poor = ResourceMeter::full(ResourceKind::Mana, 10.0);
        let mut fresh = Spell::learn(template(20.0, 3));
        assert!(matches!(
            fresh.cast(&mut poor),
            Err(CastError::NotEnoughMana { .. })
        ));
        assert_eq!(poor.current, 10.0);
        assert!(fresh.is_ready());
    }

    #[test]
    fn upgrade_keeps_cooldown() {
        let mut mana = ResourceMeter::full(ResourceKind::Mana, 100.0);
        let mut spell = Spell::learn(template(20.0, 3));
        spell.cast(&mut mana).unwrap();

        let mut rank2 = template(25.0, 3);
        rank2.rank = 2;
        spell.upgrade_to(rank2);
        assert_eq!(spell.rank(), 2);
        assert_eq!(spell.remaining_cooldown(), 3);
        spell.reset_cooldown();
        assert!(spell.is_ready());
    }
}
