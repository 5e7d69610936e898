//! Active status effects held by an entity.
//!
//! Effects are keyed by name: holding an effect means holding an effect of
//! that name. The table itself never touches attributes; the stat side of
//! applying and removing buffs lives on [`crate::entity::LivingEntity`].

use arrayvec::ArrayVec;

use super::{BeneficialBuff, DamageOverTime, EffectError};
use crate::config::CombatConfig;

/// Buff or damage-over-time effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffect {
    Buff(BeneficialBuff),
    Dot(DamageOverTime),
}

impl StatusEffect {
    pub fn name(&self) -> &str {
        match self {
            StatusEffect::Buff(buff) => buff.name(),
            StatusEffect::Dot(dot) => dot.name(),
        }
    }

    /// Full duration in turns.
    pub fn duration(&self) -> u32 {
        match self {
            StatusEffect::Buff(buff) => buff.duration(),
            StatusEffect::Dot(dot) => dot.duration(),
        }
    }

    pub fn as_buff(&self) -> Option<&BeneficialBuff> {
        match self {
            StatusEffect::Buff(buff) => Some(buff),
            StatusEffect::Dot(_) => None,
        }
    }

    pub fn as_dot(&self) -> Option<&DamageOverTime> {
        match self {
            StatusEffect::Dot(dot) => Some(dot),
            StatusEffect::Buff(_) => None,
        }
    }
}

impl From<BeneficialBuff> for StatusEffect {
    fn from(buff: BeneficialBuff) -> Self {
        StatusEffect::Buff(buff)
    }
}

impl From<DamageOverTime> for StatusEffect {
    fn from(dot: DamageOverTime) -> Self {
        StatusEffect::Dot(dot)
    }
}

/// An effect with the number of turns it has left.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub effect: StatusEffect,
    pub remaining: u32,
}

impl ActiveEffect {
    pub fn new(effect: StatusEffect) -> Self {
        let remaining = effect.duration();
        Self { effect, remaining }
    }

    /// Count one turn down. Returns true once the effect has run out.
    pub fn tick_down(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}

/// Bounded table of active effects.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffects {
    effects: ArrayVec<ActiveEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl ActiveEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.effects.iter().any(|e| e.effect.name() == name)
    }

    pub fn get(&self, name: &str) -> Option<&ActiveEffect> {
        self.effects.iter().find(|e| e.effect.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ActiveEffect> {
        self.effects.iter_mut().find(|e| e.effect.name() == name)
    }

    /// Whether a new entry named `name` would fit.
    pub fn has_room_for(&self, name: &str) -> bool {
        self.contains(name) || !self.effects.is_full()
    }

    /// Insert `effect` with its full duration, replacing any entry of the same
    /// name. Returns the replaced entry.
    pub fn insert(
        &mut self,
        effect: StatusEffect,
        holder: &str,
    ) -> Result<Option<ActiveEffect>, EffectError> {
        let fresh = ActiveEffect::new(effect);
        if let Some(existing) = self.get_mut(fresh.effect.name()) {
            return Ok(Some(core::mem::replace(existing, fresh)));
        }

        self.effects
            .try_push(fresh)
            .map_err(|_| EffectError::CapacityReached {
                holder: holder.to_string(),
                limit: CombatConfig::MAX_STATUS_EFFECTS,
            })?;
        Ok(None)
    }

    /// Remove the entry named `name`.
    pub fn remove(&mut self, name: &str) -> Option<ActiveEffect> {
        let index = self.effects.iter().position(|e| e.effect.name() == name)?;
        Some(self.effects.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    /// Names of active damage-over-time effects.
    pub fn dot_names(&self) -> Vec<String> {
        self.effects
            .iter()
            .filter(|e| matches!(e.effect, StatusEffect::Dot(_)))
            .map(|e| e.effect.name().to_string())
            .collect()
    }

    /// Names of active buffs.
    pub fn buff_names(&self) -> Vec<String> {
        self.effects
            .iter()
            .filter(|e| matches!(e.effect, StatusEffect::Buff(_)))
            .map(|e| e.effect.name().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
