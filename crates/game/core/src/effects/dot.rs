//! Damage over time: a fixed per-tick damage value applied at the start of
//! every turn until the duration runs out.

use super::error::EffectError;
use crate::combat::Damage;

/// Periodic damage effect.
///
/// The caster level is stored because the holder never has a reference to the
/// caster when a tick resolves; it is refreshed whenever the same spell is
/// recast. Equality ignores it: two DoTs are equal iff name, damage and
/// duration match.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOverTime {
    name: String,
    damage: Damage,
    duration: u32,
    caster_level: u32,
}

impl DamageOverTime {
    pub fn new(
        name: impl Into<String>,
        damage: Damage,
        duration: u32,
        caster_level: u32,
    ) -> Result<Self, EffectError> {
        let name = name.into();
        if duration == 0 {
            return Err(EffectError::InvalidDuration {
                effect: name,
                duration: 0,
            });
        }
        Ok(Self {
            name,
            damage,
            duration,
            caster_level,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unscaled damage dealt per tick.
    pub fn damage(&self) -> Damage {
        self.damage
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn caster_level(&self) -> u32 {
        self.caster_level
    }

    pub fn set_caster_level(&mut self, level: u32) {
        self.caster_level = level;
    }

    /// The same DoT as cast by someone of `level`.
    pub fn cast_at_level(&self, level: u32) -> Self {
        let mut dot = self.clone();
        dot.caster_level = level;
        dot
    }
}

impl PartialEq for DamageOverTime {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.damage == other.damage && self.duration == other.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_duration() {
        assert!(DamageOverTime::new("Melting", Damage::magical(2.0), 0, 3).is_err());
    }

    #[test]
    fn equality_ignores_caster_level() {
        let a = DamageOverTime::new("Melting", Damage::magical(2.0), 3, 1).unwrap();
        let b = a.cast_at_level(9);
        assert_eq!(a, b);
        assert_eq!(b.caster_level(), 9);

        let weaker = DamageOverTime::new("Melting", Damage::magical(1.0), 3, 1).unwrap();
        assert_ne!(a, weaker);
    }
}
