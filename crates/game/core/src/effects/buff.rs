//! Beneficial buffs: temporary stat increases with a turn-based duration.

use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use super::error::EffectError;
use crate::stats::{AttributeKind, Attributes};

/// Stat a buff may raise.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BuffStat {
    Health,
    Mana,
    Armor,
    Strength,
}

impl BuffStat {
    /// Attribute the buff amount is added to.
    ///
    /// Health and mana go through the bonus attributes so Stat Aggregation
    /// picks them up together with equipment bonuses.
    pub const fn attribute(self) -> AttributeKind {
        match self {
            BuffStat::Health => AttributeKind::BonusHealth,
            BuffStat::Mana => AttributeKind::BonusMana,
            BuffStat::Armor => AttributeKind::Armor,
            BuffStat::Strength => AttributeKind::Strength,
        }
    }
}

/// A temporary positive stat modifier.
///
/// Two buffs are equal iff name, stat amounts and duration match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeneficialBuff {
    name: String,
    amounts: [u32; BuffStat::COUNT],
    duration: u32,
}

impl BeneficialBuff {
    /// Build a buff from typed stat amounts.
    ///
    /// Repeated stats are summed. A zero duration is rejected.
    pub fn new(
        name: impl Into<String>,
        stats: impl IntoIterator<Item = (BuffStat, u32)>,
        duration: u32,
    ) -> Result<Self, EffectError> {
        let name = name.into();
        if duration == 0 {
            return Err(EffectError::InvalidDuration {
                effect: name,
                duration: 0,
            });
        }

        let mut amounts = [0; BuffStat::COUNT];
        for (stat, amount) in stats {
            amounts[stat as usize] += amount;
        }

        Ok(Self {
            name,
            amounts,
            duration,
        })
    }

    /// Build a buff from untyped template data, as rows come out of a store.
    ///
    /// Rejects unknown stat names, negative amounts, and durations below one turn.
    pub fn from_raw<'a>(
        name: impl Into<String>,
        stats: impl IntoIterator<Item = (&'a str, i64)>,
        duration: i64,
    ) -> Result<Self, EffectError> {
        let name = name.into();
        if duration <= 0 {
            return Err(EffectError::InvalidDuration {
                effect: name,
                duration,
            });
        }

        let mut typed = Vec::new();
        for (raw_stat, amount) in stats {
            let stat: BuffStat = raw_stat.parse().map_err(|_| EffectError::UnknownStat {
                effect: name.clone(),
                stat: raw_stat.to_string(),
            })?;
            if amount < 0 {
                return Err(EffectError::NegativeAmount {
                    effect: name,
                    stat: raw_stat.to_string(),
                    amount,
                });
            }
            let amount = u32::try_from(amount).unwrap_or(u32::MAX);
            typed.push((stat, amount));
        }

        let duration = u32::try_from(duration).unwrap_or(u32::MAX);
        Self::new(name, typed, duration)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn amount(&self, stat: BuffStat) -> u32 {
        self.amounts[stat as usize]
    }

    /// Positive entries only.
    pub fn stats(&self) -> impl Iterator<Item = (BuffStat, u32)> + '_ {
        BuffStat::iter()
            .map(|stat| (stat, self.amount(stat)))
            .filter(|(_, amount)| *amount > 0)
    }

    /// Attribute deltas this buff contributes while active.
    pub fn contribution(&self) -> Attributes {
        self.stats()
            .map(|(stat, amount)| (stat.attribute(), f64::from(amount)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_duration() {
        let err = BeneficialBuff::new("Blessing", [(BuffStat::Armor, 5)], 0).unwrap_err();
        assert!(matches!(err, EffectError::InvalidDuration { duration: 0, .. }));
    }

    #[test]
    fn from_raw_validates_rows() {
        let buff = BeneficialBuff::from_raw("Fortitude", [("health", 20), ("mana", 5)], 3)
            .expect("valid buff");
        assert_eq!(buff.amount(BuffStat::Health), 20);
        assert_eq!(buff.amount(BuffStat::Mana), 5);
        assert_eq!(buff.amount(BuffStat::Armor), 0);

        assert!(matches!(
            BeneficialBuff::from_raw("Odd", [("agility", 2)], 3),
            Err(EffectError::UnknownStat { stat, .. }) if stat == "agility"
        ));
        assert!(matches!(
            BeneficialBuff::from_raw("Odd", [("armor", -2)], 3),
            Err(EffectError::NegativeAmount { amount: -2, .. })
        ));
        assert!(matches!(
            BeneficialBuff::from_raw("Odd", [("armor", 2)], -1),
            Err(EffectError::InvalidDuration { duration: -1, .. })
        ));
    }

    #[test]
    fn contribution_maps_to_attributes() {
        let buff = BeneficialBuff::new(
            "Might",
            [(BuffStat::Strength, 4), (BuffStat::Health, 10)],
            2,
        )
        .unwrap();
        let attributes = buff.contribution();
        assert_eq!(attributes[AttributeKind::Strength], 4.0);
        assert_eq!(attributes[AttributeKind::BonusHealth], 10.0);
        assert_eq!(attributes[AttributeKind::Armor], 0.0);
    }

    #[test]
    fn equality_covers_name_stats_and_duration() {
        let a = BeneficialBuff::new("Might", [(BuffStat::Strength, 4)], 2).unwrap();
        let b = BeneficialBuff::new("Might", [(BuffStat::Strength, 4)], 2).unwrap();
        let longer = BeneficialBuff::new("Might", [(BuffStat::Strength, 4)], 3).unwrap();
        let stronger = BeneficialBuff::new("Might", [(BuffStat::Strength, 5)], 2).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, longer);
        assert_ne!(a, stronger);
    }
}
