//! Stat Aggregation - derived values from base stats, gear and buffs.
//!
//! Recalculation runs in a fixed order:
//!
//! ```text
//! [ 1. bonus health / bonus mana → max health / max mana ]
//!      ↓
//! [ 2. agility → armor (+2.5/pt), strength (+0.5/pt) ]
//!      ↓
//! [ 3. weapon range + 0.4 × strength → melee damage range ]
//! ```
//!
//! Each derived quantity keeps the amount it last applied, so recalculating
//! subtracts the old contribution before adding the new one and running it
//! twice changes nothing.

use tracing::debug;

use super::attributes::{AttributeKind, Attributes};
use super::resources::{ResourceKind, ResourceMeter};
use crate::config::CombatConfig;

/// Inclusive melee damage range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRange {
    pub min: f64,
    pub max: f64,
}

impl DamageRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Shift both ends by `amount`.
    pub fn offset(&self, amount: f64) -> Self {
        Self::new(self.min + amount, self.max + amount)
    }
}

/// Contributions currently folded into the sheet by aggregation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedBonuses {
    pub health: f64,
    pub mana: f64,
    pub agility_armor: f64,
    pub agility_strength: f64,
}

/// Everything Stat Aggregation reads and writes for one entity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatSheet {
    pub health: ResourceMeter,
    pub mana: ResourceMeter,
    /// Base attributes plus equipment and buff contributions plus the
    /// agility-derived share recorded in `applied`.
    pub attributes: Attributes,
    pub applied: AppliedBonuses,
    /// Damage range used when no weapon is equipped.
    pub unarmed: DamageRange,
    /// Effective melee damage range (output of step 3).
    pub damage: DamageRange,
}

impl StatSheet {
    /// A sheet with full meters; call [`StatSheet::recalculate`] before use.
    pub fn new(max_health: f64, max_mana: f64, attributes: Attributes, unarmed: DamageRange) -> Self {
        Self {
            health: ResourceMeter::full(ResourceKind::Health, max_health),
            mana: ResourceMeter::full(ResourceKind::Mana, max_mana),
            attributes,
            applied: AppliedBonuses::default(),
            unarmed,
            damage: unarmed,
        }
    }

    /// Run all three aggregation steps.
    ///
    /// `weapon` is the equipped weapon's base range, if any. Resource changes
    /// follow the max-change policy in [`super::resources`].
    pub fn recalculate(
        &mut self,
        weapon: Option<DamageRange>,
        in_combat: bool,
        rules: &CombatConfig,
        owner: &str,
    ) {
        self.apply_resource_bonuses(in_combat, owner);
        self.apply_agility_bonuses(rules);
        self.apply_damage_range(weapon, rules);

        debug!(
            owner,
            max_health = self.health.max,
            max_mana = self.mana.max,
            armor = self.attributes[AttributeKind::Armor],
            strength = self.attributes[AttributeKind::Strength],
            min_damage = self.damage.min,
            max_damage = self.damage.max,
            "stats recalculated"
        );
    }

    /// Step 1: fold bonus health/mana into the maximums.
    fn apply_resource_bonuses(&mut self, in_combat: bool, owner: &str) {
        let bonus_health = self.attributes[AttributeKind::BonusHealth];
        let new_max = self.health.max - self.applied.health + bonus_health;
        self.health.change_max(new_max, in_combat, owner);
        self.applied.health = bonus_health;

        let bonus_mana = self.attributes[AttributeKind::BonusMana];
        let new_max = self.mana.max - self.applied.mana + bonus_mana;
        self.mana.change_max(new_max, in_combat, owner);
        self.applied.mana = bonus_mana;
    }

    /// Step 2: agility grants armor and strength.
    fn apply_agility_bonuses(&mut self, rules: &CombatConfig) {
        self.attributes[AttributeKind::Armor] -= self.applied.agility_armor;
        self.attributes[AttributeKind::Strength] -= self.applied.agility_strength;

        let agility = self.attributes[AttributeKind::Agility];
        self.applied.agility_armor = agility * rules.armor_per_agility;
        self.applied.agility_strength = agility * rules.strength_per_agility;

        self.attributes[AttributeKind::Armor] += self.applied.agility_armor;
        self.attributes[AttributeKind::Strength] += self.applied.agility_strength;
    }

    /// Step 3: melee range from the weapon and the strength finalized in step 2.
    fn apply_damage_range(&mut self, weapon: Option<DamageRange>, rules: &CombatConfig) {
        let base = weapon.unwrap_or(self.unarmed);
        let strength = self.attributes[AttributeKind::Strength];
        self.damage = base.offset(rules.damage_per_strength * strength);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> StatSheet {
        let attributes = Attributes::new()
            .with(AttributeKind::Agility, 4.0)
            .with(AttributeKind::Strength, 10.0)
            .with(AttributeKind::Armor, 20.0);
        StatSheet::new(100.0, 50.0, attributes, DamageRange::new(1.0, 3.0))
    }

    #[test]
    fn agility_and_strength_feed_derived_values() {
        let rules = CombatConfig::default();
        let mut sheet = sheet();
        sheet.recalculate(None, false, &rules, "tester");

        // 20 + 4 × 2.5
        assert_eq!(sheet.attributes[AttributeKind::Armor], 30.0);
        // 10 + 4 × 0.5
        assert_eq!(sheet.attributes[AttributeKind::Strength], 12.0);
        // unarmed 1-3 + 0.4 × 12
        assert!((sheet.damage.min - 5.8).abs() < 1e-9);
        assert!((sheet.damage.max - 7.8).abs() < 1e-9);
    }

    #[test]
    fn recalculation_is_idempotent() {
        let rules = CombatConfig::default();
        let mut sheet = sheet();
        sheet.attributes[AttributeKind::BonusHealth] = 15.0;
        sheet.recalculate(None, false, &rules, "tester");
        let once = sheet.clone();
        sheet.recalculate(None, false, &rules, "tester");
        sheet.recalculate(None, false, &rules, "tester");
        assert_eq!(sheet, once);
        assert_eq!(sheet.health.max, 115.0);
        assert_eq!(sheet.health.current, 115.0);
    }

    #[test]
    fn agility_change_is_read_fresh() {
        let rules = CombatConfig::default();
        let mut sheet = sheet();
        sheet.recalculate(None, false, &rules, "tester");

        sheet.attributes[AttributeKind::Agility] = 0.0;
        sheet.recalculate(None, false, &rules, "tester");
        assert_eq!(sheet.attributes[AttributeKind::Armor], 20.0);
        assert_eq!(sheet.attributes[AttributeKind::Strength], 10.0);
        assert!((sheet.damage.min - 5.0).abs() < 1e-9);
    }

    #[test]
    fn weapon_replaces_unarmed_range() {
        let rules = CombatConfig::default();
        let mut sheet = sheet();
        sheet.recalculate(Some(DamageRange::new(10.0, 20.0)), false, &rules, "tester");
        assert!((sheet.damage.min - 14.8).abs() < 1e-9);
        assert!((sheet.damage.max - 24.8).abs() < 1e-9);
    }

    #[test]
    fn in_combat_bonus_does_not_heal() {
        let rules = CombatConfig::default();
        let mut sheet = sheet();
        sheet.recalculate(None, false, &rules, "tester");
        sheet.health.current = 60.0;

        sheet.attributes[AttributeKind::BonusHealth] = 40.0;
        sheet.recalculate(None, true, &rules, "tester");
        assert_eq!(sheet.health.max, 140.0);
        assert_eq!(sheet.health.current, 60.0);
    }
}
