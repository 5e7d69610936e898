//! Pure damage adjustment formulas.
//!
//! # Formulas
//!
//! ```text
//! armor reduction  = armor / (armor + 400 + 85 × attacker_level)
//! mitigated        = physical × (1 - reduction)         (magical untouched)
//!
//! level factor     = 1 ± 0.10 × |own_level - other_level|
//! ```
//!
//! The constants come from [`CombatConfig`].

use super::Damage;
use crate::config::CombatConfig;

/// Fraction of physical damage removed by `armor` against an attacker of
/// `attacker_level`. Negative armor counts as zero.
pub fn armor_reduction_fraction(armor: f64, attacker_level: u32, rules: &CombatConfig) -> f64 {
    let armor = armor.max(0.0);
    let denominator =
        armor + rules.armor_constant + rules.armor_per_attacker_level * f64::from(attacker_level);
    if denominator <= 0.0 {
        return 0.0;
    }
    armor / denominator
}

/// Apply armor mitigation to the physical component of `damage`.
pub fn apply_armor_reduction(
    damage: Damage,
    armor: f64,
    attacker_level: u32,
    rules: &CombatConfig,
) -> Damage {
    if damage.physical_amount() == 0.0 {
        return damage;
    }
    let fraction = armor_reduction_fraction(armor, attacker_level, rules);
    damage - Damage::physical(damage.physical_amount() * fraction)
}

/// Scale `damage` by the level difference between `own_level` and `other_level`.
///
/// Non-inverse mode is used when dealing damage: a higher own level raises
/// damage by the configured percent per level, a lower one lowers it. Inverse
/// mode is used when receiving damage from a source that is no longer at
/// hand (an active DoT): the sign flips, so a higher own level lowers it.
pub fn level_difference_damage(
    damage: Damage,
    own_level: u32,
    other_level: u32,
    inverse: bool,
    rules: &CombatConfig,
) -> Damage {
    let difference = i64::from(own_level) - i64::from(other_level);
    if difference == 0 {
        return damage;
    }

    let step = rules.level_difference_percent / 100.0 * difference.unsigned_abs() as f64;
    let own_is_higher = difference > 0;
    let increase = own_is_higher != inverse;
    let factor = if increase { 1.0 + step } else { 1.0 - step };
    damage.scale(factor)
}
