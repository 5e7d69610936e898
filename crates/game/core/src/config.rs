/// Combat rules constants and tunable parameters.
///
/// Every entity carries a copy of the rules it was built with, so the
/// formulas in [`crate::combat`] and [`crate::stats`] never reach for globals.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Constant term of the armor mitigation denominator.
    pub armor_constant: f64,
    /// Attacker-level factor of the armor mitigation denominator.
    pub armor_per_attacker_level: f64,
    /// Damage adjustment per level of difference between combatants, in percent.
    pub level_difference_percent: f64,
    /// Armor granted per point of agility.
    pub armor_per_agility: f64,
    /// Strength granted per point of agility.
    pub strength_per_agility: f64,
    /// Melee damage granted per point of strength (added to both ends of the range).
    pub damage_per_strength: f64,
    /// Extra experience per level a slain monster has over its killer, in percent.
    pub monster_xp_bonus_percent: f64,
    /// Killers this many levels above a monster receive no experience for it.
    pub xp_level_gap_ceiling: u32,
    /// Chance of a heal spell landing as a critical heal, in percent.
    pub heal_crit_chance_percent: f64,
    /// Multiplier applied to critical heals.
    pub heal_crit_multiplier: f64,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of distinct status effects an entity can hold at once.
    pub const MAX_STATUS_EFFECTS: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ARMOR_CONSTANT: f64 = 400.0;
    pub const DEFAULT_ARMOR_PER_ATTACKER_LEVEL: f64 = 85.0;
    pub const DEFAULT_LEVEL_DIFFERENCE_PERCENT: f64 = 10.0;
    pub const DEFAULT_ARMOR_PER_AGILITY: f64 = 2.5;
    pub const DEFAULT_STRENGTH_PER_AGILITY: f64 = 0.5;
    pub const DEFAULT_DAMAGE_PER_STRENGTH: f64 = 0.4;
    pub const DEFAULT_MONSTER_XP_BONUS_PERCENT: f64 = 10.0;
    pub const DEFAULT_XP_LEVEL_GAP_CEILING: u32 = 5;
    pub const DEFAULT_HEAL_CRIT_CHANCE_PERCENT: f64 = 10.0;
    pub const DEFAULT_HEAL_CRIT_MULTIPLIER: f64 = 1.5;

    pub const fn new() -> Self {
        Self {
            armor_constant: Self::DEFAULT_ARMOR_CONSTANT,
            armor_per_attacker_level: Self::DEFAULT_ARMOR_PER_ATTACKER_LEVEL,
            level_difference_percent: Self::DEFAULT_LEVEL_DIFFERENCE_PERCENT,
            armor_per_agility: Self::DEFAULT_ARMOR_PER_AGILITY,
            strength_per_agility: Self::DEFAULT_STRENGTH_PER_AGILITY,
            damage_per_strength: Self::DEFAULT_DAMAGE_PER_STRENGTH,
            monster_xp_bonus_percent: Self::DEFAULT_MONSTER_XP_BONUS_PERCENT,
            xp_level_gap_ceiling: Self::DEFAULT_XP_LEVEL_GAP_CEILING,
            heal_crit_chance_percent: Self::DEFAULT_HEAL_CRIT_CHANCE_PERCENT,
            heal_crit_multiplier: Self::DEFAULT_HEAL_CRIT_MULTIPLIER,
        }
    }

    /// Same rules with critical heals disabled (useful for deterministic replays).
    pub const fn without_heal_crits(mut self) -> Self {
        self.heal_crit_chance_percent = 0.0;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
