//! Experience formulas and quest tracking.
//!
//! ```text
//! killer ≥ monster + ceiling   → 0 XP
//! monster above killer         → base + ⌊base × 10% × level gap⌋
//! otherwise                    → base
//! ```
mod quest;

pub use quest::{Quest, QuestKind, QuestLog};

use crate::config::CombatConfig;

/// Experience awarded for killing a monster of `monster_level` worth
/// `base_xp`.
pub fn monster_kill_xp(
    base_xp: u32,
    killer_level: u32,
    monster_level: u32,
    rules: &CombatConfig,
) -> u32 {
    if killer_level >= monster_level.saturating_add(rules.xp_level_gap_ceiling) {
        return 0;
    }
    if monster_level <= killer_level {
        return base_xp;
    }

    let gap = f64::from(monster_level - killer_level);
    let bonus = f64::from(base_xp) * rules.monster_xp_bonus_percent / 100.0 * gap;
    base_xp.saturating_add(bonus.trunc() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_level_gives_base() {
        let rules = CombatConfig::default();
        assert_eq!(monster_kill_xp(100, 4, 4, &rules), 100);
        assert_eq!(monster_kill_xp(100, 6, 4, &rules), 100);
    }

    #[test]
    fn higher_monster_gives_truncated_bonus() {
        let rules = CombatConfig::default();
        assert_eq!(monster_kill_xp(100, 3, 5, &rules), 120);
        // 45 × 0.1 × 1 = 4.5, truncated
        assert_eq!(monster_kill_xp(45, 1, 2, &rules), 49);
    }

    #[test]
    fn gray_monsters_give_nothing() {
        let rules = CombatConfig::default();
        assert_eq!(monster_kill_xp(100, 9, 4, &rules), 0);
        assert_eq!(monster_kill_xp(100, 8, 4, &rules), 100);
    }
}
