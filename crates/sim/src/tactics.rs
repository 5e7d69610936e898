//! Action choice for the simulated character.

use combat_core::{Character, CombatAction, Combatant, SpellEffect};

/// Health fraction below which a ready heal is cast.
const HEAL_THRESHOLD: f64 = 0.4;

/// Pick the next action by priority: heal when low, keep the seal and self
/// buffs up, strike when ready, otherwise swing.
pub fn choose_action(character: &Character) -> CombatAction {
    let entity = character.entity();
    let low_health = entity.health() < entity.max_health() * HEAL_THRESHOLD;
    let seal_active = !character.swing_bonus().is_zero();

    let mut heal = None;
    let mut seal = None;
    let mut buff = None;
    let mut strike = None;
    for spell in character.class().spell_book().ready(entity.mana()) {
        let name = spell.name().to_string();
        match spell.effect() {
            SpellEffect::Heal { .. } => heal = Some(name),
            SpellEffect::Seal { .. } if !seal_active => seal = Some(name),
            SpellEffect::Buff { buff: template } if !entity.has_effect(template.name()) => {
                buff = Some(name)
            }
            SpellEffect::Strike { .. } => strike = Some(name),
            _ => {}
        }
    }

    let heal = heal.filter(|_| low_health);
    heal.or(seal)
        .or(buff)
        .or(strike)
        .map_or(CombatAction::Attack, CombatAction::Cast)
}
