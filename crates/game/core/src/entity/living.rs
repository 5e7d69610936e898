//! Living entities: the shared combat state of characters and monsters.

use tracing::{debug, info, warn};

use super::template::{EntityTemplate, TemplateError};
use crate::combat::{self, Damage, Heal};
use crate::config::CombatConfig;
use crate::effects::{
    ActiveEffect, ActiveEffects, BeneficialBuff, DamageOverTime, EffectError, StatusEffect,
};
use crate::env::{LevelGrants, RngOracle};
use crate::items::{Equipment, EquipmentSlot, InventoryError, Item};
use crate::stats::{AttributeKind, Attributes, ResourceMeter, StatSheet};

/// One DoT tick resolved at the start of a turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DotTick {
    pub effect: String,
    /// Damage after level scaling, armor and absorption.
    pub damage: Damage,
}

/// Everything that happened during a start-of-turn update.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub ticks: Vec<DotTick>,
    /// DoTs that ran out this turn.
    pub expired: Vec<String>,
    pub died: bool,
}

impl TickReport {
    pub fn total_damage(&self) -> f64 {
        self.ticks.iter().map(|tick| tick.damage.total()).sum()
    }
}

/// State shared by every entity that can fight.
///
/// Invariants:
/// - `health ∈ [0, max_health]`, `mana ∈ [0, max_mana]`
/// - `alive == false` iff health reached zero (until [`LivingEntity::revive`])
/// - attributes always equal base + equipment + active buffs + agility bonuses
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LivingEntity {
    name: String,
    level: u32,
    stats: StatSheet,
    absorption_shield: f64,
    alive: bool,
    in_combat: bool,
    effects: ActiveEffects,
    equipment: Equipment,
    rules: CombatConfig,
}

impl LivingEntity {
    /// Build an entity from resolved template data.
    pub fn from_template(
        template: &EntityTemplate,
        rules: CombatConfig,
    ) -> Result<Self, TemplateError> {
        template.validate()?;
        let stats = StatSheet::new(
            template.health,
            template.mana,
            template.attributes,
            template.unarmed(),
        );
        let mut entity = Self {
            name: template.name.clone(),
            level: template.level,
            stats,
            absorption_shield: 0.0,
            alive: true,
            in_combat: false,
            effects: ActiveEffects::empty(),
            equipment: Equipment::empty(),
            rules,
        };
        entity.recalculate_stats();
        Ok(entity)
    }

    // ===== accessors =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn health(&self) -> f64 {
        self.stats.health.current
    }

    pub fn max_health(&self) -> f64 {
        self.stats.health.max
    }

    pub fn mana(&self) -> f64 {
        self.stats.mana.current
    }

    pub fn max_mana(&self) -> f64 {
        self.stats.mana.max
    }

    pub fn attribute(&self, kind: AttributeKind) -> f64 {
        self.stats.attributes[kind]
    }

    pub fn attributes(&self) -> &Attributes {
        &self.stats.attributes
    }

    pub fn stats(&self) -> &StatSheet {
        &self.stats
    }

    pub fn min_damage(&self) -> f64 {
        self.stats.damage.min
    }

    pub fn max_damage(&self) -> f64 {
        self.stats.damage.max
    }

    pub fn absorption_shield(&self) -> f64 {
        self.absorption_shield
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_in_combat(&self) -> bool {
        self.in_combat
    }

    pub fn rules(&self) -> &CombatConfig {
        &self.rules
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub(crate) fn mana_meter_mut(&mut self) -> &mut ResourceMeter {
        &mut self.stats.mana
    }

    pub fn enter_combat(&mut self) {
        self.in_combat = true;
    }

    pub fn leave_combat(&mut self) {
        self.in_combat = false;
    }

    // ===== combat resolution =====

    /// Roll an auto attack against a target of `target_level`.
    ///
    /// The roll is a uniform integer in `[min_damage, max_damage]` (fractional
    /// ends truncated), then scaled by the level difference.
    pub fn get_auto_attack_damage(&self, target_level: u32, rng: &mut dyn RngOracle) -> Damage {
        let min = self.stats.damage.min.max(0.0).trunc() as u32;
        let max = (self.stats.damage.max.max(0.0).trunc() as u32).max(min);
        let roll = rng.range(min, max);
        self.calculate_level_difference_damage(Damage::physical(f64::from(roll)), target_level, false)
    }

    /// Scale `damage` by the level difference to `other_level`.
    ///
    /// Non-inverse when dealing damage, inverse when receiving damage from a
    /// source whose caster is not at hand.
    pub fn calculate_level_difference_damage(
        &self,
        damage: Damage,
        other_level: u32,
        inverse: bool,
    ) -> Damage {
        combat::level_difference_damage(damage, self.level, other_level, inverse, &self.rules)
    }

    /// Damage left after this entity's armor, without touching anything.
    pub fn preview_armor_reduction(&self, damage: Damage, attacker_level: u32) -> Damage {
        combat::apply_armor_reduction(
            damage,
            self.stats.attributes[AttributeKind::Armor],
            attacker_level,
            &self.rules,
        )
    }

    /// Damage left after the absorption shield, leaving the shield intact.
    pub fn preview_absorption(&self, damage: Damage) -> Damage {
        let mut damage = damage;
        damage.handle_absorption(self.absorption_shield);
        damage
    }

    /// Armor, then shield, then health.
    pub fn take_attack(&mut self, damage: Damage, attacker_level: u32) -> Damage {
        let mitigated = self.preview_armor_reduction(damage, attacker_level);
        self.take_damage(mitigated)
    }

    /// Apply already-mitigated damage: the shield soaks first, the rest hits
    /// health. Returns the damage with its absorption recorded.
    pub fn take_damage(&mut self, damage: Damage) -> Damage {
        let mut damage = damage;
        self.absorption_shield = damage.handle_absorption(self.absorption_shield);
        self.stats.health.current = (self.stats.health.current - damage.total()).max(0.0);
        debug!(entity = %self.name, %damage, health = self.stats.health.current, "damage taken");
        self.check_death();
        damage
    }

    fn check_death(&mut self) {
        if self.alive && self.stats.health.current <= 0.0 {
            self.alive = false;
            info!(name = %self.name, "died");
        }
    }

    // ===== healing and resources =====

    pub fn heal(&mut self, amount: f64) -> Heal {
        self.apply_heal(amount, false)
    }

    /// Heal with an already-rolled critical flag. Overheal is recorded and
    /// clamped away.
    pub fn apply_heal(&mut self, amount: f64, critical: bool) -> Heal {
        if !self.alive {
            return Heal::resolve(amount, 0.0, critical);
        }
        let heal = Heal::resolve(amount, self.stats.health.missing(), critical);
        self.stats.health.current += heal.requested;
        if self.stats.health.current > self.stats.health.max {
            self.stats.health.current = self.stats.health.max;
        }
        debug!(entity = %self.name, %heal, "healed");
        heal
    }

    pub fn add_absorption_shield(&mut self, amount: f64) {
        self.absorption_shield += amount.max(0.0);
    }

    /// Returns `(restored, overflow)`.
    pub fn restore_mana(&mut self, amount: f64) -> (f64, f64) {
        self.stats.mana.restore(amount)
    }

    /// Spend mana if enough is available.
    pub fn spend_mana(&mut self, amount: f64) -> bool {
        self.stats.mana.try_spend(amount)
    }

    /// Full health and mana, alive again.
    pub fn revive(&mut self) {
        self.stats.health.refill();
        self.stats.mana.refill();
        self.alive = true;
        info!(name = %self.name, "revived");
    }

    // ===== status effects =====

    pub fn has_effect(&self, name: &str) -> bool {
        self.effects.contains(name)
    }

    pub fn remaining_turns(&self, name: &str) -> Option<u32> {
        self.effects.get(name).map(|active| active.remaining)
    }

    pub fn active_effects(&self) -> &ActiveEffects {
        &self.effects
    }

    /// Whether `name` could be applied without exceeding the effect cap.
    pub fn can_hold_effect(&self, name: &str) -> bool {
        self.effects.has_room_for(name)
    }

    /// Apply an effect, replacing any held effect of the same name and
    /// resetting its duration. Fails without changing anything when the
    /// effect table is full.
    pub fn apply_effect(&mut self, effect: StatusEffect) -> Result<(), EffectError> {
        if !self.effects.has_room_for(effect.name()) {
            return Err(EffectError::CapacityReached {
                holder: self.name.clone(),
                limit: CombatConfig::MAX_STATUS_EFFECTS,
            });
        }

        let mut touches_stats = false;
        if let Some(old) = self.effects.get(effect.name()).and_then(|e| e.effect.as_buff()) {
            self.stats.attributes.subtract_all(&old.contribution());
            touches_stats = true;
        }
        if let Some(buff) = effect.as_buff() {
            self.stats.attributes.add_all(&buff.contribution());
            touches_stats = true;
        }

        debug!(holder = %self.name, effect = effect.name(), turns = effect.duration(), "effect applied");
        self.effects.insert(effect, &self.name)?;
        if touches_stats {
            self.recalculate_stats();
        }
        Ok(())
    }

    pub fn add_buff(&mut self, buff: BeneficialBuff) -> Result<(), EffectError> {
        self.apply_effect(StatusEffect::Buff(buff))
    }

    /// Apply a DoT cast by someone of `caster_level`.
    pub fn add_dot(&mut self, dot: &DamageOverTime, caster_level: u32) -> Result<(), EffectError> {
        self.apply_effect(StatusEffect::Dot(dot.cast_at_level(caster_level)))
    }

    /// Remove an effect by name. Buffs have their stat contribution reversed;
    /// DoTs are simply dropped.
    pub fn remove_effect(&mut self, name: &str) -> Result<StatusEffect, EffectError> {
        let removed = self
            .effects
            .remove(name)
            .ok_or_else(|| self.missing_effect(name))?;
        self.reverse(&removed);
        Ok(removed.effect)
    }

    /// Remove a buff by name; DoTs of that name are not touched.
    pub fn remove_buff(&mut self, name: &str) -> Result<BeneficialBuff, EffectError> {
        let is_buff = self
            .effects
            .get(name)
            .is_some_and(|active| active.effect.as_buff().is_some());
        if !is_buff {
            return Err(self.missing_effect(name));
        }
        match self.remove_effect(name)? {
            StatusEffect::Buff(buff) => Ok(buff),
            StatusEffect::Dot(_) => Err(self.missing_effect(name)),
        }
    }

    fn reverse(&mut self, removed: &ActiveEffect) {
        if let StatusEffect::Buff(buff) = &removed.effect {
            self.stats.attributes.subtract_all(&buff.contribution());
            self.recalculate_stats();
        }
        debug!(holder = %self.name, effect = removed.effect.name(), "effect removed");
    }

    fn missing_effect(&self, name: &str) -> EffectError {
        EffectError::NoSuchEffect {
            effect: name.to_string(),
            holder: self.name.clone(),
        }
    }

    /// Start-of-turn update: every DoT deals one tick and counts down.
    ///
    /// Dead entities do not tick. Ticking stops as soon as the holder dies.
    pub fn start_turn_update(&mut self) -> TickReport {
        let mut report = TickReport::default();
        if !self.alive {
            return report;
        }

        for name in self.effects.dot_names() {
            let Some(dot) = self.effects.get(&name).and_then(|e| e.effect.as_dot()).cloned() else {
                continue;
            };

            let damage = self.receive_dot(&dot);
            report.ticks.push(DotTick {
                effect: name.clone(),
                damage,
            });

            let expired = self
                .effects
                .get_mut(&name)
                .is_some_and(|active| active.tick_down());
            if expired {
                self.effects.remove(&name);
                debug!(holder = %self.name, effect = %name, "dot expired");
                report.expired.push(name);
            }

            if !self.alive {
                report.died = true;
                break;
            }
        }
        report
    }

    /// One DoT tick: inverse level scaling, armor on the physical part, then
    /// shield and health.
    fn receive_dot(&mut self, dot: &DamageOverTime) -> Damage {
        let scaled = self.calculate_level_difference_damage(dot.damage(), dot.caster_level(), true);
        let mitigated = if scaled.physical_amount() > 0.0 {
            self.preview_armor_reduction(scaled, dot.caster_level())
        } else {
            scaled
        };
        self.take_damage(mitigated)
    }

    /// End-of-turn update: buffs count down. Returns the buffs that expired.
    pub fn end_turn_update(&mut self) -> Vec<String> {
        let mut expired = Vec::new();
        for name in self.effects.buff_names() {
            let done = self
                .effects
                .get_mut(&name)
                .is_some_and(|active| active.tick_down());
            if done {
                if let Some(removed) = self.effects.remove(&name) {
                    self.reverse(&removed);
                }
                expired.push(name);
            }
        }
        expired
    }

    // ===== equipment and aggregation =====

    /// Equip `item` in its slot, returning the item it displaced.
    pub fn equip(&mut self, item: Item) -> Result<Option<Item>, InventoryError> {
        let slot = item.slot().ok_or_else(|| InventoryError::NotEquippable {
            name: item.name.clone(),
        })?;

        self.stats.attributes.add_all(&item.bonuses());
        let displaced = self.equipment.put(slot, item);
        if let Some(old) = &displaced {
            self.stats.attributes.subtract_all(&old.bonuses());
        }
        self.recalculate_stats();
        Ok(displaced)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Item> {
        let item = self.equipment.take(slot)?;
        self.stats.attributes.subtract_all(&item.bonuses());
        self.recalculate_stats();
        Some(item)
    }

    /// Re-run Stat Aggregation against the current equipment.
    pub fn recalculate_stats(&mut self) {
        let weapon = self.equipment.weapon_range();
        self.stats
            .recalculate(weapon, self.in_combat, &self.rules, &self.name);
    }

    /// Raise the level by one, add `grants`, then refill health and mana.
    pub fn apply_level_up(&mut self, grants: &LevelGrants) {
        self.level += 1;

        let health_max = self.stats.health.max + grants.health;
        self.stats.health.change_max(health_max, self.in_combat, &self.name);
        let mana_max = self.stats.mana.max + grants.mana;
        self.stats.mana.change_max(mana_max, self.in_combat, &self.name);

        self.stats.attributes.add(AttributeKind::Strength, grants.strength);
        self.stats.attributes.add(AttributeKind::Agility, grants.agility);
        self.stats.attributes.add(AttributeKind::Armor, grants.armor);
        self.recalculate_stats();

        self.stats.health.refill();
        self.stats.mana.refill();
        info!(name = %self.name, level = self.level, "level up");
    }

    /// Log and reject an action while dead.
    pub(crate) fn ensure_alive(&self) -> Result<(), combat::ActionError> {
        if self.alive {
            return Ok(());
        }
        warn!(name = %self.name, "dead entity tried to act");
        Err(combat::ActionError::NotAlive {
            name: self.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::BuffStat;
    use crate::env::PcgRng;
    use crate::items::ItemKind;

    fn entity(health: f64, armor: f64) -> LivingEntity {
        let template = EntityTemplate::new("Dummy", 1, health, 50.0)
            .with_attributes(Attributes::new().with(AttributeKind::Armor, armor))
            .with_damage(4.0, 4.0);
        LivingEntity::from_template(&template, CombatConfig::default()).unwrap()
    }

    fn dot(name: &str, physical: f64, magical: f64, turns: u32) -> DamageOverTime {
        DamageOverTime::new(name, Damage::new(physical, magical), turns, 1).unwrap()
    }

    #[test]
    fn take_attack_applies_armor_then_shield() {
        let mut target = entity(100.0, 500.0);
        target.add_absorption_shield(10.0);
        let taken = target.take_attack(Damage::new(500.0, 4.0), 5);
        assert_eq!(taken.magical_absorbed(), 4.0);
        assert_eq!(taken.physical_absorbed(), 6.0);
        assert_eq!(target.absorption_shield(), 0.0);
        assert!(!target.is_alive());
        assert_eq!(target.health(), 0.0);
    }

    #[test]
    fn previews_do_not_mutate() {
        let mut target = entity(100.0, 0.0);
        target.add_absorption_shield(3.0);
        let preview = target.preview_absorption(Damage::magical(5.0));
        assert_eq!(preview.magical_amount(), 2.0);
        assert_eq!(target.absorption_shield(), 3.0);
    }

    #[test]
    fn auto_attack_rolls_in_range() {
        let attacker = entity(10.0, 0.0);
        let mut rng = PcgRng::seeded(9);
        for _ in 0..20 {
            let damage = attacker.get_auto_attack_damage(1, &mut rng);
            assert_eq!(damage.physical_amount(), 4.0);
            assert_eq!(damage.magical_amount(), 0.0);
        }
        assert_eq!(attacker.get_auto_attack_damage(3, &mut rng).physical_amount(), 3.2);
    }

    #[test]
    fn heal_records_overheal() {
        let mut target = entity(100.0, 0.0);
        target.take_damage(Damage::physical(30.0));
        let heal = target.heal(50.0);
        assert_eq!(heal.effective, 30.0);
        assert_eq!(heal.overheal, 20.0);
        assert_eq!(target.health(), 100.0);
    }

    #[test]
    fn buff_reapply_resets_duration() {
        let mut target = entity(100.0, 0.0);
        let buff = BeneficialBuff::new("Fortitude", [(BuffStat::Health, 20)], 3).unwrap();
        target.add_buff(buff.clone()).unwrap();
        target.end_turn_update();
        assert_eq!(target.remaining_turns("Fortitude"), Some(2));

        target.add_buff(buff).unwrap();
        assert_eq!(target.remaining_turns("Fortitude"), Some(3));
        assert_eq!(target.max_health(), 120.0);
    }

    #[test]
    fn buff_apply_then_remove_restores_entity() {
        for in_combat in [false, true] {
            let mut target = entity(100.0, 30.0);
            if in_combat {
                target.enter_combat();
            }
            let before = target.clone();
            let buff = BeneficialBuff::new(
                "Blessing",
                [
                    (BuffStat::Health, 20),
                    (BuffStat::Mana, 10),
                    (BuffStat::Armor, 15),
                    (BuffStat::Strength, 4),
                ],
                3,
            )
            .unwrap();

            target.add_buff(buff.clone()).unwrap();
            assert_eq!(target.max_health(), 120.0);
            assert_eq!(target.max_mana(), 60.0);
            assert_eq!(target.attribute(AttributeKind::Armor), 45.0);
            assert!((target.min_damage() - 5.6).abs() < 1e-9);

            assert_eq!(target.remove_buff("Blessing").unwrap(), buff);
            assert_eq!(target, before);
        }
    }

    #[test]
    #[should_panic(expected = "missed its new maximum")]
    fn health_buff_fading_below_an_overcapped_value_fails_loudly() {
        let mut target = entity(100.0, 0.0);
        target.enter_combat();
        let buff = BeneficialBuff::new("Fortitude", [(BuffStat::Health, 20)], 3).unwrap();
        target.add_buff(buff).unwrap();
        target.heal(10.0);
        assert_eq!(target.health(), 110.0);
        // 110 over the restored cap of 100, minus 20, lands on 90
        let _ = target.remove_buff("Fortitude");
    }

    #[test]
    fn removing_missing_effect_names_both_parties() {
        let mut target = entity(100.0, 0.0);
        let err = target.remove_effect("Curse").unwrap_err();
        assert_eq!(
            err,
            EffectError::NoSuchEffect {
                effect: "Curse".into(),
                holder: "Dummy".into()
            }
        );
        target.add_dot(&dot("Burn", 0.0, 1.0, 2), 1).unwrap();
        assert!(target.remove_buff("Burn").is_err());
        assert!(target.has_effect("Burn"));
    }

    #[test]
    fn capacity_overflow_leaves_entity_unchanged() {
        let mut target = entity(100.0, 0.0);
        for i in 0..CombatConfig::MAX_STATUS_EFFECTS {
            target.add_dot(&dot(&format!("Dot {i}"), 0.0, 1.0, 2), 1).unwrap();
        }
        let before = target.clone();
        let buff = BeneficialBuff::new("Might", [(BuffStat::Strength, 5)], 2).unwrap();
        assert!(matches!(
            target.add_buff(buff),
            Err(EffectError::CapacityReached { .. })
        ));
        assert_eq!(target, before);
        // same name still fits
        target.add_dot(&dot("Dot 0", 0.0, 2.0, 4), 1).unwrap();
        assert_eq!(target.remaining_turns("Dot 0"), Some(4));
    }

    #[test]
    fn dead_entities_do_not_tick() {
        let mut target = entity(10.0, 0.0);
        target.add_dot(&dot("Burn", 0.0, 3.0, 5), 1).unwrap();
        target.take_damage(Damage::physical(10.0));
        let report = target.start_turn_update();
        assert!(report.ticks.is_empty());
        assert_eq!(target.remaining_turns("Burn"), Some(5));
    }

    #[test]
    fn physical_dot_is_armor_mitigated() {
        let mut target = entity(100.0, 400.0);
        target.add_dot(&dot("Bleed", 10.0, 0.0, 1), 0).unwrap();
        let report = target.start_turn_update();
        // holder level 1 vs caster level 0 (inverse): 10 × 0.9 = 9, armor 400/800 halves it
        assert_eq!(report.ticks[0].damage.physical_amount(), 4.5);
        assert_eq!(report.expired, vec!["Bleed".to_string()]);
        assert!(!target.has_effect("Bleed"));
    }

    #[test]
    fn equip_swaps_bonuses() {
        let mut target = entity(100.0, 0.0);
        let chest = |name: &str, armor: f64| {
            Item::new(
                name,
                ItemKind::Equipment {
                    slot: EquipmentSlot::Chest,
                    attributes: Attributes::new().with(AttributeKind::Armor, armor),
                },
            )
        };

        assert!(target.equip(chest("Leather", 10.0)).unwrap().is_none());
        assert_eq!(target.attribute(AttributeKind::Armor), 10.0);
        let displaced = target.equip(chest("Mail", 25.0)).unwrap();
        assert_eq!(displaced.map(|i| i.name), Some("Leather".into()));
        assert_eq!(target.attribute(AttributeKind::Armor), 25.0);
        target.unequip(EquipmentSlot::Chest);
        assert_eq!(target.attribute(AttributeKind::Armor), 0.0);
    }

    #[test]
    fn misc_items_cannot_be_equipped() {
        let mut target = entity(100.0, 0.0);
        let err = target.equip(Item::new("Rock", ItemKind::Misc)).unwrap_err();
        assert_eq!(err, InventoryError::NotEquippable { name: "Rock".into() });
    }

    #[test]
    fn level_up_refills_in_combat() {
        let mut target = entity(100.0, 0.0);
        target.enter_combat();
        target.take_damage(Damage::physical(60.0));
        target.apply_level_up(&LevelGrants::new(10.0, 5.0, 1.0, 2.0, 0.0));
        assert_eq!(target.level(), 2);
        assert_eq!(target.max_health(), 110.0);
        assert_eq!(target.health(), target.max_health());
        assert_eq!(target.mana(), target.max_mana());
        assert_eq!(target.attribute(AttributeKind::Armor), 5.0);
    }

    #[test]
    fn revive_restores_everything() {
        let mut target = entity(20.0, 0.0);
        target.take_damage(Damage::magical(25.0));
        assert!(target.ensure_alive().is_err());
        target.revive();
        assert!(target.is_alive());
        assert_eq!(target.health(), 20.0);
    }
}
