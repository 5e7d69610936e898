use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, warn};

use super::living::{LivingEntity, TickReport};
use super::monster::{Loot, Monster};
use super::template::{EntityTemplate, TemplateError};
use crate::combat::{Combatant, Damage};
use crate::env::{CombatEnv, RngOracle};
use crate::items::{Inventory, InventoryError, Item, ItemKind};
use crate::progression::{self, Quest, QuestKind, QuestLog};
use crate::spells::{CastError, CastOutcome, CastsSpells, CharacterClass};

/// What a monster kill was worth.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KillReward {
    pub xp: u32,
    /// Level reached if the kill (or a quest it completed) caused a level-up.
    pub new_level: Option<u32>,
    pub quests_completed: Vec<String>,
}

/// A player character: a living entity with a class, progression and bags.
#[derive(Debug)]
pub struct Character {
    entity: LivingEntity,
    class: Box<dyn CastsSpells>,
    env: Arc<CombatEnv>,
    experience: u32,
    xp_required: Option<u32>,
    inventory: Inventory,
    gold: u32,
    quests: QuestLog,
    /// Non-respawnable monsters this character has killed, by guid.
    slain_monsters: BTreeSet<u32>,
}

impl Character {
    pub fn new(
        template: &EntityTemplate,
        class: CharacterClass,
        env: Arc<CombatEnv>,
    ) -> Result<Self, TemplateError> {
        let entity = LivingEntity::from_template(template, env.config)?;
        let class = class.build(&env.spells, entity.level());
        let xp_required = env.progression.xp_required(entity.level());
        Ok(Self {
            entity,
            class,
            env,
            experience: 0,
            xp_required,
            inventory: Inventory::new(),
            gold: 0,
            quests: QuestLog::new(),
            slain_monsters: BTreeSet::new(),
        })
    }

    pub fn name(&self) -> &str {
        self.entity.name()
    }

    pub fn level(&self) -> u32 {
        self.entity.level()
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn xp_required(&self) -> Option<u32> {
        self.xp_required
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn quests(&self) -> &QuestLog {
        &self.quests
    }

    pub fn class(&self) -> &dyn CastsSpells {
        self.class.as_ref()
    }

    pub fn has_slain(&self, guid: u32) -> bool {
        self.slain_monsters.contains(&guid)
    }

    // ===== combat =====

    pub fn cast_spell(
        &mut self,
        spell: &str,
        target: &mut dyn Combatant,
        rng: &mut dyn RngOracle,
    ) -> Result<CastOutcome, CastError> {
        self.class.cast(spell, &mut self.entity, target, rng)
    }

    pub fn start_turn_update(&mut self) -> TickReport {
        self.entity.start_turn_update()
    }

    /// Buffs count down, then spell cooldowns and class auras.
    pub fn end_turn_update(&mut self) -> Vec<String> {
        let expired = self.entity.end_turn_update();
        self.class.end_turn();
        expired
    }

    pub fn enter_combat(&mut self) {
        self.entity.enter_combat();
    }

    /// Cooldowns reset and combat-only auras drop.
    pub fn leave_combat(&mut self) {
        self.entity.leave_combat();
        self.class.leave_combat();
    }

    // ===== items =====

    /// Equip an item from the inventory; whatever it displaces goes back in.
    pub fn equip_item(&mut self, name: &str) -> Result<(), InventoryError> {
        self.ensure_alive_for_items()?;
        let item = self.inventory.get(name).ok_or_else(|| InventoryError::NotFound {
            name: name.to_string(),
        })?;
        if !item.is_equippable() {
            return Err(InventoryError::NotEquippable {
                name: name.to_string(),
            });
        }

        let item = self.inventory.remove(name, 1)?;
        if let Some(displaced) = self.entity.equip(item)? {
            self.inventory.add(displaced, 1);
        }
        info!(character = %self.entity.name(), item = name, "item equipped");
        Ok(())
    }

    /// Drink a potion from the inventory, applying its buff.
    pub fn consume_item(&mut self, name: &str) -> Result<(), InventoryError> {
        self.ensure_alive_for_items()?;
        let item = self.inventory.get(name).ok_or_else(|| InventoryError::NotFound {
            name: name.to_string(),
        })?;
        let ItemKind::Potion { buff } = &item.kind else {
            return Err(InventoryError::NotUsable {
                name: name.to_string(),
            });
        };

        let buff = buff.clone();
        self.entity.add_buff(buff)?;
        self.inventory.remove(name, 1)?;
        info!(character = %self.entity.name(), item = name, "item consumed");
        Ok(())
    }

    fn ensure_alive_for_items(&self) -> Result<(), InventoryError> {
        self.entity
            .ensure_alive()
            .map_err(|_| InventoryError::OwnerDead {
                owner: self.entity.name().to_string(),
            })
    }

    // ===== progression =====

    /// Add experience; levels up at most once per award.
    pub fn award_experience(&mut self, amount: u32) -> Option<u32> {
        self.experience = self.experience.saturating_add(amount);
        self.check_if_levelup()
    }

    /// Level up if the current requirement is met. Returns the new level.
    pub fn check_if_levelup(&mut self) -> Option<u32> {
        let required = self.xp_required?;
        if self.experience < required {
            return None;
        }
        self.level_up();
        self.experience = 0;
        Some(self.level())
    }

    fn level_up(&mut self) {
        let grants = self.env.progression.grants(self.level() + 1);
        self.entity.apply_level_up(&grants);

        let level = self.level();
        self.xp_required = self.env.progression.xp_required(level);
        self.class.learn_spells(&self.env.spells, level);
    }

    /// Experience, slain-record and quest progress for killing `monster`.
    pub fn award_monster_kill(&mut self, monster: &Monster) -> KillReward {
        let xp = progression::monster_kill_xp(
            monster.xp_reward(),
            self.level(),
            monster.level(),
            &self.env.config,
        );
        if !monster.is_respawnable() {
            self.slain_monsters.insert(monster.guid());
        }

        let mut reward = KillReward {
            xp,
            ..KillReward::default()
        };
        reward.new_level = self.award_experience(xp);

        if monster.is_quest_relevant() {
            for id in self.quests.record_kill(monster.name()) {
                let Ok(new_level) = self.complete_quest(&id) else {
                    continue;
                };
                if new_level.is_some() {
                    reward.new_level = new_level;
                }
                reward.quests_completed.push(id);
            }
        }
        info!(
            character = %self.entity.name(),
            monster = %monster.name(),
            xp,
            "monster killed"
        );
        reward
    }

    /// Take gold and items from a slain monster.
    pub fn take_loot(&mut self, monster: &mut Monster) -> Loot {
        let loot = monster.take_loot();
        self.gold = self.gold.saturating_add(loot.gold);
        for item in &loot.items {
            self.inventory.add(item.clone(), 1);
        }
        self.check_fetch_quests();
        loot
    }

    pub fn accept_quest(&mut self, quest: Quest) -> bool {
        let accepted = self.quests.accept(quest);
        if accepted {
            self.check_fetch_quests();
        }
        accepted
    }

    /// Complete every active quest whose requirement the inventory now meets.
    pub fn check_fetch_quests(&mut self) -> Vec<String> {
        let ready = self.quests.fulfilled(&self.inventory);
        ready
            .into_iter()
            .filter(|id| self.complete_quest(id).is_ok())
            .collect()
    }

    /// Hand in a quest: fetched items leave the inventory, rewards come in.
    /// Returns the level reached if the reward caused a level-up. Fails, and
    /// the quest stays open, when the fetched items are not all there.
    fn complete_quest(&mut self, id: &str) -> Result<Option<u32>, InventoryError> {
        let fetch = self
            .quests
            .active()
            .find(|quest| quest.id == id)
            .and_then(|quest| match &quest.kind {
                QuestKind::Fetch {
                    item_name,
                    required,
                } => Some((item_name.clone(), *required)),
                QuestKind::Kill { .. } => None,
            });
        if let Some((item_name, required)) = fetch {
            self.inventory
                .remove(&item_name, required)
                .inspect_err(|err| {
                    warn!(quest = id, %err, "fetch quest items missing, quest stays open");
                })?;
        }

        let Some(quest) = self.quests.complete(id) else {
            return Ok(None);
        };
        for item in &quest.item_rewards {
            self.inventory.add(item.clone(), 1);
        }
        info!(character = %self.entity.name(), quest = %quest.id, "quest completed");
        Ok(self.award_experience(quest.xp_reward))
    }

    /// Add items straight to the inventory (vendor, quest giver).
    pub fn receive_item(&mut self, item: Item, count: u32) {
        self.inventory.add(item, count);
        self.check_fetch_quests();
    }
}

impl Combatant for Character {
    fn entity(&self) -> &LivingEntity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut LivingEntity {
        &mut self.entity
    }

    fn swing_bonus(&self) -> Damage {
        self.class.swing_bonus()
    }
}
