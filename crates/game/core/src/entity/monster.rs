use tracing::info;

use super::living::LivingEntity;
use super::template::{LootEntry, MonsterTemplate, TemplateError};
use crate::combat::Combatant;
use crate::config::CombatConfig;
use crate::env::RngOracle;
use crate::items::Item;
use crate::stats::AttributeKind;

/// Gold and items dropped by a slain monster.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loot {
    pub gold: u32,
    pub items: Vec<Item>,
}

impl Loot {
    pub fn is_empty(&self) -> bool {
        self.gold == 0 && self.items.is_empty()
    }
}

/// A spawned monster.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    entity: LivingEntity,
    /// Unique identity of this spawn; non-respawnable monsters are recorded
    /// by it once slain.
    guid: u32,
    template_id: String,
    xp_reward: u32,
    gold_reward: u32,
    respawnable: bool,
    quest_relevant: bool,
    loot_table: Vec<LootEntry>,
    loot: Option<Loot>,
}

impl Monster {
    pub fn from_template(
        template: &MonsterTemplate,
        guid: u32,
        rules: CombatConfig,
    ) -> Result<Self, TemplateError> {
        template.validate()?;
        Ok(Self {
            entity: LivingEntity::from_template(&template.entity, rules)?,
            guid,
            template_id: template.id.clone(),
            xp_reward: template.xp_reward,
            gold_reward: template.gold_reward,
            respawnable: template.respawnable,
            quest_relevant: template.quest_relevant,
            loot_table: template.loot_table.clone(),
            loot: None,
        })
    }

    pub fn name(&self) -> &str {
        self.entity.name()
    }

    pub fn level(&self) -> u32 {
        self.entity.level()
    }

    pub fn guid(&self) -> u32 {
        self.guid
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    pub fn xp_reward(&self) -> u32 {
        self.xp_reward
    }

    pub fn armor(&self) -> f64 {
        self.entity.attribute(AttributeKind::Armor)
    }

    pub fn is_respawnable(&self) -> bool {
        self.respawnable
    }

    pub fn is_quest_relevant(&self) -> bool {
        self.quest_relevant
    }

    /// Loot waiting to be taken, if the monster has died.
    pub fn loot(&self) -> Option<&Loot> {
        self.loot.as_ref()
    }

    /// Roll the loot payload. Only the first call after death rolls; every
    /// loot-table entry is rolled independently against its own chance.
    pub fn die(&mut self, rng: &mut dyn RngOracle) {
        if self.loot.is_some() {
            return;
        }

        let items = self
            .loot_table
            .iter()
            .filter(|entry| rng.chance(entry.drop_percent))
            .map(|entry| entry.item.clone())
            .collect::<Vec<_>>();
        info!(
            monster = %self.entity.name(),
            gold = self.gold_reward,
            items = items.len(),
            "loot rolled"
        );
        self.loot = Some(Loot {
            gold: self.gold_reward,
            items,
        });
    }

    /// Hand the loot over, leaving an empty payload behind.
    pub fn take_loot(&mut self) -> Loot {
        self.loot.as_mut().map(core::mem::take).unwrap_or_default()
    }

    /// Back to full health with no loot pending.
    pub fn respawn(&mut self) {
        self.entity.revive();
        self.loot = None;
    }
}

impl Combatant for Monster {
    fn entity(&self) -> &LivingEntity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut LivingEntity {
        &mut self.entity
    }

    fn on_death(&mut self, rng: &mut dyn RngOracle) {
        self.die(rng);
    }
}
