use std::collections::BTreeMap;

use tracing::debug;

use crate::items::{Inventory, Item};

/// What a quest asks for.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestKind {
    Kill {
        monster_name: String,
        required: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        killed: u32,
    },
    Fetch {
        item_name: String,
        required: u32,
    },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quest {
    pub id: String,
    pub name: String,
    pub xp_reward: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub item_rewards: Vec<Item>,
    pub kind: QuestKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub completed: bool,
}

impl Quest {
    /// Count one kill of `monster_name`. Returns true when that finished the
    /// kill requirement.
    pub fn record_kill(&mut self, monster_name: &str) -> bool {
        match &mut self.kind {
            QuestKind::Kill {
                monster_name: wanted,
                required,
                killed,
            } if wanted == monster_name && *killed < *required => {
                *killed += 1;
                *killed == *required
            }
            _ => false,
        }
    }

    /// Whether the requirement is met. Fetch quests are judged against `inventory`.
    pub fn is_fulfilled(&self, inventory: &Inventory) -> bool {
        match &self.kind {
            QuestKind::Kill {
                required, killed, ..
            } => killed >= required,
            QuestKind::Fetch {
                item_name,
                required,
            } => inventory.count(item_name) >= *required,
        }
    }
}

/// Accepted quests still in progress, plus finished ones.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestLog {
    active: BTreeMap<String, Quest>,
    completed: BTreeMap<String, Quest>,
}

impl QuestLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `quest`. Quests already active or completed are ignored.
    pub fn accept(&mut self, quest: Quest) -> bool {
        if self.active.contains_key(&quest.id) || self.completed.contains_key(&quest.id) {
            return false;
        }
        debug!(quest = %quest.id, "quest accepted");
        self.active.insert(quest.id.clone(), quest);
        true
    }

    /// Advance kill quests for `monster_name`; returns ids of quests whose
    /// kill requirement is now met.
    pub fn record_kill(&mut self, monster_name: &str) -> Vec<String> {
        self.active
            .values_mut()
            .filter_map(|quest| quest.record_kill(monster_name).then(|| quest.id.clone()))
            .collect()
    }

    /// Ids of active quests whose requirement `inventory` meets.
    pub fn fulfilled(&self, inventory: &Inventory) -> Vec<String> {
        self.active
            .values()
            .filter(|quest| quest.is_fulfilled(inventory))
            .map(|quest| quest.id.clone())
            .collect()
    }

    /// Move a quest to the completed set.
    pub fn complete(&mut self, id: &str) -> Option<Quest> {
        let mut quest = self.active.remove(id)?;
        quest.completed = true;
        self.completed.insert(quest.id.clone(), quest.clone());
        Some(quest)
    }

    pub fn active(&self) -> impl Iterator<Item = &Quest> {
        self.active.values()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.contains_key(id)
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.contains_key(id)
    }
}
