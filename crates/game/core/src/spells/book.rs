use std::collections::BTreeMap;

use tracing::info;

use super::{CharacterClass, Spell, SpellCatalog};

/// Spells known by one character, keyed by name.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellBook {
    spells: BTreeMap<String, Spell>,
}

impl SpellBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn every spell available at `level` and upgrade known spells to
    /// their best rank. Returns the names that were learned or upgraded.
    pub fn learn_available(
        &mut self,
        catalog: &SpellCatalog,
        class: CharacterClass,
        level: u32,
    ) -> Vec<String> {
        let mut changed = Vec::new();
        for template in catalog.available(class, level) {
            match self.spells.get_mut(&template.name) {
                Some(known) if known.rank() < template.rank => {
                    info!(spell = %template.name, rank = template.rank, "spell upgraded");
                    known.upgrade_to(template.clone());
                    changed.push(template.name.clone());
                }
                Some(_) => {}
                None => {
                    info!(spell = %template.name, rank = template.rank, "spell learned");
                    self.spells
                        .insert(template.name.clone(), Spell::learn(template.clone()));
                    changed.push(template.name.clone());
                }
            }
        }
        changed
    }

    pub fn get(&self, name: &str) -> Option<&Spell> {
        self.spells.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Spell> {
        self.spells.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.spells.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spell> {
        self.spells.values()
    }

    /// Spells that could be cast right now with `mana`.
    pub fn ready(&self, mana: f64) -> impl Iterator<Item = &Spell> {
        self.spells
            .values()
            .filter(move |spell| spell.can_cast(mana).is_ok())
    }

    pub fn pass_turn(&mut self) {
        self.spells.values_mut().for_each(Spell::pass_turn);
    }

    pub fn reset_cooldowns(&mut self) {
        self.spells.values_mut().for_each(Spell::reset_cooldown);
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }
}
