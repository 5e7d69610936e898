use std::collections::BTreeMap;

use super::{CharacterClass, SpellTemplate};

/// Every rank of every spell, as loaded from content.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellCatalog {
    templates: Vec<SpellTemplate>,
}

impl SpellCatalog {
    pub fn new(templates: impl IntoIterator<Item = SpellTemplate>) -> Self {
        Self {
            templates: templates.into_iter().collect(),
        }
    }

    pub fn templates(&self) -> &[SpellTemplate] {
        &self.templates
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The highest rank of each `class` spell usable at `level`, by spell name.
    pub fn available(&self, class: CharacterClass, level: u32) -> Vec<&SpellTemplate> {
        let mut best: BTreeMap<&str, &SpellTemplate> = BTreeMap::new();
        for template in self
            .templates
            .iter()
            .filter(|t| t.class == class && t.level_required <= level)
        {
            best.entry(template.name.as_str())
                .and_modify(|current| {
                    if template.rank > current.rank {
                        *current = template;
                    }
                })
                .or_insert(template);
        }
        best.into_values().collect()
    }
}
