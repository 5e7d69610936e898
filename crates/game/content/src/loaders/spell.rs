//! Spell catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use combat_core::{CharacterClass, SpellCatalog, SpellEffect, SpellTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::specs::{BuffSpec, DotSpec};
use crate::loaders::{LoadResult, read_file};

fn default_rank() -> u32 {
    1
}

/// Spell effect as written in content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpellEffectSpec {
    Strike {
        magical_damage: f64,
        #[serde(default)]
        dot: Option<DotSpec>,
    },
    Heal {
        amount: f64,
    },
    Seal {
        damage_per_swing: f64,
        duration: u32,
    },
    Buff {
        buff: BuffSpec,
    },
}

/// One spell rank as written in content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellSpec {
    pub name: String,
    /// Class name, e.g. `"paladin"`.
    pub class: String,
    #[serde(default = "default_rank")]
    pub rank: u32,
    #[serde(default = "default_rank")]
    pub level_required: u32,
    #[serde(default)]
    pub mana_cost: f64,
    #[serde(default)]
    pub cooldown: u32,
    pub effect: SpellEffectSpec,
}

impl SpellSpec {
    pub fn resolve(&self) -> LoadResult<SpellTemplate> {
        let class: CharacterClass = self
            .class
            .parse()
            .map_err(|_| anyhow::anyhow!("unknown class '{}'", self.class))?;
        if self.mana_cost < 0.0 {
            anyhow::bail!("negative mana cost {}", self.mana_cost);
        }

        let effect = match &self.effect {
            SpellEffectSpec::Strike {
                magical_damage,
                dot,
            } => SpellEffect::Strike {
                magical_damage: *magical_damage,
                dot: dot.as_ref().map(DotSpec::resolve).transpose()?,
            },
            SpellEffectSpec::Heal { amount } => {
                if *amount < 0.0 {
                    anyhow::bail!("negative heal amount {}", amount);
                }
                SpellEffect::Heal { amount: *amount }
            }
            SpellEffectSpec::Seal {
                damage_per_swing,
                duration,
            } => {
                if *duration == 0 {
                    anyhow::bail!("seal duration must be at least one turn");
                }
                SpellEffect::Seal {
                    damage_per_swing: *damage_per_swing,
                    duration: *duration,
                }
            }
            SpellEffectSpec::Buff { buff } => SpellEffect::Buff {
                buff: buff.resolve()?,
            },
        };

        Ok(SpellTemplate {
            name: self.name.clone(),
            class,
            rank: self.rank,
            level_required: self.level_required,
            mana_cost: self.mana_cost,
            cooldown: self.cooldown,
            effect,
        })
    }
}

/// Spell catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellFile {
    pub spells: Vec<SpellSpec>,
}

/// Loader for spell ranks from RON files.
pub struct SpellLoader;

impl SpellLoader {
    pub fn load(path: &Path) -> LoadResult<SpellCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SpellCatalog> {
        let file: SpellFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spell catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        let mut templates = Vec::with_capacity(file.spells.len());
        for spec in &file.spells {
            if !seen.insert((spec.name.as_str(), spec.rank)) {
                anyhow::bail!("Duplicate spell '{}' rank {}", spec.name, spec.rank);
            }
            let template = spec.resolve().map_err(|e| {
                anyhow::anyhow!("Invalid spell '{}' rank {}: {}", spec.name, spec.rank, e)
            })?;
            templates.push(template);
        }
        Ok(SpellCatalog::new(templates))
    }
}
