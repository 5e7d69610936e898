//! Read-only world data and the random source.
//!
//! [`CombatEnv`] bundles the rules, progression tables and spell catalog a
//! character consults after construction. It is immutable once built and
//! shared between characters through an `Arc`.
mod rng;
mod tables;

pub use rng::{PcgRng, RngOracle};
pub use tables::{LevelGrants, LevelRow, ProgressionTable};

use crate::config::CombatConfig;
use crate::spells::SpellCatalog;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CombatEnv {
    pub config: CombatConfig,
    pub progression: ProgressionTable,
    pub spells: SpellCatalog,
}

impl CombatEnv {
    pub fn new(config: CombatConfig, progression: ProgressionTable, spells: SpellCatalog) -> Self {
        Self {
            config,
            progression,
            spells,
        }
    }
}
