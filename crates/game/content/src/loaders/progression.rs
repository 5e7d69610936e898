//! Level progression loader.

use std::path::Path;

use combat_core::{LevelRow, ProgressionTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Progression file structure for TOML files.
///
/// ```toml
/// [[levels]]
/// level = 1
/// xp_required = 400
///
/// [[levels]]
/// level = 2
/// xp_required = 900
/// grants = { health = 12.0, mana = 8.0, strength = 1.0, agility = 1.0, armor = 3.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionFile {
    pub levels: Vec<LevelRow>,
}

/// Loader for the level table from TOML files.
pub struct ProgressionLoader;

impl ProgressionLoader {
    pub fn load(path: &Path) -> LoadResult<ProgressionTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and check the table: level 1 must exist, levels must be
    /// contiguous, and only the last level may omit `xp_required`.
    pub fn parse(content: &str) -> LoadResult<ProgressionTable> {
        let file: ProgressionFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse progression TOML: {}", e))?;

        let table = ProgressionTable::from_rows(file.levels);
        let rows = table.rows();
        if rows.first().map(|row| row.level) != Some(1) {
            anyhow::bail!("Progression table must start at level 1");
        }
        for pair in rows.windows(2) {
            if pair[1].level != pair[0].level + 1 {
                anyhow::bail!(
                    "Progression table skips from level {} to {}",
                    pair[0].level,
                    pair[1].level
                );
            }
            if pair[0].xp_required.is_none() {
                anyhow::bail!(
                    "Level {} has no xp_required but is not the last level",
                    pair[0].level
                );
            }
        }
        Ok(table)
    }
}
