/// Stat deltas granted on reaching a level.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelGrants {
    pub health: f64,
    pub mana: f64,
    pub strength: f64,
    pub agility: f64,
    pub armor: f64,
}

impl LevelGrants {
    pub const fn new(health: f64, mana: f64, strength: f64, agility: f64, armor: f64) -> Self {
        Self {
            health,
            mana,
            strength,
            agility,
            armor,
        }
    }
}

/// One row of the progression table.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelRow {
    pub level: u32,
    /// Experience needed to leave this level; `None` at the level cap.
    pub xp_required: Option<u32>,
    /// Granted on reaching this level.
    #[cfg_attr(feature = "serde", serde(default))]
    pub grants: LevelGrants,
}

/// Level → experience requirement and level → stat grants lookups.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionTable {
    rows: Vec<LevelRow>,
}

impl ProgressionTable {
    pub const DEFAULT_MAX_LEVEL: u32 = 10;
    const DEFAULT_XP: [u32; 9] = [400, 900, 1400, 2100, 2800, 3600, 4500, 5400, 6500];

    /// Build from rows in any order. Later duplicates win.
    pub fn from_rows(rows: impl IntoIterator<Item = LevelRow>) -> Self {
        let mut sorted: Vec<LevelRow> = Vec::new();
        for row in rows {
            match sorted.binary_search_by_key(&row.level, |r| r.level) {
                Ok(index) => sorted[index] = row,
                Err(index) => sorted.insert(index, row),
            }
        }
        Self { rows: sorted }
    }

    fn row(&self, level: u32) -> Option<&LevelRow> {
        self.rows
            .binary_search_by_key(&level, |r| r.level)
            .ok()
            .map(|index| &self.rows[index])
    }

    /// Experience needed to leave `level`, or `None` when no further level exists.
    pub fn xp_required(&self, level: u32) -> Option<u32> {
        self.row(level).and_then(|row| row.xp_required)
    }

    /// Stat grants for reaching `level`. Levels missing from the table grant nothing.
    pub fn grants(&self, level: u32) -> LevelGrants {
        self.row(level).map(|row| row.grants).unwrap_or_default()
    }

    pub fn max_level(&self) -> u32 {
        self.rows.last().map_or(1, |row| row.level)
    }

    pub fn rows(&self) -> &[LevelRow] {
        &self.rows
    }
}

impl Default for ProgressionTable {
    fn default() -> Self {
        let rows = (1..=Self::DEFAULT_MAX_LEVEL).map(|level| {
            let index = (level - 1) as usize;
            let grants = if level == 1 {
                LevelGrants::default()
            } else {
                LevelGrants::new(12.0, 8.0, 1.0, 1.0, 3.0)
            };
            LevelRow {
                level,
                xp_required: Self::DEFAULT_XP.get(index).copied(),
                grants,
            }
        });
        Self::from_rows(rows)
    }
}
