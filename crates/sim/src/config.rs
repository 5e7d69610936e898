//! Simulation configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Duel runner configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Directory holding the content files.
    pub data_dir: PathBuf,
    pub seed: u64,
    /// Character id in `characters.ron`.
    pub hero: String,
    /// Monster id in `monsters.ron`.
    pub monster: String,
    /// Fights in a row; the hero rests in between.
    pub fights: u32,
    /// Turns after which a fight is abandoned.
    pub turn_limit: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            seed: 42,
            hero: "recruit".to_string(),
            monster: "kobold_miner".to_string(),
            fights: 3,
            turn_limit: 100,
        }
    }
}

impl SimConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SIM_DATA_DIR` - Content directory (default: `data`)
    /// - `SIM_SEED` - RNG seed (default: 42)
    /// - `SIM_HERO` - Character id (default: `recruit`)
    /// - `SIM_MONSTER` - Monster id (default: `kobold_miner`)
    /// - `SIM_FIGHTS` - Number of fights (default: 3)
    /// - `SIM_TURN_LIMIT` - Turn limit per fight (default: 100)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("SIM_DATA_DIR") {
            config.data_dir = dir;
        }
        if let Some(seed) = read_env("SIM_SEED") {
            config.seed = seed;
        }
        if let Some(hero) = read_env("SIM_HERO") {
            config.hero = hero;
        }
        if let Some(monster) = read_env("SIM_MONSTER") {
            config.monster = monster;
        }
        if let Some(fights) = read_env::<u32>("SIM_FIGHTS") {
            config.fights = fights.max(1);
        }
        if let Some(limit) = read_env::<u32>("SIM_TURN_LIMIT") {
            config.turn_limit = limit.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
