//! Content loaders for reading game data from files.
//!
//! Each loader turns one RON/TOML file into combat-core types. Shared
//! authoring formats live in [`specs`].

pub mod character;
pub mod config;
pub mod factory;
pub mod item;
pub mod monster;
pub mod progression;
pub mod specs;
pub mod spell;

pub use character::{CharacterLoader, CharacterTemplate};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use monster::MonsterLoader;
pub use progression::ProgressionLoader;
pub use specs::{BuffSpec, DotSpec, EntitySpec};
pub use spell::SpellLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
