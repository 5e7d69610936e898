//! Data-driven content definitions and loaders.
//!
//! This crate reads static combat content from RON/TOML data files:
//! - Combat rules (data-driven via TOML)
//! - Level progression table (data-driven via TOML)
//! - Spell ranks per class (data-driven via RON)
//! - Item catalog (data-driven via RON)
//! - Monster and character templates (data-driven via RON)
//!
//! Data files use authoring formats (`*Spec` types) with attribute and buff
//! stats keyed by name. Loaders resolve them into combat-core templates and
//! reject unknown names, so nothing loaded here is ever looked up by string
//! again.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BuffSpec, CharacterLoader, CharacterTemplate, ConfigLoader, ContentFactory, DotSpec,
    EntitySpec, ItemLoader, MonsterLoader, ProgressionLoader, SpellLoader,
};
