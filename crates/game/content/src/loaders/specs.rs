//! Authoring formats shared by several content files.
//!
//! Stats are keyed by name in data files (`{ "armor": 5.0 }`) and resolved
//! into typed combat-core values here.

use std::collections::BTreeMap;

use combat_core::{
    Attributes, BeneficialBuff, Damage, DamageOverTime, EffectError, EntityTemplate,
    TemplateError,
};
use serde::{Deserialize, Serialize};

fn default_level() -> u32 {
    1
}

/// Base stats of a character or monster.
///
/// ```ron
/// (
///     name: "Gnoll Scout",
///     level: 2,
///     health: 60.0,
///     attributes: { "armor": 40.0, "agility": 3.0 },
///     min_damage: 3.0,
///     max_damage: 6.0,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpec {
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u32,
    pub health: f64,
    #[serde(default)]
    pub mana: f64,
    #[serde(default)]
    pub attributes: BTreeMap<String, f64>,
    #[serde(default)]
    pub min_damage: f64,
    #[serde(default)]
    pub max_damage: f64,
}

impl EntitySpec {
    pub fn resolve(&self) -> Result<EntityTemplate, TemplateError> {
        let attributes = resolve_attributes(&self.name, &self.attributes)?;
        let template = EntityTemplate::new(self.name.clone(), self.level, self.health, self.mana)
            .with_attributes(attributes)
            .with_damage(self.min_damage, self.max_damage);
        template.validate()?;
        Ok(template)
    }
}

/// Parse an attribute map owned by `owner` (an entity or item name).
pub fn resolve_attributes(
    owner: &str,
    attributes: &BTreeMap<String, f64>,
) -> Result<Attributes, TemplateError> {
    EntityTemplate::parse_attributes(
        owner,
        attributes.iter().map(|(name, value)| (name.as_str(), *value)),
    )
}

/// A beneficial buff as written in content.
///
/// Amounts and duration are signed so that bad data is reported instead of
/// failing deserialization with a less helpful message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuffSpec {
    pub name: String,
    pub stats: BTreeMap<String, i64>,
    pub duration: i64,
}

impl BuffSpec {
    pub fn resolve(&self) -> Result<BeneficialBuff, EffectError> {
        BeneficialBuff::from_raw(
            self.name.clone(),
            self.stats.iter().map(|(stat, amount)| (stat.as_str(), *amount)),
            self.duration,
        )
    }
}

/// A damage-over-time effect as written in content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotSpec {
    pub name: String,
    #[serde(default)]
    pub physical: f64,
    #[serde(default)]
    pub magical: f64,
    pub duration: u32,
}

impl DotSpec {
    /// The caster level is a placeholder; casting stamps the real one.
    pub fn resolve(&self) -> Result<DamageOverTime, EffectError> {
        DamageOverTime::new(
            self.name.clone(),
            Damage::new(self.physical, self.magical),
            self.duration,
            1,
        )
    }
}
