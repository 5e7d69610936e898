//! Already-resolved template data entities are built from.
//!
//! Resolving templates from storage is the caller's job; these types only
//! validate what they are handed.

use crate::error::{ErrorSeverity, GameError};
use crate::items::Item;
use crate::stats::{AttributeKind, Attributes, DamageRange};

/// Errors raised while validating template data.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TemplateError {
    #[error("template {template} references unknown attribute '{attribute}'")]
    UnknownAttribute { template: String, attribute: String },

    #[error("template {template} has an inverted damage range {min}-{max}")]
    InvalidDamageRange { template: String, min: f64, max: f64 },

    #[error("template {template} must have positive health")]
    NonPositiveHealth { template: String },

    #[error("template {template} has a negative {field}")]
    NegativeValue {
        template: String,
        field: &'static str,
    },

    #[error("loot entry {item} of {template} has drop chance {percent} outside 0-100")]
    InvalidDropChance {
        template: String,
        item: String,
        percent: f64,
    },
}

impl GameError for TemplateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAttribute { .. } => "TEMPLATE_UNKNOWN_ATTRIBUTE",
            Self::InvalidDamageRange { .. } => "TEMPLATE_INVALID_DAMAGE_RANGE",
            Self::NonPositiveHealth { .. } => "TEMPLATE_NON_POSITIVE_HEALTH",
            Self::NegativeValue { .. } => "TEMPLATE_NEGATIVE_VALUE",
            Self::InvalidDropChance { .. } => "TEMPLATE_INVALID_DROP_CHANCE",
        }
    }
}

/// Base stats shared by characters and monsters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityTemplate {
    pub name: String,
    pub level: u32,
    pub health: f64,
    pub mana: f64,
    pub attributes: Attributes,
    /// Unarmed damage range.
    pub min_damage: f64,
    pub max_damage: f64,
}

impl EntityTemplate {
    pub fn new(name: impl Into<String>, level: u32, health: f64, mana: f64) -> Self {
        Self {
            name: name.into(),
            level,
            health,
            mana,
            attributes: Attributes::new(),
            min_damage: 0.0,
            max_damage: 0.0,
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_damage(mut self, min_damage: f64, max_damage: f64) -> Self {
        self.min_damage = min_damage;
        self.max_damage = max_damage;
        self
    }

    /// Parse attribute rows keyed by name (`"armor"`, `"bonus_health"`, ...).
    pub fn parse_attributes<'a>(
        template: &str,
        rows: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Attributes, TemplateError> {
        rows.into_iter()
            .map(|(name, value)| {
                name.parse::<AttributeKind>()
                    .map(|kind| (kind, value))
                    .map_err(|_| TemplateError::UnknownAttribute {
                        template: template.to_string(),
                        attribute: name.to_string(),
                    })
            })
            .collect()
    }

    pub fn unarmed(&self) -> DamageRange {
        DamageRange::new(self.min_damage, self.max_damage)
    }

    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.health <= 0.0 {
            return Err(TemplateError::NonPositiveHealth {
                template: self.name.clone(),
            });
        }
        if self.mana < 0.0 {
            return Err(self.negative("mana"));
        }
        if self.min_damage < 0.0 {
            return Err(self.negative("min_damage"));
        }
        if self.min_damage > self.max_damage {
            return Err(TemplateError::InvalidDamageRange {
                template: self.name.clone(),
                min: self.min_damage,
                max: self.max_damage,
            });
        }
        Ok(())
    }

    fn negative(&self, field: &'static str) -> TemplateError {
        TemplateError::NegativeValue {
            template: self.name.clone(),
            field,
        }
    }
}

/// One possible drop.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item: Item,
    /// Independent drop chance in percent.
    pub drop_percent: f64,
}

/// Monster definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    /// Content id, e.g. `"gnoll_scout"`.
    pub id: String,
    pub entity: EntityTemplate,
    pub xp_reward: u32,
    pub gold_reward: u32,
    pub respawnable: bool,
    /// Whether kill quests can track this monster.
    pub quest_relevant: bool,
    pub loot_table: Vec<LootEntry>,
}

impl MonsterTemplate {
    pub fn validate(&self) -> Result<(), TemplateError> {
        self.entity.validate()?;
        for entry in &self.loot_table {
            if !(0.0..=100.0).contains(&entry.drop_percent) {
                return Err(TemplateError::InvalidDropChance {
                    template: self.id.clone(),
                    item: entry.item.name.clone(),
                    percent: entry.drop_percent,
                });
            }
        }
        Ok(())
    }
}
