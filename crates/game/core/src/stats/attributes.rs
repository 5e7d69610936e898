//! Attribute kinds and the per-entity attribute table.
//!
//! Attributes are a closed set. Unknown names are rejected when parsed, so
//! nothing downstream ever looks a stat up by string.

use core::ops::{Index, IndexMut};

use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Attribute stored on every living entity.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AttributeKind {
    /// Mitigates physical damage.
    Armor,
    /// Adds to melee damage.
    Strength,
    /// Grants armor and strength.
    Agility,
    /// Added on top of base maximum health.
    BonusHealth,
    /// Added on top of base maximum mana.
    BonusMana,
}

/// Fixed-size attribute table indexed by [`AttributeKind`].
///
/// Values are fractional because agility-derived armor is granted in half
/// points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    values: [f64; AttributeKind::COUNT],
}

impl Attributes {
    pub const fn new() -> Self {
        Self {
            values: [0.0; AttributeKind::COUNT],
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, kind: AttributeKind, value: f64) -> Self {
        self[kind] = value;
        self
    }

    pub fn get(&self, kind: AttributeKind) -> f64 {
        self[kind]
    }

    pub fn add(&mut self, kind: AttributeKind, amount: f64) {
        self[kind] += amount;
    }

    /// Add every entry of `other` onto this table.
    pub fn add_all(&mut self, other: &Attributes) {
        for kind in AttributeKind::iter() {
            self[kind] += other[kind];
        }
    }

    /// Subtract every entry of `other` from this table.
    pub fn subtract_all(&mut self, other: &Attributes) {
        for kind in AttributeKind::iter() {
            self[kind] -= other[kind];
        }
    }

    /// Non-zero entries, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeKind, f64)> + '_ {
        AttributeKind::iter()
            .map(|kind| (kind, self[kind]))
            .filter(|(_, value)| *value != 0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|value| *value == 0.0)
    }
}

impl Index<AttributeKind> for Attributes {
    type Output = f64;

    fn index(&self, kind: AttributeKind) -> &f64 {
        &self.values[kind as usize]
    }
}

impl IndexMut<AttributeKind> for Attributes {
    fn index_mut(&mut self, kind: AttributeKind) -> &mut f64 {
        &mut self.values[kind as usize]
    }
}

impl FromIterator<(AttributeKind, f64)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (AttributeKind, f64)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (kind, value) in iter {
            attributes[kind] += value;
        }
        attributes
    }
}
