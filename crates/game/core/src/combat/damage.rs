//! The damage value exchanged by every attack, tick and spell.

use core::fmt;
use core::ops::{Add, Mul, Sub};

/// Round to one decimal place.
#[inline]
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A (physical, magical) damage pair with absorption bookkeeping.
///
/// Components are rounded to one decimal place on construction and never go
/// negative: subtraction clamps at zero. A fresh value is created for every
/// attack, tick or heal event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Damage {
    physical: f64,
    magical: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    physical_absorbed: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    magical_absorbed: f64,
}

impl Damage {
    /// Damage with both components rounded to one decimal and absorption cleared.
    pub fn new(physical: f64, magical: f64) -> Self {
        Self {
            physical: round1(physical.max(0.0)),
            magical: round1(magical.max(0.0)),
            physical_absorbed: 0.0,
            magical_absorbed: 0.0,
        }
    }

    pub fn physical(physical: f64) -> Self {
        Self::new(physical, 0.0)
    }

    pub fn magical(magical: f64) -> Self {
        Self::new(0.0, magical)
    }

    pub const fn zero() -> Self {
        Self {
            physical: 0.0,
            magical: 0.0,
            physical_absorbed: 0.0,
            magical_absorbed: 0.0,
        }
    }

    pub fn physical_amount(&self) -> f64 {
        self.physical
    }

    pub fn magical_amount(&self) -> f64 {
        self.magical
    }

    pub fn physical_absorbed(&self) -> f64 {
        self.physical_absorbed
    }

    pub fn magical_absorbed(&self) -> f64 {
        self.magical_absorbed
    }

    /// Physical plus magical damage left after absorption.
    pub fn total(&self) -> f64 {
        self.physical + self.magical
    }

    /// Amount soaked by an absorption shield while this damage was applied.
    pub fn total_absorbed(&self) -> f64 {
        self.physical_absorbed + self.magical_absorbed
    }

    pub fn is_zero(&self) -> bool {
        self.physical == 0.0
            && self.magical == 0.0
            && self.physical_absorbed == 0.0
            && self.magical_absorbed == 0.0
    }

    /// Multiply both components by `factor`, clamping at zero.
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.physical * factor, self.magical * factor)
    }

    /// Let a shield soak this damage, magical component first.
    ///
    /// Each absorbed amount is deducted from its component and recorded in the
    /// matching absorption counter. Returns the part of `shield` that was not
    /// used (zero once the shield is fully consumed).
    pub fn handle_absorption(&mut self, shield: f64) -> f64 {
        let mut remaining = shield.max(0.0);

        let magical_soak = remaining.min(self.magical);
        self.magical -= magical_soak;
        self.magical_absorbed += magical_soak;
        remaining -= magical_soak;

        let physical_soak = remaining.min(self.physical);
        self.physical -= physical_soak;
        self.physical_absorbed += physical_soak;
        remaining -= physical_soak;

        remaining
    }
}

/// Anything that can be combined with a [`Damage`]: another damage value or a
/// raw `(physical, magical)` pair.
pub trait DamageParts {
    fn parts(&self) -> (f64, f64);
}

impl DamageParts for Damage {
    fn parts(&self) -> (f64, f64) {
        (self.physical, self.magical)
    }
}

impl DamageParts for (f64, f64) {
    fn parts(&self) -> (f64, f64) {
        *self
    }
}

impl<T: DamageParts> Sub<T> for Damage {
    type Output = Damage;

    fn sub(self, other: T) -> Damage {
        let (physical, magical) = other.parts();
        Damage::new(self.physical - physical, self.magical - magical)
    }
}

impl<T: DamageParts> Add<T> for Damage {
    type Output = Damage;

    fn add(self, other: T) -> Damage {
        let (physical, magical) = other.parts();
        Damage::new(self.physical + physical, self.magical + magical)
    }
}

impl Mul<f64> for Damage {
    type Output = Damage;

    fn mul(self, factor: f64) -> Damage {
        self.scale(factor)
    }
}

impl fmt::Display for Damage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0 damage");
        }

        let mut parts = Vec::with_capacity(2);
        if self.physical > 0.0 || self.physical_absorbed > 0.0 {
            parts.push(describe(self.physical, self.physical_absorbed, "physical"));
        }
        if self.magical > 0.0 || self.magical_absorbed > 0.0 {
            parts.push(describe(self.magical, self.magical_absorbed, "magical"));
        }
        write!(f, "{}", parts.join(" and "))
    }
}

fn describe(amount: f64, absorbed: f64, kind: &str) -> String {
    if absorbed > 0.0 {
        format!("{amount:.1} {kind} damage ({absorbed:.1} absorbed)")
    } else {
        format!("{amount:.1} {kind} damage")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_rounds_to_one_decimal() {
        let damage = Damage::new(10.26, 3.04);
        assert_eq!(damage.physical_amount(), 10.3);
        assert_eq!(damage.magical_amount(), 3.0);
        assert_eq!(damage.total_absorbed(), 0.0);
    }

    #[test]
    fn subtraction_clamps_at_zero() {
        let damage = Damage::new(5.0, 2.0) - Damage::new(7.0, 1.0);
        assert_eq!(damage.physical_amount(), 0.0);
        assert_eq!(damage.magical_amount(), 1.0);

        let damage = Damage::new(5.0, 2.0) - (1.5, 4.0);
        assert_eq!(damage.physical_amount(), 3.5);
        assert_eq!(damage.magical_amount(), 0.0);
    }

    #[test]
    fn addition_accepts_pairs_and_values() {
        let damage = Damage::new(1.0, 1.0) + (2.0, 0.5) + Damage::magical(1.0);
        assert_eq!(damage.physical_amount(), 3.0);
        assert_eq!(damage.magical_amount(), 2.5);
    }

    #[test]
    fn scaling_multiplies_both_components() {
        let damage = Damage::new(10.0, 4.0) * 1.5;
        assert_eq!(damage.physical_amount(), 15.0);
        assert_eq!(damage.magical_amount(), 6.0);
        assert_eq!(Damage::new(10.0, 4.0).scale(-1.0), Damage::zero());
    }

    #[test]
    fn absorption_drains_magical_first() {
        let mut damage = Damage::new(10.0, 6.0);
        let left = damage.handle_absorption(5.0);

        assert_eq!(left, 0.0);
        assert_eq!(damage.magical_amount(), 1.0);
        assert_eq!(damage.magical_absorbed(), 5.0);
        assert_eq!(damage.physical_amount(), 10.0);
        assert_eq!(damage.physical_absorbed(), 0.0);
    }

    #[test]
    fn absorption_spills_into_physical_and_returns_leftover() {
        let mut damage = Damage::new(4.0, 3.0);
        let left = damage.handle_absorption(10.0);

        assert_eq!(left, 3.0);
        assert_eq!(damage.total(), 0.0);
        assert_eq!(damage.magical_absorbed(), 3.0);
        assert_eq!(damage.physical_absorbed(), 4.0);
    }

    #[test]
    fn absorbed_never_exceeds_shield() {
        for shield in [0.0, 0.5, 3.0, 7.5, 20.0] {
            let mut damage = Damage::new(6.0, 4.0);
            let left = damage.handle_absorption(shield);
            assert!(damage.total_absorbed() <= shield);
            assert!(damage.physical_amount() >= 0.0 && damage.magical_amount() >= 0.0);
            assert!((damage.total_absorbed() + left - shield).abs() < 1e-9);
        }
    }

    #[test]
    fn display_formats() {
        assert_eq!(Damage::zero().to_string(), "0 damage");
        assert_eq!(Damage::physical(12.0).to_string(), "12.0 physical damage");
        assert_eq!(
            Damage::new(3.0, 2.5).to_string(),
            "3.0 physical damage and 2.5 magical damage"
        );

        let mut shielded = Damage::new(10.0, 6.0);
        shielded.handle_absorption(5.0);
        assert_eq!(
            shielded.to_string(),
            "10.0 physical damage and 1.0 magical damage (5.0 absorbed)"
        );

        let mut soaked = Damage::magical(2.0);
        soaked.handle_absorption(5.0);
        assert_eq!(soaked.to_string(), "0.0 magical damage (2.0 absorbed)");
    }
}
