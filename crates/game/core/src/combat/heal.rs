//! Heal events.

use core::fmt;

use super::damage::round1;

/// Result of healing an entity.
///
/// `effective + overheal == requested`; overheal is the part that would have
/// pushed health past its maximum.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heal {
    pub requested: f64,
    pub effective: f64,
    pub overheal: f64,
    pub critical: bool,
}

impl Heal {
    /// Split `requested` into effective healing and overheal given how much
    /// health is missing.
    pub fn resolve(requested: f64, missing: f64, critical: bool) -> Self {
        let requested = round1(requested.max(0.0));
        let effective = requested.min(missing.max(0.0));
        Self {
            requested,
            effective,
            overheal: round1(requested - effective),
            critical,
        }
    }
}

impl fmt::Display for Heal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.critical {
            write!(f, "critical ")?;
        }
        write!(f, "Healed for {:.1}", self.effective)?;
        if self.overheal > 0.0 {
            write!(f, " ({:.1} overheal)", self.overheal)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_overheal() {
        let heal = Heal::resolve(30.0, 12.5, false);
        assert_eq!(heal.effective, 12.5);
        assert_eq!(heal.overheal, 17.5);
        assert_eq!(heal.to_string(), "Healed for 12.5 (17.5 overheal)");
    }

    #[test]
    fn critical_prefix() {
        let heal = Heal::resolve(10.0, 50.0, true);
        assert_eq!(heal.overheal, 0.0);
        assert_eq!(heal.to_string(), "critical Healed for 10.0");
    }
}
