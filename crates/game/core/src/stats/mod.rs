//! Stat system.
//!
//! # Architecture
//!
//! ```text
//! [ Attributes (base + equipment + buffs) ]
//!      ↓
//! [ Aggregation: bonus pools → agility → damage range ]
//!      ↓
//! [ Resource meters (health, mana) ]
//! ```
//!
//! Aggregation runs synchronously on every mutation that touches attributes:
//! equip/unequip, buff apply/reverse, level-up.

pub mod aggregate;
pub mod attributes;
pub mod resources;

pub use aggregate::{AppliedBonuses, DamageRange, StatSheet};
pub use attributes::{AttributeKind, Attributes};
pub use resources::{ResourceKind, ResourceMeter};
