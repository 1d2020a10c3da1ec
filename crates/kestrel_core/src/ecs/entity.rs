//! # Entity Management
//!
//! Entities are plain integer identifiers. They carry no data: everything an
//! entity "has" lives in the registry's component pools, indexed by the id.
//!
//! Ids are recycled. A killed id goes back to the registry's free list at the
//! next flush and may be handed out again, so an `Entity` value is only
//! meaningful for as long as the entity it names is alive.

use std::fmt;

/// Unique identifier for a live entity.
///
/// Equality, ordering and hashing all use the id alone, so entities sort by
/// id inside the registry's pending sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Entity(u32);

impl Entity {
    /// Creates an entity handle from a raw id.
    ///
    /// Registry-allocated entities should be preferred; this exists for
    /// tests and for code that stores ids out of band.
    #[inline]
    #[must_use]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Returns the integer id.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns the id as an index into signature and pool storage.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_roundtrip() {
        let entity = Entity::from_raw(12345);
        assert_eq!(entity.id(), 12345);
        assert_eq!(entity.index(), 12345);
    }

    #[test]
    fn test_entity_ordering_by_id() {
        let a = Entity::from_raw(3);
        let b = Entity::from_raw(7);
        assert!(a < b);
        assert_eq!(a, Entity::from_raw(3));
        assert_ne!(a, b);
    }

    #[test]
    fn test_entity_display() {
        assert_eq!(Entity::from_raw(9).to_string(), "entity#9");
    }
}
