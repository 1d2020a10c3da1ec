//! # Signatures
//!
//! A signature is a fixed-width bitmask over component type ids. An entity's
//! signature says which components it currently carries; a system's
//! signature says which components it requires.

use super::component::ComponentTypeId;

/// Number of distinct component types a signature can describe.
pub const MAX_COMPONENTS: usize = 64;

/// Fixed-width component bitmask (up to 64 component types).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Signature(u64);

impl Signature {
    /// The empty signature.
    pub const EMPTY: Self = Self(0);

    /// Creates an empty signature.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Sets the bit for a component type.
    #[inline]
    pub fn set(&mut self, component: ComponentTypeId) {
        self.0 |= 1 << component.index();
    }

    /// Clears the bit for a component type.
    #[inline]
    pub fn clear(&mut self, component: ComponentTypeId) {
        self.0 &= !(1 << component.index());
    }

    /// Tests the bit for a component type.
    #[inline]
    #[must_use]
    pub const fn test(self, component: ComponentTypeId) -> bool {
        (self.0 >> component.index()) & 1 == 1
    }

    /// Clears every bit.
    #[inline]
    pub fn reset(&mut self) {
        self.0 = 0;
    }

    /// Returns `true` if every bit set in `required` is also set in `self`,
    /// i.e. `(self & required) == required`.
    #[inline]
    #[must_use]
    pub const fn contains(self, required: Self) -> bool {
        self.0 & required.0 == required.0
    }

    /// Returns `true` if no bit is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of set bits.
    #[inline]
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns the raw mask.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }
}
