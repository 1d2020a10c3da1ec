//! # Component Types
//!
//! Components are plain data records with no behavior. Each distinct
//! component type gets a small integer id the first time anything asks for
//! it; that id is the bit position used in [`Signature`](super::Signature)s.
//!
//! The id allocator is process-wide and lives behind a single lazily
//! initialized lock, so there is exactly one initialization path no matter
//! which crate or thread touches a component type first.

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use parking_lot::RwLock;

use super::signature::MAX_COMPONENTS;

/// Marker trait for ECS components.
///
/// Components must be:
/// - `Default`: pools default-initialize slots when they grow
/// - `'static`: the type itself is the lookup key
///
/// # Example
///
/// ```rust
/// use kestrel_core::Component;
///
/// #[derive(Clone, Copy, Debug, Default)]
/// struct Health {
///     hit_points: i32,
/// }
///
/// impl Component for Health {}
/// ```
pub trait Component: Default + 'static {}

/// Dense integer id of a component type.
///
/// Assigned once per type by a monotonically increasing process-wide
/// counter. Stable for the lifetime of the process, never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ComponentTypeId(usize);

/// Type token to dense id map, shared by the whole process.
struct TypeIdAllocator {
    ids: HashMap<TypeId, usize>,
}

fn allocator() -> &'static RwLock<TypeIdAllocator> {
    static ALLOCATOR: OnceLock<RwLock<TypeIdAllocator>> = OnceLock::new();
    ALLOCATOR.get_or_init(|| {
        RwLock::new(TypeIdAllocator {
            ids: HashMap::new(),
        })
    })
}

impl ComponentTypeId {
    /// Returns the id of component type `T`, assigning the next free id on
    /// first use.
    ///
    /// # Panics
    ///
    /// Panics if more than [`MAX_COMPONENTS`] distinct component types are
    /// referenced in one process.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        let key = TypeId::of::<T>();

        // Fast path: already assigned.
        if let Some(&id) = allocator().read().ids.get(&key) {
            return Self(id);
        }

        let mut guard = allocator().write();
        // Another caller may have won the race between the two locks.
        let next = guard.ids.len();
        let id = *guard.ids.entry(key).or_insert(next);
        assert!(
            id < MAX_COMPONENTS,
            "component type limit ({MAX_COMPONENTS}) exceeded by {}",
            type_name::<T>()
        );
        Self(id)
    }

    /// Returns the raw integer id (the signature bit position).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component#{}", self.0)
    }
}
