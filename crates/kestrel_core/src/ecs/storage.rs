//! # Component Pools
//!
//! One pool per component type, indexed directly by entity id:
//! - Pool index == entity id
//! - Access is O(1)
//! - Memory is O(highest entity id) per component type in use
//! - Slots are never compacted or cleared on removal
//!
//! The registry holds pools of different component types side by side. It
//! does so through [`ErasedPool`], and only the generic accessors that
//! already know `T` downcast back to [`Pool<T>`].

use std::any::{type_name, Any};

use crate::error::{EcsError, EcsResult};

/// Dense, resizable storage for a single component type.
///
/// # Example
///
/// ```rust
/// use kestrel_core::Pool;
///
/// let mut pool: Pool<u32> = Pool::with_capacity(4);
/// pool.set(2, 7).unwrap();
/// assert_eq!(*pool.get(2).unwrap(), 7);
/// assert_eq!(*pool.get(0).unwrap(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Pool<T> {
    data: Vec<T>,
}

impl<T: Default> Pool<T> {
    /// Creates a pool with `size` default-initialized slots.
    #[must_use]
    pub fn with_capacity(size: usize) -> Self {
        let mut pool = Self { data: Vec::new() };
        pool.resize(size);
        pool
    }

    /// Grows the pool to at least `n` slots, default-initializing new ones.
    ///
    /// Never shrinks.
    pub fn resize(&mut self, n: usize) {
        if n > self.data.len() {
            self.data.resize_with(n, T::default);
        }
    }
}

impl<T> Pool<T> {
    /// Returns the number of slots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the pool has no slots.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Appends a value in a new slot.
    #[inline]
    pub fn add(&mut self, value: T) {
        self.data.push(value);
    }

    /// Removes every slot.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Overwrites the slot at `index`.
    ///
    /// # Errors
    ///
    /// [`EcsError::IndexOutOfBounds`] if `index >= len()`. Callers are
    /// expected to [`resize`](Self::resize) first.
    #[inline]
    pub fn set(&mut self, index: usize, value: T) -> EcsResult<()> {
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(EcsError::IndexOutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Returns the value at `index`.
    ///
    /// # Errors
    ///
    /// [`EcsError::IndexOutOfBounds`] if `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> EcsResult<&T> {
        self.data.get(index).ok_or(EcsError::IndexOutOfBounds {
            index,
            len: self.data.len(),
        })
    }

    /// Returns the value at `index` mutably.
    ///
    /// # Errors
    ///
    /// [`EcsError::IndexOutOfBounds`] if `index >= len()`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> EcsResult<&mut T> {
        let len = self.data.len();
        self.data
            .get_mut(index)
            .ok_or(EcsError::IndexOutOfBounds { index, len })
    }

    /// Returns a slice of every slot.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

/// Type-erased view of a [`Pool<T>`].
///
/// The registry only needs to know how big a pool is and how to get back to
/// the concrete type.
pub trait ErasedPool: Any {
    /// Number of slots in the pool.
    fn len(&self) -> usize;

    /// Returns `true` if the pool has no slots.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of the stored component type, for diagnostics.
    fn component_name(&self) -> &'static str;

    /// Upcast for downcasting to the concrete pool.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete pool.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> ErasedPool for Pool<T> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn component_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
