//! # Systems
//!
//! A system is a policy that runs over every entity carrying a fixed set of
//! components. The core only tracks *which* entities a system sees; what the
//! system does with them is up to the concrete type.
//!
//! Membership is decided by the registry during its flush: an entity whose
//! signature contains the system's required signature is appended to the
//! system's admitted list.

use std::any::{type_name, Any};

use super::component::{Component, ComponentTypeId};
use super::entity::Entity;
use super::signature::Signature;

/// Required signature plus the admitted entities of one system.
///
/// Concrete systems embed one of these and expose it through
/// [`System::base`].
///
/// # Example
///
/// ```rust
/// use kestrel_core::{Component, SystemBase, System};
///
/// #[derive(Default)]
/// struct Position;
/// impl Component for Position {}
///
/// struct PrintSystem {
///     base: SystemBase,
/// }
///
/// impl PrintSystem {
///     fn new() -> Self {
///         let mut base = SystemBase::new();
///         base.require::<Position>();
///         Self { base }
///     }
/// }
///
/// impl System for PrintSystem {
///     fn base(&self) -> &SystemBase { &self.base }
///     fn base_mut(&mut self) -> &mut SystemBase { &mut self.base }
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct SystemBase {
    signature: Signature,
    entities: Vec<Entity>,
}

impl SystemBase {
    /// Creates a system with no requirements and no entities.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            signature: Signature::EMPTY,
            entities: Vec::new(),
        }
    }

    /// Declares that admitted entities must carry component `T`.
    pub fn require<T: Component>(&mut self) {
        self.signature.set(ComponentTypeId::of::<T>());
    }

    /// The required signature.
    #[inline]
    #[must_use]
    pub const fn signature(&self) -> Signature {
        self.signature
    }

    /// Admitted entities, in admission order.
    #[inline]
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Returns `true` if the entity is currently admitted.
    #[inline]
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Appends an entity unless it is already admitted.
    ///
    /// Returns `true` if the entity was appended.
    pub(crate) fn add_entity(&mut self, entity: Entity) -> bool {
        if self.contains(entity) {
            return false;
        }
        self.entities.push(entity);
        true
    }

    /// Erases every occurrence of an entity.
    ///
    /// Returns `true` if anything was erased.
    pub(crate) fn remove_entity(&mut self, entity: Entity) -> bool {
        let before = self.entities.len();
        self.entities.retain(|&other| other != entity);
        self.entities.len() != before
    }
}

/// Upcast to [`Any`] for every `'static` type, so boxed systems can be
/// downcast back to their concrete type.
pub trait AsAny: Any {
    /// Returns `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Returns `self` as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Converts a boxed value into `Box<dyn Any>`.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A system that can be registered with a [`Registry`](crate::Registry).
///
/// The registry keeps exactly one instance per concrete type.
pub trait System: AsAny {
    /// The embedded signature and admitted list.
    fn base(&self) -> &SystemBase;

    /// Mutable access to the embedded signature and admitted list.
    fn base_mut(&mut self) -> &mut SystemBase;

    /// Admitted entities, in admission order.
    fn entities(&self) -> &[Entity] {
        self.base().entities()
    }

    /// The required signature.
    fn signature(&self) -> Signature {
        self.base().signature()
    }

    /// Type name, used in logs.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }
}
