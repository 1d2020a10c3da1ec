//! # Registry
//!
//! The registry owns everything: component pools, entity signatures, system
//! instances and the free-id list. It is the only thing allowed to mutate
//! them.
//!
//! ## Deferred flush
//!
//! Entity creation and destruction are batched. [`Registry::create_entity`]
//! and [`Registry::kill_entity`] only queue the entity; [`Registry::update`]
//! applies both queues once per frame:
//!
//! ```text
//! update():
//!   1. admission   pending-add  → every system whose requirement ⊆ signature
//!   2. removal     pending-kill → erased from all systems, signature cleared,
//!                                 id pushed to the free list
//!   3. both queues cleared
//! ```
//!
//! Component changes are *not* deferred: `add_component` and
//! `remove_component` take effect immediately for `has_component` and
//! `get_component`. They do not, however, re-evaluate system membership of an
//! entity that was already admitted.

use std::any::{type_name, TypeId};
use std::collections::{BTreeSet, VecDeque};

use super::component::{Component, ComponentTypeId};
use super::entity::Entity;
use super::signature::Signature;
use super::storage::{ErasedPool, Pool};
use super::system::System;
use crate::config::EcsConfig;
use crate::error::{EcsError, EcsResult};

/// Owner and coordinator of entities, pools, signatures and systems.
///
/// # Example
///
/// ```rust
/// use kestrel_core::{Component, Registry};
///
/// #[derive(Clone, Copy, Debug, Default, PartialEq)]
/// struct Health(i32);
/// impl Component for Health {}
///
/// let mut registry = Registry::new();
/// let entity = registry.create_entity();
/// registry.add_component(entity, Health(10)).unwrap();
///
/// assert!(registry.has_component::<Health>(entity));
/// assert_eq!(*registry.get_component::<Health>(entity).unwrap(), Health(10));
///
/// registry.update();
/// ```
pub struct Registry {
    config: EcsConfig,
    /// Number of ids ever handed out; also the next fresh id.
    num_entities: u32,
    /// One pool per component type. Index = component type id.
    pools: Vec<Option<Box<dyn ErasedPool>>>,
    /// One signature per allocated id. Index = entity id.
    signatures: Vec<Signature>,
    /// Whether an id is handed out and not yet freed. Index = entity id.
    live: Vec<bool>,
    /// One instance per system type, in registration order.
    systems: Vec<(TypeId, Box<dyn System>)>,
    /// Entities waiting to be admitted at the next flush.
    to_add: BTreeSet<Entity>,
    /// Entities waiting to be removed at the next flush.
    to_kill: BTreeSet<Entity>,
    /// Ids of killed entities, reused oldest first.
    free_ids: VecDeque<u32>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates an empty registry with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EcsConfig::default())
    }

    /// Creates an empty registry.
    #[must_use]
    pub fn with_config(config: EcsConfig) -> Self {
        Self {
            config,
            num_entities: 0,
            pools: Vec::new(),
            signatures: Vec::new(),
            live: Vec::new(),
            systems: Vec::new(),
            to_add: BTreeSet::new(),
            to_kill: BTreeSet::new(),
            free_ids: VecDeque::new(),
        }
    }

    /// Returns the configuration this registry was built with.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &EcsConfig {
        &self.config
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// Allocates an entity and queues it for admission at the next
    /// [`update`](Self::update).
    ///
    /// Recycled ids are preferred over fresh ones. Components can be attached
    /// immediately, but no system sees the entity until the flush.
    pub fn create_entity(&mut self) -> Entity {
        let entity = if let Some(id) = self.free_ids.pop_front() {
            Entity::from_raw(id)
        } else {
            let id = self.num_entities;
            self.num_entities += 1;
            if self.signatures.len() < self.num_entities as usize {
                self.signatures
                    .resize(self.num_entities as usize, Signature::EMPTY);
                self.live.resize(self.num_entities as usize, false);
            }
            Entity::from_raw(id)
        };
        if let Some(live) = self.live.get_mut(entity.index()) {
            *live = true;
        }

        self.to_add.insert(entity);
        tracing::debug!(entity = entity.id(), "entity created");
        entity
    }

    /// Queues an entity for removal at the next [`update`](Self::update).
    ///
    /// Nothing changes until the flush: the entity keeps its components and
    /// system memberships for the rest of the frame.
    pub fn kill_entity(&mut self, entity: Entity) {
        if !self.is_allocated(entity) {
            tracing::warn!(entity = entity.id(), "kill requested for unknown entity");
            return;
        }
        self.to_kill.insert(entity);
        tracing::debug!(entity = entity.id(), "entity killed");
    }

    /// Returns a handle that forwards component calls for one entity.
    #[inline]
    pub fn entity_mut(&mut self, entity: Entity) -> EntityMut<'_> {
        EntityMut {
            entity,
            registry: self,
        }
    }

    /// Number of ids ever allocated (live, pending or recycled).
    #[inline]
    #[must_use]
    pub const fn entity_count(&self) -> usize {
        self.num_entities as usize
    }

    /// Number of entities queued for admission and for removal.
    #[inline]
    #[must_use]
    pub fn pending_counts(&self) -> (usize, usize) {
        (self.to_add.len(), self.to_kill.len())
    }

    /// Number of killed ids waiting to be reused.
    #[inline]
    #[must_use]
    pub fn free_id_count(&self) -> usize {
        self.free_ids.len()
    }

    /// Current signature of an entity, or `None` for an id never allocated.
    #[inline]
    #[must_use]
    pub fn signature(&self, entity: Entity) -> Option<Signature> {
        self.signatures.get(entity.index()).copied()
    }

    #[inline]
    fn is_allocated(&self, entity: Entity) -> bool {
        entity.id() < self.num_entities
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Writes a component into the entity's slot and sets its signature bit.
    ///
    /// The pool for `T` is created on first use and grown to cover every
    /// allocated id. Any previous value of `T` for this entity is replaced.
    ///
    /// # Errors
    ///
    /// [`EcsError::IndexOutOfBounds`] if the entity was never allocated by
    /// this registry.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> EcsResult<()> {
        let component_id = ComponentTypeId::of::<T>();
        let len = self.entity_count();
        let signature = self
            .signatures
            .get_mut(entity.index())
            .ok_or(EcsError::IndexOutOfBounds {
                index: entity.index(),
                len,
            })?;
        signature.set(component_id);

        let initial_capacity = self.config.initial_pool_capacity;
        let pool = Self::pool_entry::<T>(&mut self.pools, component_id, initial_capacity);
        pool.resize(len);
        pool.set(entity.index(), component)?;

        tracing::debug!(
            entity = entity.id(),
            component = component_id.index(),
            "component added"
        );
        Ok(())
    }

    /// Clears the entity's signature bit for `T`.
    ///
    /// The pool slot keeps its value but is unreachable while the bit is
    /// clear.
    ///
    /// # Errors
    ///
    /// [`EcsError::IndexOutOfBounds`] if the entity was never allocated by
    /// this registry.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> EcsResult<()> {
        let component_id = ComponentTypeId::of::<T>();
        let len = self.entity_count();
        self.signatures
            .get_mut(entity.index())
            .ok_or(EcsError::IndexOutOfBounds {
                index: entity.index(),
                len,
            })?
            .clear(component_id);

        tracing::debug!(
            entity = entity.id(),
            component = component_id.index(),
            "component removed"
        );
        Ok(())
    }

    /// Returns `true` if the entity's signature has the bit for `T`.
    #[must_use]
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.signature(entity)
            .is_some_and(|signature| signature.test(ComponentTypeId::of::<T>()))
    }

    /// Returns the entity's `T`.
    ///
    /// # Errors
    ///
    /// [`EcsError::ComponentAbsent`] if the entity's bit for `T` is clear.
    pub fn get_component<T: Component>(&self, entity: Entity) -> EcsResult<&T> {
        if !self.has_component::<T>(entity) {
            return Err(Self::absent::<T>(entity));
        }
        self.pool::<T>()
            .ok_or_else(|| Self::absent::<T>(entity))?
            .get(entity.index())
    }

    /// Returns the entity's `T` mutably.
    ///
    /// # Errors
    ///
    /// [`EcsError::ComponentAbsent`] if the entity's bit for `T` is clear.
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> EcsResult<&mut T> {
        if !self.has_component::<T>(entity) {
            return Err(Self::absent::<T>(entity));
        }
        self.pool_mut::<T>()
            .ok_or_else(|| Self::absent::<T>(entity))?
            .get_mut(entity.index())
    }

    /// Read access to the whole pool for `T`, if one has been created.
    ///
    /// Slots are not gated by signatures: a slot may hold a stale value left
    /// behind by a killed entity.
    #[must_use]
    pub fn pool<T: Component>(&self) -> Option<&Pool<T>> {
        let pool: &dyn ErasedPool = self
            .pools
            .get(ComponentTypeId::of::<T>().index())?
            .as_deref()?;
        pool.as_any().downcast_ref::<Pool<T>>()
    }

    fn pool_mut<T: Component>(&mut self) -> Option<&mut Pool<T>> {
        let pool: &mut dyn ErasedPool = self
            .pools
            .get_mut(ComponentTypeId::of::<T>().index())?
            .as_deref_mut()?;
        pool.as_any_mut().downcast_mut::<Pool<T>>()
    }

    /// Returns the pool for `T`, creating it if this is the first write.
    fn pool_entry<T: Component>(
        pools: &mut Vec<Option<Box<dyn ErasedPool>>>,
        component_id: ComponentTypeId,
        initial_capacity: usize,
    ) -> &mut Pool<T> {
        let index = component_id.index();
        if pools.len() <= index {
            pools.resize_with(index + 1, || None);
        }

        let slot: &mut dyn ErasedPool = &mut **pools[index].get_or_insert_with(|| {
            tracing::debug!(
                component = index,
                name = type_name::<T>(),
                "component pool created"
            );
            Box::new(Pool::<T>::with_capacity(initial_capacity))
        });

        match slot.as_any_mut().downcast_mut::<Pool<T>>() {
            Some(pool) => pool,
            // Each type id maps to exactly one type, so the slot always holds Pool<T>.
            None => unreachable!("pool {index} does not hold {}", type_name::<T>()),
        }
    }

    fn absent<T>(entity: Entity) -> EcsError {
        EcsError::ComponentAbsent {
            entity,
            component: type_name::<T>(),
        }
    }

    // =========================================================================
    // Systems
    // =========================================================================

    /// Registers a system.
    ///
    /// Only one instance per system type is kept. If `S` is already
    /// registered the existing instance (and its admitted entities) stays and
    /// `false` is returned.
    ///
    /// A new system only sees entities admitted after it was added.
    pub fn add_system<S: System>(&mut self, system: S) -> bool {
        if self.has_system::<S>() {
            tracing::warn!(system = type_name::<S>(), "system already registered");
            return false;
        }
        tracing::info!(system = type_name::<S>(), "system added");
        self.systems.push((TypeId::of::<S>(), Box::new(system)));
        true
    }

    /// Unregisters a system and returns it.
    pub fn remove_system<S: System>(&mut self) -> Option<S> {
        let position = self.system_position::<S>()?;
        let (_, system) = self.systems.remove(position);
        tracing::info!(system = type_name::<S>(), "system removed");
        system.into_any().downcast::<S>().ok().map(|boxed| *boxed)
    }

    /// Returns `true` if a system of type `S` is registered.
    #[must_use]
    pub fn has_system<S: System>(&self) -> bool {
        self.system_position::<S>().is_some()
    }

    /// Returns the registered `S`.
    ///
    /// # Errors
    ///
    /// [`EcsError::SystemNotRegistered`] if `S` was never added.
    pub fn get_system<S: System>(&self) -> EcsResult<&S> {
        self.system_position::<S>()
            .and_then(|position| {
                let system: &dyn System = &*self.systems[position].1;
                system.as_any().downcast_ref::<S>()
            })
            .ok_or(EcsError::SystemNotRegistered(type_name::<S>()))
    }

    /// Returns the registered `S` mutably.
    ///
    /// # Errors
    ///
    /// [`EcsError::SystemNotRegistered`] if `S` was never added.
    pub fn get_system_mut<S: System>(&mut self) -> EcsResult<&mut S> {
        let position = self
            .system_position::<S>()
            .ok_or(EcsError::SystemNotRegistered(type_name::<S>()))?;
        let system: &mut dyn System = &mut *self.systems[position].1;
        system
            .as_any_mut()
            .downcast_mut::<S>()
            .ok_or(EcsError::SystemNotRegistered(type_name::<S>()))
    }

    /// Copy of the entities currently admitted to `S`.
    ///
    /// Systems that need `&mut Registry` while iterating work off this
    /// snapshot.
    ///
    /// # Errors
    ///
    /// [`EcsError::SystemNotRegistered`] if `S` was never added.
    pub fn system_entities<S: System>(&self) -> EcsResult<Vec<Entity>> {
        Ok(self.get_system::<S>()?.entities().to_vec())
    }

    /// Number of registered systems.
    #[inline]
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    fn system_position<S: System>(&self) -> Option<usize> {
        let key = TypeId::of::<S>();
        self.systems.iter().position(|(id, _)| *id == key)
    }

    // =========================================================================
    // Flush
    // =========================================================================

    /// Applies every pending admission, then every pending removal.
    ///
    /// Call once per frame, before running systems.
    pub fn update(&mut self) {
        let added = std::mem::take(&mut self.to_add);
        for &entity in &added {
            self.add_entity_to_systems(entity);
        }

        let killed = std::mem::take(&mut self.to_kill);
        for &entity in &killed {
            self.remove_entity_from_systems(entity);

            if let Some(signature) = self.signatures.get_mut(entity.index()) {
                signature.reset();
            }
            // An id already freed by an earlier flush is not queued again.
            if let Some(live) = self.live.get_mut(entity.index()) {
                if std::mem::replace(live, false) {
                    self.free_ids.push_back(entity.id());
                }
            }
        }

        tracing::trace!(
            admitted = added.len(),
            removed = killed.len(),
            free = self.free_ids.len(),
            "registry flushed"
        );
    }

    fn add_entity_to_systems(&mut self, entity: Entity) {
        let Some(signature) = self.signature(entity) else {
            return;
        };
        for (_, system) in &mut self.systems {
            let required = system.signature();
            if signature.contains(required) {
                system.base_mut().add_entity(entity);
            }
        }
    }

    fn remove_entity_from_systems(&mut self, entity: Entity) {
        for (_, system) in &mut self.systems {
            system.base_mut().remove_entity(entity);
        }
    }
}

/// Borrowed handle that forwards component operations for one entity.
///
/// Returned by [`Registry::entity_mut`].
pub struct EntityMut<'r> {
    entity: Entity,
    registry: &'r mut Registry,
}

impl EntityMut<'_> {
    /// The entity this handle refers to.
    #[inline]
    #[must_use]
    pub const fn entity(&self) -> Entity {
        self.entity
    }

    /// The entity's integer id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.entity.id()
    }

    /// See [`Registry::add_component`]. Returns `self` for chaining.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::add_component`].
    pub fn add_component<T: Component>(&mut self, component: T) -> EcsResult<&mut Self> {
        self.registry.add_component(self.entity, component)?;
        Ok(self)
    }

    /// See [`Registry::remove_component`].
    ///
    /// # Errors
    ///
    /// Same as [`Registry::remove_component`].
    pub fn remove_component<T: Component>(&mut self) -> EcsResult<()> {
        self.registry.remove_component::<T>(self.entity)
    }

    /// See [`Registry::has_component`].
    #[must_use]
    pub fn has_component<T: Component>(&self) -> bool {
        self.registry.has_component::<T>(self.entity)
    }

    /// See [`Registry::get_component`].
    ///
    /// # Errors
    ///
    /// Same as [`Registry::get_component`].
    pub fn get_component<T: Component>(&self) -> EcsResult<&T> {
        self.registry.get_component::<T>(self.entity)
    }

    /// See [`Registry::get_component_mut`].
    ///
    /// # Errors
    ///
    /// Same as [`Registry::get_component_mut`].
    pub fn get_component_mut<T: Component>(&mut self) -> EcsResult<&mut T> {
        self.registry.get_component_mut::<T>(self.entity)
    }

    /// See [`Registry::kill_entity`].
    pub fn kill(self) {
        self.registry.kill_entity(self.entity);
    }
}
