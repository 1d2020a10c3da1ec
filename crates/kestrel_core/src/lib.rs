//! # Kestrel Core
//!
//! The entity-component-system at the heart of the Kestrel 2D engine:
//! - Recycled integer entity ids
//! - One dense, entity-indexed pool per component type
//! - Bitmask signatures matching entities to systems
//! - A once-per-frame flush for entity creation and destruction
//! - A synchronous typed event bus
//!
//! Everything is in-memory and single-threaded. Rendering, assets, input and
//! frame pacing belong to the layers built on top.
//!
//! ## Example
//!
//! ```rust
//! use kestrel_core::{Component, Registry, System, SystemBase};
//!
//! #[derive(Clone, Copy, Debug, Default)]
//! struct Position { x: f32 }
//! impl Component for Position {}
//!
//! struct Drift { base: SystemBase }
//! impl System for Drift {
//!     fn base(&self) -> &SystemBase { &self.base }
//!     fn base_mut(&mut self) -> &mut SystemBase { &mut self.base }
//! }
//!
//! let mut registry = Registry::new();
//! let mut base = SystemBase::new();
//! base.require::<Position>();
//! registry.add_system(Drift { base });
//!
//! let entity = registry.create_entity();
//! registry.add_component(entity, Position { x: 0.0 }).unwrap();
//! registry.update();
//!
//! for entity in registry.system_entities::<Drift>().unwrap() {
//!     registry.get_component_mut::<Position>(entity).unwrap().x += 1.0;
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod error;
pub mod events;

pub use config::EcsConfig;
pub use ecs::{
    AsAny, Component, ComponentTypeId, Entity, EntityMut, ErasedPool, Pool, Registry,
    Signature, System, SystemBase, MAX_COMPONENTS,
};
pub use error::{EcsError, EcsResult};
pub use events::{Event, EventBus};
