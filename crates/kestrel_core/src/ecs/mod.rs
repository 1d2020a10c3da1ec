//! # Entity Component System
//!
//! Signature-matched systems over per-type dense pools.
//!
//! ## Design Philosophy
//!
//! - Entities are bare integer ids, recycled through a free list
//! - One dense pool per component type, indexed by entity id
//! - Each entity has a bitmask signature of the components it carries
//! - Systems are admitted entities whose signature covers their requirement,
//!   in a batched flush once per frame

mod component;
mod entity;
mod registry;
mod signature;
mod storage;
mod system;

pub use component::{Component, ComponentTypeId};
pub use entity::Entity;
pub use registry::{EntityMut, Registry};
pub use signature::{Signature, MAX_COMPONENTS};
pub use storage::{ErasedPool, Pool};
pub use system::{AsAny, System, SystemBase};
