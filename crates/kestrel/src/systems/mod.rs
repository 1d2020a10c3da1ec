//! # Game Systems
//!
//! Each system declares its component requirements in `new()` and exposes its
//! per-frame policy as associated functions taking the [`Registry`]
//! explicitly. The registry owns the system instance, so a policy snapshots
//! the admitted list with [`Registry::system_entities`] and then mutates
//! components freely.
//!
//! | System | Requires | Frame step |
//! |--------|----------|------------|
//! | [`MovementSystem`] | Transform, RigidBody | `update(dt)` |
//! | [`KeyboardControlSystem`] | KeyboardControlled, Sprite, RigidBody | bus: `KeyPressedEvent` |
//! | [`AnimationSystem`] | Sprite, Animation | `update(now_ms)` |
//! | [`CollisionSystem`] | Transform, BoxCollider | `update(bus)` |
//! | [`DamageSystem`] | BoxCollider | bus: `CollisionEvent` |
//! | [`CameraMovementSystem`] | CameraFollow, Transform | `update(camera)` |
//! | [`RenderSystem`] | Transform, Sprite | `render_order()` |
//! | [`RenderColliderSystem`] | Transform, BoxCollider | `outlines(camera)` |
//!
//! An admitted entity can lose a required component after admission. The
//! policies skip such entities for the frame instead of failing it.
//!
//! [`Registry`]: kestrel_core::Registry
//! [`Registry::system_entities`]: kestrel_core::Registry::system_entities

// Must precede the submodule declarations.
/// Declares a system struct over `SystemBase` with the given requirements.
macro_rules! game_system {
    ($(#[$meta:meta])* $name:ident requires $($component:ty),+) => {
        $(#[$meta])*
        pub struct $name {
            base: kestrel_core::SystemBase,
        }

        impl $name {
            /// Creates the system with its component requirements set.
            #[must_use]
            pub fn new() -> Self {
                let mut base = kestrel_core::SystemBase::new();
                $(base.require::<$component>();)+
                Self { base }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl kestrel_core::System for $name {
            fn base(&self) -> &kestrel_core::SystemBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut kestrel_core::SystemBase {
                &mut self.base
            }
        }
    };
}

/// Keeps a per-entity step result, turning a component lost since admission
/// into `None`. Every other error propagates.
pub(crate) fn skip_stale<S, T>(
    result: kestrel_core::EcsResult<T>,
) -> kestrel_core::EcsResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(kestrel_core::EcsError::ComponentAbsent { entity, component }) => {
            tracing::debug!(
                system = std::any::type_name::<S>(),
                entity = entity.id(),
                component,
                "stale member skipped"
            );
            Ok(None)
        }
        Err(error) => Err(error),
    }
}

mod animation;
mod camera_movement;
mod collision;
mod damage;
mod keyboard_control;
mod movement;
mod render;
mod render_collider;

pub use animation::AnimationSystem;
pub use camera_movement::CameraMovementSystem;
pub use collision::CollisionSystem;
pub use damage::DamageSystem;
pub use keyboard_control::KeyboardControlSystem;
pub use movement::MovementSystem;
pub use render::RenderSystem;
pub use render_collider::RenderColliderSystem;
