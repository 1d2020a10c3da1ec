use kestrel_core::{EcsResult, Entity, Registry};

use super::skip_stale;

use crate::components::{RigidBody, Transform};

game_system! {
    /// Integrates velocity into position.
    MovementSystem requires Transform, RigidBody
}

impl MovementSystem {
    /// Advances every admitted entity by `velocity * delta_time`.
    ///
    /// Entities that lost a required component since admission stay put.
    ///
    /// # Errors
    ///
    /// [`EcsError::SystemNotRegistered`](kestrel_core::EcsError) if the
    /// system was never added.
    pub fn update(registry: &mut Registry, delta_time: f64) -> EcsResult<()> {
        for entity in registry.system_entities::<Self>()? {
            skip_stale::<Self, _>(Self::advance(registry, entity, delta_time))?;
        }
        Ok(())
    }

    fn advance(registry: &mut Registry, entity: Entity, delta_time: f64) -> EcsResult<()> {
        let velocity = registry.get_component::<RigidBody>(entity)?.velocity;
        registry.get_component_mut::<Transform>(entity)?.position += velocity * delta_time;
        Ok(())
    }
}
