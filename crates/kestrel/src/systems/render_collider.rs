use kestrel_core::{EcsResult, Entity, Registry};

use super::skip_stale;
use crate::components::{BoxCollider, Rect, Transform};

game_system! {
    /// Debug overlay: collider outlines in screen space.
    RenderColliderSystem requires Transform, BoxCollider
}

impl RenderColliderSystem {
    /// Screen-space collider rectangle of every admitted entity, in admission
    /// order. Entities that lost a required component since admission are
    /// left out.
    ///
    /// # Errors
    ///
    /// [`EcsError::SystemNotRegistered`](kestrel_core::EcsError) if the
    /// system was never added.
    pub fn outlines(registry: &Registry, camera: &Rect) -> EcsResult<Vec<(Entity, Rect)>> {
        let mut outlines = Vec::new();
        for entity in registry.system_entities::<Self>()? {
            let bounds = registry.get_component::<Transform>(entity).and_then(|transform| {
                registry
                    .get_component::<BoxCollider>(entity)
                    .map(|collider| collider.bounds(transform))
            });
            if let Some(mut bounds) = skip_stale::<Self, _>(bounds)? {
                bounds.x -= camera.x;
                bounds.y -= camera.y;
                outlines.push((entity, bounds));
            }
        }
        Ok(outlines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Vec2;

    #[test]
    fn test_outlines_are_relative_to_camera() {
        let mut registry = Registry::new();
        registry.add_system(RenderColliderSystem::new());

        let tank = registry.create_entity();
        registry.add_component(tank, Transform::at(Vec2::new(500.0, 300.0))).unwrap();
        let mut collider = BoxCollider::new(32.0, 16.0);
        collider.offset = Vec2::new(4.0, 8.0);
        registry.add_component(tank, collider).unwrap();

        let stale = registry.create_entity();
        registry.add_component(stale, Transform::default()).unwrap();
        registry.add_component(stale, BoxCollider::new(8.0, 8.0)).unwrap();
        registry.update();
        registry.remove_component::<Transform>(stale).unwrap();

        let camera = Rect::new(100.0, 50.0, 800.0, 600.0);
        assert_eq!(
            RenderColliderSystem::outlines(&registry, &camera).unwrap(),
            vec![(tank, Rect::new(404.0, 258.0, 32.0, 16.0))]
        );
    }
}
