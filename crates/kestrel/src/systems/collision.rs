use kestrel_core::{EcsResult, Entity, Registry};

use super::skip_stale;
use crate::components::{BoxCollider, Rect, Transform};
use crate::events::{CollisionEvent, GameEventBus};

game_system! {
    /// Pairwise axis-aligned box overlap test.
    CollisionSystem requires Transform, BoxCollider
}

impl CollisionSystem {
    /// Tests every unordered pair of admitted entities once and emits a
    /// [`CollisionEvent`] for each overlapping pair.
    ///
    /// Handlers run synchronously inside this call. Entities they kill stay
    /// admitted until the next flush, so the rest of the sweep still sees
    /// them.
    ///
    /// Entities that lost a required component since admission take no
    /// part in the sweep.
    ///
    /// Returns the number of collisions emitted.
    ///
    /// # Errors
    ///
    /// [`EcsError::SystemNotRegistered`](kestrel_core::EcsError) if the
    /// system was never added.
    pub fn update(registry: &mut Registry, bus: &mut GameEventBus) -> EcsResult<usize> {
        let mut boxes: Vec<(Entity, Rect)> = Vec::new();
        for entity in registry.system_entities::<Self>()? {
            if let Some(bounds) = skip_stale::<Self, _>(Self::bounds(registry, entity))? {
                boxes.push((entity, bounds));
            }
        }

        let mut collisions = 0;
        for (i, &(a, a_box)) in boxes.iter().enumerate() {
            for &(b, b_box) in &boxes[i + 1..] {
                if a_box.overlaps(&b_box) {
                    tracing::debug!(a = a.id(), b = b.id(), "collision");
                    bus.emit(registry, CollisionEvent { a, b });
                    collisions += 1;
                }
            }
        }
        Ok(collisions)
    }

    fn bounds(registry: &Registry, entity: Entity) -> EcsResult<Rect> {
        let transform = registry.get_component::<Transform>(entity)?;
        let collider = registry.get_component::<BoxCollider>(entity)?;
        Ok(collider.bounds(transform))
    }
}
