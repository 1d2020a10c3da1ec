use kestrel_core::Registry;

use crate::components::BoxCollider;
use crate::events::{CollisionEvent, GameEventBus};

game_system! {
    /// Destroys both parties of every collision.
    DamageSystem requires BoxCollider
}

impl DamageSystem {
    /// Subscribes the collision handler on `bus`.
    ///
    /// Kills are queued, so both entities disappear at the next flush.
    pub fn subscribe_to_events(bus: &mut GameEventBus) {
        bus.subscribe(|registry: &mut Registry, event: &CollisionEvent| {
            tracing::debug!(a = event.a.id(), b = event.b.id(), "collision damage");
            registry.kill_entity(event.a);
            registry.kill_entity(event.b);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_core::Entity;

    #[test]
    fn test_collision_kills_both_after_flush() {
        let mut registry = Registry::new();
        registry.add_system(DamageSystem::new());
        let a = registry.create_entity();
        let b = registry.create_entity();
        let bystander = registry.create_entity();
        for entity in [a, b, bystander] {
            registry.add_component(entity, BoxCollider::new(8.0, 8.0)).unwrap();
        }
        registry.update();

        let mut bus = GameEventBus::new();
        DamageSystem::subscribe_to_events(&mut bus);
        bus.emit(&mut registry, CollisionEvent { a, b });

        // Still alive until the flush.
        assert_eq!(registry.system_entities::<DamageSystem>().unwrap().len(), 3);

        registry.update();
        assert_eq!(registry.system_entities::<DamageSystem>().unwrap(), vec![bystander]);
        assert!(!registry.has_component::<BoxCollider>(a));
        assert!(!registry.has_component::<BoxCollider>(b));
    }

    #[test]
    fn test_repeated_collision_frees_each_id_once() {
        let mut registry = Registry::new();
        registry.add_system(DamageSystem::new());
        let pair: Vec<Entity> = (0..2).map(|_| registry.create_entity()).collect();
        registry.update();

        let mut bus = GameEventBus::new();
        DamageSystem::subscribe_to_events(&mut bus);
        for _ in 0..3 {
            bus.emit(&mut registry, CollisionEvent { a: pair[0], b: pair[1] });
        }
        registry.update();

        assert_eq!(registry.free_id_count(), 2);
    }
}
