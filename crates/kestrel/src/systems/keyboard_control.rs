use kestrel_core::{EcsResult, Entity, Registry};

use super::skip_stale;

use crate::components::{KeyboardControlled, RigidBody, Sprite};
use crate::events::{Direction, GameEventBus, KeyPressedEvent};

game_system! {
    /// Steers player-controlled entities from key presses.
    ///
    /// A direction key sets the entity's velocity to the matching
    /// [`KeyboardControlled`] vector and switches the sprite to the sheet row
    /// for that heading.
    KeyboardControlSystem requires KeyboardControlled, Sprite, RigidBody
}

impl KeyboardControlSystem {
    /// Subscribes the key handler on `bus`.
    pub fn subscribe_to_events(bus: &mut GameEventBus) {
        bus.subscribe(|registry: &mut Registry, event: &KeyPressedEvent| {
            if let Err(error) = Self::on_key_pressed(registry, event) {
                tracing::warn!(%error, key = ?event.key, "keyboard control skipped");
            }
        });
    }

    fn on_key_pressed(registry: &mut Registry, event: &KeyPressedEvent) -> EcsResult<()> {
        let Some(direction) = event.key.direction() else {
            return Ok(());
        };

        for entity in registry.system_entities::<Self>()? {
            skip_stale::<Self, _>(Self::steer(registry, entity, direction))?;
        }
        Ok(())
    }

    fn steer(registry: &mut Registry, entity: Entity, direction: Direction) -> EcsResult<()> {
        let control = *registry.get_component::<KeyboardControlled>(entity)?;
        // Checked before any write so a stale member is left untouched.
        registry.get_component::<Sprite>(entity)?;

        registry.get_component_mut::<RigidBody>(entity)?.velocity = match direction {
            Direction::Up => control.up_velocity,
            Direction::Right => control.right_velocity,
            Direction::Down => control.down_velocity,
            Direction::Left => control.left_velocity,
        };

        let sprite = registry.get_component_mut::<Sprite>(entity)?;
        sprite.src_rect.y = sprite.height * f64::from(direction.sheet_row());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Vec2;
    use crate::events::KeyCode;
    use kestrel_core::Entity;

    fn player(registry: &mut Registry) -> Entity {
        let entity = registry.create_entity();
        registry.add_component(entity, Sprite::new("chopper-image", 32.0, 32.0, 1)).unwrap();
        registry.add_component(entity, RigidBody::default()).unwrap();
        registry
            .add_component(
                entity,
                KeyboardControlled {
                    up_velocity: Vec2::new(0.0, -80.0),
                    right_velocity: Vec2::new(80.0, 0.0),
                    down_velocity: Vec2::new(0.0, 80.0),
                    left_velocity: Vec2::new(-80.0, 0.0),
                },
            )
            .unwrap();
        entity
    }

    #[test]
    fn test_direction_keys_set_velocity_and_sheet_row() {
        let mut registry = Registry::new();
        registry.add_system(KeyboardControlSystem::new());
        let entity = player(&mut registry);
        registry.update();

        let mut bus = GameEventBus::new();
        KeyboardControlSystem::subscribe_to_events(&mut bus);

        bus.emit(&mut registry, KeyPressedEvent { key: KeyCode::Down });
        assert_eq!(
            registry.get_component::<RigidBody>(entity).unwrap().velocity,
            Vec2::new(0.0, 80.0)
        );
        assert_eq!(registry.get_component::<Sprite>(entity).unwrap().src_rect.y, 64.0);

        bus.emit(&mut registry, KeyPressedEvent { key: KeyCode::A });
        assert_eq!(
            registry.get_component::<RigidBody>(entity).unwrap().velocity,
            Vec2::new(-80.0, 0.0)
        );
        assert_eq!(registry.get_component::<Sprite>(entity).unwrap().src_rect.y, 96.0);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut registry = Registry::new();
        registry.add_system(KeyboardControlSystem::new());
        let entity = player(&mut registry);
        registry.update();

        let mut bus = GameEventBus::new();
        KeyboardControlSystem::subscribe_to_events(&mut bus);
        bus.emit(&mut registry, KeyPressedEvent { key: KeyCode::Space });

        assert_eq!(registry.get_component::<RigidBody>(entity).unwrap().velocity, Vec2::ZERO);
        assert_eq!(registry.get_component::<Sprite>(entity).unwrap().src_rect.y, 0.0);
    }

    #[test]
    fn test_unflushed_player_is_not_steered() {
        let mut registry = Registry::new();
        registry.add_system(KeyboardControlSystem::new());
        let entity = player(&mut registry);

        let mut bus = GameEventBus::new();
        KeyboardControlSystem::subscribe_to_events(&mut bus);
        bus.emit(&mut registry, KeyPressedEvent { key: KeyCode::W });

        assert_eq!(registry.get_component::<RigidBody>(entity).unwrap().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_player_without_sprite_is_skipped_untouched() {
        let mut registry = Registry::new();
        registry.add_system(KeyboardControlSystem::new());
        let stale = player(&mut registry);
        let steered = player(&mut registry);
        registry.update();
        registry.remove_component::<Sprite>(stale).unwrap();

        let mut bus = GameEventBus::new();
        KeyboardControlSystem::subscribe_to_events(&mut bus);
        bus.emit(&mut registry, KeyPressedEvent { key: KeyCode::Right });

        assert_eq!(registry.get_component::<RigidBody>(stale).unwrap().velocity, Vec2::ZERO);
        assert_eq!(
            registry.get_component::<RigidBody>(steered).unwrap().velocity,
            Vec2::new(80.0, 0.0)
        );
    }
}
