use kestrel_core::{EcsResult, Entity, Registry};

use super::skip_stale;

use crate::components::{Animation, Sprite};

game_system! {
    /// Steps sprite-sheet animations along the X axis of the sheet.
    AnimationSystem requires Sprite, Animation
}

impl AnimationSystem {
    /// Selects the frame each animation shows at game time `now_ms`.
    ///
    /// ```text
    /// frame = (now_ms - start_time_ms) * frame_speed_rate / 1000 % num_frames
    /// ```
    ///
    /// Non-looping animations hold their last frame once they run out.
    /// An animation with zero frames is left alone, as is an entity that lost
    /// a required component since admission.
    ///
    /// # Errors
    ///
    /// [`EcsError::SystemNotRegistered`](kestrel_core::EcsError) if the
    /// system was never added.
    pub fn update(registry: &mut Registry, now_ms: u64) -> EcsResult<()> {
        for entity in registry.system_entities::<Self>()? {
            skip_stale::<Self, _>(Self::step(registry, entity, now_ms))?;
        }
        Ok(())
    }

    fn step(registry: &mut Registry, entity: Entity, now_ms: u64) -> EcsResult<()> {
        let width = registry.get_component::<Sprite>(entity)?.width;
        let animation = registry.get_component_mut::<Animation>(entity)?;
        if animation.num_frames == 0 {
            return Ok(());
        }

        let elapsed = now_ms.saturating_sub(animation.start_time_ms);
        let steps = elapsed.saturating_mul(u64::from(animation.frame_speed_rate)) / 1000;
        let frames = u64::from(animation.num_frames);
        let frame = if animation.is_loop {
            steps % frames
        } else {
            steps.min(frames - 1)
        };
        // frame < num_frames, so it fits.
        animation.current_frame = u32::try_from(frame).unwrap_or(animation.num_frames - 1);
        let current = animation.current_frame;

        registry.get_component_mut::<Sprite>(entity)?.src_rect.x = f64::from(current) * width;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_core::Entity;

    fn animated(registry: &mut Registry, animation: Animation) -> Entity {
        let entity = registry.create_entity();
        registry.add_component(entity, Sprite::new("radar-image", 64.0, 64.0, 2)).unwrap();
        registry.add_component(entity, animation).unwrap();
        entity
    }

    fn frame_and_x(registry: &Registry, entity: Entity) -> (u32, f64) {
        (
            registry.get_component::<Animation>(entity).unwrap().current_frame,
            registry.get_component::<Sprite>(entity).unwrap().src_rect.x,
        )
    }

    #[test]
    fn test_looping_animation_wraps() {
        let mut registry = Registry::new();
        registry.add_system(AnimationSystem::new());
        let entity = animated(&mut registry, Animation::new(8, 5, true, 1000));
        registry.update();

        // 5 fps: one frame every 200 ms.
        AnimationSystem::update(&mut registry, 1000).unwrap();
        assert_eq!(frame_and_x(&registry, entity), (0, 0.0));

        AnimationSystem::update(&mut registry, 1650).unwrap();
        assert_eq!(frame_and_x(&registry, entity), (3, 192.0));

        // 9 steps in, wrapped to frame 1.
        AnimationSystem::update(&mut registry, 2800).unwrap();
        assert_eq!(frame_and_x(&registry, entity), (1, 64.0));
    }

    #[test]
    fn test_one_shot_animation_holds_last_frame() {
        let mut registry = Registry::new();
        registry.add_system(AnimationSystem::new());
        let entity = animated(&mut registry, Animation::new(4, 10, false, 0));
        registry.update();

        AnimationSystem::update(&mut registry, 250).unwrap();
        assert_eq!(frame_and_x(&registry, entity).0, 2);

        AnimationSystem::update(&mut registry, 10_000).unwrap();
        assert_eq!(frame_and_x(&registry, entity), (3, 192.0));
    }

    #[test]
    fn test_zero_frame_animation_is_skipped() {
        let mut registry = Registry::new();
        registry.add_system(AnimationSystem::new());
        let entity = animated(&mut registry, Animation::new(0, 10, true, 0));
        registry.update();

        AnimationSystem::update(&mut registry, 5000).unwrap();
        assert_eq!(frame_and_x(&registry, entity), (0, 0.0));
    }

    #[test]
    fn test_far_future_time_does_not_overflow() {
        let mut registry = Registry::new();
        registry.add_system(AnimationSystem::new());
        let entity = animated(&mut registry, Animation::new(4, 10, false, 0));
        registry.update();

        AnimationSystem::update(&mut registry, u64::MAX).unwrap();
        assert_eq!(frame_and_x(&registry, entity).0, 3);
    }

    #[test]
    fn test_time_before_start_shows_first_frame() {
        let mut registry = Registry::new();
        registry.add_system(AnimationSystem::new());
        let entity = animated(&mut registry, Animation::new(2, 5, true, 500));
        registry.update();

        AnimationSystem::update(&mut registry, 100).unwrap();
        assert_eq!(frame_and_x(&registry, entity).0, 0);
    }
}
