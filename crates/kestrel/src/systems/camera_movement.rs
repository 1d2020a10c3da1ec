use kestrel_core::{EcsResult, Registry};

use super::skip_stale;
use crate::components::{CameraFollow, Rect, Transform, Vec2};

game_system! {
    /// Keeps the camera centered on the followed entity.
    CameraMovementSystem requires CameraFollow, Transform
}

impl CameraMovementSystem {
    /// Centers `camera` on each followed entity in turn, clamped so the view
    /// stays inside a `map_size` world. The last followed entity wins.
    ///
    /// Followed entities that lost their transform since admission are
    /// ignored.
    ///
    /// # Errors
    ///
    /// [`EcsError::SystemNotRegistered`](kestrel_core::EcsError) if the
    /// system was never added.
    pub fn update(registry: &Registry, camera: &mut Rect, map_size: Vec2) -> EcsResult<()> {
        for entity in registry.system_entities::<Self>()? {
            let transform = registry.get_component::<Transform>(entity).copied();
            let Some(Transform { position, .. }) = skip_stale::<Self, _>(transform)? else {
                continue;
            };
            camera.x = (position.x - camera.w / 2.0).clamp(0.0, (map_size.x - camera.w).max(0.0));
            camera.y = (position.y - camera.h / 2.0).clamp(0.0, (map_size.y - camera.h).max(0.0));
        }
        Ok(())
    }
}
