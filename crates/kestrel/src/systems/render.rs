use kestrel_core::{EcsResult, Entity, Registry};

use super::skip_stale;
use crate::components::{Sprite, Transform};

game_system! {
    /// Decides draw order for sprites. Drawing itself belongs to the
    /// platform layer.
    RenderSystem requires Transform, Sprite
}

impl RenderSystem {
    /// Admitted entities sorted by ascending sprite z-index. Equal z-indices
    /// keep admission order. Entities without a sprite or transform are not
    /// drawn.
    ///
    /// # Errors
    ///
    /// [`EcsError::SystemNotRegistered`](kestrel_core::EcsError) if the
    /// system was never added.
    pub fn render_order(registry: &Registry) -> EcsResult<Vec<Entity>> {
        let mut layered = Vec::new();
        for entity in registry.system_entities::<Self>()? {
            let z_index = registry.get_component::<Transform>(entity).and_then(|_| {
                registry.get_component::<Sprite>(entity).map(|sprite| sprite.z_index)
            });
            if let Some(z_index) = skip_stale::<Self, _>(z_index)? {
                layered.push((z_index, entity));
            }
        }
        layered.sort_by_key(|&(z_index, _)| z_index);
        Ok(layered.into_iter().map(|(_, entity)| entity).collect())
    }
}
