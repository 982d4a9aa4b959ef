use bevy_ecs::prelude::Component;

/// Marks an entity for removal by the end-of-frame prune.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PendingRemoval;
