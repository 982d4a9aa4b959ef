//! Debug toggle resource.
//!
//! The mere presence of this resource makes the render pass outline every
//! visible hitbox. Remove it to disable debug drawing.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, hitboxes are drawn over sprites.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode {}
