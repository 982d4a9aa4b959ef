use std::sync::Arc;

use bevy_ecs::prelude::Component;

/// Texture currently shown for an entity.
///
/// `tex_key` is `None` until the first frame is resolved; entities without a
/// texture are skipped by the renderer (enemies get a placeholder). The
/// on-screen size comes from the entity's [`BoxCollider`] rect.
///
/// [`BoxCollider`]: crate::components::boxcollider::BoxCollider
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub tex_key: Option<Arc<str>>,
    pub alpha: u8,
}

impl Sprite {
    pub fn new(tex_key: Option<Arc<str>>) -> Self {
        Self {
            tex_key,
            alpha: 255,
        }
    }

    pub fn empty() -> Self {
        Self::new(None)
    }
}
