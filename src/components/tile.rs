use bevy_ecs::prelude::Component;

use crate::components::boxcollider::{BoxCollider, TILE_INSET_Y};
use crate::geometry::Rect;
use crate::resources::gamedata::TILE_SIZE;

/// Map layer a tile was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileCategory {
    /// Boundary block: blocks movement, never drawn.
    Invisible,
    Grass,
    Object,
}

/// Static map entity. Immutable after construction.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub category: TileCategory,
}

impl Tile {
    pub fn new(category: TileCategory) -> Self {
        Self { category }
    }

    /// Collider for a tile placed at map cell origin `(x, y)` with an image of
    /// `w × h` pixels.
    ///
    /// Objects taller than a cell grow upward and collide with their bottom
    /// cell only; everything else uses the tile inset.
    pub fn collider(&self, x: i32, y: i32, w: i32, h: i32) -> BoxCollider {
        if self.category == TileCategory::Object && h > TILE_SIZE {
            let rect = Rect::new(x, y - (h - TILE_SIZE), w, h);
            BoxCollider::bottom_band(rect, TILE_SIZE)
        } else {
            BoxCollider::inset(Rect::new(x, y, w, h), TILE_INSET_Y)
        }
    }
}

/// Removed from the world when hit by an attack.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Destructible;
