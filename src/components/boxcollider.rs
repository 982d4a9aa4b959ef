use bevy_ecs::prelude::Component;

use crate::geometry::{Rect, Vector2};

/// Vertical inset applied to player and enemy hitboxes.
pub const CHARACTER_INSET_Y: i32 = 10;

/// Vertical inset applied to regular map tiles.
pub const TILE_INSET_Y: i32 = 3;

/// Visual bounds plus the narrower rectangle used for collision and combat.
///
/// The hitbox always lies inside the visual rect. Movement is applied to the
/// hitbox; the rect follows it via [`BoxCollider::center_rect_on_hitbox`].
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    pub rect: Rect,
    pub hitbox: Rect,
}

impl BoxCollider {
    /// Collider whose hitbox is the full visual rect.
    pub fn solid(rect: Rect) -> Self {
        Self { rect, hitbox: rect }
    }

    /// Collider with the hitbox shrunk by `inset_y` at the top and bottom.
    pub fn inset(rect: Rect, inset_y: i32) -> Self {
        let inset_y = inset_y.clamp(0, rect.h.max(0) / 2);
        let hitbox = Rect::new(rect.x, rect.y + inset_y, rect.w, rect.h - 2 * inset_y);
        Self { rect, hitbox }
    }

    /// Collider for a tall sprite that only blocks with its bottom band.
    pub fn bottom_band(rect: Rect, band_height: i32) -> Self {
        let band_height = band_height.clamp(0, rect.h.max(0));
        let hitbox = Rect::new(rect.x, rect.bottom() - band_height, rect.w, band_height);
        Self { rect, hitbox }
    }

    pub fn translate_hitbox(&mut self, dx: i32, dy: i32) {
        self.hitbox = self.hitbox.translated(dx, dy);
    }

    /// Moves the visual rect so that it is centered on the hitbox.
    pub fn center_rect_on_hitbox(&mut self) {
        let (cx, cy) = self.hitbox.center_point();
        self.rect = self.rect.centered_at(cx, cy);
    }

    /// Resizes the visual rect (new animation frame) keeping it centered on
    /// the hitbox.
    pub fn resize_rect(&mut self, w: i32, h: i32) {
        self.rect.w = w;
        self.rect.h = h;
        self.center_rect_on_hitbox();
    }

    /// Hitbox against hitbox overlap.
    pub fn overlaps(&self, other: &BoxCollider) -> bool {
        self.hitbox.intersects(&other.hitbox)
    }

    /// Center of the visual rect, used for distance and direction checks.
    pub fn center(&self) -> Vector2 {
        self.rect.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inset_hitbox_stays_inside_rect() {
        let c = BoxCollider::inset(Rect::new(64, 128, 64, 64), TILE_INSET_Y);
        assert_eq!(c.hitbox, Rect::new(64, 131, 64, 58));
        assert!(c.rect.contains_rect(&c.hitbox));
    }

    #[test]
    fn inset_never_produces_negative_height() {
        let c = BoxCollider::inset(Rect::new(0, 0, 10, 6), CHARACTER_INSET_Y);
        assert!(c.hitbox.h >= 0);
        assert!(c.rect.contains_rect(&c.hitbox));
    }

    #[test]
    fn bottom_band_uses_lower_part() {
        let c = BoxCollider::bottom_band(Rect::new(0, -64, 64, 128), 64);
        assert_eq!(c.hitbox, Rect::new(0, 0, 64, 64));
    }

    #[test]
    fn rect_follows_hitbox() {
        let mut c = BoxCollider::inset(Rect::new(0, 0, 64, 64), CHARACTER_INSET_Y);
        c.translate_hitbox(5, -3);
        c.center_rect_on_hitbox();
        assert_eq!(c.rect, Rect::new(5, -3, 64, 64));
        assert!(c.rect.contains_rect(&c.hitbox));
    }

    #[test]
    fn resize_rect_recenters_on_hitbox() {
        let mut c = BoxCollider::inset(Rect::new(0, 0, 64, 64), CHARACTER_INSET_Y);
        c.resize_rect(60, 70);
        assert_eq!(c.rect.center_point(), c.hitbox.center_point());
    }
}
