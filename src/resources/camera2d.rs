//! Shared 2D camera resource.
//!
//! The camera is a plain integer offset: world rects are shifted by
//! `-offset` before drawing. Systems agree on a single view through this
//! resource; [`camera_follow`](crate::systems::camera::camera_follow) keeps
//! it centered on the player.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;

use crate::geometry::Rect;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera2D {
    pub offset_x: i32,
    pub offset_y: i32,
    pub width: i32,
    pub height: i32,
}

impl Camera2D {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            offset_x: 0,
            offset_y: 0,
            width,
            height,
        }
    }

    /// Moves the view so that `target`'s center is at the screen center.
    pub fn center_on(&mut self, target: Rect) {
        self.offset_x = target.x + target.w / 2 - self.width / 2;
        self.offset_y = target.y + target.h / 2 - self.height / 2;
    }

    /// Visible world area.
    pub fn view(&self) -> Rect {
        Rect::new(self.offset_x, self.offset_y, self.width, self.height)
    }

    /// World rect to screen rect.
    pub fn to_screen(&self, rect: Rect) -> Rect {
        rect.translated(-self.offset_x, -self.offset_y)
    }
}

/// Ground image drawn under every sprite, anchored at the world origin.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct FloorLayer {
    pub tex_key: Option<Arc<str>>,
    pub rect: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centering_puts_target_in_the_middle_of_the_screen() {
        let mut camera = Camera2D::new(1280, 720);
        let player = Rect::new(1000, 2000, 64, 64);
        camera.center_on(player);
        assert_eq!(camera.view(), Rect::new(392, 1672, 1280, 720));
        let screen = camera.to_screen(player);
        assert_eq!(screen.center_point(), (640, 360));
    }
}
