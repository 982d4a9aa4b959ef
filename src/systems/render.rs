//! World rendering through the [`Canvas`] seam.
//!
//! The render pass never talks to a graphics library directly. It builds a
//! draw list from the visible group (culled against the camera view, sorted
//! by rect bottom so lower sprites overlap higher ones), shifts every rect
//! by the camera offset and hands the result to a [`Canvas`]. The windowed
//! frontend implements `Canvas` on top of raylib; tests record the calls.

use std::sync::Arc;

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::enemy::Enemy;
use crate::components::sprite::Sprite;
use crate::geometry::Rect;
use crate::resources::camera2d::{Camera2D, FloorLayer};
use crate::resources::debugmode::DebugMode;
use crate::resources::group::SpriteGroups;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);
    pub const BLUE: Rgba = Rgba::rgb(0, 0, 255);
    pub const GOLD: Rgba = Rgba::rgb(255, 215, 0);
    pub const WATER: Rgba = Rgba::rgb(0x71, 0xdd, 0xee);
}

/// Drawing surface in screen coordinates.
pub trait Canvas {
    fn draw_texture(&mut self, key: &str, dest: Rect, alpha: u8);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn stroke_rect(&mut self, rect: Rect, thickness: i32, color: Rgba);
    fn draw_text(&mut self, text: &str, x: i32, y: i32, size: i32, color: Rgba);
}

/// One visible sprite, in world coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawItem {
    pub entity: Entity,
    pub rect: Rect,
    pub hitbox: Rect,
    pub tex_key: Option<Arc<str>>,
    pub alpha: u8,
    pub placeholder: bool,
}

/// Visible-group members intersecting the camera view, in draw order.
pub fn visible_draw_list(world: &mut World) -> Vec<DrawItem> {
    let view = world.resource::<Camera2D>().view();
    let members: Vec<Entity> = world.resource::<SpriteGroups>().visible.iter().collect();
    let mut sprites = world.query::<(&BoxCollider, &Sprite, Has<Enemy>)>();

    let mut items: Vec<DrawItem> = members
        .into_iter()
        .filter_map(|entity| {
            let (collider, sprite, is_enemy) = sprites.get(world, entity).ok()?;
            if !collider.rect.intersects(&view) {
                return None;
            }
            Some(DrawItem {
                entity,
                rect: collider.rect,
                hitbox: collider.hitbox,
                tex_key: sprite.tex_key.clone(),
                alpha: sprite.alpha,
                placeholder: is_enemy && sprite.tex_key.is_none(),
            })
        })
        .collect();
    items.sort_by_key(|item| item.rect.bottom());
    items
}

/// Draws the floor, then every visible sprite, then (in debug mode) the
/// hitbox outlines.
pub fn render_pass(world: &mut World, canvas: &mut dyn Canvas) {
    let camera = *world.resource::<Camera2D>();

    if let Some(floor) = world.get_resource::<FloorLayer>() {
        if let Some(key) = &floor.tex_key {
            canvas.draw_texture(key, camera.to_screen(floor.rect), 255);
        }
    }

    let items = visible_draw_list(world);
    for item in &items {
        let dest = camera.to_screen(item.rect);
        match &item.tex_key {
            Some(key) => canvas.draw_texture(key, dest, item.alpha),
            None if item.placeholder => canvas.fill_rect(dest, Rgba::BLACK),
            None => {}
        }
    }

    if world.contains_resource::<DebugMode>() {
        for item in &items {
            canvas.stroke_rect(camera.to_screen(item.hitbox), 1, Rgba::RED);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Canvas that records every call as a string.
    #[derive(Default)]
    pub(crate) struct RecordingCanvas {
        pub calls: Vec<String>,
    }

    impl Canvas for RecordingCanvas {
        fn draw_texture(&mut self, key: &str, dest: Rect, alpha: u8) {
            self.calls
                .push(format!("tex {} {} {} {}", key, dest.x, dest.y, alpha));
        }
        fn fill_rect(&mut self, rect: Rect, color: Rgba) {
            self.calls.push(format!(
                "fill {} {} {} {} #{:02x}{:02x}{:02x}",
                rect.x, rect.y, rect.w, rect.h, color.r, color.g, color.b
            ));
        }
        fn stroke_rect(&mut self, rect: Rect, thickness: i32, _color: Rgba) {
            self.calls.push(format!(
                "stroke {} {} {} {} {}",
                rect.x, rect.y, rect.w, rect.h, thickness
            ));
        }
        fn draw_text(&mut self, text: &str, x: i32, y: i32, size: i32, _color: Rgba) {
            self.calls.push(format!("text {} {} {} {}", text, x, y, size));
        }
    }

    fn world_with_camera() -> World {
        let mut world = World::new();
        world.insert_resource(SpriteGroups::default());
        let mut camera = Camera2D::new(1280, 720);
        camera.center_on(Rect::new(608, 328, 64, 64));
        world.insert_resource(camera);
        world
    }

    fn spawn_visible(world: &mut World, rect: Rect, key: Option<&str>) -> Entity {
        let entity = world
            .spawn((BoxCollider::solid(rect), Sprite::new(key.map(Arc::from))))
            .id();
        world
            .resource_mut::<SpriteGroups>()
            .add(entity, &[crate::resources::group::GroupKind::Visible]);
        entity
    }

    #[test]
    fn draw_list_is_sorted_by_bottom_and_culled() {
        let mut world = world_with_camera();
        let low = spawn_visible(&mut world, Rect::new(100, 300, 64, 64), Some("low"));
        let high = spawn_visible(&mut world, Rect::new(100, 100, 64, 64), Some("high"));
        let _far = spawn_visible(&mut world, Rect::new(5000, 100, 64, 64), Some("far"));
        let tall = spawn_visible(&mut world, Rect::new(300, 200, 64, 128), Some("tall"));

        let order: Vec<Entity> = visible_draw_list(&mut world)
            .into_iter()
            .map(|item| item.entity)
            .collect();
        assert_eq!(order, vec![high, tall, low]);
    }

    #[test]
    fn render_pass_applies_camera_offset() {
        let mut world = world_with_camera();
        spawn_visible(&mut world, Rect::new(608, 328, 64, 64), Some("player"));
        let mut canvas = RecordingCanvas::default();
        render_pass(&mut world, &mut canvas);
        assert_eq!(canvas.calls, vec!["tex player 608 328 255"]);
    }

    #[test]
    fn untextured_enemies_get_a_placeholder() {
        let mut world = world_with_camera();
        let enemy = spawn_visible(&mut world, Rect::new(0, 0, 64, 64), None);
        world.entity_mut(enemy).insert(Enemy::new(
            crate::resources::gamedata::EnemyKind::Bamboo,
            crate::resources::gamedata::GameData::default()
                .monster(crate::resources::gamedata::EnemyKind::Bamboo)
                .unwrap()
                .clone(),
            Entity::PLACEHOLDER,
        ));
        spawn_visible(&mut world, Rect::new(64, 0, 64, 64), None);
        world.insert_resource(DebugMode {});

        let mut canvas = RecordingCanvas::default();
        render_pass(&mut world, &mut canvas);
        assert_eq!(
            canvas.calls,
            vec![
                "fill 0 0 64 64 #000000",
                "stroke 0 0 64 64 1",
                "stroke 64 0 64 64 1",
            ]
        );
    }
}
