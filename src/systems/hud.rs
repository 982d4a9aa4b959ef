//! Heads-up display drawn in screen space after the world pass.
//!
//! Layout:
//! - health bar at (10, 10), 200 × 20, red fill
//! - mana bar at (10, 40), 140 × 20, blue fill
//! - experience counter anchored 80 px from the right edge and 40 px from
//!   the bottom, with a border inflated by 4 px
//! - weapon and magic boxes (80 × 80) 100 px above the bottom edge, icon
//!   centered; the border turns gold while the selection is cooling down

use bevy_ecs::prelude::*;

use crate::components::health::Health;
use crate::components::player::Player;
use crate::components::weapon::{magic_image_path, weapon_icon_path};
use crate::geometry::Rect;
use crate::resources::gameconfig::GameConfig;
use crate::resources::texturestore::TextureStore;
use crate::resources::worldtime::WorldTime;
use crate::systems::render::{Canvas, Rgba};

pub const BAR_HEIGHT: i32 = 20;
pub const HEALTH_BAR_WIDTH: i32 = 200;
pub const MANA_BAR_WIDTH: i32 = 140;
pub const ITEM_BOX_SIZE: i32 = 80;
pub const UI_FONT_SIZE: i32 = 18;
pub const BORDER_THICKNESS: i32 = 3;

pub const UI_BG_COLOR: Rgba = Rgba::rgb(0x22, 0x22, 0x22);
pub const UI_BORDER_COLOR: Rgba = Rgba::rgb(0x11, 0x11, 0x11);
pub const UI_BORDER_COLOR_ACTIVE: Rgba = Rgba::GOLD;
pub const TEXT_COLOR: Rgba = Rgba::rgb(0xee, 0xee, 0xee);
pub const HEALTH_COLOR: Rgba = Rgba::RED;
pub const MANA_COLOR: Rgba = Rgba::BLUE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudLayout {
    pub health_bar: Rect,
    pub mana_bar: Rect,
    pub exp_anchor: (i32, i32),
    pub weapon_box: Rect,
    pub magic_box: Rect,
}

impl HudLayout {
    pub fn new(screen_width: i32, screen_height: i32) -> Self {
        Self {
            health_bar: Rect::new(10, 10, HEALTH_BAR_WIDTH, BAR_HEIGHT),
            mana_bar: Rect::new(10, 40, MANA_BAR_WIDTH, BAR_HEIGHT),
            exp_anchor: (screen_width - 80, screen_height - 40),
            weapon_box: Rect::new(20, screen_height - 100, ITEM_BOX_SIZE, ITEM_BOX_SIZE),
            magic_box: Rect::new(120, screen_height - 100, ITEM_BOX_SIZE, ITEM_BOX_SIZE),
        }
    }

    /// Filled part of a bar for a ratio in `[0, 1]`.
    pub fn fill(bar: Rect, ratio: f32) -> Rect {
        let ratio = ratio.clamp(0.0, 1.0);
        Rect::new(bar.x, bar.y, (bar.w as f32 * ratio) as i32, bar.h)
    }

    /// Screen rect of the experience counter. Glyph metrics belong to the
    /// frontend, so the text is measured as one font size per character.
    pub fn exp_rect(&self, text: &str) -> Rect {
        let (x, y) = self.exp_anchor;
        Rect::new(
            x,
            y,
            text.chars().count() as i32 * UI_FONT_SIZE,
            UI_FONT_SIZE,
        )
    }

    /// Rect of a `w × h` icon centered in `item_box`.
    pub fn centered_icon(item_box: Rect, w: i32, h: i32) -> Rect {
        Rect::new(
            item_box.x + (item_box.w - w) / 2,
            item_box.y + (item_box.h - h) / 2,
            w,
            h,
        )
    }
}

fn draw_bar(canvas: &mut dyn Canvas, bar: Rect, ratio: f32, color: Rgba) {
    canvas.fill_rect(bar, UI_BG_COLOR);
    canvas.fill_rect(HudLayout::fill(bar, ratio), color);
    canvas.stroke_rect(bar, BORDER_THICKNESS, UI_BORDER_COLOR);
}

fn draw_item_box(
    canvas: &mut dyn Canvas,
    item_box: Rect,
    icon: Option<(&str, i32, i32)>,
    swapping: bool,
) {
    canvas.fill_rect(item_box, UI_BG_COLOR);
    let border = if swapping {
        UI_BORDER_COLOR_ACTIVE
    } else {
        UI_BORDER_COLOR
    };
    canvas.stroke_rect(item_box, BORDER_THICKNESS, border);
    if let Some((key, w, h)) = icon {
        canvas.draw_texture(key, HudLayout::centered_icon(item_box, w, h), 255);
    }
}

/// Draws the HUD for the (single) player. Does nothing without one.
pub fn draw_hud(world: &mut World, canvas: &mut dyn Canvas) {
    let mut players = world.query::<(&Player, &Health)>();
    let Some((player, health)) = players.iter(world).next() else {
        return;
    };
    let config = world.resource::<GameConfig>();
    let textures = world.resource::<TextureStore>();
    let now = world.resource::<WorldTime>().elapsed;

    let layout = HudLayout::new(config.window_width as i32, config.window_height as i32);

    draw_bar(canvas, layout.health_bar, health.ratio(), HEALTH_COLOR);
    draw_bar(canvas, layout.mana_bar, player.mana_ratio(), MANA_COLOR);

    let exp = player.exp.to_string();
    let exp_rect = layout.exp_rect(&exp);
    canvas.draw_text(&exp, exp_rect.x, exp_rect.y, UI_FONT_SIZE, TEXT_COLOR);
    canvas.stroke_rect(
        Rect::new(exp_rect.x - 4, exp_rect.y - 4, exp_rect.w + 8, exp_rect.h + 8),
        BORDER_THICKNESS,
        UI_BORDER_COLOR,
    );

    let weapon_icon = textures.get(&config.asset_path(weapon_icon_path(player.weapon)));
    draw_item_box(
        canvas,
        layout.weapon_box,
        weapon_icon.map(|i| (i.key.as_ref(), i.width, i.height)),
        player.is_swapping_weapon(now),
    );
    let magic_icon = textures.get(&config.asset_path(magic_image_path(player.magic)));
    draw_item_box(
        canvas,
        layout.magic_box,
        magic_icon.map(|i| (i.key.as_ref(), i.width, i.height)),
        player.is_swapping_magic(now),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::assets::tests::FixedSizeLoader;
    use crate::resources::gamedata::PlayerStats;
    use crate::systems::render::tests::RecordingCanvas;

    #[test]
    fn layout_follows_screen_size() {
        let layout = HudLayout::new(1280, 720);
        assert_eq!(layout.exp_anchor, (1200, 680));
        assert_eq!(layout.weapon_box, Rect::new(20, 620, 80, 80));
        assert_eq!(layout.magic_box, Rect::new(120, 620, 80, 80));
    }

    #[test]
    fn bar_fill_is_proportional_and_clamped() {
        let bar = Rect::new(10, 10, 200, 20);
        assert_eq!(HudLayout::fill(bar, 0.5).w, 100);
        assert_eq!(HudLayout::fill(bar, 1.5).w, 200);
        assert_eq!(HudLayout::fill(bar, -1.0).w, 0);
    }

    #[test]
    fn icons_are_centered_in_their_box() {
        let icon = HudLayout::centered_icon(Rect::new(20, 620, 80, 80), 40, 60);
        assert_eq!(icon, Rect::new(40, 630, 40, 60));
    }

    fn hud_world() -> World {
        let mut world = World::new();
        let config = GameConfig::new();
        let mut textures = TextureStore::default();
        textures.load(
            &FixedSizeLoader(40, 60),
            &config.asset_path(weapon_icon_path(crate::resources::gamedata::WeaponKind::Sword)),
        );
        world.insert_resource(config);
        world.insert_resource(textures);
        world.insert_resource(WorldTime::default());
        let mut health = Health::new(100, 0.5);
        health.current = 50;
        world.spawn((Player::new(PlayerStats::default()), health));
        world
    }

    #[test]
    fn hud_draws_bars_text_and_icons() {
        let mut world = hud_world();
        let mut canvas = RecordingCanvas::default();
        draw_hud(&mut world, &mut canvas);

        assert!(canvas.calls.contains(&"fill 10 10 100 20 #ff0000".to_string()));
        assert!(canvas.calls.contains(&"fill 10 40 140 20 #0000ff".to_string()));
        assert!(canvas.calls.contains(&"text 0 1200 680 18".to_string()));
        assert!(canvas.calls.contains(&"stroke 1196 676 26 26 3".to_string()));
        assert!(
            canvas
                .calls
                .iter()
                .any(|c| c.starts_with("tex ") && c.ends_with(" 40 630 255"))
        );
    }

    #[test]
    fn no_player_draws_nothing() {
        let mut world = World::new();
        let mut canvas = RecordingCanvas::default();
        draw_hud(&mut world, &mut canvas);
        assert!(canvas.calls.is_empty());
    }
}
