//! Raylib window frontend (feature `window`).
//!
//! Opens the window, uploads every image the level references as a GPU
//! texture, then loops: poll the keyboard, tick the level with the frame
//! time, draw through [`RaylibCanvas`].

use std::sync::Arc;

use log::{info, warn};
use raylib::prelude::{
    Color, RaylibDraw, RaylibDrawHandle, RaylibHandle, RaylibThread, Rectangle, Texture2D,
};
use rustc_hash::FxHashMap;

use crate::game::Level;
use crate::geometry::Rect;
use crate::resources::animationstore::AnimationStore;
use crate::resources::gameconfig::GameConfig;
use crate::resources::texturestore::TextureStore;
use crate::systems::input::{handle_debug_toggle, read_input};
use crate::systems::render::{Canvas, Rgba};

pub type Textures = FxHashMap<Arc<str>, Texture2D>;

fn color(c: Rgba) -> Color {
    Color::new(c.r, c.g, c.b, c.a)
}

fn rectangle(r: Rect) -> Rectangle {
    Rectangle {
        x: r.x as f32,
        y: r.y as f32,
        width: r.w as f32,
        height: r.h as f32,
    }
}

/// [`Canvas`] backed by a raylib draw handle.
pub struct RaylibCanvas<'a, 'b> {
    pub d: &'a mut RaylibDrawHandle<'b>,
    pub textures: &'a Textures,
}

impl Canvas for RaylibCanvas<'_, '_> {
    fn draw_texture(&mut self, key: &str, dest: Rect, alpha: u8) {
        let Some(tex) = self.textures.get(key) else {
            return;
        };
        let src = Rectangle {
            x: 0.0,
            y: 0.0,
            width: tex.width as f32,
            height: tex.height as f32,
        };
        self.d.draw_texture_pro(
            tex,
            src,
            rectangle(dest),
            raylib::prelude::Vector2 { x: 0.0, y: 0.0 },
            0.0,
            Color::new(255, 255, 255, alpha),
        );
    }

    fn fill_rect(&mut self, rect: Rect, c: Rgba) {
        self.d.draw_rectangle(rect.x, rect.y, rect.w, rect.h, color(c));
    }

    /// Borders grow outward from `rect`.
    fn stroke_rect(&mut self, rect: Rect, thickness: i32, c: Rgba) {
        let grow = (thickness - 1).max(0);
        let outer = Rect::new(
            rect.x - grow,
            rect.y - grow,
            rect.w + 2 * grow,
            rect.h + 2 * grow,
        );
        self.d
            .draw_rectangle_lines_ex(rectangle(outer), thickness.max(1) as f32, color(c));
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, size: i32, c: Rgba) {
        self.d.draw_text(text, x, y, size, color(c));
    }
}

/// Uploads every image known to the level's stores.
fn upload_textures(rl: &mut RaylibHandle, thread: &RaylibThread, level: &Level) -> Textures {
    let world = level.world();
    let keys: Vec<Arc<str>> = world
        .resource::<TextureStore>()
        .keys()
        .chain(world.resource::<AnimationStore>().image_keys())
        .cloned()
        .collect();

    let mut textures = Textures::default();
    for key in keys {
        if textures.contains_key(&key) {
            continue;
        }
        match rl.load_texture(thread, key.as_ref()) {
            Ok(tex) => {
                textures.insert(key, tex);
            }
            Err(e) => warn!("Texture {} not uploaded: {}", key, e),
        }
    }
    info!("Uploaded {} textures", textures.len());
    textures
}

pub fn run(config: &GameConfig, mut level: Level) {
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .title(&config.title)
        .build();
    rl.set_target_fps(config.target_fps);
    rl.set_exit_key(None);

    let textures = upload_textures(&mut rl, &thread, &level);
    let water = color(Rgba::WATER);

    while !rl.window_should_close() {
        handle_debug_toggle(&rl, level.world_mut());
        let input = read_input(&rl);
        let dt = rl.get_frame_time();
        if !level.is_game_over() {
            level.tick(input, dt);
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(water);
        let mut canvas = RaylibCanvas {
            d: &mut d,
            textures: &textures,
        };
        level.draw(&mut canvas);
        if level.is_game_over() {
            let w = config.window_width as i32;
            let h = config.window_height as i32;
            d.draw_text("GAME OVER", w / 2 - 120, h / 2 - 20, 40, Color::WHITE);
        }
    }
    info!("Window closed");
}
