//! Animation systems.
//!
//! Each frame the track key is derived from the entity's state, the cursor
//! advances, and the sprite texture (plus the rect size, re-centered on the
//! hitbox) is refreshed only when the discrete frame changed. A track
//! without frames leaves the sprite untouched.
//!
//! Entities inside an invulnerability window blink between half and full
//! opacity every [`BLINK_PERIOD`] seconds.

use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::enemy::Enemy;
use crate::components::heading::Heading;
use crate::components::health::Health;
use crate::components::player::Player;
use crate::components::sprite::Sprite;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

pub const BLINK_PERIOD: f32 = 0.1;

/// Alpha for an entity that is (or is not) inside its invulnerability window.
pub fn blink_alpha(vulnerable: bool, now: f32) -> u8 {
    if vulnerable {
        return 255;
    }
    if ((now / BLINK_PERIOD) as u64) % 2 == 0 {
        128
    } else {
        255
    }
}

/// Advances `animation` and refreshes the sprite. Returns the frame count of
/// the current track.
fn step_animation(
    store: &AnimationStore,
    animation: &mut Animation,
    sprite: &mut Sprite,
    collider: &mut BoxCollider,
) -> usize {
    let count = store.frame_count(&animation.key);
    let frame = animation
        .advance(count)
        .and_then(|index| store.frame(&animation.key, index));
    if let Some(frame) = frame {
        sprite.tex_key = Some(frame.key.clone());
        if (frame.width, frame.height) != (collider.rect.w, collider.rect.h) {
            collider.resize_rect(frame.width, frame.height);
        }
    }
    count
}

#[allow(clippy::type_complexity)]
pub fn animate_player(
    time: Res<WorldTime>,
    store: Res<AnimationStore>,
    mut players: Query<
        (
            &Player,
            &Heading,
            &Health,
            &mut Animation,
            &mut Sprite,
            &mut BoxCollider,
        ),
        Without<Enemy>,
    >,
) {
    for (player, heading, health, mut animation, mut sprite, mut collider) in players.iter_mut() {
        animation.set_key(&player.animation_track(heading.facing));
        step_animation(&store, &mut animation, &mut sprite, &mut collider);
        sprite.alpha = blink_alpha(health.vulnerable, time.elapsed);
    }
}

/// Also ends enemy attack cycles once the attack track reaches its last
/// frame (or on the first step when it has no frames).
#[allow(clippy::type_complexity)]
pub fn animate_enemies(
    time: Res<WorldTime>,
    store: Res<AnimationStore>,
    mut enemies: Query<
        (
            &mut Enemy,
            &Health,
            &mut Animation,
            &mut Sprite,
            &mut BoxCollider,
        ),
        Without<Player>,
    >,
) {
    for (mut enemy, health, mut animation, mut sprite, mut collider) in enemies.iter_mut() {
        if !health.alive {
            continue;
        }
        animation.set_key(&enemy.animation_track());
        let count = step_animation(&store, &mut animation, &mut sprite, &mut collider);
        if enemy.attacking && (count == 0 || animation.on_last_frame(count)) {
            enemy.finish_attack();
        }
        sprite.alpha = blink_alpha(health.vulnerable, time.elapsed);
    }
}
