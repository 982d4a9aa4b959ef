use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::enemy::{Enemy, distance_and_direction};
use crate::components::heading::Heading;
use crate::components::health::Health;
use crate::components::tile::Tile;
use crate::resources::group::SpriteGroups;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::{group_hitboxes, move_and_collide};

/// Enemy AI: picks a status from the distance to the damage sink and walks
/// toward it while in the notice band.
///
/// Distance and direction are measured between rect centers and recomputed
/// every frame. Enemies are visited in attackable-group order; dead ones are
/// skipped until the end-of-frame prune removes them.
#[allow(clippy::type_complexity)]
pub fn enemy_ai(
    time: Res<WorldTime>,
    groups: Res<SpriteGroups>,
    mut enemies: Query<(
        &mut Enemy,
        &Health,
        &mut Heading,
        &mut BoxCollider,
        &mut Animation,
    )>,
    targets: Query<&BoxCollider, Without<Enemy>>,
    obstacles: Query<&BoxCollider, (With<Tile>, Without<Enemy>)>,
) {
    let now = time.elapsed;
    let obstacle_boxes = group_hitboxes(&groups.obstacles, |e| {
        obstacles.get(e).ok().map(|c| c.hitbox)
    });

    for entity in groups.attackable.iter() {
        let Ok((mut enemy, health, mut heading, mut collider, mut animation)) =
            enemies.get_mut(entity)
        else {
            continue;
        };
        if !health.alive {
            continue;
        }
        let Ok(target) = targets.get(enemy.damage_sink) else {
            continue;
        };

        let (distance, direction) = distance_and_direction(collider.center(), target.center());
        if enemy.update_status(distance, now) {
            animation.restart();
        }

        let (dx, dy) = enemy.step(direction);
        if dx != 0 || dy != 0 {
            heading.set_direction(direction);
            move_and_collide(&mut collider, dx, dy, &obstacle_boxes);
        } else {
            heading.stop();
        }
    }
}
