use bevy_ecs::prelude::*;
use log::debug;

use crate::components::health::Health;
use crate::components::pendingremoval::PendingRemoval;
use crate::components::player::Player;
use crate::resources::group::SpriteGroups;

/// End-of-frame removal of dead enemies, expired weapons and magic, and
/// destroyed tiles.
///
/// Entities are dropped from every sprite group and despawned in the same
/// step, after all combat and movement for the frame ran. The player is never
/// removed, even when dead.
pub fn prune_defeated(world: &mut World) {
    let mut doomed: Vec<Entity> = Vec::new();

    let mut dead = world.query_filtered::<(Entity, &Health), Without<Player>>();
    doomed.extend(
        dead.iter(world)
            .filter(|(_, health)| !health.alive)
            .map(|(entity, _)| entity),
    );
    let mut pending = world.query_filtered::<Entity, (With<PendingRemoval>, Without<Player>)>();
    doomed.extend(pending.iter(world));

    if doomed.is_empty() {
        return;
    }
    doomed.sort_unstable();
    doomed.dedup();

    world.resource_mut::<SpriteGroups>().forget_all(&doomed);
    for entity in doomed {
        debug!("Pruned {:?}", entity);
        world.despawn(entity);
    }
}
