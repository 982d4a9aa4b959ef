//! Combat resolution.
//!
//! Two independent checks run every frame, player attacks first:
//!
//! 1. [`player_attack_logic`]: every attack source (weapon, flame) whose
//!    owner is alive and still attacking or casting with it is intersected
//!    against every attackable member. Hits are collected during
//!    the scan and applied afterwards. Enemies take damage, start their
//!    invulnerability window and are knocked back; destructible tiles are
//!    marked for removal.
//! 2. [`enemy_attack_logic`]: every alive enemy whose attack is armed and
//!    whose hitbox touches its damage sink delivers one strike through
//!    [`DamageSink::apply_damage`].
//!
//! Nothing is despawned here; see [`prune_defeated`](crate::systems::prune::prune_defeated).

use bevy_ecs::prelude::*;
use log::debug;
use smallvec::SmallVec;

use crate::components::boxcollider::BoxCollider;
use crate::components::enemy::{Enemy, distance_and_direction};
use crate::components::health::{DamageOutcome, DamageSink, Health};
use crate::components::pendingremoval::PendingRemoval;
use crate::components::player::Player;
use crate::components::tile::{Destructible, Tile};
use crate::components::weapon::AttackSource;
use crate::events::combat::{EnemyDefeatedEvent, PlayerHurtEvent};
use crate::resources::group::SpriteGroups;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::{group_hitboxes, move_and_collide};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Enemy {
        target: Entity,
        owner: Entity,
        damage: i32,
    },
    Destructible(Entity),
}

#[allow(clippy::type_complexity)]
pub fn player_attack_logic(
    mut commands: Commands,
    time: Res<WorldTime>,
    groups: Res<SpriteGroups>,
    players: Query<(&Player, &Health, &BoxCollider), Without<Enemy>>,
    sources: Query<(&AttackSource, &BoxCollider), (Without<Enemy>, Without<Tile>)>,
    mut enemies: Query<(&Enemy, &mut Health, &mut BoxCollider), Without<Player>>,
    tiles: Query<(&BoxCollider, Has<Destructible>), (With<Tile>, Without<Enemy>)>,
) {
    if groups.attacks.is_empty() {
        return;
    }
    let now = time.elapsed;

    let mut hits: SmallVec<[Hit; 8]> = SmallVec::new();
    for source_entity in groups.attacks.iter() {
        let Ok((source, source_box)) = sources.get(source_entity) else {
            continue;
        };
        let live = players
            .get(source.owner)
            .is_ok_and(|(owner, health, _)| health.alive && owner.wields(source_entity));
        if !live {
            continue;
        }
        for target in groups.attackable.iter() {
            if let Ok((_, _, target_box)) = enemies.get(target) {
                if source_box.overlaps(target_box) {
                    hits.push(Hit::Enemy {
                        target,
                        owner: source.owner,
                        damage: source.damage,
                    });
                }
            } else if let Ok((tile_box, true)) = tiles.get(target) {
                if source_box.overlaps(tile_box) {
                    hits.push(Hit::Destructible(target));
                }
            }
        }
    }
    if hits.is_empty() {
        return;
    }

    let obstacle_boxes = group_hitboxes(&groups.obstacles, |e| {
        tiles.get(e).ok().map(|(c, _)| c.hitbox)
    });

    for hit in hits {
        match hit {
            Hit::Enemy {
                target,
                owner,
                damage,
            } => {
                let Ok((enemy, mut health, mut collider)) = enemies.get_mut(target) else {
                    continue;
                };
                match health.take_damage(damage, now) {
                    DamageOutcome::Ignored => {}
                    DamageOutcome::Wounded { remaining } => {
                        debug!(
                            "{} {:?} hit for {} ({} left)",
                            enemy.kind, target, damage, remaining
                        );
                        if let Ok((_, _, owner_box)) = players.get(owner) {
                            let from = owner_box.center();
                            let (_, away) = distance_and_direction(from, collider.center());
                            let (dx, dy) = enemy.knockback(away);
                            move_and_collide(&mut collider, dx, dy, &obstacle_boxes);
                        }
                    }
                    DamageOutcome::Killed => {
                        commands.trigger(EnemyDefeatedEvent {
                            enemy: target,
                            kind: enemy.kind,
                            exp: enemy.stats.exp,
                        });
                    }
                }
            }
            Hit::Destructible(target) => {
                debug!("Destructible {:?} cut down", target);
                commands.entity(target).try_insert(PendingRemoval);
            }
        }
    }
}

#[allow(clippy::type_complexity)]
pub fn enemy_attack_logic(
    mut commands: Commands,
    time: Res<WorldTime>,
    groups: Res<SpriteGroups>,
    mut enemies: Query<(&mut Enemy, &Health, &BoxCollider)>,
    mut sinks: Query<(&mut Health, &BoxCollider), Without<Enemy>>,
) {
    let now = time.elapsed;
    for entity in groups.attackable.iter() {
        let Ok((mut enemy, health, collider)) = enemies.get_mut(entity) else {
            continue;
        };
        if !health.alive || enemy.strike_delivered {
            continue;
        }
        let Ok((mut sink_health, sink_box)) = sinks.get_mut(enemy.damage_sink) else {
            continue;
        };
        if !collider.overlaps(sink_box) {
            continue;
        }
        let Some(damage) = enemy.take_strike() else {
            continue;
        };
        debug!(
            "{} {:?} strikes with {} for {}",
            enemy.kind, entity, enemy.stats.attack_type, damage
        );
        let sink: &mut dyn DamageSink = &mut *sink_health;
        let outcome = sink.apply_damage(damage, now);
        if outcome.landed() {
            commands.trigger(PlayerHurtEvent {
                source: entity,
                target: enemy.damage_sink,
                damage,
                outcome,
            });
        }
    }
}
