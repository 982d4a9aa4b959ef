//! Player-facing systems: vulnerability refresh and input-driven control.
//!
//! [`player_control`] is the only place the player's action state changes.
//! It feeds the input snapshot to [`Player::handle_input`], spawns the
//! weapon or spell requested by a fresh press, moves the player (x then y,
//! resolving against the obstacles group after each axis), expires finished
//! actions and marks their weapon/magic entities for removal. A dead player
//! drops whatever action it was in the middle of.

use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::heading::{Facing, Heading};
use crate::components::health::Health;
use crate::components::pendingremoval::PendingRemoval;
use crate::components::player::Player;
use crate::components::sprite::Sprite;
use crate::components::tile::Tile;
use crate::components::weapon::{
    AttackSource, Magic, Weapon, magic_image_path, magic_rect, weapon_image_path, weapon_rect,
};
use crate::geometry::Rect;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamedata::{FALLBACK_EFFECT_SIZE, GameData, MagicKind};
use crate::resources::group::{GroupKind, SpriteGroups};
use crate::resources::input::InputState;
use crate::resources::texturestore::TextureStore;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::{group_hitboxes, move_and_collide};

/// Ends invulnerability windows that have run their course.
pub fn refresh_vulnerability(time: Res<WorldTime>, mut healths: Query<&mut Health>) {
    let now = time.elapsed;
    for mut health in healths.iter_mut() {
        if !health.vulnerable {
            health.refresh(now);
        }
    }
}

/// Asset handles shared by weapon and magic spawning.
struct EffectAssets<'a> {
    data: &'a GameData,
    config: &'a GameConfig,
    textures: &'a TextureStore,
}

impl EffectAssets<'_> {
    /// Texture key and size for an effect image, falling back to an
    /// untextured square when the image is missing.
    fn image(&self, relative: &Path) -> (Option<Arc<str>>, i32, i32) {
        match self.textures.get(&self.config.asset_path(relative)) {
            Some(info) => (Some(info.key.clone()), info.width, info.height),
            None => (None, FALLBACK_EFFECT_SIZE, FALLBACK_EFFECT_SIZE),
        }
    }
}

#[allow(clippy::type_complexity)]
pub fn player_control(
    mut commands: Commands,
    time: Res<WorldTime>,
    input: Res<InputState>,
    data: Res<GameData>,
    config: Res<GameConfig>,
    textures: Res<TextureStore>,
    mut groups: ResMut<SpriteGroups>,
    mut players: Query<
        (
            Entity,
            &mut Player,
            &mut Health,
            &mut Heading,
            &mut BoxCollider,
            &mut Animation,
        ),
        Without<Tile>,
    >,
    obstacles: Query<&BoxCollider, (With<Tile>, Without<Player>)>,
) {
    let now = time.elapsed;
    let assets = EffectAssets {
        data: &data,
        config: &config,
        textures: &textures,
    };
    let obstacle_boxes = group_hitboxes(&groups.obstacles, |e| {
        obstacles.get(e).ok().map(|c| c.hitbox)
    });

    for (entity, mut player, mut health, mut heading, mut collider, mut animation) in
        players.iter_mut()
    {
        if !health.alive {
            heading.stop();
            let before = player.state;
            for effect in player.interrupt().into_iter().flatten() {
                commands.entity(effect).try_insert(PendingRemoval);
            }
            if player.state != before {
                animation.restart();
            }
            continue;
        }
        let before = player.state;

        let mut triggers = player.handle_input(&input, &mut heading, now);
        if triggers.attack_started {
            player.weapon_cooldown = data.weapon(player.weapon).cooldown;
            let weapon = spawn_weapon(
                &mut commands,
                &mut groups,
                &assets,
                entity,
                &player,
                heading.facing,
                collider.rect,
            );
            player.equipped_weapon = Some(weapon);
        }
        if triggers.cast_started {
            player.active_magic = cast_magic(
                &mut commands,
                &mut groups,
                &assets,
                entity,
                &mut player,
                &mut health,
                heading.facing,
                collider.rect,
            );
        }

        let (dx, dy) = player.step(&heading);
        if dx != 0 || dy != 0 {
            move_and_collide(&mut collider, dx, dy, &obstacle_boxes);
        }

        player.update_cooldowns(now, &mut triggers);
        if triggers.attack_ended {
            if let Some(weapon) = player.equipped_weapon.take() {
                commands.entity(weapon).try_insert(PendingRemoval);
            }
        }
        if triggers.cast_ended {
            if let Some(magic) = player.active_magic.take() {
                commands.entity(magic).try_insert(PendingRemoval);
            }
        }

        player.settle_state(&heading);
        if player.state != before {
            animation.restart();
        }
    }
}

fn spawn_weapon(
    commands: &mut Commands,
    groups: &mut SpriteGroups,
    assets: &EffectAssets,
    owner: Entity,
    player: &Player,
    facing: Facing,
    player_rect: Rect,
) -> Entity {
    let kind = player.weapon;
    let (key, w, h) = assets.image(&weapon_image_path(kind, facing));
    let rect = weapon_rect(player_rect, facing, w, h);
    let damage = player.stats.attack + assets.data.weapon(kind).damage;
    let weapon = commands
        .spawn((
            Weapon { kind },
            AttackSource { damage, owner },
            BoxCollider::solid(rect),
            Sprite::new(key),
        ))
        .id();
    groups.add(weapon, &[GroupKind::Visible, GroupKind::Attacks]);
    debug!(
        "{} drawn facing {} at {:?} ({} damage)",
        kind.as_str(),
        facing.as_str(),
        rect,
        damage
    );
    weapon
}

/// Spends mana and spawns the selected spell. Without enough mana the cast
/// animation still plays but nothing is spawned.
#[allow(clippy::too_many_arguments)]
fn cast_magic(
    commands: &mut Commands,
    groups: &mut SpriteGroups,
    assets: &EffectAssets,
    owner: Entity,
    player: &mut Player,
    health: &mut Health,
    facing: Facing,
    player_rect: Rect,
) -> Option<Entity> {
    let kind = player.magic;
    let spell = assets.data.magic(kind);
    if !player.use_mana(spell.cost) {
        debug!(
            "Not enough mana for {} ({:.0} < {:.0})",
            kind.as_str(),
            player.mana,
            spell.cost
        );
        return None;
    }

    let (key, w, h) = assets.image(&magic_image_path(kind));
    let rect = magic_rect(player_rect, facing, w, h);
    let mut effect = commands.spawn((Magic { kind }, BoxCollider::solid(rect), Sprite::new(key)));
    let id = effect.id();
    match kind {
        MagicKind::Heal => {
            let healed = health.heal(spell.strength);
            groups.add(id, &[GroupKind::Visible]);
            debug!("Healed {} ({} / {})", healed, health.current, health.maximum);
        }
        MagicKind::Fire => {
            let damage = player.stats.magic + spell.strength;
            effect.insert(AttackSource { damage, owner });
            groups.add(id, &[GroupKind::Visible, GroupKind::Attacks]);
            debug!("Flame cast facing {} ({} damage)", facing.as_str(), damage);
        }
    }
    Some(id)
}
