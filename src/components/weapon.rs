//! Transient combat entities spawned by the player.
//!
//! A weapon exists for the duration of an attack and a magic effect for the
//! duration of a cast. Both are placed next to the player's rect on the side
//! it is facing.

use std::path::PathBuf;

use bevy_ecs::prelude::{Component, Entity};

use crate::components::heading::Facing;
use crate::geometry::Rect;
use crate::resources::gamedata::{MagicKind, WeaponKind};

/// Damage dealt by an entity of the attacks group on contact.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackSource {
    pub damage: i32,
    pub owner: Entity,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weapon {
    pub kind: WeaponKind,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Magic {
    pub kind: MagicKind,
}

/// Image of a weapon held toward `facing`, relative to the assets root.
pub fn weapon_image_path(kind: WeaponKind, facing: Facing) -> PathBuf {
    PathBuf::from(format!(
        "graphics/weapons/{}/{}.png",
        kind.as_str(),
        facing.as_str()
    ))
}

/// HUD icon of a weapon.
pub fn weapon_icon_path(kind: WeaponKind) -> PathBuf {
    PathBuf::from(format!("graphics/weapons/{}/full.png", kind.as_str()))
}

/// Effect image of a spell, also used as its HUD icon.
pub fn magic_image_path(kind: MagicKind) -> PathBuf {
    match kind {
        MagicKind::Fire => PathBuf::from("graphics/particles/flame/fire.png"),
        MagicKind::Heal => PathBuf::from("graphics/particles/heal/heal.png"),
    }
}

/// Weapon rect of size `w × h` held by a player with rect `player`.
pub fn weapon_rect(player: Rect, facing: Facing, w: i32, h: i32) -> Rect {
    match facing {
        Facing::Right => Rect::new(player.right(), player.y + player.h / 2 + 4, w, h),
        Facing::Left => Rect::new(player.x - w, player.y + player.h / 2 + 4, w, h),
        Facing::Down => Rect::new(player.x + player.w / 2 - 27, player.bottom(), w, h),
        Facing::Up => Rect::new(player.x + 9, player.y - h, w, h),
    }
}

/// Magic effect rect of size `w × h` cast by a player with rect `player`.
pub fn magic_rect(player: Rect, facing: Facing, w: i32, h: i32) -> Rect {
    match facing {
        Facing::Right => Rect::new(player.right(), player.y + player.h / 2, w, h),
        Facing::Left => Rect::new(player.x - w, player.y + player.h / 2, w, h),
        Facing::Down => Rect::new(player.x + player.w / 2, player.bottom(), w, h),
        Facing::Up => Rect::new(player.x, player.y - h, w, h),
    }
}
