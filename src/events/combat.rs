//! Combat outcome events and their observers.
//!
//! The combat systems only decide *that* something happened; consequences
//! that touch other entities are handled here:
//!
//! - [`EnemyDefeatedEvent`] → [`observe_enemy_defeated`] grants the enemy's
//!   experience to the player.
//! - [`PlayerHurtEvent`] → [`observe_player_hurt`] logs the hit (and the
//!   player's death).
//!
//! Both are registered on the level world with `world.add_observer(...)`.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::health::{DamageOutcome, Health};
use crate::components::player::Player;
use crate::resources::gamedata::EnemyKind;

/// Fired when a player attack reduces an enemy's health to zero.
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyDefeatedEvent {
    pub enemy: Entity,
    pub kind: EnemyKind,
    pub exp: u32,
}

/// Fired when an enemy strike lands on its damage sink.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerHurtEvent {
    pub source: Entity,
    pub target: Entity,
    pub damage: i32,
    pub outcome: DamageOutcome,
}

/// Adds the defeated enemy's experience to every player.
pub fn observe_enemy_defeated(trigger: On<EnemyDefeatedEvent>, mut players: Query<&mut Player>) {
    let event = trigger.event();
    for mut player in players.iter_mut() {
        player.exp += event.exp;
        info!(
            "{} {:?} defeated: +{} exp (total {})",
            event.kind, event.enemy, event.exp, player.exp
        );
    }
}

pub fn observe_player_hurt(trigger: On<PlayerHurtEvent>, targets: Query<&Health>) {
    let event = trigger.event();
    let remaining = targets.get(event.target).map(|h| h.current).unwrap_or(0);
    match event.outcome {
        DamageOutcome::Killed => info!(
            "Player {:?} killed by {:?} ({} damage)",
            event.target, event.source, event.damage
        ),
        _ => debug!(
            "Player {:?} hit by {:?} for {} ({} left)",
            event.target, event.source, event.damage, remaining
        ),
    }
}
