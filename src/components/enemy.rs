//! Enemy AI state: notice/attack radii, attack cooldown, one strike per
//! attack cycle.

use bevy_ecs::prelude::{Component, Entity};

use crate::geometry::Vector2;
use crate::resources::gamedata::{EnemyKind, EnemyStats};

/// Minimum time between two attack starts, seconds.
pub const ENEMY_ATTACK_COOLDOWN: f32 = 0.6;
/// Invulnerability window after an enemy is hit, seconds.
pub const ENEMY_INVULNERABILITY: f32 = 0.6;
/// Knockback distance per point of resistance, pixels.
pub const KNOCKBACK_PER_RESISTANCE: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnemyStatus {
    #[default]
    Idle,
    Move,
    Attack,
}

impl EnemyStatus {
    /// Animation folder name for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyStatus::Idle => "idle",
            EnemyStatus::Move => "move",
            EnemyStatus::Attack => "attack",
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub stats: EnemyStats,
    pub status: EnemyStatus,
    pub attack_cooldown: f32,
    pub last_attack_time: Option<f32>,
    /// Attack animation is running.
    pub attacking: bool,
    pub strike_delivered: bool,
    /// Entity whose [`Health`](crate::components::health::Health) receives
    /// this enemy's strikes.
    pub damage_sink: Entity,
}

impl Enemy {
    pub fn new(kind: EnemyKind, stats: EnemyStats, damage_sink: Entity) -> Self {
        Self {
            kind,
            stats,
            status: EnemyStatus::Idle,
            attack_cooldown: ENEMY_ATTACK_COOLDOWN,
            last_attack_time: None,
            attacking: false,
            strike_delivered: false,
            damage_sink,
        }
    }

    pub fn can_attack(&self, now: f32) -> bool {
        self.last_attack_time
            .is_none_or(|t| now - t >= self.attack_cooldown)
    }

    /// Picks the status for the current distance to the target.
    ///
    /// Returns `true` when the animation should restart (status changed or a
    /// new attack cycle began).
    pub fn update_status(&mut self, distance: f32, now: f32) -> bool {
        let before = self.status;
        if self.attacking {
            self.status = EnemyStatus::Attack;
            return before != self.status;
        }

        if distance <= self.stats.attack_radius as f32 {
            if self.can_attack(now) {
                self.status = EnemyStatus::Attack;
                self.attacking = true;
                self.strike_delivered = false;
                self.last_attack_time = Some(now);
                return true;
            }
            self.status = EnemyStatus::Idle;
        } else if distance <= self.stats.notice_radius as f32 {
            self.status = EnemyStatus::Move;
        } else {
            self.status = EnemyStatus::Idle;
        }
        before != self.status
    }

    /// Ends the running attack cycle.
    pub fn finish_attack(&mut self) {
        self.attacking = false;
        self.status = EnemyStatus::Idle;
    }

    /// Damage of the pending strike, at most once per attack cycle.
    pub fn take_strike(&mut self) -> Option<i32> {
        if self.status == EnemyStatus::Attack && self.attacking && !self.strike_delivered {
            self.strike_delivered = true;
            Some(self.stats.damage)
        } else {
            None
        }
    }

    /// Movement for this tick toward `direction`, truncated toward zero.
    pub fn step(&self, direction: Vector2) -> (i32, i32) {
        if self.status != EnemyStatus::Move {
            return (0, 0);
        }
        let delta = direction * self.stats.speed as f32;
        (delta.x as i32, delta.y as i32)
    }

    /// Displacement applied when hit, given the unit vector away from the
    /// attacker.
    pub fn knockback(&self, away: Vector2) -> (i32, i32) {
        let delta = away * (self.stats.resistance as f32 * KNOCKBACK_PER_RESISTANCE);
        (delta.x as i32, delta.y as i32)
    }

    /// Animation track, e.g. `squid/move`.
    pub fn animation_track(&self) -> String {
        format!("{}/{}", self.kind.as_str(), self.status.as_str())
    }
}

/// Distance between two centers and the unit direction from `from` to `to`
/// (zero when they coincide).
pub fn distance_and_direction(from: Vector2, to: Vector2) -> (f32, Vector2) {
    let delta = to - from;
    let distance = delta.length();
    if distance > 0.0 {
        (distance, delta.normalized())
    } else {
        (0.0, Vector2::zero())
    }
}
