//! Health, vulnerability windows and the damage-sink capability.
//!
//! Any entity carrying [`Health`] is damageable. Enemies deliver damage to
//! the player through the [`DamageSink`] trait rather than through a direct
//! dependency on the player type.

use bevy_ecs::prelude::Component;

/// Result of a single damage application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was invulnerable or already dead; nothing changed.
    Ignored,
    /// Damage applied, target still alive.
    Wounded { remaining: i32 },
    /// Damage applied and health reached zero.
    Killed,
}

impl DamageOutcome {
    pub fn landed(&self) -> bool {
        !matches!(self, DamageOutcome::Ignored)
    }
}

/// Capability to receive damage.
pub trait DamageSink {
    /// Applies `amount` damage at time `now` (seconds).
    fn apply_damage(&mut self, amount: i32, now: f32) -> DamageOutcome;
}

/// Hit points plus the invulnerability window started by each accepted hit.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    pub current: i32,
    pub maximum: i32,
    pub alive: bool,
    pub vulnerable: bool,
    /// Time of the last accepted hit, in seconds.
    pub hurt_time: f32,
    /// Length of the invulnerability window, in seconds.
    pub invulnerability: f32,
}

impl Health {
    pub fn new(maximum: i32, invulnerability: f32) -> Self {
        Self {
            current: maximum,
            maximum,
            alive: maximum > 0,
            vulnerable: true,
            hurt_time: 0.0,
            invulnerability,
        }
    }

    /// Subtracts `amount` unless the target is invulnerable or dead.
    ///
    /// Health is clamped at zero; reaching zero marks the target dead. Every
    /// accepted hit starts a new invulnerability window at `now`.
    pub fn take_damage(&mut self, amount: i32, now: f32) -> DamageOutcome {
        if !self.alive || !self.vulnerable {
            return DamageOutcome::Ignored;
        }
        self.current = (self.current - amount.max(0)).max(0);
        self.vulnerable = false;
        self.hurt_time = now;
        if self.current == 0 {
            self.alive = false;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Wounded {
                remaining: self.current,
            }
        }
    }

    /// Ends the invulnerability window once `invulnerability` seconds have
    /// passed since the last hit.
    pub fn refresh(&mut self, now: f32) {
        if !self.vulnerable && now - self.hurt_time >= self.invulnerability {
            self.vulnerable = true;
        }
    }

    /// Restores health up to the maximum. Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.alive {
            return 0;
        }
        let before = self.current;
        self.current = (self.current + amount.max(0)).min(self.maximum);
        self.current - before
    }

    pub fn ratio(&self) -> f32 {
        if self.maximum <= 0 {
            0.0
        } else {
            self.current as f32 / self.maximum as f32
        }
    }
}

impl DamageSink for Health {
    fn apply_damage(&mut self, amount: i32, now: f32) -> DamageOutcome {
        self.take_damage(amount, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_below_health_wounds() {
        let mut h = Health::new(100, 0.6);
        assert_eq!(
            h.take_damage(30, 1.0),
            DamageOutcome::Wounded { remaining: 70 }
        );
        assert!(h.alive);
        assert!(!h.vulnerable);
        assert_eq!(h.current, 70);
    }

    #[test]
    fn damage_at_or_above_health_kills() {
        let mut exact = Health::new(50, 0.6);
        assert_eq!(exact.take_damage(50, 0.0), DamageOutcome::Killed);
        assert_eq!(exact.current, 0);
        assert!(!exact.alive);

        let mut over = Health::new(50, 0.6);
        assert_eq!(over.take_damage(80, 0.0), DamageOutcome::Killed);
        assert_eq!(over.current, 0);
        assert!(!over.alive);
    }

    #[test]
    fn invulnerable_target_ignores_damage() {
        let mut h = Health::new(100, 0.5);
        h.take_damage(10, 0.0);
        assert_eq!(h.take_damage(10, 0.25), DamageOutcome::Ignored);
        assert_eq!(h.current, 90);
    }

    #[test]
    fn vulnerability_returns_only_after_window() {
        let mut h = Health::new(100, 0.5);
        h.take_damage(10, 2.0);
        h.refresh(2.25);
        assert!(!h.vulnerable);
        h.refresh(2.5);
        assert!(h.vulnerable);
    }

    #[test]
    fn heal_clamps_to_maximum() {
        let mut h = Health::new(100, 0.5);
        h.take_damage(15, 0.0);
        assert_eq!(h.heal(20), 15);
        assert_eq!(h.current, 100);
    }

    #[test]
    fn damage_sink_forwards_to_take_damage() {
        let mut h = Health::new(40, 0.5);
        let sink: &mut dyn DamageSink = &mut h;
        assert_eq!(sink.apply_damage(40, 0.0), DamageOutcome::Killed);
    }
}
