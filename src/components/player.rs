//! Player action state machine.
//!
//! The [`Player`] component owns everything that decides *what* the player
//! is doing: the action state, cooldown timestamps, selected weapon and
//! magic, mana and experience. Systems in [`crate::systems::player`] feed it
//! the input snapshot and carry out the side effects it requests (spawning
//! and removing weapon/magic entities, moving the collider).
//!
//! # States
//!
//! - `Idle` / `Moving` follow directional input.
//! - `Attacking` starts on a fresh attack press and lasts
//!   [`Player::attack_cooldown`] seconds.
//! - `Casting` starts on a fresh magic press and lasts [`CAST_COOLDOWN`].
//!
//! Movement input is ignored while attacking or casting, and the facing is
//! frozen.

use bevy_ecs::prelude::{Component, Entity};

use crate::components::heading::{Facing, Heading};
use crate::geometry::Vector2;
use crate::resources::gamedata::{MagicKind, PlayerStats, WeaponKind};
use crate::resources::input::{InputAction, InputState};

/// Base attack duration before the weapon's own cooldown is added, seconds.
pub const BASE_ATTACK_COOLDOWN: f32 = 0.4;
/// Cast duration, seconds.
pub const CAST_COOLDOWN: f32 = 0.6;
/// Minimum time between two weapon (or magic) swaps, seconds.
pub const SWAP_COOLDOWN: f32 = 0.4;
/// Invulnerability window after the player is hit, seconds.
pub const PLAYER_INVULNERABILITY: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Moving,
    Attacking,
    Casting,
}

/// Side effects requested by one player update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerTriggers {
    pub attack_started: bool,
    pub cast_started: bool,
    pub attack_ended: bool,
    pub cast_ended: bool,
}

#[derive(Component, Debug, Clone)]
pub struct Player {
    pub state: ActionState,
    pub stats: PlayerStats,
    pub mana: f32,
    pub exp: u32,
    pub weapon: WeaponKind,
    pub magic: MagicKind,
    /// Cooldown of the weapon used by the current (or last) attack.
    pub weapon_cooldown: f32,
    pub attack_time: f32,
    pub cast_time: f32,
    pub weapon_swap_time: Option<f32>,
    pub magic_swap_time: Option<f32>,
    pub attack_held: bool,
    pub magic_held: bool,
    pub equipped_weapon: Option<Entity>,
    pub active_magic: Option<Entity>,
}

impl Player {
    pub fn new(stats: PlayerStats) -> Self {
        Self {
            state: ActionState::Idle,
            mana: stats.mana,
            stats,
            exp: 0,
            weapon: WeaponKind::Sword,
            magic: MagicKind::Fire,
            weapon_cooldown: 0.0,
            attack_time: 0.0,
            cast_time: 0.0,
            weapon_swap_time: None,
            magic_swap_time: None,
            attack_held: false,
            magic_held: false,
            equipped_weapon: None,
            active_magic: None,
        }
    }

    /// Total duration of the Attacking state for the current weapon.
    pub fn attack_cooldown(&self) -> f32 {
        BASE_ATTACK_COOLDOWN + self.weapon_cooldown
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, ActionState::Attacking | ActionState::Casting)
    }

    pub fn is_swapping_weapon(&self, now: f32) -> bool {
        self.weapon_swap_time.is_some_and(|t| now - t < SWAP_COOLDOWN)
    }

    pub fn is_swapping_magic(&self, now: f32) -> bool {
        self.magic_swap_time.is_some_and(|t| now - t < SWAP_COOLDOWN)
    }

    /// Consumes the input snapshot.
    ///
    /// Attack and magic are edge-triggered through the held latches, so
    /// holding the button does not retrigger once the action ends.
    pub fn handle_input(
        &mut self,
        input: &InputState,
        heading: &mut Heading,
        now: f32,
    ) -> PlayerTriggers {
        let mut triggers = PlayerTriggers::default();
        heading.stop();

        let attack_down = input.is_held(InputAction::Attack);
        if attack_down && !self.attack_held && !self.is_busy() {
            self.state = ActionState::Attacking;
            self.attack_time = now;
            triggers.attack_started = true;
        }
        self.attack_held = attack_down;

        let magic_down = input.is_held(InputAction::Magic);
        if magic_down && !self.magic_held && !self.is_busy() {
            self.state = ActionState::Casting;
            self.cast_time = now;
            triggers.cast_started = true;
        }
        self.magic_held = magic_down;

        if !self.is_busy() {
            heading.set_direction(input.direction());
        }

        if input.is_held(InputAction::SwapWeapon) && !self.is_swapping_weapon(now) {
            self.weapon = self.weapon.next();
            self.weapon_swap_time = Some(now);
        }
        if input.is_held(InputAction::SwapMagic) && !self.is_swapping_magic(now) {
            self.magic = self.magic.next();
            self.magic_swap_time = Some(now);
        }

        triggers
    }

    /// Ends attacks and casts whose duration elapsed.
    pub fn update_cooldowns(&mut self, now: f32, triggers: &mut PlayerTriggers) {
        if self.state == ActionState::Attacking && now - self.attack_time >= self.attack_cooldown()
        {
            self.state = ActionState::Idle;
            triggers.attack_ended = true;
        }
        if self.state == ActionState::Casting && now - self.cast_time >= CAST_COOLDOWN {
            self.state = ActionState::Idle;
            triggers.cast_ended = true;
        }
    }

    /// Drops any attack or cast in progress and returns the weapon and
    /// magic entities it was using, for the caller to remove.
    pub fn interrupt(&mut self) -> [Option<Entity>; 2] {
        self.state = ActionState::Idle;
        [self.equipped_weapon.take(), self.active_magic.take()]
    }

    /// Whether `source` is the weapon of the attack in progress or the spell
    /// of the cast in progress.
    pub fn wields(&self, source: Entity) -> bool {
        match self.state {
            ActionState::Attacking => self.equipped_weapon == Some(source),
            ActionState::Casting => self.active_magic == Some(source),
            ActionState::Idle | ActionState::Moving => false,
        }
    }

    /// Derives Idle/Moving from the heading when not busy.
    pub fn settle_state(&mut self, heading: &Heading) {
        if !self.is_busy() {
            self.state = if heading.is_moving() {
                ActionState::Moving
            } else {
                ActionState::Idle
            };
        }
    }

    /// Spends mana if enough is available.
    pub fn use_mana(&mut self, amount: f32) -> bool {
        if self.mana >= amount {
            self.mana -= amount;
            true
        } else {
            false
        }
    }

    pub fn mana_ratio(&self) -> f32 {
        if self.stats.mana <= 0.0 {
            0.0
        } else {
            (self.mana / self.stats.mana).clamp(0.0, 1.0)
        }
    }

    /// Animation track for the current state, e.g. `player/down_attack`.
    pub fn animation_track(&self, facing: Facing) -> String {
        let facing = facing.as_str();
        match self.state {
            ActionState::Attacking | ActionState::Casting => format!("player/{facing}_attack"),
            ActionState::Moving => format!("player/{facing}"),
            ActionState::Idle => format!("player/{facing}_idle"),
        }
    }

    /// Movement for this tick in whole pixels, truncated toward zero.
    pub fn step(&self, heading: &Heading) -> (i32, i32) {
        if self.is_busy() {
            return (0, 0);
        }
        let delta: Vector2 = heading.direction * self.stats.speed;
        (delta.x as i32, delta.y as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(actions: &[InputAction]) -> InputState {
        let mut input = InputState::default();
        for action in actions {
            input.set(*action, true);
        }
        input
    }

    fn tick(
        player: &mut Player,
        heading: &mut Heading,
        input: &InputState,
        now: f32,
    ) -> PlayerTriggers {
        let mut triggers = player.handle_input(input, heading, now);
        player.update_cooldowns(now, &mut triggers);
        player.settle_state(heading);
        triggers
    }

    #[test]
    fn directional_input_moves_and_faces() {
        let mut p = Player::new(PlayerStats::default());
        let mut h = Heading::default();
        tick(&mut p, &mut h, &input(&[InputAction::Left]), 0.0);
        assert_eq!(p.state, ActionState::Moving);
        assert_eq!(h.facing, Facing::Left);
        assert_eq!(p.step(&h), (-5, 0));

        tick(&mut p, &mut h, &InputState::default(), 0.1);
        assert_eq!(p.state, ActionState::Idle);
        assert_eq!(p.step(&h), (0, 0));
    }

    #[test]
    fn attack_lasts_exactly_the_attack_cooldown() {
        let mut p = Player::new(PlayerStats::default());
        p.weapon_cooldown = 0.125;
        let mut h = Heading::default();
        let held = input(&[InputAction::Attack, InputAction::Right]);

        let t = tick(&mut p, &mut h, &held, 0.0);
        assert!(t.attack_started);
        assert_eq!(p.state, ActionState::Attacking);
        assert_eq!(p.step(&h), (0, 0));

        let cooldown = p.attack_cooldown();
        let t = tick(&mut p, &mut h, &held, cooldown - 0.01);
        assert!(!t.attack_ended);
        assert_eq!(p.state, ActionState::Attacking);
        assert_eq!(h.facing, Facing::Down);

        let t = tick(&mut p, &mut h, &held, cooldown);
        assert!(t.attack_ended);
        assert_eq!(p.state, ActionState::Idle);
    }

    #[test]
    fn held_attack_does_not_retrigger() {
        let mut p = Player::new(PlayerStats::default());
        let mut h = Heading::default();
        let held = input(&[InputAction::Attack]);
        assert!(tick(&mut p, &mut h, &held, 0.0).attack_started);
        tick(&mut p, &mut h, &held, 1.0);
        assert_eq!(p.state, ActionState::Idle);
        assert!(!tick(&mut p, &mut h, &held, 1.1).attack_started);

        tick(&mut p, &mut h, &InputState::default(), 1.2);
        assert!(tick(&mut p, &mut h, &held, 1.3).attack_started);
    }

    #[test]
    fn casting_excludes_attacking() {
        let mut p = Player::new(PlayerStats::default());
        let mut h = Heading::default();
        let t = tick(&mut p, &mut h, &input(&[InputAction::Magic]), 0.0);
        assert!(t.cast_started);
        assert_eq!(p.state, ActionState::Casting);

        let t = tick(&mut p, &mut h, &input(&[InputAction::Attack, InputAction::Magic]), 0.25);
        assert!(!t.attack_started);
        assert_eq!(p.state, ActionState::Casting);

        let t = tick(&mut p, &mut h, &InputState::default(), CAST_COOLDOWN);
        assert!(t.cast_ended);
        assert_eq!(p.state, ActionState::Idle);
    }

    #[test]
    fn simultaneous_presses_prefer_attack() {
        let mut p = Player::new(PlayerStats::default());
        let mut h = Heading::default();
        let t = tick(&mut p, &mut h, &input(&[InputAction::Attack, InputAction::Magic]), 0.0);
        assert!(t.attack_started);
        assert!(!t.cast_started);
        assert_eq!(p.state, ActionState::Attacking);
    }

    #[test]
    fn weapon_swap_respects_cooldown() {
        let mut p = Player::new(PlayerStats::default());
        let mut h = Heading::default();
        let swap = input(&[InputAction::SwapWeapon]);
        tick(&mut p, &mut h, &swap, 0.0);
        assert_eq!(p.weapon, WeaponKind::Lance);
        tick(&mut p, &mut h, &swap, 0.25);
        assert_eq!(p.weapon, WeaponKind::Lance);
        tick(&mut p, &mut h, &swap, 0.5);
        assert_eq!(p.weapon, WeaponKind::Rapier);
    }

    #[test]
    fn mana_is_only_spent_when_available() {
        let mut p = Player::new(PlayerStats::default());
        assert!(p.use_mana(50.0));
        assert!(!p.use_mana(20.0));
        assert_eq!(p.mana, 10.0);
    }

    #[test]
    fn interrupt_releases_effects_and_stops_wielding() {
        let mut world = bevy_ecs::world::World::new();
        let weapon = world.spawn_empty().id();
        let mut p = Player::new(PlayerStats::default());
        let mut h = Heading::default();
        tick(&mut p, &mut h, &input(&[InputAction::Attack]), 0.0);
        p.equipped_weapon = Some(weapon);
        assert!(p.wields(weapon));

        assert_eq!(p.interrupt(), [Some(weapon), None]);
        assert_eq!(p.state, ActionState::Idle);
        assert!(!p.wields(weapon));
        assert_eq!(p.interrupt(), [None, None]);
    }

    #[test]
    fn animation_track_reflects_state() {
        let mut p = Player::new(PlayerStats::default());
        assert_eq!(p.animation_track(Facing::Down), "player/down_idle");
        p.state = ActionState::Moving;
        assert_eq!(p.animation_track(Facing::Left), "player/left");
        p.state = ActionState::Casting;
        assert_eq!(p.animation_track(Facing::Up), "player/up_attack");
    }
}
