//! Per-frame input snapshot.
//!
//! The simulation only ever asks "is this action held right now?". Edge
//! detection for attack and magic lives in the player's held latches, so no
//! pressed/released bookkeeping is kept here. The windowed frontend fills the
//! snapshot from the keyboard each frame (arrows to move, space or tab to
//! attack, E to cast, Q/W to swap weapon and magic).

use bevy_ecs::prelude::Resource;

use crate::geometry::Vector2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Up,
    Down,
    Left,
    Right,
    Attack,
    Magic,
    SwapWeapon,
    SwapMagic,
}

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub attack: bool,
    pub magic: bool,
    pub swap_weapon: bool,
    pub swap_magic: bool,
}

impl InputState {
    /// Builder form of [`InputState::set`].
    pub fn with(mut self, action: InputAction) -> Self {
        self.set(action, true);
        self
    }

    pub fn set(&mut self, action: InputAction, held: bool) {
        *self.slot(action) = held;
    }

    pub fn is_held(&self, action: InputAction) -> bool {
        match action {
            InputAction::Up => self.up,
            InputAction::Down => self.down,
            InputAction::Left => self.left,
            InputAction::Right => self.right,
            InputAction::Attack => self.attack,
            InputAction::Magic => self.magic,
            InputAction::SwapWeapon => self.swap_weapon,
            InputAction::SwapMagic => self.swap_magic,
        }
    }

    /// Raw (unnormalized) movement direction. Up wins over down and left over
    /// right when both are held.
    pub fn direction(&self) -> Vector2 {
        let x = if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        };
        let y = if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        };
        Vector2::new(x, y)
    }

    fn slot(&mut self, action: InputAction) -> &mut bool {
        match action {
            InputAction::Up => &mut self.up,
            InputAction::Down => &mut self.down,
            InputAction::Left => &mut self.left,
            InputAction::Right => &mut self.right,
            InputAction::Attack => &mut self.attack,
            InputAction::Magic => &mut self.magic,
            InputAction::SwapWeapon => &mut self.swap_weapon,
            InputAction::SwapMagic => &mut self.swap_magic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposing_keys_resolve_to_up_and_left() {
        let input = InputState::default()
            .with(InputAction::Up)
            .with(InputAction::Down)
            .with(InputAction::Left)
            .with(InputAction::Right);
        assert_eq!(input.direction(), Vector2::new(-1.0, -1.0));
    }

    #[test]
    fn set_and_query_round_trip() {
        let mut input = InputState::default();
        input.set(InputAction::SwapMagic, true);
        assert!(input.is_held(InputAction::SwapMagic));
        input.set(InputAction::SwapMagic, false);
        assert_eq!(input, InputState::default());
    }
}
