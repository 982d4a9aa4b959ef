//! Keyboard polling for the windowed frontend.
//!
//! Arrows move, space or tab attacks, E casts, Q swaps the weapon and W
//! swaps the spell. F1 toggles the [`DebugMode`] hitbox overlay.

use bevy_ecs::prelude::*;
use log::info;
use raylib::RaylibHandle;
use raylib::ffi::KeyboardKey;

use crate::resources::debugmode::DebugMode;
use crate::resources::input::{InputAction, InputState};

const BINDINGS: [(KeyboardKey, InputAction); 9] = [
    (KeyboardKey::KEY_UP, InputAction::Up),
    (KeyboardKey::KEY_DOWN, InputAction::Down),
    (KeyboardKey::KEY_LEFT, InputAction::Left),
    (KeyboardKey::KEY_RIGHT, InputAction::Right),
    (KeyboardKey::KEY_SPACE, InputAction::Attack),
    (KeyboardKey::KEY_TAB, InputAction::Attack),
    (KeyboardKey::KEY_E, InputAction::Magic),
    (KeyboardKey::KEY_Q, InputAction::SwapWeapon),
    (KeyboardKey::KEY_W, InputAction::SwapMagic),
];

/// Snapshot of the currently held keys.
pub fn read_input(rl: &RaylibHandle) -> InputState {
    let mut input = InputState::default();
    for (key, action) in BINDINGS {
        if rl.is_key_down(key) {
            input.set(action, true);
        }
    }
    input
}

pub fn handle_debug_toggle(rl: &RaylibHandle, world: &mut World) {
    if !rl.is_key_pressed(KeyboardKey::KEY_F1) {
        return;
    }
    if world.remove_resource::<DebugMode>().is_some() {
        info!("Debug mode off");
    } else {
        world.insert_resource(DebugMode {});
        info!("Debug mode on");
    }
}
