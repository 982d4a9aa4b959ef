//! Game systems.
//!
//! Everything in the per-frame schedule plus the draw passes that run after
//! it.
//!
//! Submodules overview
//! - [`animation`] – advance frame cursors, refresh textures, blink while invulnerable
//! - [`camera`] – keep the camera centered on the player
//! - [`collision`] – axis-separated move-and-resolve against obstacle hitboxes
//! - [`combat`] – player attacks vs attackables, enemy strikes vs the damage sink
//! - [`enemy`] – enemy status selection and pursuit
//! - [`hud`] – health/mana bars, experience counter, item boxes
//! - `input` – read the keyboard into [`crate::resources::input::InputState`] (feature `window`)
//! - [`player`] – player input handling, weapon and magic spawning, movement
//! - [`prune`] – end-of-frame removal of dead and expired entities
//! - [`render`] – culled, y-sorted world pass through the `Canvas` trait
//! - [`time`] – advance the simulation clock

pub mod animation;
pub mod camera;
pub mod collision;
pub mod combat;
pub mod enemy;
pub mod hud;
#[cfg(feature = "window")]
pub mod input;
pub mod player;
pub mod prune;
pub mod render;
pub mod time;
