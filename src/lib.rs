//! Dōkutsu library.
//!
//! Top-down action game simulation: map loading, player and enemy state
//! machines, axis-separated collision and sprite-group combat, all driven by
//! a `bevy_ecs` schedule. Exposed as a library for integration tests and the
//! headless runner; the raylib frontend lives behind the `window` feature.

pub mod components;
pub mod error;
pub mod events;
#[cfg(feature = "window")]
pub mod frontend;
pub mod game;
pub mod geometry;
pub mod resources;
pub mod systems;
