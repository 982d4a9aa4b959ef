//! Event types and observers used by the game.
//!
//! Events provide a decoupled way for systems to communicate: the combat
//! systems trigger them through `Commands`, and the observers registered by
//! the level react once the commands are applied.
//!
//! Submodules:
//! - [`combat`] – enemy defeated and player hurt notifications
pub mod combat;
