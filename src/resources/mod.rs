//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: input state, timing, sprite groups,
//! asset metadata and balance tables. Each submodule documents the semantics
//! and intended usage of its resource(s).
//!
//! Overview
//! - `animationstore` – frame lists for every player and enemy track
//! - `assets` – image metadata loading behind the `ImageLoader` trait
//! - `camera2d` – integer camera offset shared by rendering and the HUD
//! - `debugmode` – presence toggles hitbox overlays
//! - `gameconfig` – INI-backed window, asset and seed settings
//! - `gamedata` – player, monster, weapon and magic tables (JSON)
//! - `group` – the visible/obstacles/attackable/attacks sprite groups
//! - `input` – per-frame snapshot of held actions
//! - `texturestore` – metadata for tiles, weapons, magic and HUD icons
//! - `tilemap` – CSV map layers
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod assets;
pub mod camera2d;
pub mod debugmode;
pub mod gameconfig;
pub mod gamedata;
pub mod group;
pub mod input;
pub mod texturestore;
pub mod tilemap;
pub mod worldtime;
