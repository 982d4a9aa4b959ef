//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the game world. Each entity kind is a fixed bundle of them:
//!
//! - player: `Player`, `Health`, `BoxCollider`, `Heading`, `Animation`, `Sprite`
//! - enemy: `Enemy`, `Health`, `BoxCollider`, `Heading`, `Animation`, `Sprite`
//! - tile: `Tile`, `BoxCollider`, `Sprite`, optionally `Destructible`
//! - weapon/magic: `Weapon` or `Magic`, `BoxCollider`, `Sprite`, optionally
//!   `AttackSource`
//!
//! Submodules overview:
//! - [`animation`] – fractional frame cursor over a named track
//! - [`boxcollider`] – visual rect plus inset hitbox
//! - [`enemy`] – enemy AI status, attack cooldown and strike bookkeeping
//! - [`heading`] – normalized movement direction and four-way facing
//! - [`health`] – hit points, vulnerability windows, the `DamageSink` trait
//! - [`pendingremoval`] – marker consumed by the end-of-frame prune
//! - [`player`] – player action state machine
//! - [`sprite`] – texture key and alpha for rendering
//! - [`tile`] – static map tiles and the destructible marker
//! - [`weapon`] – weapons, magic effects and attack sources

pub mod animation;
pub mod boxcollider;
pub mod enemy;
pub mod heading;
pub mod health;
pub mod pendingremoval;
pub mod player;
pub mod sprite;
pub mod tile;
pub mod weapon;
