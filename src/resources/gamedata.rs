//! Game balance tables: player stats, monsters, weapons and magic.
//!
//! [`GameData`] ships with built-in defaults and can be replaced by a JSON
//! file (see `--data` / `--dump-data` in the binary).
//!
//! # JSON layout
//!
//! ```json
//! {
//!   "player": { "health": 100, "mana": 60, "attack": 10, "magic": 4, "speed": 5 },
//!   "monsters": { "squid": { "health": 100, "exp": 100, "damage": 20, ... } },
//!   "weapons": { "sword": { "cooldown": 0.1, "damage": 15 } },
//!   "magic": { "fire": { "strength": 5, "cost": 20 } }
//! }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, LevelError};

/// Edge length of a map cell in pixels.
pub const TILE_SIZE: i32 = 64;

/// Size used for weapon and magic sprites whose image is missing.
pub const FALLBACK_EFFECT_SIZE: i32 = 40;

/// Enemy type tag selecting a stat block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Squid,
    Raccoon,
    Spirit,
    Bamboo,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Squid,
        EnemyKind::Raccoon,
        EnemyKind::Spirit,
        EnemyKind::Bamboo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Squid => "squid",
            EnemyKind::Raccoon => "raccoon",
            EnemyKind::Spirit => "spirit",
            EnemyKind::Bamboo => "bamboo",
        }
    }

    /// Enemy spawned by an entities-layer map code.
    pub fn from_map_code(code: i32) -> Option<EnemyKind> {
        match code {
            390 => Some(EnemyKind::Bamboo),
            391 => Some(EnemyKind::Spirit),
            392 => Some(EnemyKind::Raccoon),
            393 => Some(EnemyKind::Squid),
            _ => None,
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnemyKind {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnemyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| LevelError::UnknownEnemyType(s.to_string()))
    }
}

/// Entities-layer code that marks the player spawn.
pub const PLAYER_MAP_CODE: i32 = 394;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub health: i32,
    pub exp: u32,
    pub damage: i32,
    pub attack_type: String,
    pub speed: i32,
    pub resistance: i32,
    pub attack_radius: i32,
    pub notice_radius: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    Sword,
    Lance,
    Rapier,
    Sai,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::Sword,
        WeaponKind::Lance,
        WeaponKind::Rapier,
        WeaponKind::Sai,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponKind::Sword => "sword",
            WeaponKind::Lance => "lance",
            WeaponKind::Rapier => "rapier",
            WeaponKind::Sai => "sai",
        }
    }

    /// Next weapon in the swap rotation.
    pub fn next(&self) -> WeaponKind {
        let i = WeaponKind::ALL.iter().position(|k| k == self).unwrap_or(0);
        WeaponKind::ALL[(i + 1) % WeaponKind::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponData {
    /// Extra attack duration on top of the player's base cooldown, seconds.
    pub cooldown: f32,
    pub damage: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MagicKind {
    Fire,
    Heal,
}

impl MagicKind {
    pub const ALL: [MagicKind; 2] = [MagicKind::Fire, MagicKind::Heal];

    pub fn as_str(&self) -> &'static str {
        match self {
            MagicKind::Fire => "fire",
            MagicKind::Heal => "heal",
        }
    }

    pub fn next(&self) -> MagicKind {
        match self {
            MagicKind::Fire => MagicKind::Heal,
            MagicKind::Heal => MagicKind::Fire,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagicData {
    pub strength: i32,
    pub cost: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub health: i32,
    pub mana: f32,
    pub attack: i32,
    pub magic: i32,
    pub speed: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            health: 100,
            mana: 60.0,
            attack: 10,
            magic: 4,
            speed: 5.0,
        }
    }
}

/// Balance tables shared by spawning and combat.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameData {
    pub player: PlayerStats,
    pub monsters: FxHashMap<EnemyKind, EnemyStats>,
    pub weapons: FxHashMap<WeaponKind, WeaponData>,
    pub magic: FxHashMap<MagicKind, MagicData>,
}

impl Default for GameData {
    fn default() -> Self {
        let mut monsters = FxHashMap::default();
        monsters.insert(
            EnemyKind::Squid,
            monster(100, 100, 20, "slash", 3, 3, 80, 360),
        );
        monsters.insert(
            EnemyKind::Raccoon,
            monster(300, 250, 40, "claw", 2, 3, 120, 400),
        );
        monsters.insert(
            EnemyKind::Spirit,
            monster(100, 110, 8, "thunder", 4, 3, 60, 350),
        );
        monsters.insert(
            EnemyKind::Bamboo,
            monster(70, 120, 6, "leaf_attack", 3, 3, 50, 300),
        );

        let mut weapons = FxHashMap::default();
        weapons.insert(WeaponKind::Sword, weapon(0.1, 15));
        weapons.insert(WeaponKind::Lance, weapon(0.4, 30));
        weapons.insert(WeaponKind::Rapier, weapon(0.05, 8));
        weapons.insert(WeaponKind::Sai, weapon(0.08, 10));

        let mut magic = FxHashMap::default();
        magic.insert(
            MagicKind::Fire,
            MagicData {
                strength: 5,
                cost: 20.0,
            },
        );
        magic.insert(
            MagicKind::Heal,
            MagicData {
                strength: 20,
                cost: 10.0,
            },
        );

        Self {
            player: PlayerStats::default(),
            monsters,
            weapons,
            magic,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn monster(
    health: i32,
    exp: u32,
    damage: i32,
    attack_type: &str,
    speed: i32,
    resistance: i32,
    attack_radius: i32,
    notice_radius: i32,
) -> EnemyStats {
    EnemyStats {
        health,
        exp,
        damage,
        attack_type: attack_type.to_string(),
        speed,
        resistance,
        attack_radius,
        notice_radius,
    }
}

fn weapon(cooldown: f32, damage: i32) -> WeaponData {
    WeaponData { cooldown, damage }
}

impl GameData {
    /// Stat block for an enemy type. Missing entries are a content bug.
    pub fn monster(&self, kind: EnemyKind) -> Result<&EnemyStats, LevelError> {
        self.monsters
            .get(&kind)
            .ok_or_else(|| LevelError::MissingStats(kind.to_string()))
    }

    /// Weapon entry, falling back to a zero-cooldown, zero-damage weapon.
    pub fn weapon(&self, kind: WeaponKind) -> WeaponData {
        self.weapons.get(&kind).copied().unwrap_or(WeaponData {
            cooldown: 0.0,
            damage: 0,
        })
    }

    pub fn magic(&self, kind: MagicKind) -> MagicData {
        self.magic.get(&kind).copied().unwrap_or(MagicData {
            strength: 0,
            cost: 0.0,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::DataIo {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_json(&json)?;
        info!(
            "Loaded game data from {:?}: {} monsters, {} weapons, {} spells",
            path,
            data.monsters.len(),
            data.weapons.len(),
            data.magic.len()
        );
        Ok(data)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|source| ConfigError::DataIo {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_codes_select_enemies() {
        assert_eq!(EnemyKind::from_map_code(393), Some(EnemyKind::Squid));
        assert_eq!(EnemyKind::from_map_code(390), Some(EnemyKind::Bamboo));
        assert_eq!(EnemyKind::from_map_code(394), None);
        assert_eq!(EnemyKind::from_map_code(12), None);
    }

    #[test]
    fn unknown_type_tag_is_rejected() {
        assert_eq!("raccoon".parse::<EnemyKind>().unwrap(), EnemyKind::Raccoon);
        let err = "dragon".parse::<EnemyKind>().unwrap_err();
        assert!(matches!(err, LevelError::UnknownEnemyType(ref t) if t == "dragon"));
    }

    #[test]
    fn default_tables_cover_every_kind() {
        let data = GameData::default();
        for kind in EnemyKind::ALL {
            assert!(data.monster(kind).is_ok());
        }
        assert_eq!(data.monster(EnemyKind::Squid).unwrap().health, 100);
        assert_eq!(data.weapon(WeaponKind::Lance).damage, 30);
        assert_eq!(data.magic(MagicKind::Heal).strength, 20);
    }

    #[test]
    fn missing_stat_block_is_an_error() {
        let mut data = GameData::default();
        data.monsters.remove(&EnemyKind::Spirit);
        assert!(matches!(
            data.monster(EnemyKind::Spirit),
            Err(LevelError::MissingStats(_))
        ));
    }

    #[test]
    fn weapon_rotation_wraps() {
        assert_eq!(WeaponKind::Sword.next(), WeaponKind::Lance);
        assert_eq!(WeaponKind::Sai.next(), WeaponKind::Sword);
        assert_eq!(MagicKind::Heal.next(), MagicKind::Fire);
    }

    #[test]
    fn json_round_trip_preserves_tables() {
        let data = GameData::default();
        let json = data.to_json().unwrap();
        assert!(json.contains("\"squid\""));
        assert_eq!(GameData::from_json(&json).unwrap(), data);
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            GameData::from_json("{ not json"),
            Err(ConfigError::DataFormat(_))
        ));
    }
}
