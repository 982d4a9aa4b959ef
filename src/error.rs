//! Error types for configuration, assets, maps and level construction.
//!
//! Asset errors are recoverable: callers log them and keep going with
//! partial data. Map, level and game-data errors mean the content itself is
//! broken and abort level construction.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading an image or listing an asset folder.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("missing asset folder {0}")]
    MissingFolder(PathBuf),
    #[error("failed to read asset folder {path}: {source}")]
    Folder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load image {path}: {reason}")]
    Image { path: PathBuf, reason: String },
}

/// Failure while reading or interpreting CSV map layers.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to open map layer {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid cell `{cell}` in layer {layer} at row {row}, column {column}")]
    InvalidCell {
        layer: &'static str,
        row: usize,
        column: usize,
        cell: String,
    },
}

/// Structural problems found while building a level.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("unknown enemy type `{0}`")]
    UnknownEnemyType(String),
    #[error("unknown entity code {code} at row {row}, column {column}")]
    UnknownEntityCode { code: i32, row: usize, column: usize },
    #[error("no stat block for enemy type `{0}`")]
    MissingStats(String),
    #[error("map has no player spawn")]
    MissingPlayer,
    #[error(transparent)]
    Map(#[from] MapError),
}

/// Failure while loading or saving configuration and game data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file {path}: {reason}")]
    Load { path: PathBuf, reason: String },
    #[error("failed to save config file {path}: {reason}")]
    Save { path: PathBuf, reason: String },
    #[error("failed to access game data {path}: {source}")]
    DataIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse game data: {0}")]
    DataFormat(#[from] serde_json::Error),
}
