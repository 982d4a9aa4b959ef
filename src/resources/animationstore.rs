//! Animation frame registry.
//!
//! Frames are grouped into tracks keyed by string: `player/<track>` for the
//! player (`player/down`, `player/left_idle`, `player/up_attack`, ...) and
//! `<kind>/<status>` for enemies (`squid/idle`, `raccoon/attack`). A missing
//! track behaves as an empty frame list.

use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::components::enemy::EnemyStatus;
use crate::components::heading::Facing;
use crate::resources::assets::{ImageInfo, ImageLoader, import_animation_folder};
use crate::resources::gamedata::EnemyKind;

#[derive(Resource, Debug, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, Vec<ImageInfo>>,
}

impl AnimationStore {
    pub fn insert(&mut self, key: impl Into<String>, frames: Vec<ImageInfo>) {
        self.animations.insert(key.into(), frames);
    }

    pub fn frames(&self, key: &str) -> &[ImageInfo] {
        self.animations.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn frame_count(&self, key: &str) -> usize {
        self.frames(key).len()
    }

    pub fn frame(&self, key: &str, index: usize) -> Option<&ImageInfo> {
        self.frames(key).get(index)
    }

    /// Every texture key referenced by any track.
    pub fn image_keys(&self) -> impl Iterator<Item = &Arc<str>> {
        self.animations
            .values()
            .flat_map(|frames| frames.iter().map(|f| &f.key))
    }

    /// Loads the twelve player tracks from `<root>/graphics/player/<track>`.
    pub fn load_player(&mut self, loader: &dyn ImageLoader, root: &Path) {
        for facing in Facing::ALL {
            for suffix in ["", "_idle", "_attack"] {
                let track = format!("{}{}", facing.as_str(), suffix);
                let dir = root.join("graphics").join("player").join(&track);
                self.load_track(loader, format!("player/{track}"), &dir);
            }
        }
    }

    /// Loads idle/move/attack tracks for every enemy kind from
    /// `<root>/graphics/monsters/<kind>/<status>`.
    pub fn load_monsters(&mut self, loader: &dyn ImageLoader, root: &Path) {
        for kind in EnemyKind::ALL {
            for status in [EnemyStatus::Idle, EnemyStatus::Move, EnemyStatus::Attack] {
                let dir = root
                    .join("graphics")
                    .join("monsters")
                    .join(kind.as_str())
                    .join(status.as_str());
                self.load_track(loader, format!("{}/{}", kind.as_str(), status.as_str()), &dir);
            }
        }
    }

    fn load_track(&mut self, loader: &dyn ImageLoader, key: String, dir: &Path) {
        let frames = match import_animation_folder(loader, dir) {
            Ok(frames) => frames,
            Err(e) => {
                warn!("Animation {} has no frames: {}", key, e);
                Vec::new()
            }
        };
        debug!("Animation {}: {} frames", key, frames.len());
        self.insert(key, frames);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::assets::tests::FixedSizeLoader;

    #[test]
    fn missing_folders_give_empty_tracks() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AnimationStore::default();
        store.load_player(&FixedSizeLoader(64, 64), dir.path());
        store.load_monsters(&FixedSizeLoader(64, 64), dir.path());
        assert_eq!(store.animations.len(), 12 + 12);
        assert_eq!(store.frame_count("player/down_idle"), 0);
        assert_eq!(store.frame_count("squid/attack"), 0);
        assert!(store.frame("never/loaded", 0).is_none());
    }

    #[test]
    fn player_tracks_are_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let track = dir.path().join("graphics/player/left");
        std::fs::create_dir_all(&track).unwrap();
        for name in ["0.png", "1.png"] {
            std::fs::write(track.join(name), b"").unwrap();
        }
        let mut store = AnimationStore::default();
        store.load_player(&FixedSizeLoader(48, 60), dir.path());
        assert_eq!(store.frame_count("player/left"), 2);
        assert_eq!(store.frame("player/left", 1).map(|f| f.height), Some(60));
        assert_eq!(store.image_keys().count(), 2);
    }
}
