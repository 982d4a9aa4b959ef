use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::warn;
use rustc_hash::FxHashMap;

use crate::resources::assets::{ImageInfo, ImageLoader, image_key};

/// Metadata of every standalone image the level uses (tiles, weapons,
/// magic, HUD icons), keyed by path.
///
/// Animation frames live in the
/// [`AnimationStore`](crate::resources::animationstore::AnimationStore).
/// The windowed frontend uploads the union of both as GPU textures.
#[derive(Resource, Debug, Default)]
pub struct TextureStore {
    pub map: FxHashMap<Arc<str>, ImageInfo>,
}

impl TextureStore {
    /// Loads (or returns the cached) metadata for `path`. Failures are
    /// logged and yield `None`.
    pub fn load(&mut self, loader: &dyn ImageLoader, path: &Path) -> Option<ImageInfo> {
        let key = image_key(path);
        if let Some(info) = self.map.get(&key) {
            return Some(info.clone());
        }
        match loader.load(path) {
            Ok(info) => {
                self.map.insert(key, info.clone());
                Some(info)
            }
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }

    pub fn get(&self, path: &Path) -> Option<&ImageInfo> {
        self.map.get(&image_key(path))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Arc<str>> {
        self.map.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::assets::DiskImageLoader;
    use crate::resources::assets::tests::FixedSizeLoader;

    #[test]
    fn loaded_images_are_cached_by_path() {
        let mut store = TextureStore::default();
        let path = Path::new("graphics/weapons/sword/up.png");
        let info = store.load(&FixedSizeLoader(20, 40), path).unwrap();
        assert_eq!((info.width, info.height), (20, 40));
        assert_eq!(store.get(path), Some(&info));
        assert_eq!(store.keys().count(), 1);
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TextureStore::default();
        let path = dir.path().join("missing.png");
        assert!(store.load(&DiskImageLoader, &path).is_none());
        assert!(store.get(&path).is_none());
    }
}
