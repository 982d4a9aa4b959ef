//! Image metadata loading.
//!
//! The simulation only needs an image's key and size; pixels are the
//! frontend's business. [`ImageLoader`] is the seam: the disk loader reads
//! dimensions from file headers, tests plug in fixed-size fakes.
//!
//! Folder helpers return frames in a stable order:
//! - [`import_animation_folder`] sorts by file name (`0.png`, `1.png`, ...)
//! - [`import_numbered_folder`] keeps only files with a numeric stem and
//!   sorts them numerically, so `grass_10` style names never reorder tiles.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::warn;

use crate::error::AssetError;

/// Key and pixel size of a loadable image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub key: Arc<str>,
    pub width: i32,
    pub height: i32,
}

pub trait ImageLoader {
    fn load(&self, path: &Path) -> Result<ImageInfo, AssetError>;
}

/// Reads image headers from disk with the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskImageLoader;

impl ImageLoader for DiskImageLoader {
    fn load(&self, path: &Path) -> Result<ImageInfo, AssetError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| AssetError::Image {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(ImageInfo {
            key: image_key(path),
            width: width as i32,
            height: height as i32,
        })
    }
}

/// Texture key for an image path.
pub fn image_key(path: &Path) -> Arc<str> {
    Arc::from(path.to_string_lossy().as_ref())
}

fn list_files(dir: &Path) -> Result<Vec<PathBuf>, AssetError> {
    if !dir.is_dir() {
        return Err(AssetError::MissingFolder(dir.to_path_buf()));
    }
    let entries = fs::read_dir(dir).map_err(|source| AssetError::Folder {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| AssetError::Folder {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

fn load_all(loader: &dyn ImageLoader, paths: Vec<PathBuf>) -> Vec<ImageInfo> {
    paths
        .into_iter()
        .filter_map(|path| match loader.load(&path) {
            Ok(info) => Some(info),
            Err(e) => {
                warn!("Skipping frame: {}", e);
                None
            }
        })
        .collect()
}

/// Every image in `dir`, ordered by file name. Unreadable images are logged
/// and skipped.
pub fn import_animation_folder(
    loader: &dyn ImageLoader,
    dir: &Path,
) -> Result<Vec<ImageInfo>, AssetError> {
    let mut files = list_files(dir)?;
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(load_all(loader, files))
}

/// Images in `dir` whose file stem is a number, in numeric order.
pub fn import_numbered_folder(
    loader: &dyn ImageLoader,
    dir: &Path,
) -> Result<Vec<ImageInfo>, AssetError> {
    let mut numbered: Vec<(u32, PathBuf)> = list_files(dir)?
        .into_iter()
        .filter_map(|path| {
            let index = path.file_stem()?.to_str()?.parse::<u32>().ok()?;
            Some((index, path))
        })
        .collect();
    numbered.sort_by_key(|(index, _)| *index);
    Ok(load_all(
        loader,
        numbered.into_iter().map(|(_, path)| path).collect(),
    ))
}
