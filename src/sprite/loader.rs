use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use image::ImageReader;
use thiserror::Error;
use tracing::{debug, error};

use super::{AssetId, Bitmap, SpriteHandle, SpriteSet};
use crate::game::{FOOD_ASSET, SNAKE_BODY_ASSET, SNAKE_HEAD_ASSET};

const ASSET_DIR: &str = "assets";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset missing: {path}: {reason}")]
    AssetMissing { path: PathBuf, reason: String },
    #[error("bitmap has a zero dimension")]
    EmptyBitmap,
    #[error("bitmap buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// Turns a path relative to the asset root into a decoded bitmap.
pub trait AssetLoader {
    fn load(&self, relative: &str) -> Result<Bitmap, AssetError>;
}

/// Decodes assets from disk with the `image` crate.
#[derive(Clone, Debug)]
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsAssetLoader { root: root.into() }
    }

    /// Finds the asset directory without looking at the working directory:
    /// the crate's own `assets/` when it exists, else `assets/` next to the
    /// executable.
    pub fn locate() -> Self {
        let manifest_assets = Path::new(env!("CARGO_MANIFEST_DIR")).join(ASSET_DIR);
        if manifest_assets.is_dir() {
            return FsAssetLoader::new(manifest_assets);
        }
        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(ASSET_DIR)));
        FsAssetLoader::new(beside_exe.unwrap_or(manifest_assets))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, relative: &str) -> Result<PathBuf, AssetError> {
        let path = Path::new(relative);
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if relative.is_empty() || escapes {
            return Err(AssetError::AssetMissing {
                path: path.to_path_buf(),
                reason: "asset paths must stay inside the asset root".to_string(),
            });
        }
        Ok(self.root.join(path))
    }
}

impl AssetLoader for FsAssetLoader {
    fn load(&self, relative: &str) -> Result<Bitmap, AssetError> {
        let path = self.resolve(relative)?;
        let missing = |reason: String| AssetError::AssetMissing {
            path: path.clone(),
            reason,
        };
        let decoded = ImageReader::open(&path)
            .map_err(|err| missing(format!("open failed: {err}")))?
            .decode()
            .map_err(|err| missing(format!("decode failed: {err}")))?;
        let image = decoded.to_rgba8();
        debug!(path = %path.display(), width = image.width(), height = image.height(), "asset decoded");
        Bitmap::new(image.width(), image.height(), image.into_raw())
    }
}

/// Loads the head, body and food sprites, sized to `cell_size`.
pub fn load_sprites(loader: &impl AssetLoader, cell_size: u32) -> Result<SpriteSet, AssetError> {
    let load = |name: &str| -> Result<SpriteHandle, AssetError> {
        let bitmap = loader.load(name).inspect_err(|err| error!("{err}"))?;
        Ok(SpriteHandle::new(AssetId::new(name), Arc::new(bitmap)))
    };
    Ok(SpriteSet {
        head: load(SNAKE_HEAD_ASSET)?,
        body: load(SNAKE_BODY_ASSET)?,
        food: load(FOOD_ASSET)?,
    }
    .sized(cell_size))
}
