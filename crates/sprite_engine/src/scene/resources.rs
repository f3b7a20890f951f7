//! Scene-owned resources: textures and animation definitions

use crate::animation::Animation;
use crate::foundation::math::Vec2;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Resource registration and loading errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Texture registered without a name
    #[error("texture requires a name")]
    MissingTextureName,

    /// Texture registered without a filename
    #[error("texture {0} requires a filename")]
    MissingFilename(String),

    /// Image header could not be read
    #[error("failed to load texture {name} from {path}: {message}")]
    TextureLoad {
        /// Texture name
        name: String,
        /// Image path
        path: String,
        /// Decoder message
        message: String,
    },
}

/// Sprite-sheet texture.
///
/// Only dimensions are tracked here; pixel upload belongs to the graphics
/// backend. A texture whose size is unknown is not ready and renderers skip it.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    /// Texture name, unique within a scene
    pub name: String,
    filename: Option<PathBuf>,
    size: Option<(u32, u32)>,
    rows: u32,
    cols: u32,
}

impl Texture {
    /// Texture backed by an image file, loaded later by [`Texture::load`]
    pub fn from_file(name: impl Into<String>, filename: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            filename: Some(filename.into()),
            size: None,
            rows: 1,
            cols: 1,
        }
    }

    /// Texture with known dimensions and no backing file
    pub fn with_size(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            filename: None,
            size: Some((width, height)),
            rows: 1,
            cols: 1,
        }
    }

    /// Backing image path
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Pixel dimensions, once known
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    /// Whether renderers can use the texture
    pub fn is_ready(&self) -> bool {
        self.size.is_some()
    }

    /// Sprite-sheet rows
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Sprite-sheet columns
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Set the number of sprite-sheet rows (at least 1)
    pub fn set_rows(&mut self, rows: u32) {
        self.rows = rows.max(1);
    }

    /// Set the number of sprite-sheet columns (at least 1)
    pub fn set_cols(&mut self, cols: u32) {
        self.cols = cols.max(1);
    }

    /// Read the pixel dimensions from the image header
    pub fn load(&mut self) -> Result<(), SceneError> {
        let Some(path) = self.filename.as_deref() else {
            return Ok(());
        };
        let (width, height) = image::image_dimensions(path).map_err(|e| SceneError::TextureLoad {
            name: self.name.clone(),
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        log::info!("Loaded texture {} {}x{} from {:?}", self.name, width, height, path);
        self.size = Some((width, height));
        Ok(())
    }

    /// Pixel size of one sprite-sheet cell
    pub fn cell_size(&self) -> Option<Vec2> {
        self.size
            .map(|(width, height)| Vec2::new(width as f32 / self.cols as f32, height as f32 / self.rows as f32))
    }

    /// UV offset and size of cell `index`, counting left to right then top to
    /// bottom. Indices past the last cell run off the bottom of the sheet.
    pub fn uv_rect(&self, index: u32) -> (Vec2, Vec2) {
        let size = Vec2::new(1.0 / self.cols as f32, 1.0 / self.rows as f32);
        let col = index % self.cols;
        let row = index / self.cols;
        (Vec2::new(size.x * col as f32, size.y * row as f32), size)
    }
}

/// Named textures and animations owned by a scene
#[derive(Debug, Default)]
pub struct SceneResources {
    textures: HashMap<String, Texture>,
    animations: HashMap<String, Animation>,
}

impl SceneResources {
    /// Look up a texture
    pub fn texture(&self, name: &str) -> Option<&Texture> {
        self.textures.get(name)
    }

    /// Look up a texture mutably
    pub fn texture_mut(&mut self, name: &str) -> Option<&mut Texture> {
        self.textures.get_mut(name)
    }

    /// Look up an animation
    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.get(name)
    }

    /// Look up an animation mutably
    pub fn animation_mut(&mut self, name: &str) -> Option<&mut Animation> {
        self.animations.get_mut(name)
    }

    /// Number of textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of animations
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Store a texture, replacing any texture of the same name
    pub fn insert_texture(&mut self, texture: Texture) -> &mut Texture {
        match self.textures.entry(texture.name.clone()) {
            Entry::Occupied(mut entry) => {
                log::debug!("Texture {} replaced", entry.key());
                entry.insert(texture);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(texture),
        }
    }

    /// Store an animation, replacing any animation of the same name
    pub fn insert_animation(&mut self, animation: Animation) -> &mut Animation {
        match self.animations.entry(animation.name.clone()) {
            Entry::Occupied(mut entry) => {
                log::debug!("Animation {} replaced", entry.key());
                entry.insert(animation);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(animation),
        }
    }

    pub(crate) fn textures_mut(&mut self) -> impl Iterator<Item = &mut Texture> {
        self.textures.values_mut()
    }
}
