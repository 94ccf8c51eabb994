//! Texture catalog with lazy, memoized image decoding.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::gfx::scene::TextureId;

use super::model_loader::LoadError;

/// Decoded RGBA8 image, rows bottom-up (vertically mirrored on load).
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Decodes `path` into RGBA8 and mirrors it vertically.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let image = image::open(path.as_ref())?.flipv().to_rgba8();
        let (width, height) = image.dimensions();

        Ok(Self {
            width,
            height,
            pixels: image.into_raw(),
        })
    }

    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// Catalog entry: a file name and, once materialized, its decoded image.
#[derive(Debug, Clone, Default)]
pub struct TextureEntry {
    pub filename: PathBuf,
    pub data: Option<Rc<TextureImage>>,
}

impl TextureEntry {
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            data: None,
        }
    }
}

/// Texture id → entry.
///
/// Images are decoded on first access and shared afterwards. The catalog is
/// `Rc`-based and meant to be used from the render thread only.
#[derive(Debug, Clone, Default)]
pub struct TextureCatalog {
    entries: BTreeMap<TextureId, TextureEntry>,
}

impl TextureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: TextureId, entry: TextureEntry) {
        self.entries.insert(id, entry);
    }

    pub fn with_texture(mut self, id: TextureId, filename: impl Into<PathBuf>) -> Self {
        self.insert(id, TextureEntry::new(filename));
        self
    }

    pub fn contains(&self, id: TextureId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the decoded image of `id`, loading it on first access.
    ///
    /// Unknown ids and undecodable files yield `None`; a failed load is not
    /// memoized and will be retried on the next access.
    pub fn get(&mut self, id: TextureId) -> Option<Rc<TextureImage>> {
        let Some(entry) = self.entries.get_mut(&id) else {
            log::warn!("texture {} is not in the catalog", id);
            return None;
        };

        if let Some(data) = &entry.data {
            return Some(Rc::clone(data));
        }

        match TextureImage::load(&entry.filename) {
            Ok(image) => {
                log::debug!(
                    "texture {} loaded from {} ({}x{})",
                    id,
                    entry.filename.display(),
                    image.width,
                    image.height
                );
                let data = Rc::new(image);
                entry.data = Some(Rc::clone(&data));
                Some(data)
            }
            Err(err) => {
                log::warn!(
                    "failed to load texture {} from {}: {}",
                    id,
                    entry.filename.display(),
                    err
                );
                None
            }
        }
    }

    /// Returns the image of `id` only if it was already materialized.
    pub fn loaded(&self, id: TextureId) -> Option<Rc<TextureImage>> {
        self.entries.get(&id).and_then(|e| e.data.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_png(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("sceneview_{}_{}.png", name, std::process::id()));
        // 1x2: top red, bottom blue
        let mut image = image::RgbaImage::new(1, 2);
        image.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        image.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));
        image.save(&path).unwrap();
        path
    }

    #[test]
    fn test_unknown_texture_is_none() {
        let mut catalog = TextureCatalog::new();
        assert!(catalog.get(42).is_none());
    }

    #[test]
    fn test_missing_file_is_not_memoized() {
        let mut catalog = TextureCatalog::new().with_texture(1, "/definitely/not/here.png");
        assert!(catalog.get(1).is_none());
        assert!(catalog.loaded(1).is_none());
        assert!(catalog.contains(1));
    }

    #[test]
    fn test_texture_loaded_once_and_mirrored() {
        let path = write_test_png("mirror");
        let mut catalog = TextureCatalog::new().with_texture(0, &path);

        let first = catalog.get(0).unwrap();
        assert_eq!((first.width, first.height), (1, 2));
        // first row is now the former bottom row
        assert_eq!(&first.pixels[0..4], &[0, 0, 255, 255]);
        assert_eq!(&first.pixels[4..8], &[255, 0, 0, 255]);

        let second = catalog.get(0).unwrap();
        assert!(Rc::ptr_eq(&first, &second));

        std::fs::remove_file(path).ok();
    }
}
