//! Decoded source image cache.
//!
//! The cache stores path -> decoded bitmap mappings. The first load of a path
//! pays the decode cost; every later load shares the same read-only buffer.
//! There is no invalidation: a cache lives for one rendering run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;

use crate::error::Result;

#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<PathBuf, Arc<RgbaImage>>,
    hits: u64,
    misses: u64,
}

impl ImageCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, decoding it only on the first request.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Arc<RgbaImage>> {
        let path = path.as_ref();
        if let Some(image) = self.entries.get(path) {
            self.hits += 1;
            return Ok(Arc::clone(image));
        }

        self.misses += 1;
        let image = Arc::new(image::open(path)?.to_rgba8());
        tracing::debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "decoded source image"
        );
        self.entries.insert(path.to_path_buf(), Arc::clone(&image));
        Ok(image)
    }

    /// Get the number of cached images.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn second_load_is_shared() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "gpu.png", 12, 6);

        let mut cache = ImageCache::new();
        let first = cache.load(&path).unwrap();
        let second = cache.load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.dimensions(), (12, 6));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats(), (1, 1));
    }

    #[test]
    fn distinct_paths_get_distinct_entries() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_png(dir.path(), "a.png", 2, 2);
        let b = write_png(dir.path(), "b.png", 3, 3);

        let mut cache = ImageCache::new();
        cache.load(&a).unwrap();
        cache.load(&b).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats(), (0, 2));
    }

    #[test]
    fn missing_file_is_an_error_and_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = ImageCache::new();
        assert!(cache.load(dir.path().join("nope.png")).is_err());
        assert!(cache.is_empty());
    }
}
