//! Image-backed hardware parts.
//!
//! The source bitmap is shared with the [`ImageCache`]; only the display size
//! is owned. A resize must keep the source aspect ratio within a relative
//! tolerance, otherwise it is rejected and the object keeps its old size.

use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;

use crate::error::{DiagramError, Result};
use crate::image_cache::ImageCache;
use crate::primitives::Size;
use crate::raster;

/// Relative tolerance on the aspect ratio when resizing.
pub const RATIO_RTOL: f64 = 0.1;
/// Absolute tolerance on the aspect ratio when resizing.
pub const RATIO_ATOL: f64 = 1e-8;

/// What an image depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Gpu,
    Cpu,
    /// Memory modules are drawn upright; source pictures lie flat and are
    /// turned a quarter on load.
    Ram,
    Other,
}

impl ImageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageKind::Gpu => "gpu",
            ImageKind::Cpu => "cpu",
            ImageKind::Ram => "ram",
            ImageKind::Other => "image",
        }
    }

    /// Rotation (counter-clockwise degrees) applied when the image is opened.
    pub fn load_rotation(self) -> i32 {
        match self {
            ImageKind::Ram => 90,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageObject {
    name: String,
    kind: ImageKind,
    source: Arc<RgbaImage>,
    size: Size,
}

impl ImageObject {
    /// Load `path` through `cache`. The object starts at the source size.
    pub fn open(
        cache: &mut ImageCache,
        name: impl Into<String>,
        path: impl AsRef<Path>,
        kind: ImageKind,
    ) -> Result<Self> {
        let mut source = cache.load(path)?;
        let rotation = kind.load_rotation();
        if rotation != 0 {
            source = Arc::new(raster::rotate(&source, rotation)?);
        }
        Ok(Self::from_image(name, kind, source))
    }

    /// Wrap an already decoded bitmap.
    pub fn from_image(name: impl Into<String>, kind: ImageKind, source: Arc<RgbaImage>) -> Self {
        let size = Size::new(source.width(), source.height());
        Self {
            name: name.into(),
            kind,
            source,
            size,
        }
    }

    /// A copy turned counter-clockwise by `degrees`, sized to the rotated
    /// source.
    pub fn rotated(&self, degrees: i32) -> Result<Self> {
        let source = Arc::new(raster::rotate(&self.source, degrees)?);
        Ok(Self::from_image(self.name.clone(), self.kind, source))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn source_size(&self) -> Size {
        Size::new(self.source.width(), self.source.height())
    }

    /// Resize, keeping the source aspect ratio within tolerance.
    pub fn set_size(&mut self, size: Size) -> Result<()> {
        let image = self.source_size();
        let requested_ratio = size.aspect_ratio().unwrap_or(f64::NAN);
        let image_ratio = image.aspect_ratio().unwrap_or(f64::NAN);

        // NaN on either side fails the comparison
        let tolerance = RATIO_ATOL + RATIO_RTOL * image_ratio.abs();
        let within = (requested_ratio - image_ratio).abs() <= tolerance;
        if !within {
            return Err(DiagramError::AspectRatioViolation {
                name: self.name.clone(),
                requested: size,
                requested_ratio,
                image,
                image_ratio,
            });
        }
        self.size = size;
        Ok(())
    }

    /// The source resampled to the current size.
    pub fn render(&self) -> RgbaImage {
        raster::resize(&self.source, self.size)
    }
}
