//! Solid rectangles.

use image::{Rgba, RgbaImage};

use crate::error::{DiagramError, Result};
use crate::primitives::Size;
use crate::raster;

pub const DEFAULT_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// A filled rectangle that accepts any size.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    name: String,
    color: Rgba<u8>,
    size: Option<Size>,
}

impl Rectangle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: DEFAULT_COLOR,
            size: None,
        }
    }

    pub fn with_color(mut self, color: Rgba<u8>) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Rgba<u8> {
        self.color
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = Some(size);
    }

    pub fn render(&self) -> Result<RgbaImage> {
        let size = self.size.ok_or_else(|| DiagramError::MissingSize {
            name: self.name.clone(),
        })?;
        Ok(raster::new_canvas(size, self.color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_solid_fill() {
        let rect = Rectangle::new("r")
            .with_color(Rgba([0, 0, 255, 255]))
            .with_size(Size::new(3, 2));
        let image = rect.render().unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert!(image.pixels().all(|p| *p == Rgba([0, 0, 255, 255])));
    }

    #[test]
    fn unsized_rectangle_cannot_render() {
        let err = Rectangle::new("lonely").render().unwrap_err();
        assert!(matches!(err, DiagramError::MissingSize { name } if name == "lonely"));
    }

    #[test]
    fn default_color_is_red() {
        assert_eq!(Rectangle::new("r").color(), DEFAULT_COLOR);
    }
}
