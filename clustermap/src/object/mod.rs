//! Drawable objects.
//!
//! An [`Object`] has a name, maybe a size, and can render itself to a bitmap
//! at that size. Leaves are solid rectangles and image-backed parts; a
//! [`Composite`] arranges children with a layout and a [`BoundingBox`] frames
//! one child with a rounded border and a label.

pub mod bounding_box;
pub mod composite;
pub mod image_object;
pub mod rectangle;

pub use bounding_box::BoundingBox;
pub use composite::{ChildSizing, Composite};
pub use image_object::{ImageKind, ImageObject};
pub use rectangle::Rectangle;

use image::RgbaImage;

use crate::error::Result;
use crate::layout::Sizable;
use crate::primitives::Size;

/// Anything that can be placed in a diagram.
#[derive(Debug, Clone)]
pub enum Object {
    Rectangle(Rectangle),
    Image(ImageObject),
    Composite(Box<Composite>),
    BoundingBox(Box<BoundingBox>),
}

impl Object {
    pub fn name(&self) -> &str {
        match self {
            Object::Rectangle(o) => o.name(),
            Object::Image(o) => o.name(),
            Object::Composite(o) => o.name(),
            Object::BoundingBox(o) => o.name(),
        }
    }

    /// Current size, `None` for objects that take whatever they are given.
    pub fn size(&self) -> Option<Size> {
        match self {
            Object::Rectangle(o) => o.size(),
            Object::Image(o) => Some(o.size()),
            Object::Composite(o) => Some(o.size()),
            Object::BoundingBox(o) => o.size(),
        }
    }

    /// Resize. On error the object is left as it was.
    pub fn set_size(&mut self, size: Size) -> Result<()> {
        match self {
            Object::Rectangle(o) => {
                o.set_size(size);
                Ok(())
            }
            Object::Image(o) => o.set_size(size),
            Object::Composite(o) => o.set_size(size),
            Object::BoundingBox(o) => o.set_size(size),
        }
    }

    /// Draw the object at its current size.
    pub fn render(&self) -> Result<RgbaImage> {
        match self {
            Object::Rectangle(o) => o.render(),
            Object::Image(o) => Ok(o.render()),
            Object::Composite(o) => o.render(),
            Object::BoundingBox(o) => o.render(),
        }
    }
}

impl Sizable for Object {
    fn name(&self) -> &str {
        Object::name(self)
    }

    fn size(&self) -> Option<Size> {
        Object::size(self)
    }
}

impl From<Rectangle> for Object {
    fn from(o: Rectangle) -> Self {
        Object::Rectangle(o)
    }
}

impl From<ImageObject> for Object {
    fn from(o: ImageObject) -> Self {
        Object::Image(o)
    }
}

impl From<Composite> for Object {
    fn from(o: Composite) -> Self {
        Object::Composite(Box::new(o))
    }
}

impl From<BoundingBox> for Object {
    fn from(o: BoundingBox) -> Self {
        Object::BoundingBox(Box::new(o))
    }
}
