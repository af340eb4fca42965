//! Framed objects.
//!
//! A bounding box wraps one child with pixel padding, a rounded border and an
//! optional name label at the top. Sizing works in both directions: the box
//! is the child plus padding, and resizing the box resizes the child to the
//! box minus padding.

use std::sync::Arc;

use image::{Rgba, RgbaImage};

use crate::error::{DiagramError, Result};
use crate::label::LabelFont;
use crate::primitives::{Padding, Position, Size};
use crate::raster::{self, BLACK, RoundedRect, TRANSPARENT};

use super::Object;

pub const DEFAULT_RADIUS_FRACTION: f32 = 0.1;
pub const DEFAULT_FILL: Rgba<u8> = Rgba([200, 200, 200, 255]);
pub const DEFAULT_STROKE_WIDTH: f32 = 5.0;
pub const DEFAULT_PADDING: Padding = Padding::all(2.0);

#[derive(Debug, Clone)]
pub struct BoundingBox {
    name: String,
    child: Object,
    padding: Padding,
    /// Corner radius as a fraction of the mean side length.
    radius_fraction: f32,
    fill: Rgba<u8>,
    outline: Option<Rgba<u8>>,
    stroke_width: f32,
    background: Rgba<u8>,
    label: Option<Arc<LabelFont>>,
    label_color: Rgba<u8>,
}

impl BoundingBox {
    pub fn new(name: impl Into<String>, child: impl Into<Object>) -> Self {
        Self {
            name: name.into(),
            child: child.into(),
            padding: DEFAULT_PADDING,
            radius_fraction: DEFAULT_RADIUS_FRACTION,
            fill: DEFAULT_FILL,
            outline: Some(BLACK),
            stroke_width: DEFAULT_STROKE_WIDTH,
            background: TRANSPARENT,
            label: None,
            label_color: BLACK,
        }
    }

    /// Padding in pixels. For fractions of a box size use
    /// [`Padding::scaled_to`] first.
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_radius_fraction(mut self, radius_fraction: f32) -> Self {
        self.radius_fraction = radius_fraction;
        self
    }

    pub fn with_fill(mut self, fill: Rgba<u8>) -> Self {
        self.fill = fill;
        self
    }

    /// Border colour, `None` for no border.
    pub fn with_outline(mut self, outline: Option<Rgba<u8>>) -> Self {
        self.outline = outline;
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: f32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn with_background(mut self, background: Rgba<u8>) -> Self {
        self.background = background;
        self
    }

    /// Draw the box name at the top with `font`.
    pub fn with_label(mut self, font: Arc<LabelFont>) -> Self {
        self.label = Some(font);
        self
    }

    pub fn with_label_color(mut self, color: Rgba<u8>) -> Self {
        self.label_color = color;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn child(&self) -> &Object {
        &self.child
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Child size plus padding, `None` while the child is unsized.
    pub fn size(&self) -> Option<Size> {
        self.child.size().map(|s| s.inflate(self.padding))
    }

    /// Resize the child to `size` minus padding.
    pub fn set_size(&mut self, size: Size) -> Result<()> {
        let inner = size.deflate(self.padding);
        tracing::debug!(name = %self.name, size = %size, child = %inner, "resizing bounding box");
        self.child.set_size(inner)
    }

    pub fn render(&self) -> Result<RgbaImage> {
        let size = self.size().ok_or_else(|| DiagramError::MissingSize {
            name: self.name.clone(),
        })?;

        let mut canvas = raster::new_canvas(size, self.background);
        let radius = self.radius_fraction * (size.width + size.height) as f32 / 2.0;
        raster::draw_rounded_rect(
            &mut canvas,
            &RoundedRect {
                radius,
                fill: self.fill,
                outline: self.outline,
                stroke_width: self.stroke_width,
            },
        );

        let child = self.child.render()?;
        let mut layer = raster::new_canvas(size, TRANSPARENT);
        let origin = Position::new(self.padding.left as i64, self.padding.top as i64);
        raster::paste(&mut layer, &child, origin);
        raster::alpha_composite(&mut canvas, &layer);

        if let Some(font) = &self.label {
            font.draw_centered(
                &mut canvas,
                size.width as f32 / 2.0,
                self.padding.top as f32,
                &self.name,
                self.label_color,
            );
        }
        Ok(canvas)
    }
}
