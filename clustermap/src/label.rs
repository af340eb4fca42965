//! Box labels.
//!
//! Glyphs are rasterized with fontdue and blended straight into the canvas.
//! Labels are short single-line names, so there is no shaping or wrapping.

use std::path::Path;

use fontdue::{Font, FontSettings};
use image::{Pixel, Rgba, RgbaImage};

use crate::error::{DiagramError, Result};

/// Default label size in pixels.
pub const DEFAULT_LABEL_PX: f32 = 24.0;

pub struct LabelFont {
    font: Font,
    px: f32,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont")
            .field("name", &self.font.name())
            .field("px", &self.px)
            .finish()
    }
}

impl LabelFont {
    /// Parse a TTF/OTF font from memory.
    pub fn from_bytes(bytes: &[u8], px: f32) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| DiagramError::Font(e.to_string()))?;
        Ok(Self { font, px })
    }

    /// Read and parse a font file.
    pub fn open(path: impl AsRef<Path>, px: f32) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes, px)
    }

    pub fn px(&self) -> f32 {
        self.px
    }

    /// Horizontal advance of `text` in pixels.
    pub fn measure(&self, text: &str) -> f32 {
        text.chars()
            .map(|c| self.font.metrics(c, self.px).advance_width)
            .sum()
    }

    /// Draw `text` horizontally centred on `center_x` with its top edge at `top`.
    pub fn draw_centered(
        &self,
        canvas: &mut RgbaImage,
        center_x: f32,
        top: f32,
        text: &str,
        color: Rgba<u8>,
    ) {
        let ascent = self
            .font
            .horizontal_line_metrics(self.px)
            .map(|m| m.ascent)
            .unwrap_or(self.px);
        let baseline = top + ascent;
        let mut pen_x = center_x - self.measure(text) / 2.0;

        let (canvas_w, canvas_h) = (canvas.width() as i64, canvas.height() as i64);
        for c in text.chars() {
            let (metrics, coverage) = self.font.rasterize(c, self.px);
            let left = (pen_x + metrics.xmin as f32).round() as i64;
            let glyph_top = (baseline - metrics.ymin as f32 - metrics.height as f32).round() as i64;

            for (i, alpha) in coverage.iter().enumerate() {
                if *alpha == 0 {
                    continue;
                }
                let x = left + (i % metrics.width) as i64;
                let y = glyph_top + (i / metrics.width) as i64;
                if x < 0 || y < 0 || x >= canvas_w || y >= canvas_h {
                    continue;
                }
                let a = (*alpha as u16 * color[3] as u16 / 255) as u8;
                canvas
                    .get_pixel_mut(x as u32, y as u32)
                    .blend(&Rgba([color[0], color[1], color[2], a]));
            }
            pen_x += metrics.advance_width;
        }
    }
}
