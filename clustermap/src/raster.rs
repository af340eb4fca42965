//! Pixel operations used by the object model.
//!
//! Everything here works on straight-alpha `RgbaImage` buffers. Rounded
//! rectangles go through a tiny-skia pixmap (premultiplied) and are converted
//! back before compositing.

use std::io::Cursor;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::error::{DiagramError, Result};
use crate::primitives::{Position, Size};

/// Fully transparent white, the default canvas background.
pub const TRANSPARENT: Rgba<u8> = Rgba([255, 255, 255, 0]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Cubic bezier approximation of a quarter circle: 4/3 * tan(pi/8).
const KAPPA: f32 = 0.552_284_8;

/// Create a canvas filled with `color`.
pub fn new_canvas(size: Size, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(size.width, size.height, color)
}

/// Resample `image` to `size`.
pub fn resize(image: &RgbaImage, size: Size) -> RgbaImage {
    if image.dimensions() == size.to_tuple() {
        return image.clone();
    }
    imageops::resize(image, size.width, size.height, FilterType::CatmullRom)
}

/// Rotate counter-clockwise by a multiple of 90 degrees, expanding the canvas.
pub fn rotate(image: &RgbaImage, degrees: i32) -> Result<RgbaImage> {
    if degrees % 90 != 0 {
        return Err(DiagramError::UnsupportedRotation(degrees));
    }
    // imageops rotates clockwise
    Ok(match degrees.rem_euclid(360) {
        0 => image.clone(),
        90 => imageops::rotate270(image),
        180 => imageops::rotate180(image),
        _ => imageops::rotate90(image),
    })
}

/// Copy `src` onto `dst` at `position`, replacing pixels (no blending).
pub fn paste(dst: &mut RgbaImage, src: &RgbaImage, position: Position) {
    imageops::replace(dst, src, position.x, position.y);
}

/// Blend `src` over `dst` (source-over), both anchored at the origin.
pub fn alpha_composite(dst: &mut RgbaImage, src: &RgbaImage) {
    imageops::overlay(dst, src, 0, 0);
}

/// Style of a rounded rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub radius: f32,
    pub fill: Rgba<u8>,
    pub outline: Option<Rgba<u8>>,
    pub stroke_width: f32,
}

/// Draw a rounded rectangle covering the whole canvas.
///
/// The outline lies inside the canvas bounds, like PIL's `rounded_rectangle`.
pub fn draw_rounded_rect(canvas: &mut RgbaImage, style: &RoundedRect) {
    let (width, height) = canvas.dimensions();
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        // Zero-sized canvas
        return;
    };

    let inset = if style.outline.is_some() { style.stroke_width / 2.0 } else { 0.0 };
    let w = width as f32 - 2.0 * inset;
    let h = height as f32 - 2.0 * inset;
    if w <= 0.0 || h <= 0.0 {
        return;
    }
    let radius = (style.radius - inset).clamp(0.0, w.min(h) / 2.0);

    let Some(path) = rounded_rect_path(inset, inset, w, h, radius) else {
        return;
    };

    let mut paint = Paint::default();
    paint.anti_alias = true;
    paint.set_color_rgba8(style.fill[0], style.fill[1], style.fill[2], style.fill[3]);
    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);

    if let Some(outline) = style.outline {
        if style.stroke_width > 0.0 {
            paint.set_color_rgba8(outline[0], outline[1], outline[2], outline[3]);
            let stroke = Stroke {
                width: style.stroke_width,
                ..Default::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    alpha_composite(canvas, &pixmap_to_rgba(&pixmap));
}

fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, r: f32) -> Option<tiny_skia::Path> {
    if r <= 0.0 {
        return tiny_skia::Rect::from_xywh(x, y, w, h).map(PathBuilder::from_rect);
    }
    let k = r * KAPPA;
    let (right, bottom) = (x + w, y + h);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

/// Convert a premultiplied pixmap into a straight-alpha image.
fn pixmap_to_rgba(pixmap: &Pixmap) -> RgbaImage {
    let mut out = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}

/// Encode as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    image.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;
    Ok(buffer)
}

/// Write a PNG file.
pub fn save_png(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    image.save_with_format(path, ImageFormat::Png)?;
    tracing::info!(path = %path.display(), width = image.width(), height = image.height(), "wrote image");
    Ok(())
}
