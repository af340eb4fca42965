//! Core geometric types.
//!
//! Pixel sizes are unsigned integers, positions are signed (a child may be
//! pasted partly outside its parent), and padding is fractional because the
//! uniform grid interprets it as a share of the nominal cell size.

use std::fmt;

use serde::Deserialize;

/// A pixel position (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn to_tuple(self) -> (i64, i64) {
        (self.x, self.y)
    }
}

impl From<(i64, i64)> for Position {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (i64, i64) {
    fn from(p: Position) -> Self {
        p.to_tuple()
    }
}

/// A pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "(u32, u32)")]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const ZERO: Self = Self { width: 0, height: 0 };

    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn to_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Width over height, or `None` when the height is zero.
    #[inline]
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.height > 0).then(|| self.width as f64 / self.height as f64)
    }

    /// Grow by absolute padding on every side (fractions are truncated).
    pub fn inflate(self, padding: Padding) -> Self {
        Self {
            width: (self.width as f64 + padding.horizontal()) as u32,
            height: (self.height as f64 + padding.vertical()) as u32,
        }
    }

    /// Shrink by absolute padding on every side, saturating at zero.
    pub fn deflate(self, padding: Padding) -> Self {
        Self {
            width: (self.width as f64 - padding.horizontal()).max(0.0) as u32,
            height: (self.height as f64 - padding.vertical()).max(0.0) as u32,
        }
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl From<Size> for (u32, u32) {
    fn from(s: Size) -> Self {
        s.to_tuple()
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Number of columns and rows of a layout grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "(usize, usize)")]
pub struct GridShape {
    pub columns: usize,
    pub rows: usize,
}

impl GridShape {
    #[inline]
    pub const fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    /// Total number of cells.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.columns * self.rows
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }
}

impl From<(usize, usize)> for GridShape {
    fn from((columns, rows): (usize, usize)) -> Self {
        Self { columns, rows }
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// A grid cell address, zero-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellIndex {
    pub column: usize,
    pub row: usize,
}

impl CellIndex {
    #[inline]
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

/// Padding around content.
///
/// Whether the values are fractions of a cell or pixels depends on the
/// consumer: [`GridLayout`](crate::layout::GridLayout) reads them as
/// fractions, everything else as pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(from = "[f64; 4]")]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub const ZERO: Self = Self { top: 0.0, right: 0.0, bottom: 0.0, left: 0.0 };

    /// Create padding with explicit values for each side.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    /// Uniform padding on all sides.
    pub const fn all(value: f64) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// Total horizontal padding.
    #[inline]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Total vertical padding.
    #[inline]
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Convert fractional padding into pixels of `size`.
    ///
    /// Top and bottom scale with the height, left and right with the width.
    pub fn scaled_to(&self, size: Size) -> Self {
        let w = size.width as f64;
        let h = size.height as f64;
        Self {
            top: self.top * h,
            right: self.right * w,
            bottom: self.bottom * h,
            left: self.left * w,
        }
    }

    pub const fn to_tuple(self) -> (f64, f64, f64, f64) {
        (self.top, self.right, self.bottom, self.left)
    }
}

impl From<[f64; 4]> for Padding {
    fn from([top, right, bottom, left]: [f64; 4]) -> Self {
        Self { top, right, bottom, left }
    }
}

impl From<(f64, f64, f64, f64)> for Padding {
    fn from((top, right, bottom, left): (f64, f64, f64, f64)) -> Self {
        Self { top, right, bottom, left }
    }
}
