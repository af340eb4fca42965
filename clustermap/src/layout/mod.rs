//! Grid layout engines.
//!
//! A layout maps a flat list of objects onto grid cells and computes, for each
//! object, the pixel size it should be drawn at and the position of its
//! top-left corner inside the parent canvas.
//!
//! # Engines
//!
//! - [`GridLayout`]: every object takes one cell in row-major order. The
//!   target size is split evenly, then columns that overflow are squeezed
//!   while keeping each object's aspect ratio. Padding is a fraction of the
//!   nominal cell size.
//! - [`FlexibleColumnsLayout`]: columns hold different numbers of objects.
//!   Sizes come from the objects themselves and padding is in pixels.
//!
//! Cell tables are recomputed only by `adjust_cell_sizes`; reads never
//! trigger a recomputation.

pub mod flexible;
pub mod grid;
pub mod matrix;

pub use flexible::{FillOrder, FlexibleColumnsLayout};
pub use grid::GridLayout;
pub use matrix::CellMatrix;

use serde::Deserialize;

use crate::error::Result;
use crate::primitives::{CellIndex, GridShape, Position, Size};

/// Anything a layout can place: it has a name and maybe a size.
pub trait Sizable {
    fn name(&self) -> &str;
    fn size(&self) -> Option<Size>;
}

/// Vertical alignment inside a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Horizontal alignment inside a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// The layout owned by a composite.
#[derive(Debug, Clone)]
pub enum Layout {
    Grid(GridLayout),
    FlexibleColumns(FlexibleColumnsLayout),
}

impl Layout {
    /// Overall pixel size of the laid-out grid.
    pub fn size(&self) -> Size {
        match self {
            Layout::Grid(l) => l.size(),
            Layout::FlexibleColumns(l) => l.size(),
        }
    }

    /// Set the target size. Call `adjust_cell_sizes` afterwards.
    pub fn set_size(&mut self, size: Size) {
        match self {
            Layout::Grid(l) => l.set_size(size),
            Layout::FlexibleColumns(l) => l.set_size(size),
        }
    }

    pub fn grid(&self) -> GridShape {
        match self {
            Layout::Grid(l) => l.grid(),
            Layout::FlexibleColumns(l) => l.grid(),
        }
    }

    /// Recompute the cell tables for `objects`.
    pub fn adjust_cell_sizes<O: Sizable>(&mut self, objects: &[O]) -> Result<()> {
        match self {
            Layout::Grid(l) => l.adjust_cell_sizes(objects),
            Layout::FlexibleColumns(l) => l.adjust_cell_sizes(objects),
        }
    }

    /// Grid cell of the `index`-th object.
    pub fn index(&self, index: usize) -> Result<CellIndex> {
        match self {
            Layout::Grid(l) => l.index(index),
            Layout::FlexibleColumns(l) => l.index(index),
        }
    }

    /// Top-left pixel position of the `index`-th object.
    pub fn position(&self, index: usize) -> Result<Position> {
        match self {
            Layout::Grid(l) => l.position(index),
            Layout::FlexibleColumns(l) => l.position(index),
        }
    }

    /// Pixel size the `index`-th object is drawn at.
    pub fn cell_size(&self, index: usize) -> Result<Size> {
        match self {
            Layout::Grid(l) => l.cell_size(index),
            Layout::FlexibleColumns(l) => l.cell_size(index),
        }
    }
}

impl From<GridLayout> for Layout {
    fn from(layout: GridLayout) -> Self {
        Layout::Grid(layout)
    }
}

impl From<FlexibleColumnsLayout> for Layout {
    fn from(layout: FlexibleColumnsLayout) -> Self {
        Layout::FlexibleColumns(layout)
    }
}
