//! Uniform grid layout.
//!
//! Every object takes exactly one cell, assigned in row-major order. The
//! available area (target size minus proportional padding) is split evenly
//! into rows; each object's width follows from the row height and its aspect
//! ratio. When the widest cells of all columns no longer fit, the overflowing
//! columns are squeezed proportionally and heights are re-derived from the
//! squeezed widths so ratios are kept.
//!
//! Padding is a fraction of the nominal cell share (`size / grid`), not of the
//! actual cell size: a column that ends up narrow still gets the same gutter.

use crate::error::{DiagramError, Result};
use crate::primitives::{CellIndex, GridShape, Padding, Position, Size};

use super::matrix::CellMatrix;
use super::{HAlign, Sizable, VAlign};

/// Default proportional padding on every side.
pub const DEFAULT_PADDING: f64 = 0.1;

/// Relative slack allowed when checking that rows fit the available height.
const HEIGHT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct GridLayout {
    grid: GridShape,
    size: Size,
    valign: VAlign,
    halign: HAlign,
    padding: Padding,
    /// Content height of each cell, indexed (row, column).
    heights: CellMatrix<f64>,
    /// Content width of each cell, indexed (row, column).
    widths: CellMatrix<f64>,
}

impl GridLayout {
    /// Create a `grid` layout targeting `size`, top-left aligned with the
    /// default padding.
    pub fn new(grid: impl Into<GridShape>, size: impl Into<Size>) -> Result<Self> {
        let grid = grid.into();
        if grid.is_empty() {
            return Err(DiagramError::InvalidGrid(format!("{grid} grid has no cells")));
        }
        Ok(Self {
            grid,
            size: size.into(),
            valign: VAlign::default(),
            halign: HAlign::default(),
            padding: Padding::all(DEFAULT_PADDING),
            heights: CellMatrix::zeros(grid.rows, grid.columns),
            widths: CellMatrix::zeros(grid.rows, grid.columns),
        })
    }

    /// Set proportional padding (fractions of the nominal cell size).
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_valign(mut self, valign: VAlign) -> Self {
        self.valign = valign;
        self
    }

    pub fn with_halign(mut self, halign: HAlign) -> Self {
        self.halign = halign;
        self
    }

    pub fn grid(&self) -> GridShape {
        self.grid
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn valign(&self) -> VAlign {
        self.valign
    }

    pub fn halign(&self) -> HAlign {
        self.halign
    }

    pub fn heights(&self) -> &CellMatrix<f64> {
        &self.heights
    }

    pub fn widths(&self) -> &CellMatrix<f64> {
        &self.widths
    }

    /// Area left for content once padding is taken out: (width, height).
    pub fn available(&self) -> (f64, f64) {
        (
            self.size.width as f64 * (1.0 - self.padding.horizontal()),
            self.size.height as f64 * (1.0 - self.padding.vertical()),
        )
    }

    /// Recompute per-cell widths and heights for `objects`.
    ///
    /// On error the previous tables are left untouched.
    pub fn adjust_cell_sizes<O: Sizable>(&mut self, objects: &[O]) -> Result<()> {
        let (available_width, available_height) = self.available();
        if available_width < 0.0 || available_height < 0.0 {
            return Err(DiagramError::InvalidGrid(format!(
                "padding {:?} leaves no room inside {}",
                self.padding, self.size
            )));
        }

        let GridShape { columns, rows } = self.grid;
        let column_share = available_width / columns as f64;
        let row_height = available_height / rows as f64;

        let mut heights = CellMatrix::filled(rows, columns, row_height);
        let mut widths = CellMatrix::zeros(rows, columns);
        let mut ratios = CellMatrix::zeros(rows, columns);

        for (i, object) in objects.iter().enumerate() {
            let cell = self.index(i)?;
            let (ratio, width) = match object.size().and_then(|s| s.aspect_ratio()) {
                Some(ratio) => (ratio, row_height * ratio),
                None => (f64::NAN, column_share),
            };
            ratios[(cell.row, cell.column)] = ratio;
            widths[(cell.row, cell.column)] = width;
        }

        let column_max = widths.column_max();
        if column_max.iter().sum::<f64>() > available_width {
            tracing::debug!(
                grid = %self.grid,
                size = %self.size,
                "columns overflow available width, squeezing"
            );
            squeeze_columns(&mut widths, &column_max, column_share, available_width);
            heights = heights_from_ratios(&widths, &ratios, available_height);
        }

        let total_height: f64 = heights.row_max().iter().sum();
        if total_height > available_height * (1.0 + HEIGHT_EPSILON) + f64::EPSILON {
            tracing::error!(
                total_height,
                available_height,
                grid = %self.grid,
                "row heights exceed available height"
            );
            return Err(DiagramError::InvariantViolation(format!(
                "row heights sum to {total_height} but only {available_height} is available"
            )));
        }

        self.heights = heights;
        self.widths = widths;
        Ok(())
    }

    /// Row-major unravel of `index`.
    pub fn index(&self, index: usize) -> Result<CellIndex> {
        if index >= self.grid.capacity() {
            return Err(DiagramError::OutOfBounds {
                index,
                columns: self.grid.columns,
                rows: self.grid.rows,
            });
        }
        Ok(CellIndex::new(index % self.grid.columns, index / self.grid.columns))
    }

    /// Top-left pixel position of the `index`-th object.
    pub fn position(&self, index: usize) -> Result<Position> {
        let cell = self.index(index)?;
        let column_max = self.widths.column_max();
        let row_max = self.heights.row_max();

        let mut x: f64 = column_max[..cell.column].iter().sum();
        let mut y: f64 = row_max[..cell.row].iter().sum();

        // Gutters scale with the nominal share of the target size
        let share_w = self.size.width as f64 / self.grid.columns as f64;
        let share_h = self.size.height as f64 / self.grid.rows as f64;
        let left = self.padding.left * share_w;
        let right = self.padding.right * share_w;
        let top = self.padding.top * share_h;
        let bottom = self.padding.bottom * share_h;

        x += (left + right) * cell.column as f64;
        y += (top + bottom) * cell.row as f64;

        let width = self.widths[(cell.row, cell.column)];
        let height = self.heights[(cell.row, cell.column)];
        let column_width = column_max[cell.column];
        let row_height = row_max[cell.row];

        x += match self.halign {
            HAlign::Left => left,
            HAlign::Center => (left + right + column_width - width) / 2.0,
            HAlign::Right => left + column_width - width,
        };
        y += match self.valign {
            VAlign::Top => top,
            VAlign::Center => (top + bottom + row_height - height) / 2.0,
            VAlign::Bottom => top + row_height - height,
        };

        Ok(Position::new(x as i64, y as i64))
    }

    /// Rounded cell size of the `index`-th object.
    pub fn cell_size(&self, index: usize) -> Result<Size> {
        let cell = self.index(index)?;
        Ok(Size::new(
            self.widths[(cell.row, cell.column)].round() as u32,
            self.heights[(cell.row, cell.column)].round() as u32,
        ))
    }
}

/// Shrink overflowing columns so all columns fit `available_width`.
///
/// Columns whose widest cell fits the equal share keep their width. The rest
/// split what is left in proportion to their widest cell; a cell is clamped to
/// its column's new width when it exceeds either the share or that width.
fn squeeze_columns(
    widths: &mut CellMatrix<f64>,
    column_max: &[f64],
    column_share: f64,
    available_width: f64,
) {
    let overflowing: Vec<bool> = column_max.iter().map(|w| *w > column_share).collect();
    let fixed_width: f64 = column_max
        .iter()
        .zip(&overflowing)
        .filter(|(_, over)| !**over)
        .map(|(w, _)| *w)
        .sum();
    let overflow_total: f64 = column_max
        .iter()
        .zip(&overflowing)
        .filter(|(_, over)| **over)
        .map(|(w, _)| *w)
        .sum();

    let adjusted: Vec<f64> = column_max
        .iter()
        .zip(&overflowing)
        .map(|(w, over)| {
            if *over {
                (available_width - fixed_width) * w / overflow_total
            } else {
                *w
            }
        })
        .collect();

    widths.map_in_place(|_, column, width| {
        let target = adjusted[column];
        if overflowing[column] && width > target {
            target
        } else {
            width
        }
    });
}

/// Heights after a squeeze: `width / ratio` where the ratio is known, the row
/// maximum elsewhere, and an even split of the leftover height for rows that
/// end up with nothing at all.
fn heights_from_ratios(
    widths: &CellMatrix<f64>,
    ratios: &CellMatrix<f64>,
    available_height: f64,
) -> CellMatrix<f64> {
    let mut heights = widths.clone();
    heights.map_in_place(|row, column, width| {
        let height = width / ratios[(row, column)];
        if height.is_finite() { height } else { 0.0 }
    });

    let row_max = heights.row_max();
    heights.map_in_place(|row, _, height| if height == 0.0 { row_max[row] } else { height });

    let unset_rows = row_max.iter().filter(|h| **h == 0.0).count();
    if unset_rows > 0 {
        let leftover = (available_height - row_max.iter().sum::<f64>()) / unset_rows as f64;
        heights.map_in_place(|row, _, height| if row_max[row] == 0.0 { leftover } else { height });
    }
    heights
}
