//! Ragged-column grid layout.
//!
//! Each column holds its own number of objects (`nrows[column]`). Sizes come
//! from the objects, never from a target: the layout is as big as its
//! content. Padding is in pixels and surrounds every object.
//!
//! Columns are stretched vertically so that every populated column is as tall
//! as the tallest one; a column of two objects next to a column of three
//! gets taller boxes, not a gap at the bottom.

use crate::error::{DiagramError, Result};
use crate::primitives::{CellIndex, GridShape, Padding, Position, Size};

use super::matrix::CellMatrix;
use super::{HAlign, Sizable, VAlign};

/// Order in which object indices are assigned to populated cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FillOrder {
    /// Row 0 across every column that has room, then row 1, ...
    #[default]
    RowMajor,
    /// Column 0 top to bottom, then column 1, ...
    ColumnMajor,
}

#[derive(Debug, Clone)]
pub struct FlexibleColumnsLayout {
    grid: GridShape,
    nrows: Vec<usize>,
    fill_order: FillOrder,
    valign: VAlign,
    halign: HAlign,
    padding: Padding,
    indices: CellMatrix<Option<usize>>,
    heights: CellMatrix<f64>,
    widths: CellMatrix<f64>,
    cell_heights: CellMatrix<f64>,
    cell_widths: CellMatrix<f64>,
}

impl FlexibleColumnsLayout {
    /// Create a layout where column `c` holds `nrows[c]` objects.
    pub fn new(grid: impl Into<GridShape>, nrows: impl Into<Vec<usize>>) -> Result<Self> {
        let grid = grid.into();
        let nrows = nrows.into();
        if grid.is_empty() {
            return Err(DiagramError::InvalidGrid(format!("{grid} grid has no cells")));
        }
        if nrows.len() != grid.columns {
            return Err(DiagramError::InvalidGrid(format!(
                "{} row counts given for {} columns",
                nrows.len(),
                grid.columns
            )));
        }
        if let Some((column, n)) = nrows.iter().enumerate().find(|(_, n)| **n > grid.rows) {
            return Err(DiagramError::InvalidGrid(format!(
                "column {column} wants {n} rows but the grid has {}",
                grid.rows
            )));
        }

        let zeros = CellMatrix::zeros(grid.rows, grid.columns);
        let mut layout = Self {
            grid,
            nrows,
            fill_order: FillOrder::default(),
            valign: VAlign::default(),
            halign: HAlign::default(),
            padding: Padding::ZERO,
            indices: CellMatrix::filled(grid.rows, grid.columns, None),
            heights: zeros.clone(),
            widths: zeros.clone(),
            cell_heights: zeros.clone(),
            cell_widths: zeros,
        };
        layout.fill_indices();
        Ok(layout)
    }

    pub fn with_fill_order(mut self, fill_order: FillOrder) -> Self {
        self.fill_order = fill_order;
        self.fill_indices();
        self
    }

    /// Set absolute padding (pixels) around every object.
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

    fn fill_indices(&mut self) {
        let GridShape { columns, rows } = self.grid;
        let mut indices = CellMatrix::filled(rows, columns, None);
        let mut next = 0;
        match self.fill_order {
            FillOrder::RowMajor => {
                for row in 0..rows {
                    for column in 0..columns {
                        if row < self.nrows[column] {
                            indices[(row, column)] = Some(next);
                            next += 1;
                        }
                    }
                }
            }
            FillOrder::ColumnMajor => {
                for column in 0..columns {
                    for row in 0..self.nrows[column] {
                        indices[(row, column)] = Some(next);
                        next += 1;
                    }
                }
            }
        }
        self.indices = indices;
    }

    pub fn grid(&self) -> GridShape {
        self.grid
    }

    pub fn nrows(&self) -> &[usize] {
        &self.nrows
    }

    pub fn fill_order(&self) -> FillOrder {
        self.fill_order
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Number of objects this layout places.
    pub fn capacity(&self) -> usize {
        self.nrows.iter().sum()
    }

    pub fn indices(&self) -> &CellMatrix<Option<usize>> {
        &self.indices
    }

    pub fn cell_heights(&self) -> &CellMatrix<f64> {
        &self.cell_heights
    }

    pub fn cell_widths(&self) -> &CellMatrix<f64> {
        &self.cell_widths
    }

    /// Size of the laid-out content, padding included.
    pub fn size(&self) -> Size {
        let width: f64 = self.widths.column_max().iter().sum::<f64>()
            + self.padding.horizontal() * self.grid.columns as f64;
        let height = self
            .heights
            .column_sum()
            .into_iter()
            .fold(0.0, f64::max)
            + self.padding.vertical() * self.grid.rows as f64;
        Size::new(width as u32, height as u32)
    }

    /// The size is derived from the content; a target is ignored.
    pub fn set_size(&mut self, size: Size) {
        tracing::warn!(
            requested = %size,
            actual = %self.size(),
            "flexible column layout is sized by its content, ignoring target size"
        );
    }

    /// Rebuild the cell tables from the objects' own sizes.
    pub fn adjust_cell_sizes<O: Sizable>(&mut self, objects: &[O]) -> Result<()> {
        let expected = self.capacity();
        if objects.len() > expected {
            self.index(expected)?;
        }
        if objects.len() < expected {
            return Err(DiagramError::ObjectCountMismatch {
                expected,
                actual: objects.len(),
            });
        }

        let GridShape { columns, rows } = self.grid;
        let mut heights = CellMatrix::zeros(rows, columns);
        let mut widths = CellMatrix::zeros(rows, columns);
        for (i, object) in objects.iter().enumerate() {
            let cell = self.index(i)?;
            let size = object.size().ok_or_else(|| DiagramError::MissingSize {
                name: object.name().to_string(),
            })?;
            heights[(cell.row, cell.column)] = size.height as f64;
            widths[(cell.row, cell.column)] = size.width as f64;
        }

        let mut cell_heights = heights.clone();
        let vertical = self.padding.vertical();
        let indices = &self.indices;
        cell_heights.map_in_place(|row, column, height| {
            if indices[(row, column)].is_some() { height + vertical } else { 0.0 }
        });

        let column_totals = cell_heights.column_sum();
        let tallest = column_totals.iter().copied().fold(0.0, f64::max);
        cell_heights.map_in_place(|_, column, height| {
            let total = column_totals[column];
            if total > 0.0 { height * tallest / total } else { height }
        });

        let column_max = widths.column_max();
        let horizontal = self.padding.horizontal();
        let mut cell_widths = CellMatrix::zeros(rows, columns);
        cell_widths.map_in_place(|_, column, _| column_max[column] + horizontal);

        tracing::debug!(
            grid = %self.grid,
            objects = objects.len(),
            column_height = tallest,
            "recomputed flexible column cells"
        );

        self.heights = heights;
        self.widths = widths;
        self.cell_heights = cell_heights;
        self.cell_widths = cell_widths;
        Ok(())
    }

    /// Cell holding the `index`-th object.
    pub fn index(&self, index: usize) -> Result<CellIndex> {
        self.indices
            .iter()
            .find(|(_, _, slot)| *slot == Some(index))
            .map(|(row, column, _)| CellIndex::new(column, row))
            .ok_or(DiagramError::OutOfBounds {
                index,
                columns: self.grid.columns,
                rows: self.grid.rows,
            })
    }

    /// Top-left pixel position of the `index`-th object.
    pub fn position(&self, index: usize) -> Result<Position> {
        let cell = self.index(index)?;
        let (row, column) = (cell.row, cell.column);

        let x: f64 = self.cell_widths.row(row)[..column].iter().sum();
        let y: f64 = self.cell_heights.column(column).take(row).sum();

        let box_width = self.cell_widths[(row, column)];
        let box_height = self.cell_heights[(row, column)];
        let width = self.widths[(row, column)];
        let height = self.heights[(row, column)];
        let Padding { top, right, bottom, left } = self.padding;

        let dx = match self.halign {
            HAlign::Left => left,
            HAlign::Center => left + (box_width - left - right - width) / 2.0,
            HAlign::Right => box_width - right - width,
        };
        let dy = match self.valign {
            VAlign::Top => top,
            VAlign::Center => top + (box_height - top - bottom - height) / 2.0,
            VAlign::Bottom => box_height - bottom - height,
        };

        Ok(Position::new((x + dx) as i64, (y + dy) as i64))
    }

    /// The object's own size, as recorded by the last adjustment.
    pub fn cell_size(&self, index: usize) -> Result<Size> {
        let cell = self.index(index)?;
        Ok(Size::new(
            self.widths[(cell.row, cell.column)].round() as u32,
            self.heights[(cell.row, cell.column)].round() as u32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Part {
        name: &'static str,
        size: Option<Size>,
    }

    impl Sizable for Part {
        fn name(&self) -> &str {
            self.name
        }
        fn size(&self) -> Option<Size> {
            self.size
        }
    }

    fn squares(n: usize, side: u32) -> Vec<Part> {
        (0..n)
            .map(|_| Part { name: "square", size: Some(Size::new(side, side)) })
            .collect()
    }

    fn ragged() -> FlexibleColumnsLayout {
        FlexibleColumnsLayout::new((4, 3), vec![3, 2, 1, 3])
            .unwrap()
            .with_padding(Padding::all(2.0))
    }

    // =========================================================================
    // Construction / indexing
    // =========================================================================

    #[test]
    fn invalid_shapes_are_rejected() {
        assert!(matches!(
            FlexibleColumnsLayout::new((0, 3), vec![]),
            Err(DiagramError::InvalidGrid(_))
        ));
        assert!(matches!(
            FlexibleColumnsLayout::new((2, 3), vec![1]),
            Err(DiagramError::InvalidGrid(_))
        ));
        assert!(matches!(
            FlexibleColumnsLayout::new((2, 3), vec![1, 4]),
            Err(DiagramError::InvalidGrid(_))
        ));
    }

    #[test]
    fn row_major_fill() {
        let layout = ragged();
        let expected: [[Option<usize>; 4]; 3] = [
            [Some(0), Some(1), Some(2), Some(3)],
            [Some(4), Some(5), None, Some(6)],
            [Some(7), None, None, Some(8)],
        ];
        for (row, cells) in expected.iter().enumerate() {
            assert_eq!(layout.indices().row(row), cells, "row {row}");
        }
        assert_eq!(layout.index(8).unwrap(), CellIndex::new(3, 2));
        assert!(matches!(layout.index(9), Err(DiagramError::OutOfBounds { index: 9, .. })));
    }

    #[test]
    fn column_major_fill() {
        let layout = ragged().with_fill_order(FillOrder::ColumnMajor);
        assert_eq!(layout.index(0).unwrap(), CellIndex::new(0, 0));
        assert_eq!(layout.index(2).unwrap(), CellIndex::new(0, 2));
        assert_eq!(layout.index(3).unwrap(), CellIndex::new(1, 0));
        assert_eq!(layout.index(5).unwrap(), CellIndex::new(2, 0));
        assert_eq!(layout.index(8).unwrap(), CellIndex::new(3, 2));
        assert!(layout.index(9).is_err());
    }

    // =========================================================================
    // Cell sizes
    // =========================================================================

    #[test]
    fn exactly_capacity_objects_are_accepted() {
        let mut layout = ragged();
        assert_eq!(layout.capacity(), 9);
        layout.adjust_cell_sizes(&squares(9, 60)).unwrap();

        assert!(matches!(
            layout.adjust_cell_sizes(&squares(10, 60)),
            Err(DiagramError::OutOfBounds { index: 9, .. })
        ));
        assert!(matches!(
            layout.adjust_cell_sizes(&squares(8, 60)),
            Err(DiagramError::ObjectCountMismatch { expected: 9, actual: 8 })
        ));
    }

    #[test]
    fn unsized_object_is_rejected_by_name() {
        let mut layout = FlexibleColumnsLayout::new((1, 2), vec![2]).unwrap();
        let objects = [
            Part { name: "gpu0", size: Some(Size::new(5, 5)) },
            Part { name: "gpu1", size: None },
        ];
        match layout.adjust_cell_sizes(&objects) {
            Err(DiagramError::MissingSize { name }) => assert_eq!(name, "gpu1"),
            other => panic!("expected MissingSize, got {other:?}"),
        }
    }

    #[test]
    fn columns_stretch_to_tallest() {
        let mut layout = ragged();
        layout.adjust_cell_sizes(&squares(9, 60)).unwrap();

        assert_eq!(layout.cell_heights().column_sum(), vec![192.0, 192.0, 192.0, 192.0]);
        assert_eq!(layout.cell_heights()[(0, 1)], 96.0);
        assert_eq!(layout.cell_heights()[(0, 2)], 192.0);
        assert_eq!(layout.cell_heights()[(2, 2)], 0.0);
        assert!(layout.cell_widths().iter().all(|(_, _, w)| w == 64.0));
        assert_eq!(layout.size(), Size::new(256, 192));
        assert_eq!(layout.cell_size(4).unwrap(), Size::new(60, 60));
    }

    #[test]
    fn empty_column_keeps_zero_height() {
        let mut layout = FlexibleColumnsLayout::new((2, 2), vec![2, 0]).unwrap();
        layout.adjust_cell_sizes(&squares(2, 10)).unwrap();
        assert_eq!(layout.cell_heights().column_sum(), vec![20.0, 0.0]);
        assert_eq!(layout.size(), Size::new(10, 20));
    }

    #[test]
    fn adjust_is_idempotent() {
        let sizes = [(10, 10), (30, 20), (5, 40), (8, 8), (12, 6), (20, 20), (7, 3), (16, 9), (4, 4)];
        let objects: Vec<Part> = sizes
            .into_iter()
            .map(|(w, h)| Part { name: "part", size: Some(Size::new(w, h)) })
            .collect();
        let mut layout = ragged()
            .with_fill_order(FillOrder::ColumnMajor)
            .with_padding(Padding::new(1.0, 2.0, 3.0, 4.0));
        layout.adjust_cell_sizes(&objects).unwrap();
        let (cell_heights, cell_widths) = (layout.cell_heights().clone(), layout.cell_widths().clone());

        layout.adjust_cell_sizes(&objects).unwrap();
        assert_eq!(layout.cell_heights(), &cell_heights);
        assert_eq!(layout.cell_widths(), &cell_widths);
    }

    #[test]
    fn set_size_is_ignored() {
        let mut layout = ragged();
        layout.adjust_cell_sizes(&squares(9, 60)).unwrap();
        layout.set_size(Size::new(10, 10));
        assert_eq!(layout.size(), Size::new(256, 192));
    }

    // =========================================================================
    // Positions
    // =========================================================================

    #[test]
    fn top_left_positions() {
        let mut layout = ragged();
        layout.adjust_cell_sizes(&squares(9, 60)).unwrap();
        assert_eq!(layout.position(0).unwrap(), Position::new(2, 2));
        assert_eq!(layout.position(5).unwrap(), Position::new(66, 98));
        assert_eq!(layout.position(8).unwrap(), Position::new(194, 130));
    }

    #[test]
    fn centered_positions() {
        let mut layout = ragged().with_halign(HAlign::Center).with_valign(VAlign::Center);
        layout.adjust_cell_sizes(&squares(9, 60)).unwrap();
        // Column 2 has one 192px box holding a 60px object
        assert_eq!(layout.position(2).unwrap(), Position::new(130, 66));
        // Column 1 boxes are 96px tall
        assert_eq!(layout.position(1).unwrap(), Position::new(66, 18));
    }

    #[test]
    fn centering_respects_asymmetric_padding() {
        let objects = [
            Part { name: "small", size: Some(Size::new(10, 10)) },
            Part { name: "large", size: Some(Size::new(20, 20)) },
        ];
        let build = |halign| {
            let mut layout = FlexibleColumnsLayout::new((1, 2), vec![2])
                .unwrap()
                .with_padding(Padding::new(1.0, 2.0, 3.0, 4.0))
                .with_halign(halign)
                .with_valign(VAlign::Center);
            layout.adjust_cell_sizes(&objects).unwrap();
            layout
        };

        let center = build(HAlign::Center);
        assert_eq!(center.size(), Size::new(26, 38));
        // Box is 26 wide: 4 left pad, 20 interior, 2 right pad
        assert_eq!(center.position(0).unwrap(), Position::new(9, 1));
        assert_eq!(center.position(1).unwrap(), Position::new(4, 15));

        assert_eq!(build(HAlign::Right).position(0).unwrap().x, 14);
        assert_eq!(build(HAlign::Left).position(0).unwrap().x, 4);
    }

    #[test]
    fn bottom_alignment_hugs_box_floor() {
        let mut layout = FlexibleColumnsLayout::new((2, 2), vec![2, 1])
            .unwrap()
            .with_valign(VAlign::Bottom);
        layout.adjust_cell_sizes(&squares(3, 10)).unwrap();
        // Column 1 has one 20px box; its 10px object sits at the bottom
        assert_eq!(layout.index(1).unwrap(), CellIndex::new(1, 0));
        assert_eq!(layout.position(1).unwrap(), Position::new(10, 10));
    }
}
