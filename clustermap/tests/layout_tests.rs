//! Integration tests for the layout engines through the public object API.
//!
//! Objects are real `Object`s (rectangles, image parts, composites) rather
//! than test doubles, so these cover the same path a topology build takes.

use std::sync::Arc;

use clustermap::{
    Composite, DiagramError, FlexibleColumnsLayout, GridLayout, ImageCache, ImageKind, ImageObject,
    Layout, Object, Padding, Position, Rectangle, Size, VAlign,
};
use image::{Rgba, RgbaImage};

fn rectangles(n: usize) -> Vec<Object> {
    (0..n).map(|i| Rectangle::new(format!("rect{i}")).into()).collect()
}

fn sized_rectangles(n: usize, size: Size) -> Vec<Object> {
    (0..n)
        .map(|i| Rectangle::new(format!("rect{i}")).with_size(size).into())
        .collect()
}

fn sum_row_max(layout: &GridLayout) -> f64 {
    layout.heights().row_max().iter().sum()
}

fn sum_column_max(layout: &GridLayout) -> f64 {
    layout.widths().column_max().iter().sum()
}

// =========================================================================
// Uniform grid
// =========================================================================

#[test]
fn six_unsized_rectangles_fill_a_2x3_grid() {
    let layout = GridLayout::new((2, 3), (20, 60)).unwrap().with_padding(Padding::ZERO);
    let composite = Composite::new("grid", layout, rectangles(6)).unwrap();
    for i in 0..6 {
        assert_eq!(composite.layout().cell_size(i).unwrap(), Size::new(10, 20));
    }
}

#[test]
fn unsized_objects_always_fit() {
    for (columns, rows) in [(1, 1), (3, 2), (5, 5), (8, 1), (1, 16), (7, 9)] {
        for padding in [0.0, 0.05, 0.1, 0.2] {
            let mut layout = GridLayout::new((columns, rows), (1234, 567))
                .unwrap()
                .with_padding(Padding::all(padding));
            layout.adjust_cell_sizes(&rectangles(columns * rows)).unwrap();
            let (width, height) = layout.available();
            assert!(sum_row_max(&layout) <= height + 1e-6, "{columns}x{rows} @ {padding}");
            assert!(sum_column_max(&layout) <= width + 1e-6, "{columns}x{rows} @ {padding}");
        }
    }
}

#[test]
fn adjusting_twice_gives_identical_tables() {
    let mut objects = rectangles(12);
    objects[1] = Rectangle::new("wide").with_size(Size::new(4, 2)).into();
    objects[4] = Rectangle::new("tall").with_size(Size::new(2, 8)).into();

    let mut layout = GridLayout::new((4, 3), (120, 100)).unwrap();
    layout.adjust_cell_sizes(&objects).unwrap();
    let first = (layout.heights().clone(), layout.widths().clone());
    layout.adjust_cell_sizes(&objects).unwrap();
    assert_eq!((layout.heights().clone(), layout.widths().clone()), first);
}

#[test]
fn wide_images_are_squeezed_into_the_grid() {
    let wide = Arc::new(RgbaImage::new(400, 100));
    let objects: Vec<Object> = (0..4)
        .map(|i| {
            ImageObject::from_image(format!("wide{i}"), ImageKind::Other, Arc::clone(&wide)).into()
        })
        .collect();
    let composite =
        Composite::new("grid", GridLayout::new((2, 2), (200, 200)).unwrap(), objects).unwrap();
    let image = composite.render().unwrap();

    assert_eq!(image.dimensions(), (200, 200));
    let layout = match composite.layout() {
        Layout::Grid(grid) => grid,
        other => panic!("expected a grid layout, got {other:?}"),
    };
    let (width, height) = layout.available();
    assert!(sum_column_max(layout) <= width + 1e-9);
    assert!(sum_row_max(layout) <= height + 1e-9);
    // Parts keep their own proportions after rendering
    for object in composite.objects() {
        let size = object.size().unwrap();
        let ratio = size.width as f64 / size.height as f64;
        assert!((ratio - 4.0).abs() <= 0.4, "{size}");
    }
}

#[test]
fn composite_resize_round_trip() {
    let layout = GridLayout::new((4, 3), (120, 100)).unwrap();
    let mut composite = Composite::new("grid", layout, rectangles(12)).unwrap();
    assert_eq!(composite.size(), Size::new(120, 100));

    composite.set_size(Size::new(240, 200)).unwrap();
    assert_eq!(composite.size(), Size::new(240, 200));
    assert_eq!(composite.layout().size(), Size::new(240, 200));
}

#[test]
fn vertical_alignment_mirrors() {
    let objects = sized_rectangles(6, Size::new(1, 1));
    let positions = |valign| {
        let mut layout = GridLayout::new((2, 3), (300, 90))
            .unwrap()
            .with_padding(Padding::ZERO)
            .with_valign(valign);
        layout.adjust_cell_sizes(&objects).unwrap();
        (0..6).map(|i| layout.position(i).unwrap()).collect::<Vec<_>>()
    };
    let top = positions(VAlign::Top);
    let bottom = positions(VAlign::Bottom);

    // 30px squares in 30px rows; columns shrink to the squares
    for i in 0..6 {
        let mirror = (2 - i / 2) * 2 + i % 2;
        assert_eq!(top[i].y, 90 - bottom[mirror].y - 30, "object {i}");
        assert_eq!(top[i].x, bottom[i].x);
    }
    assert_eq!(top[3], Position::new(30, 30));
}

// =========================================================================
// Flexible columns
// =========================================================================

#[test]
fn ragged_columns_take_exactly_nine_objects() {
    let layout = FlexibleColumnsLayout::new((4, 3), vec![3, 2, 1, 3]).unwrap();
    let composite =
        Composite::new("ragged", layout.clone(), sized_rectangles(9, Size::new(8, 8))).unwrap();
    let placed = composite.layout();
    let last = placed.index(8).unwrap();
    assert_eq!((last.column, last.row), (3, 2));
    assert!(matches!(placed.index(9), Err(DiagramError::OutOfBounds { index: 9, .. })));

    assert!(matches!(
        Composite::new("ragged", layout.clone(), sized_rectangles(10, Size::new(8, 8))),
        Err(DiagramError::OutOfBounds { .. })
    ));
    assert!(matches!(
        Composite::new("ragged", layout, sized_rectangles(8, Size::new(8, 8))),
        Err(DiagramError::ObjectCountMismatch { expected: 9, actual: 8 })
    ));
}

#[test]
fn ragged_columns_need_sized_objects() {
    let layout = FlexibleColumnsLayout::new((2, 1), vec![1, 1]).unwrap();
    let err = Composite::new("ragged", layout, rectangles(2)).unwrap_err();
    assert!(matches!(err, DiagramError::MissingSize { name } if name == "rect0"));
}

#[test]
fn ragged_composite_draws_children_in_their_boxes() {
    let objects = vec![
        Rectangle::new("a").with_size(Size::new(10, 10)).with_color(Rgba([0, 0, 255, 255])).into(),
        Rectangle::new("b").with_size(Size::new(10, 10)).into(),
    ];
    let layout = FlexibleColumnsLayout::new((2, 1), vec![1, 1])
        .unwrap()
        .with_padding(Padding::all(5.0));
    let composite = Composite::new("ragged", layout, objects).unwrap();
    let image = composite.render().unwrap();

    assert_eq!(image.dimensions(), (40, 20));
    assert_eq!(image.get_pixel(2, 2)[3], 0);
    assert_eq!(*image.get_pixel(10, 10), Rgba([0, 0, 255, 255]));
    assert_eq!(*image.get_pixel(30, 10), Rgba([255, 0, 0, 255]));
}

// =========================================================================
// Image parts
// =========================================================================

#[test]
fn image_part_size_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a100.png");
    RgbaImage::from_pixel(1200, 636, Rgba([0, 90, 0, 255])).save(&path).unwrap();

    let mut cache = ImageCache::new();
    let mut gpu = ImageObject::open(&mut cache, "gpu0", &path, ImageKind::Gpu).unwrap();
    gpu.set_size(Size::new(600, 318)).unwrap();
    assert_eq!(gpu.size(), Size::new(600, 318));

    let err = gpu.set_size(Size::new(800, 318)).unwrap_err();
    assert!(matches!(err, DiagramError::AspectRatioViolation { .. }));
    assert!(err.to_string().contains("does not match image ratio"));
    assert_eq!(gpu.size(), Size::new(600, 318));
}
