//! Clustermap - Cluster hardware topology diagrams.
//!
//! This crate renders compute clusters (nodes, GPUs, CPUs, memory) as PNG
//! diagrams built from part pictures:
//! - Grid layout engines (uniform and ragged-column)
//! - Object model (rectangles, image parts, composites, framed boxes)
//! - Raster backend (canvas ops, rounded rectangles, labels, decode cache)
//! - Topology files and the builders that turn them into object trees
//!
//! # Usage
//!
//! ```ignore
//! use clustermap::{GridLayout, Composite, Rectangle, Size};
//!
//! let objects = (0..6).map(|i| Rectangle::new(format!("r{i}")).into()).collect();
//! let layout = GridLayout::new((2, 3), (20, 60))?;
//! let grid = Composite::new("grid", layout, objects)?;
//! clustermap::raster::save_png(&grid.render()?, "grid.png")?;
//! ```

pub mod image_cache;
pub mod label;
pub mod layout;
pub mod object;
pub mod primitives;
pub mod raster;
pub mod topology;

mod error;

pub use error::{DiagramError, Result};
pub use image_cache::ImageCache;
pub use label::LabelFont;
pub use layout::{
    CellMatrix, FillOrder, FlexibleColumnsLayout, GridLayout, HAlign, Layout, Sizable, VAlign,
};
pub use object::{
    BoundingBox, ChildSizing, Composite, ImageKind, ImageObject, Object, Rectangle,
};
pub use primitives::{CellIndex, GridShape, Padding, Position, Size};
pub use topology::{BuildOptions, TopologyConfig};
