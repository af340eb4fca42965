//! Objects arranged by a layout.
//!
//! A composite's size is always its layout's size. Changing the size, or the
//! set of children, re-runs `adjust_cell_sizes`; reading never does.

use image::{Rgba, RgbaImage};

use crate::error::Result;
use crate::layout::Layout;
use crate::primitives::Size;
use crate::raster::{self, TRANSPARENT};

use super::Object;

/// How children are sized when the composite renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChildSizing {
    /// Push the layout's cell size onto each child before drawing it.
    #[default]
    FromLayout,
    /// Draw children at whatever size they already have.
    Intrinsic,
}

#[derive(Debug, Clone)]
pub struct Composite {
    name: String,
    layout: Layout,
    objects: Vec<Object>,
    background: Rgba<u8>,
    child_sizing: ChildSizing,
}

impl Composite {
    /// Arrange `objects` with `layout`, computing cell sizes right away.
    pub fn new(
        name: impl Into<String>,
        layout: impl Into<Layout>,
        objects: Vec<Object>,
    ) -> Result<Self> {
        let mut layout = layout.into();
        layout.adjust_cell_sizes(&objects)?;
        Ok(Self {
            name: name.into(),
            layout,
            objects,
            background: TRANSPARENT,
            child_sizing: ChildSizing::default(),
        })
    }

    pub fn with_background(mut self, background: Rgba<u8>) -> Self {
        self.background = background;
        self
    }

    pub fn with_child_sizing(mut self, child_sizing: ChildSizing) -> Self {
        self.child_sizing = child_sizing;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn child_sizing(&self) -> ChildSizing {
        self.child_sizing
    }

    pub fn size(&self) -> Size {
        self.layout.size()
    }

    /// Retarget the layout and recompute cell sizes.
    pub fn set_size(&mut self, size: Size) -> Result<()> {
        tracing::debug!(name = %self.name, size = %size, "resizing composite");
        self.layout.set_size(size);
        self.layout.adjust_cell_sizes(&self.objects)
    }

    /// Append a child. If the layout cannot place it, the child is dropped
    /// and the error returned.
    pub fn push(&mut self, object: impl Into<Object>) -> Result<()> {
        self.objects.push(object.into());
        if let Err(e) = self.layout.adjust_cell_sizes(&self.objects) {
            self.objects.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Draw every child at its cell position, in index order.
    ///
    /// Later children overwrite earlier ones where they overlap. With
    /// [`ChildSizing::FromLayout`] a child is drawn at its cell size but keeps
    /// its own size, so rendering never changes a later layout pass.
    pub fn render(&self) -> Result<RgbaImage> {
        let mut canvas = raster::new_canvas(self.size(), self.background);
        for (i, child) in self.objects.iter().enumerate() {
            let position = self.layout.position(i)?;
            let image = match self.child_sizing {
                ChildSizing::FromLayout => {
                    let cell = self.layout.cell_size(i)?;
                    if child.size() == Some(cell) {
                        child.render()?
                    } else {
                        tracing::debug!(
                            parent = %self.name,
                            child = child.name(),
                            size = %cell,
                            "drawing child at cell size"
                        );
                        let mut resized = child.clone();
                        resized.set_size(cell)?;
                        resized.render()?
                    }
                }
                ChildSizing::Intrinsic => child.render()?,
            };
            raster::paste(&mut canvas, &image, position);
        }
        Ok(canvas)
    }
}
