//! Layout spec and auto-scaled grid layout.

use serde::{Deserialize, Serialize};

use crate::core::GridSize;
use crate::error::LayoutError;

/// Width/height pair in layout units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size2 {
    pub width: f32,
    pub height: f32,
}

impl Size2 {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Physical sizing used to validate a grid before dealing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    /// Size of one card.
    pub card_size: Size2,

    /// Minimum gap between adjacent cards.
    pub spacing: Size2,

    /// Area the whole grid must fit in.
    pub bounding_area: Size2,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            card_size: Size2::new(115.0, 181.0),
            spacing: Size2::new(10.0, 10.0),
            bounding_area: Size2::new(1500.0, 800.0),
        }
    }
}

impl LayoutSpec {
    /// Create a spec from card size, spacing and bounding area.
    pub fn new(card_size: Size2, spacing: Size2, bounding_area: Size2) -> Self {
        Self {
            card_size,
            spacing,
            bounding_area,
        }
    }

    /// Space the grid needs at minimum spacing.
    ///
    /// `n * size + (n - 1) * spacing` per axis.
    #[must_use]
    pub fn required_size(&self, grid: GridSize) -> Size2 {
        let cols = f32::from(grid.cols);
        let rows = f32::from(grid.rows);
        Size2::new(
            self.card_size.width * cols + self.spacing.width * (cols - 1.0),
            self.card_size.height * rows + self.spacing.height * (rows - 1.0),
        )
    }

    /// Check that the grid has cells and fits the bounding area.
    pub fn check(&self, grid: GridSize) -> Result<(), LayoutError> {
        if grid.is_empty() {
            return Err(LayoutError::EmptyGrid { grid });
        }

        let required = self.required_size(grid);
        if required.width <= self.bounding_area.width
            && required.height <= self.bounding_area.height
        {
            Ok(())
        } else {
            Err(LayoutError::DoesNotFit {
                grid,
                required_width: required.width,
                required_height: required.height,
                available_width: self.bounding_area.width,
                available_height: self.bounding_area.height,
            })
        }
    }

    /// Spread the grid evenly across the bounding area.
    ///
    /// Leftover space on each axis is split into `n + 1` equal gaps, so the
    /// margins match the gaps between cards. Call [`LayoutSpec::check`]
    /// first; an infeasible grid yields negative spacing.
    #[must_use]
    pub fn auto_scale(&self, grid: GridSize) -> GridLayout {
        let cols = f32::from(grid.cols);
        let rows = f32::from(grid.rows);

        let total_width = cols * self.card_size.width;
        let total_height = rows * self.card_size.height;

        let spacing = Size2::new(
            (self.bounding_area.width - total_width) / (cols + 1.0),
            (self.bounding_area.height - total_height) / (rows + 1.0),
        );

        let container = Size2::new(
            total_width + spacing.width * (cols - 1.0).max(0.0),
            total_height + spacing.height * (rows - 1.0).max(0.0),
        );

        GridLayout {
            grid,
            cell_size: self.card_size,
            spacing,
            container,
        }
    }
}

/// Layout handed to the presentation when a game starts.
///
/// Cells are placed row-major with a fixed column count of `grid.cols`,
/// anchored at the container's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub grid: GridSize,
    pub cell_size: Size2,
    pub spacing: Size2,
    pub container: Size2,
}

impl GridLayout {
    /// Top-left corner of a cell relative to the container.
    #[must_use]
    pub fn cell_origin(&self, index: usize) -> Size2 {
        let cols = usize::from(self.grid.cols.max(1));
        let col = (index % cols) as f32;
        let row = (index / cols) as f32;
        Size2::new(
            col * (self.cell_size.width + self.spacing.width),
            row * (self.cell_size.height + self.spacing.height),
        )
    }
}
