use log::trace;

use crate::error::GridError;
use crate::grid::{CellKind, Grid};

/// What a pointer edit paints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brush {
    Wall,
    Empty,
}

impl Brush {
    pub fn kind(self) -> CellKind {
        match self {
            Brush::Wall => CellKind::Wall,
            Brush::Empty => CellKind::Empty,
        }
    }
}

/// A single-cell edit coming from the input side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridEdit {
    pub x: i32,
    pub y: i32,
    pub brush: Brush,
}

impl GridEdit {
    pub fn new(x: i32, y: i32, brush: Brush) -> Self {
        GridEdit { x, y, brush }
    }

    /// Translate a pointer position in pixels into an edit.
    ///
    /// Positions outside the grid (or a non-positive cell size) produce
    /// `None`, so out-of-range input never reaches the grid.
    pub fn from_pointer(
        px: f32,
        py: f32,
        cell_size: f32,
        brush: Brush,
        grid: &Grid,
    ) -> Option<Self> {
        if cell_size <= 0.0 || px < 0.0 || py < 0.0 {
            return None;
        }

        let x = (px / cell_size) as i32;
        let y = (py / cell_size) as i32;
        if !grid.contains(x, y) {
            return None;
        }
        Some(GridEdit::new(x, y, brush))
    }

    /// Apply the edit. Start and End cells are never painted over.
    /// Returns whether the cell changed.
    pub fn apply(&self, grid: &mut Grid) -> Result<bool, GridError> {
        let current = grid.get(self.x, self.y)?.kind();
        if current.is_endpoint() {
            return Ok(false);
        }

        let kind = self.brush.kind();
        if current == kind {
            return Ok(false);
        }

        grid.set_kind(self.x, self.y, kind)?;
        trace!("painted ({},{}) {:?}", self.x, self.y, kind);
        Ok(true)
    }
}
