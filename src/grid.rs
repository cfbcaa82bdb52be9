use crate::error::GridError;

/// A position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Manhattan distance |dx| + |dy|
    pub fn manhattan(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Chebyshev distance, the number of 8-connected moves between two cells
    pub fn chebyshev(&self, other: &Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position::new(x, y)
    }
}

/// Handle to a cell in the grid's storage (row-major index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) usize);

impl CellId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a cell currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    Frontier,
    Visited,
    FinalPath,
}

impl CellKind {
    /// Kinds written by the search and wiped by a reset
    pub fn is_exploration(self) -> bool {
        matches!(self, CellKind::Frontier | CellKind::Visited | CellKind::FinalPath)
    }

    pub fn is_endpoint(self) -> bool {
        matches!(self, CellKind::Start | CellKind::End)
    }
}

/// One grid position with its search bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    pub(crate) kind: CellKind,
    pub(crate) g_cost: i32,
    pub(crate) h_cost: i32,
    pub(crate) f_cost: i32,
    pub(crate) came_from: Option<CellId>,
}

impl Cell {
    fn new(position: Position) -> Self {
        Cell {
            position,
            kind: CellKind::Empty,
            g_cost: 0,
            h_cost: 0,
            f_cost: 0,
            came_from: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// Cost from the start cell
    pub fn g_cost(&self) -> i32 {
        self.g_cost
    }

    /// Heuristic estimate to the end cell
    pub fn h_cost(&self) -> i32 {
        self.h_cost
    }

    /// `g_cost + h_cost`
    pub fn f_cost(&self) -> i32 {
        self.f_cost
    }

    /// Predecessor on the best path found so far
    pub fn came_from(&self) -> Option<CellId> {
        self.came_from
    }

    fn clear_exploration(&mut self) {
        self.g_cost = 0;
        self.h_cost = 0;
        self.f_cost = 0;
        self.came_from = None;
        if self.kind.is_exploration() {
            self.kind = CellKind::Empty;
        }
    }
}

/// Largest number of cells a grid may hold
pub const MAX_CELLS: usize = 1 << 20;

/// Fixed-size grid owning every cell
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    /// Revision number - incremented whenever a cell kind changes
    revision: u64,
}

impl Grid {
    /// Create a new grid with all cells empty
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::invalid(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        let count = width
            .checked_mul(height)
            .map(|count| count as usize)
            .filter(|&count| count <= MAX_CELLS)
            .ok_or_else(|| {
                GridError::invalid(format!(
                    "{}x{} grid exceeds the limit of {} cells",
                    width, height, MAX_CELLS
                ))
            })?;

        let mut cells = Vec::with_capacity(count);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(Position::new(x, y)));
            }
        }

        Ok(Grid {
            width,
            height,
            cells,
            revision: 0,
        })
    }

    /// Create a grid with specific wall cells
    pub fn with_walls(width: i32, height: i32, walls: &[Position]) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height)?;
        for wall in walls {
            grid.set_kind(wall.x, wall.y, CellKind::Wall)?;
        }
        Ok(grid)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Convert (x, y) coordinates to a cell handle
    pub fn id(&self, x: i32, y: i32) -> Result<CellId, GridError> {
        if !self.contains(x, y) {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(CellId((x + y * self.width) as usize))
    }

    /// Cell at (x, y)
    pub fn get(&self, x: i32, y: i32) -> Result<&Cell, GridError> {
        let id = self.id(x, y)?;
        Ok(&self.cells[id.0])
    }

    /// Cell behind a handle obtained from this grid
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    pub(crate) fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.0]
    }

    /// Set the kind of the cell at (x, y)
    pub fn set_kind(&mut self, x: i32, y: i32, kind: CellKind) -> Result<(), GridError> {
        let id = self.id(x, y)?;
        self.mark(id, kind);
        Ok(())
    }

    pub(crate) fn mark(&mut self, id: CellId, kind: CellKind) {
        let cell = &mut self.cells[id.0];
        if cell.kind != kind {
            cell.kind = kind;
            self.revision += 1;
        }
    }

    /// Clear costs and predecessors, and turn Frontier/Visited/FinalPath
    /// cells back to Empty. Start, End and Wall cells keep their kind.
    pub fn reset_exploration_state(&mut self) {
        let mut changed = false;
        for cell in &mut self.cells {
            changed |= cell.kind.is_exploration();
            cell.clear_exploration();
        }
        if changed {
            self.revision += 1;
        }
    }

    /// Reset exploration and also remove every wall.
    pub fn clear_walls(&mut self) {
        self.reset_exploration_state();
        let mut changed = false;
        for cell in &mut self.cells {
            if cell.kind == CellKind::Wall {
                cell.kind = CellKind::Empty;
                changed = true;
            }
        }
        if changed {
            self.revision += 1;
        }
    }

    /// Every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Positions of every cell of the given kind, row-major
    pub fn positions_of(&self, kind: CellKind) -> Vec<Position> {
        self.cells
            .iter()
            .filter(|cell| cell.kind == kind)
            .map(|cell| cell.position)
            .collect()
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|cell| cell.kind == kind).count()
    }

    /// Get current grid revision number
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
