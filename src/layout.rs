//! Plain-text grid layouts.
//!
//! One character per cell, one line per row:
//!
//! | Symbol | Kind |
//! |---|---|
//! | `.` | Empty |
//! | `#` | Wall |
//! | `S` | Start |
//! | `E` | End |
//! | `o` | Frontier |
//! | `x` | Visited |
//! | `*` | FinalPath |
//!
//! Blank lines and surrounding whitespace are ignored when parsing.

use crate::error::LayoutError;
use crate::grid::{CellKind, Grid, Position};

/// A parsed layout: the grid plus its endpoints
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid: Grid,
    pub start: Position,
    pub end: Position,
}

pub fn symbol(kind: CellKind) -> char {
    match kind {
        CellKind::Empty => '.',
        CellKind::Wall => '#',
        CellKind::Start => 'S',
        CellKind::End => 'E',
        CellKind::Frontier => 'o',
        CellKind::Visited => 'x',
        CellKind::FinalPath => '*',
    }
}

pub fn kind_of(symbol: char) -> Option<CellKind> {
    match symbol {
        '.' => Some(CellKind::Empty),
        '#' => Some(CellKind::Wall),
        'S' => Some(CellKind::Start),
        'E' => Some(CellKind::End),
        'o' => Some(CellKind::Frontier),
        'x' => Some(CellKind::Visited),
        '*' => Some(CellKind::FinalPath),
        _ => None,
    }
}

/// Render every cell kind, one row per line.
pub fn render(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.len() + grid.height() as usize);

    for (i, cell) in grid.cells().enumerate() {
        result.push(symbol(cell.kind()));
        if (i + 1) % grid.width() as usize == 0 {
            result.push('\n');
        }
    }

    result
}

/// Parse a layout. Exactly one `S` and one `E` are required.
pub fn parse(text: &str) -> Result<Layout, LayoutError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if rows.is_empty() {
        return Err(LayoutError::Empty);
    }

    let width = rows[0].chars().count();
    for (row, line) in rows.iter().enumerate() {
        let found = line.chars().count();
        if found != width {
            return Err(LayoutError::RaggedRow {
                row,
                expected: width,
                found,
            });
        }
    }

    let mut grid = Grid::new(width as i32, rows.len() as i32)?;
    let mut start = None;
    let mut end = None;

    for (y, line) in rows.iter().enumerate() {
        for (x, ch) in line.chars().enumerate() {
            let kind = kind_of(ch).ok_or(LayoutError::UnknownSymbol { symbol: ch, x, y })?;
            let pos = Position::new(x as i32, y as i32);

            if kind == CellKind::Start && start.replace(pos).is_some() {
                return Err(LayoutError::Duplicate('S'));
            }
            if kind == CellKind::End && end.replace(pos).is_some() {
                return Err(LayoutError::Duplicate('E'));
            }

            grid.set_kind(pos.x, pos.y, kind)?;
        }
    }

    Ok(Layout {
        grid,
        start: start.ok_or(LayoutError::Missing('S'))?,
        end: end.ok_or(LayoutError::Missing('E'))?,
    })
}

/// Fails with `DimensionMismatch` unless `source` has the size of `target`.
pub fn check_same_size(source: &Grid, target: &Grid) -> Result<(), LayoutError> {
    if source.width() != target.width() || source.height() != target.height() {
        return Err(LayoutError::DimensionMismatch {
            width: target.width(),
            height: target.height(),
            found_width: source.width(),
            found_height: source.height(),
        });
    }
    Ok(())
}

/// Copy the wall layout of `source` onto `target`. Both grids must have the
/// same dimensions; Start and End cells of `target` are left alone.
pub fn copy_walls(source: &Grid, target: &mut Grid) -> Result<(), LayoutError> {
    check_same_size(source, target)?;

    target.clear_walls();
    for wall in source.positions_of(CellKind::Wall) {
        if !target.get(wall.x, wall.y)?.kind().is_endpoint() {
            target.set_kind(wall.x, wall.y, CellKind::Wall)?;
        }
    }
    Ok(())
}
