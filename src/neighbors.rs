use crate::grid::{CellId, Grid};

/// The in-bounds cells of the 3x3 block around `id`, excluding `id` itself.
///
/// Cells are produced in ascending x, then ascending y. The search breaks
/// FCost ties by insertion order, so this order decides which of two equal
/// candidates is expanded first.
pub fn neighbors_of(grid: &Grid, id: CellId) -> Vec<CellId> {
    let mut buf = Vec::with_capacity(8);
    collect_neighbors(grid, id, &mut buf);
    buf
}

/// Same as [`neighbors_of`], appending into a reusable buffer.
/// The caller clears `buf` before calling.
pub(crate) fn collect_neighbors(grid: &Grid, id: CellId, buf: &mut Vec<CellId>) {
    let center = grid.cell(id).position();

    let min_x = (center.x - 1).max(0);
    let max_x = (center.x + 1).min(grid.width() - 1);
    let min_y = (center.y - 1).max(0);
    let max_y = (center.y + 1).min(grid.height() - 1);

    for x in min_x..=max_x {
        for y in min_y..=max_y {
            if x == center.x && y == center.y {
                continue;
            }
            if let Ok(neighbor) = grid.id(x, y) {
                buf.push(neighbor);
            }
        }
    }
}
