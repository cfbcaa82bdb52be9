use log::{debug, trace};
use serde::Deserialize;

use crate::error::GridError;
use crate::frontier::Frontier;
use crate::grid::{CellId, CellKind, Grid, Position};
use crate::neighbors::collect_neighbors;

/// How the cost from the start (GCost) of a candidate cell is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostModel {
    /// Manhattan distance from the start cell straight to the candidate,
    /// ignoring the route taken. This is not the textbook A* cost and can
    /// produce longer paths when walls force a detour.
    #[default]
    FromStart,
    /// The expanded cell's GCost plus one. Diagonal and orthogonal moves
    /// cost the same.
    Accumulated,
}

impl CostModel {
    fn g_cost(self, start: Position, current_g: i32, candidate: Position) -> i32 {
        match self {
            CostModel::FromStart => start.manhattan(&candidate),
            CostModel::Accumulated => current_g + 1,
        }
    }
}

/// Lifecycle of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Running,
    Succeeded,
    Exhausted,
    Cancelled,
}

impl SearchStatus {
    pub fn is_finished(self) -> bool {
        matches!(
            self,
            SearchStatus::Succeeded | SearchStatus::Exhausted | SearchStatus::Cancelled
        )
    }
}

/// Terminal result of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The end cell was reached. `path` runs from start to end inclusive.
    Succeeded { path: Vec<Position> },
    /// The frontier ran dry: no path exists.
    Exhausted,
    /// Stopped by [`Search::cancel`] before finishing.
    Cancelled,
}

impl Outcome {
    pub fn path(&self) -> Option<&[Position]> {
        match self {
            Outcome::Succeeded { path } => Some(path),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded { .. })
    }

    pub fn status(&self) -> SearchStatus {
        match self {
            Outcome::Succeeded { .. } => SearchStatus::Succeeded,
            Outcome::Exhausted => SearchStatus::Exhausted,
            Outcome::Cancelled => SearchStatus::Cancelled,
        }
    }
}

/// Result of a single call to [`Search::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    /// A cell was expanded and the search goes on.
    Expanded(Position),
    /// The search is over. Further calls keep returning the same outcome.
    Done(Outcome),
}

/// One A*-style search over a grid, advanced one expansion at a time.
///
/// The search keeps its own open and closed sets; cell kinds and costs are
/// written into the grid passed to [`step`](Search::step), which must be the
/// grid the search was created for.
#[derive(Debug)]
pub struct Search {
    start: CellId,
    end: CellId,
    start_pos: Position,
    end_pos: Position,
    cost_model: CostModel,
    frontier: Frontier,
    visited: Vec<bool>,
    status: SearchStatus,
    expansions: usize,
    path: Vec<Position>,
    // scratch buffer for neighbor queries
    nbuf: Vec<CellId>,
}

impl Search {
    /// Prepare a search from `start` to `end`. Only the start cell is in the
    /// frontier. Fails with `OutOfBounds` if either endpoint is off the grid.
    pub fn new(
        grid: &mut Grid,
        start: Position,
        end: Position,
        cost_model: CostModel,
    ) -> Result<Self, GridError> {
        let start_id = grid.id(start.x, start.y)?;
        let end_id = grid.id(end.x, end.y)?;

        let h_cost = start.manhattan(&end);
        let cell = grid.cell_mut(start_id);
        cell.g_cost = 0;
        cell.h_cost = h_cost;
        cell.f_cost = h_cost;
        cell.came_from = None;

        let mut frontier = Frontier::new(grid.len());
        frontier.push(start_id, h_cost);

        debug!(
            "search ({},{}) -> ({},{}) on {}x{} grid, cost model {:?}",
            start.x,
            start.y,
            end.x,
            end.y,
            grid.width(),
            grid.height(),
            cost_model
        );

        Ok(Search {
            start: start_id,
            end: end_id,
            start_pos: start,
            end_pos: end,
            cost_model,
            frontier,
            visited: vec![false; grid.len()],
            status: SearchStatus::Idle,
            expansions: 0,
            path: Vec::new(),
            nbuf: Vec::with_capacity(8),
        })
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn start(&self) -> Position {
        self.start_pos
    }

    pub fn end(&self) -> Position {
        self.end_pos
    }

    pub fn cost_model(&self) -> CostModel {
        self.cost_model
    }

    /// Number of cells expanded so far
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Number of cells waiting in the open set
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn is_visited(&self, id: CellId) -> bool {
        self.visited.get(id.index()).copied().unwrap_or(false)
    }

    /// The terminal outcome, once the search has finished.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            SearchStatus::Succeeded => Some(Outcome::Succeeded {
                path: self.path.clone(),
            }),
            SearchStatus::Exhausted => Some(Outcome::Exhausted),
            SearchStatus::Cancelled => Some(Outcome::Cancelled),
            SearchStatus::Idle | SearchStatus::Running => None,
        }
    }

    /// Stop a search that has not finished yet. Finished searches keep
    /// their outcome.
    pub fn cancel(&mut self) {
        if !self.status.is_finished() {
            debug!("search cancelled after {} expansions", self.expansions);
            self.status = SearchStatus::Cancelled;
        }
    }

    /// Expand the lowest-FCost frontier cell.
    pub fn step(&mut self, grid: &mut Grid) -> StepResult {
        if let Some(outcome) = self.outcome() {
            return StepResult::Done(outcome);
        }
        self.status = SearchStatus::Running;

        let Some(current) = self.frontier.pop() else {
            self.status = SearchStatus::Exhausted;
            debug!("no path found after {} expansions", self.expansions);
            return StepResult::Done(Outcome::Exhausted);
        };

        if current != self.start && current != self.end {
            grid.mark(current, CellKind::Visited);
        }
        self.visited[current.index()] = true;
        self.expansions += 1;

        let current_pos = grid.cell(current).position();
        trace!(
            "expand ({},{}) f={} frontier={}",
            current_pos.x,
            current_pos.y,
            grid.cell(current).f_cost(),
            self.frontier.len()
        );

        if current == self.end {
            self.path = self.reconstruct(grid);
            self.status = SearchStatus::Succeeded;
            debug!(
                "path found: {} cells after {} expansions",
                self.path.len(),
                self.expansions
            );
            return StepResult::Done(Outcome::Succeeded {
                path: self.path.clone(),
            });
        }

        self.relax_neighbors(grid, current);
        StepResult::Expanded(current_pos)
    }

    fn relax_neighbors(&mut self, grid: &mut Grid, current: CellId) {
        let current_g = grid.cell(current).g_cost();

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        collect_neighbors(grid, current, &mut nbuf);

        for &neighbor in &nbuf {
            let cell = grid.cell(neighbor);
            if cell.kind() == CellKind::Wall || self.visited[neighbor.index()] {
                continue;
            }

            let pos = cell.position();
            let g_cost = self.cost_model.g_cost(self.start_pos, current_g, pos);
            let h_cost = pos.manhattan(&self.end_pos);
            let f_cost = g_cost + h_cost;

            let in_frontier = self.frontier.contains(neighbor);
            if f_cost >= cell.f_cost() && in_frontier {
                continue;
            }

            let cell = grid.cell_mut(neighbor);
            cell.g_cost = g_cost;
            cell.h_cost = h_cost;
            cell.f_cost = f_cost;
            cell.came_from = Some(current);

            // Endpoints keep their marker.
            if neighbor != self.start && neighbor != self.end {
                grid.mark(neighbor, CellKind::Frontier);
            }

            if in_frontier {
                self.frontier.update(neighbor, f_cost);
            } else {
                self.frontier.push(neighbor, f_cost);
            }
        }

        self.nbuf = nbuf;
    }

    /// Walk came-from links back from the end cell, marking the cells
    /// between the endpoints as FinalPath.
    fn reconstruct(&self, grid: &mut Grid) -> Vec<Position> {
        let mut path = Vec::new();
        let mut cursor = Some(self.end);

        while let Some(id) = cursor {
            path.push(grid.cell(id).position());
            if id == self.start {
                break;
            }
            if id != self.end {
                grid.mark(id, CellKind::FinalPath);
            }
            cursor = grid.cell(id).came_from();
        }

        path.reverse();
        path
    }

    /// Step until the search finishes, calling `on_step` after every
    /// expansion (including the one that reaches the end cell).
    pub fn run_to_end<F>(&mut self, grid: &mut Grid, mut on_step: F) -> Outcome
    where
        F: FnMut(&Grid),
    {
        loop {
            let before = self.expansions;
            let result = self.step(grid);
            if self.expansions > before {
                on_step(&*grid);
            }
            if let StepResult::Done(outcome) = result {
                return outcome;
            }
        }
    }
}

/// Run a complete search from `start` to `end` on `grid`.
///
/// `on_step` is called once per expansion with read-only access to the
/// grid, for animation. The grid is not reset first; callers that re-run
/// a search call [`Grid::reset_exploration_state`] beforehand.
pub fn run<F>(
    grid: &mut Grid,
    start: Position,
    end: Position,
    cost_model: CostModel,
    on_step: F,
) -> Result<Outcome, GridError>
where
    F: FnMut(&Grid),
{
    let mut search = Search::new(grid, start, end, cost_model)?;
    Ok(search.run_to_end(grid, on_step))
}
