use log::info;

use crate::config::Config;
use crate::edit::GridEdit;
use crate::error::{GridError, LayoutError};
use crate::grid::{CellKind, Grid, Position};
use crate::layout;
use crate::search::{CostModel, Outcome, Search, SearchStatus, StepResult};

/// Session state behind the window: the grid, its fixed endpoints and at
/// most one search in flight.
#[derive(Debug)]
pub struct Demo {
    grid: Grid,
    start: Position,
    end: Position,
    cost_model: CostModel,
    search: Option<Search>,
    last_outcome: Option<Outcome>,
}

impl Demo {
    pub fn new(
        width: i32,
        height: i32,
        start: Position,
        end: Position,
        cost_model: CostModel,
    ) -> Result<Self, GridError> {
        let mut grid = Grid::new(width, height)?;
        grid.set_kind(start.x, start.y, CellKind::Start)?;
        grid.set_kind(end.x, end.y, CellKind::End)?;

        Ok(Demo {
            grid,
            start,
            end,
            cost_model,
            search: None,
            last_outcome: None,
        })
    }

    /// Build the startup scene described by the configuration
    pub fn from_config(config: &Config) -> Result<Self, GridError> {
        config.validate()?;
        let grid_config = &config.grid;

        let mut demo = Demo::new(
            grid_config.cols(),
            grid_config.rows(),
            grid_config.start_position(),
            grid_config.end_position(),
            config.search.cost_model,
        )?;
        for wall in grid_config.seed_walls() {
            demo.grid.set_kind(wall.x, wall.y, CellKind::Wall)?;
        }

        info!(
            "{}x{} grid, start ({},{}), end ({},{})",
            demo.grid.width(),
            demo.grid.height(),
            demo.start.x,
            demo.start.y,
            demo.end.x,
            demo.end.y
        );
        Ok(demo)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn cost_model(&self) -> CostModel {
        self.cost_model
    }

    pub fn set_cost_model(&mut self, cost_model: CostModel) {
        self.cost_model = cost_model;
    }

    pub fn status(&self) -> SearchStatus {
        match (&self.search, &self.last_outcome) {
            (Some(search), _) => search.status(),
            (None, Some(outcome)) => outcome.status(),
            (None, None) => SearchStatus::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.search.is_some()
    }

    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// Expansions made by the search in flight, if any
    pub fn expansions(&self) -> Option<usize> {
        self.search.as_ref().map(Search::expansions)
    }

    /// Paint one cell. Ignored while a search is in flight.
    pub fn apply_edit(&mut self, edit: GridEdit) -> Result<bool, GridError> {
        if self.is_running() {
            return Ok(false);
        }
        edit.apply(&mut self.grid)
    }

    /// Start a new search from a clean exploration state. Returns `false`
    /// if a search is already in flight.
    pub fn trigger_search(&mut self) -> Result<bool, GridError> {
        if self.is_running() {
            return Ok(false);
        }

        self.grid.reset_exploration_state();
        self.last_outcome = None;
        self.search = Some(Search::new(
            &mut self.grid,
            self.start,
            self.end,
            self.cost_model,
        )?);
        info!("search started ({:?})", self.cost_model);
        Ok(true)
    }

    /// Advance the search in flight by up to `steps` expansions. Returns the
    /// outcome once it finishes.
    pub fn tick(&mut self, steps: u32) -> Option<Outcome> {
        let search = self.search.as_mut()?;

        for _ in 0..steps {
            if let StepResult::Done(outcome) = search.step(&mut self.grid) {
                match &outcome {
                    Outcome::Succeeded { path } => {
                        info!(
                            "path found: {} cells, {} expansions",
                            path.len(),
                            search.expansions()
                        );
                    }
                    Outcome::Exhausted => {
                        info!("no path found after {} expansions", search.expansions());
                    }
                    Outcome::Cancelled => {}
                }
                self.search = None;
                self.last_outcome = Some(outcome.clone());
                return Some(outcome);
            }
        }
        None
    }

    /// Trigger a search and step it until it finishes.
    pub fn run_to_completion(&mut self) -> Result<Outcome, GridError> {
        self.cancel();
        self.trigger_search()?;
        loop {
            if let Some(outcome) = self.tick(u32::MAX) {
                return Ok(outcome);
            }
        }
    }

    fn cancel(&mut self) {
        if let Some(mut search) = self.search.take() {
            search.cancel();
            self.last_outcome = search.outcome();
        }
    }

    /// Drop any search and clear exploration marks, keeping walls
    pub fn reset(&mut self) {
        self.cancel();
        self.grid.reset_exploration_state();
        self.last_outcome = None;
        info!("exploration reset");
    }

    /// Drop any search and remove every wall
    pub fn clear(&mut self) {
        self.cancel();
        self.grid.clear_walls();
        self.last_outcome = None;
        info!("grid cleared");
    }

    pub fn layout_text(&self) -> String {
        layout::render(&self.grid)
    }

    /// Replace the wall layout with the walls of a pasted text layout of
    /// the same dimensions. A rejected paste leaves the session untouched.
    pub fn paste_walls(&mut self, text: &str) -> Result<(), LayoutError> {
        let pasted = layout::parse(text)?;
        layout::check_same_size(&pasted.grid, &self.grid)?;
        self.cancel();
        layout::copy_walls(&pasted.grid, &mut self.grid)?;
        self.last_outcome = None;
        info!("pasted {} walls", self.grid.count(CellKind::Wall));
        Ok(())
    }
}
