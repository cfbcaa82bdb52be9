#![allow(dead_code)]

use astar_demo::layout::{self, Layout};
use astar_demo::{search, CellKind, CostModel, Grid, Outcome, Position};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Scenario fixture stored under test_data/scenarios
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost_model: CostModel,
    pub layout: Vec<String>,
    pub expect: Expect,
    pub path_len: Option<usize>,
    pub expansions: Option<usize>,
    #[serde(default)]
    pub path_through: Vec<[i32; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expect {
    Succeeded,
    Exhausted,
}

/// Load a scenario from a JSON file
pub fn load_scenario(path: &Path) -> Result<Scenario, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let scenario: Scenario = serde_json::from_str(&contents)?;
    Ok(scenario)
}

/// Every scenario in the directory, sorted by file name
pub fn load_scenarios(dir: &str) -> Vec<Scenario> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot read {}: {}", dir, e))
        .filter_map(Result::ok)
        .collect();
    entries.sort_by_key(|e| e.file_name());

    entries
        .iter()
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .map(|path| {
            load_scenario(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
        })
        .collect()
}

/// Parse an ASCII layout given row by row
pub fn parse_rows(rows: &[&str]) -> Layout {
    layout::parse(&rows.join("\n")).expect("valid layout")
}

/// Run a search over a parsed layout, recording the order of expansions
pub fn run_layout(layout: &mut Layout, cost_model: CostModel) -> (Outcome, usize) {
    let mut steps = 0;
    let outcome = search::run(&mut layout.grid, layout.start, layout.end, cost_model, |_| {
        steps += 1
    })
    .expect("endpoints in bounds");
    (outcome, steps)
}

/// Grid of the given size with the endpoints marked and optional walls
pub fn grid_with(
    width: i32,
    height: i32,
    start: Position,
    end: Position,
    walls: &[Position],
) -> Grid {
    let mut grid = Grid::with_walls(width, height, walls).expect("valid grid");
    grid.set_kind(start.x, start.y, CellKind::Start).unwrap();
    grid.set_kind(end.x, end.y, CellKind::End).unwrap();
    grid
}

/// Horizontal wall at row `y` covering `xs`
pub fn wall_row(y: i32, xs: impl IntoIterator<Item = i32>) -> Vec<Position> {
    xs.into_iter().map(|x| Position::new(x, y)).collect()
}

/// Check that consecutive path cells are 8-connected neighbours
pub fn assert_connected(path: &[Position]) {
    for pair in path.windows(2) {
        assert_eq!(
            pair[0].chebyshev(&pair[1]),
            1,
            "path jumps from {:?} to {:?}",
            pair[0],
            pair[1]
        );
    }
}

/// Visualize a grid for failure output
pub fn visualize(grid: &Grid) -> String {
    format!("\n{}", layout::render(grid))
}
