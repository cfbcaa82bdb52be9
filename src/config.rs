use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, GridError};
use crate::grid::{Position, MAX_CELLS};
use crate::search::CostModel;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub visual: VisualConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    /// Window width in pixels; the grid has `width_px / cell_size` columns
    #[serde(default = "default_width_px")]
    pub width_px: i32,
    #[serde(default = "default_height_px")]
    pub height_px: i32,
    #[serde(default = "default_cell_size")]
    pub cell_size: i32,
    /// `[x, y]` of the start cell, top centre when unset
    #[serde(default)]
    pub start: Option<[i32; 2]>,
    /// `[x, y]` of the end cell, just below the seeded wall when unset
    #[serde(default)]
    pub end: Option<[i32; 2]>,
    /// Lay a wall across the middle of the grid at startup
    #[serde(default = "default_seed_wall")]
    pub seed_wall: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub cost_model: CostModel,
    /// Expansions per rendered frame while a search is animating
    #[serde(default = "default_steps_per_frame")]
    pub steps_per_frame: u32,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    #[serde(default = "default_show_help")]
    pub show_help: bool,
}

// Default values
fn default_width_px() -> i32 { 800 }
fn default_height_px() -> i32 { 600 }
fn default_cell_size() -> i32 { 20 }
fn default_seed_wall() -> bool { true }
fn default_steps_per_frame() -> u32 { 1 }
fn default_window_title() -> String { "A* Pathfinding Demo".to_string() }
fn default_background() -> [u8; 3] { [0, 0, 0] }
fn default_show_help() -> bool { true }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width_px: default_width_px(),
            height_px: default_height_px(),
            cell_size: default_cell_size(),
            start: None,
            end: None,
            seed_wall: default_seed_wall(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cost_model: CostModel::default(),
            steps_per_frame: default_steps_per_frame(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            background: default_background(),
            show_help: default_show_help(),
        }
    }
}

impl GridConfig {
    pub fn cols(&self) -> i32 {
        if self.cell_size <= 0 {
            return 0;
        }
        self.width_px / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        if self.cell_size <= 0 {
            return 0;
        }
        self.height_px / self.cell_size
    }

    pub fn start_position(&self) -> Position {
        match self.start {
            Some([x, y]) => Position::new(x, y),
            None => Position::new(self.cols() / 2, 0),
        }
    }

    pub fn end_position(&self) -> Position {
        match self.end {
            Some([x, y]) => Position::new(x, y),
            None => Position::new(self.cols() / 2, self.rows() / 2 + 1),
        }
    }

    /// Cells of the startup wall: half the width, centred, on the middle row
    pub fn seed_walls(&self) -> Vec<Position> {
        if !self.seed_wall {
            return Vec::new();
        }
        let cols = self.cols();
        let y = self.rows() / 2;
        (0..cols / 2).map(|i| Position::new(cols / 4 + i, y)).collect()
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.cell_size <= 0 {
            return Err(GridError::invalid(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if self.cols() <= 0 || self.rows() <= 0 {
            return Err(GridError::invalid(format!(
                "{}x{} px with {} px cells leaves no room for a grid",
                self.width_px, self.height_px, self.cell_size
            )));
        }
        let too_large = self
            .cols()
            .checked_mul(self.rows())
            .map_or(true, |count| count as usize > MAX_CELLS);
        if too_large {
            return Err(GridError::invalid(format!(
                "{}x{} cells exceeds the limit of {} cells",
                self.cols(),
                self.rows(),
                MAX_CELLS
            )));
        }

        let walls = self.seed_walls();
        for (name, pos) in [("start", self.start_position()), ("end", self.end_position())] {
            if pos.x < 0 || pos.x >= self.cols() || pos.y < 0 || pos.y >= self.rows() {
                return Err(GridError::invalid(format!(
                    "{} ({}, {}) is outside the {}x{} grid",
                    name,
                    pos.x,
                    pos.y,
                    self.cols(),
                    self.rows()
                )));
            }
            if walls.contains(&pos) {
                return Err(GridError::invalid(format!(
                    "{} ({}, {}) sits on the seeded wall",
                    name, pos.x, pos.y
                )));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from `config.toml`, or use defaults if the file
    /// is missing or invalid
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            info!("No {} found, using default configuration", CONFIG_FILE);
            return Config::default();
        }

        match Self::load_from(path) {
            Ok(config) => {
                info!("Loaded configuration from {}", CONFIG_FILE);
                config
            }
            Err(e) => {
                warn!("{}: {}", CONFIG_FILE, e);
                warn!("Using default configuration");
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GridError> {
        self.grid.validate()?;
        if self.search.steps_per_frame == 0 {
            return Err(GridError::invalid("steps_per_frame must be at least 1"));
        }
        Ok(())
    }
}
