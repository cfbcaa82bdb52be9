pub mod config;
pub mod demo;
pub mod edit;
pub mod error;
mod frontier;
pub mod grid;
pub mod layout;
pub mod neighbors;
pub mod search;

pub use config::Config;
pub use demo::Demo;
pub use edit::{Brush, GridEdit};
pub use error::{ConfigError, GridError, LayoutError};
pub use grid::{Cell, CellId, CellKind, Grid, Position};
pub use neighbors::neighbors_of;
pub use search::{run, CostModel, Outcome, Search, SearchStatus, StepResult};
