use std::io;

use thiserror::Error;

/// Errors raised by [`Grid`](crate::Grid) accessors and construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("invalid grid configuration: {0}")]
    InvalidConfiguration(String),
}

impl GridError {
    pub fn invalid(message: impl Into<String>) -> Self {
        GridError::InvalidConfiguration(message.into())
    }
}

/// Errors produced while parsing a text layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown symbol {symbol:?} at ({x}, {y})")]
    UnknownSymbol { symbol: char, x: usize, y: usize },

    #[error("layout has no '{0}' cell")]
    Missing(char),

    #[error("layout has more than one '{0}' cell")]
    Duplicate(char),

    #[error("layout is {found_width}x{found_height}, expected {width}x{height}")]
    DimensionMismatch {
        width: i32,
        height: i32,
        found_width: i32,
        found_height: i32,
    },

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Errors produced while loading `config.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] GridError),
}
