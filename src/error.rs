//! Error types

/// Raised when code addresses a cell outside the board. Correctly driven
/// commands never produce this; seeing it means a coordinate was miscomputed.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum BoardError {
    #[error("cell ({x}, {y}) is outside the {columns}x{rows} board")]
    OutOfBounds {
        x: i32,
        y: i32,
        columns: usize,
        rows: usize,
    },
}

/// Rejected engine configuration
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("board must be at least {min}x{min}, got {columns}x{rows}")]
    BoardTooSmall {
        columns: usize,
        rows: usize,
        min: usize,
    },
    #[error("{columns} columns leave part of a spawning piece off the board")]
    SpawnOffBoard { columns: usize },
    #[error("palette size must be between 1 and {max}, got {got}")]
    PaletteSize { got: usize, max: usize },
    #[error("{name} must be greater than zero")]
    ZeroDuration { name: &'static str },
    #[error("could not parse settings: {0}")]
    Parse(String),
}
