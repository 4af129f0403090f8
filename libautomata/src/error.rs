use thiserror::Error;

use crate::pos::Position;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AutomatonError {
    #[error("board dimensions must be non-zero, got {width}x{height}")]
    ZeroDimensions { width: usize, height: usize },

    #[error("row {row} has {len} cells but the first row has {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("expected {expected} tiles for the board, got {got}")]
    TileCountMismatch { expected: usize, got: usize },

    #[error("a rule needs at least one state")]
    NoStates,

    #[error("position ({}, {}) is outside the {width}x{height} board", .pos.x, .pos.y)]
    OutOfBounds {
        pos: Position,
        width: usize,
        height: usize,
    },

    #[error("density must be within 0..=1, got {0}")]
    InvalidDensity(f64),

    #[error("unknown rule \"{0}\"")]
    UnknownRule(String),
}
