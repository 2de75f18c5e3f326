use crate::labyrinth::{MAX_DIMENSION, MIN_DIMENSION};

/// Errors from labyrinth construction and generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabyrinthError {
    #[error(
        "labyrinth dimensions {rows}x{columns} out of range: each side must be {MIN_DIMENSION}..={MAX_DIMENSION}"
    )]
    InvalidDimensions { rows: usize, columns: usize },
    #[error("no interior cell was opened, so there is no start cell")]
    DegenerateMaze,
    #[error("labyrinth has not been filled yet")]
    NotFilled,
}
