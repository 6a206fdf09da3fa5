use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid dimensions must be at least 1x1")]
    InvalidDimensions,
    #[error("Mine count must be positive and leave at least one safe cell")]
    InvalidMineCount,
    #[error("Coordinates outside the grid")]
    OutOfBounds,
}

pub type Result<T> = core::result::Result<T, GameError>;
