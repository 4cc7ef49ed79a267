use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mine tiles for the board size")]
    TooManyMines,
    #[error("At least one mine per cell must be allowed")]
    InvalidMaxMines,
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Mine layout does not fit the variant config")]
    LayoutBreaksConfig,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Unknown variant")]
    UnknownVariant,
    #[error("Unknown difficulty")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
