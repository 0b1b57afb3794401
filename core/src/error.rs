use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one cell")]
    EmptyBoard,
    #[error("Board must have at least one mine")]
    NoMines,
    #[error("Too many mines, at least one cell must be safe")]
    TooManyMines,
    #[error("Board must be square")]
    InvalidBoardShape,
    #[error("Board counters do not match its cells")]
    CountMismatch,
}

pub type Result<T> = core::result::Result<T, GameError>;
