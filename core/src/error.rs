use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one row and one column")]
    InvalidBoardSize,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Board cells do not match declared size and mine layout")]
    InvalidBoardShape,
    #[error("Mine layout does not match the game configuration")]
    LayoutMismatch,
}

pub type Result<T> = core::result::Result<T, GameError>;
