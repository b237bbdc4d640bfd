use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("malformed dimension")]
    MalformedDimension,
    #[error("board must retain at least one free tile")]
    TooManyMines,
    #[error("invalid coordinates")]
    InvalidCoords,
    #[error("game already ended, no new moves are accepted")]
    GameOver,
}

pub type Result<T> = core::result::Result<T, GameError>;
