use thiserror::Error;

/// Errors raised by game rules, actors and matches.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("No legal moves available")]
    NoLegalMove,

    #[error("State is not a child of the given parent: {0}")]
    NotAChild(String),

    #[error("A match needs at least two actors, got {0}")]
    NotEnoughActors(usize),
}

/// Convenience Result type for game operations
pub type Result<T> = std::result::Result<T, GameError>;
