use thiserror::Error;

use crate::{Color, Square};

/// Errors surfaced by move requests and position setup.
///
/// All variants are recoverable: a failed request leaves the originating
/// position untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("no piece on {0}")]
    NoPieceAtSquare(Square),

    #[error("the piece on {square} does not belong to {side}, whose turn it is")]
    WrongSideToMove { square: Square, side: Color },

    #[error("{from} to {to} is not a legal move")]
    IllegalTarget { from: Square, to: Square },

    #[error("{from} to {to} promotes and requires a promotion choice")]
    MissingPromotionChoice { from: Square, to: Square },

    #[error("a promotion choice was supplied for a move that does not promote")]
    UnexpectedPromotionChoice,

    #[error("position invariant violated: {0}")]
    InvariantViolation(String),
}

/// Convenience Result type for rules operations
pub type Result<T> = std::result::Result<T, RulesError>;
