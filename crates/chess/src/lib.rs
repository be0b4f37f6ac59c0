//! Ply Chess - chess move generation and legality engine
//!
//! Given a position, this crate enumerates every legal move, applies moves
//! immutably, and classifies the position as normal, check, checkmate, or
//! stalemate. Rendering, notation, and move selection are external
//! collaborators reached through the [`ply_core::Game`] trait.

mod attacks;
mod board;
mod error;
mod game_impl;
mod movegen;
mod moves;
mod piece;
mod position;
mod setup;
mod square;

pub use attacks::{attacked_squares, is_attacked, SquareSet, SquareSetIter};
pub use board::Board;
pub use error::{Result, RulesError};
pub use game_impl::Chess;
pub use movegen::PROMOTION_KINDS;
pub use moves::{Move, MoveKind};
pub use piece::{Color, Piece, PieceKind};
pub use position::{CastlingRights, Position, Status};
pub use setup::PositionBuilder;
pub use square::Square;
