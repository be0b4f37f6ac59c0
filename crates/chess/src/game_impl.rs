//! Implementation of the collaborator-facing Game trait for chess.

use ply_core::Game;

use crate::{Color, Move, Position, RulesError, Status};

/// Chess rules exposed through the [`Game`] trait.
#[derive(Clone)]
pub struct Chess;

impl Game for Chess {
    type State = Position;
    type Action = Move;
    type Player = Color;
    type Status = Status;
    type Error = RulesError;

    fn initial_state(&self) -> Position {
        Position::starting()
    }

    fn legal_actions(&self, state: &Position) -> Vec<Move> {
        state.legal_moves()
    }

    fn try_apply(&self, state: &Position, action: Move) -> Result<Position, RulesError> {
        // Actions may be stale or fabricated, so they are re-validated as a
        // plain from/to/promotion request rather than trusted and applied.
        state.attempt_move(action.from(), action.to(), action.promotion_piece())
    }

    fn status(&self, state: &Position) -> Status {
        state.status()
    }

    fn to_play(&self, state: &Position) -> Color {
        state.side_to_move()
    }

    fn is_terminal(&self, state: &Position) -> bool {
        state.is_terminal()
    }
}
