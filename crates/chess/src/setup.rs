//! Typed position setup for externally supplied layouts.
//!
//! The engine parses no textual notation; collaborators that do (openers,
//! notation layers, UIs) assemble positions through [`PositionBuilder`]
//! instead. `build` establishes every invariant the rest of the engine
//! relies on, so movement code never re-validates them.

use crate::error::{Result, RulesError};
use crate::{attacks, Board, CastlingRights, Color, Piece, PieceKind, Position, Square};

/// Builder for a [`Position`] with an arbitrary layout.
///
/// Starts from an empty board with White to move, no castling rights, and
/// no en passant target.
#[derive(Clone)]
pub struct PositionBuilder {
    squares: [Option<Piece>; 64],
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionBuilder {
    pub fn new() -> Self {
        PositionBuilder {
            squares: [None; 64],
            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant: None,
        }
    }

    /// Place a piece, replacing any previous occupant of the square
    pub fn piece(mut self, sq: Square, color: Color, kind: PieceKind) -> Self {
        self.squares[sq.index()] = Some(Piece::new(color, kind));
        self
    }

    /// Set the side to move
    pub fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Grant castling rights; `build` checks them against the placement
    pub fn castling(mut self, rights: CastlingRights) -> Self {
        self.castling_rights = rights;
        self
    }

    /// Declare an en passant target square (the square passed over by the
    /// double step the opponent just played)
    pub fn en_passant(mut self, sq: Square) -> Self {
        self.en_passant = Some(sq);
        self
    }

    /// Validate the setup and assemble the position.
    ///
    /// Checks: exactly one king per color, no pawn on either back rank,
    /// castling rights matched by king and rook placement, a plausible en
    /// passant target, and the side not to move not in check.
    pub fn build(self) -> Result<Position> {
        let mut kings: [Option<Square>; 2] = [None, None];
        for sq in Square::all() {
            let Some(piece) = self.squares[sq.index()] else {
                continue;
            };
            if piece.kind == PieceKind::King {
                let slot = &mut kings[piece.color.index()];
                if slot.is_some() {
                    return Err(RulesError::InvariantViolation(format!(
                        "more than one {} king",
                        piece.color
                    )));
                }
                *slot = Some(sq);
            }
            if piece.kind == PieceKind::Pawn && (sq.rank() == 0 || sq.rank() == 7) {
                return Err(RulesError::InvariantViolation(format!(
                    "{} pawn on back rank square {}",
                    piece.color, sq
                )));
            }
        }

        let white_king = kings[Color::White.index()]
            .ok_or_else(|| RulesError::InvariantViolation("no White king".to_string()))?;
        let black_king = kings[Color::Black.index()]
            .ok_or_else(|| RulesError::InvariantViolation("no Black king".to_string()))?;

        self.check_castling_rights()?;
        self.check_en_passant()?;

        let board = Board::new(self.squares, [white_king, black_king]);
        let opponent = self.side_to_move.opposite();
        if attacks::is_attacked(&board, board.king_square(opponent), self.side_to_move) {
            return Err(RulesError::InvariantViolation(format!(
                "{} is in check but it is {}'s turn",
                opponent, self.side_to_move
            )));
        }

        Ok(Position::from_parts(
            board,
            self.side_to_move,
            self.castling_rights,
            self.en_passant,
        ))
    }

    fn expect_piece(&self, sq: Square, color: Color, kind: PieceKind) -> Result<()> {
        match self.squares[sq.index()] {
            Some(piece) if piece.color == color && piece.kind == kind => Ok(()),
            _ => Err(RulesError::InvariantViolation(format!(
                "castling rights require a {} {} on {}",
                color,
                kind.letter(),
                sq
            ))),
        }
    }

    fn check_castling_rights(&self) -> Result<()> {
        let rights = self.castling_rights;
        let sides = [
            (Color::White, Square::E1, Square::A1, Square::H1),
            (Color::Black, Square::E8, Square::A8, Square::H8),
        ];
        for (color, home, queenside_corner, kingside_corner) in sides {
            let kingside = rights.can_castle_kingside(color);
            let queenside = rights.can_castle_queenside(color);
            if kingside || queenside {
                self.expect_piece(home, color, PieceKind::King)?;
            }
            if kingside {
                self.expect_piece(kingside_corner, color, PieceKind::Rook)?;
            }
            if queenside {
                self.expect_piece(queenside_corner, color, PieceKind::Rook)?;
            }
        }
        Ok(())
    }

    fn check_en_passant(&self) -> Result<()> {
        let Some(ep) = self.en_passant else {
            return Ok(());
        };
        // The opponent of the side to move is the one that just double-stepped
        let mover = self.side_to_move.opposite();
        let expected_rank = match mover {
            Color::White => 2,
            Color::Black => 5,
        };
        if ep.rank() != expected_rank {
            return Err(RulesError::InvariantViolation(format!(
                "en passant target {} is not behind a {} double step",
                ep, mover
            )));
        }
        if self.squares[ep.index()].is_some() {
            return Err(RulesError::InvariantViolation(format!(
                "en passant target {} is occupied",
                ep
            )));
        }
        let pawn_sq = ep
            .offset(0, mover.pawn_direction())
            .expect("double-step square on the board");
        match self.squares[pawn_sq.index()] {
            Some(Piece {
                kind: PieceKind::Pawn,
                color,
                ..
            }) if color == mover => {}
            _ => {
                return Err(RulesError::InvariantViolation(format!(
                    "en passant target {} has no {} pawn on {}",
                    ep, mover, pawn_sq
                )))
            }
        }
        let origin = ep
            .offset(0, -mover.pawn_direction())
            .expect("double-step origin on the board");
        if self.squares[origin.index()].is_some() {
            return Err(RulesError::InvariantViolation(format!(
                "en passant origin {} is occupied",
                origin
            )));
        }
        Ok(())
    }
}
