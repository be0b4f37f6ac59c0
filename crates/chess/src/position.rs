//! Chess position representation: board, side to move, castling rights,
//! and the en passant target.
//!
//! A position is an immutable value. Applying a move produces a successor
//! position; nothing shared is mutated, which keeps move simulation for
//! legality checking trivial.

use std::fmt;

use crate::error::{Result, RulesError};
use crate::{attacks, Board, Color, Move, Piece, PieceKind, Square};

/// Castling rights encoded as a 4-bit value
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct CastlingRights(pub(crate) u8);

impl CastlingRights {
    pub const NONE: Self = Self(0);
    pub const WHITE_KINGSIDE: u8 = 1;
    pub const WHITE_QUEENSIDE: u8 = 2;
    pub const BLACK_KINGSIDE: u8 = 4;
    pub const BLACK_QUEENSIDE: u8 = 8;
    pub const WHITE_BOTH: Self = Self(Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE);
    pub const BLACK_BOTH: Self = Self(Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE);
    pub const ALL: Self = Self(15);

    /// Check if the given color can castle kingside
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Check if the given color can castle queenside
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Check if these rights are a subset of `other` (rights only ever shrink)
    #[inline]
    pub const fn is_subset_of(self, other: CastlingRights) -> bool {
        self.0 & !other.0 == 0
    }

    /// Remove kingside castling rights for a color
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        self.0 &= !flag;
    }

    /// Remove queenside castling rights for a color
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        self.0 &= !flag;
    }

    /// Remove all castling rights for a color
    #[inline]
    pub fn remove_all(&mut self, color: Color) {
        let flags = match color {
            Color::White => Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE,
        };
        self.0 &= !flags;
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("-");
        }
        if self.0 & Self::WHITE_KINGSIDE != 0 {
            f.write_str("K")?;
        }
        if self.0 & Self::WHITE_QUEENSIDE != 0 {
            f.write_str("Q")?;
        }
        if self.0 & Self::BLACK_KINGSIDE != 0 {
            f.write_str("k")?;
        }
        if self.0 & Self::BLACK_QUEENSIDE != 0 {
            f.write_str("q")?;
        }
        Ok(())
    }
}

/// Rules-level classification of a position for the side to move
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    /// The side to move has legal moves and its king is safe
    Normal,
    /// The side to move is in check but has a legal reply
    Check,
    /// The side to move is in check with no legal reply; terminal
    Checkmate,
    /// The side to move is not in check but has no legal move; terminal
    Stalemate,
}

impl Status {
    /// Returns true if no further moves are accepted
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Status::Checkmate | Status::Stalemate)
    }
}

/// A complete chess position: everything move legality depends on
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    castling_rights: CastlingRights,
    /// Square a pawn may capture onto, for exactly one ply after an enemy
    /// pawn's double step
    en_passant: Option<Square>,
}

impl Position {
    /// Create the standard starting position
    pub fn starting() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut squares = [None; 64];
        for sq in Square::all() {
            let piece = match sq.rank() {
                0 => Some(Piece::new(Color::White, BACK_RANK[sq.file() as usize])),
                1 => Some(Piece::new(Color::White, PieceKind::Pawn)),
                6 => Some(Piece::new(Color::Black, PieceKind::Pawn)),
                7 => Some(Piece::new(Color::Black, BACK_RANK[sq.file() as usize])),
                _ => None,
            };
            squares[sq.index()] = piece;
        }

        Position {
            board: Board::new(squares, [Square::E1, Square::E8]),
            side_to_move: Color::White,
            castling_rights: CastlingRights::ALL,
            en_passant: None,
        }
    }

    /// Assemble a position from validated parts (see `PositionBuilder`)
    pub(crate) fn from_parts(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant: Option<Square>,
    ) -> Self {
        Position {
            board,
            side_to_move,
            castling_rights,
            en_passant,
        }
    }

    /// Get the board
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the side to move
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Get the castling rights
    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Get the en passant target square
    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant
    }

    /// Check if the side to move is in check
    pub fn is_check(&self) -> bool {
        let king_sq = self.board.king_square(self.side_to_move);
        attacks::is_attacked(&self.board, king_sq, self.side_to_move.opposite())
    }

    /// Classify the position for the side to move
    pub fn status(&self) -> Status {
        match (self.is_check(), self.legal_moves().is_empty()) {
            (true, true) => Status::Checkmate,
            (false, true) => Status::Stalemate,
            (true, false) => Status::Check,
            (false, false) => Status::Normal,
        }
    }

    /// Check if the game has ended (checkmate or stalemate)
    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// Apply a move and return the successor position.
    ///
    /// `mv` must come from this position's legal move set; `attempt_move` is
    /// the validating entry point for untrusted input.
    pub fn make_move(&self, mv: Move) -> Position {
        let us = self.side_to_move;
        let from = mv.from();
        let to = mv.to();

        let moving = self
            .board
            .piece_at(from)
            .expect("no piece on move origin");
        debug_assert_eq!(moving.color, us);

        // En passant captures a pawn that is not on the destination square:
        // it sits beside the mover, one rank behind the target.
        let mut board = if mv.is_en_passant() {
            let victim = to
                .offset(0, -us.pawn_direction())
                .expect("en passant victim on the board");
            debug_assert!(self.board.is_enemy(victim, us));
            self.board
                .removing(victim)
                .with_move(from, to, mv.promotion_piece())
        } else {
            self.board.with_move(from, to, mv.promotion_piece())
        };

        // Castling relocates the rook together with the king
        if mv.is_castle() {
            let (rook_from, rook_to) = match (us, mv.is_kingside_castle()) {
                (Color::White, true) => (Square::H1, Square::F1),
                (Color::White, false) => (Square::A1, Square::D1),
                (Color::Black, true) => (Square::H8, Square::F8),
                (Color::Black, false) => (Square::A8, Square::D8),
            };
            board = board.with_move(rook_from, rook_to, None);
        }

        // Castling rights are cleared permanently, never re-set:
        // by any king move, by a rook leaving its corner, and by a capture
        // landing on a corner (the rook is gone either way).
        let mut castling_rights = self.castling_rights;
        if moving.kind == PieceKind::King {
            castling_rights.remove_all(us);
        }
        if moving.kind == PieceKind::Rook {
            Self::clear_corner_rights(&mut castling_rights, from);
        }
        if mv.is_capture() {
            Self::clear_corner_rights(&mut castling_rights, to);
        }

        // The en passant target lives for exactly one ply
        let en_passant = if mv.is_double_pawn_push() {
            from.offset(0, us.pawn_direction())
        } else {
            None
        };

        Position {
            board,
            side_to_move: us.opposite(),
            castling_rights,
            en_passant,
        }
    }

    fn clear_corner_rights(rights: &mut CastlingRights, sq: Square) {
        match sq {
            sq if sq == Square::A1 => rights.remove_queenside(Color::White),
            sq if sq == Square::H1 => rights.remove_kingside(Color::White),
            sq if sq == Square::A8 => rights.remove_queenside(Color::Black),
            sq if sq == Square::H8 => rights.remove_kingside(Color::Black),
            _ => {}
        }
    }

    /// Validate and apply a move request from an external collaborator.
    ///
    /// `promotion` must be present exactly when the move is a pawn move onto
    /// the promotion rank. All validation happens before any new state is
    /// assembled; on error the position is returned unchanged to the caller
    /// (it is never mutated either way).
    pub fn attempt_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Position> {
        let piece = self
            .board
            .piece_at(from)
            .ok_or(RulesError::NoPieceAtSquare(from))?;
        if piece.color != self.side_to_move {
            return Err(RulesError::WrongSideToMove {
                square: from,
                side: self.side_to_move,
            });
        }

        let candidates: Vec<Move> = self
            .legal_moves_from(from)
            .into_iter()
            .filter(|mv| mv.to() == to)
            .collect();
        if candidates.is_empty() {
            return Err(RulesError::IllegalTarget { from, to });
        }

        let chosen = if candidates[0].is_promotion() {
            let kind = promotion.ok_or(RulesError::MissingPromotionChoice { from, to })?;
            *candidates
                .iter()
                .find(|mv| mv.promotion_piece() == Some(kind))
                .ok_or(RulesError::IllegalTarget { from, to })?
        } else {
            if promotion.is_some() {
                return Err(RulesError::UnexpectedPromotionChoice);
            }
            candidates[0]
        };

        Ok(self.make_move(chosen))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Position {{")?;
        for rank in (0..8).rev() {
            write!(f, "  {} ", rank + 1)?;
            for file in 0..8 {
                let sq = Square::from_coords(file, rank).expect("on-board coordinates");
                match self.board.piece_at(sq) {
                    Some(piece) => write!(f, "{} ", piece.letter())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "    a b c d e f g h")?;
        writeln!(f, "  side to move: {}", self.side_to_move)?;
        writeln!(f, "  castling: {}", self.castling_rights)?;
        writeln!(
            f,
            "  en passant: {}",
            self.en_passant
                .map_or("-".to_string(), |sq| sq.to_string())
        )?;
        write!(f, "}}")
    }
}
