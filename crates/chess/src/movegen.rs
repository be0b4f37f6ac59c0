//! Legal move generation.
//!
//! Pipeline: per-piece pseudo-legal generation (movement pattern, blocking
//! and capture rules only), then a legality filter that simulates each
//! candidate and rejects any that leaves the mover's own king attacked.
//! The filter covers pinned pieces and king-into-check uniformly, so no
//! separate pin detection is needed.

use crate::attacks::{self, DIAGONALS, KING_STEPS, KNIGHT_JUMPS, ORTHOGONALS};
use crate::{Color, Move, Piece, PieceKind, Position, Square, SquareSet};

/// Promotion choices, strongest first
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

impl Position {
    /// Generate all legal moves for the side to move
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for (from, piece) in self.board().pieces(self.side_to_move()) {
            self.pseudo_legal_from(from, piece, &mut moves);
        }
        moves.retain(|&mv| !self.leaves_king_in_check(mv));
        moves
    }

    /// Generate the legal moves of the piece on `from`.
    ///
    /// Empty when the square is empty or holds an opponent piece; move
    /// requests go through `attempt_move`, which reports those as errors.
    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        let mut moves = Vec::new();
        if let Some(piece) = self.board().piece_at(from) {
            if piece.color == self.side_to_move() {
                self.pseudo_legal_from(from, piece, &mut moves);
                moves.retain(|&mv| !self.leaves_king_in_check(mv));
            }
        }
        moves
    }

    /// The legal destination squares of the piece on `from` (move hints)
    pub fn legal_targets(&self, from: Square) -> SquareSet {
        self.legal_moves_from(from)
            .into_iter()
            .map(|mv| mv.to())
            .collect()
    }

    /// Check if a move would leave the mover's own king attacked
    fn leaves_king_in_check(&self, mv: Move) -> bool {
        let us = self.side_to_move();
        let next = self.make_move(mv);
        let king_sq = next.board().king_square(us);
        attacks::is_attacked(next.board(), king_sq, us.opposite())
    }

    /// Pseudo-legal moves of one piece: movement pattern plus blocking and
    /// capture rules, ignoring king safety. One dispatch per piece kind.
    fn pseudo_legal_from(&self, from: Square, piece: Piece, moves: &mut Vec<Move>) {
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(from, piece.color, moves),
            PieceKind::Knight => self.step_moves(from, piece.color, &KNIGHT_JUMPS, moves),
            PieceKind::Rook => self.ray_moves(from, piece.color, &ORTHOGONALS, moves),
            PieceKind::Bishop => self.ray_moves(from, piece.color, &DIAGONALS, moves),
            PieceKind::Queen => {
                // A queen is the union of the rook and bishop direction sets
                self.ray_moves(from, piece.color, &ORTHOGONALS, moves);
                self.ray_moves(from, piece.color, &DIAGONALS, moves);
            }
            PieceKind::King => {
                let danger = attacks::attacked_squares(self.board(), piece.color.opposite());
                self.king_moves(from, piece.color, danger, moves);
                self.castling_moves(from, piece.color, danger, moves);
            }
        }
    }

    /// Sliding moves: walk outward along each direction; empty squares are
    /// added and the ray continues, the first enemy square is added as a
    /// capture and stops the ray, a friendly square stops it unadded.
    fn ray_moves(
        &self,
        from: Square,
        us: Color,
        directions: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(df, dr) in directions {
            let mut current = from;
            while let Some(to) = current.offset(df, dr) {
                match self.board().piece_at(to) {
                    None => moves.push(Move::quiet(from, to)),
                    Some(blocker) => {
                        if blocker.color != us {
                            moves.push(Move::capture(from, to));
                        }
                        break;
                    }
                }
                current = to;
            }
        }
    }

    /// Stepping moves from a fixed offset table; never blocked by
    /// intervening pieces
    fn step_moves(&self, from: Square, us: Color, offsets: &[(i8, i8)], moves: &mut Vec<Move>) {
        for &(df, dr) in offsets {
            let Some(to) = from.offset(df, dr) else {
                continue;
            };
            match self.board().piece_at(to) {
                None => moves.push(Move::quiet(from, to)),
                Some(blocker) if blocker.color != us => moves.push(Move::capture(from, to)),
                Some(_) => {}
            }
        }
    }

    /// King steps: the 8 adjacent squares, additionally excluding every
    /// square in the opponent's attack set
    fn king_moves(&self, from: Square, us: Color, danger: SquareSet, moves: &mut Vec<Move>) {
        for &(df, dr) in &KING_STEPS {
            let Some(to) = from.offset(df, dr) else {
                continue;
            };
            if danger.contains(to) {
                continue;
            }
            match self.board().piece_at(to) {
                None => moves.push(Move::quiet(from, to)),
                Some(blocker) if blocker.color != us => moves.push(Move::capture(from, to)),
                Some(_) => {}
            }
        }
    }

    /// Castling, generated as a specially flagged king move. Legal only if
    /// the rights flag is still set, the king is not in check, the squares
    /// strictly between king and rook are empty, and the king neither
    /// passes through nor lands on an attacked square.
    fn castling_moves(&self, from: Square, us: Color, danger: SquareSet, moves: &mut Vec<Move>) {
        let rights = self.castling_rights();
        let rank = us.back_rank();
        let home = match us {
            Color::White => Square::E1,
            Color::Black => Square::E8,
        };
        if from != home || danger.contains(from) {
            return;
        }

        if rights.can_castle_kingside(us) {
            let empty_needed = [5u8, 6]; // f, g
            let clear = empty_needed.iter().all(|&file| {
                let sq = Square::from_coords(file, rank).expect("on-board coordinates");
                !self.board().is_occupied(sq) && !danger.contains(sq)
            });
            if clear {
                let to = Square::from_coords(6, rank).expect("on-board coordinates");
                moves.push(Move::kingside_castle(from, to));
            }
        }

        if rights.can_castle_queenside(us) {
            let empty_needed = [1u8, 2, 3]; // b, c, d
            let safe_needed = [2u8, 3]; // c, d: the king never crosses b
            let empty = empty_needed.iter().all(|&file| {
                let sq = Square::from_coords(file, rank).expect("on-board coordinates");
                !self.board().is_occupied(sq)
            });
            let safe = safe_needed.iter().all(|&file| {
                let sq = Square::from_coords(file, rank).expect("on-board coordinates");
                !danger.contains(sq)
            });
            if empty && safe {
                let to = Square::from_coords(2, rank).expect("on-board coordinates");
                moves.push(Move::queenside_castle(from, to));
            }
        }
    }

    /// Pawn moves: single push, double push from the start rank, diagonal
    /// captures, en passant, and mandatory promotion on the back rank
    fn pawn_moves(&self, from: Square, us: Color, moves: &mut Vec<Move>) {
        let dr = us.pawn_direction();
        let promotion_rank = us.promotion_rank();

        // Forward pushes; blocked by any piece, never capturing
        if let Some(one) = from.offset(0, dr) {
            if !self.board().is_occupied(one) {
                if one.rank() == promotion_rank {
                    for kind in PROMOTION_KINDS {
                        moves.push(Move::promotion(from, one, kind, false));
                    }
                } else {
                    moves.push(Move::quiet(from, one));
                    if from.rank() == us.pawn_start_rank() {
                        if let Some(two) = from.offset(0, 2 * dr) {
                            if !self.board().is_occupied(two) {
                                moves.push(Move::double_pawn_push(from, two));
                            }
                        }
                    }
                }
            }
        }

        // Diagonal captures, including en passant onto the target square
        for df in [-1i8, 1] {
            let Some(to) = from.offset(df, dr) else {
                continue;
            };
            if self.board().is_enemy(to, us) {
                if to.rank() == promotion_rank {
                    for kind in PROMOTION_KINDS {
                        moves.push(Move::promotion(from, to, kind, true));
                    }
                } else {
                    moves.push(Move::capture(from, to));
                }
            } else if Some(to) == self.en_passant_square() {
                moves.push(Move::en_passant(from, to));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CastlingRights, PositionBuilder};

    fn builder_of(pieces: &[(Square, Color, PieceKind)], side: Color) -> PositionBuilder {
        let mut builder = PositionBuilder::new();
        for &(sq, color, kind) in pieces {
            builder = builder.piece(sq, color, kind);
        }
        builder.side_to_move(side)
    }

    fn position_of(pieces: &[(Square, Color, PieceKind)], side: Color) -> Position {
        builder_of(pieces, side).build().unwrap()
    }

    fn targets(moves: &[Move], from: Square) -> Vec<Square> {
        let mut targets: Vec<_> = moves
            .iter()
            .filter(|mv| mv.from() == from)
            .map(|mv| mv.to())
            .collect();
        targets.sort_by_key(|sq| sq.index());
        targets
    }

    #[test]
    fn test_starting_position_has_twenty_moves() {
        let pos = Position::starting();
        // 16 pawn moves (8 single + 8 double) + 4 knight moves
        assert_eq!(pos.legal_moves().len(), 20);
    }

    #[test]
    fn test_starting_knight_targets() {
        let pos = Position::starting();
        let moves = pos.legal_moves_from(Square::B1);
        assert_eq!(targets(&moves, Square::B1), vec![Square::A3, Square::C3]);

        let hints = pos.legal_targets(Square::B1);
        assert_eq!(hints.len(), 2);
        assert!(hints.contains(Square::A3));
        assert!(hints.contains(Square::C3));
    }

    #[test]
    fn test_moves_from_empty_or_enemy_square_are_empty() {
        let pos = Position::starting();
        assert!(pos.legal_moves_from(Square::E4).is_empty());
        assert!(pos.legal_moves_from(Square::E7).is_empty());
    }

    #[test]
    fn test_rook_stops_at_blockers() {
        let pos = position_of(
            &[
                (Square::E1, Color::White, PieceKind::King),
                (Square::E8, Color::Black, PieceKind::King),
                (Square::D4, Color::White, PieceKind::Rook),
                (Square::D6, Color::White, PieceKind::Pawn),
                (Square::F4, Color::Black, PieceKind::Pawn),
            ],
            Color::White,
        );
        let moves = pos.legal_moves_from(Square::D4);
        let rook_targets = targets(&moves, Square::D4);

        // Up: d5 only (friendly pawn on d6 blocks without being a target)
        assert!(rook_targets.contains(&Square::D5));
        assert!(!rook_targets.contains(&Square::D6));
        assert!(!rook_targets.contains(&Square::D7));
        // Right: e4, then the enemy pawn on f4 is a capture, nothing beyond
        assert!(rook_targets.contains(&Square::E4));
        assert!(rook_targets.contains(&Square::F4));
        assert!(!rook_targets.contains(&Square::G4));
        let capture = moves.iter().find(|mv| mv.to() == Square::F4).unwrap();
        assert!(capture.is_capture());
    }

    #[test]
    fn test_knight_jumps_over_pieces() {
        // Knights in the starting position are surrounded yet mobile
        let pos = Position::starting();
        assert_eq!(pos.legal_moves_from(Square::B1).len(), 2);
        assert_eq!(pos.legal_moves_from(Square::G1).len(), 2);
    }

    #[test]
    fn test_pawn_double_push_needs_both_squares_empty() {
        let pos = position_of(
            &[
                (Square::E1, Color::White, PieceKind::King),
                (Square::E8, Color::Black, PieceKind::King),
                (Square::E2, Color::White, PieceKind::Pawn),
                (Square::E4, Color::Black, PieceKind::Knight),
            ],
            Color::White,
        );
        let moves = pos.legal_moves_from(Square::E2);
        assert_eq!(targets(&moves, Square::E2), vec![Square::E3]);

        // A piece on the intermediate square blocks both push lengths
        let pos = position_of(
            &[
                (Square::E1, Color::White, PieceKind::King),
                (Square::E8, Color::Black, PieceKind::King),
                (Square::E2, Color::White, PieceKind::Pawn),
                (Square::E3, Color::Black, PieceKind::Knight),
            ],
            Color::White,
        );
        assert!(pos.legal_moves_from(Square::E2).is_empty());
    }

    #[test]
    fn test_pawn_captures_diagonally_only() {
        let pos = position_of(
            &[
                (Square::E1, Color::White, PieceKind::King),
                (Square::E8, Color::Black, PieceKind::King),
                (Square::E4, Color::White, PieceKind::Pawn),
                (Square::D5, Color::Black, PieceKind::Pawn),
                (Square::E5, Color::Black, PieceKind::Pawn),
            ],
            Color::White,
        );
        let moves = pos.legal_moves_from(Square::E4);
        // Forward blocked by e5; capture on d5 available
        assert_eq!(targets(&moves, Square::E4), vec![Square::D5]);
    }

    #[test]
    fn test_promotion_fans_out_to_four_choices() {
        let pos = position_of(
            &[
                (Square::E1, Color::White, PieceKind::King),
                (Square::H8, Color::Black, PieceKind::King),
                (Square::A7, Color::White, PieceKind::Pawn),
            ],
            Color::White,
        );
        let moves = pos.legal_moves_from(Square::A7);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|mv| mv.is_promotion()));
        let kinds: Vec<_> = moves.iter().filter_map(|mv| mv.promotion_piece()).collect();
        for kind in PROMOTION_KINDS {
            assert!(kinds.contains(&kind));
        }
    }

    #[test]
    fn test_en_passant_generated_for_one_ply() {
        let pos = position_of(
            &[
                (Square::E1, Color::White, PieceKind::King),
                (Square::E8, Color::Black, PieceKind::King),
                (Square::D4, Color::Black, PieceKind::Pawn),
                (Square::E2, Color::White, PieceKind::Pawn),
                (Square::A2, Color::White, PieceKind::Pawn),
                (Square::A7, Color::Black, PieceKind::Pawn),
            ],
            Color::White,
        );
        let pos = pos.make_move(Move::double_pawn_push(Square::E2, Square::E4));

        let ep_moves: Vec<_> = pos
            .legal_moves_from(Square::D4)
            .into_iter()
            .filter(|mv| mv.is_en_passant())
            .collect();
        assert_eq!(ep_moves.len(), 1);
        assert_eq!(ep_moves[0].to(), Square::E3);

        // Applying it removes the pawn on e4, not one on e3
        let after = pos.make_move(ep_moves[0]);
        assert!(after.board().piece_at(Square::E4).is_none());
        assert_eq!(
            after.board().piece_at(Square::E3).unwrap().color,
            Color::Black
        );

        // Any other move first forfeits the right
        let sidestep = pos.make_move(Move::quiet(Square::A7, Square::A6));
        let replied = sidestep.make_move(Move::quiet(Square::A2, Square::A3));
        assert_eq!(replied.en_passant_square(), None);
        assert!(replied
            .legal_moves_from(Square::D4)
            .iter()
            .all(|mv| !mv.is_en_passant()));
    }

    #[test]
    fn test_castling_both_sides_available() {
        let pos = builder_of(
            &[
                (Square::E1, Color::White, PieceKind::King),
                (Square::A1, Color::White, PieceKind::Rook),
                (Square::H1, Color::White, PieceKind::Rook),
                (Square::E8, Color::Black, PieceKind::King),
            ],
            Color::White,
        )
        .castling(CastlingRights::WHITE_BOTH)
        .build()
        .unwrap();

        let castles: Vec<_> = pos
            .legal_moves()
            .into_iter()
            .filter(|mv| mv.is_castle())
            .collect();
        assert_eq!(castles.len(), 2);
        assert!(castles
            .iter()
            .any(|mv| mv.is_kingside_castle() && mv.to() == Square::G1));
        assert!(castles
            .iter()
            .any(|mv| mv.is_queenside_castle() && mv.to() == Square::C1));

        // After either castle the mover's rights are gone for good
        for castle in castles {
            let after = pos.make_move(castle);
            assert!(!after.castling_rights().can_castle_kingside(Color::White));
            assert!(!after.castling_rights().can_castle_queenside(Color::White));
        }
    }

    #[test]
    fn test_castling_blocked_by_pieces() {
        let pos = builder_of(
            &[
                (Square::E1, Color::White, PieceKind::King),
                (Square::A1, Color::White, PieceKind::Rook),
                (Square::H1, Color::White, PieceKind::Rook),
                (Square::B1, Color::White, PieceKind::Knight),
                (Square::G1, Color::White, PieceKind::Knight),
                (Square::E8, Color::Black, PieceKind::King),
            ],
            Color::White,
        )
        .castling(CastlingRights::WHITE_BOTH)
        .build()
        .unwrap();

        assert!(pos.legal_moves().iter().all(|mv| !mv.is_castle()));
    }

    #[test]
    fn test_castling_through_check_forbidden() {
        // A black rook on f8 covers f1: kingside is out, queenside stays
        let pos = builder_of(
            &[
                (Square::E1, Color::White, PieceKind::King),
                (Square::A1, Color::White, PieceKind::Rook),
                (Square::H1, Color::White, PieceKind::Rook),
                (Square::F8, Color::Black, PieceKind::Rook),
                (Square::G8, Color::Black, PieceKind::King),
            ],
            Color::White,
        )
        .castling(CastlingRights::WHITE_BOTH)
        .build()
        .unwrap();

        let castles: Vec<_> = pos
            .legal_moves()
            .into_iter()
            .filter(|mv| mv.is_castle())
            .collect();
        assert_eq!(castles.len(), 1);
        assert!(castles[0].is_queenside_castle());
    }

    #[test]
    fn test_castling_out_of_check_forbidden() {
        let pos = builder_of(
            &[
                (Square::E1, Color::White, PieceKind::King),
                (Square::A1, Color::White, PieceKind::Rook),
                (Square::H1, Color::White, PieceKind::Rook),
                (Square::E8, Color::Black, PieceKind::Rook),
                (Square::G7, Color::Black, PieceKind::King),
            ],
            Color::White,
        )
        .castling(CastlingRights::WHITE_BOTH)
        .build()
        .unwrap();

        assert!(pos.is_check());
        assert!(pos.legal_moves().iter().all(|mv| !mv.is_castle()));
    }

    #[test]
    fn test_queenside_b_file_attack_is_harmless() {
        // Only c1 and d1 must be safe for queenside castling; b1 is not on
        // the king's path
        let pos = builder_of(
            &[
                (Square::E1, Color::White, PieceKind::King),
                (Square::A1, Color::White, PieceKind::Rook),
                (Square::B8, Color::Black, PieceKind::Rook),
                (Square::H8, Color::Black, PieceKind::King),
            ],
            Color::White,
        )
        .castling(CastlingRights(CastlingRights::WHITE_QUEENSIDE))
        .build()
        .unwrap();

        assert!(pos
            .legal_moves()
            .iter()
            .any(|mv| mv.is_queenside_castle()));
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        // The white knight on e4 shields its king from the rook on e8
        let pos = position_of(
            &[
                (Square::E1, Color::White, PieceKind::King),
                (Square::E4, Color::White, PieceKind::Knight),
                (Square::E8, Color::Black, PieceKind::Rook),
                (Square::A8, Color::Black, PieceKind::King),
            ],
            Color::White,
        );
        assert!(pos.legal_moves_from(Square::E4).is_empty());
    }

    #[test]
    fn test_king_cannot_step_into_attack() {
        let pos = position_of(
            &[
                (Square::E1, Color::White, PieceKind::King),
                (Square::A2, Color::Black, PieceKind::Rook),
                (Square::H8, Color::Black, PieceKind::King),
            ],
            Color::White,
        );
        // Rank 2 is covered by the rook: only rank-1 steps remain
        let moves = pos.legal_moves_from(Square::E1);
        assert_eq!(targets(&moves, Square::E1), vec![Square::D1, Square::F1]);
    }

    #[test]
    fn test_king_cannot_capture_defended_piece() {
        let pos = position_of(
            &[
                (Square::E1, Color::White, PieceKind::King),
                (Square::E2, Color::Black, PieceKind::Pawn),
                (Square::F3, Color::Black, PieceKind::Bishop),
                (Square::H8, Color::Black, PieceKind::King),
            ],
            Color::White,
        );
        // e2 is defended by the bishop on f3
        let moves = pos.legal_moves_from(Square::E1);
        assert!(moves.iter().all(|mv| mv.to() != Square::E2));
    }

    #[test]
    fn test_check_must_be_answered() {
        let pos = position_of(
            &[
                (Square::E1, Color::White, PieceKind::King),
                (Square::D2, Color::White, PieceKind::Queen),
                (Square::A5, Color::White, PieceKind::Rook),
                (Square::E8, Color::Black, PieceKind::Rook),
                (Square::A8, Color::Black, PieceKind::King),
            ],
            Color::White,
        );
        assert!(pos.is_check());
        for mv in pos.legal_moves() {
            let next = pos.make_move(mv);
            let king_sq = next.board().king_square(Color::White);
            assert!(!attacks::is_attacked(
                next.board(),
                king_sq,
                Color::Black
            ));
        }
        // Blocking with the queen on e2 or the rook on e5 answers the check;
        // a queen move that ignores it does not survive the filter
        let answers = pos.legal_moves();
        assert!(answers
            .iter()
            .any(|mv| mv.from() == Square::D2 && mv.to() == Square::E2));
        assert!(answers
            .iter()
            .any(|mv| mv.from() == Square::A5 && mv.to() == Square::E5));
        assert!(answers
            .iter()
            .all(|mv| !(mv.from() == Square::D2 && mv.to() == Square::D4)));
    }
}
