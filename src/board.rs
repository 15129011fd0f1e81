//! Board state and move application
//!
//! A 64-slot grid of optional pieces plus the transient last-move metadata
//! the special rules need: en-passant eligibility and promotion both depend
//! on the immediately preceding move, not on full history, so the board
//! carries the last [`Move`] and a [`MoveOutcome`] flag set and nothing else.
//!
//! The board is rebuilt from scratch by replaying the full move list on
//! every query ([`Board::from_moves`]); there is no incremental undo. Every
//! legality computation therefore starts from a known-consistent position.
//!
//! `apply` performs no legality validation. Callers are expected to
//! intersect a submitted move against the freshly computed legal-move set
//! before replaying it; applying an arbitrary move mechanically succeeds.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::piece::{Piece, PieceColor, PieceKind};
use crate::types::{Move, Square};

/// Which special rules fired for the move most recently applied.
///
/// All three flags reset at the start of every `apply`; they report the
/// outcome of the last move only, never history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub promoted: bool,
    pub castled: bool,
    pub en_passant: bool,
}

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

/// The 8x8 board: at most one piece per square, the 64-slot array fully
/// determines the position apart from per-piece `has_moved` flags and the
/// last-move metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    last_move: Option<Move>,
    outcome: MoveOutcome,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard initial position.
    pub fn new() -> Self {
        let mut squares = [None; 64];
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            squares[file] = Some(Piece::new(kind, PieceColor::White));
            squares[8 + file] = Some(Piece::new(PieceKind::Pawn, PieceColor::White));
            squares[48 + file] = Some(Piece::new(PieceKind::Pawn, PieceColor::Black));
            squares[56 + file] = Some(Piece::new(kind, PieceColor::Black));
        }
        Board {
            squares,
            last_move: None,
            outcome: MoveOutcome::default(),
        }
    }

    /// Replay an ordered move list from the standard initial position.
    pub fn from_moves(moves: &[Move]) -> Self {
        let mut board = Board::new();
        for &mv in moves {
            trace!(%mv, "replaying move");
            board.apply(mv);
        }
        board
    }

    /// Apply a move in place and report which special rules fired.
    ///
    /// Order of effects:
    /// 1. castling relocates the rook first, through this same method;
    /// 2. the moving piece lands on the destination with its moved flag set;
    /// 3. an en-passant capture removes the passed pawn;
    /// 4. the origin square is cleared;
    /// 5. the move is recorded as the last move;
    /// 6. a pawn on its farthest rank is replaced by a queen.
    pub fn apply(&mut self, mv: Move) -> MoveOutcome {
        let en_passant_moves = self.possible_en_passant_moves();
        self.outcome = MoveOutcome::default();

        if self.is_castle(mv) {
            self.apply(Self::castle_rook_move(mv));
            self.outcome = MoveOutcome {
                castled: true,
                ..MoveOutcome::default()
            };
        }

        let mut moving = self.squares[mv.src().index() as usize].take();
        if let Some(piece) = moving.as_mut() {
            piece.has_moved = true;
        }

        if let Some(piece) = moving {
            if piece.kind == PieceKind::Pawn && en_passant_moves.contains(&mv) {
                let victim = mv.dst().offset(0, -piece.color.pawn_direction());
                self.squares[victim.index() as usize] = None;
                self.outcome.en_passant = true;
            }
        }

        self.squares[mv.dst().index() as usize] = moving;
        self.last_move = Some(mv);

        if let Some(piece) = moving {
            if piece.kind == PieceKind::Pawn && mv.dst().rank() == piece.color.promotion_rank() {
                self.squares[mv.dst().index() as usize] = Some(Piece {
                    kind: PieceKind::Queen,
                    color: piece.color,
                    has_moved: true,
                });
                self.outcome.promoted = true;
            }
        }

        self.outcome
    }

    /// Whether `mv` would castle: an unmoved king moving more than one file.
    pub fn is_castle(&self, mv: Move) -> bool {
        match self.piece_at(mv.src()) {
            Some(piece) => {
                piece.kind == PieceKind::King
                    && !piece.has_moved
                    && (mv.dst().file() - mv.src().file()).abs() > 1
            }
            None => false,
        }
    }

    fn castle_rook_move(king_move: Move) -> Move {
        let rank = king_move.src().rank();
        if king_move.dst().file() > king_move.src().file() {
            Move::new(
                Square::new(7, rank),
                Square::new(king_move.dst().file() - 1, rank),
            )
        } else {
            Move::new(
                Square::new(0, rank),
                Square::new(king_move.dst().file() + 1, rank),
            )
        }
    }

    /// En-passant captures available right now, derived solely from the last
    /// move: it must have been a pawn advancing exactly two ranks. The
    /// target is the square passed over; the attackers are enemy pawns
    /// standing on an adjacent file next to the moved pawn.
    ///
    /// Recomputed fresh on every call; eligibility lasts one ply.
    pub fn possible_en_passant_moves(&self) -> Vec<Move> {
        let Some(last) = self.last_move else {
            return Vec::new();
        };
        let Some(moved) = self.piece_at(last.dst()) else {
            return Vec::new();
        };
        if moved.kind != PieceKind::Pawn {
            return Vec::new();
        }
        if (last.dst().rank() - last.src().rank()).abs() != 2 {
            return Vec::new();
        }

        let passed = Square::new(
            last.dst().file(),
            (last.src().rank() + last.dst().rank()) / 2,
        );
        let mut moves = Vec::new();
        for file_delta in [-1, 1] {
            let adjacent = last.dst().offset(file_delta, 0);
            if !adjacent.is_valid() {
                continue;
            }
            if let Some(attacker) = self.piece_at(adjacent) {
                if attacker.kind == PieceKind::Pawn && attacker.color != moved.color {
                    moves.push(Move::new(adjacent, passed));
                }
            }
        }
        moves
    }

    /// The piece on `square`, if any. Off-board squares are empty.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if !square.is_valid() {
            return None;
        }
        self.squares[square.index() as usize]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Squares occupied by pieces of `color`.
    pub fn squares_by_color(&self, color: PieceColor) -> Vec<Square> {
        Self::all_squares()
            .filter(|&square| {
                self.piece_at(square)
                    .is_some_and(|piece| piece.color == color)
            })
            .collect()
    }

    /// Squares occupied by pieces of `kind`, either color.
    pub fn squares_by_kind(&self, kind: PieceKind) -> Vec<Square> {
        Self::all_squares()
            .filter(|&square| self.piece_at(square).is_some_and(|piece| piece.kind == kind))
            .collect()
    }

    /// All 64 squares, a1 first.
    pub fn all_squares() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square::from_index)
    }

    /// Rank-major rows ordered for display from `perspective`'s side of the
    /// board, each square paired with its occupant. Not used by legality.
    pub fn rows(&self, perspective: PieceColor) -> Vec<Vec<(Square, Option<Piece>)>> {
        let ranks: Vec<i8> = match perspective {
            PieceColor::Black => (0..8).collect(),
            PieceColor::White => (0..8).rev().collect(),
        };
        ranks
            .into_iter()
            .map(|rank| {
                let mut row: Vec<(Square, Option<Piece>)> = (0..8)
                    .map(|file| {
                        let square = Square::new(file, rank);
                        (square, self.piece_at(square))
                    })
                    .collect();
                if perspective == PieceColor::Black {
                    row.reverse();
                }
                row
            })
            .collect()
    }

    /// The most recently applied move.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Special-rule flags for the most recently applied move.
    pub fn last_outcome(&self) -> MoveOutcome {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(code: &str) -> Move {
        Move::parse(code).unwrap()
    }

    fn sq(code: &str) -> Square {
        Square::parse(code).unwrap()
    }

    #[test]
    fn test_initial_setup() {
        let board = Board::new();

        assert_eq!(
            board.piece_at(sq("a1")),
            Some(Piece::new(PieceKind::Rook, PieceColor::White))
        );
        assert_eq!(
            board.piece_at(sq("e8")),
            Some(Piece::new(PieceKind::King, PieceColor::Black))
        );
        assert_eq!(
            board.piece_at(sq("d1")),
            Some(Piece::new(PieceKind::Queen, PieceColor::White))
        );
        for file in 0..8 {
            assert_eq!(
                board.piece_at(Square::new(file, 1)).map(|p| p.kind),
                Some(PieceKind::Pawn)
            );
            assert_eq!(
                board.piece_at(Square::new(file, 6)).map(|p| p.kind),
                Some(PieceKind::Pawn)
            );
        }
        assert!(board.is_empty(sq("e4")));
        assert_eq!(board.squares_by_color(PieceColor::White).len(), 16);
        assert_eq!(board.squares_by_color(PieceColor::Black).len(), 16);
        assert_eq!(board.squares_by_kind(PieceKind::King).len(), 2);
        assert_eq!(board.last_move(), None);
    }

    #[test]
    fn test_apply_relocates_and_marks_moved() {
        let mut board = Board::new();
        let outcome = board.apply(mv("e2e4"));

        assert!(board.is_empty(sq("e2")));
        let pawn = board.piece_at(sq("e4")).unwrap();
        assert_eq!(pawn.kind, PieceKind::Pawn);
        assert!(pawn.has_moved);
        assert_eq!(board.last_move(), Some(mv("e2e4")));
        assert_eq!(outcome, MoveOutcome::default());
    }

    #[test]
    fn test_apply_capture_replaces_occupant() {
        let board = Board::from_moves(&Move::parse_list(&["e2e4", "d7d5", "e4d5"]).unwrap());

        let pawn = board.piece_at(sq("d5")).unwrap();
        assert_eq!(pawn.color, PieceColor::White);
        assert!(board.is_empty(sq("e4")));
        assert_eq!(board.squares_by_color(PieceColor::Black).len(), 15);
    }

    #[test]
    fn test_en_passant_eligibility_lasts_one_ply() {
        let mut board =
            Board::from_moves(&Move::parse_list(&["e2e4", "d7d5", "e4e5", "f7f5"]).unwrap());
        assert_eq!(board.possible_en_passant_moves(), vec![mv("e5f6")]);

        // Any intervening move clears the window.
        board.apply(mv("g1f3"));
        assert!(board.possible_en_passant_moves().is_empty());
    }

    #[test]
    fn test_en_passant_capture_removes_passed_pawn() {
        let mut board =
            Board::from_moves(&Move::parse_list(&["e2e4", "d7d5", "e4e5", "f7f5"]).unwrap());
        let outcome = board.apply(mv("e5f6"));

        assert!(outcome.en_passant);
        assert!(board.is_empty(sq("f5")), "passed pawn should be removed");
        assert!(board.is_empty(sq("e5")));
        assert_eq!(
            board.piece_at(sq("f6")).map(|p| p.kind),
            Some(PieceKind::Pawn)
        );
    }

    #[test]
    fn test_castle_relocates_rook() {
        // Short castle after clearing f1/g1.
        let mut board = Board::from_moves(
            &Move::parse_list(&["g1f3", "g8f6", "g2g3", "g7g6", "f1g2", "f8g7"]).unwrap(),
        );
        assert!(board.is_castle(mv("e1g1")));
        let outcome = board.apply(mv("e1g1"));

        assert!(outcome.castled);
        assert_eq!(
            board.piece_at(sq("g1")).map(|p| p.kind),
            Some(PieceKind::King)
        );
        assert_eq!(
            board.piece_at(sq("f1")).map(|p| p.kind),
            Some(PieceKind::Rook)
        );
        assert!(board.is_empty(sq("e1")));
        assert!(board.is_empty(sq("h1")));
        assert_eq!(board.last_move(), Some(mv("e1g1")));
    }

    #[test]
    fn test_moved_king_is_not_a_castle() {
        let board = Board::from_moves(
            &Move::parse_list(&["e2e4", "e7e5", "e1e2", "d7d6", "e2e1", "d6d5"]).unwrap(),
        );
        assert!(!board.is_castle(mv("e1g1")));
    }

    #[test]
    fn test_promotion_auto_queens() {
        // March the a-pawn through b7, then capture into a8.
        let mut board = Board::from_moves(
            &Move::parse_list(&["a2a4", "h7h6", "a4a5", "h6h5", "a5a6", "h5h4", "a6b7", "h4h3"])
                .unwrap(),
        );
        let outcome = board.apply(mv("b7a8"));

        assert!(outcome.promoted);
        let queen = board.piece_at(sq("a8")).unwrap();
        assert_eq!(queen.kind, PieceKind::Queen);
        assert_eq!(queen.color, PieceColor::White);
    }

    #[test]
    fn test_outcome_flags_reset_each_apply() {
        let mut board =
            Board::from_moves(&Move::parse_list(&["e2e4", "d7d5", "e4e5", "f7f5"]).unwrap());
        assert!(board.apply(mv("e5f6")).en_passant);

        let outcome = board.apply(mv("g8f6"));
        assert_eq!(outcome, MoveOutcome::default());
        assert_eq!(board.last_outcome(), MoveOutcome::default());
    }

    #[test]
    fn test_replay_is_idempotent() {
        let moves = Move::parse_list(&["e2e4", "e7e5", "g1f3", "b8c6", "f1b5"]).unwrap();
        assert_eq!(Board::from_moves(&moves), Board::from_moves(&moves));
    }

    #[test]
    fn test_rows_perspective_ordering() {
        let board = Board::new();
        let white_view = board.rows(PieceColor::White);
        let black_view = board.rows(PieceColor::Black);

        // White sees rank 8 first; Black sees rank 1 first, files reversed.
        assert_eq!(white_view[0][0].0, sq("a8"));
        assert_eq!(white_view[7][4].0, sq("e1"));
        assert_eq!(black_view[0][0].0, sq("h1"));
        assert_eq!(black_view[7][0].0, sq("h8"));
    }
}
