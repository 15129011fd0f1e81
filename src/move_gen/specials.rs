//! Stage two: special-move injection
//!
//! En-passant moves come straight from the board's last-move bookkeeping;
//! castling is judged here against the raw move set built so far, since the
//! attacked-square tests need the opponent's candidate destinations.

use crate::board::Board;
use crate::piece::{PieceColor, PieceKind};
use crate::types::{Move, Square};

use super::safety;

/// Castling moves available to either side.
///
/// For each unmoved king: no castling at all while checked; toward each
/// side, the squares between king and rook must be clear up to the rook's
/// own home square, the rook there must be unmoved, and the square the king
/// passes through must not lie in the enemy attack range. The emitted move
/// displaces the king two files; destination safety is handled by the
/// king-safety stage like any other king move.
pub(super) fn castle_moves(board: &Board, raw_moves: &[Move]) -> Vec<Move> {
    let mut castles = Vec::new();
    for square in Board::all_squares() {
        let Some(piece) = board.piece_at(square) else {
            continue;
        };
        if piece.kind != PieceKind::King || piece.has_moved {
            continue;
        }
        if safety::is_attacked(board, raw_moves, square, piece.color.enemy()) {
            continue;
        }
        for direction in [1i8, -1] {
            if let Some(mv) = castle_toward(board, raw_moves, square, piece.color, direction) {
                castles.push(mv);
            }
        }
    }
    castles
}

fn castle_toward(
    board: &Board,
    raw_moves: &[Move],
    king_square: Square,
    color: PieceColor,
    direction: i8,
) -> Option<Move> {
    let rook_home = Square::new(if direction > 0 { 7 } else { 0 }, king_square.rank());

    // Walk toward the rook; the first occupied square must be the rook
    // itself, unmoved, on its home square.
    let mut step = 1;
    loop {
        let square = king_square.offset(direction * step, 0);
        if !square.is_valid() {
            return None;
        }
        if let Some(blocker) = board.piece_at(square) {
            if square != rook_home
                || blocker.kind != PieceKind::Rook
                || blocker.color != color
                || blocker.has_moved
            {
                return None;
            }
            break;
        }
        step += 1;
    }

    let passed = king_square.offset(direction, 0);
    if safety::is_attacked(board, raw_moves, passed, color.enemy()) {
        return None;
    }
    Some(Move::new(king_square, king_square.offset(2 * direction, 0)))
}
