//! Stage one of graph construction: pseudo-legal generation
//!
//! Applies each piece's move mappers to its square and keeps the candidates
//! basic occupancy allows, ignoring king safety entirely:
//!
//! - static pieces (king, knight) keep candidates landing on an empty or
//!   enemy-occupied square;
//! - sliding pieces build one ray per slope and cut it at the first
//!   collision, keeping the blocker's square only when it holds an enemy;
//! - pawn pushes require an empty destination and may never capture; a lone
//!   surviving double step means the single step was blocked, so the pawn
//!   may not jump the blocker;
//! - pawn diagonals come from the separate attack mappers and require an
//!   enemy on the destination.
//!
//! Off-board candidates are produced freely and discarded by the validity
//! predicate.

use crate::board::Board;
use crate::piece::{Piece, PieceKind};
use crate::types::{Move, Square};

/// Pseudo-legal moves for every piece on the board, both colors.
pub(super) fn piece_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    for square in Board::all_squares() {
        let Some(piece) = board.piece_at(square) else {
            continue;
        };
        match piece.kind {
            PieceKind::Pawn => {
                pawn_moves(board, piece, square, &mut moves);
                pawn_attack_moves(board, piece, square, &mut moves);
            }
            PieceKind::Knight | PieceKind::King => {
                static_moves(board, piece, square, &mut moves);
            }
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                sliding_moves(board, piece, square, &mut moves);
            }
        }
    }
    moves
}

fn static_moves(board: &Board, piece: Piece, from: Square, out: &mut Vec<Move>) {
    for &(file_delta, rank_delta) in piece.kind.static_offsets() {
        let target = from.offset(file_delta, rank_delta);
        if target.is_valid() && can_move_to(board, piece, target) {
            out.push(Move::new(from, target));
        }
    }
}

fn sliding_moves(board: &Board, piece: Piece, from: Square, out: &mut Vec<Move>) {
    for &slope in piece.kind.slopes() {
        for target in cut_ray(board, piece, ray(from, slope)) {
            out.push(Move::new(from, target));
        }
    }
}

fn pawn_moves(board: &Board, piece: Piece, from: Square, out: &mut Vec<Move>) {
    let candidates: Vec<Square> = piece
        .pawn_move_targets(from)
        .into_iter()
        .filter(|&target| target.is_valid() && can_move_to(board, piece, target))
        .collect();

    // Only the double step survived: the single step is blocked.
    if candidates.len() == 1 && (candidates[0].rank() - from.rank()).abs() == 2 {
        return;
    }
    out.extend(candidates.into_iter().map(|target| Move::new(from, target)));
}

fn pawn_attack_moves(board: &Board, piece: Piece, from: Square, out: &mut Vec<Move>) {
    for target in piece.pawn_attack_targets(from) {
        if target.is_valid() && is_enemy_at(board, piece, target) {
            out.push(Move::new(from, target));
        }
    }
}

/// A piece may enter an empty square or capture an enemy; pawns never
/// capture through their move mappers.
fn can_move_to(board: &Board, piece: Piece, target: Square) -> bool {
    if board.is_empty(target) {
        return true;
    }
    if piece.kind == PieceKind::Pawn {
        return false;
    }
    is_enemy_at(board, piece, target)
}

pub(super) fn is_enemy_at(board: &Board, piece: Piece, square: Square) -> bool {
    board
        .piece_at(square)
        .is_some_and(|other| other.color != piece.color)
}

/// Valid squares along `slope` out from `from` (exclusive), to the board
/// edge. No collision applied.
pub(super) fn ray(from: Square, slope: (i8, i8)) -> Vec<Square> {
    (1..=8i8)
        .map(|distance| from.offset(slope.0 * distance, slope.1 * distance))
        .filter(|square| square.is_valid())
        .collect()
}

/// Cut a ray at its first occupied square: a friendly blocker is excluded,
/// an enemy blocker is kept as a capture.
pub(super) fn cut_ray(board: &Board, piece: Piece, ray: Vec<Square>) -> Vec<Square> {
    match ray.iter().position(|&square| !board.is_empty(square)) {
        None => ray,
        Some(first) if is_enemy_at(board, piece, ray[first]) => ray[..=first].to_vec(),
        Some(first) => ray[..first].to_vec(),
    }
}
