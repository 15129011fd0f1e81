//! Legal move graph construction
//!
//! The hard part of the engine: from one immutable [`Board`] snapshot,
//! compute the full set of legal moves for every piece of both colors.
//! Nodes are squares, edges are moves.
//!
//! Construction runs a fixed pipeline over the whole candidate set:
//!
//! 1. pseudo-legal generation from the piece move mappers, with collision
//!    cutting for sliding rays ([`pseudo`]);
//! 2. injection of en-passant and castling moves ([`specials`]);
//! 3. king-safety filtering against the opponent's raw destinations;
//! 4. pin restriction along sliding attack rays;
//! 5. check-response narrowing to captures, interpositions, and king moves
//!    ([`safety`]).
//!
//! The raw set from stages 1-2 doubles as the attack-range oracle for the
//! later stages; no second, recursively filtered generation pass exists, so
//! the two kings can never send the computation into mutual recursion.
//!
//! The graph is dependent on its board and never independently mutated: any
//! board change requires building a new graph. The final move collection is
//! deduplicated by (src, dst) and its order carries no meaning; compare it
//! as a set.

mod pseudo;
mod safety;
mod specials;

use std::collections::{BTreeMap, HashSet};

use crate::board::Board;
use crate::piece::{PieceColor, PieceKind};
use crate::types::{Move, Square};

/// The legal move set for one board snapshot.
#[derive(Debug)]
pub struct MoveGraph<'a> {
    board: &'a Board,
    moves: Vec<Move>,
}

impl<'a> MoveGraph<'a> {
    /// Build the full legal move set for `board`.
    pub fn new(board: &'a Board) -> Self {
        let mut moves = Self::build_raw(board);
        safety::filter_king_safety(board, &mut moves);
        safety::restrict_pinned(board, &mut moves);
        safety::narrow_check_responses(board, &mut moves);
        dedup(&mut moves);
        MoveGraph { board, moves }
    }

    /// Stages one and two: pseudo-legal moves for both colors plus the
    /// special moves, with no safety filtering applied.
    fn build_raw(board: &Board) -> Vec<Move> {
        let mut moves = pseudo::piece_moves(board);
        moves.extend(board.possible_en_passant_moves());
        let castles = specials::castle_moves(board, &moves);
        moves.extend(castles);
        moves
    }

    pub fn board(&self) -> &Board {
        self.board
    }

    /// Every legal move, both colors, in no meaningful order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Legal moves starting on `square`.
    pub fn moves_from(&self, square: Square) -> Vec<Move> {
        self.moves
            .iter()
            .copied()
            .filter(|mv| mv.src() == square)
            .collect()
    }

    /// Legal moves ending on `square`.
    pub fn moves_to(&self, square: Square) -> Vec<Move> {
        self.moves
            .iter()
            .copied()
            .filter(|mv| mv.dst() == square)
            .collect()
    }

    /// Legal moves of all pieces of `color`.
    pub fn moves_by_color(&self, color: PieceColor) -> Vec<Move> {
        self.moves
            .iter()
            .copied()
            .filter(|mv| {
                self.board
                    .piece_at(mv.src())
                    .is_some_and(|piece| piece.color == color)
            })
            .collect()
    }

    /// Legal moves of all pieces of `kind`.
    pub fn moves_by_kind(&self, kind: PieceKind) -> Vec<Move> {
        self.moves
            .iter()
            .copied()
            .filter(|mv| {
                self.board
                    .piece_at(mv.src())
                    .is_some_and(|piece| piece.kind == kind)
            })
            .collect()
    }

    /// Moves ending on a king's square.
    pub fn check_attacks(&self) -> Vec<Move> {
        safety::check_attacks(self.board, &self.moves)
    }

    /// Serializable mapping from every board index 0-63 to the legal
    /// destination indices from it; empty when the square is unoccupied or
    /// its piece cannot move.
    pub fn as_index_map(&self) -> BTreeMap<u8, Vec<u8>> {
        Board::all_squares()
            .map(|square| {
                (
                    square.index(),
                    self.moves_from(square)
                        .iter()
                        .map(|mv| mv.dst().index())
                        .collect(),
                )
            })
            .collect()
    }
}

fn dedup(moves: &mut Vec<Move>) {
    let mut seen = HashSet::new();
    moves.retain(|&mv| seen.insert(mv));
}
