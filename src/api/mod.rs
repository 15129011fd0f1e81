//! Public call contract for the engine
//!
//! One entry point: hand in the full ordered move history as 4-character
//! algebraic codes, get back a [`Snapshot`] with the per-square legal-move
//! mapping, the status record, and the special-rule flags of the final
//! applied move.
//!
//! Every call rebuilds the game from scratch: board replayed move by move,
//! graph built once from the resulting board, status derived from both.
//! Nothing is cached across calls, so concurrent callers each get their own
//! snapshot and stale legal-move sets cannot exist. The cost is O(history)
//! replay per call; that trade is intentional.
//!
//! The engine does not check that the codes describe legal moves; callers
//! must intersect a submitted move against the previous snapshot's mapping
//! before appending it to the history.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, MoveOutcome};
use crate::error::ChessRulesResult;
use crate::move_gen::MoveGraph;
use crate::piece::PieceColor;
use crate::state::{GameState, StatusRecord};
use crate::types::Move;

/// One complete engine answer for a move history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Legal destination indices from every board index 0-63; empty lists
    /// for unoccupied or immobile squares.
    pub legal_moves: BTreeMap<u8, Vec<u8>>,
    pub status: StatusRecord,
    /// Special rules the final applied move triggered.
    pub flags: MoveOutcome,
}

/// Side to move after `plies` applied moves.
pub fn turn_after(plies: usize) -> PieceColor {
    if plies % 2 == 0 {
        PieceColor::White
    } else {
        PieceColor::Black
    }
}

/// Rebuild the game from an ordered list of move codes and compute the
/// legal move set and status.
///
/// Fails fast on the first malformed code, leaving nothing behind: each
/// call operates on its own fresh board.
pub fn snapshot<S: AsRef<str>>(codes: &[S]) -> ChessRulesResult<Snapshot> {
    let moves = Move::parse_list(codes)?;
    let board = Board::from_moves(&moves);
    let graph = MoveGraph::new(&board);
    let state = GameState::new(&graph, turn_after(moves.len()));
    let status = state.status();
    debug!(
        plies = moves.len(),
        turn = ?status.turn,
        is_check = status.is_check,
        "computed game snapshot"
    );
    Ok(Snapshot {
        legal_moves: graph.as_index_map(),
        status,
        flags: board.last_outcome(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChessRulesError;

    #[test]
    fn test_turn_alternates_from_white() {
        assert_eq!(turn_after(0), PieceColor::White);
        assert_eq!(turn_after(1), PieceColor::Black);
        assert_eq!(turn_after(2), PieceColor::White);
    }

    #[test]
    fn test_snapshot_covers_all_squares() {
        let snap = snapshot(&["e2e4"]).unwrap();
        assert_eq!(snap.legal_moves.len(), 64);
        assert_eq!(snap.status.turn, PieceColor::Black);
        assert_eq!(snap.flags, MoveOutcome::default());
    }

    #[test]
    fn test_snapshot_rejects_malformed_codes() {
        let err = snapshot(&["e2e4", "nonsense"]).unwrap_err();
        assert!(matches!(err, ChessRulesError::MalformedMove { .. }));
    }

    #[test]
    fn test_empty_history_is_the_initial_position() {
        let codes: [&str; 0] = [];
        let snap = snapshot(&codes).unwrap();
        assert_eq!(snap.status.turn, PieceColor::White);
        assert!(!snap.status.is_check);

        // b1 -> {a3, c3} as indices.
        let mut from_b1 = snap.legal_moves[&1].clone();
        from_b1.sort_unstable();
        assert_eq!(from_b1, vec![16, 18]);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let snap = snapshot(&["e2e4", "e7e5"]).unwrap();
        let value = serde_json::to_value(&snap).unwrap();

        assert_eq!(value["status"]["turn"], "white");
        assert_eq!(value["status"]["is_check"], false);
        assert_eq!(value["flags"]["castled"], false);
        assert!(value["legal_moves"]["1"].is_array());
    }

    #[test]
    fn test_snapshot_reports_special_flags() {
        let snap = snapshot(&["e2e4", "d7d5", "e4e5", "f7f5", "e5f6"]).unwrap();
        assert!(snap.flags.en_passant);
        assert!(!snap.flags.promoted);
        assert!(!snap.flags.castled);
    }
}
