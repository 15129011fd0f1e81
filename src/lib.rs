//! # Chess Rules Engine
//!
//! A pure rules engine: given an ordered history of moves, it reconstructs
//! board state and computes the exact set of legal moves, including castling,
//! en passant, promotion, and check/checkmate/stalemate detection.
//!
//! The engine is consumed as a pure function of "move history in" →
//! "board + legal-move set + game status out". It knows nothing about
//! networking, storage, or users; those layers hand it the full history on
//! every call and intersect submitted moves against the computed legal set.
//!
//! ## Module Organization
//!
//! - `types` - `Square` and `Move` value types with algebraic parsing
//! - `piece` - piece variants and their move-shape tables
//! - `board` - the 64-slot board, move application, replay
//! - `move_gen` - the legal move graph construction pipeline
//! - `state` - check/checkmate/stalemate status queries
//! - `api` - the external call contract (move codes in, snapshot out)
//! - `error` - parse-error taxonomy
//!
//! ## Example
//!
//! ```
//! use chess_rules::snapshot;
//!
//! let snap = snapshot(&["e2e4", "e7e5"]).unwrap();
//! assert!(!snap.status.is_check);
//! assert_eq!(snap.legal_moves.len(), 64);
//! ```

pub mod api;
pub mod board;
pub mod error;
pub mod move_gen;
pub mod piece;
pub mod state;
pub mod types;

pub use api::{snapshot, Snapshot};
pub use board::{Board, MoveOutcome};
pub use error::{ChessRulesError, ChessRulesResult};
pub use move_gen::MoveGraph;
pub use piece::{Piece, PieceColor, PieceKind};
pub use state::{GameState, StatusRecord};
pub use types::{Move, Square};
