//! Game status derivation
//!
//! Derived, never stored: a pure function of one move graph and the side to
//! move. Check is a property of the position (a king's square under attack,
//! whoever is to move); checkmate and stalemate additionally ask whether the
//! mover has any legal move left. No draw condition beyond stalemate is
//! modeled.

use serde::{Deserialize, Serialize};

use crate::move_gen::MoveGraph;
use crate::piece::PieceColor;

/// Serializable status record for one position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub turn: PieceColor,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_draw: bool,
}

/// Status queries over one move graph.
pub struct GameState<'a> {
    graph: &'a MoveGraph<'a>,
    turn: PieceColor,
}

impl<'a> GameState<'a> {
    pub fn new(graph: &'a MoveGraph<'a>, turn: PieceColor) -> Self {
        GameState { graph, turn }
    }

    pub fn turn(&self) -> PieceColor {
        self.turn
    }

    /// A king's square appears as an attacked end-square.
    pub fn is_check(&self) -> bool {
        !self.graph.check_attacks().is_empty()
    }

    /// The side to move has at least one legal move.
    pub fn can_move(&self) -> bool {
        !self.graph.moves_by_color(self.turn).is_empty()
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.can_move()
    }

    /// Stalemate.
    pub fn is_draw(&self) -> bool {
        !self.is_check() && !self.can_move()
    }

    pub fn status(&self) -> StatusRecord {
        StatusRecord {
            turn: self.turn,
            is_check: self.is_check(),
            is_checkmate: self.is_checkmate(),
            is_draw: self.is_draw(),
        }
    }
}
