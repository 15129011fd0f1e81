//! Piece variants and their move-shape tables
//!
//! The six piece kinds form a closed union; each kind carries its movement
//! pattern as plain offset data rather than behavior, so the move generator
//! can stay table-driven and the tables can be tested in isolation.
//!
//! Two families of pattern exist:
//!
//! - **Static** pieces (king, knight, pawn pushes) have one candidate square
//!   per offset, with no intermediate squares to check for collision.
//! - **Sliding** pieces (bishop, rook, queen) have one slope per direction;
//!   the generator applies each slope at increasing distance to build a ray
//!   and cuts it at the first collision.
//!
//! Pawns additionally carry separate attack offsets: a pawn push requires an
//! empty destination while a diagonal requires an enemy piece, so the two
//! must never be merged into one candidate set.

use serde::{Deserialize, Serialize};

use crate::types::Square;

/// Piece color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    /// The opposing color.
    pub fn enemy(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// Forward rank step for this color's pawns.
    pub fn pawn_direction(self) -> i8 {
        match self {
            PieceColor::White => 1,
            PieceColor::Black => -1,
        }
    }

    /// Rank this color's pawns start on (zero-based).
    pub fn pawn_start_rank(self) -> i8 {
        match self {
            PieceColor::White => 1,
            PieceColor::Black => 6,
        }
    }

    /// Farthest rank for this color; a pawn reaching it promotes.
    pub fn promotion_rank(self) -> i8 {
        match self {
            PieceColor::White => 7,
            PieceColor::Black => 0,
        }
    }
}

/// The closed set of piece kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Knight candidate offsets: the four (1,2)/(2,1) shapes and their negations.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// King candidate offsets, one per adjacent square.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Rook ray slopes.
pub const ROOK_SLOPES: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Bishop ray slopes.
pub const BISHOP_SLOPES: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Queen ray slopes: the union of rook and bishop slopes. The queen has no
/// movement rule of its own.
pub const QUEEN_SLOPES: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

impl PieceKind {
    /// Whether the piece slides along rays until blocked.
    pub fn is_sliding(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Ray slopes for sliding pieces; empty for the rest.
    pub fn slopes(self) -> &'static [(i8, i8)] {
        match self {
            PieceKind::Bishop => &BISHOP_SLOPES,
            PieceKind::Rook => &ROOK_SLOPES,
            PieceKind::Queen => &QUEEN_SLOPES,
            _ => &[],
        }
    }

    /// Candidate offsets for static pieces; pawns use their own
    /// direction-dependent mappers instead.
    pub fn static_offsets(self) -> &'static [(i8, i8)] {
        match self {
            PieceKind::Knight => &KNIGHT_OFFSETS,
            PieceKind::King => &KING_OFFSETS,
            _ => &[],
        }
    }

    /// Single-letter piece code used by display layers.
    pub fn code(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Unicode figurine for display layers; color styling is the caller's
    /// concern.
    pub fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => '\u{2659}',
            PieceKind::Knight => '\u{2658}',
            PieceKind::Bishop => '\u{2657}',
            PieceKind::Rook => '\u{2656}',
            PieceKind::Queen => '\u{2655}',
            PieceKind::King => '\u{2654}',
        }
    }
}

/// A piece on the board. Value-like: moving a piece means placing an
/// equivalent piece (with `has_moved` set) on the destination and clearing
/// the origin. The flag exists only for castling-rights and pawn double-step
/// bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: PieceColor) -> Self {
        Piece {
            kind,
            color,
            has_moved: false,
        }
    }

    /// Candidate push squares for a pawn on `from`: the single step, plus
    /// the double step only from the unmoved start rank.
    pub fn pawn_move_targets(self, from: Square) -> Vec<Square> {
        let direction = self.color.pawn_direction();
        let mut targets = vec![from.offset(0, direction)];
        if from.rank() == self.color.pawn_start_rank() {
            targets.push(from.offset(0, 2 * direction));
        }
        targets
    }

    /// Diagonal capture squares for a pawn on `from`.
    pub fn pawn_attack_targets(self, from: Square) -> Vec<Square> {
        let direction = self.color.pawn_direction();
        vec![from.offset(1, direction), from.offset(-1, direction)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queen_slopes_are_rook_union_bishop() {
        for slope in ROOK_SLOPES.iter().chain(BISHOP_SLOPES.iter()) {
            assert!(QUEEN_SLOPES.contains(slope));
        }
        assert_eq!(QUEEN_SLOPES.len(), ROOK_SLOPES.len() + BISHOP_SLOPES.len());
    }

    #[test]
    fn test_pawn_direction_threads_through_colors() {
        assert_eq!(PieceColor::White.pawn_direction(), 1);
        assert_eq!(PieceColor::Black.pawn_direction(), -1);
        assert_eq!(PieceColor::White.promotion_rank(), 7);
        assert_eq!(PieceColor::Black.promotion_rank(), 0);
    }

    #[test]
    fn test_pawn_double_step_only_from_start_rank() {
        let white = Piece::new(PieceKind::Pawn, PieceColor::White);
        let on_start = white.pawn_move_targets(Square::new(4, 1));
        assert_eq!(on_start, vec![Square::new(4, 2), Square::new(4, 3)]);

        let advanced = white.pawn_move_targets(Square::new(4, 2));
        assert_eq!(advanced, vec![Square::new(4, 3)]);

        let black = Piece::new(PieceKind::Pawn, PieceColor::Black);
        let black_start = black.pawn_move_targets(Square::new(3, 6));
        assert_eq!(black_start, vec![Square::new(3, 5), Square::new(3, 4)]);
    }

    #[test]
    fn test_pawn_attack_targets_follow_direction() {
        let white = Piece::new(PieceKind::Pawn, PieceColor::White);
        let targets = white.pawn_attack_targets(Square::new(4, 1));
        assert!(targets.contains(&Square::new(5, 2)));
        assert!(targets.contains(&Square::new(3, 2)));
    }

    #[test]
    fn test_static_and_sliding_split() {
        assert!(PieceKind::Queen.is_sliding());
        assert!(PieceKind::Rook.is_sliding());
        assert!(PieceKind::Bishop.is_sliding());
        assert!(!PieceKind::Knight.is_sliding());
        assert_eq!(PieceKind::Knight.static_offsets().len(), 8);
        assert_eq!(PieceKind::King.static_offsets().len(), 8);
        assert!(PieceKind::Pawn.static_offsets().is_empty());
    }
}
