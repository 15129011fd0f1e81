//! Square and move value types
//!
//! Addresses on the 8x8 grid and moves between them. Both are immutable
//! value types compared by coordinates, so they can serve as set and map
//! keys throughout the move graph.
//!
//! Coordinates are signed: move generation deliberately produces off-board
//! candidates (a knight near a corner, a ray running past the edge) and
//! discards them with [`Square::is_valid`] instead of guarding every offset.

use std::fmt;

use crate::error::{ChessRulesError, ChessRulesResult};

/// Light/dark shade of a board square, for display layers only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SquareShade {
    Light,
    Dark,
}

/// A board coordinate: file 0-7 = a-h, rank 0-7 = 1-8.
///
/// Squares outside that range are representable on purpose; they answer
/// `false` from [`Square::is_valid`] and get filtered out of candidate sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: i8,
    rank: i8,
}

impl Square {
    pub fn new(file: i8, rank: i8) -> Self {
        Square { file, rank }
    }

    /// Square from a linear index 0-63 (a1 = 0, h8 = 63).
    pub fn from_index(index: u8) -> Self {
        Square {
            file: (index % 8) as i8,
            rank: (index / 8) as i8,
        }
    }

    /// Parse a two-character algebraic code ("a1".."h8").
    pub fn parse(code: &str) -> ChessRulesResult<Self> {
        let malformed = || ChessRulesError::MalformedSquare {
            code: code.to_owned(),
        };
        let bytes = code.as_bytes();
        if bytes.len() != 2 || !bytes[0].is_ascii_lowercase() || !bytes[1].is_ascii_digit() {
            return Err(malformed());
        }
        let square = Square::new(
            (bytes[0] - b'a') as i8,
            bytes[1] as i8 - b'1' as i8,
        );
        if !square.is_valid() {
            return Err(malformed());
        }
        Ok(square)
    }

    pub fn file(self) -> i8 {
        self.file
    }

    pub fn rank(self) -> i8 {
        self.rank
    }

    /// Linear index `file + 8 * rank`. Meaningful for valid squares only.
    pub fn index(self) -> u8 {
        (self.file + 8 * self.rank) as u8
    }

    /// Both coordinates on the board.
    pub fn is_valid(self) -> bool {
        (0..8).contains(&self.file) && (0..8).contains(&self.rank)
    }

    /// The square displaced by `(file_delta, rank_delta)`, possibly off-board.
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Square {
        Square::new(self.file + file_delta, self.rank + rank_delta)
    }

    /// Board shade of this square, for rendering.
    pub fn shade(self) -> SquareShade {
        if (self.file + self.rank) % 2 == 0 {
            SquareShade::Dark
        } else {
            SquareShade::Light
        }
    }
}

impl fmt::Display for Square {
    /// Renders the algebraic code of a valid square (e.g. "e2").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file as u8) as char;
        write!(f, "{}{}", file, self.rank + 1)
    }
}

/// A move between two squares, compared by its (src, dst) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    src: Square,
    dst: Square,
}

impl Move {
    pub fn new(src: Square, dst: Square) -> Self {
        Move { src, dst }
    }

    /// Parse a four-character algebraic code ("e2e4").
    pub fn parse(code: &str) -> ChessRulesResult<Self> {
        let malformed = || ChessRulesError::MalformedMove {
            code: code.to_owned(),
        };
        if code.len() != 4 {
            return Err(malformed());
        }
        let src = code.get(0..2).ok_or_else(malformed)?;
        let dst = code.get(2..4).ok_or_else(malformed)?;
        let src = Square::parse(src).map_err(|_| malformed())?;
        let dst = Square::parse(dst).map_err(|_| malformed())?;
        Ok(Move::new(src, dst))
    }

    /// Parse an ordered list of move codes, the game replay wire format.
    pub fn parse_list<S: AsRef<str>>(codes: &[S]) -> ChessRulesResult<Vec<Move>> {
        codes.iter().map(|code| Move::parse(code.as_ref())).collect()
    }

    pub fn src(self) -> Square {
        self.src
    }

    pub fn dst(self) -> Square {
        self.dst
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.src, self.dst)
    }
}
