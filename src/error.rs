//! Error types for the chess rules engine
//!
//! Only malformed input is an error: unparseable algebraic codes fail fast.
//! Out-of-range squares produced during move generation are never errors;
//! they are filtered out by the validity predicate on `Square`.

use thiserror::Error;

/// Errors that can occur while parsing engine input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessRulesError {
    /// Square code is not of the form "a1".."h8"
    #[error("Malformed square code: {code:?}")]
    MalformedSquare { code: String },

    /// Move code is not of the form "e2e4"
    #[error("Malformed move code: {code:?}")]
    MalformedMove { code: String },
}

/// Result type alias for chess rules operations
pub type ChessRulesResult<T> = Result<T, ChessRulesError>;
