//! Error types for board queries and position import.
//!
//! Illegal moves are not represented here: `apply_move` reports them with a
//! `false` return and callers are expected to check it.

use thiserror::Error;

use crate::types::{Color, Square};

/// Errors surfaced by rule queries and FEN parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// A rule query was made against an empty square.
    #[error("no piece on {0}")]
    EmptySquare(Square),

    /// Malformed FEN text.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A parsed position is missing a king for a colour still in play.
    #[error("no {0} king on the board")]
    MissingKing(Color),
}

/// Result type alias for board and game operations.
pub type ChessResult<T> = Result<T, ChessError>;
