//! Game façade: the authoritative board plus the recorded move history.
//!
//! Embedding layers (GUI, network relay) drive a `Game` rather than the
//! board directly: it validates through the same legality path, keeps the
//! move text needed for opening lookup, and exports the position and a
//! serializable summary for persistence collaborators.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::ChessResult;
use crate::fen::{board_from_fen, board_to_fen};
use crate::openings::OpeningBook;
use crate::types::{Color, Move, Square};

/// Outcome of a game, as far as it has been played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    InProgress,
    WhiteWins,
    BlackWins,
    Draw,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    history: Vec<Move>,
}

impl Game {
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            history: Vec::new(),
        }
    }

    /// Starts from an arbitrary position. The recorded history begins empty,
    /// so opening lookup only makes sense from the standard start.
    pub fn from_fen(fen: &str) -> ChessResult<Game> {
        Ok(Game {
            board: board_from_fen(fen)?,
            history: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Validated move entry point. The move is recorded only when the board
    /// actually applied it.
    pub fn apply(&mut self, from: Square, to: Square) -> bool {
        let applied = self.board.apply_move(from, to);
        if applied {
            self.history.push(Move::new(from, to));
        }
        applied
    }

    pub fn legal_destinations(&self, from: Square) -> ChessResult<Vec<Square>> {
        self.board.legal_destinations(from)
    }

    pub fn in_check(&self, color: Color) -> bool {
        self.board.in_check(color)
    }

    pub fn is_terminal(&self) -> bool {
        self.board.is_terminal()
    }

    pub fn result(&self) -> GameResult {
        if self.board.is_checkmate(Color::White) {
            GameResult::BlackWins
        } else if self.board.is_checkmate(Color::Black) {
            GameResult::WhiteWins
        } else if self.board.is_stalemate(self.board.side_to_move) {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }

    /// Space-joined coordinate text of the history, the opening-book key.
    pub fn moves_string(&self) -> String {
        self.history
            .iter()
            .map(|mv| mv.uci())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn opening<'a>(&self, book: &'a OpeningBook) -> Option<&'a str> {
        book.lookup(&self.moves_string())
    }

    pub fn fen(&self) -> String {
        board_to_fen(&self.board)
    }

    /// Snapshot summary for export or storage.
    pub fn record(&self) -> GameRecord {
        GameRecord {
            moves: self.history.iter().map(|mv| mv.uci()).collect(),
            result: self.result(),
            final_fen: self.fen(),
        }
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

/// Serializable summary of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Moves in coordinate text, in play order.
    pub moves: Vec<String>,
    pub result: GameResult,
    /// Position after the last recorded move.
    pub final_fen: String,
}

impl GameRecord {
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize: {}", e))
    }

    pub fn from_json(json: &str) -> Result<GameRecord, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse: {}", e))
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
