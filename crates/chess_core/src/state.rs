//! Position snapshot with position-identity semantics.
//!
//! Two states compare equal when every cell holds the same piece kind and
//! colour and the same side is to move. The `has_moved` flags, ply counter
//! and en-passant bookkeeping are deliberately outside the identity: a
//! position reached by transposition hashes and compares as the same
//! position.

use std::hash::{Hash, Hasher};

use crate::board::Board;
use crate::types::{Color, PieceKind, Square};

#[derive(Clone, Debug)]
pub struct GameState {
    pub board: Board,
}

impl GameState {
    pub fn new(board: Board) -> GameState {
        GameState { board }
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &GameState) -> bool {
        if self.board.side_to_move != other.board.side_to_move {
            return false;
        }
        Square::all().all(|sq| cell(&self.board, sq) == cell(&other.board, sq))
    }
}

impl Eq for GameState {}

impl Hash for GameState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.side_to_move.hash(state);
        for sq in Square::all() {
            cell(&self.board, sq).hash(state);
        }
    }
}

fn cell(board: &Board, sq: Square) -> Option<(PieceKind, Color)> {
    board.piece_at(sq).map(|p| (p.kind, p.color))
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
