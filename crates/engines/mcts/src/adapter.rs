//! Chess instantiation of the game-adapter seam.

use chess_core::{evaluate_normalised, Board, Color, GameState, Move};

use crate::game::GameAdapter;
use crate::search::{Mcts, MctsConfig};

/// Adapter wiring the generic search to `chess_core`. Stateless; every
/// branch works on its own cloned snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChessGame;

impl GameAdapter for ChessGame {
    type State = GameState;
    type Move = Move;
    type Player = Color;

    fn is_terminal(&self, state: &GameState) -> bool {
        state.board.is_terminal()
    }

    fn legal_moves(&self, state: &GameState) -> Vec<Move> {
        state.board.legal_moves()
    }

    fn apply_move(&self, state: &GameState, mv: Move) -> Option<GameState> {
        let mut next = state.clone();
        if next.board.apply_move(mv.from, mv.to) {
            Some(next)
        } else {
            None
        }
    }

    fn reward(&self, state: &GameState, perspective: Color) -> f64 {
        if state.board.is_checkmate(perspective.other()) {
            1.0
        } else if state.board.is_checkmate(perspective) {
            -1.0
        } else {
            evaluate_normalised(&state.board, perspective)
        }
    }
}

/// Searches `board` on behalf of `perspective` and returns the chosen
/// move, or `None` when the side has no legal reply (mate or stalemate).
/// The board itself is never touched; callers replay the move through
/// their own validated path.
pub fn search_move(board: &Board, perspective: Color, config: MctsConfig) -> Option<Move> {
    let mut mcts = Mcts::new(config);
    mcts.run(&ChessGame, GameState::new(board.clone()), perspective)
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod adapter_tests;
