use chess_core::{board_from_fen, Board, Color, GameState, Move, Square};

use crate::game::GameAdapter;
use crate::search::MctsConfig;

use super::{search_move, ChessGame};

fn state(fen: &str) -> GameState {
    GameState::new(board_from_fen(fen).unwrap())
}

#[test]
fn rewards_are_signed_from_the_perspective() {
    // Scholar's mate: Black is mated.
    let mated = state("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1");
    assert_eq!(ChessGame.reward(&mated, Color::White), 1.0);
    assert_eq!(ChessGame.reward(&mated, Color::Black), -1.0);
}

#[test]
fn reward_falls_back_to_the_evaluator() {
    let start = GameState::new(Board::new());
    assert_eq!(ChessGame.reward(&start, Color::White), 0.0);
    assert_eq!(ChessGame.reward(&start, Color::Black), 0.0);

    let odds = state("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let score = ChessGame.reward(&odds, Color::White);
    assert!(score > 0.0 && score < 1.0);
}

#[test]
fn stalemate_rewards_the_evaluator_score_not_a_win() {
    let stalemate = state("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1");
    assert!(ChessGame.is_terminal(&stalemate));
    let score = ChessGame.reward(&stalemate, Color::White);
    assert!(score < 1.0, "a draw must not look like a mate");
}

#[test]
fn illegal_moves_are_dead_branches() {
    let start = GameState::new(Board::new());
    let e2 = Square::from_name("e2").unwrap();
    let e5 = Square::from_name("e5").unwrap();
    let e4 = Square::from_name("e4").unwrap();

    assert!(ChessGame.apply_move(&start, Move::new(e2, e5)).is_none());

    let next = ChessGame.apply_move(&start, Move::new(e2, e4)).unwrap();
    assert!(next.board.piece_at(e4).is_some());
    // The branch cloned; the parent snapshot is untouched.
    assert!(start.board.piece_at(e2).is_some());
    assert_eq!(start.board.ply, 0);
}

#[test]
fn search_returns_none_for_finished_positions() {
    let config = MctsConfig {
        iterations: 50,
        seed: Some(1),
        ..MctsConfig::default()
    };

    let mated = board_from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1")
        .unwrap();
    assert_eq!(search_move(&mated, Color::Black, config.clone()), None);

    let stalemated = board_from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1").unwrap();
    assert_eq!(search_move(&stalemated, Color::Black, config), None);
}
