use crate::board::Board;
use crate::fen::board_from_fen;
use crate::types::{Color, Piece, PieceKind, Square};

use super::{evaluate, evaluate_normalised, is_endgame, table_bonus};

fn sq(name: &str) -> Square {
    Square::from_name(name).unwrap()
}

#[test]
fn startpos_is_balanced() {
    let board = Board::new();
    assert_eq!(evaluate(&board, Color::White), 0);
    assert_eq!(evaluate(&board, Color::Black), 0);
}

#[test]
fn perspectives_are_exact_negations() {
    let board =
        board_from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    assert_eq!(
        evaluate(&board, Color::White),
        -evaluate(&board, Color::Black)
    );
}

#[test]
fn queen_odds_shows_up_as_a_big_edge() {
    let board =
        board_from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    assert!(evaluate(&board, Color::White) > 800);
    assert!(evaluate(&board, Color::Black) < -800);
}

#[test]
fn mirrored_positions_score_symmetrically() {
    // The same advance played by either colour must read the same table
    // cell through the rank mirror.
    let white_push =
        board_from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1").unwrap();
    let black_push =
        board_from_fen("rnbqkbnr/pppp1ppp/8/4p3/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    assert_eq!(
        evaluate(&white_push, Color::White),
        evaluate(&black_push, Color::Black)
    );
}

#[test]
fn pawn_table_reads_from_the_right_end() {
    let white_pawn = Piece::new(Color::White, PieceKind::Pawn);
    let black_pawn = Piece::new(Color::Black, PieceKind::Pawn);
    // Centre pawns still at home are penalised, near-promotion rows pay.
    assert_eq!(table_bonus(white_pawn, sq("e2"), false), -20);
    assert_eq!(table_bonus(white_pawn, sq("e7"), false), 50);
    assert_eq!(table_bonus(black_pawn, sq("e7"), false), -20);
    assert_eq!(table_bonus(black_pawn, sq("e2"), false), 50);
}

#[test]
fn rooks_earn_the_open_file_bonus() {
    let open = board_from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    let blocked = board_from_fen("4k3/p7/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    // The gap is the enemy pawn plus the lost file bonus.
    assert!(
        evaluate(&open, Color::White) > evaluate(&blocked, Color::White) + 100
    );
}

#[test]
fn endgame_rule_follows_queens_and_minors() {
    assert!(!is_endgame(&Board::new()));

    let no_queens = board_from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(is_endgame(&no_queens));

    let sparse = board_from_fen("1n2k1n1/8/8/8/8/8/8/Q3K3 w - - 0 1").unwrap();
    assert!(is_endgame(&sparse), "queen up but two minors apiece at most");

    let heavy = board_from_fen("1nb1k1n1/8/8/8/8/8/8/Q3K3 w - - 0 1").unwrap();
    assert!(!is_endgame(&heavy), "three minors keep it in the middlegame");
}

#[test]
fn endgame_king_heads_for_the_centre() {
    let central = board_from_fen("8/8/8/8/3k4/8/8/K7 w - - 0 1").unwrap();
    // Black's king on d4 cashes the endgame table, White's corner king
    // pays for hiding.
    assert!(evaluate(&central, Color::White) < 0);
    assert!(evaluate(&central, Color::Black) > 0);
}

#[test]
fn normalised_score_is_a_plain_rescale() {
    let board =
        board_from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    let raw = evaluate(&board, Color::White);
    let scaled = evaluate_normalised(&board, Color::White);
    assert!((scaled - f64::from(raw) / 40_000.0).abs() < 1e-12);
    assert!(scaled.abs() <= 1.0);
    assert_eq!(evaluate_normalised(&Board::new(), Color::White), 0.0);
}
