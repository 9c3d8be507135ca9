use crate::board::Board;
use crate::error::ChessError;
use crate::types::{Color, Square};

use super::{board_from_fen, board_to_fen};

const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[test]
fn startpos_round_trips() {
    let board = board_from_fen(STARTPOS).unwrap();
    assert_eq!(board_to_fen(&board), STARTPOS);
}

#[test]
fn fresh_board_formats_as_startpos() {
    assert_eq!(board_to_fen(&Board::new()), STARTPOS);
}

#[test]
fn four_fields_are_enough() {
    let board =
        board_from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    assert_eq!(board.side_to_move, Color::White);
    assert_eq!(board.ply, 0);
}

#[test]
fn malformed_fens_are_rejected() {
    let cases = [
        "rnbqkbnr/pppppppp/8/8 w KQkq",
        "8/8/8/8/8/8/8 w - - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KX - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1",
        "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/08/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1",
    ];
    for fen in cases {
        assert!(
            matches!(board_from_fen(fen), Err(ChessError::InvalidFen(_))),
            "accepted '{}'",
            fen
        );
    }
}

#[test]
fn each_side_needs_exactly_one_king() {
    assert_eq!(
        board_from_fen("4k3/8/8/8/8/8/8/8 w - - 0 1"),
        Err(ChessError::MissingKing(Color::White))
    );
    assert_eq!(
        board_from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
        Err(ChessError::MissingKing(Color::Black))
    );
    assert!(matches!(
        board_from_fen("4k3/8/8/8/8/8/8/2K1K3 w - - 0 1"),
        Err(ChessError::InvalidFen(_))
    ));
}

#[test]
fn castling_rights_survive_a_round_trip() {
    let full = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
    let board = board_from_fen(full).unwrap();
    assert_eq!(board_to_fen(&board), full);

    let none = "r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1";
    let board = board_from_fen(none).unwrap();
    assert_eq!(board_to_fen(&board), none);

    // Dropping one right leaves the matching rook marked as moved.
    let partial = "r3k2r/8/8/8/8/8/8/R3K2R w Kkq - 0 1";
    let board = board_from_fen(partial).unwrap();
    assert_eq!(board_to_fen(&board), partial);
}

#[test]
fn pawn_off_its_start_rank_cannot_double_step() {
    let board = board_from_fen("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1").unwrap();
    let e3 = Square::from_name("e3").unwrap();
    let dests = board.legal_destinations(e3).unwrap();
    assert_eq!(dests, vec![Square::from_name("e4").unwrap()]);
}

#[test]
fn fullmove_number_maps_to_ply() {
    let board =
        board_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1").unwrap();
    assert_eq!(board.ply, 1);

    let board = board_from_fen("4k3/8/8/8/8/8/8/4K3 w - - 3 10").unwrap();
    assert_eq!(board.ply, 18);
    assert!(board_to_fen(&board).ends_with(" 10"));
}

#[test]
fn en_passant_square_round_trips() {
    let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
    let board = board_from_fen(fen).unwrap();
    assert_eq!(board.en_passant, Some(Square::from_name("e3").unwrap()));
    assert_eq!(board_to_fen(&board), fen);
}
