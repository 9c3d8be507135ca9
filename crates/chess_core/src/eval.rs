//! Heuristic position evaluation.
//!
//! Material plus piece-square tables, with small bonuses for central
//! occupancy, minor-piece and queen mobility, rooks on open files and king
//! placement split between middlegame and endgame tables. Integer
//! centipawns throughout; `evaluate_normalised` rescales into the rough
//! [-1, 1] band a search reward wants.
//!
//! Tables are written from White's point of view with rank 8 first, so a
//! White piece reads row `7 - rank` and a Black piece rank-mirrors to
//! row `rank`.

use crate::board::Board;
use crate::rules;
use crate::types::{Color, Piece, PieceKind, Square};

const CENTER_BONUS: i32 = 15;
const MOBILITY_BONUS: i32 = 2;
const OPEN_FILE_BONUS: i32 = 15;
/// Rough maximum magnitude of `evaluate`, the normalisation divisor.
const MAX_SCORE: i32 = 40_000;

#[rustfmt::skip]
const PAWN_TABLE: [[i32; 8]; 8] = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [ 50,  50,  50,  50,  50,  50,  50,  50],
    [ 10,  10,  20,  30,  30,  20,  10,  10],
    [  5,   5,  10,  25,  25,  10,   5,   5],
    [  0,   0,   0,  20,  20,   0,   0,   0],
    [  5,  -5, -10,   0,   0, -10,  -5,   5],
    [  5,  10,  10, -20, -20,  10,  10,   5],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   0,   0,   0,   0, -20, -40],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-30,   5,  15,  20,  20,  15,   5, -30],
    [-30,   0,  15,  20,  20,  15,   0, -30],
    [-30,   5,  10,  15,  15,  10,   5, -30],
    [-40, -20,   0,   5,   5,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

#[rustfmt::skip]
const BISHOP_TABLE: [[i32; 8]; 8] = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,  10,  10,   5,   0, -10],
    [-10,   5,   5,  10,  10,   5,   5, -10],
    [-10,   0,  10,  10,  10,  10,   0, -10],
    [-10,  10,  10,  10,  10,  10,  10, -10],
    [-10,   5,   0,   0,   0,   0,   5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

#[rustfmt::skip]
const ROOK_TABLE: [[i32; 8]; 8] = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [  5,  10,  10,  10,  10,  10,  10,   5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [  0,   0,   0,   5,   5,   0,   0,   0],
];

#[rustfmt::skip]
const QUEEN_TABLE: [[i32; 8]; 8] = [
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,   5,   5,   5,   0, -10],
    [ -5,   0,   5,   5,   5,   5,   0,  -5],
    [  0,   0,   5,   5,   5,   5,   0,  -5],
    [-10,   5,   5,   5,   5,   5,   0, -10],
    [-10,   0,   5,   0,   0,   0,   0, -10],
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
];

#[rustfmt::skip]
const KING_MID_TABLE: [[i32; 8]; 8] = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [ 20,  20,   0,   0,   0,   0,  20,  20],
    [ 20,  30,  10,   0,   0,  10,  30,  20],
];

#[rustfmt::skip]
const KING_END_TABLE: [[i32; 8]; 8] = [
    [-50, -40, -30, -20, -20, -30, -40, -50],
    [-30, -20, -10,   0,   0, -10, -20, -30],
    [-30, -10,  20,  30,  30,  20, -10, -30],
    [-30, -10,  30,  40,  40,  30, -10, -30],
    [-30, -10,  30,  40,  40,  30, -10, -30],
    [-30, -10,  20,  30,  30,  20, -10, -30],
    [-30, -30,   0,   0,   0,   0, -30, -30],
    [-50, -30, -30, -30, -30, -30, -50, -50],
];

/// Scores the position in centipawns from `perspective`'s point of view.
/// Positive favours `perspective`, negative the opponent. Deterministic:
/// two boards with identical placement always score identically.
pub fn evaluate(board: &Board, perspective: Color) -> i32 {
    let endgame = is_endgame(board);
    let mut score = 0i32;
    for sq in Square::all() {
        let piece = match board.piece_at(sq) {
            Some(p) => p,
            None => continue,
        };
        let mut value = piece.weight() + table_bonus(piece, sq, endgame);
        if is_central(sq) {
            value += CENTER_BONUS;
        }
        match piece.kind {
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Queen => {
                value += MOBILITY_BONUS * destination_count(board, sq);
            }
            PieceKind::Rook if file_has_no_pawns(board, sq.file()) => {
                value += OPEN_FILE_BONUS;
            }
            _ => {}
        }
        score += if piece.color == perspective { value } else { -value };
    }
    score
}

/// `evaluate` rescaled to roughly [-1, 1], the shape a search reward wants.
pub fn evaluate_normalised(board: &Board, perspective: Color) -> f64 {
    f64::from(evaluate(board, perspective)) / f64::from(MAX_SCORE)
}

fn table_bonus(piece: Piece, sq: Square, endgame: bool) -> i32 {
    let row = match piece.color {
        Color::White => 7 - sq.rank(),
        Color::Black => sq.rank(),
    } as usize;
    let file = sq.file() as usize;
    let table = match piece.kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King if endgame => &KING_END_TABLE,
        PieceKind::King => &KING_MID_TABLE,
    };
    table[row][file]
}

/// The sixteen squares of the extended centre, c3 through f6.
fn is_central(sq: Square) -> bool {
    (2..=5).contains(&sq.rank()) && (2..=5).contains(&sq.file())
}

fn destination_count(board: &Board, sq: Square) -> i32 {
    rules::pseudo_legal_destinations(board, sq).map_or(0, |d| d.len() as i32)
}

fn file_has_no_pawns(board: &Board, file: u8) -> bool {
    (0..8).all(|rank| {
        !matches!(
            Square::new(rank, file).and_then(|sq| board.piece_at(sq)),
            Some(p) if p.kind == PieceKind::Pawn
        )
    })
}

/// Endgame when the queens are gone, or when queens remain but both sides
/// are down to at most two minor pieces.
fn is_endgame(board: &Board) -> bool {
    let mut queens = 0;
    let mut white_minors = 0;
    let mut black_minors = 0;
    for sq in Square::all() {
        let piece = match board.piece_at(sq) {
            Some(p) => p,
            None => continue,
        };
        match piece.kind {
            PieceKind::Queen => queens += 1,
            PieceKind::Knight | PieceKind::Bishop => match piece.color {
                Color::White => white_minors += 1,
                Color::Black => black_minors += 1,
            },
            _ => {}
        }
    }
    queens == 0 || (white_minors <= 2 && black_minors <= 2)
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
