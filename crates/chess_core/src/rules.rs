//! Pseudo-legal move generation, one generator per piece kind.
//!
//! Generators read board occupancy but never mutate it, and they ignore king
//! safety entirely. Castling and en passant depend on move history rather
//! than occupancy alone, so they live one layer up in `board`.

use crate::board::Board;
use crate::error::ChessError;
use crate::types::{Color, Piece, PieceKind, Square};

pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
pub(crate) const KING_STEPS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Destinations reachable by the piece on `from`, ignoring king safety.
///
/// Errors when `from` is empty; a rules query needs a piece.
pub fn pseudo_legal_destinations(board: &Board, from: Square) -> Result<Vec<Square>, ChessError> {
    let piece = board.piece_at(from).ok_or(ChessError::EmptySquare(from))?;
    let mut out = Vec::new();
    match piece.kind {
        PieceKind::Pawn => gen_pawn(board, from, piece, &mut out),
        PieceKind::Knight => gen_steps(board, from, piece.color, &KNIGHT_JUMPS, &mut out),
        PieceKind::Bishop => gen_slider(board, from, piece.color, &DIAGONALS, &mut out),
        PieceKind::Rook => gen_slider(board, from, piece.color, &ORTHOGONALS, &mut out),
        PieceKind::Queen => {
            gen_slider(board, from, piece.color, &DIAGONALS, &mut out);
            gen_slider(board, from, piece.color, &ORTHOGONALS, &mut out);
        }
        PieceKind::King => gen_steps(board, from, piece.color, &KING_STEPS, &mut out),
    }
    Ok(out)
}

fn gen_pawn(board: &Board, from: Square, pawn: Piece, out: &mut Vec<Square>) {
    let dir = pawn.color.forward();

    // forward one, then two while the pawn has never moved
    if let Some(one) = from.offset(dir, 0) {
        if board.piece_at(one).is_none() {
            out.push(one);
            if !pawn.has_moved {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.piece_at(two).is_none() {
                        out.push(two);
                    }
                }
            }
        }
    }

    // diagonal captures, only onto enemy-occupied squares
    for df in [-1, 1] {
        if let Some(to) = from.offset(dir, df) {
            match board.piece_at(to) {
                Some(target) if target.color != pawn.color => out.push(to),
                _ => {}
            }
        }
    }
}

fn gen_steps(board: &Board, from: Square, color: Color, steps: &[(i8, i8)], out: &mut Vec<Square>) {
    for &(dr, df) in steps {
        if let Some(to) = from.offset(dr, df) {
            match board.piece_at(to) {
                None => out.push(to),
                Some(target) if target.color != color => out.push(to),
                _ => {}
            }
        }
    }
}

fn gen_slider(board: &Board, from: Square, color: Color, dirs: &[(i8, i8)], out: &mut Vec<Square>) {
    for &(dr, df) in dirs {
        let mut cur = from.offset(dr, df);
        while let Some(to) = cur {
            match board.piece_at(to) {
                None => out.push(to),
                Some(target) if target.color != color => {
                    out.push(to);
                    break;
                }
                _ => break,
            }
            cur = to.offset(dr, df);
        }
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
