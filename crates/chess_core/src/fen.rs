//! FEN parsing and formatting.
//!
//! Accepts four to six fields: placement, side to move, castling rights,
//! en-passant square, then the optional halfmove clock and fullmove number.
//! Castling rights are folded into the per-piece `has_moved` flags on the
//! way in and recovered from them on the way out, so a parsed board needs no
//! extra state to castle correctly.

use crate::board::Board;
use crate::error::{ChessError, ChessResult};
use crate::types::{Color, Piece, PieceKind, Square};

pub fn board_from_fen(fen: &str) -> ChessResult<Board> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 4 || fields.len() > 6 {
        return Err(ChessError::InvalidFen(format!(
            "expected 4 to 6 fields, got {}",
            fields.len()
        )));
    }

    let side_to_move = match fields[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => {
            return Err(ChessError::InvalidFen(format!(
                "side to move must be 'w' or 'b', got '{}'",
                other
            )))
        }
    };

    let rights = parse_castling(fields[2])?;

    let en_passant = match fields[3] {
        "-" => None,
        name => Some(Square::from_name(name).ok_or_else(|| {
            ChessError::InvalidFen(format!("bad en-passant square '{}'", name))
        })?),
    };

    if let Some(clock) = fields.get(4) {
        clock.parse::<u32>().map_err(|_| {
            ChessError::InvalidFen(format!("bad halfmove clock '{}'", clock))
        })?;
    }

    let fullmove = match fields.get(5) {
        Some(raw) => {
            let n: u32 = raw.parse().map_err(|_| {
                ChessError::InvalidFen(format!("bad fullmove number '{}'", raw))
            })?;
            if n == 0 {
                return Err(ChessError::InvalidFen(
                    "fullmove number starts at 1".to_string(),
                ));
            }
            n
        }
        None => 1,
    };

    let mut board = Board::empty();
    board.side_to_move = side_to_move;
    board.en_passant = en_passant;
    board.ply = (fullmove - 1) * 2 + u32::from(side_to_move == Color::Black);
    place_pieces(&mut board, fields[0], rights)?;

    for color in [Color::White, Color::Black] {
        let kings = Square::all()
            .filter(|&sq| {
                matches!(
                    board.piece_at(sq),
                    Some(p) if p.color == color && p.kind == PieceKind::King
                )
            })
            .count();
        match kings {
            0 => return Err(ChessError::MissingKing(color)),
            1 => {}
            n => {
                return Err(ChessError::InvalidFen(format!(
                    "{} {} kings on the board",
                    n, color
                )))
            }
        }
    }

    Ok(board)
}

pub fn board_to_fen(board: &Board) -> String {
    let mut fen = String::new();
    for rank in (0..8).rev() {
        let mut empty = 0;
        for file in 0..8 {
            let piece = Square::new(rank, file).and_then(|sq| board.piece_at(sq));
            match piece {
                Some(p) => {
                    if empty > 0 {
                        fen.push(char::from_digit(empty, 10).unwrap_or('0'));
                        empty = 0;
                    }
                    fen.push(piece_char(p));
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            fen.push(char::from_digit(empty, 10).unwrap_or('0'));
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push_str(match board.side_to_move {
        Color::White => "w",
        Color::Black => "b",
    });

    fen.push(' ');
    let mut rights = String::new();
    if castle_available(board, Color::White, true) {
        rights.push('K');
    }
    if castle_available(board, Color::White, false) {
        rights.push('Q');
    }
    if castle_available(board, Color::Black, true) {
        rights.push('k');
    }
    if castle_available(board, Color::Black, false) {
        rights.push('q');
    }
    if rights.is_empty() {
        rights.push('-');
    }
    fen.push_str(&rights);

    fen.push(' ');
    match board.en_passant {
        Some(sq) => fen.push_str(&sq.name()),
        None => fen.push('-'),
    }

    // The halfmove clock is not tracked, so it restarts at zero.
    fen.push_str(" 0 ");
    fen.push_str(&(board.ply / 2 + 1).to_string());
    fen
}

#[derive(Clone, Copy, Default)]
struct CastlingRights {
    white_king: bool,
    white_queen: bool,
    black_king: bool,
    black_queen: bool,
}

fn parse_castling(field: &str) -> ChessResult<CastlingRights> {
    let mut rights = CastlingRights::default();
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        match c {
            'K' => rights.white_king = true,
            'Q' => rights.white_queen = true,
            'k' => rights.black_king = true,
            'q' => rights.black_queen = true,
            other => {
                return Err(ChessError::InvalidFen(format!(
                    "bad castling flag '{}'",
                    other
                )))
            }
        }
    }
    Ok(rights)
}

fn place_pieces(board: &mut Board, placement: &str, rights: CastlingRights) -> ChessResult<()> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::InvalidFen(format!(
            "expected 8 ranks, got {}",
            ranks.len()
        )));
    }
    for (row, chunk) in ranks.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file: u8 = 0;
        for c in chunk.chars() {
            if let Some(skip) = c.to_digit(10) {
                if skip < 1 || skip > 8 {
                    return Err(ChessError::InvalidFen(format!(
                        "bad empty-run digit '{}'",
                        c
                    )));
                }
                file += skip as u8;
                continue;
            }
            let kind = kind_from_char(c).ok_or_else(|| {
                ChessError::InvalidFen(format!("unknown piece letter '{}'", c))
            })?;
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let sq = Square::new(rank, file).ok_or_else(|| {
                ChessError::InvalidFen(format!("rank {} overflows past file h", rank + 1))
            })?;
            let mut piece = Piece::new(color, kind);
            piece.has_moved = infer_has_moved(color, kind, sq, rights);
            board.place(sq, piece);
            file += 1;
        }
        if file != 8 {
            return Err(ChessError::InvalidFen(format!(
                "rank {} covers {} files",
                rank + 1,
                file
            )));
        }
    }
    Ok(())
}

/// Reconstructs the `has_moved` flags the castling-rights field implies.
/// Pawns off their start rank must have moved; a king or rook still on its
/// home square counts as unmoved only while a matching right survives.
fn infer_has_moved(color: Color, kind: PieceKind, sq: Square, rights: CastlingRights) -> bool {
    let back = color.back_rank();
    match kind {
        PieceKind::Pawn => {
            let start = match color {
                Color::White => 1,
                Color::Black => 6,
            };
            sq.rank() != start
        }
        PieceKind::King => {
            let any_right = match color {
                Color::White => rights.white_king || rights.white_queen,
                Color::Black => rights.black_king || rights.black_queen,
            };
            !(sq.rank() == back && sq.file() == 4 && any_right)
        }
        PieceKind::Rook => {
            let unmoved = sq.rank() == back
                && match (color, sq.file()) {
                    (Color::White, 7) => rights.white_king,
                    (Color::White, 0) => rights.white_queen,
                    (Color::Black, 7) => rights.black_king,
                    (Color::Black, 0) => rights.black_queen,
                    _ => false,
                };
            !unmoved
        }
        _ => false,
    }
}

/// A right is still worth printing while the king and the relevant rook both
/// sit unmoved on their home squares.
fn castle_available(board: &Board, color: Color, kingside: bool) -> bool {
    let back = color.back_rank();
    let king_home = match Square::new(back, 4).and_then(|sq| board.piece_at(sq)) {
        Some(p) => p.color == color && p.kind == PieceKind::King && !p.has_moved,
        None => false,
    };
    if !king_home {
        return false;
    }
    let rook_file = if kingside { 7 } else { 0 };
    match Square::new(back, rook_file).and_then(|sq| board.piece_at(sq)) {
        Some(p) => p.color == color && p.kind == PieceKind::Rook && !p.has_moved,
        None => false,
    }
}

fn piece_char(piece: Piece) -> char {
    let c = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match piece.color {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}

fn kind_from_char(c: char) -> Option<PieceKind> {
    match c.to_ascii_lowercase() {
        'p' => Some(PieceKind::Pawn),
        'n' => Some(PieceKind::Knight),
        'b' => Some(PieceKind::Bishop),
        'r' => Some(PieceKind::Rook),
        'q' => Some(PieceKind::Queen),
        'k' => Some(PieceKind::King),
        _ => None,
    }
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
