//! Board state and the legality engine.
//!
//! The board owns an 8x8 grid of optional pieces plus the bookkeeping that
//! piece rules alone cannot see: side to move, the en-passant square left by
//! the previous move, a ply counter and a running material differential.
//! Full legality is pseudo-legal generation plus the two special moves,
//! filtered by simulating each candidate and rejecting any that leaves the
//! mover's own king in check.

use log::warn;

use crate::error::ChessError;
use crate::rules;
use crate::types::{Color, Move, Piece, PieceKind, Square};

#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    grid: [Option<Piece>; 64],
    pub side_to_move: Color,
    /// Plies played since the start of the game.
    pub ply: u32,
    /// Square passed over by the immediately preceding double step, if any.
    /// Cleared by every move that is not a fresh double step, which is what
    /// restricts en passant to the one reply where it is legal.
    pub en_passant: Option<Square>,
    material: i32,
}

/// Everything needed to revert one `make_move`.
#[derive(Clone, Debug)]
struct Undo {
    moved: Piece,
    captured: Option<Piece>,
    captured_sq: Square,
    rook_move: Option<(Square, Square, Piece)>,
    en_passant: Option<Square>,
    material: i32,
}

impl Board {
    /// Standard 32-piece starting layout, White to move.
    pub fn new() -> Board {
        let mut board = Board::empty();
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in back.iter().enumerate() {
            let file = file as u8;
            if let Some(sq) = Square::new(0, file) {
                board.place(sq, Piece::new(Color::White, kind));
            }
            if let Some(sq) = Square::new(7, file) {
                board.place(sq, Piece::new(Color::Black, kind));
            }
        }
        for file in 0..8 {
            if let Some(sq) = Square::new(1, file) {
                board.place(sq, Piece::new(Color::White, PieceKind::Pawn));
            }
            if let Some(sq) = Square::new(6, file) {
                board.place(sq, Piece::new(Color::Black, PieceKind::Pawn));
            }
        }
        board
    }

    pub(crate) fn empty() -> Board {
        Board {
            grid: [None; 64],
            side_to_move: Color::White,
            ply: 0,
            en_passant: None,
            material: 0,
        }
    }

    /// Puts a piece on an empty or occupied cell, keeping the material
    /// differential in step. Used for position setup, not for play.
    pub(crate) fn place(&mut self, sq: Square, piece: Piece) {
        if let Some(old) = self.grid[sq.index()] {
            self.material -= signed_weight(old);
        }
        self.grid[sq.index()] = Some(piece);
        self.material += signed_weight(piece);
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.index()]
    }

    /// White material minus Black material, in centipawns.
    pub fn material(&self) -> i32 {
        self.material
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| {
            matches!(
                self.piece_at(sq),
                Some(p) if p.color == color && p.kind == PieceKind::King
            )
        })
    }

    pub fn in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => self.is_square_attacked(king, color.other()),
            None => {
                // Unreachable through apply_move; only corrupted setups lack
                // a king. Refuse the query rather than crash.
                warn!("no {} king found, treating position as not in check", color);
                false
            }
        }
    }

    /// True when any `by`-coloured piece attacks `target`. Pawn attack
    /// geometry counts whether or not the target cell is occupied, which is
    /// what castling transit checks need.
    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        // Pawns attack diagonally forward, so look one rank back from the
        // target along both diagonals.
        let dir = by.forward();
        for df in [-1, 1] {
            if let Some(sq) = target.offset(-dir, df) {
                match self.piece_at(sq) {
                    Some(p) if p.color == by && p.kind == PieceKind::Pawn => return true,
                    _ => {}
                }
            }
        }

        for &(dr, df) in &rules::KNIGHT_JUMPS {
            if let Some(sq) = target.offset(dr, df) {
                match self.piece_at(sq) {
                    Some(p) if p.color == by && p.kind == PieceKind::Knight => return true,
                    _ => {}
                }
            }
        }

        for &(dr, df) in &rules::KING_STEPS {
            if let Some(sq) = target.offset(dr, df) {
                match self.piece_at(sq) {
                    Some(p) if p.color == by && p.kind == PieceKind::King => return true,
                    _ => {}
                }
            }
        }

        // Sliding attacks stop at the first occupied cell in each ray.
        for &(dr, df) in &rules::DIAGONALS {
            if self.ray_attacked(target, dr, df, by, PieceKind::Bishop) {
                return true;
            }
        }
        for &(dr, df) in &rules::ORTHOGONALS {
            if self.ray_attacked(target, dr, df, by, PieceKind::Rook) {
                return true;
            }
        }

        false
    }

    fn ray_attacked(&self, target: Square, dr: i8, df: i8, by: Color, slider: PieceKind) -> bool {
        let mut cur = target.offset(dr, df);
        while let Some(sq) = cur {
            if let Some(piece) = self.piece_at(sq) {
                return piece.color == by
                    && (piece.kind == slider || piece.kind == PieceKind::Queen);
            }
            cur = sq.offset(dr, df);
        }
        false
    }

    /// Full-legal destinations for the piece on `from`: pseudo-legal moves
    /// plus en passant and castling where their preconditions hold, minus
    /// everything that would leave the mover's own king in check.
    ///
    /// Errors when `from` is empty.
    pub fn legal_destinations(&self, from: Square) -> Result<Vec<Square>, ChessError> {
        let piece = self.piece_at(from).ok_or(ChessError::EmptySquare(from))?;
        let mut dests = self.candidate_destinations(from, piece)?;
        let mut scratch = self.clone();
        dests.retain(|&to| scratch.escapes_check(from, to, piece.color));
        Ok(dests)
    }

    /// All full-legal moves for the side to move, in square-scan order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut scratch = self.clone();
        let mut out = Vec::with_capacity(64);
        for from in Square::all() {
            let piece = match self.piece_at(from) {
                Some(p) if p.color == self.side_to_move => p,
                _ => continue,
            };
            let dests = match self.candidate_destinations(from, piece) {
                Ok(d) => d,
                Err(_) => continue,
            };
            for to in dests {
                if scratch.escapes_check(from, to, piece.color) {
                    out.push(Move::new(from, to));
                }
            }
        }
        out
    }

    /// Validated mutation: false (and no state change) when `from` is empty,
    /// the piece is not the side to move's, or `to` is not full-legal.
    pub fn apply_move(&mut self, from: Square, to: Square) -> bool {
        let piece = match self.piece_at(from) {
            Some(p) => p,
            None => return false,
        };
        if piece.color != self.side_to_move {
            return false;
        }
        let legal = match self.legal_destinations(from) {
            Ok(d) => d,
            Err(_) => return false,
        };
        if !legal.contains(&to) {
            return false;
        }
        self.make_move(from, to).is_some()
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.in_check(color) && !self.has_any_legal_move(color)
    }

    /// No legal moves while not in check. Distinct from checkmate and a draw
    /// rather than a loss.
    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.in_check(color) && !self.has_any_legal_move(color)
    }

    /// The game is over: one side is checkmated, or the side to move has no
    /// legal move at all.
    pub fn is_terminal(&self) -> bool {
        let stm = self.side_to_move;
        self.is_checkmate(stm) || self.is_checkmate(stm.other()) || self.is_stalemate(stm)
    }

    fn has_any_legal_move(&self, color: Color) -> bool {
        let mut scratch = self.clone();
        for from in Square::all() {
            let piece = match self.piece_at(from) {
                Some(p) if p.color == color => p,
                _ => continue,
            };
            let dests = match self.candidate_destinations(from, piece) {
                Ok(d) => d,
                Err(_) => continue,
            };
            if dests
                .iter()
                .any(|&to| scratch.escapes_check(from, to, color))
            {
                return true;
            }
        }
        false
    }

    /// Pseudo-legal destinations plus the board-level specials, before the
    /// king-safety filter.
    fn candidate_destinations(
        &self,
        from: Square,
        piece: Piece,
    ) -> Result<Vec<Square>, ChessError> {
        let mut dests = rules::pseudo_legal_destinations(self, from)?;
        if piece.kind == PieceKind::Pawn {
            if let Some(ep) = self.en_passant_target(from, piece) {
                dests.push(ep);
            }
        }
        if piece.kind == PieceKind::King {
            self.castle_targets(from, piece, &mut dests);
        }
        Ok(dests)
    }

    /// The en-passant destination for this pawn, if the previous move was an
    /// adjacent enemy double step.
    fn en_passant_target(&self, from: Square, pawn: Piece) -> Option<Square> {
        let ep = self.en_passant?;
        let dir = pawn.color.forward();
        if ep.rank() as i8 != from.rank() as i8 + dir {
            return None;
        }
        if ep.file().abs_diff(from.file()) != 1 {
            return None;
        }
        // The captured pawn sits behind the target square.
        let victim = ep.offset(-dir, 0)?;
        match self.piece_at(victim) {
            Some(p) if p.color != pawn.color && p.kind == PieceKind::Pawn => Some(ep),
            _ => None,
        }
    }

    /// Castling destinations for the king on `from`. Requires an unmoved
    /// king on its home square and an unmoved rook, empty cells between
    /// them, the king not currently in check, and the transit and landing
    /// squares free of enemy attack.
    fn castle_targets(&self, from: Square, king: Piece, out: &mut Vec<Square>) {
        if king.has_moved {
            return;
        }
        let back = king.color.back_rank();
        if from.rank() != back || from.file() != 4 {
            return;
        }
        if self.in_check(king.color) {
            return;
        }
        let enemy = king.color.other();

        // King side: f and g empty, neither attacked, rook on h unmoved.
        if self.castle_rook_ready(back, 7, king.color)
            && self.files_empty(back, &[5, 6])
            && !self.any_file_attacked(back, &[5, 6], enemy)
        {
            if let Some(to) = from.offset(0, 2) {
                out.push(to);
            }
        }

        // Queen side: b, c and d empty, c and d not attacked, rook on a
        // unmoved. The b square may be attacked since the king never
        // crosses it.
        if self.castle_rook_ready(back, 0, king.color)
            && self.files_empty(back, &[1, 2, 3])
            && !self.any_file_attacked(back, &[2, 3], enemy)
        {
            if let Some(to) = from.offset(0, -2) {
                out.push(to);
            }
        }
    }

    fn castle_rook_ready(&self, rank: u8, file: u8, color: Color) -> bool {
        matches!(
            Square::new(rank, file).and_then(|sq| self.piece_at(sq)),
            Some(p) if p.color == color && p.kind == PieceKind::Rook && !p.has_moved
        )
    }

    fn files_empty(&self, rank: u8, files: &[u8]) -> bool {
        files.iter().all(|&file| {
            matches!(
                Square::new(rank, file).map(|sq| self.piece_at(sq)),
                Some(None)
            )
        })
    }

    fn any_file_attacked(&self, rank: u8, files: &[u8], by: Color) -> bool {
        files.iter().any(|&file| {
            Square::new(rank, file).is_some_and(|sq| self.is_square_attacked(sq, by))
        })
    }

    /// Plays `from -> to` on the mutable board and reports whether the
    /// mover's king is safe afterwards, reverting in either case.
    fn escapes_check(&mut self, from: Square, to: Square, mover: Color) -> bool {
        match self.make_move(from, to) {
            Some(undo) => {
                let safe = !self.in_check(mover);
                self.unmake_move(from, to, undo);
                safe
            }
            None => false,
        }
    }

    /// Unvalidated move mechanics. Callers guarantee `from -> to` came out
    /// of `candidate_destinations`; the specials are recognised from their
    /// geometry: a king stepping two files castles, a pawn moving diagonally
    /// onto an empty square captures en passant, a pawn reaching the far
    /// rank promotes to a queen.
    fn make_move(&mut self, from: Square, to: Square) -> Option<Undo> {
        let piece = self.piece_at(from)?;
        let prev_ep = self.en_passant;
        let prev_material = self.material;

        let mut captured = self.piece_at(to);
        let mut captured_sq = to;
        if piece.kind == PieceKind::Pawn && from.file() != to.file() && captured.is_none() {
            let dir = piece.color.forward();
            if let Some(behind) = to.offset(-dir, 0) {
                captured = self.piece_at(behind);
                captured_sq = behind;
                self.set(behind, None);
            }
        }

        let mut rook_move = None;
        if piece.kind == PieceKind::King && from.file().abs_diff(to.file()) == 2 {
            let (rook_from_file, rook_to_file) = if to.file() > from.file() {
                (7, 5)
            } else {
                (0, 3)
            };
            let squares = (
                Square::new(from.rank(), rook_from_file),
                Square::new(from.rank(), rook_to_file),
            );
            if let (Some(rook_from), Some(rook_to)) = squares {
                if let Some(rook) = self.piece_at(rook_from) {
                    self.set(rook_from, None);
                    self.set(
                        rook_to,
                        Some(Piece {
                            has_moved: true,
                            ..rook
                        }),
                    );
                    rook_move = Some((rook_from, rook_to, rook));
                }
            }
        }

        let mut placed = Piece {
            has_moved: true,
            ..piece
        };
        let far_rank = piece.color.other().back_rank();
        if piece.kind == PieceKind::Pawn && to.rank() == far_rank {
            placed.kind = PieceKind::Queen;
        }
        self.set(from, None);
        self.set(to, Some(placed));

        if let Some(victim) = captured {
            self.material -= signed_weight(victim);
        }
        if placed.kind != piece.kind {
            self.material += signed_weight(placed) - signed_weight(piece);
        }

        self.en_passant = None;
        if piece.kind == PieceKind::Pawn && from.rank().abs_diff(to.rank()) == 2 {
            self.en_passant = from.offset(piece.color.forward(), 0);
        }

        self.ply += 1;
        self.side_to_move = self.side_to_move.other();

        Some(Undo {
            moved: piece,
            captured,
            captured_sq,
            rook_move,
            en_passant: prev_ep,
            material: prev_material,
        })
    }

    fn unmake_move(&mut self, from: Square, to: Square, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.ply -= 1;
        if let Some((rook_from, rook_to, rook)) = undo.rook_move {
            self.set(rook_to, None);
            self.set(rook_from, Some(rook));
        }
        self.set(to, None);
        self.set(from, Some(undo.moved));
        self.set(undo.captured_sq, undo.captured);
        self.en_passant = undo.en_passant;
        self.material = undo.material;
    }

    /// Raw cell write. Material is the caller's responsibility, which is why
    /// this stays private to the move mechanics.
    fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.grid[sq.index()] = piece;
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

fn signed_weight(piece: Piece) -> i32 {
    match piece.color {
        Color::White => piece.weight(),
        Color::Black => -piece.weight(),
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
