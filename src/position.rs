// Copyright 2023 The Talos Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `Position` type: complete game state for one chess position.
//!
//! A position stores piece placement as bitboards: one board each for
//! White, Black, and Empty squares, whose disjoint union covers the board,
//! plus one per piece kind. Alongside sit the side to move, castling
//! rights, and the en-passant file. Derived data (the legal move list, the
//! mover's threat map, the opponent's threat map) is computed lazily on
//! first query and memoized until the next mutation.
//!
//! Positions are created by parsing FEN or by cloning an existing position
//! and applying a move. Cloning is cheap; the search clones one position per
//! edge it explores.
use std::cell::OnceCell;
use std::convert::TryFrom;
use std::error;
use std::fmt::{self, Write};

use crate::bitboard::Bitboard;
use crate::movegen;
use crate::moves::Move;
use crate::types::{CastleStatus, Color, Piece, PieceKind, Square, Tile};
use crate::zobrist;

/// FEN of the standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Possible errors that can arise when parsing a FEN string into a
/// `Position`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    UnexpectedEnd,
    UnknownPiece(char),
    InvalidDigit(char),
    RankDoesNotSumToEight,
    InvalidSideToMove,
    InvalidCastle(char),
    InvalidEnPassant,
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenParseError::UnexpectedEnd => write!(f, "FEN string ended unexpectedly"),
            FenParseError::UnknownPiece(c) => write!(f, "unknown piece character: {}", c),
            FenParseError::InvalidDigit(c) => write!(f, "invalid digit in piece placement: {}", c),
            FenParseError::RankDoesNotSumToEight => {
                write!(f, "rank does not describe exactly eight squares")
            }
            FenParseError::InvalidSideToMove => write!(f, "side to move must be 'w' or 'b'"),
            FenParseError::InvalidCastle(c) => write!(f, "invalid castling character: {}", c),
            FenParseError::InvalidEnPassant => write!(f, "invalid en-passant target"),
        }
    }
}

impl error::Error for FenParseError {}

// Index of the board holding empty squares in the `colors` array, after the
// two player boards.
const EMPTY_BOARD: usize = 2;

#[derive(Clone, Debug)]
pub struct Position {
    colors: [Bitboard; 3],
    pieces: [Bitboard; 6],
    turn: Color,
    castle: CastleStatus,
    ep_file: Option<u8>,
    placement_key: u64,

    // Memoized derivations, invalidated by every mutation. These do not
    // participate in equality.
    movelist: OnceCell<Vec<Move>>,
    threat: OnceCell<Bitboard>,
    enemy_threat: OnceCell<Bitboard>,
}

//
// Board state getters
//

impl Position {
    pub fn new() -> Position {
        let mut colors = [Bitboard::none(); 3];
        colors[EMPTY_BOARD] = Bitboard::all();
        Position {
            colors,
            pieces: [Bitboard::none(); 6],
            turn: Color::White,
            castle: CastleStatus::NONE,
            ep_file: None,
            placement_key: 0,
            movelist: OnceCell::new(),
            threat: OnceCell::new(),
            enemy_threat: OnceCell::new(),
        }
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        match color {
            Color::White => self.castle.contains(CastleStatus::WHITE_KINGSIDE),
            Color::Black => self.castle.contains(CastleStatus::BLACK_KINGSIDE),
        }
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        match color {
            Color::White => self.castle.contains(CastleStatus::WHITE_QUEENSIDE),
            Color::Black => self.castle.contains(CastleStatus::BLACK_QUEENSIDE),
        }
    }

    /// File of the pawn that just advanced two squares, if any.
    pub fn ep_file(&self) -> Option<u8> {
        self.ep_file
    }

    /// All squares occupied by the given color.
    pub fn occupied(&self, color: Color) -> Bitboard {
        self.colors[color.as_index()]
    }

    /// All squares occupied by no piece.
    pub fn empty_squares(&self) -> Bitboard {
        self.colors[EMPTY_BOARD]
    }

    /// The squares holding pieces of the given color and kind.
    pub fn bitboard(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.colors[color.as_index()] & self.pieces[kind.as_index()]
    }

    pub fn color_at(&self, square: Square) -> Option<Color> {
        if self.colors[Color::White.as_index()].test(square) {
            Some(Color::White)
        } else if self.colors[Color::Black.as_index()].test(square) {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let color = self.color_at(square)?;
        for &kind in &crate::types::PIECE_KINDS {
            if self.pieces[kind.as_index()].test(square) {
                return Some(Piece::new(kind, color));
            }
        }

        // If we get here, we failed to update a bitboard somewhere.
        unreachable!()
    }

    /// Looks up the tile at an arbitrary coordinate. Coordinates outside the
    /// board yield `Tile::OffBoard`; the move generator relies on this to
    /// terminate ray walks and discard off-board jump targets without
    /// explicit bounds checks.
    pub fn tile(&self, x: i16, y: i16) -> Tile {
        if x < 0 || x > 7 || y < 0 || y > 7 {
            return Tile::OffBoard;
        }

        let square = Square::new(x as u8, y as u8);
        match self.piece_at(square) {
            Some(piece) => Tile::Occupied(piece),
            None => Tile::Empty,
        }
    }

    /// The position key: a zobrist hash over piece placement, side to move,
    /// castling rights, and the en-passant file. The placement component is
    /// maintained incrementally by `set_tile`.
    pub fn key(&self) -> u64 {
        let mut key = self.placement_key ^ zobrist::side_to_move(self.turn);
        if self.can_castle_kingside(Color::White) {
            key ^= zobrist::kingside_castle(Color::White);
        }
        if self.can_castle_queenside(Color::White) {
            key ^= zobrist::queenside_castle(Color::White);
        }
        if self.can_castle_kingside(Color::Black) {
            key ^= zobrist::kingside_castle(Color::Black);
        }
        if self.can_castle_queenside(Color::Black) {
            key ^= zobrist::queenside_castle(Color::Black);
        }
        if let Some(file) = self.ep_file {
            key ^= zobrist::en_passant(file);
        }
        key
    }
}

//
// Mutation and move application
//

impl Position {
    /// Places `piece` on `square`, or empties the square when `piece` is
    /// `None`. Invalidates all memoized derivations. Passing an out-of-range
    /// coordinate to `Square::new` is a programmer bug and asserts in debug
    /// builds.
    pub fn set_tile(&mut self, square: Square, piece: Option<Piece>) {
        if let Some(old) = self.piece_at(square) {
            self.colors[old.color.as_index()].unset(square);
            self.pieces[old.kind.as_index()].unset(square);
            self.placement_key ^= zobrist::piece(square, old);
        }
        self.colors[EMPTY_BOARD].unset(square);

        match piece {
            Some(new) => {
                self.colors[new.color.as_index()].set(square);
                self.pieces[new.kind.as_index()].set(square);
                self.placement_key ^= zobrist::piece(square, new);
            }
            None => self.colors[EMPTY_BOARD].set(square),
        }

        self.invalidate();
    }

    /// Hands the move to the other player, invalidating all memoized
    /// derivations.
    pub fn set_turn(&mut self, color: Color) {
        self.turn = color;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.movelist.take();
        self.threat.take();
        self.enemy_threat.take();
    }

    /// Applies a move to this position in place: relocates the pieces
    /// involved, updates castling rights and the en-passant file, and flips
    /// the side to move.
    ///
    /// Legality is not verified here; callers must only apply moves obtained
    /// from `legal_moves`. Applying anything else leaves the position in an
    /// undefined state.
    pub fn make_move(&mut self, mov: Move) {
        let source = self
            .piece_at(mov.source())
            .expect("make_move: no piece on the source square");
        let fx = mov.source().x() as i16;
        let fy = mov.source().y();
        let tx = mov.destination().x() as i16;
        let ty = mov.destination().y();

        let placed = Piece::new(mov.promotion().unwrap_or(source.kind), source.color);
        self.set_tile(mov.destination(), Some(placed));
        self.set_tile(mov.source(), None);

        // A king move across two files is a castle; bring the rook along.
        if source.kind == PieceKind::King && (tx - fx).abs() >= 2 {
            let rook = Piece::new(PieceKind::Rook, source.color);
            if tx > fx {
                self.set_tile(Square::new(5, fy), Some(rook));
                self.set_tile(Square::new(7, fy), None);
            } else {
                self.set_tile(Square::new(3, fy), Some(rook));
                self.set_tile(Square::new(0, fy), None);
            }
        }

        // A king move forfeits both of the mover's castling rights.
        if source.kind == PieceKind::King {
            self.castle &= !castle_mask(source.color);
        }

        // A rook move off a home corner forfeits the matching right.
        if source.kind == PieceKind::Rook && fy == home_rank(source.color) {
            if fx == 7 {
                self.castle &= !kingside_mask(source.color);
            } else if fx == 0 {
                self.castle &= !queenside_mask(source.color);
            }
        }

        // Any move landing on a home corner clears that corner's right,
        // which covers rook captures without tracking the captured piece.
        match (tx, ty) {
            (7, 0) => self.castle &= !CastleStatus::WHITE_KINGSIDE,
            (0, 0) => self.castle &= !CastleStatus::WHITE_QUEENSIDE,
            (7, 7) => self.castle &= !CastleStatus::BLACK_KINGSIDE,
            (0, 7) => self.castle &= !CastleStatus::BLACK_QUEENSIDE,
            _ => {}
        }

        // En-passant capture: a pawn moving diagonally onto the en-passant
        // file removes the pawn that just double-pushed past it.
        if source.kind == PieceKind::Pawn && fx != tx && Some(tx as u8) == self.ep_file {
            let capture_rank = match source.color {
                Color::White => 5,
                Color::Black => 2,
            };
            if ty == capture_rank {
                self.set_tile(Square::new(tx as u8, fy), None);
            }
        }

        // Only a double pawn push leaves an en-passant file behind.
        self.ep_file = if source.kind == PieceKind::Pawn && (ty as i16 - fy as i16).abs() == 2 {
            Some(fx as u8)
        } else {
            None
        };

        self.set_turn(source.color.toggle());
    }
}

//
// Derived state: legal moves, threat maps, endgame detection
//

impl Position {
    /// The legal moves of the side to move. Computed on first call and
    /// memoized; repeated calls are free until the position is mutated.
    pub fn legal_moves(&self) -> &[Move] {
        self.movelist.get_or_init(|| {
            let generated = movegen::generate(self);
            let _ = self.threat.set(generated.threat);
            generated.moves
        })
    }

    /// The set of squares the side to move attacks or defends.
    pub fn threat(&self) -> Bitboard {
        *self.threat.get_or_init(|| movegen::threat_map(self))
    }

    /// The set of squares the opponent attacks or defends: the threat map of
    /// this position with the side to move flipped.
    pub fn enemy_threat(&self) -> Bitboard {
        *self.enemy_threat.get_or_init(|| {
            let mut flipped = self.clone();
            flipped.set_turn(self.turn.toggle());
            flipped.threat()
        })
    }

    /// Whether the side to move's king stands on a square the opponent
    /// attacks.
    pub fn is_check(&self) -> bool {
        let king = self.bitboard(self.turn, PieceKind::King);
        !(self.enemy_threat() & king).empty()
    }

    /// Whether the side to move has no legal moves and is in check.
    pub fn is_checkmate(&self) -> bool {
        self.legal_moves().is_empty() && self.is_check()
    }

    /// Whether the side to move has no legal moves but is not in check.
    pub fn is_stalemate(&self) -> bool {
        self.legal_moves().is_empty() && !self.is_check()
    }

    /// Whether the given move takes an enemy piece, counting en-passant
    /// captures onto an empty square.
    pub fn is_capture(&self, mov: Move) -> bool {
        match self.piece_at(mov.destination()) {
            Some(piece) => piece.color != self.turn,
            None => {
                let diagonal = mov.source().x() != mov.destination().x();
                diagonal
                    && self
                        .piece_at(mov.source())
                        .map_or(false, |piece| piece.kind == PieceKind::Pawn)
            }
        }
    }
}

//
// FEN parsing and generation
//

impl Position {
    pub fn from_start_position() -> Position {
        Position::from_fen(START_FEN).expect("the starting position FEN is well-formed")
    }

    /// Constructs a new position from a FEN representation.
    ///
    /// Of the six whitespace-separated fields, the first four (placement,
    /// side to move, castling rights, en-passant target) are interpreted;
    /// the halfmove and fullmove clocks are accepted but ignored. Only the
    /// file of the en-passant target is retained.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Position, FenParseError> {
        let mut fields = fen.as_ref().split_whitespace();
        let placement = fields.next().ok_or(FenParseError::UnexpectedEnd)?;
        let side = fields.next().ok_or(FenParseError::UnexpectedEnd)?;
        let castles = fields.next().ok_or(FenParseError::UnexpectedEnd)?;
        let en_passant = fields.next().ok_or(FenParseError::UnexpectedEnd)?;

        let mut pos = Position::new();

        let mut x: u8 = 0;
        let mut y: u8 = 7;
        for c in placement.chars() {
            match c {
                '/' => {
                    if x != 8 || y == 0 {
                        return Err(FenParseError::RankDoesNotSumToEight);
                    }
                    y -= 1;
                    x = 0;
                }
                '1'..='8' => {
                    x += c as u8 - b'0';
                    if x > 8 {
                        return Err(FenParseError::RankDoesNotSumToEight);
                    }
                }
                '0' | '9' => return Err(FenParseError::InvalidDigit(c)),
                _ => {
                    let piece =
                        Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece(c))?;
                    if x > 7 {
                        return Err(FenParseError::RankDoesNotSumToEight);
                    }
                    pos.set_tile(Square::new(x, y), Some(piece));
                    x += 1;
                }
            }
        }
        if x != 8 || y != 0 {
            return Err(FenParseError::RankDoesNotSumToEight);
        }

        pos.turn = match side {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenParseError::InvalidSideToMove),
        };

        if castles != "-" {
            for c in castles.chars() {
                match c {
                    'K' => pos.castle |= CastleStatus::WHITE_KINGSIDE,
                    'Q' => pos.castle |= CastleStatus::WHITE_QUEENSIDE,
                    'k' => pos.castle |= CastleStatus::BLACK_KINGSIDE,
                    'q' => pos.castle |= CastleStatus::BLACK_QUEENSIDE,
                    _ => return Err(FenParseError::InvalidCastle(c)),
                }
            }
        }
        pos.rectify_castle_rights();

        if en_passant != "-" {
            let mut chars = en_passant.chars();
            let file = chars.next().ok_or(FenParseError::InvalidEnPassant)?;
            let rank = chars.next().ok_or(FenParseError::InvalidEnPassant)?;
            if chars.next().is_some()
                || !('a'..='h').contains(&file)
                || !('1'..='8').contains(&rank)
            {
                return Err(FenParseError::InvalidEnPassant);
            }
            pos.ep_file = Some(file as u8 - b'a');
        }

        Ok(pos)
    }

    // Castling rights are only meaningful while the king and the matching
    // rook sit on their home squares; FEN strings claiming otherwise are
    // corrected here.
    fn rectify_castle_rights(&mut self) {
        let white_rook = Some(Piece::new(PieceKind::Rook, Color::White));
        let black_rook = Some(Piece::new(PieceKind::Rook, Color::Black));
        if self.piece_at(Square::new(7, 0)) != white_rook {
            self.castle &= !CastleStatus::WHITE_KINGSIDE;
        }
        if self.piece_at(Square::new(0, 0)) != white_rook {
            self.castle &= !CastleStatus::WHITE_QUEENSIDE;
        }
        if self.piece_at(Square::new(7, 7)) != black_rook {
            self.castle &= !CastleStatus::BLACK_KINGSIDE;
        }
        if self.piece_at(Square::new(0, 7)) != black_rook {
            self.castle &= !CastleStatus::BLACK_QUEENSIDE;
        }
        if self.piece_at(Square::new(4, 0)) != Some(Piece::new(PieceKind::King, Color::White)) {
            self.castle &= !CastleStatus::WHITE;
        }
        if self.piece_at(Square::new(4, 7)) != Some(Piece::new(PieceKind::King, Color::Black)) {
            self.castle &= !CastleStatus::BLACK;
        }
    }

    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for y in (0..8u8).rev() {
            let mut empty_squares = 0;
            for x in 0..8u8 {
                if let Some(piece) = self.piece_at(Square::new(x, y)) {
                    if empty_squares != 0 {
                        write!(&mut buf, "{}", empty_squares).unwrap();
                    }
                    write!(&mut buf, "{}", piece).unwrap();
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                write!(&mut buf, "{}", empty_squares).unwrap();
            }

            if y != 0 {
                buf.push('/');
            }
        }

        write!(&mut buf, " {} ", self.turn).unwrap();
        if self.castle == CastleStatus::NONE {
            buf.push('-');
        } else {
            if self.can_castle_kingside(Color::White) {
                buf.push('K');
            }
            if self.can_castle_queenside(Color::White) {
                buf.push('Q');
            }
            if self.can_castle_kingside(Color::Black) {
                buf.push('k');
            }
            if self.can_castle_queenside(Color::Black) {
                buf.push('q');
            }
        }

        buf.push(' ');
        if let Some(file) = self.ep_file {
            // The target rank is implied by whose pawn just double-pushed.
            let rank = match self.turn {
                Color::White => '6',
                Color::Black => '3',
            };
            buf.push((b'a' + file) as char);
            buf.push(rank);
        } else {
            buf.push('-');
        }

        // The core does not track the halfmove and fullmove clocks.
        buf.push_str(" 0 1");
        buf
    }
}

//
// Trait implementations
//

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in (0..8u8).rev() {
            for x in 0..8u8 {
                if let Some(piece) = self.piece_at(Square::new(x, y)) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", y + 1)?;
        }

        for _ in 0..8 {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for x in 0..8u8 {
            write!(f, " {} ", (b'a' + x) as char)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Position) -> bool {
        self.colors == other.colors
            && self.pieces == other.pieces
            && self.turn == other.turn
            && self.castle == other.castle
            && self.ep_file == other.ep_file
    }
}

impl Eq for Position {}

//
// Helper functions
//

fn home_rank(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}

fn kingside_mask(color: Color) -> CastleStatus {
    match color {
        Color::White => CastleStatus::WHITE_KINGSIDE,
        Color::Black => CastleStatus::BLACK_KINGSIDE,
    }
}

fn queenside_mask(color: Color) -> CastleStatus {
    match color {
        Color::White => CastleStatus::WHITE_QUEENSIDE,
        Color::Black => CastleStatus::BLACK_QUEENSIDE,
    }
}

fn castle_mask(color: Color) -> CastleStatus {
    match color {
        Color::White => CastleStatus::WHITE,
        Color::Black => CastleStatus::BLACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_position_partitions_the_board() {
        let pos = Position::new();
        assert_eq!(64, pos.empty_squares().count());
        assert_eq!(0, pos.occupied(Color::White).count());
        assert_eq!(0, pos.occupied(Color::Black).count());
    }

    #[test]
    fn set_tile_maintains_partition() {
        let mut pos = Position::new();
        let square = Square::new(3, 3);
        pos.set_tile(square, Some(Piece::new(PieceKind::Queen, Color::White)));
        assert_eq!(63, pos.empty_squares().count());
        assert_eq!(1, pos.occupied(Color::White).count());
        assert_eq!(
            Some(Piece::new(PieceKind::Queen, Color::White)),
            pos.piece_at(square)
        );

        // Overwrite with a black piece, then clear.
        pos.set_tile(square, Some(Piece::new(PieceKind::Knight, Color::Black)));
        assert_eq!(0, pos.occupied(Color::White).count());
        assert_eq!(1, pos.occupied(Color::Black).count());

        pos.set_tile(square, None);
        assert_eq!(64, pos.empty_squares().count());
        assert_eq!(None, pos.piece_at(square));
    }

    #[test]
    fn tile_returns_off_board_sentinel() {
        let pos = Position::from_start_position();
        assert!(pos.tile(-1, 0).is_off_board());
        assert!(pos.tile(0, -1).is_off_board());
        assert!(pos.tile(8, 3).is_off_board());
        assert!(pos.tile(3, 8).is_off_board());
        assert!(pos.tile(3, 3).is_empty());
        assert_eq!(
            Tile::Occupied(Piece::new(PieceKind::King, Color::White)),
            pos.tile(4, 0)
        );
    }

    #[test]
    fn placement_key_is_incremental() {
        let mut pos = Position::new();
        let original = pos.key();
        let square = Square::new(2, 2);
        pos.set_tile(square, Some(Piece::new(PieceKind::Rook, Color::Black)));
        assert_ne!(original, pos.key());
        pos.set_tile(square, None);
        assert_eq!(original, pos.key());
    }

    #[test]
    fn key_depends_on_side_castle_and_ep() {
        let base = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let black_to_move = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        let no_castle = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        assert_ne!(base.key(), black_to_move.key());
        assert_ne!(base.key(), no_castle.key());

        let with_ep = Position::from_fen("8/8/8/3pP3/8/8/8/4k2K w - d6 0 1").unwrap();
        let without_ep = Position::from_fen("8/8/8/3pP3/8/8/8/4k2K w - - 0 1").unwrap();
        assert_ne!(with_ep.key(), without_ep.key());
    }

    mod fen {
        use super::super::*;

        #[test]
        fn starting_position() {
            let pos = Position::from_start_position();
            assert_eq!(Color::White, pos.turn());
            assert!(pos.can_castle_kingside(Color::White));
            assert!(pos.can_castle_queenside(Color::White));
            assert!(pos.can_castle_kingside(Color::Black));
            assert!(pos.can_castle_queenside(Color::Black));
            assert_eq!(None, pos.ep_file());
            assert_eq!(16, pos.occupied(Color::White).count());
            assert_eq!(16, pos.occupied(Color::Black).count());
            assert_eq!(32, pos.empty_squares().count());

            assert_eq!(
                Some(Piece::new(PieceKind::Queen, Color::White)),
                pos.piece_at(Square::new(3, 0))
            );
            assert_eq!(
                Some(Piece::new(PieceKind::King, Color::Black)),
                pos.piece_at(Square::new(4, 7))
            );
        }

        #[test]
        fn round_trip() {
            let fens = [
                START_FEN,
                "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
                "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 1",
                "8/P7/8/8/8/8/8/4k2K w - - 0 1",
                "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1",
            ];
            for fen in &fens {
                let pos = Position::from_fen(fen).unwrap();
                assert_eq!(*fen, pos.as_fen(), "fen failed to round trip");
            }
        }

        #[test]
        fn castle_rights_cleared_when_rook_absent() {
            // Both castle flags claimed, but the kingside rook is missing.
            let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w KQ - 0 1").unwrap();
            assert!(!pos.can_castle_kingside(Color::White));
            assert!(pos.can_castle_queenside(Color::White));
        }

        #[test]
        fn castle_rights_cleared_when_king_displaced() {
            let pos = Position::from_fen("4k3/8/8/8/8/8/3K4/R6R w KQ - 0 1").unwrap();
            assert!(!pos.can_castle_kingside(Color::White));
            assert!(!pos.can_castle_queenside(Color::White));
        }

        #[test]
        fn ep_file_retained() {
            let pos =
                Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
                    .unwrap();
            assert_eq!(Some(3), pos.ep_file());
        }

        #[test]
        fn empty() {
            assert_eq!(
                FenParseError::UnexpectedEnd,
                Position::from_fen("").unwrap_err()
            );
        }

        #[test]
        fn unknown_piece() {
            assert_eq!(
                FenParseError::UnknownPiece('z'),
                Position::from_fen("z7/8/8/8/8/8/8/8 w - - 0 1").unwrap_err()
            );
        }

        #[test]
        fn invalid_digit() {
            assert_eq!(
                FenParseError::InvalidDigit('9'),
                Position::from_fen("9/8/8/8/8/8/8/8 w - - 0 1").unwrap_err()
            );
        }

        #[test]
        fn rank_too_wide() {
            assert_eq!(
                FenParseError::RankDoesNotSumToEight,
                Position::from_fen("ppppppppp/8/8/8/8/8/8/8 w - - 0 1").unwrap_err()
            );
        }

        #[test]
        fn rank_too_narrow() {
            assert_eq!(
                FenParseError::RankDoesNotSumToEight,
                Position::from_fen("ppp5/8/8/8/8/8/8 w - - 0 1").unwrap_err()
            );
        }

        #[test]
        fn bad_side_to_move() {
            assert_eq!(
                FenParseError::InvalidSideToMove,
                Position::from_fen("8/8/8/8/8/8/8/8 c - - 0 1").unwrap_err()
            );
        }

        #[test]
        fn bad_castle_status() {
            assert_eq!(
                FenParseError::InvalidCastle('a'),
                Position::from_fen("8/8/8/8/8/8/8/8 w a - 0 1").unwrap_err()
            );
        }

        #[test]
        fn bad_en_passant() {
            assert_eq!(
                FenParseError::InvalidEnPassant,
                Position::from_fen("8/8/8/8/8/8/8/8 w - 88 0 1").unwrap_err()
            );
        }

        #[test]
        fn clocks_accepted_but_ignored() {
            let pos = Position::from_fen("8/8/8/8/8/8/8/K6k w - - 13 37").unwrap();
            assert!(pos.as_fen().ends_with(" 0 1"));
        }

        #[test]
        fn clocks_may_be_absent() {
            assert!(Position::from_fen("8/8/8/8/8/8/8/K6k w - -").is_ok());
        }
    }
}
