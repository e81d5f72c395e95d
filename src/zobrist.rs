// Copyright 2023 The Talos Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Zobrist keys for positions: a 64-bit hash formed by XORing per-feature
//! random constants for piece placement, side to move, castling rights, and
//! the en-passant file. The key is stable under incremental update, which is
//! how `Position` maintains it across tile writes.
use crate::types::{Color, Piece, Square};

struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    pub const fn new(seed: u64) -> Xorshift64 {
        Xorshift64 { state: seed }
    }

    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        self.state
    }
}

const SIDE_TO_MOVE_INDEX: usize = 768;
const CASTLING_RIGHTS_INDEX: usize = 769;
const EN_PASSANT_INDEX: usize = 773;

struct FeatureKeys {
    keys: [u64; 781],
}

impl FeatureKeys {
    pub fn new(seed: u64) -> FeatureKeys {
        let mut rng = Xorshift64::new(seed);
        let mut keys = [0; 781];
        for entry in keys.iter_mut() {
            *entry = rng.next();
        }

        FeatureKeys { keys }
    }

    // The table is laid out one square after another: twelve keys per
    // square (six white piece kinds, then six black), followed by the side
    // to move key, four castling right keys, and eight en-passant files.
    pub fn piece(&self, square: Square, piece: Piece) -> u64 {
        let offset = 12 * square.index();
        let color_offset = if piece.color == Color::White { 0 } else { 6 };
        self.keys[offset + color_offset + piece.kind.as_index()]
    }

    pub fn side_to_move(&self, side: Color) -> u64 {
        match side {
            Color::White => 0,
            Color::Black => self.keys[SIDE_TO_MOVE_INDEX],
        }
    }

    pub fn castle(&self, offset: usize) -> u64 {
        self.keys[CASTLING_RIGHTS_INDEX + offset]
    }

    pub fn en_passant(&self, file: u8) -> u64 {
        self.keys[EN_PASSANT_INDEX + file as usize]
    }
}

const ZOBRIST_SEED: u64 = 0x9b4e_0c52_77ad_f0b3;

lazy_static! {
    static ref FEATURE_KEYS: FeatureKeys = FeatureKeys::new(ZOBRIST_SEED);
}

pub fn piece(square: Square, piece: Piece) -> u64 {
    FEATURE_KEYS.piece(square, piece)
}

pub fn side_to_move(side: Color) -> u64 {
    FEATURE_KEYS.side_to_move(side)
}

pub fn kingside_castle(color: Color) -> u64 {
    let offset = if color == Color::White { 0 } else { 2 };
    FEATURE_KEYS.castle(offset)
}

pub fn queenside_castle(color: Color) -> u64 {
    let offset = if color == Color::White { 1 } else { 3 };
    FEATURE_KEYS.castle(offset)
}

pub fn en_passant(file: u8) -> u64 {
    debug_assert!(file < 8);
    FEATURE_KEYS.en_passant(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn feature_keys_are_distinct() {
        // Not a proof of quality, just a guard against a broken generator
        // producing zeroes or repeats in the obvious places.
        let a = piece(
            Square::new(0, 0),
            Piece::new(PieceKind::Pawn, Color::White),
        );
        let b = piece(
            Square::new(0, 0),
            Piece::new(PieceKind::Pawn, Color::Black),
        );
        let c = piece(
            Square::new(1, 0),
            Piece::new(PieceKind::Pawn, Color::White),
        );
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        assert_ne!(0, a);
        assert_ne!(0, side_to_move(Color::Black));
        assert_eq!(0, side_to_move(Color::White));
    }

    #[test]
    fn castle_keys_differ_per_side() {
        assert_ne!(kingside_castle(Color::White), kingside_castle(Color::Black));
        assert_ne!(kingside_castle(Color::White), queenside_castle(Color::White));
    }
}
