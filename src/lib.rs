// Copyright 2023 The Talos Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! ## The Talos Chess Engine
//!
//! This crate implements the rules of chess and several engines that play
//! it over the UCI protocol. The core provides:
//!
//!   * Representation of chess positions, including parsing and emitting
//!     FEN notation
//!   * Legal move generation with threat maps
//!   * Application of moves to chess positions
//!   * Two static evaluators, material-only and piece-square based
//!   * A reference iterative-deepening alpha-beta search with quiescence
//!
//! The shipped engines (random, greedy, min-max, alpha-beta, Monte-Carlo
//! tree search) are thin clients of that core behind one trait, driven by
//! the UCI server.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

mod bitboard;
mod movegen;
mod moves;
mod perft;
mod position;
mod tree;
mod types;
mod zobrist;

pub mod engines;
pub mod eval;
pub mod logger;
pub mod search;
pub mod uci;

pub use bitboard::{Bitboard, BitboardIterator};
pub use moves::{Move, MoveParseError};
pub use perft::perft;
pub use position::{FenParseError, Position, START_FEN};
pub use tree::PositionTree;
pub use types::{CastleStatus, Color, Piece, PieceKind, Square, Tile};
