// Copyright 2023 The Talos Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The shipped move-selection strategies. Every engine is a thin client of
//! the position core: it composes `legal_moves`, `make_move`, and an
//! evaluator behind the common `Engine` trait, and the UCI layer drives
//! whichever one was selected at startup.
mod alphabeta;
mod greedy;
mod mcts;
mod minmax;
mod random;

pub use alphabeta::AlphaBetaEngine;
pub use greedy::GreedyEngine;
pub use mcts::MctsEngine;
pub use minmax::MinMaxEngine;
pub use random::RandomEngine;

use crate::moves::Move;
use crate::position::Position;
use crate::types::Color;

/// Clock state forwarded from the UCI `go` command, in milliseconds.
#[derive(Copy, Clone, Debug, Default)]
pub struct Clocks {
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movetime: Option<u64>,
}

impl Clocks {
    /// The remaining clock and increment of the given side.
    pub fn for_side(&self, color: Color) -> (Option<u64>, Option<u64>) {
        match color {
            Color::White => (self.wtime, self.winc),
            Color::Black => (self.btime, self.binc),
        }
    }
}

/// A move-selection strategy. Returns `None` only when the position has no
/// legal moves.
pub trait Engine {
    fn name(&self) -> &'static str;

    fn choose_move(&mut self, pos: &Position, clocks: &Clocks) -> Option<Move>;
}

/// Looks up an engine by the name used on the command line.
pub fn by_name(name: &str) -> Option<Box<dyn Engine>> {
    match name {
        "random" => Some(Box::new(RandomEngine::new())),
        "greedy" => Some(Box::new(GreedyEngine::new())),
        "minmax" => Some(Box::new(MinMaxEngine::new())),
        "alphabeta" => Some(Box::new(AlphaBetaEngine::new())),
        "mcts" => Some(Box::new(MctsEngine::new())),
        _ => None,
    }
}

pub static ENGINE_NAMES: [&str; 5] = ["random", "greedy", "minmax", "alphabeta", "mcts"];
