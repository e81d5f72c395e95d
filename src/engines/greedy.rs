// Copyright 2023 The Talos Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The greedy engine: one ply of lookahead. Applies every legal move and
//! keeps the one whose resulting position evaluates best for the mover,
//! shuffling first so equal candidates are picked at random.
use rand::prelude::*;

use crate::engines::{Clocks, Engine};
use crate::eval::adv_eval;
use crate::moves::Move;
use crate::position::Position;
use crate::types::Color;

pub struct GreedyEngine {
    rng: StdRng,
}

impl GreedyEngine {
    pub fn new() -> GreedyEngine {
        GreedyEngine {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for GreedyEngine {
    fn default() -> GreedyEngine {
        GreedyEngine::new()
    }
}

impl Engine for GreedyEngine {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn choose_move(&mut self, pos: &Position, _clocks: &Clocks) -> Option<Move> {
        let sign = match pos.turn() {
            Color::White => 1.0,
            Color::Black => -1.0,
        };

        let mut moves: Vec<Move> = pos.legal_moves().to_vec();
        moves.shuffle(&mut self.rng);

        let mut best: Option<Move> = None;
        let mut best_value = f64::NEG_INFINITY;
        for &mov in &moves {
            let mut child = pos.clone();
            child.make_move(mov);
            let value = adv_eval(&child) * sign;
            if value >= best_value {
                best_value = value;
                best = Some(mov);
            }
        }

        debug!("greedy settled on {:?} valued {:.2}", best, best_value);
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::Clocks;
    use crate::position::Position;

    #[test]
    fn takes_the_hanging_queen() {
        let pos = Position::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
        let mut engine = GreedyEngine::new();
        let mov = engine.choose_move(&pos, &Clocks::default()).unwrap();
        assert_eq!("d1d5".parse::<crate::moves::Move>().unwrap(), mov);
    }
}
