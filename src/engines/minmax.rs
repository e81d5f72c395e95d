// Copyright 2023 The Talos Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The min-max engine: two plies of lookahead over material. For each of
//! the mover's candidates the opponent is assumed to pick their strongest
//! reply, and the candidate with the best worst case wins.
use rand::prelude::*;

use crate::engines::{Clocks, Engine};
use crate::eval::basic_eval;
use crate::moves::Move;
use crate::position::Position;
use crate::types::Color;

pub struct MinMaxEngine {
    rng: StdRng,
}

impl MinMaxEngine {
    pub fn new() -> MinMaxEngine {
        MinMaxEngine {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for MinMaxEngine {
    fn default() -> MinMaxEngine {
        MinMaxEngine::new()
    }
}

impl Engine for MinMaxEngine {
    fn name(&self) -> &'static str {
        "minmax"
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
            let mut after = pos.clone();
            after.make_move(mov);

            let replies: Vec<Move> = after.legal_moves().to_vec();
            let value = if replies.is_empty() {
                // Checkmate or stalemate; the evaluator scores it directly.
                basic_eval(&after) * sign
            } else {
                let mut worst = f64::INFINITY;
                for &reply in &replies {
                    let mut settled = after.clone();
                    settled.make_move(reply);
                    let value = basic_eval(&settled) * sign;
                    if value < worst {
                        worst = value;
                    }
                }
                worst
            };

            if value >= best_value {
                best_value = value;
                best = Some(mov);
            }
        }

        debug!("minmax settled on {:?} valued {:.2}", best, best_value);
        best
    }
}
