// Copyright 2023 The Talos Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The random engine: a uniform choice among the legal moves. Useful as a
//! sparring partner and as a smoke test of the move generator.
use rand::prelude::*;

use crate::engines::{Clocks, Engine};
use crate::moves::Move;
use crate::position::Position;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> RandomEngine {
        RandomEngine {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> RandomEngine {
        RandomEngine::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_move(&mut self, pos: &Position, _clocks: &Clocks) -> Option<Move> {
        pos.legal_moves().choose(&mut self.rng).copied()
    }
}
