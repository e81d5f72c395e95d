// Copyright 2023 The Talos Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The alpha-beta engine: a thin adapter that feeds the mover's clock into
//! the iterative-deepening reference search.
use std::time::Duration;

use crate::engines::{Clocks, Engine};
use crate::moves::Move;
use crate::position::Position;
use crate::search::{self, Limits};

const DEFAULT_MOVETIME_MS: u64 = 2000;

pub struct AlphaBetaEngine;

impl AlphaBetaEngine {
    pub fn new() -> AlphaBetaEngine {
        AlphaBetaEngine
    }
}

impl Default for AlphaBetaEngine {
    fn default() -> AlphaBetaEngine {
        AlphaBetaEngine::new()
    }
}

impl Engine for AlphaBetaEngine {
    fn name(&self) -> &'static str {
        "alphabeta"
    }

    fn choose_move(&mut self, pos: &Position, clocks: &Clocks) -> Option<Move> {
        let (clock, increment) = clocks.for_side(pos.turn());
        // A bare `go` carries no clock at all; think for a flat two
        // seconds rather than not at all.
        let movetime = clocks
            .movetime
            .or(if clock.is_none() { Some(DEFAULT_MOVETIME_MS) } else { None });
        let limits = Limits {
            clock: clock.map(Duration::from_millis),
            increment: increment.map(Duration::from_millis),
            movetime: movetime.map(Duration::from_millis),
        };

        let report = search::run(pos, &limits);
        info!(
            "depth {} nodes {} score {:.2} in {:?}",
            report.depth, report.nodes, report.evaluation, report.elapsed
        );
        report.best_move
    }
}
