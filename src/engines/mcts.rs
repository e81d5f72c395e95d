// Copyright 2023 The Talos Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The Monte-Carlo tree search engine: UCT selection over a `PositionTree`,
//! uniformly random playouts, and backpropagation that walks the visited
//! path back to the root, flipping the playout result by side to move at
//! each node.
//!
//! Playout results are kept from White's perspective; a node's accumulated
//! score is stored from the perspective of the player who moved into the
//! node, which is what the selection step at its parent wants to maximize.
use std::time::{Duration, Instant};

use rand::prelude::*;

use crate::engines::{Clocks, Engine};
use crate::eval::basic_eval;
use crate::moves::Move;
use crate::position::Position;
use crate::tree::PositionTree;
use crate::types::Color;

const EXPLORATION: f64 = std::f64::consts::SQRT_2;
const PLAYOUT_CAP: u32 = 150;
const DEFAULT_BUDGET_MS: u64 = 2000;

pub struct MctsEngine {
    rng: StdRng,
}

impl MctsEngine {
    pub fn new() -> MctsEngine {
        MctsEngine {
            rng: StdRng::from_entropy(),
        }
    }

    /// One selection / expansion / simulation pass. Returns the playout
    /// result from White's perspective; visit counts and scores update on
    /// the way back up.
    fn iterate(&mut self, node: &mut PositionTree) -> f64 {
        let result = if node.is_expanded() && !node.children.is_empty() {
            let index = self.select(node);
            self.iterate(&mut node.children[index])
        } else if node.visits > 0 && !node.is_expanded() {
            // A revisited leaf gets expanded; the playout then starts from
            // one of its children.
            node.expand();
            if node.children.is_empty() {
                self.playout(&node.position)
            } else {
                let index = self.rng.gen_range(0..node.children.len());
                self.iterate(&mut node.children[index])
            }
        } else {
            self.playout(&node.position)
        };

        node.visits += 1;
        // The player who moved into this node is the opposite of the side
        // to move at it.
        node.score += match node.position.turn() {
            Color::Black => result,
            Color::White => -result,
        };
        result
    }

    fn select(&self, node: &PositionTree) -> usize {
        let total = f64::from(node.visits).max(1.0);
        let mut best_index = 0;
        let mut best_value = f64::NEG_INFINITY;
        for (index, child) in node.children.iter().enumerate() {
            let value = if child.visits == 0 {
                f64::INFINITY
            } else {
                let visits = f64::from(child.visits);
                child.score / visits + EXPLORATION * (total.ln() / visits).sqrt()
            };
            if value > best_value {
                best_value = value;
                best_index = index;
            }
        }
        best_index
    }

    /// Plays uniformly random moves until the game ends or the cap is hit,
    /// then collapses the material count into a win/draw/loss signal.
    fn playout(&mut self, pos: &Position) -> f64 {
        let mut board = pos.clone();
        for _ in 0..PLAYOUT_CAP {
            let mov = match board.legal_moves().choose(&mut self.rng) {
                Some(&mov) => mov,
                None => break,
            };
            board.make_move(mov);
        }

        let eval = basic_eval(&board);
        if eval > 0.0 {
            1.0
        } else if eval < 0.0 {
            -1.0
        } else {
            0.0
        }
    }
}

impl Default for MctsEngine {
    fn default() -> MctsEngine {
        MctsEngine::new()
    }
}

impl Engine for MctsEngine {
    fn name(&self) -> &'static str {
        "mcts"
    }

    fn choose_move(&mut self, pos: &Position, clocks: &Clocks) -> Option<Move> {
        if pos.legal_moves().is_empty() {
            return None;
        }

        let budget = Duration::from_millis(clocks.movetime.unwrap_or(DEFAULT_BUDGET_MS));
        let start = Instant::now();

        let mut root = PositionTree::root(pos.clone());
        root.expand();
        while start.elapsed() < budget {
            self.iterate(&mut root);
        }

        let chosen = root
            .children
            .iter()
            .max_by_key(|child| child.visits)
            .and_then(|child| child.mov);
        debug!(
            "mcts ran {} iterations, settled on {:?}",
            root.visits, chosen
        );
        chosen
    }
}
