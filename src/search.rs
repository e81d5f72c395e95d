// Copyright 2023 The Talos Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The reference search: iterative-deepening alpha-beta negamax with a
//! capture-only quiescence extension and delta pruning.
//!
//! The driver deepens one ply at a time over a persistent `PositionTree`,
//! so children generated for ply N are reused verbatim at ply N + 1. After
//! each ply it extrapolates the cost of the next one from the ratio of the
//! last two ply times and stops deepening once the projection overruns the
//! time budget, or once the ply cap is reached.
//!
//! A stack of position keys follows the search down the tree; a child whose
//! key already appears on the stack is scored as a draw instead of being
//! searched, which keeps the searcher from chasing repetitions inside its
//! own window.
use std::cmp;
use std::time::{Duration, Instant};

use crate::eval::adv_eval;
use crate::moves::Move;
use crate::position::Position;
use crate::tree::PositionTree;
use crate::types::Color;

/// Time controls for one search, all in wall time. `movetime` overrides the
/// clock-based budget when present.
#[derive(Copy, Clone, Debug, Default)]
pub struct Limits {
    pub clock: Option<Duration>,
    pub increment: Option<Duration>,
    pub movetime: Option<Duration>,
}

/// The outcome of a search: the chosen move, its score from the mover's
/// point of view, and some accounting.
#[derive(Copy, Clone, Debug)]
pub struct SearchReport {
    pub best_move: Option<Move>,
    pub evaluation: f64,
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
}

const SCORE_WINDOW: f64 = 100_000.0;
const MAX_PLY: u32 = 5;
const QUIESCE_DEPTH: u32 = 4;
const MAX_BUDGET: Duration = Duration::from_secs(30);

/// Runs an iterative-deepening search from `pos` within the given limits
/// and reports the best move found.
pub fn run(pos: &Position, limits: &Limits) -> SearchReport {
    let start = Instant::now();
    let budget = limits.movetime.unwrap_or_else(|| {
        let clock = limits.clock.unwrap_or_else(|| Duration::from_secs(0));
        let increment = limits.increment.unwrap_or_else(|| Duration::from_secs(0));
        cmp::min(increment + clock / 4, MAX_BUDGET)
    });

    let mut root = PositionTree::root(pos.clone());
    let mut search = Search {
        nodes: 0,
        keys: vec![pos.key()],
    };
    let mut report = SearchReport {
        best_move: None,
        evaluation: 0.0,
        depth: 0,
        nodes: 0,
        elapsed: Duration::from_secs(0),
    };

    let mut previous = Duration::from_secs(0);
    let mut last = Duration::from_secs(0);
    let mut projected = Duration::from_secs(0);
    let mut ply = 1;
    while ply <= MAX_PLY
        && budget
            .checked_sub(start.elapsed())
            .map_or(false, |left| left > projected)
    {
        let ply_start = Instant::now();
        let evaluation = search.negamax(&mut root, -SCORE_WINDOW, SCORE_WINDOW, ply, false);
        let duration = ply_start.elapsed();

        report.best_move = root.best_reply;
        report.evaluation = evaluation;
        report.depth = ply;
        report.nodes = search.nodes;
        debug!(
            "ply {} searched in {:?}: best {:?} score {:.2}",
            ply, duration, report.best_move, evaluation
        );

        previous = last;
        last = duration;
        let ratio = if previous > Duration::from_secs(0) {
            (last.as_secs_f64() / previous.as_secs_f64()).min(30.0)
        } else {
            30.0
        };
        projected = last.mul_f64(ratio);
        ply += 1;
    }

    // Even a failed-low root search should move something.
    if report.best_move.is_none() {
        report.best_move = pos.legal_moves().first().copied();
    }
    report.elapsed = start.elapsed();
    report
}

struct Search {
    nodes: u64,
    keys: Vec<u64>,
}

impl Search {
    fn negamax(
        &mut self,
        node: &mut PositionTree,
        mut alpha: f64,
        beta: f64,
        depth: u32,
        reached_by_promotion: bool,
    ) -> f64 {
        if depth == 0 {
            return self.quiesce(
                &node.position,
                alpha,
                beta,
                QUIESCE_DEPTH,
                reached_by_promotion,
            );
        }

        node.expand();
        if node.children.is_empty() {
            self.nodes += 1;
            node.evaluation = mover_relative(adv_eval(&node.position), node.position.turn());
            return node.evaluation;
        }

        let mut best = None;
        for child in &mut node.children {
            let key = child.position.key();
            let score = if self.keys.contains(&key) {
                // Repetition inside the search window is a draw.
                0.0
            } else {
                let promoted = child.mov.map_or(false, |m| m.promotion().is_some());
                self.keys.push(key);
                let score = -self.negamax(child, -beta, -alpha, depth - 1, promoted);
                self.keys.pop();
                score
            };

            if score >= beta {
                node.evaluation = beta;
                return beta;
            }
            if score > alpha {
                alpha = score;
                best = child.mov;
            }
        }

        if best.is_some() {
            node.best_reply = best;
        }
        node.evaluation = alpha;
        alpha
    }

    // Capture-only extension past the horizon. The stand-pat score may
    // cut off or raise alpha immediately; delta pruning abandons lines
    // where not even a queen's worth of material (plus a promotion bonus
    // when the move reaching this node promoted) could recover alpha.
    fn quiesce(
        &mut self,
        pos: &Position,
        mut alpha: f64,
        beta: f64,
        depth: u32,
        reached_by_promotion: bool,
    ) -> f64 {
        self.nodes += 1;

        let stand_pat = mover_relative(adv_eval(pos), pos.turn());
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut delta = 9.0;
        if reached_by_promotion {
            delta += 7.0;
        }
        if stand_pat < alpha - delta {
            return alpha;
        }

        if depth == 0 {
            return alpha;
        }

        let captures: Vec<Move> = pos
            .legal_moves()
            .iter()
            .copied()
            .filter(|&m| pos.is_capture(m))
            .collect();
        for mov in captures {
            let mut child = pos.clone();
            child.make_move(mov);
            let score = -self.quiesce(&child, -beta, -alpha, depth - 1, mov.promotion().is_some());
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }
}

fn mover_relative(eval: f64, turn: Color) -> f64 {
    match turn {
        Color::White => eval,
        Color::Black => -eval,
    }
}
