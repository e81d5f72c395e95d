// Copyright 2023 The Talos Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use talos::{Color, Position, START_FEN};

#[test]
fn start_position_round_trips() {
    let pos = Position::from_start_position();
    assert_eq!(START_FEN, pos.as_fen());
}

#[test]
fn every_reachable_child_round_trips() {
    // For every legal move of a handful of positions: apply it, emit the
    // child as FEN, re-parse, and demand the identical position. This
    // exercises the codec on every field the core tracks, including the
    // en-passant file and rights stripped by captures.
    let fens = [
        START_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
        "8/P7/8/8/8/8/8/4k2K w - - 0 1",
    ];
    for fen in &fens {
        let pos = Position::from_fen(fen).unwrap();
        for &mov in pos.legal_moves() {
            let mut child = pos.clone();
            child.make_move(mov);
            let reparsed = Position::from_fen(child.as_fen()).unwrap();
            assert_eq!(
                child,
                reparsed,
                "round trip diverged after {} from {}",
                mov,
                fen
            );
            assert_eq!(child.key(), reparsed.key());
        }
    }
}

#[test]
fn legal_move_lists_contain_no_duplicates() {
    let fens = [
        START_FEN,
        "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        "8/P7/8/8/8/8/8/4k2K w - - 0 1",
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
    ];
    for fen in &fens {
        let pos = Position::from_fen(fen).unwrap();
        let moves = pos.legal_moves();
        for (i, a) in moves.iter().enumerate() {
            for b in &moves[i + 1..] {
                assert_ne!(a, b, "duplicate move {} generated from {}", a, fen);
            }
        }
    }
}

#[test]
fn moves_survive_a_round_trip_through_the_parent() {
    // A legal move applied to a re-parsed copy of its position must land in
    // the same place as the original.
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let reparsed = Position::from_fen(pos.as_fen()).unwrap();
    assert_eq!(pos, reparsed);
    assert_eq!(pos.legal_moves(), reparsed.legal_moves());
}

#[test]
fn ep_round_trip_depends_on_side_to_move() {
    let white_to_move =
        Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 1")
            .unwrap();
    assert!(white_to_move.as_fen().contains(" d6 "));

    let black_to_move =
        Position::from_fen("rnbqkbnr/pppp1ppp/8/8/3Pp3/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 1")
            .unwrap();
    assert!(black_to_move.as_fen().contains(" d3 "));
}

#[test]
fn claimed_rights_are_rectified_against_placement() {
    // The FEN claims full rights, but only Black's pieces still stand on
    // their home squares.
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/4K3/R6R w KQkq - 0 1").unwrap();
    assert!(!pos.can_castle_kingside(Color::White));
    assert!(!pos.can_castle_queenside(Color::White));
    assert!(pos.can_castle_kingside(Color::Black));
    assert!(pos.can_castle_queenside(Color::Black));
}
