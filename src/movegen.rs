// Copyright 2023 The Talos Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Legal move generation, in two phases.
//!
//! Phase one walks every piece of the side to move and produces its
//! pseudo-legal moves, marking a threat map along the way: every square the
//! mover attacks or defends, including the mover's own pieces reached by an
//! attack pattern. All probing goes through `Position::tile`, whose
//! off-board sentinel terminates ray walks and rejects off-board jump
//! targets without any explicit bounds checks. After the piece walk, every
//! pseudo-legal destination is folded into the threat map as well.
//!
//! Phase two filters the pseudo-legal list down to legal moves. A move is
//! legal when the mover's king is not attacked afterwards. Most quiet moves
//! can be accepted without verification: a piece that does not stand on an
//! attacked square cannot be pinned, and if the king is not in check a move
//! by such a piece cannot expose him. The remaining moves (king steps,
//! moves of possibly-pinned pieces, every move while in check, and pawn
//! captures, whose en-passant variant can uncover an attack along the rank)
//! are verified by applying them to a clone and re-generating the
//! opponent's threat map.
//!
//! Castling is generated in phase two only, and never contributes to the
//! threat map.
use crate::bitboard::Bitboard;
use crate::moves::Move;
use crate::position::Position;
use crate::types::{Color, PieceKind, Square, Tile};

pub(crate) struct Generated {
    pub moves: Vec<Move>,
    pub threat: Bitboard,
}

const KNIGHT_JUMPS: [(i16, i16); 8] = [
    (-1, 2),
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
];

const BISHOP_RAYS: [(i16, i16); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_RAYS: [(i16, i16); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Produces the legal move list of the side to move, along with the threat
/// map built as a byproduct.
pub(crate) fn generate(pos: &Position) -> Generated {
    let mover = pos.turn();
    let enemy_threat = pos.enemy_threat();

    // 256 comfortably covers the 218-move bound on chess positions.
    let mut pseudo = Vec::with_capacity(256);
    let mut threat = Bitboard::none();
    scan(pos, mover, Some(enemy_threat), &mut pseudo, &mut threat);

    // Threat closure: every reachable square counts as threatened, which
    // folds in the pawn-push squares the attack patterns above do not cover.
    for mov in &pseudo {
        threat.set(mov.destination());
    }

    let moves = filter_legal(pos, mover, enemy_threat, pseudo);
    Generated { moves, threat }
}

/// Produces only the threat map of the side to move: the pseudo-legal piece
/// walk without castling and without the legality filter. This is what
/// `Position::enemy_threat` evaluates on a turn-flipped clone, so it must
/// not recurse into full generation.
pub(crate) fn threat_map(pos: &Position) -> Bitboard {
    let mut pseudo = Vec::with_capacity(256);
    let mut threat = Bitboard::none();
    scan(pos, pos.turn(), None, &mut pseudo, &mut threat);
    for mov in &pseudo {
        threat.set(mov.destination());
    }
    threat
}

// Phase one. `enemy_threat` is `Some` for full generation and `None` for a
// threat-only pass; the threat-only pass skips pawn move emission and
// castling, neither of which contributes a threatened square.
fn scan(
    pos: &Position,
    mover: Color,
    enemy_threat: Option<Bitboard>,
    moves: &mut Vec<Move>,
    threat: &mut Bitboard,
) {
    for y in 0..8i16 {
        for x in 0..8i16 {
            let piece = match pos.tile(x, y) {
                Tile::Occupied(piece) if piece.color == mover => piece,
                _ => continue,
            };

            match piece.kind {
                PieceKind::Pawn => {
                    pawn_moves(pos, mover, x, y, enemy_threat.is_some(), moves, threat)
                }
                PieceKind::Knight => knight_moves(pos, mover, x, y, moves, threat),
                PieceKind::Bishop => ray_moves(pos, mover, x, y, &BISHOP_RAYS, moves, threat),
                PieceKind::Rook => ray_moves(pos, mover, x, y, &ROOK_RAYS, moves, threat),
                PieceKind::Queen => {
                    ray_moves(pos, mover, x, y, &BISHOP_RAYS, moves, threat);
                    ray_moves(pos, mover, x, y, &ROOK_RAYS, moves, threat);
                }
                PieceKind::King => king_moves(pos, mover, x, y, enemy_threat, moves, threat),
            }
        }
    }
}

// Emits a pawn move, fanned out into the four promotions when it reaches
// the last rank.
fn push_pawn_move(moves: &mut Vec<Move>, fx: i16, fy: i16, tx: i16, ty: i16) {
    let source = Square::new(fx as u8, fy as u8);
    let destination = Square::new(tx as u8, ty as u8);
    if ty == 7 || ty == 0 {
        moves.push(Move::promoting(source, destination, PieceKind::Knight));
        moves.push(Move::promoting(source, destination, PieceKind::Bishop));
        moves.push(Move::promoting(source, destination, PieceKind::Rook));
        moves.push(Move::promoting(source, destination, PieceKind::Queen));
    } else {
        moves.push(Move::new(source, destination));
    }
}

fn pawn_moves(
    pos: &Position,
    mover: Color,
    x: i16,
    y: i16,
    emit: bool,
    moves: &mut Vec<Move>,
    threat: &mut Bitboard,
) {
    let (dy, start_rank, ep_rank) = match mover {
        Color::White => (1, 1, 4),
        Color::Black => (-1, 6, 3),
    };

    if emit && pos.tile(x, y + dy).is_empty() {
        push_pawn_move(moves, x, y, x, y + dy);
        if y == start_rank && pos.tile(x, y + 2 * dy).is_empty() {
            push_pawn_move(moves, x, y, x, y + 2 * dy);
        }
    }

    // Diagonals are threatened whether or not anything stands there.
    for &dx in &[-1i16, 1] {
        let (tx, ty) = (x + dx, y + dy);
        let target = pos.tile(tx, ty);
        if target.is_off_board() {
            continue;
        }
        threat.set(Square::new(tx as u8, ty as u8));

        if !emit {
            continue;
        }
        let en_passant = y == ep_rank && pos.ep_file() == Some(tx as u8);
        if target.has_color(mover.toggle()) || en_passant {
            push_pawn_move(moves, x, y, tx, ty);
        }
    }
}

fn knight_moves(
    pos: &Position,
    mover: Color,
    x: i16,
    y: i16,
    moves: &mut Vec<Move>,
    threat: &mut Bitboard,
) {
    let source = Square::new(x as u8, y as u8);
    for &(dx, dy) in &KNIGHT_JUMPS {
        let (tx, ty) = (x + dx, y + dy);
        let target = pos.tile(tx, ty);
        if target.is_off_board() {
            continue;
        }
        let destination = Square::new(tx as u8, ty as u8);
        threat.set(destination);
        if !target.has_color(mover) {
            moves.push(Move::new(source, destination));
        }
    }
}

// Walks each ray outward: stop at the edge; mark and stop on an own piece;
// mark, emit, and stop on an enemy piece; mark, emit, and continue through
// empty squares.
fn ray_moves(
    pos: &Position,
    mover: Color,
    x: i16,
    y: i16,
    rays: &[(i16, i16); 4],
    moves: &mut Vec<Move>,
    threat: &mut Bitboard,
) {
    let source = Square::new(x as u8, y as u8);
    for &(dx, dy) in rays {
        let (mut tx, mut ty) = (x + dx, y + dy);
        loop {
            let target = pos.tile(tx, ty);
            if target.is_off_board() {
                break;
            }
            let destination = Square::new(tx as u8, ty as u8);
            threat.set(destination);
            if target.has_color(mover) {
                break;
            }
            moves.push(Move::new(source, destination));
            if !target.is_empty() {
                break;
            }
            tx += dx;
            ty += dy;
        }
    }
}

fn king_moves(
    pos: &Position,
    mover: Color,
    x: i16,
    y: i16,
    enemy_threat: Option<Bitboard>,
    moves: &mut Vec<Move>,
    threat: &mut Bitboard,
) {
    let source = Square::new(x as u8, y as u8);
    for dx in -1..=1i16 {
        for dy in -1..=1i16 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let target = pos.tile(x + dx, y + dy);
            if target.is_off_board() {
                continue;
            }
            let destination = Square::new((x + dx) as u8, (y + dy) as u8);
            threat.set(destination);
            if !target.has_color(mover) {
                moves.push(Move::new(source, destination));
            }
        }
    }

    // The king guards his own square; the castling path tests below rely on
    // the enemy king's square being part of the enemy threat map.
    threat.set(source);

    // Castling is generated only during full generation, never during a
    // threat pass: a castle threatens nothing.
    let enemy_threat = match enemy_threat {
        Some(threat) => threat,
        None => return,
    };
    let rank = y as u8;

    // Kingside: f and g must be empty, and the king's path e-f-g must be
    // safe.
    if pos.can_castle_kingside(mover) && pos.tile(5, y).is_empty() && pos.tile(6, y).is_empty() {
        let mut path = Bitboard::none();
        path.set(Square::new(4, rank));
        path.set(Square::new(5, rank));
        path.set(Square::new(6, rank));
        if (enemy_threat & path).empty() {
            moves.push(Move::new(source, Square::new(6, rank)));
        }
    }

    // Queenside: b, c, and d must be empty, but only the king's path
    // e-d-c must be safe; the b square is traversed by the rook alone.
    if pos.can_castle_queenside(mover)
        && pos.tile(1, y).is_empty()
        && pos.tile(2, y).is_empty()
        && pos.tile(3, y).is_empty()
    {
        let mut path = Bitboard::none();
        path.set(Square::new(2, rank));
        path.set(Square::new(3, rank));
        path.set(Square::new(4, rank));
        if (enemy_threat & path).empty() {
            moves.push(Move::new(source, Square::new(2, rank)));
        }
    }
}

// Phase two.
fn filter_legal(
    pos: &Position,
    mover: Color,
    enemy_threat: Bitboard,
    pseudo: Vec<Move>,
) -> Vec<Move> {
    let king = pos.bitboard(mover, PieceKind::King);
    let in_check = !(enemy_threat & king).empty();

    let mut legal = Vec::with_capacity(pseudo.len());
    for mov in pseudo {
        let moved = pos
            .piece_at(mov.source())
            .expect("pseudo-legal move from an empty square")
            .kind;

        // A king may never step onto an attacked square.
        if moved == PieceKind::King && enemy_threat.test(mov.destination()) {
            continue;
        }

        // Moves that cannot be assumed safe are verified by simulation:
        // anything while in check, any move of a piece standing on an
        // attacked (possibly pinning) square, and pawn captures. The
        // en-passant variant removes a second piece from the board, which
        // the source square alone cannot account for.
        let sideways_pawn =
            moved == PieceKind::Pawn && mov.source().x() != mov.destination().x();
        if in_check || enemy_threat.test(mov.source()) || sideways_pawn {
            let mut child = pos.clone();
            child.make_move(mov);
            let reply_threat = child.threat();
            if !(reply_threat & child.bitboard(mover, PieceKind::King)).empty() {
                continue;
            }
        }

        legal.push(mov);
    }

    legal
}

#[cfg(test)]
mod tests {
    use crate::moves::Move;
    use crate::position::Position;
    use crate::types::Square;

    fn assert_moves(fen: &str, expected: &[&str]) {
        let pos = Position::from_fen(fen).unwrap();
        let mut actual: Vec<String> = pos.legal_moves().iter().map(|m| m.to_string()).collect();
        let mut expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
        actual.sort();
        expected.sort();
        assert_eq!(expected, actual, "move list mismatch for {}", fen);
    }

    fn contains_move(pos: &Position, mov: &str) -> bool {
        let mov: Move = mov.parse().unwrap();
        pos.legal_moves().contains(&mov)
    }

    #[test]
    fn twenty_openings() {
        let pos = Position::from_start_position();
        assert_eq!(20, pos.legal_moves().len());
    }

    #[test]
    fn lone_king() {
        assert_moves(
            "8/8/8/8/8/8/8/K7 w - - 0 1",
            &["a1a2", "a1b1", "a1b2"],
        );
    }

    #[test]
    fn promotion_fan_out() {
        assert_moves(
            "8/P7/8/8/8/8/8/4k2K w - - 0 1",
            &["a7a8q", "a7a8r", "a7a8b", "a7a8n", "h1g1", "h1g2", "h1h2"],
        );
    }

    #[test]
    fn en_passant_generated() {
        let pos =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
                .unwrap();
        assert!(contains_move(&pos, "e5d6"));
    }

    #[test]
    fn en_passant_requires_adjacent_file() {
        // En-passant file points at d, but the white pawn stands on the
        // a-file and cannot reach it.
        let pos = Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/P7/8/1PPP1PPP/RNBQKBNR w KQkq d6 0 3")
            .unwrap();
        assert!(!contains_move(&pos, "a4d6"));
        assert!(contains_move(&pos, "e5d6"));
    }

    #[test]
    fn double_push_blocked_by_intermediate_square() {
        let pos = Position::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
        assert!(!contains_move(&pos, "e2e3"));
        assert!(!contains_move(&pos, "e2e4"));
    }

    #[test]
    fn castling_both_sides_available() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert!(contains_move(&pos, "e1g1"));
        assert!(contains_move(&pos, "e1c1"));
    }

    #[test]
    fn castling_forbidden_while_checked() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq - 0 1").unwrap();
        assert!(!contains_move(&pos, "e1g1"));
        assert!(!contains_move(&pos, "e1c1"));
    }

    #[test]
    fn castling_forbidden_through_attacked_square() {
        // A black rook on f8 covers f1 and forbids only the kingside castle.
        let pos = Position::from_fen("r4r2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(!contains_move(&pos, "e1g1"));
        assert!(contains_move(&pos, "e1c1"));
    }

    #[test]
    fn queenside_rook_path_may_be_attacked() {
        // A black rook on b8 eyes b1, but b1 is not on the king's path;
        // queenside castling stays legal.
        let pos = Position::from_fen("1r2k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(contains_move(&pos, "e1c1"));
    }

    #[test]
    fn queenside_blocked_by_b1_piece() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1").unwrap();
        assert!(!contains_move(&pos, "e1c1"));
        assert!(contains_move(&pos, "e1g1"));
    }

    #[test]
    fn pinned_piece_cannot_move_away() {
        // The white bishop on d2 is pinned against the king by the rook on
        // d8 and may only slide along... nowhere: any bishop move exposes
        // the king.
        let pos = Position::from_fen("3r3k/8/8/8/8/8/3B4/3K4 w - - 0 1").unwrap();
        for mov in pos.legal_moves() {
            assert_ne!(Square::new(3, 1), mov.source(), "pinned bishop moved");
        }
    }

    #[test]
    fn check_must_be_answered() {
        // Every legal move must address the rook's check.
        let pos = Position::from_fen("4k3/8/8/8/8/8/4r3/4K2B w - - 0 1").unwrap();
        assert!(!pos.legal_moves().is_empty());
        for mov in pos.legal_moves() {
            let mut child = pos.clone();
            child.make_move(*mov);
            child.set_turn(crate::types::Color::White);
            assert!(!child.is_check(), "move {} left the king in check", mov);
        }
    }

    #[test]
    fn king_cannot_retreat_along_checking_ray() {
        // Rook checks along the first rank; stepping straight back stays on
        // the ray and remains illegal.
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").unwrap();
        assert!(!contains_move(&pos, "e1d1"));
        assert!(!contains_move(&pos, "e1f1"));
        assert!(contains_move(&pos, "e1d2"));
        assert!(contains_move(&pos, "e1e2"));
        assert!(contains_move(&pos, "e1f2"));
    }

    #[test]
    fn en_passant_discovered_check_is_rejected() {
        // Capturing en passant removes both pawns from the fifth rank and
        // would uncover the rook's attack on the white king.
        let pos = Position::from_fen("8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1").unwrap();
        assert!(!contains_move(&pos, "e5d6"));
        assert!(contains_move(&pos, "e5e6"));
    }
}
