//! Integration tests for rule invariants that must hold along any game.
//!
//! Random walks play uniformly chosen legal moves from a few seed positions
//! and check board consistency, rights monotonicity and exact undo at every
//! ply.

use std::sync::{Arc, OnceLock};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rookery_core::{
    AttackTables, CastleSide, GameStatus, MoveError, MoveFlag, PieceType, Position,
    PositionError, Side, Square, build_tables, perft,
};

const KIWIPETE_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

const WALK_FENS: [&str; 4] = [
    rookery_core::STARTING_FEN,
    KIWIPETE_FEN,
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
];

fn tables() -> Arc<AttackTables> {
    static TABLES: OnceLock<Arc<AttackTables>> = OnceLock::new();
    TABLES
        .get_or_init(|| Arc::new(build_tables().expect("bundled magics are collision-free")))
        .clone()
}

fn from_fen(fen: &str) -> Position {
    Position::from_fen(tables(), fen).unwrap()
}

/// Play up to `plies` random legal moves, calling `check` after each.
fn random_walk(pos: &mut Position, rng: &mut StdRng, plies: usize, mut check: impl FnMut(&mut Position)) {
    for _ in 0..plies {
        let side = pos.side_to_move();
        let moves = pos.generate_legal_moves(side);
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.random_range(0..moves.len())];
        pos.make_move(mv);
        check(pos);
    }
}

// ── Board consistency ─────────────────────────────────────────────────────────

#[test]
fn random_walks_keep_position_consistent() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for fen in WALK_FENS {
        for _ in 0..4 {
            let mut pos = from_fen(fen);
            random_walk(&mut pos, &mut rng, 150, |pos| {
                pos.validate().unwrap_or_else(|e| panic!("{e} after {:?}", pos.last_move()));
                assert!((pos.occupancy(Side::White) & pos.occupancy(Side::Black)).is_empty());
                // The side that just moved never leaves its king attacked.
                assert!(!pos.in_check(!pos.side_to_move()), "{pos:?}");
            });
        }
    }
}

#[test]
fn random_walks_unwind_exactly() {
    let mut rng = StdRng::seed_from_u64(7);
    for fen in WALK_FENS {
        let start = from_fen(fen);
        let mut pos = start.clone();
        let mut snapshots = vec![pos.clone()];
        random_walk(&mut pos, &mut rng, 120, |pos| snapshots.push(pos.clone()));

        snapshots.pop();
        while let Some(expected) = snapshots.pop() {
            pos.unmake_move().unwrap();
            assert_eq!(pos, expected);
        }
        assert_eq!(pos, start);
        assert_eq!(pos.unmake_move(), Err(PositionError::EmptyHistory));
    }
}

#[test]
fn make_unmake_every_legal_move() {
    for fen in WALK_FENS {
        let mut pos = from_fen(fen);
        let before = pos.clone();
        for side in Side::ALL {
            let moves = pos.generate_legal_moves(side);
            for &mv in &moves {
                pos.make_move(mv);
                pos.validate().unwrap();
                assert_eq!(pos.unmake_move(), Ok(mv));
                assert_eq!(pos, before, "{mv} in {fen}");
            }
        }
    }
}

// ── Generation rules ─────────────────────────────────────────────────────────

#[test]
fn kings_are_never_targeted() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut pos = from_fen(KIWIPETE_FEN);
    random_walk(&mut pos, &mut rng, 200, |pos| {
        let kings = pos.pieces(PieceType::King);
        for side in Side::ALL {
            for mv in &pos.generate_pseudolegal(side) {
                assert!(!kings.contains(mv.to()), "{mv} targets a king");
            }
        }
    });
}

#[test]
fn castling_rights_never_come_back() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..8 {
        let mut pos = from_fen(KIWIPETE_FEN);
        let mut previous = pos.castle_rights();
        random_walk(&mut pos, &mut rng, 100, |pos| {
            let current = pos.castle_rights();
            assert!(previous.contains(current), "{previous:?} -> {current:?}");
            previous = current;
        });
    }
}

#[test]
fn castling_from_the_opening_once_the_path_clears() {
    let mut pos = Position::new(tables());
    let castles = |pos: &mut Position, side| {
        pos.generate_legal_moves(side).iter().filter(|m| m.is_castle()).count()
    };
    assert_eq!(castles(&mut pos, Side::White), 0);

    for (from, to) in [
        (Square::E2, Square::E4),
        (Square::E7, Square::E5),
        (Square::G1, Square::F3),
        (Square::B8, Square::C6),
        (Square::F1, Square::C4),
        (Square::G8, Square::F6),
    ] {
        pos.play(from, to, None).unwrap();
    }
    assert_eq!(castles(&mut pos, Side::White), 1);
    assert_eq!(castles(&mut pos, Side::Black), 0);

    let castle = pos.play(Square::E1, Square::G1, None).unwrap();
    assert_eq!(castle.flag(), MoveFlag::KingCastle);
    assert_eq!(pos.piece_at(Square::F1).map(|p| p.kind()), Some(PieceType::Rook));
    assert!(pos.piece_at(Square::H1).is_none());
    assert!(!pos.castle_rights().can_castle(Side::White, CastleSide::Long));

    pos.play(Square::F8, Square::C5, None).unwrap();
    pos.play(Square::D2, Square::D3, None).unwrap();
    let castle = pos.play(Square::E8, Square::G8, None).unwrap();
    assert_eq!(castle.flag(), MoveFlag::KingCastle);
    assert_eq!(pos.piece_at(Square::F8).map(|p| p.kind()), Some(PieceType::Rook));
    assert_eq!(pos.to_fen(), "r1bq1rk1/pppp1ppp/2n2n2/2b1p3/2B1P3/3P1N2/PPP2PPP/RNBQ1RK1 w - - 1 6");
}

#[test]
fn castling_after_king_returns_is_refused() {
    let mut pos = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    pos.play(Square::E1, Square::F1, None).unwrap();
    pos.play(Square::E8, Square::F8, None).unwrap();
    pos.play(Square::F1, Square::E1, None).unwrap();
    pos.play(Square::F8, Square::E8, None).unwrap();

    for side in Side::ALL {
        for castle in CastleSide::ALL {
            assert!(!pos.castle_rights().can_castle(side, castle));
        }
        assert!(pos.generate_legal_moves(side).iter().all(|m| !m.is_castle()));
    }
    assert_eq!(
        pos.play(Square::E1, Square::G1, None),
        Err(MoveError::Illegal { from: Square::E1, to: Square::G1 })
    );
}

#[test]
fn castling_through_attack_is_refused() {
    // Black rook on f8 covers f1: short castling passes through it.
    let mut pos = from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    let castles: Vec<_> = pos
        .generate_legal_moves(Side::White)
        .iter()
        .filter(|m| m.is_castle())
        .map(|m| m.flag())
        .collect();
    assert_eq!(castles, vec![MoveFlag::QueenCastle]);
}

#[test]
fn en_passant_window_is_one_move() {
    let mut pos = from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1");
    pos.play(Square::D7, Square::D5, None).unwrap();
    let ep = pos.play(Square::E5, Square::D6, None).unwrap();
    assert!(ep.is_en_passant());
    assert_eq!(pos.piece_at(Square::D5), None);
    pos.unmake_move().unwrap();

    // Any other move closes the window.
    pos.play(Square::E1, Square::D1, None).unwrap();
    pos.play(Square::E8, Square::E7, None).unwrap();
    assert!(pos.generate_legal_moves(Side::White).iter().all(|m| !m.is_en_passant()));
}

// ── Outcomes and user moves ──────────────────────────────────────────────────

#[test]
fn scholars_mate() {
    let mut pos = from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4");
    assert_eq!(pos.status(Side::Black), GameStatus::Ongoing);
    let mv = pos.play(Square::H5, Square::F7, None).unwrap();
    assert!(mv.is_capture());
    assert!(pos.in_check(Side::Black));
    assert_eq!(pos.status(Side::Black), GameStatus::Checkmate);
}

#[test]
fn stalemate_is_not_checkmate() {
    let mut pos = from_fen("k7/8/1Q6/8/8/8/8/7K b - - 0 1");
    assert!(!pos.in_check(Side::Black));
    assert_eq!(pos.status(Side::Black), GameStatus::Stalemate);
}

#[test]
fn illegal_play_leaves_position_untouched() {
    // The e2 pawn is pinned by the rook on e8.
    let mut pos = from_fen("4r1k1/8/8/8/8/8/4P3/4K3 w - - 0 1");
    let before = pos.clone();
    for (from, to) in [
        (Square::E2, Square::D3),
        (Square::E1, Square::E3),
        (Square::A1, Square::A2),
        (Square::E1, Square::G1),
    ] {
        assert_eq!(pos.play(from, to, None), Err(MoveError::Illegal { from, to }));
        assert_eq!(pos, before);
    }
    assert!(pos.play(Square::E2, Square::E4, None).is_ok());
}

// ── Perft oracle ─────────────────────────────────────────────────────────────

#[test]
fn perft_agrees_from_both_sides_of_a_fen() {
    // The same position reached by play and by FEN must expand identically.
    let mut played = Position::new(tables());
    for (from, to) in [(Square::E2, Square::E4), (Square::C7, Square::C5)] {
        played.play(from, to, None).unwrap();
    }
    let mut parsed = from_fen(&played.to_fen());
    assert_eq!(parsed.to_fen(), played.to_fen());
    assert_eq!(perft(&mut played, 3, Side::White), perft(&mut parsed, 3, Side::White));
}

#[test]
fn perft_startpos_shallow() {
    let mut pos = Position::new(tables());
    let counts: Vec<u64> = (1..=3).map(|d| perft(&mut pos, d, Side::White)).collect();
    assert_eq!(counts, vec![20, 400, 8_902]);
}
