//! Leaper attack patterns, computed at compile time from border-masked steps.

use crate::bitboard::{Bitboard, Direction};
use crate::square::Square;

/// Two-step-then-one-step paths that make up the knight's L.
const KNIGHT_PATHS: [[Direction; 3]; 8] = [
    [Direction::North, Direction::North, Direction::East],
    [Direction::North, Direction::North, Direction::West],
    [Direction::South, Direction::South, Direction::East],
    [Direction::South, Direction::South, Direction::West],
    [Direction::East, Direction::East, Direction::North],
    [Direction::East, Direction::East, Direction::South],
    [Direction::West, Direction::West, Direction::North],
    [Direction::West, Direction::West, Direction::South],
];

const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
    Direction::NorthEast,
    Direction::NorthWest,
    Direction::SouthEast,
    Direction::SouthWest,
];

const fn knight_from(sq: usize) -> Bitboard {
    let origin = Bitboard::new(1u64 << sq);
    let mut bits = 0u64;
    let mut p = 0;
    while p < KNIGHT_PATHS.len() {
        let path = KNIGHT_PATHS[p];
        bits |= origin.step(path[0]).step(path[1]).step(path[2]).inner();
        p += 1;
    }
    Bitboard::new(bits)
}

const fn king_from(sq: usize) -> Bitboard {
    let origin = Bitboard::new(1u64 << sq);
    let mut bits = 0u64;
    let mut d = 0;
    while d < ALL_DIRECTIONS.len() {
        bits |= origin.step(ALL_DIRECTIONS[d]).inner();
        d += 1;
    }
    Bitboard::new(bits)
}

pub(super) const fn knight_table() -> [Bitboard; Square::COUNT] {
    let mut table = [Bitboard::EMPTY; Square::COUNT];
    let mut sq = 0;
    while sq < Square::COUNT {
        table[sq] = knight_from(sq);
        sq += 1;
    }
    table
}

pub(super) const fn king_table() -> [Bitboard; Square::COUNT] {
    let mut table = [Bitboard::EMPTY; Square::COUNT];
    let mut sq = 0;
    while sq < Square::COUNT {
        table[sq] = king_from(sq);
        sq += 1;
    }
    table
}

/// Pawn capture geometry: index 0 = White (captures north), 1 = Black (south).
pub(super) const fn pawn_table() -> [[Bitboard; Square::COUNT]; 2] {
    let mut table = [[Bitboard::EMPTY; Square::COUNT]; 2];
    let mut sq = 0;
    while sq < Square::COUNT {
        let origin = Bitboard::new(1u64 << sq);
        table[0][sq] = Bitboard::new(
            origin.step(Direction::NorthEast).inner() | origin.step(Direction::NorthWest).inner(),
        );
        table[1][sq] = Bitboard::new(
            origin.step(Direction::SouthEast).inner() | origin.step(Direction::SouthWest).inner(),
        );
        sq += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::{king_table, knight_table, pawn_table};
    use crate::square::Square;

    #[test]
    fn knight_counts() {
        let table = knight_table();
        assert_eq!(table[Square::E4.index()].count(), 8);
        assert_eq!(table[Square::A1.index()].count(), 2);
        assert_eq!(table[Square::H8.index()].count(), 2);
        assert_eq!(table[Square::B1.index()].count(), 3);
    }

    #[test]
    fn knight_g1_targets() {
        let g1 = knight_table()[Square::G1.index()];
        assert!(g1.contains(Square::F3));
        assert!(g1.contains(Square::H3));
        assert!(g1.contains(Square::E2));
        assert_eq!(g1.count(), 3);
    }

    #[test]
    fn king_counts() {
        let table = king_table();
        assert_eq!(table[Square::E4.index()].count(), 8);
        assert_eq!(table[Square::E1.index()].count(), 5);
        assert_eq!(table[Square::H1.index()].count(), 3);
    }

    #[test]
    fn pawn_captures_do_not_wrap() {
        let table = pawn_table();
        let a4 = table[0][Square::A4.index()];
        assert_eq!(a4, Square::B5.bitboard());
        let h4 = table[0][Square::H4.index()];
        assert_eq!(h4, Square::G5.bitboard());
        let e5 = table[1][Square::E5.index()];
        assert_eq!(e5, Square::D4.bitboard() | Square::F4.bitboard());
    }
}
