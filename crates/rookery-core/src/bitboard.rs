//! 64-bit square sets. Bit `i` is square `i` (a1 = 0, h1 = 7, a8 = 56, h8 = 63).

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Mul, Not};

use crate::square::Square;

/// A set of squares packed into a `u64`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const FULL: Bitboard = Bitboard(!0);

    pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00FF);
    pub const RANK_2: Bitboard = Bitboard(0x0000_0000_0000_FF00);
    pub const RANK_4: Bitboard = Bitboard(0x0000_0000_FF00_0000);
    pub const RANK_5: Bitboard = Bitboard(0x0000_00FF_0000_0000);
    pub const RANK_7: Bitboard = Bitboard(0x00FF_0000_0000_0000);
    pub const RANK_8: Bitboard = Bitboard(0xFF00_0000_0000_0000);

    pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);

    /// Create a bitboard from a raw `u64`.
    #[inline]
    pub const fn new(bits: u64) -> Bitboard {
        Bitboard(bits)
    }

    /// Return the underlying `u64`.
    #[inline]
    pub const fn inner(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_nonempty(self) -> bool {
        self.0 != 0
    }

    /// Number of set squares.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 >> sq.index()) & 1 != 0
    }

    #[inline]
    pub const fn with(self, sq: Square) -> Bitboard {
        Bitboard(self.0 | (1u64 << sq.index()))
    }

    #[inline]
    pub const fn without(self, sq: Square) -> Bitboard {
        Bitboard(self.0 & !(1u64 << sq.index()))
    }

    /// Lowest set square, if any.
    #[inline]
    pub const fn lsb(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square::from_index_unchecked(self.0.trailing_zeros() as u8))
        }
    }

    /// Shift every square one step toward `dir`.
    ///
    /// Squares that would leave the board are dropped first, so nothing wraps
    /// from the h-file onto the a-file (or vice versa).
    #[inline]
    pub const fn step(self, dir: Direction) -> Bitboard {
        let bits = self.0 & !dir.border().0;
        let delta = dir.delta();
        if delta > 0 {
            Bitboard(bits << delta)
        } else {
            Bitboard(bits >> -delta)
        }
    }
}

/// One of the eight compass directions a piece can slide in.
///
/// North is toward rank 8, east toward the h-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ORTHOGONAL: [Direction; 4] =
        [Direction::North, Direction::South, Direction::East, Direction::West];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Index offset of one step in this direction.
    #[inline]
    pub const fn delta(self) -> i8 {
        match self {
            Direction::North => 8,
            Direction::South => -8,
            Direction::East => 1,
            Direction::West => -1,
            Direction::NorthEast => 9,
            Direction::NorthWest => 7,
            Direction::SouthEast => -7,
            Direction::SouthWest => -9,
        }
    }

    /// Squares from which a step in this direction would leave the board.
    #[inline]
    pub const fn border(self) -> Bitboard {
        match self {
            Direction::North => Bitboard::RANK_8,
            Direction::South => Bitboard::RANK_1,
            Direction::East => Bitboard::FILE_H,
            Direction::West => Bitboard::FILE_A,
            Direction::NorthEast => Bitboard(Bitboard::RANK_8.0 | Bitboard::FILE_H.0),
            Direction::NorthWest => Bitboard(Bitboard::RANK_8.0 | Bitboard::FILE_A.0),
            Direction::SouthEast => Bitboard(Bitboard::RANK_1.0 | Bitboard::FILE_H.0),
            Direction::SouthWest => Bitboard(Bitboard::RANK_1.0 | Bitboard::FILE_A.0),
        }
    }
}

macro_rules! impl_bit_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait for Bitboard {
            type Output = Bitboard;
            #[inline]
            fn $method(self, rhs: Bitboard) -> Bitboard {
                Bitboard(self.0 $op rhs.0)
            }
        }

        impl $assign_trait for Bitboard {
            #[inline]
            fn $assign_method(&mut self, rhs: Bitboard) {
                self.0 = self.0 $op rhs.0;
            }
        }
    };
}

impl_bit_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
impl_bit_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
impl_bit_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

/// Magic hashing relies on the product silently truncating to 64 bits.
impl Mul<u64> for Bitboard {
    type Output = u64;
    #[inline]
    fn mul(self, rhs: u64) -> u64 {
        self.0.wrapping_mul(rhs)
    }
}

impl Iterator for Bitboard {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        let sq = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.count() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for Bitboard {}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for rank in (0..8).rev() {
            write!(f, "  {} ", rank + 1)?;
            for file in 0..8 {
                let c = if (self.0 >> (rank * 8 + file)) & 1 == 1 { '1' } else { '.' };
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "    a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::{Bitboard, Direction};
    use crate::square::Square;

    #[test]
    fn empty_and_full() {
        assert!(Bitboard::EMPTY.is_empty());
        assert!(Bitboard::FULL.is_nonempty());
        assert_eq!(!Bitboard::EMPTY, Bitboard::FULL);
        assert_eq!(Bitboard::default(), Bitboard::EMPTY);
    }

    #[test]
    fn with_without_contains() {
        let bb = Bitboard::EMPTY.with(Square::E4).with(Square::H8);
        assert!(bb.contains(Square::E4));
        assert!(!bb.contains(Square::D4));
        assert_eq!(bb.count(), 2);
        assert_eq!(bb.without(Square::E4), Square::H8.bitboard());
    }

    #[test]
    fn iterates_in_ascending_order() {
        let bb = Bitboard::EMPTY.with(Square::H8).with(Square::A1).with(Square::E4);
        assert_eq!(bb.len(), 3);
        let squares: Vec<_> = bb.collect();
        assert_eq!(squares, vec![Square::A1, Square::E4, Square::H8]);
    }

    #[test]
    fn step_moves_one_square() {
        let e4 = Square::E4.bitboard();
        assert_eq!(e4.step(Direction::North), Square::E5.bitboard());
        assert_eq!(e4.step(Direction::SouthWest), Square::D3.bitboard());
        assert_eq!(e4.step(Direction::East), Square::F4.bitboard());
    }

    #[test]
    fn step_never_wraps_files() {
        assert!(Square::H4.bitboard().step(Direction::East).is_empty());
        assert!(Square::H4.bitboard().step(Direction::NorthEast).is_empty());
        assert!(Square::A4.bitboard().step(Direction::West).is_empty());
        assert!(Square::A4.bitboard().step(Direction::SouthWest).is_empty());
        assert!(Square::E8.bitboard().step(Direction::North).is_empty());
        assert!(Square::E1.bitboard().step(Direction::South).is_empty());
    }

    #[test]
    fn whole_rank_steps() {
        assert_eq!(Bitboard::RANK_1.step(Direction::North), Bitboard::RANK_2);
        assert_eq!(Bitboard::FILE_A.step(Direction::East).count(), 8);
        assert_eq!(Bitboard::FILE_H.step(Direction::East), Bitboard::EMPTY);
    }

    #[test]
    fn multiply_wraps() {
        let product = Bitboard::FULL * 2;
        assert_eq!(product, u64::MAX - 1);
    }

    #[test]
    fn assign_operators() {
        let mut bb = Bitboard::RANK_1;
        bb |= Bitboard::RANK_2;
        assert_eq!(bb.count(), 16);
        bb &= Bitboard::FILE_A;
        assert_eq!(bb.count(), 2);
        bb ^= Square::A1.bitboard();
        assert_eq!(bb, Square::A2.bitboard());
    }
}
