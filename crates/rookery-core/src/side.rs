//! The two sides of a game.

use std::fmt;
use std::ops::Not;

/// White or Black. Indexes the two side-occupancy bitboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    White = 0,
    Black = 1,
}

impl Side {
    pub const COUNT: usize = 2;
    pub const ALL: [Side; 2] = [Side::White, Side::Black];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Return the opposing side.
    #[inline]
    pub const fn flip(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Zero-based rank this side's pawns start on.
    #[inline]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Side::White => 1,
            Side::Black => 6,
        }
    }
}

impl Not for Side {
    type Output = Side;

    #[inline]
    fn not(self) -> Side {
        self.flip()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "w"),
            Side::Black => write!(f, "b"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Side;

    #[test]
    fn flip_and_not() {
        assert_eq!(Side::White.flip(), Side::Black);
        assert_eq!(!Side::Black, Side::White);
        assert_eq!(!!Side::White, Side::White);
    }

    #[test]
    fn index_values() {
        assert_eq!(Side::White.index(), 0);
        assert_eq!(Side::Black.index(), 1);
        assert_eq!(Side::ALL.len(), Side::COUNT);
    }

    #[test]
    fn pawn_ranks() {
        assert_eq!(Side::White.pawn_rank(), 1);
        assert_eq!(Side::Black.pawn_rank(), 6);
    }
}
