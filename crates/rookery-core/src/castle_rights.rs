//! Castling eligibility tracked as "unmoved" flags for kings and rooks.

use std::fmt;

use crate::error::FenError;
use crate::side::Side;
use crate::square::Square;

/// Which side of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Toward the h-file (king lands on g1/g8).
    Short,
    /// Toward the a-file (king lands on c1/c8).
    Long,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Short, CastleSide::Long];

    /// Home square of the rook that castles on this side.
    pub const fn rook_home(self, side: Side) -> Square {
        match (side, self) {
            (Side::White, CastleSide::Short) => Square::H1,
            (Side::White, CastleSide::Long) => Square::A1,
            (Side::Black, CastleSide::Short) => Square::H8,
            (Side::Black, CastleSide::Long) => Square::A8,
        }
    }

    /// Where the king lands.
    pub const fn king_target(self, side: Side) -> Square {
        match (side, self) {
            (Side::White, CastleSide::Short) => Square::G1,
            (Side::White, CastleSide::Long) => Square::C1,
            (Side::Black, CastleSide::Short) => Square::G8,
            (Side::Black, CastleSide::Long) => Square::C8,
        }
    }

    /// Where the rook lands.
    pub const fn rook_target(self, side: Side) -> Square {
        match (side, self) {
            (Side::White, CastleSide::Short) => Square::F1,
            (Side::White, CastleSide::Long) => Square::D1,
            (Side::Black, CastleSide::Short) => Square::F8,
            (Side::Black, CastleSide::Long) => Square::D8,
        }
    }
}

/// Home square of each side's king.
pub const fn king_home(side: Side) -> Square {
    match side {
        Side::White => Square::E1,
        Side::Black => Square::E8,
    }
}

/// Six flags recording which kings and rooks have never left (or been
/// captured on) their home squares.
///
/// bit 0 = white king, 1 = white short rook, 2 = white long rook,
/// bit 3 = black king, 4 = black short rook, 5 = black long rook.
///
/// Flags only ever clear during play.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const ALL: CastleRights = CastleRights(0b11_1111);

    pub const WHITE_KING: CastleRights = CastleRights(0b00_0001);
    pub const WHITE_SHORT_ROOK: CastleRights = CastleRights(0b00_0010);
    pub const WHITE_LONG_ROOK: CastleRights = CastleRights(0b00_0100);
    pub const BLACK_KING: CastleRights = CastleRights(0b00_1000);
    pub const BLACK_SHORT_ROOK: CastleRights = CastleRights(0b01_0000);
    pub const BLACK_LONG_ROOK: CastleRights = CastleRights(0b10_0000);

    /// Create castling rights from a raw `u8`, masking to the lower 6 bits.
    #[inline]
    pub const fn new(bits: u8) -> CastleRights {
        CastleRights(bits & 0b11_1111)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn insert(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    #[inline]
    pub const fn remove(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    /// The unmoved-king flag for `side`.
    #[inline]
    pub const fn king(side: Side) -> CastleRights {
        match side {
            Side::White => Self::WHITE_KING,
            Side::Black => Self::BLACK_KING,
        }
    }

    /// The unmoved-rook flag for `side` on `castle` side.
    #[inline]
    pub const fn rook(side: Side, castle: CastleSide) -> CastleRights {
        match (side, castle) {
            (Side::White, CastleSide::Short) => Self::WHITE_SHORT_ROOK,
            (Side::White, CastleSide::Long) => Self::WHITE_LONG_ROOK,
            (Side::Black, CastleSide::Short) => Self::BLACK_SHORT_ROOK,
            (Side::Black, CastleSide::Long) => Self::BLACK_LONG_ROOK,
        }
    }

    /// Whether the flags still permit `side` to castle toward `castle`.
    ///
    /// Board conditions (empty path, safe squares) are checked by the
    /// move generator.
    #[inline]
    pub const fn can_castle(self, side: Side, castle: CastleSide) -> bool {
        self.contains(Self::king(side).insert(Self::rook(side, castle)))
    }

    /// Flags cleared by a move touching `sq` (as source or destination).
    pub const fn revoked_by(sq: Square) -> CastleRights {
        match sq {
            Square::E1 => Self::WHITE_KING,
            Square::H1 => Self::WHITE_SHORT_ROOK,
            Square::A1 => Self::WHITE_LONG_ROOK,
            Square::E8 => Self::BLACK_KING,
            Square::H8 => Self::BLACK_SHORT_ROOK,
            Square::A8 => Self::BLACK_LONG_ROOK,
            _ => Self::NONE,
        }
    }

    /// Rights after a piece moves from `from` to `to`.
    ///
    /// A piece landing on e1/e8 never clears the king flag: that square is
    /// only reachable by another piece once the king has already left.
    #[inline]
    pub const fn after_move(self, from: Square, to: Square) -> CastleRights {
        self.remove(Self::revoked_by(from)).remove(Self::revoked_by(to))
    }

    /// Parse the FEN castling field (e.g. "KQkq", "Kq", "-").
    ///
    /// `K` sets the white king and short rook flags, `Q` the white king and
    /// long rook flags, and likewise for black.
    pub fn from_fen(s: &str) -> Result<CastleRights, FenError> {
        if s == "-" {
            return Ok(CastleRights::NONE);
        }

        let mut rights = CastleRights::NONE;
        for c in s.chars() {
            let (side, castle) = match c {
                'K' => (Side::White, CastleSide::Short),
                'Q' => (Side::White, CastleSide::Long),
                'k' => (Side::Black, CastleSide::Short),
                'q' => (Side::Black, CastleSide::Long),
                _ => return Err(FenError::InvalidCastlingChar { character: c }),
            };
            rights = rights.insert(Self::king(side)).insert(Self::rook(side, castle));
        }
        Ok(rights)
    }

    /// Serialize to the FEN castling field.
    pub fn to_fen(self) -> String {
        let mut s = String::with_capacity(4);
        for (side, castle, c) in [
            (Side::White, CastleSide::Short, 'K'),
            (Side::White, CastleSide::Long, 'Q'),
            (Side::Black, CastleSide::Short, 'k'),
            (Side::Black, CastleSide::Long, 'q'),
        ] {
            if self.can_castle(side, castle) {
                s.push(c);
            }
        }
        if s.is_empty() {
            s.push('-');
        }
        s
    }
}

impl Default for CastleRights {
    fn default() -> Self {
        CastleRights::ALL
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({:06b})", self.0)
    }
}
