//! Chess move representation, bit-packed into a u16.

use std::fmt;

use crate::error::MoveError;
use crate::piece_type::PieceType;
use crate::square::Square;

const TO_MASK: u16 = 0x003F;
const FROM_MASK: u16 = 0x0FC0;
const FROM_SHIFT: u32 = 6;
const FLAG_SHIFT: u32 = 12;

/// What kind of move this is. Occupies the top four bits of a [`Move`].
///
/// Bit 2 (value 4) marks captures, bit 3 (value 8) promotions; the low two
/// bits of a promotion select the piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    Quiet = 0,
    DoublePawnPush = 1,
    KingCastle = 2,
    QueenCastle = 3,
    Capture = 4,
    EnPassant = 5,
    KnightPromotion = 8,
    BishopPromotion = 9,
    RookPromotion = 10,
    QueenPromotion = 11,
    KnightPromotionCapture = 12,
    BishopPromotionCapture = 13,
    RookPromotionCapture = 14,
    QueenPromotionCapture = 15,
}

impl MoveFlag {
    /// Decode a 4-bit flag. Codes 6 and 7 are unused.
    pub const fn from_bits(bits: u8) -> Option<MoveFlag> {
        Some(match bits {
            0 => MoveFlag::Quiet,
            1 => MoveFlag::DoublePawnPush,
            2 => MoveFlag::KingCastle,
            3 => MoveFlag::QueenCastle,
            4 => MoveFlag::Capture,
            5 => MoveFlag::EnPassant,
            8 => MoveFlag::KnightPromotion,
            9 => MoveFlag::BishopPromotion,
            10 => MoveFlag::RookPromotion,
            11 => MoveFlag::QueenPromotion,
            12 => MoveFlag::KnightPromotionCapture,
            13 => MoveFlag::BishopPromotionCapture,
            14 => MoveFlag::RookPromotionCapture,
            15 => MoveFlag::QueenPromotionCapture,
            _ => return None,
        })
    }

    /// Flag for promoting to `kind`, with or without a capture.
    ///
    /// `kind` must be one of [`PieceType::PROMOTIONS`]. Debug builds assert
    /// it; release builds fall back to a queen.
    pub const fn promotion(kind: PieceType, capture: bool) -> MoveFlag {
        debug_assert!(
            matches!(kind, PieceType::Knight | PieceType::Bishop | PieceType::Rook | PieceType::Queen),
            "pawns promote to a knight, bishop, rook or queen"
        );
        match (kind, capture) {
            (PieceType::Knight, false) => MoveFlag::KnightPromotion,
            (PieceType::Bishop, false) => MoveFlag::BishopPromotion,
            (PieceType::Rook, false) => MoveFlag::RookPromotion,
            (_, false) => MoveFlag::QueenPromotion,
            (PieceType::Knight, true) => MoveFlag::KnightPromotionCapture,
            (PieceType::Bishop, true) => MoveFlag::BishopPromotionCapture,
            (PieceType::Rook, true) => MoveFlag::RookPromotionCapture,
            (_, true) => MoveFlag::QueenPromotionCapture,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Captures include en passant and promotion-captures.
    #[inline]
    pub const fn is_capture(self) -> bool {
        self as u8 & 0b0100 != 0
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self as u8 & 0b1000 != 0
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self, MoveFlag::KingCastle | MoveFlag::QueenCastle)
    }

    /// The piece a promotion produces, `None` for every other flag.
    pub const fn promotion_kind(self) -> Option<PieceType> {
        if !self.is_promotion() {
            return None;
        }
        Some(match self as u8 & 0b0011 {
            0 => PieceType::Knight,
            1 => PieceType::Bishop,
            2 => PieceType::Rook,
            _ => PieceType::Queen,
        })
    }
}

/// A chess move encoded in 16 bits.
///
/// ```text
/// bits  0-5:  to-square   (0-63)
/// bits  6-11: from-square (0-63)
/// bits 12-15: MoveFlag
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Placeholder (quiet a1a1) for filling buffers; never generated.
    pub const NULL: Move = Move(0);

    #[inline]
    pub const fn new(flag: MoveFlag, from: Square, to: Square) -> Move {
        Move(
            (flag.bits() as u16) << FLAG_SHIFT
                | (from.index() as u16) << FROM_SHIFT
                | to.index() as u16,
        )
    }

    /// Validate a raw 16-bit encoding.
    pub const fn from_raw(raw: u16) -> Result<Move, MoveError> {
        let flag = (raw >> FLAG_SHIFT) as u8;
        match MoveFlag::from_bits(flag) {
            Some(_) => Ok(Move(raw)),
            None => Err(MoveError::InvalidFlag { flag, raw }),
        }
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn from(self) -> Square {
        Square::from_index_unchecked(((self.0 & FROM_MASK) >> FROM_SHIFT) as u8)
    }

    #[inline]
    pub const fn to(self) -> Square {
        Square::from_index_unchecked((self.0 & TO_MASK) as u8)
    }

    #[inline]
    pub const fn flag(self) -> MoveFlag {
        match MoveFlag::from_bits((self.0 >> FLAG_SHIFT) as u8) {
            Some(flag) => flag,
            // Construction only goes through `new` and `from_raw`.
            None => MoveFlag::Quiet,
        }
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.flag().is_capture()
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.flag().is_promotion()
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.flag().is_castle()
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.flag(), MoveFlag::EnPassant)
    }

    #[inline]
    pub const fn promotion_kind(self) -> Option<PieceType> {
        self.flag().promotion_kind()
    }
}

/// Pack a flag and two squares into a [`Move`].
#[inline]
pub const fn encode_move(flag: MoveFlag, from: Square, to: Square) -> Move {
    Move::new(flag, from, to)
}

/// Split a [`Move`] back into its flag and squares.
#[inline]
pub const fn decode_move(mv: Move) -> (MoveFlag, Square, Square) {
    (mv.flag(), mv.from(), mv.to())
}

/// Coordinate notation, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(kind) = self.promotion_kind() {
            write!(f, "{}", kind.fen_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {:?})", self, self.flag())
    }
}
