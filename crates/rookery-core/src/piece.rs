//! A piece type together with the side that owns it.

use std::fmt;

use crate::piece_type::PieceType;
use crate::side::Side;

/// A sided piece, packed into one byte: bits 0-2 hold the [`PieceType`],
/// bit 3 the [`Side`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece(u8);

impl Piece {
    #[inline]
    pub const fn new(kind: PieceType, side: Side) -> Piece {
        Piece((side as u8) << 3 | kind as u8)
    }

    /// Parse a FEN letter: uppercase is White, lowercase Black.
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceType::from_fen_char(c)?;
        let side = if c.is_ascii_uppercase() { Side::White } else { Side::Black };
        Some(Piece::new(kind, side))
    }

    #[inline]
    pub const fn kind(self) -> PieceType {
        match self.0 & 0x07 {
            0 => PieceType::Pawn,
            1 => PieceType::Knight,
            2 => PieceType::Bishop,
            3 => PieceType::Rook,
            4 => PieceType::Queen,
            _ => PieceType::King,
        }
    }

    #[inline]
    pub const fn side(self) -> Side {
        if self.0 >> 3 == 0 { Side::White } else { Side::Black }
    }

    /// FEN letter, uppercase for White.
    pub fn fen_char(self) -> char {
        match self.side() {
            Side::White => self.kind().fen_char().to_ascii_uppercase(),
            Side::Black => self.kind().fen_char(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Piece({:?} {:?})", self.side(), self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::Piece;
    use crate::piece_type::PieceType;
    use crate::side::Side;

    #[test]
    fn pack_roundtrip() {
        for side in Side::ALL {
            for kind in PieceType::ALL {
                let piece = Piece::new(kind, side);
                assert_eq!(piece.kind(), kind);
                assert_eq!(piece.side(), side);
            }
        }
    }

    #[test]
    fn fen_letters() {
        assert_eq!(Piece::from_fen_char('K'), Some(Piece::new(PieceType::King, Side::White)));
        assert_eq!(Piece::from_fen_char('n'), Some(Piece::new(PieceType::Knight, Side::Black)));
        assert_eq!(Piece::from_fen_char('x'), None);
        assert_eq!(Piece::new(PieceType::Queen, Side::White).to_string(), "Q");
        assert_eq!(Piece::new(PieceType::Pawn, Side::Black).to_string(), "p");
    }

    #[test]
    fn debug_names_both_halves() {
        let piece = Piece::new(PieceType::Rook, Side::Black);
        assert_eq!(format!("{piece:?}"), "Piece(Black Rook)");
    }
}
