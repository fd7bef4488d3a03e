//! Pseudo-legal and legal move generation.

mod king;
mod knights;
mod pawns;
mod sliders;

use crate::bitboard::Bitboard;
use crate::chess_move::{Move, MoveFlag};
use crate::piece_type::PieceType;
use crate::position::Position;
use crate::side::Side;
use crate::square::Square;

use self::king::gen_king;
use self::knights::gen_knights;
use self::pawns::gen_pawns;
use self::sliders::gen_sliders;

/// Stack-allocated buffer for generated moves. Capacity 256 covers the theoretical max of 218.
pub struct MoveList {
    moves: [Move; 256],
    len: u16,
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList {
            moves: [Move::NULL; 256],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!((self.len as usize) < 256);
        self.moves[self.len as usize] = mv;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len as usize]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;
    #[inline]
    fn index(&self, index: usize) -> &Move {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// Push one move per square in `targets`, flagged as a capture when the square
/// holds an enemy piece.
#[inline]
fn push_targets(list: &mut MoveList, from: Square, targets: Bitboard, enemy: Bitboard) {
    for to in targets {
        let flag = if enemy.contains(to) { MoveFlag::Capture } else { MoveFlag::Quiet };
        list.push(Move::new(flag, from, to));
    }
}

impl Position {
    /// Every move `side` could make ignoring whether its own king is left in
    /// check. Castling already accounts for attacked squares; kings are never
    /// targeted.
    pub fn generate_pseudolegal(&self, side: Side) -> MoveList {
        let mut list = MoveList::new();
        gen_pawns(self, side, &mut list);
        gen_knights(self, side, &mut list);
        gen_sliders(self, side, &mut list);
        gen_king(self, side, &mut list);
        list
    }

    /// Pseudo-legal moves of `side` that do not leave its king attacked.
    ///
    /// Each candidate is made, tested and unmade; the position is identical
    /// afterwards.
    pub fn generate_legal_moves(&mut self, side: Side) -> MoveList {
        let pseudo = self.generate_pseudolegal(side);
        let mut legal = MoveList::new();
        for &mv in &pseudo {
            self.make_move(mv);
            if !self.in_check(side) {
                legal.push(mv);
            }
            self.unmake_move().expect("trial move was just made");
        }
        legal
    }

    /// Legal moves for White and for Black.
    pub fn generate_legal(&mut self) -> (MoveList, MoveList) {
        (self.generate_legal_moves(Side::White), self.generate_legal_moves(Side::Black))
    }

    /// Target mask shared by every generator: not own pieces, never a king.
    #[inline]
    pub(crate) fn move_targets(&self, side: Side) -> Bitboard {
        !(self.occupancy(side) | self.pieces(PieceType::King))
    }
}
