//! Attack detection and in-place move execution with exact undo.

use tracing::debug;

use crate::bitboard::Bitboard;
use crate::castle_rights::CastleSide;
use crate::chess_move::{Move, MoveFlag};
use crate::error::{MoveError, PositionError};
use crate::piece_type::PieceType;
use crate::position::{HistoryEntry, Position};
use crate::side::Side;
use crate::square::Square;

/// Outcome of a position for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    /// No legal moves and in check.
    Checkmate,
    /// No legal moves, not in check.
    Stalemate,
}

/// Square of the pawn removed by an en passant capture: the destination file
/// on the mover's own rank.
#[inline]
fn en_passant_victim(mv: Move) -> Square {
    Square::from_index_unchecked(mv.from().rank() * 8 + mv.to().file())
}

#[inline]
fn castle_side(flag: MoveFlag) -> Option<CastleSide> {
    match flag {
        MoveFlag::KingCastle => Some(CastleSide::Short),
        MoveFlag::QueenCastle => Some(CastleSide::Long),
        _ => None,
    }
}

impl Position {
    /// Return `true` if `sq` is attacked by any piece of `by`.
    ///
    /// Uses reverse-attack lookup: attack patterns are cast from the target
    /// square and intersected with the attacker's pieces of each type.
    pub fn is_square_attacked(&self, sq: Square, by: Side) -> bool {
        self.is_square_attacked_with_occ(sq, by, self.occupied())
    }

    /// Like [`is_square_attacked`](Position::is_square_attacked), with a
    /// custom occupancy for slider rays.
    pub(crate) fn is_square_attacked_with_occ(&self, sq: Square, by: Side, occupied: Bitboard) -> bool {
        let tables = self.tables();
        let them = self.occupancy(by);

        if (tables.knight_attacks(sq) & them & self.pieces(PieceType::Knight)).is_nonempty() {
            return true;
        }
        if (tables.king_attacks(sq) & them & self.pieces(PieceType::King)).is_nonempty() {
            return true;
        }
        // A pawn of `by` attacks `sq` iff a pawn of the other side on `sq`
        // would attack the pawn's square.
        if (tables.pawn_attacks(!by, sq) & them & self.pieces(PieceType::Pawn)).is_nonempty() {
            return true;
        }

        let rook_queen = (self.pieces(PieceType::Rook) | self.pieces(PieceType::Queen)) & them;
        if (tables.rook_attacks(sq, occupied) & rook_queen).is_nonempty() {
            return true;
        }
        let bishop_queen = (self.pieces(PieceType::Bishop) | self.pieces(PieceType::Queen)) & them;
        (tables.bishop_attacks(sq, occupied) & bishop_queen).is_nonempty()
    }

    /// Whether `side`'s king is attacked.
    pub fn in_check(&self, side: Side) -> bool {
        self.is_square_attacked(self.king_square(side), !side)
    }

    /// Apply `mv` in place.
    ///
    /// The move must come from the generator for the side owning its source
    /// square.
    ///
    /// # Panics
    ///
    /// Panics if the source square is empty, or if a capture lands on
    /// anything but an enemy non-king piece. Either would leave the history
    /// out of step with the board.
    pub fn make_move(&mut self, mv: Move) {
        let (flag, from, to) = (mv.flag(), mv.from(), mv.to());
        let Some(piece) = self.piece_at(from) else {
            panic!("make_move {mv}: no piece on {from}");
        };
        let (moved, us) = (piece.kind(), piece.side());
        let them = !us;

        let captured = if flag == MoveFlag::EnPassant {
            self.toggle(en_passant_victim(mv), PieceType::Pawn, them);
            Some(PieceType::Pawn)
        } else if flag.is_capture() {
            let victim = match self.piece_type_at(to) {
                Some(kind) if kind != PieceType::King && self.occupancy(them).contains(to) => kind,
                other => panic!("make_move {mv}: cannot capture {other:?} on {to}"),
            };
            self.toggle(to, victim, them);
            Some(victim)
        } else {
            None
        };

        self.toggle(from, moved, us);
        self.toggle(to, flag.promotion_kind().unwrap_or(moved), us);

        if let Some(castle) = castle_side(flag) {
            self.toggle(castle.rook_home(us), PieceType::Rook, us);
            self.toggle(castle.rook_target(us), PieceType::Rook, us);
        }

        let rights = self.castle_rights().after_move(from, to);
        self.push_history(HistoryEntry { mv, moved, captured }, rights);
    }

    /// Revert the most recent move and return it.
    ///
    /// # Errors
    ///
    /// [`PositionError::EmptyHistory`] if no move has been made.
    pub fn unmake_move(&mut self) -> Result<Move, PositionError> {
        let entry = self.pop_history().ok_or(PositionError::EmptyHistory)?;
        let HistoryEntry { mv, moved, captured } = entry;
        let (flag, from, to) = (mv.flag(), mv.from(), mv.to());

        let us = self
            .side_at(to)
            .expect("destination of the last move is occupied by the mover");
        let them = !us;

        if let Some(castle) = castle_side(flag) {
            self.toggle(castle.rook_target(us), PieceType::Rook, us);
            self.toggle(castle.rook_home(us), PieceType::Rook, us);
        }

        self.toggle(to, flag.promotion_kind().unwrap_or(moved), us);
        self.toggle(from, moved, us);

        if let Some(kind) = captured {
            let square = if flag == MoveFlag::EnPassant { en_passant_victim(mv) } else { to };
            self.toggle(square, kind, them);
        }

        Ok(mv)
    }

    /// Make the legal move matching `from`, `to` and `promotion` for the side
    /// to move.
    ///
    /// # Errors
    ///
    /// [`MoveError::Illegal`] if no legal move matches; the position is left
    /// untouched.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<Move, MoveError> {
        let side = self.side_to_move();
        let legal = self.generate_legal_moves(side);
        let found = legal
            .iter()
            .copied()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion_kind() == promotion);

        match found {
            Some(mv) => {
                self.make_move(mv);
                Ok(mv)
            }
            None => {
                debug!(%from, %to, ?promotion, %side, "rejected illegal move");
                Err(MoveError::Illegal { from, to })
            }
        }
    }

    /// Checkmate, stalemate or still playing, from `side`'s point of view.
    pub fn status(&mut self, side: Side) -> GameStatus {
        if !self.generate_legal_moves(side).is_empty() {
            GameStatus::Ongoing
        } else if self.in_check(side) {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        }
    }
}
