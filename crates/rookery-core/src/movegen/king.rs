//! King move and castling generation.

use crate::bitboard::Bitboard;
use crate::castle_rights::{CastleSide, king_home};
use crate::chess_move::{Move, MoveFlag};
use crate::piece_type::PieceType;
use crate::position::Position;
use crate::side::Side;
use crate::square::Square;

use super::{MoveList, push_targets};

/// Squares strictly between two squares on the same rank.
fn between_on_rank(a: Square, b: Square) -> Bitboard {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    (lo.index() as u8 + 1..hi.index() as u8)
        .map(Square::from_index_unchecked)
        .fold(Bitboard::EMPTY, Bitboard::with)
}

/// Generate king moves, including castling.
pub(super) fn gen_king(pos: &Position, us: Side, list: &mut MoveList) {
    let them = !us;
    let Some(king_sq) = pos.pieces_of(PieceType::King, us).lsb() else {
        return;
    };

    let targets = pos.tables().king_attacks(king_sq) & pos.move_targets(us);
    push_targets(list, king_sq, targets, pos.occupancy(them));

    let home = king_home(us);
    let rights = pos.castle_rights();
    if king_sq != home || pos.is_square_attacked(home, them) {
        return;
    }

    let occupied = pos.occupied();
    for castle in CastleSide::ALL {
        if !rights.can_castle(us, castle) {
            continue;
        }
        let rook_home = castle.rook_home(us);
        if !pos.pieces_of(PieceType::Rook, us).contains(rook_home) {
            continue;
        }
        if (between_on_rank(home, rook_home) & occupied).is_nonempty() {
            continue;
        }
        // The rook's landing square is the one the king passes over.
        let passed = castle.rook_target(us);
        let landing = castle.king_target(us);
        if pos.is_square_attacked(passed, them) || pos.is_square_attacked(landing, them) {
            continue;
        }
        let flag = match castle {
            CastleSide::Short => MoveFlag::KingCastle,
            CastleSide::Long => MoveFlag::QueenCastle,
        };
        list.push(Move::new(flag, home, landing));
    }
}
