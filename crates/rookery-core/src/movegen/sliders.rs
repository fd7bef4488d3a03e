//! Sliding piece (bishop, rook, queen) move generation.

use crate::attacks::AttackTables;
use crate::bitboard::Bitboard;
use crate::piece_type::PieceType;
use crate::position::Position;
use crate::side::Side;
use crate::square::Square;

use super::{MoveList, push_targets};

pub(super) fn gen_sliders(pos: &Position, us: Side, list: &mut MoveList) {
    gen_slider_type(pos, us, list, PieceType::Bishop, AttackTables::bishop_attacks);
    gen_slider_type(pos, us, list, PieceType::Rook, AttackTables::rook_attacks);
    gen_slider_type(pos, us, list, PieceType::Queen, AttackTables::queen_attacks);
}

fn gen_slider_type(
    pos: &Position,
    us: Side,
    list: &mut MoveList,
    kind: PieceType,
    attacks_fn: impl Fn(&AttackTables, Square, Bitboard) -> Bitboard,
) {
    let occupied = pos.occupied();
    let targets = pos.move_targets(us);
    let enemy = pos.occupancy(!us);

    for src in pos.pieces_of(kind, us) {
        push_targets(list, src, attacks_fn(pos.tables(), src, occupied) & targets, enemy);
    }
}
