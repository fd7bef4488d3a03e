//! Knight move generation.

use crate::piece_type::PieceType;
use crate::position::Position;
use crate::side::Side;

use super::{MoveList, push_targets};

pub(super) fn gen_knights(pos: &Position, us: Side, list: &mut MoveList) {
    let targets = pos.move_targets(us);
    let enemy = pos.occupancy(!us);

    for src in pos.pieces_of(PieceType::Knight, us) {
        push_targets(list, src, pos.tables().knight_attacks(src) & targets, enemy);
    }
}
