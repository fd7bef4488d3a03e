//! Pawn move generation: pushes, captures, promotions and en passant.

use crate::bitboard::{Bitboard, Direction};
use crate::chess_move::{Move, MoveFlag};
use crate::piece_type::PieceType;
use crate::position::Position;
use crate::side::Side;
use crate::square::Square;

use super::MoveList;

/// Push a pawn move, expanding it into all four promotions on the last rank.
#[inline]
fn push_pawn_move(list: &mut MoveList, src: Square, dst: Square, capture: bool, promo_rank: Bitboard) {
    if promo_rank.contains(dst) {
        for kind in PieceType::PROMOTIONS {
            list.push(Move::new(MoveFlag::promotion(kind, capture), src, dst));
        }
    } else {
        let flag = if capture { MoveFlag::Capture } else { MoveFlag::Quiet };
        list.push(Move::new(flag, src, dst));
    }
}

pub(super) fn gen_pawns(pos: &Position, us: Side, list: &mut MoveList) {
    let them = !us;
    let empty = !pos.occupied();
    let enemy = pos.occupancy(them) & pos.move_targets(us);
    let our_pawns = pos.pieces_of(PieceType::Pawn, us);

    let (up, double_rank, promo_rank) = match us {
        Side::White => (Direction::North, Bitboard::RANK_4, Bitboard::RANK_8),
        Side::Black => (Direction::South, Bitboard::RANK_5, Bitboard::RANK_1),
    };

    for src in our_pawns {
        let single = src.bitboard().step(up) & empty;
        if let Some(dst) = single.lsb() {
            push_pawn_move(list, src, dst, false, promo_rank);

            // Only pawns on their start rank can reach the double-push rank.
            if let Some(dst) = (single.step(up) & empty & double_rank).lsb() {
                list.push(Move::new(MoveFlag::DoublePawnPush, src, dst));
            }
        }

        for dst in pos.tables().pawn_attacks(us, src) & enemy {
            push_pawn_move(list, src, dst, true, promo_rank);
        }
    }

    // En passant: only right after an enemy double push, onto the square it skipped.
    let Some(last) = pos.last_move() else {
        return;
    };
    if last.flag() != MoveFlag::DoublePawnPush || !pos.pieces_of(PieceType::Pawn, them).contains(last.to()) {
        return;
    }
    let Some(target) = pos.en_passant_square() else {
        return;
    };
    for src in pos.tables().pawn_attacks(them, target) & our_pawns {
        list.push(Move::new(MoveFlag::EnPassant, src, target));
    }
}

#[cfg(test)]
mod tests {
    use crate::attacks::shared_tables;
    use crate::chess_move::MoveFlag;
    use crate::position::Position;
    use crate::side::Side;
    use crate::square::Square;

    fn pawn_moves(fen: &str, side: Side) -> Vec<(Square, Square, MoveFlag)> {
        let pos = Position::from_fen(shared_tables(), fen).unwrap();
        let pawns = pos.pieces_of(crate::piece_type::PieceType::Pawn, side);
        pos.generate_pseudolegal(side)
            .iter()
            .filter(|m| pawns.contains(m.from()))
            .map(|m| (m.from(), m.to(), m.flag()))
            .collect()
    }

    #[test]
    fn start_rank_pushes() {
        let moves = pawn_moves("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", Side::White);
        assert_eq!(
            moves,
            vec![
                (Square::E2, Square::E3, MoveFlag::Quiet),
                (Square::E2, Square::E4, MoveFlag::DoublePawnPush),
            ]
        );
    }

    #[test]
    fn blocked_pawn_cannot_push() {
        let moves = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", Side::White);
        assert!(moves.is_empty());

        // Blocked on the double-push square only.
        let moves = pawn_moves("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1", Side::White);
        assert_eq!(moves, vec![(Square::E2, Square::E3, MoveFlag::Quiet)]);
    }

    #[test]
    fn black_pawns_move_south() {
        let moves = pawn_moves("4k3/3p4/4P3/8/8/8/8/4K3 b - - 0 1", Side::Black);
        assert!(moves.contains(&(Square::D7, Square::D6, MoveFlag::Quiet)));
        assert!(moves.contains(&(Square::D7, Square::D5, MoveFlag::DoublePawnPush)));
        assert!(moves.contains(&(Square::D7, Square::E6, MoveFlag::Capture)));
        assert_eq!(moves.len(), 3);
    }

    #[test]
    fn captures_do_not_wrap_files() {
        let moves = pawn_moves("4k3/8/8/p6p/P6P/8/8/4K3 w - - 0 1", Side::White);
        assert!(moves.iter().all(|&(_, _, flag)| flag != MoveFlag::Capture));
        let moves = pawn_moves("4k3/8/p7/8/7P/8/8/4K3 w - - 0 1", Side::White);
        assert!(moves.iter().all(|&(_, _, flag)| flag != MoveFlag::Capture));
    }

    #[test]
    fn en_passant_needs_adjacent_file() {
        // The double push landed on d5; only the c5 and e5 pawns may capture.
        let moves = pawn_moves("4k3/8/8/P1PpP2P/8/8/8/4K3 w - d6 0 1", Side::White);
        let ep: Vec<_> = moves
            .iter()
            .filter(|&&(_, _, flag)| flag == MoveFlag::EnPassant)
            .map(|&(from, to, _)| (from, to))
            .collect();
        assert_eq!(ep, vec![(Square::C5, Square::D6), (Square::E5, Square::D6)]);
    }

    #[test]
    fn en_passant_window_closes() {
        let mut pos = Position::from_fen(shared_tables(), "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert!(pos.generate_pseudolegal(Side::White).iter().any(|m| m.is_en_passant()));
        pos.play(Square::E1, Square::E2, None).unwrap();
        pos.play(Square::E8, Square::E7, None).unwrap();
        assert!(pos.generate_pseudolegal(Side::White).iter().all(|m| !m.is_en_passant()));
    }
}
