//! Attack generation: leaper tables and magic sliding-attack tables.

mod magic;
mod magic_data;
mod tables;

use tracing::debug;

use crate::bitboard::{Bitboard, Direction};
use crate::error::{SliderFamily, TableError};
use crate::side::Side;
use crate::square::Square;

pub use self::magic::MagicEntry;

/// Number of slots in the shared rook attack table.
pub const ROOK_TABLE_SIZE: usize = 102_400;
/// Number of slots in the shared bishop attack table.
pub const BISHOP_TABLE_SIZE: usize = 5_248;

/// Every precomputed attack set the engine needs.
///
/// Built once by [`build_tables`] and immutable afterwards; positions share it
/// through an `Arc`.
pub struct AttackTables {
    knight: [Bitboard; Square::COUNT],
    king: [Bitboard; Square::COUNT],
    pawn: [[Bitboard; Square::COUNT]; Side::COUNT],
    rook_magics: [MagicEntry; Square::COUNT],
    bishop_magics: [MagicEntry; Square::COUNT],
    rook_attacks: Vec<Bitboard>,
    bishop_attacks: Vec<Bitboard>,
}

/// Build all attack tables from the precomputed magic constants.
///
/// # Errors
///
/// Returns a [`TableError`] if the magic data maps two different attack sets
/// to the same slot. That means the constants are corrupt; callers should
/// treat it as fatal.
pub fn build_tables() -> Result<AttackTables, TableError> {
    AttackTables::from_magics(&magic_data::ROOK_MAGICS, &magic_data::BISHOP_MAGICS)
}

impl AttackTables {
    pub(crate) fn from_magics(
        rook_magics: &[u64; 64],
        bishop_magics: &[u64; 64],
    ) -> Result<AttackTables, TableError> {
        let (rook_entries, rook_len) = magic::entries(rook_magics, &Direction::ORTHOGONAL);
        let (bishop_entries, bishop_len) = magic::entries(bishop_magics, &Direction::DIAGONAL);

        let rook_attacks =
            magic::populate(SliderFamily::Rook, &rook_entries, rook_len, &Direction::ORTHOGONAL)?;
        let bishop_attacks =
            magic::populate(SliderFamily::Bishop, &bishop_entries, bishop_len, &Direction::DIAGONAL)?;

        debug!(
            rook_slots = rook_attacks.len(),
            bishop_slots = bishop_attacks.len(),
            "attack tables built"
        );

        Ok(AttackTables {
            knight: tables::knight_table(),
            king: tables::king_table(),
            pawn: tables::pawn_table(),
            rook_magics: rook_entries,
            bishop_magics: bishop_entries,
            rook_attacks,
            bishop_attacks,
        })
    }

    #[inline]
    pub fn knight_attacks(&self, sq: Square) -> Bitboard {
        self.knight[sq.index()]
    }

    #[inline]
    pub fn king_attacks(&self, sq: Square) -> Bitboard {
        self.king[sq.index()]
    }

    /// Squares a pawn of `side` standing on `sq` would capture on.
    #[inline]
    pub fn pawn_attacks(&self, side: Side, sq: Square) -> Bitboard {
        self.pawn[side.index()][sq.index()]
    }

    #[inline]
    pub fn rook_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.rook_attacks[self.rook_magics[sq.index()].index(occupied)]
    }

    #[inline]
    pub fn bishop_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.bishop_attacks[self.bishop_magics[sq.index()].index(occupied)]
    }

    #[inline]
    pub fn queen_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.rook_attacks(sq, occupied) | self.bishop_attacks(sq, occupied)
    }

    pub fn rook_magic(&self, sq: Square) -> &MagicEntry {
        &self.rook_magics[sq.index()]
    }

    pub fn bishop_magic(&self, sq: Square) -> &MagicEntry {
        &self.bishop_magics[sq.index()]
    }
}

/// One table set per test binary; building it takes a few milliseconds.
#[cfg(test)]
pub(crate) fn shared_tables() -> std::sync::Arc<AttackTables> {
    use std::sync::{Arc, OnceLock};

    static TABLES: OnceLock<Arc<AttackTables>> = OnceLock::new();
    TABLES
        .get_or_init(|| Arc::new(build_tables().expect("bundled magics are collision-free")))
        .clone()
}

impl std::fmt::Debug for AttackTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttackTables")
            .field("rook_slots", &self.rook_attacks.len())
            .field("bishop_slots", &self.bishop_attacks.len())
            .finish_non_exhaustive()
    }
}
