//! Magic bitboard tables for sliding piece attack generation.

use tracing::error;

use crate::bitboard::{Bitboard, Direction};
use crate::error::{SliderFamily, TableError};
use crate::square::Square;

/// Per-square hashing data for one slider family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicEntry {
    /// Blocker squares that can change the attack set (board edges excluded).
    pub mask: Bitboard,
    pub magic: u64,
    pub shift: u8,
    /// Base index of this square's block in the shared attack table.
    pub offset: u32,
}

impl MagicEntry {
    const EMPTY: MagicEntry = MagicEntry { mask: Bitboard::EMPTY, magic: 0, shift: 64, offset: 0 };

    /// Slot in the shared attack table for the given occupancy.
    #[inline(always)]
    pub fn index(&self, occupied: Bitboard) -> usize {
        let hash = (occupied & self.mask) * self.magic;
        self.offset as usize + (hash >> self.shift) as usize
    }
}

/// Cast rays from `sq` in each of `dirs`, stopping at the board edge or on the
/// first blocker (which is included).
pub(crate) fn slide(sq: Square, blockers: Bitboard, dirs: &[Direction]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &dir in dirs {
        let mut ray = sq.bitboard();
        loop {
            ray = ray.step(dir);
            if ray.is_empty() {
                break;
            }
            attacks |= ray;
            if (ray & blockers).is_nonempty() {
                break;
            }
        }
    }
    attacks
}

/// Relevant-occupancy mask: the empty-board rays with the final edge square of
/// each ray removed.
pub(crate) fn relevant_mask(sq: Square, dirs: &[Direction]) -> Bitboard {
    dirs.iter().fold(Bitboard::EMPTY, |mask, &dir| {
        mask | (slide(sq, Bitboard::EMPTY, &[dir]) & !dir.border())
    })
}

/// Derive masks, shifts and offsets from the multipliers.
///
/// Returns the entries and the total table length they address.
pub(crate) fn entries(magics: &[u64; 64], dirs: &[Direction]) -> ([MagicEntry; 64], usize) {
    let mut entries = [MagicEntry::EMPTY; 64];
    let mut offset = 0usize;
    for (sq, entry) in Square::all().zip(entries.iter_mut()) {
        let mask = relevant_mask(sq, dirs);
        *entry = MagicEntry {
            mask,
            magic: magics[sq.index()],
            shift: 64 - mask.count() as u8,
            offset: offset as u32,
        };
        offset += 1usize << mask.count();
    }
    (entries, offset)
}

/// Fill the shared attack table by visiting every blocker subset of every
/// square's mask (carry-rippler enumeration).
pub(crate) fn populate(
    family: SliderFamily,
    entries: &[MagicEntry; 64],
    len: usize,
    dirs: &[Direction],
) -> Result<Vec<Bitboard>, TableError> {
    let mut table = vec![Bitboard::EMPTY; len];
    let mut filled = vec![false; len];

    for (square, entry) in Square::all().zip(entries.iter()) {
        let mask = entry.mask.inner();
        let mut subset = 0u64;
        loop {
            let blockers = Bitboard::new(subset);
            let attacks = slide(square, blockers, dirs);
            let slot = entry.index(blockers);
            if slot >= len {
                error!(%family, %square, slot, len, "magic index out of range");
                return Err(TableError::IndexOutOfRange { family, square, slot, len });
            }
            if filled[slot] && table[slot] != attacks {
                error!(%family, %square, slot, "destructive magic collision");
                return Err(TableError::MagicCollision { family, square, slot });
            }
            table[slot] = attacks;
            filled[slot] = true;

            subset = subset.wrapping_sub(mask) & mask;
            if subset == 0 {
                break;
            }
        }
    }

    Ok(table)
}
