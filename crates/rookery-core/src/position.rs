//! The chess position: piece placement, castling-rights stack and move history.

use std::fmt;
use std::sync::Arc;

use crate::attacks::AttackTables;
use crate::bitboard::Bitboard;
use crate::castle_rights::CastleRights;
use crate::chess_move::{Move, MoveFlag};
use crate::error::BoardError;
use crate::piece::Piece;
use crate::piece_type::PieceType;
use crate::side::Side;
use crate::square::Square;

/// One executed move together with what it needs to be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub mv: Move,
    /// Type of the piece that moved (a pawn for promotions).
    pub moved: PieceType,
    /// Type of the piece removed by the move, if any.
    pub captured: Option<PieceType>,
}

/// Complete, mutable position state.
///
/// Moves are applied in place with [`make_move`](Position::make_move) and
/// reverted with [`unmake_move`](Position::unmake_move). The side to move, the
/// en passant window and the halfmove clock are all derived from the history
/// rather than stored.
#[derive(Clone)]
pub struct Position {
    tables: Arc<AttackTables>,
    /// Bitboard for each side, indexed by [`Side::index()`].
    sides: [Bitboard; Side::COUNT],
    /// Bitboard for each piece type (both sides), indexed by [`PieceType::index()`].
    pieces: [Bitboard; PieceType::COUNT],
    /// One frame per executed move plus the initial one; the last is current.
    castling: Vec<CastleRights>,
    history: Vec<HistoryEntry>,
    /// Side to move before any move in `history`.
    start_side: Side,
    /// The move that led to the initial placement, if known (FEN en passant).
    prior_move: Option<Move>,
    /// Halfmove clock and fullmove number of the initial placement.
    start_clocks: (u16, u16),
}

/// Create a position with the standard starting layout.
pub fn new_position(tables: Arc<AttackTables>) -> Position {
    Position::new(tables)
}

impl Position {
    /// Standard starting layout, full castling rights, White to move.
    pub fn new(tables: Arc<AttackTables>) -> Position {
        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        let mut pieces = [Bitboard::EMPTY; PieceType::COUNT];
        pieces[PieceType::Pawn.index()] = Bitboard::RANK_2 | Bitboard::RANK_7;
        for (file, kind) in (0u8..).zip(back_rank) {
            let white = Square::from_index_unchecked(file);
            let black = Square::from_index_unchecked(56 + file);
            pieces[kind.index()] = pieces[kind.index()].with(white).with(black);
        }

        let white = Bitboard::RANK_1 | Bitboard::RANK_2;
        let black = Bitboard::RANK_7 | Bitboard::RANK_8;

        Position::from_parts(
            tables,
            [white, black],
            pieces,
            CastleRights::ALL,
            Side::White,
            None,
            (0, 1),
        )
    }

    /// Assemble a position from raw components. Used by FEN parsing.
    pub(crate) fn from_parts(
        tables: Arc<AttackTables>,
        sides: [Bitboard; Side::COUNT],
        pieces: [Bitboard; PieceType::COUNT],
        castling: CastleRights,
        start_side: Side,
        prior_move: Option<Move>,
        start_clocks: (u16, u16),
    ) -> Position {
        Position {
            tables,
            sides,
            pieces,
            castling: vec![castling],
            history: Vec::new(),
            start_side,
            prior_move,
            start_clocks,
        }
    }

    /// The shared attack tables this position looks up.
    #[inline]
    pub fn tables(&self) -> &AttackTables {
        &self.tables
    }

    /// Squares occupied by `side`.
    #[inline]
    pub fn occupancy(&self, side: Side) -> Bitboard {
        self.sides[side.index()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.sides[Side::White.index()] | self.sides[Side::Black.index()]
    }

    /// Squares holding `kind`, both sides.
    #[inline]
    pub fn pieces(&self, kind: PieceType) -> Bitboard {
        self.pieces[kind.index()]
    }

    /// Squares holding `kind` owned by `side`.
    #[inline]
    pub fn pieces_of(&self, kind: PieceType, side: Side) -> Bitboard {
        self.pieces[kind.index()] & self.sides[side.index()]
    }

    pub fn piece_type_at(&self, sq: Square) -> Option<PieceType> {
        PieceType::ALL
            .into_iter()
            .find(|&kind| self.pieces[kind.index()].contains(sq))
    }

    pub fn side_at(&self, sq: Square) -> Option<Side> {
        Side::ALL
            .into_iter()
            .find(|&side| self.sides[side.index()].contains(sq))
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        Some(Piece::new(self.piece_type_at(sq)?, self.side_at(sq)?))
    }

    /// Square of `side`'s king.
    ///
    /// # Panics
    ///
    /// Panics if `side` has no king, which [`validate`](Position::validate)
    /// rules out.
    pub fn king_square(&self, side: Side) -> Square {
        self.pieces_of(PieceType::King, side)
            .lsb()
            .expect("position must have a king for each side")
    }

    /// Current castling flags.
    #[inline]
    pub fn castle_rights(&self) -> CastleRights {
        *self.castling.last().expect("castling stack is never empty")
    }

    /// Moves made since the initial placement, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = Move> + '_ {
        self.history.iter().map(|entry| entry.mv)
    }

    pub fn history_entries(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// The move that produced the current placement, including one implied by
    /// a FEN en passant field.
    pub fn last_move(&self) -> Option<Move> {
        match self.history.last() {
            Some(entry) => Some(entry.mv),
            None => self.prior_move,
        }
    }

    /// The side to move: the starting side, flipped once per move made.
    #[inline]
    pub fn side_to_move(&self) -> Side {
        if self.history.len() % 2 == 0 {
            self.start_side
        } else {
            !self.start_side
        }
    }

    /// Square skipped by the last move when it was a double pawn push.
    pub fn en_passant_square(&self) -> Option<Square> {
        let mv = self.last_move()?;
        if mv.flag() != MoveFlag::DoublePawnPush {
            return None;
        }
        Some(Square::from_index_unchecked(((mv.from().index() + mv.to().index()) / 2) as u8))
    }

    /// Plies since the last capture or pawn move. Saturates at `u16::MAX`.
    pub fn halfmove_clock(&self) -> u16 {
        let quiet = self
            .history
            .iter()
            .rev()
            .take_while(|entry| entry.captured.is_none() && entry.moved != PieceType::Pawn)
            .count();
        let clock = if quiet == self.history.len() {
            quiet + usize::from(self.start_clocks.0)
        } else {
            quiet
        };
        u16::try_from(clock).unwrap_or(u16::MAX)
    }

    /// Starts at 1 and increments after each Black move. Saturates at
    /// `u16::MAX`.
    pub fn fullmove_number(&self) -> u16 {
        let black_first = usize::from(self.start_side == Side::Black);
        let number = usize::from(self.start_clocks.1) + (self.history.len() + black_first) / 2;
        u16::try_from(number).unwrap_or(u16::MAX)
    }

    /// Every square's occupant, a1 first.
    pub fn occupancy_snapshot(&self) -> [Option<Piece>; Square::COUNT] {
        let mut snapshot = [None; Square::COUNT];
        for (sq, slot) in Square::all().zip(snapshot.iter_mut()) {
            *slot = self.piece_at(sq);
        }
        snapshot
    }

    /// XOR a piece onto or off a square.
    #[inline]
    pub(crate) fn toggle(&mut self, sq: Square, kind: PieceType, side: Side) {
        let mask = sq.bitboard();
        self.pieces[kind.index()] ^= mask;
        self.sides[side.index()] ^= mask;
    }

    pub(crate) fn push_history(&mut self, entry: HistoryEntry, rights: CastleRights) {
        self.history.push(entry);
        self.castling.push(rights);
    }

    /// Pop the newest history entry and its rights frame.
    pub(crate) fn pop_history(&mut self) -> Option<HistoryEntry> {
        let entry = self.history.pop()?;
        self.castling.pop();
        debug_assert!(!self.castling.is_empty());
        Some(entry)
    }

    /// Check the structural invariants of the placement.
    pub fn validate(&self) -> Result<(), BoardError> {
        for side in Side::ALL {
            let count = self.pieces_of(PieceType::King, side).count();
            if count != 1 {
                let side = match side {
                    Side::White => "white",
                    Side::Black => "black",
                };
                return Err(BoardError::InvalidKingCount { side, count });
            }
        }

        let back_ranks = Bitboard::RANK_1 | Bitboard::RANK_8;
        if (self.pieces(PieceType::Pawn) & back_ranks).is_nonempty() {
            return Err(BoardError::PawnsOnBackRank);
        }

        for i in 0..PieceType::COUNT {
            for j in (i + 1)..PieceType::COUNT {
                if (self.pieces[i] & self.pieces[j]).is_nonempty() {
                    return Err(BoardError::OverlappingPieces);
                }
            }
        }

        if (self.sides[0] & self.sides[1]).is_nonempty() {
            return Err(BoardError::OverlappingSides);
        }

        let all_pieces = self.pieces.iter().fold(Bitboard::EMPTY, |acc, &bb| acc | bb);
        if all_pieces != self.occupied() {
            return Err(BoardError::InconsistentSides);
        }

        Ok(())
    }

    /// Return a pretty-printable wrapper for this position.
    pub fn pretty(&self) -> PrettyPosition<'_> {
        PrettyPosition(self)
    }
}

/// Positions compare by placement, rights, history and starting state; the
/// shared tables are ignored.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.sides == other.sides
            && self.pieces == other.pieces
            && self.castling == other.castling
            && self.history == other.history
            && self.start_side == other.start_side
            && self.prior_move == other.prior_move
            && self.start_clocks == other.start_clocks
    }
}

impl Eq for Position {}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{}\")", self.to_fen())
    }
}

/// Wrapper for printing a position as an 8x8 grid, rank 8 on top.
pub struct PrettyPosition<'a>(&'a Position);

impl fmt::Display for PrettyPosition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0.occupancy_snapshot();
        for rank in (0..8usize).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0..8usize {
                let c = snapshot[rank * 8 + file].map_or('.', Piece::fen_char);
                if file < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
