//! Error types for table construction, position handling, moves and FEN parsing.

use crate::square::Square;

/// Which sliding-piece family a magic table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderFamily {
    Rook,
    Bishop,
}

impl std::fmt::Display for SliderFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SliderFamily::Rook => write!(f, "rook"),
            SliderFamily::Bishop => write!(f, "bishop"),
        }
    }
}

/// The precomputed magic data is corrupt. Raised only while building tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// Two blocker subsets with different attack sets hashed to the same slot.
    #[error("{family} magic for {square} maps distinct blocker sets to slot {slot}")]
    MagicCollision {
        family: SliderFamily,
        square: Square,
        slot: usize,
    },
    /// A magic index fell outside the shared attack table.
    #[error("{family} magic for {square} produced slot {slot}, table holds {len}")]
    IndexOutOfRange {
        family: SliderFamily,
        square: Square,
        slot: usize,
        len: usize,
    },
}

/// Misuse of the make/unmake protocol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// `unmake_move` was called with nothing to undo.
    #[error("no move to unmake: history is empty")]
    EmptyHistory,
}

/// Errors about individual moves.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The requested move is not among the legal moves of the side to move.
    #[error("illegal move {from}{to}")]
    Illegal { from: Square, to: Square },
    /// A raw encoded move carries one of the unused flag codes.
    #[error("invalid move flag {flag} in encoded move {raw:#06x}")]
    InvalidFlag { flag: u8, raw: u16 },
}

/// Structural problems found by [`Position::validate`](crate::Position::validate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("expected 1 king for {side}, found {count}")]
    InvalidKingCount { side: &'static str, count: u32 },
    #[error("pawns found on back rank")]
    PawnsOnBackRank,
    #[error("overlapping piece bitboards")]
    OverlappingPieces,
    #[error("white and black side bitboards overlap")]
    OverlappingSides,
    #[error("piece bitboards do not match side bitboards")]
    InconsistentSides,
}

/// Errors from parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("expected 4 to 6 FEN fields, found {found}")]
    WrongFieldCount { found: usize },
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount { found: usize },
    /// `rank_index` counts from the top of the board (0 = rank 8).
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength { rank_index: usize, length: usize },
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar { character: char },
    #[error("invalid active side: \"{found}\"")]
    InvalidSide { found: String },
    #[error("invalid castling character: '{character}'")]
    InvalidCastlingChar { character: char },
    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant { found: String },
    #[error("invalid {field}: \"{found}\"")]
    InvalidMoveCounter { field: &'static str, found: String },
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardError),
}
