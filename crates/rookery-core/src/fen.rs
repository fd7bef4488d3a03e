//! FEN string parsing and serialization for [`Position`].

use std::fmt;
use std::sync::Arc;

use crate::attacks::AttackTables;
use crate::bitboard::Bitboard;
use crate::castle_rights::CastleRights;
use crate::chess_move::{Move, MoveFlag};
use crate::error::FenError;
use crate::piece::Piece;
use crate::piece_type::PieceType;
use crate::position::Position;
use crate::side::Side;
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse the piece placement field into side and piece bitboards.
fn parse_placement(
    field: &str,
) -> Result<([Bitboard; Side::COUNT], [Bitboard; PieceType::COUNT]), FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    let mut pieces = [Bitboard::EMPTY; PieceType::COUNT];
    let mut sides = [Bitboard::EMPTY; Side::COUNT];

    for (rank_index, rank_str) in ranks.iter().enumerate() {
        // FEN ranks go from 8 to 1 (top to bottom)
        let rank = 7 - rank_index as u8;
        let mut file: u8 = 0;

        for c in rank_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                if !(1..=8).contains(&digit) {
                    return Err(FenError::InvalidPieceChar { character: c });
                }
                file = file.saturating_add(digit as u8);
                continue;
            }

            let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
            let sq = Square::from_coords(file, rank).ok_or(FenError::BadRankLength {
                rank_index,
                length: file as usize + 1,
            })?;
            pieces[piece.kind().index()] |= sq.bitboard();
            sides[piece.side().index()] |= sq.bitboard();
            file += 1;
        }

        if file != 8 {
            return Err(FenError::BadRankLength {
                rank_index,
                length: file as usize,
            });
        }
    }

    Ok((sides, pieces))
}

/// Rebuild the double push implied by an en passant target square.
fn implied_double_push(
    field: &str,
    side_to_move: Side,
    sides: &[Bitboard; Side::COUNT],
    pieces: &[Bitboard; PieceType::COUNT],
) -> Result<Option<Move>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    let invalid = || FenError::InvalidEnPassant { found: field.to_string() };
    let target = Square::from_algebraic(field).ok_or_else(invalid)?;

    // The pawn that just moved belongs to the side not on move.
    let mover = !side_to_move;
    let from_rank = mover.pawn_rank();
    let (expected_rank, to_rank) = match mover {
        Side::White => (from_rank + 1, from_rank + 2),
        Side::Black => (from_rank - 1, from_rank - 2),
    };
    if target.rank() != expected_rank {
        return Err(invalid());
    }

    let from = Square::from_coords(target.file(), from_rank).ok_or_else(invalid)?;
    let to = Square::from_coords(target.file(), to_rank).ok_or_else(invalid)?;
    let pushed_pawn = pieces[PieceType::Pawn.index()] & sides[mover.index()];
    let occupied = sides[0] | sides[1];
    if !pushed_pawn.contains(to) || occupied.contains(target) || occupied.contains(from) {
        return Err(invalid());
    }

    Ok(Some(Move::new(MoveFlag::DoublePawnPush, from, to)))
}

fn parse_counter(field: Option<&str>, name: &'static str, default: u16) -> Result<u16, FenError> {
    match field {
        None => Ok(default),
        Some(s) => s.parse::<u16>().map_err(|_| FenError::InvalidMoveCounter {
            field: name,
            found: s.to_string(),
        }),
    }
}

impl Position {
    /// Parse a position from FEN.
    ///
    /// The halfmove and fullmove fields may be omitted (defaulting to `0 1`).
    /// An en passant square becomes the double pawn push that preceded the
    /// position, so the capture is offered exactly as after a played move.
    pub fn from_fen(tables: Arc<AttackTables>, fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::WrongFieldCount { found: fields.len() });
        }

        let (sides, pieces) = parse_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Side::White,
            "b" => Side::Black,
            other => {
                return Err(FenError::InvalidSide {
                    found: other.to_string(),
                });
            }
        };

        let castling = CastleRights::from_fen(fields[2])?;
        let prior_move = implied_double_push(fields[3], side_to_move, &sides, &pieces)?;
        let halfmove = parse_counter(fields.get(4).copied(), "halfmove clock", 0)?;
        let fullmove = parse_counter(fields.get(5).copied(), "fullmove number", 1)?;

        let position = Position::from_parts(
            tables,
            sides,
            pieces,
            castling,
            side_to_move,
            prior_move,
            (halfmove, fullmove),
        );
        position.validate()?;
        Ok(position)
    }

    /// Serialize to FEN. Counters are derived from the move history.
    pub fn to_fen(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.occupancy_snapshot();
        for rank in (0..8usize).rev() {
            let mut empty_count = 0u8;
            for file in 0..8usize {
                match snapshot[rank * 8 + file] {
                    Some(piece) => {
                        if empty_count > 0 {
                            write!(f, "{empty_count}")?;
                            empty_count = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                write!(f, "{empty_count}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }

        write!(f, " {} {}", self.side_to_move(), self.castle_rights())?;
        match self.en_passant_square() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}
