//! Core chess rules: bitboard position, magic attack tables, move generation
//! and reversible move execution.

mod attacks;
mod bitboard;
mod castle_rights;
mod chess_move;
mod error;
mod fen;
mod make_move;
mod movegen;
mod perft;
mod piece;
mod piece_type;
mod position;
mod side;
mod square;

pub use attacks::{AttackTables, BISHOP_TABLE_SIZE, MagicEntry, ROOK_TABLE_SIZE, build_tables};
pub use bitboard::{Bitboard, Direction};
pub use castle_rights::{CastleRights, CastleSide, king_home};
pub use chess_move::{Move, MoveFlag, decode_move, encode_move};
pub use error::{BoardError, FenError, MoveError, PositionError, SliderFamily, TableError};
pub use fen::STARTING_FEN;
pub use make_move::GameStatus;
pub use movegen::MoveList;
pub use perft::{divide, perft};
pub use piece::Piece;
pub use piece_type::PieceType;
pub use position::{HistoryEntry, Position, PrettyPosition, new_position};
pub use side::Side;
pub use square::Square;
