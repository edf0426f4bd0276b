//! Core chess rules for the quince engine: byte-packed board model,
//! position state with an incremental piece index, pseudo-legal move
//! generation with ordering scores, attack detection, legality
//! filtering and perft.
//!
//! The search and evaluation live in the `quince_engine` crate; the
//! interactive harness in `quince_cli`. This crate has no opinion about
//! either.

pub mod attack;
pub mod board;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod position;
pub mod types;

pub use attack::square_attacked;
pub use board::Board;
pub use movegen::{available_moves, captures, quiet_moves, Moves, ScoredMoves, MAX_MOVES};
pub use notation::{parse_move, parse_square, piece_glyph, square_name, ParseMoveError};
pub use perft::perft;
pub use position::{Figures, Position, Undo, EP_NONE};
pub use types::*;
