//! Classical chess engine built on `quince_core`: a thin [`Engine`]
//! façade owning the position plus per-search statistics, negamax
//! alpha-beta search and a linear static evaluation.

mod eval;
mod search;

use std::time::Duration;

use thiserror::Error;

use quince_core::{available_moves, Board, Color, Move, Moves, Position, Score, Undo};

pub use eval::{
    evaluate, BISHOP_SCORE, KNIGHT_SCORE, PAWN_SCORE, QUEEN_SCORE, ROOK_SCORE,
};

/// How a game ends when the side to move has no legal reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEnd {
    Mate,
    Draw,
}

/// Returned by [`Engine::think`] when no legal move exists: mate if
/// the side to move is in check, draw (stalemate) otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no moves available for the side to move")]
pub struct NoMovesAvailable {
    pub end: GameEnd,
}

/// Timing and node counters for the most recent [`Engine::think`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ThinkStats {
    pub time: Duration,
    /// Leaf positions handed to the evaluation.
    pub positions_evaluated: u32,
    /// Every node the search entered.
    pub positions_traversed: u32,
}

/// The engine: a position plus search statistics. All game mechanics
/// (moves, legality, check detection) forward to the core position;
/// [`Engine::think`] and [`Engine::evaluate`] add the playing
/// strength.
///
/// Single-threaded by design; `think` runs to completion on the
/// calling thread and can only be bounded by its depth argument.
pub struct Engine {
    pos: Position,
    stats: ThinkStats,
}

impl Engine {
    pub fn new(board: Board, side: Color) -> Engine {
        Engine {
            pos: Position::new(board, side),
            stats: ThinkStats::default(),
        }
    }

    /// Impose an arbitrary board; see [`Position::set_board`].
    pub fn set_board(&mut self, board: Board) {
        self.pos.set_board(board);
    }

    pub fn board(&self) -> &Board {
        self.pos.board()
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn side(&self) -> Color {
        self.pos.side()
    }

    pub fn think_stats(&self) -> &ThinkStats {
        &self.stats
    }

    /// Moves for the side to move, filtered for legality when
    /// `consider_checks` is set.
    pub fn available_moves(&mut self, consider_checks: bool) -> Moves {
        // The castling emitter reads the cached check flag, which a
        // finished search leaves at whatever its last node saw.
        let in_check = self.pos.is_check(self.pos.side());
        self.pos.set_check_hint(in_check);
        available_moves(&mut self.pos, consider_checks)
    }

    pub fn do_move(&mut self, mv: Move) -> Undo {
        self.pos.do_move(mv)
    }

    pub fn undo_move(&mut self, undo: &Undo) {
        self.pos.undo_move(undo)
    }

    pub fn is_check(&self, color: Color) -> bool {
        self.pos.is_check(color)
    }

    pub fn is_checkmate(&self) -> bool {
        self.pos.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.pos.is_stalemate()
    }

    /// Static evaluation of the current position, from the side to
    /// move's perspective. Diagnostic; `think` calls it at the leaves.
    pub fn evaluate(&self) -> Score {
        eval::evaluate(&self.pos)
    }

    /// Search `depth` plies and return the best move found. Fills
    /// [`Engine::think_stats`] as a side effect.
    pub fn think(&mut self, depth: i32) -> Result<Move, NoMovesAvailable> {
        search::think(&mut self.pos, &mut self.stats, depth)
    }
}
