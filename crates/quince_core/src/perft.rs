//! Perft: move-generation correctness counting.

use crate::movegen::available_moves;
use crate::position::Position;

/// Count the leaf nodes of the legal move tree `depth` plies deep.
/// Plays every move on `pos` and takes it back, so the position is
/// unchanged on return.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = available_moves(pos, true);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves {
        let undo = pos.do_move(mv);
        nodes += perft(pos, depth - 1);
        pos.undo_move(&undo);
    }
    nodes
}

/// Per-move node counts one ply down, for pinpointing which root move
/// a diverging perft total comes from.
pub fn perft_divide(pos: &mut Position, depth: u8) -> Vec<(crate::types::Move, u64)> {
    let moves = available_moves(pos, true);
    let mut counts = Vec::with_capacity(moves.len());
    for mv in moves {
        let undo = pos.do_move(mv);
        let nodes = if depth <= 1 { 1 } else { perft(pos, depth - 1) };
        pos.undo_move(&undo);
        counts.push((mv, nodes));
    }
    counts
}
