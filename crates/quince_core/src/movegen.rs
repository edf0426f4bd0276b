//! Pseudo-legal move generation with ordering scores, and the
//! do/check/undo filter that turns pseudo-legal into legal.
//!
//! Both generators walk the side-to-move's piece list and emit into a
//! caller-provided fixed-capacity buffer; nothing here touches the
//! heap. Scores only order moves for the search (higher first) and
//! carry no evaluation meaning.

use arrayvec::ArrayVec;

use crate::attack::{self, DIAGONAL_STEPS, KING_STEPS, KNIGHT_STEPS, ORTHOGONAL_STEPS};
use crate::position::Position;
use crate::types::*;

/// Hard upper bound on moves in any reachable position (the
/// theoretical maximum is around 218). Overflow is a contract
/// violation, not a recoverable error.
pub const MAX_MOVES: usize = 256;

pub type Moves = ArrayVec<Move, MAX_MOVES>;
pub type ScoredMoves = ArrayVec<ScoredMove, MAX_MOVES>;

/// Every capturing move of the side to move, plus en passant, each with
/// its ordering score. Moves may leave the own king in check.
pub fn captures(pos: &Position, out: &mut ScoredMoves) {
    let us = pos.side();
    let board = pos.board();
    let enemy_king = pos.king_square(us.other());
    let (ekx, eky) = (file_of(enemy_king) as i8, rank_of(enemy_king) as i8);

    // +3 for long-range pieces landing within taxicab distance 5 of the
    // enemy king.
    let king_pressure = |x: i8, y: i8| -> i16 {
        if (x - ekx).abs() + (y - eky).abs() <= 5 {
            3
        } else {
            0
        }
    };

    for from in pos.figures(us) {
        let piece = board[from];
        let x = file_of(from) as i8;
        let y = rank_of(from) as i8;

        match piece.code() {
            Some(Code::Pawn) => {
                let forward = if us == Color::White { 1 } else { -1 };
                for dx in [-1, 1] {
                    let Some(to) = try_square(x + dx, y + forward) else {
                        continue;
                    };
                    let victim = board[to];
                    if !victim.is_empty() && victim.color() != us {
                        out.push(ScoredMove {
                            score: 6,
                            mv: Move::new(from, to),
                        });
                    } else if pos.en_passant_file() == (x + dx) as u8 {
                        let on_fifth = (us == Color::White && y == 4)
                            || (us == Color::Black && y == 3);
                        if on_fifth {
                            out.push(ScoredMove {
                                score: 7,
                                mv: Move::with_type(from, to, MoveType::EnPassant),
                            });
                        }
                    }
                }
            }
            Some(Code::Knight) => {
                for (dx, dy) in KNIGHT_STEPS {
                    let Some(to) = try_square(x + dx, y + dy) else {
                        continue;
                    };
                    let victim = board[to];
                    if !victim.is_empty() && victim.color() != us {
                        let central = (2..=5).contains(&(x + dx)) && (2..=5).contains(&(y + dy));
                        out.push(ScoredMove {
                            score: 6 + central as i16,
                            mv: Move::new(from, to),
                        });
                    }
                }
            }
            Some(Code::Bishop) => {
                ray_captures(board, us, from, &DIAGONAL_STEPS, king_pressure, out);
            }
            Some(Code::Rook) => {
                ray_captures(board, us, from, &ORTHOGONAL_STEPS, king_pressure, out);
            }
            Some(Code::Queen) => {
                ray_captures(board, us, from, &KING_STEPS, king_pressure, out);
            }
            Some(Code::King) => {
                for (dx, dy) in KING_STEPS {
                    let Some(to) = try_square(x + dx, y + dy) else {
                        continue;
                    };
                    let victim = board[to];
                    if !victim.is_empty() && victim.color() != us {
                        out.push(ScoredMove {
                            score: 5,
                            mv: Move::new(from, to),
                        });
                    }
                }
            }
            None => debug_assert!(false, "piece list entry on an empty square"),
        }
    }
}

fn ray_captures(
    board: &crate::board::Board,
    us: Color,
    from: Square,
    steps: &[(i8, i8)],
    king_pressure: impl Fn(i8, i8) -> i16,
    out: &mut ScoredMoves,
) {
    let x = file_of(from) as i8;
    let y = rank_of(from) as i8;
    for &(dx, dy) in steps {
        let (mut nx, mut ny) = (x + dx, y + dy);
        while let Some(to) = try_square(nx, ny) {
            let piece = board[to];
            if !piece.is_empty() {
                if piece.color() != us {
                    out.push(ScoredMove {
                        score: 6 + king_pressure(nx, ny),
                        mv: Move::new(from, to),
                    });
                }
                break;
            }
            nx += dx;
            ny += dy;
        }
    }
}

/// Every quiet (non-capturing) move of the side to move, including
/// castling, each with its ordering score. Moves may leave the own king
/// in check. Castling is emitted from the rook's branch, once per
/// eligible rook, gated on the cached check hint
/// ([`Position::set_check_hint`]).
pub fn quiet_moves(pos: &Position, out: &mut ScoredMoves) {
    let us = pos.side();
    let board = pos.board();
    let enemy_king = pos.king_square(us.other());
    let (ekx, eky) = (file_of(enemy_king) as i8, rank_of(enemy_king) as i8);

    let king_pressure = |x: i8, y: i8| -> i16 {
        if (x - ekx).abs() + (y - eky).abs() <= 5 {
            3
        } else {
            0
        }
    };

    let king_moved = board[pos.king_square(us)].has_moved();

    for from in pos.figures(us) {
        let piece = board[from];
        let x = file_of(from) as i8;
        let y = rank_of(from) as i8;

        match piece.code() {
            Some(Code::Pawn) => {
                let (forward, start, promo) = if us == Color::White {
                    (1, 1, 6)
                } else {
                    (-1, 6, 1)
                };
                let Some(to) = try_square(x, y + forward) else {
                    continue;
                };
                if board[to].is_empty() {
                    let score = if y == promo { 6 } else { 1 };
                    out.push(ScoredMove {
                        score,
                        mv: Move::new(from, to),
                    });
                    if y == start {
                        let two = square(x as u8, (y + 2 * forward) as u8);
                        if board[two].is_empty() {
                            out.push(ScoredMove {
                                score: 1,
                                mv: Move::new(from, two),
                            });
                        }
                    }
                }
            }
            Some(Code::Knight) => {
                for (dx, dy) in KNIGHT_STEPS {
                    let Some(to) = try_square(x + dx, y + dy) else {
                        continue;
                    };
                    if board[to].is_empty() {
                        let central = (2..=5).contains(&(x + dx)) && (2..=5).contains(&(y + dy));
                        out.push(ScoredMove {
                            score: central as i16,
                            mv: Move::new(from, to),
                        });
                    }
                }
            }
            Some(Code::Bishop) => {
                ray_quiets(board, from, &DIAGONAL_STEPS, &king_pressure, out);
            }
            Some(Code::Rook) => {
                if !king_moved && !pos.check_hint() && !piece.has_moved() {
                    castling_from_rook(pos, x, y as u8, out);
                }
                ray_quiets(board, from, &ORTHOGONAL_STEPS, &king_pressure, out);
            }
            Some(Code::Queen) => {
                ray_quiets(board, from, &KING_STEPS, &king_pressure, out);
            }
            Some(Code::King) => {
                for (dx, dy) in KING_STEPS {
                    let Some(to) = try_square(x + dx, y + dy) else {
                        continue;
                    };
                    if board[to].is_empty() {
                        out.push(ScoredMove {
                            score: -2,
                            mv: Move::new(from, to),
                        });
                    }
                }
            }
            None => debug_assert!(false, "piece list entry on an empty square"),
        }
    }
}

fn ray_quiets(
    board: &crate::board::Board,
    from: Square,
    steps: &[(i8, i8)],
    king_pressure: impl Fn(i8, i8) -> i16,
    out: &mut ScoredMoves,
) {
    let x = file_of(from) as i8;
    let y = rank_of(from) as i8;
    for &(dx, dy) in steps {
        let (mut nx, mut ny) = (x + dx, y + dy);
        while let Some(to) = try_square(nx, ny) {
            if !board[to].is_empty() {
                break;
            }
            out.push(ScoredMove {
                score: king_pressure(nx, ny),
                mv: Move::new(from, to),
            });
            nx += dx;
            ny += dy;
        }
    }
}

/// Emit a castling move for the rook on file `x` of rank `rank` when
/// the intervening squares are empty and the king's transit squares are
/// not attacked. The caller has already checked that neither king nor
/// rook has moved and the side is not (per the hint) in check.
fn castling_from_rook(pos: &Position, x: i8, rank: u8, out: &mut ScoredMoves) {
    let board = pos.board();
    let side = pos.side();
    if x == 0 {
        let (b, c, d) = (square(1, rank), square(2, rank), square(3, rank));
        if board[b].is_empty()
            && board[c].is_empty()
            && board[d].is_empty()
            && !attack::square_attacked(board, d, side)
            && !attack::square_attacked(board, c, side)
        {
            out.push(ScoredMove {
                score: 0,
                mv: Move::LONG_CASTLE,
            });
        }
    } else if x == 7 {
        let (f, g) = (square(5, rank), square(6, rank));
        if board[f].is_empty()
            && board[g].is_empty()
            && !attack::square_attacked(board, f, side)
            && !attack::square_attacked(board, g, side)
        {
            out.push(ScoredMove {
                score: 0,
                mv: Move::SHORT_CASTLE,
            });
        }
    }
}

/// All moves of the side to move. With `consider_checks`, each
/// pseudo-legal move is played, tested for leaving the own king
/// attacked, and unplayed; only safe moves are returned.
pub fn available_moves(pos: &mut Position, consider_checks: bool) -> Moves {
    let mut scored = ScoredMoves::new();
    quiet_moves(pos, &mut scored);
    captures(pos, &mut scored);

    let mut moves = Moves::new();
    if consider_checks {
        for sm in &scored {
            let undo = pos.do_move(sm.mv);
            let check = pos.is_check(pos.side().other());
            pos.undo_move(&undo);
            if !check {
                moves.push(sm.mv);
            }
        }
    } else {
        for sm in &scored {
            moves.push(sm.mv);
        }
    }
    moves
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
