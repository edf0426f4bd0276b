//! Static evaluation: material, piece-square tables, pawn structure,
//! slider mobility, king shelter and a handful of global terms.
//!
//! The score is accumulated white-minus-black over both piece lists,
//! then negated for black so the result is always from the side to
//! move's perspective (negamax convention). Weights follow the Chess
//! Programming Wiki's linear evaluation writeup.

use quince_core::{
    attack, file_of, rank_of, try_square, Board, Code, Color, Piece, Position, Score, Square, INF,
};

pub const PAWN_SCORE: Score = 100;
pub const KNIGHT_SCORE: Score = 375;
pub const BISHOP_SCORE: Score = 400;
pub const ROOK_SCORE: Score = 550;
pub const QUEEN_SCORE: Score = 1_080;

#[rustfmt::skip]
const WHITE_PAWN_TABLE: [i8; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     4,  4,  4,  0,  0,  4,  4,  4,
     6,  8,  2, 10, 10,  2,  8,  6,
     6,  8, 12, 18, 18, 12,  8,  6,
     8, 12, 16, 24, 24, 16, 12,  8,
    12, 16, 24, 32, 32, 24, 16, 12,
    20, 36, 36, 36, 36, 36, 36, 20,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const BLACK_PAWN_TABLE: [i8; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    20, 36, 36, 36, 36, 36, 36, 20,
    12, 16, 24, 32, 32, 24, 16, 12,
     8, 12, 16, 24, 24, 16, 12,  8,
     6,  8, 12, 18, 18, 12,  8,  6,
     6,  8,  2, 10, 10,  2,  8,  6,
     4,  4,  4,  0,  0,  4,  4,  4,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i8; 64] = [
     0,  4,  8, 10, 10,  8,  4,  0,
     4,  8, 16, 20, 20, 16,  8,  4,
     8, 16, 24, 28, 28, 24, 16,  8,
    10, 20, 28, 32, 32, 28, 20, 10,
    10, 20, 28, 32, 32, 28, 20, 10,
     8, 16, 24, 28, 28, 24, 16,  8,
     4,  8, 16, 20, 20, 16,  8,  4,
     0,  4,  8, 10, 10,  8,  4,  0,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i8; 64] = [
    2, 0,  0,  0,  0,  0, 0, 2,
    0, 8,  4,  4,  4,  4, 8, 0,
    0, 4, 10, 10, 10, 10, 4, 0,
    0, 4, 10, 10, 10, 10, 4, 0,
    0, 4, 10, 10, 10, 10, 4, 0,
    0, 4, 10, 10, 10, 10, 4, 0,
    0, 8,  4,  4,  4,  4, 8, 0,
    2, 0,  0,  0,  0,  0, 0, 2,
];

#[rustfmt::skip]
const WHITE_ROOK_TABLE: [i8; 64] = [
     0,  0,  0,  5,  5,  0,  0,  0,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     5, 10, 10, 10, 10, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const BLACK_ROOK_TABLE: [i8; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const WHITE_QUEEN_TABLE: [i8; 64] = [
    -20, -10, -10, -5, -5, -10, -10, -20,
    -10,   0,   0,  0,  0,   0,   0, -10,
    -10,   0,   5,  5,  5,   5,   0, -10,
     -5,   0,   5,  5,  5,   5,   0,   0,
     -5,   0,   5,  5,  5,   5,   0,  -5,
    -10,   5,   5,  5,  5,   5,   0, -10,
    -10,   0,   5,  0,  0,   0,   0, -10,
    -20, -10, -10, -5, -5, -10, -10, -20,
];

#[rustfmt::skip]
const BLACK_QUEEN_TABLE: [i8; 64] = [
    -20, -10, -10, -5, -5, -10, -10, -20,
    -10,   0,   0,  0,  0,   0,   0, -10,
    -10,   0,   5,  5,  5,   5,   0, -10,
     -5,   0,   5,  5,  5,   5,   0,  -5,
      0,   0,   5,  5,  5,   5,   0,  -5,
    -10,   5,   5,  5,  5,   5,   0, -10,
    -10,   0,   5,  0,  0,   0,   0, -10,
    -20, -10, -10, -5, -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_TABLE: [i8; 64] = [
      0,   0,  -4, -10, -10,  -4,   0,   0,
     -4,  -4,  -8, -12, -12,  -8,  -4,  -4,
    -12, -16, -20, -20, -20, -20, -16, -12,
    -16, -20, -24, -24, -24, -24, -20, -16,
    -16, -20, -24, -24, -24, -24, -20, -16,
    -12, -16, -20, -20, -20, -20, -16, -12,
     -4,  -4,  -8, -12, -12,  -8,  -4,  -4,
      0,   0,  -4, -10, -10,  -4,   0,   0,
];

/// Evaluate `pos` from the side to move's perspective.
pub fn evaluate(pos: &Position) -> Score {
    let board = pos.board();
    let mut score: Score = 0;

    // Piece counts by code bits, for the global terms below.
    let mut white_count = [0u8; 7];
    let mut black_count = [0u8; 7];

    let white_check = pos.is_check(Color::White);
    let black_check = pos.is_check(Color::Black);

    for sq in pos.figures(Color::White) {
        white_count[board[sq].code_bits() as usize] += 1;
        score += piece_score(board, sq);
    }
    for sq in pos.figures(Color::Black) {
        black_count[board[sq].code_bits() as usize] += 1;
        score -= piece_score(board, sq);
    }

    let bishop = Code::Bishop.to_bits() as usize;
    let pawn = Code::Pawn.to_bits() as usize;
    let knight = Code::Knight.to_bits() as usize;

    // Bishop pair.
    if white_count[bishop] > 1 {
        score += 30;
    }
    if black_count[bishop] > 1 {
        score -= 30;
    }

    // A side without pawns struggles to convert.
    if white_count[pawn] == 0 {
        score -= 50;
    }
    if black_count[pawn] == 0 {
        score += 50;
    }

    // Knights lose value as pawns disappear.
    score += 2 * white_count[knight] as Score * white_count[pawn] as Score;
    score -= 2 * black_count[knight] as Score * black_count[pawn] as Score;

    if white_check {
        score += 20;
    }
    if black_check {
        score -= 20;
    }

    if pos.side() == Color::Black {
        score = -score;
    }
    score
}

fn piece_score(board: &Board, sq: Square) -> Score {
    match board[sq].code() {
        Some(Code::Pawn) => pawn_score(board, sq),
        Some(Code::Knight) => knight_score(sq),
        Some(Code::Bishop) => bishop_score(board, sq),
        Some(Code::Rook) => rook_score(board, sq),
        Some(Code::Queen) => queen_score(board, sq),
        Some(Code::King) => king_score(board, sq),
        None => {
            debug_assert!(false, "piece list entry on an empty square");
            0
        }
    }
}

fn pawn_score(board: &Board, sq: Square) -> Score {
    let x = file_of(sq) as i8;
    let y = rank_of(sq) as i8;
    let at = |dx: i8, dy: i8| -> Piece {
        match try_square(x + dx, y + dy) {
            Some(s) => board[s],
            None => Piece::EMPTY,
        }
    };

    let mut score = PAWN_SCORE;
    if board[sq].is_white() {
        if at(0, -1).is(Color::White, Code::Pawn) {
            score -= 5; // doubled
        }
        if !at(0, 1).is_empty() {
            score -= 5; // blocked
        }
        for dx in [-1, 1] {
            let covered = at(dx, 1);
            if covered.is_black() {
                score += covered.code_bits() as Score + 2;
            }
        }
        score += WHITE_PAWN_TABLE[sq as usize] as Score;
    } else {
        if at(0, 1).is(Color::Black, Code::Pawn) {
            score -= 5; // doubled
        }
        if !at(0, -1).is_empty() {
            score -= 6; // blocked
        }
        for dx in [-1, 1] {
            let covered = at(dx, -1);
            if covered.is_white() {
                score += covered.code_bits() as Score + 2;
            }
        }
        score += BLACK_PAWN_TABLE[sq as usize] as Score;
    }
    score
}

fn knight_score(sq: Square) -> Score {
    KNIGHT_SCORE + KNIGHT_TABLE[sq as usize] as Score
}

fn bishop_score(board: &Board, sq: Square) -> Score {
    let mut score = BISHOP_SCORE + BISHOP_TABLE[sq as usize] as Score;
    score += ray_mobility(board, sq, &attack::DIAGONAL_STEPS);
    score
}

fn rook_score(board: &Board, sq: Square) -> Score {
    let mut score = ROOK_SCORE;
    let us = board[sq].color();
    let x = file_of(sq) as i8;
    let y = rank_of(sq) as i8;

    // Adjacent friendly rook or queen hints at a battery.
    for (dx, dy) in attack::ORTHOGONAL_STEPS {
        if let Some(s) = try_square(x + dx, y + dy) {
            let piece = board[s];
            if piece.is(us, Code::Rook) || piece.is(us, Code::Queen) {
                score += 5;
            }
        }
    }

    score += match us {
        Color::White => WHITE_ROOK_TABLE[sq as usize] as Score,
        Color::Black => BLACK_ROOK_TABLE[sq as usize] as Score,
    };
    score += ray_mobility(board, sq, &attack::ORTHOGONAL_STEPS);
    score
}

fn queen_score(board: &Board, sq: Square) -> Score {
    QUEEN_SCORE
        + match board[sq].color() {
            Color::White => WHITE_QUEEN_TABLE[sq as usize] as Score,
            Color::Black => BLACK_QUEEN_TABLE[sq as usize] as Score,
        }
}

fn king_score(board: &Board, sq: Square) -> Score {
    let mut score = INF + KING_TABLE[sq as usize] as Score;
    let x = file_of(sq) as i8;
    let y = rank_of(sq) as i8;

    // Forward shield squares are tested for white occupancy for BOTH
    // kings: +8 each in front of the white king, -8 each in front of
    // the black one.
    if board[sq].is_white() {
        for dx in [-1, 0, 1] {
            if let Some(s) = try_square(x + dx, y + 1) {
                if board[s].is_white() {
                    score += 8;
                }
            }
        }
    } else {
        for dx in [-1, 0, 1] {
            if let Some(s) = try_square(x + dx, y - 1) {
                if board[s].is_white() {
                    score -= 8;
                }
            }
        }
    }
    score
}

/// +2 per empty square and +3 per enemy blocker along each ray.
fn ray_mobility(board: &Board, sq: Square, steps: &[(i8, i8)]) -> Score {
    let us = board[sq].color();
    let x = file_of(sq) as i8;
    let y = rank_of(sq) as i8;
    let mut score = 0;
    for &(dx, dy) in steps {
        let (mut nx, mut ny) = (x + dx, y + dy);
        while let Some(s) = try_square(nx, ny) {
            let piece = board[s];
            if !piece.is_empty() {
                if piece.color() != us {
                    score += 3;
                }
                break;
            }
            score += 2;
            nx += dx;
            ny += dy;
        }
    }
    score
}
