//! Attack detection over the mailbox board.
//!
//! Rather than generating the opponent's moves, [`square_attacked`]
//! radiates outward from the queried square along each attack geometry
//! and inspects only the squares a matching attacker could occupy.

use crate::board::Board;
use crate::types::*;

pub const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (2, -1),
    (-2, 1),
    (1, -2),
    (-1, -2),
    (-2, -1),
];

pub const DIAGONAL_STEPS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub const ORTHOGONAL_STEPS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const KING_STEPS: [(i8, i8); 8] = [
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
];

/// True when any piece of `defender`'s opponent attacks `target`.
pub fn square_attacked(board: &Board, target: Square, defender: Color) -> bool {
    let x = file_of(target) as i8;
    let y = rank_of(target) as i8;
    let attacker = defender.other();

    for (dx, dy) in KNIGHT_STEPS {
        if let Some(sq) = try_square(x + dx, y + dy) {
            if board[sq].is(attacker, Code::Knight) {
                return true;
            }
        }
    }

    for (dx, dy) in DIAGONAL_STEPS {
        let (mut nx, mut ny) = (x + dx, y + dy);
        while let Some(sq) = try_square(nx, ny) {
            let piece = board[sq];
            if !piece.is_empty() {
                if piece.color() == attacker
                    && matches!(piece.code(), Some(Code::Bishop) | Some(Code::Queen))
                {
                    return true;
                }
                break;
            }
            nx += dx;
            ny += dy;
        }
    }

    for (dx, dy) in ORTHOGONAL_STEPS {
        let (mut nx, mut ny) = (x + dx, y + dy);
        while let Some(sq) = try_square(nx, ny) {
            let piece = board[sq];
            if !piece.is_empty() {
                if piece.color() == attacker
                    && matches!(piece.code(), Some(Code::Rook) | Some(Code::Queen))
                {
                    return true;
                }
                break;
            }
            nx += dx;
            ny += dy;
        }
    }

    // Pawns attack diagonally toward the defender, so look one rank in
    // front of the target from the defender's point of view.
    let pawn_rank = match defender {
        Color::White => y + 1,
        Color::Black => y - 1,
    };
    for dx in [-1, 1] {
        if let Some(sq) = try_square(x + dx, pawn_rank) {
            if board[sq].is(attacker, Code::Pawn) {
                return true;
            }
        }
    }

    for (dx, dy) in KING_STEPS {
        if let Some(sq) = try_square(x + dx, y + dy) {
            if board[sq].is(attacker, Code::King) {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, sq: Square, color: Color, code: Code) {
        board[sq] = Piece::new(color, code);
    }

    #[test]
    fn knight_attacks() {
        let mut board = Board::empty();
        place(&mut board, sq::F3, Color::Black, Code::Knight);
        assert!(square_attacked(&board, sq::E1, Color::White));
        assert!(square_attacked(&board, sq::G1, Color::White));
        assert!(!square_attacked(&board, sq::F1, Color::White));
        assert!(!square_attacked(&board, sq::E1, Color::Black));
    }

    #[test]
    fn slider_attacks_stop_at_blockers() {
        let mut board = Board::empty();
        place(&mut board, sq::A8, Color::Black, Code::Rook);
        assert!(square_attacked(&board, sq::A1, Color::White));
        place(&mut board, sq::A4, Color::White, Code::Pawn);
        assert!(!square_attacked(&board, sq::A1, Color::White));

        let mut board = Board::empty();
        place(&mut board, sq::H8, Color::Black, Code::Queen);
        assert!(square_attacked(&board, sq::A1, Color::White));
        place(&mut board, sq::D4, Color::Black, Code::Pawn);
        assert!(!square_attacked(&board, sq::A1, Color::White));
    }

    #[test]
    fn pawn_attacks_point_forward_only() {
        let mut board = Board::empty();
        place(&mut board, sq::D5, Color::Black, Code::Pawn);
        assert!(square_attacked(&board, sq::C4, Color::White));
        assert!(square_attacked(&board, sq::E4, Color::White));
        assert!(!square_attacked(&board, sq::D4, Color::White));
        assert!(!square_attacked(&board, sq::C6, Color::White));

        let mut board = Board::empty();
        place(&mut board, sq::D5, Color::White, Code::Pawn);
        assert!(square_attacked(&board, sq::C6, Color::Black));
        assert!(square_attacked(&board, sq::E6, Color::Black));
        assert!(!square_attacked(&board, sq::C4, Color::Black));
    }

    #[test]
    fn king_adjacency() {
        let mut board = Board::empty();
        place(&mut board, sq::E4, Color::White, Code::King);
        assert!(square_attacked(&board, sq::D3, Color::Black));
        assert!(square_attacked(&board, sq::F5, Color::Black));
        assert!(!square_attacked(&board, sq::E6, Color::Black));
    }

    #[test]
    fn startpos_back_rank_is_quiet() {
        let board = Board::standard();
        assert!(!square_attacked(&board, sq::E1, Color::White));
        assert!(!square_attacked(&board, sq::E8, Color::Black));
        // Knights cover the rank-3 squares in front of the pawns.
        assert!(square_attacked(&board, sq::F3, Color::Black));
        assert!(square_attacked(&board, sq::C6, Color::White));
    }
}
