//! Property tests: random legal walks from the standard position must
//! undo back to bit-identical state, and the piece index must stay
//! consistent with the board throughout.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use quince_core::{available_moves, Board, Color, Position, Square, Undo};

fn snapshot(pos: &Position) -> (Vec<u8>, Color, u8, Vec<Square>, Vec<Square>) {
    (
        pos.board().squares().map(|(_, p)| p.to_bits()).collect(),
        pos.side(),
        pos.en_passant_file(),
        pos.figures(Color::White).collect(),
        pos.figures(Color::Black).collect(),
    )
}

fn assert_index_consistent(pos: &Position) {
    for color in [Color::White, Color::Black] {
        let squares: Vec<Square> = pos.figures(color).collect();
        let king = squares[0];
        assert_eq!(pos.board()[king].code_bits(), 6, "list head is not a king");
        assert_eq!(pos.board()[king].color(), color);
        assert_eq!(pos.king_square(color), king);

        let on_board = pos
            .board()
            .squares()
            .filter(|(_, p)| !p.is_empty() && p.color() == color)
            .count();
        assert_eq!(squares.len(), on_board, "list length drifted from the board");
        for sq in squares {
            assert!(!pos.board()[sq].is_empty(), "list entry on an empty square");
            assert_eq!(pos.board()[sq].color(), color);
        }
    }
}

#[test]
fn random_walks_undo_to_identical_state() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let mut pos = Position::new(Board::standard(), Color::White);
        let mut trail: Vec<(Undo, _)> = Vec::new();

        let length = rng.gen_range(1..=10);
        for _ in 0..length {
            let moves = available_moves(&mut pos, true);
            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };
            let before = snapshot(&pos);
            let undo = pos.do_move(mv);
            assert_index_consistent(&pos);
            trail.push((undo, before));
        }

        while let Some((undo, before)) = trail.pop() {
            pos.undo_move(&undo);
            assert_eq!(snapshot(&pos), before, "undo did not restore the position");
            assert_index_consistent(&pos);
        }
        assert_eq!(snapshot(&pos), snapshot(&Position::new(Board::standard(), Color::White)));
    }
}

#[test]
fn every_legal_move_is_sound() {
    // Walk a handful of random lines; at every node, each move returned
    // by the legality filter must leave the mover's king unattacked.
    let mut rng = SmallRng::seed_from_u64(42);

    for _ in 0..50 {
        let mut pos = Position::new(Board::standard(), Color::White);
        for _ in 0..8 {
            let mover = pos.side();
            let moves = available_moves(&mut pos, true);
            for &mv in &moves {
                let undo = pos.do_move(mv);
                assert!(
                    !pos.is_check(mover),
                    "legal move {mv} leaves the king attacked"
                );
                pos.undo_move(&undo);
            }
            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };
            pos.do_move(mv);
        }
    }
}
