//! Move-generation correctness against the known perft counts for the
//! standard opening position.

use quince_core::{perft, available_moves, Board, Color, Position};

const START_NODES: [(u8, u64); 4] = [(1, 20), (2, 400), (3, 8_902), (4, 197_281)];

#[test]
fn perft_from_the_standard_position() {
    let mut pos = Position::new(Board::standard(), Color::White);
    for (depth, expected) in START_NODES {
        let nodes = perft(&mut pos, depth);
        assert_eq!(
            nodes, expected,
            "perft({depth}) from the start position diverged"
        );
    }
    // The walk must leave the position untouched.
    assert_eq!(available_moves(&mut pos, true).len(), 20);
    assert_eq!(pos.side(), Color::White);
}

#[test]
fn perft_zero_is_one_node() {
    let mut pos = Position::new(Board::standard(), Color::White);
    assert_eq!(perft(&mut pos, 0), 1);
}

#[test]
fn perft_sees_the_black_replies() {
    let mut pos = Position::new(Board::standard(), Color::Black);
    assert_eq!(perft(&mut pos, 1), 20);
    assert_eq!(perft(&mut pos, 2), 400);
}
