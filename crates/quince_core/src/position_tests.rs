use super::*;
use crate::notation::parse_move;

fn startpos() -> Position {
    Position::new(Board::standard(), Color::White)
}

/// Board bytes, side, en-passant file and both list topologies; equal
/// snapshots mean bit-identical observable state.
fn snapshot(pos: &Position) -> (Vec<u8>, Color, u8, Vec<Square>, Vec<Square>) {
    (
        pos.board().squares().map(|(_, p)| p.to_bits()).collect(),
        pos.side(),
        pos.en_passant_file(),
        pos.figures(Color::White).collect(),
        pos.figures(Color::Black).collect(),
    )
}

fn play(pos: &mut Position, moves: &[&str]) {
    for m in moves {
        let mv = parse_move(m).unwrap();
        pos.do_move(mv);
    }
}

#[test]
fn lists_start_king_first() {
    let pos = startpos();
    assert_eq!(pos.king_square(Color::White), sq::E1);
    assert_eq!(pos.king_square(Color::Black), sq::E8);

    for color in [Color::White, Color::Black] {
        let squares: Vec<Square> = pos.figures(color).collect();
        assert_eq!(squares.len(), 16);
        assert!(pos.board()[squares[0]].is(color, Code::King));
        // Groups follow in descending code order: Q, R, R, B, B, N, N,
        // then the eight pawns.
        let codes: Vec<u8> = squares
            .iter()
            .map(|&s| pos.board()[s].code_bits())
            .collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(codes, sorted);
    }
}

#[test]
fn every_list_entry_matches_the_board() {
    let mut pos = startpos();
    play(
        &mut pos,
        &["e2e4", "d7d5", "e4d5", "d8d5", "b1c3", "d5a5", "g1f3"],
    );
    for color in [Color::White, Color::Black] {
        let squares: Vec<Square> = pos.figures(color).collect();
        let on_board = pos
            .board()
            .squares()
            .filter(|(_, p)| !p.is_empty() && p.color() == color)
            .count();
        assert_eq!(squares.len(), on_board);
        for s in squares {
            assert!(!pos.board()[s].is_empty());
            assert_eq!(pos.board()[s].color(), color);
        }
    }
}

#[test]
fn do_undo_restores_a_quiet_move() {
    let mut pos = startpos();
    let before = snapshot(&pos);
    let undo = pos.do_move(parse_move("e2e4").unwrap());
    assert_eq!(pos.side(), Color::Black);
    assert!(pos.board()[sq::E4].is(Color::White, Code::Pawn));
    assert!(pos.board()[sq::E4].has_moved());
    assert!(pos.board()[sq::E2].is_empty());
    // Two-square pawn advance arms the en-passant file.
    assert_eq!(pos.en_passant_file(), 4);
    pos.undo_move(&undo);
    assert_eq!(snapshot(&pos), before);
}

#[test]
fn do_undo_restores_a_capture() {
    let mut pos = startpos();
    play(&mut pos, &["e2e4", "d7d5"]);
    let before = snapshot(&pos);
    let undo = pos.do_move(parse_move("e4d5").unwrap());
    assert!(pos.board()[sq::D5].is(Color::White, Code::Pawn));
    assert_eq!(pos.figures(Color::Black).count(), 15);
    pos.undo_move(&undo);
    assert_eq!(snapshot(&pos), before);
    assert_eq!(pos.figures(Color::Black).count(), 16);
}

#[test]
fn en_passant_capture_and_undo() {
    let mut pos = startpos();
    play(&mut pos, &["e2e4", "c7c5", "e4e5", "d7d5"]);
    assert_eq!(pos.en_passant_file(), 3);

    let before = snapshot(&pos);
    let undo = pos.do_move(parse_move("e5;d6").unwrap());
    assert!(pos.board()[sq::D6].is(Color::White, Code::Pawn));
    assert!(pos.board()[sq::D6].has_moved());
    assert!(pos.board()[sq::D5].is_empty());
    assert!(pos.board()[sq::E5].is_empty());
    assert_eq!(pos.en_passant_file(), EP_NONE);
    assert_eq!(pos.figures(Color::Black).count(), 15);

    pos.undo_move(&undo);
    assert_eq!(snapshot(&pos), before);
}

#[test]
fn short_castling_and_undo() {
    let mut pos = startpos();
    play(&mut pos, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"]);
    let before = snapshot(&pos);

    let undo = pos.do_move(Move::SHORT_CASTLE);
    assert!(pos.board()[sq::G1].is(Color::White, Code::King));
    assert!(pos.board()[sq::G1].has_moved());
    assert!(pos.board()[sq::F1].is(Color::White, Code::Rook));
    assert!(pos.board()[sq::F1].has_moved());
    assert!(pos.board()[sq::E1].is_empty());
    assert!(pos.board()[sq::H1].is_empty());
    assert_eq!(pos.king_square(Color::White), sq::G1);

    pos.undo_move(&undo);
    assert_eq!(snapshot(&pos), before);
    assert!(!pos.board()[sq::E1].has_moved());
    assert!(!pos.board()[sq::H1].has_moved());
}

#[test]
fn long_castling_and_undo() {
    let mut pos = startpos();
    play(
        &mut pos,
        &["d2d4", "d7d5", "b1c3", "b8c6", "c1f4", "c8f5", "d1d2", "d8d7"],
    );
    let before = snapshot(&pos);

    let undo = pos.do_move(Move::LONG_CASTLE);
    assert!(pos.board()[sq::C1].is(Color::White, Code::King));
    assert!(pos.board()[sq::D1].is(Color::White, Code::Rook));
    assert!(pos.board()[sq::A1].is_empty());
    assert!(pos.board()[sq::E1].is_empty());
    assert_eq!(pos.king_square(Color::White), sq::C1);

    pos.undo_move(&undo);
    assert_eq!(snapshot(&pos), before);
}

#[test]
fn promotion_becomes_a_moved_queen() {
    let mut board = Board::empty();
    board[sq::H1] = Piece::new(Color::White, Code::King);
    board[sq::H8] = Piece::new(Color::Black, Code::King);
    board[sq::A7] = Piece::new(Color::White, Code::Pawn);
    let mut pos = Position::new(board, Color::White);

    let before = snapshot(&pos);
    let undo = pos.do_move(parse_move("a7a8").unwrap());
    assert!(pos.board()[sq::A8].is(Color::White, Code::Queen));
    assert!(pos.board()[sq::A8].has_moved());
    assert!(pos.board()[sq::A7].is_empty());

    pos.undo_move(&undo);
    assert_eq!(snapshot(&pos), before);
    assert!(pos.board()[sq::A7].is(Color::White, Code::Pawn));
}

#[test]
fn en_passant_file_arms_and_clears() {
    let mut pos = startpos();
    pos.do_move(parse_move("e2e4").unwrap());
    assert_eq!(pos.en_passant_file(), 4);
    pos.do_move(parse_move("g8f6").unwrap());
    assert_eq!(pos.en_passant_file(), EP_NONE);
    pos.do_move(parse_move("d2d3").unwrap());
    // Single pushes never arm the file.
    assert_eq!(pos.en_passant_file(), EP_NONE);
    pos.do_move(parse_move("b7b5").unwrap());
    assert_eq!(pos.en_passant_file(), 1);
}

#[test]
fn null_move_round_trips() {
    let mut pos = startpos();
    pos.do_move(parse_move("e2e4").unwrap());
    let before = snapshot(&pos);
    let ep = pos.make_null_move();
    assert_eq!(pos.side(), Color::White);
    assert_eq!(pos.en_passant_file(), EP_NONE);
    pos.unmake_null_move(ep);
    assert_eq!(snapshot(&pos), before);
}

#[test]
fn set_board_resets_state() {
    let mut pos = startpos();
    play(&mut pos, &["e2e4", "e7e5"]);
    pos.set_board(Board::standard());
    assert_eq!(pos.en_passant_file(), EP_NONE);
    assert_eq!(pos.figures(Color::White).count(), 16);
    assert_eq!(pos.king_square(Color::White), sq::E1);
    // Side to move is untouched by a board swap.
    assert_eq!(pos.side(), Color::White);
}

#[test]
fn checkmate_and_stalemate_detection() {
    // Fool's mate.
    let mut pos = startpos();
    play(&mut pos, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert!(pos.is_check(Color::White));
    assert!(pos.is_checkmate());
    assert!(!pos.is_stalemate());

    // Kb6 + Qc7 lock the black king in the corner without check.
    let mut board = Board::empty();
    board[sq::A8] = Piece::new(Color::Black, Code::King);
    board[sq::B6] = Piece::new(Color::White, Code::King);
    board[sq::C7] = Piece::new(Color::White, Code::Queen);
    let pos = Position::new(board, Color::Black);
    assert!(!pos.is_check(Color::Black));
    assert!(pos.is_stalemate());
    assert!(!pos.is_checkmate());
}
