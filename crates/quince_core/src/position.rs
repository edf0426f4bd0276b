//! Position state: side to move, en passant, and the per-color piece
//! index, with the incremental do/undo that keeps all of it consistent.
//!
//! The piece index is two singly-linked lists threaded through a fixed
//! 64-slot arena, one list per color. The head of each list is always
//! that color's king, so the king square is an O(1) read. Links are
//! arena indices, never pointers; [`NO_FIGURE`] is the end-of-list
//! sentinel.

use crate::attack;
use crate::board::Board;
use crate::movegen;
use crate::types::*;

/// En-passant file value meaning "no capture available".
pub const EP_NONE: u8 = 8;

const NO_FIGURE: u8 = u8::MAX;

/// One node of the piece index: the square a live piece stands on plus
/// the link to the next node of the same color.
#[derive(Clone, Copy, Debug)]
struct Figure {
    pos: Square,
    next: u8,
}

/// Undo record emitted by [`Position::do_move`] and consumed by exactly
/// one matching [`Position::undo_move`]. Do/undo pairs must nest LIFO;
/// the captured figure's link is only valid for re-insertion as long as
/// no other mutation touched the lists in between.
#[derive(Clone, Copy, Debug)]
pub struct Undo {
    mv: Move,
    en_passant: u8,
    moved: u8,
    moved_piece: Piece,
    erased: u8,
    erased_piece: Piece,
}

impl Undo {
    pub fn mv(&self) -> Move {
        self.mv
    }
}

/// A board plus everything needed to play moves on it.
#[derive(Clone)]
pub struct Position {
    board: Board,
    side: Color,
    en_passant: u8,
    /// Search-maintained cache; see [`Position::set_check_hint`].
    check_hint: bool,
    figures: [Figure; 64],
    heads: [u8; 2],
}

impl Position {
    /// Build from any board and side to move. Scans the board once to
    /// construct the piece index; both kings must be present.
    pub fn new(board: Board, side: Color) -> Position {
        let mut pos = Position {
            board,
            side,
            en_passant: EP_NONE,
            check_hint: false,
            figures: [Figure {
                pos: 0,
                next: NO_FIGURE,
            }; 64],
            heads: [NO_FIGURE; 2],
        };
        pos.rebuild_lists();
        pos
    }

    /// Replace the board wholesale and rescan. En passant resets to
    /// "none" and the check hint clears. This is the escape hatch for
    /// imposing arbitrary positions; it is far too slow to call per
    /// move.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
        self.en_passant = EP_NONE;
        self.check_hint = false;
        self.rebuild_lists();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side(&self) -> Color {
        self.side
    }

    /// File (0..=7) of the pawn that just advanced two squares, or
    /// [`EP_NONE`].
    pub fn en_passant_file(&self) -> u8 {
        self.en_passant
    }

    /// The king's square: the head of the color's piece list.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.figures[self.heads[color.idx()] as usize].pos
    }

    /// Squares of all live pieces of `color`, king first, then groups
    /// in descending piece-code order after a rebuild.
    pub fn figures(&self, color: Color) -> Figures<'_> {
        Figures {
            figures: &self.figures,
            next: self.heads[color.idx()],
        }
    }

    /// Last value written by [`Position::set_check_hint`]. Only the
    /// castling emitter reads this; it is never authoritative.
    pub fn check_hint(&self) -> bool {
        self.check_hint
    }

    /// Cache whether the side to move is in check. The search refreshes
    /// this at every node; code that calls the generators directly and
    /// cares about castling should do the same.
    pub fn set_check_hint(&mut self, check: bool) {
        self.check_hint = check;
    }

    /// True when `color`'s king is attacked. Always recomputed from the
    /// board.
    pub fn is_check(&self, color: Color) -> bool {
        attack::square_attacked(&self.board, self.king_square(color), color)
    }

    /// In check with no legal move.
    pub fn is_checkmate(&self) -> bool {
        self.is_check(self.side) && !self.has_legal_move()
    }

    /// Not in check with no legal move.
    pub fn is_stalemate(&self) -> bool {
        !self.is_check(self.side) && !self.has_legal_move()
    }

    fn has_legal_move(&self) -> bool {
        let mut probe = self.clone();
        // The probe must not inherit a stale check hint from a search.
        probe.set_check_hint(probe.is_check(probe.side));
        !movegen::available_moves(&mut probe, true).is_empty()
    }

    /// Play `mv` for the side to move: board, piece lists, side and
    /// en-passant state all update. Returns the record that inverts it.
    pub fn do_move(&mut self, mv: Move) -> Undo {
        let mut undo = Undo {
            mv,
            en_passant: self.en_passant,
            moved: NO_FIGURE,
            moved_piece: Piece::EMPTY,
            erased: NO_FIGURE,
            erased_piece: Piece::EMPTY,
        };
        let from = mv.orig();
        let to = mv.dest();

        match mv.move_type() {
            MoveType::Normal => {
                debug_assert!(!self.board[from].is_empty(), "no piece on the origin square");
                debug_assert!(from != to, "a piece must leave its square");
                debug_assert!(
                    self.board[to].is_empty() || self.board[to].color() != self.board[from].color(),
                    "destination holds a piece of the moving color"
                );
                let moving = self.find(from, self.side);
                debug_assert!(
                    moving != NO_FIGURE,
                    "origin piece does not belong to the side to move"
                );
                let erased = self.erase(to, self.side.other());

                let piece = self.board[from];
                let (y1, y2) = (rank_of(from), rank_of(to));
                self.en_passant = if piece.is(Color::White, Code::Pawn) && y1 == 1 && y2 == 3 {
                    file_of(from)
                } else if piece.is(Color::Black, Code::Pawn) && y1 == 6 && y2 == 4 {
                    file_of(from)
                } else {
                    EP_NONE
                };

                undo.moved = moving;
                undo.erased = erased;
                undo.moved_piece = piece;
                undo.erased_piece = self.board[to];

                self.figures[moving as usize].pos = to;
                if piece.is(Color::White, Code::Pawn) && y2 == 7 {
                    self.board[to] = Piece::new(Color::White, Code::Queen).as_moved();
                } else if piece.is(Color::Black, Code::Pawn) && y2 == 0 {
                    self.board[to] = Piece::new(Color::Black, Code::Queen).as_moved();
                } else {
                    self.board[to] = piece.as_moved();
                }
                self.board[from] = Piece::EMPTY;
            }
            MoveType::EnPassant => {
                let (x1, y1) = (file_of(from), rank_of(from));
                let (x2, y2) = (file_of(to), rank_of(to));
                debug_assert!(
                    self.en_passant == x2,
                    "the last move was not a two-square pawn advance onto this file"
                );
                debug_assert!(
                    self.board[to].is_empty(),
                    "en passant must land on an empty square"
                );
                debug_assert!(x1.abs_diff(x2) == 1, "en passant moves one file sideways");
                if self.side == Color::White {
                    debug_assert!(y1 == 4 && y2 == 5, "white en passant runs from rank 5 to 6");
                    debug_assert!(self.board[from].is(Color::White, Code::Pawn));
                    debug_assert!(self.board[square(x2, y1)].is(Color::Black, Code::Pawn));
                } else {
                    debug_assert!(y1 == 3 && y2 == 2, "black en passant runs from rank 4 to 3");
                    debug_assert!(self.board[from].is(Color::Black, Code::Pawn));
                    debug_assert!(self.board[square(x2, y1)].is(Color::White, Code::Pawn));
                }

                let felled = square(x2, y1);
                undo.erased = self.erase(felled, self.side.other());
                undo.moved = self.find(from, self.side);
                undo.moved_piece = self.board[from];
                undo.erased_piece = self.board[felled];

                self.figures[undo.moved as usize].pos = to;
                self.board[to] = self.board[from].as_moved();
                self.board[from] = Piece::EMPTY;
                self.board[felled] = Piece::EMPTY;
                self.en_passant = EP_NONE;
            }
            MoveType::ShortCastling => {
                self.castle_short();
                self.en_passant = EP_NONE;
            }
            MoveType::LongCastling => {
                self.castle_long();
                self.en_passant = EP_NONE;
            }
        }
        self.side = self.side.other();
        undo
    }

    /// Exact inverse of the matching [`Position::do_move`].
    pub fn undo_move(&mut self, undo: &Undo) {
        if undo.erased != NO_FIGURE {
            // After do_move, `side` is the captured piece's color.
            self.insert(undo.erased, self.side);
        }
        self.side = self.side.other();

        let from = undo.mv.orig();
        let to = undo.mv.dest();
        match undo.mv.move_type() {
            MoveType::Normal => {
                self.figures[undo.moved as usize].pos = from;
                self.board[from] = undo.moved_piece;
                self.board[to] = undo.erased_piece;
            }
            MoveType::EnPassant => {
                self.figures[undo.moved as usize].pos = from;
                self.board[from] = undo.moved_piece;
                self.board[to] = Piece::EMPTY;
                self.board[square(file_of(to), rank_of(from))] = undo.erased_piece;
            }
            MoveType::ShortCastling => {
                let rank = self.home_rank();
                let (e, f, g, h) = (
                    square(4, rank),
                    square(5, rank),
                    square(6, rank),
                    square(7, rank),
                );
                let king = self.find(g, self.side);
                let rook = self.find(f, self.side);
                self.figures[king as usize].pos = e;
                self.figures[rook as usize].pos = h;
                // Castling requires both pieces unmoved, so the prior
                // board state is exactly the unmoved values.
                self.board[e] = Piece::new(self.side, Code::King);
                self.board[f] = Piece::EMPTY;
                self.board[g] = Piece::EMPTY;
                self.board[h] = Piece::new(self.side, Code::Rook);
            }
            MoveType::LongCastling => {
                let rank = self.home_rank();
                let (a, c, d, e) = (
                    square(0, rank),
                    square(2, rank),
                    square(3, rank),
                    square(4, rank),
                );
                let king = self.find(c, self.side);
                let rook = self.find(d, self.side);
                self.figures[king as usize].pos = e;
                self.figures[rook as usize].pos = a;
                self.board[a] = Piece::new(self.side, Code::Rook);
                self.board[c] = Piece::EMPTY;
                self.board[d] = Piece::EMPTY;
                self.board[e] = Piece::new(self.side, Code::King);
            }
        }
        self.en_passant = undo.en_passant;
    }

    /// Pass the turn without moving: flips the side and clears the
    /// en-passant file. Returns the previous file for
    /// [`Position::unmake_null_move`].
    pub fn make_null_move(&mut self) -> u8 {
        self.side = self.side.other();
        std::mem::replace(&mut self.en_passant, EP_NONE)
    }

    pub fn unmake_null_move(&mut self, en_passant: u8) {
        self.side = self.side.other();
        self.en_passant = en_passant;
    }

    fn home_rank(&self) -> u8 {
        if self.side == Color::White {
            0
        } else {
            7
        }
    }

    fn castle_short(&mut self) {
        let rank = self.home_rank();
        let (e, f, g, h) = (
            square(4, rank),
            square(5, rank),
            square(6, rank),
            square(7, rank),
        );
        debug_assert!(
            self.board[e].is(self.side, Code::King) && !self.board[e].has_moved(),
            "short castling needs the unmoved king on its E square"
        );
        debug_assert!(
            self.board[h].is(self.side, Code::Rook) && !self.board[h].has_moved(),
            "short castling needs the unmoved rook on its H square"
        );

        let king = self.find(e, self.side);
        let rook = self.find(h, self.side);
        self.figures[king as usize].pos = g;
        self.figures[rook as usize].pos = f;

        self.board[g] = self.board[e].as_moved();
        self.board[f] = self.board[h].as_moved();
        self.board[e] = Piece::EMPTY;
        self.board[h] = Piece::EMPTY;
    }

    fn castle_long(&mut self) {
        let rank = self.home_rank();
        let (a, b, c, d, e) = (
            square(0, rank),
            square(1, rank),
            square(2, rank),
            square(3, rank),
            square(4, rank),
        );
        debug_assert!(
            self.board[e].is(self.side, Code::King) && !self.board[e].has_moved(),
            "long castling needs the unmoved king on its E square"
        );
        debug_assert!(
            self.board[a].is(self.side, Code::Rook) && !self.board[a].has_moved(),
            "long castling needs the unmoved rook on its A square"
        );
        debug_assert!(
            self.board[b].is_empty() && self.board[c].is_empty() && self.board[d].is_empty(),
            "the squares between king and rook must be empty"
        );

        let king = self.find(e, self.side);
        let rook = self.find(a, self.side);
        self.figures[king as usize].pos = c;
        self.figures[rook as usize].pos = d;

        self.board[c] = self.board[e].as_moved();
        self.board[d] = self.board[a].as_moved();
        self.board[e] = Piece::EMPTY;
        self.board[a] = Piece::EMPTY;
    }

    fn find(&self, pos: Square, color: Color) -> u8 {
        let mut idx = self.heads[color.idx()];
        while idx != NO_FIGURE {
            if self.figures[idx as usize].pos == pos {
                return idx;
            }
            idx = self.figures[idx as usize].next;
        }
        NO_FIGURE
    }

    /// Unlink the figure standing on `pos` from `color`'s list. The
    /// node keeps its link so [`Position::insert`] can splice it back.
    /// The king is the head and is never erased.
    fn erase(&mut self, pos: Square, color: Color) -> u8 {
        let mut prev = self.heads[color.idx()];
        if prev == NO_FIGURE {
            return NO_FIGURE;
        }
        debug_assert!(
            self.figures[prev as usize].pos != pos,
            "tried to erase the king from its list"
        );
        let mut idx = self.figures[prev as usize].next;
        while idx != NO_FIGURE {
            if self.figures[idx as usize].pos == pos {
                self.figures[prev as usize].next = self.figures[idx as usize].next;
                return idx;
            }
            prev = idx;
            idx = self.figures[idx as usize].next;
        }
        NO_FIGURE
    }

    /// Splice back a figure previously removed by [`Position::erase`]:
    /// walk to the node that now links past it and re-point that link.
    /// Relies on the erased node's link being untouched since the
    /// erase, which holds because do/undo is strictly LIFO.
    fn insert(&mut self, idx: u8, color: Color) {
        let target = self.figures[idx as usize].next;
        let mut prev = self.heads[color.idx()];
        loop {
            debug_assert!(
                prev != NO_FIGURE,
                "figure was not erased from this list"
            );
            if self.figures[prev as usize].next == target {
                break;
            }
            prev = self.figures[prev as usize].next;
        }
        self.figures[prev as usize].next = idx;
    }

    /// Rescan the board into the two lists. Pieces are binned by code,
    /// then the bins spliced king-queen-rook-bishop-knight-pawn so the
    /// king lands at the head.
    fn rebuild_lists(&mut self) {
        let mut bins = [[NO_FIGURE; 6]; 2];
        let mut count: usize = 0;

        for sq in 0..64 {
            let piece = self.board[sq];
            if piece.is_empty() {
                continue;
            }
            let idx = count as u8;
            count += 1;
            let bin = (piece.code_bits() - 1) as usize;
            let color = piece.color().idx();
            self.figures[idx as usize] = Figure {
                pos: sq,
                next: bins[color][bin],
            };
            bins[color][bin] = idx;
        }

        for color in 0..2 {
            let mut head = NO_FIGURE;
            for bin in 0..6 {
                let bin_head = bins[color][bin];
                if bin_head == NO_FIGURE {
                    continue;
                }
                let mut tail = bin_head;
                while self.figures[tail as usize].next != NO_FIGURE {
                    tail = self.figures[tail as usize].next;
                }
                self.figures[tail as usize].next = head;
                head = bin_head;
            }
            self.heads[color] = head;
        }

        debug_assert!(
            self.heads[Color::White.idx()] != NO_FIGURE
                && self.board[self.king_square(Color::White)].is(Color::White, Code::King),
            "white king missing from the board"
        );
        debug_assert!(
            self.heads[Color::Black.idx()] != NO_FIGURE
                && self.board[self.king_square(Color::Black)].is(Color::Black, Code::King),
            "black king missing from the board"
        );
    }
}

/// Iterator over the squares of one color's live pieces, in list order.
pub struct Figures<'a> {
    figures: &'a [Figure; 64],
    next: u8,
}

impl Iterator for Figures<'_> {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.next == NO_FIGURE {
            return None;
        }
        let figure = self.figures[self.next as usize];
        self.next = figure.next;
        Some(figure.pos)
    }
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod position_tests;
