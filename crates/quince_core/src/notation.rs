//! Text formatting and parsing for squares, pieces and moves.
//!
//! Squares render as `A1`..`H8`, pieces as two letters (`WP`, `BQ`) or
//! a Unicode glyph, moves as `<orig><dest>` with `OO`/`OOO` for
//! castling. Parsing accepts the same shapes case-insensitively, with
//! spaces, dots, dashes and colons stripped, and `;` marking an en
//! passant capture (`e5;d6`).

use std::fmt;

use thiserror::Error;

use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoveError {
    #[error("a move names two squares, like `e2e4`, or `oo`/`ooo` for castling")]
    BadShape,
    #[error("`{0}` is not a square; files run a-h and ranks 1-8")]
    BadSquare(String),
}

/// `A1`..`H8`.
pub fn square_name(sq: Square) -> String {
    let file = (b'A' + file_of(sq)) as char;
    let rank = (b'1' + rank_of(sq)) as char;
    format!("{file}{rank}")
}

/// Parse a two-character coordinate like `e2` (either case).
pub fn parse_square(s: &str) -> Result<Square, ParseMoveError> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return Err(ParseMoveError::BadSquare(s.to_string()));
    }
    let file = bytes[0].to_ascii_lowercase().wrapping_sub(b'a');
    let rank = bytes[1].wrapping_sub(b'1');
    if file < 8 && rank < 8 {
        Ok(square(file, rank))
    } else {
        Err(ParseMoveError::BadSquare(s.to_string()))
    }
}

/// Parse a move in the harness notation: `e2e4`, `e5;d6` (en passant),
/// `oo`/`ooo` (castling). Case-insensitive; spaces, dots, dashes and
/// colons are ignored, so `E2-E4` and `g8:f6` work too.
pub fn parse_move(input: &str) -> Result<Move, ParseMoveError> {
    let mut s: String = input
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-' | ':'))
        .collect::<String>()
        .to_lowercase();

    match s.as_str() {
        "oo" => return Ok(Move::SHORT_CASTLE),
        "ooo" => return Ok(Move::LONG_CASTLE),
        _ => {}
    }

    let ty = if s.contains(';') {
        s.retain(|c| c != ';');
        MoveType::EnPassant
    } else {
        MoveType::Normal
    };

    if s.len() != 4 || !s.is_ascii() {
        return Err(ParseMoveError::BadShape);
    }
    let orig = parse_square(&s[0..2])?;
    let dest = parse_square(&s[2..4])?;
    Ok(Move::with_type(orig, dest, ty))
}

/// Two-letter piece tag (`WP`, `BK`), or two spaces for an empty
/// square.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(piece_letters(*self))
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("--");
        }
        write!(f, "{}{}", piece_letters(*self), if self.has_moved() { "*" } else { "" })
    }
}

fn piece_letters(piece: Piece) -> &'static str {
    let Some(code) = piece.code() else {
        return "  ";
    };
    match (piece.color(), code) {
        (Color::White, Code::Pawn) => "WP",
        (Color::White, Code::Knight) => "WN",
        (Color::White, Code::Bishop) => "WB",
        (Color::White, Code::Rook) => "WR",
        (Color::White, Code::Queen) => "WQ",
        (Color::White, Code::King) => "WK",
        (Color::Black, Code::Pawn) => "BP",
        (Color::Black, Code::Knight) => "BN",
        (Color::Black, Code::Bishop) => "BB",
        (Color::Black, Code::Rook) => "BR",
        (Color::Black, Code::Queen) => "BQ",
        (Color::Black, Code::King) => "BK",
    }
}

/// Unicode chess glyph, or a space for an empty square.
pub fn piece_glyph(piece: Piece) -> &'static str {
    let Some(code) = piece.code() else {
        return " ";
    };
    match (piece.color(), code) {
        (Color::White, Code::Pawn) => "\u{2659}",
        (Color::White, Code::Knight) => "\u{2658}",
        (Color::White, Code::Bishop) => "\u{2657}",
        (Color::White, Code::Rook) => "\u{2656}",
        (Color::White, Code::Queen) => "\u{2655}",
        (Color::White, Code::King) => "\u{2654}",
        (Color::Black, Code::Pawn) => "\u{265F}",
        (Color::Black, Code::Knight) => "\u{265E}",
        (Color::Black, Code::Bishop) => "\u{265D}",
        (Color::Black, Code::Rook) => "\u{265C}",
        (Color::Black, Code::Queen) => "\u{265B}",
        (Color::Black, Code::King) => "\u{265A}",
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.move_type() {
            MoveType::Normal | MoveType::EnPassant => {
                write!(f, "{}{}", square_name(self.orig()), square_name(self.dest()))
            }
            MoveType::ShortCastling => f.write_str("OO"),
            MoveType::LongCastling => f.write_str("OOO"),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.move_type() {
            MoveType::EnPassant => write!(
                f,
                "{};{}",
                square_name(self.orig()),
                square_name(self.dest())
            ),
            _ => fmt::Display::fmt(self, f),
        }
    }
}
