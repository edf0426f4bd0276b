//! Interactive console front end for the quince engine.
//!
//! Plays a single human-vs-engine game on the terminal: board
//! rendering (two-letter or Unicode pieces, ANSI colors), move input
//! in `e2e4` / `e5;d6` / `oo` notation, a small set of in-game
//! commands and a move-history log.

mod console;

use std::process::ExitCode;

use console::Console;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone, Copy, Debug)]
pub struct Options {
    pub color: bool,
    pub unicode: bool,
    pub clear_screen: bool,
    pub depth: i32,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            color: true,
            unicode: cfg!(unix),
            clear_screen: true,
            depth: 7,
        }
    }
}

fn print_version() {
    println!("quince {VERSION} - a small classical chess engine");
}

fn print_help() {
    println!(
        r#"quince - play chess against a small classical engine

options:
    --help                   Print this message and exit.
    --version                Print the version and exit.
    --color={{ON|OFF}}         Colored output via ANSI escape sequences.
    --unicode={{ON|OFF}}       Unicode chess glyphs instead of letter pairs.
    --clearscreen={{ON|OFF}}   Clear the terminal before every board.
    --depth=N                Search depth in plies (default 7).

commands (type them instead of a move):
    help                     Print this message.
    version                  Print the version.
    color                    Toggle colored output.
    unicode                  Toggle Unicode glyphs.
    clearscreen              Toggle terminal clearing.
    history                  Print the move history.
    save                     Append the history to 'quince-history.txt'.
    exit                     Leave the game.

moves are written as origin and destination squares, like D2D4 or
g8:f6. Castling is OO (short) or OOO (long). En passant takes a ';'
between the squares, like D5;C6. A move the engine rejects usually
leaves your own king in check."#
    );
}

/// Parse the command line into options. Returns `None` when the
/// program should exit immediately (help/version or a bad option).
fn parse_options() -> Option<Options> {
    let mut options = Options::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" => {
                print_help();
                return None;
            }
            "--version" => {
                print_version();
                return None;
            }
            _ => {}
        }
        if let Some(value) = arg.strip_prefix("--color=") {
            options.color = !value.eq_ignore_ascii_case("off");
        } else if let Some(value) = arg.strip_prefix("--unicode=") {
            options.unicode = !value.eq_ignore_ascii_case("off");
        } else if let Some(value) = arg.strip_prefix("--clearscreen=") {
            options.clear_screen = !value.eq_ignore_ascii_case("off");
        } else if let Some(value) = arg.strip_prefix("--depth=") {
            match value.parse::<i32>() {
                Ok(depth) if (1..=12).contains(&depth) => options.depth = depth,
                _ => {
                    eprintln!("--depth expects a number between 1 and 12");
                    return None;
                }
            }
        } else {
            eprintln!("unrecognized option '{arg}'; try --help");
            return None;
        }
    }
    Some(options)
}

fn main() -> ExitCode {
    let Some(options) = parse_options() else {
        return ExitCode::SUCCESS;
    };
    let mut console = Console::new(options);
    console.run();
    ExitCode::SUCCESS
}
