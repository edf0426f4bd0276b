//! Terminal rendering, input and game flow.

use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};

use rand::seq::SliceRandom;
use rand::thread_rng;

use quince_core::{parse_move, piece_glyph, square, Color, Move, Piece};
use quince_engine::{Engine, GameEnd};

use crate::Options;

/// A game lasts at most this many full moves before being declared
/// drawn.
const MAX_FULL_MOVES: u32 = 50;

const RESET: &str = "0";
const FG_RED: &str = "31";
const FG_GREEN: &str = "32";
const FG_YELLOW: &str = "33";
const FG_BLUE: &str = "34";
const FG_MAGENTA: &str = "35";
const FG_CYAN: &str = "36";
const BG_BLACK: &str = "40";
const BG_WHITE: &str = "47";

const GREETINGS: [&str; 4] = [
    "Good luck!",
    "Take your time.",
    "Just blink when you are ready.",
    "...",
];

const PRAISES: [&str; 5] = [
    "Good move.",
    "Interesting.",
    "Whoah!",
    "How about this one?",
    "You play well.",
];

const FAREWELLS: [&str; 3] = [
    "Don't leave me alone!",
    "I will count that as a win.",
    "Come back for a rematch.",
];

pub struct Console {
    engine: Engine,
    options: Options,
    player: Color,
    history: Vec<Move>,
    message: String,
}

enum Input {
    Move(Move),
    Quit,
}

impl Console {
    pub fn new(options: Options) -> Console {
        let player = prompt_side(&options);
        Console {
            engine: Engine::new(quince_core::Board::standard(), Color::White),
            options,
            player,
            history: Vec::new(),
            message: GREETINGS
                .choose(&mut thread_rng())
                .unwrap_or(&GREETINGS[0])
                .to_string(),
        }
    }

    /// Play one game to its end.
    pub fn run(&mut self) {
        let mut side = Color::White;
        for _ in 0..2 * MAX_FULL_MOVES {
            self.render_board();

            let mv = if side == self.player {
                match self.input_move() {
                    Input::Move(mv) => mv,
                    Input::Quit => {
                        let bye = FAREWELLS.choose(&mut thread_rng()).unwrap_or(&FAREWELLS[0]);
                        println!("{}", self.paint(bye, FG_MAGENTA));
                        return;
                    }
                }
            } else {
                match self.engine.think(self.options.depth) {
                    Ok(mv) => {
                        self.fill_engine_message(mv);
                        mv
                    }
                    Err(end) => {
                        // The engine has no reply: mate is the
                        // player's win, anything else a draw.
                        match end.end {
                            GameEnd::Mate => self.win(),
                            GameEnd::Draw => self.draw(),
                        }
                        return;
                    }
                }
            };

            self.engine.do_move(mv);
            self.history.push(mv);
            side = side.other();

            if self.engine.is_checkmate() {
                self.render_board();
                if side == self.player {
                    self.game_over();
                } else {
                    self.win();
                }
                return;
            }
            if self.engine.is_stalemate() {
                self.render_board();
                self.draw();
                return;
            }
        }
        self.draw();
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if self.options.color {
            format!("\x1b[{code}m{text}\x1b[{RESET}m")
        } else {
            text.to_string()
        }
    }

    fn cell(&self, piece: Piece, dark: bool) -> String {
        let bg = if dark { BG_BLACK } else { BG_WHITE };
        let text = if self.options.unicode {
            if piece.is_empty() {
                "_".to_string()
            } else {
                piece_glyph(piece).to_string()
            }
        } else if piece.is_empty() {
            "__".to_string()
        } else {
            piece.to_string()
        };
        let fg = if piece.is_empty() {
            FG_MAGENTA
        } else if piece.is_white() {
            FG_BLUE
        } else {
            FG_RED
        };
        if self.options.color {
            format!("\x1b[{bg}m\x1b[{fg}m{text}\x1b[{RESET}m ")
        } else {
            format!("{text} ")
        }
    }

    fn render_board(&self) {
        if self.options.clear_screen {
            print!("\x1b[2J\x1b[1;1H");
        }

        let white_view = self.player == Color::White;
        let letters = match (white_view, self.options.unicode) {
            (true, true) => "   A B C D E F G H",
            (false, true) => "   H G F E D C B A",
            (true, false) => "   A  B  C  D  E  F  G  H",
            (false, false) => "   H  G  F  E  D  C  B  A",
        };
        let frame = if self.options.unicode {
            " +-----------------+"
        } else {
            " +-------------------------+"
        };

        println!("{letters}");
        println!("{frame}");
        for row in 0..8u8 {
            let rank = if white_view { 7 - row } else { row };
            let digit = (b'1' + rank) as char;
            let mut line = format!("{digit}| ");
            for col in 0..8u8 {
                let file = if white_view { col } else { 7 - col };
                let dark = (row + col) % 2 == 0;
                line.push_str(&self.cell(self.engine.board()[square(file, rank)], dark));
            }
            line.push_str(&format!("|{digit}"));
            println!("{line}");
        }
        println!("{frame}");
        println!("{letters}");
        if !self.message.is_empty() {
            println!("{}", self.paint(&self.message, FG_MAGENTA));
        }
    }

    fn fill_engine_message(&mut self, mv: Move) {
        let stats = self.engine.think_stats();
        let praise = PRAISES.choose(&mut thread_rng()).unwrap_or(&PRAISES[0]);
        self.message = format!(
            "{praise} I moved {mv}; it took me {}ms. I traversed {} and evaluated {} positions.",
            stats.time.as_millis(),
            stats.positions_traversed,
            stats.positions_evaluated,
        );
    }

    /// Prompt until the player enters a legal move or quits. Handles
    /// the in-game commands along the way.
    fn input_move(&mut self) -> Input {
        let legal = self.engine.available_moves(true);
        let stdin = io::stdin();
        loop {
            print!(
                "{} ",
                self.paint("Input your move:", FG_CYAN)
            );
            io::stdout().flush().ok();

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => return Input::Quit,
                Ok(_) => {}
            }
            let input = line.trim().to_lowercase();
            if input.is_empty() {
                continue;
            }

            match input.as_str() {
                "exit" => return Input::Quit,
                "help" => {
                    crate::print_help();
                    continue;
                }
                "version" => {
                    crate::print_version();
                    continue;
                }
                "color" => {
                    self.options.color = !self.options.color;
                    self.report_toggle("Colored output", self.options.color);
                    continue;
                }
                "unicode" => {
                    self.options.unicode = !self.options.unicode;
                    self.report_toggle("Unicode output", self.options.unicode);
                    continue;
                }
                "clearscreen" => {
                    self.options.clear_screen = !self.options.clear_screen;
                    self.report_toggle("Clearing the screen", self.options.clear_screen);
                    continue;
                }
                "history" => {
                    let text = self.history_text();
                    print!("{text}");
                    continue;
                }
                "save" => {
                    self.save_history();
                    continue;
                }
                _ => {}
            }

            match parse_move(&input) {
                Ok(mv) => {
                    if legal.contains(&mv) {
                        return Input::Move(mv);
                    }
                    println!(
                        "{}",
                        self.paint("Move isn't available. Type 'help' for help.", FG_RED)
                    );
                }
                Err(_) => {
                    println!(
                        "{}",
                        self.paint("Unrecognized command. Type 'help' for help.", FG_RED)
                    );
                }
            }
        }
    }

    fn report_toggle(&self, what: &str, on: bool) {
        let state = if on { "ON" } else { "OFF" };
        println!("{}", self.paint(&format!("{what} is now <{state}>"), FG_GREEN));
    }

    fn history_text(&self) -> String {
        let mut out = format!("Move history ({} moves):\n", self.history.len() / 2);
        for (i, pair) in self.history.chunks(2).enumerate() {
            match pair {
                [white, black] => out.push_str(&format!("  {}. {white} {black}\n", i + 1)),
                [white] => out.push_str(&format!("  {}. {white}\n", i + 1)),
                _ => {}
            }
        }
        out
    }

    fn save_history(&self) {
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open("quince-history.txt")
            .and_then(|mut file| file.write_all(self.history_text().as_bytes()));
        match written {
            Ok(()) => println!(
                "{}",
                self.paint("Wrote the history to 'quince-history.txt'.", FG_GREEN)
            ),
            Err(err) => println!(
                "{}",
                self.paint(&format!("Failed to write the history: {err}"), FG_RED)
            ),
        }
    }

    fn win(&self) {
        println!(
            "{}",
            self.paint(
                r#"
 __   __  ___   _   _    _    _  ___  _  _
 \ \ / / / _ \ | | | |  | |  | |/ _ \| \| |
  \ V / | (_) || |_| |  | |/\| | (_) | .` |
   |_|   \___/  \___/   |__/\__|\___/|_|\_|
"#,
                FG_GREEN
            )
        );
    }

    fn game_over(&self) {
        println!(
            "{}",
            self.paint(
                r#"
   ___   _   __  __  ___    _____   _____ ___
  / __| /_\ |  \/  || __|  / _ \ \ / / __| _ \
 | (_ |/ _ \| |\/| || _|  | (_) \ V /| _||   /
  \___/_/ \_\_|  |_||___|  \___/ \_/ |___|_|_\
"#,
                FG_RED
            )
        );
    }

    fn draw(&self) {
        println!(
            "{}",
            self.paint(
                r#"
  ___   ___    _   __      __
 |   \ | _ \  /_\  \ \    / /
 | |) ||   / / _ \  \ \/\/ /
 |___/ |_|_\/_/ \_\  \_/\_/
"#,
                FG_YELLOW
            )
        );
    }
}

fn prompt_side(options: &Options) -> Color {
    let art = [
        r#"
    __        __
  /~ .~\    /~  ~\
 '      `\/'      *
(                .*)
 \            . *./
  `\ * .*. * . */'
      `\ * */'
        `\/'
"#,
        r#"
  _   _
 |*\_/*|______
 |_/-\_|_____ \
| |          | |
| |  /\    | | |
| |-/  |/-/\-| |
| |____\/____| |
 \_____________/
"#,
    ];
    if let Some(image) = art.choose(&mut thread_rng()) {
        let painted = if options.color {
            format!("\x1b[{FG_MAGENTA}m{image}\x1b[{RESET}m")
        } else {
            (*image).to_string()
        };
        println!("{painted}");
    }

    let stdin = io::stdin();
    loop {
        print!("Input your side [W/b]: ");
        io::stdout().flush().ok();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return Color::White,
            Ok(_) => {}
        }
        match line.trim().to_lowercase().as_str() {
            "w" | "white" | "" => return Color::White,
            "b" | "black" => return Color::Black,
            _ => println!("Please answer 'w' for white or 'b' for black."),
        }
    }
}
