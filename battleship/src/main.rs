// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::{
    fmt,
    io::{self, BufRead, Write},
    process,
};

use clap::{App, Arg, ArgMatches};
use log::{debug, error};
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, SeedableRng};
use regex::Regex;

use seabattle::{
    board::{iter_rows, TileKind, Tiles},
    game::{CannotActReason, GameState, Phase, Player, ShotOutcome, Store},
    Cell, BOARD_SIZE,
};

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = App::new("Sea Battle")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Two-player sea battle on one terminal.")
        .arg(
            Arg::with_name("first_player")
                .short("f")
                .long("first-player")
                .value_name("FIRST_PLAYER")
                .help("which player fires first")
                .takes_value(true)
                .possible_values(&["p1", "p2", "1", "2"])
                .case_insensitive(true),
        )
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .value_name("SEED")
                .help("seed the fleet generator for a reproducible game")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("reveal")
                .short("r")
                .long("reveal")
                .help("show untouched ships on the board being fired at"),
        )
        .get_matches();

    let first = choose_first(&matches);
    let reveal = matches.is_present("reveal");

    let mut store = Store::new(first);
    store.subscribe(|state: &GameState| {
        debug!(
            "phase {:?}, {:?} to move, last outcome {:?}",
            state.phase(),
            state.current(),
            state.last_outcome()
        )
    });

    let started = match matches.value_of("seed") {
        Some(seed) => match seed.parse::<u64>() {
            Ok(seed) => store.initialize_ships_with(&mut StdRng::seed_from_u64(seed)),
            Err(_) => {
                eprintln!("invalid seed {:?}, must be a non-negative integer", seed);
                process::exit(2);
            }
        },
        None => store.initialize_ships(),
    };
    if let Err(err) = started {
        error!("{}", err);
        eprintln!("Could not start game: {}", err);
        process::exit(1);
    }

    let stdin = io::stdin();
    let mut input = InputReader::new(stdin.lock());
    play(&mut store, reveal, &mut input)
}

/// Choose which [`Player`] fires first based on args.
fn choose_first(matches: &ArgMatches) -> Player {
    match matches.value_of("first_player") {
        Some(choice) if choice == "2" || choice.eq_ignore_ascii_case("p2") => Player::P2,
        _ => Player::P1,
    }
}

/// Run turns until one fleet is destroyed.
fn play(store: &mut Store, reveal: bool, input: &mut InputReader<impl BufRead>) -> io::Result<()> {
    enum Command {
        Fire(Cell),
        Help,
        Quit,
    }
    /// Matcher for fire commands with coordinates.
    static FIRE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)(?:(?:fire|shoot)\s+(?:at\s+)?)?
        (?P<x>[0-9]+)(?:\s*,\s*|\s+)(?P<y>[0-9]+)$",
        )
        .unwrap()
    });

    println!("Fire with \"fire <x>,<y>\". Type help or ? for commands.");
    loop {
        if let Phase::Over { winner } = store.state().phase() {
            println!();
            println!("{} wins!", PlayerName(winner));
            for &player in Player::ALL.iter() {
                println!();
                println!("{}'s fleet:", PlayerName(player));
                show_board(&store.state().board(player).tiles());
            }
            return Ok(());
        }

        let shooter = store.state().current();
        let target = shooter.opponent();
        println!();
        println!("{}'s waters:", PlayerName(target));
        let tiles = store.state().board(target).tiles();
        show_board(&if reveal { tiles.clone() } else { tiles.hide_ships() });
        println!();

        let prompt = format!("{} >", PlayerName(shooter));
        let cmd = input.read_input_lower(&prompt, |input| match input {
            "?" | "help" | "h" => Some(Command::Help),
            "quit" | "exit" | "q" => Some(Command::Quit),
            other => {
                if let Some(captures) = FIRE.captures(other) {
                    let x = parse_coord(&captures["x"], "x")?;
                    let y = parse_coord(&captures["y"], "y")?;
                    Some(Command::Fire(Cell::new(x, y)))
                } else {
                    println!("Invalid command \"{}\". Use '?' for help", other);
                    None
                }
            }
        })?;

        match cmd {
            Command::Quit => return Ok(()),
            Command::Help => println!(
                "Available Commands:
    fire <x>,<y>    fire at the given cell of your opponent's board. \"fire\" may be omitted.
    quit            leave the game.

Board legend:
    ~~  water that has not been fired at
    SS  a ship that has not been hit (only with --reveal)
    x   a miss
    xX  a damaged ship
    XX  a sunk ship"
            ),
            Command::Fire(cell) if !tiles[cell].is_fireable() => {
                println!("You already know what is at {},{}.", cell.x, cell.y);
            }
            Command::Fire(cell) => match store.fire(target, cell) {
                Ok(ShotOutcome::Miss) => println!("Miss. {} fires next.", PlayerName(target)),
                Ok(ShotOutcome::Hit(_)) => println!("Hit! Fire again."),
                Ok(ShotOutcome::Sunk(_)) => println!("Ship sunk! Fire again."),
                Ok(ShotOutcome::Victory(_)) => println!("The last ship is sunk!"),
                Err(err) => match err.reason() {
                    CannotActReason::AlreadyShot => println!("That cell was already shot."),
                    CannotActReason::OutOfBounds => println!("That cell is off the board."),
                    _ => {
                        error!("{}", err);
                        println!("Shot refused: {}", err.reason());
                    }
                },
            },
        }
    }
}

/// Parse a coordinate from input, printing a message if it is not on the board.
fn parse_coord(raw: &str, axis: &str) -> Option<usize> {
    match raw.parse() {
        Ok(v) if v < BOARD_SIZE => Some(v),
        _ => {
            println!("{} must be in range [0,{}], got {}", axis, BOARD_SIZE - 1, raw);
            None
        }
    }
}

/// Show the board by printing the grid with row and column indexes.
fn show_board(tiles: &Tiles) {
    print!("   ");
    for i in 0..BOARD_SIZE {
        print!("{:^4}", i);
    }
    println!();
    for (i, row) in iter_rows().enumerate() {
        print!("{:>2} ", i);
        for cell in row {
            print!("{:^4}", TileGlyph(tiles[cell]));
        }
        println!();
    }
}

/// Display helper that prints a tile.
struct TileGlyph(TileKind);

impl fmt::Display for TileGlyph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self.0 {
            TileKind::Untouched => "~~",
            TileKind::UntouchedOccupied => "SS",
            TileKind::Missed => "x",
            TileKind::Damaged => "xX",
            TileKind::Destroyed => "XX",
        })
    }
}

/// Display helper that prints a player's name.
struct PlayerName(Player);

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self.0 {
            Player::P1 => "Player 1",
            Player::P2 => "Player 2",
        })
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            print!("{} ", prompt);
            io::stdout().flush()?;
            self.buf.clear();
            if self.read.read_line(&mut self.buf)? == 0 {
                println!();
                process::exit(0);
            }
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }
}
