//! Example solving small polyomino packing puzzles from the command line.
//!
//! This example shows how to:
//! - Build a board, optionally with blocked cells
//! - Assemble pieces from a small library of shape drawings
//! - Validate the configuration before searching
//! - Run the search with an event observer and a cancellation budget
//! - Display the outcome, the solved board, and search statistics
//!
//! Pieces are picked by letter: uppercase letters are the twelve pentominoes
//! (`F I L N P T U V W X Y Z`), lowercase `o`, `i`, `s`, `t` and `l` are
//! tetrominoes, `d` is the domino and `m` the monomino.
//!
//! # Usage
//!
//! Solve the default puzzle, two P pentominoes on a 5x2 board:
//!
//! ```sh
//! cargo run --example solve_pentominoes
//! ```
//!
//! Pick a board and pieces:
//!
//! ```sh
//! cargo run --example solve_pentominoes -- --width 4 --height 2 --pieces o,o
//! ```
//!
//! Block cells (repeatable, `row,col`):
//!
//! ```sh
//! cargo run --example solve_pentominoes -- --width 3 --height 2 \
//!     --blocked 0,2 --blocked 1,0 --pieces s
//! ```
//!
//! Restrict enumeration to rotations only:
//!
//! ```sh
//! cargo run --example solve_pentominoes -- --pieces P,P --no-mirrors
//! ```
//!
//! Give up after a fixed number of trace events:
//!
//! ```sh
//! cargo run --example solve_pentominoes -- --width 8 --height 8 \
//!     --pieces F,I,L,N,P,T,U,V,W,X,Y,Z --max-events 200000
//! ```
//!
//! Log every placement and removal as it happens:
//!
//! ```sh
//! RUST_LOG=debug cargo run --example solve_pentominoes
//! ```

use std::process;

use clap::Parser;
use tilework_core::{Board, Cell, MirrorPolicy, Piece, PieceId, Shape};
use tilework_solver::{BacktrackSolver, CancelToken, Outcome, Trace, validate_puzzle};

const SHAPE_LIBRARY: &[(char, &str)] = &[
    ('F', ".##\n##.\n.#."),
    ('I', "#####"),
    ('L', "#.\n#.\n#.\n##"),
    ('N', ".#\n.#\n##\n#."),
    ('P', "##\n##\n#."),
    ('T', "###\n.#.\n.#."),
    ('U', "#.#\n###"),
    ('V', "#..\n#..\n###"),
    ('W', "#..\n##.\n.##"),
    ('X', ".#.\n###\n.#."),
    ('Y', ".#\n##\n.#\n.#"),
    ('Z', "##.\n.#.\n.##"),
    ('o', "##\n##"),
    ('i', "####"),
    ('s', ".##\n##."),
    ('t', "###\n.#."),
    ('l', "#.\n#.\n##"),
    ('d', "##"),
    ('m', "#"),
];

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board width in cells.
    #[arg(long, value_name = "CELLS", default_value_t = 5)]
    width: usize,

    /// Board height in cells.
    #[arg(long, value_name = "CELLS", default_value_t = 2)]
    height: usize,

    /// Pieces to place, as comma-separated shape letters.
    #[arg(long, value_name = "LETTERS", default_value = "P,P")]
    pieces: String,

    /// Blocked cell as `row,col`. Repeatable.
    #[arg(long = "blocked", value_name = "ROW,COL")]
    blocked: Vec<String>,

    /// Enumerate rotations only, without mirrored orientations.
    #[arg(long)]
    no_mirrors: bool,

    /// Stop the search after this many trace events.
    #[arg(long, value_name = "COUNT")]
    max_events: Option<usize>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let blocked = match parse_blocked(&args.blocked) {
        Ok(cells) => cells,
        Err(message) => {
            eprintln!("{message}");
            process::exit(2);
        }
    };
    let mut board = match Board::with_blocked(args.width, args.height, blocked) {
        Ok(board) => board,
        Err(error) => {
            eprintln!("Invalid board: {error}");
            process::exit(2);
        }
    };

    let mirrors = if args.no_mirrors {
        MirrorPolicy::Exclude
    } else {
        MirrorPolicy::Include
    };
    let (letters, pieces) = match parse_pieces(&args.pieces, mirrors) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{message}");
            process::exit(2);
        }
    };

    if let Err(error) = validate_puzzle(&pieces, &board) {
        eprintln!("Invalid puzzle: {error}");
        process::exit(2);
    }

    let cancel = CancelToken::new();
    let limiter = cancel.clone();
    let max_events = args.max_events;
    let result = BacktrackSolver::new().solve_with_observer(
        &pieces,
        &mut board,
        &cancel,
        |event| {
            log::debug!("{event}");
            if let Some(limit) = max_events
                && event.seq + 1 >= limit
            {
                limiter.cancel();
            }
        },
    );
    let (outcome, trace) = match result {
        Ok(run) => run,
        Err(error) => {
            eprintln!("Invalid puzzle: {error}");
            process::exit(2);
        }
    };

    print_run(outcome, &trace, &board, &pieces, &letters);
}

fn parse_blocked(specs: &[String]) -> Result<Vec<Cell>, String> {
    specs.iter().map(|spec| parse_cell(spec)).collect()
}

fn parse_cell(spec: &str) -> Result<Cell, String> {
    let Some((row, col)) = spec.split_once(',') else {
        return Err(format!("Expected `row,col`, got `{spec}`."));
    };
    let row = row
        .trim()
        .parse()
        .map_err(|_| format!("Invalid row in `{spec}`."))?;
    let col = col
        .trim()
        .parse()
        .map_err(|_| format!("Invalid column in `{spec}`."))?;
    Ok(Cell::new(row, col))
}

fn parse_pieces(spec: &str, mirrors: MirrorPolicy) -> Result<(Vec<char>, Vec<Piece>), String> {
    let mut letters = Vec::new();
    let mut pieces = Vec::new();
    for entry in spec.split(',') {
        let entry = entry.trim();
        let mut chars = entry.chars();
        let (Some(letter), None) = (chars.next(), chars.next()) else {
            return Err(format!("Expected a single shape letter, got `{entry}`."));
        };
        let Some(drawing) = shape_for(letter) else {
            let available: String = SHAPE_LIBRARY
                .iter()
                .map(|&(letter, _)| letter)
                .collect();
            return Err(format!(
                "Unknown piece letter `{letter}`. Available: {available}"
            ));
        };
        let shape: Shape = drawing.parse().expect("library drawings are valid");
        let id = PieceId::new(u32::try_from(pieces.len()).expect("piece count fits in u32"));
        letters.push(letter);
        pieces.push(Piece::new(id, shape, mirrors));
    }
    Ok((letters, pieces))
}

fn shape_for(letter: char) -> Option<&'static str> {
    SHAPE_LIBRARY
        .iter()
        .find(|&&(key, _)| key == letter)
        .map(|&(_, drawing)| drawing)
}

fn print_run(outcome: Outcome, trace: &Trace, board: &Board, pieces: &[Piece], letters: &[char]) {
    println!("Outcome:");
    println!("  {outcome}");
    println!();

    println!("Board:");
    for line in board.to_string().lines() {
        println!("  {line}");
    }
    println!();

    if outcome.is_solved() {
        println!("Legend:");
        for (piece, letter) in pieces.iter().zip(letters) {
            println!("  {}: {letter}", board_letter(piece.id()));
        }
        println!();
    }

    println!("Stats:");
    println!("  placements: {}", trace.placements());
    println!("  removals: {}", trace.removals());
    println!("  events: {}", trace.len());
}

fn board_letter(id: PieceId) -> char {
    u8::try_from(id.value() % 26).map_or('?', |offset| char::from(b'A' + offset))
}
