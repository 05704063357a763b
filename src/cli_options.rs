/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of Wordsoup.

Wordsoup is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Wordsoup is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Wordsoup. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! # Examples
//!
//! List the placement strategies:
//!
//! ```text
//! $ wordsoup --ls-strategies
//! greedy        longest words first, best spot for each word
//! backtracking  depth-bounded search with undo (default)
//! fallback      random restarts, shorter words as attempts fail
//! sequential    words in the given order, most crossings first
//! ```
//!
//! Generate a book of ten 12x12 puzzles with 15 words each, and save it as JSON:
//!
//! ```text
//! $ wordsoup -w animals.txt -r 12 -c 12 -n 15 -p 10 -o books/ --summary
//! ```
//!
//! Options given on the command line override the values from the `--config` file.

use clap::Parser;
use log::{debug, info};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use wordsoup::config::{COPYRIGHT_NOTICE, GeneratorConfig};
use wordsoup::generator::book::{BookRequest, PuzzleBook, generate_book};
use wordsoup::generator::engine::Strategy;
use wordsoup::saver::book::SaverBook;
use wordsoup::wordlist::WordList;

/// Generate word-search puzzles.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// List the placement strategies
    #[arg(long, default_value_t = false)]
    ls_strategies: bool,

    /// Word list file, one word per line
    #[arg(short, long, group = "generate")]
    words: Option<PathBuf>,

    /// Number of rows in each grid
    #[arg(short, long, requires = "generate")]
    rows: Option<usize>,

    /// Number of columns in each grid
    #[arg(short, long, requires = "generate")]
    columns: Option<usize>,

    /// Number of words in each puzzle
    #[arg(short = 'n', long, requires = "generate")]
    count: Option<usize>,

    /// Number of puzzles to generate
    #[arg(short, long, default_value_t = 1, requires = "generate")]
    puzzles: usize,

    /// Placement strategy
    #[arg(value_enum, short, long, requires = "generate")]
    strategy: Option<Strategy>,

    /// Seed of the random generator, for reproducible puzzles
    #[arg(long, requires = "generate")]
    seed: Option<u64>,

    /// Number of worker threads (defaults to the number of CPUs)
    #[arg(short, long, requires = "generate")]
    jobs: Option<usize>,

    /// JSON configuration file
    #[arg(long, requires = "generate")]
    config: Option<PathBuf>,

    /// Directory where the puzzle book is saved in JSON format
    #[arg(short, long, requires = "generate")]
    output: Option<PathBuf>,

    /// Print some statistics after generating the puzzles
    #[arg(long, default_value_t = false, requires = "generate")]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options.
///
/// Return the exit code, or None when no action is requested.
pub fn parse() -> Option<u8> {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    //
    // List the strategies
    //
    if args.ls_strategies {
        for strategy in Strategy::ALL {
            println!("{:<12}  {}", strategy.to_string(), strategy.description());
        }
        return Some(0);
    }

    let words_file: PathBuf = args.words.clone()?;

    //
    // Build the configuration: defaults, then the configuration file, then the options
    //
    let mut config: GeneratorConfig = match &args.config {
        Some(path) => match GeneratorConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Cannot read the configuration file {}: {e}", path.display());
                return Some(1);
            }
        },
        None => GeneratorConfig::default(),
    };
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(columns) = args.columns {
        config.columns = columns;
    }
    if let Some(count) = args.count {
        config.words_per_puzzle = count;
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    debug!("Configuration: {config:?}");

    //
    // Read the word list
    //
    let list: WordList = match WordList::load(&words_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Cannot read the word list {}: {e}", words_file.display());
            return Some(1);
        }
    };
    if list.rejected > 0 {
        info!(
            "{}: {} lines ignored (not a word, or outside the length limits)",
            words_file.display(),
            list.rejected
        );
    }
    let name: String = words_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "wordsoup".to_string());

    let seed: u64 = args.seed.unwrap_or_else(rand::random);
    info!("Seed: {seed}");
    let jobs: usize = args.jobs.unwrap_or_else(|| {
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    });

    //
    // Generate the puzzles
    //
    let request: BookRequest = BookRequest {
        title: list.title.clone().or_else(|| Some(name.clone())),
        words: list.words,
        puzzles: args.puzzles,
        config,
        jobs,
        seed,
    };
    let start: Instant = Instant::now();
    let book: PuzzleBook = match generate_book(&request) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Cannot generate the puzzles: {e}");
            return Some(1);
        }
    };
    let total: f32 = start.elapsed().as_secs_f32();

    println!("{}\n", book.title);
    for (i, puzzle) in book.puzzles.iter().enumerate() {
        println!(
            "Puzzle {}/{} ({} strategy, {}/{} words, score {:.0})\n",
            i + 1,
            book.puzzles.len(),
            puzzle.strategy,
            puzzle.placed,
            puzzle.target,
            puzzle.score
        );
        println!("{puzzle}");
    }

    //
    // Save the book
    //
    if let Some(dir) = &args.output {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Cannot create the {} directory: {e}", dir.display());
            return Some(1);
        }
        let saver: SaverBook = SaverBook::new(dir.clone(), &name);
        if let Err(e) = saver.save_book(&book) {
            eprintln!("Cannot save the puzzles in {}: {e}", saver.path().display());
            return Some(1);
        }
        info!("Puzzles saved in {}", saver.path().display());
    }

    // Print some stats
    if args.summary {
        let count: usize = book.puzzles.len().max(1);
        println!(
            "
        total time = {}s
      average time = {}s
average words placed = {}
      under target = {}
              seed = {}",
            total,
            total / count as f32,
            book.placed_count() as f32 / count as f32,
            book.partial_count(),
            seed
        );
    }
    Some(0)
}
