/*
book.rs

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

//! Generate a book of puzzles.
//!
//! The words of each puzzle are drawn from a common pool, avoiding the words already used
//! by the previous puzzles of the book until the pool runs dry.
//! Puzzles are independent from each other and are generated by worker threads. Jobs and
//! results go through [`async_channel`] queues. Each puzzle uses its own random generator,
//! seeded from the book seed and the puzzle index, so that a book can be reproduced whatever
//! the number of workers.

use async_channel::{Receiver, Sender};
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::thread;
use std::time::Instant;

use super::GeneratorError;
use super::engine::{Puzzle, WordSearch};
use crate::config::GeneratorConfig;

/// Title of the books that do not have one.
pub const DEFAULT_TITLE: &str = "Word Search";

/// Parameters of a book.
#[derive(Debug, Clone)]
pub struct BookRequest {
    pub title: Option<String>,

    /// Word pool shared by all the puzzles.
    pub words: Vec<String>,

    /// Number of puzzles.
    pub puzzles: usize,

    /// Configuration of each puzzle.
    pub config: GeneratorConfig,

    /// Number of worker threads.
    pub jobs: usize,

    /// Base seed of the random generators.
    pub seed: u64,
}

/// Generated book.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PuzzleBook {
    pub title: String,

    /// Generation date, RFC 3339.
    pub timestamp: String,

    pub puzzles: Vec<Puzzle>,
}

impl PuzzleBook {
    /// Number of puzzles that hold fewer words than requested.
    pub fn partial_count(&self) -> usize {
        self.puzzles.iter().filter(|p| p.is_partial()).count()
    }

    /// Total number of placed words.
    pub fn placed_count(&self) -> usize {
        self.puzzles.iter().map(|p| p.placed).sum()
    }
}

/// Draw the words of the next puzzle.
///
/// The words are taken among the ones that are not in `used`. When not enough words are left,
/// `used` is reset and the whole pool is available again.
pub fn select_words<R: rand::Rng + ?Sized>(
    pool: &[String],
    count: usize,
    used: &mut HashSet<String>,
    rng: &mut R,
) -> Vec<String> {
    let mut available: Vec<&String> = pool.iter().filter(|w| !used.contains(*w)).collect();
    if available.len() < count {
        debug!("Only {} unused words left, reusing the word pool", available.len());
        used.clear();
        available = pool.iter().collect();
    }
    let selection: Vec<String> = available
        .choose_multiple(rng, count)
        .map(|w| (*w).clone())
        .collect();
    for word in &selection {
        used.insert(word.clone());
    }
    selection
}

/// Generate the puzzles of a book.
///
/// # Errors
///
/// The configuration must be valid, and the word pool must hold at least one word.
pub fn generate_book(request: &BookRequest) -> Result<PuzzleBook, GeneratorError> {
    request.config.validate()?;
    if request.words.iter().all(|w| w.trim().is_empty()) {
        return Err(GeneratorError::EmptyWordList);
    }

    let start: Instant = Instant::now();
    let search: WordSearch = WordSearch::new(request.config.clone());
    let pool: Vec<String> = search.normalize(&request.words);
    if pool.is_empty() {
        return Err(GeneratorError::EmptyWordList);
    }

    // Word selection is sequential so that it does not depend on the workers
    let mut selection_rng: StdRng = StdRng::seed_from_u64(request.seed);
    let mut used: HashSet<String> = HashSet::new();
    let (job_sender, job_receiver): (Sender<(usize, Vec<String>)>, Receiver<(usize, Vec<String>)>) =
        async_channel::unbounded();
    for index in 0..request.puzzles {
        let words: Vec<String> = select_words(
            &pool,
            request.config.words_per_puzzle,
            &mut used,
            &mut selection_rng,
        );
        // The receiver is still alive, so the unbounded channel cannot fail
        let _ = job_sender.send_blocking((index, words));
    }
    job_sender.close();

    type PuzzleResult = (usize, Result<Puzzle, GeneratorError>);
    let (result_sender, result_receiver): (Sender<PuzzleResult>, Receiver<PuzzleResult>) =
        async_channel::unbounded();
    let workers: usize = request.jobs.clamp(1, request.puzzles.max(1));
    debug!("Generating {} puzzles with {workers} workers", request.puzzles);

    thread::scope(|scope| {
        for worker in 0..workers {
            let jobs: Receiver<(usize, Vec<String>)> = job_receiver.clone();
            let results: Sender<PuzzleResult> = result_sender.clone();
            let search: &WordSearch = &search;
            let seed: u64 = request.seed;
            scope.spawn(move || {
                while let Ok((index, words)) = jobs.recv_blocking() {
                    debug!("Worker {worker}: puzzle {index}");
                    let mut rng: StdRng =
                        StdRng::seed_from_u64(seed.wrapping_add(1).wrapping_add(index as u64));
                    let puzzle: Result<Puzzle, GeneratorError> = search.generate(&words, &mut rng);
                    if results.send_blocking((index, puzzle)).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(result_sender);

    let mut results: Vec<PuzzleResult> = Vec::with_capacity(request.puzzles);
    while let Ok(result) = result_receiver.try_recv() {
        results.push(result);
    }
    results.sort_by_key(|(index, _)| *index);

    let mut puzzles: Vec<Puzzle> = Vec::with_capacity(results.len());
    for (index, result) in results {
        let puzzle: Puzzle = result?;
        if puzzle.is_partial() {
            warn!(
                "Puzzle {}: only {}/{} words placed",
                index + 1,
                puzzle.placed,
                puzzle.target
            );
        }
        puzzles.push(puzzle);
    }

    let now: DateTime<Local> = Local::now();
    let book: PuzzleBook = PuzzleBook {
        title: request
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        timestamp: now.to_rfc3339(),
        puzzles,
    };
    info!(
        "Generated {} puzzles in {:.2}s ({} under target)",
        book.puzzles.len(),
        start.elapsed().as_secs_f32(),
        book.partial_count()
    );
    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::engine::Strategy;

    fn pool(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn request(jobs: usize) -> BookRequest {
        BookRequest {
            title: Some("Birds".to_string()),
            words: pool(&[
                "ROBIN", "EAGLE", "HERON", "FINCH", "RAVEN", "CRANE", "STORK", "SWIFT",
            ]),
            puzzles: 3,
            config: GeneratorConfig {
                rows: 8,
                columns: 8,
                words_per_puzzle: 4,
                strategy: Strategy::Greedy,
                max_fallback_tries: 500,
                fallback_attempts: 10,
                ..Default::default()
            },
            jobs,
            seed: 42,
        }
    }

    #[test]
    fn selection_avoids_used_words() {
        let words: Vec<String> = pool(&["ONE", "TWO", "SIX", "TEN"]);
        let mut used: HashSet<String> = HashSet::new();
        let mut rng: StdRng = StdRng::seed_from_u64(3);

        let first: Vec<String> = select_words(&words, 2, &mut used, &mut rng);
        let second: Vec<String> = select_words(&words, 2, &mut used, &mut rng);
        assert_eq!(first.len(), 2);
        assert!(second.iter().all(|w| !first.contains(w)));
        assert_eq!(used.len(), 4);

        // The pool is exhausted, so it starts over
        let third: Vec<String> = select_words(&words, 3, &mut used, &mut rng);
        assert_eq!(third.len(), 3);
        assert_eq!(used.len(), 3);
    }

    #[test]
    fn book_holds_every_puzzle_in_order() {
        let book: PuzzleBook = generate_book(&request(2)).expect("valid request");
        assert_eq!(book.title, "Birds");
        assert_eq!(book.puzzles.len(), 3);
        assert_eq!(book.partial_count(), 0);
        assert_eq!(book.placed_count(), 12);
        assert!(DateTime::parse_from_rfc3339(&book.timestamp).is_ok());
    }

    #[test]
    fn worker_count_does_not_change_the_book() {
        let one: PuzzleBook = generate_book(&request(1)).expect("valid request");
        let three: PuzzleBook = generate_book(&request(3)).expect("valid request");
        let grids = |b: &PuzzleBook| b.puzzles.iter().map(|p| p.grid.clone()).collect::<Vec<_>>();
        assert_eq!(grids(&one), grids(&three));
    }

    #[test]
    fn invalid_requests_are_rejected() {
        let mut empty: BookRequest = request(1);
        empty.words = pool(&["", "  "]);
        assert_eq!(generate_book(&empty), Err(GeneratorError::EmptyWordList));

        let mut zero: BookRequest = request(1);
        zero.config.rows = 0;
        assert_eq!(generate_book(&zero), Err(GeneratorError::ZeroSizeGrid));
    }
}
