/*
engine.rs

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

//! Generate one puzzle: validate the input, run the strategies, and fill the grid.
//!
//! The configured strategy runs first. When it places fewer words than the target, the
//! fallback strategy runs on the full word list and the better of the two layouts is kept.
//! The remaining empty cells are then filled with random letters.

use clap::ValueEnum;
use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use super::GeneratorError;
use super::backtracking::backtracking_search;
use super::direction::Direction;
use super::fallback::fallback_search;
use super::grid::{Coord, Grid};
use super::greedy::greedy_search;
use super::layout::Outcome;
use super::placement::PlacementSet;
use super::sequential::sequential_search;
use crate::config::GeneratorConfig;

/// Placement strategy.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Longest words first, each one at its best spot, a few attempts.
    Greedy,

    /// Depth-bounded search over the best spots of each word.
    #[default]
    Backtracking,

    /// Random restarts with adaptive word pools.
    Fallback,

    /// Words in the given order, each one where it crosses the most.
    Sequential,
}

impl Strategy {
    /// All the strategies.
    pub const ALL: [Strategy; 4] = [
        Strategy::Greedy,
        Strategy::Backtracking,
        Strategy::Fallback,
        Strategy::Sequential,
    ];

    /// One-line description of the strategy.
    pub fn description(&self) -> &'static str {
        match self {
            Strategy::Greedy => "longest words first, best spot for each word",
            Strategy::Backtracking => "depth-bounded search with undo (default)",
            Strategy::Fallback => "random restarts, shorter words as attempts fail",
            Strategy::Sequential => "words in the given order, most crossings first",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strategy::Greedy => write!(f, "greedy"),
            Strategy::Backtracking => write!(f, "backtracking"),
            Strategy::Fallback => write!(f, "fallback"),
            Strategy::Sequential => write!(f, "sequential"),
        }
    }
}

/// Position of a placed word, for drawing the solution.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct WordLocation {
    /// First letter.
    pub start: Coord,

    /// Last letter.
    pub end: Coord,

    pub direction: Direction,
}

/// Generated puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Puzzle {
    pub rows: usize,
    pub columns: usize,

    /// Letters, row after row. No cell is empty.
    pub grid: Vec<Vec<char>>,

    /// Placed words and their position, sorted by word.
    pub words: BTreeMap<String, WordLocation>,

    /// Number of placed words.
    pub placed: usize,

    /// Number of words the engine tried to place.
    pub target: usize,

    /// Strategy that produced the layout.
    pub strategy: Strategy,

    /// Evaluator score of the layout.
    pub score: f64,
}

impl Puzzle {
    fn new(grid: &Grid, placements: &PlacementSet, target: usize, strategy: Strategy, score: f64) -> Self {
        let words: BTreeMap<String, WordLocation> = placements
            .values()
            .map(|p| {
                (
                    p.word.clone(),
                    WordLocation {
                        start: p.start,
                        end: p.end,
                        direction: p.direction,
                    },
                )
            })
            .collect();
        Self {
            rows: grid.rows(),
            columns: grid.columns(),
            grid: grid.to_rows(),
            placed: words.len(),
            words,
            target,
            strategy,
            score,
        }
    }

    /// Letter in the cell, or None outside the grid.
    pub fn letter(&self, (row, col): Coord) -> Option<char> {
        self.grid.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Whether fewer words than the target were placed.
    pub fn is_partial(&self) -> bool {
        self.placed < self.target
    }

    /// Input words that are not in the puzzle (case-insensitive).
    pub fn missing<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        words
            .iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .filter(|w| !w.is_empty() && !self.words.contains_key(w) && seen.insert(w.clone()))
            .collect()
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in &self.grid {
            let line: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        writeln!(f)?;
        let width: usize = self.words.keys().map(|w| w.chars().count()).max().unwrap_or(0);
        for (word, location) in &self.words {
            writeln!(
                f,
                "{word:<width$}  ({:>2}, {:>2}) -> ({:>2}, {:>2})  {}",
                location.start.0,
                location.start.1,
                location.end.0,
                location.end.1,
                location.direction
            )?;
        }
        Ok(())
    }
}

/// Word-search puzzle generator.
pub struct WordSearch {
    config: GeneratorConfig,
}

impl WordSearch {
    /// Create a [`WordSearch`] object.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Trim and uppercase the words, and drop the blank and duplicate ones.
    /// Words too long for every line of the grid are dropped with a warning.
    pub fn normalize<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        let longest: usize = self.config.rows.max(self.config.columns);
        let mut seen: HashSet<String> = HashSet::new();
        let mut usable: Vec<String> = Vec::with_capacity(words.len());

        for word in words {
            let word: String = word.as_ref().trim().to_uppercase();
            if word.is_empty() || !seen.insert(word.clone()) {
                continue;
            }
            if word.chars().count() > longest {
                warn!("{word} is longer than any line of the grid and is ignored");
                continue;
            }
            usable.push(word);
        }
        usable
    }

    /// Generate a puzzle from the words.
    ///
    /// The result may hold fewer words than requested; this is not an error. Check
    /// [`Puzzle::is_partial`] and [`Puzzle::missing`].
    ///
    /// # Errors
    ///
    /// The configuration must be valid (see [`GeneratorConfig::validate`]) and the word list
    /// must hold at least one non-blank word.
    pub fn generate<S: AsRef<str>, R: Rng + ?Sized>(
        &self,
        words: &[S],
        rng: &mut R,
    ) -> Result<Puzzle, GeneratorError> {
        self.config.validate()?;
        if words.iter().all(|w| w.as_ref().trim().is_empty()) {
            return Err(GeneratorError::EmptyWordList);
        }

        let usable: Vec<String> = self.normalize(words);
        let target: usize = self.config.words_per_puzzle.min(usable.len());
        debug!(
            "Generating a {}x{} puzzle: {} usable words, target {target}",
            self.config.rows,
            self.config.columns,
            usable.len()
        );

        let mut strategy: Strategy = self.config.strategy;
        let mut outcome: Outcome = self.run(strategy, &usable, target, rng)?;

        if outcome.len() < target && strategy != Strategy::Fallback {
            info!(
                "{strategy} strategy placed {}/{target} words, switching to the fallback strategy",
                outcome.len()
            );
            let fallback: Outcome = self.run(Strategy::Fallback, &usable, target, rng)?;
            if fallback.beats(&outcome) {
                outcome = fallback;
                strategy = Strategy::Fallback;
            }
        }
        if outcome.len() < target {
            warn!("Only placed {}/{target} words", outcome.len());
        }

        let score: f64 = outcome.score;
        let (mut grid, placements) = outcome.layout.into_parts();
        let alphabet: Vec<char> = self.config.fill_letters();
        grid.fill_remaining(&alphabet, rng);
        Ok(Puzzle::new(&grid, &placements, target, strategy, score))
    }

    fn run<R: Rng + ?Sized>(
        &self,
        strategy: Strategy,
        words: &[String],
        target: usize,
        rng: &mut R,
    ) -> Result<Outcome, GeneratorError> {
        match strategy {
            Strategy::Greedy => greedy_search(words, target, &self.config, rng),
            Strategy::Backtracking => backtracking_search(words, target, &self.config, rng),
            Strategy::Fallback => fallback_search(words, target, &self.config, rng),
            Strategy::Sequential => sequential_search(words, target, &self.config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn engine(rows: usize, columns: usize, count: usize, strategy: Strategy) -> WordSearch {
        WordSearch::new(GeneratorConfig {
            rows,
            columns,
            words_per_puzzle: count,
            strategy,
            max_fallback_tries: 500,
            fallback_attempts: 10,
            backtracking_node_limit: 500,
            ..Default::default()
        })
    }

    #[test]
    fn normalize_trims_uppercases_and_dedupes() {
        let search: WordSearch = engine(5, 5, 10, Strategy::Greedy);
        let words: Vec<String> = search.normalize(&[" cat", "CAT", "", "dog ", "giraffes"]);
        assert_eq!(words, vec!["CAT".to_string(), "DOG".to_string()]);
    }

    #[test]
    fn invalid_input_is_rejected() {
        let mut rng: StdRng = StdRng::seed_from_u64(0);
        let search: WordSearch = engine(0, 5, 2, Strategy::Greedy);
        assert_eq!(search.generate(&["CAT"], &mut rng), Err(GeneratorError::ZeroSizeGrid));

        let search: WordSearch = engine(5, 5, 2, Strategy::Greedy);
        let empty: [&str; 0] = [];
        assert_eq!(search.generate(&empty, &mut rng), Err(GeneratorError::EmptyWordList));
        assert_eq!(search.generate(&["  "], &mut rng), Err(GeneratorError::EmptyWordList));

        let search: WordSearch = engine(5, 5, 0, Strategy::Greedy);
        assert_eq!(search.generate(&["CAT"], &mut rng), Err(GeneratorError::ZeroTarget));
    }

    #[test]
    fn every_strategy_fills_the_grid() {
        for strategy in Strategy::ALL {
            let mut rng: StdRng = StdRng::seed_from_u64(17);
            let search: WordSearch = engine(8, 8, 4, strategy);
            let puzzle: Puzzle = search
                .generate(&["comet", "orbit", "lunar", "nova", "star"], &mut rng)
                .expect("valid input");
            assert_eq!(puzzle.placed, 4, "{strategy}");
            assert!(puzzle.grid.iter().flatten().all(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn lowercase_alphabet_fills_with_uppercase_letters() {
        let mut rng: StdRng = StdRng::seed_from_u64(8);
        let search: WordSearch = WordSearch::new(GeneratorConfig {
            alphabet: "xyz".to_string(),
            ..engine(5, 5, 1, Strategy::Greedy).config().clone()
        });
        let puzzle: Puzzle = search.generate(&["cat"], &mut rng).expect("valid input");
        assert_eq!(puzzle.placed, 1);
        assert!(puzzle.grid.iter().flatten().all(|c| c.is_uppercase()));
        assert_eq!(
            puzzle.grid.iter().flatten().filter(|c| "XYZ".contains(**c)).count(),
            5 * 5 - 3
        );
    }

    #[test]
    fn missing_words_are_reported() {
        let mut rng: StdRng = StdRng::seed_from_u64(5);
        let search: WordSearch = engine(4, 4, 5, Strategy::Sequential);
        let puzzle: Puzzle = search
            .generate(&["ant", "rhinoceros"], &mut rng)
            .expect("valid input");
        assert_eq!(puzzle.missing(&["ant", "rhinoceros"]), vec!["RHINOCEROS".to_string()]);
        assert!(!puzzle.is_partial());
        assert_eq!(puzzle.target, 1);
    }

    #[test]
    fn display_lists_the_grid_and_the_key() {
        let mut rng: StdRng = StdRng::seed_from_u64(1);
        let search: WordSearch = engine(3, 3, 1, Strategy::Sequential);
        let puzzle: Puzzle = search.generate(&["owl"], &mut rng).expect("valid input");
        let text: String = puzzle.to_string();
        assert_eq!(text.lines().count(), 3 + 1 + 1);
        assert!(text.lines().last().is_some_and(|l| l.starts_with("OWL")));
    }
}
