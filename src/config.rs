/*
config.rs

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

//! Constants and tunable parameters of the generator.
//!
//! [`GeneratorConfig`] can be loaded from a JSON file. Missing keys take their default value:
//!
//! ```json
//! {
//!     "rows": 12,
//!     "columns": 12,
//!     "words_per_puzzle": 20,
//!     "strategy": "greedy"
//! }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::generator::GeneratorError;
use crate::generator::engine::Strategy;

/// Copyright notice displayed by `--version`.
pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Copyright 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law."
);

/// Letters used to fill the empty cells.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Shortest word accepted from a word list.
pub const MIN_WORD_LENGTH: usize = 4;

/// Longest word accepted from a word list.
pub const MAX_WORD_LENGTH: usize = 10;

/// Default number of rows.
pub const PUZZLE_ROWS: usize = 14;

/// Default number of columns.
pub const PUZZLE_COLUMNS: usize = 17;

/// Default number of words per puzzle.
pub const WORDS_PER_PUZZLE: usize = 50;

/// Default base number of random tries for one word.
pub const MAX_FALLBACK_TRIES: usize = 20000;

/// Parameters of the generator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of rows of the grid.
    pub rows: usize,

    /// Number of columns of the grid.
    pub columns: usize,

    /// Number of words to place in each puzzle.
    pub words_per_puzzle: usize,

    /// Letters used to fill the empty cells. They are uppercased, and characters that are not
    /// letters are ignored.
    pub alphabet: String,

    /// Strategy that runs first.
    pub strategy: Strategy,

    /// Base number of random tries for one word.
    pub max_fallback_tries: usize,

    /// Number of greedy attempts.
    pub greedy_attempts: usize,

    /// Maximum recursion depth of the backtracking strategy.
    pub max_depth: usize,

    /// Maximum number of nodes visited by the backtracking strategy.
    pub backtracking_node_limit: usize,

    /// Maximum number of fallback attempts.
    pub fallback_attempts: usize,

    /// Time budget of the fallback strategy, in seconds.
    pub fallback_time_budget_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: PUZZLE_ROWS,
            columns: PUZZLE_COLUMNS,
            words_per_puzzle: WORDS_PER_PUZZLE,
            alphabet: ALPHABET.to_string(),
            strategy: Strategy::default(),
            max_fallback_tries: MAX_FALLBACK_TRIES,
            greedy_attempts: 3,
            max_depth: 20,
            backtracking_node_limit: 20000,
            fallback_attempts: 100,
            fallback_time_budget_secs: 120,
        }
    }
}

impl GeneratorConfig {
    /// Load the configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// The file cannot be read or is not a valid JSON configuration.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        debug!("Loading configuration from {path:?}");
        let file: File = File::open(path)?;
        let reader: BufReader<File> = BufReader::new(file);
        let config: GeneratorConfig = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Uppercase letters of the alphabet, in order, without duplicates.
    pub fn fill_letters(&self) -> Vec<char> {
        let mut letters: Vec<char> = Vec::new();
        for letter in self
            .alphabet
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_uppercase)
        {
            if letter.is_alphabetic() && !letters.contains(&letter) {
                letters.push(letter);
            }
        }
        letters
    }

    /// Check that a puzzle can be generated with this configuration.
    ///
    /// # Errors
    ///
    /// The grid has no row or no column, the alphabet holds no letter, or the number of words
    /// per puzzle is zero.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(GeneratorError::ZeroSizeGrid);
        }
        if self.fill_letters().is_empty() {
            return Err(GeneratorError::EmptyAlphabet);
        }
        if self.words_per_puzzle == 0 {
            return Err(GeneratorError::ZeroTarget);
        }
        Ok(())
    }
}
