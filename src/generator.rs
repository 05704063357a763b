/*
generator.rs

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

//! Place words in a letter grid and generate word-search puzzles.
//!
//! The building blocks, from the bottom up:
//!
//! * [`grid::Grid`] is the letter matrix. [`direction::Direction`] lists the eight directions
//!   a word can follow, and [`direction::DirectionUsage`] counts how often each one is used.
//! * [`placement`] writes a word in the grid and takes it out again.
//! * [`candidates::find_candidates`] lists and ranks every spot where a word fits.
//!   [`random_fit`] tries random spots instead.
//! * [`evaluation::evaluate`] scores a whole layout, so that attempts can be compared.
//! * [`layout::Layout`] keeps the grid, the placed words, and the direction usage of one
//!   attempt in sync.
//!
//! The strategies build layouts from a word list:
//! [`greedy`], [`backtracking`], [`fallback`], and [`sequential`].
//!
//! [`engine::WordSearch`] validates the input, runs a strategy, falls back to the
//! [`fallback`] strategy when the target is not reached, and fills the empty cells.
//! The result is an [`engine::Puzzle`] object.
//!
//! [`book::generate_book`] generates several puzzles in parallel worker threads.

use std::error::Error;
use std::fmt;

pub mod backtracking;
pub mod book;
pub mod candidates;
pub mod direction;
pub mod engine;
pub mod evaluation;
pub mod fallback;
pub mod greedy;
pub mod grid;
pub mod layout;
pub mod placement;
pub mod random_fit;
pub mod sequential;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum GeneratorError {
    /// The grid has no row or no column.
    ZeroSizeGrid,

    /// No word to place.
    EmptyWordList,

    /// No letter to fill the grid with.
    EmptyAlphabet,

    /// The number of words to place is zero.
    ZeroTarget,
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GeneratorError::ZeroSizeGrid => write!(f, "the grid must have at least one row and one column"),
            GeneratorError::EmptyWordList => write!(f, "the word list is empty"),
            GeneratorError::EmptyAlphabet => write!(f, "the alphabet is empty"),
            GeneratorError::ZeroTarget => write!(f, "the number of words per puzzle must be at least 1"),
        }
    }
}

impl Error for GeneratorError {}
