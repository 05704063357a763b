/*
grid.rs

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

//! Rectangular letter grid.
//!
//! A cell is either empty (`None`) or holds one uppercase letter.
//! While a strategy searches for a layout, empty cells are free for new words.
//! Once the layout is chosen, [`Grid::fill_remaining`] puts a random letter in every empty
//! cell so that no blank is left.

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::GeneratorError;

/// Zero-indexed `(row, column)` coordinates of a cell.
pub type Coord = (usize, usize);

/// Letter grid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows.
    rows: usize,

    /// Number of columns.
    columns: usize,

    /// Cells, row after row.
    cells: Vec<Option<char>>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// # Errors
    ///
    /// A grid without any row or column cannot hold anything and is rejected.
    pub fn new(rows: usize, columns: usize) -> Result<Self, GeneratorError> {
        if rows == 0 || columns == 0 {
            return Err(GeneratorError::ZeroSizeGrid);
        }
        Ok(Self {
            rows,
            columns,
            cells: vec![None; rows * columns],
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Longest line (row, column, or diagonal) of the grid.
    pub fn longest_line(&self) -> usize {
        self.rows.max(self.columns)
    }

    /// Whether the coordinates are inside the grid.
    pub fn contains(&self, (row, col): Coord) -> bool {
        row < self.rows && col < self.columns
    }

    /// Letter in the cell, or None if the cell is empty or outside the grid.
    pub fn get(&self, (row, col): Coord) -> Option<char> {
        if self.contains((row, col)) {
            self.cells[row * self.columns + col]
        } else {
            None
        }
    }

    /// Whether the cell holds no letter. Cells outside the grid are reported as empty.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.get((row, col)).is_none()
    }

    /// Write a letter in the cell. Coordinates outside the grid are ignored.
    pub fn set(&mut self, (row, col): Coord, letter: char) {
        if self.contains((row, col)) {
            self.cells[row * self.columns + col] = Some(letter);
        }
    }

    /// Empty the cell. Coordinates outside the grid are ignored.
    pub fn clear(&mut self, (row, col): Coord) {
        if self.contains((row, col)) {
            self.cells[row * self.columns + col] = None;
        }
    }

    /// Number of cells holding a letter.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Whether every cell holds a letter.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Put a random letter from the alphabet in every empty cell.
    ///
    /// Must be called once, after the layout is final. An empty alphabet leaves the grid
    /// untouched (the engine rejects empty alphabets before searching).
    pub fn fill_remaining<R: Rng + ?Sized>(&mut self, alphabet: &[char], rng: &mut R) {
        let mut filled: usize = 0;
        for cell in self.cells.iter_mut().filter(|c| c.is_none()) {
            if let Some(letter) = alphabet.choose(rng) {
                *cell = Some(*letter);
                filled += 1;
            }
        }
        debug!("Filled {filled} empty cells with random letters");
    }

    /// Return the grid as rows of letters. Empty cells are rendered as `.`.
    pub fn to_rows(&self) -> Vec<Vec<char>> {
        self.cells
            .chunks(self.columns)
            .map(|row| row.iter().map(|c| c.unwrap_or('.')).collect())
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.to_rows() {
            let line: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
