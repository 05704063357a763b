/*
layout.rs

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

//! State of one placement attempt: the grid, the placed words, and the direction usage.
//!
//! Every strategy mutates a [`Layout`] through [`Layout::place_word`] and
//! [`Layout::remove_word`] only, so the three parts never drift apart.
//! The layout also counts how many placed words go through each cell.
//! Removing a word clears exactly the cells that no other placed word uses, which makes a
//! place/remove pair leave the layout as it was found.

use super::GeneratorError;
use super::candidates::{Candidate, find_candidates, find_candidates_in};
use super::direction::{Direction, DirectionUsage};
use super::evaluation::evaluate;
use super::grid::{Coord, Grid};
use super::placement::{Placement, PlacementSet, fits, place};

/// Grid, placed words, and direction usage of one attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    grid: Grid,
    placements: PlacementSet,
    usage: DirectionUsage,

    /// Number of placed words going through each cell, row after row.
    owners: Vec<u16>,
}

impl Layout {
    /// Create an empty layout.
    ///
    /// # Errors
    ///
    /// The grid must have at least one row and one column.
    pub fn new(rows: usize, columns: usize) -> Result<Self, GeneratorError> {
        Ok(Self {
            grid: Grid::new(rows, columns)?,
            placements: PlacementSet::new(),
            usage: DirectionUsage::new(),
            owners: vec![0; rows * columns],
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn placements(&self) -> &PlacementSet {
        &self.placements
    }

    pub fn usage(&self) -> &DirectionUsage {
        &self.usage
    }

    /// Number of placed words.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Whether the word is already placed.
    pub fn contains(&self, word: &str) -> bool {
        self.placements.contains_key(word)
    }

    /// Check whether the word fits at the given position. See [`fits`].
    pub fn fits(&self, word: &str, start: Coord, direction: Direction) -> Option<usize> {
        fits(word, &self.grid, start, direction)
    }

    /// Ranked candidates for the word. See [`find_candidates`].
    pub fn candidates(&self, word: &str) -> Vec<Candidate> {
        find_candidates(word, &self.grid, &self.usage)
    }

    /// Ranked candidates for the word, with the given direction enumeration order.
    pub fn candidates_in(&self, word: &str, order: &[Direction]) -> Vec<Candidate> {
        find_candidates_in(word, &self.grid, &self.usage, order)
    }

    fn index(&self, (row, col): Coord) -> usize {
        row * self.grid.columns() + col
    }

    /// Write the word and record it.
    ///
    /// The position must have been validated (with [`Layout::fits`] or by a candidate).
    /// If the word is already placed, the earlier placement is removed first.
    pub fn place_word(&mut self, word: &str, (row, col): Coord, direction: Direction) -> Placement {
        if self.contains(word) {
            self.remove_word(word);
        }
        let placement: Placement = place(word, &mut self.grid, row, col, direction);
        for cell in placement.cells() {
            let i: usize = self.index(cell);
            self.owners[i] += 1;
        }
        self.usage.increment(direction);
        self.placements.insert(placement.clone());
        placement
    }

    /// Commit a candidate returned by [`Layout::candidates`].
    pub fn place_candidate(&mut self, word: &str, candidate: &Candidate) -> Placement {
        self.place_word(word, candidate.start(), candidate.direction)
    }

    /// Take the word out of the layout.
    ///
    /// Cells still used by another placed word keep their letter.
    /// Return the removed placement, or None if the word was not placed.
    pub fn remove_word(&mut self, word: &str) -> Option<Placement> {
        let placement: Placement = self.placements.remove(word)?;
        for cell in placement.cells() {
            let i: usize = self.index(cell);
            self.owners[i] = self.owners[i].saturating_sub(1);
            if self.owners[i] == 0 {
                self.grid.clear(cell);
            }
        }
        self.usage.decrement(placement.direction);
        Some(placement)
    }

    /// Evaluator score of the layout for the given target.
    pub fn score(&self, target: usize) -> f64 {
        evaluate(&self.grid, &self.placements, target)
    }

    /// Give up the layout and keep the grid and the placed words.
    pub fn into_parts(self) -> (Grid, PlacementSet) {
        (self.grid, self.placements)
    }
}

/// Layout produced by a strategy, with its evaluator score.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub layout: Layout,
    pub score: f64,
}

impl Outcome {
    /// Score the layout for the given target.
    pub fn new(layout: Layout, target: usize) -> Self {
        let score: f64 = layout.score(target);
        Self { layout, score }
    }

    /// Number of placed words.
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    /// Whether this outcome places more words than the other one, or as many words with a
    /// higher score.
    pub fn beats(&self, other: &Outcome) -> bool {
        self.len() > other.len() || (self.len() == other.len() && self.score > other.score)
    }
}
