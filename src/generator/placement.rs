/*
placement.rs

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

//! Write words into the grid and take them out again.
//!
//! [`place`] and [`remove`] are the only primitives that mutate the grid during a search.
//! [`remove`] preserves the cells that look like crossings with other words: a cell is left
//! untouched when one of its neighbors outside the word's own axis holds a letter.
//! This is a local approximation of shared ownership. It never clears a letter that another
//! word still needs, but it can keep a letter that no placed word uses anymore, for example
//! when a word is removed while running alongside another word.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Deref;

use super::direction::Direction;
use super::grid::{Coord, Grid};

/// A word written in the grid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Uppercase word.
    pub word: String,

    /// First letter.
    pub start: Coord,

    /// Last letter: `start + direction × (len - 1)`.
    pub end: Coord,

    /// Reading direction.
    pub direction: Direction,
}

impl Placement {
    /// Number of letters in the word.
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    /// Whether the word has no letters (never true for a placement made by [`place`]).
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// Cells covered by the word, from the first letter to the last one.
    pub fn cells(&self) -> Vec<Coord> {
        let (drow, dcol) = self.direction.delta();
        (0..self.len() as isize)
            .map(|i| {
                (
                    (self.start.0 as isize + drow * i) as usize,
                    (self.start.1 as isize + dcol * i) as usize,
                )
            })
            .collect()
    }
}

/// Words placed so far, indexed by the uppercase word.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct PlacementSet(BTreeMap<String, Placement>);

impl Deref for PlacementSet {
    type Target = BTreeMap<String, Placement>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PlacementSet {
    /// Create an empty [`PlacementSet`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a placement. An earlier placement of the same word is replaced.
    pub fn insert(&mut self, placement: Placement) {
        self.0.insert(placement.word.clone(), placement);
    }

    /// Forget the placement of the word.
    pub fn remove(&mut self, word: &str) -> Option<Placement> {
        self.0.remove(word)
    }
}

/// Check whether the word fits at the given position.
///
/// Every cell of the path must be inside the grid and either empty or already holding the
/// letter that the word needs there.
/// Return the number of crossings (cells already holding the right letter), or None when the
/// word does not fit.
pub fn fits(word: &str, grid: &Grid, start: Coord, direction: Direction) -> Option<usize> {
    let mut matches: usize = 0;
    for (i, letter) in word.chars().enumerate() {
        let cell: Coord = direction.step(start, i, grid.rows(), grid.columns())?;
        match grid.get(cell) {
            None => (),
            Some(l) if l == letter => matches += 1,
            Some(_) => return None,
        }
    }
    Some(matches)
}

/// Write the word in the grid and return its [`Placement`].
///
/// The caller must have validated the position, for example with [`fits`]; the path is not
/// checked again.
pub fn place(word: &str, grid: &mut Grid, row: usize, col: usize, direction: Direction) -> Placement {
    let (drow, dcol) = direction.delta();
    let len: isize = word.chars().count() as isize;
    for (i, letter) in word.chars().enumerate() {
        let cell: Coord = (
            (row as isize + drow * i as isize) as usize,
            (col as isize + dcol * i as isize) as usize,
        );
        grid.set(cell, letter);
    }
    Placement {
        word: word.to_string(),
        start: (row, col),
        end: (
            (row as isize + drow * (len - 1)) as usize,
            (col as isize + dcol * (len - 1)) as usize,
        ),
        direction,
    }
}

/// Whether a neighbor of the cell, outside the given axis, holds a letter.
fn has_cross_neighbor(grid: &Grid, cell: Coord, axis: Direction) -> bool {
    Direction::ALL
        .into_iter()
        .filter(|d| !d.same_axis(axis))
        .filter_map(|d| d.step(cell, 1, grid.rows(), grid.columns()))
        .any(|neighbor| grid.get(neighbor).is_some())
}

/// Take the word out of the grid, keeping the cells that look shared with other words.
///
/// A cell is cleared only when none of its neighbors outside the word's axis hold a letter.
/// The walk stops at the first cell outside the grid.
pub fn remove(word: &str, grid: &mut Grid, row: usize, col: usize, direction: Direction) {
    for i in 0..word.chars().count() {
        let Some(cell) = direction.step((row, col), i, grid.rows(), grid.columns()) else {
            break;
        };
        if !has_cross_neighbor(grid, cell, direction) {
            grid.clear(cell);
        }
    }
}
