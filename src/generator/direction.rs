/*
direction.rs

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

//! The eight compass directions a word can be written along, and the usage counter that
//! the strategies use to keep the puzzle visually varied.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

/// Direction of a word in the grid.
///
/// The discriminant is used as an index in [`DirectionUsage`].
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, FromRepr)]
#[repr(usize)]
pub enum Direction {
    East,
    South,
    West,
    North,
    SouthEast,
    SouthWest,
    NorthEast,
    NorthWest,
}

impl Direction {
    /// Number of directions.
    pub const COUNT: usize = 8;

    /// All the directions, in their canonical order.
    pub const ALL: [Direction; Direction::COUNT] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthEast,
        Direction::NorthWest,
    ];

    /// Unit vector `(Δrow, Δcol)` of the direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::North => (-1, 0),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
            Direction::NorthEast => (-1, 1),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Direction pointing the other way.
    pub fn reverse(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::North => Direction::South,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    /// Whether the given direction is this direction or its reverse.
    pub fn same_axis(self, other: Direction) -> bool {
        self == other || self.reverse() == other
    }

    /// Direction of the unit vector, or None for `(0, 0)` and non-unit vectors.
    pub fn from_delta(drow: isize, dcol: isize) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| d.delta() == (drow, dcol))
    }

    /// Direction going from `start` to `end`, derived from the signs of the offsets.
    ///
    /// Return None when both coordinates are equal or when the two cells are not on the same
    /// row, column, or diagonal.
    pub fn between(start: (usize, usize), end: (usize, usize)) -> Option<Direction> {
        let drow: isize = end.0 as isize - start.0 as isize;
        let dcol: isize = end.1 as isize - start.1 as isize;
        if drow != 0 && dcol != 0 && drow.abs() != dcol.abs() {
            return None;
        }
        Direction::from_delta(drow.signum(), dcol.signum())
    }

    /// Cell reached after `steps` unit steps from `(row, col)`, if it lies inside a grid of the
    /// given size.
    pub fn step(
        self,
        (row, col): (usize, usize),
        steps: usize,
        rows: usize,
        columns: usize,
    ) -> Option<(usize, usize)> {
        let (drow, dcol) = self.delta();
        let r: usize = row.checked_add_signed(drow * steps as isize)?;
        let c: usize = col.checked_add_signed(dcol * steps as isize)?;
        if r < rows && c < columns {
            Some((r, c))
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::East => write!(f, "E"),
            Direction::South => write!(f, "S"),
            Direction::West => write!(f, "W"),
            Direction::North => write!(f, "N"),
            Direction::SouthEast => write!(f, "SE"),
            Direction::SouthWest => write!(f, "SW"),
            Direction::NorthEast => write!(f, "NE"),
            Direction::NorthWest => write!(f, "NW"),
        }
    }
}

/// Number of placements using each direction.
///
/// Incremented when a word is placed, decremented when a word is removed (backtracking).
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectionUsage {
    counts: [usize; Direction::COUNT],
}

impl DirectionUsage {
    /// Create a [`DirectionUsage`] object with all the counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of placements using the direction.
    pub fn get(&self, direction: Direction) -> usize {
        self.counts[direction as usize]
    }

    /// Record a new placement along the direction.
    pub fn increment(&mut self, direction: Direction) {
        self.counts[direction as usize] += 1;
    }

    /// Forget a placement along the direction.
    pub fn decrement(&mut self, direction: Direction) {
        let count: &mut usize = &mut self.counts[direction as usize];
        *count = count.saturating_sub(1);
    }

    /// Total number of placements recorded.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Directions sorted by increasing usage. The sort is stable, so directions with the same
    /// usage keep the order of `order`.
    pub fn least_used_first(&self, order: &[Direction]) -> Vec<Direction> {
        let mut sorted: Vec<Direction> = order.to_vec();
        sorted.sort_by_key(|d| self.get(*d));
        sorted
    }

    /// Iterate over the directions and their counters.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter_map(|(i, count)| Direction::from_repr(i).map(|d| (d, *count)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_direction_is_a_unit_vector() {
        for d in Direction::ALL {
            let (drow, dcol) = d.delta();
            assert!((drow, dcol) != (0, 0));
            assert!(drow.abs() <= 1 && dcol.abs() <= 1);
            assert_eq!(Direction::from_delta(drow, dcol), Some(d));
            assert_eq!(d.reverse().reverse(), d);
            assert!(d.same_axis(d.reverse()));
        }
        assert_eq!(Direction::from_delta(0, 0), None);
    }

    #[test]
    fn between_follows_the_offsets() {
        assert_eq!(Direction::between((2, 2), (2, 5)), Some(Direction::East));
        assert_eq!(Direction::between((4, 4), (1, 1)), Some(Direction::NorthWest));
        assert_eq!(Direction::between((0, 3), (3, 0)), Some(Direction::SouthWest));
        assert_eq!(Direction::between((0, 0), (1, 2)), None);
        assert_eq!(Direction::between((1, 1), (1, 1)), None);
    }

    #[test]
    fn step_stays_inside_the_grid() {
        assert_eq!(Direction::East.step((0, 0), 4, 5, 5), Some((0, 4)));
        assert_eq!(Direction::East.step((0, 0), 5, 5, 5), None);
        assert_eq!(Direction::North.step((0, 0), 1, 5, 5), None);
        assert_eq!(Direction::SouthWest.step((0, 4), 4, 5, 5), Some((4, 0)));
    }

    #[test]
    fn usage_counts_and_orders_directions() {
        let mut usage: DirectionUsage = DirectionUsage::new();
        usage.increment(Direction::East);
        usage.increment(Direction::East);
        usage.increment(Direction::North);
        usage.decrement(Direction::South);
        assert_eq!(usage.total(), 3);
        assert_eq!(usage.get(Direction::South), 0);

        let sorted: Vec<Direction> = usage.least_used_first(&Direction::ALL);
        assert_eq!(sorted.last(), Some(&Direction::East));
        assert_eq!(sorted[sorted.len() - 2], Direction::North);
        assert_eq!(sorted[0], Direction::South);
        assert_eq!(usage.iter().count(), Direction::COUNT);
    }
}
