/*
candidates.rs

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

//! Enumerate and rank the feasible placements of a word.
//!
//! A candidate is a position and a direction where the word fits: every cell of its path is
//! inside the grid and is either empty or already holds the required letter.
//! Candidates are ranked by a quality score that favors crossings, letters next to the path,
//! central positions, and directions that are not used much yet.
//!
//! The enumeration visits `8 × rows × columns` starting points and checks up to the word
//! length for each of them. It never modifies the grid.

use std::cmp::Ordering;

use super::direction::{Direction, DirectionUsage};
use super::grid::{Coord, Grid};

/// Weight of the crossing count.
const MATCH_WEIGHT: f64 = 10.0;

/// Weight of the intersection count. Intersections are counted like crossings.
const INTERSECTION_WEIGHT: f64 = 15.0;

/// Weight of the distance to the grid center.
const CENTER_WEIGHT: f64 = 3.0;

/// Weight of the direction priority.
const DIRECTION_WEIGHT: f64 = 2.0;

/// Weight of each adjacent letter.
const ADJACENT_WEIGHT: f64 = 2.0;

/// Adjacent letters beyond this count do not improve the score.
const MAX_ADJACENT_LETTERS: usize = 8;

/// Orthogonal neighbors inspected to count adjacent letters.
const ORTHOGONAL: [Direction; 4] = [
    Direction::East,
    Direction::South,
    Direction::West,
    Direction::North,
];

/// Feasible placement of a word, not yet committed.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Cells where the word's letter is already in the grid (crossings).
    pub match_count: usize,

    /// Starting row.
    pub row: usize,

    /// Starting column.
    pub col: usize,

    /// Reading direction.
    pub direction: Direction,

    /// Letters next to the path, outside its own axis.
    pub adjacent_letters: usize,

    /// Heuristic quality. Higher is better.
    pub quality: f64,
}

impl Candidate {
    /// Starting cell.
    pub fn start(&self) -> Coord {
        (self.row, self.col)
    }
}

/// Combine the placement measurements into a quality score.
pub fn quality_score(
    match_count: usize,
    intersections: usize,
    center_factor: f64,
    direction_priority: f64,
    adjacent_letters: usize,
) -> f64 {
    match_count as f64 * MATCH_WEIGHT
        + intersections as f64 * INTERSECTION_WEIGHT
        + center_factor * CENTER_WEIGHT
        + direction_priority * DIRECTION_WEIGHT
        + adjacent_letters.min(MAX_ADJACENT_LETTERS) as f64 * ADJACENT_WEIGHT
}

/// Priority of a direction: 1 for an unused direction, lower as its share of the placements
/// grows.
pub fn direction_priority(usage: &DirectionUsage, direction: Direction) -> f64 {
    let total: usize = usage.total().max(1);
    1.0 - usage.get(direction) as f64 / total as f64
}

/// Closeness of the word's middle letter to the grid center, between 0 and 1.
fn center_factor(grid: &Grid, start: Coord, direction: Direction, len: usize) -> f64 {
    let center: (f64, f64) = ((grid.rows() / 2) as f64, (grid.columns() / 2) as f64);
    let (drow, dcol) = direction.delta();
    let half: isize = (len / 2) as isize;
    let middle: (f64, f64) = (
        (start.0 as isize + drow * half) as f64,
        (start.1 as isize + dcol * half) as f64,
    );
    let distance: f64 = ((middle.0 - center.0).powi(2) + (middle.1 - center.1).powi(2)).sqrt();
    let max_distance: f64 = (center.0.powi(2) + center.1.powi(2)).sqrt();
    if max_distance > 0.0 {
        1.0 - distance / max_distance
    } else {
        1.0
    }
}

/// Measure the word at the given position.
///
/// Return the crossing count and the number of adjacent letters, or None if the word does
/// not fit.
fn measure(word: &[char], grid: &Grid, start: Coord, direction: Direction) -> Option<(usize, usize)> {
    let mut match_count: usize = 0;
    let mut adjacent: usize = 0;

    for (i, letter) in word.iter().enumerate() {
        let cell: Coord = direction.step(start, i, grid.rows(), grid.columns())?;
        match grid.get(cell) {
            None => (),
            Some(l) if l == *letter => match_count += 1,
            Some(_) => return None,
        }
        adjacent += ORTHOGONAL
            .iter()
            .filter(|d| !d.same_axis(direction))
            .filter_map(|d| d.step(cell, 1, grid.rows(), grid.columns()))
            .filter(|neighbor| grid.get(*neighbor).is_some())
            .count();
    }
    Some((match_count, adjacent))
}

/// Return every feasible placement of the word, best first.
///
/// Directions are enumerated from the least used to the most used, so that candidates with
/// the same quality are ordered by direction usage.
pub fn find_candidates(word: &str, grid: &Grid, usage: &DirectionUsage) -> Vec<Candidate> {
    find_candidates_in(word, grid, usage, &Direction::ALL)
}

/// Return every feasible placement of the word, best first, enumerating the directions in the
/// given order (after sorting them by usage).
///
/// Candidates with the same quality are ordered by direction usage, then by enumeration
/// order.
/// The result is empty when the word fits nowhere.
pub fn find_candidates_in(
    word: &str,
    grid: &Grid,
    usage: &DirectionUsage,
    order: &[Direction],
) -> Vec<Candidate> {
    let letters: Vec<char> = word.to_uppercase().chars().collect();
    let mut candidates: Vec<Candidate> = Vec::new();
    if letters.is_empty() {
        return candidates;
    }

    for direction in usage.least_used_first(order) {
        let priority: f64 = direction_priority(usage, direction);

        for row in 0..grid.rows() {
            for col in 0..grid.columns() {
                let Some((match_count, adjacent_letters)) =
                    measure(&letters, grid, (row, col), direction)
                else {
                    continue;
                };
                let centered: f64 = center_factor(grid, (row, col), direction, letters.len());
                candidates.push(Candidate {
                    match_count,
                    row,
                    col,
                    direction,
                    adjacent_letters,
                    quality: quality_score(
                        match_count,
                        match_count,
                        centered,
                        priority,
                        adjacent_letters,
                    ),
                });
            }
        }
    }

    candidates.sort_by(|a, b| {
        b.quality
            .partial_cmp(&a.quality)
            .unwrap_or(Ordering::Equal)
            .then_with(|| usage.get(a.direction).cmp(&usage.get(b.direction)))
    });
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::placement::{fits, place};

    fn grid(rows: usize, columns: usize) -> Grid {
        Grid::new(rows, columns).expect("valid dimensions")
    }

    #[test]
    fn every_candidate_fits() {
        let mut g: Grid = grid(6, 6);
        place("HOUSE", &mut g, 0, 0, Direction::SouthEast);
        let usage: DirectionUsage = DirectionUsage::new();
        let candidates: Vec<Candidate> = find_candidates("mouse", &g, &usage);

        assert!(!candidates.is_empty());
        for c in &candidates {
            assert_eq!(fits("MOUSE", &g, c.start(), c.direction), Some(c.match_count));
        }
    }

    #[test]
    fn candidates_are_sorted_by_quality() {
        let mut g: Grid = grid(8, 8);
        place("PLANET", &mut g, 3, 1, Direction::East);
        let candidates: Vec<Candidate> = find_candidates("ANT", &g, &DirectionUsage::new());
        assert!(candidates.windows(2).all(|w| w[0].quality >= w[1].quality));
        assert!(candidates[0].match_count >= 1);
    }

    // CARTA and CARTON cannot share the whole "CART" path (the fifth letters differ), so the
    // best candidate for the second word crosses the first one on a shared letter.
    #[test]
    fn shared_prefix_words_cross() {
        let mut g: Grid = grid(10, 10);
        let mut usage: DirectionUsage = DirectionUsage::new();
        let first: Candidate = find_candidates("CARTON", &g, &usage)
            .into_iter()
            .next()
            .expect("CARTON fits in an empty grid");
        assert_eq!(first.match_count, 0);
        place("CARTON", &mut g, first.row, first.col, first.direction);
        usage.increment(first.direction);

        let second: Vec<Candidate> = find_candidates("CARTA", &g, &usage);
        assert!(second[0].match_count >= 1);
        let best: usize = second.iter().map(|c| c.match_count).max().unwrap_or(0);
        assert_eq!(second[0].match_count, best);
        assert_eq!(
            fits("CARTA", &g, second[0].start(), second[0].direction),
            Some(second[0].match_count)
        );
    }

    #[test]
    fn word_longer_than_the_grid_has_no_candidate() {
        let g: Grid = grid(3, 3);
        assert!(find_candidates("ELEPHANT", &g, &DirectionUsage::new()).is_empty());
    }

    #[test]
    fn enumeration_does_not_touch_the_grid() {
        let mut g: Grid = grid(5, 5);
        place("DOG", &mut g, 1, 1, Direction::South);
        let before: Grid = g.clone();
        let _ = find_candidates("GOD", &g, &DirectionUsage::new());
        assert_eq!(g, before);
    }

    #[test]
    fn direction_priority_favors_unused_directions() {
        let mut usage: DirectionUsage = DirectionUsage::new();
        assert_eq!(direction_priority(&usage, Direction::East), 1.0);
        usage.increment(Direction::East);
        usage.increment(Direction::East);
        usage.increment(Direction::South);
        assert!(direction_priority(&usage, Direction::East) < direction_priority(&usage, Direction::South));
        assert_eq!(direction_priority(&usage, Direction::West), 1.0);
    }

    fn find<'c>(candidates: &'c [Candidate], start: Coord, direction: Direction) -> &'c Candidate {
        candidates
            .iter()
            .find(|c| c.start() == start && c.direction == direction)
            .expect("candidate in the list")
    }

    #[test]
    fn adjacent_letters_ignore_the_word_axis() {
        let mut g: Grid = grid(5, 5);
        g.set((2, 2), 'Z');
        let candidates: Vec<Candidate> = find_candidates("AB", &g, &DirectionUsage::new());

        // Z sits below the B
        assert_eq!(find(&candidates, (1, 1), Direction::East).adjacent_letters, 1);
        // Z follows the B on the same row, along the word's own axis
        assert_eq!(find(&candidates, (2, 0), Direction::East).adjacent_letters, 0);
        assert_eq!(find(&candidates, (0, 2), Direction::South).adjacent_letters, 0);
        // Diagonal words count the four orthogonal neighbors: Z is below the A and left of the B
        assert_eq!(find(&candidates, (1, 2), Direction::SouthEast).adjacent_letters, 2);
    }

    #[test]
    fn center_factor_decreases_toward_the_corners() {
        let g: Grid = grid(5, 5);
        assert_eq!(center_factor(&g, (2, 2), Direction::East, 1), 1.0);
        assert_eq!(center_factor(&g, (2, 1), Direction::East, 3), 1.0);
        assert_eq!(center_factor(&g, (0, 0), Direction::East, 1), 0.0);
        assert_eq!(center_factor(&g, (4, 4), Direction::West, 1), 0.0);
        let near: f64 = center_factor(&g, (1, 1), Direction::East, 1);
        assert!(near > 0.0 && near < 1.0);
    }

    #[test]
    fn centered_word_on_an_empty_grid_scores_center_and_direction_terms() {
        let g: Grid = grid(5, 5);
        let candidates: Vec<Candidate> = find_candidates("ABC", &g, &DirectionUsage::new());
        // No crossing and no neighbor: 3 for the center plus 2 for an unused direction
        assert_eq!(find(&candidates, (2, 1), Direction::East).quality, 5.0);
        assert_eq!(candidates[0].quality, 5.0);
        assert!(find(&candidates, (0, 0), Direction::East).quality < 5.0);
    }

    #[test]
    fn quality_caps_adjacent_letters() {
        assert_eq!(quality_score(0, 0, 0.0, 0.0, 8), quality_score(0, 0, 0.0, 0.0, 20));
        assert_eq!(quality_score(1, 1, 1.0, 1.0, 1), 10.0 + 15.0 + 3.0 + 2.0 + 2.0);
    }
}
