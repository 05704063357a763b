/*
evaluation.rs

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

//! Score a whole puzzle layout so that attempts can be compared.
//!
//! The score only depends on the grid dimensions, the placed words, and the target word
//! count. Evaluating the same layout twice returns the same value.

use std::collections::HashMap;

use super::direction::DirectionUsage;
use super::grid::{Coord, Grid};
use super::placement::PlacementSet;

/// Points per placed word.
const WORD_POINTS: f64 = 200.0;

/// Bonus when the target word count is reached exactly.
const TARGET_BONUS: f64 = 3000.0;

/// Bonus when at least [`NEAR_TARGET_RATIO`] of the target is reached.
const NEAR_TARGET_BONUS: f64 = 1000.0;

/// Share of the target that earns [`NEAR_TARGET_BONUS`].
pub const NEAR_TARGET_RATIO: f64 = 0.9;

/// Points per extra word going through a cell.
const CROSSING_POINTS: f64 = 30.0;

/// Points per direction in use.
const DIRECTION_POINTS: f64 = 100.0;

/// Penalty per unit of difference between the most and the least used directions.
const DIRECTION_SPREAD_PENALTY: f64 = 50.0;

/// Maximum points for a layout centered on the grid.
const SPATIAL_POINTS: f64 = 300.0;

/// Points lost per cell of distance between the letters' centroid and the grid center.
const SPATIAL_PENALTY: f64 = 30.0;

/// Terms of a puzzle score.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PuzzleScore {
    /// Placed words and target bonus.
    pub words: f64,

    /// Cells shared by several words.
    pub crossings: f64,

    /// Share of the grid covered by words.
    pub density: f64,

    /// Variety of directions.
    pub direction_balance: f64,

    /// Closeness of the words to the center of the grid.
    pub spatial: f64,
}

impl PuzzleScore {
    /// Sum of all the terms.
    pub fn total(&self) -> f64 {
        self.words + self.crossings + self.density + self.direction_balance + self.spatial
    }
}

/// Bonus for reaching the target word count (or nearly reaching it).
pub fn target_bonus(placed: usize, target: usize, exact: f64, near: f64) -> f64 {
    if placed == target {
        exact
    } else if placed as f64 >= target as f64 * NEAR_TARGET_RATIO {
        near
    } else {
        0.0
    }
}

fn density_points(density: f64) -> f64 {
    if (0.4..=0.7).contains(&density) {
        500.0
    } else if (0.3..0.4).contains(&density) || (density > 0.7 && density <= 0.8) {
        200.0
    } else {
        0.0
    }
}

fn direction_points(placements: &PlacementSet) -> f64 {
    let mut usage: DirectionUsage = DirectionUsage::new();
    for placement in placements.values() {
        usage.increment(placement.direction);
    }
    let used: Vec<usize> = usage
        .iter()
        .map(|(_, count)| count)
        .filter(|count| *count > 0)
        .collect();
    let (Some(max), Some(min)) = (used.iter().max(), used.iter().min()) else {
        return 0.0;
    };
    DIRECTION_POINTS * used.len() as f64 - DIRECTION_SPREAD_PENALTY * (max - min) as f64
}

/// Compute every term of the score.
pub fn evaluate_terms(grid: &Grid, placements: &PlacementSet, target: usize) -> PuzzleScore {
    let placed: usize = placements.len();
    let mut score: PuzzleScore = PuzzleScore {
        words: placed as f64 * WORD_POINTS
            + target_bonus(placed, target, TARGET_BONUS, NEAR_TARGET_BONUS),
        ..Default::default()
    };

    // Number of words going through each cell
    let mut cell_usage: HashMap<Coord, usize> = HashMap::new();
    let mut row_sum: f64 = 0.0;
    let mut col_sum: f64 = 0.0;
    let mut letters: usize = 0;
    for placement in placements.values() {
        for cell in placement.cells() {
            *cell_usage.entry(cell).or_insert(0) += 1;
            row_sum += cell.0 as f64;
            col_sum += cell.1 as f64;
            letters += 1;
        }
    }

    score.crossings = cell_usage
        .values()
        .filter(|count| **count > 1)
        .map(|count| (count - 1) as f64 * CROSSING_POINTS)
        .sum();

    let area: f64 = (grid.rows() * grid.columns()) as f64;
    score.density = density_points(cell_usage.len() as f64 / area);

    score.direction_balance = direction_points(placements);

    if letters > 0 {
        let centroid: (f64, f64) = (row_sum / letters as f64, col_sum / letters as f64);
        let center: (f64, f64) = (grid.rows() as f64 / 2.0, grid.columns() as f64 / 2.0);
        let distance: f64 =
            ((centroid.0 - center.0).powi(2) + (centroid.1 - center.1).powi(2)).sqrt();
        score.spatial = SPATIAL_POINTS - (distance * SPATIAL_PENALTY).min(SPATIAL_POINTS);
    }
    score
}

/// Score the layout. Higher is better.
pub fn evaluate(grid: &Grid, placements: &PlacementSet, target: usize) -> f64 {
    evaluate_terms(grid, placements, target).total()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::direction::Direction;
    use crate::generator::placement::place;

    fn layout(rows: usize, columns: usize, words: &[(&str, Coord, Direction)]) -> (Grid, PlacementSet) {
        let mut grid: Grid = Grid::new(rows, columns).expect("valid dimensions");
        let mut placements: PlacementSet = PlacementSet::new();
        for (word, (row, col), direction) in words {
            placements.insert(place(word, &mut grid, *row, *col, *direction));
        }
        (grid, placements)
    }

    #[test]
    fn empty_layout_scores_nothing() {
        let (grid, placements) = layout(4, 4, &[]);
        let score: PuzzleScore = evaluate_terms(&grid, &placements, 3);
        assert_eq!(score, PuzzleScore::default());
        // Zero words placed for a zero target is an exact hit
        assert_eq!(evaluate(&grid, &placements, 0), TARGET_BONUS);
    }

    #[test]
    fn word_term_rewards_the_target() {
        assert_eq!(target_bonus(10, 10, 3000.0, 1000.0), 3000.0);
        assert_eq!(target_bonus(9, 10, 3000.0, 1000.0), 1000.0);
        assert_eq!(target_bonus(8, 10, 3000.0, 1000.0), 0.0);
    }

    #[test]
    fn crossings_count_extra_occupants() {
        let (grid, placements) = layout(
            5,
            5,
            &[
                ("CAT", (2, 0), Direction::East),
                ("BAD", (1, 1), Direction::South),
            ],
        );
        let score: PuzzleScore = evaluate_terms(&grid, &placements, 2);
        assert_eq!(score.crossings, 30.0);
        assert_eq!(score.words, 2.0 * 200.0 + 3000.0);
        // 5 cells out of 25
        assert_eq!(score.density, 0.0);
        // Two directions, one word each
        assert_eq!(score.direction_balance, 200.0);
    }

    #[test]
    fn density_bands() {
        assert_eq!(density_points(0.5), 500.0);
        assert_eq!(density_points(0.4), 500.0);
        assert_eq!(density_points(0.7), 500.0);
        assert_eq!(density_points(0.35), 200.0);
        assert_eq!(density_points(0.75), 200.0);
        assert_eq!(density_points(0.2), 0.0);
        assert_eq!(density_points(0.9), 0.0);
    }

    #[test]
    fn unbalanced_directions_are_penalized() {
        let (grid, placements) = layout(
            6,
            6,
            &[
                ("ONE", (0, 0), Direction::East),
                ("TWO", (1, 0), Direction::East),
                ("SIX", (2, 0), Direction::East),
                ("TEN", (3, 3), Direction::South),
            ],
        );
        let score: PuzzleScore = evaluate_terms(&grid, &placements, 4);
        assert_eq!(score.direction_balance, 2.0 * 100.0 - 50.0 * 2.0);
    }

    #[test]
    fn centered_layout_gets_the_full_spatial_term() {
        // The letters' centroid is (2, 2), the center of a 4x4 grid is (2, 2)
        let (grid, placements) = layout(4, 4, &[("SUN", (2, 1), Direction::East)]);
        assert_eq!(evaluate_terms(&grid, &placements, 1).spatial, 300.0);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let (grid, placements) = layout(
            7,
            7,
            &[
                ("RIVER", (0, 0), Direction::SouthEast),
                ("LAKE", (6, 0), Direction::NorthEast),
            ],
        );
        let before: Grid = grid.clone();
        assert_eq!(evaluate(&grid, &placements, 5), evaluate(&grid, &placements, 5));
        assert_eq!(grid, before);
    }
}
