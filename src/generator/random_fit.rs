/*
random_fit.rs

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

//! Random placement attempts, used when ranking candidates is not possible or not wanted.
//!
//! The functions only look for a spot. Committing the word is the job of the caller.

use rand::Rng;
use rand::seq::IndexedRandom;
use std::f64::consts::PI;

use super::direction::{Direction, DirectionUsage};
use super::grid::{Coord, Grid};
use super::placement::fits;

/// Words up to this length are placed near the center during the first phase.
const SHORT_WORD_MAX_LEN: usize = 5;

/// Share of the tries spent in the first phase, for long words.
const PRIMARY_RATIO: f64 = 0.7;

/// Share of the tries spent in the first phase, for short words.
const PRIMARY_RATIO_SHORT: f64 = 0.8;

/// Sample a normal distribution (Box-Muller transform).
pub fn gauss<R: Rng + ?Sized>(rng: &mut R, mean: f64, sigma: f64) -> f64 {
    // `random` returns a value in [0, 1), which must not reach the logarithm
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    mean + sigma * (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Uniformly random starting cell.
fn random_cell<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Coord {
    (
        rng.random_range(0..grid.rows()),
        rng.random_range(0..grid.columns()),
    )
}

/// Starting cell drawn around the grid center.
fn central_cell<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Coord {
    let rows: isize = grid.rows() as isize;
    let columns: isize = grid.columns() as isize;
    let row_offset: isize = gauss(rng, 0.0, (rows / 4) as f64) as isize;
    let col_offset: isize = gauss(rng, 0.0, (columns / 4) as f64) as isize;
    (
        (rows / 2 + row_offset).clamp(0, rows - 1) as usize,
        (columns / 2 + col_offset).clamp(0, columns - 1) as usize,
    )
}

/// Try random positions and directions, with no preference, until the word fits.
///
/// Directions are drawn from `directions`.
/// Return the starting cell and the direction of the first fit, or None after `max_tries`
/// failures.
pub fn find_uniform_fit<R: Rng + ?Sized>(
    word: &str,
    grid: &Grid,
    directions: &[Direction],
    max_tries: usize,
    rng: &mut R,
) -> Option<(Coord, Direction)> {
    for _ in 0..max_tries {
        let direction: Direction = *directions.choose(rng)?;
        let start: Coord = random_cell(grid, rng);
        if fits(word, grid, start, direction).is_some() {
            return Some((start, direction));
        }
    }
    None
}

/// Try to find a random spot for the word, in two phases.
///
/// The first phase favors the least used directions, and puts short words near the center
/// of the grid.
/// The second phase uses the remaining tries on uniformly random positions and directions.
pub fn try_random_placement<R: Rng + ?Sized>(
    word: &str,
    grid: &Grid,
    usage: &DirectionUsage,
    max_tries: usize,
    rng: &mut R,
) -> Option<(Coord, Direction)> {
    let short: bool = word.chars().count() <= SHORT_WORD_MAX_LEN;
    let ratio: f64 = if short {
        PRIMARY_RATIO_SHORT
    } else {
        PRIMARY_RATIO
    };
    let primary_tries: usize = (max_tries as f64 * ratio) as usize;
    let sorted: Vec<Direction> = usage.least_used_first(&Direction::ALL);

    for _ in 0..primary_tries {
        // The smaller of two draws leans toward the least used directions
        let index: usize = rng
            .random_range(0..sorted.len())
            .min(rng.random_range(0..sorted.len()));
        let direction: Direction = sorted[index];
        let start: Coord = if short {
            central_cell(grid, rng)
        } else {
            random_cell(grid, rng)
        };
        if fits(word, grid, start, direction).is_some() {
            return Some((start, direction));
        }
    }

    find_uniform_fit(
        word,
        grid,
        &Direction::ALL,
        max_tries - primary_tries,
        rng,
    )
}
