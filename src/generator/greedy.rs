/*
greedy.rs

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

//! Greedy strategy: longest words first, each one at its best candidate.
//!
//! The whole pass is repeated a few times with a different direction order, and the attempt
//! with the most placed words is kept.

use log::{debug, info};
use rand::Rng;
use rand::seq::SliceRandom;
use std::cmp::Reverse;

use super::GeneratorError;
use super::candidates::Candidate;
use super::direction::Direction;
use super::layout::{Layout, Outcome};
use super::random_fit::find_uniform_fit;
use crate::config::GeneratorConfig;

/// Random tries for a word without candidates. Candidates already cover every spot where the
/// word fits, so these tries only confirm that the word is skipped.
const RANDOM_TRIES: usize = 50;

/// Run the greedy strategy.
///
/// `words` must be normalized (uppercase, no duplicates).
/// The result may hold fewer words than `target`; the caller decides whether to fall back to
/// another strategy.
///
/// # Errors
///
/// The grid dimensions in `config` must not be zero.
pub fn greedy_search<R: Rng + ?Sized>(
    words: &[String],
    target: usize,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Outcome, GeneratorError> {
    let target: usize = target.min(words.len());
    let mut sorted: Vec<&str> = words.iter().map(|w| w.as_str()).collect();
    sorted.sort_by_key(|w| Reverse(w.chars().count()));

    let mut best: Outcome = Outcome::new(Layout::new(config.rows, config.columns)?, target);
    let mut directions: Vec<Direction> = Direction::ALL.to_vec();

    for attempt in 0..config.greedy_attempts.max(1) {
        if attempt > 0 {
            directions.shuffle(rng);
        }
        let mut layout: Layout = Layout::new(config.rows, config.columns)?;

        for word in &sorted {
            if layout.len() >= target {
                break;
            }
            let top: Option<Candidate> = layout.candidates_in(word, &directions).into_iter().next();
            match top {
                Some(candidate) => {
                    layout.place_candidate(word, &candidate);
                }
                None => match find_uniform_fit(
                    word,
                    layout.grid(),
                    &directions,
                    RANDOM_TRIES,
                    rng,
                ) {
                    Some((start, direction)) => {
                        layout.place_word(word, start, direction);
                    }
                    None => debug!("Greedy attempt {attempt}: skipping {word}"),
                },
            }
        }

        let outcome: Outcome = Outcome::new(layout, target);
        debug!(
            "Greedy attempt {attempt}: {}/{target} words, score {}",
            outcome.len(),
            outcome.score
        );
        if outcome.beats(&best) {
            best = outcome;
        }
        if best.len() >= target {
            break;
        }
    }

    info!(
        "Greedy strategy placed {}/{target} words (score {})",
        best.len(),
        best.score
    );
    Ok(best)
}
