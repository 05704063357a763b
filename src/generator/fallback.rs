/*
fallback.rs

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

//! Random-restart strategy, used when the other strategies fall short of the target.
//!
//! Each attempt builds a new layout from a word pool. The pool depends on the progress made
//! so far: long words first at the beginning, then shorter and shorter words when the
//! attempts keep failing. Words that often fail to fit are left out of the pool.
//! The words of the best layout so far are placed first, so that a good partial layout is not
//! lost.
//!
//! When all the attempts are spent without reaching the target, a final round of passes
//! made of short words tries to fill the remaining quota.
//!
//! The strategy always returns the best layout found, even below the target.

use log::{debug, info};
use rand::Rng;
use rand::seq::SliceRandom;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use super::GeneratorError;
use super::direction::Direction;
use super::grid::Coord;
use super::layout::{Layout, Outcome};
use super::random_fit::try_random_placement;
use crate::config::{GeneratorConfig, MIN_WORD_LENGTH};

/// The problem words are reviewed every this many attempts.
const REVIEW_PERIOD: usize = 5;

/// Failures after which a long word is left out of the pool.
const BLACKLIST_FAILURES: usize = 3;

/// Failures after which a word stays out of the pool when the pool is replenished.
const PERSISTENT_FAILURES: usize = 5;

/// Probability of trying the cells of a long word in random order instead of center first.
const SHUFFLE_POSITIONS_PROBABILITY: f64 = 0.3;

/// Words longer than this are tried from the center of the grid outwards.
const CENTERED_WORD_MIN_LEN: usize = 7;

/// Number of passes in the final round.
const FINAL_PASSES: usize = 4;

/// Longest word in the "very short" final pool.
const VERY_SHORT_MAX_LEN: usize = 5;

/// Longest word in the "short" final pool.
const SHORT_MAX_LEN: usize = 7;

/// Longest word in the "medium" final pool.
const MEDIUM_MAX_LEN: usize = 9;

/// [`Fallback`] object.
pub struct Fallback<'a> {
    /// Words, longest first.
    words: Vec<&'a str>,

    /// Number of words to place.
    target: usize,

    /// Grid dimensions.
    rows: usize,
    columns: usize,

    /// Base number of tries for one word.
    max_tries: usize,

    /// Maximum number of attempts.
    max_attempts: usize,

    /// Time budget for the whole strategy.
    budget: Duration,

    /// Number of times each word failed to fit.
    failures: HashMap<&'a str, usize>,

    /// Words left out of the pool.
    blacklist: HashSet<&'a str>,

    /// Number of attempts run by the last call to [`Fallback::run`].
    pub attempts: usize,
}

impl<'a> Fallback<'a> {
    /// Create the object. `words` must be normalized (uppercase, no duplicates).
    pub fn new(words: &'a [String], target: usize, config: &GeneratorConfig) -> Self {
        let mut sorted: Vec<&str> = words.iter().map(|w| w.as_str()).collect();
        sorted.sort_by_key(|w| Reverse(w.chars().count()));
        Self {
            words: sorted,
            target: target.min(words.len()),
            rows: config.rows,
            columns: config.columns,
            max_tries: config.max_fallback_tries,
            max_attempts: config.fallback_attempts,
            budget: Duration::from_secs(config.fallback_time_budget_secs),
            failures: HashMap::new(),
            blacklist: HashSet::new(),
            attempts: 0,
        }
    }

    /// Run the attempts, then the final round if needed, and return the best layout.
    ///
    /// # Errors
    ///
    /// The grid dimensions must not be zero.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Outcome, GeneratorError> {
        let start: Instant = Instant::now();
        let mut best: Outcome = Outcome::new(Layout::new(self.rows, self.columns)?, self.target);
        self.attempts = 0;

        for attempt in 0..self.max_attempts {
            if start.elapsed() >= self.budget {
                info!("Fallback: time budget exceeded after {attempt} attempts");
                break;
            }
            self.attempts += 1;

            if attempt > 0 && attempt % REVIEW_PERIOD == 0 {
                self.review_problem_words();
            }

            let pool: Vec<&'a str> = self.pool(attempt, best.len(), rng);
            let pool: Vec<&'a str> = self.retain_successful(pool, &best, attempt);
            let layout: Layout = self.attempt(&pool, attempt, rng)?;
            let outcome: Outcome = Outcome::new(layout, self.target);
            debug!(
                "Fallback attempt {attempt}: {}/{} words",
                outcome.len(),
                self.target
            );
            if outcome.beats(&best) {
                info!(
                    "Fallback attempt {attempt}: improved to {} words",
                    outcome.len()
                );
                best = outcome;
            }
            if best.len() >= self.target {
                break;
            }
        }

        if best.len() < self.target {
            info!(
                "Fallback: final round with short words ({}/{} placed)",
                best.len(),
                self.target
            );
            best = self.final_round(best, start, rng)?;
        }
        Ok(best)
    }

    fn len(word: &str) -> usize {
        word.chars().count()
    }

    /// Leave out the long words that keep failing.
    fn review_problem_words(&mut self) {
        for (word, count) in &self.failures {
            if *count >= BLACKLIST_FAILURES
                && Self::len(word) > MIN_WORD_LENGTH + 1
                && self.blacklist.insert(*word)
            {
                debug!("Fallback: leaving out {word} ({count} failures)");
            }
        }
    }

    /// Words that are not left out, in the given order.
    fn available(&self) -> Vec<&'a str> {
        self.words
            .iter()
            .copied()
            .filter(|w| !self.blacklist.contains(w))
            .collect()
    }

    /// Build the word pool for the attempt.
    fn pool<R: Rng + ?Sized>(&mut self, attempt: usize, best: usize, rng: &mut R) -> Vec<&'a str> {
        let target: f64 = self.target as f64;
        let mut pool: Vec<&'a str>;

        if attempt > 15 && (best as f64) < target * 0.7 {
            let mut available: Vec<&'a str> = self.available();
            if available.len() < self.target * 2 {
                // Give another chance to the words that did not fail too often
                let failures: &HashMap<&str, usize> = &self.failures;
                self.blacklist
                    .retain(|w| failures.get(w).copied().unwrap_or(0) > PERSISTENT_FAILURES);
                available = self.available();
            }
            available.sort_by_key(|w| Self::len(w));
            available.truncate(self.target * 6);
            pool = available;
            pool.shuffle(rng);
        } else if attempt > 10 && (best as f64) < target * 0.8 {
            pool = self.available();
            pool.sort_by_key(|w| Self::len(w));
            pool.truncate(self.target * 5);
            pool.shuffle(rng);
        } else if attempt > 5 && (best as f64) < target * 0.9 {
            let mut short: Vec<&'a str> = self.available();
            short.sort_by_key(|w| Self::len(w));
            short.truncate(self.target * 3);
            // `available` is already longest first
            let mut long: Vec<&'a str> = self.available();
            long.truncate(self.target * 2);

            let mut seen: HashSet<&str> = HashSet::new();
            pool = short
                .into_iter()
                .chain(long)
                .filter(|w| seen.insert(*w))
                .collect();
            pool.shuffle(rng);
        } else {
            // Longest first, with some noise
            let mut keyed: Vec<(f64, &'a str)> = self
                .words
                .iter()
                .map(|w| (rng.random::<f64>() - Self::len(w) as f64, *w))
                .collect();
            keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
            pool = keyed.into_iter().map(|(_, w)| w).collect();
            pool.truncate(self.target * 4);
        }
        pool
    }

    /// Put a prefix of the best layout's words at the front of the pool.
    fn retain_successful(&self, pool: Vec<&'a str>, best: &Outcome, attempt: usize) -> Vec<&'a str> {
        if attempt == 0 || best.is_empty() {
            return pool;
        }
        let subset: Vec<&'a str> = self
            .words
            .iter()
            .copied()
            .filter(|w| best.layout.contains(w))
            .take(self.target / 2)
            .collect();
        let rest: Vec<&'a str> = pool.into_iter().filter(|w| !subset.contains(w)).collect();
        subset.into_iter().chain(rest).collect()
    }

    /// Build a layout from the pool.
    fn attempt<R: Rng + ?Sized>(
        &mut self,
        pool: &[&'a str],
        attempt: usize,
        rng: &mut R,
    ) -> Result<Layout, GeneratorError> {
        let mut layout: Layout = Layout::new(self.rows, self.columns)?;
        let mut directions: Vec<Direction> = Direction::ALL.to_vec();
        directions.shuffle(rng);

        // More tries per word as the attempts go by
        let word_tries: usize = self
            .max_tries
            .min(self.max_tries / 20 * (1 + attempt / 3));

        for word in pool {
            if layout.len() >= self.target {
                break;
            }
            if layout.contains(word) {
                continue;
            }
            if !self.scan(&mut layout, word, &directions, word_tries, rng) {
                *self.failures.entry(*word).or_insert(0) += 1;
            }
        }
        Ok(layout)
    }

    /// Scan the grid for a spot, least used directions first, and place the word at the first
    /// spot that fits.
    fn scan<R: Rng + ?Sized>(
        &self,
        layout: &mut Layout,
        word: &str,
        directions: &[Direction],
        word_tries: usize,
        rng: &mut R,
    ) -> bool {
        let sorted: Vec<Direction> = layout.usage().least_used_first(directions);
        let max_positions: usize = (word_tries / sorted.len().max(1)).max(1);
        let center: (usize, usize) = (self.rows / 2, self.columns / 2);

        for direction in sorted {
            let mut positions: Vec<Coord> = (0..self.rows)
                .flat_map(|r| (0..self.columns).map(move |c| (r, c)))
                .collect();
            if Self::len(word) >= CENTERED_WORD_MIN_LEN {
                positions.sort_by_key(|(r, c)| r.abs_diff(center.0) + c.abs_diff(center.1));
                if rng.random_bool(SHUFFLE_POSITIONS_PROBABILITY) {
                    positions.shuffle(rng);
                }
            } else {
                positions.shuffle(rng);
            }

            for start in positions.into_iter().take(max_positions) {
                if layout.fits(word, start, direction).is_some() {
                    layout.place_word(word, start, direction);
                    return true;
                }
            }
        }
        false
    }

    /// Passes made of short words, each one starting from an empty grid.
    fn final_round<R: Rng + ?Sized>(
        &mut self,
        mut best: Outcome,
        start: Instant,
        rng: &mut R,
    ) -> Result<Outcome, GeneratorError> {
        let mut available: Vec<&'a str> = self.available();
        available.sort_by_key(|w| Self::len(w));
        let very_short: Vec<&'a str> = available
            .iter()
            .copied()
            .filter(|w| Self::len(w) <= VERY_SHORT_MAX_LEN)
            .collect();
        let short: Vec<&'a str> = available
            .iter()
            .copied()
            .filter(|w| (VERY_SHORT_MAX_LEN + 1..=SHORT_MAX_LEN).contains(&Self::len(w)))
            .collect();
        let medium: Vec<&'a str> = available
            .iter()
            .copied()
            .filter(|w| (SHORT_MAX_LEN + 1..=MEDIUM_MAX_LEN).contains(&Self::len(w)))
            .collect();

        for pass in 0..FINAL_PASSES {
            if start.elapsed() >= self.budget {
                break;
            }
            let mut layout: Layout = Layout::new(self.rows, self.columns)?;

            // A share of the words that worked before
            let mut successful: Vec<&'a str> = self
                .words
                .iter()
                .copied()
                .filter(|w| best.layout.contains(w))
                .collect();
            if pass == 2 {
                successful.sort_by_key(|w| Self::len(w));
            }
            successful.truncate(self.target / 3);
            for word in successful {
                self.random_place(&mut layout, word, self.max_tries * 10, rng);
            }

            let mut mix: Vec<&'a str> = match pass {
                0 => repeat(&very_short, 3)
                    .chain(short.iter().copied())
                    .chain(medium.iter().copied().take(self.target / 4))
                    .collect(),
                1 => repeat(&very_short, 2)
                    .chain(repeat(&short, 2))
                    .chain(medium.iter().copied().take(self.target / 3))
                    .collect(),
                _ => repeat(&very_short, 4).chain(repeat(&short, 2)).collect(),
            };
            mix.shuffle(rng);

            for word in mix {
                if layout.len() >= self.target || start.elapsed() >= self.budget {
                    break;
                }
                if layout.contains(word) {
                    continue;
                }
                let factor: usize = if Self::len(word) <= VERY_SHORT_MAX_LEN {
                    15
                } else {
                    10
                };
                self.random_place(&mut layout, word, self.max_tries * factor, rng);
            }

            let outcome: Outcome = Outcome::new(layout, self.target);
            debug!("Fallback final pass {pass}: {} words", outcome.len());
            if outcome.beats(&best) {
                info!(
                    "Fallback final pass {pass}: improved to {} words",
                    outcome.len()
                );
                best = outcome;
                if best.len() >= self.target {
                    break;
                }
            }
        }
        Ok(best)
    }

    /// Place the word at a random spot, if one is found.
    fn random_place<R: Rng + ?Sized>(
        &self,
        layout: &mut Layout,
        word: &str,
        tries: usize,
        rng: &mut R,
    ) -> bool {
        match try_random_placement(word, layout.grid(), layout.usage(), tries, rng) {
            Some((start, direction)) => {
                layout.place_word(word, start, direction);
                true
            }
            None => false,
        }
    }
}

/// The words of the list, `count` times over.
fn repeat<'a, 'b>(words: &'b [&'a str], count: usize) -> impl Iterator<Item = &'a str> + 'b {
    (0..count).flat_map(move |_| words.iter().copied())
}

/// Run the fallback strategy.
///
/// # Errors
///
/// The grid dimensions in `config` must not be zero.
pub fn fallback_search<R: Rng + ?Sized>(
    words: &[String],
    target: usize,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Outcome, GeneratorError> {
    let mut fallback: Fallback = Fallback::new(words, target, config);
    let outcome: Outcome = fallback.run(rng)?;
    info!(
        "Fallback strategy placed {}/{} words in {} attempts",
        outcome.len(),
        fallback.target,
        fallback.attempts
    );
    Ok(outcome)
}
