/*
backtracking.rs

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

//! Backtracking strategy.
//!
//! Words are taken longest first. For each word, the best candidates are tried in turn: the
//! word is placed, the search goes on with the next word, and the word is removed before the
//! next candidate is tried.
//! The search tree is bounded by the recursion depth, by a candidate cap that shrinks in the
//! deeper half of the tree, and by a maximum number of visited nodes.

use log::{debug, info};
use rand::Rng;
use std::cmp::Reverse;
use std::time::Instant;

use super::GeneratorError;
use super::candidates::Candidate;
use super::evaluation::target_bonus;
use super::layout::{Layout, Outcome};
use super::random_fit::try_random_placement;
use crate::config::GeneratorConfig;

/// Candidates tried per word in the upper half of the tree.
const MAX_CANDIDATES: usize = 40;

/// Candidates tried per word in the deeper half of the tree.
const MAX_CANDIDATES_DEEP: usize = 20;

/// Probability of also trying a random spot when candidates exist.
const RANDOM_BRANCH_PROBABILITY: f64 = 0.2;

/// Probability of skipping a candidate whose direction is overrepresented.
const SKIP_PROBABILITY: f64 = 0.5;

/// Number of tries for a random spot.
const RANDOM_TRIES: usize = 500;

/// Bonus added at the end of a branch when the target is reached.
const COMPLETE_BONUS: f64 = 5000.0;

/// Bonus added at the end of a branch when the target is nearly reached.
const NEAR_COMPLETE_BONUS: f64 = 1000.0;

/// A complete layout above this branch score stops the whole search.
const EARLY_EXIT_SCORE: f64 = 3000.0;

/// [`Backtracking`] object.
pub struct Backtracking<'a> {
    /// Words, longest first.
    words: Vec<&'a str>,

    /// Number of words to place.
    target: usize,

    /// Maximum recursion depth.
    max_depth: usize,

    /// Maximum number of visited nodes.
    node_limit: usize,

    /// Number of nodes visited by the last search.
    pub nodes: usize,

    /// Duration in seconds of the last search.
    pub duration: f32,

    /// Best layout found so far, with its evaluator score.
    best: Option<Outcome>,

    /// Branch score (evaluator score plus bonus) of the best layout.
    best_score: f64,
}

impl<'a> Backtracking<'a> {
    /// Create the object. `words` must be normalized (uppercase, no duplicates).
    pub fn new(words: &'a [String], target: usize, config: &GeneratorConfig) -> Self {
        let mut sorted: Vec<&str> = words.iter().map(|w| w.as_str()).collect();
        sorted.sort_by_key(|w| Reverse(w.chars().count()));
        Self {
            words: sorted,
            target: target.min(words.len()),
            max_depth: config.max_depth,
            node_limit: config.backtracking_node_limit,
            nodes: 0,
            duration: 0.0,
            best: None,
            best_score: f64::NEG_INFINITY,
        }
    }

    /// Search the tree from the given layout and return the best layout found.
    ///
    /// The layout is left as it was found.
    /// Return None only when no branch could be scored, which cannot happen with a
    /// non-zero node limit.
    pub fn run<R: Rng + ?Sized>(&mut self, layout: &mut Layout, rng: &mut R) -> Option<Outcome> {
        let start: Instant = Instant::now();
        self.nodes = 0;
        self.best = None;
        self.best_score = f64::NEG_INFINITY;

        self.backtrack(layout, 0, 0, rng);

        self.duration = start.elapsed().as_secs_f32();
        debug!(
            "Backtracking: nodes = {}  duration = {}",
            self.nodes, self.duration
        );
        self.best.take()
    }

    /// Whether the search must stop.
    fn done(&self) -> bool {
        if self.nodes >= self.node_limit {
            return true;
        }
        match &self.best {
            Some(best) => best.len() == self.target && self.best_score > EARLY_EXIT_SCORE,
            None => false,
        }
    }

    /// Score the layout at the end of a branch and keep it if it is the best one.
    fn record(&mut self, layout: &Layout, bonus: f64) {
        let score: f64 = layout.score(self.target);
        if score + bonus > self.best_score {
            self.best_score = score + bonus;
            info!(
                "New best layout: {} words, score {}",
                layout.len(),
                self.best_score
            );
            self.best = Some(Outcome {
                layout: layout.clone(),
                score,
            });
        }
    }

    /// Explore the placements of the word at `index`.
    ///
    /// Words that are already placed or that fit nowhere are skipped in place, so the
    /// recursion only goes one level deeper for each placed word and stays under `max_depth`.
    fn backtrack<R: Rng + ?Sized>(
        &mut self,
        layout: &mut Layout,
        mut index: usize,
        depth: usize,
        rng: &mut R,
    ) {
        loop {
            if self.done() {
                return;
            }
            self.nodes += 1;

            if layout.len() >= self.target {
                self.record(layout, COMPLETE_BONUS);
                return;
            }
            if index >= self.words.len()
                || depth >= self.max_depth
                || self.nodes >= self.node_limit
            {
                let bonus: f64 = target_bonus(
                    layout.len(),
                    self.target,
                    COMPLETE_BONUS,
                    NEAR_COMPLETE_BONUS,
                );
                self.record(layout, bonus);
                return;
            }

            let word: &str = self.words[index];
            if !layout.contains(word) && self.explore(layout, word, index, depth, rng) {
                return;
            }
            index += 1;
        }
    }

    /// Try the candidates of the word, and a random spot, recursing after each placement.
    ///
    /// Return false when the word could not be placed anywhere.
    fn explore<R: Rng + ?Sized>(
        &mut self,
        layout: &mut Layout,
        word: &str,
        index: usize,
        depth: usize,
        rng: &mut R,
    ) -> bool {
        let cap: usize = if depth > self.max_depth / 2 {
            MAX_CANDIDATES_DEEP
        } else {
            MAX_CANDIDATES
        };
        let mut candidates: Vec<Candidate> = layout.candidates(word);
        candidates.truncate(cap);
        let mut explored: bool = false;

        for candidate in &candidates {
            // Overrepresented directions are skipped half of the time
            if layout.usage().get(candidate.direction) as f64 > layout.len() as f64 / 4.0
                && rng.random_bool(SKIP_PROBABILITY)
            {
                continue;
            }
            layout.place_candidate(word, candidate);
            self.backtrack(layout, index + 1, depth + 1, rng);
            layout.remove_word(word);
            explored = true;

            if self.done() {
                return true;
            }
        }

        if candidates.is_empty()
            || (depth < self.max_depth / 2 && rng.random_bool(RANDOM_BRANCH_PROBABILITY))
        {
            if let Some((start, direction)) =
                try_random_placement(word, layout.grid(), layout.usage(), RANDOM_TRIES, rng)
            {
                debug!("Random spot for {word} at {start:?} {direction}");
                layout.place_word(word, start, direction);
                self.backtrack(layout, index + 1, depth + 1, rng);
                layout.remove_word(word);
                explored = true;
            }
        }

        if !explored {
            debug!("Backtracking: no room for {word}");
        }
        explored
    }
}

/// Run the backtracking strategy on an empty grid.
///
/// # Errors
///
/// The grid dimensions in `config` must not be zero.
pub fn backtracking_search<R: Rng + ?Sized>(
    words: &[String],
    target: usize,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Outcome, GeneratorError> {
    let mut layout: Layout = Layout::new(config.rows, config.columns)?;
    let mut search: Backtracking = Backtracking::new(words, target, config);
    let outcome: Outcome = match search.run(&mut layout, rng) {
        Some(outcome) => outcome,
        None => Outcome::new(layout, search.target),
    };
    info!(
        "Backtracking strategy placed {}/{} words in {} nodes",
        outcome.len(),
        search.target,
        search.nodes
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn config(rows: usize, columns: usize) -> GeneratorConfig {
        GeneratorConfig {
            rows,
            columns,
            backtracking_node_limit: 2000,
            ..Default::default()
        }
    }

    #[test]
    fn search_leaves_the_working_layout_untouched() {
        let mut rng: StdRng = StdRng::seed_from_u64(4);
        let list: Vec<String> = words(&["GARDEN", "ROSE", "TULIP", "DAISY", "IRIS"]);
        let cfg: GeneratorConfig = config(7, 7);
        let mut layout: Layout = Layout::new(7, 7).expect("valid dimensions");
        let before: Layout = layout.clone();

        let mut search: Backtracking = Backtracking::new(&list, 5, &cfg);
        let best: Option<Outcome> = search.run(&mut layout, &mut rng);

        assert_eq!(layout, before);
        assert!(best.is_some());
        assert!(search.nodes <= cfg.backtracking_node_limit);
    }

    #[test]
    fn complete_layout_stops_the_search_early() {
        let mut rng: StdRng = StdRng::seed_from_u64(10);
        let list: Vec<String> = words(&["MOON", "STAR", "SUN"]);
        let cfg: GeneratorConfig = config(8, 8);
        let mut search: Backtracking = Backtracking::new(&list, 3, &cfg);
        let mut layout: Layout = Layout::new(8, 8).expect("valid dimensions");
        let best: Outcome = search.run(&mut layout, &mut rng).expect("a branch is scored");

        assert_eq!(best.len(), 3);
        assert!(search.nodes < cfg.backtracking_node_limit);
        for placement in best.layout.placements().values() {
            let read: String = placement
                .cells()
                .iter()
                .filter_map(|cell| best.layout.grid().get(*cell))
                .collect();
            assert_eq!(read, placement.word);
        }
    }

    #[test]
    fn words_that_never_fit_are_skipped() {
        let mut rng: StdRng = StdRng::seed_from_u64(6);
        let list: Vec<String> = words(&["HIPPOPOTAMUS", "CAT", "DOG"]);
        let outcome: Outcome =
            backtracking_search(&list, 3, &config(4, 4), &mut rng).expect("valid grid");
        assert!(!outcome.layout.contains("HIPPOPOTAMUS"));
        assert_eq!(outcome.len(), 2);
    }

    #[test]
    fn node_limit_bounds_the_search() {
        let mut rng: StdRng = StdRng::seed_from_u64(1);
        let list: Vec<String> = words(&["ALPHA", "BRAVO", "CHARLIE", "DELTA", "ECHO", "FOXTROT"]);
        let cfg: GeneratorConfig = GeneratorConfig {
            backtracking_node_limit: 5,
            ..config(6, 6)
        };
        let mut search: Backtracking = Backtracking::new(&list, 6, &cfg);
        let mut layout: Layout = Layout::new(6, 6).expect("valid dimensions");
        let best: Option<Outcome> = search.run(&mut layout, &mut rng);
        assert!(best.is_some());
        assert!(search.nodes <= 5);
    }

    #[test]
    fn long_runs_of_unplaceable_words_fit_a_small_stack() {
        // Five letters never fit in a 4x4 grid; CAT comes last once sorted by length
        let mut list: Vec<String> = Vec::new();
        for a in 'A'..='Z' {
            for b in 'A'..='Z' {
                for c in 'A'..='Z' {
                    list.push(format!("{a}{b}{c}QQ"));
                }
            }
        }
        list.push("CAT".to_string());

        let handle = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(move || {
                let mut rng: StdRng = StdRng::seed_from_u64(2);
                let cfg: GeneratorConfig = GeneratorConfig {
                    rows: 4,
                    columns: 4,
                    ..Default::default()
                };
                backtracking_search(&list, 50, &cfg, &mut rng).map(|o| o.len())
            })
            .expect("thread spawned");
        let placed: Result<usize, GeneratorError> = handle.join().expect("no stack overflow");
        assert_eq!(placed, Ok(1));
    }
}
