/*
sequential.rs

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

//! Sequential strategy: words in the caller's order, each one where it crosses the most.

use log::{Level, debug, info, log_enabled};
use std::time::Instant;

use super::GeneratorError;
use super::candidates::Candidate;
use super::layout::{Layout, Outcome};
use crate::config::GeneratorConfig;

/// Place the words in the given order.
///
/// Each word goes to the feasible spot with the most crossings. Among those, the least used
/// direction wins. Words that fit nowhere are skipped. The search stops at the target.
///
/// # Errors
///
/// The grid dimensions in `config` must not be zero.
pub fn sequential_search(
    words: &[String],
    target: usize,
    config: &GeneratorConfig,
) -> Result<Outcome, GeneratorError> {
    let start: Instant = Instant::now();
    let target: usize = target.min(words.len());
    let mut layout: Layout = Layout::new(config.rows, config.columns)?;

    for word in words {
        if layout.len() >= target {
            break;
        }
        let candidates: Vec<Candidate> = layout.candidates(word);
        let Some(best) = candidates.iter().min_by(|a, b| {
            b.match_count.cmp(&a.match_count).then_with(|| {
                layout
                    .usage()
                    .get(a.direction)
                    .cmp(&layout.usage().get(b.direction))
            })
        }) else {
            debug!("Sequential: {word} fits nowhere");
            continue;
        };
        let crossings: usize = best.match_count;
        let best: Candidate = best.clone();
        layout.place_candidate(word, &best);
        debug!(
            "Sequential [{}/{target}]: {word} at {:?} {} ({crossings} crossings)",
            layout.len(),
            best.start(),
            best.direction
        );
    }

    info!(
        "Sequential strategy placed {}/{target} words in {:.2}s",
        layout.len(),
        start.elapsed().as_secs_f32()
    );
    if log_enabled!(Level::Debug) {
        for (direction, count) in layout.usage().iter() {
            debug!("    {direction}: {count}");
        }
    }
    Ok(Outcome::new(layout, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn keeps_the_caller_order() {
        let config: GeneratorConfig = GeneratorConfig {
            rows: 6,
            columns: 6,
            ..Default::default()
        };
        // BUFFALO is too long, and the target is reached before EMU
        let list: Vec<String> = words(&["OX", "BUFFALO", "YAK", "EMU"]);
        let outcome: Outcome = sequential_search(&list, 2, &config).expect("valid grid");
        assert_eq!(outcome.len(), 2);
        assert!(outcome.layout.contains("OX"));
        assert!(outcome.layout.contains("YAK"));
        assert!(!outcome.layout.contains("EMU"));
    }

    #[test]
    fn prefers_crossings() {
        let config: GeneratorConfig = GeneratorConfig {
            rows: 7,
            columns: 7,
            ..Default::default()
        };
        let list: Vec<String> = words(&["ORANGE", "LEMON"]);
        let outcome: Outcome = sequential_search(&list, 2, &config).expect("valid grid");
        assert_eq!(outcome.len(), 2);
        assert!(outcome.score > 0.0);
        // LEMON shares at least one letter with ORANGE
        assert!(outcome.layout.grid().filled_count() < 6 + 5);
    }
}
