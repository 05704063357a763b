/*
scenarios.rs

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

//! Small puzzles with a known outcome.

use rand::SeedableRng;
use rand::rngs::StdRng;

use wordsoup::config::GeneratorConfig;
use wordsoup::generator::GeneratorError;
use wordsoup::generator::candidates::Candidate;
use wordsoup::generator::direction::Direction;
use wordsoup::generator::engine::{Puzzle, Strategy, WordSearch};
use wordsoup::generator::grid::Grid;
use wordsoup::generator::layout::Layout;
use wordsoup::generator::placement::{Placement, fits, place, remove};

fn engine(rows: usize, columns: usize, count: usize) -> WordSearch {
    WordSearch::new(GeneratorConfig {
        rows,
        columns,
        words_per_puzzle: count,
        max_fallback_tries: 500,
        fallback_attempts: 10,
        backtracking_node_limit: 1000,
        ..Default::default()
    })
}

#[test]
fn two_short_words_in_a_small_grid() {
    let mut rng: StdRng = StdRng::seed_from_u64(4);
    let puzzle: Puzzle = engine(5, 5, 2)
        .generate(&["CAT", "DOG"], &mut rng)
        .expect("valid input");
    assert_eq!(puzzle.placed, 2);
    assert!(puzzle.words.contains_key("CAT"));
    assert!(puzzle.words.contains_key("DOG"));
    assert!(puzzle.grid.iter().flatten().all(|c| c.is_ascii_uppercase()));
}

#[test]
fn word_longer_than_the_grid_is_not_placed() {
    let mut rng: StdRng = StdRng::seed_from_u64(9);
    let puzzle: Puzzle = engine(3, 3, 1)
        .generate(&["ELEPHANT"], &mut rng)
        .expect("not an error");
    assert!(puzzle.words.is_empty());
    assert_eq!(puzzle.placed, 0);
    assert_eq!(puzzle.grid.iter().flatten().count(), 9);
    assert!(puzzle.grid.iter().flatten().all(|c| c.is_ascii_uppercase()));
    assert_eq!(puzzle.missing(&["elephant"]), vec!["ELEPHANT".to_string()]);
}

#[test]
fn words_sharing_a_prefix_cross() {
    let mut layout: Layout = Layout::new(10, 10).expect("valid dimensions");
    let carton: Candidate = layout.candidates("CARTON").remove(0);
    layout.place_candidate("CARTON", &carton);

    let candidates: Vec<Candidate> = layout.candidates("CARTA");
    let best: &Candidate = &candidates[0];
    let most: usize = candidates.iter().map(|c| c.match_count).max().unwrap_or(0);
    assert!(best.match_count >= 1);
    assert_eq!(best.match_count, most);

    let placement: Placement = layout.place_candidate("CARTA", best);
    let shared: Vec<_> = placement
        .cells()
        .into_iter()
        .filter(|c| layout.placements()["CARTON"].cells().contains(c))
        .collect();
    assert_eq!(shared.len(), best.match_count);
    for (cell, letter) in placement.cells().into_iter().zip("CARTA".chars()) {
        assert_eq!(layout.grid().get(cell), Some(letter));
    }
}

#[test]
fn removing_a_crossing_word_keeps_the_first_word() {
    // Heuristic removal, straight on the grid
    let mut grid: Grid = Grid::new(6, 6).expect("valid dimensions");
    place("HORSE", &mut grid, 1, 0, Direction::East);
    assert_eq!(fits("GOAT", &grid, (0, 1), Direction::South), Some(1));
    place("GOAT", &mut grid, 0, 1, Direction::South);
    remove("GOAT", &mut grid, 0, 1, Direction::South);
    for (i, letter) in "HORSE".chars().enumerate() {
        assert_eq!(grid.get((1, i)), Some(letter));
    }

    // Exact removal through the layout
    let mut layout: Layout = Layout::new(6, 6).expect("valid dimensions");
    layout.place_word("HORSE", (1, 0), Direction::East);
    let before: Layout = layout.clone();
    layout.place_word("GOAT", (0, 1), Direction::South);
    assert!(layout.remove_word("GOAT").is_some());
    assert_eq!(layout, before);
}

#[test]
fn target_larger_than_the_word_list() {
    let words: [&str; 10] = [
        "APPLE", "PEAR", "PLUM", "FIG", "LIME", "KIWI", "MANGO", "GRAPE", "LEMON", "DATE",
    ];
    for strategy in [Strategy::Greedy, Strategy::Sequential] {
        let mut rng: StdRng = StdRng::seed_from_u64(6);
        let mut config: GeneratorConfig = engine(12, 12, 50).config().clone();
        config.strategy = strategy;
        let puzzle: Result<Puzzle, GeneratorError> = WordSearch::new(config).generate(&words, &mut rng);
        let puzzle: Puzzle = puzzle.expect("never an error");
        assert!(puzzle.placed <= 10);
        assert_eq!(puzzle.target, 10);
    }
}
