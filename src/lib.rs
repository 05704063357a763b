/*
lib.rs

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

//! Generate word-search puzzles.
//!
//! Words are placed in a letter grid along the eight directions, crossing each other where
//! they share letters. The remaining cells are filled with random letters.
//!
//! ```no_run
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use wordsoup::config::GeneratorConfig;
//! use wordsoup::generator::engine::WordSearch;
//!
//! let search = WordSearch::new(GeneratorConfig::default());
//! let mut rng = StdRng::seed_from_u64(1);
//! let puzzle = search.generate(&["otter", "beaver", "badger"], &mut rng).unwrap();
//! println!("{puzzle}");
//! ```

pub mod config;
pub mod generator;
pub mod saver;
pub mod wordlist;
