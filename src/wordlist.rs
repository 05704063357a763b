/*
wordlist.rs

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

//! Read word lists.
//!
//! A word list is a text file with one word per line. Blank lines are ignored.
//! Lines starting with `#` are comments; the first one gives the title of the puzzle book.
//!
//! ```text
//! # Animals
//! tiger
//! zebra
//! ```
//!
//! Only alphabetic words between [`MIN_WORD_LENGTH`] and [`MAX_WORD_LENGTH`] letters are kept.
//! Words are uppercased, and duplicates are dropped.

use log::debug;
use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::config::{MAX_WORD_LENGTH, MIN_WORD_LENGTH};

/// Words read from a list.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WordList {
    /// Title from the first comment line.
    pub title: Option<String>,

    /// Uppercase words, in file order.
    pub words: Vec<String>,

    /// Number of lines skipped because the word is not usable.
    pub rejected: usize,
}

impl WordList {
    /// Parse the contents of a word list.
    pub fn parse(contents: &str) -> Self {
        let mut list: WordList = WordList::default();
        let mut seen: HashSet<String> = HashSet::new();

        for line in contents.lines() {
            let line: &str = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                if list.title.is_none() && !comment.trim().is_empty() {
                    list.title = Some(comment.trim().to_string());
                }
                continue;
            }

            let len: usize = line.chars().count();
            if !(MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&len)
                || !line.chars().all(char::is_alphabetic)
            {
                list.rejected += 1;
                continue;
            }
            let word: String = line.to_uppercase();
            if seen.insert(word.clone()) {
                list.words.push(word);
            }
        }
        list
    }

    /// Read a word list file.
    ///
    /// # Errors
    ///
    /// The file cannot be read.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let contents: String = fs::read_to_string(path)?;
        let list: WordList = Self::parse(&contents);
        debug!(
            "{path:?}: {} words, {} rejected lines",
            list.words.len(),
            list.rejected
        );
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_usable_words() {
        let list: WordList = WordList::parse(
            "# Fruits\n# second comment\napple\n\n  Mango \nfig\nkiwi-fruit\nAPPLE\nwatermelons\nbanana\n",
        );
        assert_eq!(list.title.as_deref(), Some("Fruits"));
        assert_eq!(list.words, vec!["APPLE", "MANGO", "BANANA"]);
        // fig (too short), kiwi-fruit (not alphabetic), watermelons (too long)
        assert_eq!(list.rejected, 3);
    }

    #[test]
    fn accented_letters_are_alphabetic() {
        let list: WordList = WordList::parse("canción\nárbol\n");
        assert_eq!(list.words, vec!["CANCIÓN", "ÁRBOL"]);
        assert!(list.title.is_none());
    }

    #[test]
    fn load_reports_missing_files() {
        let path: &Path = Path::new("/nonexistent/wordsoup/words.txt");
        assert!(WordList::load(path).is_err());
    }
}
