/*
book.rs

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

//! Save a puzzle book to a JSON file and read it back.
//!
//! The file is a serialization of the [`PuzzleBook`] object. It holds everything needed to
//! print the puzzles and their solutions: the grids, and the position of every word.

use log::debug;
use std::error::Error;
use std::fs::{File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::generator::book::PuzzleBook;

/// Object to save and restore a puzzle book.
pub struct SaverBook {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverBook {
    /// Create a [`SaverBook`] object.
    ///
    /// The book is saved in the `<name>.json` file in the `data_dir` directory.
    pub fn new(mut data_dir: PathBuf, name: &str) -> Self {
        data_dir.push(format!("{name}.json"));
        debug!("Book file: {data_dir:?}");
        SaverBook {
            save_file: data_dir,
        }
    }

    /// Path to the save file.
    pub fn path(&self) -> &Path {
        &self.save_file
    }

    /// Retrieve the saved [`PuzzleBook`] object.
    ///
    /// Return None if the book has not been saved.
    pub fn get_book(&self) -> Result<Option<PuzzleBook>, Box<dyn Error>> {
        let file: File;
        match File::open(&self.save_file) {
            Ok(f) => file = f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        }
        let reader: BufReader<File> = BufReader::new(file);
        let book: PuzzleBook = serde_json::from_reader(reader)?;
        Ok(Some(book))
    }

    /// Save the provided [`PuzzleBook`] object.
    pub fn save_book(&self, book: &PuzzleBook) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, book)?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the saved book.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}
