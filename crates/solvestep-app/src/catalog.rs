//! The bundled puzzle catalog.
//!
//! Puzzles ship as embedded JSON documents of the shape
//! `{ "title": ..., "rowStrings": [ ...9 strings... ] }` and go through the
//! same validating constructor as any other puzzle source.

use serde::Deserialize;
use solvestep_core::{Puzzle, PuzzleError};

/// The serialized form of one puzzle document.
#[derive(Debug, Deserialize)]
struct PuzzleDoc {
    title: String,
    #[serde(rename = "rowStrings")]
    row_strings: Vec<String>,
}

/// The list of puzzles the user can pick from.
#[derive(Debug)]
pub(crate) struct PuzzleCatalog {
    puzzles: Vec<Puzzle>,
}

impl PuzzleCatalog {
    /// Loads the puzzles bundled into the binary.
    ///
    /// # Panics
    ///
    /// Panics if a bundled document is malformed; the data ships with the
    /// binary, so that is a packaging defect, not a runtime condition.
    #[must_use]
    pub(crate) fn bundled() -> Self {
        let documents = [
            include_str!("../puzzles/daily_telegraph_27744.json"),
            include_str!("../puzzles/worlds_hardest.json"),
            include_str!("../puzzles/nearly_empty.json"),
            include_str!("../puzzles/twin_fives.json"),
        ];
        let puzzles = documents
            .iter()
            .map(|document| parse_puzzle(document).expect("bundled puzzle is invalid"))
            .collect();
        Self { puzzles }
    }

    /// Number of puzzles in the catalog.
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.puzzles.len()
    }

    /// Returns the puzzle at `index`, if in range.
    #[must_use]
    pub(crate) fn get(&self, index: usize) -> Option<&Puzzle> {
        self.puzzles.get(index)
    }
}

/// Parses one puzzle document.
fn parse_puzzle(document: &str) -> Result<Puzzle, CatalogError> {
    let doc: PuzzleDoc = serde_json::from_str(document)?;
    Ok(Puzzle::from_rows(doc.title, &doc.row_strings)?)
}

#[derive(Debug)]
enum CatalogError {
    Json(serde_json::Error),
    Puzzle(PuzzleError),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Json(err)
    }
}

impl From<PuzzleError> for CatalogError {
    fn from(err: PuzzleError) -> Self {
        CatalogError::Puzzle(err)
    }
}
