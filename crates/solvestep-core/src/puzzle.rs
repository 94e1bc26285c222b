//! Puzzle definitions and their validation.

use crate::{Coords, Digit};

/// A cell fixed by the puzzle author: a position plus its given digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialValue {
    /// The fixed cell.
    pub coords: Coords,
    /// The digit given for that cell.
    pub digit: Digit,
}

/// Errors reported when a puzzle definition fails validation.
///
/// Validation happens at construction, never later: a `Puzzle` value always
/// satisfies its invariants.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PuzzleError {
    /// The definition did not contain exactly 9 rows.
    #[display("expected 9 rows, got {_0}")]
    #[error(ignore)]
    WrongRowCount(usize),
    /// A row did not contain exactly 9 characters.
    #[display("row {row} has {len} characters, expected 9")]
    WrongRowLength {
        /// Zero-based row index.
        row: usize,
        /// Character count found.
        len: usize,
    },
    /// A row contained a character that is neither blank nor a digit 1-9.
    #[display("invalid character {ch:?} at row {row}, column {col}")]
    InvalidCharacter {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        col: usize,
        /// The offending character.
        ch: char,
    },
    /// Two initial values named the same cell.
    #[display("duplicate initial value at {_0}")]
    #[error(ignore)]
    DuplicateCell(Coords),
}

/// A 9×9 Sudoku puzzle: an ordered list of initial values plus a display
/// title.
///
/// Invariants, enforced at construction: no two initial values share a
/// cell, and every coordinate is in bounds (the latter already guaranteed
/// by [`Coords`] itself).
///
/// # Examples
///
/// Puzzles are usually built from nine row strings, where a blank cell is a
/// space or a `'.'`:
///
/// ```
/// use solvestep_core::{Coords, Digit, Puzzle};
///
/// let puzzle = Puzzle::from_rows(
///     "Tiny example",
///     &[
///         "5........",
///         ".........",
///         ".........",
///         ".........",
///         "....7....",
///         ".........",
///         ".........",
///         ".........",
///         "........1",
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(puzzle.title(), "Tiny example");
/// assert_eq!(puzzle.initial_values().len(), 3);
/// assert_eq!(puzzle.initial_values()[1].coords, Coords::new(4, 4));
/// assert_eq!(puzzle.initial_values()[1].digit, Digit::D7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    title: String,
    initial_values: Vec<InitialValue>,
}

impl Puzzle {
    /// Creates a puzzle from an explicit list of initial values.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::DuplicateCell`] if two values name the same
    /// cell.
    pub fn new(
        title: impl Into<String>,
        initial_values: Vec<InitialValue>,
    ) -> Result<Self, PuzzleError> {
        for (i, value) in initial_values.iter().enumerate() {
            if initial_values[..i].iter().any(|v| v.coords == value.coords) {
                return Err(PuzzleError::DuplicateCell(value.coords));
            }
        }
        Ok(Self {
            title: title.into(),
            initial_values,
        })
    }

    /// Creates a puzzle from nine row strings of nine characters each.
    ///
    /// Digits `'1'..='9'` become initial values; `' '` and `'.'` both mark
    /// a free cell. Anything else is rejected.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleError`] describing the first violation found:
    /// wrong row count, wrong row length, or an invalid character.
    pub fn from_rows<S: AsRef<str>>(
        title: impl Into<String>,
        rows: &[S],
    ) -> Result<Self, PuzzleError> {
        if rows.len() != 9 {
            return Err(PuzzleError::WrongRowCount(rows.len()));
        }

        let mut initial_values = Vec::new();
        for (row, row_string) in rows.iter().enumerate() {
            let chars: Vec<char> = row_string.as_ref().chars().collect();
            if chars.len() != 9 {
                return Err(PuzzleError::WrongRowLength {
                    row,
                    len: chars.len(),
                });
            }
            for (col, &ch) in chars.iter().enumerate() {
                if let Some(digit) = Digit::from_char(ch) {
                    #[expect(clippy::cast_possible_truncation)]
                    let coords = Coords::new(row as u8, col as u8);
                    initial_values.push(InitialValue { coords, digit });
                } else if ch != ' ' && ch != '.' {
                    return Err(PuzzleError::InvalidCharacter { row, col, ch });
                }
            }
        }

        // Row strings cannot name the same cell twice, so this cannot fail.
        Self::new(title, initial_values)
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the initial values in their definition order.
    #[must_use]
    pub fn initial_values(&self) -> &[InitialValue] {
        &self.initial_values
    }

    /// Looks up the initial value at `coords`, if the cell is fixed.
    #[must_use]
    pub fn initial_value_at(&self, coords: Coords) -> Option<InitialValue> {
        self.initial_values.iter().copied().find(|v| v.coords == coords)
    }
}
