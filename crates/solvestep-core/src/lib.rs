//! Core model and constraint encoding for the Solvestep visualizer.
//!
//! This crate owns everything between a Sudoku puzzle and the exact-cover
//! row/column protocol spoken by the search engine:
//!
//! 1. **Model types** - [`Coords`], [`Digit`], [`InitialValue`], and
//!    [`Puzzle`], with validation enforced at construction.
//! 2. **Constraint encoding** - [`InternalRow`] (the bridge between Sudoku
//!    semantics and exact-cover rows), [`build_internal_rows`], and
//!    [`CoverRow`] (the 324-column binary vector handed to the engine).
//!
//! Nothing in this crate knows about threads, timers, or displays; those
//! live in `solvestep-session`.
//!
//! # Examples
//!
//! ```
//! use solvestep_core::{Puzzle, build_internal_rows};
//!
//! let puzzle = Puzzle::from_rows(
//!     "Example",
//!     &[
//!         "6 4 9 7 3",
//!         "  3    6 ",
//!         "       18",
//!         "   18   9",
//!         "     43  ",
//!         "7   39   ",
//!         " 7       ",
//!         " 4    8  ",
//!         "9 8 6 4 5",
//!     ],
//! )
//! .unwrap();
//!
//! // One row per fixed cell, nine candidate rows per free cell.
//! let rows = build_internal_rows(&puzzle);
//! let fixed = puzzle.initial_values().len();
//! assert_eq!(rows.len(), fixed + (81 - fixed) * 9);
//! ```

pub mod coords;
pub mod cover;
pub mod digit;
pub mod puzzle;

pub use self::{
    coords::Coords,
    cover::{COLUMN_COUNT, CoverRow, InternalRow, box_index, build_internal_rows, decode_selection},
    digit::Digit,
    puzzle::{InitialValue, Puzzle, PuzzleError},
};
