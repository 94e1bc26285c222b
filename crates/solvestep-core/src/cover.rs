//! Exact-cover encoding of Sudoku assignments.
//!
//! Every candidate assignment `(cell, digit)` becomes one binary row of
//! [`COLUMN_COUNT`] columns, split into four 81-column segments:
//!
//! | Segment | Columns | Meaning |
//! |---|---|---|
//! | cell-occupancy | `0..81` | `row * 9 + col` |
//! | row-digit | `81..162` | `row * 9 + (digit - 1)` |
//! | column-digit | `162..243` | `col * 9 + (digit - 1)` |
//! | box-digit | `243..324` | `box * 9 + (digit - 1)` |
//!
//! Exactly one column is set per segment, so an exact cover of all 324
//! columns is precisely a completed Sudoku grid. The search engine never
//! sees Sudoku semantics; it exchanges row indices, which this module maps
//! back onto [`InternalRow`]s by position.

use crate::{Coords, Digit, Puzzle};

/// Number of columns in the constraint matrix: four families of 81.
pub const COLUMN_COUNT: usize = 324;

const ROW_SEGMENT: usize = 81;
const COLUMN_SEGMENT: usize = 162;
const BOX_SEGMENT: usize = 243;

/// One exact-cover row in Sudoku terms: a cell, a digit, and whether the
/// assignment was given by the puzzle author.
///
/// A solve attempt owns one `Vec<InternalRow>`, built once by
/// [`build_internal_rows`]; the engine's selected row indices are
/// positions in that list. Rows are never reused across attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternalRow {
    /// The cell being assigned.
    pub coords: Coords,
    /// The digit assigned to the cell.
    pub digit: Digit,
    /// `true` if the cell was fixed by the puzzle (never redrawn).
    pub is_fixed: bool,
}

impl InternalRow {
    /// Creates an internal row.
    #[must_use]
    pub const fn new(coords: Coords, digit: Digit, is_fixed: bool) -> Self {
        Self {
            coords,
            digit,
            is_fixed,
        }
    }
}

/// Returns the 3×3 box index (0-8) for a cell.
///
/// Boxes are numbered left to right, top to bottom:
/// `box = row - row % 3 + col / 3`.
#[must_use]
pub const fn box_index(row: u8, col: u8) -> u8 {
    row - row % 3 + col / 3
}

/// Builds the internal rows for one solve attempt.
///
/// Cells are visited in row-major order; a fixed cell contributes exactly
/// one row (`is_fixed = true`), a free cell contributes nine candidate rows
/// in ascending digit order. The ordering carries no meaning for the
/// search, but it is stable, which keeps row indices reproducible.
#[must_use]
pub fn build_internal_rows(puzzle: &Puzzle) -> Vec<InternalRow> {
    let mut rows = Vec::new();
    for coords in Coords::all() {
        match puzzle.initial_value_at(coords) {
            Some(value) => rows.push(InternalRow::new(coords, value.digit, true)),
            None => rows.extend(
                Digit::ALL
                    .iter()
                    .map(|&digit| InternalRow::new(coords, digit, false)),
            ),
        }
    }
    rows
}

/// Projects engine-selected row indices back onto the attempt's internal
/// rows.
///
/// The engine's row numbering is the insertion order of the rows it was
/// given, so decoding is direct indexing into the same list that was
/// encoded. There is no failure mode: an out-of-range index means the
/// engine broke its contract, which panics rather than being recovered.
#[must_use]
pub fn decode_selection(indices: &[usize], internal_rows: &[InternalRow]) -> Vec<InternalRow> {
    indices.iter().map(|&i| internal_rows[i]).collect()
}

/// A 324-column binary constraint row, the unit exchanged with the search
/// engine.
///
/// Built once per solve attempt and never mutated. Exactly four columns are
/// set, one per constraint family.
#[derive(Clone, PartialEq, Eq)]
pub struct CoverRow {
    bits: [bool; COLUMN_COUNT],
}

impl CoverRow {
    /// Encodes an internal row into its binary constraint row.
    #[must_use]
    pub fn from_internal_row(row: &InternalRow) -> Self {
        let r = usize::from(row.coords.row());
        let c = usize::from(row.coords.col());
        let b = usize::from(box_index(row.coords.row(), row.coords.col()));
        let d = row.digit.index();

        let mut bits = [false; COLUMN_COUNT];
        bits[r * 9 + c] = true;
        bits[ROW_SEGMENT + r * 9 + d] = true;
        bits[COLUMN_SEGMENT + c * 9 + d] = true;
        bits[BOX_SEGMENT + b * 9 + d] = true;
        Self { bits }
    }

    /// Returns whether a column is set.
    #[must_use]
    pub fn is_set(&self, column: usize) -> bool {
        self.bits[column]
    }

    /// Iterates over the set columns in ascending order.
    pub fn column_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, &set)| set.then_some(i))
    }

    /// Counts the set columns. Always 4 for a row produced by
    /// [`CoverRow::from_internal_row`].
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&set| set).count()
    }

    /// Decodes the assignment this row represents.
    ///
    /// # Panics
    ///
    /// Panics if the row is malformed (no set column in the cell-occupancy
    /// or row-digit segment), which cannot happen for rows produced by
    /// [`CoverRow::from_internal_row`].
    #[must_use]
    pub fn to_assignment(&self) -> (Coords, Digit) {
        let cell = self.bits[..ROW_SEGMENT]
            .iter()
            .position(|&set| set)
            .expect("cover row has no cell-occupancy column");
        let row_digit = self.bits[ROW_SEGMENT..COLUMN_SEGMENT]
            .iter()
            .position(|&set| set)
            .expect("cover row has no row-digit column");

        #[expect(clippy::cast_possible_truncation)]
        let coords = Coords::new((cell / 9) as u8, (cell % 9) as u8);
        #[expect(clippy::cast_possible_truncation)]
        let digit = Digit::from_value((row_digit % 9) as u8 + 1);
        (coords, digit)
    }
}

impl std::fmt::Debug for CoverRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.column_indices()).finish()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const BLANK_ROW: &str = ".........";

    #[test]
    fn fixed_cells_yield_one_row_and_free_cells_nine() {
        let mut rows = vec![BLANK_ROW; 9];
        rows[2] = "..6......";
        let puzzle = Puzzle::from_rows("p", &rows).unwrap();

        let internal_rows = build_internal_rows(&puzzle);
        assert_eq!(internal_rows.len(), 1 + 80 * 9);

        let fixed: Vec<_> = internal_rows.iter().filter(|r| r.is_fixed).collect();
        assert_eq!(fixed.len(), 1);
        assert_eq!(fixed[0].coords, Coords::new(2, 2));
        assert_eq!(fixed[0].digit, Digit::D6);
    }

    #[test]
    fn free_cell_rows_are_digit_ascending_within_the_cell() {
        let puzzle = Puzzle::from_rows("p", &vec![BLANK_ROW; 9]).unwrap();
        let internal_rows = build_internal_rows(&puzzle);
        assert_eq!(internal_rows.len(), 81 * 9);

        for (i, row) in internal_rows.iter().enumerate() {
            assert_eq!(row.coords, Coords::new((i / 81) as u8, (i / 9 % 9) as u8));
            assert_eq!(row.digit.index(), i % 9);
            assert!(!row.is_fixed);
        }
    }

    #[test]
    fn corner_assignments_hit_segment_boundaries() {
        let first = InternalRow::new(Coords::new(0, 0), Digit::D1, false);
        let columns: Vec<_> = CoverRow::from_internal_row(&first).column_indices().collect();
        assert_eq!(columns, vec![0, 81, 162, 243]);

        let last = InternalRow::new(Coords::new(8, 8), Digit::D9, false);
        let columns: Vec<_> = CoverRow::from_internal_row(&last).column_indices().collect();
        assert_eq!(columns, vec![80, 161, 242, 323]);
    }

    #[test]
    fn decode_selection_is_index_aligned() {
        let puzzle = Puzzle::from_rows("p", &vec![BLANK_ROW; 9]).unwrap();
        let internal_rows = build_internal_rows(&puzzle);

        let decoded = decode_selection(&[0, 10, 728], &internal_rows);
        assert_eq!(decoded[0], internal_rows[0]);
        assert_eq!(decoded[1], internal_rows[10]);
        assert_eq!(decoded[2], internal_rows[728]);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn decode_selection_panics_on_contract_violation() {
        let puzzle = Puzzle::from_rows("p", &vec![BLANK_ROW; 9]).unwrap();
        let internal_rows = build_internal_rows(&puzzle);
        let _ = decode_selection(&[internal_rows.len()], &internal_rows);
    }

    #[test]
    fn box_index_matches_standard_numbering() {
        for row in 0..9u8 {
            for col in 0..9u8 {
                assert_eq!(box_index(row, col), (row / 3) * 3 + col / 3);
            }
        }
    }

    proptest! {
        #[test]
        fn every_row_sets_exactly_one_column_per_segment(
            row in 0u8..9,
            col in 0u8..9,
            digit in 1u8..=9,
        ) {
            let internal_row =
                InternalRow::new(Coords::new(row, col), Digit::from_value(digit), false);
            let cover_row = CoverRow::from_internal_row(&internal_row);

            prop_assert_eq!(cover_row.count_ones(), 4);
            for segment in 0..4 {
                let set_in_segment = (segment * 81..(segment + 1) * 81)
                    .filter(|&column| cover_row.is_set(column))
                    .count();
                prop_assert_eq!(set_in_segment, 1);
            }
        }

        #[test]
        fn encode_then_decode_recovers_the_assignment(
            row in 0u8..9,
            col in 0u8..9,
            digit in 1u8..=9,
        ) {
            let coords = Coords::new(row, col);
            let internal_row = InternalRow::new(coords, Digit::from_value(digit), false);
            let (decoded_coords, decoded_digit) =
                CoverRow::from_internal_row(&internal_row).to_assignment();

            prop_assert_eq!(decoded_coords, coords);
            prop_assert_eq!(decoded_digit.value(), digit);
        }
    }
}
