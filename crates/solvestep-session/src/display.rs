//! The capability set exposed by a board display.

use solvestep_core::{Coords, Digit, InitialValue};

/// The mutation surface of whatever draws the board.
///
/// Implementations are invoked only from the session's consumer side (the
/// differ and the state transitions), never concurrently, so they can hold
/// plain mutable state without locking.
///
/// `add_digit` is never called for a cell that is already showing a digit:
/// a changed cell is delivered as `remove_digit` followed by `add_digit`.
pub trait BoardDisplay {
    /// Draws the static board chrome. Called once, before anything else.
    fn initialise(&mut self);

    /// Clears everything back to an empty board (fixed digits included).
    fn reset(&mut self);

    /// Shows the puzzle's fixed digits.
    fn add_initial_values(&mut self, values: &[InitialValue]);

    /// Shows a solver digit in a free cell.
    fn add_digit(&mut self, coords: Coords, digit: Digit);

    /// Removes the solver digit from a cell.
    fn remove_digit(&mut self, coords: Coords);

    /// Removes all solver digits, leaving fixed digits in place.
    fn remove_digits(&mut self);
}
