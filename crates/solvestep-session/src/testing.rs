//! Test support for display consumers.
//!
//! [`RecordingDisplay`] stands in for a real board during tests: it records
//! every capability call in order so assertions can check exactly what the
//! differ and the state transitions asked the display to do.
//!
//! # Example
//!
//! ```
//! use solvestep_core::{Coords, Digit};
//! use solvestep_session::BoardDisplay as _;
//! use solvestep_session::testing::{DisplayCall, RecordingDisplay};
//!
//! let mut display = RecordingDisplay::new();
//! display.add_digit(Coords::new(0, 0), Digit::D7);
//!
//! assert_eq!(
//!     display.calls(),
//!     &[DisplayCall::AddDigit(Coords::new(0, 0), Digit::D7)]
//! );
//! ```

use solvestep_core::{Coords, Digit, InitialValue};

use crate::display::BoardDisplay;

/// One recorded capability invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    /// `initialise()` was invoked.
    Initialise,
    /// `reset()` was invoked.
    Reset,
    /// `add_initial_values(..)` was invoked with these values.
    AddInitialValues(Vec<InitialValue>),
    /// `add_digit(..)` was invoked.
    AddDigit(Coords, Digit),
    /// `remove_digit(..)` was invoked.
    RemoveDigit(Coords),
    /// `remove_digits()` was invoked.
    RemoveDigits,
}

/// A [`BoardDisplay`] that draws nothing and remembers everything.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    calls: Vec<DisplayCall>,
}

impl RecordingDisplay {
    /// Creates an empty recording display.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every call recorded so far, in invocation order.
    #[must_use]
    pub fn calls(&self) -> &[DisplayCall] {
        &self.calls
    }

    /// Returns the recorded calls and clears the log, so a test can scope
    /// assertions to one phase of a scenario.
    pub fn take_calls(&mut self) -> Vec<DisplayCall> {
        std::mem::take(&mut self.calls)
    }

    /// Counts recorded `add_digit` calls matching the given cell and digit.
    #[must_use]
    pub fn add_digit_count(&self, coords: Coords, digit: Digit) -> usize {
        self.calls
            .iter()
            .filter(|call| **call == DisplayCall::AddDigit(coords, digit))
            .count()
    }

    /// Counts recorded `remove_digit` calls for the given cell.
    #[must_use]
    pub fn remove_digit_count(&self, coords: Coords) -> usize {
        self.calls
            .iter()
            .filter(|call| **call == DisplayCall::RemoveDigit(coords))
            .count()
    }
}

impl BoardDisplay for RecordingDisplay {
    fn initialise(&mut self) {
        self.calls.push(DisplayCall::Initialise);
    }

    fn reset(&mut self) {
        self.calls.push(DisplayCall::Reset);
    }

    fn add_initial_values(&mut self, values: &[InitialValue]) {
        self.calls.push(DisplayCall::AddInitialValues(values.to_vec()));
    }

    fn add_digit(&mut self, coords: Coords, digit: Digit) {
        self.calls.push(DisplayCall::AddDigit(coords, digit));
    }

    fn remove_digit(&mut self, coords: Coords) {
        self.calls.push(DisplayCall::RemoveDigit(coords));
    }

    fn remove_digits(&mut self) {
        self.calls.push(DisplayCall::RemoveDigits);
    }
}
