//! Messages produced by a solve attempt.

use solvestep_core::InternalRow;

/// A message posted by a solve attempt to its session.
///
/// Events arrive in production order over a FIFO channel and are matched
/// exhaustively at the session's single consumption point. Every event
/// carries only non-fixed rows; fixed cells never change and are filtered
/// out before emission.
///
/// An attempt emits zero or more `SearchStep`s followed by at most one
/// terminal event (`SolutionFound` or `NoSolutionFound`). An attempt that
/// observes cancellation stops without a terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverEvent {
    /// A tentative partial assignment reached during backtracking.
    SearchStep {
        /// Ordinal of this search step, starting at 1.
        step_count: usize,
        /// The non-fixed rows currently selected by the engine.
        rows: Vec<InternalRow>,
    },
    /// Terminal success: the first exact cover found.
    SolutionFound {
        /// Total search steps taken to reach the solution.
        step_count: usize,
        /// The non-fixed rows of the solution.
        rows: Vec<InternalRow>,
    },
    /// Terminal failure: the search space was exhausted.
    NoSolutionFound {
        /// Total search steps taken before exhaustion.
        step_count: usize,
    },
}

impl SolverEvent {
    /// Returns whether this event ends its attempt.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        match self {
            SolverEvent::SearchStep { .. } => false,
            SolverEvent::SolutionFound { .. } | SolverEvent::NoSolutionFound { .. } => true,
        }
    }

    /// Returns the step count carried by the event.
    #[must_use]
    pub fn step_count(&self) -> usize {
        match self {
            SolverEvent::SearchStep { step_count, .. }
            | SolverEvent::SolutionFound { step_count, .. }
            | SolverEvent::NoSolutionFound { step_count } => *step_count,
        }
    }
}
