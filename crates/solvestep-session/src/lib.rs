//! The animation pipeline between a puzzle and its display.
//!
//! A solve attempt runs on its own background thread and may emit thousands
//! of intermediate search states. This crate turns that firehose into a
//! smoothly throttled, cancellable stream of minimal display mutations:
//!
//! ```text
//! Puzzle -> encoder -> search engine -> SolverEvent channel
//!        -> step queue -> (throttle tick) -> differ -> BoardDisplay calls
//! ```
//!
//! The pieces, producer side first:
//!
//! - [`SolveAttempt`] - one background thread per attempt, posting
//!   [`SolverEvent`]s over a strictly-FIFO channel, stoppable through a
//!   cooperative cancellation token.
//! - [`SolverSession`] - the single-threaded consumer. It owns the step
//!   queue, the [`Throttle`], the current-display map, and the
//!   Clean/Solving/Dirty state machine gating which commands are valid.
//! - [`diff_displayed`] - the pure three-way diff that converts a newly
//!   drained assignment set into minimal add/remove/change calls on a
//!   [`BoardDisplay`].
//!
//! The producer and consumer share no mutable state; everything crosses the
//! channel. Display state and session state are mutated only on the
//! consumer side, so none of it needs locking.

pub mod attempt;
pub mod differ;
pub mod display;
pub mod event;
pub mod session;
pub mod testing;
pub mod throttle;

mod solver;

pub use self::{
    attempt::SolveAttempt,
    differ::{DisplayDiff, diff_displayed},
    display::BoardDisplay,
    event::SolverEvent,
    session::{SessionState, SolverSession},
    throttle::Throttle,
};
pub use solvestep_dlx::CancelToken;
