//! The single-threaded consumer that owns the board.

use std::collections::{BTreeMap, VecDeque};
use std::time::{Duration, Instant};

use solvestep_core::{Coords, Digit, InternalRow, Puzzle};

use crate::{
    attempt::SolveAttempt,
    differ::diff_displayed,
    display::BoardDisplay,
    event::SolverEvent,
    throttle::Throttle,
};

/// The lifecycle of a session's board.
///
/// - `Clean`: the board shows only the puzzle's fixed values.
/// - `Solving`: a background search is in flight.
/// - `Dirty`: a search finished (solved, exhausted, or cancelled) and the
///   board holds the last digits it displayed until a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// Board shows only fixed values; ready to solve.
    Clean,
    /// A solve attempt is running.
    Solving,
    /// The last attempt ended; the board needs a reset before it is clean.
    Dirty,
}

/// One visualization session: a puzzle, its display, and at most one solve
/// attempt in flight.
///
/// The session is the pipeline's only consumer. Attempt events are pumped
/// from the channel into a FIFO step queue and drained at most one per
/// throttle tick, so the display animates at the configured cadence no
/// matter how fast the search produces. All display and session state is
/// mutated here and nowhere else.
///
/// The host loop drives the session with [`SolverSession::poll`] (or
/// [`SolverSession::pump`] and [`SolverSession::tick`] separately) and
/// dispatches user commands through [`SolverSession::solve`],
/// [`SolverSession::cancel`], and [`SolverSession::reset`], gated by the
/// matching `can_*` guards.
#[derive(Debug)]
pub struct SolverSession<D> {
    display: D,
    puzzle: Puzzle,
    state: SessionState,
    attempt: Option<SolveAttempt>,
    queue: VecDeque<SolverEvent>,
    throttle: Throttle,
    displayed: BTreeMap<Coords, Digit>,
    last_step_count: usize,
    status: String,
}

impl<D: BoardDisplay> SolverSession<D> {
    /// Creates a session showing `puzzle` on `display`, with the throttle
    /// tick interval set to `speed`.
    pub fn new(mut display: D, puzzle: Puzzle, speed: Duration) -> Self {
        display.initialise();
        let mut session = Self {
            display,
            puzzle,
            state: SessionState::Clean,
            attempt: None,
            queue: VecDeque::new(),
            throttle: Throttle::new(speed),
            displayed: BTreeMap::new(),
            last_step_count: 0,
            status: String::new(),
        };
        session.set_state_clean();
        session
    }

    /// Returns the current puzzle.
    #[must_use]
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Returns the session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the status line describing the last attempt's outcome, or an
    /// empty string when there is nothing to report.
    #[must_use]
    pub fn status_text(&self) -> &str {
        &self.status
    }

    /// Returns the non-fixed digits currently displayed.
    #[must_use]
    pub fn displayed_digits(&self) -> &BTreeMap<Coords, Digit> {
        &self.displayed
    }

    /// Returns the display.
    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Returns the display mutably, for host-side concerns such as redraws
    /// after a terminal resize.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Whether the Solve command is currently valid.
    #[must_use]
    pub fn can_solve(&self) -> bool {
        !self.state.is_solving()
    }

    /// Whether the Cancel command is currently valid.
    #[must_use]
    pub fn can_cancel(&self) -> bool {
        self.state.is_solving()
    }

    /// Whether the Reset command is currently valid.
    #[must_use]
    pub fn can_reset(&self) -> bool {
        self.state.is_dirty()
    }

    /// Returns the throttle tick interval.
    #[must_use]
    pub fn speed(&self) -> Duration {
        self.throttle.interval()
    }

    /// Sets the throttle tick interval; takes effect on the next tick.
    pub fn set_speed(&mut self, speed: Duration) {
        self.throttle.set_interval(speed);
    }

    /// Starts a solve attempt for the current puzzle.
    ///
    /// Clears the board's solver digits and any pending messages, then
    /// launches the background attempt and returns immediately. Invalid
    /// (and ignored, with a warning) while an attempt is already in
    /// flight; callers gate on [`SolverSession::can_solve`].
    pub fn solve(&mut self) {
        if self.state.is_solving() {
            log::warn!("solve requested while an attempt is in flight; ignored");
            return;
        }
        self.display.remove_digits();
        self.displayed.clear();
        self.queue.clear();
        self.throttle.stop();
        self.last_step_count = 0;
        self.status.clear();
        self.attempt = Some(SolveAttempt::spawn(&self.puzzle));
        self.state = SessionState::Solving;
    }

    /// Cancels the in-flight attempt.
    ///
    /// The attempt stops at its next checkpoint; pending messages are
    /// discarded and the throttle stops, so the board keeps showing exactly
    /// what the last drained message put there. Invalid (ignored, with a
    /// warning) unless solving; callers gate on
    /// [`SolverSession::can_cancel`].
    pub fn cancel(&mut self) {
        if !self.state.is_solving() {
            log::warn!("cancel requested with no attempt in flight; ignored");
            return;
        }
        if let Some(attempt) = &self.attempt {
            attempt.cancel();
        }
        self.attempt = None;
        self.queue.clear();
        self.throttle.stop();
        self.status = format!("Cancelled after {} search steps", self.last_step_count);
        self.state = SessionState::Dirty;
    }

    /// Clears the solver digits left behind by a finished attempt.
    ///
    /// Invalid (ignored, with a warning) unless dirty; callers gate on
    /// [`SolverSession::can_reset`].
    pub fn reset(&mut self) {
        if !self.state.is_dirty() {
            log::warn!("reset requested while not dirty; ignored");
            return;
        }
        self.set_state_clean();
    }

    /// Replaces the session's puzzle, cancelling any attempt in flight, and
    /// shows the new puzzle's fixed values.
    pub fn select_puzzle(&mut self, puzzle: Puzzle) {
        if let Some(attempt) = &self.attempt {
            attempt.cancel();
        }
        self.puzzle = puzzle;
        self.set_state_clean();
    }

    /// Moves events posted by the attempt into the step queue, starting the
    /// throttle on the first enqueue.
    pub fn pump(&mut self, now: Instant) {
        let Some(attempt) = &self.attempt else {
            return;
        };
        while let Some(event) = attempt.try_next() {
            self.queue.push_back(event);
            self.throttle.start(now);
        }
    }

    /// Returns whether a throttle tick has fallen due.
    #[must_use]
    pub fn tick_due(&self, now: Instant) -> bool {
        self.throttle.is_due(now)
    }

    /// Returns the instant of the next throttle tick, if one is scheduled.
    /// Host loops bound their input-poll timeout with this.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.throttle.next_due()
    }

    /// Services one throttle tick: applies at most one queued message, or
    /// nothing if the queue is empty.
    ///
    /// The host calls this when [`SolverSession::tick_due`] reports a due
    /// tick; tests call it directly to step the animation by hand.
    pub fn tick(&mut self, now: Instant) {
        self.throttle.rearm(now);
        let Some(event) = self.queue.pop_front() else {
            return;
        };
        match event {
            SolverEvent::SearchStep { step_count, rows } => {
                self.apply_rows(&rows);
                self.last_step_count = step_count;
            }
            SolverEvent::SolutionFound { step_count, rows } => {
                self.apply_rows(&rows);
                self.last_step_count = step_count;
                self.status = format!("Solution found after {step_count} search steps");
                self.finish_attempt();
            }
            SolverEvent::NoSolutionFound { step_count } => {
                self.display.remove_digits();
                self.displayed.clear();
                self.last_step_count = step_count;
                self.status = format!("No solution found after {step_count} search steps");
                self.finish_attempt();
            }
        }
    }

    /// Pumps the channel and services a tick if one is due. The one-call
    /// loop body for hosts.
    pub fn poll(&mut self, now: Instant) {
        self.pump(now);
        if self.tick_due(now) {
            self.tick(now);
        }
    }

    /// Handles a drained terminal event.
    fn finish_attempt(&mut self) {
        // A terminal event can only be drained while solving: transitions
        // out of Solving clear the queue, and an attempt emits at most one.
        debug_assert!(self.state.is_solving(), "terminal event outside an attempt");
        self.attempt = None;
        self.queue.clear();
        self.throttle.stop();
        self.state = SessionState::Dirty;
    }

    /// Diffs a drained assignment set against the board and applies the
    /// minimal mutations: removals, then additions, then remove-and-add for
    /// changed cells.
    fn apply_rows(&mut self, rows: &[InternalRow]) {
        let incoming: BTreeMap<Coords, Digit> =
            rows.iter().map(|row| (row.coords, row.digit)).collect();
        let diff = diff_displayed(&self.displayed, &incoming);

        for coords in &diff.removals {
            self.display.remove_digit(*coords);
            self.displayed.remove(coords);
        }
        for &(coords, digit) in &diff.additions {
            self.display.add_digit(coords, digit);
            self.displayed.insert(coords, digit);
        }
        for &(coords, digit) in &diff.changes {
            self.display.remove_digit(coords);
            self.display.add_digit(coords, digit);
            self.displayed.insert(coords, digit);
        }
    }

    fn set_state_clean(&mut self) {
        self.attempt = None;
        self.queue.clear();
        self.throttle.stop();
        self.displayed.clear();
        self.display.reset();
        self.display.add_initial_values(self.puzzle.initial_values());
        self.status.clear();
        self.last_step_count = 0;
        self.state = SessionState::Clean;
    }
}
