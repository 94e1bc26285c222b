//! The background execution unit of a solve attempt.

use std::sync::mpsc;
use std::thread;

use solvestep_core::Puzzle;
use solvestep_dlx::CancelToken;

use crate::{event::SolverEvent, solver};

/// A solve attempt running on its own dedicated background thread.
///
/// The thread is long-lived for the duration of the search (not pooled; a
/// hard puzzle may run for a long time and must not starve other work) and
/// communicates exclusively by posting [`SolverEvent`]s into a FIFO
/// channel. The producer never blocks on the consumer and the consumer
/// polls without blocking on the producer.
///
/// The attempt owns the rows and matrix it builds; nothing is shared with
/// the session except the channel and the cancellation token. Dropping the
/// handle requests cancellation, so an abandoned attempt winds down at its
/// next checkpoint instead of searching on unobserved.
#[derive(Debug)]
pub struct SolveAttempt {
    receiver: mpsc::Receiver<SolverEvent>,
    cancel: CancelToken,
}

impl SolveAttempt {
    /// Launches a new attempt for `puzzle` and returns immediately.
    #[must_use]
    pub fn spawn(puzzle: &Puzzle) -> Self {
        let (sender, receiver) = mpsc::channel();
        let cancel = CancelToken::new();

        let thread_puzzle = puzzle.clone();
        let thread_cancel = cancel.clone();
        thread::spawn(move || {
            solver::run_attempt(&thread_puzzle, &thread_cancel, &mut |event| {
                // The session may have been dropped or moved on; a failed
                // send just means nobody is listening any more.
                let _ = sender.send(event);
            });
        });

        Self { receiver, cancel }
    }

    /// Takes the next event if one has been posted. Never blocks.
    #[must_use]
    pub fn try_next(&self) -> Option<SolverEvent> {
        self.receiver.try_recv().ok()
    }

    /// Requests cooperative cancellation.
    ///
    /// The background thread stops at its next checkpoint inside the
    /// engine; events it posted before observing the request remain in the
    /// channel and are still delivered.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for SolveAttempt {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    fn near_complete_puzzle() -> Puzzle {
        Puzzle::from_rows(
            "near complete",
            &[
                ".85362947",
                "793148526",
                "246795183",
                "564239871",
                "931874265",
                "827516394",
                "318427659",
                "672951438",
                "459683712",
            ],
        )
        .unwrap()
    }

    fn drain_until_terminal(attempt: &SolveAttempt) -> Vec<SolverEvent> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut events = Vec::new();
        loop {
            if let Some(event) = attempt.try_next() {
                let terminal = event.is_terminal();
                events.push(event);
                if terminal {
                    return events;
                }
            } else {
                assert!(Instant::now() < deadline, "attempt produced no terminal event");
                thread::yield_now();
            }
        }
    }

    #[test]
    fn events_arrive_in_production_order_with_one_terminal() {
        let attempt = SolveAttempt::spawn(&near_complete_puzzle());
        let events = drain_until_terminal(&attempt);

        assert!(events.last().unwrap().is_terminal());
        assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
        let counts: Vec<_> = events.iter().map(SolverEvent::step_count).collect();
        for pair in counts.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn spawn_returns_before_the_search_finishes() {
        // Not a timing assertion, just the contract: the handle exists and
        // is pollable immediately, and polling never blocks.
        let attempt = SolveAttempt::spawn(&near_complete_puzzle());
        let _ = attempt.try_next();
        let _ = drain_until_terminal(&attempt);
    }

    #[test]
    fn cancelled_attempt_stops_posting() {
        let attempt = SolveAttempt::spawn(&near_complete_puzzle());
        attempt.cancel();

        // Drain whatever was produced before the checkpoint; after the
        // channel disconnects the attempt must be over, with or without a
        // terminal event.
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            match attempt.receiver.try_recv() {
                Ok(_) => {}
                Err(mpsc::TryRecvError::Disconnected) => break,
                Err(mpsc::TryRecvError::Empty) => {
                    assert!(Instant::now() < deadline, "solver thread did not stop");
                    thread::yield_now();
                }
            }
        }
    }
}
