//! The timed drain mechanism for the step queue.

use std::time::{Duration, Instant};

/// A restartable interval timer owned by one session.
///
/// The throttle does not call anything back; the host loop asks
/// [`Throttle::is_due`] and drives the session's tick itself, which keeps
/// the whole consumer single-threaded and lets tests fire ticks directly.
///
/// Interval changes apply from the next arming, so the tick already
/// scheduled keeps its deadline and the new cadence takes effect on the
/// tick after it.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Throttle {
    /// Creates a stopped throttle with the given tick interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Returns the current tick interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Changes the tick interval.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Starts the throttle if it is not already running; the first tick
    /// falls due one interval from `now`.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    /// Stops the throttle; no tick is due until it is started again.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Returns whether the throttle is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns whether a tick has fallen due.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.is_some_and(|due| now >= due)
    }

    /// Schedules the next tick one interval after `now`. Call after
    /// servicing a due tick; a no-op while stopped.
    pub fn rearm(&mut self, now: Instant) {
        if self.next_due.is_some() {
            self.next_due = Some(now + self.interval);
        }
    }

    /// Returns the instant of the next tick, if running. Host loops use
    /// this to bound their input-poll timeout.
    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_falls_due_one_interval_after_start() {
        let mut throttle = Throttle::new(Duration::from_millis(100));
        let t0 = Instant::now();
        assert!(!throttle.is_running());
        assert!(!throttle.is_due(t0));

        throttle.start(t0);
        assert!(throttle.is_running());
        assert!(!throttle.is_due(t0));
        assert!(!throttle.is_due(t0 + Duration::from_millis(99)));
        assert!(throttle.is_due(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn start_while_running_keeps_the_pending_deadline() {
        let mut throttle = Throttle::new(Duration::from_millis(100));
        let t0 = Instant::now();
        throttle.start(t0);
        throttle.start(t0 + Duration::from_millis(50));
        assert!(throttle.is_due(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn rearm_schedules_from_the_service_time() {
        let mut throttle = Throttle::new(Duration::from_millis(100));
        let t0 = Instant::now();
        throttle.start(t0);

        let service = t0 + Duration::from_millis(130);
        assert!(throttle.is_due(service));
        throttle.rearm(service);
        assert!(!throttle.is_due(service));
        assert!(throttle.is_due(service + Duration::from_millis(100)));
    }

    #[test]
    fn interval_change_applies_on_the_next_rearm() {
        let mut throttle = Throttle::new(Duration::from_millis(100));
        let t0 = Instant::now();
        throttle.start(t0);
        throttle.set_interval(Duration::from_millis(10));

        // The already-armed tick keeps its deadline.
        assert!(!throttle.is_due(t0 + Duration::from_millis(50)));

        let service = t0 + Duration::from_millis(100);
        throttle.rearm(service);
        assert!(throttle.is_due(service + Duration::from_millis(10)));
    }

    #[test]
    fn stop_clears_the_deadline_and_rearm_stays_inert() {
        let mut throttle = Throttle::new(Duration::from_millis(100));
        let t0 = Instant::now();
        throttle.start(t0);
        throttle.stop();

        assert!(!throttle.is_running());
        throttle.rearm(t0 + Duration::from_secs(10));
        assert!(!throttle.is_running());
        assert_eq!(throttle.next_due(), None);
    }
}
