//! Periodic tick clock owned by the application.
//!
//! The engine is passive; this scheduler decides when the next `tick()` is
//! due. Pausing stops it, resuming restarts it, and a speed change
//! reschedules it at the new interval. All methods take `now` so the clock can
//! be driven deterministically in tests.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    next_due: Option<Instant>,
}

impl TickScheduler {
    /// A stopped scheduler with the given period.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Start (or restart) ticking; the first tick is one interval from `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Change the period. A running scheduler restarts its countdown from
    /// `now`; a stopped one just remembers the new period.
    pub fn reschedule(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        if self.is_running() {
            self.start(now);
        }
    }

    /// Returns true (at most once per call) when a tick is due.
    ///
    /// A loop that fell behind fires one tick and then waits a full interval
    /// instead of bursting to catch up.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let next = due + self.interval;
        self.next_due = Some(if next <= now { now + self.interval } else { next });
        true
    }

    /// Time left until the next tick, `None` while stopped.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_300: Duration = Duration::from_millis(300);

    #[test]
    fn test_stopped_scheduler_never_fires() {
        let now = Instant::now();
        let mut scheduler = TickScheduler::new(MS_300);
        assert!(!scheduler.is_running());
        assert!(!scheduler.poll(now + Duration::from_secs(10)));
        assert_eq!(scheduler.time_until_due(now), None);
    }

    #[test]
    fn test_fires_once_per_interval() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new(MS_300);
        scheduler.start(start);

        assert!(!scheduler.poll(start + Duration::from_millis(299)));
        assert!(scheduler.poll(start + MS_300));
        assert!(!scheduler.poll(start + Duration::from_millis(301)));
        assert!(scheduler.poll(start + Duration::from_millis(600)));
    }

    #[test]
    fn test_no_burst_after_stall() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new(MS_300);
        scheduler.start(start);

        let late = start + Duration::from_secs(5);
        assert!(scheduler.poll(late));
        assert!(!scheduler.poll(late));
        assert_eq!(scheduler.time_until_due(late), Some(MS_300));
    }

    #[test]
    fn test_reschedule_running() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new(MS_300);
        scheduler.start(start);

        let later = start + Duration::from_millis(100);
        scheduler.reschedule(Duration::from_millis(290), later);
        assert_eq!(scheduler.interval(), Duration::from_millis(290));
        assert_eq!(
            scheduler.time_until_due(later),
            Some(Duration::from_millis(290))
        );
    }

    #[test]
    fn test_reschedule_stopped_stays_stopped() {
        let now = Instant::now();
        let mut scheduler = TickScheduler::new(MS_300);
        scheduler.reschedule(Duration::from_millis(80), now);
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.interval(), Duration::from_millis(80));
    }

    #[test]
    fn test_stop_cancels_pending_tick() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new(MS_300);
        scheduler.start(start);
        scheduler.stop();
        assert!(!scheduler.poll(start + Duration::from_secs(1)));
    }
}
