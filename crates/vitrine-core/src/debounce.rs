//! Deadline-based debounce timers.
//!
//! Resize handlers on the site coalesce bursts of events: every new event
//! pushes the deadline out, and only the last value is delivered once the
//! delay has elapsed without another event. The timer never runs on its own;
//! the host polls it with the current [`Instant`] from its event loop.

use std::time::{Duration, Instant};

/// A debounce timer carrying the most recent pending value.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    fire_at: Instant,
    value: T,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Create a debouncer with a quiet period in milliseconds.
    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Record an event at `now`, replacing any pending value and restarting
    /// the quiet period.
    pub fn schedule(&mut self, now: Instant, value: T) {
        self.pending = Some(Pending {
            fire_at: now + self.delay,
            value,
        });
    }

    /// When the pending value fires, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.fire_at)
    }

    /// Take the pending value if its deadline has passed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.fire_at => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::from_millis(100);

        debouncer.schedule(start, 1280);
        assert_eq!(debouncer.deadline(), Some(start + Duration::from_millis(100)));
        assert_eq!(debouncer.poll(start + Duration::from_millis(99)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(100)), Some(1280));
        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(500)), None);
    }

    #[test]
    fn test_burst_keeps_last_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::from_millis(250);

        debouncer.schedule(start, 800);
        debouncer.schedule(start + Duration::from_millis(200), 1000);
        debouncer.schedule(start + Duration::from_millis(400), 1200);

        // First deadline was pushed out by the later events.
        assert_eq!(debouncer.poll(start + Duration::from_millis(300)), None);
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(650))
        );
        assert_eq!(debouncer.poll(start + Duration::from_millis(650)), Some(1200));
    }
}
