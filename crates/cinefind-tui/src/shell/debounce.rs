//! Cancel-and-reschedule debounce for search triggers.

use std::time::Duration;

use tokio::time::Instant;

/// Default delay between the last query change and the fetch.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// A fetch waiting for its deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledFetch {
    /// Query text captured when the run was scheduled.
    pub query: String,
    /// When the run becomes due.
    pub deadline: Instant,
}

/// Holds at most one scheduled fetch.
///
/// Scheduling always cancels the previous run, so only the last query
/// within a burst of changes is ever fired.
#[derive(Debug)]
pub struct Debouncer {
    /// Delay applied to every scheduled run.
    delay: Duration,
    /// The outstanding run, if any.
    pending: Option<ScheduledFetch>,
}

impl Debouncer {
    /// Creates an idle debouncer with the given delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Cancels any pending run and schedules `query` at `now + delay`.
    ///
    /// Returns the cancelled run, if there was one.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn schedule(&mut self, query: impl Into<String>, now: Instant) -> Option<ScheduledFetch> {
        let cancelled = self.cancel();
        self.pending = Some(ScheduledFetch {
            query: query.into(),
            deadline: now + self.delay,
        });
        cancelled
    }

    /// Cancels the pending run.
    pub fn cancel(&mut self) -> Option<ScheduledFetch> {
        self.pending.take()
    }

    /// Deadline of the pending run.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Takes the pending query if its deadline has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref().is_some_and(|p| p.deadline <= now) {
            return self.pending.take().map(|p| p.query);
        }
        None
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_default_delay() {
        // Arrange
        let t0 = Instant::now();
        let mut debouncer = Debouncer::default();
        assert!(debouncer.deadline().is_none());

        // Act
        debouncer.schedule("batman", t0);

        // Assert
        assert_eq!(debouncer.deadline(), Some(t0 + ms(500)));
    }

    #[test]
    fn test_not_due_before_delay() {
        // Arrange
        let t0 = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.schedule("batman", t0);

        // Act
        let fired = debouncer.fire_if_due(t0 + ms(499));

        // Assert
        assert!(fired.is_none());
        assert!(debouncer.deadline().is_some());
    }

    #[test]
    fn test_fires_once_at_deadline() {
        // Arrange
        let t0 = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.schedule("batman", t0);

        // Act
        let first = debouncer.fire_if_due(t0 + ms(500));
        let second = debouncer.fire_if_due(t0 + ms(900));

        // Assert
        assert_eq!(first.as_deref(), Some("batman"));
        assert!(second.is_none());
    }

    #[test]
    fn test_reschedule_cancels_previous() {
        // Arrange
        let t0 = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.schedule("b", t0);

        // Act
        let cancelled = debouncer.schedule("ba", t0 + ms(300));

        // Assert
        assert_eq!(cancelled.unwrap().query, "b");
        assert!(debouncer.fire_if_due(t0 + ms(500)).is_none());
        assert_eq!(debouncer.deadline(), Some(t0 + ms(800)));
        assert_eq!(debouncer.fire_if_due(t0 + ms(800)).as_deref(), Some("ba"));
    }

    #[test]
    fn test_cancel_clears_pending() {
        // Arrange
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(100));
        debouncer.schedule("x", t0);

        // Act
        debouncer.cancel();

        // Assert
        assert!(debouncer.deadline().is_none());
        assert!(debouncer.fire_if_due(t0 + ms(1_000)).is_none());
    }
}
