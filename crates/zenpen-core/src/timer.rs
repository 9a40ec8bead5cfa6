//! Explicit timer state for debounced and deferred work.
//!
//! Nothing in the core touches a real clock. Callers pass a millisecond
//! timestamp (the `performance.now()` unit) into every operation, and the
//! host schedules a wake-up for [`TimerState::deadline`] /
//! [`DeferredQueue::next_deadline`]. Tests advance time by passing larger
//! numbers.

/// Milliseconds since an arbitrary origin.
pub type Millis = f64;

/// A single-slot timer. Scheduling again replaces the pending deadline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Pending {
        deadline: Millis,
    },
    Fired,
}

impl TimerState {
    /// Schedule (or reschedule) the timer `delay` ms after `now`.
    pub fn schedule(&mut self, now: Millis, delay: Millis) {
        *self = TimerState::Pending {
            deadline: now + delay,
        };
    }

    pub fn cancel(&mut self) {
        *self = TimerState::Idle;
    }

    pub fn deadline(&self) -> Option<Millis> {
        match self {
            TimerState::Pending { deadline } => Some(*deadline),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TimerState::Pending { .. })
    }

    /// Fire the timer if its deadline has passed.
    ///
    /// Returns the deadline that fired. A timer fires at most once per
    /// scheduling.
    pub fn poll(&mut self, now: Millis) -> Option<Millis> {
        match *self {
            TimerState::Pending { deadline } if now >= deadline => {
                *self = TimerState::Fired;
                Some(deadline)
            }
            _ => None,
        }
    }
}

/// Fire-and-forget deferrals that are never cancelled individually.
///
/// Each push adds an independent deadline; the consumer re-checks its own
/// state when one fires rather than relying on cancellation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeferredQueue {
    deadlines: Vec<Millis>,
}

impl DeferredQueue {
    pub fn push(&mut self, now: Millis, delay: Millis) {
        self.push_at(now + delay);
    }

    pub fn push_at(&mut self, deadline: Millis) {
        self.deadlines.push(deadline);
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.deadlines.iter().copied().reduce(Millis::min)
    }

    /// Remove and return every deadline at or before `now`, earliest first.
    pub fn take_due(&mut self, now: Millis) -> Vec<Millis> {
        let mut due: Vec<Millis> = self.deadlines.iter().copied().filter(|d| *d <= now).collect();
        self.deadlines.retain(|d| *d > now);
        due.sort_by(Millis::total_cmp);
        due
    }

    pub fn clear(&mut self) {
        self.deadlines.clear();
    }

    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}

/// Earliest of several optional deadlines.
pub fn earliest(deadlines: impl IntoIterator<Item = Option<Millis>>) -> Option<Millis> {
    deadlines.into_iter().flatten().reduce(Millis::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_once() {
        let mut timer = TimerState::default();
        assert_eq!(timer.poll(1000.0), None);

        timer.schedule(0.0, 260.0);
        assert_eq!(timer.deadline(), Some(260.0));
        assert_eq!(timer.poll(259.0), None);
        assert_eq!(timer.poll(260.0), Some(260.0));
        assert_eq!(timer, TimerState::Fired);
        assert_eq!(timer.poll(500.0), None);
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let mut timer = TimerState::default();
        timer.schedule(0.0, 1000.0);
        timer.schedule(150.0, 1000.0);
        assert_eq!(timer.poll(1000.0), None);
        assert_eq!(timer.poll(1150.0), Some(1150.0));
    }

    #[test]
    fn test_cancel() {
        let mut timer = TimerState::default();
        timer.schedule(0.0, 10.0);
        timer.cancel();
        assert!(!timer.is_pending());
        assert_eq!(timer.poll(100.0), None);
    }

    #[test]
    fn test_queue_keeps_every_deadline() {
        let mut queue = DeferredQueue::default();
        queue.push(200.0, 260.0);
        queue.push(0.0, 260.0);
        assert_eq!(queue.next_deadline(), Some(260.0));

        assert_eq!(queue.take_due(300.0), vec![260.0]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.take_due(460.0), vec![460.0]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_earliest() {
        assert_eq!(earliest([None, Some(5.0), Some(3.0)]), Some(3.0));
        assert_eq!(earliest([None, None]), None);
    }
}
