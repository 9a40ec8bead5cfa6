//! Link input state inside the toolbar.
//!
//! Opening the input starts a short reveal delay so the click that opened it
//! does not immediately blur it. When the delay elapses the session inspects
//! the selection, captures its range and focuses the input. Typing into the
//! input loses the document selection, so the captured range is restored
//! before the link is applied.

use crate::timer::{Millis, TimerState};

#[derive(Debug, Clone)]
pub struct LinkEditor<R> {
    open: bool,
    reveal: TimerState,
    captured: Option<R>,
    reveal_delay: Millis,
}

impl<R: Clone> LinkEditor<R> {
    pub fn new(reveal_delay: Millis) -> Self {
        Self {
            open: false,
            reveal: TimerState::Idle,
            captured: None,
            reveal_delay,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the input between shown and hidden. Returns the new state.
    ///
    /// Opening schedules the reveal; closing leaves any pending reveal in
    /// place, and [`poll_reveal`](Self::poll_reveal) ignores it.
    pub fn toggle(&mut self, now: Millis) -> bool {
        self.open = !self.open;
        if self.open {
            self.reveal.schedule(now, self.reveal_delay);
        }
        self.open
    }

    /// Returns true once the reveal delay has elapsed while the input is open.
    pub fn poll_reveal(&mut self, now: Millis) -> bool {
        self.reveal.poll(now).is_some() && self.open
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.reveal.deadline()
    }

    /// Remember the range the link will be applied to.
    pub fn capture(&mut self, range: Option<R>) {
        self.captured = range;
    }

    pub fn captured(&self) -> Option<&R> {
        self.captured.as_ref()
    }

    /// Hide the input. The captured range is kept for a later apply.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Hide the input and forget everything, including a pending reveal.
    pub fn reset(&mut self) {
        self.open = false;
        self.reveal.cancel();
        self.captured = None;
    }
}
