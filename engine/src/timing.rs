//! Single-slot timer bookkeeping.
//!
//! The overlay has at most one pending timer at any moment: either the grace
//! delay before showing or the remaining minimum show time before hiding.
//! Scheduling a new timer supersedes the old one, and cancellation must win
//! any race with a fire that is already queued in the event channel. Both
//! are enforced with a generation stamp: the slot only accepts the token it
//! handed out most recently.

/// Opaque proof of which schedule a fire belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken {
    generation: u64,
}

/// What the pending timer will do when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerPurpose {
    /// Grace delay elapsed; the overlay may actually appear.
    GraceElapsed,
    /// Minimum show time elapsed; the deferred hide may proceed.
    MinimumShowElapsed,
}

/// The single active timer slot.
#[derive(Debug, Default)]
pub(crate) struct TimerSlot {
    generation: u64,
    armed: Option<TimerPurpose>,
}

impl TimerSlot {
    /// Arms the slot for `purpose`, invalidating any previously armed timer,
    /// and returns the token the scheduler must deliver back.
    pub(crate) fn arm(&mut self, purpose: TimerPurpose) -> TimerToken {
        self.generation += 1;
        self.armed = Some(purpose);
        TimerToken {
            generation: self.generation,
        }
    }

    /// Clears the slot. Any outstanding token becomes stale immediately,
    /// even if its fire is already queued.
    pub(crate) fn cancel(&mut self) {
        if self.armed.take().is_some() {
            self.generation += 1;
        }
    }

    /// Accepts a fire. Returns the armed purpose only for the current
    /// token; stale tokens yield `None` and must have no observable effect.
    pub(crate) fn accept(&mut self, token: TimerToken) -> Option<TimerPurpose> {
        if token.generation == self.generation {
            self.armed.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TimerPurpose, TimerSlot};

    #[test]
    fn accepts_current_token_once() {
        let mut slot = TimerSlot::default();
        let token = slot.arm(TimerPurpose::GraceElapsed);
        assert_eq!(slot.accept(token), Some(TimerPurpose::GraceElapsed));
        assert_eq!(slot.accept(token), None);
    }

    #[test]
    fn cancel_invalidates_outstanding_token() {
        let mut slot = TimerSlot::default();
        let token = slot.arm(TimerPurpose::MinimumShowElapsed);
        slot.cancel();
        assert_eq!(slot.accept(token), None);
    }

    #[test]
    fn rearming_supersedes_previous_token() {
        let mut slot = TimerSlot::default();
        let stale = slot.arm(TimerPurpose::GraceElapsed);
        let current = slot.arm(TimerPurpose::MinimumShowElapsed);
        assert_eq!(slot.accept(stale), None);
        assert_eq!(slot.accept(current), Some(TimerPurpose::MinimumShowElapsed));
    }

    #[test]
    fn stale_token_after_cancel_and_rearm() {
        let mut slot = TimerSlot::default();
        let stale = slot.arm(TimerPurpose::MinimumShowElapsed);
        slot.cancel();
        let current = slot.arm(TimerPurpose::GraceElapsed);
        // The stale fire may already sit in the event queue; it must lose.
        assert_eq!(slot.accept(stale), None);
        assert_eq!(slot.accept(current), Some(TimerPurpose::GraceElapsed));
    }

    #[test]
    fn cancel_on_empty_slot_is_harmless() {
        let mut slot = TimerSlot::default();
        slot.cancel();
        let token = slot.arm(TimerPurpose::GraceElapsed);
        assert_eq!(slot.accept(token), Some(TimerPurpose::GraceElapsed));
    }
}
