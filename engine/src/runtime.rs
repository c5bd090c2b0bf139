//! Boundary runtime: tokio-backed timers and animation clocks.
//!
//! Production implementations of [`Scheduler`] and [`Animator`]. Both spawn
//! abortable sleep tasks that post completion events back through the HUD's
//! channel; neither touches HUD state. They require a running tokio runtime.
//!
//! The engine validates every fire against its own generation/id bookkeeping,
//! so aborting here is cleanup, not correctness: a sleep that slips through
//! delivers a stale event that the engine discards.

use std::time::{Duration, Instant};

use futures_util::future::{AbortHandle, Abortable};

use crate::boundary::{Animator, Scheduler};
use crate::event::{HudEvent, HudEvents};
use crate::timing::TimerToken;
use crate::transition::{AnimationId, AnimationRequest};

/// Timer source backed by `tokio::time`.
pub struct TokioScheduler {
    events: HudEvents,
    pending: Option<AbortHandle>,
}

impl TokioScheduler {
    #[must_use]
    pub fn new(events: HudEvents) -> Self {
        Self {
            events,
            pending: None,
        }
    }
}

impl Scheduler for TokioScheduler {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn after(&mut self, delay: Duration, token: TimerToken) {
        // One timer slot upstream means at most one sleep worth keeping.
        if let Some(previous) = self.pending.take() {
            previous.abort();
        }
        let (handle, registration) = AbortHandle::new_pair();
        let events = self.events.clone();
        tokio::spawn(async move {
            if Abortable::new(tokio::time::sleep(delay), registration)
                .await
                .is_ok()
            {
                let _ = events.send(HudEvent::TimerFired(token));
            }
        });
        self.pending = Some(handle);
    }
}

/// Animation clock backed by `tokio::time`.
///
/// Interpolation itself is the renderer's business; this implementation only
/// times the completion that drives the state machine forward.
pub struct TokioAnimator {
    events: HudEvents,
    // The engine serializes animations, so at most one is in flight.
    running: Option<(AnimationId, AbortHandle)>,
}

impl TokioAnimator {
    #[must_use]
    pub fn new(events: HudEvents) -> Self {
        Self {
            events,
            running: None,
        }
    }
}

impl Animator for TokioAnimator {
    fn animate(&mut self, request: AnimationRequest) {
        let (handle, registration) = AbortHandle::new_pair();
        let events = self.events.clone();
        let id = request.id;
        tokio::spawn(async move {
            if Abortable::new(tokio::time::sleep(request.duration), registration)
                .await
                .is_ok()
            {
                let _ = events.send(HudEvent::TransitionFinished {
                    id,
                    cancelled: false,
                });
            }
        });
        self.running = Some((id, handle));
    }

    fn cancel(&mut self, id: AnimationId) {
        if let Some((running_id, handle)) = self.running.take() {
            if running_id == id {
                handle.abort();
            } else {
                self.running = Some((running_id, handle));
            }
        }
    }
}
