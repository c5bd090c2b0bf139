//! Serialized visual transitions.
//!
//! At most one animation runs per overlay. Requests made while one is in
//! flight queue up and start only after the running one completes, so the
//! renderer never shows two interleaved transitions. Zero-duration requests
//! on an idle queue complete without an animator round-trip, keeping
//! unanimated show/hide fully synchronous.

use std::collections::VecDeque;
use std::time::Duration;

use scrim_types::HudFrame;

/// Identity of one animation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

/// What a transition does, which decides what happens on its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Appearance of the overlay.
    Enter,
    /// Disappearance; an uncancelled completion finalizes the hide.
    Exit,
    /// Animated restyle of a visible overlay (batched field changes).
    Restyle,
}

/// A transition handed to the [`crate::Animator`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRequest {
    pub id: AnimationId,
    pub kind: TransitionKind,
    /// Target frame the renderer should end on.
    pub frame: HudFrame,
    pub duration: Duration,
}

/// Outcome of asking the queue to run a transition.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Outcome {
    /// Nothing was running and the duration was zero: the transition is
    /// already complete. The caller runs the completion logic inline.
    Immediate(TransitionKind),
    /// The transition should start now; hand the request to the animator.
    Start(AnimationRequest),
    /// An animation is in flight; the transition starts after it completes.
    Enqueued,
}

/// Serializes animations for one overlay.
#[derive(Debug, Default)]
pub(crate) struct TransitionQueue {
    next_id: u64,
    running: Option<(AnimationId, TransitionKind)>,
    queued: VecDeque<(TransitionKind, HudFrame, Duration)>,
}

impl TransitionQueue {
    pub(crate) fn request(
        &mut self,
        kind: TransitionKind,
        frame: HudFrame,
        duration: Duration,
    ) -> Outcome {
        if self.running.is_some() {
            self.queued.push_back((kind, frame, duration));
            return Outcome::Enqueued;
        }
        self.begin(kind, frame, duration)
    }

    /// Handles a completion event. Returns the finished kind for the running
    /// animation; stale ids (already cancelled or superseded) yield `None`.
    pub(crate) fn finished(&mut self, id: AnimationId, cancelled: bool) -> Option<(TransitionKind, bool)> {
        match self.running {
            Some((running_id, kind)) if running_id == id => {
                self.running = None;
                Some((kind, cancelled))
            }
            _ => None,
        }
    }

    /// Aborts the running animation, if any. Its id becomes stale, so a late
    /// completion event from the animator is discarded; the caller is
    /// responsible for telling the animator and for synthesizing the
    /// cancelled completion.
    pub(crate) fn cancel_running(&mut self) -> Option<(AnimationId, TransitionKind)> {
        self.running.take()
    }

    pub(crate) fn running_kind(&self) -> Option<TransitionKind> {
        self.running.map(|(_, kind)| kind)
    }

    /// Drops everything waiting behind the running animation.
    pub(crate) fn clear_queued(&mut self) {
        self.queued.clear();
    }

    /// Starts the next queued transition after a completion, if any.
    pub(crate) fn start_next(&mut self) -> Option<Outcome> {
        if self.running.is_some() {
            return None;
        }
        let (kind, frame, duration) = self.queued.pop_front()?;
        Some(self.begin(kind, frame, duration))
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.running.is_none() && self.queued.is_empty()
    }

    fn begin(&mut self, kind: TransitionKind, frame: HudFrame, duration: Duration) -> Outcome {
        if duration.is_zero() {
            return Outcome::Immediate(kind);
        }
        self.next_id += 1;
        let id = AnimationId(self.next_id);
        self.running = Some((id, kind));
        Outcome::Start(AnimationRequest {
            id,
            kind,
            frame,
            duration,
        })
    }
}
