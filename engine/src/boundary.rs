//! Boundary traits for the host toolkit.
//!
//! The engine coordinates visibility; everything visual or time-bound is an
//! external collaborator behind one of these traits. Implementations are
//! boxed and owned by the [`crate::Hud`], and are only ever called from the
//! owning context.

use std::time::{Duration, Instant};

use scrim_types::HudFrame;

use crate::timing::TimerToken;
use crate::transition::{AnimationId, AnimationRequest};

/// Attachment of the overlay's visual to a host view.
///
/// The engine never inspects the visual itself; one implementation serves
/// one overlay, so the handle is implicit.
pub trait HostSurface: Send {
    fn attach(&mut self);
    fn detach(&mut self);
    fn is_attached(&self) -> bool;
}

/// Pushes model changes to whatever draws the overlay.
pub trait Renderer: Send {
    /// Presents `frame`. When `animated` the renderer interpolates from its
    /// current presentation instead of jumping.
    fn apply(&mut self, frame: &HudFrame, animated: bool);

    /// The overlay is hidden but may still be attached; stop drawing it.
    fn clear(&mut self);
}

/// Runs one animation at a time on the engine's behalf.
///
/// Completion is reported as [`crate::HudEvent::TransitionFinished`] with the
/// request's id. [`Animator::cancel`] is advisory cleanup: by the time it is
/// called the engine has already synthesized the cancelled completion and
/// will discard any late event carrying that id.
pub trait Animator: Send {
    fn animate(&mut self, request: AnimationRequest);
    fn cancel(&mut self, id: AnimationId);
}

/// The engine's only time source.
///
/// `after` delivers [`crate::HudEvent::TimerFired`] with the given token once
/// `delay` elapses. The engine never schedules a zero delay; those actions
/// run synchronously at the call site to keep ordering deterministic.
pub trait Scheduler: Send {
    fn now(&self) -> Instant;
    fn after(&mut self, delay: Duration, token: TimerToken);
}
