//! Events marshalled back to the context that owns the HUD.
//!
//! Timers, animations, and supervised tasks all complete somewhere else;
//! nothing touches HUD state from those contexts. Completion signals travel
//! through an unbounded channel and the owner feeds them into
//! [`crate::Hud::handle_event`].

use tokio::sync::mpsc;

use crate::supervisor::TaskToken;
use crate::timing::TimerToken;
use crate::transition::AnimationId;

/// A completion signal addressed to the HUD's owning context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudEvent {
    /// A scheduled timer elapsed. Stale tokens (superseded by a newer
    /// schedule or an explicit cancel) are discarded on receipt.
    TimerFired(TimerToken),
    /// An animation handed to the [`crate::Animator`] finished.
    /// `cancelled` completions for the running animation never originate
    /// here - the engine synthesizes those synchronously when it cancels -
    /// so a late event for a cancelled animation is simply stale.
    TransitionFinished { id: AnimationId, cancelled: bool },
    /// A supervised unit of work returned (normally or by panicking). Stale
    /// tokens (a newer supervision replaced this one) are discarded on
    /// receipt.
    TaskFinished(TaskToken),
}

/// Sender half used by schedulers, animators, and task supervision.
pub type HudEvents = mpsc::UnboundedSender<HudEvent>;

/// Receiver half drained by the owning context.
pub type HudEventReceiver = mpsc::UnboundedReceiver<HudEvent>;

/// Creates the event channel a [`crate::Hud`] and its boundary
/// implementations communicate over.
#[must_use]
pub fn event_channel() -> (HudEvents, HudEventReceiver) {
    mpsc::unbounded_channel()
}
