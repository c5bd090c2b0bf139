//! Background execution for supervised tasks.
//!
//! The only place the crate crosses execution contexts. The task runs on the
//! blocking pool; its completion travels back to the owning context as a
//! [`HudEvent::TaskFinished`], where the engine performs the bracketing hide.
//! Each supervision carries a generation-stamped token: a newer supervision
//! supersedes the old one, whose completion then arrives stale and is
//! discarded instead of hiding the overlay out from under its successor.

use crate::event::{HudEvent, HudEvents};

/// Opaque proof of which supervision a completion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskToken {
    generation: u64,
}

/// Mints task tokens; only the most recently minted one is current.
#[derive(Debug, Default)]
pub(crate) struct TaskCounter {
    generation: u64,
}

impl TaskCounter {
    pub(crate) fn next(&mut self) -> TaskToken {
        self.generation += 1;
        TaskToken {
            generation: self.generation,
        }
    }
}

/// Runs `task` off the owning context and posts `TaskFinished` when it
/// returns. A panicking task still counts as finished: the hide must fire
/// regardless of how the task returned.
pub(crate) fn supervise(task: impl FnOnce() + Send + 'static, token: TaskToken, events: HudEvents) {
    tokio::spawn(async move {
        if let Err(err) = tokio::task::spawn_blocking(task).await {
            tracing::warn!(error = %err, "supervised task panicked");
        }
        // The owner may already be gone; nothing left to hide then.
        let _ = events.send(HudEvent::TaskFinished(token));
    });
}
