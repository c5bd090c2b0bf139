//! Overlay visibility state machine types.

use serde::{Deserialize, Serialize};

/// Visibility state of the overlay.
///
/// The full cycle is `Hidden -> PendingShow -> Visible -> PendingHide ->
/// Hiding -> Hidden`. Shortcuts skip the pending states when the relevant
/// timer is zero or already satisfied, and cancel edges back out of both
/// pending states (and out of an in-flight exit) when the opposite request
/// arrives first. [`HudState::permits`] encodes the legal edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HudState {
    /// Not on screen. The idle and terminal state.
    #[default]
    Hidden,
    /// Show requested; waiting out the grace delay before appearing.
    PendingShow,
    /// On screen.
    Visible,
    /// Hide requested; waiting out the remaining minimum show time.
    PendingHide,
    /// Exit transition in flight.
    Hiding,
}

impl HudState {
    /// Whether the overlay occupies the host surface in this state.
    #[must_use]
    pub fn is_on_screen(self) -> bool {
        matches!(self, Self::Visible | Self::PendingHide | Self::Hiding)
    }

    /// Whether `next` is a legal direct transition from this state.
    #[must_use]
    pub fn permits(self, next: Self) -> bool {
        match (self, next) {
            // Show path, with and without a grace delay.
            (Self::Hidden, Self::PendingShow | Self::Visible)
            | (Self::PendingShow, Self::Visible)
            // Hide path, with and without remaining minimum show time.
            | (Self::Visible, Self::PendingHide | Self::Hiding)
            | (Self::PendingHide, Self::Hiding)
            | (Self::Hiding, Self::Hidden)
            // Cancel edges: hide before the grace delay elapses, show before
            // the hide timer elapses, show interrupting an exit transition.
            | (Self::PendingShow, Self::Hidden)
            | (Self::PendingHide | Self::Hiding, Self::Visible) => true,
            _ => false,
        }
    }
}

/// Which visual representation the renderer should use. Mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HudMode {
    /// An activity spinner with no measurable progress.
    #[default]
    Indeterminate,
    /// A progress ring driven by [`crate::Progress`].
    Determinate,
    /// A caller-supplied widget identified by [`crate::CustomContent`].
    CustomContent,
}

#[cfg(test)]
mod tests {
    use super::HudState;

    const ALL: [HudState; 5] = [
        HudState::Hidden,
        HudState::PendingShow,
        HudState::Visible,
        HudState::PendingHide,
        HudState::Hiding,
    ];

    #[test]
    fn full_cycle_is_legal() {
        assert!(HudState::Hidden.permits(HudState::PendingShow));
        assert!(HudState::PendingShow.permits(HudState::Visible));
        assert!(HudState::Visible.permits(HudState::PendingHide));
        assert!(HudState::PendingHide.permits(HudState::Hiding));
        assert!(HudState::Hiding.permits(HudState::Hidden));
    }

    #[test]
    fn shortcuts_are_legal() {
        assert!(HudState::Hidden.permits(HudState::Visible));
        assert!(HudState::Visible.permits(HudState::Hiding));
    }

    #[test]
    fn cancel_edges_are_legal() {
        assert!(HudState::PendingShow.permits(HudState::Hidden));
        assert!(HudState::PendingHide.permits(HudState::Visible));
        assert!(HudState::Hiding.permits(HudState::Visible));
    }

    #[test]
    fn no_state_permits_itself() {
        for state in ALL {
            assert!(!state.permits(state), "{state:?} must not self-loop");
        }
    }

    #[test]
    fn hidden_is_unreachable_from_visible_directly() {
        assert!(!HudState::Visible.permits(HudState::Hidden));
        assert!(!HudState::PendingHide.permits(HudState::Hidden));
    }

    #[test]
    fn on_screen_states() {
        assert!(!HudState::Hidden.is_on_screen());
        assert!(!HudState::PendingShow.is_on_screen());
        assert!(HudState::Visible.is_on_screen());
        assert!(HudState::PendingHide.is_on_screen());
        assert!(HudState::Hiding.is_on_screen());
    }
}
