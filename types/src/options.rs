//! Overlay configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::state::HudMode;

/// Configuration for one overlay.
///
/// Timing fields are snapshotted by the engine when a show request is
/// accepted; mutating the options mid-cycle only affects the next cycle.
/// Durations serialize as integer milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudOptions {
    /// How long a show request must persist before the overlay actually
    /// appears. A hide arriving earlier cancels the show outright, so very
    /// short tasks never flash an overlay.
    #[serde(with = "duration_ms")]
    pub grace_delay: Duration,
    /// How long the overlay stays visible once shown, even if hide is
    /// requested sooner.
    #[serde(with = "duration_ms")]
    pub minimum_show_time: Duration,
    /// Duration of the enter/exit/restyle animations when a call asks for
    /// animation. Zero makes every transition instantaneous.
    #[serde(with = "duration_ms")]
    pub transition: Duration,
    /// Detach the overlay from the host once hidden, instead of keeping it
    /// attached (invisible) for reuse.
    pub remove_from_host_on_hide: bool,
    /// Initial visual mode.
    pub mode: HudMode,
}

impl HudOptions {
    /// Animation duration used by [`HudOptions::default`].
    pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(300);

    /// The flicker-guarded minimum show time used by
    /// [`HudOptions::conservative`].
    pub const CONSERVATIVE_MINIMUM_SHOW_TIME: Duration = Duration::from_millis(1500);

    /// Defaults with a 1.5 s minimum show time, so an overlay shown for a
    /// near-instant task does not blink in and out.
    #[must_use]
    pub fn conservative() -> Self {
        Self {
            minimum_show_time: Self::CONSERVATIVE_MINIMUM_SHOW_TIME,
            ..Self::default()
        }
    }
}

impl Default for HudOptions {
    fn default() -> Self {
        Self {
            grace_delay: Duration::ZERO,
            minimum_show_time: Duration::ZERO,
            transition: Self::DEFAULT_TRANSITION,
            remove_from_host_on_hide: false,
            mode: HudMode::default(),
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::{Duration, HudMode, HudOptions};

    #[test]
    fn defaults_are_zero_delays() {
        let options = HudOptions::default();
        assert_eq!(options.grace_delay, Duration::ZERO);
        assert_eq!(options.minimum_show_time, Duration::ZERO);
        assert_eq!(options.transition, HudOptions::DEFAULT_TRANSITION);
        assert!(!options.remove_from_host_on_hide);
        assert_eq!(options.mode, HudMode::Indeterminate);
    }

    #[test]
    fn conservative_sets_minimum_show_time() {
        let options = HudOptions::conservative();
        assert_eq!(
            options.minimum_show_time,
            HudOptions::CONSERVATIVE_MINIMUM_SHOW_TIME
        );
        assert_eq!(options.grace_delay, Duration::ZERO);
    }

    #[test]
    fn deserializes_from_partial_toml() {
        let options: HudOptions = toml::from_str(
            "grace_delay = 500\nminimum_show_time = 1000\nmode = \"determinate\"\n",
        )
        .unwrap();
        assert_eq!(options.grace_delay, Duration::from_millis(500));
        assert_eq!(options.minimum_show_time, Duration::from_millis(1000));
        assert_eq!(options.mode, HudMode::Determinate);
        assert_eq!(options.transition, HudOptions::DEFAULT_TRANSITION);
    }

    #[test]
    fn round_trips_through_toml() {
        let options = HudOptions {
            grace_delay: Duration::from_millis(250),
            remove_from_host_on_hide: true,
            ..HudOptions::conservative()
        };
        let text = toml::to_string(&options).unwrap();
        let back: HudOptions = toml::from_str(&text).unwrap();
        assert_eq!(back, options);
    }
}
