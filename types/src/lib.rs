//! Core domain types for Scrim.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the
//! application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod changes;
mod options;
mod state;

pub use changes::{HudChanges, HudFrame};
pub use options::HudOptions;
pub use state::{HudMode, HudState};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Progress
// ============================================================================

/// Normalized progress in `[0.0, 1.0]`.
///
/// Out-of-range values are clamped on construction rather than rejected: a
/// visual component degrades gracefully instead of failing a caller's flow.
/// NaN normalizes to `0.0`. Only meaningful while the mode is
/// [`HudMode::Determinate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Progress(f32);

impl Progress {
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    #[must_use]
    pub fn is_complete(self) -> bool {
        self.0 >= 1.0
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self(0.0)
    }
}

impl From<f32> for Progress {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Progress> for f32 {
    fn from(value: Progress) -> Self {
        value.0
    }
}

// ============================================================================
// CustomContent
// ============================================================================

#[derive(Debug, Error)]
#[error("custom content key must not be empty")]
pub struct EmptyContentError;

/// Opaque key for caller-supplied overlay content.
///
/// The engine never interprets the key; the renderer maps it to whatever
/// widget the host toolkit provides. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomContent(Arc<str>);

impl CustomContent {
    pub fn new(key: impl AsRef<str>) -> Result<Self, EmptyContentError> {
        let key = key.as_ref();
        if key.trim().is_empty() {
            Err(EmptyContentError)
        } else {
            Ok(Self(Arc::from(key)))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CustomContent {
    type Error = EmptyContentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl TryFrom<&str> for CustomContent {
    type Error = EmptyContentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CustomContent> for String {
    fn from(value: CustomContent) -> Self {
        value.0.as_ref().to_owned()
    }
}

impl AsRef<str> for CustomContent {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::{CustomContent, Progress};

    #[test]
    fn progress_clamps_out_of_range() {
        assert_eq!(Progress::new(-0.5).value(), 0.0);
        assert_eq!(Progress::new(1.5).value(), 1.0);
        assert_eq!(Progress::new(0.42).value(), 0.42);
    }

    #[test]
    fn progress_normalizes_nan() {
        assert_eq!(Progress::new(f32::NAN).value(), 0.0);
    }

    #[test]
    fn progress_complete_at_one() {
        assert!(Progress::new(1.0).is_complete());
        assert!(!Progress::new(0.999).is_complete());
    }

    #[test]
    fn custom_content_rejects_empty() {
        assert!(CustomContent::new("").is_err());
        assert!(CustomContent::new("   ").is_err());
    }

    #[test]
    fn custom_content_round_trips_serde() {
        let content = CustomContent::new("checkmark").unwrap();
        let json = serde_json::to_string(&content).unwrap();
        let back: CustomContent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, content);
    }

    #[test]
    fn custom_content_serde_rejects_empty() {
        assert!(serde_json::from_str::<CustomContent>("\"\"").is_err());
    }
}
