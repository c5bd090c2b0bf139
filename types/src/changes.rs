//! Renderable snapshot and batched field mutation.
//!
//! Separates what the renderer consumes ([`HudFrame`]) from how callers
//! mutate it. Batched mutation through [`HudChanges`] lets the engine commit
//! several field edits as one visual transition instead of animating each
//! field in sequence.

use serde::{Deserialize, Serialize};

use crate::state::HudMode;
use crate::{CustomContent, Progress};

/// Snapshot of everything the renderer needs to draw the overlay.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HudFrame {
    pub mode: HudMode,
    pub progress: Progress,
    /// Main label, drawn under the indicator when present.
    pub label: Option<String>,
    /// Secondary detail line under the main label.
    pub detail: Option<String>,
    /// Content key for [`HudMode::CustomContent`].
    pub custom: Option<CustomContent>,
}

/// One field edit: untouched, set to a value, or cleared.
#[derive(Debug, Clone, PartialEq)]
enum Edit<T> {
    Untouched,
    Set(T),
    Cleared,
}

// Manual impl: the derive would demand `T: Default` although the default
// variant carries no `T`.
impl<T> Default for Edit<T> {
    fn default() -> Self {
        Self::Untouched
    }
}

impl<T: Clone + PartialEq> Edit<T> {
    /// Applies this edit to `slot`, reporting whether it changed anything.
    fn apply(&self, slot: &mut Option<T>) -> bool {
        match self {
            Edit::Untouched => false,
            Edit::Set(value) => {
                if slot.as_ref() == Some(value) {
                    false
                } else {
                    *slot = Some(value.clone());
                    true
                }
            }
            Edit::Cleared => slot.take().is_some(),
        }
    }
}

/// A batch of field mutations collected by `perform_changes`.
///
/// Fields left untouched keep their current value; setting and clearing are
/// distinct operations so a batch can remove a label without knowing whether
/// one was present.
#[derive(Debug, Clone, Default)]
pub struct HudChanges {
    mode: Option<HudMode>,
    progress: Option<Progress>,
    label: Edit<String>,
    detail: Edit<String>,
    custom: Edit<CustomContent>,
}

impl HudChanges {
    pub fn set_mode(&mut self, mode: HudMode) -> &mut Self {
        self.mode = Some(mode);
        self
    }

    pub fn set_progress(&mut self, progress: impl Into<Progress>) -> &mut Self {
        self.progress = Some(progress.into());
        self
    }

    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Edit::Set(label.into());
        self
    }

    pub fn clear_label(&mut self) -> &mut Self {
        self.label = Edit::Cleared;
        self
    }

    pub fn set_detail(&mut self, detail: impl Into<String>) -> &mut Self {
        self.detail = Edit::Set(detail.into());
        self
    }

    pub fn clear_detail(&mut self) -> &mut Self {
        self.detail = Edit::Cleared;
        self
    }

    pub fn set_custom_content(&mut self, content: CustomContent) -> &mut Self {
        self.custom = Edit::Set(content);
        self
    }

    pub fn clear_custom_content(&mut self) -> &mut Self {
        self.custom = Edit::Cleared;
        self
    }

    /// Applies the batch to `frame`, returning whether any field changed.
    pub fn apply(&self, frame: &mut HudFrame) -> bool {
        let mut changed = false;
        if let Some(mode) = self.mode
            && frame.mode != mode
        {
            frame.mode = mode;
            changed = true;
        }
        if let Some(progress) = self.progress
            && frame.progress != progress
        {
            frame.progress = progress;
            changed = true;
        }
        changed |= self.label.apply(&mut frame.label);
        changed |= self.detail.apply(&mut frame.detail);
        changed |= self.custom.apply(&mut frame.custom);
        changed
    }
}
