//! Overlay bookkeeping
//!
//! Overlays are floating elements drawn above the main content. They are
//! loaded (registered) up front and then shown or hidden, either modally or
//! not. A dimming backdrop is shown whenever at least one modal overlay is
//! visible.

use crate::error::{WorkbenchError, WorkbenchResult};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Identity of a registered overlay
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlayId(pub String);

impl OverlayId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OverlayId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OverlayId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for OverlayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tracks all loaded overlays and which of them are currently shown
#[derive(Debug, Default)]
pub struct OverlayManager {
    /// All loaded overlays in registration order
    overlays: Vec<OverlayId>,

    /// Modal overlays currently shown, in the order they were shown
    shown_modal: Vec<OverlayId>,

    /// Non-modal overlays currently shown, in the order they were shown
    shown: Vec<OverlayId>,
}

impl OverlayManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an overlay hidden. Returns `false` if it was already registered.
    pub fn register(&mut self, overlay: OverlayId) -> bool {
        if self.overlays.contains(&overlay) {
            return false;
        }
        trace!("register overlay - {}", overlay);
        self.overlays.push(overlay);
        true
    }

    /// Remove an overlay, hiding it first if it is shown
    pub fn unregister(&mut self, overlay: &OverlayId) -> WorkbenchResult<()> {
        let index = self.index_of(overlay)?;
        trace!("unregister overlay - {}", overlay);
        self.shown_modal.retain(|o| o != overlay);
        self.shown.retain(|o| o != overlay);
        self.overlays.remove(index);
        Ok(())
    }

    /// Make a registered overlay visible. Returns whether anything changed.
    pub fn show(&mut self, overlay: &OverlayId, modal: bool) -> WorkbenchResult<bool> {
        self.index_of(overlay)?;

        let (target, other) = if modal {
            (&mut self.shown_modal, &mut self.shown)
        } else {
            (&mut self.shown, &mut self.shown_modal)
        };

        if target.contains(overlay) {
            return Ok(false);
        }

        // an overlay is shown with one modality at a time
        other.retain(|o| o != overlay);
        target.push(overlay.clone());
        trace!("show overlay - {} (modal: {})", overlay, modal);
        Ok(true)
    }

    /// Hide an overlay shown with the same `modal` flag. Hiding an overlay
    /// that is not shown that way is a no-op.
    pub fn hide(&mut self, overlay: &OverlayId, modal: bool) -> WorkbenchResult<bool> {
        self.index_of(overlay)?;

        let list = if modal {
            &mut self.shown_modal
        } else {
            &mut self.shown
        };

        let before = list.len();
        list.retain(|o| o != overlay);
        let removed = list.len() != before;
        trace!("hide overlay - {} (modal: {}) - removed: {}", overlay, modal, removed);
        Ok(removed)
    }

    /// Hide every shown overlay, returning the ones that were hidden
    pub fn hide_all(&mut self) -> Vec<OverlayId> {
        trace!("hide all overlays");
        let mut hidden = std::mem::take(&mut self.shown_modal);
        hidden.append(&mut self.shown);
        hidden
    }

    pub fn is_registered(&self, overlay: &OverlayId) -> bool {
        self.overlays.contains(overlay)
    }

    pub fn is_visible(&self, overlay: &OverlayId) -> bool {
        self.shown_modal.contains(overlay) || self.shown.contains(overlay)
    }

    pub fn is_shown_modal(&self, overlay: &OverlayId) -> bool {
        self.shown_modal.contains(overlay)
    }

    pub fn overlays(&self) -> &[OverlayId] {
        &self.overlays
    }

    pub fn shown_modal(&self) -> &[OverlayId] {
        &self.shown_modal
    }

    pub fn shown(&self) -> &[OverlayId] {
        &self.shown
    }

    /// Topmost modal overlay, i.e. the one shown last
    pub fn topmost_modal(&self) -> Option<&OverlayId> {
        self.shown_modal.last()
    }

    /// Whether the dimming backdrop should be drawn
    pub fn backdrop_visible(&self) -> bool {
        !self.shown_modal.is_empty()
    }

    fn index_of(&self, overlay: &OverlayId) -> WorkbenchResult<usize> {
        self.overlays
            .iter()
            .position(|o| o == overlay)
            .ok_or_else(|| WorkbenchError::NotRegistered(overlay.clone()))
    }
}
