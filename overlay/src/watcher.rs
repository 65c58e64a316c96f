//! Edge-triggered mode-change tracking.

use meshmark_core::scene::{ObjectMode, Scene};

use crate::sync::sync_selection;

/// Tracks the active object's last observed mode across scene-graph update
/// notifications and captures a selection snapshot exactly once per
/// edit-mode exit.
///
/// Owned by the [`OverlaySession`](crate::session::OverlaySession); its
/// state starts unknown at activation, so the first observation never
/// triggers a sync.
#[derive(Debug, Default)]
pub struct ModeWatcher {
    last_mode: Option<ObjectMode>,
}

impl ModeWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently observed mode, if any.
    pub fn last_mode(&self) -> Option<ObjectMode> {
        self.last_mode
    }

    /// Process one scene-graph update notification.
    ///
    /// No-op when the scene has no active object (the last observed mode is
    /// left untouched). Edge-triggered: repeated notifications in an
    /// unchanged mode never re-sync.
    pub fn observe(&mut self, scene: &mut Scene) {
        let Some(active) = scene.active() else {
            return;
        };
        let Some(current) = scene.object(active).map(|o| o.mode()) else {
            return;
        };

        if self.last_mode == Some(current) {
            return;
        }
        if self.last_mode == Some(ObjectMode::Edit) {
            if let Some(object) = scene.object_mut(active) {
                if sync_selection(object) {
                    log::debug!("selection snapshot refreshed for '{}'", object.name());
                }
            }
        }
        self.last_mode = Some(current);
    }
}
