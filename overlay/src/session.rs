//! Session lifecycle: draw-handler registry, mode watcher, keymap.

use parking_lot::Mutex;

use meshmark_core::input::{KeyChord, KeyCode};
use meshmark_core::scene::{ObjectMode, Scene};

use crate::render::{LabelPainter, ScreenProjector, draw_overlay};
use crate::settings::OverlaySettings;
use crate::sync::sync_selection;
use crate::watcher::ModeWatcher;

/// Per-frame draw callback signature. Returns the number of labels drawn.
pub type DrawCallback = Box<
    dyn FnMut(&mut Scene, &OverlaySettings, &dyn ScreenProjector, &mut dyn LabelPainter) -> usize
        + Send,
>;

/// Handle identifying a registered draw callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawHandle(u64);

struct Registry {
    next_handle: u64,
    entries: Vec<(DrawHandle, DrawCallback)>,
}

/// Registry of per-frame draw callbacks (the host's draw-handler list).
///
/// Handles are never reused; removing a stale or never-registered handle is
/// a no-op. Callbacks must not add or remove handlers from within
/// [`dispatch`](Self::dispatch).
pub struct DrawHandlers {
    inner: Mutex<Registry>,
}

impl DrawHandlers {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Registry {
                next_handle: 0,
                entries: Vec::new(),
            }),
        }
    }

    /// Register a callback, returning its handle.
    pub fn add(&self, callback: DrawCallback) -> DrawHandle {
        let mut inner = self.inner.lock();
        let handle = DrawHandle(inner.next_handle);
        inner.next_handle += 1;
        inner.entries.push((handle, callback));
        handle
    }

    /// Remove a callback. Returns false for unknown handles.
    pub fn remove(&self, handle: DrawHandle) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.entries.len();
        inner.entries.retain(|(h, _)| *h != handle);
        inner.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every registered callback for one frame, summing label counts.
    pub fn dispatch(
        &self,
        scene: &mut Scene,
        settings: &OverlaySettings,
        projector: &dyn ScreenProjector,
        painter: &mut dyn LabelPainter,
    ) -> usize {
        let mut inner = self.inner.lock();
        let mut drawn = 0;
        for (_, callback) in &mut inner.entries {
            drawn += callback(scene, settings, projector, painter);
        }
        drawn
    }
}

impl Default for DrawHandlers {
    fn default() -> Self {
        Self::new()
    }
}

/// Overlay session: everything whose lifetime spans activation.
///
/// Created once by the embedding application; [`activate`](Self::activate)
/// and [`deactivate`](Self::deactivate) are both idempotent, and
/// deactivation is safe even when the session was never activated.
pub struct OverlaySession {
    watcher: Option<ModeWatcher>,
    draw_handle: Option<DrawHandle>,
    binding: KeyChord,
}

impl OverlaySession {
    pub fn new() -> Self {
        Self {
            watcher: None,
            draw_handle: None,
            binding: KeyChord::new(KeyCode::I).with_ctrl().with_shift(),
        }
    }

    /// Whether a draw handler is currently registered.
    pub fn is_active(&self) -> bool {
        self.draw_handle.is_some()
    }

    /// The chord that toggles the overlay.
    pub fn key_binding(&self) -> KeyChord {
        self.binding
    }

    pub fn set_key_binding(&mut self, binding: KeyChord) {
        self.binding = binding;
    }

    /// Register the draw callback and start watching mode changes.
    ///
    /// If the active object is already being edited, its selection is
    /// snapshotted immediately so a subsequent mode exit has nothing to
    /// miss. Calling this while active keeps the existing registration.
    pub fn activate(&mut self, scene: &mut Scene, handlers: &DrawHandlers) {
        if self.draw_handle.is_none() {
            self.draw_handle = Some(handlers.add(Box::new(draw_overlay)));
            log::debug!("overlay draw handler registered");
        }
        if self.watcher.is_none() {
            self.watcher = Some(ModeWatcher::new());
        }
        if let Some(object) = scene.active_object_mut() {
            if object.is_mesh() && object.mode() == ObjectMode::Edit {
                sync_selection(object);
            }
        }
    }

    /// Remove the draw callback and stop watching. Idempotent.
    pub fn deactivate(&mut self, handlers: &DrawHandlers) {
        if let Some(handle) = self.draw_handle.take() {
            handlers.remove(handle);
            log::debug!("overlay draw handler unregistered");
        }
        self.watcher = None;
    }

    /// Forward one scene-graph update notification to the watcher.
    pub fn on_scene_update(&mut self, scene: &mut Scene) {
        if let Some(watcher) = &mut self.watcher {
            watcher.observe(scene);
        }
    }
}

impl Default for OverlaySession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Color, Rect};
    use meshmark_core::math::{Vec2, Vec3};

    struct NullPainter;

    impl LabelPainter for NullPainter {
        fn fill_rect(&mut self, _rect: Rect, _color: Color) {}
        fn text(&mut self, _pos: Vec2, _font_size: u32, _color: Color, _text: &str) {}
    }

    struct NullProjector;

    impl ScreenProjector for NullProjector {
        fn project(&self, _world: Vec3) -> Option<Vec2> {
            None
        }
    }

    #[test]
    fn activation_registers_exactly_one_handler() {
        let handlers = DrawHandlers::new();
        let mut session = OverlaySession::new();
        let mut scene = Scene::new();

        session.activate(&mut scene, &handlers);
        assert!(session.is_active());
        assert_eq!(handlers.len(), 1);

        // Re-activation keeps the existing registration.
        session.activate(&mut scene, &handlers);
        assert_eq!(handlers.len(), 1);
    }

    #[test]
    fn deactivation_is_idempotent_and_safe_when_never_activated() {
        let handlers = DrawHandlers::new();
        let mut session = OverlaySession::new();
        session.deactivate(&handlers);
        assert!(!session.is_active());

        let mut scene = Scene::new();
        session.activate(&mut scene, &handlers);
        session.deactivate(&handlers);
        session.deactivate(&handlers);
        assert!(handlers.is_empty());
        assert!(!session.is_active());
    }

    #[test]
    fn removing_a_stale_handle_is_a_no_op() {
        let handlers = DrawHandlers::new();
        let handle = handlers.add(Box::new(|_, _, _, _| 0));
        assert!(handlers.remove(handle));
        assert!(!handlers.remove(handle));
    }

    #[test]
    fn dispatch_runs_registered_callbacks() {
        let handlers = DrawHandlers::new();
        handlers.add(Box::new(|_, _, _, _| 2));
        handlers.add(Box::new(|_, _, _, _| 3));

        let mut scene = Scene::new();
        let settings = OverlaySettings::default();
        let drawn = handlers.dispatch(&mut scene, &settings, &NullProjector, &mut NullPainter);
        assert_eq!(drawn, 5);
    }

    #[test]
    fn default_binding_is_ctrl_shift_i() {
        let session = OverlaySession::new();
        assert_eq!(
            session.key_binding(),
            KeyChord::new(KeyCode::I).with_ctrl().with_shift()
        );
    }

    #[test]
    fn scene_updates_are_ignored_while_inactive() {
        let mut session = OverlaySession::new();
        let mut scene = Scene::new();
        // Must not panic or track anything.
        session.on_scene_update(&mut scene);
        assert!(!session.is_active());
    }
}
