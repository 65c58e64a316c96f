//! Persistent element ID overlay.
//!
//! Tags selected mesh elements with persistent numeric IDs stored in
//! integer attribute layers, and draws those IDs as screen-space labels.
//! A selection snapshot captured on every edit-mode exit lets the overlay
//! keep rendering while live element selection is unavailable.
//!
//! # Architecture
//!
//! - [`assign`] — ID assignment and clearing over attribute layers
//! - [`sync`] — selection snapshot capture
//! - [`watcher`] — edge-triggered mode-change tracking
//! - [`edit_scope`] — temporary edit-mode scope with guaranteed restore
//! - [`render`] — anchor resolution, projection, and label drawing
//! - [`session`] — activation lifecycle, draw-handler registry, keymap
//! - [`ops`] — user-facing operations with report messages
//! - [`settings`] — per-scene configuration
//!
//! # Usage
//!
//! ```ignore
//! let handlers = DrawHandlers::new();
//! let mut session = OverlaySession::new();
//! let mut settings = OverlaySettings::default();
//!
//! // User action: toggle the overlay on.
//! ops::toggle_overlay_op(&mut scene, &mut settings, &mut session, &handlers);
//!
//! // On every scene-graph update notification:
//! session.on_scene_update(&mut scene);
//!
//! // On every redraw:
//! handlers.dispatch(&mut scene, &settings, &projector, &mut painter);
//! ```

pub mod assign;
pub mod edit_scope;
pub mod error;
pub mod layers;
pub mod ops;
pub mod render;
pub mod session;
pub mod settings;
pub mod sync;
pub mod watcher;

pub use assign::{AssignOutcome, assign_ids, clear_ids};
pub use edit_scope::EditScope;
pub use error::OverlayError;
pub use ops::{OpReport, OpStatus};
pub use render::{CameraProjector, Color, LabelPainter, Rect, ScreenProjector, draw_overlay};
pub use session::{DrawHandle, DrawHandlers, OverlaySession};
pub use settings::OverlaySettings;
pub use sync::sync_selection;
pub use watcher::ModeWatcher;
