//! User-facing operations.
//!
//! Each operation validates its preconditions, mutates at most one mesh,
//! and returns a short report for the host's notification surface.

use meshmark_core::input::KeyChord;
use meshmark_core::mesh::ElementKind;
use meshmark_core::scene::{ObjectMode, Scene};

use crate::assign::{assign_ids, clear_ids};
use crate::error::OverlayError;
use crate::session::{DrawHandlers, OverlaySession};
use crate::settings::OverlaySettings;
use crate::sync::sync_selection;

/// Whether an operation ran or bailed on a precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpStatus {
    Finished,
    Cancelled,
}

/// Operation result: status plus a human-readable summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpReport {
    pub status: OpStatus,
    pub message: String,
}

impl OpReport {
    fn finished(message: impl Into<String>) -> Self {
        Self {
            status: OpStatus::Finished,
            message: message.into(),
        }
    }

    fn cancelled(message: impl Into<String>) -> Self {
        Self {
            status: OpStatus::Cancelled,
            message: message.into(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == OpStatus::Finished
    }
}

/// Assign/clear precondition: an active mesh object in edit mode.
fn poll_edit_mesh(scene: &Scene) -> Result<(), OverlayError> {
    let object = scene.active_object().ok_or(OverlayError::NoActiveObject)?;
    if !object.is_mesh() {
        return Err(OverlayError::NotAMesh);
    }
    if object.mode() != ObjectMode::Edit {
        return Err(OverlayError::NotInEditMode);
    }
    Ok(())
}

/// Assign persistent IDs to the selected elements of one kind.
pub fn assign_ids_op(scene: &mut Scene, kind: ElementKind) -> OpReport {
    if let Err(err) = poll_edit_mesh(scene) {
        return OpReport::cancelled(err.to_string());
    }
    let Some(object) = scene.active_object_mut() else {
        return OpReport::cancelled(OverlayError::NoActiveObject.to_string());
    };
    let outcome = match object.edit_mesh() {
        Ok(mut mesh) => assign_ids(&mut mesh, kind),
        Err(err) => return OpReport::cancelled(err.to_string()),
    };
    sync_selection(object);

    if outcome.assigned > 0 || outcome.created_layer {
        scene.request_redraw();
    }
    OpReport::finished(format!(
        "IDs processed. Assigned: {}. Next: {}",
        outcome.assigned, outcome.next_id
    ))
}

/// Clear persistent IDs on the selected elements of one kind.
pub fn clear_ids_op(scene: &mut Scene, kind: ElementKind) -> OpReport {
    if let Err(err) = poll_edit_mesh(scene) {
        return OpReport::cancelled(err.to_string());
    }
    let Some(object) = scene.active_object_mut() else {
        return OpReport::cancelled(OverlayError::NoActiveObject.to_string());
    };
    let cleared = match object.edit_mesh() {
        Ok(mut mesh) => match clear_ids(&mut mesh, kind) {
            Ok(cleared) => cleared,
            Err(err) => return OpReport::cancelled(err.to_string()),
        },
        Err(err) => return OpReport::cancelled(err.to_string()),
    };
    sync_selection(object);

    if cleared > 0 {
        scene.request_redraw();
    }
    OpReport::finished(format!("Cleared IDs on {cleared} {}", kind.plural()))
}

/// Toggle the overlay on or off.
pub fn toggle_overlay_op(
    scene: &mut Scene,
    settings: &mut OverlaySettings,
    session: &mut OverlaySession,
    handlers: &DrawHandlers,
) -> OpReport {
    let report = if settings.running {
        session.deactivate(handlers);
        settings.running = false;
        OpReport::finished("Overlay disabled")
    } else {
        session.activate(scene, handlers);
        settings.running = true;
        OpReport::finished("Overlay enabled")
    };
    scene.request_redraw();
    report
}

/// Run the toggle if `chord` matches the session's binding.
pub fn handle_key(
    chord: KeyChord,
    scene: &mut Scene,
    settings: &mut OverlaySettings,
    session: &mut OverlaySession,
    handlers: &DrawHandlers,
) -> Option<OpReport> {
    if chord == session.key_binding() {
        Some(toggle_overlay_op(scene, settings, session, handlers))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{NO_ID, id_layer_name};
    use meshmark_core::input::KeyCode;
    use meshmark_core::math::Vec3;
    use meshmark_core::mesh::MeshData;
    use meshmark_core::scene::{ObjectId, SceneObject};

    fn editing_scene() -> (Scene, ObjectId) {
        let mut mesh = MeshData::new();
        for i in 0..3 {
            mesh.add_vertex(Vec3::new(i as f32, 0.0, 0.0));
        }
        let mut scene = Scene::new();
        let id = scene.add_object(SceneObject::mesh_object("strip", mesh));
        scene.set_active(Some(id));
        scene.object_mut(id).unwrap().set_mode(ObjectMode::Edit);
        (scene, id)
    }

    #[test]
    fn assign_reports_counts_and_next_id() {
        let (mut scene, id) = editing_scene();
        scene
            .object_mut(id)
            .unwrap()
            .edit_mesh()
            .unwrap()
            .set_selected(ElementKind::Vertex, 0, true);

        let report = assign_ids_op(&mut scene, ElementKind::Vertex);
        assert!(report.is_finished());
        assert_eq!(report.message, "IDs processed. Assigned: 1. Next: 2");
        assert!(scene.take_redraw_request());
    }

    #[test]
    fn assign_requires_edit_mode() {
        let (mut scene, id) = editing_scene();
        scene.object_mut(id).unwrap().set_mode(ObjectMode::Object);
        let report = assign_ids_op(&mut scene, ElementKind::Vertex);
        assert_eq!(report.status, OpStatus::Cancelled);
        assert_eq!(report.message, "active object is not in edit mode");
        assert!(!scene.take_redraw_request());
    }

    #[test]
    fn assign_requires_an_active_mesh() {
        let mut scene = Scene::new();
        let report = assign_ids_op(&mut scene, ElementKind::Face);
        assert_eq!(report.status, OpStatus::Cancelled);
        assert_eq!(report.message, "no active object");

        let lamp = scene.add_object(SceneObject::empty("lamp"));
        scene.set_active(Some(lamp));
        let report = assign_ids_op(&mut scene, ElementKind::Face);
        assert_eq!(report.message, "active object is not a mesh");
    }

    #[test]
    fn clear_without_layer_is_cancelled() {
        let (mut scene, _) = editing_scene();
        let report = clear_ids_op(&mut scene, ElementKind::Edge);
        assert_eq!(report.status, OpStatus::Cancelled);
        assert_eq!(report.message, "no persistent ID layer for edges");
    }

    #[test]
    fn clear_reports_the_cleared_count() {
        let (mut scene, id) = editing_scene();
        {
            let mut mesh = scene.object_mut(id).unwrap().edit_mesh().unwrap();
            mesh.set_selected(ElementKind::Vertex, 0, true);
            mesh.set_selected(ElementKind::Vertex, 1, true);
            assign_ids(&mut mesh, ElementKind::Vertex);
        }
        let report = clear_ids_op(&mut scene, ElementKind::Vertex);
        assert!(report.is_finished());
        assert_eq!(report.message, "Cleared IDs on 2 verts");

        // Both IDs are back to the sentinel.
        let mesh = scene.object_mut(id).unwrap().edit_mesh().unwrap();
        let layer = mesh
            .int_layer(ElementKind::Vertex, id_layer_name(ElementKind::Vertex))
            .unwrap();
        assert_eq!(layer.values(), &[NO_ID, NO_ID, NO_ID]);
    }

    #[test]
    fn toggle_flips_running_and_session_state() {
        let (mut scene, _) = editing_scene();
        let handlers = DrawHandlers::new();
        let mut session = OverlaySession::new();
        let mut settings = OverlaySettings::default();

        let report = toggle_overlay_op(&mut scene, &mut settings, &mut session, &handlers);
        assert_eq!(report.message, "Overlay enabled");
        assert!(settings.running);
        assert!(session.is_active());
        assert_eq!(handlers.len(), 1);

        let report = toggle_overlay_op(&mut scene, &mut settings, &mut session, &handlers);
        assert_eq!(report.message, "Overlay disabled");
        assert!(!settings.running);
        assert!(!session.is_active());
        assert!(handlers.is_empty());
    }

    #[test]
    fn handle_key_matches_only_the_binding() {
        let (mut scene, _) = editing_scene();
        let handlers = DrawHandlers::new();
        let mut session = OverlaySession::new();
        let mut settings = OverlaySettings::default();

        let miss = handle_key(
            KeyChord::new(KeyCode::I),
            &mut scene,
            &mut settings,
            &mut session,
            &handlers,
        );
        assert!(miss.is_none());

        let hit = handle_key(
            KeyChord::new(KeyCode::I).with_ctrl().with_shift(),
            &mut scene,
            &mut settings,
            &mut session,
            &handlers,
        );
        assert!(hit.unwrap().is_finished());
        assert!(settings.running);
    }
}
