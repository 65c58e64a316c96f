//! Selection snapshot capture.
//!
//! Live per-element selection is only exposed in edit mode; the snapshot
//! layers make the last edit-mode selection readable afterwards, which is
//! what the overlay renders from in object mode.

use meshmark_core::mesh::{EditMesh, ElementKind};
use meshmark_core::scene::{ObjectMode, SceneObject};

use crate::layers::snapshot_layer_name;

/// Copy the object's live element selection into the snapshot layers.
///
/// Returns false (mutating nothing) when the object is not a mesh.
/// Snapshot layers are created on first use; no special initialization is
/// needed since every value is overwritten. When the object is not in edit
/// mode the flags are captured through an object-local mode flip, restored
/// before returning. Element selection cannot change outside edit mode, so
/// the captured flags match the last edit session.
pub fn sync_selection(object: &mut SceneObject) -> bool {
    if !object.is_mesh() {
        return false;
    }

    let prev_mode = object.mode();
    let name = object.name().to_string();
    object.set_mode(ObjectMode::Edit);
    let synced = match object.edit_mesh() {
        Ok(mut mesh) => {
            write_snapshot(&mut mesh);
            true
        }
        Err(err) => {
            log::warn!("selection sync skipped for '{}': {err}", name);
            false
        }
    };
    object.set_mode(prev_mode);
    synced
}

fn write_snapshot(mesh: &mut EditMesh<'_>) {
    for kind in ElementKind::ALL {
        let name = snapshot_layer_name(kind);
        mesh.ensure_int_layer(kind, name, 0);

        let count = mesh.element_count(kind);
        let selected: Vec<bool> = (0..count).map(|i| mesh.is_selected(kind, i)).collect();
        if let Some(layer) = mesh.int_layer_mut(kind, name) {
            for (index, &sel) in selected.iter().enumerate() {
                if let Err(err) = layer.set_value(index, i32::from(sel)) {
                    log::warn!("snapshot write failed for {} {index}: {err}", kind.singular());
                }
            }
        }
    }
    mesh.mark_dirty();
}
