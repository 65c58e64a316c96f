//! Temporary edit-mode scope with guaranteed restore.

use meshmark_core::mesh::EditMesh;
use meshmark_core::scene::{ObjectId, ObjectMode, Scene, SceneObject};

use crate::error::OverlayError;

/// Puts one mesh object into edit mode for the lifetime of the scope.
///
/// On entry the prior active object, prior object-level selection set, and
/// the target's prior mode are recorded; dropping the scope restores all
/// three. Restoration lives in `Drop`, so it also runs on early error
/// returns out of the scope.
pub struct EditScope<'a> {
    scene: &'a mut Scene,
    target: ObjectId,
    prev_active: Option<ObjectId>,
    prev_selected: Vec<ObjectId>,
    prev_mode: ObjectMode,
}

impl<'a> EditScope<'a> {
    /// Make `target` the active object and switch it into edit mode.
    ///
    /// Fails when the target is missing or not a mesh, leaving the scene
    /// untouched.
    pub fn enter(scene: &'a mut Scene, target: ObjectId) -> Result<Self, OverlayError> {
        let object = scene.object(target).ok_or(OverlayError::NoActiveObject)?;
        if !object.is_mesh() {
            return Err(OverlayError::NotAMesh);
        }
        let prev_mode = object.mode();
        let prev_active = scene.active();
        let prev_selected = scene.selected_objects().to_vec();

        scene.set_active(Some(target));
        if let Some(object) = scene.object_mut(target) {
            object.set_mode(ObjectMode::Edit);
        }
        Ok(Self {
            scene,
            target,
            prev_active,
            prev_selected,
            prev_mode,
        })
    }

    /// The object held in edit mode by this scope.
    pub fn object_mut(&mut self) -> Option<&mut SceneObject> {
        self.scene.object_mut(self.target)
    }

    /// Editable view of the scoped object's mesh.
    pub fn edit_mesh(&mut self) -> Result<EditMesh<'_>, OverlayError> {
        let object = self
            .scene
            .object_mut(self.target)
            .ok_or(OverlayError::NoActiveObject)?;
        Ok(object.edit_mesh()?)
    }
}

impl Drop for EditScope<'_> {
    fn drop(&mut self) {
        if let Some(object) = self.scene.object_mut(self.target) {
            object.set_mode(self.prev_mode);
        }
        self.scene.set_active(self.prev_active);
        self.scene.deselect_all();
        for &id in &self.prev_selected {
            self.scene.select_object(id);
        }
    }
}
