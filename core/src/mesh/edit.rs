//! Scoped editable mesh view.

use std::ops::{Deref, DerefMut};

use super::MeshData;

/// Editable view of a mesh, handed out only while its object is in edit
/// mode (see [`SceneObject::edit_mesh`](crate::scene::SceneObject::edit_mesh)).
///
/// Mutations that should persist must be recorded via
/// [`mark_dirty`](Self::mark_dirty); on drop, a dirty view synchronizes back
/// to the mesh by bumping its revision. Dropping a clean view leaves the
/// revision untouched, so read-only passes are free.
pub struct EditMesh<'a> {
    mesh: &'a mut MeshData,
    dirty: bool,
}

impl<'a> EditMesh<'a> {
    pub(crate) fn new(mesh: &'a mut MeshData) -> Self {
        Self { mesh, dirty: false }
    }

    /// Record that this view made changes worth committing.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether changes are pending commit.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl Deref for EditMesh<'_> {
    type Target = MeshData;

    fn deref(&self) -> &MeshData {
        self.mesh
    }
}

impl DerefMut for EditMesh<'_> {
    fn deref_mut(&mut self) -> &mut MeshData {
        self.mesh
    }
}

impl Drop for EditMesh<'_> {
    fn drop(&mut self) {
        if self.dirty {
            self.mesh.bump_revision();
            log::trace!("edit mesh committed, revision now {}", self.mesh.revision());
        }
    }
}
