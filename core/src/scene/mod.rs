//! Minimal scene model.
//!
//! A [`Scene`] owns [`SceneObject`]s, tracks the active object, object-level
//! selection, and a pending-redraw flag. Objects carry a modal state
//! ([`ObjectMode`]); per-element mesh data is only reachable through
//! [`SceneObject::edit_mesh`], which requires edit mode — mirroring hosts
//! where live element selection is not exposed outside of it.

use crate::math::Mat4;
use crate::mesh::{EditMesh, MeshData};

/// Handle to an object in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(u32);

/// Modal state of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectMode {
    /// Whole-object mode; per-element selection is not exposed.
    #[default]
    Object,
    /// Element editing mode.
    Edit,
}

/// Why editable mesh access was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAccessError {
    /// The object carries no mesh data.
    NotAMesh,
    /// The object is not in edit mode.
    NotInEditMode,
}

impl std::fmt::Display for EditAccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAMesh => write!(f, "object is not a mesh"),
            Self::NotInEditMode => write!(f, "object is not in edit mode"),
        }
    }
}

impl std::error::Error for EditAccessError {}

#[derive(Debug, Clone)]
enum ObjectData {
    Mesh(MeshData),
    Empty,
}

/// An object in the scene: name, mode, world matrix, and optional mesh data.
#[derive(Debug, Clone)]
pub struct SceneObject {
    name: String,
    mode: ObjectMode,
    world: Mat4,
    data: ObjectData,
}

impl SceneObject {
    /// Create a mesh object in object mode with an identity world matrix.
    pub fn mesh_object(name: impl Into<String>, mesh: MeshData) -> Self {
        Self {
            name: name.into(),
            mode: ObjectMode::Object,
            world: Mat4::identity(),
            data: ObjectData::Mesh(mesh),
        }
    }

    /// Create a non-mesh object (camera, light, empty).
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: ObjectMode::Object,
            world: Mat4::identity(),
            data: ObjectData::Empty,
        }
    }

    /// Set the world matrix.
    pub fn with_world(mut self, world: Mat4) -> Self {
        self.world = world;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> ObjectMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ObjectMode) {
        self.mode = mode;
    }

    pub fn world(&self) -> &Mat4 {
        &self.world
    }

    pub fn set_world(&mut self, world: Mat4) {
        self.world = world;
    }

    pub fn is_mesh(&self) -> bool {
        matches!(self.data, ObjectData::Mesh(_))
    }

    /// Editable view of the object's mesh data.
    ///
    /// Fails unless the object is a mesh currently in edit mode.
    pub fn edit_mesh(&mut self) -> Result<EditMesh<'_>, EditAccessError> {
        match &mut self.data {
            ObjectData::Mesh(mesh) => {
                if self.mode == ObjectMode::Edit {
                    Ok(EditMesh::new(mesh))
                } else {
                    Err(EditAccessError::NotInEditMode)
                }
            }
            ObjectData::Empty => Err(EditAccessError::NotAMesh),
        }
    }
}

/// Scene: object collection, active object, object-level selection.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    active: Option<ObjectId>,
    selected: Vec<ObjectId>,
    redraw_requested: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object, returning its handle.
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        self.objects.push(object);
        ObjectId((self.objects.len() - 1) as u32)
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0 as usize)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0 as usize)
    }

    /// The active object's handle, if any.
    pub fn active(&self) -> Option<ObjectId> {
        self.active
    }

    pub fn set_active(&mut self, id: Option<ObjectId>) {
        self.active = id;
    }

    pub fn active_object(&self) -> Option<&SceneObject> {
        self.active.and_then(|id| self.object(id))
    }

    pub fn active_object_mut(&mut self) -> Option<&mut SceneObject> {
        let id = self.active?;
        self.object_mut(id)
    }

    // ----- object-level selection -----

    /// Add an object to the selection set. Unknown handles are ignored.
    pub fn select_object(&mut self, id: ObjectId) {
        if (id.0 as usize) < self.objects.len() && !self.selected.contains(&id) {
            self.selected.push(id);
        }
    }

    pub fn deselect_object(&mut self, id: ObjectId) {
        self.selected.retain(|&s| s != id);
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Currently selected objects, in selection order.
    pub fn selected_objects(&self) -> &[ObjectId] {
        &self.selected
    }

    pub fn is_object_selected(&self, id: ObjectId) -> bool {
        self.selected.contains(&id)
    }

    // ----- redraw -----

    /// Flag that the viewport should redraw.
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Consume the pending-redraw flag.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}
