//! Error types for overlay operations.

use meshmark_core::mesh::ElementKind;
use meshmark_core::scene::EditAccessError;

/// Whole-operation precondition failures.
///
/// Per-element attribute failures are not represented here: bulk scans log
/// and skip those (see [`LayerAccessError`](meshmark_core::mesh::LayerAccessError)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayError {
    /// The scene has no active object.
    NoActiveObject,
    /// The active object is not a mesh.
    NotAMesh,
    /// The active object is not in edit mode.
    NotInEditMode,
    /// A clear operation found no persistent ID layer for the kind.
    LayerMissing(ElementKind),
}

impl std::fmt::Display for OverlayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveObject => write!(f, "no active object"),
            Self::NotAMesh => write!(f, "active object is not a mesh"),
            Self::NotInEditMode => write!(f, "active object is not in edit mode"),
            Self::LayerMissing(kind) => {
                write!(f, "no persistent ID layer for {}", kind.plural())
            }
        }
    }
}

impl std::error::Error for OverlayError {}

impl From<EditAccessError> for OverlayError {
    fn from(err: EditAccessError) -> Self {
        match err {
            EditAccessError::NotAMesh => Self::NotAMesh,
            EditAccessError::NotInEditMode => Self::NotInEditMode,
        }
    }
}
