//! Attribute layer names and the unassigned sentinel.

use meshmark_core::mesh::ElementKind;

/// Persistent ID layer names, one per element kind.
pub const PERSISTENT_VERT_ID_LAYER: &str = "persistent_vert_id";
pub const PERSISTENT_EDGE_ID_LAYER: &str = "persistent_edge_id";
pub const PERSISTENT_FACE_ID_LAYER: &str = "persistent_face_id";

/// Selection snapshot layer names, one per element kind.
pub const SNAPSHOT_VERT_LAYER: &str = "snapshot_vert_selected";
pub const SNAPSHOT_EDGE_LAYER: &str = "snapshot_edge_selected";
pub const SNAPSHOT_FACE_LAYER: &str = "snapshot_face_selected";

/// Sentinel meaning "no ID assigned". Valid IDs are strictly positive.
pub const NO_ID: i32 = -1;

/// Persistent ID layer name for one element kind.
pub fn id_layer_name(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Vertex => PERSISTENT_VERT_ID_LAYER,
        ElementKind::Edge => PERSISTENT_EDGE_ID_LAYER,
        ElementKind::Face => PERSISTENT_FACE_ID_LAYER,
    }
}

/// Selection snapshot layer name for one element kind.
pub fn snapshot_layer_name(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Vertex => SNAPSHOT_VERT_LAYER,
        ElementKind::Edge => SNAPSHOT_EDGE_LAYER,
        ElementKind::Face => SNAPSHOT_FACE_LAYER,
    }
}
