//! ID assignment and clearing engines.
//!
//! Both engines scan one element kind of an editable mesh. Per-element
//! attribute failures are logged and skipped; only whole-operation
//! preconditions (a missing layer on clear) abort.

use meshmark_core::mesh::{EditMesh, ElementKind};

use crate::error::OverlayError;
use crate::layers::{NO_ID, id_layer_name};

/// Summary of one assignment pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignOutcome {
    /// Number of IDs assigned by this pass.
    pub assigned: usize,
    /// The next ID that a future pass would assign.
    pub next_id: i32,
    /// Whether the ID layer was created (and sentinel-stamped) by this pass.
    pub created_layer: bool,
}

/// Assign fresh IDs to selected elements that have none.
///
/// Creates the persistent ID layer if absent, stamping every existing
/// element with [`NO_ID`]. IDs continue above the current maximum positive
/// value, in ascending element-index order; previously assigned IDs are
/// never reordered. Marks the view dirty only when something changed.
pub fn assign_ids(mesh: &mut EditMesh<'_>, kind: ElementKind) -> AssignOutcome {
    let layer_name = id_layer_name(kind);
    let created_layer = mesh.ensure_int_layer(kind, layer_name, NO_ID);
    if created_layer {
        log::debug!("created layer '{layer_name}'");
    }

    let count = mesh.element_count(kind);
    let selected: Vec<bool> = (0..count).map(|i| mesh.is_selected(kind, i)).collect();

    // Max over all positive IDs. A corrupted duplicate is not repaired;
    // the scan just keeps assigning above the maximum (first-scanned wins).
    let mut current_max = 0i32;
    if let Some(layer) = mesh.int_layer(kind, layer_name) {
        for index in 0..count {
            match layer.value(index) {
                Ok(id) if id > 0 => current_max = current_max.max(id),
                Ok(_) => {}
                Err(err) => {
                    log::warn!("skipping {} {index}: {err}", kind.singular());
                }
            }
        }
    }

    let mut next_id = if current_max > 0 { current_max + 1 } else { 1 };
    let mut assigned = 0usize;

    if let Some(layer) = mesh.int_layer_mut(kind, layer_name) {
        for index in (0..count).filter(|&i| selected[i]) {
            match layer.value(index) {
                Ok(id) if id <= 0 => match layer.set_value(index, next_id) {
                    Ok(()) => {
                        log::debug!("assigned ID {next_id} to {} {index}", kind.singular());
                        next_id += 1;
                        assigned += 1;
                    }
                    Err(err) => {
                        log::warn!("skipping {} {index}: {err}", kind.singular());
                    }
                },
                Ok(_) => {} // already tagged
                Err(err) => {
                    log::warn!("skipping {} {index}: {err}", kind.singular());
                }
            }
        }
    }

    if assigned > 0 || created_layer {
        mesh.mark_dirty();
    }
    AssignOutcome {
        assigned,
        next_id,
        created_layer,
    }
}

/// Reset the IDs of selected, tagged elements back to the sentinel.
///
/// Fails with [`OverlayError::LayerMissing`] when the kind has no
/// persistent ID layer. Remaining IDs are never renumbered or compacted.
pub fn clear_ids(mesh: &mut EditMesh<'_>, kind: ElementKind) -> Result<usize, OverlayError> {
    let layer_name = id_layer_name(kind);
    if mesh.int_layer(kind, layer_name).is_none() {
        return Err(OverlayError::LayerMissing(kind));
    }

    let count = mesh.element_count(kind);
    let selected: Vec<bool> = (0..count).map(|i| mesh.is_selected(kind, i)).collect();

    let mut cleared = 0usize;
    if let Some(layer) = mesh.int_layer_mut(kind, layer_name) {
        for index in (0..count).filter(|&i| selected[i]) {
            match layer.value(index) {
                Ok(id) if id > 0 => match layer.set_value(index, NO_ID) {
                    Ok(()) => cleared += 1,
                    Err(err) => {
                        log::warn!("skipping {} {index}: {err}", kind.singular());
                    }
                },
                Ok(_) => {}
                Err(err) => {
                    log::warn!("skipping {} {index}: {err}", kind.singular());
                }
            }
        }
    }

    if cleared > 0 {
        mesh.mark_dirty();
    }
    Ok(cleared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshmark_core::math::Vec3;
    use meshmark_core::mesh::MeshData;
    use meshmark_core::scene::{ObjectMode, SceneObject};
    use rstest::rstest;

    /// Fan mesh with 5 verts, 4 edges, and 3 faces.
    fn fan_mesh() -> MeshData {
        let mut mesh = MeshData::new();
        let verts: Vec<u32> = (0..5)
            .map(|i| mesh.add_vertex(Vec3::new(i as f32, 0.0, 0.0)))
            .collect();
        for pair in verts.windows(2) {
            mesh.add_edge(pair[0], pair[1]);
        }
        for i in 1..4 {
            mesh.add_face(&[verts[0], verts[i], verts[i + 1]]);
        }
        mesh
    }

    fn editing_object(mesh: MeshData) -> SceneObject {
        let mut object = SceneObject::mesh_object("fan", mesh);
        object.set_mode(ObjectMode::Edit);
        object
    }

    fn ids(mesh: &MeshData, kind: ElementKind) -> Vec<i32> {
        mesh.int_layer(kind, id_layer_name(kind))
            .map(|layer| layer.values().to_vec())
            .unwrap_or_default()
    }

    #[rstest]
    #[case(ElementKind::Vertex)]
    #[case(ElementKind::Edge)]
    #[case(ElementKind::Face)]
    fn first_assignment_starts_at_one(#[case] kind: ElementKind) {
        let mut object = editing_object(fan_mesh());
        let mut mesh = object.edit_mesh().unwrap();
        mesh.set_selected(kind, 0, true);
        mesh.set_selected(kind, 1, true);

        let outcome = assign_ids(&mut mesh, kind);
        assert_eq!(outcome.assigned, 2);
        assert_eq!(outcome.next_id, 3);
        assert!(outcome.created_layer);
        assert!(mesh.is_dirty());

        let values = ids(&mesh, kind);
        assert_eq!(values[0], 1);
        assert_eq!(values[1], 2);
        // Unselected elements keep the sentinel stamp.
        assert!(values[2..].iter().all(|&v| v == NO_ID));
    }

    #[rstest]
    #[case(ElementKind::Vertex)]
    #[case(ElementKind::Edge)]
    #[case(ElementKind::Face)]
    fn repeated_assignment_is_idempotent(#[case] kind: ElementKind) {
        let mut object = editing_object(fan_mesh());
        let mut mesh = object.edit_mesh().unwrap();
        mesh.set_selected(kind, 0, true);
        mesh.set_selected(kind, 2, true);

        let first = assign_ids(&mut mesh, kind);
        assert_eq!(first.assigned, 2);

        let second = assign_ids(&mut mesh, kind);
        assert_eq!(second.assigned, 0);
        assert_eq!(second.next_id, first.next_id);
        assert!(!second.created_layer);
    }

    #[test]
    fn assignment_continues_above_existing_max() {
        let mut object = editing_object(fan_mesh());
        let mut mesh = object.edit_mesh().unwrap();
        let kind = ElementKind::Vertex;
        for i in 0..3 {
            mesh.set_selected(kind, i, true);
        }
        // Element 2 already carries ID 5.
        mesh.ensure_int_layer(kind, id_layer_name(kind), NO_ID);
        mesh.int_layer_mut(kind, id_layer_name(kind))
            .unwrap()
            .set_value(2, 5)
            .unwrap();

        let outcome = assign_ids(&mut mesh, kind);
        assert_eq!(outcome.assigned, 2);
        assert_eq!(outcome.next_id, 8);
        let values = ids(&mesh, kind);
        assert_eq!(&values[..3], &[6, 7, 5]);
    }

    #[test]
    fn ids_stay_pairwise_distinct_across_passes() {
        let mut object = editing_object(fan_mesh());
        let mut mesh = object.edit_mesh().unwrap();
        let kind = ElementKind::Vertex;

        mesh.set_selected(kind, 0, true);
        assign_ids(&mut mesh, kind);

        mesh.set_selected(kind, 0, false);
        mesh.set_selected(kind, 3, true);
        mesh.set_selected(kind, 4, true);
        assign_ids(&mut mesh, kind);

        mesh.set_selected(kind, 1, true);
        assign_ids(&mut mesh, kind);

        let mut positive: Vec<i32> = ids(&mesh, kind).into_iter().filter(|&v| v > 0).collect();
        let total = positive.len();
        positive.sort_unstable();
        positive.dedup();
        assert_eq!(positive.len(), total);
    }

    #[test]
    fn unselected_elements_are_never_tagged() {
        let mut object = editing_object(fan_mesh());
        let mut mesh = object.edit_mesh().unwrap();
        let outcome = assign_ids(&mut mesh, ElementKind::Edge);
        assert_eq!(outcome.assigned, 0);
        assert_eq!(outcome.next_id, 1);
        // Layer creation alone still counts as a change.
        assert!(outcome.created_layer);
        assert!(mesh.is_dirty());
        assert!(ids(&mesh, ElementKind::Edge).iter().all(|&v| v == NO_ID));
    }

    #[test]
    fn second_empty_pass_is_clean() {
        let mut object = editing_object(fan_mesh());
        {
            let mut mesh = object.edit_mesh().unwrap();
            assign_ids(&mut mesh, ElementKind::Edge);
        }
        let mut mesh = object.edit_mesh().unwrap();
        let outcome = assign_ids(&mut mesh, ElementKind::Edge);
        assert_eq!(outcome.assigned, 0);
        assert!(!outcome.created_layer);
        assert!(!mesh.is_dirty());
    }

    #[test]
    fn clear_resets_only_positive_ids() {
        let mut object = editing_object(fan_mesh());
        let mut mesh = object.edit_mesh().unwrap();
        let kind = ElementKind::Vertex;
        mesh.ensure_int_layer(kind, id_layer_name(kind), NO_ID);
        let layer = mesh.int_layer_mut(kind, id_layer_name(kind)).unwrap();
        layer.set_value(0, 3).unwrap();
        layer.set_value(2, 7).unwrap();
        for i in 0..3 {
            mesh.set_selected(kind, i, true);
        }

        let cleared = clear_ids(&mut mesh, kind).unwrap();
        assert_eq!(cleared, 2);
        let values = ids(&mesh, kind);
        assert_eq!(&values[..3], &[NO_ID, NO_ID, NO_ID]);
        assert!(mesh.is_dirty());
    }

    #[test]
    fn clear_ignores_unselected_and_does_not_renumber() {
        let mut object = editing_object(fan_mesh());
        let mut mesh = object.edit_mesh().unwrap();
        let kind = ElementKind::Face;
        for i in 0..3 {
            mesh.set_selected(kind, i, true);
        }
        assign_ids(&mut mesh, kind);

        // Clear only face 1.
        mesh.set_selected(kind, 0, false);
        mesh.set_selected(kind, 2, false);
        let cleared = clear_ids(&mut mesh, kind).unwrap();
        assert_eq!(cleared, 1);
        let values = ids(&mesh, kind);
        assert_eq!(values, vec![1, NO_ID, 3]);
    }

    #[rstest]
    #[case(ElementKind::Vertex)]
    #[case(ElementKind::Edge)]
    #[case(ElementKind::Face)]
    fn clear_without_layer_reports_missing(#[case] kind: ElementKind) {
        let mut object = editing_object(fan_mesh());
        let mut mesh = object.edit_mesh().unwrap();
        mesh.set_selected(kind, 0, true);
        assert_eq!(
            clear_ids(&mut mesh, kind),
            Err(OverlayError::LayerMissing(kind))
        );
        assert!(!mesh.is_dirty());
    }
}
