//! CPU-side editable mesh data.
//!
//! This module provides:
//! - [`ElementKind`] - Vertex, edge, or face
//! - [`MeshData`] - Element collections with named integer attribute layers
//! - [`EditMesh`] - Scoped editable view that commits changes on drop
//!
//! Element indices are transient: removal re-indexes by swap-removal, the
//! way hosts invalidate indices across topology edits. Anything that must
//! survive an edit belongs in an attribute layer, not in an index.

mod edit;
mod layers;

pub use edit::EditMesh;
pub use layers::{IntLayer, LayerAccessError};

use layers::LayerSet;

use crate::math::Vec3;

/// One of the three mesh element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Vertex,
    Edge,
    Face,
}

impl ElementKind {
    /// All kinds, in vertex/edge/face order.
    pub const ALL: [ElementKind; 3] = [ElementKind::Vertex, ElementKind::Edge, ElementKind::Face];

    /// Short plural noun for user-facing messages.
    pub fn plural(self) -> &'static str {
        match self {
            ElementKind::Vertex => "verts",
            ElementKind::Edge => "edges",
            ElementKind::Face => "faces",
        }
    }

    /// Singular noun for log messages.
    pub fn singular(self) -> &'static str {
        match self {
            ElementKind::Vertex => "vertex",
            ElementKind::Edge => "edge",
            ElementKind::Face => "face",
        }
    }
}

/// A mesh vertex: position plus live selection flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub select: bool,
}

impl Vertex {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            select: false,
        }
    }
}

/// A mesh edge referencing two vertices by index.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub verts: [u32; 2],
    pub select: bool,
}

/// A mesh face referencing its vertices by index.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub verts: Vec<u32>,
    pub select: bool,
}

/// Editable mesh: ordered element collections plus named `i32` attribute
/// layers per element kind.
///
/// Layers are created lazily ([`ensure_int_layer`](Self::ensure_int_layer))
/// and kept length-synchronized with their element collection by every
/// mutating operation. Elements added after a layer exists read as `0` in it.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    verts: Vec<Vertex>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
    vert_layers: LayerSet,
    edge_layers: LayerSet,
    face_layers: LayerSet,
    revision: u64,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    // ----- elements -----

    /// Append a vertex, returning its (transient) index.
    pub fn add_vertex(&mut self, position: Vec3) -> u32 {
        self.verts.push(Vertex::new(position));
        self.vert_layers.push_element();
        (self.verts.len() - 1) as u32
    }

    /// Append an edge between two vertex indices.
    pub fn add_edge(&mut self, a: u32, b: u32) -> u32 {
        self.edges.push(Edge {
            verts: [a, b],
            select: false,
        });
        self.edge_layers.push_element();
        (self.edges.len() - 1) as u32
    }

    /// Append a face over the given vertex indices.
    pub fn add_face(&mut self, verts: &[u32]) -> u32 {
        self.faces.push(Face {
            verts: verts.to_vec(),
            select: false,
        });
        self.face_layers.push_element();
        (self.faces.len() - 1) as u32
    }

    /// Remove a vertex and every edge and face using it.
    ///
    /// Removal is by swap-removal: the last element of each collection moves
    /// into the freed slot and references to it are re-pointed. Attribute
    /// layers follow the same re-indexing, so per-element values stay with
    /// their element.
    pub fn remove_vertex(&mut self, index: u32) {
        if index as usize >= self.verts.len() {
            return;
        }

        // Incident edges and faces go first, highest index first so earlier
        // removals don't shift later ones.
        let incident_edges: Vec<u32> = (0..self.edges.len() as u32)
            .rev()
            .filter(|&e| self.edges[e as usize].verts.contains(&index))
            .collect();
        for e in incident_edges {
            self.remove_edge(e);
        }
        let incident_faces: Vec<u32> = (0..self.faces.len() as u32)
            .rev()
            .filter(|&f| self.faces[f as usize].verts.contains(&index))
            .collect();
        for f in incident_faces {
            self.remove_face(f);
        }

        let last = (self.verts.len() - 1) as u32;
        self.verts.swap_remove(index as usize);
        self.vert_layers.swap_remove_element(index as usize);

        if index != last {
            // The previous last vertex now lives at `index`.
            for edge in &mut self.edges {
                for v in &mut edge.verts {
                    if *v == last {
                        *v = index;
                    }
                }
            }
            for face in &mut self.faces {
                for v in &mut face.verts {
                    if *v == last {
                        *v = index;
                    }
                }
            }
        }
    }

    /// Remove an edge by swap-removal.
    pub fn remove_edge(&mut self, index: u32) {
        if (index as usize) < self.edges.len() {
            self.edges.swap_remove(index as usize);
            self.edge_layers.swap_remove_element(index as usize);
        }
    }

    /// Remove a face by swap-removal.
    pub fn remove_face(&mut self, index: u32) {
        if (index as usize) < self.faces.len() {
            self.faces.swap_remove(index as usize);
            self.face_layers.swap_remove_element(index as usize);
        }
    }

    pub fn verts(&self) -> &[Vertex] {
        &self.verts
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Element count for one kind.
    pub fn element_count(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Vertex => self.verts.len(),
            ElementKind::Edge => self.edges.len(),
            ElementKind::Face => self.faces.len(),
        }
    }

    // ----- selection -----

    /// Live selection flag of one element. Out-of-range reads as unselected.
    pub fn is_selected(&self, kind: ElementKind, index: usize) -> bool {
        match kind {
            ElementKind::Vertex => self.verts.get(index).is_some_and(|v| v.select),
            ElementKind::Edge => self.edges.get(index).is_some_and(|e| e.select),
            ElementKind::Face => self.faces.get(index).is_some_and(|f| f.select),
        }
    }

    /// Set the live selection flag of one element. Out-of-range is ignored.
    pub fn set_selected(&mut self, kind: ElementKind, index: usize, selected: bool) {
        match kind {
            ElementKind::Vertex => {
                if let Some(v) = self.verts.get_mut(index) {
                    v.select = selected;
                }
            }
            ElementKind::Edge => {
                if let Some(e) = self.edges.get_mut(index) {
                    e.select = selected;
                }
            }
            ElementKind::Face => {
                if let Some(f) = self.faces.get_mut(index) {
                    f.select = selected;
                }
            }
        }
    }

    // ----- attribute layers -----

    /// Get a named layer for one kind, or `None`.
    pub fn int_layer(&self, kind: ElementKind, name: &str) -> Option<&IntLayer> {
        self.layer_set(kind).get(name)
    }

    /// Get a named layer mutably, or `None`.
    pub fn int_layer_mut(&mut self, kind: ElementKind, name: &str) -> Option<&mut IntLayer> {
        self.layer_set_mut(kind).get_mut(name)
    }

    /// Create a named layer if absent, stamping every existing element with
    /// `fill`. Returns true if the layer was created by this call.
    pub fn ensure_int_layer(&mut self, kind: ElementKind, name: &str, fill: i32) -> bool {
        self.layer_set_mut(kind).ensure(name, fill)
    }

    // ----- geometry -----

    /// Local-space anchor point of an element: vertex position, edge
    /// midpoint, or face vertex median. `None` for an out-of-range index,
    /// a dangling vertex reference, or an empty face.
    pub fn anchor(&self, kind: ElementKind, index: usize) -> Option<Vec3> {
        match kind {
            ElementKind::Vertex => self.verts.get(index).map(|v| v.position),
            ElementKind::Edge => {
                let edge = self.edges.get(index)?;
                let a = self.verts.get(edge.verts[0] as usize)?;
                let b = self.verts.get(edge.verts[1] as usize)?;
                Some((a.position + b.position) * 0.5)
            }
            ElementKind::Face => {
                let face = self.faces.get(index)?;
                if face.verts.is_empty() {
                    return None;
                }
                let mut sum = Vec3::zeros();
                for &v in &face.verts {
                    sum += self.verts.get(v as usize)?.position;
                }
                Some(sum / face.verts.len() as f32)
            }
        }
    }

    // ----- persistence -----

    /// Revision counter, bumped whenever an [`EditMesh`] commits changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn bump_revision(&mut self) {
        self.revision += 1;
    }

    fn layer_set(&self, kind: ElementKind) -> &LayerSet {
        match kind {
            ElementKind::Vertex => &self.vert_layers,
            ElementKind::Edge => &self.edge_layers,
            ElementKind::Face => &self.face_layers,
        }
    }

    fn layer_set_mut(&mut self, kind: ElementKind) -> &mut LayerSet {
        match kind {
            ElementKind::Vertex => &mut self.vert_layers,
            ElementKind::Edge => &mut self.edge_layers,
            ElementKind::Face => &mut self.face_layers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshData {
        let mut mesh = MeshData::new();
        let a = mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0));
        mesh.add_edge(a, b);
        mesh.add_edge(b, c);
        mesh.add_edge(c, a);
        mesh.add_face(&[a, b, c]);
        mesh
    }

    #[test]
    fn anchors_vertex_edge_face() {
        let mesh = triangle();
        assert_eq!(mesh.anchor(ElementKind::Vertex, 1), Some(Vec3::new(1.0, 0.0, 0.0)));
        // Edge 0 spans (0,0,0) - (1,0,0).
        assert_eq!(mesh.anchor(ElementKind::Edge, 0), Some(Vec3::new(0.5, 0.0, 0.0)));
        let median = mesh.anchor(ElementKind::Face, 0).unwrap();
        assert!((median - Vec3::new(1.0 / 3.0, 1.0 / 3.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn anchor_out_of_range_is_none() {
        let mesh = triangle();
        assert_eq!(mesh.anchor(ElementKind::Vertex, 99), None);
        assert_eq!(mesh.anchor(ElementKind::Face, 1), None);
    }

    #[test]
    fn anchor_of_empty_face_is_none() {
        let mut mesh = MeshData::new();
        let f = mesh.add_face(&[]);
        assert_eq!(mesh.anchor(ElementKind::Face, f as usize), None);
    }

    #[test]
    fn layer_values_survive_swap_removal_of_other_elements() {
        let mut mesh = MeshData::new();
        for i in 0..4 {
            mesh.add_vertex(Vec3::new(i as f32, 0.0, 0.0));
        }
        mesh.ensure_int_layer(ElementKind::Vertex, "ids", -1);
        let layer = mesh.int_layer_mut(ElementKind::Vertex, "ids").unwrap();
        for i in 0..4 {
            layer.set_value(i, 100 + i as i32).unwrap();
        }

        // Remove vertex 1; vertex 3 moves into its slot.
        mesh.remove_vertex(1);
        let layer = mesh.int_layer(ElementKind::Vertex, "ids").unwrap();
        assert_eq!(layer.value(0), Ok(100));
        assert_eq!(layer.value(1), Ok(103));
        assert_eq!(layer.value(2), Ok(102));
        // The moved vertex kept its position too.
        assert_eq!(mesh.verts()[1].position, Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn remove_vertex_cascades_to_incident_elements() {
        let mut mesh = triangle();
        mesh.remove_vertex(0);
        assert_eq!(mesh.element_count(ElementKind::Vertex), 2);
        // Every edge and the face touched vertex 0.
        assert_eq!(mesh.element_count(ElementKind::Edge), 1);
        assert_eq!(mesh.element_count(ElementKind::Face), 0);
        // The surviving edge references only live vertices.
        let edge = &mesh.edges()[0];
        assert!(edge.verts.iter().all(|&v| (v as usize) < 2));
    }

    #[test]
    fn selection_flags_round_trip() {
        let mut mesh = triangle();
        mesh.set_selected(ElementKind::Edge, 1, true);
        assert!(mesh.is_selected(ElementKind::Edge, 1));
        assert!(!mesh.is_selected(ElementKind::Edge, 0));
        // Out-of-range is tolerated.
        mesh.set_selected(ElementKind::Face, 42, true);
        assert!(!mesh.is_selected(ElementKind::Face, 42));
    }
}
