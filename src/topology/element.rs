//! Mesh elements: a type tag, an ordered list of node handles and a material.

use crate::mesh_error::MeshError;
use crate::topology::element_type::ElementType;
use crate::topology::node::NodeId;
use itertools::Itertools;

/// A mesh element referencing (not owning) nodes of its mesh.
///
/// The node list always has exactly `element_type.n_nodes()` entries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "ElementParts")]
pub struct Element {
    element_type: ElementType,
    nodes: Vec<NodeId>,
    material: u32,
}

#[derive(serde::Deserialize)]
struct ElementParts {
    element_type: ElementType,
    nodes: Vec<NodeId>,
    material: u32,
}

impl TryFrom<ElementParts> for Element {
    type Error = MeshError;

    fn try_from(parts: ElementParts) -> Result<Self, Self::Error> {
        Element::try_new(parts.element_type, parts.nodes, parts.material)
    }
}

impl Element {
    /// Construct an element, checking the node count against the type.
    pub fn try_new(
        element_type: ElementType,
        nodes: Vec<NodeId>,
        material: u32,
    ) -> Result<Self, MeshError> {
        if nodes.len() != element_type.n_nodes() {
            return Err(MeshError::NodeCountMismatch {
                element_type,
                expected: element_type.n_nodes(),
                found: nodes.len(),
            });
        }
        Ok(Self {
            element_type,
            nodes,
            material,
        })
    }

    pub fn line(nodes: [NodeId; 2], material: u32) -> Self {
        Self::from_array(ElementType::Line, nodes, material)
    }

    pub fn tri(nodes: [NodeId; 3], material: u32) -> Self {
        Self::from_array(ElementType::Triangle, nodes, material)
    }

    pub fn quad(nodes: [NodeId; 4], material: u32) -> Self {
        Self::from_array(ElementType::Quad, nodes, material)
    }

    pub fn tet(nodes: [NodeId; 4], material: u32) -> Self {
        Self::from_array(ElementType::Tetrahedron, nodes, material)
    }

    pub fn pyramid(nodes: [NodeId; 5], material: u32) -> Self {
        Self::from_array(ElementType::Pyramid, nodes, material)
    }

    pub fn prism(nodes: [NodeId; 6], material: u32) -> Self {
        Self::from_array(ElementType::Prism, nodes, material)
    }

    pub fn hex(nodes: [NodeId; 8], material: u32) -> Self {
        Self::from_array(ElementType::Hexahedron, nodes, material)
    }

    fn from_array<const N: usize>(element_type: ElementType, nodes: [NodeId; N], material: u32) -> Self {
        debug_assert_eq!(N, element_type.n_nodes());
        Self {
            element_type,
            nodes: nodes.to_vec(),
            material,
        }
    }

    #[inline]
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    #[inline]
    pub fn dimension(&self) -> u8 {
        self.element_type.dimension()
    }

    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Node handle at local index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.n_nodes()`.
    #[inline]
    pub fn node(&self, i: usize) -> NodeId {
        self.nodes[i]
    }

    #[inline]
    pub fn material(&self) -> u32 {
        self.material
    }

    /// Local index of `node` in this element, if present.
    pub fn local_index(&self, node: NodeId) -> Option<usize> {
        self.nodes.iter().position(|&n| n == node)
    }

    /// Number of distinct node handles.
    pub fn n_unique_nodes(&self) -> usize {
        self.nodes.iter().unique().count()
    }

    /// Distinct node handles in order of first appearance.
    pub fn unique_nodes(&self) -> Vec<NodeId> {
        self.nodes.iter().copied().unique().collect()
    }

    /// The `i`-th face as a Triangle or Quad sharing this element's nodes and
    /// material. Lines have no faces.
    pub fn face(&self, i: usize) -> Option<Element> {
        let local = self.element_type.faces().get(i)?;
        let face_type = ElementType::face_type(local.len())?;
        Some(Element {
            element_type: face_type,
            nodes: local.iter().map(|&l| self.nodes[l]).collect(),
            material: self.material,
        })
    }

    /// Iterator over all faces.
    pub fn faces(&self) -> impl Iterator<Item = Element> + '_ {
        (0..self.element_type.n_faces()).filter_map(move |i| self.face(i))
    }

    /// Element of type `element_type` over this element's nodes at the local
    /// indices `local`, with the same material.
    pub(crate) fn sub_element(&self, element_type: ElementType, local: &[usize]) -> Element {
        debug_assert_eq!(local.len(), element_type.n_nodes());
        Element {
            element_type,
            nodes: local.iter().map(|&l| self.nodes[l]).collect(),
            material: self.material,
        }
    }

    /// Returns a copy with every node handle passed through `map`.
    pub fn remapped(&self, mut map: impl FnMut(NodeId) -> NodeId) -> Element {
        Element {
            element_type: self.element_type,
            nodes: self.nodes.iter().map(|&n| map(n)).collect(),
            material: self.material,
        }
    }

    /// Reverses the orientation of the element in place.
    ///
    /// Cells are mirrored so that their signed volume changes sign; faces have
    /// their loop reversed; lines swap their end points.
    pub fn flip(&mut self) {
        let n = &mut self.nodes;
        match self.element_type {
            ElementType::Line => n.swap(0, 1),
            ElementType::Triangle | ElementType::Tetrahedron => n.swap(1, 2),
            ElementType::Quad | ElementType::Pyramid => n.swap(1, 3),
            ElementType::Prism => {
                n.swap(1, 2);
                n.swap(4, 5);
            }
            ElementType::Hexahedron => {
                n.swap(1, 3);
                n.swap(5, 7);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<const N: usize>(raw: [usize; N]) -> [NodeId; N] {
        raw.map(NodeId::new)
    }

    #[test]
    fn try_new_checks_node_count() {
        let err = Element::try_new(ElementType::Triangle, ids([0, 1]).to_vec(), 0).unwrap_err();
        assert_eq!(
            err,
            MeshError::NodeCountMismatch {
                element_type: ElementType::Triangle,
                expected: 3,
                found: 2
            }
        );
        assert!(Element::try_new(ElementType::Line, ids([0, 1]).to_vec(), 3).is_ok());
    }

    #[test]
    fn unique_nodes_keep_first_appearance() {
        let quad = Element::quad(ids([4, 1, 4, 2]), 0);
        assert_eq!(quad.n_unique_nodes(), 3);
        assert_eq!(quad.unique_nodes(), ids([4, 1, 2]).to_vec());
    }

    #[test]
    fn hex_faces_use_element_nodes() {
        let hex = Element::hex(ids([10, 11, 12, 13, 14, 15, 16, 17]), 5);
        let bottom = hex.face(0).unwrap();
        assert_eq!(bottom.element_type(), ElementType::Quad);
        assert_eq!(bottom.nodes(), &ids([10, 13, 12, 11]));
        assert_eq!(bottom.material(), 5);
        assert_eq!(hex.faces().count(), 6);
        assert!(hex.face(6).is_none());
    }

    #[test]
    fn prism_faces_mix_tris_and_quads() {
        let prism = Element::prism(ids([0, 1, 2, 3, 4, 5]), 0);
        let types: Vec<_> = prism.faces().map(|f| f.element_type()).collect();
        assert_eq!(
            types,
            vec![
                ElementType::Triangle,
                ElementType::Quad,
                ElementType::Quad,
                ElementType::Quad,
                ElementType::Triangle
            ]
        );
    }

    #[test]
    fn flip_twice_is_identity() {
        let hex = Element::hex(ids([0, 1, 2, 3, 4, 5, 6, 7]), 0);
        let mut flipped = hex.clone();
        flipped.flip();
        assert_ne!(flipped, hex);
        flipped.flip();
        assert_eq!(flipped, hex);
    }

    #[test]
    fn local_index_and_remap() {
        let tet = Element::tet(ids([3, 5, 7, 9]), 1);
        assert_eq!(tet.local_index(NodeId::new(7)), Some(2));
        assert_eq!(tet.local_index(NodeId::new(8)), None);
        let shifted = tet.remapped(|n| NodeId::new(n.index() + 1));
        assert_eq!(shifted.nodes(), &ids([4, 6, 8, 10]));
        assert_eq!(shifted.material(), 1);
    }

    #[test]
    fn deserialize_checks_node_count() {
        let ok = r#"{"element_type":"Triangle","nodes":[0,1,2],"material":4}"#;
        let tri: Element = serde_json::from_str(ok).unwrap();
        assert_eq!(tri.material(), 4);
        let bad = r#"{"element_type":"Triangle","nodes":[0,1],"material":4}"#;
        assert!(serde_json::from_str::<Element>(bad).is_err());
    }
}
