//! `Mesh`: a named, owned collection of nodes and elements.
//!
//! Elements reference nodes by [`NodeId`], the node's position in
//! [`Mesh::nodes`]. [`Mesh::try_new`] enforces that every element resolves
//! into the node sequence, so geometry code downstream may index freely.

use crate::geometry::validation;
use crate::mesh_error::MeshError;
use crate::topology::element::Element;
use crate::topology::element_type::ElementType;
use crate::topology::node::{Node, NodeId};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "MeshParts")]
pub struct Mesh {
    name: String,
    nodes: Vec<Node>,
    elements: Vec<Element>,
}

/// Unchecked wire form; deserialization goes through [`Mesh::try_new`].
#[derive(serde::Deserialize)]
struct MeshParts {
    name: String,
    nodes: Vec<Node>,
    elements: Vec<Element>,
}

impl TryFrom<MeshParts> for Mesh {
    type Error = MeshError;

    fn try_from(parts: MeshParts) -> Result<Self, Self::Error> {
        Mesh::try_new(parts.name, parts.nodes, parts.elements)
    }
}

impl Mesh {
    /// Build a mesh, checking that every element references existing nodes.
    pub fn try_new(
        name: impl Into<String>,
        nodes: Vec<Node>,
        elements: Vec<Element>,
    ) -> Result<Self, MeshError> {
        let node_count = nodes.len();
        for (element, e) in elements.iter().enumerate() {
            if let Some(bad) = e.nodes().iter().find(|id| id.index() >= node_count) {
                return Err(MeshError::NodeOutOfRange {
                    element,
                    node: bad.index(),
                    node_count,
                });
            }
        }
        Ok(Self {
            name: name.into(),
            nodes,
            elements,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// Node referenced by `id`, if it belongs to this mesh.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Highest element dimension present, or 0 for a mesh without elements.
    pub fn dimension(&self) -> u8 {
        self.elements
            .iter()
            .map(Element::dimension)
            .max()
            .unwrap_or(0)
    }

    /// Coordinates of `element`'s nodes in local order.
    ///
    /// The element must belong to this mesh.
    pub fn element_vertices(&self, element: &Element) -> Vec<[f64; 3]> {
        validation::element_vertices(element, &self.nodes)
    }

    /// Number of elements per type; types that do not occur are omitted.
    pub fn element_type_counts(&self) -> BTreeMap<ElementType, usize> {
        let mut counts = BTreeMap::new();
        for e in &self.elements {
            *counts.entry(e.element_type()).or_insert(0) += 1;
        }
        counts
    }

    /// Drop nodes no element references and renumber the rest densely,
    /// keeping their relative order. Returns the number of removed nodes.
    pub fn remove_unused_nodes(&mut self) -> usize {
        let mut new_ids: Vec<Option<NodeId>> = vec![None; self.nodes.len()];
        for e in &self.elements {
            for id in e.nodes() {
                new_ids[id.index()] = Some(*id);
            }
        }
        let mut kept = Vec::with_capacity(self.nodes.len());
        for (slot, node) in new_ids.iter_mut().zip(&self.nodes) {
            if slot.is_some() {
                *slot = Some(NodeId::new(kept.len()));
                kept.push(*node);
            }
        }
        let removed = self.nodes.len() - kept.len();
        if removed == 0 {
            return 0;
        }
        self.nodes = kept;
        for e in &mut self.elements {
            // every referenced node has a slot
            *e = e.remapped(|id| new_ids[id.index()].unwrap_or(id));
        }
        log::debug!("mesh '{}': removed {removed} unused nodes", self.name);
        removed
    }

    /// Decompose into name, nodes and elements.
    pub fn into_parts(self) -> (String, Vec<Node>, Vec<Element>) {
        (self.name, self.nodes, self.elements)
    }
}
