//! Mesh revision: node collapse, degeneracy reduction and subdivision.
//!
//! [`MeshRevision`] borrows a source mesh and derives new meshes from it; the
//! source is never modified. A revision run proceeds in three steps:
//!
//! 1. nodes closer than `eps` are clustered ([`collapse::IdMap`]) and
//!    compacted to a dense node set,
//! 2. every element is remapped onto the compacted ids,
//! 3. intact elements are copied (or subdivided if non-planar), collapsed
//!    ones are reduced to lower-order elements.
//!
//! Elements that cannot be reduced unambiguously are dropped and reported as
//! [`ElementDiagnostic`]s; the run only yields no mesh if no element survives.
//!
//! # Examples
//! ```rust
//! use mesh_revision::algs::meshgen::{regular_hex_mesh, MeshGenOptions};
//! use mesh_revision::revision::MeshRevision;
//!
//! let mesh = regular_hex_mesh(2, 1, 1, 1.0, [0.0; 3], MeshGenOptions::default())?;
//! let revised = MeshRevision::new(&mesh).simplify_mesh("revised", 1e-6, 3)?;
//! assert_eq!(revised.map(|m| m.n_elements()), Some(2));
//! # Ok::<(), mesh_revision::mesh_error::MeshError>(())
//! ```

pub mod collapse;
pub mod lut;
pub(crate) mod reduce;
pub(crate) mod subdivide;

use crate::geometry::validation::{
    ElementErrorFlag, ZERO_CONTENT, content, element_vertices, signed_volume, validate_element,
};
use crate::mesh::Mesh;
use crate::mesh_error::MeshError;
use crate::spatial::grid::DEFAULT_MAX_POINTS_PER_CELL;
use crate::topology::element::Element;
use crate::topology::element_type::ElementType;
use crate::topology::node::{Node, NodeId};
use collapse::IdMap;
use reduce::{Origin, revise};
use std::fmt;
use thiserror::Error;

/// Tuning knobs for [`MeshRevision`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevisionOptions {
    /// Average bucket density of the proximity grid used for node collapse.
    pub max_nodes_per_cell: usize,
}

impl Default for RevisionOptions {
    fn default() -> Self {
        Self {
            max_nodes_per_cell: DEFAULT_MAX_POINTS_PER_CELL,
        }
    }
}

/// Why a single element could not be revised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ElementFailure {
    /// The collapsed corner pair of the element is not one of its edges.
    #[error("collapsed corners {first} and {second} are not joined by an edge")]
    NotAnEdge { first: usize, second: usize },
    /// A topology lookup found no entry for the collapse pattern.
    #[error("no {0} entry for this collapse pattern")]
    LookupMiss(&'static str),
    /// No ordering of four coplanar nodes forms a valid quad.
    #[error("no node ordering of the four remaining nodes forms a valid quad")]
    NoValidQuadOrder,
    /// Subdivision was requested for an element type without a split rule.
    #[error("{0} elements have no subdivision rule")]
    NoSubdivisionRule(ElementType),
    /// No four of the five remaining hexahedron nodes are coplanar.
    #[error("no four of the five remaining nodes form a pyramid base")]
    NoPyramidBase,
    /// Every constructed sub-element was degenerate.
    #[error("all constructed sub-elements are degenerate")]
    NoValidSubElement,
    /// No reduction exists for this number of distinct nodes.
    #[error("{element_type} with {distinct} distinct nodes cannot be reduced")]
    UnsupportedDistinctCount {
        element_type: ElementType,
        distinct: usize,
    },
}

/// A source element that was dropped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDiagnostic {
    /// Index of the element in the source mesh.
    pub element_index: usize,
    pub failure: ElementFailure,
}

impl fmt::Display for ElementDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element {}: {}", self.element_index, self.failure)
    }
}

/// Result of a revision run.
#[derive(Debug, Clone, PartialEq)]
pub struct RevisionReport {
    /// The revised mesh, or `None` if no element survived.
    pub mesh: Option<Mesh>,
    /// One entry per dropped element, in source order.
    pub diagnostics: Vec<ElementDiagnostic>,
}

/// Collects revised elements over a fixed node set.
pub(crate) struct ElementSink<'a> {
    nodes: &'a [Node],
    elements: Vec<Element>,
}

impl<'a> ElementSink<'a> {
    pub(crate) fn new(nodes: &'a [Node]) -> Self {
        Self {
            nodes,
            elements: Vec::new(),
        }
    }

    pub(crate) fn nodes(&self) -> &'a [Node] {
        self.nodes
    }

    pub(crate) fn coords(&self, id: NodeId) -> [f64; 3] {
        self.nodes[id.index()].coords()
    }

    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.elements.truncate(len);
    }

    /// Append an element unchanged.
    pub(crate) fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Append constructed elements, flipping inverted cells and discarding
    /// those with zero content. Fails if none is kept.
    pub(crate) fn emit_all(
        &mut self,
        elements: impl IntoIterator<Item = Element>,
    ) -> Result<(), ElementFailure> {
        let before = self.elements.len();
        for mut element in elements {
            let v = element_vertices(&element, self.nodes);
            if content(element.element_type(), &v) < ZERO_CONTENT {
                log::debug!("discarding degenerate {}", element.element_type());
                continue;
            }
            if signed_volume(element.element_type(), &v).is_some_and(|vol| vol < 0.0) {
                element.flip();
            }
            self.elements.push(element);
        }
        if self.elements.len() == before {
            return Err(ElementFailure::NoValidSubElement);
        }
        Ok(())
    }

    pub(crate) fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}

/// Revision engine over a borrowed source mesh.
#[derive(Clone, Debug)]
pub struct MeshRevision<'a> {
    mesh: &'a Mesh,
    options: RevisionOptions,
}

impl<'a> MeshRevision<'a> {
    pub fn new(mesh: &'a Mesh) -> Self {
        Self::with_options(mesh, RevisionOptions::default())
    }

    pub fn with_options(mesh: &'a Mesh, options: RevisionOptions) -> Self {
        Self { mesh, options }
    }

    pub fn mesh(&self) -> &'a Mesh {
        self.mesh
    }

    pub fn options(&self) -> &RevisionOptions {
        &self.options
    }

    /// Number of nodes that collapse into another node at tolerance `eps`.
    pub fn collapsible_node_count(&self, eps: f64) -> Result<usize, MeshError> {
        Ok(self.id_map(eps)?.n_collapsed())
    }

    /// New mesh with coincident nodes merged and every element remapped.
    ///
    /// Elements are copied as they are, even if they became degenerate.
    pub fn collapse_nodes(&self, name: &str, eps: f64) -> Result<Mesh, MeshError> {
        let map = self.id_map(eps)?;
        let (nodes, new_ids) = map.compact(self.mesh.nodes());
        let elements = self
            .mesh
            .elements()
            .iter()
            .map(|e| e.remapped(|id| new_ids[id.index()]))
            .collect();
        log::info!(
            "collapse '{}': {} -> {} nodes",
            self.mesh.name(),
            self.mesh.n_nodes(),
            nodes.len()
        );
        Mesh::try_new(name, nodes, elements)
    }

    /// Collapse nodes, then rebuild a non-degenerate mesh.
    ///
    /// Elements that reduce below `min_elem_dim` are dropped. Returns
    /// `Ok(None)` if no element survives.
    pub fn simplify_mesh(
        &self,
        name: &str,
        eps: f64,
        min_elem_dim: u8,
    ) -> Result<Option<Mesh>, MeshError> {
        Ok(self.simplify_mesh_with_report(name, eps, min_elem_dim)?.mesh)
    }

    /// [`simplify_mesh`](Self::simplify_mesh), also returning per-element
    /// diagnostics.
    pub fn simplify_mesh_with_report(
        &self,
        name: &str,
        eps: f64,
        min_elem_dim: u8,
    ) -> Result<RevisionReport, MeshError> {
        if !(1..=3).contains(&min_elem_dim) {
            return Err(MeshError::InvalidMinElementDim(min_elem_dim));
        }
        let map = self.id_map(eps)?;
        if self.mesh.elements().is_empty() {
            return Ok(RevisionReport {
                mesh: None,
                diagnostics: Vec::new(),
            });
        }
        let (nodes, new_ids) = map.compact(self.mesh.nodes());
        let (elements, diagnostics) = revise_elements(&nodes, self.mesh.elements(), |e, sink| {
            let remapped = e.remapped(|id| new_ids[id.index()]);
            revise(&remapped, min_elem_dim, Origin::Source, sink)
        });
        log::info!(
            "simplify '{}': {} -> {} nodes, {} -> {} elements, {} dropped",
            self.mesh.name(),
            self.mesh.n_nodes(),
            nodes.len(),
            self.mesh.n_elements(),
            elements.len(),
            diagnostics.len()
        );
        finish(name, nodes, elements, diagnostics)
    }

    /// Split every non-planar element into simplices, copying the rest.
    /// Returns `Ok(None)` if no element survives.
    pub fn subdivide_mesh(&self, name: &str) -> Result<Option<Mesh>, MeshError> {
        Ok(self.subdivide_mesh_with_report(name)?.mesh)
    }

    /// [`subdivide_mesh`](Self::subdivide_mesh), also returning per-element
    /// diagnostics.
    pub fn subdivide_mesh_with_report(&self, name: &str) -> Result<RevisionReport, MeshError> {
        if self.mesh.elements().is_empty() {
            return Ok(RevisionReport {
                mesh: None,
                diagnostics: Vec::new(),
            });
        }
        let nodes = self.mesh.nodes().to_vec();
        let (elements, diagnostics) = revise_elements(&nodes, self.mesh.elements(), |e, sink| {
            if validate_element(e, sink.nodes()).contains(ElementErrorFlag::NonCoplanar) {
                subdivide::subdivide(e, sink)
            } else {
                sink.push(e.clone());
                Ok(())
            }
        });
        log::info!(
            "subdivide '{}': {} -> {} elements",
            self.mesh.name(),
            self.mesh.n_elements(),
            elements.len()
        );
        finish(name, nodes, elements, diagnostics)
    }

    fn id_map(&self, eps: f64) -> Result<IdMap, MeshError> {
        if !eps.is_finite() || eps < 0.0 {
            return Err(MeshError::InvalidTolerance(eps));
        }
        Ok(IdMap::resolve(
            self.mesh.nodes(),
            eps,
            self.options.max_nodes_per_cell,
        ))
    }
}

/// Run `step` on every element, rolling back the output of failed elements.
fn revise_elements(
    nodes: &[Node],
    elements: &[Element],
    mut step: impl FnMut(&Element, &mut ElementSink<'_>) -> Result<(), ElementFailure>,
) -> (Vec<Element>, Vec<ElementDiagnostic>) {
    let mut sink = ElementSink::new(nodes);
    let mut diagnostics = Vec::new();
    for (element_index, element) in elements.iter().enumerate() {
        let mark = sink.len();
        if let Err(failure) = step(element, &mut sink) {
            sink.truncate(mark);
            log::error!(
                "element {element_index} ({}): {failure}",
                element.element_type()
            );
            diagnostics.push(ElementDiagnostic {
                element_index,
                failure,
            });
        }
    }
    (sink.into_elements(), diagnostics)
}

fn finish(
    name: &str,
    nodes: Vec<Node>,
    elements: Vec<Element>,
    diagnostics: Vec<ElementDiagnostic>,
) -> Result<RevisionReport, MeshError> {
    let mesh = if elements.is_empty() {
        log::warn!("revision '{name}': no element survived");
        None
    } else {
        Some(Mesh::try_new(name, nodes, elements)?)
    };
    Ok(RevisionReport { mesh, diagnostics })
}
