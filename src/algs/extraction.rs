//! Element selection and removal.
//!
//! [`ElementExtraction`] marks elements of a borrowed mesh through a series
//! of searches; the marked set is the union of all search results. Removing
//! the marked elements produces a new mesh whose node ids are compacted to
//! the nodes the remaining elements reference.

use crate::geometry::validation::{ZERO_CONTENT, element_content};
use crate::mesh::Mesh;
use crate::mesh_error::MeshError;
use crate::topology::element::Element;
use crate::topology::element_type::ElementType;
use std::collections::BTreeSet;

/// Accumulates marked element indices over a source mesh.
#[derive(Clone, Debug)]
pub struct ElementExtraction<'a> {
    mesh: &'a Mesh,
    marked: BTreeSet<usize>,
}

impl<'a> ElementExtraction<'a> {
    pub fn new(mesh: &'a Mesh) -> Self {
        Self {
            mesh,
            marked: BTreeSet::new(),
        }
    }

    /// Marked element indices in ascending order.
    pub fn marked(&self) -> impl Iterator<Item = usize> + '_ {
        self.marked.iter().copied()
    }

    pub fn n_marked(&self) -> usize {
        self.marked.len()
    }

    fn mark_where(&mut self, pred: impl Fn(&Element) -> bool) -> usize {
        let matched: Vec<usize> = self
            .mesh
            .elements()
            .iter()
            .enumerate()
            .filter(|(_, e)| pred(e))
            .map(|(i, _)| i)
            .collect();
        self.marked.extend(matched.iter().copied());
        matched.len()
    }

    /// Mark elements with material `material`. Returns the number of matches.
    pub fn search_by_material(&mut self, material: u32) -> usize {
        self.mark_where(|e| e.material() == material)
    }

    /// Mark elements of type `element_type`. Returns the number of matches.
    pub fn search_by_element_type(&mut self, element_type: ElementType) -> usize {
        self.mark_where(|e| e.element_type() == element_type)
    }

    /// Mark elements with (near) zero length, area or volume.
    pub fn search_by_zero_content(&mut self) -> usize {
        let nodes = self.mesh.nodes();
        self.mark_where(|e| element_content(e, nodes) < ZERO_CONTENT)
    }

    /// Mark elements with at least one node outside the closed box
    /// `[min, max]`.
    pub fn search_by_bounding_box(&mut self, min: [f64; 3], max: [f64; 3]) -> Result<usize, MeshError> {
        if (0..3).any(|a| !(min[a] <= max[a])) {
            return Err(MeshError::InvalidBoundingBox { min, max });
        }
        let mesh = self.mesh;
        let inside = |c: [f64; 3]| (0..3).all(|a| min[a] <= c[a] && c[a] <= max[a]);
        Ok(self.mark_where(|e| {
            e.nodes()
                .iter()
                .filter_map(|&id| mesh.node(id))
                .any(|n| !inside(n.coords()))
        }))
    }

    /// New mesh without the marked elements and without nodes that only
    /// they referenced.
    ///
    /// Returns `Ok(None)` if nothing is marked or if every element is marked.
    pub fn remove_marked_elements(&self, name: &str) -> Result<Option<Mesh>, MeshError> {
        if self.marked.is_empty() {
            log::info!("no elements to remove");
            return Ok(None);
        }
        let remaining: Vec<Element> = self
            .mesh
            .elements()
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.marked.contains(i))
            .map(|(_, e)| e.clone())
            .collect();
        if remaining.is_empty() {
            log::info!("current selection removes all elements");
            return Ok(None);
        }
        log::info!(
            "removing {} elements, {} remain",
            self.marked.len(),
            remaining.len()
        );
        let mut mesh = Mesh::try_new(name, self.mesh.nodes().to_vec(), remaining)?;
        mesh.remove_unused_nodes();
        Ok(Some(mesh))
    }
}
