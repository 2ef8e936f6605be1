//! Element content and validity checks.
//!
//! # Defect flags
//! - [`ElementErrorFlag::ZeroVolume`]: length/area/volume below `f64::EPSILON`.
//! - [`ElementErrorFlag::NonCoplanar`]: a quad (or a quad face of a cell)
//!   whose four corners do not share a plane.
//! - [`ElementErrorFlag::NonConvex`]: a planar quad (or quad face) whose
//!   diagonals do not cross.
//! - [`ElementErrorFlag::NodeOrder`]: a cell with a face whose outward normal
//!   points towards the cell centroid, i.e. an inverted or twisted cell.
//!   Lines and 2D elements carry no orientation in 3D and never get this flag.
//!
//! # Examples
//! ```rust
//! use mesh_revision::geometry::validation::{validate_element, ElementErrorFlag};
//! use mesh_revision::topology::element::Element;
//! use mesh_revision::topology::node::{Node, NodeId};
//!
//! let nodes = [
//!     Node::new(0.0, 0.0, 0.0),
//!     Node::new(1.0, 0.0, 0.0),
//!     Node::new(1.0, 1.0, 0.5),
//!     Node::new(0.0, 1.0, 0.0),
//! ];
//! let quad = Element::quad([0, 1, 2, 3].map(NodeId::new), 0);
//! let errors = validate_element(&quad, &nodes);
//! assert!(errors.contains(ElementErrorFlag::NonCoplanar));
//! ```

use crate::geometry::predicates::{
    centroid, cross, divided_by_line, dot, is_coplanar, norm, signed_tet_volume, sub,
    triangle_area, triangle_normal,
};
use crate::mesh::Mesh;
use crate::topology::element::Element;
use crate::topology::element_type::ElementType;
use crate::topology::node::Node;
use std::fmt;

/// Content below this threshold counts as zero.
pub const ZERO_CONTENT: f64 = f64::EPSILON;

/// Individual element defects.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ElementErrorFlag {
    ZeroVolume,
    NonCoplanar,
    NonConvex,
    NodeOrder,
}

impl ElementErrorFlag {
    pub const ALL: [ElementErrorFlag; 4] = [
        ElementErrorFlag::ZeroVolume,
        ElementErrorFlag::NonCoplanar,
        ElementErrorFlag::NonConvex,
        ElementErrorFlag::NodeOrder,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    fn describe(self) -> &'static str {
        match self {
            ElementErrorFlag::ZeroVolume => "zero volume",
            ElementErrorFlag::NonCoplanar => "non-coplanar nodes",
            ElementErrorFlag::NonConvex => "non-convex",
            ElementErrorFlag::NodeOrder => "wrong node order",
        }
    }
}

/// Bit set of [`ElementErrorFlag`]s.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ElementErrorCode(u8);

impl ElementErrorCode {
    #[inline]
    pub fn set(&mut self, flag: ElementErrorFlag, value: bool) {
        if value {
            self.0 |= flag.bit();
        } else {
            self.0 &= !flag.bit();
        }
    }

    #[inline]
    pub fn contains(self, flag: ElementErrorFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    /// True if no defect is set.
    #[inline]
    pub fn none(self) -> bool {
        self.0 == 0
    }

    /// Iterator over the set flags.
    pub fn flags(self) -> impl Iterator<Item = ElementErrorFlag> {
        ElementErrorFlag::ALL
            .into_iter()
            .filter(move |f| self.contains(*f))
    }
}

impl std::ops::BitOrAssign for ElementErrorCode {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for ElementErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.none() {
            return f.write_str("ok");
        }
        let mut first = true;
        for flag in self.flags() {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(flag.describe())?;
            first = false;
        }
        Ok(())
    }
}

/// Coordinates of the element's nodes, in local order.
///
/// # Panics
///
/// Panics if the element references a node outside `nodes`; elements of a
/// [`Mesh`] always resolve into its node sequence.
pub fn element_vertices(element: &Element, nodes: &[Node]) -> Vec<[f64; 3]> {
    element
        .nodes()
        .iter()
        .map(|id| nodes[id.index()].coords())
        .collect()
}

/// Signed volume of a cell using fixed tetrahedral decompositions; positive
/// for the orientation documented in [`element_type`](crate::topology::element_type).
/// Returns `None` for lines and 2D elements.
pub fn signed_volume(element_type: ElementType, v: &[[f64; 3]]) -> Option<f64> {
    let vol = match element_type {
        ElementType::Line | ElementType::Triangle | ElementType::Quad => return None,
        ElementType::Tetrahedron => signed_tet_volume(v[0], v[1], v[2], v[3]),
        ElementType::Pyramid => {
            signed_tet_volume(v[0], v[1], v[2], v[4]) + signed_tet_volume(v[0], v[2], v[3], v[4])
        }
        ElementType::Prism => {
            signed_tet_volume(v[0], v[1], v[2], v[3])
                + signed_tet_volume(v[1], v[4], v[2], v[3])
                + signed_tet_volume(v[2], v[4], v[5], v[3])
        }
        ElementType::Hexahedron => {
            signed_tet_volume(v[0], v[1], v[3], v[4])
                + signed_tet_volume(v[1], v[2], v[3], v[6])
                + signed_tet_volume(v[1], v[3], v[4], v[6])
                + signed_tet_volume(v[1], v[4], v[5], v[6])
                + signed_tet_volume(v[3], v[4], v[6], v[7])
        }
    };
    Some(vol)
}

/// Length, area or volume of an element, depending on its dimension.
pub fn content(element_type: ElementType, v: &[[f64; 3]]) -> f64 {
    match element_type {
        ElementType::Line => norm(sub(v[1], v[0])),
        ElementType::Triangle => triangle_area(v[0], v[1], v[2]),
        ElementType::Quad => triangle_area(v[0], v[1], v[2]) + triangle_area(v[0], v[2], v[3]),
        _ => signed_volume(element_type, v).map_or(0.0, f64::abs),
    }
}

/// Content of an element of a mesh with nodes `nodes`.
pub fn element_content(element: &Element, nodes: &[Node]) -> f64 {
    content(element.element_type(), &element_vertices(element, nodes))
}

/// Validate a single element against its node coordinates.
pub fn validate_element(element: &Element, nodes: &[Node]) -> ElementErrorCode {
    let v = element_vertices(element, nodes);
    let mut code = ElementErrorCode::default();
    code.set(
        ElementErrorFlag::ZeroVolume,
        content(element.element_type(), &v) < ZERO_CONTENT,
    );
    match element.element_type() {
        ElementType::Line | ElementType::Triangle => {}
        ElementType::Quad => code |= quad_errors(&v, code.contains(ElementErrorFlag::ZeroVolume)),
        ElementType::Tetrahedron
        | ElementType::Hexahedron
        | ElementType::Pyramid
        | ElementType::Prism => {
            for face in element.element_type().faces() {
                if face.len() == 4 {
                    let fv: Vec<[f64; 3]> = face.iter().map(|&l| v[l]).collect();
                    let fv_area =
                        triangle_area(fv[0], fv[1], fv[2]) + triangle_area(fv[0], fv[2], fv[3]);
                    code |= quad_errors(&fv, fv_area < ZERO_CONTENT);
                }
            }
            if !code.contains(ElementErrorFlag::ZeroVolume) {
                code.set(ElementErrorFlag::NodeOrder, !faces_point_outward(element.element_type(), &v));
            }
        }
    }
    code
}

fn quad_errors(v: &[[f64; 3]], zero_area: bool) -> ElementErrorCode {
    let mut code = ElementErrorCode::default();
    let coplanar = is_coplanar(v[0], v[1], v[2], v[3]);
    code.set(ElementErrorFlag::NonCoplanar, !coplanar);
    // Collapsed quads may have all corners on a line; convexity is meaningless there.
    if coplanar && !zero_area {
        let convex = divided_by_line(v[0], v[2], v[1], v[3]) && divided_by_line(v[1], v[3], v[0], v[2]);
        code.set(ElementErrorFlag::NonConvex, !convex);
    }
    code
}

fn faces_point_outward(element_type: ElementType, v: &[[f64; 3]]) -> bool {
    let c = centroid(v);
    element_type.faces().iter().all(|face| {
        let fv: Vec<[f64; 3]> = face.iter().map(|&l| v[l]).collect();
        let normal = match fv.len() {
            3 => triangle_normal(fv[0], fv[1], fv[2]),
            _ => cross(sub(fv[2], fv[0]), sub(fv[3], fv[1])),
        };
        dot(normal, sub(centroid(&fv), c)) > 0.0
    })
}

/// Per-mesh summary of element defects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshValidation {
    /// Number of elements carrying each flag, indexed like [`ElementErrorFlag::ALL`].
    pub flag_counts: [usize; 4],
    /// Indices and defect codes of all elements with at least one defect.
    pub invalid_elements: Vec<(usize, ElementErrorCode)>,
    /// Number of nodes not referenced by any element.
    pub unused_nodes: usize,
}

impl MeshValidation {
    /// Number of elements carrying `flag`.
    pub fn count(&self, flag: ElementErrorFlag) -> usize {
        self.flag_counts[flag as usize]
    }

    /// True if no element has a defect.
    pub fn is_valid(&self) -> bool {
        self.invalid_elements.is_empty()
    }
}

/// Validate every element of a mesh and count unused nodes.
pub fn validate_mesh(mesh: &Mesh) -> MeshValidation {
    let mut report = MeshValidation::default();
    let mut used = vec![false; mesh.nodes().len()];
    for (idx, element) in mesh.elements().iter().enumerate() {
        for id in element.nodes() {
            used[id.index()] = true;
        }
        let code = validate_element(element, mesh.nodes());
        if code.none() {
            continue;
        }
        for flag in code.flags() {
            report.flag_counts[flag as usize] += 1;
        }
        report.invalid_elements.push((idx, code));
    }
    report.unused_nodes = used.iter().filter(|u| !**u).count();
    if !report.is_valid() {
        log::warn!(
            "mesh '{}': {} of {} elements have defects",
            mesh.name(),
            report.invalid_elements.len(),
            mesh.elements().len()
        );
    }
    report
}
