//! Element type metadata: node counts, dimensions and local topology tables.
//!
//! Local node ordering per type:
//!
//! - **Line**: `[v0, v1]`.
//! - **Triangle**: `[v0, v1, v2]`.
//! - **Quad**: `[v0, v1, v2, v3]`, a closed loop.
//! - **Tetrahedron**: `[v0, v1, v2, v3]`, positively oriented when `v3` lies
//!   on the side of `(v0, v1, v2)` its right-handed normal points to.
//! - **Hexahedron**: bottom face `[0, 1, 2, 3]` and top face `[4, 5, 6, 7]`,
//!   both counter-clockwise seen from above, `i + 4` above `i`.
//! - **Pyramid**: base quad `[0, 1, 2, 3]` and apex `4`.
//! - **Prism**: bottom triangle `[0, 1, 2]` and top triangle `[3, 4, 5]`,
//!   `i + 3` above `i`.
//!
//! Face tables list each face so that its right-handed normal points out of
//! a positively oriented cell.

use std::fmt;

/// The closed set of element types handled by the crate.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum ElementType {
    /// 1D segment.
    Line,
    /// 2D simplex.
    Triangle,
    /// 2D tensor-product element.
    Quad,
    /// 3D simplex.
    Tetrahedron,
    /// 3D tensor-product element.
    Hexahedron,
    /// 3D pyramid with quad base.
    Pyramid,
    /// 3D wedge.
    Prism,
}

impl ElementType {
    /// All element types, ordered by dimension and node count.
    pub const ALL: [ElementType; 7] = [
        ElementType::Line,
        ElementType::Triangle,
        ElementType::Quad,
        ElementType::Tetrahedron,
        ElementType::Pyramid,
        ElementType::Prism,
        ElementType::Hexahedron,
    ];

    /// Returns the topological dimension of the element.
    pub const fn dimension(self) -> u8 {
        match self {
            ElementType::Line => 1,
            ElementType::Triangle | ElementType::Quad => 2,
            ElementType::Tetrahedron
            | ElementType::Hexahedron
            | ElementType::Pyramid
            | ElementType::Prism => 3,
        }
    }

    /// Number of (corner) nodes.
    pub const fn n_nodes(self) -> usize {
        match self {
            ElementType::Line => 2,
            ElementType::Triangle => 3,
            ElementType::Quad | ElementType::Tetrahedron => 4,
            ElementType::Pyramid => 5,
            ElementType::Prism => 6,
            ElementType::Hexahedron => 8,
        }
    }

    /// Local edge table.
    pub fn edges(self) -> &'static [(usize, usize)] {
        match self {
            ElementType::Line => &LINE_EDGES,
            ElementType::Triangle => &TRI_EDGES,
            ElementType::Quad => &QUAD_EDGES,
            ElementType::Tetrahedron => &TET_EDGES,
            ElementType::Hexahedron => &HEX_EDGES,
            ElementType::Pyramid => &PYRAMID_EDGES,
            ElementType::Prism => &PRISM_EDGES,
        }
    }

    /// Local face table. Lines have no faces; 2D elements are their own face.
    pub fn faces(self) -> &'static [&'static [usize]] {
        match self {
            ElementType::Line => &[],
            ElementType::Triangle => &TRI_FACES,
            ElementType::Quad => &QUAD_FACES,
            ElementType::Tetrahedron => &TET_FACES,
            ElementType::Hexahedron => &HEX_FACES,
            ElementType::Pyramid => &PYRAMID_FACES,
            ElementType::Prism => &PRISM_FACES,
        }
    }

    /// Number of faces.
    pub fn n_faces(self) -> usize {
        self.faces().len()
    }

    /// Returns true if local nodes `a` and `b` are joined by an edge.
    pub fn is_edge(self, a: usize, b: usize) -> bool {
        self.edges()
            .iter()
            .any(|&(p, q)| (p == a && q == b) || (p == b && q == a))
    }

    /// Element type of a face with `n` nodes.
    pub(crate) fn face_type(n: usize) -> Option<ElementType> {
        match n {
            3 => Some(ElementType::Triangle),
            4 => Some(ElementType::Quad),
            _ => None,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::Line => "line",
            ElementType::Triangle => "triangle",
            ElementType::Quad => "quad",
            ElementType::Tetrahedron => "tetrahedron",
            ElementType::Hexahedron => "hexahedron",
            ElementType::Pyramid => "pyramid",
            ElementType::Prism => "prism",
        };
        f.write_str(name)
    }
}

const LINE_EDGES: [(usize, usize); 1] = [(0, 1)];
const TRI_EDGES: [(usize, usize); 3] = [(0, 1), (1, 2), (0, 2)];
const QUAD_EDGES: [(usize, usize); 4] = [(0, 1), (1, 2), (2, 3), (0, 3)];
const TET_EDGES: [(usize, usize); 6] = [(0, 1), (1, 2), (0, 2), (0, 3), (1, 3), (2, 3)];
const HEX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (0, 3),
    (4, 5),
    (5, 6),
    (6, 7),
    (4, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];
const PYRAMID_EDGES: [(usize, usize); 8] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (0, 3),
    (0, 4),
    (1, 4),
    (2, 4),
    (3, 4),
];
const PRISM_EDGES: [(usize, usize); 9] = [
    (0, 1),
    (1, 2),
    (0, 2),
    (0, 3),
    (1, 4),
    (2, 5),
    (3, 4),
    (4, 5),
    (3, 5),
];

const TRI_FACE: [usize; 3] = [0, 1, 2];
const QUAD_FACE: [usize; 4] = [0, 1, 2, 3];
const TET_FACE_0: [usize; 3] = [0, 2, 1];
const TET_FACE_1: [usize; 3] = [0, 1, 3];
const TET_FACE_2: [usize; 3] = [1, 2, 3];
const TET_FACE_3: [usize; 3] = [2, 0, 3];
const HEX_FACE_0: [usize; 4] = [0, 3, 2, 1];
const HEX_FACE_1: [usize; 4] = [0, 1, 5, 4];
const HEX_FACE_2: [usize; 4] = [1, 2, 6, 5];
const HEX_FACE_3: [usize; 4] = [2, 3, 7, 6];
const HEX_FACE_4: [usize; 4] = [3, 0, 4, 7];
const HEX_FACE_5: [usize; 4] = [4, 5, 6, 7];
const PYRAMID_FACE_0: [usize; 3] = [0, 1, 4];
const PYRAMID_FACE_1: [usize; 3] = [1, 2, 4];
const PYRAMID_FACE_2: [usize; 3] = [2, 3, 4];
const PYRAMID_FACE_3: [usize; 3] = [3, 0, 4];
const PYRAMID_FACE_4: [usize; 4] = [0, 3, 2, 1];
const PRISM_FACE_0: [usize; 3] = [0, 2, 1];
const PRISM_FACE_1: [usize; 4] = [0, 1, 4, 3];
const PRISM_FACE_2: [usize; 4] = [1, 2, 5, 4];
const PRISM_FACE_3: [usize; 4] = [2, 0, 3, 5];
const PRISM_FACE_4: [usize; 3] = [3, 4, 5];

const TRI_FACES: [&[usize]; 1] = [&TRI_FACE];
const QUAD_FACES: [&[usize]; 1] = [&QUAD_FACE];
const TET_FACES: [&[usize]; 4] = [&TET_FACE_0, &TET_FACE_1, &TET_FACE_2, &TET_FACE_3];
const HEX_FACES: [&[usize]; 6] = [
    &HEX_FACE_0,
    &HEX_FACE_1,
    &HEX_FACE_2,
    &HEX_FACE_3,
    &HEX_FACE_4,
    &HEX_FACE_5,
];
const PYRAMID_FACES: [&[usize]; 5] = [
    &PYRAMID_FACE_0,
    &PYRAMID_FACE_1,
    &PYRAMID_FACE_2,
    &PYRAMID_FACE_3,
    &PYRAMID_FACE_4,
];
const PRISM_FACES: [&[usize]; 5] = [
    &PRISM_FACE_0,
    &PRISM_FACE_1,
    &PRISM_FACE_2,
    &PRISM_FACE_3,
    &PRISM_FACE_4,
];
