//! Lookup tables over local hexahedron and prism corner numbering.
//!
//! All indices are local node indices in the ordering documented in
//! [`element_type`](crate::topology::element_type).

use crate::topology::element_type::ElementType;

/// Corner opposite to each hexahedron corner through the cell center.
pub const HEX_DIAMETRAL_NODES: [usize; 8] = [6, 7, 4, 5, 2, 3, 0, 1];

/// For an ordered hex edge `(i, j)`, the quad that cuts the hex into a
/// pyramid with apex `i` and a prism containing `j`.
const HEX_CUTTING_QUADS: [((usize, usize), [usize; 4]); 24] = [
    ((0, 1), [3, 2, 5, 4]),
    ((1, 2), [0, 3, 6, 5]),
    ((2, 3), [1, 0, 7, 6]),
    ((3, 0), [2, 1, 4, 7]),
    ((4, 5), [0, 1, 6, 7]),
    ((5, 6), [1, 2, 7, 4]),
    ((6, 7), [2, 3, 4, 5]),
    ((7, 4), [3, 0, 5, 6]),
    ((0, 4), [3, 7, 5, 1]),
    ((1, 5), [0, 4, 6, 2]),
    ((2, 6), [1, 5, 7, 3]),
    ((3, 7), [2, 6, 4, 0]),
    ((1, 0), [2, 3, 4, 5]),
    ((2, 1), [3, 0, 5, 6]),
    ((3, 2), [0, 1, 6, 7]),
    ((0, 3), [1, 2, 7, 4]),
    ((5, 4), [1, 0, 7, 6]),
    ((6, 5), [2, 1, 4, 7]),
    ((7, 6), [3, 2, 5, 4]),
    ((4, 7), [0, 3, 6, 5]),
    ((4, 0), [7, 3, 1, 5]),
    ((5, 1), [4, 0, 2, 6]),
    ((6, 2), [5, 1, 3, 7]),
    ((7, 3), [6, 2, 0, 4]),
];

/// Diametral corner of hex corner `i`.
///
/// # Panics
///
/// Panics if `i >= 8`.
#[inline]
pub fn hex_diametral_node(i: usize) -> usize {
    HEX_DIAMETRAL_NODES[i]
}

/// Cutting quad for the ordered hex edge `(i, j)`; `None` if `i` and `j` are
/// not joined by a hex edge.
pub fn hex_cutting_quad_nodes(i: usize, j: usize) -> Option<[usize; 4]> {
    HEX_CUTTING_QUADS
        .iter()
        .find(|(edge, _)| *edge == (i, j))
        .map(|(_, quad)| *quad)
}

/// Back corners for two collapsed hex edges `(i, j)` and `(k, l)`.
///
/// The returned ordered pair is a hex edge whose cutting quad splits the hex
/// into two prisms, each containing one of the collapsed edges. `None` if the
/// edges are in no matching configuration.
pub fn hex_back_nodes(i: usize, j: usize, k: usize, l: usize) -> Option<(usize, usize)> {
    let d = hex_diametral_node;
    if d(i) == k {
        Some((i, d(l)))
    } else if d(i) == l {
        Some((i, d(k)))
    } else if d(j) == k {
        Some((j, d(l)))
    } else if d(j) == l {
        Some((j, d(k)))
    } else if i == k {
        Some((d(l), j))
    } else if i == l {
        Some((d(k), j))
    } else if j == k {
        Some((d(l), i))
    } else if j == l {
        Some((d(k), i))
    } else {
        None
    }
}

/// Third corner of the prism triangle containing `i` and `j`.
pub fn prism_third_node(i: usize, j: usize) -> Option<usize> {
    if i == j {
        return None;
    }
    match (i, j) {
        (0..=2, 0..=2) => Some(3 - i - j),
        (3..=5, 3..=5) => Some(12 - i - j),
        _ => None,
    }
}

/// The corner joined to hex corner `i` by the one hex edge that leaves hex
/// face `face`. `None` if `i` is not a corner of that face.
pub fn hex_partner_node(face: usize, i: usize) -> Option<usize> {
    let hex = ElementType::Hexahedron;
    let corners = hex.faces().get(face)?;
    if !corners.contains(&i) {
        return None;
    }
    hex.edges().iter().find_map(|&(a, b)| match (a == i, b == i) {
        (true, _) if !corners.contains(&b) => Some(b),
        (_, true) if !corners.contains(&a) => Some(a),
        _ => None,
    })
}
