//! Fixed splits of non-planar elements into simplices.

use super::{ElementFailure, ElementSink};
use crate::topology::element::Element;
use crate::topology::element_type::ElementType;

pub const QUAD_TRIANGLES: [[usize; 3]; 2] = [[0, 1, 2], [0, 2, 3]];
pub const HEX_PRISMS: [[usize; 6]; 2] = [[0, 2, 1, 4, 6, 5], [4, 6, 7, 0, 2, 3]];
pub const PRISM_TETS: [[usize; 4]; 3] = [[0, 1, 2, 3], [3, 2, 4, 5], [2, 1, 3, 4]];
pub const PYRAMID_TETS: [[usize; 4]; 2] = [[0, 1, 2, 4], [0, 2, 3, 4]];

/// Simplices covering `element`, before orientation and content checks.
pub(crate) fn split(element: &Element) -> Result<Vec<Element>, ElementFailure> {
    let pieces = match element.element_type() {
        ElementType::Quad => QUAD_TRIANGLES
            .iter()
            .map(|l| element.sub_element(ElementType::Triangle, l))
            .collect(),
        ElementType::Pyramid => tets(element, &PYRAMID_TETS),
        ElementType::Prism => tets(element, &PRISM_TETS),
        ElementType::Hexahedron => HEX_PRISMS
            .iter()
            .flat_map(|l| tets(&element.sub_element(ElementType::Prism, l), &PRISM_TETS))
            .collect(),
        ty @ (ElementType::Line | ElementType::Triangle | ElementType::Tetrahedron) => {
            return Err(ElementFailure::NoSubdivisionRule(ty));
        }
    };
    Ok(pieces)
}

fn tets(element: &Element, local: &[[usize; 4]]) -> Vec<Element> {
    local
        .iter()
        .map(|l| element.sub_element(ElementType::Tetrahedron, l))
        .collect()
}

/// Subdivide `element` and emit the non-degenerate pieces.
pub(crate) fn subdivide(element: &Element, sink: &mut ElementSink<'_>) -> Result<(), ElementFailure> {
    let pieces = split(element)?;
    log::debug!(
        "subdividing {} into {} pieces",
        element.element_type(),
        pieces.len()
    );
    sink.emit_all(pieces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::node::NodeId;

    fn ids<const N: usize>(raw: [usize; N]) -> [NodeId; N] {
        raw.map(NodeId::new)
    }

    #[test]
    fn quad_splits_along_diagonal_0_2() {
        let quad = Element::quad(ids([10, 11, 12, 13]), 7);
        let tris = split(&quad).unwrap();
        assert_eq!(tris.len(), 2);
        assert_eq!(tris[0].nodes(), &ids([10, 11, 12]));
        assert_eq!(tris[1].nodes(), &ids([10, 12, 13]));
        assert!(tris.iter().all(|t| t.material() == 7));
    }

    #[test]
    fn hex_splits_into_six_tets() {
        let hex = Element::hex(ids([0, 1, 2, 3, 4, 5, 6, 7]), 0);
        let pieces = split(&hex).unwrap();
        assert_eq!(pieces.len(), 6);
        assert!(pieces.iter().all(|p| p.element_type() == ElementType::Tetrahedron));
        // first prism (0, 2, 1, 4, 6, 5), first tet (0, 1, 2, 3) of it
        assert_eq!(pieces[0].nodes(), &ids([0, 2, 1, 4]));
    }

    #[test]
    fn simplices_have_no_rule() {
        let tet = Element::tet(ids([0, 1, 2, 3]), 0);
        assert_eq!(
            split(&tet),
            Err(ElementFailure::NoSubdivisionRule(ElementType::Tetrahedron))
        );
    }
}
