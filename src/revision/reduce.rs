//! Degeneracy classification and reduction of collapsed elements.
//!
//! An element whose node list repeats ids after collapse is replaced by one
//! or more lower-order elements over its distinct nodes. Reducers are looked
//! up by element type and distinct node count.

use super::lut::{
    hex_back_nodes, hex_cutting_quad_nodes, hex_diametral_node, hex_partner_node, prism_third_node,
};
use super::subdivide::{split, subdivide};
use super::{ElementFailure, ElementSink};
use crate::geometry::predicates::is_coplanar;
use crate::geometry::validation::{ElementErrorFlag, validate_element};
use crate::topology::element::Element;
use crate::topology::element_type::ElementType;
use crate::topology::node::NodeId;

/// Where an element handed to [`revise`] comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Origin {
    /// Taken from the source mesh; kept verbatim when intact.
    Source,
    /// Built by a reducer; orientation is normalized on output.
    Constructed,
}

type Reducer = fn(&Element, u8, &mut ElementSink<'_>) -> Result<(), ElementFailure>;

/// Reduction table keyed by element type and number of distinct nodes.
fn reducer(element_type: ElementType, n_unique: usize) -> Option<Reducer> {
    use ElementType::*;
    let reducer: Reducer = match (element_type, n_unique) {
        (Triangle | Quad | Tetrahedron | Pyramid | Prism | Hexahedron, 2) => reduce_to_line,
        (Quad | Tetrahedron | Pyramid | Prism | Hexahedron, 3) => reduce_to_tri,
        (Pyramid | Prism | Hexahedron, 4) => reduce_to_four_node_element,
        (Prism, 5) => reduce_prism_5,
        (Hexahedron, 5) => reduce_hex_5,
        (Hexahedron, 6) => reduce_hex_6,
        (Hexahedron, 7) => reduce_hex_7,
        _ => return None,
    };
    Some(reducer)
}

/// Revise one element whose node ids already refer to the collapsed node set.
///
/// `floor` is the minimum dimension of surviving elements.
pub(crate) fn revise(
    element: &Element,
    floor: u8,
    origin: Origin,
    sink: &mut ElementSink<'_>,
) -> Result<(), ElementFailure> {
    let n_unique = element.n_unique_nodes();
    if n_unique == element.n_nodes() {
        if element.dimension() < floor {
            log::debug!("dropping {} below dimension {floor}", element.element_type());
            return Ok(());
        }
        let errors = validate_element(element, sink.nodes());
        if errors.contains(ElementErrorFlag::NonCoplanar) {
            return subdivide(element, sink);
        }
        match origin {
            Origin::Source => sink.push(element.clone()),
            Origin::Constructed => sink.emit_all([element.clone()])?,
        }
        return Ok(());
    }
    if n_unique <= 1 {
        log::warn!(
            "{} collapsed to {n_unique} distinct node(s) and vanishes",
            element.element_type()
        );
        return Ok(());
    }
    let reduce = reducer(element.element_type(), n_unique).ok_or(
        ElementFailure::UnsupportedDistinctCount {
            element_type: element.element_type(),
            distinct: n_unique,
        },
    )?;
    log::debug!(
        "reducing {} with {n_unique} distinct nodes",
        element.element_type()
    );
    reduce(element, floor, sink)
}

/// First `N` distinct node ids in local order.
fn first_unique<const N: usize>(element: &Element) -> Result<[NodeId; N], ElementFailure> {
    let unique = element.unique_nodes();
    unique
        .get(..N)
        .and_then(|s| <[NodeId; N]>::try_from(s).ok())
        .ok_or(ElementFailure::UnsupportedDistinctCount {
            element_type: element.element_type(),
            distinct: unique.len(),
        })
}

/// First pair of local indices `start <= i < j < n` satisfying `pred`.
fn first_pair(n: usize, start: usize, pred: impl Fn(usize, usize) -> bool) -> Option<(usize, usize)> {
    (start..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .find(|&(i, j)| pred(i, j))
}

/// First pair of local indices `i < j` sharing a node id.
fn first_collapsed_pair(element: &Element) -> Option<(usize, usize)> {
    first_pair(element.n_nodes(), 0, |i, j| element.node(i) == element.node(j))
}

fn reduce_to_line(element: &Element, floor: u8, sink: &mut ElementSink<'_>) -> Result<(), ElementFailure> {
    if floor > 1 {
        return Ok(());
    }
    let nodes = first_unique::<2>(element)?;
    sink.emit_all([Element::line(nodes, element.material())])
}

fn reduce_to_tri(element: &Element, floor: u8, sink: &mut ElementSink<'_>) -> Result<(), ElementFailure> {
    if floor > 2 {
        return Ok(());
    }
    let nodes = first_unique::<3>(element)?;
    sink.emit_all([Element::tri(nodes, element.material())])
}

const QUAD_ORDERS: [[usize; 4]; 3] = [[0, 1, 2, 3], [0, 2, 1, 3], [0, 2, 3, 1]];

/// Tet over four distinct nodes, or a valid quad if they are coplanar.
///
/// Returns `Ok(None)` for coplanar nodes when `floor` excludes 2D output.
fn four_node_element(
    nodes: [NodeId; 4],
    material: u32,
    floor: u8,
    sink: &ElementSink<'_>,
) -> Result<Option<Element>, ElementFailure> {
    let [a, b, c, d] = nodes.map(|id| sink.coords(id));
    if !is_coplanar(a, b, c, d) {
        return Ok(Some(Element::tet(nodes, material)));
    }
    if floor > 2 {
        return Ok(None);
    }
    valid_quad(nodes, material, sink).map(Some)
}

/// First ordering of four coplanar nodes that forms a defect-free quad.
fn valid_quad(
    nodes: [NodeId; 4],
    material: u32,
    sink: &ElementSink<'_>,
) -> Result<Element, ElementFailure> {
    QUAD_ORDERS
        .iter()
        .map(|order| Element::quad(order.map(|i| nodes[i]), material))
        .find(|quad| validate_element(quad, sink.nodes()).none())
        .ok_or(ElementFailure::NoValidQuadOrder)
}

fn reduce_to_four_node_element(
    element: &Element,
    floor: u8,
    sink: &mut ElementSink<'_>,
) -> Result<(), ElementFailure> {
    let nodes = first_unique::<4>(element)?;
    match four_node_element(nodes, element.material(), floor, sink)? {
        Some(reduced) => sink.emit_all([reduced]),
        None => Ok(()),
    }
}

fn reduce_prism_5(element: &Element, _floor: u8, sink: &mut ElementSink<'_>) -> Result<(), ElementFailure> {
    let (i, j) = first_collapsed_pair(element).ok_or(ElementFailure::UnsupportedDistinctCount {
        element_type: ElementType::Prism,
        distinct: 5,
    })?;
    let tet = |local: [usize; 4]| element.sub_element(ElementType::Tetrahedron, &local);
    if i % 3 == j % 3 {
        // lateral edge: pyramid over the opposite quad face
        let (a, b) = ((i + 1) % 3, (i + 2) % 3);
        return sink.emit_all([tet([a, b, i, a + 3]), tet([a + 3, b, i, b + 3])]);
    }
    let k = prism_third_node(i, j).ok_or(ElementFailure::NotAnEdge { first: i, second: j })?;
    let opposite = |x: usize| if i > 2 { x - 3 } else { x + 3 };
    let coords = |x: usize| sink.coords(element.node(x));
    let l = if is_coplanar(coords(opposite(i)), coords(opposite(k)), coords(i), coords(k)) {
        j
    } else {
        i
    };
    let pieces = [
        tet([opposite(i), opposite(j), opposite(k), i]),
        tet([opposite(l), opposite(k), i, k]),
    ];
    sink.emit_all(pieces)
}

fn reduce_hex_5(element: &Element, _floor: u8, sink: &mut ElementSink<'_>) -> Result<(), ElementFailure> {
    let unique = first_unique::<5>(element)?;
    let (base, apex) = pyramid_base(unique, sink).ok_or(ElementFailure::NoPyramidBase)?;
    let quad = valid_quad(base, element.material(), sink)?;
    let [q0, q1, q2, q3] = [0, 1, 2, 3].map(|i| quad.node(i));
    let material = element.material();
    sink.emit_all([
        Element::tet([q0, q1, q2, apex], material),
        Element::tet([q0, q2, q3, apex], material),
    ])
}

/// Four coplanar nodes among `nodes` and the remaining apex, trying later
/// apexes first.
fn pyramid_base(nodes: [NodeId; 5], sink: &ElementSink<'_>) -> Option<([NodeId; 4], NodeId)> {
    (0..5).rev().find_map(|apex| {
        let mut base = [nodes[0]; 4];
        let others = nodes.iter().enumerate().filter(|&(i, _)| i != apex);
        for (slot, (_, &id)) in base.iter_mut().zip(others) {
            *slot = id;
        }
        let [a, b, c, d] = base.map(|id| sink.coords(id));
        is_coplanar(a, b, c, d).then_some((base, nodes[apex]))
    })
}

fn reduce_hex_6(element: &Element, floor: u8, sink: &mut ElementSink<'_>) -> Result<(), ElementFailure> {
    if let Some(prism) = hex_face_prism(element)? {
        return revise(&prism, floor, Origin::Constructed, sink);
    }

    let collapsed = |a: usize, b: usize| {
        ElementType::Hexahedron.is_edge(a, b) && element.node(a) == element.node(b)
    };
    let (i, j) =
        first_pair(8, 0, &collapsed).ok_or(ElementFailure::LookupMiss("collapsed hex edge"))?;
    let (k, l) = first_pair(8, i, |k, l| (k, l) != (i, j) && collapsed(k, l))
        .ok_or(ElementFailure::LookupMiss("second collapsed hex edge"))?;
    // a path of two collapsed edges through corner `m`
    if let Some(m) = [i, j].into_iter().find(|&x| x == k || x == l) {
        let a = if m == i { j } else { i };
        let b = if m == k { l } else { k };
        let pieces = hex_corner_pieces(element, a, m, b, sink)?;
        return sink.emit_all(pieces);
    }
    // disjoint collapsed edges: split along the back nodes
    let (b0, b1) = hex_back_nodes(i, j, k, l).ok_or(ElementFailure::LookupMiss("hex back nodes"))?;
    let c = hex_cutting_quad_nodes(b0, b1).ok_or(ElementFailure::LookupMiss("hex cutting quad"))?;
    let d = hex_diametral_node;
    let halves = [
        element.sub_element(ElementType::Prism, &[b0, c[0], c[3], b1, c[1], c[2]]),
        element.sub_element(ElementType::Prism, &[d(b1), c[0], c[3], d(b0), c[1], c[2]]),
    ];
    for half in &halves {
        revise(half, floor, Origin::Constructed, sink)?;
    }
    Ok(())
}

/// Pieces of a hex whose face corners `a`, `m` and `b` (with `m` between
/// the other two) collapsed into one point.
///
/// The result is the cone from that point over the opposite face and over the
/// two faces meeting at the diagonal corner `c` of the collapsed face. Pieces
/// lying flat in an original face have zero content and are skipped on emit.
fn hex_corner_pieces(
    element: &Element,
    a: usize,
    m: usize,
    b: usize,
    sink: &ElementSink<'_>,
) -> Result<Vec<Element>, ElementFailure> {
    let (face, corners) = ElementType::Hexahedron
        .faces()
        .iter()
        .enumerate()
        .find(|(_, f)| [a, m, b].iter().all(|x| f.contains(x)))
        .ok_or(ElementFailure::LookupMiss("hex face of collapsed corner"))?;
    let c = corners
        .iter()
        .copied()
        .find(|x| ![a, m, b].contains(x))
        .ok_or(ElementFailure::LookupMiss("hex face of collapsed corner"))?;
    let partner =
        |x: usize| hex_partner_node(face, x).ok_or(ElementFailure::LookupMiss("hex partner node"));
    let (pa, pm, pb, pc) = (partner(a)?, partner(m)?, partner(b)?, partner(c)?);

    let pyramid = element.sub_element(ElementType::Pyramid, &[pa, pm, pb, pc, m]);
    let mut pieces = if validate_element(&pyramid, sink.nodes()).contains(ElementErrorFlag::NonCoplanar) {
        split(&pyramid)?
    } else {
        vec![pyramid]
    };
    pieces.push(element.sub_element(ElementType::Tetrahedron, &[m, c, pc, pa]));
    pieces.push(element.sub_element(ElementType::Tetrahedron, &[m, c, pc, pb]));
    Ok(pieces)
}

/// Prism left over when one hex face collapses onto two points along a pair
/// of opposite face edges.
fn hex_face_prism(element: &Element) -> Result<Option<Element>, ElementFailure> {
    let id = |x: usize| element.node(x);
    for (face, corners) in ElementType::Hexahedron.faces().iter().enumerate() {
        let [l0, l1, l2, l3] = [corners[0], corners[1], corners[2], corners[3]];
        let partner = |x: usize| {
            hex_partner_node(face, x).ok_or(ElementFailure::LookupMiss("hex partner node"))
        };
        let local = if id(l0) == id(l1) && id(l2) == id(l3) {
            [l0, partner(l0)?, partner(l1)?, l3, partner(l3)?, partner(l2)?]
        } else if id(l0) == id(l3) && id(l1) == id(l2) {
            [l0, partner(l0)?, partner(l3)?, l1, partner(l1)?, partner(l2)?]
        } else {
            continue;
        };
        return Ok(Some(element.sub_element(ElementType::Prism, &local)));
    }
    Ok(None)
}

fn reduce_hex_7(element: &Element, _floor: u8, sink: &mut ElementSink<'_>) -> Result<(), ElementFailure> {
    let (i, j) = first_collapsed_pair(element).ok_or(ElementFailure::UnsupportedDistinctCount {
        element_type: ElementType::Hexahedron,
        distinct: 7,
    })?;
    if !ElementType::Hexahedron.is_edge(i, j) {
        return Err(ElementFailure::NotAnEdge { first: i, second: j });
    }
    let q = hex_cutting_quad_nodes(i, j).ok_or(ElementFailure::LookupMiss("hex cutting quad"))?;
    let d = hex_diametral_node;
    let pieces = [
        element.sub_element(ElementType::Pyramid, &[q[0], q[1], q[2], q[3], i]),
        element.sub_element(ElementType::Prism, &[q[0], q[3], d(j), q[1], q[2], d(i)]),
    ];
    sink.emit_all(pieces)
}
