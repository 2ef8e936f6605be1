use mesh_revision::geometry::validation::{element_content, validate_mesh};
use mesh_revision::prelude::*;

fn ids<const N: usize>(raw: [usize; N]) -> [NodeId; N] {
    raw.map(NodeId::new)
}

fn unit_cube_nodes() -> Vec<Node> {
    vec![
        Node::new(0.0, 0.0, 0.0),
        Node::new(1.0, 0.0, 0.0),
        Node::new(1.0, 1.0, 0.0),
        Node::new(0.0, 1.0, 0.0),
        Node::new(0.0, 0.0, 1.0),
        Node::new(1.0, 0.0, 1.0),
        Node::new(1.0, 1.0, 1.0),
        Node::new(0.0, 1.0, 1.0),
    ]
}

fn unit_hex(nodes: Vec<Node>) -> Mesh {
    let hex = Element::hex(ids([0, 1, 2, 3, 4, 5, 6, 7]), 7);
    Mesh::try_new("cube", nodes, vec![hex]).unwrap()
}

fn total_content(mesh: &Mesh) -> f64 {
    mesh.elements()
        .iter()
        .map(|e| element_content(e, mesh.nodes()))
        .sum()
}

#[test]
fn intact_hex_is_unchanged() {
    let mesh = unit_hex(unit_cube_nodes());
    let revised = MeshRevision::new(&mesh)
        .simplify_mesh("same", 0.5, 3)
        .unwrap()
        .expect("hex survives");
    assert_eq!(revised.nodes(), mesh.nodes());
    assert_eq!(revised.elements(), mesh.elements());
    assert_eq!(revised.name(), "same");
}

#[test]
fn hex_with_coincident_corners_splits_into_pyramid_and_prism() {
    let mut nodes = unit_cube_nodes();
    nodes[1] = Node::new(0.0, 0.0, 0.0);
    let mesh = unit_hex(nodes);

    let report = MeshRevision::new(&mesh)
        .simplify_mesh_with_report("split", 1e-6, 3)
        .unwrap();
    assert!(report.diagnostics.is_empty());
    let revised = report.mesh.expect("cells survive");

    assert_eq!(revised.n_nodes(), 7);
    let types: Vec<_> = revised.elements().iter().map(Element::element_type).collect();
    assert_eq!(types, vec![ElementType::Pyramid, ElementType::Prism]);
    assert!(revised.elements().iter().all(|e| e.material() == 7));

    let validation = validate_mesh(&revised);
    assert!(validation.is_valid(), "{validation:?}");
    assert_eq!(validation.unused_nodes, 0);
    assert!((total_content(&revised) - 5.0 / 6.0).abs() < 1e-12);
}

#[test]
fn collapsed_quad_honours_the_dimension_floor() {
    let nodes = vec![
        Node::new(0.0, 0.0, 0.0),
        Node::new(1.0, 0.0, 0.0),
        Node::new(1.0, 0.0, 0.0),
        Node::new(0.0, 1.0, 0.0),
    ];
    let quad = Element::quad(ids([0, 1, 2, 3]), 0);
    let mesh = Mesh::try_new("quad", nodes, vec![quad]).unwrap();
    let revision = MeshRevision::new(&mesh);

    let tri = revision.simplify_mesh("tri", 1e-8, 2).unwrap().unwrap();
    assert_eq!(tri.n_elements(), 1);
    assert_eq!(tri.elements()[0].element_type(), ElementType::Triangle);
    assert_eq!(tri.elements()[0].nodes(), &ids([0, 1, 2]));

    let report = revision.simplify_mesh_with_report("none", 1e-8, 3).unwrap();
    assert_eq!(report.mesh, None);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn warped_quad_is_subdivided_along_the_first_diagonal() {
    let nodes = vec![
        Node::new(0.0, 0.0, 0.0),
        Node::new(1.0, 0.0, 0.0),
        Node::new(1.0, 1.0, 0.5),
        Node::new(0.0, 1.0, 0.0),
    ];
    let quad = Element::quad(ids([0, 1, 2, 3]), 4);
    let mesh = Mesh::try_new("warped", nodes, vec![quad]).unwrap();

    let out = MeshRevision::new(&mesh)
        .subdivide_mesh("tris")
        .unwrap()
        .unwrap();
    assert_eq!(out.n_nodes(), 4);
    assert_eq!(out.n_elements(), 2);
    for tri in out.elements() {
        assert_eq!(tri.element_type(), ElementType::Triangle);
        assert_eq!(tri.material(), 4);
        assert!(tri.local_index(NodeId::new(0)).is_some());
        assert!(tri.local_index(NodeId::new(2)).is_some());
    }
}

#[test]
fn planar_elements_pass_through_subdivision() {
    let mesh = regular_hex_mesh(2, 1, 1, 1.0, [0.0; 3], MeshGenOptions::default()).unwrap();
    let out = MeshRevision::new(&mesh).subdivide_mesh("same").unwrap().unwrap();
    assert_eq!(out.elements(), mesh.elements());
}

#[test]
fn nodes_exactly_eps_apart_stay_separate() {
    let nodes = vec![
        Node::new(0.0, 0.0, 0.0),
        Node::new(0.5, 0.0, 0.0),
        Node::new(0.0, 1.0, 0.0),
    ];
    let tri = Element::tri(ids([0, 1, 2]), 0);
    let mesh = Mesh::try_new("tri", nodes, vec![tri]).unwrap();
    let revision = MeshRevision::new(&mesh);

    assert_eq!(revision.collapsible_node_count(0.5).unwrap(), 0);
    let same = revision.simplify_mesh("same", 0.5, 2).unwrap().unwrap();
    assert_eq!(same.n_nodes(), 3);
    assert_eq!(same.elements(), mesh.elements());

    assert_eq!(revision.collapsible_node_count(0.5 + 1e-9).unwrap(), 1);
}

#[test]
fn neighbouring_blocks_are_welded() {
    let left = regular_hex_mesh(1, 1, 1, 1.0, [0.0; 3], MeshGenOptions::default()).unwrap();
    let right = regular_hex_mesh(1, 1, 1, 1.0, [1.0, 0.0, 0.0], MeshGenOptions::default()).unwrap();

    let mut nodes = left.nodes().to_vec();
    nodes.extend_from_slice(right.nodes());
    let mut elements = left.elements().to_vec();
    elements.extend(
        right
            .elements()
            .iter()
            .map(|e| e.remapped(|id| NodeId::new(id.index() + 8))),
    );
    let mesh = Mesh::try_new("two", nodes, elements).unwrap();

    let welded = MeshRevision::new(&mesh).collapse_nodes("welded", 1e-6).unwrap();
    assert_eq!(welded.n_nodes(), 12);
    assert_eq!(welded.n_elements(), 2);
    assert!(validate_mesh(&welded).is_valid());
}

#[test]
fn unresolvable_elements_are_reported_and_the_rest_kept() {
    let mut nodes = unit_cube_nodes();
    // a second cube whose corner 2 lands on corner 0: a diagonal collapse
    nodes.extend(unit_cube_nodes().into_iter().map(|p| {
        let [x, y, z] = p.coords();
        Node::new(x + 2.0, y, z)
    }));
    nodes[8 + 2] = nodes[8];
    let elements = vec![
        Element::hex(ids([0, 1, 2, 3, 4, 5, 6, 7]), 0),
        Element::hex(ids([8, 9, 10, 11, 12, 13, 14, 15]), 1),
    ];
    let mesh = Mesh::try_new("pair", nodes, elements).unwrap();

    let report = MeshRevision::new(&mesh)
        .simplify_mesh_with_report("kept", 1e-6, 3)
        .unwrap();
    assert_eq!(report.diagnostics.len(), 1);
    let diagnostic = &report.diagnostics[0];
    assert_eq!(diagnostic.element_index, 1);
    assert_eq!(
        diagnostic.failure,
        ElementFailure::NotAnEdge { first: 0, second: 2 }
    );
    assert!(diagnostic.to_string().starts_with("element 1: "));

    let kept = report.mesh.unwrap();
    assert_eq!(kept.n_elements(), 1);
    assert_eq!(kept.elements()[0].material(), 0);
    // compaction keeps every surviving node, even those no element uses
    assert_eq!(kept.n_nodes(), 15);
    assert_eq!(validate_mesh(&kept).unused_nodes, 7);
}

#[test]
fn empty_mesh_yields_nothing() {
    let mesh = Mesh::try_new("empty", vec![Node::new(0.0, 0.0, 0.0)], Vec::new()).unwrap();
    let revision = MeshRevision::new(&mesh);
    assert_eq!(revision.simplify_mesh("x", 0.1, 1).unwrap(), None);
    assert_eq!(revision.subdivide_mesh("x").unwrap(), None);
}

#[test]
fn squashed_layer_becomes_quads_or_disappears() {
    let block = regular_hex_mesh(2, 2, 2, 1.0, [0.0; 3], MeshGenOptions::default()).unwrap();
    let (name, nodes, elements) = block.into_parts();
    let nodes = nodes
        .into_iter()
        .map(|p| {
            let [x, y, z] = p.coords();
            Node::new(x, y, z.min(1.0))
        })
        .collect();
    let mesh = Mesh::try_new(name, nodes, elements).unwrap();
    let revision = MeshRevision::new(&mesh);
    assert_eq!(revision.collapsible_node_count(1e-6).unwrap(), 9);

    let cells = revision.simplify_mesh("cells", 1e-6, 3).unwrap().unwrap();
    assert_eq!(cells.n_nodes(), 18);
    assert_eq!(cells.n_elements(), 4);
    assert!(validate_mesh(&cells).is_valid());

    let mixed = revision.simplify_mesh("mixed", 1e-6, 2).unwrap().unwrap();
    let counts = mixed.element_type_counts();
    assert_eq!(counts.get(&ElementType::Hexahedron), Some(&4));
    assert_eq!(counts.get(&ElementType::Quad), Some(&4));
    assert_eq!(mixed.dimension(), 3);
}
