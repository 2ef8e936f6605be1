use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use mesh_revision::algs::meshgen::{MeshGenOptions, regular_hex_mesh};
use mesh_revision::mesh::Mesh;
use mesh_revision::revision::MeshRevision;
use mesh_revision::topology::element::Element;
use mesh_revision::topology::node::{Node, NodeId};

/// A `n`×`n`×`n` hex block whose elements carry private copies of their
/// corner nodes, so every interior node is duplicated up to eight times.
fn unwelded_block(n: usize) -> Mesh {
    let block = regular_hex_mesh(n, n, n, 1.0, [0.0; 3], MeshGenOptions::default())
        .expect("valid block");
    let mut nodes: Vec<Node> = Vec::with_capacity(block.n_elements() * 8);
    let mut elements = Vec::with_capacity(block.n_elements());
    for element in block.elements() {
        let ids = (nodes.len()..nodes.len() + 8).map(NodeId::new).collect();
        nodes.extend(element.nodes().iter().map(|&id| block.nodes()[id.index()]));
        elements.push(
            Element::try_new(element.element_type(), ids, element.material())
                .expect("hex has eight nodes"),
        );
    }
    Mesh::try_new("unwelded", nodes, elements).expect("valid mesh")
}

/// Squash the top layer of a hex block onto the layer below it.
fn squashed_block(n: usize) -> Mesh {
    let block = regular_hex_mesh(n, n, n, 1.0, [0.0; 3], MeshGenOptions::default())
        .expect("valid block");
    let top = n as f64;
    let (name, nodes, elements): (_, Vec<Node>, Vec<Element>) = block.into_parts();
    let nodes = nodes
        .into_iter()
        .map(|p| {
            let [x, y, z] = p.coords();
            Node::new(x, y, if z == top { top - 1.0 } else { z })
        })
        .collect();
    Mesh::try_new(name, nodes, elements).expect("valid mesh")
}

fn bench_revision(c: &mut Criterion) {
    let mut group = c.benchmark_group("revision");

    for &n in &[8usize, 16usize] {
        let unwelded = unwelded_block(n);
        group.bench_with_input(BenchmarkId::new("collapse_nodes", n), &n, |b, _| {
            b.iter(|| {
                let out = MeshRevision::new(&unwelded).collapse_nodes("welded", 1e-6);
                black_box(out).expect("collapse");
            });
        });

        let squashed = squashed_block(n);
        group.bench_with_input(BenchmarkId::new("simplify_mesh", n), &n, |b, _| {
            b.iter(|| {
                let out = MeshRevision::new(&squashed).simplify_mesh("simplified", 1e-6, 2);
                black_box(out).expect("simplify");
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_revision);
criterion_main!(benches);
