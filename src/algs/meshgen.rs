//! Basic generators for regular line, quad and hex meshes.

use crate::mesh::Mesh;
use crate::mesh_error::MeshError;
use crate::topology::element::Element;
use crate::topology::node::{Node, NodeId};

/// Optional metadata for mesh generators.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MeshGenOptions {
    /// Name of the generated mesh.
    pub name: String,
    /// Material assigned to every generated element.
    pub material: u32,
}

impl Default for MeshGenOptions {
    fn default() -> Self {
        Self {
            name: "mesh".to_string(),
            material: 0,
        }
    }
}

type MeshGenResult = Result<Mesh, MeshError>;

fn invalid_geometry(message: impl Into<String>) -> MeshError {
    MeshError::InvalidGeometry(message.into())
}

fn check_cell_size(cell_size: f64, origin: [f64; 3]) -> Result<(), MeshError> {
    if !cell_size.is_finite() || cell_size <= 0.0 {
        return Err(invalid_geometry(format!(
            "cell size must be positive and finite, got {cell_size}"
        )));
    }
    if origin.iter().any(|c| !c.is_finite()) {
        return Err(invalid_geometry(format!("origin {origin:?} is not finite")));
    }
    Ok(())
}

fn build_mesh<const N: usize>(
    options: MeshGenOptions,
    nodes: Vec<Node>,
    cells: Vec<[usize; N]>,
    make: fn([NodeId; N], u32) -> Element,
) -> MeshGenResult {
    let elements = cells
        .into_iter()
        .map(|cell| make(cell.map(NodeId::new), options.material))
        .collect();
    Mesh::try_new(options.name, nodes, elements)
}

/// `n_cells` Lines along x starting at `origin`.
pub fn line_mesh(
    n_cells: usize,
    cell_size: f64,
    origin: [f64; 3],
    options: MeshGenOptions,
) -> MeshGenResult {
    if n_cells == 0 {
        return Err(invalid_geometry("n_cells must be positive"));
    }
    check_cell_size(cell_size, origin)?;
    let nodes = (0..=n_cells)
        .map(|i| Node::new(origin[0] + cell_size * i as f64, origin[1], origin[2]))
        .collect();
    let cells = (0..n_cells).map(|i| [i, i + 1]).collect();
    build_mesh(options, nodes, cells, Element::line)
}

/// `nx`×`ny` Quads in the xy-plane at height `origin[2]`, nodes row-major.
pub fn regular_quad_mesh(
    nx: usize,
    ny: usize,
    cell_size: f64,
    origin: [f64; 3],
    options: MeshGenOptions,
) -> MeshGenResult {
    if nx == 0 || ny == 0 {
        return Err(invalid_geometry("nx and ny must be positive"));
    }
    check_cell_size(cell_size, origin)?;

    let mut nodes = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        let y = origin[1] + cell_size * j as f64;
        for i in 0..=nx {
            let x = origin[0] + cell_size * i as f64;
            nodes.push(Node::new(x, y, origin[2]));
        }
    }

    let row_stride = nx + 1;
    let mut cells = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            let v0 = j * row_stride + i;
            cells.push([v0, v0 + 1, v0 + 1 + row_stride, v0 + row_stride]);
        }
    }
    build_mesh(options, nodes, cells, Element::quad)
}

/// `nx`×`ny`×`nz` Hexahedra, nodes ordered z-major then y then x.
pub fn regular_hex_mesh(
    nx: usize,
    ny: usize,
    nz: usize,
    cell_size: f64,
    origin: [f64; 3],
    options: MeshGenOptions,
) -> MeshGenResult {
    if nx == 0 || ny == 0 || nz == 0 {
        return Err(invalid_geometry("nx, ny, and nz must be positive"));
    }
    check_cell_size(cell_size, origin)?;

    let mut nodes = Vec::with_capacity((nx + 1) * (ny + 1) * (nz + 1));
    for k in 0..=nz {
        let z = origin[2] + cell_size * k as f64;
        for j in 0..=ny {
            let y = origin[1] + cell_size * j as f64;
            for i in 0..=nx {
                let x = origin[0] + cell_size * i as f64;
                nodes.push(Node::new(x, y, z));
            }
        }
    }

    let row_stride = nx + 1;
    let slab_stride = row_stride * (ny + 1);
    let mut cells = Vec::with_capacity(nx * ny * nz);
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let v0 = k * slab_stride + j * row_stride + i;
                let v1 = v0 + 1;
                let v3 = v0 + row_stride;
                let v2 = v3 + 1;
                let v4 = v0 + slab_stride;
                let v5 = v4 + 1;
                let v7 = v4 + row_stride;
                let v6 = v7 + 1;
                cells.push([v0, v1, v2, v3, v4, v5, v6, v7]);
            }
        }
    }
    build_mesh(options, nodes, cells, Element::hex)
}
