//! Marching-squares triangulation of the tile grid.
//!
//! The grid is lifted onto a dual grid: one control node per cell
//! (active when the cell is a wall) plus midpoint nodes halfway to the
//! next row ("above") and next column ("right"). Midpoints sit between
//! two cells and are shared by the squares on both sides, so they live
//! in a single arena addressed by typed ids rather than being allocated
//! per square. Each square's 4-bit corner configuration selects one of
//! the 16 classic contour cases; vertex indices are handed out the
//! first time a node is referenced, which deduplicates shared midpoints
//! and keeps the mesh watertight.

use serde::{Deserialize, Serialize};

use crate::grid::{Coord, Grid, Tile};

/// Triangulated surface: vertex positions plus index triples with a
/// consistent winding. Normals are left to the consumer.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshBuffer {
    pub vertices: Vec<[f32; 3]>,
    /// Flat triangle list; length is always a multiple of 3.
    pub triangles: Vec<u32>,
}

impl MeshBuffer {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }
}

/// Map a grid cell to the world-space position of its control node.
///
/// The mesh is centred on the origin in the XZ plane, one cell per
/// `square_size` units, Y up.
pub fn coord_to_world(coord: Coord, width: usize, height: usize, square_size: f32) -> [f32; 3] {
    let map_width = width as f32 * square_size;
    let map_height = height as f32 * square_size;
    [
        -map_width / 2.0 + coord.x as f32 * square_size + square_size / 2.0,
        0.0,
        -map_height / 2.0 + coord.y as f32 * square_size + square_size / 2.0,
    ]
}

/// A node in the dual grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum NodeId {
    /// Cell-centre control node.
    Control(usize, usize),
    /// Midpoint between a cell and the next row.
    Above(usize, usize),
    /// Midpoint between a cell and the next column.
    Right(usize, usize),
}

/// One marching square: four corner control nodes and the four shared
/// edge midpoints, with the corner configuration already computed.
struct SquareNodes {
    top_left: NodeId,
    top_right: NodeId,
    bottom_right: NodeId,
    bottom_left: NodeId,
    centre_top: NodeId,
    centre_right: NodeId,
    centre_bottom: NodeId,
    centre_left: NodeId,
    configuration: u8,
}

impl SquareNodes {
    /// Square (x, y) spans cells (x, y) and (x+1, y+1); the higher row
    /// is "top". Midpoints are named from the owning cell, which is how
    /// neighbouring squares end up referencing the same node.
    fn new(grid: &Grid, x: usize, y: usize) -> Self {
        let active = |cx: usize, cy: usize| grid.get(cx, cy) == Tile::Wall;

        let mut configuration = 0;
        if active(x, y + 1) {
            configuration += 8;
        }
        if active(x + 1, y + 1) {
            configuration += 4;
        }
        if active(x + 1, y) {
            configuration += 2;
        }
        if active(x, y) {
            configuration += 1;
        }

        Self {
            top_left: NodeId::Control(x, y + 1),
            top_right: NodeId::Control(x + 1, y + 1),
            bottom_right: NodeId::Control(x + 1, y),
            bottom_left: NodeId::Control(x, y),
            centre_top: NodeId::Right(x, y + 1),
            centre_right: NodeId::Above(x + 1, y),
            centre_bottom: NodeId::Right(x, y),
            centre_left: NodeId::Above(x, y),
            configuration,
        }
    }
}

/// Convert the final grid into a mesh. The grid is read-only here; all
/// carving is finished before triangulation starts.
pub fn triangulate(grid: &Grid, square_size: f32) -> MeshBuffer {
    let mut tri = Triangulator::new(grid, square_size);
    for x in 0..grid.width - 1 {
        for y in 0..grid.height - 1 {
            tri.triangulate_square(SquareNodes::new(grid, x, y));
        }
    }
    tri.finish()
}

struct Triangulator<'a> {
    grid: &'a Grid,
    square_size: f32,
    /// Lazily assigned vertex index per node; shared nodes are assigned
    /// exactly once.
    vertex_index: std::collections::HashMap<NodeId, u32>,
    mesh: MeshBuffer,
}

impl<'a> Triangulator<'a> {
    fn new(grid: &'a Grid, square_size: f32) -> Self {
        Self {
            grid,
            square_size,
            vertex_index: std::collections::HashMap::new(),
            mesh: MeshBuffer::default(),
        }
    }

    fn node_position(&self, node: NodeId) -> [f32; 3] {
        let half = self.square_size / 2.0;
        let (x, y, dx, dz) = match node {
            NodeId::Control(x, y) => (x, y, 0.0, 0.0),
            NodeId::Above(x, y) => (x, y, 0.0, half),
            NodeId::Right(x, y) => (x, y, half, 0.0),
        };
        let base = coord_to_world(
            Coord::new(x as i32, y as i32),
            self.grid.width,
            self.grid.height,
            self.square_size,
        );
        [base[0] + dx, base[1], base[2] + dz]
    }

    fn assign_vertex(&mut self, node: NodeId) -> u32 {
        if let Some(&idx) = self.vertex_index.get(&node) {
            return idx;
        }
        let idx = self.mesh.vertices.len() as u32;
        let position = self.node_position(node);
        self.mesh.vertices.push(position);
        self.vertex_index.insert(node, idx);
        idx
    }

    /// Fan-triangulate an outline of 3 to 6 nodes from its first point.
    fn mesh_from_points(&mut self, points: &[NodeId]) {
        let indices: Vec<u32> = points.iter().map(|&p| self.assign_vertex(p)).collect();
        for i in 1..indices.len() - 1 {
            self.mesh.triangles.push(indices[0]);
            self.mesh.triangles.push(indices[i]);
            self.mesh.triangles.push(indices[i + 1]);
        }
    }

    fn triangulate_square(&mut self, sq: SquareNodes) {
        match sq.configuration {
            0 => {}

            // Single active corner.
            1 => self.mesh_from_points(&[sq.centre_bottom, sq.bottom_left, sq.centre_left]),
            2 => self.mesh_from_points(&[sq.centre_right, sq.bottom_right, sq.centre_bottom]),
            4 => self.mesh_from_points(&[sq.centre_top, sq.top_right, sq.centre_right]),
            8 => self.mesh_from_points(&[sq.top_left, sq.centre_top, sq.centre_left]),

            // Two adjacent corners.
            3 => self.mesh_from_points(&[
                sq.centre_right,
                sq.bottom_right,
                sq.bottom_left,
                sq.centre_left,
            ]),
            6 => self.mesh_from_points(&[
                sq.centre_top,
                sq.top_right,
                sq.bottom_right,
                sq.centre_bottom,
            ]),
            9 => self.mesh_from_points(&[
                sq.top_left,
                sq.centre_top,
                sq.centre_bottom,
                sq.bottom_left,
            ]),
            12 => self.mesh_from_points(&[
                sq.top_left,
                sq.top_right,
                sq.centre_right,
                sq.centre_left,
            ]),

            // Diagonally opposite corners.
            5 => self.mesh_from_points(&[
                sq.centre_top,
                sq.top_right,
                sq.centre_right,
                sq.centre_bottom,
                sq.bottom_left,
                sq.centre_left,
            ]),
            10 => self.mesh_from_points(&[
                sq.top_left,
                sq.centre_top,
                sq.centre_right,
                sq.bottom_right,
                sq.centre_bottom,
                sq.centre_left,
            ]),

            // Three active corners.
            7 => self.mesh_from_points(&[
                sq.centre_top,
                sq.top_right,
                sq.bottom_right,
                sq.bottom_left,
                sq.centre_left,
            ]),
            11 => self.mesh_from_points(&[
                sq.top_left,
                sq.centre_top,
                sq.centre_right,
                sq.bottom_right,
                sq.bottom_left,
            ]),
            13 => self.mesh_from_points(&[
                sq.top_left,
                sq.top_right,
                sq.centre_right,
                sq.centre_bottom,
                sq.bottom_left,
            ]),
            14 => self.mesh_from_points(&[
                sq.top_left,
                sq.top_right,
                sq.bottom_right,
                sq.centre_bottom,
                sq.centre_left,
            ]),

            // Full square.
            15 => self.mesh_from_points(&[
                sq.top_left,
                sq.top_right,
                sq.bottom_right,
                sq.bottom_left,
            ]),

            _ => unreachable!("4-bit configuration out of range"),
        }
    }

    fn finish(self) -> MeshBuffer {
        self.mesh
    }
}
