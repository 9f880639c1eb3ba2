//! File exports for tooling and downstream consumers.
//!
//! The grid overlay PNG and the passage segments are debug aids; the
//! OBJ and JSON outputs are the actual mesh handoff for engines that
//! load files rather than linking the library.

use std::fs::File;
use std::io::{BufWriter, Write};

use image::{Rgb, RgbImage};
use serde::Serialize;

use crate::cave::{CaveMap, PassageSegment};
use crate::error::Result;
use crate::grid::{Grid, Tile};
use crate::mesh::MeshBuffer;

const WALL_COLOR: Rgb<u8> = Rgb([52, 42, 36]);
const FLOOR_COLOR: Rgb<u8> = Rgb([222, 214, 196]);

/// Export the tile grid as a PNG overlay, one pixel per cell.
pub fn export_grid_png(grid: &Grid, path: &str) -> Result<()> {
    let img = RgbImage::from_fn(grid.width as u32, grid.height as u32, |x, y| {
        match grid.get(x as usize, y as usize) {
            Tile::Wall => WALL_COLOR,
            Tile::Floor => FLOOR_COLOR,
        }
    });
    img.save(path)?;
    Ok(())
}

/// Export the mesh as Wavefront OBJ (1-based face indices).
pub fn export_mesh_obj(mesh: &MeshBuffer, path: &str) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "o cave")?;
    for v in &mesh.vertices {
        writeln!(out, "v {} {} {}", v[0], v[1], v[2])?;
    }
    for tri in mesh.triangles.chunks_exact(3) {
        writeln!(out, "f {} {} {}", tri[0] + 1, tri[1] + 1, tri[2] + 1)?;
    }
    out.flush()?;
    Ok(())
}

/// JSON-friendly view of a generated map.
#[derive(Serialize)]
struct MapReport<'a> {
    seed_string: &'a str,
    seed: u64,
    width: usize,
    height: usize,
    room_sizes: Vec<usize>,
    main_room_size: usize,
    passages: &'a [PassageSegment],
    mesh: &'a MeshBuffer,
}

/// Export the full map (summary, passages, mesh) as JSON.
pub fn export_map_json(map: &CaveMap, path: &str) -> Result<()> {
    let report = MapReport {
        seed_string: &map.seed_string,
        seed: map.seed,
        width: map.grid.width,
        height: map.grid.height,
        room_sizes: map.rooms.iter().map(|r| r.size).collect(),
        main_room_size: map.main_room().size,
        passages: &map.passages,
        mesh: &map.mesh,
    };
    let out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(out, &report)?;
    Ok(())
}
