//! Cellular-automaton smoothing.
//!
//! Each pass rewrites every cell from its 8-neighbourhood wall count in
//! the pre-pass grid: more than 4 walls becomes Wall, fewer than 4
//! becomes Floor, exactly 4 stays as it was. Reading the pre-pass
//! snapshot matters; updating in place would let a cell see neighbours
//! already rewritten this pass.

use crate::grid::{Grid, Tile};

/// Run `iterations` smoothing passes over the grid.
pub fn smooth(grid: &mut Grid, iterations: u32) {
    for _ in 0..iterations {
        smooth_pass(grid);
    }
}

/// One double-buffered smoothing pass.
fn smooth_pass(grid: &mut Grid) {
    let snapshot = grid.clone();
    for y in 0..grid.height {
        for x in 0..grid.width {
            let walls = snapshot.wall_neighbour_count(x, y);
            if walls > 4 {
                grid.set(x, y, Tile::Wall);
            } else if walls < 4 {
                grid.set(x, y, Tile::Floor);
            }
        }
    }
    // The out-of-bounds-counts-as-wall rule already keeps a wall border
    // stable, but an externally edited grid may arrive without one.
    grid.seal_border();
}
