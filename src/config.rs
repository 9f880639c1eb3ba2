//! Generation parameters.

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};

/// All knobs for a single map generation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapConfig {
    /// Map width in tiles.
    pub width: usize,
    /// Map height in tiles.
    pub height: usize,
    /// Chance (0-100) that an interior cell starts as Wall.
    pub fill_percentage: u32,
    /// Number of cellular-automaton smoothing passes.
    pub smoothing_iterations: u32,
    /// Wall regions smaller than this are opened into floor.
    pub wall_size_minimum: usize,
    /// Floor regions smaller than this are filled back in.
    pub room_size_minimum: usize,
    /// Seed string; hashed to generator state.
    pub seed: String,
    /// Replace the seed with one derived from the wall clock.
    pub use_random_seed: bool,
    /// World-space size of one grid cell in the output mesh.
    pub square_size: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 72,
            fill_percentage: 45,
            smoothing_iterations: 5,
            wall_size_minimum: 50,
            room_size_minimum: 50,
            seed: String::new(),
            use_random_seed: false,
            square_size: 1.0,
        }
    }
}

impl MapConfig {
    /// Reject configurations before any grid is allocated.
    ///
    /// Widths or heights below 3 leave no interior cell and no marching
    /// squares, so there is nothing meaningful to generate.
    pub fn validate(&self) -> Result<()> {
        if self.width < 3 || self.height < 3 {
            return Err(MapError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.fill_percentage > 100 {
            return Err(MapError::InvalidFillPercentage(self.fill_percentage));
        }
        Ok(())
    }
}
