//! Full generation pipeline and the bundled result.
//!
//! Runs the stages in order: seeded noise fill, cellular-automaton
//! smoothing, region pruning, room connection, marching-squares
//! triangulation. Everything a consumer or debug overlay needs comes
//! back in one `CaveMap`; re-running `generate` rebuilds from scratch.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::MapConfig;
use crate::error::{MapError, Result};
use crate::grid::{Grid, Tile};
use crate::mesh::{self, MeshBuffer};
use crate::noise;
use crate::regions;
use crate::rooms::{self, Room};
use crate::seeds;
use crate::smoothing;

/// World-space line segment between the endpoints of a carved corridor.
/// Auxiliary output for debug overlays.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PassageSegment {
    pub from: [f32; 3],
    pub to: [f32; 3],
}

/// All generated map data bundled together.
pub struct CaveMap {
    /// Seed string that was actually used (resolved from the clock in
    /// random mode), kept so a run can be replayed.
    pub seed_string: String,
    /// Hashed generator state derived from the seed string.
    pub seed: u64,
    /// Final tile grid, corridors included.
    pub grid: Grid,
    /// Room arena; index 0 is the main room.
    pub rooms: Vec<Room>,
    /// One segment per carved corridor.
    pub passages: Vec<PassageSegment>,
    /// Triangulated wall surface.
    pub mesh: MeshBuffer,
}

impl CaveMap {
    /// The main (largest) room.
    pub fn main_room(&self) -> &Room {
        &self.rooms[0]
    }
}

/// Generate a complete cave map from a configuration.
pub fn generate(config: &MapConfig) -> Result<CaveMap> {
    config.validate()?;

    let seed_string = if config.use_random_seed {
        seeds::random_seed_string()
    } else {
        config.seed.clone()
    };
    let seed = seeds::seed_from_string(&seed_string);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut grid = noise::generate(config.width, config.height, config.fill_percentage, &mut rng);
    smoothing::smooth(&mut grid, config.smoothing_iterations);

    regions::prune_regions(&mut grid, Tile::Wall, config.wall_size_minimum);
    let surviving = regions::prune_regions(&mut grid, Tile::Floor, config.room_size_minimum);
    if surviving.is_empty() {
        return Err(MapError::NoViableRooms);
    }

    let mut room_arena = rooms::build_rooms(surviving, &grid);
    let carved = rooms::connect_rooms(&mut grid, &mut room_arena, &mut rng);
    let passages = carved
        .into_iter()
        .map(|(a, b)| PassageSegment {
            from: mesh::coord_to_world(a, config.width, config.height, config.square_size),
            to: mesh::coord_to_world(b, config.width, config.height, config.square_size),
        })
        .collect();

    let mesh = mesh::triangulate(&grid, config.square_size);

    Ok(CaveMap {
        seed_string,
        seed,
        grid,
        rooms: room_arena,
        passages,
        mesh,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> MapConfig {
        MapConfig {
            width: 20,
            height: 20,
            fill_percentage: 45,
            smoothing_iterations: 5,
            wall_size_minimum: 50,
            room_size_minimum: 50,
            seed: "test".to_string(),
            use_random_seed: false,
            square_size: 1.0,
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = test_config();
        let a = generate(&config).unwrap();
        let b = generate(&config).unwrap();

        assert_eq!(a.seed, b.seed);
        assert!(a.grid == b.grid);
        assert_eq!(a.mesh, b.mesh);
        assert_eq!(a.rooms.len(), b.rooms.len());
        for (ra, rb) in a.rooms.iter().zip(&b.rooms) {
            assert_eq!(ra.tiles, rb.tiles);
            assert_eq!(ra.connected, rb.connected);
        }
        assert_eq!(a.passages, b.passages);
    }

    #[test]
    fn test_scenario_yields_main_room_and_mesh() {
        let map = generate(&test_config()).unwrap();
        assert!(map.main_room().is_main_room);
        assert!(!map.mesh.triangles.is_empty());
    }

    #[test]
    fn test_all_rooms_reach_main() {
        let config = MapConfig {
            width: 64,
            height: 48,
            room_size_minimum: 20,
            wall_size_minimum: 20,
            seed: "connectivity".to_string(),
            ..MapConfig::default()
        };
        let map = generate(&config).unwrap();
        assert!(map.rooms.iter().all(|r| r.is_accessible_from_main));
    }

    #[test]
    fn test_solid_map_has_no_viable_rooms() {
        let config = MapConfig {
            fill_percentage: 100,
            ..test_config()
        };
        assert!(matches!(generate(&config), Err(MapError::NoViableRooms)));
    }

    #[test]
    fn test_invalid_config_is_rejected_before_generation() {
        let config = MapConfig {
            width: 1,
            ..test_config()
        };
        assert!(matches!(
            generate(&config),
            Err(MapError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_random_seed_mode_records_seed_string() {
        let config = MapConfig {
            use_random_seed: true,
            width: 24,
            height: 24,
            room_size_minimum: 4,
            wall_size_minimum: 4,
            ..MapConfig::default()
        };
        // Random mode may legitimately fail on a hostile clock value,
        // but a success must record a replayable seed.
        if let Ok(map) = generate(&config) {
            assert!(!map.seed_string.is_empty());
            let replay = generate(&MapConfig {
                use_random_seed: false,
                seed: map.seed_string.clone(),
                ..config
            })
            .unwrap();
            assert!(replay.grid == map.grid);
        }
    }
}
