//! Seeded binary noise fill.
//!
//! First pipeline stage: every border cell is Wall, every interior cell
//! is Wall with probability `fill_percentage / 100`. The x-outer,
//! y-inner fill order fixes how randomness maps onto cells, so it must
//! not change if seeds are to keep producing the same maps.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::grid::{Grid, Tile};

/// Fill a fresh grid with seeded noise.
pub fn generate(width: usize, height: usize, fill_percentage: u32, rng: &mut ChaCha8Rng) -> Grid {
    let mut grid = Grid::new(width, height);

    for x in 0..width {
        for y in 0..height {
            let tile = if grid.is_border(x, y) {
                Tile::Wall
            } else if rng.gen_range(0..100) < fill_percentage {
                Tile::Wall
            } else {
                Tile::Floor
            };
            grid.set(x, y, tile);
        }
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn assert_wall_border(grid: &Grid) {
        for x in 0..grid.width {
            assert_eq!(grid.get(x, 0), Tile::Wall);
            assert_eq!(grid.get(x, grid.height - 1), Tile::Wall);
        }
        for y in 0..grid.height {
            assert_eq!(grid.get(0, y), Tile::Wall);
            assert_eq!(grid.get(grid.width - 1, y), Tile::Wall);
        }
    }

    #[test]
    fn test_border_is_wall() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let grid = generate(20, 15, 45, &mut rng);
        assert_wall_border(&grid);
    }

    #[test]
    fn test_same_seed_same_grid() {
        let mut rng_a = ChaCha8Rng::seed_from_u64(42);
        let mut rng_b = ChaCha8Rng::seed_from_u64(42);
        let a = generate(30, 30, 45, &mut rng_a);
        let b = generate(30, 30, 45, &mut rng_b);
        assert!(a == b);
    }

    #[test]
    fn test_fill_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let solid = generate(10, 10, 100, &mut rng);
        assert_eq!(solid.count(Tile::Floor), 0);

        let open = generate(10, 10, 0, &mut rng);
        // Only the border remains wall.
        assert_eq!(open.count(Tile::Floor), 8 * 8);
    }
}
