//! Room graph construction and corridor carving.
//!
//! Surviving floor regions become rooms in a single arena; connections
//! between rooms are stored as arena indices on both sides, so the
//! cyclic neighbour structure never owns anything. Connecting runs in
//! two phases: every isolated room first grabs its nearest neighbour,
//! then rooms still cut off from the main room are attached one
//! globally-best corridor at a time until everything is reachable.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::grid::{Coord, Grid, Tile};
use crate::regions::Region;

/// A room built from one surviving floor region.
#[derive(Clone, Debug)]
pub struct Room {
    /// All tiles of the region, in discovery order.
    pub tiles: Vec<Coord>,
    /// Floor tiles bordering a wall; corridor endpoints.
    pub edge_tiles: Vec<Coord>,
    /// Tile count.
    pub size: usize,
    /// Largest room of the map; connectivity root.
    pub is_main_room: bool,
    /// Reachable from the main room through carved corridors.
    pub is_accessible_from_main: bool,
    /// Arena indices of directly connected rooms.
    pub connected: Vec<usize>,
}

impl Room {
    /// Build a room from a region, deriving its edge tiles.
    pub fn from_region(tiles: Region, grid: &Grid) -> Self {
        let mut edge_tiles = Vec::new();
        for tile in &tiles {
            'scan: for x in tile.x - 1..=tile.x + 1 {
                for y in tile.y - 1..=tile.y + 1 {
                    // Edge-sharing neighbours only; diagonal walls don't
                    // make a tile an edge tile.
                    if (x == tile.x || y == tile.y) && grid.tile_at(x, y) == Tile::Wall {
                        edge_tiles.push(*tile);
                        break 'scan;
                    }
                }
            }
        }

        let size = tiles.len();
        Self {
            tiles,
            edge_tiles,
            size,
            is_main_room: false,
            is_accessible_from_main: false,
            connected: Vec::new(),
        }
    }

    pub fn is_connected_to(&self, other: usize) -> bool {
        self.connected.contains(&other)
    }
}

/// Build the room arena from surviving regions: largest room first,
/// marked as the main room.
///
/// The sort is stable, so equal-sized rooms keep their grid discovery
/// order and generation stays deterministic.
pub fn build_rooms(regions: Vec<Region>, grid: &Grid) -> Vec<Room> {
    let mut rooms: Vec<Room> = regions
        .into_iter()
        .map(|region| Room::from_region(region, grid))
        .collect();

    rooms.sort_by_key(|room| std::cmp::Reverse(room.size));
    if let Some(main) = rooms.first_mut() {
        main.is_main_room = true;
        main.is_accessible_from_main = true;
    }
    rooms
}

/// Connect every room to the main room, carving corridors into the grid.
///
/// Returns the carved passages as grid-space endpoint pairs, for debug
/// overlays.
pub fn connect_rooms(
    grid: &mut Grid,
    rooms: &mut [Room],
    rng: &mut ChaCha8Rng,
) -> Vec<(Coord, Coord)> {
    let mut passages = Vec::new();

    // Phase 1: each still-isolated room connects to its nearest
    // neighbour, carving immediately. Isolated clusters may remain.
    for a in 0..rooms.len() {
        if !rooms[a].connected.is_empty() {
            continue;
        }
        let candidates: Vec<usize> = (0..rooms.len()).filter(|&b| b != a).collect();
        if let Some(best) = closest_pair(rooms, &[a], &candidates) {
            carve_passage(grid, rooms, a, best.room_b, best.tile_a, best.tile_b, rng);
            passages.push((best.tile_a, best.tile_b));
        }
    }

    // Phase 2: attach unreachable rooms one corridor at a time. Each
    // carve flips at least one whole cluster to reachable, so the
    // work-list strictly shrinks.
    loop {
        let not_reachable: Vec<usize> = (0..rooms.len())
            .filter(|&i| !rooms[i].is_accessible_from_main)
            .collect();
        if not_reachable.is_empty() {
            break;
        }
        let reachable: Vec<usize> = (0..rooms.len())
            .filter(|&i| rooms[i].is_accessible_from_main)
            .collect();

        match closest_pair(rooms, &not_reachable, &reachable) {
            Some(best) => {
                carve_passage(
                    grid,
                    rooms,
                    best.room_a,
                    best.room_b,
                    best.tile_a,
                    best.tile_b,
                    rng,
                );
                passages.push((best.tile_a, best.tile_b));
            }
            // Rooms always border the wall, so every room has edge
            // tiles; reaching here is a logic defect.
            None => unreachable!("unreachable rooms but no connectable edge-tile pair"),
        }
    }

    passages
}

struct BestPair {
    room_a: usize,
    room_b: usize,
    tile_a: Coord,
    tile_b: Coord,
}

/// Globally closest edge-tile pair between two room sets, by squared
/// Euclidean distance. Strict `<`, so the first pair found wins ties.
fn closest_pair(rooms: &[Room], side_a: &[usize], side_b: &[usize]) -> Option<BestPair> {
    let mut best: Option<(i64, BestPair)> = None;

    for &a in side_a {
        for &b in side_b {
            if a == b || rooms[a].is_connected_to(b) {
                continue;
            }
            for &tile_a in &rooms[a].edge_tiles {
                for &tile_b in &rooms[b].edge_tiles {
                    let dist = tile_a.distance_sq(&tile_b);
                    if best.as_ref().map_or(true, |(d, _)| dist < *d) {
                        best = Some((
                            dist,
                            BestPair {
                                room_a: a,
                                room_b: b,
                                tile_a,
                                tile_b,
                            },
                        ));
                    }
                }
            }
        }
    }

    best.map(|(_, pair)| pair)
}

/// Record the connection in the graph and carve the corridor.
fn carve_passage(
    grid: &mut Grid,
    rooms: &mut [Room],
    a: usize,
    b: usize,
    tile_a: Coord,
    tile_b: Coord,
    rng: &mut ChaCha8Rng,
) {
    link_rooms(rooms, a, b);
    for point in line_between(tile_a, tile_b) {
        carve_disc(grid, point, rng.gen_range(0..=4));
    }
}

/// Make two rooms mutual neighbours and propagate main-room
/// accessibility through the merged component.
fn link_rooms(rooms: &mut [Room], a: usize, b: usize) {
    rooms[a].connected.push(b);
    rooms[b].connected.push(a);
    if rooms[a].is_accessible_from_main {
        mark_accessible(rooms, b);
    } else if rooms[b].is_accessible_from_main {
        mark_accessible(rooms, a);
    }
}

/// Flood the accessibility flag over the connection graph. Explicit
/// stack; room counts can be large and connection chains long.
fn mark_accessible(rooms: &mut [Room], start: usize) {
    let mut stack = vec![start];
    while let Some(idx) = stack.pop() {
        if rooms[idx].is_accessible_from_main {
            continue;
        }
        rooms[idx].is_accessible_from_main = true;
        stack.extend(rooms[idx].connected.iter().copied());
    }
}

/// Integer line from `from` towards `to`, excluding the endpoint.
///
/// Steps along the dominant axis; an error accumulator triggers a
/// minor-axis step whenever it reaches the major-axis length.
pub fn line_between(from: Coord, to: Coord) -> Vec<Coord> {
    let mut line = Vec::new();

    let mut x = from.x;
    let mut y = from.y;

    let dx = to.x - from.x;
    let dy = to.y - from.y;

    let mut step = dx.signum();
    let mut gradient_step = dy.signum();
    let mut longest = dx.abs();
    let mut shortest = dy.abs();

    let inverted = longest < shortest;
    if inverted {
        std::mem::swap(&mut longest, &mut shortest);
        std::mem::swap(&mut step, &mut gradient_step);
    }

    let mut accumulation = longest / 2;
    for _ in 0..longest {
        line.push(Coord::new(x, y));
        if inverted {
            y += step;
        } else {
            x += step;
        }

        accumulation += shortest;
        if accumulation >= longest {
            if inverted {
                x += gradient_step;
            } else {
                y += gradient_step;
            }
            accumulation -= longest;
        }
    }

    line
}

/// Stamp a filled floor disc onto the grid, clipped to bounds.
pub fn carve_disc(grid: &mut Grid, centre: Coord, radius: i32) {
    for x in -radius..=radius {
        for y in -radius..=radius {
            if x * x + y * y <= radius * radius {
                let cx = centre.x + x;
                let cy = centre.y + y;
                if grid.in_bounds(cx, cy) {
                    grid.set(cx as usize, cy as usize, Tile::Floor);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions;
    use rand::SeedableRng;

    /// Two floor chambers separated by a wall column.
    fn two_room_grid() -> Grid {
        let mut grid = Grid::new(15, 9);
        for y in 2..7 {
            for x in 2..6 {
                grid.set(x, y, Tile::Floor);
            }
            for x in 9..13 {
                grid.set(x, y, Tile::Floor);
            }
        }
        grid
    }

    #[test]
    fn test_line_length_and_start() {
        let from = Coord::new(2, 3);
        let to = Coord::new(10, 6);
        let line = line_between(from, to);
        assert_eq!(line.len(), 8); // |dx| = 8 dominates
        assert_eq!(line[0], from);
        assert!(!line.contains(&to));
    }

    #[test]
    fn test_steep_line_steps_minor_axis() {
        let line = line_between(Coord::new(0, 0), Coord::new(2, 7));
        assert_eq!(line.len(), 7);
        // Consecutive points never jump more than one cell per axis.
        for pair in line.windows(2) {
            assert!((pair[1].x - pair[0].x).abs() <= 1);
            assert!((pair[1].y - pair[0].y).abs() <= 1);
        }
    }

    #[test]
    fn test_carve_disc_clips_at_border() {
        let mut grid = Grid::new(6, 6);
        carve_disc(&mut grid, Coord::new(0, 0), 3);
        assert_eq!(grid.get(0, 0), Tile::Floor);
        assert_eq!(grid.get(5, 5), Tile::Wall);
    }

    #[test]
    fn test_zero_radius_disc_is_single_cell() {
        let mut grid = Grid::new(5, 5);
        carve_disc(&mut grid, Coord::new(2, 2), 0);
        assert_eq!(grid.count(Tile::Floor), 1);
    }

    #[test]
    fn test_edge_tiles_exclude_interior() {
        let grid = two_room_grid();
        let room_regions = regions::find_regions(&grid, Tile::Floor);
        let room = Room::from_region(room_regions[0].clone(), &grid);
        // 4x5 chamber: every tile except the 2x3 interior touches wall.
        assert_eq!(room.size, 20);
        assert_eq!(room.edge_tiles.len(), 14);
    }

    #[test]
    fn test_main_room_is_largest() {
        let mut grid = two_room_grid();
        // Enlarge the right chamber by one row.
        for x in 9..13 {
            grid.set(x, 7, Tile::Floor);
        }
        let room_regions = regions::find_regions(&grid, Tile::Floor);
        let rooms = build_rooms(room_regions, &grid);
        assert!(rooms[0].is_main_room);
        assert!(rooms[0].is_accessible_from_main);
        assert_eq!(rooms[0].size, 24);
        assert!(!rooms[1].is_main_room);
    }

    #[test]
    fn test_connect_makes_all_rooms_accessible() {
        let mut grid = two_room_grid();
        let room_regions = regions::find_regions(&grid, Tile::Floor);
        let mut rooms = build_rooms(room_regions, &grid);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let passages = connect_rooms(&mut grid, &mut rooms, &mut rng);

        assert!(!passages.is_empty());
        assert!(rooms.iter().all(|r| r.is_accessible_from_main));
        // Mutual back-references on both sides of each connection.
        for (i, room) in rooms.iter().enumerate() {
            for &j in &room.connected {
                assert!(rooms[j].is_connected_to(i));
            }
        }
    }

    #[test]
    fn test_connection_graph_is_single_component() {
        // Three chambers in a row; phase 1 may pair neighbours and leave
        // a cluster isolated, phase 2 must finish the job.
        let mut grid = Grid::new(23, 9);
        for y in 2..7 {
            for range in [2..6, 9..13, 16..20] {
                for x in range {
                    grid.set(x, y, Tile::Floor);
                }
            }
        }
        let room_regions = regions::find_regions(&grid, Tile::Floor);
        let mut rooms = build_rooms(room_regions, &grid);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        connect_rooms(&mut grid, &mut rooms, &mut rng);

        // BFS over connections from the main room reaches everything.
        let mut seen = vec![false; rooms.len()];
        let mut stack = vec![0];
        while let Some(i) = stack.pop() {
            if std::mem::replace(&mut seen[i], true) {
                continue;
            }
            stack.extend(rooms[i].connected.iter().copied());
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_corridor_opens_floor_between_rooms() {
        let mut grid = two_room_grid();
        let before = grid.count(Tile::Floor);
        let room_regions = regions::find_regions(&grid, Tile::Floor);
        let mut rooms = build_rooms(room_regions, &grid);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        connect_rooms(&mut grid, &mut rooms, &mut rng);

        // The separating wall column must have been breached.
        assert!(grid.count(Tile::Floor) > before);
        let breached = (0..9).any(|y| {
            grid.get(7, y) == Tile::Floor || grid.get(8, y) == Tile::Floor
        });
        assert!(breached);
    }
}
