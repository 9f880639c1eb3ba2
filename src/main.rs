use clap::Parser;

use cave_generator::cave;
use cave_generator::config::MapConfig;
use cave_generator::error::Result;
use cave_generator::export;
use cave_generator::grid::Tile;

#[derive(Parser, Debug)]
#[command(name = "cave_generator")]
#[command(about = "Generate procedural cave maps with marching-squares meshes")]
struct Args {
    /// Map width in tiles
    #[arg(short = 'W', long, default_value = "128")]
    width: usize,

    /// Map height in tiles
    #[arg(short = 'H', long, default_value = "72")]
    height: usize,

    /// Initial wall fill percentage (0-100)
    #[arg(short, long, default_value = "45")]
    fill: u32,

    /// Number of smoothing passes
    #[arg(long, default_value = "5")]
    smoothing: u32,

    /// Wall regions smaller than this are opened up
    #[arg(long, default_value = "50")]
    wall_size_minimum: usize,

    /// Floor regions smaller than this are filled in
    #[arg(long, default_value = "50")]
    room_size_minimum: usize,

    /// Seed string (uses a clock-derived seed if not specified)
    #[arg(short, long)]
    seed: Option<String>,

    /// World-space size of one grid cell
    #[arg(long, default_value = "1.0")]
    square_size: f32,

    /// Export the tile grid to PNG (specify output path)
    #[arg(long)]
    export_png: Option<String>,

    /// Export the mesh to Wavefront OBJ
    #[arg(long)]
    export_obj: Option<String>,

    /// Export the full map (rooms, passages, mesh) to JSON
    #[arg(long)]
    export_json: Option<String>,
}

fn run(args: Args) -> Result<()> {
    let config = MapConfig {
        width: args.width,
        height: args.height,
        fill_percentage: args.fill,
        smoothing_iterations: args.smoothing,
        wall_size_minimum: args.wall_size_minimum,
        room_size_minimum: args.room_size_minimum,
        use_random_seed: args.seed.is_none(),
        seed: args.seed.unwrap_or_default(),
        square_size: args.square_size,
    };

    println!("Generating {}x{} cave map...", config.width, config.height);
    let map = cave::generate(&config)?;

    println!("Seed: {} (\"{}\")", map.seed, map.seed_string);
    let floor = map.grid.count(Tile::Floor);
    let total = map.grid.width * map.grid.height;
    println!(
        "Floor: {} cells ({:.1}%)",
        floor,
        100.0 * floor as f64 / total as f64
    );
    println!(
        "Rooms: {} (main room {} tiles), {} passages carved",
        map.rooms.len(),
        map.main_room().size,
        map.passages.len()
    );
    println!(
        "Mesh: {} vertices, {} triangles",
        map.mesh.vertices.len(),
        map.mesh.triangle_count()
    );

    if let Some(path) = &args.export_png {
        export::export_grid_png(&map.grid, path)?;
        println!("Wrote grid overlay to {}", path);
    }
    if let Some(path) = &args.export_obj {
        export::export_mesh_obj(&map.mesh, path)?;
        println!("Wrote mesh to {}", path);
    }
    if let Some(path) = &args.export_json {
        export::export_map_json(&map, path)?;
        println!("Wrote map report to {}", path);
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
