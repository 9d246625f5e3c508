use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use dungen_core::{DungeonGenerator, GeneratedDungeon, GeneratorConfig};
use dungen_tools::load_config;
use log::info;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 500)]
    runs: u32,
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GeneratorConfig::default(),
    };
    let generator = DungeonGenerator::new(config).context("Generator rejected the config")?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    println!("Soaking {} dungeons from stream seed {}...", args.runs, args.seed);
    let (mut rooms, mut objects, mut shortfalls) = (0usize, 0usize, 0usize);
    for _ in 0..args.runs {
        let map_seed = rng.next_u64();
        let dungeon = generator.generate_with_seed(map_seed);
        check_invariants(&dungeon, generator.config())
            .with_context(|| format!("Invariant failed on map_seed {map_seed}"))?;

        let again = generator.generate_with_seed(map_seed);
        ensure!(
            dungeon.fingerprint() == again.fingerprint(),
            "Non-deterministic output on map_seed {map_seed}"
        );

        rooms += dungeon.rooms.len();
        objects += dungeon.objects.len();
        shortfalls += usize::from(dungeon.report.rooms_placed < dungeon.report.rooms_requested);
        info!("map_seed {map_seed}: fingerprint {:016x}", dungeon.fingerprint());
    }

    println!("Soak completed: {rooms} rooms, {objects} objects, {shortfalls} room shortfalls.");
    Ok(())
}

fn check_invariants(dungeon: &GeneratedDungeon, config: &GeneratorConfig) -> Result<()> {
    let separation = config.rooms.separation;
    for (index, room) in dungeon.rooms.iter().enumerate() {
        ensure!(
            room.rect.cells().all(|cell| dungeon.is_floor(cell)),
            "room {index} is not all floor"
        );
        for other in &dungeon.rooms[index + 1..] {
            ensure!(
                !room.rect.expanded(separation).intersects(&other.rect.expanded(separation)),
                "rooms {:?} and {:?} overlap",
                room.rect,
                other.rect
            );
        }
    }

    if config.corridors.connection_density >= 1.0 {
        ensure!(
            dungeon.report.rooms_reachable == dungeon.rooms.len(),
            "only {} of {} rooms reachable",
            dungeon.report.rooms_reachable,
            dungeon.rooms.len()
        );
    }

    for cell in dungeon.walls.walls.keys() {
        ensure!(!dungeon.is_floor(*cell), "wall classified on floor at {cell:?}");
    }

    for (index, object) in dungeon.objects.iter().enumerate() {
        let spacing = config
            .room_types
            .iter()
            .find(|room_type| room_type.name == dungeon.rooms[object.room].room_type)
            .map_or(0.0, |room_type| room_type.min_spacing);
        for other in dungeon.objects[index + 1..].iter().filter(|other| other.room == object.room) {
            ensure!(
                object.position.distance(other.position) >= spacing,
                "objects at {:?} and {:?} closer than {spacing}",
                object.position,
                other.position
            );
        }
    }

    Ok(())
}
