use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dungen_core::{DungeonGenerator, GeneratorConfig};
use dungen_tools::{load_config, render_ascii, report_json};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
    Both,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML generator config; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Overrides the seed from the config
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let generator = DungeonGenerator::new(config).context("Generator rejected the config")?;
    let dungeon = generator.generate();

    if matches!(args.format, OutputFormat::Ascii | OutputFormat::Both) {
        print!("{}", render_ascii(&dungeon));
    }
    if matches!(args.format, OutputFormat::Json | OutputFormat::Both) {
        println!("{}", report_json(&dungeon)?);
    }

    Ok(())
}
