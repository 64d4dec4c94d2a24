//! Command-line front end: grow a tree, report it, optionally dump placements.

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use arbor_geom::Vec3;
use arbor_scatter::{GrassPatchConfig, TuftPlacement, scatter_patch};
use arbor_tree::{Generation, Placement, Pose, RecordingHost, TreeConfig, generate};

#[derive(Parser, Debug)]
#[command(
    name = "arbor",
    about = "Grow a procedural tree and classify it into detail tiers"
)]
struct Args {
    /// TOML config with [tree] and [grass] tables; defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed; omitted means a fresh tree every run
    #[arg(long)]
    seed: Option<u64>,
    /// Write the full placement record as JSON
    #[arg(long)]
    out: Option<PathBuf>,
    /// Also scatter a decorative grass patch around the root
    #[arg(long)]
    grass: bool,
}

#[derive(Debug, Default, Deserialize)]
struct AppConfig {
    #[serde(default)]
    tree: TreeConfig,
    #[serde(default)]
    grass: GrassPatchConfig,
}

#[derive(Serialize)]
struct Dump<'a> {
    seed: u64,
    generation: &'a Generation,
    placements: &'a [Placement],
    grass: &'a [TuftPlacement],
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let cfg = match &args.config {
        Some(path) => toml::from_str::<AppConfig>(&fs::read_to_string(path)?)?,
        None => AppConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
    let mut rng = StdRng::seed_from_u64(seed);
    log::info!("growing tree, seed {seed}");

    let mut host = RecordingHost::new();
    let generation = generate(Pose::upright(Vec3::ZERO), &cfg.tree, &mut rng, &mut host)?;

    let grass = if args.grass {
        scatter_patch(&cfg.grass, &mut rng)
    } else {
        Vec::new()
    };

    log::info!(
        "{} sections, {} foliage clusters, {} placements, lod {}/{}/{}, {} grass tufts",
        generation.sections.len(),
        generation.foliage.len(),
        host.placements.len(),
        generation.lod.high.len(),
        generation.lod.medium.len(),
        generation.lod.low.len(),
        grass.len(),
    );
    let bb = generation.bounds;
    log::info!(
        "bounds ({:.2}, {:.2}, {:.2}) .. ({:.2}, {:.2}, {:.2})",
        bb.min.x,
        bb.min.y,
        bb.min.z,
        bb.max.x,
        bb.max.y,
        bb.max.z,
    );

    if let Some(out) = &args.out {
        let dump = Dump {
            seed,
            generation: &generation,
            placements: &host.placements,
            grass: &grass,
        };
        fs::write(out, serde_json::to_string_pretty(&dump)?)?;
        log::info!("wrote {}", out.display());
    }

    Ok(())
}
